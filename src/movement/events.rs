//! Movement domain: messages emitted by the stepping system.

use bevy::ecs::message::Message;
use bevy::prelude::*;

use super::locomotion::LocomotionState;

/// Fired when a body's locomotion state changes.
#[derive(Debug, Clone, Copy)]
pub struct LocomotionChanged {
    pub entity: Entity,
    pub from: LocomotionState,
    pub to: LocomotionState,
}

impl Message for LocomotionChanged {}
