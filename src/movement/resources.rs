//! Movement domain: archetype tuning and input intent resources.

use bevy::prelude::*;
use serde::Deserialize;

use crate::sensors::SensorLayout;

/// Physics constants for one character archetype. Speeds are pixels per
/// 60 Hz tick, accelerations pixels per tick squared.
#[derive(Resource, Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct PhysicsTuning {
    pub acceleration: f32,
    pub friction: f32,
    pub top_speed: f32,
    pub gravity: f32,
    pub jump_speed: f32,
    /// Upward speed is capped to this when jump is released early.
    pub jump_release_speed: f32,
    pub air_acceleration: f32,
    /// Horizontal damping factor per tick while rising slowly.
    pub air_drag: f32,
    pub terminal_velocity: Option<f32>,
    pub running_threshold: f32,
    pub dashing_threshold: f32,
    pub roll_min_speed: f32,
    pub roll_friction: f32,
    /// Ticks of horizontal lock after a roll decays to a stop.
    pub roll_recovery_lock: f32,
    /// Pixels the body is pressed into the floor each grounded tick.
    pub ground_stick: f32,
    pub steep_angle_degrees: f32,
    pub slip_speed: f32,
    pub slip_lock: f32,
    pub sensors: SensorLayout,
}

impl Default for PhysicsTuning {
    fn default() -> Self {
        Self {
            acceleration: 0.5,
            friction: 0.5,
            top_speed: 6.0,
            gravity: 0.21875,
            jump_speed: 6.5,
            jump_release_speed: 4.0,
            air_acceleration: 0.09375,
            air_drag: 0.96875,
            terminal_velocity: None,
            running_threshold: 6.0,
            dashing_threshold: 10.0,
            roll_min_speed: 1.0,
            roll_friction: 0.25,
            roll_recovery_lock: 8.0,
            ground_stick: 4.0,
            steep_angle_degrees: 46.0,
            slip_speed: 2.5,
            slip_lock: 30.0,
            sensors: SensorLayout::default(),
        }
    }
}

impl PhysicsTuning {
    pub fn steep_angle(&self) -> f32 {
        self.steep_angle_degrees.to_radians()
    }

    /// Peak height of a standing jump, ignoring air drag.
    pub fn jump_height(&self) -> f32 {
        self.jump_speed * self.jump_speed / (2.0 * self.gravity)
    }
}

/// Per-tick control intent supplied by the input collaborator.
#[derive(Resource, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InputIntent {
    pub left: bool,
    pub right: bool,
    pub up: bool,
    pub down: bool,
    pub jump: bool,
    pub roll: bool,
}

impl InputIntent {
    pub fn neutral() -> Self {
        Self::default()
    }

    pub fn right() -> Self {
        Self {
            right: true,
            ..default()
        }
    }

    pub fn left() -> Self {
        Self {
            left: true,
            ..default()
        }
    }

    /// -1 for left, 1 for right, `None` for neither or both.
    pub fn horizontal_axis(&self) -> Option<f32> {
        match (self.left, self.right) {
            (true, false) => Some(-1.0),
            (false, true) => Some(1.0),
            _ => None,
        }
    }

    pub fn wants_roll(&self) -> bool {
        self.roll || self.down
    }
}
