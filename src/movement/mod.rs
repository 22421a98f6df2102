//! Movement domain: sensor-driven player physics and plugin wiring.

mod animation;
mod body;
mod events;
mod locomotion;
mod observer;
mod resources;
mod stepper;
mod systems;


pub use animation::{AnimationClip, AnimationTable, FrameCursor, FrameId};
pub use body::{ControlFlags, LockTimer, PlayerBody, Support};
pub use events::LocomotionChanged;
pub use locomotion::{LocomotionState, LocomotionStateMachine};
pub use observer::{LogObserver, ObserverSlot, PhysicsEvent, PhysicsObserver, WallSide};
pub use resources::{InputIntent, PhysicsTuning};
pub use stepper::{Kinematics, PhysicsStepper};
pub use systems::TICKS_PER_SECOND;

use bevy::prelude::*;

use crate::collision::LevelGeometry;
use crate::movement::systems::{read_input, step_bodies};

#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub enum MovementSystems {
    ReadInput,
    Step,
}

pub struct MovementPlugin;

impl Plugin for MovementPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<PhysicsTuning>()
            .init_resource::<InputIntent>()
            .init_resource::<LevelGeometry>()
            .add_message::<LocomotionChanged>()
            .configure_sets(
                Update,
                (MovementSystems::ReadInput, MovementSystems::Step).chain(),
            )
            .add_systems(Update, read_input.in_set(MovementSystems::ReadInput))
            .add_systems(Update, step_bodies.in_set(MovementSystems::Step));
    }
}
