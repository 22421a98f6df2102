//! Movement domain: discrete locomotion states.

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
pub enum LocomotionState {
    #[default]
    Stopped,
    Walking,
    Running,
    Dashing,
    Jumping,
    Rolling,
}

impl LocomotionState {
    pub const COUNT: usize = 6;

    pub const ALL: [LocomotionState; Self::COUNT] = [
        LocomotionState::Stopped,
        LocomotionState::Walking,
        LocomotionState::Running,
        LocomotionState::Dashing,
        LocomotionState::Jumping,
        LocomotionState::Rolling,
    ];

    pub fn index(self) -> usize {
        match self {
            LocomotionState::Stopped => 0,
            LocomotionState::Walking => 1,
            LocomotionState::Running => 2,
            LocomotionState::Dashing => 3,
            LocomotionState::Jumping => 4,
            LocomotionState::Rolling => 5,
        }
    }
}

/// Maps contact and speed to a state. Rules are checked in order and the
/// speed bands are half-open, so every input has exactly one answer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LocomotionStateMachine {
    pub running_threshold: f32,
    pub dashing_threshold: f32,
}

impl LocomotionStateMachine {
    pub fn new(running_threshold: f32, dashing_threshold: f32) -> Self {
        Self {
            running_threshold,
            dashing_threshold,
        }
    }

    pub fn evaluate(
        &self,
        on_ground: bool,
        ground_speed: f32,
        jump_active: bool,
        rolling: bool,
    ) -> LocomotionState {
        if !on_ground && jump_active {
            return LocomotionState::Jumping;
        }
        // Falling off a ledge shares the jump pose
        if !on_ground {
            return LocomotionState::Jumping;
        }
        if rolling {
            return LocomotionState::Rolling;
        }

        let speed = ground_speed.abs();
        if speed == 0.0 {
            LocomotionState::Stopped
        } else if speed < self.running_threshold {
            LocomotionState::Walking
        } else if speed < self.dashing_threshold {
            LocomotionState::Running
        } else {
            LocomotionState::Dashing
        }
    }
}
