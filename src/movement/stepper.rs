//! Movement domain: speed and position integration for grounded and airborne ticks.

use bevy::prelude::*;

use super::observer::WallSide;
use super::resources::PhysicsTuning;
use crate::sensors::ContactFacts;

/// Air drag only applies while rising slower than this.
const AIR_DRAG_RISE_WINDOW: f32 = 4.0;

/// Continuous motion state of a body.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Kinematics {
    pub position: Vec2,
    pub x_speed: f32,
    pub y_speed: f32,
    /// Signed speed along the surface tangent.
    pub ground_speed: f32,
    /// Radians, positive when the surface rises to the right.
    pub ground_angle: f32,
}

impl Kinematics {
    pub fn at(position: Vec2) -> Self {
        Self {
            position,
            ..default()
        }
    }
}

/// Applies one archetype's constants to a body's motion. Every step is
/// scaled by `dt` in 60 Hz ticks.
#[derive(Debug, Clone, Copy)]
pub struct PhysicsStepper<'a> {
    tuning: &'a PhysicsTuning,
}

impl<'a> PhysicsStepper<'a> {
    pub fn new(tuning: &'a PhysicsTuning) -> Self {
        Self { tuning }
    }

    /// Accelerate toward `axis`, or apply friction when there is no axis.
    pub fn apply_ground_input(&self, motion: &mut Kinematics, axis: Option<f32>, dt: f32) {
        match axis {
            Some(direction) => {
                let top = self.tuning.top_speed;
                motion.ground_speed = (motion.ground_speed
                    + direction * self.tuning.acceleration * dt)
                    .clamp(-top, top);
            }
            None => self.apply_friction(motion, self.tuning.friction, dt),
        }
    }

    /// Slow toward zero without crossing it.
    pub fn apply_friction(&self, motion: &mut Kinematics, friction: f32, dt: f32) {
        let step = friction * dt;
        if motion.ground_speed.abs() <= step {
            motion.ground_speed = 0.0;
        } else {
            motion.ground_speed -= step * motion.ground_speed.signum();
        }
    }

    /// Move along the surface, then press into it so the floor probes can
    /// find it again.
    pub fn integrate_ground(&self, motion: &mut Kinematics, dt: f32) {
        let (sin, cos) = motion.ground_angle.sin_cos();
        motion.position.x += motion.ground_speed * cos * dt;
        motion.position.y -= motion.ground_speed * sin * dt;
        motion.position.y += self.tuning.ground_stick;
        motion.y_speed = 0.0;
    }

    pub fn apply_gravity(&self, motion: &mut Kinematics, dt: f32) {
        motion.y_speed += self.tuning.gravity * dt;
        if let Some(cap) = self.tuning.terminal_velocity {
            motion.y_speed = motion.y_speed.min(cap);
        }
    }

    /// Cut a rising jump short once the button is released.
    pub fn release_jump(&self, motion: &mut Kinematics) {
        let cap = -self.tuning.jump_release_speed;
        if motion.y_speed < cap {
            motion.y_speed = cap;
        }
    }

    pub fn apply_air_input(&self, motion: &mut Kinematics, axis: Option<f32>, dt: f32) {
        let Some(direction) = axis else {
            return;
        };

        let top = self.tuning.top_speed;
        let next = motion.x_speed + direction * self.tuning.air_acceleration * dt;
        // Never pull an already faster body back to top speed
        if next.abs() <= top || next.abs() < motion.x_speed.abs() {
            motion.x_speed = next;
        } else {
            motion.x_speed = motion.x_speed.abs().max(top) * direction;
        }
    }

    pub fn apply_air_drag(&self, motion: &mut Kinematics, dt: f32) {
        if motion.y_speed < 0.0 && motion.y_speed > -AIR_DRAG_RISE_WINDOW {
            motion.x_speed *= self.tuning.air_drag.powf(dt);
        }
    }

    pub fn integrate_air(&self, motion: &mut Kinematics, allow_vertical: bool, dt: f32) {
        motion.position.x += motion.x_speed * dt;
        if allow_vertical {
            motion.position.y += motion.y_speed * dt;
        }
    }

    /// Leave the ground perpendicular to the surface.
    pub fn launch_jump(&self, motion: &mut Kinematics) {
        let (sin, cos) = motion.ground_angle.sin_cos();
        let jump = self.tuning.jump_speed;
        motion.x_speed = motion.ground_speed * cos - jump * sin;
        motion.y_speed = -motion.ground_speed * sin - jump * cos;
        motion.ground_angle = 0.0;
    }

    /// Convert ground speed into free speed after losing the floor.
    pub fn detach(&self, motion: &mut Kinematics) {
        let (sin, cos) = motion.ground_angle.sin_cos();
        motion.x_speed = motion.ground_speed * cos;
        motion.y_speed = -motion.ground_speed * sin;
        motion.ground_angle = 0.0;
    }

    /// Undo the grounded press-down when no floor was found under it.
    pub fn lift_ground_stick(&self, motion: &mut Kinematics) {
        motion.position.y -= self.tuning.ground_stick;
    }

    /// Fold free horizontal speed back into ground speed.
    pub fn land(&self, motion: &mut Kinematics, facts: &ContactFacts) {
        let top = self.tuning.top_speed;
        self.snap_to_ground(motion, facts);
        motion.ground_speed = motion.x_speed.clamp(-top, top);
        motion.y_speed = 0.0;
    }

    /// Lift the body out of the floor by the resolved penetration depth.
    pub fn snap_to_ground(&self, motion: &mut Kinematics, facts: &ContactFacts) {
        if let Some(depth) = facts.ground_penetration_depth {
            motion.position.y -= depth as f32;
        }
        motion.ground_angle = facts.ground_angle();
        motion.y_speed = 0.0;
    }

    /// Push out of any wall the wall probes report and stop motion into it.
    /// Returns the deepest wall hit.
    pub fn push_out_of_walls(
        &self,
        motion: &mut Kinematics,
        facts: &ContactFacts,
        grounded: bool,
    ) -> Option<(WallSide, i32)> {
        let mut hit: Option<(WallSide, i32)> = None;

        if let Some(depth) = facts.right_wall_depth {
            motion.position.x -= depth as f32;
            self.stop_toward(motion, 1.0, grounded);
            hit = Some((WallSide::Right, depth));
        }
        if let Some(depth) = facts.left_wall_depth {
            motion.position.x += depth as f32;
            self.stop_toward(motion, -1.0, grounded);
            if hit.is_none_or(|(_, d)| depth > d) {
                hit = Some((WallSide::Left, depth));
            }
        }

        hit
    }

    fn stop_toward(&self, motion: &mut Kinematics, direction: f32, grounded: bool) {
        if grounded {
            if motion.ground_speed * direction > 0.0 {
                motion.ground_speed = 0.0;
            }
        } else if motion.x_speed * direction > 0.0 {
            motion.x_speed = 0.0;
        }
    }
}
