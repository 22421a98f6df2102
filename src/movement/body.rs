//! Movement domain: the player body aggregate and its per-tick update.

use bevy::prelude::*;

use super::animation::{AnimationTable, FrameCursor, FrameId};
use super::locomotion::{LocomotionState, LocomotionStateMachine};
use super::observer::{ObserverSlot, PhysicsEvent, PhysicsObserver};
use super::resources::{InputIntent, PhysicsTuning};
use super::stepper::{Kinematics, PhysicsStepper};
use crate::collision::LevelGeometry;
use crate::sensors::{ContactFacts, SensorArray};

/// Ground or air. Exactly one holds at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Support {
    Grounded,
    #[default]
    Airborne,
}

/// Control latches that survive between ticks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ControlFlags {
    /// Jump has been released since the last jump.
    pub allow_jump: bool,
    /// Jump button state from the previous update; a jump needs a fresh press.
    pub jump_held: bool,
    /// Cleared through [`PlayerBody::set_vertical_movement`] to freeze airborne
    /// vertical motion.
    pub allow_vertical_movement: bool,
    /// A fresh jump press is waiting to be consumed this tick.
    pub jump_queued: bool,
    /// Set on the tick the floor was lost without jumping.
    pub fell_off_surface: bool,
    /// Airborne because of a jump rather than a fall.
    pub jump_active: bool,
    pub rolling: bool,
}

impl Default for ControlFlags {
    fn default() -> Self {
        Self {
            allow_jump: true,
            jump_held: false,
            allow_vertical_movement: true,
            jump_queued: false,
            fell_off_surface: false,
            jump_active: false,
            rolling: false,
        }
    }
}

/// Countdown in ticks that blocks horizontal control while positive.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct LockTimer(f32);

impl LockTimer {
    pub fn engage(&mut self, ticks: f32) {
        self.0 = self.0.max(ticks);
    }

    pub fn tick(&mut self, dt: f32) {
        if self.0 > 0.0 {
            self.0 = (self.0 - dt).max(0.0);
        }
    }

    pub fn remaining(&self) -> f32 {
        self.0
    }

    pub fn is_locked(&self) -> bool {
        self.0 > 0.0
    }
}

#[derive(Component, Debug)]
pub struct PlayerBody {
    pub motion: Kinematics,
    tuning: PhysicsTuning,
    support: Support,
    flags: ControlFlags,
    lock: LockTimer,
    sensors: SensorArray,
    contacts: ContactFacts,
    locomotion: LocomotionStateMachine,
    state: LocomotionState,
    cursor: FrameCursor,
    animations: AnimationTable,
    intent: InputIntent,
    observer: ObserverSlot,
}

impl PlayerBody {
    /// A body starts airborne; call [`PlayerBody::place`] to settle it onto the level.
    pub fn new(position: Vec2, tuning: PhysicsTuning) -> Self {
        let mut sensors = SensorArray::new(&tuning.sensors);
        sensors.reposition(position);
        let locomotion =
            LocomotionStateMachine::new(tuning.running_threshold, tuning.dashing_threshold);

        Self {
            motion: Kinematics::at(position),
            tuning,
            support: Support::Airborne,
            flags: ControlFlags::default(),
            lock: LockTimer::default(),
            sensors,
            contacts: ContactFacts::default(),
            locomotion,
            state: LocomotionState::Jumping,
            cursor: FrameCursor::default(),
            animations: AnimationTable::default(),
            intent: InputIntent::default(),
            observer: ObserverSlot::default(),
        }
    }

    pub fn with_animations(mut self, animations: AnimationTable) -> Self {
        self.animations = animations;
        self
    }

    pub fn with_observer(mut self, observer: impl PhysicsObserver + 'static) -> Self {
        self.observer.set(observer);
        self
    }

    /// Teleport, then stand on whatever floor is directly under the feet.
    pub fn place(&mut self, position: Vec2, level: &LevelGeometry) {
        self.motion = Kinematics::at(position);
        self.flags = ControlFlags::default();

        let stepper = PhysicsStepper::new(&self.tuning);
        self.motion.position.y += self.tuning.ground_stick;
        self.contacts = self
            .sensors
            .refresh_split(self.motion.position, position, level);
        if self.contacts.on_ground() {
            stepper.snap_to_ground(&mut self.motion, &self.contacts);
            self.support = Support::Grounded;
        } else {
            stepper.lift_ground_stick(&mut self.motion);
            self.support = Support::Airborne;
        }
        self.sensors.reposition(self.motion.position);

        let state = self.evaluate_state();
        self.enter_state(state);
    }

    /// Freeze or release vertical motion while airborne. Gravity is skipped
    /// and `y` is held while frozen; horizontal air control still applies.
    pub fn set_vertical_movement(&mut self, allowed: bool) {
        self.flags.allow_vertical_movement = allowed;
    }

    pub fn lock_horizontal(&mut self, ticks: f32) {
        self.lock.engage(ticks);
        self.observer.emit(PhysicsEvent::ControlLocked { ticks });
    }

    /// Advance one tick of `dt` 60 Hz frames. Non-positive or non-finite
    /// `dt` leaves the body untouched.
    pub fn update(&mut self, dt: f32, input: &InputIntent, level: &LevelGeometry) {
        if !(dt > 0.0 && dt.is_finite()) {
            return;
        }

        self.intent = *input;
        self.lock.tick(dt);
        let axis = if self.lock.is_locked() {
            None
        } else {
            input.horizontal_axis()
        };

        self.flags.jump_queued = input.jump && !self.flags.jump_held && self.flags.allow_jump;
        self.flags.jump_held = input.jump;
        if !input.jump {
            self.flags.allow_jump = true;
        }
        self.flags.fell_off_surface = false;

        if self.support == Support::Grounded {
            self.grounded_step(axis, input, dt);
        }
        if self.support == Support::Airborne {
            self.airborne_step(axis, input, dt);
        }

        self.resolve_contacts(level);
        self.sensors.reposition(self.motion.position);
        self.flags.jump_queued = false;

        let state = self.evaluate_state();
        if state == self.state {
            let clip = self.animations.clip(state);
            self.cursor.advance(clip, dt);
        } else {
            self.enter_state(state);
        }
    }

    fn grounded_step(&mut self, axis: Option<f32>, input: &InputIntent, dt: f32) {
        let stepper = PhysicsStepper::new(&self.tuning);

        if self.flags.jump_queued {
            stepper.launch_jump(&mut self.motion);
            self.support = Support::Airborne;
            self.flags.jump_active = true;
            self.flags.allow_jump = false;
            self.flags.rolling = false;
            self.observer.emit(PhysicsEvent::Jumped {
                ground_speed: self.motion.ground_speed,
            });
            return;
        }

        if !self.flags.rolling
            && input.wants_roll()
            && self.motion.ground_speed.abs() >= self.tuning.roll_min_speed
        {
            self.flags.rolling = true;
            self.observer.emit(PhysicsEvent::RollStarted);
        }

        if self.flags.rolling {
            stepper.apply_friction(&mut self.motion, self.tuning.roll_friction, dt);
            if self.motion.ground_speed == 0.0 {
                self.flags.rolling = false;
                let ticks = self.tuning.roll_recovery_lock;
                self.lock.engage(ticks);
                self.observer.emit(PhysicsEvent::RollEnded);
                self.observer.emit(PhysicsEvent::ControlLocked { ticks });
            }
        } else {
            stepper.apply_ground_input(&mut self.motion, axis, dt);
        }

        if self.motion.ground_angle.abs() >= self.tuning.steep_angle()
            && self.motion.ground_speed.abs() < self.tuning.slip_speed
        {
            self.fall_off();
            self.lock_horizontal(self.tuning.slip_lock);
            return;
        }

        stepper.integrate_ground(&mut self.motion, dt);
    }

    fn airborne_step(&mut self, axis: Option<f32>, input: &InputIntent, dt: f32) {
        let stepper = PhysicsStepper::new(&self.tuning);
        let allow_vertical = self.flags.allow_vertical_movement;

        if allow_vertical {
            stepper.apply_gravity(&mut self.motion, dt);
        }
        if self.flags.jump_active && !input.jump {
            stepper.release_jump(&mut self.motion);
        }
        stepper.apply_air_input(&mut self.motion, axis, dt);
        stepper.apply_air_drag(&mut self.motion, dt);
        stepper.integrate_air(&mut self.motion, allow_vertical, dt);
    }

    fn resolve_contacts(&mut self, level: &LevelGeometry) {
        let stepper = PhysicsStepper::new(&self.tuning);
        let grounded = self.support == Support::Grounded;
        // Walls are tested at rest height, not pressed into the floor
        let wall_lift = if grounded {
            Vec2::new(0.0, self.tuning.ground_stick)
        } else {
            Vec2::ZERO
        };

        let position = self.motion.position;
        self.contacts = self
            .sensors
            .refresh_split(position, position - wall_lift, level);
        if let Some((side, depth)) =
            stepper.push_out_of_walls(&mut self.motion, &self.contacts, grounded)
        {
            self.observer.emit(PhysicsEvent::HitWall { side, depth });
            // Floor probes sit inside the wall probes' span, so test again clear of the wall
            let position = self.motion.position;
            self.contacts = self
                .sensors
                .refresh_split(position, position - wall_lift, level);
        }

        match (self.support, self.contacts.on_ground()) {
            (Support::Grounded, true) => {
                stepper.snap_to_ground(&mut self.motion, &self.contacts);
            }
            (Support::Grounded, false) => {
                stepper.lift_ground_stick(&mut self.motion);
                let steep = self.motion.ground_angle.abs() >= self.tuning.steep_angle();
                self.fall_off();
                if steep {
                    self.lock_horizontal(self.tuning.slip_lock);
                }
            }
            (Support::Airborne, true) if self.motion.y_speed >= 0.0 => {
                stepper.land(&mut self.motion, &self.contacts);
                self.support = Support::Grounded;
                self.flags.jump_active = false;
                self.flags.rolling = false;
                self.observer.emit(PhysicsEvent::Landed {
                    ground_speed: self.motion.ground_speed,
                });
            }
            (Support::Airborne, _) => {}
        }
    }

    fn fall_off(&mut self) {
        PhysicsStepper::new(&self.tuning).detach(&mut self.motion);
        self.support = Support::Airborne;
        self.flags.fell_off_surface = true;
        self.flags.jump_active = false;
        self.flags.rolling = false;
        self.observer.emit(PhysicsEvent::FellOff {
            ground_speed: self.motion.ground_speed,
        });
    }

    fn evaluate_state(&self) -> LocomotionState {
        self.locomotion.evaluate(
            self.support == Support::Grounded,
            self.motion.ground_speed,
            self.flags.jump_active,
            self.flags.rolling,
        )
    }

    fn enter_state(&mut self, state: LocomotionState) {
        if state != self.state {
            self.observer.emit(PhysicsEvent::StateChanged {
                from: self.state,
                to: state,
            });
            self.state = state;
        }
        self.cursor.restart();
    }

    pub fn position(&self) -> Vec2 {
        self.motion.position
    }

    pub fn ground_speed(&self) -> f32 {
        self.motion.ground_speed
    }

    pub fn tuning(&self) -> &PhysicsTuning {
        &self.tuning
    }

    pub fn support(&self) -> Support {
        self.support
    }

    pub fn on_ground(&self) -> bool {
        self.support == Support::Grounded
    }

    pub fn flags(&self) -> &ControlFlags {
        &self.flags
    }

    pub fn allow_horizontal_movement(&self) -> bool {
        !self.lock.is_locked()
    }

    pub fn lock_timer(&self) -> &LockTimer {
        &self.lock
    }

    pub fn sensors(&self) -> &SensorArray {
        &self.sensors
    }

    pub fn contacts(&self) -> &ContactFacts {
        &self.contacts
    }

    pub fn state(&self) -> LocomotionState {
        self.state
    }

    pub fn cursor(&self) -> &FrameCursor {
        &self.cursor
    }

    pub fn frame_index(&self) -> usize {
        self.cursor.frame
    }

    pub fn frame_id(&self) -> Option<FrameId> {
        self.cursor.frame_id(self.animations.clip(self.state))
    }

    pub fn intent(&self) -> &InputIntent {
        &self.intent
    }

    pub fn observer_mut(&mut self) -> &mut ObserverSlot {
        &mut self.observer
    }
}
