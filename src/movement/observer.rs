//! Optional event hook for watching the physics core from outside.

use bevy::prelude::*;

use super::locomotion::LocomotionState;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WallSide {
    Left,
    Right,
}

/// Notable things that happened during a tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PhysicsEvent {
    StateChanged {
        from: LocomotionState,
        to: LocomotionState,
    },
    Jumped {
        ground_speed: f32,
    },
    Landed {
        ground_speed: f32,
    },
    FellOff {
        ground_speed: f32,
    },
    HitWall {
        side: WallSide,
        depth: i32,
    },
    ControlLocked {
        ticks: f32,
    },
    RollStarted,
    RollEnded,
}

pub trait PhysicsObserver: Send + Sync {
    fn on_event(&mut self, event: &PhysicsEvent);
}

impl<F> PhysicsObserver for F
where
    F: FnMut(&PhysicsEvent) + Send + Sync,
{
    fn on_event(&mut self, event: &PhysicsEvent) {
        self(event)
    }
}

/// Forwards every event to the debug log.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogObserver;

impl PhysicsObserver for LogObserver {
    fn on_event(&mut self, event: &PhysicsEvent) {
        debug!("Physics event: {:?}", event);
    }
}

/// Holds at most one observer; empty unless one is attached.
#[derive(Default)]
pub struct ObserverSlot(Option<Box<dyn PhysicsObserver>>);

impl ObserverSlot {
    pub fn set(&mut self, observer: impl PhysicsObserver + 'static) {
        self.0 = Some(Box::new(observer));
    }

    pub fn clear(&mut self) {
        self.0 = None;
    }

    pub fn is_attached(&self) -> bool {
        self.0.is_some()
    }

    pub fn emit(&mut self, event: PhysicsEvent) {
        if let Some(observer) = self.0.as_mut() {
            observer.on_event(&event);
        }
    }
}

impl std::fmt::Debug for ObserverSlot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("ObserverSlot")
            .field(&self.is_attached())
            .finish()
    }
}
