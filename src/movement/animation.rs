//! Animation table and frame cursor.
//!
//! The core never picks images. It keeps a cursor into a per-state frame
//! sequence and restarts it only when the locomotion state changes.

use super::locomotion::LocomotionState;

/// Index into the renderer's sprite sheet.
pub type FrameId = u16;

/// Ordered, looping frame sequence for one state.
#[derive(Debug, Clone, PartialEq)]
pub struct AnimationClip {
    pub frames: Vec<FrameId>,
    /// Ticks each frame stays on screen.
    pub frame_ticks: f32,
}

impl AnimationClip {
    pub fn new(frames: Vec<FrameId>, frame_ticks: f32) -> Self {
        Self {
            frames,
            frame_ticks,
        }
    }

    /// `count` consecutive sheet frames starting at `first`.
    pub fn strip(first: FrameId, count: u16, frame_ticks: f32) -> Self {
        Self::new((first..first + count).collect(), frame_ticks)
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }
}

/// One clip per locomotion state, filled once at construction.
#[derive(Debug, Clone, PartialEq)]
pub struct AnimationTable {
    clips: [AnimationClip; LocomotionState::COUNT],
}

impl AnimationTable {
    pub fn from_fn(mut clip_for: impl FnMut(LocomotionState) -> AnimationClip) -> Self {
        Self {
            clips: LocomotionState::ALL.map(&mut clip_for),
        }
    }

    pub fn clip(&self, state: LocomotionState) -> &AnimationClip {
        &self.clips[state.index()]
    }
}

impl Default for AnimationTable {
    fn default() -> Self {
        Self::from_fn(|state| match state {
            LocomotionState::Stopped => AnimationClip::strip(0, 4, 12.0),
            LocomotionState::Walking => AnimationClip::strip(4, 8, 4.0),
            LocomotionState::Running => AnimationClip::strip(12, 4, 3.0),
            LocomotionState::Dashing => AnimationClip::strip(16, 4, 2.0),
            LocomotionState::Jumping => AnimationClip::strip(20, 5, 2.0),
            LocomotionState::Rolling => AnimationClip::strip(20, 5, 2.0),
        })
    }
}

/// Playback position inside the current state's clip.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct FrameCursor {
    pub frame: usize,
    /// Ticks accumulated toward the next frame.
    pub timer: f32,
    /// Updates spent in the current state, whatever their `dt`; never reset
    /// while the state holds.
    pub updates_in_state: u32,
}

impl FrameCursor {
    pub fn restart(&mut self) {
        *self = Self::default();
    }

    /// Advance by `dt` ticks, looping at the end of the clip.
    pub fn advance(&mut self, clip: &AnimationClip, dt: f32) {
        self.updates_in_state = self.updates_in_state.saturating_add(1);
        if clip.is_empty() || clip.frame_ticks <= 0.0 {
            return;
        }

        self.timer += dt;
        while self.timer >= clip.frame_ticks {
            self.timer -= clip.frame_ticks;
            self.frame = (self.frame + 1) % clip.len();
        }
    }

    pub fn frame_id(&self, clip: &AnimationClip) -> Option<FrameId> {
        clip.frames.get(self.frame).copied()
    }
}
