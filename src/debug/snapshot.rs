//! Debug domain: serialisable copies of a body's pose.

use bevy::prelude::*;
use serde::Serialize;

use crate::movement::{LocomotionState, PlayerBody};
use crate::sensors::SensorRole;

fn rect_corners(rect: IRect) -> [i32; 4] {
    [rect.min.x, rect.min.y, rect.max.x, rect.max.y]
}

/// One probe as a renderer would draw it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SensorSnapshot {
    pub role: SensorRole,
    pub activated: bool,
    /// Current probe rect, `[min_x, min_y, max_x, max_y]`, max exclusive.
    pub rect: [i32; 4],
    /// Rect the probe was last tested at. `activated` and `depth` describe
    /// this rect; floor probes are tested pressed into the ground.
    pub tested_rect: Option<[i32; 4]>,
    pub depth: Option<i32>,
}

/// Everything the renderer reads from a body after a tick.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PoseSnapshot {
    pub position: [f32; 2],
    pub x_speed: f32,
    pub y_speed: f32,
    pub ground_speed: f32,
    pub ground_angle: f32,
    pub state: LocomotionState,
    pub frame_index: usize,
    pub frame_id: Option<u16>,
    pub on_ground: bool,
    pub lock_remaining: f32,
    pub sensors: Vec<SensorSnapshot>,
}

impl PoseSnapshot {
    pub fn capture(body: &PlayerBody) -> Self {
        let sensors = body
            .sensors()
            .iter()
            .map(|sensor| SensorSnapshot {
                role: sensor.role(),
                activated: sensor.activated,
                rect: rect_corners(sensor.rect()),
                tested_rect: sensor.tested_rect.map(rect_corners),
                depth: sensor.last_penetration_depth,
            })
            .collect();

        Self {
            position: body.position().to_array(),
            x_speed: body.motion.x_speed,
            y_speed: body.motion.y_speed,
            ground_speed: body.ground_speed(),
            ground_angle: body.motion.ground_angle,
            state: body.state(),
            frame_index: body.frame_index(),
            frame_id: body.frame_id(),
            on_ground: body.on_ground(),
            lock_remaining: body.lock_timer().remaining(),
            sensors,
        }
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}
