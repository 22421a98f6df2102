//! Sensors domain: the fixed probe constellation and the contact facts it produces.

use bevy::prelude::*;
use serde::Deserialize;

use super::sensor::{Sensor, SensorReading, SensorRole};
use crate::collision::LevelGeometry;

/// Placement of one probe relative to the body origin.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct ProbeDef {
    pub offset: (f32, f32),
    pub size: (u32, u32),
}

impl ProbeDef {
    pub const fn new(x: f32, y: f32, width: u32, height: u32) -> Self {
        Self {
            offset: (x, y),
            size: (width, height),
        }
    }
}

/// Probe layout for one character archetype.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SensorLayout {
    pub left_wall: ProbeDef,
    pub right_wall: ProbeDef,
    pub left_floor: ProbeDef,
    pub right_floor: ProbeDef,
}

impl Default for SensorLayout {
    fn default() -> Self {
        // Centre of the 50px character frame sits at (25, 29)
        Self {
            left_wall: ProbeDef::new(17.0, 29.0, 8, 1),
            right_wall: ProbeDef::new(26.0, 29.0, 8, 1),
            left_floor: ProbeDef::new(18.0, 30.0, 1, 19),
            right_floor: ProbeDef::new(32.0, 30.0, 1, 19),
        }
    }
}

impl SensorLayout {
    pub fn probe(&self, role: SensorRole) -> &ProbeDef {
        match role {
            SensorRole::LeftWall => &self.left_wall,
            SensorRole::RightWall => &self.right_wall,
            SensorRole::LeftFloor => &self.left_floor,
            SensorRole::RightFloor => &self.right_floor,
        }
    }
}

/// Where a floor probe met the surface, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FloorContact {
    pub x: i32,
    pub surface_y: i32,
    /// The whole probe is inside solid pixels, so `surface_y` is only a
    /// lower bound on the surface height.
    pub embedded: bool,
}

/// Contact summary for one tick. Ceiling contact would slot in here as
/// another probe pair.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ContactFacts {
    pub on_left_floor: bool,
    pub on_right_floor: bool,
    pub on_left_wall: bool,
    pub on_right_wall: bool,
    /// Deeper of the two floor probes.
    pub ground_penetration_depth: Option<i32>,
    pub left_wall_depth: Option<i32>,
    pub right_wall_depth: Option<i32>,
    pub left_floor_contact: Option<FloorContact>,
    pub right_floor_contact: Option<FloorContact>,
}

impl ContactFacts {
    pub fn on_ground(&self) -> bool {
        self.on_left_floor || self.on_right_floor
    }

    pub fn on_wall(&self) -> bool {
        self.on_left_wall || self.on_right_wall
    }

    /// Slope between the two floor contacts in radians, positive when the
    /// surface rises to the right. Flat unless both floor probes found the
    /// surface inside their span; an embedded probe means a step, not a slope.
    pub fn ground_angle(&self) -> f32 {
        match (self.left_floor_contact, self.right_floor_contact) {
            (Some(left), Some(right))
                if right.x != left.x && !left.embedded && !right.embedded =>
            {
                let rise = (left.surface_y - right.surface_y) as f32;
                let run = (right.x - left.x) as f32;
                rise.atan2(run)
            }
            _ => 0.0,
        }
    }
}

#[derive(Debug, Clone)]
pub struct SensorArray {
    sensors: [Sensor; 4],
}

impl SensorArray {
    pub fn new(layout: &SensorLayout) -> Self {
        let sensors = SensorRole::ALL.map(|role| {
            let probe = layout.probe(role);
            Sensor::new(
                role,
                Vec2::new(probe.offset.0, probe.offset.1),
                UVec2::new(probe.size.0, probe.size.1),
            )
        });
        Self { sensors }
    }

    pub fn sensor(&self, role: SensorRole) -> &Sensor {
        &self.sensors[role.index()]
    }

    pub fn iter(&self) -> impl Iterator<Item = &Sensor> {
        self.sensors.iter()
    }

    /// Move every probe to follow the body without testing.
    pub fn reposition(&mut self, body_position: Vec2) {
        for sensor in &mut self.sensors {
            sensor.reposition(body_position);
        }
    }

    /// Reposition and test every probe independently.
    pub fn refresh(&mut self, body_position: Vec2, level: &LevelGeometry) -> ContactFacts {
        self.refresh_split(body_position, body_position, level)
    }

    /// Like [`SensorArray::refresh`], with the wall probes tested from their
    /// own body position. A grounded body tests floors pressed into the
    /// surface and walls at rest height.
    pub fn refresh_split(
        &mut self,
        floor_position: Vec2,
        wall_position: Vec2,
        level: &LevelGeometry,
    ) -> ContactFacts {
        let mut readings = [SensorReading::default(); 4];
        for sensor in &mut self.sensors {
            if sensor.role().is_floor() {
                sensor.reposition(floor_position);
            } else {
                sensor.reposition(wall_position);
            }
            let area = sensor.rect();
            readings[sensor.role().index()] = sensor.test(level.nearby(area));
        }

        let floor_contact = |role: SensorRole| {
            let reading = readings[role.index()];
            let rect = self.sensors[role.index()].rect();
            reading.depth.map(|depth| FloorContact {
                x: rect.min.x,
                surface_y: rect.max.y - depth,
                embedded: depth >= rect.height(),
            })
        };

        let left_floor = readings[SensorRole::LeftFloor.index()];
        let right_floor = readings[SensorRole::RightFloor.index()];
        let left_wall = readings[SensorRole::LeftWall.index()];
        let right_wall = readings[SensorRole::RightWall.index()];

        let ground_penetration_depth = match (left_floor.depth, right_floor.depth) {
            (Some(l), Some(r)) => Some(l.max(r)),
            (l, r) => l.or(r),
        };

        ContactFacts {
            on_left_floor: left_floor.activated,
            on_right_floor: right_floor.activated,
            on_left_wall: left_wall.activated,
            on_right_wall: right_wall.activated,
            ground_penetration_depth,
            left_wall_depth: left_wall.depth,
            right_wall_depth: right_wall.depth,
            left_floor_contact: floor_contact(SensorRole::LeftFloor),
            right_floor_contact: floor_contact(SensorRole::RightFloor),
        }
    }
}
