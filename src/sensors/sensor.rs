//! Sensors domain: a single line probe rigidly attached to the body.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::collision::{CollisionMask, Platform, ScanOrder, pixel_rect, query_rect_overlap_ordered};

/// Which side of the body a probe watches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub enum SensorRole {
    LeftWall,
    RightWall,
    LeftFloor,
    RightFloor,
}

impl SensorRole {
    pub const ALL: [SensorRole; 4] = [
        SensorRole::LeftWall,
        SensorRole::RightWall,
        SensorRole::LeftFloor,
        SensorRole::RightFloor,
    ];

    pub fn index(self) -> usize {
        match self {
            SensorRole::LeftWall => 0,
            SensorRole::RightWall => 1,
            SensorRole::LeftFloor => 2,
            SensorRole::RightFloor => 3,
        }
    }

    pub fn is_floor(self) -> bool {
        matches!(self, SensorRole::LeftFloor | SensorRole::RightFloor)
    }

    /// The left wall probe needs the right-most solid column, so it scans backwards.
    fn scan_order(self) -> ScanOrder {
        match self {
            SensorRole::LeftWall => ScanOrder::RowMajorReversed,
            _ => ScanOrder::RowMajor,
        }
    }
}

/// Result of testing one probe against the level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SensorReading {
    pub activated: bool,
    pub depth: Option<i32>,
}

#[derive(Debug, Clone)]
pub struct Sensor {
    role: SensorRole,
    offset: Vec2,
    size: UVec2,
    origin: Vec2,
    mask: CollisionMask,
    pub activated: bool,
    /// Only meaningful while `activated`.
    pub last_penetration_depth: Option<i32>,
    /// Rect used by the last `test`. The body moves after testing, so this
    /// can differ from `rect()`.
    pub tested_rect: Option<IRect>,
}

impl Sensor {
    pub fn new(role: SensorRole, offset: Vec2, size: UVec2) -> Self {
        Self {
            role,
            offset,
            size,
            origin: offset,
            mask: CollisionMask::filled(size.x, size.y),
            activated: false,
            last_penetration_depth: None,
            tested_rect: None,
        }
    }

    pub fn role(&self) -> SensorRole {
        self.role
    }

    pub fn offset(&self) -> Vec2 {
        self.offset
    }

    pub fn size(&self) -> UVec2 {
        self.size
    }

    /// Exact (sub-pixel) top-left corner of the probe.
    pub fn origin(&self) -> Vec2 {
        self.origin
    }

    /// Pixel rect the probe covers, snapped down to whole pixels.
    pub fn rect(&self) -> IRect {
        pixel_rect(self.origin.floor().as_ivec2(), self.size)
    }

    pub fn reposition(&mut self, body_position: Vec2) {
        self.origin = body_position + self.offset;
    }

    /// Test against candidate platforms. Activation is recomputed from scratch
    /// and the deepest penetration across all hits wins.
    pub fn test<'a>(&mut self, platforms: impl IntoIterator<Item = &'a Platform>) -> SensorReading {
        let rect = self.rect();
        let order = self.role.scan_order();

        let mut reading = SensorReading::default();
        for platform in platforms {
            let Some(hit) =
                query_rect_overlap_ordered(&self.mask, rect, &platform.mask, platform.rect, order)
            else {
                continue;
            };

            let depth = match self.role {
                SensorRole::LeftFloor | SensorRole::RightFloor => rect.max.y - hit.y,
                SensorRole::RightWall => rect.max.x - hit.x,
                SensorRole::LeftWall => hit.x + 1 - rect.min.x,
            };

            reading.activated = true;
            reading.depth = Some(reading.depth.map_or(depth, |d| d.max(depth)));
        }

        self.activated = reading.activated;
        self.last_penetration_depth = reading.depth;
        self.tested_rect = Some(rect);
        reading
    }
}
