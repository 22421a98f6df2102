//! Level builders shared by the unit tests.

use std::ops::Range;

use bevy::prelude::*;

use crate::collision::{LevelGeometry, Platform, SourceArt, TILE_SIZE};

const RED: [u8; 4] = [255, 0, 0, 255];
const BLACK: [u8; 4] = [0, 0, 0, 255];

/// 16x16 collision art, solid from `surface_row` downward.
pub(crate) fn surface_rgba(surface_row: u32) -> Vec<u8> {
    let mut rgba = Vec::with_capacity((TILE_SIZE.x * TILE_SIZE.y * 4) as usize);
    for y in 0..TILE_SIZE.y {
        for _ in 0..TILE_SIZE.x {
            rgba.extend_from_slice(if y >= surface_row { &BLACK } else { &RED });
        }
    }
    rgba
}

pub(crate) fn tile_with_surface(grid: IVec2, surface_row: u32) -> Platform {
    let rgba = surface_rgba(surface_row);
    Platform::from_art(grid, TILE_SIZE, &SourceArt::new(TILE_SIZE.x, TILE_SIZE.y, &rgba))
}

pub(crate) fn solid_tile(grid: IVec2) -> Platform {
    tile_with_surface(grid, 0)
}

/// A row of solid tiles; the walkable surface is at `row * 16` pixels.
pub(crate) fn flat_ground(columns: Range<i32>, row: i32) -> LevelGeometry {
    LevelGeometry::new(
        columns
            .map(|x| solid_tile(IVec2::new(x, row)))
            .collect(),
    )
}
