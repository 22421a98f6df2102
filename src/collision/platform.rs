//! Collision domain: static platforms and the level geometry resource.

use bevy::prelude::*;

use super::mask::{CollisionMask, SourceArt, pixel_rect};

/// Pixel size of one level tile.
pub const TILE_SIZE: UVec2 = UVec2::new(16, 16);

/// Colour treated as empty space in collision art.
pub const MASK_BACKGROUND: [u8; 3] = [255, 0, 0];

/// A static piece of level geometry.
#[derive(Debug, Clone)]
pub struct Platform {
    pub grid: IVec2,
    pub rect: IRect,
    pub mask: CollisionMask,
}

impl Platform {
    /// Place a mask at a grid cell; the pixel rect is `grid * tile_size`
    /// sized to the mask.
    pub fn new(grid: IVec2, tile_size: UVec2, mask: CollisionMask) -> Self {
        let min = grid * tile_size.as_ivec2();
        let rect = pixel_rect(min, UVec2::new(mask.width(), mask.height()));
        Self { grid, rect, mask }
    }

    pub fn from_art(grid: IVec2, tile_size: UVec2, art: &SourceArt<'_>) -> Self {
        Self::new(grid, tile_size, CollisionMask::build(art, MASK_BACKGROUND))
    }
}

/// Read-only platform set supplied by the level collaborator.
#[derive(Resource, Debug, Clone, Default)]
pub struct LevelGeometry {
    platforms: Vec<Platform>,
}

impl LevelGeometry {
    pub fn new(platforms: Vec<Platform>) -> Self {
        Self { platforms }
    }

    pub fn platforms(&self) -> &[Platform] {
        &self.platforms
    }

    pub fn len(&self) -> usize {
        self.platforms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.platforms.is_empty()
    }

    /// Platforms whose rect intersects `area`, in level order.
    pub fn nearby(&self, area: IRect) -> impl Iterator<Item = &Platform> {
        self.platforms
            .iter()
            .filter(move |p| !p.rect.intersect(area).is_empty())
    }
}
