//! Collision domain: per-pixel solidity bitmaps and overlap queries.

use bevy::prelude::*;

/// Raw RGBA8 source art handed over by the asset collaborator.
#[derive(Debug, Clone, Copy)]
pub struct SourceArt<'a> {
    pub width: u32,
    pub height: u32,
    /// Row-major RGBA8 pixels, `width * height * 4` bytes.
    pub rgba: &'a [u8],
}

impl<'a> SourceArt<'a> {
    pub fn new(width: u32, height: u32, rgba: &'a [u8]) -> Self {
        Self {
            width,
            height,
            rgba,
        }
    }

    fn pixel(&self, x: u32, y: u32) -> Option<[u8; 3]> {
        let index = ((y * self.width + x) * 4) as usize;
        self.rgba
            .get(index..index + 3)
            .map(|p| [p[0], p[1], p[2]])
    }
}

/// A screen-space pixel where two masks are both solid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CollisionPoint {
    pub x: i32,
    pub y: i32,
}

/// Order in which overlapping pixels are scanned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScanOrder {
    /// Top row first, left to right.
    #[default]
    RowMajor,
    /// Bottom row first, right to left.
    RowMajorReversed,
}

/// Boolean solidity bitmap.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CollisionMask {
    width: u32,
    height: u32,
    solid: Vec<bool>,
}

impl CollisionMask {
    /// Mark every pixel that is not the background key as solid.
    /// Alpha is ignored; a zero-area image yields an empty mask.
    pub fn build(image: &SourceArt<'_>, background: [u8; 3]) -> Self {
        if image.width == 0 || image.height == 0 {
            return Self::default();
        }

        let mut solid = Vec::with_capacity((image.width * image.height) as usize);
        for y in 0..image.height {
            for x in 0..image.width {
                // Short pixel buffers read as background
                let is_solid = image.pixel(x, y).is_some_and(|c| c != background);
                solid.push(is_solid);
            }
        }

        Self {
            width: image.width,
            height: image.height,
            solid,
        }
    }

    /// A fully solid mask, used for sensor probes.
    pub fn filled(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            solid: vec![true; (width * height) as usize],
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Local-space lookup. Out-of-bounds pixels are never solid.
    pub fn is_solid(&self, x: i32, y: i32) -> bool {
        if x < 0 || y < 0 || x >= self.width as i32 || y >= self.height as i32 {
            return false;
        }
        self.solid[(y as u32 * self.width + x as u32) as usize]
    }

    pub fn solid_count(&self) -> usize {
        self.solid.iter().filter(|s| **s).count()
    }
}

/// Build a pixel rect from a top-left corner and a size.
pub fn pixel_rect(min: IVec2, size: UVec2) -> IRect {
    IRect::from_corners(min, min + size.as_ivec2())
}

/// First pixel, in row-major order from the top-left, where both masks are solid.
pub fn query_rect_overlap(
    mask_a: &CollisionMask,
    rect_a: IRect,
    mask_b: &CollisionMask,
    rect_b: IRect,
) -> Option<CollisionPoint> {
    query_rect_overlap_ordered(mask_a, rect_a, mask_b, rect_b, ScanOrder::RowMajor)
}

/// Same as [`query_rect_overlap`] with an explicit scan order.
pub fn query_rect_overlap_ordered(
    mask_a: &CollisionMask,
    rect_a: IRect,
    mask_b: &CollisionMask,
    rect_b: IRect,
    order: ScanOrder,
) -> Option<CollisionPoint> {
    if mask_a.is_empty() || mask_b.is_empty() {
        return None;
    }

    let overlap = rect_a.intersect(rect_b);
    if overlap.is_empty() {
        return None;
    }

    let hit = |x: i32, y: i32| {
        mask_a.is_solid(x - rect_a.min.x, y - rect_a.min.y)
            && mask_b.is_solid(x - rect_b.min.x, y - rect_b.min.y)
    };

    match order {
        ScanOrder::RowMajor => {
            for y in overlap.min.y..overlap.max.y {
                for x in overlap.min.x..overlap.max.x {
                    if hit(x, y) {
                        return Some(CollisionPoint { x, y });
                    }
                }
            }
        }
        ScanOrder::RowMajorReversed => {
            for y in (overlap.min.y..overlap.max.y).rev() {
                for x in (overlap.min.x..overlap.max.x).rev() {
                    if hit(x, y) {
                        return Some(CollisionPoint { x, y });
                    }
                }
            }
        }
    }

    None
}
