//! Collision domain: solidity masks and static platforms.

mod mask;
mod platform;

#[cfg(test)]
mod tests;

pub use mask::{
    CollisionMask, CollisionPoint, ScanOrder, SourceArt, pixel_rect, query_rect_overlap,
    query_rect_overlap_ordered,
};
pub use platform::{LevelGeometry, MASK_BACKGROUND, Platform, TILE_SIZE};
