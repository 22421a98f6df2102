//! Collision domain: tests for mask building and overlap queries.

use bevy::prelude::*;

use super::{
    CollisionMask, CollisionPoint, LevelGeometry, MASK_BACKGROUND, Platform, ScanOrder, SourceArt,
    TILE_SIZE, pixel_rect, query_rect_overlap, query_rect_overlap_ordered,
};

const RED: [u8; 4] = [255, 0, 0, 255];
const BLACK: [u8; 4] = [0, 0, 0, 255];

/// RGBA buffer where pixels at or below `surface_row` are black.
fn ground_rgba(width: u32, height: u32, surface_row: u32) -> Vec<u8> {
    let mut rgba = Vec::new();
    for y in 0..height {
        for _ in 0..width {
            rgba.extend_from_slice(if y >= surface_row { &BLACK } else { &RED });
        }
    }
    rgba
}

// -----------------------------------------------------------------------------
// Mask building
// -----------------------------------------------------------------------------

#[test]
fn test_build_marks_non_background_pixels_solid() {
    let rgba = ground_rgba(4, 4, 2);
    let mask = CollisionMask::build(&SourceArt::new(4, 4, &rgba), MASK_BACKGROUND);

    assert_eq!(mask.width(), 4);
    assert_eq!(mask.height(), 4);
    assert_eq!(mask.solid_count(), 8);
    assert!(!mask.is_solid(0, 1));
    assert!(mask.is_solid(0, 2));
    assert!(mask.is_solid(3, 3));
}

#[test]
fn test_build_treats_any_other_colour_as_solid() {
    let rgba = [
        255, 0, 0, 255, // background
        255, 0, 1, 255, // almost red
        12, 200, 7, 0, // transparent but not background
        255, 0, 0, 0, // background regardless of alpha
    ];
    let mask = CollisionMask::build(&SourceArt::new(2, 2, &rgba), MASK_BACKGROUND);

    assert!(!mask.is_solid(0, 0));
    assert!(mask.is_solid(1, 0));
    assert!(mask.is_solid(0, 1));
    assert!(!mask.is_solid(1, 1));
}

#[test]
fn test_zero_area_image_builds_empty_mask() {
    let mask = CollisionMask::build(&SourceArt::new(0, 16, &[]), MASK_BACKGROUND);
    assert!(mask.is_empty());
    assert_eq!(mask.solid_count(), 0);
}

#[test]
fn test_out_of_bounds_is_never_solid() {
    let mask = CollisionMask::filled(2, 2);
    assert!(mask.is_solid(1, 1));
    assert!(!mask.is_solid(-1, 0));
    assert!(!mask.is_solid(2, 0));
    assert!(!mask.is_solid(0, 2));
}

// -----------------------------------------------------------------------------
// Overlap queries
// -----------------------------------------------------------------------------

#[test]
fn test_disjoint_rects_do_not_overlap() {
    let a = CollisionMask::filled(4, 4);
    let b = CollisionMask::filled(4, 4);
    let hit = query_rect_overlap(
        &a,
        pixel_rect(IVec2::ZERO, UVec2::splat(4)),
        &b,
        pixel_rect(IVec2::new(4, 0), UVec2::splat(4)),
    );
    assert_eq!(hit, None);
}

#[test]
fn test_overlap_returns_topmost_then_leftmost_pixel() {
    let rgba = ground_rgba(16, 16, 10);
    let ground = CollisionMask::build(&SourceArt::new(16, 16, &rgba), MASK_BACKGROUND);
    let probe = CollisionMask::filled(3, 19);

    let hit = query_rect_overlap(
        &probe,
        pixel_rect(IVec2::new(5, 0), UVec2::new(3, 19)),
        &ground,
        pixel_rect(IVec2::ZERO, UVec2::splat(16)),
    );
    assert_eq!(hit, Some(CollisionPoint { x: 5, y: 10 }));
}

#[test]
fn test_reversed_scan_returns_bottom_right_pixel() {
    let a = CollisionMask::filled(8, 1);
    let b = CollisionMask::filled(16, 16);

    let hit = query_rect_overlap_ordered(
        &a,
        pixel_rect(IVec2::new(10, 4), UVec2::new(8, 1)),
        &b,
        pixel_rect(IVec2::ZERO, UVec2::splat(16)),
        ScanOrder::RowMajorReversed,
    );
    assert_eq!(hit, Some(CollisionPoint { x: 15, y: 4 }));
}

#[test]
fn test_overlap_without_shared_solid_pixel_is_none() {
    let rgba = ground_rgba(16, 16, 12);
    let ground = CollisionMask::build(&SourceArt::new(16, 16, &rgba), MASK_BACKGROUND);
    let probe = CollisionMask::filled(1, 4);

    let hit = query_rect_overlap(
        &probe,
        pixel_rect(IVec2::new(3, 2), UVec2::new(1, 4)),
        &ground,
        pixel_rect(IVec2::ZERO, UVec2::splat(16)),
    );
    assert_eq!(hit, None);
}

#[test]
fn test_empty_mask_never_overlaps() {
    let empty = CollisionMask::default();
    let full = CollisionMask::filled(16, 16);
    let rect = pixel_rect(IVec2::ZERO, UVec2::splat(16));
    assert_eq!(query_rect_overlap(&empty, rect, &full, rect), None);
}

// -----------------------------------------------------------------------------
// Platforms
// -----------------------------------------------------------------------------

#[test]
fn test_platform_rect_is_grid_times_tile_size() {
    let platform = Platform::new(IVec2::new(3, -2), TILE_SIZE, CollisionMask::filled(16, 16));
    assert_eq!(platform.rect.min, IVec2::new(48, -32));
    assert_eq!(platform.rect.max, IVec2::new(64, -16));
}

#[test]
fn test_platform_from_art_uses_background_key() {
    let rgba = ground_rgba(16, 16, 8);
    let platform = Platform::from_art(IVec2::ZERO, TILE_SIZE, &SourceArt::new(16, 16, &rgba));
    assert_eq!(platform.mask.solid_count(), 16 * 8);
}

#[test]
fn test_nearby_filters_by_rect() {
    let geometry = LevelGeometry::new(vec![
        Platform::new(IVec2::new(0, 0), TILE_SIZE, CollisionMask::filled(16, 16)),
        Platform::new(IVec2::new(10, 0), TILE_SIZE, CollisionMask::filled(16, 16)),
    ]);

    let area = pixel_rect(IVec2::new(8, 8), UVec2::splat(4));
    let nearby: Vec<_> = geometry.nearby(area).collect();
    assert_eq!(nearby.len(), 1);
    assert_eq!(nearby[0].grid, IVec2::ZERO);
    assert_eq!(geometry.len(), 2);
}
