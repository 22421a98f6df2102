//! Sensors domain: tests for probe placement, activation, and depth resolution.

use bevy::prelude::*;

use super::{ProbeDef, Sensor, SensorArray, SensorLayout, SensorRole};
use crate::collision::LevelGeometry;
use crate::test_support::{flat_ground, solid_tile, tile_with_surface};

/// Floor probes 20px apart, wall probes parked far away from any tile.
fn floor_only_layout() -> SensorLayout {
    SensorLayout {
        left_wall: ProbeDef::new(-500.0, -500.0, 8, 1),
        right_wall: ProbeDef::new(500.0, -500.0, 8, 1),
        left_floor: ProbeDef::new(0.0, 0.0, 1, 19),
        right_floor: ProbeDef::new(20.0, 0.0, 1, 19),
    }
}

// -----------------------------------------------------------------------------
// Single sensor
// -----------------------------------------------------------------------------

#[test]
fn test_reposition_is_body_plus_offset() {
    let mut sensor = Sensor::new(SensorRole::LeftFloor, Vec2::new(18.0, 30.0), UVec2::new(1, 19));
    sensor.reposition(Vec2::new(100.25, 120.5));

    assert_eq!(sensor.origin(), Vec2::new(118.25, 150.5));
    assert_eq!(sensor.rect().min, IVec2::new(118, 150));
    assert_eq!(sensor.rect().max, IVec2::new(119, 169));
}

#[test]
fn test_floor_depth_is_bottom_minus_surface() {
    let mut sensor = Sensor::new(SensorRole::LeftFloor, Vec2::ZERO, UVec2::new(1, 19));
    sensor.reposition(Vec2::new(5.0, 0.0));

    let tile = solid_tile(IVec2::new(0, 1));
    let reading = sensor.test([&tile]);

    assert!(reading.activated);
    assert_eq!(reading.depth, Some(3));
    assert!(sensor.activated);
    assert_eq!(sensor.last_penetration_depth, Some(3));
}

#[test]
fn test_no_platforms_is_inactive_without_depth() {
    let mut sensor = Sensor::new(SensorRole::RightFloor, Vec2::ZERO, UVec2::new(1, 19));
    let reading = sensor.test(std::iter::empty());

    assert!(!reading.activated);
    assert_eq!(reading.depth, None);
}

#[test]
fn test_deepest_penetration_wins_regardless_of_order() {
    let mut sensor = Sensor::new(SensorRole::LeftFloor, Vec2::ZERO, UVec2::new(1, 19));
    sensor.reposition(Vec2::new(4.0, 10.0));

    let full = solid_tile(IVec2::new(0, 1));
    let shallow = tile_with_surface(IVec2::new(0, 1), 8);

    assert_eq!(sensor.test([&shallow, &full]).depth, Some(13));
    assert_eq!(sensor.test([&full, &shallow]).depth, Some(13));
}

#[test]
fn test_activation_does_not_carry_over() {
    let mut sensor = Sensor::new(SensorRole::LeftFloor, Vec2::ZERO, UVec2::new(1, 19));
    let tile = solid_tile(IVec2::new(0, 1));

    assert!(sensor.test([&tile]).activated);
    assert!(!sensor.test(std::iter::empty()).activated);
    assert!(!sensor.activated);
    assert_eq!(sensor.last_penetration_depth, None);
}

#[test]
fn test_right_wall_depth_measures_from_right_edge() {
    let mut sensor = Sensor::new(SensorRole::RightWall, Vec2::ZERO, UVec2::new(8, 1));
    sensor.reposition(Vec2::new(10.0, 5.0));

    let wall = solid_tile(IVec2::new(1, 0));
    assert_eq!(sensor.test([&wall]).depth, Some(2));
}

#[test]
fn test_left_wall_depth_measures_from_left_edge() {
    let mut sensor = Sensor::new(SensorRole::LeftWall, Vec2::ZERO, UVec2::new(8, 1));
    sensor.reposition(Vec2::new(12.0, 5.0));

    let wall = solid_tile(IVec2::new(0, 0));
    assert_eq!(sensor.test([&wall]).depth, Some(4));
}

// -----------------------------------------------------------------------------
// Sensor array
// -----------------------------------------------------------------------------

#[test]
fn test_deeper_floor_probe_wins() {
    let level = LevelGeometry::new(vec![
        solid_tile(IVec2::new(0, 1)),
        tile_with_surface(IVec2::new(1, 0), 14),
    ]);
    let mut array = SensorArray::new(&floor_only_layout());

    let facts = array.refresh(Vec2::ZERO, &level);

    assert!(facts.on_left_floor);
    assert!(facts.on_right_floor);
    assert_eq!(array.sensor(SensorRole::LeftFloor).last_penetration_depth, Some(3));
    assert_eq!(array.sensor(SensorRole::RightFloor).last_penetration_depth, Some(5));
    assert_eq!(facts.ground_penetration_depth, Some(5));
    assert!(facts.on_ground());
}

#[test]
fn test_single_floor_probe_is_enough_for_ground() {
    let level = LevelGeometry::new(vec![solid_tile(IVec2::new(0, 1))]);
    let mut array = SensorArray::new(&floor_only_layout());

    let facts = array.refresh(Vec2::ZERO, &level);

    assert!(facts.on_left_floor);
    assert!(!facts.on_right_floor);
    assert!(facts.on_ground());
    assert_eq!(facts.ground_penetration_depth, Some(3));
    assert_eq!(facts.ground_angle(), 0.0);
}

#[test]
fn test_ground_angle_rises_toward_higher_contact() {
    let level = LevelGeometry::new(vec![
        solid_tile(IVec2::new(0, 1)),
        tile_with_surface(IVec2::new(1, 0), 14),
    ]);
    let mut array = SensorArray::new(&floor_only_layout());

    let facts = array.refresh(Vec2::ZERO, &level);

    let expected = 2.0_f32.atan2(20.0);
    assert!((facts.ground_angle() - expected).abs() < 1e-6);
}

#[test]
fn test_empty_level_yields_no_contacts() {
    let mut array = SensorArray::new(&SensorLayout::default());
    let facts = array.refresh(Vec2::new(40.0, 40.0), &LevelGeometry::default());

    assert!(!facts.on_ground());
    assert!(!facts.on_wall());
    assert_eq!(facts.ground_penetration_depth, None);
    assert!(array.iter().all(|s| !s.activated));
}

#[test]
fn test_refresh_aligns_every_probe() {
    let level = flat_ground(0..8, 4);
    let mut array = SensorArray::new(&SensorLayout::default());
    let position = Vec2::new(33.5, 17.75);

    array.refresh(position, &level);

    for sensor in array.iter() {
        assert_eq!(sensor.origin(), position + sensor.offset());
    }
}

#[test]
fn test_default_layout_detects_walls_on_both_sides() {
    // Wall probes span x 17..25 and 26..34 on row 39, inside one tile
    let level = LevelGeometry::new(vec![solid_tile(IVec2::new(1, 2))]);
    let mut array = SensorArray::new(&SensorLayout::default());

    let facts = array.refresh(Vec2::new(0.0, 10.0), &level);

    assert!(facts.on_left_wall);
    assert!(facts.on_right_wall);
}

#[test]
fn test_embedded_floor_probe_reads_as_step_not_slope() {
    // Left probe rests 3px into a floor, right probe is buried in a block
    let level = LevelGeometry::new(vec![
        solid_tile(IVec2::new(0, 1)),
        solid_tile(IVec2::new(1, 0)),
    ]);
    let mut array = SensorArray::new(&floor_only_layout());

    let facts = array.refresh(Vec2::ZERO, &level);

    let left = facts.left_floor_contact.expect("left contact");
    let right = facts.right_floor_contact.expect("right contact");
    assert!(!left.embedded);
    assert!(right.embedded);
    assert_eq!(facts.ground_penetration_depth, Some(19));
    assert_eq!(facts.ground_angle(), 0.0);
}

#[test]
fn test_split_refresh_tests_walls_at_their_own_position() {
    let level = LevelGeometry::new(vec![solid_tile(IVec2::new(1, 2))]);
    let mut array = SensorArray::new(&SensorLayout::default());
    let floor_position = Vec2::new(0.0, 10.0);
    let wall_position = Vec2::new(0.0, -10.0);

    let facts = array.refresh_split(floor_position, wall_position, &level);

    assert!(!facts.on_wall());
    assert!(facts.on_left_floor);
    for sensor in array.iter() {
        let body = if sensor.role().is_floor() {
            floor_position
        } else {
            wall_position
        };
        assert_eq!(sensor.origin(), body + sensor.offset());
        assert_eq!(sensor.tested_rect, Some(sensor.rect()));
    }
}
