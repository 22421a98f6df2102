//! Headless demo: a tile level built from generated collision art and a
//! seeded autopilot driving one body across it.

use bevy::prelude::*;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use ring_sensors::collision::{LevelGeometry, MASK_BACKGROUND, Platform, SourceArt, TILE_SIZE};
use ring_sensors::movement::{
    InputIntent, LocomotionChanged, LogObserver, PhysicsTuning, PlayerBody,
};

/// `#` solid, `/` rises to the right, `\` falls to the right.
const LEVEL_MAP: [&str; 7] = [
    "........................................",
    "........................................",
    "........................................",
    "...................................##...",
    "........................../\\.......##...",
    "........................./##\\......##...",
    "########################################",
];

const SPAWN: Vec2 = Vec2::new(16.0, 47.0);

/// Frames the demo runs before exiting.
pub const DEMO_FRAMES: u32 = 900;

const SOLID: [u8; 4] = [0, 0, 0, 255];
const BACKGROUND: [u8; 4] = [MASK_BACKGROUND[0], MASK_BACKGROUND[1], MASK_BACKGROUND[2], 255];

fn tile_art(glyph: char) -> Option<Vec<u8>> {
    let solid_at: fn(u32, u32) -> bool = match glyph {
        '#' => |_, _| true,
        '/' => |x, y| y + x >= TILE_SIZE.x - 1,
        '\\' => |x, y| y >= x,
        _ => return None,
    };

    let mut rgba = Vec::with_capacity((TILE_SIZE.x * TILE_SIZE.y * 4) as usize);
    for y in 0..TILE_SIZE.y {
        for x in 0..TILE_SIZE.x {
            rgba.extend_from_slice(if solid_at(x, y) { &SOLID } else { &BACKGROUND });
        }
    }
    Some(rgba)
}

pub fn build_level() -> LevelGeometry {
    let mut platforms = Vec::new();
    for (row, line) in LEVEL_MAP.iter().enumerate() {
        for (column, glyph) in line.chars().enumerate() {
            let Some(rgba) = tile_art(glyph) else {
                continue;
            };
            let art = SourceArt::new(TILE_SIZE.x, TILE_SIZE.y, &rgba);
            platforms.push(Platform::from_art(
                IVec2::new(column as i32, row as i32),
                TILE_SIZE,
                &art,
            ));
        }
    }
    LevelGeometry::new(platforms)
}

pub fn setup_demo(
    mut commands: Commands,
    tuning: Res<PhysicsTuning>,
    mut level: ResMut<LevelGeometry>,
) {
    *level = build_level();
    info!("Built demo level with {} platforms", level.len());

    let mut body = PlayerBody::new(SPAWN, tuning.clone()).with_observer(LogObserver);
    body.place(SPAWN, &level);
    info!(
        "Spawned body at {:?}, state {:?}, on_ground={}",
        body.position(),
        body.state(),
        body.on_ground()
    );
    commands.spawn(body);
}

/// Seeded random input that holds each choice for a few frames.
#[derive(Resource, Debug)]
pub struct Autopilot {
    rng: ChaCha8Rng,
    hold_frames: u32,
    intent: InputIntent,
}

impl Autopilot {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
            hold_frames: 0,
            intent: InputIntent::neutral(),
        }
    }

    fn next_intent(&mut self) -> InputIntent {
        if self.hold_frames == 0 {
            self.hold_frames = self.rng.random_range(10..60);
            self.intent = InputIntent {
                left: self.rng.random_bool(0.2),
                right: self.rng.random_bool(0.7),
                up: false,
                down: false,
                jump: self.rng.random_bool(0.3),
                roll: self.rng.random_bool(0.1),
            };
        }
        self.hold_frames -= 1;
        self.intent
    }
}

pub fn drive_autopilot(mut pilot: ResMut<Autopilot>, mut input: ResMut<InputIntent>) {
    *input = pilot.next_intent();
}

pub fn report_changes(mut changes: MessageReader<LocomotionChanged>) {
    for change in changes.read() {
        info!("{:?}: {:?} -> {:?}", change.entity, change.from, change.to);
    }
}

pub fn stop_after_frames(
    mut frames: Local<u32>,
    bodies: Query<&PlayerBody>,
    mut exit: MessageWriter<AppExit>,
) {
    *frames += 1;
    if *frames < DEMO_FRAMES {
        return;
    }

    for body in &bodies {
        info!(
            "Finished at {:?}, state {:?}, ground_speed={:.3}",
            body.position(),
            body.state(),
            body.ground_speed()
        );
    }
    exit.write(AppExit::Success);
}
