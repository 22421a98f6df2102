mod demo;

use std::time::Duration;

use bevy::app::ScheduleRunnerPlugin;
use bevy::log::{Level, LogPlugin};
use bevy::prelude::*;
use bevy::time::TimeUpdateStrategy;

use ring_sensors::content::ContentPlugin;
use ring_sensors::movement::{MovementPlugin, MovementSystems, TICKS_PER_SECOND};

const DEFAULT_SEED: u64 = 7;

fn main() {
    let seed = std::env::args()
        .nth(1)
        .and_then(|arg| arg.parse().ok())
        .unwrap_or(DEFAULT_SEED);
    let tick = Duration::from_secs_f32(1.0 / TICKS_PER_SECOND);

    let mut app = App::new();
    app.add_plugins((
        MinimalPlugins.set(ScheduleRunnerPlugin::run_loop(tick)),
        LogPlugin {
            level: Level::INFO,
            filter: "wgpu=error,ring_sensors=debug".to_string(),
            ..default()
        },
    ))
    .insert_resource(TimeUpdateStrategy::ManualDuration(tick))
    .insert_resource(demo::Autopilot::new(seed))
    .add_plugins((ContentPlugin, MovementPlugin))
    .add_systems(Startup, demo::setup_demo)
    .add_systems(
        Update,
        (
            demo::drive_autopilot.in_set(MovementSystems::ReadInput),
            (demo::report_changes, demo::stop_after_frames).after(MovementSystems::Step),
        ),
    );

    #[cfg(feature = "dev-tools")]
    app.add_plugins(ring_sensors::debug::PoseDumpPlugin);

    info!("Running demo for {} frames with seed {}", demo::DEMO_FRAMES, seed);
    app.run();
}
