//! Debug tooling: pose snapshots for overlays and offline inspection.

mod snapshot;


pub use snapshot::{PoseSnapshot, SensorSnapshot};

use bevy::prelude::*;

use crate::movement::{LocomotionChanged, MovementSystems, PlayerBody};

/// Logs a JSON pose whenever a body changes locomotion state.
pub struct PoseDumpPlugin;

impl Plugin for PoseDumpPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Update, dump_poses.after(MovementSystems::Step));
    }
}

fn dump_poses(mut changes: MessageReader<LocomotionChanged>, bodies: Query<&PlayerBody>) {
    for change in changes.read() {
        let Ok(body) = bodies.get(change.entity) else {
            continue;
        };
        match PoseSnapshot::capture(body).to_json() {
            Ok(json) => info!("pose {:?}: {}", change.entity, json),
            Err(e) => warn!("Failed to serialise pose for {:?}: {}", change.entity, e),
        }
    }
}
