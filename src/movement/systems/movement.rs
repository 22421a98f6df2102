//! Movement domain: stepping player bodies once per frame.

use bevy::prelude::*;

use crate::collision::LevelGeometry;
use crate::movement::{InputIntent, LocomotionChanged, PlayerBody};

/// Physics constants are tuned per 60 Hz tick.
pub const TICKS_PER_SECOND: f32 = 60.0;

pub(crate) fn step_bodies(
    time: Res<Time>,
    input: Res<InputIntent>,
    level: Res<LevelGeometry>,
    mut bodies: Query<(Entity, &mut PlayerBody)>,
    mut changes: MessageWriter<LocomotionChanged>,
) {
    let dt = time.delta_secs() * TICKS_PER_SECOND;

    for (entity, mut body) in &mut bodies {
        let from = body.state();
        body.update(dt, &input, &level);
        let to = body.state();

        if from != to {
            debug!(
                "Locomotion {:?} -> {:?}: ground_speed={:.3}, on_ground={}",
                from,
                to,
                body.ground_speed(),
                body.on_ground()
            );
            changes.write(LocomotionChanged { entity, from, to });
        }
    }
}
