//! Content domain: data-driven physics tuning loaded from RON.

mod loader;
mod validation;


pub use loader::{TUNING_PATH, TuningLoadError, load_tuning, parse_tuning};
pub use validation::{TuningIssue, validate_tuning};

use bevy::prelude::*;
use std::path::PathBuf;

use crate::movement::PhysicsTuning;

/// Where the tuning file lives. Insert before adding the plugin to override.
#[derive(Resource, Debug, Clone)]
pub struct TuningSource(pub PathBuf);

impl Default for TuningSource {
    fn default() -> Self {
        Self(PathBuf::from(TUNING_PATH))
    }
}

pub struct ContentPlugin;

impl Plugin for ContentPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<TuningSource>()
            .init_resource::<PhysicsTuning>()
            .add_systems(PreStartup, load_physics_tuning);
    }
}

/// Replace the default tuning with the file contents when they load and validate.
fn load_physics_tuning(source: Res<TuningSource>, mut tuning: ResMut<PhysicsTuning>) {
    let loaded = match load_tuning(&source.0) {
        Ok(loaded) => loaded,
        Err(e) => {
            warn!("{}; using default tuning", e);
            return;
        }
    };

    let issues = validate_tuning(&loaded);
    if !issues.is_empty() {
        for issue in &issues {
            warn!("{}", issue);
        }
        warn!(
            "{} tuning issue(s) in {}; using default tuning",
            issues.len(),
            source.0.display()
        );
        return;
    }

    info!("Loaded physics tuning from {}", source.0.display());
    *tuning = loaded;
}
