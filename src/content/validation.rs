//! Validation for physics tuning values.

use crate::movement::PhysicsTuning;
use crate::sensors::{ProbeDef, SensorLayout};

/// A tuning value that would break the simulation.
#[derive(Debug, Clone, PartialEq)]
pub struct TuningIssue {
    pub field: &'static str,
    pub message: String,
}

impl std::fmt::Display for TuningIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "tuning field '{}' {}", self.field, self.message)
    }
}

/// Helper macro for flagging a value that must be above zero
macro_rules! check_positive {
    ($issues:expr, $tuning:expr, $field:ident) => {
        if !($tuning.$field > 0.0) {
            $issues.push(TuningIssue {
                field: stringify!($field),
                message: format!("must be positive, got {}", $tuning.$field),
            });
        }
    };
}

/// Helper macro for flagging a value that must not be negative
macro_rules! check_non_negative {
    ($issues:expr, $tuning:expr, $field:ident) => {
        if !($tuning.$field >= 0.0) {
            $issues.push(TuningIssue {
                field: stringify!($field),
                message: format!("must not be negative, got {}", $tuning.$field),
            });
        }
    };
}

/// Validate archetype constants and probe layout.
/// Returns a list of issues, empty if the tuning is usable.
pub fn validate_tuning(tuning: &PhysicsTuning) -> Vec<TuningIssue> {
    let mut issues = Vec::new();

    check_positive!(issues, tuning, acceleration);
    check_positive!(issues, tuning, friction);
    check_positive!(issues, tuning, top_speed);
    check_positive!(issues, tuning, gravity);
    check_positive!(issues, tuning, jump_speed);
    check_positive!(issues, tuning, air_acceleration);
    check_positive!(issues, tuning, running_threshold);
    check_non_negative!(issues, tuning, jump_release_speed);
    check_non_negative!(issues, tuning, roll_min_speed);
    check_non_negative!(issues, tuning, roll_friction);
    check_non_negative!(issues, tuning, roll_recovery_lock);
    check_non_negative!(issues, tuning, ground_stick);
    check_non_negative!(issues, tuning, slip_speed);
    check_non_negative!(issues, tuning, slip_lock);

    if !(tuning.air_drag > 0.0 && tuning.air_drag <= 1.0) {
        issues.push(TuningIssue {
            field: "air_drag",
            message: format!("must be in (0, 1], got {}", tuning.air_drag),
        });
    }

    if tuning.dashing_threshold < tuning.running_threshold {
        issues.push(TuningIssue {
            field: "dashing_threshold",
            message: format!(
                "must not be below running_threshold ({} < {})",
                tuning.dashing_threshold, tuning.running_threshold
            ),
        });
    }

    if let Some(cap) = tuning.terminal_velocity
        && !(cap > 0.0)
    {
        issues.push(TuningIssue {
            field: "terminal_velocity",
            message: format!("must be positive when set, got {}", cap),
        });
    }

    issues.extend(validate_layout(&tuning.sensors, tuning.ground_stick));
    issues
}

fn validate_layout(layout: &SensorLayout, ground_stick: f32) -> Vec<TuningIssue> {
    let mut issues = Vec::new();

    let probes: [(&'static str, &ProbeDef); 4] = [
        ("sensors.left_wall", &layout.left_wall),
        ("sensors.right_wall", &layout.right_wall),
        ("sensors.left_floor", &layout.left_floor),
        ("sensors.right_floor", &layout.right_floor),
    ];
    for (field, probe) in probes {
        if probe.size.0 == 0 || probe.size.1 == 0 {
            issues.push(TuningIssue {
                field,
                message: format!("has zero-sized probe {:?}", probe.size),
            });
        }
    }

    // The grounded press-down must stay within reach of the floor probes
    for (field, probe) in [
        ("sensors.left_floor", &layout.left_floor),
        ("sensors.right_floor", &layout.right_floor),
    ] {
        if ground_stick >= probe.size.1 as f32 {
            issues.push(TuningIssue {
                field,
                message: format!(
                    "is {}px tall, shorter than ground_stick {}",
                    probe.size.1, ground_stick
                ),
            });
        }
    }

    issues
}
