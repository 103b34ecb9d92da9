//! Pre-scheduling input validation.
//!
//! Checks structural integrity of the activity set before any scheduling
//! side effect occurs. Detects:
//! - Duplicate activity ids
//! - More than one determining factor in a trigger set
//! - A determining-factor reference that names no trigger entry
//! - Completion thresholds outside [0, 100]
//!
//! Role references are deliberately NOT validated here: an unresolvable
//! role is a per-activity anomaly (zero-capacity scheduling with a row
//! warning), not a fatal input error.

use std::collections::HashSet;

use crate::error::SimulationError;
use crate::models::Activity;

/// Validates an activity set for a simulation run.
///
/// Returns the first structural error found. Fatal errors here are raised
/// before the dependency graph is built, so a rejected run has no side
/// effects.
pub fn validate_activities(activities: &[Activity]) -> Result<(), SimulationError> {
    let mut seen_ids = HashSet::new();

    for activity in activities {
        if !seen_ids.insert(activity.id.as_str()) {
            return Err(SimulationError::DuplicateActivity(activity.id.clone()));
        }

        let determining_count = activity
            .trigger
            .iter()
            .filter(|e| e.is_determining_factor)
            .count();
        if determining_count > 1 {
            return Err(SimulationError::InvalidTrigger {
                activity_id: activity.id.clone(),
                reason: format!("{determining_count} trigger entries marked as determining factor"),
            });
        }

        if let Some(factor) = &activity.determining_factor {
            let referenced = activity
                .trigger
                .iter()
                .any(|e| &e.work_product_id == factor);
            if !referenced {
                return Err(SimulationError::InvalidTrigger {
                    activity_id: activity.id.clone(),
                    reason: format!("determining factor '{factor}' is not in the trigger set"),
                });
            }
        }

        for entry in &activity.trigger {
            if !(0.0..=100.0).contains(&entry.completion_percentage) {
                return Err(SimulationError::InvalidTrigger {
                    activity_id: activity.id.clone(),
                    reason: format!(
                        "completion percentage {} for '{}' is outside 0..=100",
                        entry.completion_percentage, entry.work_product_id
                    ),
                });
            }
        }
    }

    Ok(())
}
