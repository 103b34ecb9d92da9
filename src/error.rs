//! Simulation error taxonomy.
//!
//! Only structural failures abort a run: cyclic dependencies, malformed
//! trigger definitions, duplicate ids, and the defensive unsatisfiable
//! check. Everything else (missing roles, date/budget conflicts, activities
//! without triggers) surfaces as flags or warnings on individual output
//! rows and never fails the request.

use thiserror::Error;

/// A fatal simulation failure. No partial schedule is returned.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SimulationError {
    /// The activity dependency graph contains a cycle.
    #[error("dependency cycle detected among activities: {}", .activity_ids.join(", "))]
    CycleDetected {
        /// Activities on the detected cycle.
        activity_ids: Vec<String>,
    },

    /// The ready queue drained while activities remained unscheduled.
    ///
    /// Defensive invariant check; reachable only if the graph build missed
    /// a cycle.
    #[error("activities could not be scheduled: {}", .activity_ids.join(", "))]
    UnsatisfiableActivity {
        /// Activities stuck in the blocked state.
        activity_ids: Vec<String>,
    },

    /// An activity's trigger definition is malformed.
    #[error("invalid trigger on activity '{activity_id}': {reason}")]
    InvalidTrigger {
        /// Offending activity.
        activity_id: String,
        /// What is wrong with the trigger set.
        reason: String,
    },

    /// Two activities share the same id.
    #[error("duplicate activity id '{0}'")]
    DuplicateActivity(String),
}
