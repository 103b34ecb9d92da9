//! Scheduled-activity output model.
//!
//! A simulation run emits one immutable [`ScheduledActivity`] per input
//! activity, in a valid topological order. Per-activity anomalies are
//! carried as [`ConflictFlags`] and an optional warning string; they never
//! abort a run.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Conflict and anomaly flags on a scheduled activity.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConflictFlags {
    /// Role availability, not work-product readiness, dictated the start.
    pub has_start_conflict: bool,
    /// The end date falls outside the owning release's window.
    pub date_conflict: bool,
    /// The running total cost exceeded the planned budget at this row.
    pub budget_conflict: bool,
    /// This activity's own cost exceeds the configured share of the budget.
    pub activity_cost_conflict: bool,
    /// The activity had no trigger entries and cannot be evidenced by
    /// work-product flow.
    pub has_error: bool,
}

impl ConflictFlags {
    /// Whether any flag is set.
    pub fn any(&self) -> bool {
        self.has_start_conflict
            || self.date_conflict
            || self.budget_conflict
            || self.activity_cost_conflict
            || self.has_error
    }
}

/// One scheduled activity: the engine's output row.
///
/// Reported quantities (`duration_days`, `total_hours`, `effort_hours`,
/// `cost`) are rounded to 2 decimal places; the engine computes with full
/// precision internally.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduledActivity {
    /// Scheduled activity id.
    pub activity_id: String,
    /// Activity name (denormalized for reporting).
    pub activity_name: String,
    /// Executing role, if one was resolvable.
    pub role_id: Option<String>,
    /// Owning release (project-scope runs only).
    pub release_id: Option<String>,
    /// Owning process (project-scope runs only).
    pub process_id: Option<String>,
    /// First day of execution.
    pub start: NaiveDate,
    /// Day execution completes.
    pub end: NaiveDate,
    /// Calendar duration in working days.
    pub duration_days: f64,
    /// Hours of work in the item stream.
    pub total_hours: f64,
    /// Hours actually consumed across all role holders.
    pub effort_hours: f64,
    /// Cost of the consumed effort.
    pub cost: f64,
    /// Conflict and anomaly flags.
    pub flags: ConflictFlags,
    /// Optional scheduling warning (e.g. unresolvable role).
    pub warning: Option<String>,
}

impl ScheduledActivity {
    /// Creates a row with zeroed quantities.
    pub fn new(activity_id: impl Into<String>, start: NaiveDate, end: NaiveDate) -> Self {
        Self {
            activity_id: activity_id.into(),
            activity_name: String::new(),
            role_id: None,
            release_id: None,
            process_id: None,
            start,
            end,
            duration_days: 0.0,
            total_hours: 0.0,
            effort_hours: 0.0,
            cost: 0.0,
            flags: ConflictFlags::default(),
            warning: None,
        }
    }

    /// Calendar span (end - start) in days.
    pub fn span_days(&self) -> i64 {
        (self.end - self.start).num_days()
    }

    /// Whether any conflict or anomaly flag is set.
    pub fn is_conflicted(&self) -> bool {
        self.flags.any()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_span_days() {
        let row = ScheduledActivity::new("a", date(2024, 1, 1), date(2024, 1, 4));
        assert_eq!(row.span_days(), 3);
    }

    #[test]
    fn test_flags_any() {
        let mut flags = ConflictFlags::default();
        assert!(!flags.any());
        flags.budget_conflict = true;
        assert!(flags.any());

        let mut row = ScheduledActivity::new("a", date(2024, 1, 1), date(2024, 1, 1));
        assert!(!row.is_conflicted());
        row.flags.has_error = true;
        assert!(row.is_conflicted());
    }
}
