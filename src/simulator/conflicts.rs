//! Conflict detection over scheduled activities.
//!
//! A pure post-pass in emission order. It reads the output rows and the
//! run's release/budget context only — never the ledgers — and sets flags;
//! conflicts never abort a run.

use crate::models::{Release, ScheduledActivity};

/// Budget and date-window context for one conflict pass.
#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct ConflictContext<'a> {
    /// Release owning the rows, when running in project scope.
    pub release: Option<&'a Release>,
    /// Planned budget the running total is checked against.
    pub planned_budget: Option<f64>,
    /// Fraction of the budget a single activity may cost.
    pub activity_budget_share: f64,
}

/// Flags date, budget, and single-activity cost conflicts.
///
/// `running_cost` accumulates across calls so a project run can thread one
/// budget total through every release.
pub(crate) fn apply_conflicts(
    rows: &mut [ScheduledActivity],
    ctx: &ConflictContext<'_>,
    running_cost: &mut f64,
) {
    for row in rows {
        *running_cost += row.cost;

        if let Some(release) = ctx.release {
            row.flags.date_conflict = !release.contains(row.end);
        }
        if let Some(budget) = ctx.planned_budget {
            row.flags.budget_conflict = *running_cost > budget;
            row.flags.activity_cost_conflict = row.cost > ctx.activity_budget_share * budget;
        }
    }
}
