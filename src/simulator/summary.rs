//! Resource consumption summary.
//!
//! Folds a scheduled-activity list into per-role effort and cost totals.
//! Total cost is the exact sum of the per-row costs, so it matches the rows
//! with no drift beyond their own 2-decimal rounding.

use std::collections::HashMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::models::ScheduledActivity;

/// Aggregated resource consumption of a run.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ResourceSummary {
    /// Effort hours consumed per role.
    pub effort_hours_by_role: HashMap<String, f64>,
    /// Cost incurred per role.
    pub cost_by_role: HashMap<String, f64>,
    /// Effort hours across all roles.
    pub total_effort_hours: f64,
    /// Cost across all roles.
    pub total_cost: f64,
    /// Number of scheduled activities.
    pub activity_count: usize,
    /// Latest end date, if anything was scheduled.
    pub completion: Option<NaiveDate>,
}

impl ResourceSummary {
    /// Computes the summary for a scheduled-activity list.
    pub fn calculate(rows: &[ScheduledActivity]) -> Self {
        let mut summary = Self {
            activity_count: rows.len(),
            ..Self::default()
        };

        for row in rows {
            summary.total_effort_hours += row.effort_hours;
            summary.total_cost += row.cost;
            summary.completion = Some(match summary.completion {
                Some(latest) => latest.max(row.end),
                None => row.end,
            });

            if let Some(role_id) = &row.role_id {
                *summary
                    .effort_hours_by_role
                    .entry(role_id.clone())
                    .or_insert(0.0) += row.effort_hours;
                *summary.cost_by_role.entry(role_id.clone()).or_insert(0.0) += row.cost;
            }
        }

        summary
    }

    /// Effort hours booked on a role (0 if the role did nothing).
    pub fn effort_for(&self, role_id: &str) -> f64 {
        self.effort_hours_by_role.get(role_id).copied().unwrap_or(0.0)
    }
}
