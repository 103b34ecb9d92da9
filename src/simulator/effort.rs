//! Duration and cost model.
//!
//! Pure functions from activity attributes, item counts, and role capacity
//! to `{duration_days, total_hours, effort_hours}`, plus the injectable
//! [`CostModel`] strategy that prices the consumed effort.
//!
//! # Execution Modes
//!
//! - `Parallel`: holders share one item stream. Duration divides by holder
//!   count; effort equals the stream's hours.
//! - `ForEach`: every holder repeats the full effort independently. Effort
//!   multiplies by holder count; duration does not shrink.
//!
//! # Zero Capacity
//!
//! An unresolvable role, zero holders, or zero daily hours yields a zero
//! breakdown; the caller attaches a warning to the output row. The model
//! never divides by a zero capacity.

use std::fmt::Debug;

use crate::models::{Activity, ExecutionMode, ItemCounts, Role};

/// Computed effort for one activity.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct EffortBreakdown {
    /// Calendar duration in working days (fractional).
    pub duration_days: f64,
    /// Hours of work in the item stream.
    pub total_hours: f64,
    /// Hours consumed across all role holders.
    pub effort_hours: f64,
}

/// Computes the effort breakdown for an activity.
///
/// Item-driven effort is `multiplicator × (known × known_time + unknown ×
/// estimated_time)`. When that evaluates to zero (no item counts drive the
/// activity), the per-item times are charged once as a flat one-shot cost.
pub fn compute_effort(activity: &Activity, counts: ItemCounts, role: Option<&Role>) -> EffortBreakdown {
    let role = match role {
        Some(r) if r.has_capacity() => r,
        _ => return EffortBreakdown::default(),
    };

    let hours_per_day = role.working_hours_per_day;
    let known_minutes = activity.known_time_per_item.to_minutes(hours_per_day);
    let estimated_minutes = activity.estimated_time_per_item.to_minutes(hours_per_day);

    let mut total_minutes = activity.multiplicator
        * (f64::from(counts.known) * known_minutes + f64::from(counts.unknown) * estimated_minutes);
    if total_minutes == 0.0 {
        // Flat one-shot cost for activities not driven by item counts.
        total_minutes = activity.multiplicator * (known_minutes + estimated_minutes);
    }

    let total_hours = total_minutes / 60.0;
    let holders = f64::from(role.holder_count);

    match activity.execution_mode {
        ExecutionMode::Parallel => EffortBreakdown {
            duration_days: total_hours / (hours_per_day * holders),
            total_hours,
            effort_hours: total_hours,
        },
        ExecutionMode::ForEach => EffortBreakdown {
            duration_days: total_hours / hours_per_day,
            total_hours,
            effort_hours: total_hours * holders,
        },
    }
}

/// Rounds a reported quantity to 2 decimal places.
pub(crate) fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Prices consumed effort.
///
/// Implementations must be deterministic and monotonically non-decreasing
/// in `effort_hours`. The exact rate rules live outside the core; swap the
/// strategy to match the organization's billing model.
pub trait CostModel: Send + Sync + Debug {
    /// Strategy name for diagnostics.
    fn name(&self) -> &'static str;

    /// Cost of `effort_hours` spent by `role` on `activity`.
    fn cost(&self, activity: &Activity, role: Option<&Role>, effort_hours: f64) -> f64;
}

/// Default rate model: hourly rate preferred, annual salary normalized to
/// an hourly equivalent over a standard working year.
#[derive(Debug, Clone)]
pub struct StandardRates {
    /// Working days per year used to normalize annual salaries.
    pub working_days_per_year: f64,
}

impl StandardRates {
    /// Creates the model with the given working year length.
    pub fn new(working_days_per_year: f64) -> Self {
        Self {
            working_days_per_year,
        }
    }

    fn hourly_rate(&self, role: &Role) -> f64 {
        if let Some(rate) = role.hourly_rate {
            return rate;
        }
        if let Some(salary) = role.annual_salary {
            let annual_hours = self.working_days_per_year * role.working_hours_per_day;
            if annual_hours > 0.0 {
                return salary / annual_hours;
            }
        }
        0.0
    }
}

impl Default for StandardRates {
    fn default() -> Self {
        Self::new(220.0)
    }
}

impl CostModel for StandardRates {
    fn name(&self) -> &'static str {
        "standard-rates"
    }

    fn cost(&self, _activity: &Activity, role: Option<&Role>, effort_hours: f64) -> f64 {
        match role {
            Some(role) => self.hourly_rate(role) * effort_hours,
            None => 0.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{TimeSpec, TimeUnit};

    fn role(hours: f64, holders: u32) -> Role {
        Role::new("r").with_hours_per_day(hours).with_holders(holders)
    }

    #[test]
    fn test_parallel_mode() {
        // 8 total hours, 4h/day, 2 holders: 1 day, effort stays 8h.
        let act = Activity::new("a").with_known_time(60.0, TimeUnit::Minutes);
        let r = role(4.0, 2);
        let e = compute_effort(&act, ItemCounts::new(8, 0), Some(&r));
        assert!((e.total_hours - 8.0).abs() < 1e-10);
        assert!((e.duration_days - 1.0).abs() < 1e-10);
        assert!((e.effort_hours - 8.0).abs() < 1e-10);
    }

    #[test]
    fn test_for_each_mode() {
        // Same stream under forEach: 2 days, 16h effort.
        let act = Activity::new("a")
            .with_known_time(60.0, TimeUnit::Minutes)
            .with_execution_mode(ExecutionMode::ForEach);
        let r = role(4.0, 2);
        let e = compute_effort(&act, ItemCounts::new(8, 0), Some(&r));
        assert!((e.duration_days - 2.0).abs() < 1e-10);
        assert!((e.effort_hours - 16.0).abs() < 1e-10);
    }

    #[test]
    fn test_known_and_unknown_mix() {
        let act = Activity::new("a")
            .with_known_time(30.0, TimeUnit::Minutes)
            .with_estimated_time(1.0, TimeUnit::Hours);
        let r = role(8.0, 1);
        // 4 × 30min + 2 × 60min = 240min = 4h
        let e = compute_effort(&act, ItemCounts::new(4, 2), Some(&r));
        assert!((e.total_hours - 4.0).abs() < 1e-10);
        assert!((e.duration_days - 0.5).abs() < 1e-10);
    }

    #[test]
    fn test_multiplicator_scales() {
        let act = Activity::new("a")
            .with_known_time(1.0, TimeUnit::Hours)
            .with_multiplicator(3.0);
        let r = role(8.0, 1);
        let e = compute_effort(&act, ItemCounts::new(2, 0), Some(&r));
        assert!((e.total_hours - 6.0).abs() < 1e-10);
    }

    #[test]
    fn test_flat_fallback_without_counts() {
        let act = Activity::new("a")
            .with_known_time(30.0, TimeUnit::Minutes)
            .with_estimated_time(90.0, TimeUnit::Minutes);
        let r = role(8.0, 1);
        let e = compute_effort(&act, ItemCounts::default(), Some(&r));
        // Flat: 30 + 90 = 120min = 2h
        assert!((e.total_hours - 2.0).abs() < 1e-10);
    }

    #[test]
    fn test_day_unit_follows_role_hours() {
        let act = Activity::new("a").with_known_time(1.0, TimeUnit::Days);
        let r = role(6.0, 1);
        let e = compute_effort(&act, ItemCounts::new(1, 0), Some(&r));
        assert!((e.total_hours - 6.0).abs() < 1e-10);
        assert!((e.duration_days - 1.0).abs() < 1e-10);
    }

    #[test]
    fn test_zero_capacity_role() {
        let act = Activity::new("a").with_known_time(1.0, TimeUnit::Hours);
        let e = compute_effort(&act, ItemCounts::new(5, 0), None);
        assert_eq!(e, EffortBreakdown::default());

        let idle = role(0.0, 1);
        let e = compute_effort(&act, ItemCounts::new(5, 0), Some(&idle));
        assert_eq!(e, EffortBreakdown::default());
    }

    #[test]
    fn test_standard_rates_hourly() {
        let model = StandardRates::default();
        let r = Role::new("r").with_hourly_rate(100.0);
        let act = Activity::new("a");
        assert!((model.cost(&act, Some(&r), 8.0) - 800.0).abs() < 1e-10);
    }

    #[test]
    fn test_standard_rates_salary_normalization() {
        let model = StandardRates::new(220.0);
        // 88_000 over 220 days × 8h = 50/h
        let r = Role::new("r").with_annual_salary(88_000.0);
        let act = Activity::new("a");
        assert!((model.cost(&act, Some(&r), 10.0) - 500.0).abs() < 1e-10);
    }

    #[test]
    fn test_standard_rates_monotone_in_effort() {
        let model = StandardRates::default();
        let r = Role::new("r").with_hourly_rate(70.0);
        let act = Activity::new("a");
        assert!(model.cost(&act, Some(&r), 4.0) <= model.cost(&act, Some(&r), 5.0));
    }

    #[test]
    fn test_round2() {
        assert!((round2(1.006) - 1.01).abs() < 1e-10);
        assert!((round2(2.124) - 2.12).abs() < 1e-10);
    }
}
