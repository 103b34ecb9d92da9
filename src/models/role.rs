//! Role model.
//!
//! Roles are the human resources that execute activities: reviewers,
//! developers, quality managers. Each role has a daily capacity, a holder
//! count, rate attributes for costing, and an optional exclusive-capacity
//! flag.
//!
//! # Exclusive Capacity
//!
//! A role flagged exclusive models a named decision maker (a managing
//! director, a lead auditor) who must never run two of their own activities
//! concurrently, even across separate work streams or releases. The
//! availability ledger serializes such roles globally.

use serde::{Deserialize, Serialize};

/// A role that executes activities.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Role {
    /// Unique role identifier.
    pub id: String,
    /// Human-readable name.
    pub name: String,
    /// Working hours available per day per holder.
    pub working_hours_per_day: f64,
    /// Number of people holding this role.
    pub holder_count: u32,
    /// Whether this role is a singleton decision maker that may never run
    /// two activities concurrently, regardless of scope.
    pub exclusive: bool,
    /// Hourly billing rate, if billed hourly.
    pub hourly_rate: Option<f64>,
    /// Annual salary, normalized to an hourly equivalent by the cost model.
    pub annual_salary: Option<f64>,
}

impl Role {
    /// Creates a role with one holder and an 8-hour working day.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: String::new(),
            working_hours_per_day: 8.0,
            holder_count: 1,
            exclusive: false,
            hourly_rate: None,
            annual_salary: None,
        }
    }

    /// Sets the role name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Sets the daily working hours per holder.
    pub fn with_hours_per_day(mut self, hours: f64) -> Self {
        self.working_hours_per_day = hours;
        self
    }

    /// Sets the holder count.
    pub fn with_holders(mut self, count: u32) -> Self {
        self.holder_count = count;
        self
    }

    /// Flags this role as exclusive-capacity.
    pub fn exclusive(mut self) -> Self {
        self.exclusive = true;
        self
    }

    /// Sets the hourly rate.
    pub fn with_hourly_rate(mut self, rate: f64) -> Self {
        self.hourly_rate = Some(rate);
        self
    }

    /// Sets the annual salary.
    pub fn with_annual_salary(mut self, salary: f64) -> Self {
        self.annual_salary = Some(salary);
        self
    }

    /// Whether this role can absorb any work at all.
    pub fn has_capacity(&self) -> bool {
        self.working_hours_per_day > 0.0 && self.holder_count > 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_builder() {
        let r = Role::new("qa-lead")
            .with_name("QA Lead")
            .with_hours_per_day(6.0)
            .with_holders(2)
            .with_hourly_rate(95.0);

        assert_eq!(r.id, "qa-lead");
        assert_eq!(r.name, "QA Lead");
        assert!((r.working_hours_per_day - 6.0).abs() < 1e-10);
        assert_eq!(r.holder_count, 2);
        assert!(!r.exclusive);
        assert_eq!(r.hourly_rate, Some(95.0));
        assert!(r.has_capacity());
    }

    #[test]
    fn test_exclusive_role() {
        let r = Role::new("md").with_name("Managing Director").exclusive();
        assert!(r.exclusive);
    }

    #[test]
    fn test_zero_capacity() {
        assert!(!Role::new("idle").with_holders(0).has_capacity());
        assert!(!Role::new("idle").with_hours_per_day(0.0).has_capacity());
    }
}
