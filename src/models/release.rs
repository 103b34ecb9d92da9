//! Release model.
//!
//! A release is a project-level, time-boxed delivery window. Its date window
//! bounds the activities scheduled for it (violations surface as date
//! conflicts), and its delivery targets seed the quantity ledger for the
//! processes executed within it.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::{ItemCounts, SimulationScenario};

/// A time-boxed delivery window within a project.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Release {
    /// Unique release identifier.
    pub id: String,
    /// Human-readable name.
    pub name: String,
    /// First day of the release window (inclusive).
    pub window_start: NaiveDate,
    /// Last day of the release window (inclusive).
    pub window_end: NaiveDate,
    /// Work-product delivery targets: item counts this release commits to.
    pub targets: HashMap<String, ItemCounts>,
}

impl Release {
    /// Creates a release with the given window.
    pub fn new(id: impl Into<String>, window_start: NaiveDate, window_end: NaiveDate) -> Self {
        Self {
            id: id.into(),
            name: String::new(),
            window_start,
            window_end,
            targets: HashMap::new(),
        }
    }

    /// Sets the release name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Adds a work-product delivery target.
    pub fn with_target(
        mut self,
        work_product_id: impl Into<String>,
        known: u32,
        unknown: u32,
    ) -> Self {
        self.targets
            .insert(work_product_id.into(), ItemCounts::new(known, unknown));
        self
    }

    /// Whether a date falls inside the release window.
    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.window_start && date <= self.window_end
    }

    /// The delivery targets as a scenario, for seeding a quantity ledger.
    pub fn target_scenario(&self) -> SimulationScenario {
        SimulationScenario {
            counts: self.targets.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_release_builder() {
        let r = Release::new("r1", date(2024, 3, 1), date(2024, 6, 30))
            .with_name("Spring release")
            .with_target("requirements", 40, 10);

        assert_eq!(r.id, "r1");
        assert_eq!(r.name, "Spring release");
        assert_eq!(r.targets.get("requirements"), Some(&ItemCounts::new(40, 10)));
    }

    #[test]
    fn test_window_containment() {
        let r = Release::new("r1", date(2024, 3, 1), date(2024, 6, 30));
        assert!(r.contains(date(2024, 3, 1)));
        assert!(r.contains(date(2024, 6, 30)));
        assert!(!r.contains(date(2024, 2, 29)));
        assert!(!r.contains(date(2024, 7, 1)));
    }

    #[test]
    fn test_target_scenario() {
        let r = Release::new("r1", date(2024, 3, 1), date(2024, 6, 30))
            .with_target("test-cases", 0, 80);
        let s = r.target_scenario();
        assert_eq!(s.counts_for("test-cases"), Some(ItemCounts::new(0, 80)));
    }
}
