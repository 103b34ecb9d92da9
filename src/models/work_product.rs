//! Work-product quantities and simulation scenarios.
//!
//! The core only cares about a work product's id and its item counts:
//! known items are fully specified units of work, unknown items are
//! estimated ones. Names and descriptions are display concerns of the
//! surrounding application.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Item counts for a work product.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemCounts {
    /// Fully specified units of work.
    pub known: u32,
    /// Estimated/uncertain units of work.
    pub unknown: u32,
}

impl ItemCounts {
    /// Creates item counts.
    pub fn new(known: u32, unknown: u32) -> Self {
        Self { known, unknown }
    }

    /// Total items, known and unknown.
    pub fn total(&self) -> u32 {
        self.known + self.unknown
    }

    /// Whether both counts are zero.
    pub fn is_empty(&self) -> bool {
        self.known == 0 && self.unknown == 0
    }
}

impl std::ops::Add for ItemCounts {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self {
            known: self.known + rhs.known,
            unknown: self.unknown + rhs.unknown,
        }
    }
}

/// Exogenous work-product quantities supplied to a simulation run.
///
/// Scenario counts model input that arrives from outside the simulated
/// process (customer documents, inherited baselines). They take precedence
/// over counts produced by upstream activities during the run.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SimulationScenario {
    /// Work product id → supplied counts.
    pub counts: HashMap<String, ItemCounts>,
}

impl SimulationScenario {
    /// Creates an empty scenario.
    pub fn new() -> Self {
        Self::default()
    }

    /// Supplies counts for a work product.
    pub fn with_counts(
        mut self,
        work_product_id: impl Into<String>,
        known: u32,
        unknown: u32,
    ) -> Self {
        self.counts
            .insert(work_product_id.into(), ItemCounts::new(known, unknown));
        self
    }

    /// Looks up counts for a work product.
    pub fn counts_for(&self, work_product_id: &str) -> Option<ItemCounts> {
        self.counts.get(work_product_id).copied()
    }

    /// Merges `other` over this scenario; entries in `other` win.
    pub fn overridden_by(&self, other: &SimulationScenario) -> SimulationScenario {
        let mut counts = self.counts.clone();
        counts.extend(other.counts.iter().map(|(k, v)| (k.clone(), *v)));
        SimulationScenario { counts }
    }
}
