//! Work-product quantity ledger.
//!
//! Tracks, per work product, the item counts available during a run and
//! when they become usable. Counts are either exogenous (seeded from the
//! simulation scenario before the run) or produced by upstream activities
//! as the scheduler emits them.
//!
//! # Resolution Order
//!
//! Scenario counts take precedence over produced counts; work products
//! known to neither resolve to zero items. Ready times come from producers
//! when any exist (completion-weighted, enabling pipelined overlap) and
//! fall back to the run start for purely exogenous products.

use std::collections::HashMap;

use chrono::{Duration, NaiveDate};

use crate::models::{ItemCounts, SimulationScenario};

/// Output recorded by a producing activity for its result work product.
#[derive(Debug, Clone, Copy)]
pub struct ProducedOutput {
    /// Producer's start day.
    pub start: NaiveDate,
    /// Producer's duration in working days.
    pub duration_days: f64,
    /// Item counts flowing out of the producer.
    pub counts: ItemCounts,
}

impl ProducedOutput {
    /// Day the output reaches `completion_percentage` of its production.
    ///
    /// Partial completion enables pipelining: a consumer waiting for 50%
    /// of a 10-day producer may start on day 5.
    pub fn available_at(&self, completion_percentage: f64) -> NaiveDate {
        let days = (completion_percentage / 100.0 * self.duration_days).ceil() as i64;
        self.start + Duration::days(days)
    }
}

/// Per-run ledger of work-product quantities.
#[derive(Debug, Clone)]
pub struct QuantityLedger {
    run_start: NaiveDate,
    exogenous: HashMap<String, ItemCounts>,
    produced: HashMap<String, Vec<ProducedOutput>>,
}

impl QuantityLedger {
    /// Creates a ledger seeded from a scenario.
    pub fn seeded(run_start: NaiveDate, scenario: &SimulationScenario) -> Self {
        Self {
            run_start,
            exogenous: scenario.counts.clone(),
            produced: HashMap::new(),
        }
    }

    /// Records a producer's output for a work product.
    pub fn record_output(&mut self, work_product_id: &str, output: ProducedOutput) {
        self.produced
            .entry(work_product_id.to_string())
            .or_default()
            .push(output);
    }

    /// Resolves item counts for a work product.
    ///
    /// Scenario counts win; otherwise produced outputs sum; otherwise zero.
    pub fn counts_for(&self, work_product_id: &str) -> ItemCounts {
        if let Some(&counts) = self.exogenous.get(work_product_id) {
            return counts;
        }
        self.produced
            .get(work_product_id)
            .map(|outputs| {
                outputs
                    .iter()
                    .fold(ItemCounts::default(), |acc, o| acc + o.counts)
            })
            .unwrap_or_default()
    }

    /// Day a work product reaches the given completion fraction.
    ///
    /// The latest completion-weighted availability across all recorded
    /// producers; the run start when nothing in the run produces it.
    pub fn ready_time(&self, work_product_id: &str, completion_percentage: f64) -> NaiveDate {
        self.produced
            .get(work_product_id)
            .and_then(|outputs| {
                outputs
                    .iter()
                    .map(|o| o.available_at(completion_percentage))
                    .max()
            })
            .unwrap_or(self.run_start)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, d).unwrap()
    }

    #[test]
    fn test_scenario_counts_win() {
        let scenario = SimulationScenario::new().with_counts("doc", 10, 2);
        let mut ledger = QuantityLedger::seeded(date(1), &scenario);
        ledger.record_output(
            "doc",
            ProducedOutput {
                start: date(1),
                duration_days: 3.0,
                counts: ItemCounts::new(99, 0),
            },
        );

        assert_eq!(ledger.counts_for("doc"), ItemCounts::new(10, 2));
    }

    #[test]
    fn test_produced_counts_sum() {
        let mut ledger = QuantityLedger::seeded(date(1), &SimulationScenario::new());
        for counts in [ItemCounts::new(4, 1), ItemCounts::new(6, 0)] {
            ledger.record_output(
                "doc",
                ProducedOutput {
                    start: date(1),
                    duration_days: 1.0,
                    counts,
                },
            );
        }
        assert_eq!(ledger.counts_for("doc"), ItemCounts::new(10, 1));
    }

    #[test]
    fn test_unknown_product_is_zero() {
        let ledger = QuantityLedger::seeded(date(1), &SimulationScenario::new());
        assert!(ledger.counts_for("missing").is_empty());
    }

    #[test]
    fn test_pipelined_ready_time() {
        // 10-day producer starting day 1: 50% done on day 6 (1 + 5).
        let mut ledger = QuantityLedger::seeded(date(1), &SimulationScenario::new());
        ledger.record_output(
            "doc",
            ProducedOutput {
                start: date(1),
                duration_days: 10.0,
                counts: ItemCounts::new(1, 0),
            },
        );

        assert_eq!(ledger.ready_time("doc", 50.0), date(6));
        assert_eq!(ledger.ready_time("doc", 100.0), date(11));
        // Fractional progress rounds up to whole days.
        assert_eq!(ledger.ready_time("doc", 15.0), date(3));
    }

    #[test]
    fn test_ready_time_takes_latest_producer() {
        let mut ledger = QuantityLedger::seeded(date(1), &SimulationScenario::new());
        ledger.record_output(
            "doc",
            ProducedOutput {
                start: date(1),
                duration_days: 2.0,
                counts: ItemCounts::default(),
            },
        );
        ledger.record_output(
            "doc",
            ProducedOutput {
                start: date(4),
                duration_days: 4.0,
                counts: ItemCounts::default(),
            },
        );

        assert_eq!(ledger.ready_time("doc", 100.0), date(8));
    }

    #[test]
    fn test_exogenous_ready_at_run_start() {
        let scenario = SimulationScenario::new().with_counts("doc", 5, 0);
        let ledger = QuantityLedger::seeded(date(3), &scenario);
        assert_eq!(ledger.ready_time("doc", 100.0), date(3));
    }
}
