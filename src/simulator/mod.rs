//! Process and project execution simulation.
//!
//! The simulator computes one deterministic, greedy schedule for a set of
//! interdependent activities: dependency graph from work-product flow,
//! Kahn-style topological scheduling with partial-completion pipelining,
//! per-role availability, duration/cost under execution-mode semantics, and
//! conflict flagging. It performs no optimization search and no I/O.
//!
//! # Entry Points
//!
//! - [`Simulator::simulate_process`]: one process, one activity set.
//! - [`Simulator::simulate_project`]: every release/process combination,
//!   with role availability and budget threaded across releases.
//!
//! # Example
//!
//! ```
//! use chrono::NaiveDate;
//! use procsim::models::{Activity, Role, SimulationScenario, TimeUnit};
//! use procsim::simulator::{ProcessRequest, Simulator};
//!
//! let request = ProcessRequest::new("audit-prep", NaiveDate::from_ymd_opt(2024, 1, 1).unwrap())
//!     .with_activity(
//!         Activity::new("collect")
//!             .with_role("auditor")
//!             .with_trigger("evidence")
//!             .with_result("evidence-pack")
//!             .with_known_time(30.0, TimeUnit::Minutes),
//!     )
//!     .with_activity(
//!         Activity::new("assess")
//!             .with_role("auditor")
//!             .with_trigger("evidence-pack"),
//!     )
//!     .with_role(Role::new("auditor").with_hourly_rate(80.0))
//!     .with_scenario(SimulationScenario::new().with_counts("evidence", 16, 0));
//!
//! let outcome = Simulator::new().simulate_process(&request).unwrap();
//! assert_eq!(outcome.scheduled_activities.len(), 2);
//! ```

mod availability;
mod conflicts;
mod effort;
mod engine;
mod graph;
mod project;
mod quantity;
mod summary;

pub use availability::{InMemoryAvailabilityStore, RoleAvailabilityLedger, RoleAvailabilityStore};
pub use effort::{compute_effort, CostModel, EffortBreakdown, StandardRates};
pub use graph::DependencyGraph;
pub use quantity::{ProducedOutput, QuantityLedger};
pub use summary::ResourceSummary;

use std::collections::HashMap;
use std::sync::Arc;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::SimulationError;
use crate::models::{Activity, Release, Role, ScheduledActivity, SimulationScenario};
use crate::validation::validate_activities;

use conflicts::{apply_conflicts, ConflictContext};
use engine::{run_schedule, EngineRun};

/// Tuning knobs for a simulation run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulatorConfig {
    /// Fraction of the planned budget a single activity may cost before it
    /// is flagged.
    pub activity_budget_share: f64,
    /// Per-item minutes used as the sign-off floor when a terminal
    /// activity is extended past its predecessors.
    pub terminal_floor_minutes_per_item: f64,
}

impl Default for SimulatorConfig {
    fn default() -> Self {
        Self {
            activity_budget_share: 0.3,
            terminal_floor_minutes_per_item: 5.0,
        }
    }
}

/// Input container for a process-scope simulation.
#[derive(Debug, Clone)]
pub struct ProcessRequest {
    /// Process identifier; also the availability scope of the run.
    pub process_id: String,
    /// Activities to schedule.
    pub activities: Vec<Activity>,
    /// Roles available to the run.
    pub roles: Vec<Role>,
    /// Exogenous work-product quantities.
    pub scenario: SimulationScenario,
    /// Day the run begins.
    pub start_date: NaiveDate,
    /// Optional budget for conflict flagging.
    pub planned_budget: Option<f64>,
}

impl ProcessRequest {
    /// Creates a request with no activities.
    pub fn new(process_id: impl Into<String>, start_date: NaiveDate) -> Self {
        Self {
            process_id: process_id.into(),
            activities: Vec::new(),
            roles: Vec::new(),
            scenario: SimulationScenario::new(),
            start_date,
            planned_budget: None,
        }
    }

    /// Adds an activity.
    pub fn with_activity(mut self, activity: Activity) -> Self {
        self.activities.push(activity);
        self
    }

    /// Sets the full activity list.
    pub fn with_activities(mut self, activities: Vec<Activity>) -> Self {
        self.activities = activities;
        self
    }

    /// Adds a role.
    pub fn with_role(mut self, role: Role) -> Self {
        self.roles.push(role);
        self
    }

    /// Sets the scenario.
    pub fn with_scenario(mut self, scenario: SimulationScenario) -> Self {
        self.scenario = scenario;
        self
    }

    /// Sets the planned budget.
    pub fn with_budget(mut self, budget: f64) -> Self {
        self.planned_budget = Some(budget);
        self
    }
}

/// Input container for a project-scope simulation.
#[derive(Debug, Clone)]
pub struct ProjectRequest {
    /// Releases in execution order.
    pub releases: Vec<Release>,
    /// Release id → process ids executed within it, in order.
    pub processes_by_release: HashMap<String, Vec<String>>,
    /// Process id → its activity set.
    pub activities_by_process: HashMap<String, Vec<Activity>>,
    /// Roles available to the whole project.
    pub roles: Vec<Role>,
    /// Project-wide exogenous quantities; release targets override them.
    pub scenario: SimulationScenario,
    /// Day the project begins.
    pub project_start: NaiveDate,
    /// Project-level budget for conflict flagging.
    pub planned_budget: Option<f64>,
}

impl ProjectRequest {
    /// Creates an empty project request.
    pub fn new(project_start: NaiveDate) -> Self {
        Self {
            releases: Vec::new(),
            processes_by_release: HashMap::new(),
            activities_by_process: HashMap::new(),
            roles: Vec::new(),
            scenario: SimulationScenario::new(),
            project_start,
            planned_budget: None,
        }
    }

    /// Adds a release and the processes it executes.
    pub fn with_release<I, S>(mut self, release: Release, processes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.processes_by_release.insert(
            release.id.clone(),
            processes.into_iter().map(Into::into).collect(),
        );
        self.releases.push(release);
        self
    }

    /// Registers a process's activity set.
    pub fn with_process(mut self, process_id: impl Into<String>, activities: Vec<Activity>) -> Self {
        self.activities_by_process
            .insert(process_id.into(), activities);
        self
    }

    /// Adds a role.
    pub fn with_role(mut self, role: Role) -> Self {
        self.roles.push(role);
        self
    }

    /// Sets the project-wide scenario.
    pub fn with_scenario(mut self, scenario: SimulationScenario) -> Self {
        self.scenario = scenario;
        self
    }

    /// Sets the planned budget.
    pub fn with_budget(mut self, budget: f64) -> Self {
        self.planned_budget = Some(budget);
        self
    }
}

/// Result of a simulation run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationOutcome {
    /// One row per input activity, in emission (topological) order.
    pub scheduled_activities: Vec<ScheduledActivity>,
    /// Per-role effort and cost aggregation.
    pub resources: ResourceSummary,
    /// Sum of all row costs.
    pub total_cost: f64,
}

impl SimulationOutcome {
    /// Finds the row for an activity.
    pub fn row_for(&self, activity_id: &str) -> Option<&ScheduledActivity> {
        self.scheduled_activities
            .iter()
            .find(|r| r.activity_id == activity_id)
    }

    /// Latest end date across all rows.
    pub fn completion(&self) -> Option<NaiveDate> {
        self.resources.completion
    }
}

/// Process/project execution simulator.
///
/// Deterministic and single-threaded: output depends only on the inputs and
/// the stable input order, never on wall-clock time.
#[derive(Debug, Clone)]
pub struct Simulator {
    cost_model: Arc<dyn CostModel>,
    config: SimulatorConfig,
}

impl Simulator {
    /// Creates a simulator with [`StandardRates`] and default config.
    pub fn new() -> Self {
        Self {
            cost_model: Arc::new(StandardRates::default()),
            config: SimulatorConfig::default(),
        }
    }

    /// Swaps the cost strategy.
    pub fn with_cost_model<M: CostModel + 'static>(mut self, model: M) -> Self {
        self.cost_model = Arc::new(model);
        self
    }

    /// Overrides the config.
    pub fn with_config(mut self, config: SimulatorConfig) -> Self {
        self.config = config;
        self
    }

    /// Simulates a single process run.
    ///
    /// # Errors
    /// [`SimulationError`] on structural input problems (duplicate ids,
    /// malformed triggers, dependency cycles). No partial output is
    /// returned on error.
    pub fn simulate_process(
        &self,
        request: &ProcessRequest,
    ) -> Result<SimulationOutcome, SimulationError> {
        validate_activities(&request.activities)?;

        let roles: HashMap<String, Role> = request
            .roles
            .iter()
            .map(|r| (r.id.clone(), r.clone()))
            .collect();
        let run = EngineRun {
            scope_id: &request.process_id,
            run_start: request.start_date,
            roles: &roles,
            cost_model: self.cost_model.as_ref(),
            config: &self.config,
        };

        let mut availability = RoleAvailabilityLedger::new();
        let mut quantities = QuantityLedger::seeded(request.start_date, &request.scenario);
        let mut rows = run_schedule(&request.activities, &run, &mut availability, &mut quantities)?;

        for row in &mut rows {
            row.process_id = Some(request.process_id.clone());
        }

        let ctx = ConflictContext {
            release: None,
            planned_budget: request.planned_budget,
            activity_budget_share: self.config.activity_budget_share,
        };
        let mut running_cost = 0.0;
        apply_conflicts(&mut rows, &ctx, &mut running_cost);

        let resources = ResourceSummary::calculate(&rows);
        let total_cost = resources.total_cost;
        debug!(
            process = %request.process_id,
            activities = rows.len(),
            total_cost,
            "process simulation complete"
        );

        Ok(SimulationOutcome {
            scheduled_activities: rows,
            resources,
            total_cost,
        })
    }

    /// Simulates a whole project across its releases.
    ///
    /// # Errors
    /// As [`Simulator::simulate_process`]; structural errors in any process
    /// abort the whole project run before scheduling begins.
    pub fn simulate_project(
        &self,
        request: &ProjectRequest,
    ) -> Result<SimulationOutcome, SimulationError> {
        project::run_project(request, self.cost_model.as_ref(), &self.config)
    }
}

impl Default for Simulator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TimeUnit;

    fn date(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, d).unwrap()
    }

    fn triage_request() -> ProcessRequest {
        ProcessRequest::new("triage", date(1))
            .with_activity(
                Activity::new("classify")
                    .with_role("analyst")
                    .with_trigger("incidents")
                    .with_result("classified")
                    .with_known_time(30.0, TimeUnit::Minutes),
            )
            .with_activity(
                Activity::new("dispatch")
                    .with_role("analyst")
                    .with_trigger("classified")
                    .with_known_time(15.0, TimeUnit::Minutes),
            )
            .with_role(Role::new("analyst").with_hourly_rate(60.0))
            .with_scenario(SimulationScenario::new().with_counts("incidents", 16, 0))
    }

    #[test]
    fn test_simulate_process_outcome() {
        let outcome = Simulator::new().simulate_process(&triage_request()).unwrap();

        assert_eq!(outcome.scheduled_activities.len(), 2);
        // classify: 16 × 30min = 8h → 1 day at 8h/day; dispatch: 16 × 15min = 4h.
        let classify = outcome.row_for("classify").unwrap();
        let dispatch = outcome.row_for("dispatch").unwrap();
        assert!((classify.duration_days - 1.0).abs() < 1e-10);
        assert!((dispatch.total_hours - 4.0).abs() < 1e-10);
        assert_eq!(classify.process_id.as_deref(), Some("triage"));

        // 12h × 60 = 720 total.
        assert!((outcome.total_cost - 720.0).abs() < 1e-9);
        assert!((outcome.resources.effort_for("analyst") - 12.0).abs() < 1e-10);
        assert_eq!(outcome.completion(), dispatch.end.into());
    }

    #[test]
    fn test_total_cost_is_row_sum() {
        let outcome = Simulator::new().simulate_process(&triage_request()).unwrap();
        let sum: f64 = outcome.scheduled_activities.iter().map(|r| r.cost).sum();
        assert!((outcome.total_cost - sum).abs() < 1e-12);
    }

    #[test]
    fn test_budget_flags_in_process_scope() {
        let request = triage_request().with_budget(700.0);
        let outcome = Simulator::new().simulate_process(&request).unwrap();

        // Running total: 480, then 720 > 700.
        assert!(!outcome.row_for("classify").unwrap().flags.budget_conflict);
        assert!(outcome.row_for("dispatch").unwrap().flags.budget_conflict);
        // 480 > 0.3 × 700 = 210 → single-activity conflict too.
        assert!(outcome.row_for("classify").unwrap().flags.activity_cost_conflict);
    }

    #[test]
    fn test_custom_cost_model() {
        #[derive(Debug)]
        struct FlatFee;
        impl CostModel for FlatFee {
            fn name(&self) -> &'static str {
                "flat-fee"
            }
            fn cost(&self, _: &Activity, _: Option<&Role>, effort_hours: f64) -> f64 {
                if effort_hours > 0.0 {
                    100.0
                } else {
                    0.0
                }
            }
        }

        let outcome = Simulator::new()
            .with_cost_model(FlatFee)
            .simulate_process(&triage_request())
            .unwrap();
        assert!((outcome.total_cost - 200.0).abs() < 1e-12);
    }

    #[test]
    fn test_duplicate_id_rejected() {
        let request = ProcessRequest::new("p", date(1))
            .with_activity(Activity::new("a"))
            .with_activity(Activity::new("a"));
        let err = Simulator::new().simulate_process(&request).unwrap_err();
        assert_eq!(err, SimulationError::DuplicateActivity("a".into()));
    }

    #[test]
    fn test_empty_request() {
        let request = ProcessRequest::new("empty", date(1));
        let outcome = Simulator::new().simulate_process(&request).unwrap();
        assert!(outcome.scheduled_activities.is_empty());
        assert_eq!(outcome.completion(), None);
        assert!((outcome.total_cost - 0.0).abs() < 1e-12);
    }
}
