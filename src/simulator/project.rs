//! Project-scope composition.
//!
//! Runs the scheduling engine once per release/process combination. One
//! availability scope spans the whole project run, so a role's time is
//! consumed once globally and can never be double-booked across releases;
//! the budget running total likewise threads through every release in
//! emission order.

use std::collections::HashMap;

use tracing::debug;

use crate::error::SimulationError;
use crate::models::{Role, ScheduledActivity};
use crate::validation::validate_activities;

use super::availability::RoleAvailabilityLedger;
use super::conflicts::{apply_conflicts, ConflictContext};
use super::effort::CostModel;
use super::engine::{run_schedule, EngineRun};
use super::quantity::QuantityLedger;
use super::summary::ResourceSummary;
use super::{ProjectRequest, SimulationOutcome, SimulatorConfig};

/// Availability scope shared by every sub-run of a project simulation.
const PROJECT_SCOPE: &str = "project";

/// Simulates a whole project: every release, every process.
pub(crate) fn run_project(
    req: &ProjectRequest,
    cost_model: &dyn CostModel,
    config: &SimulatorConfig,
) -> Result<SimulationOutcome, SimulationError> {
    // Structural errors must surface before any scheduling happens.
    for processes in req.releases.iter().filter_map(|r| req.processes_by_release.get(&r.id)) {
        for process_id in processes {
            if let Some(activities) = req.activities_by_process.get(process_id) {
                validate_activities(activities)?;
            }
        }
    }

    let roles: HashMap<String, Role> = req
        .roles
        .iter()
        .map(|r| (r.id.clone(), r.clone()))
        .collect();

    let mut availability = RoleAvailabilityLedger::new();
    let mut all_rows: Vec<ScheduledActivity> = Vec::new();
    let mut running_cost = 0.0;

    for release in &req.releases {
        let Some(processes) = req.processes_by_release.get(&release.id) else {
            continue;
        };
        let run_start = req.project_start.max(release.window_start);
        let scenario = req.scenario.overridden_by(&release.target_scenario());

        for process_id in processes {
            let Some(activities) = req.activities_by_process.get(process_id) else {
                debug!(release = %release.id, process = %process_id, "no activities for process");
                continue;
            };

            let run = EngineRun {
                scope_id: PROJECT_SCOPE,
                run_start,
                roles: &roles,
                cost_model,
                config,
            };
            let mut quantities = QuantityLedger::seeded(run_start, &scenario);
            let mut rows = run_schedule(activities, &run, &mut availability, &mut quantities)?;

            for row in &mut rows {
                row.release_id = Some(release.id.clone());
                row.process_id = Some(process_id.clone());
            }

            let ctx = ConflictContext {
                release: Some(release),
                planned_budget: req.planned_budget,
                activity_budget_share: config.activity_budget_share,
            };
            apply_conflicts(&mut rows, &ctx, &mut running_cost);
            all_rows.extend(rows);
        }
    }

    let resources = ResourceSummary::calculate(&all_rows);
    let total_cost = resources.total_cost;
    Ok(SimulationOutcome {
        scheduled_activities: all_rows,
        resources,
        total_cost,
    })
}
