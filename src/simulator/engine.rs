//! Topological scheduling engine.
//!
//! Kahn-style worklist over the dependency graph: a FIFO queue seeded with
//! all in-degree-0 activities in stable input order. Each popped activity is
//! scheduled exactly once — dependency readiness comes from the graph,
//! resource timing from the availability ledger, and neither ever causes a
//! re-queue, so termination is structural.
//!
//! # Per-Activity Steps
//!
//! 1. Work-product ready time: completion-weighted availability of the
//!    trigger products (the determining factor alone when designated).
//! 2. Role ready time from the availability ledger.
//! 3. `start = max(both)`; a start dictated by the role rather than the
//!    work products is flagged as a start conflict.
//! 4. Item counts resolve scenario-first, then producer outputs.
//! 5. Duration/cost via the effort model; `end = start + ceil(days)`.
//! 6. Terminal sentinels may not end before their latest predecessor; they
//!    are pushed past it by a per-item floor and their duration recomputed.
//! 7. Output quantities are recorded and the role committed busy.
//!
//! # Reference
//! Cormen et al. (2009), "Introduction to Algorithms", Ch. 22.4 (Kahn)

use std::collections::{HashMap, VecDeque};

use chrono::{Duration, NaiveDate};
use tracing::{debug, warn};

use crate::error::SimulationError;
use crate::models::{Activity, ItemCounts, Role, ScheduledActivity};

use super::availability::RoleAvailabilityLedger;
use super::effort::{compute_effort, round2, CostModel};
use super::graph::DependencyGraph;
use super::quantity::{ProducedOutput, QuantityLedger};
use super::SimulatorConfig;

/// Inputs shared by every activity of one scheduling run.
pub(crate) struct EngineRun<'a> {
    /// Scope id for availability bookkeeping.
    pub scope_id: &'a str,
    /// Day the run begins.
    pub run_start: NaiveDate,
    /// Roles by id.
    pub roles: &'a HashMap<String, Role>,
    /// Cost strategy.
    pub cost_model: &'a dyn CostModel,
    /// Tuning knobs.
    pub config: &'a SimulatorConfig,
}

/// Schedules one activity set, updating both ledgers as it goes.
///
/// Emits one row per input activity in a valid topological order; ties
/// among simultaneously ready activities break by input order.
///
/// # Errors
/// [`SimulationError::CycleDetected`] from the graph build, or the
/// defensive [`SimulationError::UnsatisfiableActivity`] if the queue
/// drains early (only reachable if the cycle check were bypassed).
pub(crate) fn run_schedule(
    activities: &[Activity],
    run: &EngineRun<'_>,
    availability: &mut RoleAvailabilityLedger,
    quantities: &mut QuantityLedger,
) -> Result<Vec<ScheduledActivity>, SimulationError> {
    let graph = DependencyGraph::build(activities)?;

    let mut in_degree = graph.in_degrees().to_vec();
    let mut queue: VecDeque<usize> = graph.roots().into();
    let mut latest_pred_end: Vec<Option<NaiveDate>> = vec![None; activities.len()];
    let mut scheduled = vec![false; activities.len()];
    let mut rows = Vec::with_capacity(activities.len());

    while let Some(idx) = queue.pop_front() {
        let activity = &activities[idx];
        let (role, warning) = resolve_role(activity, run.roles);

        // Completion-weighted readiness of the trigger products.
        let wp_ready = work_product_ready(activity, quantities, run.run_start);

        let role_ready = role
            .map(|r| availability.earliest_available(run.scope_id, r, run.run_start))
            .unwrap_or(run.run_start);

        let start = wp_ready.max(role_ready);

        // Counts drive duration; the scenario wins over producer outputs.
        let counts = resolve_counts(activity, quantities);
        let effort = compute_effort(activity, counts, role);

        let mut duration_days = effort.duration_days;
        let mut end = start + Duration::days(duration_days.ceil() as i64);

        // Sign-off lag cannot undercut the slowest predecessor.
        if activity.is_terminal {
            if let Some(latest) = latest_pred_end[idx] {
                if end < latest {
                    end = latest + Duration::days(terminal_floor_days(role, counts, run.config));
                    duration_days = (end - start).num_days() as f64;
                }
            }
        }

        // Expose produced quantities to downstream consumers.
        if let Some(product) = &activity.result {
            quantities.record_output(
                product,
                ProducedOutput {
                    start,
                    duration_days,
                    counts,
                },
            );
        }

        // The role is busy through this activity's end.
        if let Some(r) = role {
            availability.commit(run.scope_id, r, end);
        }

        let cost = round2(run.cost_model.cost(activity, role, effort.effort_hours));
        let mut row = ScheduledActivity::new(activity.id.clone(), start, end);
        row.activity_name = activity.name.clone();
        row.role_id = activity.executed_by.clone();
        row.duration_days = round2(duration_days);
        row.total_hours = round2(effort.total_hours);
        row.effort_hours = round2(effort.effort_hours);
        row.cost = cost;
        row.flags.has_start_conflict = role_ready > wp_ready;
        row.flags.has_error = !activity.has_trigger();
        row.warning = warning;

        debug!(
            activity = %activity.id,
            start = %start,
            end = %end,
            cost,
            "scheduled activity"
        );
        rows.push(row);
        scheduled[idx] = true;

        // Unlock successors.
        for &next in graph.successors(idx) {
            let pred_end = latest_pred_end[next].get_or_insert(end);
            *pred_end = (*pred_end).max(end);

            in_degree[next] -= 1;
            if in_degree[next] == 0 {
                queue.push_back(next);
            }
        }
    }

    if rows.len() != activities.len() {
        let stuck: Vec<String> = activities
            .iter()
            .enumerate()
            .filter(|(i, _)| !scheduled[*i])
            .map(|(_, a)| a.id.clone())
            .collect();
        return Err(SimulationError::UnsatisfiableActivity {
            activity_ids: stuck,
        });
    }

    Ok(rows)
}

/// Resolves an activity's role, producing the row warning for anomalies.
fn resolve_role<'a>(
    activity: &Activity,
    roles: &'a HashMap<String, Role>,
) -> (Option<&'a Role>, Option<String>) {
    match &activity.executed_by {
        None => (None, Some("no executing role assigned".to_string())),
        Some(role_id) => match roles.get(role_id) {
            Some(role) if role.has_capacity() => (Some(role), None),
            Some(role) => (
                Some(role),
                Some(format!("role '{role_id}' has no working capacity")),
            ),
            None => {
                warn!(activity = %activity.id, role = %role_id, "executing role not found");
                (None, Some(format!("role '{role_id}' is not defined")))
            }
        },
    }
}

/// Latest completion-weighted availability across the trigger.
///
/// A designated determining factor governs alone; otherwise every entry
/// must be ready. Activities without triggers are ready at the run start.
fn work_product_ready(
    activity: &Activity,
    quantities: &QuantityLedger,
    run_start: NaiveDate,
) -> NaiveDate {
    if let Some(det) = activity.determining_entry() {
        return quantities.ready_time(&det.work_product_id, det.completion_percentage);
    }
    activity
        .trigger
        .iter()
        .map(|e| quantities.ready_time(&e.work_product_id, e.completion_percentage))
        .max()
        .unwrap_or(run_start)
}

/// Item counts feeding the effort model.
///
/// The determining factor's counts when designated; the sum across trigger
/// products otherwise.
fn resolve_counts(activity: &Activity, quantities: &QuantityLedger) -> ItemCounts {
    if let Some(det) = activity.determining_entry() {
        return quantities.counts_for(&det.work_product_id);
    }
    activity
        .trigger
        .iter()
        .fold(ItemCounts::default(), |acc, e| {
            acc + quantities.counts_for(&e.work_product_id)
        })
}

/// Minimum sign-off duration for a terminal activity, in whole days.
fn terminal_floor_days(role: Option<&Role>, counts: ItemCounts, config: &SimulatorConfig) -> i64 {
    match role {
        Some(r) if r.has_capacity() => {
            let hours = f64::from(counts.total()) * config.terminal_floor_minutes_per_item / 60.0;
            (hours / r.working_hours_per_day).ceil() as i64
        }
        _ => 0,
    }
}
