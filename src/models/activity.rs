//! Activity model.
//!
//! An activity is the unit of work in a process: it consumes trigger work
//! products, occupies a role for its duration, and may produce a result
//! work product for downstream activities.
//!
//! # Trigger Model
//!
//! Each trigger entry names a work product and the completion fraction it
//! must reach before this activity can start. A completion below 100%
//! enables pipelined overlap with the producing activity. At most one entry
//! may be marked as the determining factor; when present, it alone governs
//! start timing and item-count resolution.
//!
//! # Effort Model
//!
//! Per-item times come in two flavors: `known_time_per_item` for fully
//! specified items and `estimated_time_per_item` for uncertain ones. Both
//! carry their own time unit and are scaled by `multiplicator`.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// An activity to be scheduled.
///
/// Activities are read-only inputs to a simulation run. Dependencies are
/// not declared directly; they are derived from trigger/result work-product
/// relationships by the dependency graph builder.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Activity {
    /// Unique activity identifier.
    pub id: String,
    /// Human-readable name.
    pub name: String,
    /// Role that executes this activity. `None` = unassigned (scheduled
    /// with zero capacity and a warning).
    pub executed_by: Option<String>,
    /// Work product this activity produces, if any.
    pub result: Option<String>,
    /// Work products that must progress before this activity starts.
    pub trigger: Vec<TriggerEntry>,
    /// Work product whose completion governs start timing when several
    /// trigger entries are listed. Must reference a trigger entry.
    pub determining_factor: Option<String>,
    /// Time to process one fully specified item.
    pub known_time_per_item: TimeSpec,
    /// Time to process one estimated/uncertain item.
    pub estimated_time_per_item: TimeSpec,
    /// Effort scaling factor (>= 0).
    pub multiplicator: f64,
    /// How the role's holders share the item stream.
    pub execution_mode: ExecutionMode,
    /// End-sentinel marker: this activity's end may not precede the latest
    /// end among its direct predecessors.
    pub is_terminal: bool,
    /// Domain-specific metadata.
    pub attributes: HashMap<String, String>,
}

impl Activity {
    /// Creates a new activity.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: String::new(),
            executed_by: None,
            result: None,
            trigger: Vec::new(),
            determining_factor: None,
            known_time_per_item: TimeSpec::default(),
            estimated_time_per_item: TimeSpec::default(),
            multiplicator: 1.0,
            execution_mode: ExecutionMode::Parallel,
            is_terminal: false,
            attributes: HashMap::new(),
        }
    }

    /// Sets the activity name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Sets the executing role.
    pub fn with_role(mut self, role_id: impl Into<String>) -> Self {
        self.executed_by = Some(role_id.into());
        self
    }

    /// Sets the produced work product.
    pub fn with_result(mut self, work_product_id: impl Into<String>) -> Self {
        self.result = Some(work_product_id.into());
        self
    }

    /// Adds a trigger entry requiring full completion of a work product.
    pub fn with_trigger(mut self, work_product_id: impl Into<String>) -> Self {
        self.trigger.push(TriggerEntry::new(work_product_id));
        self
    }

    /// Adds a trigger entry with an explicit completion threshold.
    pub fn with_trigger_at(
        mut self,
        work_product_id: impl Into<String>,
        completion_percentage: f64,
    ) -> Self {
        self.trigger
            .push(TriggerEntry::new(work_product_id).with_completion(completion_percentage));
        self
    }

    /// Marks a trigger work product as the determining factor.
    pub fn with_determining_factor(mut self, work_product_id: impl Into<String>) -> Self {
        let id = work_product_id.into();
        for entry in &mut self.trigger {
            if entry.work_product_id == id {
                entry.is_determining_factor = true;
            }
        }
        self.determining_factor = Some(id);
        self
    }

    /// Sets the known-item processing time.
    pub fn with_known_time(mut self, value: f64, unit: TimeUnit) -> Self {
        self.known_time_per_item = TimeSpec::new(value, unit);
        self
    }

    /// Sets the estimated-item processing time.
    pub fn with_estimated_time(mut self, value: f64, unit: TimeUnit) -> Self {
        self.estimated_time_per_item = TimeSpec::new(value, unit);
        self
    }

    /// Sets the effort scaling factor.
    pub fn with_multiplicator(mut self, multiplicator: f64) -> Self {
        self.multiplicator = multiplicator;
        self
    }

    /// Sets the execution mode.
    pub fn with_execution_mode(mut self, mode: ExecutionMode) -> Self {
        self.execution_mode = mode;
        self
    }

    /// Marks this activity as the end sentinel of its process.
    pub fn terminal(mut self) -> Self {
        self.is_terminal = true;
        self
    }

    /// Adds a domain-specific attribute.
    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }

    /// Whether this activity has any trigger entries.
    pub fn has_trigger(&self) -> bool {
        !self.trigger.is_empty()
    }

    /// Returns the determining trigger entry, if one is designated.
    ///
    /// An entry is determining if it carries the flag or if the activity's
    /// `determining_factor` names its work product.
    pub fn determining_entry(&self) -> Option<&TriggerEntry> {
        self.trigger.iter().find(|e| {
            e.is_determining_factor
                || self.determining_factor.as_deref() == Some(e.work_product_id.as_str())
        })
    }
}

/// A trigger entry: a work product with a completion threshold.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TriggerEntry {
    /// Referenced work product.
    pub work_product_id: String,
    /// Completion fraction (0..=100) the work product must reach before the
    /// consuming activity can start.
    pub completion_percentage: f64,
    /// Whether this entry governs start timing when several are listed.
    pub is_determining_factor: bool,
}

impl TriggerEntry {
    /// Creates an entry requiring full completion.
    pub fn new(work_product_id: impl Into<String>) -> Self {
        Self {
            work_product_id: work_product_id.into(),
            completion_percentage: 100.0,
            is_determining_factor: false,
        }
    }

    /// Sets the completion threshold.
    pub fn with_completion(mut self, percentage: f64) -> Self {
        self.completion_percentage = percentage;
        self
    }

    /// Marks this entry as the determining factor.
    pub fn determining(mut self) -> Self {
        self.is_determining_factor = true;
        self
    }
}

/// A per-item processing time with its unit.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimeSpec {
    /// Time value in `unit`.
    pub value: f64,
    /// Unit the value is expressed in.
    pub unit: TimeUnit,
}

impl TimeSpec {
    /// Creates a time spec.
    pub fn new(value: f64, unit: TimeUnit) -> Self {
        Self { value, unit }
    }

    /// Creates a spec in minutes.
    pub fn minutes(value: f64) -> Self {
        Self::new(value, TimeUnit::Minutes)
    }

    /// Creates a spec in hours.
    pub fn hours(value: f64) -> Self {
        Self::new(value, TimeUnit::Hours)
    }

    /// Creates a spec in days.
    pub fn days(value: f64) -> Self {
        Self::new(value, TimeUnit::Days)
    }

    /// Converts to minutes. Day-valued specs scale by the role's daily
    /// working hours.
    pub fn to_minutes(&self, working_hours_per_day: f64) -> f64 {
        match self.unit {
            TimeUnit::Minutes => self.value,
            TimeUnit::Hours => self.value * 60.0,
            TimeUnit::Days => self.value * working_hours_per_day * 60.0,
        }
    }
}

impl Default for TimeSpec {
    fn default() -> Self {
        Self::minutes(0.0)
    }
}

/// Unit of a per-item processing time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeUnit {
    /// Minutes, used as-is.
    Minutes,
    /// Hours, converted at 60 minutes.
    Hours,
    /// Working days, converted at the role's daily hours.
    Days,
}

/// How a role's holders share an activity's item stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ExecutionMode {
    /// Holders work the same item stream concurrently: duration shrinks
    /// with holder count, effort stays flat.
    Parallel,
    /// Every holder repeats the full effort independently: effort grows
    /// with holder count, duration stays flat.
    ForEach,
}
