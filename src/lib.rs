//! Execution simulation for process- and project-management systems.
//!
//! Given a network of interdependent activities, computes a feasible
//! schedule (start/end dates), resource consumption, and cost, and flags
//! scheduling conflicts. Dependencies are derived from work-product flow:
//! an activity consuming a product depends on every activity producing it,
//! with partial-completion thresholds enabling pipelined overlap.
//!
//! # Modules
//!
//! - **`models`**: Domain types — `Activity`, `Role`, `SimulationScenario`,
//!   `Release`, `ScheduledActivity`
//! - **`simulator`**: The engine — dependency graph, topological scheduler,
//!   duration/cost model, availability and quantity ledgers, conflict
//!   detection, project composition
//! - **`validation`**: Structural input checks before a run
//! - **`error`**: Fatal error taxonomy
//!
//! # Architecture
//!
//! The core is pure and in-memory: entry points take plain data and return
//! plain data, with persistence seams (`RoleAvailabilityStore`, `CostModel`)
//! injected by the orchestrating layer. Scheduling is single-threaded and
//! deterministic — given the same inputs in the same order, the same
//! schedule comes out.
//!
//! # References
//!
//! - Pinedo (2016), "Scheduling: Theory, Algorithms, and Systems"
//! - Cormen et al. (2009), "Introduction to Algorithms", Ch. 22.4

pub mod error;
pub mod models;
pub mod simulator;
pub mod validation;
