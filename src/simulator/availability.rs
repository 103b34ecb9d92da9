//! Role availability ledger.
//!
//! Tracks, per scope and role, the earliest day the role is free. A scope is
//! one simulation run (a process run, or a whole project run). Commits are
//! monotone: availability never moves backward.
//!
//! # Exclusive Roles
//!
//! Roles flagged exclusive additionally record `busy_until` keyed by role
//! alone, outside any scope. Their earliest availability is the later of the
//! scoped value and the global one, which serializes a named decision maker
//! across separate work streams and releases.
//!
//! # Persistence Boundary
//!
//! The ledger itself is plain in-memory state owned by the scheduler. The
//! [`RoleAvailabilityStore`] trait is the seam for the orchestrating layer
//! to seed it before a run and persist it afterwards; the scheduling
//! algorithm performs no I/O.

use std::collections::HashMap;

use chrono::NaiveDate;

use crate::models::Role;

/// External persistence for role availability records.
///
/// Implemented outside the core (the CRUD layer); [`InMemoryAvailabilityStore`]
/// is provided for tests and single-process callers.
pub trait RoleAvailabilityStore {
    /// Reads the availability record for a role within a scope.
    fn get(&self, role_id: &str, scope_id: &str) -> Option<NaiveDate>;

    /// Writes the availability record for a role within a scope.
    fn put(&mut self, role_id: &str, scope_id: &str, available_from: NaiveDate);

    /// Drops every record of a scope.
    fn clear(&mut self, scope_id: &str);
}

/// HashMap-backed availability store.
#[derive(Debug, Clone, Default)]
pub struct InMemoryAvailabilityStore {
    records: HashMap<String, HashMap<String, NaiveDate>>,
}

impl InMemoryAvailabilityStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

impl RoleAvailabilityStore for InMemoryAvailabilityStore {
    fn get(&self, role_id: &str, scope_id: &str) -> Option<NaiveDate> {
        self.records.get(scope_id)?.get(role_id).copied()
    }

    fn put(&mut self, role_id: &str, scope_id: &str, available_from: NaiveDate) {
        self.records
            .entry(scope_id.to_string())
            .or_default()
            .insert(role_id.to_string(), available_from);
    }

    fn clear(&mut self, scope_id: &str) {
        self.records.remove(scope_id);
    }
}

/// Per-run availability state for all roles.
#[derive(Debug, Clone, Default)]
pub struct RoleAvailabilityLedger {
    /// scope id → role id → earliest free day.
    available_from: HashMap<String, HashMap<String, NaiveDate>>,
    /// role id → end of the role's latest activity, any scope.
    /// Populated for exclusive roles only.
    busy_until: HashMap<String, NaiveDate>,
}

impl RoleAvailabilityLedger {
    /// Creates an empty ledger.
    pub fn new() -> Self {
        Self::default()
    }

    /// Earliest day the role can start its next activity within `scope_id`.
    ///
    /// Falls back to `run_start` for roles without a record. Exclusive roles
    /// are additionally held back by their cross-scope `busy_until`.
    pub fn earliest_available(&self, scope_id: &str, role: &Role, run_start: NaiveDate) -> NaiveDate {
        let scoped = self
            .available_from
            .get(scope_id)
            .and_then(|roles| roles.get(&role.id))
            .copied()
            .unwrap_or(run_start);

        if role.exclusive {
            match self.busy_until.get(&role.id) {
                Some(&busy) => scoped.max(busy),
                None => scoped,
            }
        } else {
            scoped
        }
    }

    /// Commits the role as busy until `until` within `scope_id`.
    ///
    /// Availability never regresses: the committed value is the max of the
    /// current record and `until`.
    pub fn commit(&mut self, scope_id: &str, role: &Role, until: NaiveDate) {
        let entry = self
            .available_from
            .entry(scope_id.to_string())
            .or_default()
            .entry(role.id.clone())
            .or_insert(until);
        *entry = (*entry).max(until);

        if role.exclusive {
            let busy = self.busy_until.entry(role.id.clone()).or_insert(until);
            *busy = (*busy).max(until);
        }
    }

    /// Seeds a scope from a store.
    pub fn seed_scope(&mut self, scope_id: &str, roles: &[Role], store: &dyn RoleAvailabilityStore) {
        for role in roles {
            if let Some(date) = store.get(&role.id, scope_id) {
                self.available_from
                    .entry(scope_id.to_string())
                    .or_default()
                    .insert(role.id.clone(), date);
                if role.exclusive {
                    let busy = self.busy_until.entry(role.id.clone()).or_insert(date);
                    *busy = (*busy).max(date);
                }
            }
        }
    }

    /// Persists a scope's records to a store.
    pub fn persist_scope(&self, scope_id: &str, store: &mut dyn RoleAvailabilityStore) {
        if let Some(roles) = self.available_from.get(scope_id) {
            for (role_id, &date) in roles {
                store.put(role_id, scope_id, date);
            }
        }
    }
}
