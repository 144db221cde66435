//! Per-employee advisory locks.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

/// A registry of one mutex per employee id.
///
/// Holding an employee's lock serializes the read-plan-commit sequence of
/// their transitions. Different employees never contend.
#[derive(Debug, Default)]
pub struct EmployeeLocks {
    locks: Mutex<HashMap<String, Arc<Mutex<()>>>>,
}

impl EmployeeLocks {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    fn lock_for(&self, employee_id: &str) -> Arc<Mutex<()>> {
        // The guarded data is `()`, so a poisoned lock carries no broken state.
        let mut locks = self.locks.lock().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(locks.entry(employee_id.to_string()).or_default())
    }

    /// Runs `f` while holding the lock of `employee_id`.
    pub fn with_lock<T>(&self, employee_id: &str, f: impl FnOnce() -> T) -> T {
        let lock = self.lock_for(employee_id);
        let _guard = lock.lock().unwrap_or_else(PoisonError::into_inner);
        f()
    }

    /// Number of employees that have taken a lock so far.
    pub fn len(&self) -> usize {
        self.locks
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Returns true if no lock has been taken yet.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
