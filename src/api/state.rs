//! Application state for the Time Accounting Engine API.
//!
//! This module defines the shared application state that is available
//! to all request handlers.

use std::sync::Arc;

use crate::config::ConfigLoader;
use crate::engine::TimeClock;
use crate::error::EngineResult;
use crate::models::Employee;
use crate::store::PunchStore;

/// Shared application state.
///
/// Holds the engine and the loaded roster. Cloning is cheap; both live
/// behind [`Arc`].
#[derive(Clone)]
pub struct AppState {
    /// The loaded configuration and employee roster.
    config: Arc<ConfigLoader>,
    /// The engine every handler calls into.
    clock: Arc<TimeClock>,
}

impl AppState {
    /// Creates the state from a loaded configuration and a punch store.
    pub fn new(config: ConfigLoader, store: Arc<dyn PunchStore>) -> Self {
        let clock = TimeClock::new(store, config.config().clone());
        Self {
            config: Arc::new(config),
            clock: Arc::new(clock),
        }
    }

    /// Returns a reference to the configuration loader.
    pub fn config(&self) -> &ConfigLoader {
        &self.config
    }

    /// Returns the engine.
    pub fn clock(&self) -> &TimeClock {
        &self.clock
    }

    /// Looks up a roster employee, failing with `EmployeeNotFound`.
    pub fn employee(&self, employee_id: &str) -> EngineResult<&Employee> {
        self.config.get_employee(employee_id)
    }
}
