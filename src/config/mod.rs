//! Configuration loading and management for the Time Accounting Engine.
//!
//! This module provides functionality to load engine settings (overtime,
//! expected schedule, break policy) and the employee roster from YAML files.
//!
//! # Example
//!
//! ```no_run
//! use timeclock_engine::config::ConfigLoader;
//!
//! let loader = ConfigLoader::load("./config/timeclock").unwrap();
//! println!("Expected hours per day: {}", loader.config().schedule.daily_hours());
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{BreakPolicyConfig, EmployeeRoster, EngineConfig, PayrollConfig, ScheduleConfig};
