//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading engine
//! settings and the employee roster from YAML files.

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use tracing::{debug, info};

use crate::error::{EngineError, EngineResult};
use crate::models::Employee;

use super::types::{EmployeeRoster, EngineConfig};

/// Loads and provides access to engine configuration and the roster.
///
/// # Directory Structure
///
/// ```text
/// config/timeclock/
/// ├── engine.yaml     # Overtime, schedule and break settings (optional)
/// └── employees.yaml  # Employee roster
/// ```
///
/// # Example
///
/// ```no_run
/// use timeclock_engine::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config/timeclock").unwrap();
/// println!("Overtime after {} hours", loader.config().payroll.overtime_threshold_hours);
/// println!("{} employees", loader.employees().len());
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    config: EngineConfig,
    employees: Vec<Employee>,
}

impl ConfigLoader {
    /// Loads configuration from the specified directory.
    ///
    /// A missing `engine.yaml` falls back to [`EngineConfig::default`]. The
    /// roster file is required.
    ///
    /// # Errors
    ///
    /// - `ConfigNotFound` when `employees.yaml` is missing
    /// - `ConfigParseError` when a file is not valid YAML for its structure
    /// - `InvalidConfig` when values are out of range or employee ids repeat
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();

        let engine_path = path.join("engine.yaml");
        let config = if engine_path.exists() {
            Self::load_yaml::<EngineConfig>(&engine_path)?
        } else {
            debug!(path = %engine_path.display(), "No engine.yaml, using defaults");
            EngineConfig::default()
        };

        let roster_path = path.join("employees.yaml");
        let roster = Self::load_yaml::<EmployeeRoster>(&roster_path)?;

        let loader = Self::from_parts(config, roster.employees)?;
        info!(
            path = %path.display(),
            employees = loader.employees.len(),
            "Loaded timeclock configuration"
        );
        Ok(loader)
    }

    /// Builds a loader from already-parsed parts, running the same validation
    /// as [`ConfigLoader::load`].
    pub fn from_parts(config: EngineConfig, employees: Vec<Employee>) -> EngineResult<Self> {
        config.validate()?;

        let mut seen = HashSet::new();
        for employee in &employees {
            if !seen.insert(employee.id.as_str()) {
                return Err(EngineError::InvalidConfig {
                    field: "employees".to_string(),
                    message: format!("duplicate employee id '{}'", employee.id),
                });
            }
        }

        Ok(Self { config, employees })
    }

    /// Loads and parses a YAML file.
    fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> EngineResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| EngineError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }

    /// Returns the engine configuration.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Returns the full roster, active and inactive.
    pub fn employees(&self) -> &[Employee] {
        &self.employees
    }

    /// Gets an employee by id.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use timeclock_engine::config::ConfigLoader;
    ///
    /// let loader = ConfigLoader::load("./config/timeclock")?;
    /// let employee = loader.get_employee("emp_001")?;
    /// println!("{} earns ${}/hr", employee.name, employee.hourly_rate);
    /// # Ok::<(), timeclock_engine::error::EngineError>(())
    /// ```
    pub fn get_employee(&self, employee_id: &str) -> EngineResult<&Employee> {
        Employee::find(&self.employees, employee_id).ok_or_else(|| {
            EngineError::EmployeeNotFound {
                employee_id: employee_id.to_string(),
            }
        })
    }
}
