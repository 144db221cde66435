//! Employee model.
//!
//! Employees are owned by an external directory; the engine only reads them
//! when producing payroll reports and exports.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

fn default_active() -> bool {
    true
}

/// Represents an employee whose time is tracked.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Employee {
    /// Unique identifier for the employee.
    pub id: String,
    /// Display name, used in exports and reports.
    pub name: String,
    /// Numeric badge identifier printed in the detailed export.
    pub employee_number: u32,
    /// Hourly pay rate.
    pub hourly_rate: Decimal,
    /// Inactive employees are left out of payroll reports.
    #[serde(default = "default_active")]
    pub active: bool,
}

impl Employee {
    /// Finds an employee by id in a roster slice.
    ///
    /// # Examples
    ///
    /// ```
    /// use timeclock_engine::models::Employee;
    /// use rust_decimal::Decimal;
    ///
    /// let roster = vec![Employee {
    ///     id: "emp_001".to_string(),
    ///     name: "Dana Whitfield".to_string(),
    ///     employee_number: 1001,
    ///     hourly_rate: Decimal::new(2000, 2),
    ///     active: true,
    /// }];
    /// assert!(Employee::find(&roster, "emp_001").is_some());
    /// assert!(Employee::find(&roster, "emp_404").is_none());
    /// ```
    pub fn find<'a>(roster: &'a [Employee], employee_id: &str) -> Option<&'a Employee> {
        roster.iter().find(|employee| employee.id == employee_id)
    }
}
