//! Derived report models.
//!
//! None of these are persisted: each is computed from punches, configuration
//! and the caller-supplied `now`.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{ConsistencyWarning, TimeWindow};

/// Work-only hours over a window (day or week totals).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkTotals {
    /// The aggregated window.
    pub window: TimeWindow,
    /// Work hours at full precision.
    pub work_hours: f64,
    /// True when an open work punch was counted up to `now`, so the total
    /// changes with the wall clock.
    pub includes_open_punch: bool,
    /// Consistency faults found in the punches that were read.
    #[serde(default)]
    pub warnings: Vec<ConsistencyWarning>,
}

/// Break hours over a window, split by kind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BreakTotals {
    /// The aggregated window.
    pub window: TimeWindow,
    /// Meal break hours.
    pub meal_hours: f64,
    /// Rest break hours.
    pub rest_hours: f64,
    /// True when an open break punch was counted up to `now`.
    pub includes_open_punch: bool,
}

impl BreakTotals {
    /// Meal and rest hours combined.
    pub fn total_hours(&self) -> f64 {
        self.meal_hours + self.rest_hours
    }
}

/// Weekly pay figures for one employee.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PayPeriodReport {
    /// The employee paid.
    pub employee_id: String,
    /// The employee's display name.
    pub employee_name: String,
    /// Sunday starting the pay week.
    pub week_start: NaiveDate,
    /// All work hours in the week.
    pub total_hours: f64,
    /// Hours up to the overtime threshold.
    pub regular_hours: f64,
    /// Hours beyond the overtime threshold.
    pub overtime_hours: f64,
    /// The hourly rate applied.
    pub hourly_rate: Decimal,
    /// `regular_hours * hourly_rate`, to the cent.
    pub regular_pay: Decimal,
    /// `overtime_hours * hourly_rate * multiplier`, to the cent.
    pub overtime_pay: Decimal,
    /// `regular_pay + overtime_pay`.
    pub gross_pay: Decimal,
}

/// Actual versus scheduled hours as of an instant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProgressReport {
    /// Hours worked today.
    pub actual_today: f64,
    /// Hours the schedule expects by now today.
    pub expected_today: f64,
    /// `actual_today - expected_today`; positive is ahead of schedule.
    pub delta_today: f64,
    /// Hours worked this week.
    pub actual_week: f64,
    /// Hours the schedule expects by now this week.
    pub expected_week: f64,
    /// `actual_week - expected_week`.
    pub delta_week: f64,
    /// True when an open work punch contributed to the actual figures.
    pub includes_open_punch: bool,
}

/// Breaks taken versus the configured entitlement for one day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BreakComplianceReport {
    /// The employee reported on.
    pub employee_id: String,
    /// The calendar day reported on.
    pub date: NaiveDate,
    /// Work hours on the day.
    pub work_hours: f64,
    /// Meal break minutes taken.
    pub meal_minutes_taken: f64,
    /// Rest break minutes taken.
    pub rest_minutes_taken: f64,
    /// Meal break minutes the policy expects for the hours worked.
    pub meal_minutes_required: f64,
    /// Rest break minutes the policy expects for the hours worked.
    pub rest_minutes_required: f64,
    /// True when fewer meal minutes were taken than expected.
    pub meal_shortfall: bool,
    /// True when fewer rest minutes were taken than expected.
    pub rest_shortfall: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_break_totals_sum() {
        let totals = BreakTotals {
            window: TimeWindow::day(NaiveDate::from_ymd_opt(2026, 1, 15).unwrap()),
            meal_hours: 0.5,
            rest_hours: 1.0 / 6.0,
            includes_open_punch: false,
        };
        assert!((totals.total_hours() - (0.5 + 1.0 / 6.0)).abs() < 1e-12);
    }

    #[test]
    fn test_pay_report_serializes_money_as_strings() {
        let report = PayPeriodReport {
            employee_id: "emp_001".to_string(),
            employee_name: "Dana Whitfield".to_string(),
            week_start: NaiveDate::from_ymd_opt(2026, 1, 11).unwrap(),
            total_hours: 45.0,
            regular_hours: 40.0,
            overtime_hours: 5.0,
            hourly_rate: Decimal::new(2000, 2),
            regular_pay: Decimal::new(80000, 2),
            overtime_pay: Decimal::new(15000, 2),
            gross_pay: Decimal::new(95000, 2),
        };

        let value = serde_json::to_value(&report).unwrap();
        assert_eq!(value["gross_pay"], "950.00");
        assert_eq!(value["week_start"], "2026-01-11");
        assert_eq!(value["overtime_hours"], 5.0);
    }
}
