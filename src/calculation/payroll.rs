//! Weekly payroll calculation.
//!
//! ## Rate Structure
//!
//! Pay is computed per Sunday-start week with a single weekly threshold:
//! - Hours up to the threshold (default 40) are paid at the hourly rate
//! - Hours beyond it are paid at the hourly rate times the multiplier (default 1.5)
//!
//! There is no daily overtime.

use chrono::NaiveDate;
use rust_decimal::prelude::FromPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};

use crate::config::PayrollConfig;
use crate::error::{EngineError, EngineResult};
use crate::models::{Employee, PayPeriodReport};

/// Splits weekly work hours into `(regular, overtime)` at `threshold`.
///
/// ```
/// use timeclock_engine::calculation::split_overtime;
///
/// assert_eq!(split_overtime(45.0, 40.0), (40.0, 5.0));
/// assert_eq!(split_overtime(32.5, 40.0), (32.5, 0.0));
/// ```
pub fn split_overtime(total_hours: f64, threshold: f64) -> (f64, f64) {
    let regular = total_hours.min(threshold);
    let overtime = (total_hours - threshold).max(0.0);
    (regular, overtime)
}

/// Rounds a money amount to cents, midpoints away from zero.
///
/// The result always carries exactly two decimal places, so whole amounts
/// serialize as `"0.00"` rather than `"0"`.
///
/// ```
/// use timeclock_engine::calculation::round_to_cents;
/// use rust_decimal::Decimal;
///
/// assert_eq!(round_to_cents(Decimal::ZERO).to_string(), "0.00");
/// assert_eq!(round_to_cents(Decimal::new(10125, 3)).to_string(), "10.13");
/// ```
pub fn round_to_cents(amount: Decimal) -> Decimal {
    let mut cents = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    cents.rescale(2);
    cents
}

fn hours_to_decimal(hours: f64) -> EngineResult<Decimal> {
    Decimal::from_f64(hours).ok_or_else(|| EngineError::CalculationError {
        message: format!("Cannot represent {} hours as a decimal", hours),
    })
}

/// Calculates one employee's pay for a week of work hours.
///
/// # Arguments
///
/// * `employee` - The employee being paid (supplies the hourly rate)
/// * `week_start` - The Sunday starting the pay week, copied into the report
/// * `total_hours` - Work hours in the week, at full precision
/// * `config` - Overtime threshold and multiplier
///
/// # Errors
///
/// Returns `CalculationError` when `total_hours` is negative or not finite.
///
/// # Example
///
/// ```
/// use timeclock_engine::calculation::calculate_weekly_pay;
/// use timeclock_engine::config::PayrollConfig;
/// use timeclock_engine::models::Employee;
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
///
/// let employee = Employee {
///     id: "emp_001".to_string(),
///     name: "Dana Whitfield".to_string(),
///     employee_number: 1001,
///     hourly_rate: Decimal::new(2000, 2),
///     active: true,
/// };
/// let week = NaiveDate::from_ymd_opt(2026, 1, 11).unwrap();
///
/// let report = calculate_weekly_pay(&employee, week, 45.0, &PayrollConfig::default()).unwrap();
/// assert_eq!(report.regular_hours, 40.0);
/// assert_eq!(report.overtime_hours, 5.0);
/// assert_eq!(report.gross_pay, Decimal::new(95000, 2));
/// ```
pub fn calculate_weekly_pay(
    employee: &Employee,
    week_start: NaiveDate,
    total_hours: f64,
    config: &PayrollConfig,
) -> EngineResult<PayPeriodReport> {
    if !total_hours.is_finite() || total_hours < 0.0 {
        return Err(EngineError::CalculationError {
            message: format!(
                "Invalid weekly hours {} for employee '{}'",
                total_hours, employee.id
            ),
        });
    }

    let (regular_hours, overtime_hours) =
        split_overtime(total_hours, config.overtime_threshold_hours);

    let rate = employee.hourly_rate;
    let regular_pay = round_to_cents(hours_to_decimal(regular_hours)? * rate);
    let overtime_pay = round_to_cents(
        hours_to_decimal(overtime_hours)? * rate * config.overtime_multiplier,
    );

    Ok(PayPeriodReport {
        employee_id: employee.id.clone(),
        employee_name: employee.name.clone(),
        week_start,
        total_hours,
        regular_hours,
        overtime_hours,
        hourly_rate: rate,
        regular_pay,
        overtime_pay,
        gross_pay: regular_pay + overtime_pay,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn make_employee(rate: &str) -> Employee {
        Employee {
            id: "emp_001".to_string(),
            name: "Dana Whitfield".to_string(),
            employee_number: 1001,
            hourly_rate: Decimal::from_str(rate).unwrap(),
            active: true,
        }
    }

    fn week() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 1, 11).unwrap()
    }

    /// PAY-001: 45 hours at $20.00
    #[test]
    fn test_overtime_week() {
        let report =
            calculate_weekly_pay(&make_employee("20.00"), week(), 45.0, &PayrollConfig::default())
                .unwrap();

        assert_eq!(report.regular_hours, 40.0);
        assert_eq!(report.overtime_hours, 5.0);
        assert_eq!(report.regular_pay, Decimal::from_str("800.00").unwrap());
        assert_eq!(report.overtime_pay, Decimal::from_str("150.00").unwrap());
        assert_eq!(report.gross_pay, Decimal::from_str("950.00").unwrap());
        assert_eq!(report.week_start, week());
    }

    /// PAY-002: under the threshold there is no overtime
    #[test]
    fn test_no_overtime_under_threshold() {
        let report =
            calculate_weekly_pay(&make_employee("18.50"), week(), 32.0, &PayrollConfig::default())
                .unwrap();

        assert_eq!(report.regular_hours, 32.0);
        assert_eq!(report.overtime_hours, 0.0);
        assert_eq!(report.overtime_pay, Decimal::ZERO);
        assert_eq!(report.gross_pay, Decimal::from_str("592.00").unwrap());
    }

    /// PAY-003: exactly at the threshold
    #[test]
    fn test_exactly_threshold() {
        let report =
            calculate_weekly_pay(&make_employee("20.00"), week(), 40.0, &PayrollConfig::default())
                .unwrap();
        assert_eq!(report.overtime_hours, 0.0);
        assert_eq!(report.gross_pay, Decimal::from_str("800.00").unwrap());
    }

    #[test]
    fn test_zero_hours() {
        let report =
            calculate_weekly_pay(&make_employee("20.00"), week(), 0.0, &PayrollConfig::default())
                .unwrap();
        assert_eq!(report.gross_pay, Decimal::ZERO);
        for amount in [report.regular_pay, report.overtime_pay, report.gross_pay] {
            assert_eq!(amount.scale(), 2);
            assert_eq!(amount.to_string(), "0.00");
        }
        assert_eq!(
            serde_json::to_value(&report).unwrap()["gross_pay"],
            serde_json::json!("0.00")
        );
    }

    #[test]
    fn test_whole_amounts_keep_two_decimals() {
        // A rate without cents still yields two-decimal pay
        let report =
            calculate_weekly_pay(&make_employee("20"), week(), 45.0, &PayrollConfig::default())
                .unwrap();

        assert_eq!(report.regular_pay.to_string(), "800.00");
        assert_eq!(report.overtime_pay.to_string(), "150.00");
        assert_eq!(report.gross_pay.to_string(), "950.00");
    }

    #[test]
    fn test_fractional_hours_round_to_cents() {
        // 7h20m at $18.50 = 135.6666... -> 135.67
        let report = calculate_weekly_pay(
            &make_employee("18.50"),
            week(),
            7.0 + 1.0 / 3.0,
            &PayrollConfig::default(),
        )
        .unwrap();
        assert_eq!(report.regular_pay, Decimal::from_str("135.67").unwrap());
    }

    #[test]
    fn test_midpoint_rounds_away_from_zero() {
        assert_eq!(
            round_to_cents(Decimal::from_str("10.125").unwrap()),
            Decimal::from_str("10.13").unwrap()
        );
        assert_eq!(
            round_to_cents(Decimal::from_str("10.135").unwrap()),
            Decimal::from_str("10.14").unwrap()
        );
    }

    #[test]
    fn test_configured_threshold_and_multiplier() {
        let config = PayrollConfig {
            overtime_threshold_hours: 38.0,
            overtime_multiplier: Decimal::from_str("2.0").unwrap(),
        };
        let report = calculate_weekly_pay(&make_employee("10.00"), week(), 40.0, &config).unwrap();

        assert_eq!(report.regular_hours, 38.0);
        assert_eq!(report.overtime_hours, 2.0);
        assert_eq!(report.gross_pay, Decimal::from_str("420.00").unwrap());
    }

    #[test]
    fn test_negative_hours_rejected() {
        let result =
            calculate_weekly_pay(&make_employee("20.00"), week(), -1.0, &PayrollConfig::default());
        assert!(matches!(result, Err(EngineError::CalculationError { .. })));
    }

    #[test]
    fn test_nan_hours_rejected() {
        let result = calculate_weekly_pay(
            &make_employee("20.00"),
            week(),
            f64::NAN,
            &PayrollConfig::default(),
        );
        assert!(result.is_err());
    }
}
