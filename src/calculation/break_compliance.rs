//! Break compliance summary.
//!
//! Reports breaks taken on a day against the configured entitlement. Nothing
//! here is enforced; the report exists for managers and payroll review.
//!
//! ## Entitlement
//!
//! - One meal break of `meal_break_minutes` once work strictly exceeds
//!   `meal_required_after_hours`
//! - One rest break of `rest_break_minutes` per `rest_block_hours` worked, or
//!   major fraction thereof

use chrono::NaiveDate;

use crate::config::BreakPolicyConfig;
use crate::models::{BreakComplianceReport, BreakTotals, WorkTotals};

const MILLIS_PER_MINUTE: f64 = 60_000.0;
const MILLIS_PER_HOUR: f64 = 3_600_000.0;

// Punch durations are millisecond-exact; snap back to that grid so a
// ten-minute break reads as exactly 10.0 minutes.
fn to_minutes(hours: f64) -> f64 {
    (hours * MILLIS_PER_HOUR).round() / MILLIS_PER_MINUTE
}

/// Number of rest breaks expected for `work_hours`.
///
/// Every full block counts, and a remainder strictly greater than half a
/// block counts as one more.
///
/// ```
/// use timeclock_engine::calculation::rest_breaks_required;
///
/// assert_eq!(rest_breaks_required(1.5, 4.0), 0);
/// assert_eq!(rest_breaks_required(2.5, 4.0), 1);
/// assert_eq!(rest_breaks_required(8.0, 4.0), 2);
/// assert_eq!(rest_breaks_required(10.0, 4.0), 2);
/// assert_eq!(rest_breaks_required(10.5, 4.0), 3);
/// ```
pub fn rest_breaks_required(work_hours: f64, block_hours: f64) -> u32 {
    if work_hours.is_nan() || work_hours <= 0.0 || block_hours.is_nan() || block_hours <= 0.0 {
        return 0;
    }

    let full_blocks = (work_hours / block_hours).floor();
    let remainder = work_hours - full_blocks * block_hours;
    let major_fraction = if remainder > block_hours / 2.0 { 1.0 } else { 0.0 };

    (full_blocks + major_fraction) as u32
}

/// Minutes of meal break expected for `work_hours`.
pub fn meal_minutes_required(work_hours: f64, policy: &BreakPolicyConfig) -> f64 {
    if work_hours > policy.meal_required_after_hours {
        policy.meal_break_minutes
    } else {
        0.0
    }
}

/// Builds the compliance report for one employee-day.
///
/// `work` and `breaks` must cover the same day window.
pub fn calculate_break_compliance(
    employee_id: &str,
    date: NaiveDate,
    work: &WorkTotals,
    breaks: &BreakTotals,
    policy: &BreakPolicyConfig,
) -> BreakComplianceReport {
    let work_hours = work.work_hours;
    let meal_minutes_taken = to_minutes(breaks.meal_hours);
    let rest_minutes_taken = to_minutes(breaks.rest_hours);

    let meal_required = meal_minutes_required(work_hours, policy);
    let rest_required = f64::from(rest_breaks_required(work_hours, policy.rest_block_hours))
        * policy.rest_break_minutes;

    BreakComplianceReport {
        employee_id: employee_id.to_string(),
        date,
        work_hours,
        meal_minutes_taken,
        rest_minutes_taken,
        meal_minutes_required: meal_required,
        rest_minutes_required: rest_required,
        meal_shortfall: meal_minutes_taken < meal_required,
        rest_shortfall: rest_minutes_taken < rest_required,
    }
}
