//! QuickBooks IIF payroll batch export.
//!
//! The batch is a tab-separated file of timer activities: one `TIMEACT`
//! record per employee per calendar day carrying the day's work hours.
//! Breaks are unpaid and never exported here.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use tracing::debug;

use crate::models::{Employee, Punch, PunchKind};

use super::in_date_range;

/// Note attached to every activity record.
pub const IIF_NOTE: &str = "Imported from TimeClock";

const IIF_HEADER: &str = "!TIMERHDR\tVER\tREL\tCOMPANYNAME\tIMPORTEDBEFORE\n\
!TIMERHDR\t8\t0\t\tN\n\
!TIMEACT\tDATE\tJOB\tEMP\tITEM\tPITEM\tDURATION\tNOTE\n";

const DATE_FORMAT: &str = "%m/%d/%Y";

/// Writes closed work punches started within `[start, end]` as an IIF batch.
///
/// Punches are grouped by employee and the local date of their start; each
/// group becomes one record with hours summed to two decimals. Records are
/// ordered by date, employee name and employee id. Punches of employees not
/// in `employees` are skipped.
///
/// # Example
///
/// ```
/// use timeclock_engine::export::export_payroll_batch;
/// use timeclock_engine::models::{Employee, Punch, PunchKind};
/// use chrono::{NaiveDate, NaiveDateTime};
/// use rust_decimal::Decimal;
/// use uuid::Uuid;
///
/// let at = |s: &str| NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S").unwrap();
/// let employee = Employee {
///     id: "emp_001".to_string(),
///     name: "Dana Whitfield".to_string(),
///     employee_number: 1001,
///     hourly_rate: Decimal::new(2000, 2),
///     active: true,
/// };
/// let punch = Punch {
///     id: Uuid::new_v4(),
///     employee_id: "emp_001".to_string(),
///     start_time: at("2026-01-15 07:00:00"),
///     end_time: Some(at("2026-01-15 15:30:00")),
///     kind: PunchKind::Work,
/// };
/// let day = NaiveDate::from_ymd_opt(2026, 1, 15).unwrap();
///
/// let iif = export_payroll_batch(&[punch], &[employee], day, day);
/// assert_eq!(
///     iif.lines().last(),
///     Some("TIMEACT\t01/15/2026\t\tDana Whitfield\t\t\t8.50\tImported from TimeClock")
/// );
/// ```
pub fn export_payroll_batch(
    punches: &[Punch],
    employees: &[Employee],
    start: NaiveDate,
    end: NaiveDate,
) -> String {
    // (date, name, id) orders the output.
    let mut groups: BTreeMap<(NaiveDate, &str, &str), f64> = BTreeMap::new();

    for punch in punches {
        if punch.kind != PunchKind::Work || !in_date_range(punch.start_time, start, end) {
            continue;
        }
        let Some(hours) = punch.duration_hours() else {
            continue;
        };
        let Some(employee) = Employee::find(employees, &punch.employee_id) else {
            debug!(
                punch_id = %punch.id,
                employee_id = %punch.employee_id,
                "Skipping punch of unknown employee"
            );
            continue;
        };

        *groups
            .entry((punch.start_time.date(), employee.name.as_str(), employee.id.as_str()))
            .or_insert(0.0) += hours;
    }

    let mut content = String::from(IIF_HEADER);
    for ((date, name, _), hours) in groups {
        content.push_str(&format!(
            "TIMEACT\t{}\t\t{}\t\t\t{:.2}\t{}\n",
            date.format(DATE_FORMAT),
            iif_field(name),
            hours,
            IIF_NOTE
        ));
    }
    content
}

/// Replaces tabs, line breaks and other control characters with spaces so a
/// value stays inside its field and record.
fn iif_field(value: &str) -> String {
    value
        .chars()
        .map(|c| if c.is_control() { ' ' } else { c })
        .collect()
}
