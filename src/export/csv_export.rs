//! Detailed CSV export.

use std::collections::HashMap;

use csv::{QuoteStyle, Terminator, WriterBuilder};
use tracing::debug;

use crate::error::{EngineError, EngineResult};
use crate::models::{Employee, Punch};

use super::in_date_range;

/// The header line, written verbatim (unquoted).
pub const CSV_HEADER: &str =
    "Employee Number,Employee Name,Date,Clock In,Clock Out,Type,Duration (Hours)\n";

const DATE_FORMAT: &str = "%-m/%-d/%Y";
const TIME_FORMAT: &str = "%I:%M %p";

/// Wraps a text column in quotes, doubling any quotes inside it.
fn quoted(value: &str) -> String {
    format!("\"{}\"", value.replace('"', "\"\""))
}

fn export_error(e: impl std::fmt::Display) -> EngineError {
    EngineError::ExportError {
        message: e.to_string(),
    }
}

/// Writes one CSV row per closed punch started within `[start, end]`.
///
/// Rows are ordered by start time, employee number and punch id. Open
/// punches are left out, as are punches whose employee is not in
/// `employees`. Name, date, times and type are always quoted, even when they
/// look numeric; employee number and duration never are.
///
/// # Example
///
/// ```
/// use timeclock_engine::export::export_detailed_csv;
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
///     end_time: Some(at("2026-01-15 12:00:00")),
///     kind: PunchKind::Work,
/// };
/// let day = NaiveDate::from_ymd_opt(2026, 1, 15).unwrap();
///
/// let csv = export_detailed_csv(&[punch], &[employee], day, day).unwrap();
/// assert_eq!(
///     csv.lines().nth(1),
///     Some(r#"1001,"Dana Whitfield","1/15/2026","07:00 AM","12:00 PM","Work",5.00"#)
/// );
/// ```
pub fn export_detailed_csv(
    punches: &[Punch],
    employees: &[Employee],
    start: chrono::NaiveDate,
    end: chrono::NaiveDate,
) -> EngineResult<String> {
    let roster: HashMap<&str, &Employee> =
        employees.iter().map(|e| (e.id.as_str(), e)).collect();

    let mut rows: Vec<(&Punch, &Employee)> = Vec::new();
    for punch in punches {
        if punch.is_open() || !in_date_range(punch.start_time, start, end) {
            continue;
        }
        match roster.get(punch.employee_id.as_str()) {
            Some(employee) => rows.push((punch, employee)),
            None => debug!(
                punch_id = %punch.id,
                employee_id = %punch.employee_id,
                "Skipping punch of unknown employee"
            ),
        }
    }
    rows.sort_by(|(a, a_emp), (b, b_emp)| {
        a.start_time
            .cmp(&b.start_time)
            .then(a_emp.employee_number.cmp(&b_emp.employee_number))
            .then(a.id.cmp(&b.id))
    });

    // Columns arrive already quoted, so the writer must not quote again.
    let mut buffer = CSV_HEADER.as_bytes().to_vec();
    {
        let mut writer = WriterBuilder::new()
            .has_headers(false)
            .quote_style(QuoteStyle::Never)
            .terminator(Terminator::Any(b'\n'))
            .from_writer(&mut buffer);

        for (punch, employee) in rows {
            let Some(end_time) = punch.end_time else {
                continue;
            };
            let hours = punch.duration_hours().unwrap_or_default();
            writer
                .write_record([
                    employee.employee_number.to_string(),
                    quoted(&employee.name),
                    quoted(&punch.start_time.format(DATE_FORMAT).to_string()),
                    quoted(&punch.start_time.format(TIME_FORMAT).to_string()),
                    quoted(&end_time.format(TIME_FORMAT).to_string()),
                    quoted(punch.kind.label()),
                    format!("{:.2}", hours),
                ])
                .map_err(export_error)?;
        }
        writer.flush().map_err(export_error)?;
    }

    String::from_utf8(buffer).map_err(export_error)
}
