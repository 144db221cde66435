//! Export serializers for downstream payroll systems.
//!
//! Two formats are supported:
//! - **Detailed CSV**: one row per closed punch, work and breaks alike
//! - **Payroll batch**: QuickBooks IIF timer activities, daily work hours per
//!   employee
//!
//! Both serializers are pure and deterministic: identical inputs always
//! produce byte-identical output.

mod csv_export;
mod iif_export;

use std::fmt;
use std::str::FromStr;

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};
use crate::models::{Employee, Punch};

pub use csv_export::{CSV_HEADER, export_detailed_csv};
pub use iif_export::{IIF_NOTE, export_payroll_batch};

/// Supported export formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExportFormat {
    /// Every closed punch as a CSV row.
    DetailedCsv,
    /// Daily work totals as a QuickBooks IIF batch.
    PayrollBatch,
}

impl ExportFormat {
    /// File extension, without the dot.
    pub fn extension(self) -> &'static str {
        match self {
            ExportFormat::DetailedCsv => "csv",
            ExportFormat::PayrollBatch => "iif",
        }
    }

    /// MIME type served with the document.
    pub fn content_type(self) -> &'static str {
        match self {
            ExportFormat::DetailedCsv => "text/csv; charset=utf-8",
            ExportFormat::PayrollBatch => "text/plain; charset=utf-8",
        }
    }

    /// Suggested download name for the range.
    ///
    /// ```
    /// use timeclock_engine::export::ExportFormat;
    /// use chrono::NaiveDate;
    ///
    /// let start = NaiveDate::from_ymd_opt(2026, 1, 11).unwrap();
    /// let end = NaiveDate::from_ymd_opt(2026, 1, 17).unwrap();
    /// assert_eq!(
    ///     ExportFormat::PayrollBatch.filename(start, end),
    ///     "quickbooks_time_2026-01-11_to_2026-01-17.iif"
    /// );
    /// ```
    pub fn filename(self, start: NaiveDate, end: NaiveDate) -> String {
        let prefix = match self {
            ExportFormat::DetailedCsv => "timeclock_export",
            ExportFormat::PayrollBatch => "quickbooks_time",
        };
        format!("{}_{}_to_{}.{}", prefix, start, end, self.extension())
    }

    /// Serializes `punches` in this format and wraps the result in a document.
    pub fn render(
        self,
        punches: &[Punch],
        employees: &[Employee],
        start: NaiveDate,
        end: NaiveDate,
    ) -> EngineResult<ExportDocument> {
        let content = match self {
            ExportFormat::DetailedCsv => export_detailed_csv(punches, employees, start, end)?,
            ExportFormat::PayrollBatch => export_payroll_batch(punches, employees, start, end),
        };

        Ok(ExportDocument {
            filename: self.filename(start, end),
            content_type: self.content_type().to_string(),
            content,
        })
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

impl FromStr for ExportFormat {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "csv" | "detailed_csv" => Ok(ExportFormat::DetailedCsv),
            "iif" | "payroll_batch" => Ok(ExportFormat::PayrollBatch),
            other => Err(EngineError::ExportError {
                message: format!("Unknown export format '{}'", other),
            }),
        }
    }
}

/// A rendered export, ready to be written or served.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportDocument {
    /// Suggested file name.
    pub filename: String,
    /// MIME type of `content`.
    pub content_type: String,
    /// The document body.
    pub content: String,
}

/// Returns true if `start_time` falls on a date within `[start, end]`.
///
/// Both bounds are inclusive calendar dates, so the range ends at the last
/// instant of `end`.
pub(crate) fn in_date_range(start_time: NaiveDateTime, start: NaiveDate, end: NaiveDate) -> bool {
    start_time >= start.and_time(NaiveTime::MIN) && start_time.date() <= end
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn make_datetime(s: &str) -> NaiveDateTime {
        NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S").unwrap()
    }

    #[test]
    fn test_filenames() {
        let start = make_date("2026-01-01");
        let end = make_date("2026-01-31");
        assert_eq!(
            ExportFormat::DetailedCsv.filename(start, end),
            "timeclock_export_2026-01-01_to_2026-01-31.csv"
        );
        assert_eq!(
            ExportFormat::PayrollBatch.filename(start, end),
            "quickbooks_time_2026-01-01_to_2026-01-31.iif"
        );
    }

    #[test]
    fn test_format_from_str() {
        assert_eq!("csv".parse::<ExportFormat>().unwrap(), ExportFormat::DetailedCsv);
        assert_eq!("IIF".parse::<ExportFormat>().unwrap(), ExportFormat::PayrollBatch);
        assert_eq!(
            "payroll_batch".parse::<ExportFormat>().unwrap(),
            ExportFormat::PayrollBatch
        );
        assert!(matches!(
            "xlsx".parse::<ExportFormat>(),
            Err(EngineError::ExportError { .. })
        ));
    }

    #[test]
    fn test_in_date_range_is_inclusive() {
        let start = make_date("2026-01-12");
        let end = make_date("2026-01-14");
        assert!(in_date_range(make_datetime("2026-01-12 00:00:00"), start, end));
        assert!(in_date_range(make_datetime("2026-01-14 23:59:59"), start, end));
        assert!(!in_date_range(make_datetime("2026-01-11 23:59:59"), start, end));
        assert!(!in_date_range(make_datetime("2026-01-15 00:00:00"), start, end));
    }

    #[test]
    fn test_render_wraps_content() {
        let start = make_date("2026-01-12");
        let document = ExportFormat::PayrollBatch
            .render(&[], &[], start, start)
            .unwrap();
        assert_eq!(document.content_type, "text/plain; charset=utf-8");
        assert!(document.content.starts_with("!TIMERHDR"));
    }
}
