//! Request types for the Time Accounting Engine API.

use chrono::{Local, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::models::BreakKind;

/// Current local wall-clock time, the default instant for every request.
pub fn local_now() -> NaiveDateTime {
    Local::now().naive_local()
}

/// Body of the clock-in, end-break and clock-out endpoints.
///
/// The body is optional; an empty body means "now".
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PunchRequest {
    /// Instant of the transition; defaults to local now.
    #[serde(default)]
    pub at: Option<NaiveDateTime>,
}

impl PunchRequest {
    /// The requested instant, or local now.
    pub fn instant(&self) -> NaiveDateTime {
        self.at.unwrap_or_else(local_now)
    }
}

/// Body of `POST /employees/:id/breaks`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StartBreakRequest {
    /// The break to start (`meal` or `rest`).
    pub kind: BreakKind,
    /// Instant of the transition; defaults to local now.
    #[serde(default)]
    pub at: Option<NaiveDateTime>,
}

/// Query of the hours and break-compliance endpoints.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DayQuery {
    /// The day to report on; defaults to today.
    #[serde(default)]
    pub date: Option<NaiveDate>,
    /// The instant open punches run to; defaults to local now.
    #[serde(default)]
    pub now: Option<NaiveDateTime>,
}

/// Query of the progress endpoint.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProgressQuery {
    /// The instant to estimate at; defaults to local now.
    #[serde(default)]
    pub now: Option<NaiveDateTime>,
}

/// Query of `GET /reports/payroll`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PayrollQuery {
    /// Any date in the pay week; defaults to today.
    #[serde(default)]
    pub week_of: Option<NaiveDate>,
    /// The instant open punches run to; defaults to local now.
    #[serde(default)]
    pub now: Option<NaiveDateTime>,
}

/// Query of `GET /exports/:format`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportQuery {
    /// First date of the range, inclusive.
    pub start: NaiveDate,
    /// Last date of the range, inclusive.
    pub end: NaiveDate,
}
