//! Error types for the Time Accounting Engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for all error conditions that can occur while recording punches,
//! aggregating hours, and producing payroll output.

use chrono::{NaiveDate, NaiveDateTime};
use thiserror::Error;

use crate::models::PunchStatus;
use crate::store::StoreError;

/// The main error type for the Time Accounting Engine.
///
/// All engine operations return this error type, making it easy
/// to handle errors consistently throughout the application.
///
/// # Example
///
/// ```
/// use timeclock_engine::error::EngineError;
///
/// let error = EngineError::NoOpenPunch {
///     employee_id: "emp_001".to_string(),
/// };
/// assert_eq!(error.to_string(), "Employee 'emp_001' has no open punch");
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// The requested transition is not legal from the employee's current state.
    #[error("Cannot {action}: employee '{employee_id}' is {from}")]
    InvalidTransition {
        /// The employee the transition was requested for.
        employee_id: String,
        /// The derived state at the time of the request.
        from: PunchStatus,
        /// A short description of the attempted transition (e.g. "clock in").
        action: String,
    },

    /// A clock-out was requested but nothing is open.
    #[error("Employee '{employee_id}' has no open punch")]
    NoOpenPunch {
        /// The employee the clock-out was requested for.
        employee_id: String,
    },

    /// The transition instant precedes the start of the punch it would close.
    #[error("Employee '{employee_id}': {now} is before the open punch started at {open_since}")]
    InvalidTimestamp {
        /// The employee the transition was requested for.
        employee_id: String,
        /// The instant supplied with the transition.
        now: NaiveDateTime,
        /// Start of the open punch.
        open_since: NaiveDateTime,
    },

    /// The punch store failed; propagated unchanged.
    #[error("Punch store unavailable: {0}")]
    StoreUnavailable(#[from] StoreError),

    /// The second write of a transition failed and the first was undone.
    #[error("Transition for employee '{employee_id}' rolled back: {source}")]
    TransitionRolledBack {
        /// The employee the transition was requested for.
        employee_id: String,
        /// The store failure that aborted the transition.
        source: StoreError,
    },

    /// The second write of a transition failed and undoing the first failed too.
    #[error(
        "Transition for employee '{employee_id}' left punches inconsistent: {source}; rollback failed: {rollback}"
    )]
    TransitionInconsistent {
        /// The employee the transition was requested for.
        employee_id: String,
        /// The store failure that aborted the transition.
        source: StoreError,
        /// The store failure raised while rolling back.
        rollback: StoreError,
    },

    /// The employee is not part of the supplied roster.
    #[error("Employee not found: {employee_id}")]
    EmployeeNotFound {
        /// The unknown employee id.
        employee_id: String,
    },

    /// A date range whose end precedes its start.
    #[error("Invalid date range: {start} to {end}")]
    InvalidDateRange {
        /// The start of the range.
        start: NaiveDate,
        /// The end of the range.
        end: NaiveDate,
    },

    /// An export document could not be written.
    #[error("Export failed: {message}")]
    ExportError {
        /// A description of the serialization failure.
        message: String,
    },

    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// Configuration parsed but holds values the engine cannot use.
    #[error("Invalid configuration field '{field}': {message}")]
    InvalidConfig {
        /// The offending field.
        field: String,
        /// A description of what made the field invalid.
        message: String,
    },

    /// A general calculation error occurred.
    #[error("Calculation error: {message}")]
    CalculationError {
        /// A description of the calculation error.
        message: String,
    },
}

impl EngineError {
    /// Returns the commit outcome when the error came from a transition commit.
    pub fn commit_outcome(&self) -> Option<crate::models::CommitOutcome> {
        use crate::models::CommitOutcome;
        match self {
            EngineError::TransitionRolledBack { .. } => Some(CommitOutcome::RolledBack),
            EngineError::TransitionInconsistent { .. } => Some(CommitOutcome::Inconsistent),
            _ => None,
        }
    }
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;
