//! Core data models for the Time Accounting Engine.
//!
//! This module contains all the domain models used throughout the engine.

mod employee;
mod punch;
mod report;
mod status;
mod window;

pub use employee::Employee;
pub use punch::{BreakKind, NewPunch, Punch, PunchKind, hours_between};
pub use report::{
    BreakComplianceReport, BreakTotals, PayPeriodReport, ProgressReport, WorkTotals,
};
pub use status::{
    CommitOutcome, ConsistencyWarning, PunchStatus, StatusSnapshot, Transition, TransitionReport,
};
pub use window::{TimeWindow, week_start};
