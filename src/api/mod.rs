//! HTTP API module for the Time Accounting Engine.
//!
//! This module exposes the engine's operations as JSON endpoints so any
//! display layer can drive it. It performs no authentication.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::{
    DayQuery, ExportQuery, PayrollQuery, ProgressQuery, PunchRequest, StartBreakRequest,
};
pub use response::{ApiError, ApiErrorResponse, HoursResponse};
pub use state::AppState;
