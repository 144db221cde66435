//! HTTP request handlers for the Time Accounting Engine API.
//!
//! This module contains the handler functions for all API endpoints.

use std::time::Instant;

use axum::{
    Json, Router,
    body::Bytes,
    extract::{
        Path, Query, State,
        rejection::{JsonRejection, QueryRejection},
    },
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use serde::Serialize;
use tracing::{info, warn};
use uuid::Uuid;

use crate::error::EngineResult;
use crate::export::ExportFormat;
use crate::models::{TimeWindow, Transition};

use super::request::{
    DayQuery, ExportQuery, PayrollQuery, ProgressQuery, PunchRequest, StartBreakRequest, local_now,
};
use super::response::{ApiError, ApiErrorResponse, HoursResponse};
use super::state::AppState;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/employees/:id/clock-in", post(clock_in_handler))
        .route("/employees/:id/breaks", post(start_break_handler))
        .route("/employees/:id/breaks/end", post(end_break_handler))
        .route("/employees/:id/clock-out", post(clock_out_handler))
        .route("/employees/:id/status", get(status_handler))
        .route("/employees/:id/hours", get(hours_handler))
        .route("/employees/:id/progress", get(progress_handler))
        .route(
            "/employees/:id/break-compliance",
            get(break_compliance_handler),
        )
        .route("/reports/payroll", get(payroll_handler))
        .route("/exports/:format", get(export_handler))
        .with_state(state)
}

/// Converts an engine result into a JSON response, logging the outcome.
fn respond<T: Serialize>(correlation_id: Uuid, operation: &str, result: EngineResult<T>) -> Response {
    match result {
        Ok(body) => (
            StatusCode::OK,
            [(header::CONTENT_TYPE, "application/json")],
            Json(body),
        )
            .into_response(),
        Err(err) => {
            warn!(
                correlation_id = %correlation_id,
                operation,
                error = %err,
                "Request failed"
            );
            ApiErrorResponse::from(err).into_response()
        }
    }
}

fn json_rejection(correlation_id: Uuid, rejection: JsonRejection) -> Response {
    let error = match rejection {
        JsonRejection::JsonDataError(err) => {
            let body_text = err.body_text();
            warn!(correlation_id = %correlation_id, error = %body_text, "JSON data error");
            ApiError::new("VALIDATION_ERROR", body_text)
        }
        JsonRejection::JsonSyntaxError(err) => {
            warn!(correlation_id = %correlation_id, error = %err, "JSON syntax error");
            ApiError::malformed_json(format!("Invalid JSON syntax: {}", err))
        }
        JsonRejection::MissingJsonContentType(_) => {
            ApiError::new("MISSING_CONTENT_TYPE", "Content-Type must be application/json")
        }
        _ => ApiError::malformed_json("Failed to parse request body"),
    };
    ApiErrorResponse::bad_request(error).into_response()
}

fn query_rejection(correlation_id: Uuid, rejection: QueryRejection) -> Response {
    let message = rejection.body_text();
    warn!(correlation_id = %correlation_id, error = %message, "Invalid query string");
    ApiErrorResponse::bad_request(ApiError::invalid_query(message)).into_response()
}

/// Parses an optional JSON body; an empty body means "no fields set".
fn parse_optional_body(correlation_id: Uuid, body: &Bytes) -> Result<PunchRequest, Response> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(PunchRequest::default());
    }
    serde_json::from_slice(body).map_err(|err| {
        warn!(correlation_id = %correlation_id, error = %err, "Invalid request body");
        ApiErrorResponse::bad_request(ApiError::malformed_json(err.to_string())).into_response()
    })
}

fn run_transition(
    correlation_id: Uuid,
    state: &AppState,
    employee_id: &str,
    transition: Transition,
    request: PunchRequest,
) -> Response {
    info!(
        correlation_id = %correlation_id,
        employee_id,
        transition = %transition,
        "Processing transition request"
    );

    let started = Instant::now();
    let result = state
        .employee(employee_id)
        .and_then(|_| state.clock().apply(employee_id, transition, request.instant()));

    if let Ok(report) = &result {
        info!(
            correlation_id = %correlation_id,
            employee_id,
            status = %report.current,
            duration_us = started.elapsed().as_micros(),
            "Transition request completed"
        );
    }
    respond(correlation_id, "transition", result)
}

/// Applies a transition whose request body is optional, logging every step
/// under `correlation_id`.
fn punch_transition(
    correlation_id: Uuid,
    state: &AppState,
    employee_id: &str,
    transition: Transition,
    body: &Bytes,
) -> Response {
    match parse_optional_body(correlation_id, body) {
        Ok(request) => run_transition(correlation_id, state, employee_id, transition, request),
        Err(response) => response,
    }
}

/// Handler for `POST /employees/:id/clock-in`.
async fn clock_in_handler(
    State(state): State<AppState>,
    Path(employee_id): Path<String>,
    body: Bytes,
) -> Response {
    punch_transition(
        Uuid::new_v4(),
        &state,
        &employee_id,
        Transition::ClockIn,
        &body,
    )
}

/// Handler for `POST /employees/:id/breaks`.
///
/// Requires a JSON body naming the break kind.
async fn start_break_handler(
    State(state): State<AppState>,
    Path(employee_id): Path<String>,
    payload: Result<Json<StartBreakRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    match payload {
        Ok(Json(request)) => run_transition(
            correlation_id,
            &state,
            &employee_id,
            Transition::StartBreak { kind: request.kind },
            PunchRequest { at: request.at },
        ),
        Err(rejection) => json_rejection(correlation_id, rejection),
    }
}

/// Handler for `POST /employees/:id/breaks/end`.
async fn end_break_handler(
    State(state): State<AppState>,
    Path(employee_id): Path<String>,
    body: Bytes,
) -> Response {
    punch_transition(
        Uuid::new_v4(),
        &state,
        &employee_id,
        Transition::EndBreak,
        &body,
    )
}

/// Handler for `POST /employees/:id/clock-out`.
async fn clock_out_handler(
    State(state): State<AppState>,
    Path(employee_id): Path<String>,
    body: Bytes,
) -> Response {
    punch_transition(
        Uuid::new_v4(),
        &state,
        &employee_id,
        Transition::ClockOut,
        &body,
    )
}

/// Handler for `GET /employees/:id/status`.
async fn status_handler(
    State(state): State<AppState>,
    Path(employee_id): Path<String>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, employee_id = %employee_id, "Status request");

    let result = state
        .employee(&employee_id)
        .and_then(|_| state.clock().status(&employee_id));
    respond(correlation_id, "status", result)
}

/// Handler for `GET /employees/:id/hours`.
///
/// Returns the day's work totals, the containing week's work totals and the
/// day's break totals.
async fn hours_handler(
    State(state): State<AppState>,
    Path(employee_id): Path<String>,
    query: Result<Query<DayQuery>, QueryRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    let Query(query) = match query {
        Ok(query) => query,
        Err(rejection) => return query_rejection(correlation_id, rejection),
    };
    info!(correlation_id = %correlation_id, employee_id = %employee_id, "Hours request");

    let now = query.now.unwrap_or_else(local_now);
    let date = query.date.unwrap_or(now.date());
    let clock = state.clock();

    let result = state.employee(&employee_id).and_then(|_| {
        Ok(HoursResponse {
            day: clock.day_totals(&employee_id, date, now)?,
            week: clock.week_totals(&employee_id, date, now)?,
            breaks: clock.break_hours(&employee_id, TimeWindow::day(date), now)?,
        })
    });
    respond(correlation_id, "hours", result)
}

/// Handler for `GET /employees/:id/progress`.
async fn progress_handler(
    State(state): State<AppState>,
    Path(employee_id): Path<String>,
    query: Result<Query<ProgressQuery>, QueryRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    let Query(query) = match query {
        Ok(query) => query,
        Err(rejection) => return query_rejection(correlation_id, rejection),
    };
    info!(correlation_id = %correlation_id, employee_id = %employee_id, "Progress request");

    let now = query.now.unwrap_or_else(local_now);
    let result = state
        .employee(&employee_id)
        .and_then(|_| state.clock().schedule_progress(&employee_id, now));
    respond(correlation_id, "progress", result)
}

/// Handler for `GET /employees/:id/break-compliance`.
async fn break_compliance_handler(
    State(state): State<AppState>,
    Path(employee_id): Path<String>,
    query: Result<Query<DayQuery>, QueryRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    let Query(query) = match query {
        Ok(query) => query,
        Err(rejection) => return query_rejection(correlation_id, rejection),
    };
    info!(
        correlation_id = %correlation_id,
        employee_id = %employee_id,
        "Break compliance request"
    );

    let now = query.now.unwrap_or_else(local_now);
    let date = query.date.unwrap_or(now.date());
    let result = state
        .employee(&employee_id)
        .and_then(|_| state.clock().break_compliance(&employee_id, date, now));
    respond(correlation_id, "break_compliance", result)
}

/// Handler for `GET /reports/payroll`.
async fn payroll_handler(
    State(state): State<AppState>,
    query: Result<Query<PayrollQuery>, QueryRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    let Query(query) = match query {
        Ok(query) => query,
        Err(rejection) => return query_rejection(correlation_id, rejection),
    };

    let now = query.now.unwrap_or_else(local_now);
    let week_of = query.week_of.unwrap_or(now.date());
    info!(correlation_id = %correlation_id, week_of = %week_of, "Payroll report request");

    let result = state
        .clock()
        .weekly_payroll(state.config().employees(), week_of, now);
    respond(correlation_id, "payroll", result)
}

/// Handler for `GET /exports/:format`.
///
/// Serves the document as an attachment with its suggested filename.
async fn export_handler(
    State(state): State<AppState>,
    Path(format): Path<String>,
    query: Result<Query<ExportQuery>, QueryRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    let Query(query) = match query {
        Ok(query) => query,
        Err(rejection) => return query_rejection(correlation_id, rejection),
    };
    info!(
        correlation_id = %correlation_id,
        format = %format,
        start = %query.start,
        end = %query.end,
        "Export request"
    );

    let result = format.parse::<ExportFormat>().and_then(|format| {
        state
            .clock()
            .export(format, state.config().employees(), query.start, query.end)
    });

    match result {
        Ok(document) => {
            let disposition = format!("attachment; filename=\"{}\"", document.filename);
            (
                StatusCode::OK,
                [
                    (header::CONTENT_TYPE, document.content_type),
                    (header::CONTENT_DISPOSITION, disposition),
                ],
                document.content,
            )
                .into_response()
        }
        Err(err) => {
            warn!(correlation_id = %correlation_id, error = %err, "Export failed");
            ApiErrorResponse::from(err).into_response()
        }
    }
}
