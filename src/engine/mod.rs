//! The Time Accounting Engine.
//!
//! [`TimeClock`] ties the punch store, the state machine and the calculators
//! together. Transitions run under a per-employee lock: the open punches are
//! read, the transition is planned, and the planned writes are committed
//! with a compensating rollback when the second write fails. Queries take no
//! engine lock.
//!
//! Every operation takes an explicit `now` so results are reproducible.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use timeclock_engine::config::EngineConfig;
//! use timeclock_engine::engine::TimeClock;
//! use timeclock_engine::models::{BreakKind, PunchStatus};
//! use timeclock_engine::store::InMemoryPunchStore;
//! use chrono::NaiveDateTime;
//!
//! let at = |s: &str| NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S").unwrap();
//! let clock = TimeClock::new(Arc::new(InMemoryPunchStore::new()), EngineConfig::default());
//!
//! clock.clock_in("emp_001", at("2026-01-15 07:00:00"))?;
//! clock.start_break("emp_001", BreakKind::Meal, at("2026-01-15 12:00:00"))?;
//! clock.end_break("emp_001", at("2026-01-15 13:00:00"))?;
//! clock.clock_out("emp_001", at("2026-01-15 16:00:00"))?;
//!
//! let day = clock.day_totals("emp_001", at("2026-01-15 00:00:00").date(), at("2026-01-15 18:00:00"))?;
//! assert_eq!(day.work_hours, 8.0);
//! assert_eq!(clock.status("emp_001")?.status, PunchStatus::ClockedOut);
//! # Ok::<(), timeclock_engine::error::EngineError>(())
//! ```

mod locks;
mod state_machine;

use std::sync::Arc;

use chrono::{NaiveDate, NaiveDateTime};
use tracing::{debug, error, info, warn};

use crate::calculation::{
    calculate_break_compliance, calculate_break_hours, calculate_progress, calculate_weekly_pay,
    calculate_work_hours,
};
use crate::config::EngineConfig;
use crate::error::{EngineError, EngineResult};
use crate::export::{ExportDocument, ExportFormat};
use crate::models::{
    BreakComplianceReport, BreakKind, BreakTotals, CommitOutcome, ConsistencyWarning, Employee,
    NewPunch, PayPeriodReport, ProgressReport, Punch, StatusSnapshot, TimeWindow, Transition,
    TransitionReport, WorkTotals,
};
use crate::store::{PunchStore, StoreError};

pub use locks::EmployeeLocks;
pub use state_machine::{TransitionPlan, derive_status, plan_transition};

/// The engine facade shared by every caller.
///
/// `TimeClock` is `Send + Sync`; share it behind an [`Arc`].
pub struct TimeClock {
    store: Arc<dyn PunchStore>,
    config: EngineConfig,
    locks: EmployeeLocks,
}

impl std::fmt::Debug for TimeClock {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TimeClock")
            .field("config", &self.config)
            .field("locks", &self.locks)
            .finish_non_exhaustive()
    }
}

fn log_warnings(warnings: &[ConsistencyWarning]) {
    for warning in warnings {
        warn!(warning = %warning, "Punch consistency warning");
    }
}

impl TimeClock {
    /// Creates an engine over `store` with the given configuration.
    pub fn new(store: Arc<dyn PunchStore>, config: EngineConfig) -> Self {
        Self {
            store,
            config,
            locks: EmployeeLocks::new(),
        }
    }

    /// Returns the engine configuration.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    // ------------------------------------------------------------------
    // State machine
    // ------------------------------------------------------------------

    /// Derives the current status of `employee_id`.
    ///
    /// Fails only when the store does.
    pub fn status(&self, employee_id: &str) -> EngineResult<StatusSnapshot> {
        let open = self.store.open_punches(employee_id)?;
        let snapshot = derive_status(employee_id, open);
        log_warnings(&snapshot.warnings);
        Ok(snapshot)
    }

    /// Opens a work punch at `now`. Legal only while clocked out.
    pub fn clock_in(&self, employee_id: &str, now: NaiveDateTime) -> EngineResult<TransitionReport> {
        self.apply(employee_id, Transition::ClockIn, now)
    }

    /// Closes the open work punch and opens a break of `kind` at `now`.
    pub fn start_break(
        &self,
        employee_id: &str,
        kind: BreakKind,
        now: NaiveDateTime,
    ) -> EngineResult<TransitionReport> {
        self.apply(employee_id, Transition::StartBreak { kind }, now)
    }

    /// Closes the open break and resumes work at `now`.
    pub fn end_break(&self, employee_id: &str, now: NaiveDateTime) -> EngineResult<TransitionReport> {
        self.apply(employee_id, Transition::EndBreak, now)
    }

    /// Closes whatever punch is open at `now`.
    ///
    /// Clocking out from a break closes the break only; no work punch is
    /// synthesized.
    pub fn clock_out(&self, employee_id: &str, now: NaiveDateTime) -> EngineResult<TransitionReport> {
        self.apply(employee_id, Transition::ClockOut, now)
    }

    /// Validates and commits `transition` for `employee_id` at `now`.
    ///
    /// # Errors
    ///
    /// - `InvalidTransition`, `NoOpenPunch`, `InvalidTimestamp` from planning;
    ///   nothing is written
    /// - `StoreUnavailable` when the store fails before anything was written
    /// - `TransitionRolledBack` when the open failed after a close and the
    ///   close was undone
    /// - `TransitionInconsistent` when undoing the close failed as well
    pub fn apply(
        &self,
        employee_id: &str,
        transition: Transition,
        now: NaiveDateTime,
    ) -> EngineResult<TransitionReport> {
        self.locks.with_lock(employee_id, || {
            let snapshot = self.status(employee_id)?;

            let plan = plan_transition(&snapshot, transition, now, &self.config.breaks)
                .inspect_err(|e| {
                    warn!(employee_id, transition = %transition, error = %e, "Transition rejected");
                })?;

            let report = self.commit(plan, snapshot.warnings)?;
            info!(
                employee_id,
                transition = %transition,
                from = %report.previous,
                to = %report.current,
                closed = ?report.closed.as_ref().map(|p| p.id),
                opened = ?report.opened.as_ref().map(|p| p.id),
                "Transition committed"
            );
            Ok(report)
        })
    }

    fn commit(
        &self,
        plan: TransitionPlan,
        warnings: Vec<ConsistencyWarning>,
    ) -> EngineResult<TransitionReport> {
        let closed = match plan.close {
            Some(punch) => {
                self.store.close_punch(punch.id, plan.at)?;
                Some(Punch {
                    end_time: Some(plan.at),
                    ..punch
                })
            }
            None => None,
        };

        let opened = match plan.open {
            Some(kind) => {
                let new_punch = NewPunch {
                    employee_id: plan.employee_id.clone(),
                    start_time: plan.at,
                    kind,
                };
                match self.store.insert_punch(new_punch) {
                    Ok(punch) => Some(punch),
                    Err(source) => {
                        return Err(self.roll_back(&plan.employee_id, closed.as_ref(), source));
                    }
                }
            }
            None => None,
        };

        Ok(TransitionReport {
            employee_id: plan.employee_id,
            transition: plan.transition,
            previous: plan.previous,
            current: plan.next,
            closed,
            opened,
            outcome: CommitOutcome::Committed,
            warnings,
        })
    }

    fn roll_back(&self, employee_id: &str, closed: Option<&Punch>, source: StoreError) -> EngineError {
        let Some(closed) = closed else {
            return EngineError::StoreUnavailable(source);
        };

        match self.store.reopen_punch(closed.id) {
            Ok(()) => {
                warn!(
                    employee_id,
                    punch_id = %closed.id,
                    error = %source,
                    "Transition rolled back"
                );
                EngineError::TransitionRolledBack {
                    employee_id: employee_id.to_string(),
                    source,
                }
            }
            Err(rollback) => {
                error!(
                    employee_id,
                    punch_id = %closed.id,
                    error = %source,
                    rollback_error = %rollback,
                    "Transition rollback failed, punches are inconsistent"
                );
                EngineError::TransitionInconsistent {
                    employee_id: employee_id.to_string(),
                    source,
                    rollback,
                }
            }
        }
    }

    // ------------------------------------------------------------------
    // Hours aggregation
    // ------------------------------------------------------------------

    fn employee_punches(&self, employee_id: &str) -> EngineResult<Vec<Punch>> {
        Ok(self.store.list_punches(Some(employee_id), None)?)
    }

    /// Work hours of `employee_id` over `window`, open punches counted to `now`.
    pub fn work_hours(
        &self,
        employee_id: &str,
        window: TimeWindow,
        now: NaiveDateTime,
    ) -> EngineResult<WorkTotals> {
        let punches = self.employee_punches(employee_id)?;
        let totals = calculate_work_hours(&punches, employee_id, window, now);
        log_warnings(&totals.warnings);
        Ok(totals)
    }

    /// Break hours of `employee_id` over `window`, split by kind.
    pub fn break_hours(
        &self,
        employee_id: &str,
        window: TimeWindow,
        now: NaiveDateTime,
    ) -> EngineResult<BreakTotals> {
        let punches = self.employee_punches(employee_id)?;
        Ok(calculate_break_hours(&punches, employee_id, window, now))
    }

    /// Work hours on the calendar day `date`.
    pub fn day_totals(
        &self,
        employee_id: &str,
        date: NaiveDate,
        now: NaiveDateTime,
    ) -> EngineResult<WorkTotals> {
        self.work_hours(employee_id, TimeWindow::day(date), now)
    }

    /// Work hours in the Sunday-start week containing `reference_date`.
    pub fn week_totals(
        &self,
        employee_id: &str,
        reference_date: NaiveDate,
        now: NaiveDateTime,
    ) -> EngineResult<WorkTotals> {
        self.work_hours(employee_id, TimeWindow::week_containing(reference_date), now)
    }

    // ------------------------------------------------------------------
    // Reports
    // ------------------------------------------------------------------

    /// Weekly pay for every active employee in `employees`.
    ///
    /// The week is the Sunday-start week containing `reference_date`.
    /// Reports follow roster order.
    pub fn weekly_payroll(
        &self,
        employees: &[Employee],
        reference_date: NaiveDate,
        now: NaiveDateTime,
    ) -> EngineResult<Vec<PayPeriodReport>> {
        let window = TimeWindow::week_containing(reference_date);

        let reports = employees
            .iter()
            .filter(|employee| employee.active)
            .map(|employee| {
                let totals = self.work_hours(&employee.id, window, now)?;
                calculate_weekly_pay(
                    employee,
                    window.start.date(),
                    totals.work_hours,
                    &self.config.payroll,
                )
            })
            .collect::<EngineResult<Vec<_>>>()?;

        info!(
            week_start = %window.start.date(),
            employees = reports.len(),
            "Weekly payroll calculated"
        );
        Ok(reports)
    }

    /// Actual versus scheduled hours for today and this week, as of `now`.
    pub fn schedule_progress(
        &self,
        employee_id: &str,
        now: NaiveDateTime,
    ) -> EngineResult<ProgressReport> {
        let punches = self.employee_punches(employee_id)?;
        let today = calculate_work_hours(&punches, employee_id, TimeWindow::day(now.date()), now);
        let week = calculate_work_hours(
            &punches,
            employee_id,
            TimeWindow::week_containing(now.date()),
            now,
        );
        log_warnings(&week.warnings);

        Ok(calculate_progress(&today, &week, &self.config.schedule, now))
    }

    /// Breaks taken on `date` against the configured entitlement.
    pub fn break_compliance(
        &self,
        employee_id: &str,
        date: NaiveDate,
        now: NaiveDateTime,
    ) -> EngineResult<BreakComplianceReport> {
        let punches = self.employee_punches(employee_id)?;
        let window = TimeWindow::day(date);
        let work = calculate_work_hours(&punches, employee_id, window, now);
        let breaks = calculate_break_hours(&punches, employee_id, window, now);

        Ok(calculate_break_compliance(
            employee_id,
            date,
            &work,
            &breaks,
            &self.config.breaks,
        ))
    }

    // ------------------------------------------------------------------
    // Exports
    // ------------------------------------------------------------------

    /// Renders the punches started between `start` and `end` (inclusive
    /// dates) in `format`.
    ///
    /// # Errors
    ///
    /// `InvalidDateRange` when `end` precedes `start`.
    pub fn export(
        &self,
        format: ExportFormat,
        employees: &[Employee],
        start: NaiveDate,
        end: NaiveDate,
    ) -> EngineResult<ExportDocument> {
        if end < start {
            return Err(EngineError::InvalidDateRange { start, end });
        }

        let punches = self.store.list_punches(None, Some(start))?;
        debug!(%format, %start, %end, punches = punches.len(), "Rendering export");

        let document = format.render(&punches, employees, start, end)?;
        info!(
            filename = %document.filename,
            bytes = document.content.len(),
            "Export rendered"
        );
        Ok(document)
    }
}
