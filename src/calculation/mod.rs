//! Calculation logic for the Time Accounting Engine.
//!
//! Every function here is pure: it takes punches, configuration and an
//! explicit `now`, and never touches the store. The engine gathers the inputs
//! and calls into this module for hour aggregation, weekly pay, schedule
//! progress, break compliance and punch consistency checks.

mod break_compliance;
mod consistency;
mod hours;
mod payroll;
mod progress;

pub use break_compliance::{calculate_break_compliance, meal_minutes_required, rest_breaks_required};
pub use consistency::{check_punches, detect_out_of_order, select_open_punch};
pub use hours::{calculate_break_hours, calculate_work_hours, punch_hours_in_window};
pub use payroll::{calculate_weekly_pay, round_to_cents, split_overtime};
pub use progress::{calculate_progress, expected_hours_this_week, expected_hours_today};
