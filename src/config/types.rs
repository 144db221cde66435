//! Configuration types for the Time Accounting Engine.
//!
//! This module contains the strongly-typed configuration structures that
//! are deserialized from YAML configuration files. Every section has
//! defaults, so a partial (or missing) `engine.yaml` is valid.

use chrono::{NaiveTime, Weekday};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};
use crate::models::{BreakKind, Employee, hours_between};

/// Weekly overtime settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PayrollConfig {
    /// Weekly work hours paid at the regular rate.
    pub overtime_threshold_hours: f64,
    /// Multiplier applied to the hourly rate beyond the threshold.
    pub overtime_multiplier: Decimal,
}

impl Default for PayrollConfig {
    fn default() -> Self {
        Self {
            overtime_threshold_hours: 40.0,
            overtime_multiplier: Decimal::new(15, 1),
        }
    }
}

/// The fixed weekly schedule used for progress estimates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScheduleConfig {
    /// Days on which hours are expected.
    pub workdays: Vec<Weekday>,
    /// Start of the working day.
    pub start: NaiveTime,
    /// End of the working day.
    pub end: NaiveTime,
    /// Start of the unpaid lunch.
    pub lunch_start: NaiveTime,
    /// End of the unpaid lunch.
    pub lunch_end: NaiveTime,
}

impl Default for ScheduleConfig {
    fn default() -> Self {
        let at = |hour| NaiveTime::from_hms_opt(hour, 0, 0).unwrap_or(NaiveTime::MIN);
        Self {
            workdays: vec![
                Weekday::Mon,
                Weekday::Tue,
                Weekday::Wed,
                Weekday::Thu,
                Weekday::Fri,
            ],
            start: at(7),
            end: at(16),
            lunch_start: at(12),
            lunch_end: at(13),
        }
    }
}

impl ScheduleConfig {
    /// Returns true if hours are expected on `weekday`.
    pub fn is_workday(&self, weekday: Weekday) -> bool {
        self.workdays.contains(&weekday)
    }

    /// Scheduled hours before lunch.
    pub fn morning_hours(&self) -> f64 {
        time_span_hours(self.start, self.lunch_start)
    }

    /// Scheduled hours after lunch.
    pub fn afternoon_hours(&self) -> f64 {
        time_span_hours(self.lunch_end, self.end)
    }

    /// Expected hours for a full workday (lunch excluded).
    ///
    /// ```
    /// use timeclock_engine::config::ScheduleConfig;
    ///
    /// assert_eq!(ScheduleConfig::default().daily_hours(), 8.0);
    /// ```
    pub fn daily_hours(&self) -> f64 {
        self.morning_hours() + self.afternoon_hours()
    }
}

fn time_span_hours(from: NaiveTime, to: NaiveTime) -> f64 {
    let date = chrono::NaiveDate::MIN;
    hours_between(date.and_time(from), date.and_time(to))
}

/// Break entitlement thresholds, used for reporting only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BreakPolicyConfig {
    /// Break kinds employees may start.
    pub kinds: Vec<BreakKind>,
    /// A meal break is expected once daily work exceeds this many hours.
    pub meal_required_after_hours: f64,
    /// Length of the expected meal break.
    pub meal_break_minutes: f64,
    /// One rest break is expected per block of this many work hours
    /// (or major fraction thereof).
    pub rest_block_hours: f64,
    /// Length of each expected rest break.
    pub rest_break_minutes: f64,
}

impl Default for BreakPolicyConfig {
    fn default() -> Self {
        Self {
            kinds: vec![BreakKind::Meal, BreakKind::Rest],
            meal_required_after_hours: 6.0,
            meal_break_minutes: 30.0,
            rest_block_hours: 4.0,
            rest_break_minutes: 10.0,
        }
    }
}

impl BreakPolicyConfig {
    /// Returns true if employees may start breaks of this kind.
    pub fn allows(&self, kind: BreakKind) -> bool {
        self.kinds.contains(&kind)
    }
}

/// Engine configuration from `engine.yaml`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Overtime settings.
    pub payroll: PayrollConfig,
    /// Expected weekly schedule.
    pub schedule: ScheduleConfig,
    /// Break kinds and entitlement thresholds.
    pub breaks: BreakPolicyConfig,
}

impl EngineConfig {
    /// Checks values serde cannot: ranges and the ordering of schedule times.
    pub fn validate(&self) -> EngineResult<()> {
        let payroll = &self.payroll;
        if !payroll.overtime_threshold_hours.is_finite() || payroll.overtime_threshold_hours < 0.0
        {
            return Err(invalid(
                "payroll.overtime_threshold_hours",
                "must be a non-negative number of hours",
            ));
        }
        if payroll.overtime_multiplier < Decimal::ONE {
            return Err(invalid(
                "payroll.overtime_multiplier",
                "must be at least 1.0",
            ));
        }

        let schedule = &self.schedule;
        if !(schedule.start <= schedule.lunch_start
            && schedule.lunch_start <= schedule.lunch_end
            && schedule.lunch_end <= schedule.end)
        {
            return Err(invalid(
                "schedule",
                "expected start <= lunch_start <= lunch_end <= end",
            ));
        }
        if schedule.daily_hours() <= 0.0 && !schedule.workdays.is_empty() {
            return Err(invalid("schedule", "workdays must have scheduled hours"));
        }

        let breaks = &self.breaks;
        let positive = [
            ("breaks.meal_required_after_hours", breaks.meal_required_after_hours),
            ("breaks.meal_break_minutes", breaks.meal_break_minutes),
            ("breaks.rest_block_hours", breaks.rest_block_hours),
            ("breaks.rest_break_minutes", breaks.rest_break_minutes),
        ];
        for (field, value) in positive {
            if !value.is_finite() || value <= 0.0 {
                return Err(invalid(field, "must be greater than zero"));
            }
        }

        Ok(())
    }
}

fn invalid(field: &str, message: &str) -> EngineError {
    EngineError::InvalidConfig {
        field: field.to_string(),
        message: message.to_string(),
    }
}

/// Roster file structure (`employees.yaml`).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EmployeeRoster {
    /// The employees known to the deployment.
    #[serde(default)]
    pub employees: Vec<Employee>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = EngineConfig::default();
        assert_eq!(config.payroll.overtime_threshold_hours, 40.0);
        assert_eq!(config.payroll.overtime_multiplier, Decimal::new(15, 1));
        assert_eq!(config.schedule.daily_hours(), 8.0);
        assert_eq!(config.schedule.morning_hours(), 5.0);
        assert_eq!(config.schedule.afternoon_hours(), 3.0);
        assert!(config.breaks.allows(BreakKind::Meal));
        assert!(config.breaks.allows(BreakKind::Rest));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_yaml_keeps_other_defaults() {
        let yaml = r#"
payroll:
  overtime_threshold_hours: 38.0
"#;
        let config: EngineConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.payroll.overtime_threshold_hours, 38.0);
        assert_eq!(config.payroll.overtime_multiplier, Decimal::new(15, 1));
        assert_eq!(config.schedule, ScheduleConfig::default());
    }

    #[test]
    fn test_schedule_yaml() {
        let yaml = r#"
schedule:
  workdays: [Mon, Tue, Wed, Thu]
  start: "08:00:00"
  end: "18:30:00"
  lunch_start: "12:00:00"
  lunch_end: "12:30:00"
"#;
        let config: EngineConfig = serde_yaml::from_str(yaml).unwrap();
        assert!(!config.schedule.is_workday(Weekday::Fri));
        assert_eq!(config.schedule.daily_hours(), 10.0);
    }

    #[test]
    fn test_multiplier_below_one_is_invalid() {
        let mut config = EngineConfig::default();
        config.payroll.overtime_multiplier = Decimal::new(9, 1);

        match config.validate() {
            Err(EngineError::InvalidConfig { field, .. }) => {
                assert_eq!(field, "payroll.overtime_multiplier");
            }
            other => panic!("Expected InvalidConfig, got {:?}", other),
        }
    }

    #[test]
    fn test_lunch_outside_day_is_invalid() {
        let mut config = EngineConfig::default();
        config.schedule.lunch_end = NaiveTime::from_hms_opt(17, 0, 0).unwrap();

        assert!(matches!(
            config.validate(),
            Err(EngineError::InvalidConfig { field, .. }) if field == "schedule"
        ));
    }

    #[test]
    fn test_zero_rest_block_is_invalid() {
        let mut config = EngineConfig::default();
        config.breaks.rest_block_hours = 0.0;
        assert!(config.validate().is_err());
    }
}
