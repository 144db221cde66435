//! Time Accounting Engine
//!
//! This crate records employee work sessions as punches (clock-in/out and
//! meal or rest breaks), aggregates worked hours over days and Sunday-start
//! weeks, computes weekly regular and overtime pay, estimates progress
//! against a fixed schedule, and serializes time data for payroll imports.
//!
//! The [`engine::TimeClock`] facade drives everything through a
//! [`store::PunchStore`]; the [`api`] module exposes it over HTTP.

#![warn(missing_docs)]

pub mod api;
pub mod calculation;
pub mod config;
pub mod engine;
pub mod error;
pub mod export;
pub mod models;
pub mod store;
