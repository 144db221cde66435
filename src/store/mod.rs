//! Punch store port.
//!
//! The engine never talks to storage directly. It calls the operations of
//! [`PunchStore`], which an adapter implements over whatever persistence the
//! deployment uses. [`InMemoryPunchStore`] is the reference adapter.

mod in_memory;

use chrono::{NaiveDate, NaiveDateTime};
use thiserror::Error;
use uuid::Uuid;

use crate::models::{NewPunch, Punch};

pub use in_memory::InMemoryPunchStore;

/// Failures raised by a store adapter.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// The backing store could not be reached or failed the operation.
    #[error("Store unavailable: {0}")]
    Unavailable(String),

    /// No punch with this id exists.
    #[error("Punch not found: {0}")]
    PunchNotFound(Uuid),

    /// The punch already has an end time.
    #[error("Punch already closed: {0}")]
    AlreadyClosed(Uuid),
}

/// A type alias for Results that return StoreError.
pub type StoreResult<T> = Result<T, StoreError>;

/// Storage operations the engine consumes.
///
/// Implementations must hand out snapshots: a returned [`Punch`] is a copy
/// that later writes do not modify.
pub trait PunchStore: Send + Sync {
    /// Lists punches, optionally restricted to one employee and to punches
    /// starting on or after `since`.
    fn list_punches(
        &self,
        employee_id: Option<&str>,
        since: Option<NaiveDate>,
    ) -> StoreResult<Vec<Punch>>;

    /// Inserts an open punch and returns it with its assigned id.
    fn insert_punch(&self, punch: NewPunch) -> StoreResult<Punch>;

    /// Sets the end time of an open punch.
    fn close_punch(&self, punch_id: Uuid, end_time: NaiveDateTime) -> StoreResult<()>;

    /// Clears the end time of a punch. Used only to undo a close when the
    /// rest of a transition fails.
    fn reopen_punch(&self, punch_id: Uuid) -> StoreResult<()>;

    /// Open punches of one employee.
    fn open_punches(&self, employee_id: &str) -> StoreResult<Vec<Punch>> {
        Ok(self
            .list_punches(Some(employee_id), None)?
            .into_iter()
            .filter(Punch::is_open)
            .collect())
    }
}
