use std::collections::HashMap;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use chrono::{NaiveDate, NaiveDateTime};
use uuid::Uuid;

use crate::models::{NewPunch, Punch};

use super::{PunchStore, StoreError, StoreResult};

#[derive(Debug, Default)]
struct StoreState {
    punches: Vec<Punch>,
    positions: HashMap<Uuid, usize>,
    // employee id -> ids of that employee's open punches
    open_index: HashMap<String, Vec<Uuid>>,
}

impl StoreState {
    fn push(&mut self, punch: Punch) {
        if punch.is_open() {
            self.open_index
                .entry(punch.employee_id.clone())
                .or_default()
                .push(punch.id);
        }
        self.positions.insert(punch.id, self.punches.len());
        self.punches.push(punch);
    }

    fn unindex(&mut self, employee_id: &str, punch_id: Uuid) {
        if let Some(ids) = self.open_index.get_mut(employee_id) {
            ids.retain(|id| *id != punch_id);
            if ids.is_empty() {
                self.open_index.remove(employee_id);
            }
        }
    }
}

/// A thread-safe in-memory punch store.
///
/// Uses `Arc<RwLock<..>>` so clones share the same punches. Keeps an
/// employee → open punch index up to date on every write, so
/// [`PunchStore::open_punches`] does not scan the history.
#[derive(Debug, Default, Clone)]
pub struct InMemoryPunchStore {
    state: Arc<RwLock<StoreState>>,
}

impl InMemoryPunchStore {
    /// Creates a new, empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store seeded with existing punches, kept as given.
    ///
    /// Seeding does not validate the punches, so it can reproduce
    /// inconsistent historical data.
    pub fn with_punches(punches: impl IntoIterator<Item = Punch>) -> Self {
        let mut state = StoreState::default();
        for punch in punches {
            state.push(punch);
        }
        Self {
            state: Arc::new(RwLock::new(state)),
        }
    }

    /// Number of stored punches.
    pub fn len(&self) -> StoreResult<usize> {
        Ok(self.read()?.punches.len())
    }

    /// Returns true when no punch has been stored.
    pub fn is_empty(&self) -> StoreResult<bool> {
        Ok(self.len()? == 0)
    }

    fn read(&self) -> StoreResult<RwLockReadGuard<'_, StoreState>> {
        self.state
            .read()
            .map_err(|_| StoreError::Unavailable("punch store lock poisoned".to_string()))
    }

    fn write(&self) -> StoreResult<RwLockWriteGuard<'_, StoreState>> {
        self.state
            .write()
            .map_err(|_| StoreError::Unavailable("punch store lock poisoned".to_string()))
    }
}

impl PunchStore for InMemoryPunchStore {
    fn list_punches(
        &self,
        employee_id: Option<&str>,
        since: Option<NaiveDate>,
    ) -> StoreResult<Vec<Punch>> {
        let state = self.read()?;
        let mut punches: Vec<Punch> = state
            .punches
            .iter()
            .filter(|p| employee_id.is_none_or(|id| p.employee_id == id))
            .filter(|p| since.is_none_or(|date| p.start_time.date() >= date))
            .cloned()
            .collect();
        punches.sort_by(|a, b| a.start_time.cmp(&b.start_time).then(a.id.cmp(&b.id)));
        Ok(punches)
    }

    fn insert_punch(&self, punch: NewPunch) -> StoreResult<Punch> {
        let punch = Punch {
            id: Uuid::new_v4(),
            employee_id: punch.employee_id,
            start_time: punch.start_time,
            end_time: None,
            kind: punch.kind,
        };
        self.write()?.push(punch.clone());
        Ok(punch)
    }

    fn close_punch(&self, punch_id: Uuid, end_time: NaiveDateTime) -> StoreResult<()> {
        let mut state = self.write()?;
        let position = *state
            .positions
            .get(&punch_id)
            .ok_or(StoreError::PunchNotFound(punch_id))?;
        let punch = &mut state.punches[position];
        if punch.end_time.is_some() {
            return Err(StoreError::AlreadyClosed(punch_id));
        }
        punch.end_time = Some(end_time);
        let employee_id = punch.employee_id.clone();
        state.unindex(&employee_id, punch_id);
        Ok(())
    }

    fn reopen_punch(&self, punch_id: Uuid) -> StoreResult<()> {
        let mut state = self.write()?;
        let position = *state
            .positions
            .get(&punch_id)
            .ok_or(StoreError::PunchNotFound(punch_id))?;
        let punch = &mut state.punches[position];
        if punch.end_time.take().is_none() {
            return Ok(());
        }
        let employee_id = punch.employee_id.clone();
        state.open_index.entry(employee_id).or_default().push(punch_id);
        Ok(())
    }

    fn open_punches(&self, employee_id: &str) -> StoreResult<Vec<Punch>> {
        let state = self.read()?;
        let Some(ids) = state.open_index.get(employee_id) else {
            return Ok(Vec::new());
        };
        Ok(ids
            .iter()
            .filter_map(|id| state.positions.get(id))
            .map(|&position| state.punches[position].clone())
            .collect())
    }
}
