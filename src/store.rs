//! Simulation result storage.
//!
//! The engine itself is stateless; persisted results live behind
//! [`ResultStore`]. [`InMemoryResultStore`] backs tests and embedded use.

use std::collections::BTreeMap;
use std::sync::{PoisonError, RwLock};

use chrono::Utc;

use crate::error::{Result, TwinError};
use crate::models::SimulationResult;

/// Default page size for listings.
pub const DEFAULT_PAGE_LIMIT: usize = 50;
/// Largest page a listing returns.
pub const MAX_PAGE_LIMIT: usize = 200;

/// Offset pagination.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    pub skip: usize,
    pub limit: usize,
}

impl Default for Page {
    fn default() -> Self {
        Self {
            skip: 0,
            limit: DEFAULT_PAGE_LIMIT,
        }
    }
}

impl Page {
    /// Creates a page, clamping `limit` to `1..=MAX_PAGE_LIMIT`.
    pub fn new(skip: usize, limit: usize) -> Self {
        Self {
            skip,
            limit: limit.clamp(1, MAX_PAGE_LIMIT),
        }
    }
}

/// Persistence for simulation results.
pub trait ResultStore: Send + Sync {
    /// Stores a result, assigning a fresh `id` and `created_at`.
    fn save(&self, result: SimulationResult) -> Result<SimulationResult>;

    /// Loads one result. `TwinError::NotFound` if absent.
    fn get(&self, id: u64) -> Result<SimulationResult>;

    /// A student's results, newest first.
    fn list_for_student(&self, student_id: u64, page: Page) -> Result<Vec<SimulationResult>>;

    /// Removes one result. `TwinError::NotFound` if absent.
    fn delete(&self, id: u64) -> Result<()>;
}

#[derive(Debug, Default)]
struct Inner {
    next_id: u64,
    results: BTreeMap<u64, SimulationResult>,
}

/// In-memory implementation of [`ResultStore`].
#[derive(Debug, Default)]
pub struct InMemoryResultStore {
    inner: RwLock<Inner>,
}

impl InMemoryResultStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.inner
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .results
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl ResultStore for InMemoryResultStore {
    fn save(&self, mut result: SimulationResult) -> Result<SimulationResult> {
        let mut inner = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        inner.next_id += 1;
        let id = inner.next_id;
        result.id = Some(id);
        result.created_at = Some(Utc::now());
        inner.results.insert(id, result.clone());
        Ok(result)
    }

    fn get(&self, id: u64) -> Result<SimulationResult> {
        self.inner
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .results
            .get(&id)
            .cloned()
            .ok_or(TwinError::NotFound {
                entity: "simulation",
                id,
            })
    }

    fn list_for_student(&self, student_id: u64, page: Page) -> Result<Vec<SimulationResult>> {
        let inner = self.inner.read().unwrap_or_else(PoisonError::into_inner);
        Ok(inner
            .results
            .values()
            .rev()
            .filter(|r| r.scenario_config.student_id == student_id)
            .skip(page.skip)
            .take(page.limit)
            .cloned()
            .collect())
    }

    fn delete(&self, id: u64) -> Result<()> {
        let mut inner = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        inner
            .results
            .remove(&id)
            .map(|_| ())
            .ok_or(TwinError::NotFound {
                entity: "simulation",
                id,
            })
    }
}
