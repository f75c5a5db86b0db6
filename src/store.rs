// src/store.rs
//! The current snapshot and the load status.
//!
//! A `Snapshot` is immutable once built. Refreshing swaps the `Arc` under a
//! short lock; readers that already hold the old `Arc` keep a complete, valid
//! dataset. A failed refresh only touches the status.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Instant;

use crate::record::PropertyRecord;

#[derive(Debug)]
pub struct Snapshot {
    generation: u64,
    built_at: Instant,
    records: Vec<PropertyRecord>,
}

impl Snapshot {
    /// Generation 0: nothing loaded yet.
    pub fn empty() -> Self {
        Self::new(0, Vec::new())
    }

    pub fn new(generation: u64, records: Vec<PropertyRecord>) -> Self {
        Self { generation, built_at: Instant::now(), records }
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn built_at(&self) -> Instant {
        self.built_at
    }

    pub fn records(&self) -> &[PropertyRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Load status. `Uninitialized` doubles as "loading": it is left exactly once,
/// on the first refresh that finishes, whatever its outcome.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Status {
    Uninitialized,
    Ready,
    Error(String),
}

impl Status {
    pub fn is_loading(&self) -> bool {
        matches!(self, Status::Uninitialized)
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            Status::Error(msg) => Some(msg),
            _ => None,
        }
    }
}

struct Inner {
    snapshot: Arc<Snapshot>,
    status: Status,
}

pub struct SnapshotStore {
    inner: Mutex<Inner>,
}

impl Default for SnapshotStore {
    fn default() -> Self {
        Self::new()
    }
}

impl SnapshotStore {
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(Inner { snapshot: Arc::new(Snapshot::empty()), status: Status::Uninitialized }),
        }
    }

    // Nothing panics while holding the lock, but don't wedge readers if it ever does.
    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn snapshot(&self) -> Arc<Snapshot> {
        Arc::clone(&self.lock().snapshot)
    }

    pub fn status(&self) -> Status {
        self.lock().status.clone()
    }

    /// Snapshot and status read under one lock.
    pub fn read(&self) -> (Arc<Snapshot>, Status) {
        let g = self.lock();
        (Arc::clone(&g.snapshot), g.status.clone())
    }

    pub fn is_loading(&self) -> bool {
        self.lock().status.is_loading()
    }

    pub fn generation(&self) -> u64 {
        self.lock().snapshot.generation()
    }

    /// Replace the snapshot wholesale and clear any error. Returns the new generation.
    pub fn publish(&self, records: Vec<PropertyRecord>) -> u64 {
        let mut g = self.lock();
        let generation = g.snapshot.generation() + 1;
        g.snapshot = Arc::new(Snapshot::new(generation, records));
        g.status = Status::Ready;
        generation
    }

    /// Record a failed cycle. The snapshot is left as it was.
    pub fn fail(&self, message: impl Into<String>) {
        self.lock().status = Status::Error(message.into());
    }
}
