// src/progress.rs
use crate::error::IngestError;

/// Refresh notifications for frontends (CLI status line, logs, tests).
/// Called from whichever thread ran the refresh.
pub trait Progress: Send {
    /// A refresh cycle is starting.
    fn begin(&mut self) {}

    /// New snapshot published.
    fn done(&mut self, _generation: u64, _records: usize) {}

    /// Another refresh was already running; this one did nothing.
    fn skipped(&mut self) {}

    /// The cycle failed; the previous snapshot is still in place.
    fn failed(&mut self, _err: &IngestError) {}
}

/// A no-op progress sink.
pub struct NullProgress;
impl Progress for NullProgress {}
