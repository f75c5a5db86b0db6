// src/lib.rs
//! Spreadsheet-fed property directory.
//!
//! Two halves: `ingest` turns the published sheet into a deduplicated
//! snapshot (kept fresh by `poller`), and `query` answers search / filter /
//! sort / page requests over it. `view::DirectoryView` is the stateful glue an
//! interactive frontend holds on to; the `propdir` binary is one such frontend.

#[macro_use]
pub mod macros;

pub mod config;
pub mod core;
pub mod csv;
pub mod error;
pub mod ingest;
pub mod log;
pub mod poller;
pub mod progress;
pub mod query;
pub mod record;
pub mod schema;
pub mod store;
pub mod view;

#[cfg(feature = "cli")]
pub mod cli;

pub use error::{ErrorKind, IngestError, Result};
pub use record::{Contact, PropertyRecord};
pub use store::{Snapshot, SnapshotStore, Status};
