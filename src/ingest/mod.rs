// src/ingest/mod.rs
//! Ingestion: raw payload text → deduplicated `PropertyRecord`s.
//!
//! ```text
//! Fetch::fetch → decode (csv | gviz) → map_rows → deduplicate → renumber
//! ```
//! Each stage is a plain function so it can be tested offline against
//! saved payloads. `Pipeline` strings them together behind a `Fetch`.

pub mod dedup;
pub mod gviz;
pub mod map;
pub mod pipeline;

pub use dedup::deduplicate;
pub use map::map_rows;
pub use pipeline::{Pipeline, decode, ingest_text};
