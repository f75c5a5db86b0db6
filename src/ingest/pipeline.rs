// src/ingest/pipeline.rs
use tracing::debug;

use crate::config::options::SourceFormat;
use crate::core::net::Fetch;
use crate::csv::{RawRow, parse_rows};
use crate::error::{IngestError, Result};
use crate::record::{PropertyRecord, renumber};
use crate::schema::Schema;

use super::{dedup, gviz, map};

/// Payload text → rows, per delivery format.
pub fn decode(text: &str, format: SourceFormat) -> Result<Vec<RawRow>> {
    match format.delim() {
        Some(sep) => {
            // An unpublished sheet answers with a sign-in page, not an error status.
            if text.trim_start().starts_with('<') {
                return Err(IngestError::Malformed(s!("expected delimited text, got HTML")));
            }
            Ok(parse_rows(text, sep))
        }
        None => gviz::parse(text),
    }
}

/// Whole offline chain: decode → map → dedup → renumber.
pub fn ingest_text(text: &str, format: SourceFormat, schema: &Schema) -> Result<Vec<PropertyRecord>> {
    let rows = decode(text, format)?;
    let mapped = map::map_rows(&rows, schema)?;
    let mapped_len = mapped.len();

    let mut records = dedup::deduplicate(mapped);
    renumber(&mut records);

    debug!(
        rows = rows.len(),
        mapped = mapped_len,
        duplicates = mapped_len - records.len(),
        records = records.len(),
        "ingested payload"
    );
    Ok(records)
}

/// A source plus the rules for reading it.
pub struct Pipeline {
    fetcher: Box<dyn Fetch>,
    format: SourceFormat,
    schema: Schema,
}

impl Pipeline {
    pub fn new(fetcher: Box<dyn Fetch>, format: SourceFormat) -> Self {
        Self { fetcher, format, schema: Schema::default() }
    }

    pub fn with_schema(mut self, schema: Schema) -> Self {
        self.schema = schema;
        self
    }

    pub fn format(&self) -> SourceFormat {
        self.format
    }

    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    pub fn source(&self) -> String {
        self.fetcher.describe()
    }

    /// One fetch → parse → map → dedup cycle.
    pub fn run_once(&self) -> Result<Vec<PropertyRecord>> {
        let text = self.fetcher.fetch()?;
        ingest_text(&text, self.format, &self.schema)
    }
}
