// src/config/options.rs
use std::path::PathBuf;
use std::time::Duration;

use super::consts::*;

#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct AppOptions {
    pub source: SourceOptions,
    pub poll: PollOptions,
    pub query: QueryOptions,
}

/// Delivery format of the published sheet.
///
/// The published CSV is the canonical contract. The JSON-wrapped export is
/// only read when asked for explicitly.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum SourceFormat {
    #[default]
    Csv,
    Tsv,
    GvizJson,
}

impl SourceFormat {
    /// Field separator for the delimited formats.
    pub fn delim(&self) -> Option<char> {
        match self {
            SourceFormat::Csv => Some(','),
            SourceFormat::Tsv => Some('\t'),
            SourceFormat::GvizJson => None,
        }
    }

    pub fn default_url(&self) -> &'static str {
        match self {
            SourceFormat::Csv | SourceFormat::Tsv => CSV_SOURCE_URL,
            SourceFormat::GvizJson => GVIZ_SOURCE_URL,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SourceLocation {
    Url(String),
    File(PathBuf),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SourceOptions {
    pub location: SourceLocation,
    pub format: SourceFormat,
    pub timeout: Duration,
}

impl Default for SourceOptions {
    fn default() -> Self {
        Self::for_format(SourceFormat::default())
    }
}

impl SourceOptions {
    /// Remote source at the format's default URL.
    pub fn for_format(format: SourceFormat) -> Self {
        Self {
            location: SourceLocation::Url(s!(format.default_url())),
            format,
            timeout: REQUEST_TIMEOUT,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PollOptions {
    pub interval: Duration,
}

impl Default for PollOptions {
    fn default() -> Self {
        Self { interval: POLL_INTERVAL }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QueryOptions {
    pub debounce: Duration,
    pub page_size: usize,
    pub min_rooms: u32,
    pub max_rooms: u32,
}

impl Default for QueryOptions {
    fn default() -> Self {
        Self {
            debounce: SEARCH_DEBOUNCE,
            page_size: PAGE_SIZE,
            min_rooms: MIN_ROOMS,
            max_rooms: MAX_ROOMS,
        }
    }
}
