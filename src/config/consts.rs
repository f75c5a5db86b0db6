// src/config/consts.rs
use std::time::Duration;

// Source
pub const CSV_SOURCE_URL: &str = "https://docs.google.com/spreadsheets/d/1NWi48LT1emRaWfXNzeobg4472zQ1432_8wicAMm0t2c/gviz/tq?tqx=out:csv";
pub const GVIZ_SOURCE_URL: &str = "https://docs.google.com/spreadsheets/d/1NWi48LT1emRaWfXNzeobg4472zQ1432_8wicAMm0t2c/gviz/tq?tqx=out:json";
pub const SOURCE_URL_ENV: &str = "PROPDIR_SOURCE_URL";

// Net
pub const USER_AGENT: &str = concat!("propdir/", env!("CARGO_PKG_VERSION"));
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);
pub const CACHE_BUST_PARAM: &str = "_cb";

// Refresh
pub const POLL_INTERVAL: Duration = Duration::from_secs(30);

// Query
pub const SEARCH_DEBOUNCE: Duration = Duration::from_millis(300);
pub const PAGE_SIZE: usize = 9;
pub const MIN_ROOMS: u32 = 0;
pub const MAX_ROOMS: u32 = 600;

// Column contract
pub const COL_NAME: &str = "Venue Name";
pub const COL_CITY: &str = "City";
pub const COL_LOCATION: &str = "Location";
pub const COL_EMAIL: &str = "Email Address";
pub const COL_ROOMS: &str = "No of Rooms";
pub const COL_CONTACTS: &[(&str, &str)] = &[
    ("Person", "Person Contact"),
    ("Person 2", "Person Contact 2"),
];

// Sentinels
pub const UNKNOWN_PROPERTY: &str = "Unknown Property";
pub const UNKNOWN_CITY: &str = "Unknown City";
pub const UNKNOWN_LOCATION: &str = "Unknown Location";
pub const NOT_AVAILABLE: &str = "Not Available";
pub const LOAD_ERROR_MESSAGE: &str = "Failed to load property data.";

// Card images
pub const IMAGE_BASE: &str = "https://images.unsplash.com/photo-";
pub const IMAGE_PARAMS: &str = "?auto=format&fit=crop&w=800&q=80";
pub const IMAGE_IDS: &[&str] = &[
    "1613977257363-707ba9348227",
    "1600596542815-8007264a7819",
    "1600585154340-be6161a56a0c",
    "1512917774080-9991f1c4c750",
    "1600047509807-c29dd6b03362",
    "1600607687939-ce8a6c25118c",
    "1625602812206-535450741442",
    "1600566753190-17f0baa2a6c3",
];

// Local files
pub const STORE_DIR: &str = ".store";
pub const LOG_FILE: &str = "debug.log";
