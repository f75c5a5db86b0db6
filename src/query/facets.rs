// src/query/facets.rs
use std::collections::HashSet;

use serde::Serialize;

use crate::record::PropertyRecord;

/// Values for the selection controls, taken from the whole snapshot (not the
/// filtered subset), so picking a city never hides the other choices.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct Facets {
    /// Distinct cities, first-appearance order.
    pub cities: Vec<String>,
    /// Distinct locations, first-appearance order.
    pub locations: Vec<String>,
    /// Distinct room counts, ascending.
    pub rooms: Vec<u32>,
    /// Upper end for a rooms slider; 0 for an empty snapshot.
    pub max_rooms: u32,
}

impl Facets {
    pub fn from_records(records: &[PropertyRecord]) -> Self {
        let mut rooms: Vec<u32> = records.iter().map(|r| r.rooms).collect();
        rooms.sort_unstable();
        rooms.dedup();

        Self {
            cities: distinct(records.iter().map(|r| r.city.as_str())),
            locations: distinct(records.iter().map(|r| r.location.as_str())),
            max_rooms: rooms.last().copied().unwrap_or(0),
            rooms,
        }
    }
}

fn distinct<'a>(values: impl Iterator<Item = &'a str>) -> Vec<String> {
    let mut seen = HashSet::new();
    values.filter(|v| seen.insert(*v)).map(|v| s!(v)).collect()
}
