// src/query/filter.rs
use serde::Serialize;

use crate::config::consts::{MAX_ROOMS, MIN_ROOMS};
use crate::record::PropertyRecord;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

impl SortOrder {
    pub fn toggled(self) -> Self {
        match self {
            SortOrder::Asc => SortOrder::Desc,
            SortOrder::Desc => SortOrder::Asc,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            SortOrder::Asc => "Low to High",
            SortOrder::Desc => "High to Low",
        }
    }
}

/// Active filter state. `None` for city/location means "any".
///
/// `search` is the value that filters: for an interactive frontend that is
/// the debounced text, not what is in the box right now.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Filters {
    pub search: String,
    pub city: Option<String>,
    pub location: Option<String>,
    pub min_rooms: u32,
    pub max_rooms: u32,
    pub sort: SortOrder,
}

impl Default for Filters {
    fn default() -> Self {
        Self {
            search: s!(),
            city: None,
            location: None,
            min_rooms: MIN_ROOMS,
            max_rooms: MAX_ROOMS,
            sort: SortOrder::Asc,
        }
    }
}

impl Filters {
    /// All predicates, ANDed. `needle` is the trimmed, lowercased search.
    fn keep(&self, rec: &PropertyRecord, needle: &str) -> bool {
        (needle.is_empty() || rec.name.to_lowercase().contains(needle))
            && self.city.as_ref().is_none_or(|c| rec.city == *c)
            && self.location.as_ref().is_none_or(|l| rec.location == *l)
            && (self.min_rooms..=self.max_rooms).contains(&rec.rooms)
    }
}

/// Positions (into `records`) of the matching records, in display order.
///
/// Filtering keeps snapshot order and the sort by rooms is stable, so equal
/// room counts always come out in snapshot order, whichever way we sort.
pub fn select(records: &[PropertyRecord], filters: &Filters) -> Vec<usize> {
    let needle = filters.search.trim().to_lowercase();

    let mut ix: Vec<usize> = records
        .iter()
        .enumerate()
        .filter(|(_, r)| filters.keep(r, &needle))
        .map(|(i, _)| i)
        .collect();

    match filters.sort {
        SortOrder::Asc => ix.sort_by_key(|&i| records[i].rooms),
        SortOrder::Desc => ix.sort_by(|&a, &b| records[b].rooms.cmp(&records[a].rooms)),
    }
    ix
}

/// Same as `select`, borrowing the records.
pub fn query<'a>(records: &'a [PropertyRecord], filters: &Filters) -> Vec<&'a PropertyRecord> {
    select(records, filters).into_iter().map(|i| &records[i]).collect()
}
