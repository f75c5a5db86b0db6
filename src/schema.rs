// src/schema.rs
//! Column contract between the sheet and `PropertyRecord`.
//!
//! The sheet is edited by hand, so columns move, get renamed, or vanish.
//! A `Schema` names the header each logical field lives under; `resolve` binds
//! it to the column positions of one payload. A missing header is logged and
//! its field falls back to the default. It is never a hard failure.

use tracing::warn;

use crate::config::consts::{
    COL_CITY, COL_CONTACTS, COL_EMAIL, COL_LOCATION, COL_NAME, COL_ROOMS,
};
use crate::core::sanitize::clean;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ContactColumns {
    pub name: String,
    pub phone: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Schema {
    pub name: String,
    pub city: String,
    pub location: String,
    pub email: String,
    pub rooms: String,
    /// One entry per contact slot, in display order.
    pub contacts: Vec<ContactColumns>,
}

impl Default for Schema {
    fn default() -> Self {
        Self {
            name: s!(COL_NAME),
            city: s!(COL_CITY),
            location: s!(COL_LOCATION),
            email: s!(COL_EMAIL),
            rooms: s!(COL_ROOMS),
            contacts: COL_CONTACTS
                .iter()
                .map(|(name, phone)| ContactColumns { name: s!(*name), phone: s!(*phone) })
                .collect(),
        }
    }
}

/// Column positions for one payload. `None` means the header was absent.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Resolved {
    pub name: Option<usize>,
    pub city: Option<usize>,
    pub location: Option<usize>,
    pub email: Option<usize>,
    pub rooms: Option<usize>,
    pub contacts: Vec<(Option<usize>, Option<usize>)>,
    /// Header text of the name column; a data row carrying it is a repeated header.
    pub name_header: String,
}

impl Schema {
    pub fn slots(&self) -> usize {
        self.contacts.len()
    }

    pub fn resolve(&self, headers: &[String]) -> Resolved {
        let headers: Vec<&str> = headers.iter().map(|h| clean(h)).collect();
        let mut missing: Vec<String> = Vec::new();

        // A keyed projection keeps the last column under a repeated header; so do we.
        let mut find = |key: &str| {
            let pos = headers.iter().rposition(|h| *h == key);
            if pos.is_none() {
                missing.push(s!(key));
            }
            pos
        };

        let name = find(self.name.as_str());
        let city = find(self.city.as_str());
        let location = find(self.location.as_str());
        let email = find(self.email.as_str());
        let rooms = find(self.rooms.as_str());
        let contacts = self
            .contacts
            .iter()
            .map(|c| (find(c.name.as_str()), find(c.phone.as_str())))
            .collect();

        if !missing.is_empty() {
            warn!(missing = ?missing, "sheet is missing expected columns; using defaults");
        }

        Resolved {
            name,
            city,
            location,
            email,
            rooms,
            contacts,
            name_header: self.name.clone(),
        }
    }
}

impl Resolved {
    /// Trimmed cell text, or "" when the column is absent or the row is short.
    pub fn cell<'r>(&self, row: &'r [String], col: Option<usize>) -> &'r str {
        col.and_then(|i| row.get(i)).map(|v| clean(v)).unwrap_or("")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn headers(h: &[&str]) -> Vec<String> {
        h.iter().map(|s| s!(*s)).collect()
    }

    #[test]
    fn resolves_trimmed_headers_in_any_order() {
        let r = Schema::default().resolve(&headers(&[" No of Rooms ", "City", "Venue Name"]));
        assert_eq!(r.rooms, Some(0));
        assert_eq!(r.city, Some(1));
        assert_eq!(r.name, Some(2));
        assert_eq!(r.location, None);
        assert_eq!(r.contacts, vec![(None, None), (None, None)]);
    }

    #[test]
    fn short_rows_read_as_empty() {
        let r = Schema::default().resolve(&headers(&["Venue Name", "City"]));
        let row = vec![s!("  Lakeview  ")];
        assert_eq!(r.cell(&row, r.name), "Lakeview");
        assert_eq!(r.cell(&row, r.city), "");
        assert_eq!(r.cell(&row, r.email), "");
    }
}
