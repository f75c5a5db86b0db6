// src/ingest/map.rs
use tracing::debug;

use crate::config::consts::{NOT_AVAILABLE, UNKNOWN_CITY, UNKNOWN_LOCATION, UNKNOWN_PROPERTY};
use crate::core::sanitize::leading_u32;
use crate::csv::RawRow;
use crate::error::{IngestError, Result};
use crate::record::{Contact, PropertyRecord, image_url};
use crate::schema::{Resolved, Schema};

/// Project parsed rows onto the record shape. Row 0 is the header row.
///
/// Rows whose name resolves to the header text or to the unknown sentinel are
/// dropped (repeated header rows, blank trailing rows). Returned records still
/// carry provisional ids; dedup runs next.
pub fn map_rows(rows: &[RawRow], schema: &Schema) -> Result<Vec<PropertyRecord>> {
    let Some((header, body)) = rows.split_first() else {
        return Err(IngestError::Malformed(s!("payload has no header row")));
    };

    let cols = schema.resolve(header);
    let mut out = Vec::with_capacity(body.len());
    let mut dropped = 0usize;

    for row in body {
        match map_row(&cols, row) {
            Some(mut rec) => {
                rec.id = out.len();
                rec.image = image_url(rec.id);
                out.push(rec);
            }
            None => dropped += 1,
        }
    }

    if dropped > 0 {
        debug!(dropped, kept = out.len(), "skipped header/placeholder rows");
    }
    Ok(out)
}

fn map_row(cols: &Resolved, row: &[String]) -> Option<PropertyRecord> {
    let name = or_default(cols.cell(row, cols.name), UNKNOWN_PROPERTY);
    if name == cols.name_header || name == UNKNOWN_PROPERTY {
        return None;
    }

    let contacts = cols
        .contacts
        .iter()
        .filter_map(|&(person, phone)| {
            let person = cols.cell(row, person);
            let phone = cols.cell(row, phone);
            // A wholly empty slot is omitted, not padded.
            if person.is_empty() && phone.is_empty() {
                return None;
            }
            Some(Contact {
                name: s!(or_default(person, NOT_AVAILABLE)),
                phone: s!(or_default(phone, NOT_AVAILABLE)),
            })
        })
        .collect();

    Some(PropertyRecord {
        id: 0,
        name: s!(name),
        city: s!(or_default(cols.cell(row, cols.city), UNKNOWN_CITY)),
        location: s!(or_default(cols.cell(row, cols.location), UNKNOWN_LOCATION)),
        email: s!(cols.cell(row, cols.email)),
        contacts,
        rooms: leading_u32(cols.cell(row, cols.rooms)).unwrap_or(0),
        image: s!(),
    })
}

fn or_default<'a>(value: &'a str, default: &'a str) -> &'a str {
    if value.is_empty() { default } else { value }
}
