// src/record.rs
use serde::Serialize;

use crate::config::consts::{
    IMAGE_BASE, IMAGE_IDS, IMAGE_PARAMS, UNKNOWN_CITY, UNKNOWN_LOCATION,
};

/// A contact person on a listing. Missing halves read "Not Available".
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Contact {
    pub name: String,
    pub phone: String,
}

/// One venue in a snapshot.
///
/// `id` and `image` come from the record's position in the final
/// (deduplicated) snapshot. They are stable within a snapshot only.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct PropertyRecord {
    pub id: usize,
    pub name: String,
    pub city: String,
    pub location: String,
    pub email: String,
    pub contacts: Vec<Contact>,
    pub rooms: u32,
    pub image: String,
}

impl PropertyRecord {
    /// A record with every optional field at its default.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: 0,
            name: name.into(),
            city: s!(UNKNOWN_CITY),
            location: s!(UNKNOWN_LOCATION),
            email: s!(),
            contacts: Vec::new(),
            rooms: 0,
            image: image_url(0),
        }
    }

    pub fn has_email(&self) -> bool {
        !self.email.is_empty()
    }
}

/// Card image for the record at `index`: a fixed photo, cycled by position.
pub fn image_url(index: usize) -> String {
    join!(IMAGE_BASE, IMAGE_IDS[index % IMAGE_IDS.len()], IMAGE_PARAMS)
}

/// Reassign `id` and `image` from final positions.
pub fn renumber(records: &mut [PropertyRecord]) {
    for (i, rec) in records.iter_mut().enumerate() {
        rec.id = i;
        rec.image = image_url(i);
    }
}
