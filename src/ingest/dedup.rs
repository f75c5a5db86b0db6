// src/ingest/dedup.rs
use std::collections::HashMap;

use crate::record::PropertyRecord;

/// Collapse records sharing a `name` (exact, case-sensitive).
///
/// The survivor is the one with the most contacts; on a tie the first seen
/// wins. Survivors keep the position where their name first appeared.
pub fn deduplicate(records: Vec<PropertyRecord>) -> Vec<PropertyRecord> {
    let mut slot_of: HashMap<String, usize> = HashMap::with_capacity(records.len());
    let mut out: Vec<PropertyRecord> = Vec::with_capacity(records.len());

    for rec in records {
        match slot_of.get(&rec.name) {
            Some(&i) => {
                if rec.contacts.len() > out[i].contacts.len() {
                    out[i] = rec;
                }
            }
            None => {
                slot_of.insert(rec.name.clone(), out.len());
                out.push(rec);
            }
        }
    }

    out
}
