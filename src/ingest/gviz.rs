// src/ingest/gviz.rs
//! The JSON-wrapped sheet export (`gviz/tq?tqx=out:json`).
//!
//! The body is a JavaScript call around a JSON object:
//! ```text
//! /*O_o*/
//! google.visualization.Query.setResponse({"table":{"cols":[..],"rows":[..]}});
//! ```
//! We cut the object out, read column labels as the header row and each
//! cell's `v` as text, and hand back rows shaped like parsed CSV so the rest of
//! the pipeline does not care which export was used.

use serde::Deserialize;
use serde_json::Value;

use crate::csv::RawRow;
use crate::error::{IngestError, Result};

#[derive(Debug, Deserialize)]
struct Response {
    #[serde(default)]
    status: Option<String>,
    #[serde(default)]
    errors: Vec<Value>,
    table: Option<Table>,
}

#[derive(Debug, Deserialize)]
struct Table {
    #[serde(default)]
    cols: Vec<Column>,
    #[serde(default)]
    rows: Vec<Row>,
}

#[derive(Debug, Deserialize)]
struct Column {
    #[serde(default)]
    label: String,
}

#[derive(Debug, Deserialize)]
struct Row {
    #[serde(default)]
    c: Vec<Option<Cell>>,
}

#[derive(Debug, Deserialize)]
struct Cell {
    #[serde(default)]
    v: Value,
    #[serde(default)]
    f: Option<String>,
}

/// Slice from the first `{` to the last `}`.
pub fn strip_wrapper(text: &str) -> Result<&str> {
    match (text.find('{'), text.rfind('}')) {
        (Some(start), Some(end)) if start < end => Ok(&text[start..=end]),
        _ => Err(IngestError::Malformed(s!("no JSON object in gviz response"))),
    }
}

pub fn parse(text: &str) -> Result<Vec<RawRow>> {
    let resp: Response = serde_json::from_str(strip_wrapper(text)?)?;

    if resp.status.as_deref() == Some("error") {
        return Err(IngestError::Malformed(format!("gviz error: {:?}", resp.errors)));
    }
    let table = resp
        .table
        .ok_or_else(|| IngestError::Malformed(s!("gviz response has no table")))?;

    let mut rows = Vec::with_capacity(table.rows.len() + 1);

    // Unlabelled columns mean the sheet's header row came through as data;
    // then the first data row already plays the header.
    if table.cols.iter().any(|c| !c.label.trim().is_empty()) {
        rows.push(table.cols.into_iter().map(|c| c.label).collect());
    }

    for row in table.rows {
        rows.push(row.c.into_iter().map(cell_text).collect());
    }

    Ok(rows)
}

fn cell_text(cell: Option<Cell>) -> String {
    let Some(cell) = cell else { return s!() };
    match cell.v {
        Value::Null => cell.f.unwrap_or_default(),
        Value::String(s) => s,
        Value::Number(n) => number_text(&n),
        Value::Bool(b) => b.to_string(),
        other => other.to_string(),
    }
}

/// Sheets sends whole numbers as `12.0`; print those without the fraction.
fn number_text(n: &serde_json::Number) -> String {
    if let Some(i) = n.as_i64() {
        return i.to_string();
    }
    match n.as_f64() {
        Some(f) if f.fract() == 0.0 && f.abs() < 1e15 => format!("{}", f as i64),
        _ => n.to_string(),
    }
}
