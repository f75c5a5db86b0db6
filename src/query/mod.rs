// src/query/mod.rs
//! Query engine: (snapshot, filters) → ordered subset.
//!
//! Everything here is a pure function of its inputs except the two small
//! state holders a frontend needs around it: `Debouncer` for the search box
//! and `Paginator` for page anchoring. `view::DirectoryView` composes them.

pub mod debounce;
pub mod facets;
pub mod filter;
pub mod paginate;

pub use debounce::Debouncer;
pub use facets::Facets;
pub use filter::{Filters, SortOrder, query, select};
pub use paginate::{Paginator, total_pages};
