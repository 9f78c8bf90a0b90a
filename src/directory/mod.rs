//! Worker directory browsing.
//!
//! Provides the filter/sort transform applied to the worker directory.

mod listing;

pub use listing::{DirectoryQuery, SortKey, list_workers};
