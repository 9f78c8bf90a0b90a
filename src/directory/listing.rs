//! Filtered, sorted views of the worker directory.

use std::cmp::Ordering;

use crate::storage::{JobCategory, WorkerProfile};

/// Ordering applied to a directory listing. Exactly one is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortKey {
    /// Name, A to Z
    #[default]
    NameAsc,
    /// Rating, high to low
    RatingDesc,
    /// Price, low to high
    PriceAsc,
    /// Price, high to low
    PriceDesc,
}

impl SortKey {
    fn compare(&self, a: &WorkerProfile, b: &WorkerProfile) -> Ordering {
        match self {
            SortKey::NameAsc => a.name.cmp(&b.name),
            SortKey::RatingDesc => b.rating.total_cmp(&a.rating),
            SortKey::PriceAsc => a.price.total_cmp(&b.price),
            SortKey::PriceDesc => b.price.total_cmp(&a.price),
        }
    }
}

impl std::fmt::Display for SortKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SortKey::NameAsc => write!(f, "Name (A-Z)"),
            SortKey::RatingDesc => write!(f, "Rating (High-Low)"),
            SortKey::PriceAsc => write!(f, "Price (Low-High)"),
            SortKey::PriceDesc => write!(f, "Price (High-Low)"),
        }
    }
}

/// Filters and ordering for a listing.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DirectoryQuery {
    /// Case-insensitive substring of the worker's name. Empty matches all.
    pub search: String,
    /// Exact job category, or every category when `None`.
    pub category: Option<JobCategory>,
    pub sort: SortKey,
}

impl DirectoryQuery {
    fn matches(&self, worker: &WorkerProfile, needle: &str) -> bool {
        let name_ok = needle.is_empty() || worker.name.to_lowercase().contains(needle);
        let category_ok = self.category.is_none_or(|c| worker.job_type == c);
        name_ok && category_ok
    }
}

/// Apply `query` to `workers`, returning a new listing.
///
/// The sort is stable: ties keep directory order.
pub fn list_workers(workers: &[WorkerProfile], query: &DirectoryQuery) -> Vec<WorkerProfile> {
    let needle = query.search.to_lowercase();
    let mut result: Vec<WorkerProfile> = workers
        .iter()
        .filter(|w| query.matches(w, &needle))
        .cloned()
        .collect();

    result.sort_by(|a, b| query.sort.compare(a, b));
    result
}
