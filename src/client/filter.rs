use std::collections::BTreeSet;

use super::reconcile::ViewParameters;
use crate::types::{CategoryFilter, FileRecord};

/// The rendered subset of the loaded records, in server order.
pub fn filter_view<'a>(records: &'a [FileRecord], view: &ViewParameters) -> Vec<&'a FileRecord> {
    let needle = view.search.to_lowercase();
    records
        .iter()
        .filter(|r| view.sub_category.matches(&r.extension))
        .filter(|r| needle.is_empty() || r.name.to_lowercase().contains(&needle))
        .collect()
}

/// Sorted distinct lower-cased extensions among loaded records of the active
/// category. Empty for `All`: the extension filter is offered per category only.
pub fn available_extensions(records: &[FileRecord], category: CategoryFilter) -> Vec<String> {
    if category == CategoryFilter::All {
        return Vec::new();
    }
    records
        .iter()
        .filter(|r| category.matches(r.category))
        .map(|r| r.extension.to_lowercase())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ViewSummary {
    pub count: usize,
    pub total_bytes: u64,
}

pub fn summarize(view: &[&FileRecord]) -> ViewSummary {
    ViewSummary { count: view.len(), total_bytes: view.iter().map(|r| r.size_bytes).sum() }
}
