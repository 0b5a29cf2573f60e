use crate::core::item_check::{as_batch, check_searchable, SearchableEntry};
use crate::domain::model::MenuItem;
use serde_json::Value;

impl SearchableEntry<'_> {
    /// `needle` must already be lowercased.
    fn contains(&self, needle: &str) -> bool {
        self.name.to_lowercase().contains(needle)
            || self
                .items
                .iter()
                .any(|item| item.to_lowercase().contains(needle))
    }
}

/// Records whose name or any sub-item contains `query`, ignoring case.
///
/// Returns references into `items` in their original order. Records without a
/// text `name` and a list-of-text `items` never match. Empty when `items` is
/// not a non-empty array or `query` is empty.
pub fn search<'a>(items: &'a Value, query: &str) -> Vec<&'a Value> {
    if query.is_empty() {
        return Vec::new();
    }
    let Some(batch) = as_batch(items) else {
        return Vec::new();
    };

    let needle = query.to_lowercase();
    batch
        .iter()
        .enumerate()
        .filter(|(index, value)| match check_searchable(value) {
            Ok(entry) => entry.contains(&needle),
            Err(reason) => {
                tracing::debug!("search: skipped record #{}: {}", index, reason);
                false
            }
        })
        .map(|(_, value)| value)
        .collect()
}

pub fn search_items<'a>(items: &'a [MenuItem], query: &str) -> Vec<&'a MenuItem> {
    if query.is_empty() {
        return Vec::new();
    }
    items.iter().filter(|item| item.matches(query)).collect()
}
