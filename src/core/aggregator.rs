use crate::core::item_check::{as_batch, check_priced_entry, PricedEntry};
use crate::domain::model::{format_fixed_price, Diet, MenuItem, MenuStats};
use serde_json::Value;

/// Summary statistics over a batch of records.
///
/// `None` when `items` is not a non-empty array, or when any record lacks a
/// non-empty `name` or a non-negative `price`. A non-boolean `isVeg` is not a
/// rejection: such records count towards `total_count` only.
pub fn summarize(items: &Value) -> Option<MenuStats> {
    let Some(batch) = as_batch(items) else {
        tracing::debug!("summarize: items is not a non-empty list");
        return None;
    };

    let mut entries = Vec::with_capacity(batch.len());
    for (index, value) in batch.iter().enumerate() {
        match check_priced_entry(value) {
            Ok(entry) => entries.push(entry),
            Err(reason) => {
                tracing::debug!("summarize: rejected record #{}: {}", index, reason);
                return None;
            }
        }
    }

    aggregate(&entries)
}

pub fn summarize_items(items: &[MenuItem]) -> Option<MenuStats> {
    let entries: Vec<PricedEntry<'_>> = items
        .iter()
        .map(|item| PricedEntry {
            name: &item.name,
            price: item.price,
            diet: item.diet(),
        })
        .collect();

    aggregate(&entries)
}

fn aggregate(entries: &[PricedEntry<'_>]) -> Option<MenuStats> {
    let first = entries.first()?;

    let mut veg_count = 0;
    let mut non_veg_count = 0;
    let mut total = 0.0;
    let mut cheapest = first.price;
    let mut costliest = first.price;
    let mut names = Vec::with_capacity(entries.len());

    for entry in entries {
        match entry.diet {
            Diet::Veg => veg_count += 1,
            Diet::NonVeg => non_veg_count += 1,
            Diet::Unspecified => {}
        }
        total += entry.price;
        cheapest = cheapest.min(entry.price);
        costliest = costliest.max(entry.price);
        names.push(entry.name.to_string());
    }

    Some(MenuStats {
        total_count: entries.len(),
        veg_count,
        non_veg_count,
        average_price: format_fixed_price(total / entries.len() as f64),
        cheapest,
        costliest,
        names,
    })
}
