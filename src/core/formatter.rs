use crate::core::item_check::{as_batch, check_item, check_priced_entry, PricedEntry};
use crate::domain::model::{format_fixed_price, format_plain_price, MenuItem};
use serde_json::Value;

/// One-line description of a single record, or `""` when the record is not a
/// valid menu item.
pub fn describe(item: &Value) -> String {
    match check_item(item) {
        Ok(item) => item.description(),
        Err(reason) => {
            tracing::debug!("describe: rejected record: {}", reason);
            String::new()
        }
    }
}

/// Multi-line receipt for `customer`, or `""` when the customer name is empty,
/// the batch is not a non-empty array, or any record lacks a usable name/price.
pub fn receipt(customer: &str, items: &Value) -> String {
    if customer.is_empty() {
        tracing::debug!("receipt: empty customer name");
        return String::new();
    }

    let Some(batch) = as_batch(items) else {
        tracing::debug!("receipt: items is not a non-empty list");
        return String::new();
    };

    let mut entries = Vec::with_capacity(batch.len());
    for (index, value) in batch.iter().enumerate() {
        match check_priced_entry(value) {
            Ok(entry) => entries.push(entry),
            Err(reason) => {
                // 任一筆壞資料就整張收據作廢
                tracing::debug!("receipt: rejected record #{}: {}", index, reason);
                return String::new();
            }
        }
    }

    render_receipt(customer, &entries)
}

/// Receipt for items that are already validated.
pub fn receipt_for_items(customer: &str, items: &[MenuItem]) -> String {
    if customer.is_empty() || items.is_empty() {
        return String::new();
    }

    let entries: Vec<PricedEntry<'_>> = items
        .iter()
        .map(|item| PricedEntry {
            name: &item.name,
            price: item.price,
            diet: item.diet(),
        })
        .collect();

    render_receipt(customer, &entries)
}

fn render_receipt(customer: &str, entries: &[PricedEntry<'_>]) -> String {
    let total: f64 = entries.iter().map(|entry| entry.price).sum();

    let mut lines = Vec::with_capacity(entries.len() + 6);
    lines.push("THALI RECEIPT".to_string());
    lines.push("---".to_string());
    lines.push(format!("Customer: {}", customer.to_uppercase()));
    lines.extend(
        entries
            .iter()
            .map(|entry| format!("- {} x Rs.{}", entry.name, format_plain_price(entry.price))),
    );
    lines.push("---".to_string());
    lines.push(format!("Total: Rs.{}", format_fixed_price(total)));
    lines.push(format!("Items: {}", entries.len()));

    lines.join("\n")
}
