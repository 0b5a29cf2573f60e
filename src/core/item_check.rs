//! Shape checks for menu records arriving as untyped JSON.
//!
//! Every public operation reads its input through these helpers, so each one
//! checks exactly the fields it uses. Failures come back as an [`InvalidItem`]
//! reason; the operations turn that into their empty/absent result.

use crate::domain::model::{Diet, MenuItem};
use serde_json::{Map, Value};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum InvalidItem {
    #[error("record is not an object")]
    NotAnObject,

    #[error("missing field '{0}'")]
    MissingField(&'static str),

    #[error("field '{field}' must be {expected}")]
    WrongType {
        field: &'static str,
        expected: &'static str,
    },

    #[error("name is empty")]
    EmptyName,

    #[error("items list is empty")]
    EmptyItems,

    #[error("items[{index}] is not text")]
    NonTextEntry { index: usize },

    #[error("price is negative")]
    NegativePrice,
}

pub type ItemCheck<T> = std::result::Result<T, InvalidItem>;

/// Fields needed to price a record: used by receipts and statistics.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PricedEntry<'a> {
    pub name: &'a str,
    pub price: f64,
    pub diet: Diet,
}

/// Fields needed to match a record against a query.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchableEntry<'a> {
    pub name: &'a str,
    pub items: Vec<&'a str>,
}

/// A non-empty JSON array, or `None`.
pub fn as_batch(value: &Value) -> Option<&[Value]> {
    match value {
        Value::Array(elements) if !elements.is_empty() => Some(elements.as_slice()),
        _ => None,
    }
}

pub fn as_record(value: &Value) -> ItemCheck<&Map<String, Value>> {
    value.as_object().ok_or(InvalidItem::NotAnObject)
}

pub fn name_of(record: &Map<String, Value>) -> ItemCheck<&str> {
    match record.get("name") {
        None => Err(InvalidItem::MissingField("name")),
        Some(Value::String(name)) if name.is_empty() => Err(InvalidItem::EmptyName),
        Some(Value::String(name)) => Ok(name.as_str()),
        Some(_) => Err(InvalidItem::WrongType {
            field: "name",
            expected: "text",
        }),
    }
}

pub fn items_of(record: &Map<String, Value>) -> ItemCheck<Vec<&str>> {
    let entries = match record.get("items") {
        None => return Err(InvalidItem::MissingField("items")),
        Some(Value::Array(entries)) => entries,
        Some(_) => {
            return Err(InvalidItem::WrongType {
                field: "items",
                expected: "a list of text",
            })
        }
    };

    if entries.is_empty() {
        return Err(InvalidItem::EmptyItems);
    }

    entries
        .iter()
        .enumerate()
        .map(|(index, entry)| entry.as_str().ok_or(InvalidItem::NonTextEntry { index }))
        .collect()
}

pub fn price_of(record: &Map<String, Value>) -> ItemCheck<f64> {
    let price = match record.get("price") {
        None => return Err(InvalidItem::MissingField("price")),
        Some(value) => value.as_f64().ok_or(InvalidItem::WrongType {
            field: "price",
            expected: "a number",
        })?,
    };

    if price < 0.0 {
        return Err(InvalidItem::NegativePrice);
    }

    // -0.0 + 0.0 == +0.0，避免輸出 "-0.00"
    Ok(price + 0.0)
}

pub fn veg_flag_of(record: &Map<String, Value>) -> ItemCheck<bool> {
    match record.get("isVeg") {
        None => Err(InvalidItem::MissingField("isVeg")),
        Some(Value::Bool(flag)) => Ok(*flag),
        Some(_) => Err(InvalidItem::WrongType {
            field: "isVeg",
            expected: "a boolean",
        }),
    }
}

/// Lenient three-way read of `isVeg`; never fails.
pub fn diet_of(record: &Map<String, Value>) -> Diet {
    match record.get("isVeg") {
        Some(Value::Bool(flag)) => Diet::from(*flag),
        _ => Diet::Unspecified,
    }
}

/// Full validation: all four fields present with the right types.
pub fn check_item(value: &Value) -> ItemCheck<MenuItem> {
    let record = as_record(value)?;
    let name = name_of(record)?;
    let items = items_of(record)?;
    let price = price_of(record)?;
    let is_veg = veg_flag_of(record)?;

    Ok(MenuItem {
        name: name.to_string(),
        items: items.into_iter().map(str::to_string).collect(),
        price,
        is_veg,
    })
}

pub fn check_priced_entry(value: &Value) -> ItemCheck<PricedEntry<'_>> {
    let record = as_record(value)?;
    Ok(PricedEntry {
        name: name_of(record)?,
        price: price_of(record)?,
        diet: diet_of(record),
    })
}

pub fn check_searchable(value: &Value) -> ItemCheck<SearchableEntry<'_>> {
    let record = as_record(value)?;
    Ok(SearchableEntry {
        name: name_of(record)?,
        items: items_of(record)?,
    })
}

impl TryFrom<&Value> for MenuItem {
    type Error = InvalidItem;

    fn try_from(value: &Value) -> ItemCheck<Self> {
        check_item(value)
    }
}
