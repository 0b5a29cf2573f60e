//! Menu documents on disk, normalised to a JSON array of records.
//!
//! The loader does not validate records; the operations do that themselves.

use crate::utils::error::{Result, ThaliError};
use serde::Deserialize;
use serde_json::{json, Map, Value};
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuDocument {
    Json,
    Toml,
    Csv,
}

impl MenuDocument {
    pub const EXTENSIONS: [&'static str; 3] = ["json", "toml", "csv"];

    pub fn from_path(path: &str) -> Result<Self> {
        let extension = Path::new(path)
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.to_ascii_lowercase());

        match extension.as_deref() {
            Some("json") => Ok(MenuDocument::Json),
            Some("toml") => Ok(MenuDocument::Toml),
            Some("csv") => Ok(MenuDocument::Csv),
            _ => Err(ThaliError::MenuFormatError {
                message: format!(
                    "cannot tell the format of '{}'. Expected one of: {}",
                    path,
                    Self::EXTENSIONS.join(", ")
                ),
            }),
        }
    }
}

#[derive(Debug, Deserialize)]
struct CsvRow {
    name: String,
    items: String,
    price: f64,
    #[serde(rename = "isVeg", alias = "is_veg")]
    is_veg: Option<bool>,
}

pub fn parse_menu(data: &[u8], document: MenuDocument) -> Result<Value> {
    let menu = match document {
        MenuDocument::Json => {
            let value: Value = serde_json::from_slice(data)?;
            match value {
                Value::Array(_) => value,
                Value::Object(table) => take_thalis(table)?,
                _ => {
                    return Err(ThaliError::MenuFormatError {
                        message: "JSON menu must be a list or an object with a 'thalis' list"
                            .to_string(),
                    })
                }
            }
        }
        MenuDocument::Toml => {
            let content = std::str::from_utf8(data).map_err(|e| ThaliError::MenuFormatError {
                message: format!("TOML menu is not valid UTF-8: {}", e),
            })?;
            let table: Map<String, Value> = toml::from_str(content)?;
            take_thalis(table)?
        }
        MenuDocument::Csv => parse_csv(data)?,
    };

    tracing::debug!(
        "Parsed {:?} menu with {} records",
        document,
        menu.as_array().map(Vec::len).unwrap_or(0)
    );
    Ok(menu)
}

fn take_thalis(mut table: Map<String, Value>) -> Result<Value> {
    match table.remove("thalis") {
        Some(list @ Value::Array(_)) => Ok(list),
        Some(_) => Err(ThaliError::MenuFormatError {
            message: "'thalis' must be a list".to_string(),
        }),
        None => Err(ThaliError::MenuFormatError {
            message: "menu document has no 'thalis' list".to_string(),
        }),
    }
}

fn parse_csv(data: &[u8]) -> Result<Value> {
    let mut reader = csv::Reader::from_reader(data);
    let mut records = Vec::new();

    for row in reader.deserialize::<CsvRow>() {
        let row = row?;
        let items: Vec<&str> = row
            .items
            .split(';')
            .map(str::trim)
            .filter(|item| !item.is_empty())
            .collect();

        let mut record = json!({
            "name": row.name,
            "items": items,
            "price": row.price,
        });
        // 空白欄位代表未標示葷素
        if let (Some(is_veg), Some(fields)) = (row.is_veg, record.as_object_mut()) {
            fields.insert("isVeg".to_string(), Value::Bool(is_veg));
        }
        records.push(record);
    }

    Ok(Value::Array(records))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_from_path() {
        assert_eq!(MenuDocument::from_path("menu.json").unwrap(), MenuDocument::Json);
        assert_eq!(MenuDocument::from_path("a/b/Menu.TOML").unwrap(), MenuDocument::Toml);
        assert_eq!(MenuDocument::from_path("menu.csv").unwrap(), MenuDocument::Csv);
        assert!(MenuDocument::from_path("menu.yaml").is_err());
        assert!(MenuDocument::from_path("menu").is_err());
    }

    #[test]
    fn test_parse_json_list_and_wrapped() {
        let list = br#"[{"name": "A", "items": ["x"], "price": 10, "isVeg": true}]"#;
        let wrapped = br#"{"thalis": [{"name": "A", "items": ["x"], "price": 10, "isVeg": true}]}"#;
        let a = parse_menu(list, MenuDocument::Json).unwrap();
        let b = parse_menu(wrapped, MenuDocument::Json).unwrap();
        assert_eq!(a, b);
        assert!(parse_menu(b"42", MenuDocument::Json).is_err());
        assert!(parse_menu(b"{\"menu\": []}", MenuDocument::Json).is_err());
    }

    #[test]
    fn test_parse_toml() {
        let content = br#"
[[thalis]]
name = "Rajasthani Thali"
items = ["dal baati", "churma"]
price = 250
isVeg = true

[[thalis]]
name = "Hyderabadi Thali"
items = ["biryani"]
price = 320.5
isVeg = false
"#;
        let menu = parse_menu(content, MenuDocument::Toml).unwrap();
        assert_eq!(menu.as_array().unwrap().len(), 2);
        assert_eq!(menu[0]["name"], "Rajasthani Thali");
        assert_eq!(menu[1]["price"].as_f64(), Some(320.5));
        assert!(parse_menu(b"title = 'x'", MenuDocument::Toml).is_err());
    }

    #[test]
    fn test_parse_csv() {
        let content = b"name,items,price,isVeg\n\
Rajasthani Thali,dal baati; churma,250,true\n\
Mystery Thali,surprise,99.5,\n";
        let menu = parse_menu(content, MenuDocument::Csv).unwrap();
        assert_eq!(menu[0]["items"], json!(["dal baati", "churma"]));
        assert_eq!(menu[0]["isVeg"], json!(true));
        assert!(menu[1].get("isVeg").is_none());
    }

    #[test]
    fn test_parse_csv_bad_price() {
        let content = b"name,items,price,isVeg\nA,x,cheap,true\n";
        assert!(matches!(
            parse_menu(content, MenuDocument::Csv),
            Err(ThaliError::CsvError(_))
        ));
    }
}
