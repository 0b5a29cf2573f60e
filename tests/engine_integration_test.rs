use anyhow::Result;
use serde_json::Value;
use tempfile::TempDir;
use thali_menu::domain::ports::ConfigProvider;
use thali_menu::{LocalStorage, MenuCommand, MenuEngine, OutputFormat, ThaliError};

/// 測試用的固定配置
struct TestConfig {
    menu_path: String,
    format: OutputFormat,
    output_path: Option<String>,
}

impl ConfigProvider for TestConfig {
    fn menu_path(&self) -> &str {
        &self.menu_path
    }

    fn output_format(&self) -> OutputFormat {
        self.format
    }

    fn output_path(&self) -> Option<&str> {
        self.output_path.as_deref()
    }
}

fn engine_for(
    temp_dir: &TempDir,
    menu_file: &str,
    format: OutputFormat,
    output_path: Option<&str>,
) -> MenuEngine<LocalStorage, TestConfig> {
    let storage = LocalStorage::new(temp_dir.path().to_string_lossy().into_owned());
    let config = TestConfig {
        menu_path: menu_file.to_string(),
        format,
        output_path: output_path.map(str::to_string),
    };
    MenuEngine::new(storage, config)
}

const JSON_MENU: &str = r#"[
    {"name": "Rajasthani Thali", "items": ["dal baati", "churma"], "price": 250, "isVeg": true},
    {"name": "Kolhapuri Thali", "items": ["tambda rassa", "pandhra rassa"], "price": 290, "isVeg": false}
]"#;

const TOML_MENU: &str = r#"
[[thalis]]
name = "Rajasthani Thali"
items = ["dal baati", "churma"]
price = 250
isVeg = true

[[thalis]]
name = "Kolhapuri Thali"
items = ["tambda rassa", "pandhra rassa"]
price = 290
isVeg = false
"#;

const CSV_MENU: &str = "name,items,price,isVeg
Rajasthani Thali,dal baati;churma,250,true
Kolhapuri Thali,tambda rassa;pandhra rassa,290,false
";

#[tokio::test]
async fn test_all_menu_formats_load_the_same_records() -> Result<()> {
    let temp_dir = TempDir::new()?;
    tokio::fs::write(temp_dir.path().join("menu.json"), JSON_MENU).await?;
    tokio::fs::write(temp_dir.path().join("menu.toml"), TOML_MENU).await?;
    tokio::fs::write(temp_dir.path().join("menu.csv"), CSV_MENU).await?;

    let mut rendered = Vec::new();
    for file in ["menu.json", "menu.toml", "menu.csv"] {
        let engine = engine_for(&temp_dir, file, OutputFormat::Text, None);
        rendered.push(
            engine
                .run(&MenuCommand::Describe { index: None })
                .await?,
        );
    }

    let expected = "RAJASTHANI THALI (Veg) - Items: dal baati, churma - Rs.250.00\n\
                    KOLHAPURI THALI (Non-Veg) - Items: tambda rassa, pandhra rassa - Rs.290.00";
    for text in rendered {
        assert_eq!(text, expected);
    }
    Ok(())
}

#[tokio::test]
async fn test_stats_as_json() -> Result<()> {
    let temp_dir = TempDir::new()?;
    tokio::fs::write(temp_dir.path().join("menu.json"), JSON_MENU).await?;

    let engine = engine_for(&temp_dir, "menu.json", OutputFormat::Json, None);
    let rendered = engine.run(&MenuCommand::Stats).await?;
    let stats: Value = serde_json::from_str(&rendered)?;

    assert_eq!(stats["totalCount"], 2);
    assert_eq!(stats["vegCount"], 1);
    assert_eq!(stats["nonVegCount"], 1);
    assert_eq!(stats["averagePrice"], "270.00");
    Ok(())
}

#[tokio::test]
async fn test_receipt_written_to_output_file() -> Result<()> {
    let temp_dir = TempDir::new()?;
    tokio::fs::write(temp_dir.path().join("menu.csv"), CSV_MENU).await?;

    let engine = engine_for(
        &temp_dir,
        "menu.csv",
        OutputFormat::Text,
        Some("receipts/meera.txt"),
    );
    let rendered = engine
        .run(&MenuCommand::Receipt {
            customer: "Meera".to_string(),
        })
        .await?;

    let written = tokio::fs::read_to_string(temp_dir.path().join("receipts/meera.txt")).await?;
    assert_eq!(written, rendered);
    assert!(written.starts_with("THALI RECEIPT\n---\nCustomer: MEERA\n"));
    assert!(written.ends_with("Total: Rs.540.00\nItems: 2"));
    Ok(())
}

#[tokio::test]
async fn test_search_returns_matching_records_as_json() -> Result<()> {
    let temp_dir = TempDir::new()?;
    tokio::fs::write(temp_dir.path().join("menu.toml"), TOML_MENU).await?;

    let engine = engine_for(&temp_dir, "menu.toml", OutputFormat::Json, None);
    let rendered = engine
        .run(&MenuCommand::Search {
            query: "RASSA".to_string(),
        })
        .await?;
    let hits: Value = serde_json::from_str(&rendered)?;

    assert_eq!(hits.as_array().map(Vec::len), Some(1));
    assert_eq!(hits[0]["name"], "Kolhapuri Thali");
    Ok(())
}

#[tokio::test]
async fn test_rejected_input_renders_empty() -> Result<()> {
    let temp_dir = TempDir::new()?;
    tokio::fs::write(temp_dir.path().join("menu.json"), "[]").await?;

    let engine = engine_for(&temp_dir, "menu.json", OutputFormat::Text, None);
    assert_eq!(engine.run(&MenuCommand::Stats).await?, "");
    assert_eq!(
        engine
            .run(&MenuCommand::Receipt {
                customer: "Meera".to_string()
            })
            .await?,
        ""
    );
    Ok(())
}

#[tokio::test]
async fn test_missing_menu_file_is_io_error() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let engine = engine_for(&temp_dir, "absent.json", OutputFormat::Text, None);

    let result = engine.run(&MenuCommand::Stats).await;
    assert!(matches!(result, Err(ThaliError::IoError(_))));
    Ok(())
}

#[tokio::test]
async fn test_unknown_menu_extension_is_format_error() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let engine = engine_for(&temp_dir, "menu.yaml", OutputFormat::Text, None);

    let result = engine.load_menu().await;
    assert!(matches!(result, Err(ThaliError::MenuFormatError { .. })));
    Ok(())
}
