use clap::Parser;
use thali_menu::core::ConfigProvider;
use thali_menu::utils::error::{ErrorSeverity, ThaliError};
use thali_menu::utils::{logger, validation::Validate};
use thali_menu::{CliConfig, LocalStorage, MenuEngine, TomlConfig};

fn exit_with(e: &ThaliError) -> ! {
    tracing::error!(
        "❌ thali failed: {} (Category: {:?}, Severity: {:?})",
        e,
        e.category(),
        e.severity()
    );
    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 Suggestion: {}", e.recovery_suggestion());

    let exit_code = match e.severity() {
        ErrorSeverity::Low | ErrorSeverity::Medium => 2,
        ErrorSeverity::High => 1,
        ErrorSeverity::Critical => 3,
    };
    std::process::exit(exit_code);
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let mut config = CliConfig::parse();

    // 初始化日誌
    if config.log_json {
        logger::init_json_logger(config.verbose);
    } else {
        logger::init_cli_logger(config.verbose);
    }

    tracing::debug!("CLI config: {:?}", config);

    // 設定檔的值只補命令列沒給的部分
    if let Some(path) = config.config.clone() {
        tracing::info!("📁 Loading settings from: {}", path);
        let file = match TomlConfig::from_file(&path) {
            Ok(file) => file,
            Err(e) => exit_with(&e),
        };
        if let Err(e) = file.validate() {
            exit_with(&e);
        }
        config.apply_file(&file);
    }

    if let Err(e) = config.validate() {
        exit_with(&e);
    }

    let command = match config.menu_command() {
        Ok(command) => command,
        Err(e) => exit_with(&e),
    };

    let write_to_file = config.output_path().is_some();
    let engine = MenuEngine::new(LocalStorage::new(".".to_string()), config);

    match engine.run(&command).await {
        Ok(rendered) => {
            if !write_to_file {
                println!("{}", rendered);
            }
        }
        Err(e) => exit_with(&e),
    }

    Ok(())
}
