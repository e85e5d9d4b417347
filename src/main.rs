use clap::Parser;
use std::io::Read;
use xnat_models::app::convert::{self, ModelKind};
use xnat_models::config::{Command, ConvertArgs, OutputFormat, ToolConfig};
use xnat_models::core::{FieldDefault, FieldKind};
use xnat_models::utils::{logger, validation::Validate};
use xnat_models::{CliConfig, ModelError};

fn main() {
    let config = CliConfig::parse();

    // 載入設定檔（可選）
    let tool_config = match &config.config {
        Some(path) => match ToolConfig::from_file(path) {
            Ok(tool_config) => tool_config,
            Err(e) => {
                eprintln!("❌ Failed to load config file '{}': {}", path, e);
                eprintln!("💡 Make sure the file exists and is valid TOML format");
                std::process::exit(e.exit_code());
            }
        },
        None => ToolConfig::default(),
    };

    // 初始化日誌
    if tool_config.json_logs() {
        logger::init_json_logger(tool_config.log_level());
    } else {
        logger::init_cli_logger(config.verbose, tool_config.log_level());
    }

    tracing::debug!("CLI config: {:?}", config);

    // 驗證配置
    if let Err(e) = config.validate().and_then(|_| tool_config.validate()) {
        tracing::error!("❌ Configuration validation failed: {}", e);
        eprintln!("❌ {}", e);
        std::process::exit(e.exit_code());
    }

    let outcome = match &config.command {
        Command::Convert(args) => run_convert(args, &tool_config),
        Command::Schema { model } => {
            print_schema(*model);
            Ok(())
        }
    };

    if let Err(e) = outcome {
        tracing::error!("❌ {} (Category: {:?})", e, e.category());
        eprintln!("❌ {}", e);
        std::process::exit(e.exit_code());
    }
}

fn run_convert(args: &ConvertArgs, tool_config: &ToolConfig) -> xnat_models::Result<()> {
    let format = match &args.format {
        Some(format) => format.parse::<OutputFormat>()?,
        None => tool_config.output_format()?,
    };

    let input = read_input(&args.input)?;
    let value: serde_json::Value = serde_json::from_str(&input)?;
    let records = convert::convert(args.model, value)?;

    let invalid = records.iter().filter(|record| !record.valid).count();
    if invalid > 0 {
        tracing::warn!("⚠️ {} of {} record(s) failed validation", invalid, records.len());
    }

    println!("{}", convert::render(&records, format, tool_config.pretty())?);

    if invalid > 0 && (args.strict || tool_config.strict()) {
        std::process::exit(1);
    }

    tracing::info!("✅ Converted {} record(s)", records.len());
    Ok(())
}

fn read_input(input: &str) -> Result<String, ModelError> {
    if input == "-" {
        let mut content = String::new();
        std::io::stdin().read_to_string(&mut content)?;
        return Ok(content);
    }
    tracing::debug!("📁 Reading mappings from: {}", input);
    Ok(std::fs::read_to_string(input)?)
}

fn print_schema(model: ModelKind) {
    println!("{}", model);
    for field in model.schema().fields() {
        let default = match field.alias().map(|alias| alias.default()) {
            None | Some(FieldDefault::Required) => "required".to_string(),
            Some(FieldDefault::Unknown) => "unknown".to_string(),
            Some(FieldDefault::Text(text)) => format!("{:?}", text),
            Some(FieldDefault::Integer(number)) => number.to_string(),
            Some(FieldDefault::EmptyList) => "[]".to_string(),
        };
        let nested = match field.kind() {
            FieldKind::Model(schema) => format!(" -> {}", schema().model()),
            FieldKind::Value => String::new(),
        };
        println!(
            "  {:<16} {:<32} {}{}",
            field.name(),
            field.wire_key(),
            default,
            nested
        );
    }
}
