use crate::app::convert::ModelKind;
use crate::utils::error::Result;
use crate::utils::validation::{validate_path, Validate};
use clap::{Args, Parser, Subcommand};

#[derive(Debug, Clone, Parser)]
#[command(name = "xnat-models")]
#[command(about = "Convert XNAT wire mappings through typed, validated models")]
pub struct CliConfig {
    #[command(subcommand)]
    pub command: Command,

    /// Path to a TOML configuration file
    #[arg(long, global = true)]
    pub config: Option<String>,

    #[arg(short, long, global = true, help = "Enable verbose output")]
    pub verbose: bool,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Parse wire mappings, validate them and print the normalised mappings
    Convert(ConvertArgs),
    /// Print the field table of a model
    Schema {
        #[arg(long, value_enum)]
        model: ModelKind,
    },
}

#[derive(Debug, Clone, Args)]
pub struct ConvertArgs {
    #[arg(long, value_enum)]
    pub model: ModelKind,

    /// JSON file holding one mapping or a list of mappings, `-` for stdin
    #[arg(long, default_value = "-")]
    pub input: String,

    /// Output format (json or csv); overrides the configuration file
    #[arg(long)]
    pub format: Option<String>,

    /// Fail when any converted record is invalid
    #[arg(long)]
    pub strict: bool,
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        if let Some(config) = &self.config {
            validate_path("config", config)?;
        }
        if let Command::Convert(args) = &self.command {
            validate_path("input", &args.input)?;
            if let Some(format) = &args.format {
                format.parse::<crate::config::toml_config::OutputFormat>()?;
            }
        }
        Ok(())
    }
}
