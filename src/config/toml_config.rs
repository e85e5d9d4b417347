use crate::utils::error::{ModelError, Result};
use crate::utils::validation::{validate_non_empty_string, validate_one_of, Validate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::str::FromStr;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ToolConfig {
    #[serde(default)]
    pub output: OutputConfig,
    #[serde(default)]
    pub validation: ValidationConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OutputConfig {
    pub format: Option<String>,
    pub pretty: Option<bool>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ValidationConfig {
    pub strict: Option<bool>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub level: Option<String>,
    pub json: Option<bool>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Json,
    Csv,
}

impl OutputFormat {
    pub const NAMES: [&'static str; 2] = ["json", "csv"];
}

impl FromStr for OutputFormat {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self> {
        validate_one_of("output.format", s, &Self::NAMES)?;
        Ok(match s {
            "csv" => OutputFormat::Csv,
            _ => OutputFormat::Json,
        })
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Json => f.write_str("json"),
            OutputFormat::Csv => f.write_str("csv"),
        }
    }
}

impl ToolConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| ModelError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${LOG_LEVEL})，找不到的變數保留原樣
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| ModelError::ConfigError {
            message: format!("invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn output_format(&self) -> Result<OutputFormat> {
        self.output.format.as_deref().unwrap_or("json").parse()
    }

    pub fn pretty(&self) -> bool {
        self.output.pretty.unwrap_or(true)
    }

    pub fn strict(&self) -> bool {
        self.validation.strict.unwrap_or(false)
    }

    pub fn log_level(&self) -> Option<&str> {
        self.logging.level.as_deref()
    }

    pub fn json_logs(&self) -> bool {
        self.logging.json.unwrap_or(false)
    }
}

impl Validate for ToolConfig {
    fn validate(&self) -> Result<()> {
        self.output_format()?;
        if let Some(level) = self.log_level() {
            validate_non_empty_string("logging.level", level)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ToolConfig::from_toml_str("").unwrap();
        assert_eq!(config.output_format().unwrap(), OutputFormat::Json);
        assert!(config.pretty());
        assert!(!config.strict());
        assert_eq!(config.log_level(), None);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_full_config() {
        let config = ToolConfig::from_toml_str(
            r#"
[output]
format = "csv"
pretty = false

[validation]
strict = true

[logging]
level = "xnat_models=trace"
json = true
"#,
        )
        .unwrap();

        assert_eq!(config.output_format().unwrap(), OutputFormat::Csv);
        assert!(!config.pretty());
        assert!(config.strict());
        assert_eq!(config.log_level(), Some("xnat_models=trace"));
        assert!(config.json_logs());
    }

    #[test]
    fn test_env_substitution() {
        std::env::set_var("XNAT_MODELS_TEST_FORMAT", "csv");
        let config = ToolConfig::from_toml_str(
            r#"
[output]
format = "${XNAT_MODELS_TEST_FORMAT}"

[logging]
level = "${XNAT_MODELS_TEST_UNSET_VARIABLE}"
"#,
        )
        .unwrap();

        assert_eq!(config.output_format().unwrap(), OutputFormat::Csv);
        assert_eq!(config.log_level(), Some("${XNAT_MODELS_TEST_UNSET_VARIABLE}"));
    }

    #[test]
    fn test_invalid_values() {
        let config = ToolConfig::from_toml_str("[output]\nformat = \"tsv\"\n").unwrap();
        assert!(matches!(
            config.validate(),
            Err(ModelError::InvalidConfigValue { .. })
        ));

        let config = ToolConfig::from_toml_str("[logging]\nlevel = \" \"\n").unwrap();
        assert!(config.validate().is_err());

        assert!(matches!(
            ToolConfig::from_toml_str("[output\nformat = 1"),
            Err(ModelError::ConfigError { .. })
        ));
    }
}
