use thiserror::Error;

#[derive(Error, Debug)]
pub enum ModelError {
    #[error("{model} already has the validator '{validator}' registered")]
    ValidatorAlreadyRegistered { model: String, validator: String },

    #[error("'{validator}' is not a validator of {model}")]
    NotAValidator { model: String, validator: String },

    #[error("{model}: missing required field '{field}'")]
    MissingRequiredField { model: String, field: String },

    #[error("{model}.{field}: unsupported value conversion: {reason}")]
    UnsupportedValueConversion {
        model: String,
        field: String,
        reason: String,
    },

    #[error("{model}.{field}: malformed mapping: {reason}")]
    MalformedMapping {
        model: String,
        field: String,
        reason: String,
    },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid configuration value for '{field}': '{value}' ({reason})")]
    InvalidConfigValue {
        field: String,
        value: String,
        reason: String,
    },
}

/// 錯誤類別，CLI 依此決定退出碼
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Model,
    Conversion,
    Configuration,
    System,
}

impl ModelError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            ModelError::ValidatorAlreadyRegistered { .. } | ModelError::NotAValidator { .. } => {
                ErrorCategory::Model
            }
            ModelError::MissingRequiredField { .. }
            | ModelError::UnsupportedValueConversion { .. }
            | ModelError::MalformedMapping { .. }
            | ModelError::Serialization(_) => ErrorCategory::Conversion,
            ModelError::ConfigError { .. } | ModelError::InvalidConfigValue { .. } => {
                ErrorCategory::Configuration
            }
            ModelError::Io(_) | ModelError::Csv(_) => ErrorCategory::System,
        }
    }

    pub fn exit_code(&self) -> i32 {
        match self.category() {
            ErrorCategory::Model => 1,
            ErrorCategory::Conversion => 2,
            ErrorCategory::Configuration => 3,
            ErrorCategory::System => 4,
        }
    }
}

pub type Result<T> = std::result::Result<T, ModelError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_categories() {
        let err = ModelError::MissingRequiredField {
            model: "Scan".to_string(),
            field: "id".to_string(),
        };
        assert_eq!(err.category(), ErrorCategory::Conversion);
        assert_eq!(err.to_string(), "Scan: missing required field 'id'");

        let err = ModelError::InvalidConfigValue {
            field: "output.format".to_string(),
            value: "tsv".to_string(),
            reason: "Unsupported value".to_string(),
        };
        assert_eq!(err.category(), ErrorCategory::Configuration);
        assert_eq!(err.exit_code(), 3);
    }
}
