use thiserror::Error;

#[derive(Error, Debug)]
pub enum AnalyzerError {
    #[error("Directory {path} does not exist")]
    DirectoryNotFound { path: String },

    #[error("{path} is not a directory")]
    NotADirectory { path: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Configuration validation failed for '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Input,
    Configuration,
    Processing,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    High,
    Critical,
}

impl AnalyzerError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            AnalyzerError::DirectoryNotFound { .. } | AnalyzerError::NotADirectory { .. } => {
                ErrorCategory::Input
            }
            AnalyzerError::ConfigError { .. }
            | AnalyzerError::ConfigValidationError { .. }
            | AnalyzerError::InvalidConfigValueError { .. }
            | AnalyzerError::MissingConfigError { .. } => ErrorCategory::Configuration,
            AnalyzerError::SerializationError(_) | AnalyzerError::CsvError(_) => {
                ErrorCategory::Processing
            }
            AnalyzerError::IoError(_) => ErrorCategory::System,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Input | ErrorCategory::Configuration => ErrorSeverity::High,
            ErrorCategory::Processing => ErrorSeverity::High,
            ErrorCategory::System => ErrorSeverity::Critical,
        }
    }

    /// 給終端使用者看的訊息
    pub fn user_friendly_message(&self) -> String {
        match self {
            AnalyzerError::DirectoryNotFound { path } => {
                format!("Directory '{}' does not exist", path)
            }
            AnalyzerError::NotADirectory { path } => {
                format!("'{}' is a file, not a directory", path)
            }
            AnalyzerError::IoError(e) => format!("File system operation failed: {}", e),
            AnalyzerError::SerializationError(e) => format!("Could not render the JSON report: {}", e),
            AnalyzerError::CsvError(e) => format!("Could not render the CSV report: {}", e),
            AnalyzerError::ConfigError { message } => format!("Configuration problem: {}", message),
            AnalyzerError::ConfigValidationError { field, message } => {
                format!("Configuration field '{}' is invalid: {}", field, message)
            }
            AnalyzerError::InvalidConfigValueError {
                field,
                value,
                reason,
            } => format!("'{}' is not a valid value for '{}': {}", value, field, reason),
            AnalyzerError::MissingConfigError { field } => {
                format!("Configuration field '{}' is required", field)
            }
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            AnalyzerError::DirectoryNotFound { .. } => "Check the path for typos and make sure it is mounted",
            AnalyzerError::NotADirectory { .. } => "Pass the directory that contains the file instead",
            AnalyzerError::IoError(_) => "Check file permissions and available disk space for the output directory",
            AnalyzerError::SerializationError(_) | AnalyzerError::CsvError(_) => {
                "Re-run with --verbose and report the file that triggered the failure"
            }
            AnalyzerError::ConfigError { .. }
            | AnalyzerError::ConfigValidationError { .. }
            | AnalyzerError::InvalidConfigValueError { .. }
            | AnalyzerError::MissingConfigError { .. } => {
                "Review the command line arguments or the TOML configuration file"
            }
        }
    }

    /// 依嚴重程度決定程序結束碼
    pub fn exit_code(&self) -> i32 {
        match self.severity() {
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        }
    }
}

pub type Result<T> = std::result::Result<T, AnalyzerError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_input_errors_exit_with_one() {
        let err = AnalyzerError::DirectoryNotFound {
            path: "/nonexistent".to_string(),
        };
        assert_eq!(err.category(), ErrorCategory::Input);
        assert_eq!(err.exit_code(), 1);
        assert!(err.to_string().contains("does not exist"));
    }

    #[test]
    fn test_io_errors_are_critical() {
        let err = AnalyzerError::from(std::io::Error::new(
            std::io::ErrorKind::PermissionDenied,
            "denied",
        ));
        assert_eq!(err.severity(), ErrorSeverity::Critical);
        assert_eq!(err.exit_code(), 3);
    }

    #[test]
    fn test_config_errors_exit_with_one() {
        let err = AnalyzerError::ConfigError {
            message: "report names collide".to_string(),
        };
        assert_eq!(err.category(), ErrorCategory::Configuration);
        assert_eq!(err.severity(), ErrorSeverity::High);
        assert_eq!(err.exit_code(), 1);
    }
}
