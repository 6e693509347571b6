use thiserror::Error;

#[derive(Error, Debug)]
pub enum FilterError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Source '{path}' is not valid UTF-8: {source}")]
    EncodingError {
        path: String,
        #[source]
        source: std::string::FromUtf8Error,
    },

    #[error("Configuration error in {field}: {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value for {field} ('{value}'): {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Io,
    Data,
    Configuration,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl FilterError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            FilterError::IoError(_) => ErrorCategory::Io,
            FilterError::EncodingError { .. } => ErrorCategory::Data,
            FilterError::ConfigValidationError { .. }
            | FilterError::InvalidConfigValueError { .. } => ErrorCategory::Configuration,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            FilterError::IoError(_) => ErrorSeverity::Critical,
            FilterError::EncodingError { .. }
            | FilterError::ConfigValidationError { .. }
            | FilterError::InvalidConfigValueError { .. } => ErrorSeverity::High,
        }
    }

    pub fn recovery_suggestion(&self) -> String {
        match self {
            FilterError::IoError(e) => match e.kind() {
                std::io::ErrorKind::NotFound => {
                    "Check that the source filter list exists at the given path".to_string()
                }
                std::io::ErrorKind::PermissionDenied => {
                    "Check read permission on the source and write permission on the output directory"
                        .to_string()
                }
                _ => "Check the input and output paths and try again".to_string(),
            },
            FilterError::EncodingError { .. } => {
                "Re-save the filter list as UTF-8 before running the transform".to_string()
            }
            FilterError::ConfigValidationError { field, .. }
            | FilterError::InvalidConfigValueError { field, .. } => {
                format!("Fix the '{}' setting in your configuration", field)
            }
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            FilterError::IoError(e) => format!("File access failed: {}", e),
            FilterError::EncodingError { path, .. } => {
                format!("Filter list '{}' could not be decoded as UTF-8", path)
            }
            FilterError::ConfigValidationError { field, message } => {
                format!("Configuration problem in '{}': {}", field, message)
            }
            FilterError::InvalidConfigValueError { field, reason, .. } => {
                format!("Invalid setting '{}': {}", field, reason)
            }
        }
    }

    /// 依嚴重程度決定程式結束碼
    pub fn exit_code(&self) -> i32 {
        match self.severity() {
            ErrorSeverity::Low => 0,
            ErrorSeverity::Medium => 2,
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        }
    }
}

pub type Result<T> = std::result::Result<T, FilterError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_io_error_is_critical() {
        let err = FilterError::from(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            "explicit.txt",
        ));
        assert_eq!(err.category(), ErrorCategory::Io);
        assert_eq!(err.severity(), ErrorSeverity::Critical);
        assert_eq!(err.exit_code(), 3);
        assert!(err.recovery_suggestion().contains("exists"));
    }

    #[test]
    fn test_config_error_messages_name_the_field() {
        let err = FilterError::InvalidConfigValueError {
            field: "source.path".to_string(),
            value: String::new(),
            reason: "Path cannot be empty".to_string(),
        };
        assert_eq!(err.category(), ErrorCategory::Configuration);
        assert_eq!(err.exit_code(), 1);
        assert!(err.user_friendly_message().contains("source.path"));
        assert!(err.recovery_suggestion().contains("source.path"));
    }
}
