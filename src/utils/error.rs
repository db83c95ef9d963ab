use thiserror::Error;

#[derive(Error, Debug)]
pub enum ProbeError {
    #[error("API request failed: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("HTTP {status} from {endpoint}")]
    HttpStatusError { endpoint: String, status: u16 },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Missing required config field: {field}")]
    MissingConfigError { field: String },

    #[error("Invalid value for {field}: '{value}' ({reason})")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Configuration validation failed for {field}: {message}")]
    ConfigValidationError { field: String, message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Transport,
    Protocol,
    Configuration,
    Io,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl ProbeError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            ProbeError::ApiError(_) => ErrorCategory::Transport,
            ProbeError::HttpStatusError { .. } => ErrorCategory::Protocol,
            ProbeError::SerializationError(_) => ErrorCategory::Protocol,
            ProbeError::IoError(_) => ErrorCategory::Io,
            ProbeError::ConfigError { .. }
            | ProbeError::MissingConfigError { .. }
            | ProbeError::InvalidConfigValueError { .. }
            | ProbeError::ConfigValidationError { .. } => ErrorCategory::Configuration,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            // 網路問題通常是暫時的，重跑一次即可
            ErrorCategory::Transport => ErrorSeverity::Medium,
            ErrorCategory::Protocol => ErrorSeverity::High,
            ErrorCategory::Io => ErrorSeverity::High,
            ErrorCategory::Configuration => ErrorSeverity::Critical,
        }
    }

    pub fn recovery_suggestion(&self) -> String {
        match self {
            ProbeError::ApiError(_) => {
                "Check that the target service is running and the base URL is reachable"
                    .to_string()
            }
            ProbeError::HttpStatusError { endpoint, status } => format!(
                "Endpoint {} answered {}. Verify the route exists on the service and that \
                 the server logs show no permission errors",
                endpoint, status
            ),
            ProbeError::SerializationError(_) => {
                "The service returned a body that is not valid JSON; check its logs".to_string()
            }
            ProbeError::IoError(_) => "Check file paths and permissions".to_string(),
            ProbeError::ConfigError { .. }
            | ProbeError::MissingConfigError { .. }
            | ProbeError::InvalidConfigValueError { .. }
            | ProbeError::ConfigValidationError { .. } => {
                "Fix the configuration value and run again".to_string()
            }
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self.category() {
            ErrorCategory::Transport => format!("Could not reach the service: {}", self),
            ErrorCategory::Protocol => format!("Unexpected service response: {}", self),
            ErrorCategory::Io => format!("File system problem: {}", self),
            ErrorCategory::Configuration => format!("Configuration problem: {}", self),
        }
    }
}

pub type Result<T> = std::result::Result<T, ProbeError>;
