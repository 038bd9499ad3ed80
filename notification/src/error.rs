use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for notification operations
pub type Result<T> = std::result::Result<T, NotifyError>;

/// Errors raised while building or delivering a release notification
#[derive(Debug, Error)]
pub enum NotifyError {
    #[error("Release body is missing or empty")]
    MissingInput,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Configuration parse error: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Configuration file not found: {path}")]
    ConfigNotFound { path: PathBuf },

    #[error("Invalid configuration: {message}")]
    InvalidConfig { message: String },

    #[error("Invalid release event: {message}")]
    InvalidEvent { message: String },

    #[error("Webhook rejected the notification with status {status}: {body}")]
    DeliveryFailed { status: u16, body: String },

    #[error("Converter service failed: {message}")]
    Converter { message: String },
}

impl NotifyError {
    /// Create a new invalid configuration error
    pub fn invalid_config<S: Into<String>>(message: S) -> Self {
        Self::InvalidConfig {
            message: message.into(),
        }
    }

    /// Create a new invalid event error
    pub fn invalid_event<S: Into<String>>(message: S) -> Self {
        Self::InvalidEvent {
            message: message.into(),
        }
    }

    /// Create a new delivery failure from a rejected webhook response
    pub fn delivery_failed<S: Into<String>>(status: u16, body: S) -> Self {
        Self::DeliveryFailed {
            status,
            body: body.into(),
        }
    }

    /// Create a new converter service error
    pub fn converter<S: Into<String>>(message: S) -> Self {
        Self::Converter {
            message: message.into(),
        }
    }

    /// Whether the error happened at the delivery boundary rather than in assembly
    #[must_use]
    pub fn is_delivery_failure(&self) -> bool {
        matches!(self, Self::DeliveryFailed { .. } | Self::Http(_))
    }

    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::MissingInput => {
                "The release has no changelog body. Add release notes and publish again".to_string()
            }
            Self::ConfigNotFound { path } => {
                format!("Configuration file not found at: {}", path.display())
            }
            Self::DeliveryFailed { status, body } if body.is_empty() => {
                format!("Webhook rejected the notification with status {status}")
            }
            _ => self.to_string(),
        }
    }
}
