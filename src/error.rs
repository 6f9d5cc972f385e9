//! Error types for the `farewatch` pipeline

use thiserror::Error;

/// Main error type for a fare-watch run
#[derive(Error, Debug)]
pub enum FareWatchError {
    /// Configuration-related errors
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// Pricing-provider authentication errors
    #[error("Authentication error: {message}")]
    Auth { message: String },

    /// Pricing-provider API errors (non-2xx responses, rate limits)
    #[error("API error: {message}")]
    Api { message: String },

    /// Response body parsing errors
    #[error("Parse error: {message}")]
    Parse { message: String },

    /// Transport-level errors
    #[error("Network error: {source}")]
    Network {
        #[from]
        source: reqwest::Error,
    },

    /// Notification delivery errors
    #[error("Notification error: {message}")]
    Notify { message: String },
}

impl FareWatchError {
    /// Create a new configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a new authentication error
    pub fn auth<S: Into<String>>(message: S) -> Self {
        Self::Auth {
            message: message.into(),
        }
    }

    /// Create a new API error
    pub fn api<S: Into<String>>(message: S) -> Self {
        Self::Api {
            message: message.into(),
        }
    }

    /// Create a new parse error
    pub fn parse<S: Into<String>>(message: S) -> Self {
        Self::Parse {
            message: message.into(),
        }
    }

    /// Create a new notification error
    pub fn notify<S: Into<String>>(message: S) -> Self {
        Self::Notify {
            message: message.into(),
        }
    }
}
