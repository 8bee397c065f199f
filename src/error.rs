//! Error types for the neoquest application.

use thiserror::Error;

/// The main error type for neoquest.
#[derive(Error, Debug)]
pub enum Error {
    /// IO errors (file operations, terminal, etc.)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Terminal/TUI related errors
    #[error("Terminal error: {0}")]
    Terminal(String),

    /// No wallet provider is installed or configured.
    #[error("no wallet provider available")]
    NoProvider,

    /// The user refused the connection request.
    #[error("connection denied by user")]
    ConnectionDenied,

    /// The provider is attached to a different network than configured.
    #[error("wrong network: expected magic {expected}, node reports {actual}")]
    ChainMismatch { expected: u32, actual: u32 },

    /// Any other provider failure, passed through unchanged.
    #[error("provider error: {description}")]
    Provider { description: String },

    /// JSON-RPC level errors returned by the node.
    #[error("RPC error {code}: {message}")]
    Rpc { code: i64, message: String },

    /// HTTP transport errors
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Channel communication errors
    #[error("Channel error: {0}")]
    Channel(String),

    /// Wallet/signing errors
    #[error("Wallet error: {0}")]
    Wallet(String),

    /// Invalid input or state
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

/// Alias for Result with our Error type.
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Create a new terminal error.
    pub fn terminal(msg: impl Into<String>) -> Self {
        Self::Terminal(msg.into())
    }

    /// Create a new config error.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create a new channel error.
    pub fn channel(msg: impl Into<String>) -> Self {
        Self::Channel(msg.into())
    }

    /// Create a new wallet error.
    pub fn wallet(msg: impl Into<String>) -> Self {
        Self::Wallet(msg.into())
    }

    /// Create a new invalid input error.
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    /// Create a new generic provider error.
    pub fn provider(description: impl Into<String>) -> Self {
        Self::Provider {
            description: description.into(),
        }
    }

    /// Create a new RPC error.
    pub fn rpc(code: i64, message: impl Into<String>) -> Self {
        Self::Rpc {
            code,
            message: message.into(),
        }
    }

    /// Check if this error is recoverable (user can retry).
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Self::Http(_) | Self::Rpc { .. } | Self::Channel(_) | Self::ConnectionDenied
        )
    }
}
