//! Error handling for the SonarQube exporter crate.

/// A specialized `Result` type for exporter operations.
pub type Result<T> = std::result::Result<T, ExporterError>;

/// The main error type for exporter operations.
#[derive(Debug, thiserror::Error)]
pub enum ExporterError {
    /// The remote service could not be reached, or answered with a non-2xx status
    #[error("Transport error: {0}")]
    Transport(String),

    /// A response body did not match the expected structure
    #[error("Failed to decode response: {0}")]
    Decode(String),

    /// A derived field did not contain the expected value
    #[error("Failed to parse field: {0}")]
    Parse(String),

    /// Samples could not be encoded into the exposition format
    #[error("Encoding error: {0}")]
    Encode(#[from] prometheus::Error),

    /// I/O operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Web server error
    #[error("Web server error: {0}")]
    WebServer(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl ExporterError {
    /// Create a new transport error
    pub fn transport_error(msg: impl Into<String>) -> Self {
        Self::Transport(msg.into())
    }

    /// Create a new decode error
    pub fn decode_error(msg: impl Into<String>) -> Self {
        Self::Decode(msg.into())
    }

    /// Create a new parse error
    pub fn parse_error(msg: impl Into<String>) -> Self {
        Self::Parse(msg.into())
    }

    /// Create a new web server error
    pub fn web_server_error(msg: impl Into<String>) -> Self {
        Self::WebServer(msg.into())
    }

    /// Create a new configuration error
    pub fn config_error(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Whether the error came from reaching the remote service.
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Transport(_))
    }
}
