use thiserror::Error;

/// Errors surfaced by the order tracking client.
///
/// Validation errors are raised before any request is issued. Everything
/// else comes from talking to the plugin backend or the host page.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OrderTrackingError {
    #[error("validation failed: {0}")]
    Validation(String),
    #[error("failed to send request: {0}")]
    Network(String),
    #[error("{context}: server responded with {status}")]
    Http { status: u16, context: String },
    #[error("failed to parse response: {0}")]
    Decode(String),
    #[error("failed to serialize request: {0}")]
    Encode(String),
    #[error("element not found: {0}")]
    MissingElement(String),
}

impl OrderTrackingError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}

pub type Result<T> = std::result::Result<T, OrderTrackingError>;
