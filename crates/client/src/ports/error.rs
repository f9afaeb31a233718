//! Error types for transport operations.

/// The single failure kind produced by a transport.
///
/// The variants only shape the human-readable message; `HeroService` treats
/// every variant the same way.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TransportError {
    /// The request never produced a response (connection refused, DNS, ...).
    #[error("Http failure response for {url}: {message}")]
    Request { url: String, message: String },

    /// The server answered with a non-success status.
    #[error("Http failure response for {url}: {status} {reason}")]
    Status {
        url: String,
        status: u16,
        reason: String,
    },

    /// The response body could not be decoded into the expected shape.
    #[error("Http failure during parsing for {url}: {message}")]
    Decode { url: String, message: String },

    /// The request body could not be encoded.
    #[error("Failed to encode request body: {0}")]
    Encode(String),
}

impl TransportError {
    pub fn request(url: impl Into<String>, message: impl ToString) -> Self {
        Self::Request {
            url: url.into(),
            message: message.to_string(),
        }
    }

    pub fn status(url: impl Into<String>, status: u16, reason: impl Into<String>) -> Self {
        Self::Status {
            url: url.into(),
            status,
            reason: reason.into(),
        }
    }

    pub fn decode(url: impl Into<String>, message: impl ToString) -> Self {
        Self::Decode {
            url: url.into(),
            message: message.to_string(),
        }
    }

    pub fn encode(message: impl ToString) -> Self {
        Self::Encode(message.to_string())
    }

    /// HTTP status carried by the error, if the server answered at all.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}
