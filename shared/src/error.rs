//! Error types for the StaySmart Lambda functions.

use thiserror::Error;

use crate::completion::UpstreamError;

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can terminate a request.
#[derive(Error, Debug)]
pub enum Error {
    /// Request used a method other than POST or OPTIONS
    #[error("Method Not Allowed")]
    MethodNotAllowed,

    /// Upstream credential is absent
    #[error("Server misconfigured: {0}")]
    Unconfigured(String),

    /// One or more required request fields are missing or falsy
    #[error("Missing required fields: {}", .0.join(", "))]
    MissingFields(Vec<&'static str>),

    /// Request body could not be parsed
    #[error("Invalid request body: {0}")]
    InvalidBody(String),

    /// Completion service answered with a non-success status
    #[error("LLM error: {status}")]
    Upstream { status: u16, body: String },

    /// Completion service answered without usable text
    #[error("Empty AI response")]
    EmptyResponse,

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl Error {
    /// Get HTTP status code for this error.
    pub fn status_code(&self) -> u16 {
        match self {
            Error::MissingFields(_) | Error::InvalidBody(_) => 400,
            Error::Unconfigured(_) => 401,
            Error::MethodNotAllowed => 405,
            Error::Upstream { .. } | Error::EmptyResponse => 502,
            _ => 500,
        }
    }

    /// The `error` field of the JSON body returned to the caller.
    pub fn public_message(&self) -> String {
        match self {
            Error::MethodNotAllowed | Error::Unconfigured(_) | Error::MissingFields(_) => {
                self.to_string()
            }
            Error::InvalidBody(_) => "Invalid request body".to_string(),
            Error::Upstream { .. } => "LLM error".to_string(),
            Error::EmptyResponse => "Empty AI response".to_string(),
            _ => "Server error".to_string(),
        }
    }

    /// Diagnostic detail surfaced alongside the public message, if any.
    pub fn detail(&self) -> Option<String> {
        match self {
            Error::InvalidBody(msg) | Error::Config(msg) | Error::Internal(msg) => {
                Some(msg.clone())
            }
            Error::Upstream { body, .. } => Some(body.clone()),
            Error::Serialization(e) => Some(e.to_string()),
            _ => None,
        }
    }
}

impl From<UpstreamError> for Error {
    fn from(err: UpstreamError) -> Self {
        match err {
            UpstreamError::Status { status, body } => Error::Upstream { status, body },
            UpstreamError::Decode(body) => Error::Upstream { status: 200, body },
            UpstreamError::Empty => Error::EmptyResponse,
            UpstreamError::Transport(msg) => Error::Internal(msg),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(Error::MissingFields(vec!["draft"]).status_code(), 400);
        assert_eq!(Error::Unconfigured("x".into()).status_code(), 401);
        assert_eq!(Error::MethodNotAllowed.status_code(), 405);
        assert_eq!(Error::EmptyResponse.status_code(), 502);
        assert_eq!(Error::Internal("boom".into()).status_code(), 500);
    }

    #[test]
    fn test_missing_fields_names_every_field() {
        let err = Error::MissingFields(vec!["draft", "nights"]);
        assert_eq!(err.public_message(), "Missing required fields: draft, nights");
        assert!(err.detail().is_none());
    }

    #[test]
    fn test_upstream_conversion() {
        let err: Error = UpstreamError::Status {
            status: 429,
            body: "rate limited".to_string(),
        }
        .into();
        assert_eq!(err.status_code(), 502);
        assert_eq!(err.public_message(), "LLM error");
        assert_eq!(err.detail().as_deref(), Some("rate limited"));

        let err: Error = UpstreamError::Transport("connection reset".to_string()).into();
        assert_eq!(err.status_code(), 500);
        assert_eq!(err.public_message(), "Server error");
    }
}
