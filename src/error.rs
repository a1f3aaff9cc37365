//! Error types
//!
//! Every failure of a bound operation surfaces to its immediate caller as
//! [`Error`]. A "not found" response on a descriptor that catches it is not an
//! error at all: it decodes as `None`.

use thiserror::Error;

/// Result alias used throughout the library
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Failures reported by a [`Transport`](crate::keycloak::http::Transport)
#[derive(Debug, Error)]
pub enum TransportError {
    /// The request never produced a response (DNS, connect, TLS, reset, ...)
    #[error("network error: {0}")]
    Network(String),
    /// The transport gave up on the request because the caller cancelled it
    #[error("request cancelled")]
    Cancelled,
}

/// Errors returned by bound operations
#[derive(Debug, Error)]
pub enum Error {
    /// A path parameter was absent from both the call input and the bound params
    #[error("missing required parameter: {name}")]
    MissingParameter { name: String },

    /// The call input could not be turned into a key/value object
    #[error("invalid call input: {0}")]
    InvalidInput(String),

    /// The server answered with a non-2xx status
    #[error("remote error: HTTP {status}: {body}")]
    Remote { status: u16, body: String },

    /// Network-level failure from the transport
    #[error(transparent)]
    Transport(TransportError),

    /// The call was cancelled before a response arrived
    #[error("request cancelled")]
    Cancelled,

    /// A 2xx body did not match the declared result type
    #[error("failed to decode response (HTTP {status}): {source}")]
    Decode {
        status: u16,
        #[source]
        source: serde_json::Error,
    },

    /// The credential collaborator could not supply a token
    #[error("credential error: {0}")]
    Credential(String),
}

impl Error {
    /// HTTP status carried by the error, if the server produced one
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::Remote { status, .. } | Error::Decode { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// True for a `Remote` error with status 404
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::Remote { status: 404, .. })
    }
}

/// Format an error for display to a person at a terminal
pub fn format_admin_error(error: &Error) -> String {
    match error {
        Error::Remote { status: 401, .. } => {
            "Authentication failed. Check the admin username and password.".to_string()
        },
        Error::Remote { status: 403, .. } => {
            "Permission denied. The admin account lacks the required realm-management role.".to_string()
        },
        Error::Remote { status: 404, .. } => "Resource not found.".to_string(),
        Error::Remote { status: 409, .. } => "Resource conflict. It may already exist.".to_string(),
        Error::Remote { status, .. } if *status >= 500 => {
            "Keycloak is temporarily unavailable. Please try again.".to_string()
        },
        Error::Transport(_) => "Request failed. Check the server URL and your network connection.".to_string(),
        other => other.to_string(),
    }
}

impl From<TransportError> for Error {
    fn from(err: TransportError) -> Self {
        match err {
            TransportError::Cancelled => Error::Cancelled,
            other => Error::Transport(other),
        }
    }
}
