//! Error types for tudns
//!
//! Errors fall into four classes (see [`ErrorClass`]):
//!
//! - **Construction**: bad interval, empty or non-compiling pattern. The
//!   daemon refuses to start.
//! - **PassAbort**: no local IPv4 address, no route list. The pass ends early
//!   and the next tick tries again.
//! - **PerRoute**: device login/list/write failures for one hostname. Logged,
//!   the batch continues.
//! - **Transport**: raw HTTP/JSON failures before they are attributed to a
//!   stage.

use thiserror::Error;

/// Result type alias for tudns operations
pub type Result<T> = std::result::Result<T, Error>;

/// Coarse classification used by the engine to decide how far an error travels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorClass {
    /// Fatal at startup
    Construction,
    /// Ends the current pass, retried on the next tick
    PassAbort,
    /// Affects a single route only
    PerRoute,
    /// Transport or protocol failure not yet attributed to a stage
    Transport,
}

/// Core error type
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Update interval could not be parsed
    #[error("invalid update interval '{value}': {reason}")]
    InvalidInterval {
        /// The rejected interval string
        value: String,
        /// Why it was rejected
        reason: String,
    },

    /// Device pattern is empty or does not compile
    #[error("invalid pattern for device {device}: {reason}")]
    InvalidPattern {
        /// Ordinal device id
        device: usize,
        /// Why it was rejected
        reason: String,
    },

    /// No usable local IPv4 address
    #[error("failed to get local IP: {0}")]
    LocalAddress(String),

    /// Routing table could not be fetched or decoded
    #[error("failed to get routers: {0}")]
    RouteSource(String),

    /// Credential exchange failed or returned no token
    #[error("failed to login: {0}")]
    Authentication(String),

    /// Remote answered 401 to a business request
    #[error("session expired during {stage}")]
    SessionExpired {
        /// Stage that observed the 401
        stage: &'static str,
    },

    /// Non-success HTTP status at a known stage
    #[error("{stage} failed with status: {status}")]
    Status {
        /// Stage name (e.g. "DNS operation")
        stage: &'static str,
        /// HTTP status code
        status: u16,
    },

    /// Per-route failure wrapped with the device and hostname it concerned
    #[error("device {device} ({host}) failed for {hostname}: {source}")]
    Device {
        /// Ordinal device id
        device: usize,
        /// Device host, for operators
        host: String,
        /// Hostname being reconciled
        hostname: String,
        /// Underlying error
        #[source]
        source: Box<Error>,
    },

    /// HTTP transport errors
    #[error("HTTP error: {0}")]
    Http(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic error with context
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create an invalid interval error
    pub fn invalid_interval(value: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidInterval {
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Create an invalid pattern error
    pub fn invalid_pattern(device: usize, reason: impl Into<String>) -> Self {
        Self::InvalidPattern {
            device,
            reason: reason.into(),
        }
    }

    /// Create a local address error
    pub fn local_address(msg: impl Into<String>) -> Self {
        Self::LocalAddress(msg.into())
    }

    /// Create a route source error
    pub fn route_source(msg: impl Into<String>) -> Self {
        Self::RouteSource(msg.into())
    }

    /// Create an authentication error
    pub fn auth(msg: impl Into<String>) -> Self {
        Self::Authentication(msg.into())
    }

    /// Create an HTTP error
    pub fn http(msg: impl Into<String>) -> Self {
        Self::Http(msg.into())
    }

    /// Create a status error for a stage
    pub fn status(stage: &'static str, status: u16) -> Self {
        Self::Status { stage, status }
    }

    /// Wrap an error with the device and hostname it concerned
    pub fn device(
        device: usize,
        host: impl Into<String>,
        hostname: impl Into<String>,
        source: Error,
    ) -> Self {
        Self::Device {
            device,
            host: host.into(),
            hostname: hostname.into(),
            source: Box::new(source),
        }
    }

    /// Classify this error
    pub fn class(&self) -> ErrorClass {
        match self {
            Error::Config(_) | Error::InvalidInterval { .. } | Error::InvalidPattern { .. } => {
                ErrorClass::Construction
            }
            Error::LocalAddress(_) | Error::RouteSource(_) => ErrorClass::PassAbort,
            Error::Authentication(_)
            | Error::SessionExpired { .. }
            | Error::Status { .. }
            | Error::Device { .. } => ErrorClass::PerRoute,
            Error::Http(_) | Error::Json(_) | Error::Io(_) | Error::Other(_) => {
                ErrorClass::Transport
            }
        }
    }

    /// Whether the remote rejected the session and a fresh login may help
    pub fn is_session_expired(&self) -> bool {
        matches!(self, Error::SessionExpired { .. })
    }
}

/// Helper for converting anyhow::Error to our Error type
impl From<anyhow::Error> for Error {
    fn from(err: anyhow::Error) -> Self {
        Self::Other(err.to_string())
    }
}
