use thiserror::Error;

use crate::dialect::ErrorClass;

/// Error reported by the native driver.
/// The message is kept verbatim so it can be matched against vendor error codes.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct DriverError {
    pub message: String,
}

impl DriverError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Error raised by a `RowSink` while consuming a result stream.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct SinkError {
    pub message: String,
}

impl SinkError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Failure surfaced by a streaming query, from either side of the pipe.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StreamFailure {
    #[error("{0}")]
    Source(DriverError),

    #[error("{0}")]
    Sink(SinkError),
}

impl StreamFailure {
    pub fn message(&self) -> &str {
        match self {
            StreamFailure::Source(e) => &e.message,
            StreamFailure::Sink(e) => &e.message,
        }
    }
}

/// Error type for orabridge operations
#[derive(Debug, Error)]
pub enum OraBridgeError {
    #[error("The query is empty")]
    EmptyQuery,

    #[error("Connection failed: {source}")]
    Connect { source: DriverError },

    #[error("{source}")]
    Execution { source: DriverError, class: ErrorClass },

    #[error("{source}")]
    Stream {
        source: StreamFailure,
        class: ErrorClass,
    },

    #[error("Failed to close connection: {source}")]
    Destroy { source: DriverError },

    #[error("Returning was requested but no follow-up statement was compiled")]
    MissingReturningSql,

    #[error("Returning was requested but no binding reserves a row identifier")]
    MissingReturningBinding,

    #[error("Driver response is missing out parameter {slot}")]
    MissingOutParam { slot: String },
}

impl OraBridgeError {
    /// Classification attached to execution and stream failures.
    pub fn class(&self) -> Option<ErrorClass> {
        match self {
            OraBridgeError::Execution { class, .. } | OraBridgeError::Stream { class, .. } => {
                Some(*class)
            }
            _ => None,
        }
    }

    /// Returns true if the failure killed the connection it ran on.
    pub fn is_connection_fatal(&self) -> bool {
        self.class() == Some(ErrorClass::ConnectionFatal)
    }
}

/// Result type alias for orabridge operations
pub type Result<T> = std::result::Result<T, OraBridgeError>;
