//! Error types for tallydb

use thiserror::Error;

/// Result type alias for backend operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for backend operations
#[derive(Error, Debug)]
pub enum Error {
    /// Connection could not be established or was lost
    #[error("Backend unavailable: {0}")]
    BackendUnavailable(String),

    /// The server rejected a command
    #[error("Backend error: {0}")]
    Backend(String),

    /// Operation against a key holding the wrong kind of value
    #[error("WRONGTYPE Operation against a key holding the wrong kind of value")]
    WrongType,

    /// Counter value is not an integer or would overflow
    #[error("Value is not an integer or out of range")]
    NotInteger,

    /// Stored bytes could not be projected into the requested type
    #[error("Decode error: {0}")]
    Decode(String),
}

impl From<redis::RedisError> for Error {
    fn from(err: redis::RedisError) -> Self {
        if err.code() == Some("WRONGTYPE") {
            return Error::WrongType;
        }

        if err.is_io_error()
            || err.is_connection_refusal()
            || err.is_connection_dropped()
            || err.is_timeout()
            || err.kind() == redis::ErrorKind::InvalidClientConfig
        {
            Error::BackendUnavailable(err.to_string())
        } else {
            Error::Backend(err.to_string())
        }
    }
}
