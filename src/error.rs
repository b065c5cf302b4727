//! Error types for the aesbench service and driver.

use std::error::Error as StdError;
use std::fmt;
use std::result;
use tonic::Status;

/// A specialized Result type for aesbench operations.
pub type Result<T> = result::Result<T, Error>;

/// The error type for aesbench operations.
#[derive(Debug)]
pub enum Error {
    /// Key material could not be decoded or has an unsupported length
    InvalidKey(String),
    /// Configuration errors
    Config(String),
    /// Connection/transport errors
    Transport(String),
    /// Errors returned by the remote service
    Rpc(Status),
    /// The shared run deadline has already passed
    DeadlineExceeded,
    /// I/O errors
    Io(std::io::Error),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InvalidKey(msg) => write!(f, "Invalid key: {}", msg),
            Error::Config(msg) => write!(f, "Configuration error: {}", msg),
            Error::Transport(msg) => write!(f, "Transport error: {}", msg),
            Error::Rpc(status) => write!(f, "RPC error: {}", status.message()),
            Error::DeadlineExceeded => write!(f, "Run deadline exceeded"),
            Error::Io(err) => write!(f, "I/O error: {}", err),
        }
    }
}

impl StdError for Error {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        match self {
            Error::Io(err) => Some(err),
            Error::Rpc(status) => Some(status),
            _ => None,
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err)
    }
}

impl From<hex::FromHexError> for Error {
    fn from(err: hex::FromHexError) -> Self {
        Error::InvalidKey(err.to_string())
    }
}

impl From<config::ConfigError> for Error {
    fn from(err: config::ConfigError) -> Self {
        Error::Config(err.to_string())
    }
}

impl From<tonic::transport::Error> for Error {
    fn from(err: tonic::transport::Error) -> Self {
        Error::Transport(err.to_string())
    }
}

impl From<Status> for Error {
    fn from(status: Status) -> Self {
        Error::Rpc(status)
    }
}

impl From<Error> for Status {
    fn from(err: Error) -> Self {
        match err {
            Error::InvalidKey(msg) => Status::failed_precondition(format!("Invalid key: {}", msg)),
            Error::Config(msg) => Status::failed_precondition(format!("Config error: {}", msg)),
            Error::Transport(msg) => Status::unavailable(msg),
            Error::Rpc(status) => status,
            Error::DeadlineExceeded => Status::deadline_exceeded("run deadline exceeded"),
            Error::Io(err) => Status::internal(format!("I/O error: {}", err)),
        }
    }
}
