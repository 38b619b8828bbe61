use std::fmt::{self, Display};
use std::time::Duration;

use crate::protocol::client::ServiceError;

/// A central error enum for connection-related errors.
#[derive(Debug)]
pub enum ConnectionError {
    /// No resource is open to attach a session to.
    NoResource(String),
    /// The operation needs an established session and there is none.
    NotConnected(String),
    /// The service answered the connect request with an empty handle.
    ConnectFailed(Vec<String>),
    /// The service reported that it could not drop the connection.
    DisconnectFailed(String),
    /// Transport-level failure below the protocol exchange.
    Service(ServiceError),
    /// The service answered with a payload we could not decode.
    Protocol(String),
    /// The round-trip did not complete within the configured limit.
    Timeout(Duration),
}

/// Convert from ServiceError.
/// Without this, `?` on a `ServiceClient` call won't work inside the manager.
impl From<ServiceError> for ConnectionError {
    fn from(err: ServiceError) -> Self {
        ConnectionError::Service(err)
    }
}

/// Convert from serde_json::Error for payload shaping failures.
impl From<serde_json::Error> for ConnectionError {
    fn from(err: serde_json::Error) -> Self {
        ConnectionError::Protocol(err.to_string())
    }
}

impl Display for ConnectionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConnectionError::NoResource(msg) => write!(f, "No resource: {}", msg),
            ConnectionError::NotConnected(id) => {
                write!(f, "Resource '{}' is not connected", id)
            }
            ConnectionError::ConnectFailed(messages) => {
                write!(f, "Connect failed: {}", messages.join("; "))
            }
            ConnectionError::DisconnectFailed(id) => {
                write!(f, "Service refused to disconnect '{}'", id)
            }
            ConnectionError::Service(e) => write!(f, "Service error: {}", e),
            ConnectionError::Protocol(msg) => write!(f, "Protocol error: {}", msg),
            ConnectionError::Timeout(limit) => {
                write!(f, "Request timed out after {:?}", limit)
            }
        }
    }
}

impl std::error::Error for ConnectionError {}
