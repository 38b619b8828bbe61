use std::fmt::{self, Display};

use async_trait::async_trait;
use serde_json::Value;

/// The request kinds the manager addresses to the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestKind {
    Connect,
    Disconnect,
}

impl RequestKind {
    /// Protocol method name as it goes on the wire.
    pub fn method(&self) -> &'static str {
        match self {
            RequestKind::Connect => "connection/connect",
            RequestKind::Disconnect => "connection/disconnect",
        }
    }
}

/// A trait representing the request/response channel to the backend service.
///
/// One long-lived service process sits behind an implementation; requests may
/// be issued concurrently and complete out of order. The manager owns
/// serialization per resource, so implementations only need to correlate a
/// request with its eventual response.
#[async_trait]
pub trait ServiceClient: Send + Sync {
    async fn send_request(&self, kind: RequestKind, params: Value) -> Result<Value, ServiceError>;
}

/// A central error enum for transport-level failures below the protocol.
#[derive(Debug)]
pub enum ServiceError {
    IoError(std::io::Error),
    Transport(String),
}

/// Convert from std::io::Error.
impl From<std::io::Error> for ServiceError {
    fn from(err: std::io::Error) -> ServiceError {
        ServiceError::IoError(err)
    }
}

impl Display for ServiceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ServiceError::IoError(e) => write!(f, "IO error: {}", e),
            ServiceError::Transport(msg) => write!(f, "Transport error: {}", msg),
        }
    }
}

impl std::error::Error for ServiceError {}
