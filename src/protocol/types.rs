//! Wire payloads for the connection exchanges.
//!
//! The service speaks camelCase JSON; these structs are the only place the
//! rename happens. They are transient, single-use messages and are never
//! stored.

use serde::{Deserialize, Serialize};

use crate::core::session::Credentials;

/// Parameters of a `connection/connect` request.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConnectParams {
    pub owner_uri: String,
    pub connection: ConnectionDetails,
}

/// Credential fields as the service expects them, mapped field-for-field.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConnectionDetails {
    pub user_name: String,
    pub password: String,
    pub server_name: String,
    pub database_name: String,
}

impl From<&Credentials> for ConnectionDetails {
    fn from(credentials: &Credentials) -> Self {
        Self {
            user_name: credentials.user_name.clone(),
            password: credentials.password.clone(),
            server_name: credentials.server_name.clone(),
            database_name: credentials.database_name.clone(),
        }
    }
}

/// Result of a `connection/connect` request.
///
/// An empty `connection_id` means the attempt failed and `messages` explains
/// why in user-readable terms.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConnectResult {
    #[serde(default)]
    pub connection_id: String,
    #[serde(default)]
    pub messages: Vec<String>,
}

/// Parameters of a `connection/disconnect` request. The result is a bare
/// JSON boolean.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DisconnectParams {
    pub owner_uri: String,
}
