use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Everything needed to open a connection on the backend service.
///
/// `profile_name` carries the name of the stored profile these credentials
/// came from, if any; the manager treats it as opaque metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    pub user_name: String,
    pub password: String,
    pub server_name: String,
    pub database_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile_name: Option<String>,
}

/// The live binding between a resource and a backend connection.
///
/// Created only from a successful connect response; `connection_id` is the
/// opaque handle issued by the service and is never empty.
#[derive(Debug, Clone)]
pub struct Session {
    pub resource_id: String,
    pub connection_id: String,
    pub credentials: Credentials,
}

/// Maps resource identifiers to their live sessions.
///
/// An entry exists exactly while the manager believes the resource has an
/// acknowledged connection on the service side. The registry does no locking
/// of its own; all mutation is serialized through the `ConnectionManager`.
#[derive(Debug, Default)]
pub struct SessionRegistry {
    sessions: HashMap<String, Session>,
}

impl SessionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_connected(&self, resource_id: &str) -> bool {
        self.sessions.contains_key(resource_id)
    }

    pub fn get(&self, resource_id: &str) -> Option<&Session> {
        self.sessions.get(resource_id)
    }

    /// Inserts or replaces the session for its resource.
    pub fn put(&mut self, session: Session) {
        self.sessions.insert(session.resource_id.clone(), session);
    }

    /// Deletes the entry if present; no-op otherwise.
    pub fn remove(&mut self, resource_id: &str) -> Option<Session> {
        self.sessions.remove(resource_id)
    }
}
