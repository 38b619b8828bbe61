use serde::{Deserialize, Serialize};

use crate::core::session::Credentials;

/// A user-named connection preset.
///
/// JSON looks like:
/// `{ "name":"prod-orders", "credentials": { "user_name":"sa", ... } }`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    pub name: String,
    pub credentials: Credentials,
}

impl Profile {
    pub fn new(name: impl Into<String>, credentials: Credentials) -> Self {
        Self {
            name: name.into(),
            credentials,
        }
    }

    /// Returns the unique, human-readable identifier.
    pub fn name(&self) -> &str {
        &self.name
    }
}
