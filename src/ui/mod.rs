use async_trait::async_trait;

use crate::core::session::Credentials;
use crate::storage::profile::Profile;

/// A trait representing the interactive side of connection management:
/// resolving the active resource, picking servers/databases, and managing
/// stored profiles.
///
/// The manager never blocks on anything else while one of these prompts is
/// open, so implementations are free to take as long as the user does.
#[async_trait]
pub trait ConnectionUi: Send + Sync {
    /// Identifier of the resource the user is currently editing, if any.
    fn active_resource(&self) -> Option<String>;

    /// Present the list of known connections; `None` means the user
    /// dismissed the picker.
    async fn show_connections(&self) -> Option<Credentials>;

    /// Present the databases available on the server the given credentials
    /// point at; `Some` carries the same credentials with `database_name`
    /// switched to the pick.
    async fn show_databases_on_current_server(
        &self,
        credentials: &Credentials,
    ) -> Option<Credentials>;

    /// Walk the user through creating a profile and persist it.
    async fn create_and_save_profile(&self) -> Option<Profile>;

    /// Let the user pick a stored profile and delete it.
    async fn remove_profile(&self) -> bool;
}
