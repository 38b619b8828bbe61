use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use log::{debug, info, warn};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tokio::sync::Mutex;

use crate::core::errors::ConnectionError;
use crate::core::session::{Credentials, Session, SessionRegistry};
use crate::protocol::client::{RequestKind, ServiceClient};
use crate::protocol::types::{ConnectParams, ConnectResult, ConnectionDetails, DisconnectParams};
use crate::reporting::{ConnectTiming, StatusReporter, TelemetryReporter};
use crate::ui::ConnectionUi;

/// Orchestrates connection sessions for many resources concurrently.
///
/// Internal state is a SessionRegistry plus a map of per-resource guard
/// mutexes, both behind an Arc so the manager can be handed to command
/// handlers as a cheap clone.
///
/// Every operation on a resource takes that resource's guard before it reads
/// the registry or issues a protocol request, which serializes connect and
/// disconnect per resource while leaving independent resources fully
/// concurrent. A registry mutation is always committed before the guard is
/// released, so the next operation on the same resource observes it.
#[derive(Clone)]
pub struct ConnectionManager {
    client: Arc<dyn ServiceClient>,
    ui: Arc<dyn ConnectionUi>,
    status: Arc<dyn StatusReporter>,
    telemetry: Arc<dyn TelemetryReporter>,
    registry: Arc<Mutex<SessionRegistry>>,
    guards: Arc<Mutex<HashMap<String, Arc<Mutex<()>>>>>,
    request_timeout: Option<Duration>,
}

impl ConnectionManager {
    pub fn new(
        client: Arc<dyn ServiceClient>,
        ui: Arc<dyn ConnectionUi>,
        status: Arc<dyn StatusReporter>,
        telemetry: Arc<dyn TelemetryReporter>,
    ) -> Self {
        Self {
            client,
            ui,
            status,
            telemetry,
            registry: Arc::new(Mutex::new(SessionRegistry::new())),
            guards: Arc::new(Mutex::new(HashMap::new())),
            request_timeout: None,
        }
    }

    /// Caps every protocol round-trip. On expiry the operation fails with
    /// `ConnectionError::Timeout` and the registry keeps its prior state.
    pub fn with_request_timeout(mut self, limit: Duration) -> Self {
        self.request_timeout = Some(limit);
        self
    }

    /// Whether the manager holds an acknowledged session for the resource.
    pub async fn is_connected(&self, resource_id: &str) -> bool {
        self.registry.lock().await.is_connected(resource_id)
    }

    /// Snapshot of the resource's session, if any.
    pub async fn session(&self, resource_id: &str) -> Option<Session> {
        self.registry.lock().await.get(resource_id).cloned()
    }

    /// Establish a session for `resource_id` with the given credentials.
    ///
    /// A success overwrites any prior entry for the resource. A failure
    /// (service rejection, transport error, timeout) leaves the registry
    /// untouched and surfaces the reason through the status reporter.
    pub async fn connect(
        &self,
        resource_id: &str,
        credentials: Credentials,
    ) -> Result<(), ConnectionError> {
        if resource_id.is_empty() {
            warn!("Connect requested without a resource to attach the session to");
            return Err(ConnectionError::NoResource(
                "connect needs an open resource".into(),
            ));
        }

        let guard = self.guard_for(resource_id).await;
        let _serialized = guard.lock().await;
        self.connect_locked(resource_id, credentials).await
    }

    /// Tear down the session for `resource_id`.
    ///
    /// Disconnecting a resource with no session trivially succeeds without
    /// touching the service. The local entry is removed only once the
    /// service confirms the drop, so a refused disconnect keeps the session.
    pub async fn disconnect(&self, resource_id: &str) -> Result<(), ConnectionError> {
        let guard = self.guard_for(resource_id).await;
        let _serialized = guard.lock().await;
        self.disconnect_locked(resource_id).await
    }

    /// Move the active resource's session to another database on the same
    /// server, chosen interactively.
    ///
    /// Compound: tears the session down first, then connects with the
    /// updated credentials. If the connect leg fails the resource ends up
    /// disconnected rather than silently keeping the stale session.
    pub async fn switch_database(&self) -> Result<(), ConnectionError> {
        let Some(resource_id) = self.ui.active_resource() else {
            info!("Switch database requested with no active resource");
            return Err(ConnectionError::NoResource(
                "switching databases needs an open resource".into(),
            ));
        };

        let Some(current) = self.session(&resource_id).await.map(|s| s.credentials) else {
            warn!(
                "'{}' is not connected; connect before switching databases",
                resource_id
            );
            return Err(ConnectionError::NotConnected(resource_id));
        };

        let Some(new_credentials) = self.ui.show_databases_on_current_server(&current).await
        else {
            debug!("Database picker dismissed for '{}'", resource_id);
            return Ok(());
        };

        let guard = self.guard_for(&resource_id).await;
        let _serialized = guard.lock().await;

        self.disconnect_locked(&resource_id).await?;
        self.connect_locked(&resource_id, new_credentials).await
    }

    /// Let the user pick one of the known connections for the active
    /// resource, then reconnect with it.
    ///
    /// Resolves only once the connect leg has resolved.
    pub async fn pick_connection(&self) -> Result<(), ConnectionError> {
        let Some(resource_id) = self.ui.active_resource() else {
            info!("Connection picker requested with no active resource");
            return Err(ConnectionError::NoResource(
                "picking a connection needs an open resource".into(),
            ));
        };

        let Some(credentials) = self.ui.show_connections().await else {
            debug!("Connection picker dismissed for '{}'", resource_id);
            return Ok(());
        };

        let guard = self.guard_for(&resource_id).await;
        let _serialized = guard.lock().await;

        self.disconnect_locked(&resource_id).await?;
        self.connect_locked(&resource_id, credentials).await
    }

    /// Walk the user through creating and saving a profile.
    pub async fn create_profile(&self) -> bool {
        self.ui.create_and_save_profile().await.is_some()
    }

    /// Let the user delete a stored profile.
    pub async fn remove_profile(&self) -> bool {
        self.ui.remove_profile().await
    }

    /// Guard mutex serializing operations on one resource.
    async fn guard_for(&self, resource_id: &str) -> Arc<Mutex<()>> {
        let mut guards = self.guards.lock().await;
        guards.entry(resource_id.to_string()).or_default().clone()
    }

    /// Connect with the caller already holding the resource's guard.
    async fn connect_locked(
        &self,
        resource_id: &str,
        credentials: Credentials,
    ) -> Result<(), ConnectionError> {
        let started = Instant::now();
        self.status.connecting(resource_id, &credentials);

        let params = ConnectParams {
            owner_uri: resource_id.to_string(),
            connection: ConnectionDetails::from(&credentials),
        };

        let service_started = Instant::now();
        let result: ConnectResult = match self.round_trip(RequestKind::Connect, &params).await {
            Ok(result) => result,
            Err(e) => {
                self.status
                    .connect_error(resource_id, &credentials, &[e.to_string()]);
                return Err(e);
            }
        };
        let service_elapsed = service_started.elapsed();

        if result.connection_id.is_empty() {
            info!("Service rejected connect for '{}'", resource_id);
            self.status
                .connect_error(resource_id, &credentials, &result.messages);
            return Err(ConnectionError::ConnectFailed(result.messages));
        }

        {
            let mut registry = self.registry.lock().await;
            registry.put(Session {
                resource_id: resource_id.to_string(),
                connection_id: result.connection_id,
                credentials: credentials.clone(),
            });
        }

        self.status.connect_success(resource_id, &credentials);
        self.telemetry.connected(ConnectTiming {
            extension_connection_time: started.elapsed(),
            service_connection_time: service_elapsed,
        });
        debug!("Session established for '{}'", resource_id);
        Ok(())
    }

    /// Disconnect with the caller already holding the resource's guard.
    async fn disconnect_locked(&self, resource_id: &str) -> Result<(), ConnectionError> {
        if !self.registry.lock().await.is_connected(resource_id) {
            debug!("'{}' already disconnected; nothing to do", resource_id);
            return Ok(());
        }

        let params = DisconnectParams {
            owner_uri: resource_id.to_string(),
        };
        let dropped: bool = self.round_trip(RequestKind::Disconnect, &params).await?;
        if !dropped {
            warn!(
                "Service refused to disconnect '{}'; keeping the session",
                resource_id
            );
            return Err(ConnectionError::DisconnectFailed(resource_id.to_string()));
        }

        // Commit before reporting so a follow-up connect sees a clean slate.
        self.registry.lock().await.remove(resource_id);
        self.status.not_connected(resource_id);
        info!("Disconnected '{}'", resource_id);
        Ok(())
    }

    /// Serialize the params, send the request (bounded by the configured
    /// timeout, if any) and decode the response.
    async fn round_trip<P, R>(&self, kind: RequestKind, params: &P) -> Result<R, ConnectionError>
    where
        P: Serialize,
        R: DeserializeOwned,
    {
        let params = serde_json::to_value(params)?;
        debug!("Sending {} request", kind.method());

        let response = match self.request_timeout {
            Some(limit) => tokio::time::timeout(limit, self.client.send_request(kind, params))
                .await
                .map_err(|_| ConnectionError::Timeout(limit))??,
            None => self.client.send_request(kind, params).await?,
        };

        Ok(serde_json::from_value(response)?)
    }
}
