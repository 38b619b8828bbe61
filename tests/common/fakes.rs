//! Deterministic **in-process stand-ins** for the manager's collaborators.
//!
//! *  **From the test's perspective**
//!    * Script service answers with `push_connect_ok(...)` and friends.
//!    * Inspect everything the manager sent via `FakeServiceClient::requests`.
//!    * Inspect everything it reported via `RecordingStatus::events`.
//!
//! *  **Why this exists**: It lets integration tests exercise the *real*
//!    async machinery (guards, registry commits, timeouts) without a live
//!    service process or a human in front of a picker.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use serde_json::{json, Value};

use sqlconn_core::core::session::Credentials;
use sqlconn_core::protocol::client::{RequestKind, ServiceClient, ServiceError};
use sqlconn_core::reporting::{ConnectTiming, StatusReporter, TelemetryReporter};
use sqlconn_core::storage::profile::Profile;
use sqlconn_core::ui::ConnectionUi;
use sqlconn_core::ConnectionManager;

/// Service client that replays scripted responses in order.
///
/// Every request is recorded (kind plus raw params) before the optional
/// delay, so tests can assert on issue order as well as content.
#[derive(Default)]
pub struct FakeServiceClient {
    responses: Mutex<VecDeque<Result<Value, ServiceError>>>,
    requests: Mutex<Vec<(RequestKind, Value)>>,
    delay: Option<Duration>,
}

impl FakeServiceClient {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every request take this long before its scripted answer.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn push_connect_ok(&self, handle: &str) {
        self.push_ok(json!({ "connectionId": handle, "messages": [] }));
    }

    pub fn push_connect_rejected(&self, messages: &[&str]) {
        self.push_ok(json!({ "connectionId": "", "messages": messages }));
    }

    pub fn push_disconnect_ok(&self) {
        self.push_ok(json!(true));
    }

    pub fn push_disconnect_refused(&self) {
        self.push_ok(json!(false));
    }

    pub fn push_ok(&self, value: Value) {
        self.responses.lock().unwrap().push_back(Ok(value));
    }

    pub fn push_transport_error(&self, message: &str) {
        self.responses
            .lock()
            .unwrap()
            .push_back(Err(ServiceError::Transport(message.into())));
    }

    /// Every request the manager issued so far, in issue order.
    pub fn requests(&self) -> Vec<(RequestKind, Value)> {
        self.requests.lock().unwrap().clone()
    }

    pub fn request_kinds(&self) -> Vec<RequestKind> {
        self.requests().into_iter().map(|(kind, _)| kind).collect()
    }
}

#[async_trait]
impl ServiceClient for FakeServiceClient {
    async fn send_request(&self, kind: RequestKind, params: Value) -> Result<Value, ServiceError> {
        self.requests.lock().unwrap().push((kind, params));

        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| {
                Err(ServiceError::Transport(
                    "test scripted no further responses".into(),
                ))
            })
    }
}

/// Service client whose requests never complete, for timeout tests.
pub struct NeverRespondingClient;

#[async_trait]
impl ServiceClient for NeverRespondingClient {
    async fn send_request(
        &self,
        _kind: RequestKind,
        _params: Value,
    ) -> Result<Value, ServiceError> {
        std::future::pending().await
    }
}

/// UI collaborator whose answers are scripted up front.
#[derive(Default)]
pub struct ScriptedUi {
    pub active: Mutex<Option<String>>,
    pub connection_pick: Mutex<Option<Credentials>>,
    pub database_pick: Mutex<Option<Credentials>>,
    pub profile_to_create: Mutex<Option<Profile>>,
    pub remove_answer: Mutex<bool>,
}

impl ScriptedUi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_active(self, resource_id: &str) -> Self {
        *self.active.lock().unwrap() = Some(resource_id.into());
        self
    }
}

#[async_trait]
impl ConnectionUi for ScriptedUi {
    fn active_resource(&self) -> Option<String> {
        self.active.lock().unwrap().clone()
    }

    async fn show_connections(&self) -> Option<Credentials> {
        self.connection_pick.lock().unwrap().take()
    }

    async fn show_databases_on_current_server(
        &self,
        _credentials: &Credentials,
    ) -> Option<Credentials> {
        self.database_pick.lock().unwrap().take()
    }

    async fn create_and_save_profile(&self) -> Option<Profile> {
        self.profile_to_create.lock().unwrap().take()
    }

    async fn remove_profile(&self) -> bool {
        *self.remove_answer.lock().unwrap()
    }
}

/// What the manager told the status surface, in call order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StatusEvent {
    Connecting(String),
    ConnectSuccess(String),
    ConnectError(String, Vec<String>),
    NotConnected(String),
}

#[derive(Default)]
pub struct RecordingStatus {
    events: Mutex<Vec<StatusEvent>>,
}

impl RecordingStatus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<StatusEvent> {
        self.events.lock().unwrap().clone()
    }
}

impl StatusReporter for RecordingStatus {
    fn connecting(&self, resource_id: &str, _credentials: &Credentials) {
        self.events
            .lock()
            .unwrap()
            .push(StatusEvent::Connecting(resource_id.into()));
    }

    fn connect_success(&self, resource_id: &str, _credentials: &Credentials) {
        self.events
            .lock()
            .unwrap()
            .push(StatusEvent::ConnectSuccess(resource_id.into()));
    }

    fn connect_error(&self, resource_id: &str, _credentials: &Credentials, messages: &[String]) {
        self.events.lock().unwrap().push(StatusEvent::ConnectError(
            resource_id.into(),
            messages.to_vec(),
        ));
    }

    fn not_connected(&self, resource_id: &str) {
        self.events
            .lock()
            .unwrap()
            .push(StatusEvent::NotConnected(resource_id.into()));
    }
}

#[derive(Default)]
pub struct RecordingTelemetry {
    timings: Mutex<Vec<ConnectTiming>>,
}

impl RecordingTelemetry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn timings(&self) -> Vec<ConnectTiming> {
        self.timings.lock().unwrap().clone()
    }
}

impl TelemetryReporter for RecordingTelemetry {
    fn connected(&self, timing: ConnectTiming) {
        self.timings.lock().unwrap().push(timing);
    }
}

/// Credentials helper so tests only spell out what they care about.
pub fn credentials_for(database: &str) -> Credentials {
    Credentials {
        user_name: "sa".into(),
        password: "secret".into(),
        server_name: "localhost".into(),
        database_name: database.into(),
        profile_name: None,
    }
}

/// Wires a manager to the given fakes and hands back the recorders.
pub fn manager_with(
    client: Arc<dyn ServiceClient>,
    ui: Arc<ScriptedUi>,
) -> (ConnectionManager, Arc<RecordingStatus>, Arc<RecordingTelemetry>) {
    let status = Arc::new(RecordingStatus::new());
    let telemetry = Arc::new(RecordingTelemetry::new());
    let manager = ConnectionManager::new(client, ui, status.clone(), telemetry.clone());
    (manager, status, telemetry)
}
