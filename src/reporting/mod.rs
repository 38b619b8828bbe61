use std::time::Duration;

use log::{error, info};

use crate::core::session::Credentials;

/// Receives connection state changes for user-facing status surfaces
/// (status bar, progress spinner).
pub trait StatusReporter: Send + Sync {
    fn connecting(&self, resource_id: &str, credentials: &Credentials);
    fn connect_success(&self, resource_id: &str, credentials: &Credentials);
    fn connect_error(&self, resource_id: &str, credentials: &Credentials, messages: &[String]);
    fn not_connected(&self, resource_id: &str);
}

/// Timing breakdown of one successful connect.
///
/// `extension_connection_time` covers the whole connect call,
/// `service_connection_time` only the protocol round-trip; their difference
/// is the client-side overhead.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConnectTiming {
    pub extension_connection_time: Duration,
    pub service_connection_time: Duration,
}

/// Receives one event per successful connect.
pub trait TelemetryReporter: Send + Sync {
    fn connected(&self, timing: ConnectTiming);
}

/// Status reporter that writes state changes to the log. Lets embedders
/// without a status surface run the manager headless.
#[derive(Debug, Default)]
pub struct LogStatusReporter;

impl StatusReporter for LogStatusReporter {
    fn connecting(&self, resource_id: &str, credentials: &Credentials) {
        info!(
            "Connecting '{}' to {}/{}...",
            resource_id, credentials.server_name, credentials.database_name
        );
    }

    fn connect_success(&self, resource_id: &str, credentials: &Credentials) {
        info!(
            "Connected '{}' to {}/{}.",
            resource_id, credentials.server_name, credentials.database_name
        );
    }

    fn connect_error(&self, resource_id: &str, _credentials: &Credentials, messages: &[String]) {
        error!("Connect failed for '{}': {}", resource_id, messages.join("; "));
    }

    fn not_connected(&self, resource_id: &str) {
        info!("'{}' is not connected.", resource_id);
    }
}

/// Telemetry reporter that writes timings to the log.
#[derive(Debug, Default)]
pub struct LogTelemetryReporter;

impl TelemetryReporter for LogTelemetryReporter {
    fn connected(&self, timing: ConnectTiming) {
        info!(
            "Connect took {:?} total, {:?} in the service round-trip",
            timing.extension_connection_time, timing.service_connection_time
        );
    }
}
