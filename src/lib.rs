pub mod core;
pub mod protocol;
pub mod reporting;
pub mod storage;
pub mod ui;
pub mod utils;

// re‑export ergonomic entry points
pub use core::connection_manager::ConnectionManager;
pub use core::session::{Credentials, Session, SessionRegistry};
