pub mod connection_manager;
pub mod errors;
pub mod session;

// Re-export the modules here for easy import elsewhere.
pub use connection_manager::*;
pub use errors::*;
pub use session::*;
