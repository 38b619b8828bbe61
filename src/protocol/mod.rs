pub mod client;
pub mod types;

// Re-export the modules here for easy import elsewhere.
pub use client::*;
pub use types::*;
