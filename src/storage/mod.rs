pub mod profile;
pub mod store;

// Re-export the modules here for easy import elsewhere.
pub use profile::*;
pub use store::*;
