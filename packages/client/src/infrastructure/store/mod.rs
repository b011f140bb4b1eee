//! Credential store implementations.
//!
//! - `file`: JSON file on disk (the terminal client's persistent storage)
//! - `inmemory`: process-local storage for tests and ephemeral sessions

pub mod file;
pub mod inmemory;

pub use file::FileCredentialStore;
pub use inmemory::InMemoryCredentialStore;
