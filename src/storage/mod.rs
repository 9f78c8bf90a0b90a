//! Profile storage and persistence module.
//!
//! Handles the account collection, the worker directory and the session
//! slot, all persisted as JSON blobs through a [`KeyValueStore`].

pub mod backend;
pub mod defaults;
pub mod profiles;
pub mod session;
pub mod types;

// Re-export commonly used items
pub use backend::{FileStore, KeyValueStore, MemoryStore};
pub use defaults::generate_seed_workers;
pub use profiles::ProfileStore;
pub use session::Session;
pub use types::*;
