//! HomeChores Profile Store
//!
//! Local data-access layer for a two-sided service marketplace: regular
//! users and service workers register, sign in, browse the worker directory
//! and manage pricing and credentials.
//!
//! # Features
//!
//! - Account registration with unique emails and salted password hashes
//! - A persisted session slot that survives restarts
//! - Worker profile updates kept in step across every stored view
//! - Directory filtering and sorting, seeded with synthetic workers
//!
//! # Example
//!
//! ```
//! use homechores::directory::{DirectoryQuery, SortKey, list_workers};
//! use homechores::storage::{MemoryStore, ProfileStore, WorkerUpdate};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let mut store = ProfileStore::open_seeded(MemoryStore::new(), 7)?;
//!     store.ensure_directory_seeded()?;
//!
//!     let query = DirectoryQuery {
//!         sort: SortKey::RatingDesc,
//!         ..Default::default()
//!     };
//!     let best = list_workers(&store.directory()?, &query);
//!     assert_eq!(best.len(), 16);
//!
//!     // Profile updates need a signed-in worker
//!     assert!(store.update_worker_profile(&WorkerUpdate::default().price(40.0)).is_err());
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod directory;
pub mod error;
pub mod logging;
pub mod storage;
pub mod utils;

// Re-exports for convenience
pub use error::{ChoresError, Result};
pub use storage::{FileStore, KeyValueStore, MemoryStore, Profile, ProfileStore};
