//! # calendar-storage
//!
//! Media layer for event galleries.
//!
//! ## Features
//!
//! - **Local store**: image files under a configurable media root (`tokio::fs`)
//! - **Memory store**: the same interface kept in memory, for tests and tooling
//! - **Archives**: in-memory ZIP bundles for bulk image download
//!
//! ## Example
//!
//! ```ignore
//! use calendar_storage::{ArchiveBuilder, LocalMediaStore};
//! use calendar_core::MediaStore;
//!
//! let store = LocalMediaStore::from_config(&config.storage);
//! store.save("event_images/2024/06/01/a.jpg", &bytes).await?;
//!
//! let mut archive = ArchiveBuilder::new();
//! archive.add_file("a.jpg", &store.read("event_images/2024/06/01/a.jpg").await?)?;
//! let zip_bytes = archive.finish()?;
//! ```

pub mod archive;
pub mod error;
pub mod local;
pub mod memory;

pub use archive::ArchiveBuilder;
pub use error::{StorageError, StorageResult};
pub use local::LocalMediaStore;
pub use memory::InMemoryMediaStore;
