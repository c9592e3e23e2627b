//! Local storage for synthesized audio clips
//!
//! Every clip gets its own file name, and files are renamed into place only
//! after their bytes are flushed, so concurrent requests never observe or
//! clobber each other's partial writes.

#![allow(clippy::must_use_candidate, clippy::missing_errors_doc)]

mod error;
mod store;
mod sweeper;

pub use error::{Result, StorageError};
pub use store::{AudioStore, StoredClip};
pub use sweeper::spawn_sweeper;
