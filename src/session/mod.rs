//! Session persistence

pub mod blob;
pub mod store;

pub use blob::{BlobStore, FileStore, MemoryStore};
pub use store::{ScoreEntry, Session, SessionId, SessionStore};
