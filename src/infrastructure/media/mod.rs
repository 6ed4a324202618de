//! Filesystem-backed media storage.

pub mod file_store;

pub use file_store::FileStore;
