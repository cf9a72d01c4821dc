#![forbid(unsafe_code)]

pub mod catalog;
pub mod codec;
pub mod repository;
pub mod sqlite;

pub use catalog::{CatalogError, parse_catalog, read_catalog};
pub use repository::{InMemoryProgressStore, ProgressStore, Storage, StorageError};
