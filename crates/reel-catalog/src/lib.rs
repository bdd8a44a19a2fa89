//! Video metadata store capability.
//!
//! The catalog is an external collaborator of the upload pipeline: a
//! keyed store of [`reel_models::VideoRecord`]s with fetch-by-id and
//! full-record update. Handlers depend on the [`VideoStore`] trait; the
//! in-memory implementation backs development and tests.

pub mod error;
pub mod memory;
pub mod store;

pub use error::{CatalogError, CatalogResult};
pub use memory::MemoryStore;
pub use store::VideoStore;
