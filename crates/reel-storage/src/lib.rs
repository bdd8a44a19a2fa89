//! S3-compatible object storage client.
//!
//! This crate provides:
//! - The `ObjectStore` capability trait (put-object, presigned GET)
//! - An aws-sdk-s3 implementation with endpoint override for
//!   S3-compatible hosts
//! - The `ObjectRef` (bucket, key) value type and its comma-joined
//!   persistence encoding

pub mod client;
pub mod error;
pub mod reference;
pub mod store;

pub use client::{S3Client, S3Config};
pub use error::{StorageError, StorageResult};
pub use reference::ObjectRef;
pub use store::ObjectStore;
