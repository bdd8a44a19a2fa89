//! Persisted object references.

use std::fmt;
use std::str::FromStr;

use crate::error::{StorageError, StorageResult};

/// A (bucket, key) pair identifying a stored object.
///
/// Persisted in the catalog as the comma-joined string `"{bucket},{key}"`;
/// the structured pair is the in-process representation and the string is
/// only an external persistence detail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObjectRef {
    pub bucket: String,
    pub key: String,
}

impl ObjectRef {
    pub fn new(bucket: impl Into<String>, key: impl Into<String>) -> Self {
        Self {
            bucket: bucket.into(),
            key: key.into(),
        }
    }

    /// Parse the persisted `"{bucket},{key}"` encoding.
    ///
    /// Splits on the first comma; keys may themselves contain commas.
    pub fn parse(s: &str) -> StorageResult<Self> {
        let (bucket, key) = s
            .split_once(',')
            .ok_or_else(|| StorageError::invalid_reference(s))?;

        if bucket.is_empty() || key.is_empty() {
            return Err(StorageError::invalid_reference(s));
        }

        Ok(Self::new(bucket, key))
    }
}

impl fmt::Display for ObjectRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.bucket, self.key)
    }
}

impl FromStr for ObjectRef {
    type Err = StorageError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
