//! Storage key generation.
//!
//! Stored objects are named by a random, URL-safe, content-independent key
//! rather than anything derived from user input, so concurrent uploads never
//! contend for the same object name.

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use rand::RngCore;

/// Entropy width of a storage key.
pub const STORAGE_KEY_BYTES: usize = 32;

/// Generate a random storage key: 32 CSPRNG bytes as unpadded base64url
/// (43 characters).
pub fn generate_storage_key() -> String {
    let mut bytes = [0u8; STORAGE_KEY_BYTES];
    rand::rng().fill_bytes(&mut bytes);
    URL_SAFE_NO_PAD.encode(bytes)
}
