//! Entropy and Encoding Helpers
//!
//! Small helpers over the OS entropy source and base64, used for secret
//! generation and loading. Token signing itself lives with the session code.

use base64::{Engine, engine::general_purpose::STANDARD};
use rand::{RngCore, rngs::OsRng};

/// Fill a fresh buffer with `len` bytes from the OS entropy source
pub fn random_bytes(len: usize) -> Vec<u8> {
    let mut bytes = vec![0u8; len];
    OsRng.fill_bytes(&mut bytes);
    bytes
}

/// Standard-alphabet base64 of `bytes`
pub fn to_base64(bytes: &[u8]) -> String {
    STANDARD.encode(bytes)
}

/// Decode standard-alphabet base64
pub fn from_base64(s: &str) -> Result<Vec<u8>, base64::DecodeError> {
    STANDARD.decode(s)
}
