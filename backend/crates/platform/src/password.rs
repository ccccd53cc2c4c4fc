//! Password handling built on Argon2id.
//!
//! Incoming passwords are NFKC-normalized, checked against a small
//! guessability policy (NIST SP 800-63B length rules plus a deny list),
//! then hashed into PHC strings with an optional server-side pepper.
//! Cleartext material is zeroized when dropped.

use std::fmt;

use argon2::{Argon2, PasswordHash, PasswordHasher, PasswordVerifier, password_hash::SaltString};
use rand::rngs::OsRng;
use thiserror::Error;
use unicode_normalization::UnicodeNormalization;
use zeroize::{Zeroize, ZeroizeOnDrop};

/// NIST SP 800-63B: SHALL accept at least 8 characters.
pub const MIN_PASSWORD_LENGTH: usize = 8;

/// NIST SP 800-63B: SHOULD permit at least 64. We cap at 128.
pub const MAX_PASSWORD_LENGTH: usize = 128;

/// Rejections from the password acceptance policy.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PasswordPolicyError {
    #[error("Password must be at least {min} characters ({actual} given)")]
    TooShort { min: usize, actual: usize },

    #[error("Password must be at most {max} characters ({actual} given)")]
    TooLong { max: usize, actual: usize },

    #[error("Password cannot be empty or all whitespace")]
    EmptyOrWhitespace,

    #[error("Password contains control characters")]
    InvalidCharacter,

    #[error("Password is too easy to guess")]
    CommonPattern,
}

/// Failures while producing or parsing an Argon2 hash.
#[derive(Debug, Error)]
pub enum PasswordHashError {
    #[error("Password hashing failed: {0}")]
    HashingFailed(String),

    #[error("Invalid password hash format")]
    InvalidHashFormat,
}

/// A password as the user typed it, erased from memory on drop.
///
/// Construction runs the acceptance policy, so holding one of these
/// means the value already passed validation. The type is deliberately
/// not `Clone` and its `Debug` output is redacted.
///
/// ```
/// use platform::password::ClearTextPassword;
///
/// let password = ClearTextPassword::new("rain on tin roofs".to_string()).unwrap();
/// let hashed = password.hash(None).unwrap();
/// assert!(hashed.verify(&password, None));
/// ```
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct ClearTextPassword(String);

impl ClearTextPassword {
    /// Validate a raw password and wrap it.
    ///
    /// The input is NFKC-normalized first so visually-equivalent forms
    /// (full-width digits, composed accents) are judged and hashed the
    /// same way. Lengths count code points, not bytes.
    pub fn new(raw: String) -> Result<Self, PasswordPolicyError> {
        let normalized: String = raw.nfkc().collect();

        if normalized.trim().is_empty() {
            return Err(PasswordPolicyError::EmptyOrWhitespace);
        }

        let length = normalized.chars().count();
        if length < MIN_PASSWORD_LENGTH {
            return Err(PasswordPolicyError::TooShort {
                min: MIN_PASSWORD_LENGTH,
                actual: length,
            });
        }
        if length > MAX_PASSWORD_LENGTH {
            return Err(PasswordPolicyError::TooLong {
                max: MAX_PASSWORD_LENGTH,
                actual: length,
            });
        }

        // Tabs and newlines are tolerated, anything else from the
        // control planes is not.
        if normalized
            .chars()
            .any(|ch| ch.is_control() && !matches!(ch, '\t' | '\n'))
        {
            return Err(PasswordPolicyError::InvalidCharacter);
        }

        if is_guessable(&normalized) {
            return Err(PasswordPolicyError::CommonPattern);
        }

        Ok(Self(normalized))
    }

    /// Skip validation. Test-only, for exercising hash and verify paths
    /// with fixed inputs.
    #[cfg(test)]
    pub fn new_unchecked(raw: String) -> Self {
        Self(raw)
    }

    fn as_bytes(&self) -> &[u8] {
        self.0.as_bytes()
    }

    /// Hash with Argon2id into a PHC string.
    ///
    /// When a pepper is supplied it is appended to the password before
    /// hashing; verification must then supply the same pepper.
    pub fn hash(&self, pepper: Option<&[u8]>) -> Result<HashedPassword, PasswordHashError> {
        let mut material = peppered(self.as_bytes(), pepper);
        let salt = SaltString::generate(OsRng);

        // Default parameters track the current OWASP recommendation
        // (Argon2id, m=19456 KiB, t=2, p=1).
        let outcome = Argon2::default()
            .hash_password(&material, &salt)
            .map(|hash| HashedPassword {
                phc: hash.to_string(),
            })
            .map_err(|e| PasswordHashError::HashingFailed(e.to_string()));

        material.zeroize();
        outcome
    }
}

impl fmt::Debug for ClearTextPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ClearTextPassword([REDACTED])")
    }
}

/// An Argon2id hash in PHC string form, safe to persist.
#[derive(Clone, PartialEq, Eq)]
pub struct HashedPassword {
    phc: String,
}

impl HashedPassword {
    /// Parse a stored PHC string, rejecting anything malformed.
    pub fn from_phc_string(s: impl Into<String>) -> Result<Self, PasswordHashError> {
        let phc = s.into();
        PasswordHash::new(&phc).map_err(|_| PasswordHashError::InvalidHashFormat)?;
        Ok(Self { phc })
    }

    /// The PHC string, for storage.
    pub fn as_phc_string(&self) -> &str {
        &self.phc
    }

    /// Check a cleartext password against this hash.
    ///
    /// The pepper must match the one used at hashing time. Comparison of
    /// the derived key is constant-time inside the argon2 crate.
    pub fn verify(&self, password: &ClearTextPassword, pepper: Option<&[u8]>) -> bool {
        let Ok(parsed) = PasswordHash::new(&self.phc) else {
            return false;
        };

        let mut material = peppered(password.as_bytes(), pepper);
        let ok = Argon2::default()
            .verify_password(&material, &parsed)
            .is_ok();

        material.zeroize();
        ok
    }
}

impl fmt::Debug for HashedPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "HashedPassword([PHC])")
    }
}

/// Append the pepper so equal passwords under different peppers hash apart.
fn peppered(password: &[u8], pepper: Option<&[u8]>) -> Vec<u8> {
    let mut material = password.to_vec();
    if let Some(pepper) = pepper {
        material.extend_from_slice(pepper);
    }
    material
}

/// Trivially guessable shapes: one repeated character, a sequential
/// digit run, a keyboard row, or a top-of-the-breach-corpus password.
fn is_guessable(password: &str) -> bool {
    let lower = password.to_lowercase();

    let mut chars = lower.chars();
    if let Some(first) = chars.next() {
        if lower.chars().count() >= 3 && chars.all(|c| c == first) {
            return true;
        }
    }

    if digits_run_sequentially(&lower) {
        return true;
    }

    #[rustfmt::skip]
    const KEYBOARD_RUNS: &[&str] = &[
        "qwerty", "qwertyuiop", "asdfgh", "asdfghjkl", "zxcvbn", "qazwsx",
        "1qaz2wsx",
    ];
    if KEYBOARD_RUNS.iter().any(|run| lower.contains(run)) {
        return true;
    }

    #[rustfmt::skip]
    const TOP_PASSWORDS: &[&str] = &[
        "password", "password1", "password123", "12345678", "123456789",
        "1234567890", "abcdefgh", "letmein", "welcome", "iloveyou",
        "sunshine", "monkey", "dragon", "princess", "football", "baseball",
        "shadow", "master", "trustno1", "admin123",
    ];
    TOP_PASSWORDS.contains(&lower.as_str())
}

/// True when the digits of `s`, taken in order, step up or down by one
/// (with 9->0 / 0->9 wraparound). Needs at least four digits to fire.
fn digits_run_sequentially(s: &str) -> bool {
    let digits: Vec<u32> = s.chars().filter_map(|c| c.to_digit(10)).collect();
    if digits.len() < 4 {
        return false;
    }

    let ascending = digits.windows(2).all(|w| (w[0] + 1) % 10 == w[1]);
    let descending = digits.windows(2).all(|w| (w[1] + 1) % 10 == w[0]);
    ascending || descending
}
