//! User Name
//!
//! ログインと画面表示に使う公開ハンドル。入力時の大文字小文字は表示用に
//! 残し、一意性の判定は canonical（小文字正規形）側で行います。
//!
//! ## ルール
//! - 検証は NFKC 正規化と trim を済ませた後の形に対して行う
//! - 長さは 3〜30 文字
//! - 使える文字は a-z / 0-9 / `_` / `.` / `-`
//! - 先頭と末尾に `.` と `-` は置けない
//! - `..` の連続と記号だけの名前は不可
//! - ルーティングや運用アカウントと衝突する語は予約済み

use serde::{Deserialize, Serialize};
use std::fmt;
use unicode_normalization::UnicodeNormalization;

// ============================================================================
// Constants
// ============================================================================

/// Minimum length for a user name (in characters)
pub const USER_NAME_MIN_LENGTH: usize = 3;

/// Maximum length for a user name (in characters)
pub const USER_NAME_MAX_LENGTH: usize = 30;

/// Names that collide with routes or operational accounts
#[rustfmt::skip]
const RESERVED_NAMES: &[&str] = &[
    // Routing
    "listings", "listing", "reviews", "review", "login", "logout", "signup",
    "signin", "signout", "register", "session", "sessions", "new", "edit",
    "delete", "search", "api", "static", "assets",
    // Operational
    "admin", "administrator", "root", "system", "support", "help", "official",
    "moderator", "staff",
    // Placeholders
    "me", "self", "user", "users", "anonymous", "guest", "test", "demo",
    "null", "undefined",
];

// ============================================================================
// Error Types
// ============================================================================

/// Why a candidate name was rejected
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserNameError {
    /// Empty after normalization
    Empty,

    /// Shorter than USER_NAME_MIN_LENGTH
    TooShort { length: usize },

    /// Longer than USER_NAME_MAX_LENGTH
    TooLong { length: usize },

    /// Contains a character outside the allowed set
    InvalidCharacter { char: char },

    /// Starts or ends with a character other than alphanumeric or `_`
    InvalidBoundary { char: char },

    /// Contains consecutive dots (`..`)
    ConsecutiveDots,

    /// Contains no letters or digits at all
    SymbolsOnly,

    /// Collides with a reserved name
    Reserved { word: String },
}

impl fmt::Display for UserNameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "Username cannot be empty"),
            Self::TooShort { length } => write!(
                f,
                "Username is too short ({length} chars, minimum {USER_NAME_MIN_LENGTH})"
            ),
            Self::TooLong { length } => write!(
                f,
                "Username is too long ({length} chars, maximum {USER_NAME_MAX_LENGTH})"
            ),
            Self::InvalidCharacter { char } => write!(
                f,
                "Username cannot contain '{char}'. Only a-z, 0-9, _, ., - are allowed"
            ),
            Self::InvalidBoundary { char } => write!(
                f,
                "Username cannot start or end with '{char}'. Use a letter, digit, or _"
            ),
            Self::ConsecutiveDots => write!(f, "Username cannot contain consecutive dots (..)"),
            Self::SymbolsOnly => write!(f, "Username must contain at least one letter or digit"),
            Self::Reserved { word } => write!(f, "'{word}' is a reserved username"),
        }
    }
}

impl std::error::Error for UserNameError {}

// ============================================================================
// UserName
// ============================================================================

/// A user name that passed validation, kept in both spellings
///
/// - `original`: the input after trim and NFKC, case preserved, for display
/// - `canonical`: the lowercase form, used for uniqueness checks and lookups
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct UserName {
    original: String,
    canonical: String,
}

impl UserName {
    /// Create a UserName from raw input, normalizing (NFKC, trim) and validating.
    pub fn new(input: impl AsRef<str>) -> Result<Self, UserNameError> {
        let original = input.as_ref().nfkc().collect::<String>().trim().to_string();
        let canonical = original.to_lowercase();
        Self::validate(&canonical)?;
        Ok(Self {
            original,
            canonical,
        })
    }

    /// Rebuild from a stored value (already validated at registration time).
    pub fn from_db(original: &str) -> Self {
        Self {
            original: original.to_string(),
            canonical: original.to_lowercase(),
        }
    }

    /// Display form (preserves case)
    #[inline]
    pub fn original(&self) -> &str {
        &self.original
    }

    /// Canonical (lowercase) form used for uniqueness
    #[inline]
    pub fn canonical(&self) -> &str {
        &self.canonical
    }

    /// Alias for canonical()
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.canonical
    }

    /// Check whether a raw input would collide with a reserved name
    pub fn is_reserved(name: &str) -> bool {
        let canonical = name.nfkc().collect::<String>().trim().to_lowercase();
        RESERVED_NAMES.contains(&canonical.as_str())
    }

    fn validate(canonical: &str) -> Result<(), UserNameError> {
        if canonical.is_empty() {
            return Err(UserNameError::Empty);
        }

        let length = canonical.chars().count();
        if length < USER_NAME_MIN_LENGTH {
            return Err(UserNameError::TooShort { length });
        }
        if length > USER_NAME_MAX_LENGTH {
            return Err(UserNameError::TooLong { length });
        }

        if let Some(bad) = canonical.chars().find(|c| !Self::is_valid_char(*c)) {
            return Err(UserNameError::InvalidCharacter { char: bad });
        }

        // Both edges exist; emptiness was ruled out above
        let edges = [canonical.chars().next(), canonical.chars().next_back()];
        for edge in edges.into_iter().flatten() {
            if !Self::is_valid_boundary_char(edge) {
                return Err(UserNameError::InvalidBoundary { char: edge });
            }
        }

        if canonical.contains("..") {
            return Err(UserNameError::ConsecutiveDots);
        }

        if !canonical.chars().any(|c| c.is_ascii_alphanumeric()) {
            return Err(UserNameError::SymbolsOnly);
        }

        if RESERVED_NAMES.contains(&canonical) {
            return Err(UserNameError::Reserved {
                word: canonical.to_string(),
            });
        }

        Ok(())
    }

    #[inline]
    fn is_valid_char(c: char) -> bool {
        c.is_ascii_lowercase() || c.is_ascii_digit() || matches!(c, '_' | '.' | '-')
    }

    #[inline]
    fn is_valid_boundary_char(c: char) -> bool {
        c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_'
    }
}

impl fmt::Debug for UserName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UserName")
            .field("original", &self.original)
            .field("canonical", &self.canonical)
            .finish()
    }
}

impl fmt::Display for UserName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.original)
    }
}

impl AsRef<str> for UserName {
    fn as_ref(&self) -> &str {
        &self.canonical
    }
}

impl TryFrom<String> for UserName {
    type Error = UserNameError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl TryFrom<&str> for UserName {
    type Error = UserNameError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<UserName> for String {
    fn from(name: UserName) -> Self {
        name.original
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    mod normalization {
        use super::*;

        #[test]
        fn test_trims_and_lowercases() {
            let name = UserName::new("  MaReN_07  ").unwrap();
            assert_eq!(name.canonical(), "maren_07");
            assert_eq!(name.original(), "MaReN_07");
        }

        #[test]
        fn test_display_preserves_case() {
            let name = UserName::new("Maren").unwrap();
            assert_eq!(format!("{name}"), "Maren");
            assert_eq!(name.as_str(), "maren");
        }

        #[test]
        fn test_nfkc_folds_full_width() {
            // Full-width 'Ｍ' (U+FF2D) becomes ASCII after NFKC
            let name = UserName::new("Ｍaren").unwrap();
            assert_eq!(name.canonical(), "maren");
        }
    }

    mod length {
        use super::*;

        #[test]
        fn test_empty() {
            assert!(matches!(UserName::new(""), Err(UserNameError::Empty)));
            assert!(matches!(UserName::new("   "), Err(UserNameError::Empty)));
        }

        #[test]
        fn test_too_short() {
            assert!(matches!(
                UserName::new("ab"),
                Err(UserNameError::TooShort { length: 2 })
            ));
        }

        #[test]
        fn test_bounds() {
            assert!(UserName::new("abc").is_ok());
            assert!(UserName::new("a".repeat(USER_NAME_MAX_LENGTH)).is_ok());
            assert!(matches!(
                UserName::new("a".repeat(USER_NAME_MAX_LENGTH + 1)),
                Err(UserNameError::TooLong { .. })
            ));
        }
    }

    mod charset {
        use super::*;

        #[test]
        fn test_allowed_characters() {
            assert!(UserName::new("alice123").is_ok());
            assert!(UserName::new("alice_bob").is_ok());
            assert!(UserName::new("alice.bob").is_ok());
            assert!(UserName::new("alice-bob").is_ok());
        }

        #[test]
        fn test_rejected_characters() {
            assert!(matches!(
                UserName::new("alice@bob"),
                Err(UserNameError::InvalidCharacter { char: '@' })
            ));
            assert!(matches!(
                UserName::new("alice bob"),
                Err(UserNameError::InvalidCharacter { char: ' ' })
            ));
            assert!(matches!(
                UserName::new("日本語です"),
                Err(UserNameError::InvalidCharacter { .. })
            ));
        }

        #[test]
        fn test_boundary_characters() {
            assert!(UserName::new("_alice").is_ok());
            assert!(UserName::new("alice_").is_ok());
            assert!(matches!(
                UserName::new(".alice"),
                Err(UserNameError::InvalidBoundary { char: '.' })
            ));
            assert!(matches!(
                UserName::new("alice-"),
                Err(UserNameError::InvalidBoundary { char: '-' })
            ));
        }

        #[test]
        fn test_consecutive_dots() {
            assert!(UserName::new("alice.bob").is_ok());
            assert!(matches!(
                UserName::new("alice..bob"),
                Err(UserNameError::ConsecutiveDots)
            ));
        }

        #[test]
        fn test_symbols_only() {
            assert!(matches!(
                UserName::new("___"),
                Err(UserNameError::SymbolsOnly)
            ));
        }
    }

    mod reserved {
        use super::*;

        #[test]
        fn test_route_collisions_rejected() {
            for word in ["listings", "login", "signup", "new", "admin"] {
                assert!(
                    matches!(UserName::new(word), Err(UserNameError::Reserved { .. })),
                    "expected '{word}' to be reserved"
                );
            }
        }

        #[test]
        fn test_reserved_is_case_insensitive() {
            assert!(matches!(
                UserName::new("ADMIN"),
                Err(UserNameError::Reserved { word }) if word == "admin"
            ));
        }

        #[test]
        fn test_is_reserved_helper() {
            assert!(UserName::is_reserved("Listings"));
            assert!(!UserName::is_reserved("alice"));
        }
    }

    mod serde_support {
        use super::*;

        #[test]
        fn test_serializes_original_form() {
            let name = UserName::new("Alice").unwrap();
            assert_eq!(serde_json::to_string(&name).unwrap(), "\"Alice\"");
        }

        #[test]
        fn test_deserialize_validates() {
            let name: UserName = serde_json::from_str("\"ALICE\"").unwrap();
            assert_eq!(name.canonical(), "alice");
            assert!(serde_json::from_str::<UserName>("\"ab\"").is_err());
        }
    }

    mod storage {
        use super::*;

        #[test]
        fn test_from_db_keeps_case_pair() {
            let name = UserName::from_db("Alice");
            assert_eq!(name.original(), "Alice");
            assert_eq!(name.canonical(), "alice");
        }
    }
}
