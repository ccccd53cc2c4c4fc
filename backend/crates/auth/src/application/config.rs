//! Auth Configuration
//!
//! Session and credential settings the binary assembles at startup.
//! The one hard requirement is a 32-byte HMAC secret; everything else
//! carries a sensible default.

use std::time::Duration;

use platform::cookie::CookieConfig;

/// SameSite lives with the cookie code; re-exported for configuring callers
pub use platform::cookie::SameSite;

/// Auth application configuration
#[derive(Debug, Clone)]
pub struct AuthConfig {
    /// Cookie the signed session token travels in
    pub session_cookie_name: String,
    /// HMAC key for session tokens. All zeroes only in `Default`
    pub session_secret: [u8; 32],
    /// Session lifetime (1 week)
    pub session_ttl: Duration,
    /// Minimum idle time before an unmodified session is written back (24 hours)
    pub session_touch_threshold: Duration,
    /// Send the cookie over HTTPS only
    pub cookie_secure: bool,
    /// SameSite attribute stamped on the cookie
    pub cookie_same_site: SameSite,
    /// Application-wide secret mixed into password hashing (optional)
    pub password_pepper: Option<Vec<u8>>,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            session_cookie_name: "session".to_string(),
            session_secret: [0u8; 32],
            session_ttl: Duration::from_secs(7 * 24 * 3600), // 1 week
            session_touch_threshold: Duration::from_secs(24 * 3600), // 24 hours
            cookie_secure: true,
            cookie_same_site: SameSite::Lax,
            password_pepper: None,
        }
    }
}

impl AuthConfig {
    /// Random throwaway secret; existing sessions die with the process
    pub fn with_random_secret() -> Self {
        let mut session_secret = [0u8; 32];
        session_secret.copy_from_slice(&platform::crypto::random_bytes(32));
        Self {
            session_secret,
            ..Default::default()
        }
    }

    /// Development profile: random secret plus a cookie that works over
    /// plain HTTP
    pub fn development() -> Self {
        Self {
            cookie_secure: false,
            ..Self::with_random_secret()
        }
    }

    /// Session TTL as a chrono duration, for expiry arithmetic
    pub fn session_ttl(&self) -> chrono::Duration {
        chrono::Duration::milliseconds(self.session_ttl_ms())
    }

    /// Session TTL in milliseconds
    pub fn session_ttl_ms(&self) -> i64 {
        self.session_ttl.as_millis() as i64
    }

    /// Touch threshold as a chrono duration
    pub fn touch_threshold(&self) -> chrono::Duration {
        chrono::Duration::milliseconds(self.session_touch_threshold.as_millis() as i64)
    }

    /// Pepper bytes, if configured
    pub fn pepper(&self) -> Option<&[u8]> {
        self.password_pepper.as_deref()
    }

    /// Cookie settings for the session token.
    ///
    /// Always HttpOnly: the token is never meant for script access.
    pub fn cookie_config(&self) -> CookieConfig {
        CookieConfig {
            name: self.session_cookie_name.clone(),
            secure: self.cookie_secure,
            http_only: true,
            same_site: self.cookie_same_site,
            path: "/".to_string(),
            max_age_secs: Some(self.session_ttl.as_secs() as i64),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AuthConfig::default();
        assert_eq!(config.session_cookie_name, "session");
        assert_eq!(config.session_ttl_ms(), 7 * 24 * 3600 * 1000);
        assert_eq!(config.touch_threshold(), chrono::Duration::hours(24));
        assert!(config.cookie_secure);
    }

    #[test]
    fn test_random_secret_is_not_zero() {
        let config = AuthConfig::with_random_secret();
        assert_ne!(config.session_secret, [0u8; 32]);
    }

    #[test]
    fn test_cookie_config_is_http_only_with_ttl() {
        let config = AuthConfig::default().cookie_config();
        assert!(config.http_only);
        assert_eq!(config.max_age_secs, Some(604_800));
    }
}
