//! Session Cookie Plumbing
//!
//! Building and parsing for the session cookie. The session token is the only
//! cookie this system issues; it is always HttpOnly and carries a Max-Age.

use axum::http::{HeaderMap, HeaderValue, header};

/// SameSite policy for cookies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SameSite {
    Strict,
    #[default]
    Lax,
    None,
}

impl SameSite {
    pub fn as_str(&self) -> &'static str {
        match self {
            SameSite::Strict => "Strict",
            SameSite::Lax => "Lax",
            SameSite::None => "None",
        }
    }
}

/// Attributes stamped onto every Set-Cookie this crate emits
#[derive(Debug, Clone)]
pub struct CookieConfig {
    pub name: String,
    pub secure: bool,
    pub http_only: bool,
    pub same_site: SameSite,
    pub path: String,
    pub max_age_secs: Option<i64>,
}

impl Default for CookieConfig {
    fn default() -> Self {
        Self {
            name: "session".to_string(),
            secure: true,
            http_only: true,
            same_site: SameSite::Lax,
            path: "/".to_string(),
            max_age_secs: None,
        }
    }
}

impl CookieConfig {
    /// Serialize a Set-Cookie header value carrying `value`
    pub fn build_set_cookie(&self, value: &str) -> String {
        let attributes = [
            self.http_only.then(|| "HttpOnly".to_string()),
            self.secure.then(|| "Secure".to_string()),
            Some(format!("SameSite={}", self.same_site.as_str())),
            Some(format!("Path={}", self.path)),
            self.max_age_secs.map(|secs| format!("Max-Age={secs}")),
        ];

        let mut parts = vec![format!("{}={}", self.name, value)];
        parts.extend(attributes.into_iter().flatten());
        parts.join("; ")
    }
}

/// Pull one cookie's value out of the request headers
pub fn extract_cookie(headers: &HeaderMap, name: &str) -> Option<String> {
    let raw = headers.get(header::COOKIE)?.to_str().ok()?;

    raw.split(';').find_map(|pair| {
        let (key, value) = pair.trim().split_once('=')?;
        (key == name).then(|| value.to_string())
    })
}

/// Build the Set-Cookie header value for a response
pub fn set_cookie_header(config: &CookieConfig, value: &str) -> HeaderValue {
    // Tokens are ASCII, so this only fails on a misconfigured name/path
    HeaderValue::from_str(&config.build_set_cookie(value))
        .unwrap_or_else(|_| HeaderValue::from_static(""))
}
