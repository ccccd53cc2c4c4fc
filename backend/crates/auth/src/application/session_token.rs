//! Session Token Signing
//!
//! Cookie tokens are `{session_id}.{signature}` where the signature is
//! HMAC-SHA256 over the session id string, base64url-encoded without
//! padding. Only the id is stored client-side; everything else lives in
//! the session row.

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use hmac::{Hmac, Mac};
use sha2::Sha256;
use uuid::Uuid;

use crate::application::config::AuthConfig;
use crate::domain::value_object::session_id::SessionId;
use crate::error::{AuthError, AuthResult};

/// Sign a session id into a cookie token
pub(crate) fn issue_session_token(config: &AuthConfig, session_id: SessionId) -> String {
    let session_id = session_id.to_string();

    let mut mac = Hmac::<Sha256>::new_from_slice(&config.session_secret)
        .expect("HMAC can take key of any size");
    mac.update(session_id.as_bytes());
    let signature = mac.finalize().into_bytes();

    format!("{}.{}", session_id, URL_SAFE_NO_PAD.encode(signature))
}

/// Parse and verify a cookie token, returning the session id
pub(crate) fn parse_session_token(config: &AuthConfig, token: &str) -> AuthResult<SessionId> {
    let Some((session_id_str, signature_b64)) = token.split_once('.') else {
        return Err(AuthError::SessionInvalid);
    };

    let mut mac = Hmac::<Sha256>::new_from_slice(&config.session_secret)
        .expect("HMAC can take key of any size");
    mac.update(session_id_str.as_bytes());

    let signature = URL_SAFE_NO_PAD
        .decode(signature_b64)
        .map_err(|_| AuthError::SessionInvalid)?;

    mac.verify_slice(&signature)
        .map_err(|_| AuthError::SessionInvalid)?;

    let session_id: Uuid = session_id_str
        .parse()
        .map_err(|_| AuthError::SessionInvalid)?;

    Ok(SessionId::from_uuid(session_id))
}
