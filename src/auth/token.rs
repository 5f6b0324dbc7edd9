//! Stateless session tokens.
//!
//! A token is a signed HS256 JWT carrying the user's display name as the
//! subject and a 30-minute expiry. Validity is determined purely by
//! signature and expiry - there is no server-side session store, and logout
//! only clears the client cookie.

use jwt_simple::prelude::*;

use crate::error::{AppError, Result};

/// Session lifetime: 30 minutes.
pub const SESSION_TTL_SECS: u64 = 30 * 60;

/// Issue a session token for a user identified by display name.
pub fn issue_token(secret: &str, display_name: &str) -> Result<String> {
    issue_token_with_ttl(secret, display_name, SESSION_TTL_SECS)
}

/// Issue a token with an explicit lifetime. Exposed for expiry testing.
pub fn issue_token_with_ttl(secret: &str, display_name: &str, ttl_secs: u64) -> Result<String> {
    let key = HS256Key::from_bytes(secret.as_bytes());
    let claims = Claims::create(Duration::from_secs(ttl_secs)).with_subject(display_name);
    key.authenticate(claims)
        .map_err(|e| AppError::Internal(format!("Failed to sign session token: {}", e)))
}

/// Validate a token and return the subject (display name).
///
/// Any failure - bad signature, expiry, garbage input, missing subject -
/// yields `None`. Expired and garbled cookies are steady-state occurrences,
/// so this never raises toward the caller.
pub fn validate_token(secret: &str, token: &str) -> Option<String> {
    let key = HS256Key::from_bytes(secret.as_bytes());
    let options = VerificationOptions {
        // No clock tolerance: a token is invalid the moment it expires.
        time_tolerance: Some(Duration::from_secs(0)),
        ..Default::default()
    };

    match key.verify_token::<NoCustomClaims>(token, Some(options)) {
        Ok(claims) => claims.subject,
        Err(e) => {
            tracing::debug!("Session token rejected: {}", e);
            None
        }
    }
}
