/// Access token claim decoding
///
/// The client never verifies the signature; it only reads the payload to
/// learn the role. The backend remains the authority on every request.
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use serde::Deserialize;
use std::fmt;

use crate::error::TokenError;

/// Roles the backend issues in the `role` claim
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Role {
    Admin,
    /// Floor photo uploaders (`pisos`)
    Floors,
    /// Vehicle photo uploaders (`coches`)
    Cars,
    /// Any other claimed value
    Other(String),
}

impl Role {
    pub fn from_claim(claim: &str) -> Self {
        match claim {
            "Admin" => Role::Admin,
            "pisos" => Role::Floors,
            "coches" => Role::Cars,
            other => Role::Other(other.to_string()),
        }
    }

    /// Wire value of the claim
    pub fn as_str(&self) -> &str {
        match self {
            Role::Admin => "Admin",
            Role::Floors => "pisos",
            Role::Cars => "coches",
            Role::Other(claim) => claim,
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Deserialize)]
struct Claims {
    role: Option<serde_json::Value>,
}

/// Decode the `role` claim of a JWT without verifying it.
pub fn decode_role(token: &str) -> Result<Role, TokenError> {
    let mut segments = token.trim().split('.');
    let payload = match (segments.next(), segments.next(), segments.next(), segments.next()) {
        (Some(_), Some(payload), Some(_), None) if !payload.is_empty() => payload,
        _ => return Err(TokenError::Malformed),
    };

    // Some issuers keep the padding
    let bytes = URL_SAFE_NO_PAD
        .decode(payload.trim_end_matches('='))
        .map_err(|_| TokenError::Encoding)?;

    let claims: Claims =
        serde_json::from_slice(&bytes).map_err(|e| TokenError::Payload(e.to_string()))?;

    match claims.role {
        Some(serde_json::Value::String(role)) => Ok(Role::from_claim(&role)),
        _ => Err(TokenError::MissingRole),
    }
}

/// Build an unsigned token carrying the given claims. Test helper.
#[cfg(test)]
pub fn encode_test_token(claims: &serde_json::Value) -> String {
    let header = URL_SAFE_NO_PAD.encode(br#"{"alg":"HS256","typ":"JWT"}"#);
    let payload = URL_SAFE_NO_PAD.encode(claims.to_string());
    format!("{header}.{payload}.c2lnbmF0dXJl")
}
