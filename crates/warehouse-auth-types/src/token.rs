//! JWT issuance and validation.

use std::sync::Arc;

use chrono::Utc;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Deserializer, Serialize};

/// Lifetime of a sign-in token.
pub const TOKEN_TTL_SECS: i64 = 5 * 60 * 60;

/// Errors returned by [`TokenKeys::validate`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum AuthError {
    #[error("signature mismatch")]
    SignatureMismatch,
    #[error("unexpected signing method")]
    AlgorithmMismatch,
    #[error("token expired")]
    Expired,
    #[error("malformed token")]
    Malformed,
}

/// JWT claims payload.
///
/// | Field | Meaning |
/// |-------|---------|
/// | `exp` | expiry, seconds since epoch |
/// | `iat` | issuance, seconds since epoch |
/// | `sub` | numeric user id (absent on the sign-out token) |
/// | `user` | username |
/// | `role` | role name, e.g. `"SysAdmin"` |
///
/// A `role` that is present but not a string decodes as `None`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    pub exp: i64,
    pub iat: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sub: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<String>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "string_or_none"
    )]
    pub role: Option<String>,
}

fn string_or_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(serde_json::Value::String(s)) => Some(s),
        _ => None,
    })
}

struct Keys {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
}

/// Signing material derived once from the process secret.
///
/// Cheap to clone; every clone shares the same keys.
#[derive(Clone)]
pub struct TokenKeys {
    keys: Arc<Keys>,
}

impl std::fmt::Debug for TokenKeys {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenKeys").finish_non_exhaustive()
    }
}

impl TokenKeys {
    pub fn new(secret: &str) -> Self {
        // HMAC family only. Leeway is zero so expiry is exact to the second.
        let mut validation = Validation::new(Algorithm::HS256);
        validation.algorithms = vec![Algorithm::HS256, Algorithm::HS384, Algorithm::HS512];
        validation.leeway = 0;
        validation.validate_exp = true;
        validation.set_required_spec_claims(&["exp"]);

        Self {
            keys: Arc::new(Keys {
                encoding: EncodingKey::from_secret(secret.as_bytes()),
                decoding: DecodingKey::from_secret(secret.as_bytes()),
                validation,
            }),
        }
    }

    /// Sign arbitrary claims with HS256.
    pub fn sign(&self, claims: &Claims) -> Result<String, jsonwebtoken::errors::Error> {
        encode(&Header::new(Algorithm::HS256), claims, &self.keys.encoding)
    }

    /// Issue a sign-in token valid for [`TOKEN_TTL_SECS`].
    pub fn issue(
        &self,
        sub: i32,
        user: &str,
        role: &str,
    ) -> Result<String, jsonwebtoken::errors::Error> {
        let now = Utc::now().timestamp();
        self.sign(&Claims {
            exp: now + TOKEN_TTL_SECS,
            iat: now,
            sub: Some(sub),
            user: Some(user.to_owned()),
            role: Some(role.to_owned()),
        })
    }

    /// Issue a token that is already expired (`exp == iat == now`).
    pub fn issue_expired(&self) -> Result<String, jsonwebtoken::errors::Error> {
        let now = Utc::now().timestamp();
        self.sign(&Claims {
            exp: now,
            iat: now,
            sub: None,
            user: None,
            role: None,
        })
    }

    /// Verify the signing method, signature and expiry, returning the claims.
    pub fn validate(&self, token: &str) -> Result<Claims, AuthError> {
        let data = decode::<Claims>(token, &self.keys.decoding, &self.keys.validation).map_err(
            |e| match e.kind() {
                ErrorKind::ExpiredSignature => AuthError::Expired,
                ErrorKind::InvalidSignature => AuthError::SignatureMismatch,
                ErrorKind::InvalidAlgorithm | ErrorKind::InvalidAlgorithmName => {
                    AuthError::AlgorithmMismatch
                }
                _ => AuthError::Malformed,
            },
        )?;

        // The library accepts `exp == now`; a token is dead from its exp second on.
        if data.claims.exp <= Utc::now().timestamp() {
            return Err(AuthError::Expired);
        }
        Ok(data.claims)
    }
}
