use chrono::Duration;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;
use serde_json::Map;
use serde_json::Value;

use super::errors::JwtError;

/// Session token claims.
///
/// Carries the identity of a credential record (`sub`, `email`) and an
/// absolute expiry (`exp`, Unix seconds).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Claims {
    /// Subject (credential record identifier)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sub: Option<String>,

    /// Email address the token was issued for
    pub email: String,

    /// Expiration time (Unix timestamp)
    pub exp: i64,
}

impl Claims {
    /// Create claims for a user, expiring `expiration_hours` from now.
    ///
    /// # Arguments
    /// * `user_id` - Credential record identifier
    /// * `email` - Email address of the record
    /// * `expiration_hours` - Hours until token expires
    pub fn for_user(user_id: impl ToString, email: impl Into<String>, expiration_hours: i64) -> Self {
        Self::for_user_at(user_id, email, expiration_hours, Utc::now().timestamp())
    }

    /// Same as [`Claims::for_user`] with an explicit issuance timestamp.
    pub fn for_user_at(
        user_id: impl ToString,
        email: impl Into<String>,
        expiration_hours: i64,
        issued_at: i64,
    ) -> Self {
        Self {
            sub: Some(user_id.to_string()),
            email: email.into(),
            exp: issued_at + Duration::hours(expiration_hours).num_seconds(),
        }
    }

    /// Check if token is expired.
    ///
    /// A token is still valid at the exact second of `exp`.
    pub fn is_expired(&self, current_timestamp: i64) -> bool {
        current_timestamp > self.exp
    }

    /// Extract and validate claims from a verified token payload.
    ///
    /// Checks run in order: `exp` presence and type, expiry against
    /// `current_timestamp`, then `email` presence and type.
    ///
    /// # Errors
    /// * `MalformedClaims` - `exp` or `email` is missing or has the wrong type
    /// * `TokenExpired` - `current_timestamp` is past `exp`
    pub(crate) fn from_payload(
        payload: &Map<String, Value>,
        current_timestamp: i64,
    ) -> Result<Self, JwtError> {
        let exp = payload
            .get("exp")
            .and_then(numeric_date)
            .ok_or_else(|| JwtError::MalformedClaims("invalid 'exp' claim type".to_string()))?;

        if current_timestamp > exp {
            return Err(JwtError::TokenExpired);
        }

        let email = payload
            .get("email")
            .and_then(Value::as_str)
            .ok_or_else(|| {
                JwtError::MalformedClaims("email claim missing or not a string".to_string())
            })?
            .to_string();

        let sub = payload.get("sub").and_then(|value| match value {
            Value::String(s) => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            _ => None,
        });

        Ok(Self { sub, email, exp })
    }
}

/// NumericDate may be an integer or a fractional number of seconds.
fn numeric_date(value: &Value) -> Option<i64> {
    value
        .as_i64()
        .or_else(|| value.as_f64().map(|seconds| seconds.floor() as i64))
}
