use std::str::FromStr;

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use chrono::Utc;
use jsonwebtoken::crypto;
use jsonwebtoken::encode;
use jsonwebtoken::Algorithm;
use jsonwebtoken::DecodingKey;
use jsonwebtoken::EncodingKey;
use jsonwebtoken::Header;
use serde::Deserialize;
use serde_json::Map;
use serde_json::Value;

use super::claims::Claims;
use super::errors::JwtError;

/// Algorithms accepted on decode. All share the HMAC key family.
const HMAC_ALGORITHMS: [Algorithm; 3] = [Algorithm::HS256, Algorithm::HS384, Algorithm::HS512];

/// JWT token handler for encoding and decoding session tokens.
///
/// Tokens are signed with HS256. Decoding accepts any HMAC algorithm and
/// rejects every other algorithm before the signature is checked.
pub struct JwtHandler {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    algorithm: Algorithm,
}

#[derive(Deserialize)]
struct RawHeader {
    alg: String,
}

impl JwtHandler {
    /// Create a new JWT handler with a secret key.
    ///
    /// # Arguments
    /// * `secret` - Secret key for signing tokens (should be stored securely)
    ///
    /// # Security Notes
    /// - The secret should be at least 256 bits (32 bytes) for HS256
    /// - Changing the secret invalidates every outstanding token
    pub fn new(secret: &[u8]) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            algorithm: Algorithm::HS256,
        }
    }

    /// Encode claims into a signed token.
    ///
    /// # Errors
    /// * `EncodingFailed` - Token encoding failed
    pub fn encode(&self, claims: &Claims) -> Result<String, JwtError> {
        let header = Header::new(self.algorithm);

        encode(&header, claims, &self.encoding_key)
            .map_err(|e| JwtError::EncodingFailed(e.to_string()))
    }

    /// Decode and validate a token against the current time.
    ///
    /// # Errors
    /// See [`JwtHandler::decode_at`].
    pub fn decode(&self, token: &str) -> Result<Claims, JwtError> {
        self.decode_at(token, Utc::now().timestamp())
    }

    /// Decode and validate a token against `current_timestamp`.
    ///
    /// The signature is verified over the raw `header.payload` bytes before
    /// the payload is parsed, so claim shape problems surface as
    /// `MalformedClaims` rather than as decoding failures.
    ///
    /// # Errors
    /// * `UnexpectedSigningMethod` - Header declares a non-HMAC algorithm
    /// * `InvalidToken` - Signature mismatch or structurally invalid token
    /// * `MalformedClaims` - `exp` or `email` claim missing or mistyped
    /// * `TokenExpired` - `current_timestamp` is past `exp`
    pub fn decode_at(&self, token: &str, current_timestamp: i64) -> Result<Claims, JwtError> {
        let (message, signature) = token
            .rsplit_once('.')
            .ok_or_else(|| JwtError::InvalidToken("token must have three segments".to_string()))?;
        let (header, payload) = message
            .split_once('.')
            .filter(|(_, payload)| !payload.contains('.'))
            .ok_or_else(|| JwtError::InvalidToken("token must have three segments".to_string()))?;

        let declared = header_algorithm(header)?;
        let algorithm = hmac_algorithm(&declared)
            .ok_or_else(|| JwtError::UnexpectedSigningMethod(declared.clone()))?;

        let verified = crypto::verify(signature, message.as_bytes(), &self.decoding_key, algorithm)
            .map_err(|e| JwtError::InvalidToken(e.to_string()))?;
        if !verified {
            return Err(JwtError::InvalidToken("signature mismatch".to_string()));
        }

        let payload = decode_segment(payload)?;
        let claims = serde_json::from_slice::<Map<String, Value>>(&payload)
            .map_err(|e| JwtError::InvalidToken(format!("payload is not a JSON object: {}", e)))?;

        Claims::from_payload(&claims, current_timestamp)
    }
}

/// Read the `alg` field of an encoded header segment without verifying anything.
fn header_algorithm(header: &str) -> Result<String, JwtError> {
    if header.is_empty() {
        return Err(JwtError::InvalidToken("missing header segment".to_string()));
    }

    let bytes = decode_segment(header)?;

    serde_json::from_slice::<RawHeader>(&bytes)
        .map(|header| header.alg)
        .map_err(|e| JwtError::InvalidToken(format!("header is not valid JSON: {}", e)))
}

fn decode_segment(segment: &str) -> Result<Vec<u8>, JwtError> {
    URL_SAFE_NO_PAD
        .decode(segment)
        .map_err(|e| JwtError::InvalidToken(format!("segment is not base64url: {}", e)))
}

fn hmac_algorithm(declared: &str) -> Option<Algorithm> {
    Algorithm::from_str(declared)
        .ok()
        .filter(|algorithm| HMAC_ALGORITHMS.contains(algorithm))
}
