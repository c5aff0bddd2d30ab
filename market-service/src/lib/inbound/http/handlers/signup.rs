use std::fmt;

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use email_address::EmailAddress;
use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;

use super::ApiError;
use super::ApiSuccess;
use crate::inbound::http::router::AppState;

const MIN_PASSWORD_LENGTH: usize = 8;

pub async fn signup(
    State(state): State<AppState>,
    Json(body): Json<SignupRequest>,
) -> Result<ApiSuccess<SignupResponseData>, ApiError> {
    body.validate()?;

    state
        .auth_service
        .signup(&body.email, &body.password)
        .await
        .map_err(ApiError::from)?;

    tracing::info!(email = %body.email, "User signed up");

    Ok(ApiSuccess::new(
        StatusCode::CREATED,
        SignupResponseData { email: body.email },
    ))
}

/// HTTP request body for signing up (raw JSON)
#[derive(Clone, PartialEq, Eq, Deserialize)]
pub struct SignupRequest {
    email: String,
    password: String,
}

impl fmt::Debug for SignupRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SignupRequest")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

#[derive(Debug, Clone, Error)]
enum ParseSignupRequestError {
    #[error("Invalid email: {0}")]
    Email(String),

    #[error("Password must be at least {min} characters")]
    PasswordTooShort { min: usize },
}

impl SignupRequest {
    fn validate(&self) -> Result<(), ParseSignupRequestError> {
        if !EmailAddress::is_valid(&self.email) {
            return Err(ParseSignupRequestError::Email(self.email.clone()));
        }
        if self.password.chars().count() < MIN_PASSWORD_LENGTH {
            return Err(ParseSignupRequestError::PasswordTooShort {
                min: MIN_PASSWORD_LENGTH,
            });
        }
        Ok(())
    }
}

impl From<ParseSignupRequestError> for ApiError {
    fn from(err: ParseSignupRequestError) -> Self {
        ApiError::UnprocessableEntity(err.to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SignupResponseData {
    pub email: String,
}
