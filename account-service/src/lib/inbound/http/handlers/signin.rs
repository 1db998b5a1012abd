use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;

use super::ApiError;
use super::ApiSuccess;
use super::SessionResponseData;
use crate::account::errors::AccountError;
use crate::domain::account::models::SigninCommand;
use crate::domain::account::ports::AccountServicePort;
use crate::inbound::http::router::AppState;

const INVALID_CREDENTIALS: &str = "Invalid credentials";

pub async fn signin(
    State(state): State<AppState>,
    Json(body): Json<SigninRequest>,
) -> Result<ApiSuccess<SessionResponseData>, ApiError> {
    let session = state
        .account_service
        .signin(SigninCommand::new(body.email, body.password))
        .await
        .map_err(|e| match e {
            // Unknown email and wrong password look the same to the caller.
            AccountError::NotFound(_) | AccountError::InvalidCredentials => {
                ApiError::Unauthorized(INVALID_CREDENTIALS.to_string())
            }
            _ => ApiError::from(e),
        })?;

    Ok(ApiSuccess::new(
        StatusCode::OK,
        SessionResponseData {
            account: (&session.account).into(),
            token: session.access_token,
        },
    ))
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SigninRequest {
    email: String,
    password: String,
}
