use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;

use super::AccountData;
use super::ApiError;
use super::ApiSuccess;
use crate::domain::account::models::Identity;
use crate::domain::account::ports::AccountServicePort;
use crate::inbound::http::router::AppState;

/// Account of the caller identified by the access guard.
pub async fn profile(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
) -> Result<ApiSuccess<AccountData>, ApiError> {
    state
        .account_service
        .profile(&identity)
        .await
        .map_err(ApiError::from)
        .map(|ref account| ApiSuccess::new(StatusCode::OK, account.into()))
}
