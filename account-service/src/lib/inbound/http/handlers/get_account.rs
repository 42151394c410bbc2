use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;

use super::signup::AccountData;
use super::ApiError;
use super::ApiSuccess;
use crate::domain::account::models::AccountId;
use crate::inbound::http::router::AppState;

pub async fn get_account(
    State(state): State<AppState>,
    Path(account_id): Path<String>,
) -> Result<ApiSuccess<AccountData>, ApiError> {
    let account_id =
        AccountId::from_string(&account_id).map_err(|e| ApiError::BadRequest(e.to_string()))?;

    state
        .account_service
        .get_account(&account_id)
        .await
        .map_err(ApiError::from)
        .map(|ref account| ApiSuccess::new(StatusCode::OK, account.into()))
}
