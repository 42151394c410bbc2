use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;

use super::signup::AccountData;
use super::ApiError;
use super::ApiSuccess;
use crate::domain::account::models::Role;
use crate::inbound::http::middleware::require_role;
use crate::inbound::http::middleware::AuthenticatedAccount;
use crate::inbound::http::router::AppState;

/// List every registered account. Admin only: a valid token with an
/// insufficient role is forbidden, not unauthorized.
pub async fn list_accounts(
    State(state): State<AppState>,
    Extension(authenticated): Extension<AuthenticatedAccount>,
) -> Result<ApiSuccess<Vec<AccountData>>, ApiError> {
    require_role(&authenticated, Role::Admin)?;

    state
        .account_service
        .list_accounts()
        .await
        .map_err(ApiError::from)
        .map(|accounts| {
            ApiSuccess::new(
                StatusCode::OK,
                accounts.iter().map(AccountData::from).collect(),
            )
        })
}
