use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use serde::Serialize;

use super::signup::AccountData;
use super::ApiError;
use super::ApiSuccess;
use crate::domain::account::errors::AccountError;
use crate::inbound::http::router::AppState;

pub async fn login(
    State(state): State<AppState>,
    Json(body): Json<LoginRequest>,
) -> Result<ApiSuccess<LoginResponseData>, ApiError> {
    let (account, tokens) = state
        .account_service
        .login(&body.email, &body.password)
        .await
        .map_err(|e| match e {
            // Unknown email and wrong secret are indistinguishable to the
            // client so login cannot be used to enumerate accounts. The
            // precise cause stays in the server logs.
            AccountError::NotFound(_) | AccountError::InvalidCredentials => {
                tracing::warn!(error = %e, "Login rejected");
                ApiError::Unauthorized("invalid email or password".to_string())
            }
            _ => ApiError::from(e),
        })?;

    Ok(ApiSuccess::new(
        StatusCode::OK,
        LoginResponseData {
            account: (&account).into(),
            access_token: tokens.access_token,
            refresh_token: tokens.refresh_token,
        },
    ))
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoginRequest {
    email: String,
    password: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoginResponseData {
    pub account: AccountData,
    pub access_token: String,
    pub refresh_token: String,
}
