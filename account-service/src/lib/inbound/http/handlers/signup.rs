use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;

use super::ApiError;
use super::ApiSuccess;
use crate::domain::account::errors::EmailError;
use crate::domain::account::errors::PersonNameError;
use crate::domain::account::errors::PhoneError;
use crate::domain::account::errors::RoleError;
use crate::domain::account::errors::SecretError;
use crate::domain::account::models::Account;
use crate::domain::account::models::EmailAddress;
use crate::domain::account::models::PersonName;
use crate::domain::account::models::Phone;
use crate::domain::account::models::Secret;
use crate::domain::account::models::SignupCommand;
use crate::inbound::http::router::AppState;

pub async fn signup(
    State(state): State<AppState>,
    Json(body): Json<SignupRequest>,
) -> Result<ApiSuccess<SignupResponseData>, ApiError> {
    let command = body.try_into_command()?;

    state
        .account_service
        .signup(command)
        .await
        .map_err(ApiError::from)
        .map(|(ref account, tokens)| {
            ApiSuccess::new(
                StatusCode::CREATED,
                SignupResponseData {
                    account: account.into(),
                    access_token: tokens.access_token,
                    refresh_token: tokens.refresh_token,
                },
            )
        })
}

/// HTTP request body for registering an account (raw JSON)
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SignupRequest {
    first_name: String,
    last_name: String,
    email: String,
    password: String,
    phone: String,
    role: String,
}

#[derive(Debug, Clone, Error)]
enum ParseSignupRequestError {
    #[error("Invalid first name: {0}")]
    FirstName(PersonNameError),

    #[error("Invalid last name: {0}")]
    LastName(PersonNameError),

    #[error("Invalid email: {0}")]
    Email(#[from] EmailError),

    #[error("Invalid phone: {0}")]
    Phone(#[from] PhoneError),

    #[error("Invalid role: {0}")]
    Role(#[from] RoleError),

    #[error("Invalid password: {0}")]
    Secret(#[from] SecretError),
}

impl SignupRequest {
    fn try_into_command(self) -> Result<SignupCommand, ParseSignupRequestError> {
        let first_name =
            PersonName::new(self.first_name).map_err(ParseSignupRequestError::FirstName)?;
        let last_name =
            PersonName::new(self.last_name).map_err(ParseSignupRequestError::LastName)?;
        let email = EmailAddress::new(self.email)?;
        let phone = Phone::new(self.phone)?;
        let role = self.role.parse()?;
        let secret = Secret::new(self.password)?;
        Ok(SignupCommand::new(
            first_name, last_name, email, phone, role, secret,
        ))
    }
}

impl From<ParseSignupRequestError> for ApiError {
    fn from(err: ParseSignupRequestError) -> Self {
        ApiError::UnprocessableEntity(err.to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SignupResponseData {
    pub account: AccountData,
    pub access_token: String,
    pub refresh_token: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AccountData {
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub role: String,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl From<&Account> for AccountData {
    fn from(account: &Account) -> Self {
        Self {
            id: account.id.to_string(),
            first_name: account.first_name.as_str().to_string(),
            last_name: account.last_name.as_str().to_string(),
            email: account.email.as_str().to_string(),
            role: account.role.to_string(),
            created_at: account.created_at,
        }
    }
}
