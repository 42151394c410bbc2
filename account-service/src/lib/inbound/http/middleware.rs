use axum::extract::Request;
use axum::extract::State;
use axum::http::StatusCode;
use axum::http::{self};
use axum::middleware::Next;
use axum::response::IntoResponse;
use axum::response::Response;
use axum::Json;
use serde_json::json;

use crate::domain::account::models::Role;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::router::AppState;

/// Extension type carrying the verified claims of the authenticated
/// account through request extensions.
#[derive(Debug, Clone)]
pub struct AuthenticatedAccount {
    pub claims: auth::Claims,
}

/// Middleware gating protected routes behind bearer-token verification.
///
/// A request either arrives with a verifiable access token and proceeds
/// with its claims attached, or is rejected before any protected handler
/// runs. The precise verification failure is logged; the client always
/// sees the same generic message so responses cannot be used to probe
/// the token format.
pub async fn authenticate(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, Response> {
    let token = extract_token_from_header(&req)?;

    let claims = state.authenticator.verify_access_token(token).map_err(|e| {
        tracing::warn!(error = %e, "Token verification failed");
        (
            StatusCode::UNAUTHORIZED,
            Json(json!({
                "error": "invalid token"
            })),
        )
            .into_response()
    })?;

    req.extensions_mut().insert(AuthenticatedAccount { claims });

    Ok(next.run(req).await)
}

/// Check that verified claims carry the required role.
///
/// # Errors
/// * `Forbidden` - Credentials were valid but the privilege is insufficient
pub fn require_role(authenticated: &AuthenticatedAccount, role: Role) -> Result<(), ApiError> {
    let claims_role: Role = authenticated
        .claims
        .role
        .parse()
        .map_err(|_| ApiError::Forbidden("access denied".to_string()))?;

    if claims_role != role {
        tracing::warn!(
            subject = %authenticated.claims.sub,
            held = %claims_role,
            required = %role,
            "Insufficient role for operation"
        );
        return Err(ApiError::Forbidden("access denied".to_string()));
    }

    Ok(())
}

fn extract_token_from_header(req: &Request) -> Result<&str, Response> {
    let auth_header = req
        .headers()
        .get(http::header::AUTHORIZATION)
        .ok_or_else(|| {
            (
                StatusCode::UNAUTHORIZED,
                Json(json!({
                    "error": "Missing Authorization header"
                })),
            )
                .into_response()
        })?;

    let auth_str = auth_header.to_str().map_err(|_| {
        (
            StatusCode::UNAUTHORIZED,
            Json(json!({
                "error": "Invalid Authorization header"
            })),
        )
            .into_response()
    })?;

    if !auth_str.starts_with("Bearer ") {
        return Err((
            StatusCode::UNAUTHORIZED,
            Json(json!({
                "error": "Invalid Authorization header format. Expected: Bearer <token>"
            })),
        )
            .into_response());
    }

    Ok(auth_str.trim_start_matches("Bearer "))
}
