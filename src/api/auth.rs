use crate::api::AppState;
use crate::api::extract::LenientJson;
use crate::api::schemas::auth::{CreateUserRequest, LoginRequest, UserEnvelope};
use crate::error::Result;
use crate::services::account_service::CreateUser;
use axum::{
    Json,
    extract::State,
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
};

const SETUP_TOKEN_HEADER: &str = "x-setup-token";

/// Validates credentials and returns the sanitized profile.
///
/// # Errors
/// Returns `MISSING_FIELDS` or `INVALID_CREDENTIALS`.
pub async fn login(
    State(state): State<AppState>,
    LenientJson(payload): LenientJson<LoginRequest>,
) -> Result<impl IntoResponse> {
    let user = state
        .account_service
        .login(payload.username.as_deref().unwrap_or_default(), payload.password.as_deref().unwrap_or_default())
        .await?;

    Ok(Json(UserEnvelope { user: user.into() }))
}

/// Creates an account, gated by the `x-setup-token` header.
///
/// # Errors
/// Returns `CONFIG_ERROR`, `UNAUTHORIZED`, `MISSING_FIELDS` or `USER_EXISTS`.
pub async fn create_user(
    State(state): State<AppState>,
    headers: HeaderMap,
    LenientJson(payload): LenientJson<CreateUserRequest>,
) -> Result<impl IntoResponse> {
    let setup_token = headers.get(SETUP_TOKEN_HEADER).and_then(|v| v.to_str().ok()).map(ToString::to_string);

    let user = state
        .account_service
        .create_user(CreateUser {
            setup_token,
            username: payload.username.unwrap_or_default(),
            password: payload.password.unwrap_or_default(),
            display_name: payload.display_name,
            role: payload.role,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(UserEnvelope { user: user.into() })))
}
