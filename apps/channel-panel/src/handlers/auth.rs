use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
};
use channel_shared::auth::{LoginRequest, LoginResponse, LoginUser};
use tracing::{info, warn};
use uuid::Uuid;

use super::{ApiError, ApiResult, ClientIp};
use crate::AppState;

/// POST /api/mock/login - Checks the configured admin credentials and hands
/// out an opaque token. Every attempt lands in the audit trail.
pub async fn login(
    State(state): State<AppState>,
    ClientIp(ip): ClientIp,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> ApiResult<Json<LoginResponse>> {
    let Json(form) = payload?;
    let admin = &state.config.admin;

    let username = form.username.trim();
    let is_valid =
        username == admin.username && form.password == admin.password && form.two_fa == admin.otp;

    state.activity.log_login(is_valid, username, &ip).await;

    if !is_valid {
        warn!("Failed login for '{}' from {}", username, ip);
        return Err(ApiError::Unauthorized(
            "Invalid credentials. Please check your username, password, and 2FA code.".to_string(),
        ));
    }

    let token = format!("mock-jwt-token-{}", Uuid::new_v4());
    info!("Issued session for '{}' (token: {}...)", username, &token[..18]);

    Ok(Json(LoginResponse {
        token,
        user: LoginUser {
            name: admin.name.clone(),
            role: admin.role.clone(),
            email: admin.email.clone(),
        },
    }))
}
