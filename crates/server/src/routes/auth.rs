//! OTP login routes.

use axum::{Json, extract::State};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use smart_shipping_core::UserId;

use super::extract::ApiJson;
use crate::error::{Result, set_sentry_user};
use crate::models::User;
use crate::services::auth::{AuthService, select_identifier};
use crate::state::AppState;

/// Body of `POST /request-otp`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestOtpRequest {
    pub email: Option<String>,
    pub phone: Option<String>,
    /// `"phone"` or `"email"`; anything else means email.
    pub auth_method: Option<String>,
    pub full_name: Option<String>,
}

/// Response from `POST /request-otp`.
#[derive(Debug, Serialize)]
pub struct RequestOtpResponse {
    pub success: bool,
    pub message: &'static str,
    /// Present only when the server is configured to expose codes.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub otp: Option<String>,
}

/// Issue an OTP for an email or phone, creating the user on first contact.
///
/// POST /request-otp
///
/// # Errors
///
/// Returns 400 if the chosen channel is missing or malformed.
#[instrument(skip(state, body))]
pub async fn request_otp(
    State(state): State<AppState>,
    ApiJson(body): ApiJson<RequestOtpRequest>,
) -> Result<Json<RequestOtpResponse>> {
    let identifier = select_identifier(
        body.auth_method.as_deref(),
        body.email.as_deref(),
        body.phone.as_deref(),
    )?;

    let (_, code) = AuthService::new(state.pool())
        .request_otp(&identifier, body.full_name.as_deref())
        .await?;

    Ok(Json(RequestOtpResponse {
        success: true,
        message: "OTP Sent",
        otp: state.config().expose_otp.then_some(code),
    }))
}

/// Body of `POST /verify-otp`.
#[derive(Debug, Deserialize)]
pub struct VerifyOtpRequest {
    /// Email or phone the code was issued for.
    pub identifier: String,
    pub otp: String,
}

/// Response from a successful `POST /verify-otp`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VerifyOtpResponse {
    pub success: bool,
    pub user_id: UserId,
    pub user: User,
}

/// Redeem an OTP.
///
/// POST /verify-otp
///
/// # Errors
///
/// Returns 401 `Invalid OTP` if the code is wrong, unknown or already used.
#[instrument(skip(state, body))]
pub async fn verify_otp(
    State(state): State<AppState>,
    ApiJson(body): ApiJson<VerifyOtpRequest>,
) -> Result<Json<VerifyOtpResponse>> {
    let user = AuthService::new(state.pool())
        .verify_otp(&body.identifier, &body.otp)
        .await?;

    set_sentry_user(&user.id);

    Ok(Json(VerifyOtpResponse {
        success: true,
        user_id: user.id,
        user,
    }))
}
