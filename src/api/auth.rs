//! Auth & Profile Calls
//!
//! Sign-in stores the portal role for the tab before the profile is fetched, so the
//! profile request already carries the right role header.

use super::{send, send_empty, ApiRequest, ApiResult};
use crate::forms::{ProfileForm, SignInForm, SignUpForm};
use crate::models::UserProfile;
use crate::session;

pub async fn sign_in(form: &SignInForm) -> ApiResult<UserProfile> {
    let request = form.to_request()?;
    send_empty(&request, None).await?;
    session::store_role(form.role);
    tracing::info!("[auth] signed in as {}", form.role.as_str());
    get_profile().await
}

pub async fn sign_up(form: &SignUpForm) -> ApiResult<UserProfile> {
    let request = form.to_request()?;
    send_empty(&request, None).await?;
    session::store_role(form.role);
    tracing::info!("[auth] account created for {}", form.role.as_str());
    get_profile().await
}

/// Best-effort logout; the local role is cleared either way
pub async fn sign_out() -> ApiResult<()> {
    let result = send_empty(&ApiRequest::post("/api/auth/logout"), None).await;
    session::clear_role();
    result
}

pub async fn get_profile() -> ApiResult<UserProfile> {
    let request = ApiRequest::get("/api/profile");
    let text = super::send_text(&request, None).await?;
    // Profile is either bare, wrapped in `data`, or under `user`
    match serde_json::from_str::<serde_json::Value>(&text) {
        Ok(value) => match value.get("user") {
            Some(user) => serde_json::from_value(user.clone()).map_err(|_| super::ApiError::parse_failure(&text)),
            None => super::decode(&text),
        },
        Err(_) => Err(super::ApiError::parse_failure(&text)),
    }
}

pub async fn update_profile(form: &ProfileForm) -> ApiResult<UserProfile> {
    let request = form.to_request()?;
    send(&request, None).await
}
