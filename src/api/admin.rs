//! Admin Aggregate Calls

use super::{encode, send, send_empty, ApiRequest, ApiResult};
use crate::models::{AdminOverview, AdminUser};

pub async fn admin_overview(signal: Option<&web_sys::AbortSignal>) -> ApiResult<AdminOverview> {
    send(&ApiRequest::get("/api/admin/overview"), signal).await
}

pub async fn list_users(signal: Option<&web_sys::AbortSignal>) -> ApiResult<Vec<AdminUser>> {
    send(&ApiRequest::get("/api/admin/users"), signal).await
}

pub async fn delete_user(id: &str) -> ApiResult<()> {
    send_empty(&ApiRequest::delete(format!("/api/admin/users/{}", encode(id))), None).await
}
