//! Announcement & Notification Calls

use super::{encode, send, send_empty, ApiRequest, ApiResult};
use crate::forms::AnnouncementForm;
use crate::models::{Announcement, Notification};

pub async fn list_announcements(signal: Option<&web_sys::AbortSignal>) -> ApiResult<Vec<Announcement>> {
    send(&ApiRequest::get("/api/announcements"), signal).await
}

pub async fn create_announcement(form: &AnnouncementForm) -> ApiResult<Announcement> {
    let request = form.to_request()?;
    send(&request, None).await
}

pub fn mark_read_request(id: &str) -> ApiRequest {
    ApiRequest::patch(format!("/api/announcements/{}/read", encode(id)))
}

pub async fn list_notifications(signal: Option<&web_sys::AbortSignal>) -> ApiResult<Vec<Notification>> {
    send(&ApiRequest::get("/api/notifications"), signal).await
}

pub async fn mark_all_notifications_read() -> ApiResult<()> {
    send_empty(&ApiRequest::patch("/api/notifications/read-all"), None).await
}
