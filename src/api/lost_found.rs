//! Lost & Found Calls

use super::{encode, send, send_empty, ApiRequest, ApiResult};
use crate::forms::ReportForm;
use crate::models::{LostFoundItem, ReportKind};

pub async fn list_reports(kind: ReportKind, signal: Option<&web_sys::AbortSignal>) -> ApiResult<Vec<LostFoundItem>> {
    send(&ApiRequest::get(format!("/api/{}", kind.resource())), signal).await
}

/// Capped list for the dashboard overview
pub async fn list_preview(kind: ReportKind, signal: Option<&web_sys::AbortSignal>) -> ApiResult<Vec<LostFoundItem>> {
    send(&ApiRequest::get(format!("/api/{}/preview", kind.resource())), signal).await
}

pub async fn submit_report(form: &ReportForm) -> ApiResult<LostFoundItem> {
    let request = form.to_request()?;
    send(&request, None).await
}

pub fn resolve_request(kind: ReportKind, id: &str) -> ApiRequest {
    ApiRequest::patch(format!("/api/{}/{}/resolve", kind.resource(), encode(id)))
}

pub async fn resolve_report(kind: ReportKind, id: &str) -> ApiResult<()> {
    send_empty(&resolve_request(kind, id), None).await
}

/// Admin-only removal
pub fn delete_report_request(kind: ReportKind, id: &str) -> ApiRequest {
    ApiRequest::delete(format!("/api/admin/{}/{}", kind.resource(), encode(id)))
}

pub async fn delete_report(kind: ReportKind, id: &str) -> ApiResult<()> {
    send_empty(&delete_report_request(kind, id), None).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::Method;

    #[test]
    fn test_admin_delete_paths() {
        let req = delete_report_request(ReportKind::Found, "abc");
        assert_eq!(req.method, Method::Delete);
        assert_eq!(req.path, "/api/admin/found-items/abc");

        let req = resolve_request(ReportKind::Lost, "x/y");
        assert_eq!(req.path, "/api/lost-items/x%2Fy/resolve");
    }
}
