//! Emergency Alert Calls

use super::{encode, send, ApiRequest, ApiResult};
use crate::forms::AlertForm;
use crate::models::EmergencyAlert;

pub async fn list_alerts(signal: Option<&web_sys::AbortSignal>) -> ApiResult<Vec<EmergencyAlert>> {
    send(&ApiRequest::get("/api/emergency-alerts"), signal).await
}

pub async fn create_alert(form: &AlertForm) -> ApiResult<EmergencyAlert> {
    let request = form.to_request()?;
    send(&request, None).await
}

pub fn acknowledge_request(id: &str) -> ApiRequest {
    ApiRequest::post(format!("/api/emergency-alerts/{}/acknowledge", encode(id)))
}
