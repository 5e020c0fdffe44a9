//! Event Calls

use super::{encode, send, send_empty, ApiError, ApiRequest, ApiResult};
use crate::forms::EventForm;
use crate::models::Event;

pub async fn list_events(signal: Option<&web_sys::AbortSignal>) -> ApiResult<Vec<Event>> {
    send(&ApiRequest::get("/api/events"), signal).await
}

pub async fn create_event(form: &EventForm) -> ApiResult<Event> {
    let request = form.to_request()?;
    send(&request, None).await
}

/// Attending users leave (DELETE), everyone else joins (POST)
pub fn rsvp_request(event_id: &str, is_attending: bool) -> ApiRequest {
    let path = format!("/api/events/{}/rsvp", encode(event_id));
    if is_attending {
        ApiRequest::delete(path)
    } else {
        ApiRequest::post(path)
    }
}

/// Toggle the caller's RSVP; refused locally when joining a full event
pub async fn toggle_rsvp(event: &Event) -> ApiResult<()> {
    if !event.is_attending && event.is_full() {
        return Err(ApiError::Validation("This event is full".to_string()));
    }
    send_empty(&rsvp_request(&event.id, event.is_attending), None).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::Method;

    #[test]
    fn test_attending_user_issues_delete() {
        let req = rsvp_request("ev1", true);
        assert_eq!(req.method, Method::Delete);
        assert_eq!(req.path, "/api/events/ev1/rsvp");
    }

    #[test]
    fn test_non_attending_user_issues_post() {
        let req = rsvp_request("ev1", false);
        assert_eq!(req.method, Method::Post);
        assert_eq!(req.path, "/api/events/ev1/rsvp");
    }
}
