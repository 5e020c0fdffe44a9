//! Discussion Calls

use super::{encode, send, send_empty, ApiRequest, ApiResult};
use crate::forms::DiscussionForm;
use crate::models::{Discussion, Message, SocketToken};

pub async fn list_discussions(signal: Option<&web_sys::AbortSignal>) -> ApiResult<Vec<Discussion>> {
    send(&ApiRequest::get("/api/discussions"), signal).await
}

pub async fn create_discussion(form: &DiscussionForm) -> ApiResult<Discussion> {
    let request = form.to_request()?;
    send(&request, None).await
}

pub fn membership_request(id: &str, join: bool) -> ApiRequest {
    let action = if join { "join" } else { "leave" };
    ApiRequest::post(format!("/api/discussions/{}/{}", encode(id), action))
}

pub async fn set_membership(id: &str, join: bool) -> ApiResult<()> {
    send_empty(&membership_request(id, join), None).await
}

pub async fn list_messages(id: &str, signal: Option<&web_sys::AbortSignal>) -> ApiResult<Vec<Message>> {
    send(&ApiRequest::get(format!("/api/discussions/{}/messages", encode(id))), signal).await
}

/// Short-lived token that authenticates the discussion socket
pub async fn socket_token() -> ApiResult<SocketToken> {
    send(&ApiRequest::get("/api/discussions/socket-token"), None).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_membership_paths() {
        assert_eq!(membership_request("d1", true).path, "/api/discussions/d1/join");
        assert_eq!(membership_request("d1", false).path, "/api/discussions/d1/leave");
    }
}
