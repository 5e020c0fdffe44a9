//! Discussion Socket
//!
//! JSON text frames of the form `{"event": "...", "data": {...}}`. The socket is opened
//! when the user joins a discussion and closed when they leave or the panel goes away.
//! There is no reconnection.

use serde::{Deserialize, Serialize};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;

use crate::api::ApiError;
use crate::models::Message;

/// Events sent to the server
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", content = "data")]
pub enum ClientEvent {
    #[serde(rename = "discussion:join", rename_all = "camelCase")]
    Join { discussion_id: String },

    #[serde(rename = "discussion:leave", rename_all = "camelCase")]
    Leave { discussion_id: String },

    #[serde(rename = "discussion:message", rename_all = "camelCase")]
    Message {
        discussion_id: String,
        content: String,
        temp_id: String,
    },
}

/// Events pushed by the server
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", content = "data")]
pub enum ServerEvent {
    #[serde(rename = "discussion:message")]
    Message(Message),

    #[serde(rename = "discussion:error", rename_all = "camelCase")]
    Error {
        #[serde(default)]
        message: String,
        #[serde(default)]
        temp_id: Option<String>,
    },

    #[serde(rename = "discussion:join", rename_all = "camelCase")]
    Joined {
        #[serde(default)]
        discussion_id: String,
        #[serde(default)]
        participants_count: Option<u32>,
    },

    #[serde(rename = "discussion:leave", rename_all = "camelCase")]
    Left {
        #[serde(default)]
        discussion_id: String,
        #[serde(default)]
        participants_count: Option<u32>,
    },
}

pub fn encode(event: &ClientEvent) -> Result<String, ApiError> {
    serde_json::to_string(event).map_err(|e| ApiError::parse_failure(&e.to_string()))
}

pub fn decode(frame: &str) -> Result<ServerEvent, ApiError> {
    serde_json::from_str(frame).map_err(|_| ApiError::parse_failure(frame))
}

/// Open socket bound to one discussion
pub struct DiscussionSocket {
    ws: web_sys::WebSocket,
    discussion_id: String,
    _on_open: Closure<dyn FnMut()>,
    _on_message: Closure<dyn FnMut(web_sys::MessageEvent)>,
    _on_close: Closure<dyn FnMut(web_sys::CloseEvent)>,
    _on_error: Closure<dyn FnMut(web_sys::Event)>,
}

impl DiscussionSocket {
    /// Connect and send `discussion:join` once open.
    ///
    /// `on_open` fires after the join frame went out; `on_event` gets every decodable
    /// inbound event; `on_closed` fires when the connection drops on its own (not when
    /// this value is dropped).
    pub fn connect(
        url: &str,
        discussion_id: &str,
        on_open: impl Fn() + 'static,
        on_event: impl Fn(ServerEvent) + 'static,
        on_closed: impl Fn() + 'static,
    ) -> Result<Self, ApiError> {
        let join = encode(&ClientEvent::Join { discussion_id: discussion_id.to_string() })?;
        let ws = web_sys::WebSocket::new(url).map_err(|e| ApiError::Network(crate::api::describe_js(&e)))?;

        let ws_for_open = ws.clone();
        let on_open = Closure::<dyn FnMut()>::new(move || {
            tracing::info!("[socket] connected");
            if ws_for_open.send_with_str(&join).is_err() {
                tracing::warn!("[socket] join frame not sent");
            }
            on_open();
        });

        let on_message = Closure::<dyn FnMut(web_sys::MessageEvent)>::new(move |ev: web_sys::MessageEvent| {
            let Some(frame) = ev.data().as_string() else {
                tracing::debug!("[socket] ignoring non-text frame");
                return;
            };
            match decode(&frame) {
                Ok(event) => on_event(event),
                Err(err) => tracing::warn!("[socket] dropped frame: {}", err),
            }
        });

        let on_close = Closure::<dyn FnMut(web_sys::CloseEvent)>::new(move |ev: web_sys::CloseEvent| {
            tracing::info!("[socket] closed (code {})", ev.code());
            on_closed();
        });

        let on_error = Closure::<dyn FnMut(web_sys::Event)>::new(move |_ev: web_sys::Event| {
            tracing::warn!("[socket] connection error");
        });

        ws.set_onopen(Some(on_open.as_ref().unchecked_ref()));
        ws.set_onmessage(Some(on_message.as_ref().unchecked_ref()));
        ws.set_onclose(Some(on_close.as_ref().unchecked_ref()));
        ws.set_onerror(Some(on_error.as_ref().unchecked_ref()));

        Ok(Self {
            ws,
            discussion_id: discussion_id.to_string(),
            _on_open: on_open,
            _on_message: on_message,
            _on_close: on_close,
            _on_error: on_error,
        })
    }

    pub fn is_open(&self) -> bool {
        self.ws.ready_state() == web_sys::WebSocket::OPEN
    }

    pub fn send(&self, event: &ClientEvent) -> Result<(), ApiError> {
        if !self.is_open() {
            return Err(ApiError::Network("Chat is not connected".to_string()));
        }
        let frame = encode(event)?;
        self.ws
            .send_with_str(&frame)
            .map_err(|e| ApiError::Network(crate::api::describe_js(&e)))
    }
}

impl Drop for DiscussionSocket {
    fn drop(&mut self) {
        if self.is_open() {
            let leave = encode(&ClientEvent::Leave { discussion_id: self.discussion_id.clone() });
            if let Ok(frame) = leave {
                let _ = self.ws.send_with_str(&frame);
            }
        }
        self.ws.set_onopen(None);
        self.ws.set_onmessage(None);
        self.ws.set_onclose(None);
        self.ws.set_onerror(None);
        let _ = self.ws.close();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_client_frames() {
        let frame = encode(&ClientEvent::Message {
            discussion_id: "d1".to_string(),
            content: "hi".to_string(),
            temp_id: "tmp-1".to_string(),
        })
        .unwrap();
        let value: serde_json::Value = serde_json::from_str(&frame).unwrap();
        assert_eq!(
            value,
            json!({"event": "discussion:message", "data": {"discussionId": "d1", "content": "hi", "tempId": "tmp-1"}})
        );

        let join: serde_json::Value =
            serde_json::from_str(&encode(&ClientEvent::Join { discussion_id: "d1".to_string() }).unwrap()).unwrap();
        assert_eq!(join["event"], "discussion:join");
        assert_eq!(join["data"]["discussionId"], "d1");
    }

    #[test]
    fn test_decode_message_echo() {
        let frame = r#"{"event":"discussion:message","data":{"_id":"m1","discussionId":"d1","sender":{"_id":"u1","name":"Ana"},"content":"hi","tempId":"tmp-1"}}"#;
        match decode(frame).unwrap() {
            ServerEvent::Message(msg) => {
                assert_eq!(msg.id, "m1");
                assert_eq!(msg.temp_id.as_deref(), Some("tmp-1"));
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_decode_error_with_and_without_temp_id() {
        let with = decode(r#"{"event":"discussion:error","data":{"message":"Too long","tempId":"tmp-2"}}"#).unwrap();
        assert_eq!(with, ServerEvent::Error { message: "Too long".to_string(), temp_id: Some("tmp-2".to_string()) });

        let without = decode(r#"{"event":"discussion:error","data":{"message":"Not a member"}}"#).unwrap();
        assert_eq!(without, ServerEvent::Error { message: "Not a member".to_string(), temp_id: None });
    }

    #[test]
    fn test_decode_presence() {
        let joined = decode(r#"{"event":"discussion:join","data":{"discussionId":"d1","participantsCount":5}}"#).unwrap();
        assert_eq!(joined, ServerEvent::Joined { discussion_id: "d1".to_string(), participants_count: Some(5) });
    }

    #[test]
    fn test_unknown_event_is_error() {
        assert!(decode(r#"{"event":"discussion:typing","data":{}}"#).is_err());
        assert!(decode("not json").is_err());
    }
}
