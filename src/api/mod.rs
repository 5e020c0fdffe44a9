//! Backend API Wrappers
//!
//! Frontend bindings to the REST backend, organized by domain. Every request is sent
//! with credential cookies and the portal role header.

mod error;
mod auth;
mod lost_found;
mod events;
mod announcements;
mod alerts;
mod notes;
mod discussions;
mod admin;

use serde::de::DeserializeOwned;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;

use crate::config::{self, AppConfig};
use crate::session;

// Re-export all public items
pub use error::*;
pub use auth::*;
pub use lost_found::*;
pub use events::*;
pub use announcements::*;
pub use alerts::*;
pub use notes::*;
pub use discussions::*;
pub use admin::*;

// ========================
// Request Description
// ========================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Patch => "PATCH",
            Method::Delete => "DELETE",
        }
    }
}

/// Multipart field
#[derive(Debug, Clone)]
pub enum FormField {
    Text(String),
    File(web_sys::File),
}

#[derive(Debug, Clone)]
pub enum Body {
    Empty,
    Json(serde_json::Value),
    Multipart(Vec<(String, FormField)>),
}

/// A request before it touches the browser
#[derive(Debug, Clone)]
pub struct ApiRequest {
    pub method: Method,
    pub path: String,
    pub query: Vec<(String, String)>,
    pub body: Body,
}

impl ApiRequest {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: Vec::new(),
            body: Body::Empty,
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::Get, path)
    }

    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::Post, path)
    }

    pub fn put(path: impl Into<String>) -> Self {
        Self::new(Method::Put, path)
    }

    pub fn patch(path: impl Into<String>) -> Self {
        Self::new(Method::Patch, path)
    }

    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::Delete, path)
    }

    pub fn json(mut self, value: serde_json::Value) -> Self {
        self.body = Body::Json(value);
        self
    }

    pub fn multipart(mut self, fields: Vec<(String, FormField)>) -> Self {
        self.body = Body::Multipart(fields);
        self
    }

    /// Add a query parameter; empty values are skipped
    pub fn query(mut self, key: &str, value: &str) -> Self {
        if !value.trim().is_empty() {
            self.query.push((key.to_string(), value.trim().to_string()));
        }
        self
    }

    /// JSON body, if any
    pub fn json_body(&self) -> Option<&serde_json::Value> {
        match &self.body {
            Body::Json(value) => Some(value),
            _ => None,
        }
    }

    /// Path plus encoded query string
    pub fn path_and_query(&self) -> String {
        if self.query.is_empty() {
            return self.path.clone();
        }
        let query = self
            .query
            .iter()
            .map(|(k, v)| format!("{}={}", encode(k), encode(v)))
            .collect::<Vec<_>>()
            .join("&");
        format!("{}?{}", self.path, query)
    }

    pub fn url(&self, config: &AppConfig) -> String {
        config.url(&self.path_and_query())
    }
}

/// Percent-encode a path segment or query component
pub fn encode(value: &str) -> String {
    percent_encoding::utf8_percent_encode(value, percent_encoding::NON_ALPHANUMERIC).to_string()
}

// ========================
// Response Decoding
// ========================

/// Keys a response envelope may carry its payload under
const ENVELOPE_KEYS: [&str; 3] = ["data", "items", "results"];

/// Payload candidates, innermost first. The body itself is only a candidate
/// when it carries no envelope key.
fn payload_candidates(value: &serde_json::Value) -> Vec<&serde_json::Value> {
    let mut candidates = Vec::new();
    for key in ENVELOPE_KEYS {
        if let Some(inner) = value.get(key) {
            if let Some(nested) = inner.get("items") {
                candidates.push(nested);
            }
            candidates.push(inner);
        }
    }
    if candidates.is_empty() {
        candidates.push(value);
    }
    candidates
}

/// Decode a JSON body, unwrapping `{"data": ...}` / `{"items": ...}` envelopes
pub fn decode<T: DeserializeOwned>(body: &str) -> ApiResult<T> {
    let value: serde_json::Value =
        serde_json::from_str(body).map_err(|_| ApiError::parse_failure(body))?;

    payload_candidates(&value)
        .into_iter()
        .find_map(|candidate| T::deserialize(candidate).ok())
        .ok_or_else(|| ApiError::parse_failure(body))
}

// ========================
// Transport
// ========================

fn js_error(err: JsValue) -> ApiError {
    ApiError::Browser(describe_js(&err))
}

fn fetch_error(err: JsValue) -> ApiError {
    if let Some(dom) = err.dyn_ref::<web_sys::DomException>() {
        if dom.name() == "AbortError" {
            return ApiError::Aborted;
        }
    }
    ApiError::Network(describe_js(&err))
}

pub(crate) fn describe_js(err: &JsValue) -> String {
    if let Some(e) = err.dyn_ref::<js_sys::Error>() {
        return String::from(e.message());
    }
    err.as_string().unwrap_or_else(|| format!("{:?}", err))
}

async fn dispatch(request: &ApiRequest, signal: Option<&web_sys::AbortSignal>) -> ApiResult<web_sys::Response> {
    let window = web_sys::window().ok_or_else(|| ApiError::Browser("window unavailable".to_string()))?;
    let url = request.url(config::get());

    let init = web_sys::RequestInit::new();
    init.set_method(request.method.as_str());
    init.set_credentials(web_sys::RequestCredentials::Include);
    if let Some(signal) = signal {
        init.set_signal(Some(signal));
    }

    let headers = web_sys::Headers::new().map_err(js_error)?;
    for (name, value) in session::role_headers(session::load_role()) {
        headers.set(name, &value).map_err(js_error)?;
    }

    match &request.body {
        Body::Empty => {}
        Body::Json(value) => {
            headers.set("Content-Type", "application/json").map_err(js_error)?;
            init.set_body(&JsValue::from_str(&value.to_string()));
        }
        Body::Multipart(fields) => {
            // The browser sets the multipart boundary itself
            let form = web_sys::FormData::new().map_err(js_error)?;
            for (name, field) in fields {
                match field {
                    FormField::Text(text) => form.append_with_str(name, text).map_err(js_error)?,
                    FormField::File(file) => form
                        .append_with_blob_and_filename(name, file, &file.name())
                        .map_err(js_error)?,
                }
            }
            init.set_body(&form.into());
        }
    }
    init.set_headers(&headers.into());

    let web_request = web_sys::Request::new_with_str_and_init(&url, &init).map_err(js_error)?;
    tracing::debug!("[api] {} {}", request.method.as_str(), request.path);

    let response = JsFuture::from(window.fetch_with_request(&web_request))
        .await
        .map_err(fetch_error)?;
    response.dyn_into::<web_sys::Response>().map_err(js_error)
}

async fn read_text(response: &web_sys::Response) -> ApiResult<String> {
    let promise = response.text().map_err(js_error)?;
    let text = JsFuture::from(promise).await.map_err(fetch_error)?;
    Ok(text.as_string().unwrap_or_default())
}

/// Send and return the raw body of a 2xx response
pub async fn send_text(request: &ApiRequest, signal: Option<&web_sys::AbortSignal>) -> ApiResult<String> {
    let response = dispatch(request, signal).await?;
    let status = response.status();
    let text = read_text(&response).await?;
    if !response.ok() {
        let err = ApiError::from_status(status, &text);
        tracing::warn!("[api] {} {} -> {}: {}", request.method.as_str(), request.path, status, err);
        return Err(err);
    }
    Ok(text)
}

/// Send and decode a JSON response
pub async fn send<T: DeserializeOwned>(request: &ApiRequest, signal: Option<&web_sys::AbortSignal>) -> ApiResult<T> {
    let text = send_text(request, signal).await?;
    decode(&text).inspect_err(|_| {
        tracing::warn!("[api] {} {}: undecodable body", request.method.as_str(), request.path);
    })
}

/// Send and ignore the response body
pub async fn send_empty(request: &ApiRequest, signal: Option<&web_sys::AbortSignal>) -> ApiResult<()> {
    send_text(request, signal).await.map(|_| ())
}

/// Send and return the body as a blob (file downloads)
pub async fn send_blob(request: &ApiRequest) -> ApiResult<web_sys::Blob> {
    let response = dispatch(request, None).await?;
    if !response.ok() {
        let status = response.status();
        let text = read_text(&response).await.unwrap_or_default();
        return Err(ApiError::from_status(status, &text));
    }
    let promise = response.blob().map_err(js_error)?;
    let blob = JsFuture::from(promise).await.map_err(fetch_error)?;
    blob.dyn_into::<web_sys::Blob>().map_err(js_error)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{AdminOverview, Event, UserProfile};
    use serde::Deserialize;

    #[derive(Debug, Deserialize, PartialEq)]
    struct Row {
        id: u32,
    }

    #[test]
    fn test_decode_bare_and_wrapped() {
        let bare: Vec<Row> = decode(r#"[{"id":1}]"#).unwrap();
        assert_eq!(bare, vec![Row { id: 1 }]);

        let wrapped: Vec<Row> = decode(r#"{"success":true,"data":[{"id":2}]}"#).unwrap();
        assert_eq!(wrapped, vec![Row { id: 2 }]);

        let nested: Vec<Row> = decode(r#"{"data":{"items":[{"id":3}],"total":1}}"#).unwrap();
        assert_eq!(nested, vec![Row { id: 3 }]);
    }

    #[test]
    fn test_decode_wrapped_object_uses_payload() {
        let profile: UserProfile = decode(
            r#"{"success":true,"data":{"_id":"u1","name":"Ana","email":"a@b.co","role":"admin"}}"#,
        )
        .unwrap();
        assert_eq!(profile.id, "u1");
        assert_eq!(profile.name, "Ana");
        assert_eq!(profile.role, "admin");

        let overview: AdminOverview = decode(r#"{"data":{"users":42,"notes":7}}"#).unwrap();
        assert_eq!(overview.users, 42);
        assert_eq!(overview.notes, 7);

        let event: Event = decode(r#"{"success":true,"data":{"_id":"e1","title":"Hackathon"}}"#).unwrap();
        assert_eq!(event.id, "e1");
    }

    #[test]
    fn test_decode_bare_object() {
        let profile: UserProfile = decode(r#"{"id":"u2","name":"Bo","role":"user"}"#).unwrap();
        assert_eq!(profile.id, "u2");
        assert_eq!(profile.name, "Bo");
    }

    #[test]
    fn test_decode_non_json_is_parse_error() {
        let err = decode::<Vec<Row>>("<!doctype html><title>Oops</title>").unwrap_err();
        assert!(matches!(err, ApiError::Parse { .. }));
    }

    #[test]
    fn test_decode_wrong_shape_is_parse_error() {
        let err = decode::<Vec<Row>>(r#"{"data":{"count":3}}"#).unwrap_err();
        assert!(matches!(err, ApiError::Parse { .. }));
    }

    #[test]
    fn test_query_encoding_skips_empty() {
        let req = ApiRequest::get("/api/notes")
            .query("search", "linear algebra")
            .query("subject", "");
        assert_eq!(req.path_and_query(), "/api/notes?search=linear%20algebra");
        assert_eq!(req.method.as_str(), "GET");
    }
}
