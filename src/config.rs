//! Client Configuration
//!
//! Resolved once at startup from `<meta>` tags in `index.html`, then the
//! `CAMPUS_API_BASE` build-time env, then the page origin.

use std::sync::OnceLock;

use wasm_bindgen::JsCast;

const API_BASE_META: &str = "campus-api-base";
const LOG_LEVEL_META: &str = "campus-log-level";

static CONFIG: OnceLock<AppConfig> = OnceLock::new();

/// Install the startup configuration; later calls keep the first one
pub fn init(config: AppConfig) -> &'static AppConfig {
    CONFIG.get_or_init(|| config)
}

/// Active configuration, read from the document on first use
pub fn get() -> &'static AppConfig {
    CONFIG.get_or_init(AppConfig::from_document)
}

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    /// Base URL for REST calls, without trailing slash
    pub api_base: String,
    /// Base URL for the discussion socket (`ws://` / `wss://`)
    pub socket_base: String,
    pub log_level: String,
}

impl AppConfig {
    /// Pure resolution from the candidate sources
    pub fn resolve(meta_base: Option<String>, env_base: Option<&str>, origin: &str, log_level: Option<String>) -> Self {
        let api_base = meta_base
            .filter(|v| !v.trim().is_empty())
            .or_else(|| env_base.map(str::to_string))
            .unwrap_or_else(|| origin.to_string());
        let api_base = api_base.trim().trim_end_matches('/').to_string();
        Self {
            socket_base: socket_base_for(&api_base),
            api_base,
            log_level: log_level.unwrap_or_else(|| "info".to_string()),
        }
    }

    /// Read configuration from the current document
    pub fn from_document() -> Self {
        let origin = web_sys::window()
            .and_then(|w| w.location().origin().ok())
            .unwrap_or_default();
        Self::resolve(
            meta_content(API_BASE_META),
            option_env!("CAMPUS_API_BASE"),
            &origin,
            meta_content(LOG_LEVEL_META),
        )
    }

    /// Absolute URL for an API path such as `/api/events`
    pub fn url(&self, path: &str) -> String {
        join_url(&self.api_base, path)
    }

    /// Socket URL carrying the short-lived token
    pub fn discussion_socket_url(&self, token: &str) -> String {
        let token = percent_encoding::utf8_percent_encode(token, percent_encoding::NON_ALPHANUMERIC);
        format!("{}/ws/discussions?token={}", self.socket_base, token)
    }
}

pub fn join_url(base: &str, path: &str) -> String {
    if path.starts_with("http://") || path.starts_with("https://") {
        return path.to_string();
    }
    format!("{}/{}", base.trim_end_matches('/'), path.trim_start_matches('/'))
}

/// `http` → `ws`, `https` → `wss`
fn socket_base_for(api_base: &str) -> String {
    if let Some(rest) = api_base.strip_prefix("https://") {
        format!("wss://{}", rest)
    } else if let Some(rest) = api_base.strip_prefix("http://") {
        format!("ws://{}", rest)
    } else {
        api_base.to_string()
    }
}

fn meta_content(name: &str) -> Option<String> {
    let document = web_sys::window()?.document()?;
    let element = document
        .query_selector(&format!("meta[name=\"{}\"]", name))
        .ok()
        .flatten()?;
    let meta = element.dyn_into::<web_sys::HtmlMetaElement>().ok()?;
    Some(meta.content())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_meta_wins_over_origin() {
        let config = AppConfig::resolve(Some("https://api.campus.edu/".to_string()), None, "http://localhost:8080", None);
        assert_eq!(config.api_base, "https://api.campus.edu");
        assert_eq!(config.socket_base, "wss://api.campus.edu");
        assert_eq!(config.log_level, "info");
    }

    #[test]
    fn test_blank_meta_falls_back() {
        let config = AppConfig::resolve(Some("  ".to_string()), Some("http://10.0.0.2:5000"), "http://localhost:8080", None);
        assert_eq!(config.api_base, "http://10.0.0.2:5000");
        assert_eq!(config.socket_base, "ws://10.0.0.2:5000");

        let config = AppConfig::resolve(None, None, "http://localhost:8080", Some("debug".to_string()));
        assert_eq!(config.api_base, "http://localhost:8080");
        assert_eq!(config.log_level, "debug");
    }

    #[test]
    fn test_join_url() {
        assert_eq!(join_url("http://x/", "/api/events"), "http://x/api/events");
        assert_eq!(join_url("http://x", "api/events"), "http://x/api/events");
        assert_eq!(join_url("http://x", "https://cdn/y.png"), "https://cdn/y.png");
    }

    #[test]
    fn test_socket_url_encodes_token() {
        let config = AppConfig::resolve(None, None, "https://campus.edu", None);
        assert_eq!(
            config.discussion_socket_url("a.b=c"),
            "wss://campus.edu/ws/discussions?token=a%2Eb%3Dc"
        );
    }
}
