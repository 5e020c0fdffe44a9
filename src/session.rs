//! Portal Session
//!
//! The portal role ("user" / "admin") lives in the browser's session storage and is
//! attached to every request as `X-Portal-Role`.

use serde::{Deserialize, Serialize};

/// Session storage key for the portal role
pub const ROLE_STORAGE_KEY: &str = "campus.portalRole";

/// Header carrying the portal role
pub const ROLE_HEADER: &str = "X-Portal-Role";

/// Account context the backend authorizes against
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PortalRole {
    #[default]
    User,
    Admin,
}

impl PortalRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            PortalRole::User => "user",
            PortalRole::Admin => "admin",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            PortalRole::User => "Student",
            PortalRole::Admin => "Admin",
        }
    }

    /// Lenient parse; "student" is accepted for `User`
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "user" | "student" => Some(PortalRole::User),
            "admin" => Some(PortalRole::Admin),
            _ => None,
        }
    }

    pub fn is_admin(&self) -> bool {
        matches!(self, PortalRole::Admin)
    }
}

/// Headers every request carries for the given role
pub fn role_headers(role: Option<PortalRole>) -> Vec<(&'static str, String)> {
    let mut headers = vec![("Accept", "application/json".to_string())];
    if let Some(role) = role {
        headers.push((ROLE_HEADER, role.as_str().to_string()));
    }
    headers
}

fn session_storage() -> Option<web_sys::Storage> {
    web_sys::window()?.session_storage().ok().flatten()
}

/// Role stored for this tab, if any
pub fn load_role() -> Option<PortalRole> {
    let value = session_storage()?.get_item(ROLE_STORAGE_KEY).ok().flatten()?;
    PortalRole::parse(&value)
}

pub fn store_role(role: PortalRole) {
    if let Some(storage) = session_storage() {
        if storage.set_item(ROLE_STORAGE_KEY, role.as_str()).is_err() {
            tracing::warn!("[session] could not persist portal role");
        }
    }
}

pub fn clear_role() {
    if let Some(storage) = session_storage() {
        let _ = storage.remove_item(ROLE_STORAGE_KEY);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_role() {
        assert_eq!(PortalRole::parse("admin"), Some(PortalRole::Admin));
        assert_eq!(PortalRole::parse(" User "), Some(PortalRole::User));
        assert_eq!(PortalRole::parse("student"), Some(PortalRole::User));
        assert_eq!(PortalRole::parse("guest"), None);
    }

    #[test]
    fn test_role_headers() {
        let headers = role_headers(Some(PortalRole::Admin));
        assert!(headers.contains(&(ROLE_HEADER, "admin".to_string())));

        let anonymous = role_headers(None);
        assert!(anonymous.iter().all(|(name, _)| *name != ROLE_HEADER));
        assert_eq!(anonymous.len(), 1);
    }
}
