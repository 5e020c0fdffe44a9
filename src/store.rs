//! Global Application State Store
//!
//! Uses Leptos reactive_stores for fine-grained reactivity.

use leptos::prelude::*;
use reactive_stores::Store;

use crate::models::UserProfile;
use crate::session::PortalRole;

/// Session-wide state with field-level reactivity
#[derive(Clone, Debug, Default, Store)]
pub struct AppState {
    /// Signed-in user, once the profile has loaded
    pub profile: Option<UserProfile>,
    /// Portal role of this tab
    pub role: Option<PortalRole>,
    /// Whether the initial profile check has finished
    pub session_checked: bool,
    /// Badge: unread, unexpired announcements
    pub unread_announcements: usize,
    /// Badge: unacknowledged alerts
    pub active_alerts: usize,
}

impl AppState {
    pub fn new(role: Option<PortalRole>) -> Self {
        Self {
            role,
            ..Default::default()
        }
    }
}

/// Type alias for the store
pub type AppStore = Store<AppState>;

/// Get the app store from context
pub fn use_app_store() -> AppStore {
    expect_context::<AppStore>()
}

// ========================
// Store Helper Functions
// ========================

/// Record a successful sign-in
pub fn store_sign_in(store: &AppStore, role: PortalRole, profile: UserProfile) {
    store.role().set(Some(role));
    store.profile().set(Some(profile));
    store.session_checked().set(true);
}

/// Forget the session (sign-out or expired cookie)
pub fn store_sign_out(store: &AppStore) {
    store.role().set(None);
    store.profile().set(None);
    store.unread_announcements().set(0);
    store.active_alerts().set(0);
    store.session_checked().set(true);
}

/// Effective role: stored role, else the profile's role, else student
pub fn current_role(store: &AppStore) -> PortalRole {
    store
        .role()
        .get()
        .or_else(|| {
            store
                .profile()
                .get()
                .and_then(|p| PortalRole::parse(&p.role))
        })
        .unwrap_or_default()
}
