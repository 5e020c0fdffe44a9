//! Routing
//!
//! Hash-based routes (`#/dashboard/events`) so the app works from any static host.

use leptos::prelude::*;
use percent_encoding::percent_decode_str;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Landing,
    SignIn,
    SignUp,
    Dashboard(DashboardRoute),
    NotFound,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DashboardRoute {
    Overview,
    LostFound,
    Events,
    Announcements,
    Alerts,
    Notes,
    Discussions,
    Discussion(String),
    Profile,
    AdminOverview,
    AdminUsers,
    AdminLostFound,
}

impl DashboardRoute {
    pub fn is_admin_only(&self) -> bool {
        matches!(
            self,
            DashboardRoute::AdminOverview | DashboardRoute::AdminUsers | DashboardRoute::AdminLostFound
        )
    }

    pub fn path(&self) -> String {
        let tail = match self {
            DashboardRoute::Overview => "",
            DashboardRoute::LostFound => "/lost-found",
            DashboardRoute::Events => "/events",
            DashboardRoute::Announcements => "/announcements",
            DashboardRoute::Alerts => "/alerts",
            DashboardRoute::Notes => "/notes",
            DashboardRoute::Discussions => "/discussions",
            DashboardRoute::Discussion(id) => {
                return format!("/dashboard/discussions/{}", crate::api::encode(id));
            }
            DashboardRoute::Profile => "/profile",
            DashboardRoute::AdminOverview => "/admin",
            DashboardRoute::AdminUsers => "/admin/users",
            DashboardRoute::AdminLostFound => "/admin/lost-found",
        };
        format!("/dashboard{}", tail)
    }
}

impl Route {
    /// Parse a path or hash fragment; query strings are ignored
    pub fn parse(raw: &str) -> Self {
        let path = raw.trim_start_matches('#');
        let path = path.split(['?', '#']).next().unwrap_or("");
        let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();

        match segments.as_slice() {
            [] => Route::Landing,
            ["signin"] | ["login"] => Route::SignIn,
            ["signup"] | ["register"] => Route::SignUp,
            ["dashboard", rest @ ..] => match rest {
                [] => Route::Dashboard(DashboardRoute::Overview),
                ["lost-found"] => Route::Dashboard(DashboardRoute::LostFound),
                ["events"] => Route::Dashboard(DashboardRoute::Events),
                ["announcements"] => Route::Dashboard(DashboardRoute::Announcements),
                ["alerts"] => Route::Dashboard(DashboardRoute::Alerts),
                ["notes"] => Route::Dashboard(DashboardRoute::Notes),
                ["discussions"] => Route::Dashboard(DashboardRoute::Discussions),
                ["discussions", id] => match percent_decode_str(id).decode_utf8() {
                    Ok(id) => Route::Dashboard(DashboardRoute::Discussion(id.into_owned())),
                    Err(_) => Route::NotFound,
                },
                ["profile"] => Route::Dashboard(DashboardRoute::Profile),
                ["admin"] => Route::Dashboard(DashboardRoute::AdminOverview),
                ["admin", "users"] => Route::Dashboard(DashboardRoute::AdminUsers),
                ["admin", "lost-found"] => Route::Dashboard(DashboardRoute::AdminLostFound),
                _ => Route::NotFound,
            },
            _ => Route::NotFound,
        }
    }

    pub fn path(&self) -> String {
        match self {
            Route::Landing => "/".to_string(),
            Route::SignIn => "/signin".to_string(),
            Route::SignUp => "/signup".to_string(),
            Route::Dashboard(inner) => inner.path(),
            Route::NotFound => "/404".to_string(),
        }
    }

    pub fn href(&self) -> String {
        format!("#{}", self.path())
    }

    pub fn is_public(&self) -> bool {
        !matches!(self, Route::Dashboard(_))
    }
}

/// Route from the current location hash
pub fn current_route() -> Route {
    web_sys::window()
        .and_then(|w| w.location().hash().ok())
        .map(|hash| Route::parse(&hash))
        .unwrap_or(Route::Landing)
}

/// Move to a route by updating the hash
pub fn navigate(route: &Route) {
    if let Some(window) = web_sys::window() {
        if window.location().set_hash(&route.path()).is_err() {
            tracing::warn!("[routes] could not navigate to {}", route.path());
        }
    }
}

/// Signal tracking the hash route for the lifetime of the app
pub fn route_signal() -> ReadSignal<Route> {
    let (route, set_route) = signal(current_route());
    if let Some(window) = web_sys::window() {
        let on_hash_change = Closure::<dyn FnMut()>::new(move || {
            let next = current_route();
            tracing::debug!("[routes] -> {}", next.path());
            set_route.set(next);
        });
        let _ = window.add_event_listener_with_callback("hashchange", on_hash_change.as_ref().unchecked_ref());
        // The app root never unmounts
        on_hash_change.forget();
    }
    route
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_public_routes() {
        assert_eq!(Route::parse(""), Route::Landing);
        assert_eq!(Route::parse("#/"), Route::Landing);
        assert_eq!(Route::parse("#/signin"), Route::SignIn);
        assert_eq!(Route::parse("/register"), Route::SignUp);
        assert_eq!(Route::parse("#/nowhere"), Route::NotFound);
    }

    #[test]
    fn test_parse_dashboard_routes() {
        assert_eq!(Route::parse("#/dashboard"), Route::Dashboard(DashboardRoute::Overview));
        assert_eq!(Route::parse("#/dashboard/events?tab=past"), Route::Dashboard(DashboardRoute::Events));
        assert_eq!(
            Route::parse("#/dashboard/discussions/abc123"),
            Route::Dashboard(DashboardRoute::Discussion("abc123".to_string()))
        );
        assert_eq!(Route::parse("#/dashboard/admin/users"), Route::Dashboard(DashboardRoute::AdminUsers));
        assert_eq!(Route::parse("#/dashboard/admin/nope"), Route::NotFound);
    }

    #[test]
    fn test_path_round_trips() {
        let routes = [
            Route::Landing,
            Route::SignIn,
            Route::Dashboard(DashboardRoute::Overview),
            Route::Dashboard(DashboardRoute::Notes),
            Route::Dashboard(DashboardRoute::Discussion("d9".to_string())),
            Route::Dashboard(DashboardRoute::AdminLostFound),
        ];
        for route in routes {
            assert_eq!(Route::parse(&route.href()), route);
        }
    }

    #[test]
    fn test_discussion_id_is_escaped() {
        let route = Route::Dashboard(DashboardRoute::Discussion("study/group#2".to_string()));
        let href = route.href();
        assert_eq!(href, "#/dashboard/discussions/study%2Fgroup%232");
        assert_eq!(Route::parse(&href), route);
    }

    #[test]
    fn test_admin_only() {
        assert!(DashboardRoute::AdminUsers.is_admin_only());
        assert!(!DashboardRoute::Events.is_admin_only());
        assert!(!Route::Dashboard(DashboardRoute::Events).is_public());
    }
}
