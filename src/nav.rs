//! Role-Based Navigation
//!
//! Students and admins see different dashboard menus. A dashboard route that is not
//! in the role's menu sends the user to the role's home instead.

use crate::routes::DashboardRoute;
use crate::session::PortalRole;

/// Counter shown next to a menu entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BadgeKind {
    UnreadAnnouncements,
    ActiveAlerts,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NavEntry {
    pub label: &'static str,
    pub icon: &'static str,
    pub route: DashboardRoute,
    pub badge: Option<BadgeKind>,
}

fn entry(label: &'static str, icon: &'static str, route: DashboardRoute, badge: Option<BadgeKind>) -> NavEntry {
    NavEntry { label, icon, route, badge }
}

pub fn menu_for(role: PortalRole) -> Vec<NavEntry> {
    use DashboardRoute::*;
    match role {
        PortalRole::User => vec![
            entry("Overview", "🏠", Overview, None),
            entry("Lost & Found", "🔎", LostFound, None),
            entry("Events", "📅", Events, None),
            entry("Announcements", "📣", Announcements, Some(BadgeKind::UnreadAnnouncements)),
            entry("Alerts", "🚨", Alerts, Some(BadgeKind::ActiveAlerts)),
            entry("Notes", "📚", Notes, None),
            entry("Discussions", "💬", Discussions, None),
            entry("Profile", "👤", Profile, None),
        ],
        PortalRole::Admin => vec![
            entry("Admin Overview", "📊", AdminOverview, None),
            entry("Users", "👥", AdminUsers, None),
            entry("Lost & Found", "🔎", AdminLostFound, None),
            entry("Events", "📅", Events, None),
            entry("Announcements", "📣", Announcements, None),
            entry("Alerts", "🚨", Alerts, Some(BadgeKind::ActiveAlerts)),
            entry("Notes", "📚", Notes, None),
            entry("Discussions", "💬", Discussions, None),
            entry("Profile", "👤", Profile, None),
        ],
    }
}

pub fn home_for(role: PortalRole) -> DashboardRoute {
    match role {
        PortalRole::User => DashboardRoute::Overview,
        PortalRole::Admin => DashboardRoute::AdminOverview,
    }
}

/// Whether the role's menu covers the route
pub fn is_allowed(role: PortalRole, route: &DashboardRoute) -> bool {
    menu_for(role).iter().any(|e| is_active(e, route))
}

/// The route to actually render for this role
pub fn resolve(role: PortalRole, route: DashboardRoute) -> DashboardRoute {
    if is_allowed(role, &route) { route } else { home_for(role) }
}

/// Menu entry to highlight for the current route
pub fn is_active(entry: &NavEntry, current: &DashboardRoute) -> bool {
    match (current, &entry.route) {
        (DashboardRoute::Discussion(_), DashboardRoute::Discussions) => true,
        (current, route) => current == route,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_student_menu_has_no_admin_entries() {
        let menu = menu_for(PortalRole::User);
        assert!(menu.iter().all(|e| !e.route.is_admin_only()));
        assert_eq!(menu[0].route, DashboardRoute::Overview);
    }

    #[test]
    fn test_admin_menu_starts_with_overview() {
        let menu = menu_for(PortalRole::Admin);
        assert_eq!(menu[0].route, DashboardRoute::AdminOverview);
        assert!(menu.iter().any(|e| e.route == DashboardRoute::AdminUsers));
        assert!(!menu.iter().any(|e| e.route == DashboardRoute::Overview));
    }

    #[test]
    fn test_resolve_redirects_outside_menu() {
        assert_eq!(resolve(PortalRole::User, DashboardRoute::AdminUsers), DashboardRoute::Overview);
        assert_eq!(resolve(PortalRole::Admin, DashboardRoute::Overview), DashboardRoute::AdminOverview);
        assert_eq!(resolve(PortalRole::User, DashboardRoute::Notes), DashboardRoute::Notes);
    }

    #[test]
    fn test_discussion_room_counts_as_discussions() {
        let room = DashboardRoute::Discussion("d1".to_string());
        assert!(is_allowed(PortalRole::User, &room));
        let discussions = menu_for(PortalRole::User)
            .into_iter()
            .find(|e| e.route == DashboardRoute::Discussions)
            .unwrap();
        assert!(is_active(&discussions, &room));
    }
}
