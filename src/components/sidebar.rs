//! Sidebar Component
//!
//! Role-specific dashboard menu with badge counters.

use leptos::prelude::*;

use crate::nav::{is_active, menu_for, BadgeKind};
use crate::routes::{DashboardRoute, Route};
use crate::session::PortalRole;
use crate::store::{use_app_store, AppStateStoreFields, AppStore};

fn badge_count(store: &AppStore, badge: Option<BadgeKind>) -> usize {
    match badge {
        Some(BadgeKind::UnreadAnnouncements) => store.unread_announcements().get(),
        Some(BadgeKind::ActiveAlerts) => store.active_alerts().get(),
        None => 0,
    }
}

#[component]
pub fn Sidebar(
    #[prop(into)] current: Signal<DashboardRoute>,
    #[prop(into)] role: Signal<PortalRole>,
) -> impl IntoView {
    let store = use_app_store();

    view! {
        <nav class="sidebar">
            <a class="sidebar-brand" href=Route::Landing.href()>"Campus Connect"</a>
            <div class="sidebar-role">{move || role.get().label()}</div>
            <ul class="sidebar-menu">
                {move || menu_for(role.get()).into_iter().map(|entry| {
                    let href = Route::Dashboard(entry.route.clone()).href();
                    let badge = entry.badge;
                    let icon = entry.icon;
                    let label = entry.label;
                    view! {
                        <li>
                            <a
                                href=href
                                class=move || if is_active(&entry, &current.get()) { "nav-link active" } else { "nav-link" }
                            >
                                <span class="nav-icon">{icon}</span>
                                <span class="nav-label">{label}</span>
                                {move || {
                                    let count = badge_count(&store, badge);
                                    (count > 0).then(|| view! { <span class="nav-badge">{count}</span> })
                                }}
                            </a>
                        </li>
                    }
                }).collect_view()}
            </ul>
        </nav>
    }
}
