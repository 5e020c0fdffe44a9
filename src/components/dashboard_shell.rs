//! Dashboard Shell Component
//!
//! Sidebar, top bar and the active dashboard page. Keeps the nav badges fresh and
//! redirects routes outside the role's menu to the role's home.

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api::{self, ApiError};
use crate::components::{AlertBanner, NotificationBell, Sidebar};
use crate::context::{use_app_context, AppContext};
use crate::filters::{active_alert_count, unread_count};
use crate::loader::AbortGuard;
use crate::nav;
use crate::pages::*;
use crate::routes::{DashboardRoute, Route};
use crate::store::{current_role, store_sign_out, use_app_store, AppStateStoreFields, AppStore};
use crate::time;

/// Drop the local session and go to sign-in
pub fn end_session(store: &AppStore, ctx: &AppContext, message: Option<&str>) {
    store_sign_out(store);
    if let Some(message) = message {
        ctx.info(message);
    }
    ctx.navigate(Route::SignIn);
}

/// Handle a load error that may mean the session cookie is gone
fn check_session(store: &AppStore, ctx: &AppContext, err: &ApiError) {
    if err.is_unauthorized() {
        tracing::info!("[session] expired");
        end_session(store, ctx, Some("Your session has expired. Please sign in again."));
    } else if !err.is_silent() {
        tracing::warn!("[session] badge refresh failed: {}", err);
    }
}

#[component]
pub fn DashboardShell(#[prop(into)] route: Signal<DashboardRoute>) -> impl IntoView {
    let ctx = use_app_context();
    let store = use_app_store();
    let role = Signal::derive(move || current_role(&store));
    let active = Memo::new(move |_| nav::resolve(role.get(), route.get()));
    let guard = AbortGuard::new();

    // Redirect routes the role has no menu entry for
    Effect::new(move |_| {
        let requested = route.get();
        let resolved = active.get();
        if requested != resolved {
            tracing::info!("[nav] {} not available, redirecting to {}", requested.path(), resolved.path());
            ctx.navigate(Route::Dashboard(resolved));
        }
    });

    // Badge counters
    Effect::new(move |_| {
        ctx.reload_trigger.track();
        let signal = guard.reset();
        spawn_local(async move {
            let (announcements, alerts) = futures::join!(
                api::list_announcements(signal.as_ref()),
                api::list_alerts(signal.as_ref())
            );
            match announcements {
                Ok(list) => store.unread_announcements().set(unread_count(&list, time::now())),
                Err(err) => check_session(&store, &ctx, &err),
            }
            match alerts {
                Ok(list) => store.active_alerts().set(active_alert_count(&list)),
                // Expiry is reported once, through announcements
                Err(err) if err.is_unauthorized() => {}
                Err(err) => check_session(&store, &ctx, &err),
            }
        });
    });

    let sign_out = move |_| {
        spawn_local(async move {
            if let Err(err) = api::sign_out().await {
                tracing::warn!("[auth] logout request failed: {}", err);
            }
            end_session(&store, &ctx, Some("Signed out"));
        });
    };

    let page = move || match active.get() {
        DashboardRoute::Overview => view! { <OverviewPage/> }.into_any(),
        DashboardRoute::LostFound => view! { <LostFoundPage manage=false/> }.into_any(),
        DashboardRoute::AdminLostFound => view! { <LostFoundPage manage=true/> }.into_any(),
        DashboardRoute::Events => view! { <EventsPage/> }.into_any(),
        DashboardRoute::Announcements => view! { <AnnouncementsPage/> }.into_any(),
        DashboardRoute::Alerts => view! { <AlertsPage/> }.into_any(),
        DashboardRoute::Notes => view! { <NotesPage/> }.into_any(),
        DashboardRoute::Discussions => view! { <DiscussionsPage/> }.into_any(),
        DashboardRoute::Discussion(id) => view! { <LiveDiscussionPage discussion_id=id/> }.into_any(),
        DashboardRoute::Profile => view! { <ProfilePage/> }.into_any(),
        DashboardRoute::AdminOverview => view! { <AdminOverviewPage/> }.into_any(),
        DashboardRoute::AdminUsers => view! { <AdminUsersPage/> }.into_any(),
    };

    view! {
        <div class="dashboard-layout">
            <Sidebar current=active role=role/>
            <div class="dashboard-main">
                <header class="top-bar">
                    <AlertBanner count=Signal::derive(move || store.active_alerts().get())/>
                    <div class="top-bar-spacer"></div>
                    <NotificationBell/>
                    {move || store.profile().get().map(|profile| view! {
                        <a class="user-chip" href=Route::Dashboard(DashboardRoute::Profile).href()>
                            <span class="avatar">{profile.initials()}</span>
                            <span class="user-name">{profile.name.clone()}</span>
                        </a>
                    })}
                    <button class="btn ghost" on:click=sign_out>"Sign out"</button>
                </header>
                <main class="dashboard-content">
                    {page}
                </main>
            </div>
        </div>
    }
}
