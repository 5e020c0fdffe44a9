//! Admin Pages
//!
//! Aggregate counts and user management.

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api;
use crate::browser::input_value;
use crate::components::{DeleteConfirmButton, LoadStatus};
use crate::context::use_app_context;
use crate::filters::matches_query;
use crate::loader::{load_into, AbortGuard, Loadable};
use crate::models::{AdminOverview, AdminUser};
use crate::routes::{DashboardRoute, Route};
use crate::store::{use_app_store, AppStateStoreFields};
use crate::time;

#[component]
pub fn AdminOverviewPage() -> impl IntoView {
    let ctx = use_app_context();
    let state = RwSignal::new(Loadable::<AdminOverview>::default());
    let guard = AbortGuard::new();

    Effect::new(move |_| {
        ctx.reload_trigger.track();
        load_into(state, guard, "admin", |signal| async move { api::admin_overview(signal.as_ref()).await });
    });

    let tiles = move || {
        state.with(|s| {
            let o = &s.data;
            vec![
                ("👥", "Users", o.users, DashboardRoute::AdminUsers),
                ("🔎", "Lost items", o.lost_items, DashboardRoute::AdminLostFound),
                ("📦", "Found items", o.found_items, DashboardRoute::AdminLostFound),
                ("📅", "Events", o.events, DashboardRoute::Events),
                ("📣", "Announcements", o.announcements, DashboardRoute::Announcements),
                ("🚨", "Active alerts", o.active_alerts, DashboardRoute::Alerts),
                ("📚", "Notes", o.notes, DashboardRoute::Notes),
                ("💬", "Discussions", o.discussions, DashboardRoute::Discussions),
            ]
        })
    };

    view! {
        <div class="page admin-overview-page">
            <div class="page-header">
                <h2>"Admin overview"</h2>
                <button class="btn ghost" on:click=move |_| ctx.reload()>"Refresh"</button>
            </div>
            <LoadStatus
                loading=Signal::derive(move || state.with(|s| s.loading))
                error=Signal::derive(move || state.with(|s| s.error.clone()))
                empty=Signal::derive(|| false)
                empty_text=""
            />
            <div class="stat-grid">
                {move || tiles().into_iter().map(|(icon, label, value, route)| view! {
                    <a class="stat-tile" href=Route::Dashboard(route).href()>
                        <span class="stat-icon">{icon}</span>
                        <span class="stat-value">{value}</span>
                        <span class="stat-label">{label}</span>
                    </a>
                }).collect_view()}
            </div>
        </div>
    }
}

#[component]
pub fn AdminUsersPage() -> impl IntoView {
    let ctx = use_app_context();
    let store = use_app_store();
    let state = RwSignal::new(Loadable::<Vec<AdminUser>>::default());
    let guard = AbortGuard::new();
    let (query, set_query) = signal(String::new());

    Effect::new(move |_| {
        ctx.reload_trigger.track();
        load_into(state, guard, "admin", |signal| async move { api::list_users(signal.as_ref()).await });
    });

    let visible = move || {
        let q = query.get();
        state.with(|s| {
            s.data
                .iter()
                .filter(|u| matches_query(&q, &[&u.name, &u.email, u.department.as_deref().unwrap_or("")]))
                .cloned()
                .collect::<Vec<_>>()
        })
    };

    let delete = move |id: String| {
        spawn_local(async move {
            match api::delete_user(&id).await {
                Ok(()) => {
                    tracing::info!("[admin] deleted user {}", id);
                    state.update(|s| s.data.retain(|u| u.id != id));
                    ctx.success("User removed");
                }
                Err(err) => ctx.error(&err),
            }
        });
    };

    let me = move || store.profile().with(|p| p.as_ref().map(|p| p.id.clone()).unwrap_or_default());

    view! {
        <div class="page admin-users-page">
            <h2>"Users"</h2>
            <section class="card">
                <div class="list-toolbar">
                    <input
                        type="search"
                        placeholder="Search name, email or department"
                        prop:value=move || query.get()
                        on:input=move |ev| set_query.set(input_value(&ev))
                    />
                    <span class="count">{move || state.with(|s| s.data.len())} " total"</span>
                </div>
                <LoadStatus
                    loading=Signal::derive(move || state.with(|s| s.loading))
                    error=Signal::derive(move || state.with(|s| s.error.clone()))
                    empty=Signal::derive(move || visible().is_empty())
                    empty_text="No users found"
                />
                <table class="user-table">
                    <thead>
                        <tr>
                            <th>"Name"</th>
                            <th>"Email"</th>
                            <th>"Role"</th>
                            <th>"Department"</th>
                            <th>"Joined"</th>
                            <th></th>
                        </tr>
                    </thead>
                    <tbody>
                        <For
                            each=visible
                            key=|u| u.id.clone()
                            children=move |user| {
                                let id = user.id.clone();
                                let is_self = user.id == me();
                                view! {
                                    <tr>
                                        <td>{user.name.clone()}</td>
                                        <td>{user.email.clone()}</td>
                                        <td><span class="pill">{user.role.clone()}</span></td>
                                        <td>{user.department.clone().unwrap_or_default()}</td>
                                        <td>{time::format_date(user.created_at.as_deref())}</td>
                                        <td>
                                            {(!is_self).then(|| view! {
                                                <DeleteConfirmButton
                                                    button_class="btn small danger"
                                                    label="Remove"
                                                    on_confirm=Callback::new(move |_| delete(id.clone()))
                                                />
                                            })}
                                        </td>
                                    </tr>
                                }
                            }
                        />
                    </tbody>
                </table>
            </section>
        </div>
    }
}
