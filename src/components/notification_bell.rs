//! Notification Bell Component
//!
//! Top-bar dropdown listing the user's notifications, with mark-all-read.

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api;
use crate::context::use_app_context;
use crate::loader::{load_into, AbortGuard, Loadable};
use crate::models::Notification;
use crate::time;

#[component]
pub fn NotificationBell() -> impl IntoView {
    let ctx = use_app_context();
    let state = RwSignal::new(Loadable::<Vec<Notification>>::default());
    let guard = AbortGuard::new();
    let (open, set_open) = signal(false);
    let (marking, set_marking) = signal(false);

    Effect::new(move |_| {
        ctx.reload_trigger.track();
        load_into(state, guard, "notifications", |signal| async move {
            api::list_notifications(signal.as_ref()).await
        });
    });

    let unread = move || state.with(|s| s.data.iter().filter(|n| !n.is_read).count());

    let mark_all = move |_| {
        if marking.get_untracked() {
            return;
        }
        set_marking.set(true);
        spawn_local(async move {
            match api::mark_all_notifications_read().await {
                Ok(()) => state.update(|s| s.data.iter_mut().for_each(|n| n.is_read = true)),
                Err(err) => ctx.error(&err),
            }
            set_marking.set(false);
        });
    };

    view! {
        <div class="notification-bell">
            <button class="bell-btn" title="Notifications" on:click=move |_| set_open.update(|o| *o = !*o)>
                "🔔"
                {move || {
                    let count = unread();
                    (count > 0).then(|| view! { <span class="bell-count">{count}</span> })
                }}
            </button>
            <Show when=move || open.get()>
                <div class="notification-dropdown">
                    <div class="dropdown-header">
                        <span>"Notifications"</span>
                        <button
                            class="link-btn"
                            disabled=move || marking.get() || unread() == 0
                            on:click=mark_all
                        >
                            "Mark all read"
                        </button>
                    </div>
                    {move || state.with(|s| s.error.clone()).map(|e| view! { <div class="load-error">{e}</div> })}
                    <ul class="notification-list">
                        {move || {
                            let now = time::now();
                            let items = state.with(|s| s.data.clone());
                            if items.is_empty() {
                                return view! { <li class="empty-state">"You're all caught up"</li> }.into_any();
                            }
                            items.into_iter().map(|n| {
                                let class = if n.is_read { "notification" } else { "notification unread" };
                                view! {
                                    <li class=class>
                                        <div class="notification-title">{n.title}</div>
                                        <div class="notification-message">{n.message}</div>
                                        <div class="notification-time">{time::relative(n.created_at.as_deref(), now)}</div>
                                    </li>
                                }
                            }).collect_view().into_any()
                        }}
                    </ul>
                </div>
            </Show>
        </div>
    }
}
