//! Overview Page
//!
//! Student home: lost & found previews, upcoming events, unread announcements.

use leptos::prelude::*;

use crate::api::{self, ApiError};
use crate::components::{AlertBanner, LoadStatus};
use crate::context::use_app_context;
use crate::filters::{active_alert_count, split_events, visible_announcements};
use crate::loader::{load_into, AbortGuard, Loadable};
use crate::markdown::excerpt;
use crate::models::{Announcement, EmergencyAlert, Event, LostFoundItem, ReportKind};
use crate::routes::{DashboardRoute, Route};
use crate::store::{use_app_store, AppStateStoreFields};
use crate::time;

const UPCOMING_LIMIT: usize = 3;

#[derive(Debug, Clone, Default, PartialEq)]
struct Previews {
    lost: Vec<LostFoundItem>,
    found: Vec<LostFoundItem>,
}

#[component]
fn PreviewList(kind: ReportKind, items: Signal<Vec<LostFoundItem>>) -> impl IntoView {
    view! {
        <div class="preview-column">
            <h4>{kind.label()} " items"</h4>
            <ul class="preview-list">
                {move || {
                    let list = items.get();
                    if list.is_empty() {
                        return view! { <li class="empty-state">"Nothing reported yet"</li> }.into_any();
                    }
                    list.into_iter().map(|item| {
                        let status = if item.is_resolved() { "pill resolved" } else { "pill open" };
                        view! {
                            <li class="preview-item">
                                <span class="preview-title">{item.title}</span>
                                <span class="preview-meta">{item.location} " · " {time::format_date(item.date.as_deref())}</span>
                                <span class=status>{item.status}</span>
                            </li>
                        }
                    }).collect_view().into_any()
                }}
            </ul>
        </div>
    }
}

#[component]
pub fn OverviewPage() -> impl IntoView {
    let ctx = use_app_context();
    let store = use_app_store();

    let previews = RwSignal::new(Loadable::<Previews>::default());
    let events = RwSignal::new(Loadable::<Vec<Event>>::default());
    let announcements = RwSignal::new(Loadable::<Vec<Announcement>>::default());
    let alerts = RwSignal::new(Loadable::<Vec<EmergencyAlert>>::default());
    let preview_guard = AbortGuard::new();
    let events_guard = AbortGuard::new();
    let announcements_guard = AbortGuard::new();
    let alerts_guard = AbortGuard::new();

    Effect::new(move |_| {
        ctx.reload_trigger.track();
        load_into(previews, preview_guard, "overview", |signal| async move {
            let (lost, found) = futures::join!(
                api::list_preview(ReportKind::Lost, signal.as_ref()),
                api::list_preview(ReportKind::Found, signal.as_ref())
            );
            Ok::<_, ApiError>(Previews { lost: lost?, found: found? })
        });
        load_into(events, events_guard, "overview", |signal| async move {
            api::list_events(signal.as_ref()).await
        });
        load_into(announcements, announcements_guard, "overview", |signal| async move {
            api::list_announcements(signal.as_ref()).await
        });
        load_into(alerts, alerts_guard, "overview", |signal| async move {
            api::list_alerts(signal.as_ref()).await
        });
    });

    let upcoming = move || {
        let (upcoming, _) = events.with(|s| split_events(&s.data, time::now()));
        upcoming.into_iter().take(UPCOMING_LIMIT).collect::<Vec<_>>()
    };
    let unread = move || {
        announcements.with(|s| {
            visible_announcements(&s.data, "", time::now())
                .into_iter()
                .filter(|a| !a.is_read)
                .take(UPCOMING_LIMIT)
                .collect::<Vec<_>>()
        })
    };
    let first_name = move || {
        store
            .profile()
            .with(|p| p.as_ref().and_then(|p| p.name.split_whitespace().next().map(str::to_string)))
            .unwrap_or_else(|| "there".to_string())
    };

    view! {
        <div class="page overview-page">
            <h2>"Hi " {first_name} "!"</h2>
            <AlertBanner count=Signal::derive(move || alerts.with(|s| active_alert_count(&s.data)))/>

            <section class="card">
                <div class="card-header">
                    <h3>"Lost & Found"</h3>
                    <a href=Route::Dashboard(DashboardRoute::LostFound).href()>"View all"</a>
                </div>
                <LoadStatus
                    loading=Signal::derive(move || previews.with(|s| s.loading))
                    error=Signal::derive(move || previews.with(|s| s.error.clone()))
                    empty=Signal::derive(|| false)
                    empty_text=""
                />
                <div class="preview-grid">
                    <PreviewList kind=ReportKind::Lost items=Signal::derive(move || previews.with(|s| s.data.lost.clone()))/>
                    <PreviewList kind=ReportKind::Found items=Signal::derive(move || previews.with(|s| s.data.found.clone()))/>
                </div>
            </section>

            <div class="two-column">
                <section class="card">
                    <div class="card-header">
                        <h3>"Upcoming events"</h3>
                        <a href=Route::Dashboard(DashboardRoute::Events).href()>"All events"</a>
                    </div>
                    <LoadStatus
                        loading=Signal::derive(move || events.with(|s| s.loading))
                        error=Signal::derive(move || events.with(|s| s.error.clone()))
                        empty=Signal::derive(move || upcoming().is_empty())
                        empty_text="No upcoming events"
                    />
                    <ul class="compact-list">
                        {move || upcoming().into_iter().map(|event| view! {
                            <li>
                                <span class="compact-title">{event.title}</span>
                                <span class="compact-meta">{time::format_date_time(event.date.as_deref())} " · " {event.venue}</span>
                                {event.is_attending.then(|| view! { <span class="pill going">"Going"</span> })}
                            </li>
                        }).collect_view()}
                    </ul>
                </section>

                <section class="card">
                    <div class="card-header">
                        <h3>"Unread announcements"</h3>
                        <a href=Route::Dashboard(DashboardRoute::Announcements).href()>"Read all"</a>
                    </div>
                    <LoadStatus
                        loading=Signal::derive(move || announcements.with(|s| s.loading))
                        error=Signal::derive(move || announcements.with(|s| s.error.clone()))
                        empty=Signal::derive(move || unread().is_empty())
                        empty_text="You're all caught up"
                    />
                    <ul class="compact-list">
                        {move || unread().into_iter().map(|a| {
                            let class = if a.is_urgent() { "compact-title urgent" } else { "compact-title" };
                            view! {
                                <li>
                                    <span class=class>{a.title}</span>
                                    <span class="compact-meta">{excerpt(&a.message, 90)}</span>
                                </li>
                            }
                        }).collect_view()}
                    </ul>
                </section>
            </div>
        </div>
    }
}
