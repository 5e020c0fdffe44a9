//! Lost & Found Page
//!
//! Report form plus lost / found lists with search and status filter. The admin
//! variant drops the report form and adds delete.

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api;
use crate::browser::input_value;
use crate::components::{text_area, text_input, DeleteConfirmButton, LoadStatus};
use crate::context::use_app_context;
use crate::filters::{filter_reports, StatusFilter};
use crate::forms::ReportForm;
use crate::loader::{load_into, AbortGuard, Loadable};
use crate::models::{LostFoundItem, ReportKind};
use crate::store::{use_app_store, AppStateStoreFields};
use crate::time;

#[component]
fn ReportFormCard(on_submitted: Callback<ReportKind>) -> impl IntoView {
    let ctx = use_app_context();
    let form = RwSignal::new(ReportForm::new(ReportKind::Lost));
    let (submitting, set_submitting) = signal(false);

    let submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        if submitting.get_untracked() {
            return;
        }
        let current = form.get_untracked();
        set_submitting.set(true);
        spawn_local(async move {
            match api::submit_report(&current).await {
                Ok(item) => {
                    tracing::info!("[lost-found] reported {} item {}", current.kind.as_str(), item.id);
                    ctx.success(format!("{} item reported", current.kind.label()));
                    form.set(ReportForm::new(current.kind));
                    on_submitted.run(current.kind);
                }
                Err(err) => ctx.error(&err),
            }
            set_submitting.set(false);
        });
    };

    view! {
        <form class="card report-form" on:submit=submit>
            <h3>"Report an item"</h3>
            <div class="segmented">
                {[ReportKind::Lost, ReportKind::Found].into_iter().map(|kind| view! {
                    <button
                        type="button"
                        class=move || if form.with(|f| f.kind == kind) { "segment active" } else { "segment" }
                        on:click=move |_| form.update(|f| f.kind = kind)
                    >
                        "I " {move || if kind == ReportKind::Lost { "lost" } else { "found" }} " something"
                    </button>
                }).collect_view()}
            </div>
            {text_input(form, "Title", "text", |f| f.title.clone(), |f, v| f.title = v)}
            {text_area(form, "Description", |f| f.description.clone(), |f, v| f.description = v)}
            <div class="form-row">
                {text_input(form, "Location", "text", |f| f.location.clone(), |f, v| f.location = v)}
                {text_input(form, "Date", "date", |f| f.date.clone(), |f, v| f.date = v)}
            </div>
            {text_input(form, "Contact", "text", |f| f.contact.clone(), |f, v| f.contact = v)}
            <Show when=move || form.with(|f| f.kind == ReportKind::Found)>
                {text_input(form, "Image URL", "url", |f| f.image_url.clone(), |f, v| f.image_url = v)}
            </Show>
            <button type="submit" class="btn primary" disabled=move || submitting.get()>
                {move || if submitting.get() { "Submitting…" } else { "Submit report" }}
            </button>
        </form>
    }
}

#[component]
pub fn LostFoundPage(manage: bool) -> impl IntoView {
    let ctx = use_app_context();
    let store = use_app_store();

    let lost = RwSignal::new(Loadable::<Vec<LostFoundItem>>::default());
    let found = RwSignal::new(Loadable::<Vec<LostFoundItem>>::default());
    let lost_guard = AbortGuard::new();
    let found_guard = AbortGuard::new();
    let (tab, set_tab) = signal(ReportKind::Lost);
    let (query, set_query) = signal(String::new());
    let (status, set_status) = signal(StatusFilter::All);

    let state_for = move |kind: ReportKind| match kind {
        ReportKind::Lost => lost,
        ReportKind::Found => found,
    };

    let load = move |kind: ReportKind| {
        let guard = match kind {
            ReportKind::Lost => lost_guard,
            ReportKind::Found => found_guard,
        };
        load_into(state_for(kind), guard, "lost-found", move |signal| async move {
            api::list_reports(kind, signal.as_ref()).await
        });
    };

    Effect::new(move |_| {
        ctx.reload_trigger.track();
        load(ReportKind::Lost);
        load(ReportKind::Found);
    });

    let visible = move || {
        let q = query.get();
        let s = status.get();
        state_for(tab.get()).with(|state| filter_reports(&state.data, &q, s))
    };
    let current = move || state_for(tab.get());

    let resolve = move |kind: ReportKind, id: String| {
        spawn_local(async move {
            match api::resolve_report(kind, &id).await {
                Ok(()) => {
                    state_for(kind).update(|s| {
                        if let Some(item) = s.data.iter_mut().find(|i| i.id == id) {
                            item.status = "resolved".to_string();
                        }
                    });
                    ctx.success("Marked as resolved");
                }
                Err(err) => ctx.error(&err),
            }
        });
    };

    let delete = move |kind: ReportKind, id: String| {
        spawn_local(async move {
            match api::delete_report(kind, &id).await {
                Ok(()) => {
                    state_for(kind).update(|s| s.data.retain(|i| i.id != id));
                    ctx.success("Report deleted");
                }
                Err(err) => ctx.error(&err),
            }
        });
    };

    let me = move || store.profile().with(|p| p.as_ref().map(|p| p.id.clone()).unwrap_or_default());

    view! {
        <div class="page lost-found-page">
            <h2>{if manage { "Manage Lost & Found" } else { "Lost & Found" }}</h2>
            {(!manage).then(|| view! {
                <ReportFormCard on_submitted=Callback::new(move |kind| { set_tab.set(kind); load(kind); })/>
            })}

            <section class="card">
                <div class="list-toolbar">
                    <div class="segmented">
                        {[ReportKind::Lost, ReportKind::Found].into_iter().map(|kind| view! {
                            <button
                                class=move || if tab.get() == kind { "segment active" } else { "segment" }
                                on:click=move |_| set_tab.set(kind)
                            >
                                {kind.label()} " ("
                                {move || state_for(kind).with(|s| s.data.len())}
                                ")"
                            </button>
                        }).collect_view()}
                    </div>
                    <input
                        type="search"
                        placeholder="Search title, description or location"
                        prop:value=move || query.get()
                        on:input=move |ev| set_query.set(input_value(&ev))
                    />
                    <select on:change=move |ev| set_status.set(StatusFilter::parse(&input_value(&ev)))>
                        {[StatusFilter::All, StatusFilter::Open, StatusFilter::Resolved].into_iter().map(|option| view! {
                            <option value=option.as_str() selected=move || status.get() == option>
                                {match option {
                                    StatusFilter::All => "All statuses",
                                    StatusFilter::Open => "Open",
                                    StatusFilter::Resolved => "Resolved",
                                }}
                            </option>
                        }).collect_view()}
                    </select>
                </div>

                <LoadStatus
                    loading=Signal::derive(move || current().with(|s| s.loading))
                    error=Signal::derive(move || current().with(|s| s.error.clone()))
                    empty=Signal::derive(move || visible().is_empty())
                    empty_text="No reports match"
                />

                <div class="item-grid">
                    <For
                        each=visible
                        key=|item| (item.id.clone(), item.status.clone())
                        children=move |item| {
                            let kind = tab.get_untracked();
                            let id = item.id.clone();
                            let can_resolve = !item.is_resolved()
                                && (manage || item.reporter.as_ref().map(|r| r.id == me()).unwrap_or(false));
                            let status_class = if item.is_resolved() { "pill resolved" } else { "pill open" };
                            let resolve_id = id.clone();
                            let delete_id = id.clone();
                            view! {
                                <article class="item-card">
                                    {item.image_url.clone().map(|src| view! { <img class="item-image" src=src alt=item.title.clone()/> })}
                                    <div class="item-body">
                                        <div class="item-header">
                                            <h4>{item.title.clone()}</h4>
                                            <span class=status_class>{item.status.clone()}</span>
                                        </div>
                                        <p>{item.description.clone()}</p>
                                        <div class="item-meta">
                                            <span>"📍 " {item.location.clone()}</span>
                                            <span>"📅 " {time::format_date(item.date.as_deref())}</span>
                                            <span>"☎ " {item.contact.clone()}</span>
                                        </div>
                                        {item.reporter.clone().map(|r| view! { <div class="item-reporter">"Reported by " {r.name}</div> })}
                                        <div class="item-actions">
                                            {can_resolve.then(|| view! {
                                                <button class="btn small" on:click=move |_| resolve(kind, resolve_id.clone())>
                                                    "Mark resolved"
                                                </button>
                                            })}
                                            {manage.then(|| view! {
                                                <DeleteConfirmButton
                                                    button_class="btn danger small"
                                                    on_confirm=Callback::new(move |_| delete(kind, delete_id.clone()))
                                                />
                                            })}
                                        </div>
                                    </div>
                                </article>
                            }
                        }
                    />
                </div>
            </section>
        </div>
    }
}
