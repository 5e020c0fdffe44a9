//! Announcements Page
//!
//! Opening an announcement marks it read. Admins can publish new ones.

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::actions;
use crate::api::{self, ApiRequest};
use crate::browser::input_value;
use crate::components::{select_input, text_area, text_input, LoadStatus};
use crate::context::use_app_context;
use crate::filters::{unread_count, visible_announcements};
use crate::forms::AnnouncementForm;
use crate::loader::{load_into, patch_and_count, AbortGuard, Loadable};
use crate::markdown::{excerpt, parse_markdown};
use crate::models::Announcement;
use crate::store::{current_role, use_app_store, AppStateStoreFields};
use crate::time;

const CATEGORIES: &[(&str, &str)] = &[
    ("general", "General"),
    ("academic", "Academic"),
    ("events", "Events"),
    ("facilities", "Facilities"),
    ("administrative", "Administrative"),
];

const URGENCIES: &[(&str, &str)] = &[("low", "Low"), ("normal", "Normal"), ("high", "High"), ("urgent", "Urgent")];

const AUDIENCES: &[(&str, &str)] = &[("all", "Everyone"), ("students", "Students"), ("staff", "Staff")];

#[component]
fn CreateAnnouncementForm() -> impl IntoView {
    let ctx = use_app_context();
    let form = RwSignal::new(AnnouncementForm::default());
    let (submitting, set_submitting) = signal(false);

    let submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        if submitting.get_untracked() {
            return;
        }
        let current = form.get_untracked();
        set_submitting.set(true);
        spawn_local(async move {
            match api::create_announcement(&current).await {
                Ok(_) => {
                    ctx.success("Announcement published");
                    form.set(AnnouncementForm::default());
                    ctx.reload();
                }
                Err(err) => ctx.error(&err),
            }
            set_submitting.set(false);
        });
    };

    view! {
        <form class="card admin-form" on:submit=submit>
            <h3>"New announcement"</h3>
            {text_input(form, "Title", "text", |f| f.title.clone(), |f, v| f.title = v)}
            {text_area(form, "Message (Markdown)", |f| f.message.clone(), |f, v| f.message = v)}
            <div class="form-row">
                {select_input(form, "Category", CATEGORIES, |f| f.category.clone(), |f, v| f.category = v)}
                {select_input(form, "Urgency", URGENCIES, |f| f.urgency.clone(), |f, v| f.urgency = v)}
                {select_input(form, "Audience", AUDIENCES, |f| f.audience.clone(), |f, v| f.audience = v)}
            </div>
            <div class="form-row">
                {text_input(form, "Tags (comma separated)", "text", |f| f.tags.clone(), |f, v| f.tags = v)}
                {text_input(form, "Expires on", "date", |f| f.expires_at.clone(), |f, v| f.expires_at = v)}
            </div>
            <button type="submit" class="btn primary" disabled=move || submitting.get()>"Publish"</button>
        </form>
    }
}

#[component]
pub fn AnnouncementsPage() -> impl IntoView {
    let ctx = use_app_context();
    let store = use_app_store();
    let is_admin = move || current_role(&store).is_admin();

    let state = RwSignal::new(Loadable::<Vec<Announcement>>::default());
    let guard = AbortGuard::new();
    let (category, set_category) = signal(String::new());
    let (expanded, set_expanded) = signal::<Option<String>>(None);

    Effect::new(move |_| {
        ctx.reload_trigger.track();
        load_into(state, guard, "announcements", |signal| async move {
            api::list_announcements(signal.as_ref()).await
        });
    });

    let badge = move |count: Option<usize>| {
        if let Some(count) = count {
            store.unread_announcements().set(count);
        }
    };

    let open = move |id: String| {
        set_expanded.update(|e| *e = if e.as_deref() == Some(id.as_str()) { None } else { Some(id.clone()) });

        let mut request: Option<ApiRequest> = None;
        badge(patch_and_count(
            state,
            |data| request = actions::mark_read(data, &id),
            |data| unread_count(data, time::now()),
        ));
        let Some(request) = request else { return };

        spawn_local(async move {
            if let Err(err) = api::send_empty(&request, None).await {
                tracing::warn!("[announcements] mark read failed for {}: {}", id, err);
                badge(patch_and_count(
                    state,
                    |data| actions::unmark_read(data, &id),
                    |data| unread_count(data, time::now()),
                ));
                ctx.error(&err);
            }
        });
    };

    let visible = move || {
        let category = category.get();
        state.with(|s| visible_announcements(&s.data, &category, time::now()))
    };

    view! {
        <div class="page announcements-page">
            <h2>"Announcements"</h2>
            {move || is_admin().then(|| view! { <CreateAnnouncementForm/> })}

            <section class="card">
                <div class="list-toolbar">
                    <select on:change=move |ev| set_category.set(input_value(&ev))>
                        <option value="">"All categories"</option>
                        {CATEGORIES.iter().map(|(value, label)| view! { <option value=*value>{*label}</option> }).collect_view()}
                    </select>
                </div>
                <LoadStatus
                    loading=Signal::derive(move || state.with(|s| s.loading))
                    error=Signal::derive(move || state.with(|s| s.error.clone()))
                    empty=Signal::derive(move || visible().is_empty())
                    empty_text="No announcements"
                />
                <div class="announcement-list">
                    <For
                        each=visible
                        key=|a| (a.id.clone(), a.is_read)
                        children=move |a| {
                            let id = a.id.clone();
                            let click_id = id.clone();
                            let mut class = String::from("announcement-card");
                            if a.is_urgent() {
                                class.push_str(" urgent");
                            }
                            if !a.is_read {
                                class.push_str(" unread");
                            }
                            let message = a.message.clone();
                            view! {
                                <article class=class on:click=move |_| open(click_id.clone())>
                                    <div class="announcement-header">
                                        <h4>{a.title.clone()}</h4>
                                        <span class="pill">{a.category.clone()}</span>
                                        {a.is_urgent().then(|| view! { <span class="pill urgent">{a.urgency.clone()}</span> })}
                                        {(!a.is_read).then(|| view! { <span class="unread-dot" title="Unread"></span> })}
                                    </div>
                                    <div class="announcement-meta">
                                        {time::format_date(a.created_at.as_deref())}
                                        {a.expires_at.as_deref().map(|e| format!(" · expires {}", time::format_date(Some(e))))}
                                    </div>
                                    {move || {
                                        if expanded.get().as_deref() == Some(id.as_str()) {
                                            view! { <div class="markdown" inner_html=parse_markdown(&message)></div> }.into_any()
                                        } else {
                                            view! { <p class="announcement-excerpt">{excerpt(&message, 160)}</p> }.into_any()
                                        }
                                    }}
                                    <div class="tag-list">
                                        {a.tags.iter().map(|t| view! { <span class="tag">"#" {t.clone()}</span> }).collect_view()}
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
