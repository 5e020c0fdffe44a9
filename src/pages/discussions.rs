//! Discussions Page
//!
//! Room list with search, create form and join / leave.

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::actions;
use crate::api;
use crate::browser::input_value;
use crate::components::{text_area, text_input, LoadStatus};
use crate::context::use_app_context;
use crate::filters::filter_discussions;
use crate::forms::DiscussionForm;
use crate::loader::{load_into, AbortGuard, Loadable};
use crate::markdown::excerpt;
use crate::models::Discussion;
use crate::routes::{DashboardRoute, Route};

#[component]
fn CreateDiscussionForm() -> impl IntoView {
    let ctx = use_app_context();
    let form = RwSignal::new(DiscussionForm::default());
    let (submitting, set_submitting) = signal(false);

    let submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        if submitting.get_untracked() {
            return;
        }
        let current = form.get_untracked();
        set_submitting.set(true);
        spawn_local(async move {
            match api::create_discussion(&current).await {
                Ok(discussion) => {
                    tracing::info!("[discussions] created {}", discussion.id);
                    ctx.success("Discussion created");
                    form.set(DiscussionForm::default());
                    ctx.reload();
                }
                Err(err) => ctx.error(&err),
            }
            set_submitting.set(false);
        });
    };

    view! {
        <form class="card create-discussion" on:submit=submit>
            <h3>"Start a discussion"</h3>
            <div class="form-row">
                {text_input(form, "Title", "text", |f| f.title.clone(), |f, v| f.title = v)}
                {text_input(form, "Topic tag", "text", |f| f.topic_tag.clone(), |f, v| f.topic_tag = v)}
            </div>
            {text_area(form, "Description", |f| f.description.clone(), |f, v| f.description = v)}
            <button type="submit" class="btn primary" disabled=move || submitting.get()>"Create"</button>
        </form>
    }
}

#[component]
pub fn DiscussionsPage() -> impl IntoView {
    let ctx = use_app_context();
    let state = RwSignal::new(Loadable::<Vec<Discussion>>::default());
    let guard = AbortGuard::new();
    let (query, set_query) = signal(String::new());
    let (show_form, set_show_form) = signal(false);

    Effect::new(move |_| {
        ctx.reload_trigger.track();
        load_into(state, guard, "discussions", |signal| async move {
            api::list_discussions(signal.as_ref()).await
        });
    });

    let visible = move || {
        let q = query.get();
        state.with(|s| filter_discussions(&s.data, &q))
    };

    let toggle_membership = move |id: String, join: bool| {
        spawn_local(async move {
            match api::set_membership(&id, join).await {
                Ok(()) => {
                    state.update(|s| actions::apply_membership(&mut s.data, &id, join));
                    ctx.success(if join { "Joined discussion" } else { "Left discussion" });
                }
                Err(err) => ctx.error(&err),
            }
        });
    };

    view! {
        <div class="page discussions-page">
            <div class="page-header">
                <h2>"Discussions"</h2>
                <button class="btn primary" on:click=move |_| set_show_form.update(|s| *s = !*s)>
                    {move || if show_form.get() { "Close" } else { "New discussion" }}
                </button>
            </div>
            <Show when=move || show_form.get()>
                <CreateDiscussionForm/>
            </Show>

            <section class="card">
                <div class="list-toolbar">
                    <input
                        type="search"
                        placeholder="Search by title or #topic"
                        prop:value=move || query.get()
                        on:input=move |ev| set_query.set(input_value(&ev))
                    />
                </div>
                <LoadStatus
                    loading=Signal::derive(move || state.with(|s| s.loading))
                    error=Signal::derive(move || state.with(|s| s.error.clone()))
                    empty=Signal::derive(move || visible().is_empty())
                    empty_text="No discussions yet. Start one!"
                />
                <div class="discussion-list">
                    <For
                        each=visible
                        key=|d| (d.id.clone(), d.is_joined, d.participants_count)
                        children=move |d| {
                            let id = d.id.clone();
                            let joined = d.is_joined;
                            let href = Route::Dashboard(DashboardRoute::Discussion(d.id.clone())).href();
                            view! {
                                <article class="discussion-card">
                                    <div class="discussion-header">
                                        <a class="discussion-title" href=href.clone()>{d.title.clone()}</a>
                                        <span class="tag">"#" {d.topic_tag.clone()}</span>
                                    </div>
                                    <p>{excerpt(&d.description, 140)}</p>
                                    <div class="discussion-footer">
                                        <span>"👥 " {d.participants_count} " participants"</span>
                                        <a class="btn small ghost" href=href>"Open"</a>
                                        <button
                                            class=if joined { "btn small ghost" } else { "btn small primary" }
                                            on:click=move |_| toggle_membership(id.clone(), !joined)
                                        >
                                            {if joined { "Leave" } else { "Join" }}
                                        </button>
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
