//! Events Page
//!
//! Upcoming and past events with RSVP. Admins get a create form.

use std::collections::HashSet;

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::actions;
use crate::api;
use crate::components::{text_area, text_input, LoadStatus};
use crate::context::use_app_context;
use crate::filters::split_events;
use crate::forms::EventForm;
use crate::loader::{load_into, AbortGuard, Loadable};
use crate::markdown::parse_markdown;
use crate::models::Event;
use crate::store::{current_role, use_app_store};
use crate::time;

#[component]
fn CreateEventForm() -> impl IntoView {
    let ctx = use_app_context();
    let form = RwSignal::new(EventForm::default());
    let (submitting, set_submitting) = signal(false);

    let submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        if submitting.get_untracked() {
            return;
        }
        let current = form.get_untracked();
        set_submitting.set(true);
        spawn_local(async move {
            match api::create_event(&current).await {
                Ok(event) => {
                    tracing::info!("[events] created {}", event.id);
                    ctx.success("Event created");
                    form.set(EventForm::default());
                    ctx.reload();
                }
                Err(err) => ctx.error(&err),
            }
            set_submitting.set(false);
        });
    };

    view! {
        <form class="card admin-form" on:submit=submit>
            <h3>"New event"</h3>
            {text_input(form, "Title", "text", |f| f.title.clone(), |f, v| f.title = v)}
            {text_area(form, "Description", |f| f.description.clone(), |f, v| f.description = v)}
            <div class="form-row">
                {text_input(form, "Venue", "text", |f| f.venue.clone(), |f, v| f.venue = v)}
                {text_input(form, "Capacity", "number", |f| f.capacity.clone(), |f, v| f.capacity = v)}
            </div>
            <div class="form-row">
                {text_input(form, "Date", "date", |f| f.date.clone(), |f, v| f.date = v)}
                {text_input(form, "Time", "time", |f| f.time.clone(), |f, v| f.time = v)}
            </div>
            <button type="submit" class="btn primary" disabled=move || submitting.get()>"Create event"</button>
        </form>
    }
}

fn capacity_label(event: &Event) -> String {
    match event.capacity {
        Some(cap) => format!("{} / {} going", event.attendees_count, cap),
        None => format!("{} going", event.attendees_count),
    }
}

#[component]
pub fn EventsPage() -> impl IntoView {
    let ctx = use_app_context();
    let store = use_app_store();
    let is_admin = move || current_role(&store).is_admin();

    let state = RwSignal::new(Loadable::<Vec<Event>>::default());
    let guard = AbortGuard::new();
    let (show_past, set_show_past) = signal(false);
    // Events with an RSVP call in flight
    let busy = RwSignal::new(HashSet::<String>::new());

    Effect::new(move |_| {
        ctx.reload_trigger.track();
        load_into(state, guard, "events", |signal| async move { api::list_events(signal.as_ref()).await });
    });

    let visible = move || {
        let (upcoming, past) = state.with(|s| split_events(&s.data, time::now()));
        if show_past.get() { past } else { upcoming }
    };

    let rsvp = move |event: Event| {
        if busy.with_untracked(|b| b.contains(&event.id)) {
            return;
        }
        busy.update(|b| {
            b.insert(event.id.clone());
        });
        spawn_local(async move {
            match api::toggle_rsvp(&event).await {
                Ok(()) => {
                    state.update(|s| actions::apply_rsvp(&mut s.data, &event.id));
                    ctx.success(if event.is_attending { "RSVP cancelled" } else { "You're going!" });
                }
                Err(err) => ctx.error(&err),
            }
            busy.update(|b| {
                b.remove(&event.id);
            });
        });
    };

    view! {
        <div class="page events-page">
            <h2>"Events"</h2>
            {move || is_admin().then(|| view! { <CreateEventForm/> })}

            <section class="card">
                <div class="segmented">
                    <button class=move || if show_past.get() { "segment" } else { "segment active" } on:click=move |_| set_show_past.set(false)>
                        "Upcoming"
                    </button>
                    <button class=move || if show_past.get() { "segment active" } else { "segment" } on:click=move |_| set_show_past.set(true)>
                        "Past"
                    </button>
                </div>
                <LoadStatus
                    loading=Signal::derive(move || state.with(|s| s.loading))
                    error=Signal::derive(move || state.with(|s| s.error.clone()))
                    empty=Signal::derive(move || visible().is_empty())
                    empty_text="No events here yet"
                />
                <div class="event-list">
                    <For
                        each=visible
                        key=|event| (event.id.clone(), event.is_attending, event.attendees_count)
                        children=move |event| {
                            let past = show_past.get_untracked();
                            let id = event.id.clone();
                            let full = event.is_full() && !event.is_attending;
                            let button_label = if event.is_attending {
                                "Cancel RSVP"
                            } else if full {
                                "Full"
                            } else {
                                "RSVP"
                            };
                            let button_class = if event.is_attending { "btn ghost" } else { "btn primary" };
                            let for_click = event.clone();
                            view! {
                                <article class="event-card">
                                    <div class="event-date">{time::format_date_time(event.date.as_deref())}</div>
                                    <div class="event-body">
                                        <h4>{event.title.clone()}</h4>
                                        <div class="event-venue">"📍 " {event.venue.clone()}</div>
                                        <div class="markdown" inner_html=parse_markdown(&event.description)></div>
                                        <div class="event-capacity">
                                            {capacity_label(&event)}
                                            {event.seats_left().filter(|n| *n > 0 && !past).map(|n| view! {
                                                <span class="seats-left">{format!(" · {} seats left", n)}</span>
                                            })}
                                        </div>
                                    </div>
                                    {(!past).then(|| view! {
                                        <button
                                            class=button_class
                                            disabled=move || full || busy.with(|b| b.contains(&id))
                                            on:click=move |_| rsvp(for_click.clone())
                                        >
                                            {button_label}
                                        </button>
                                    })}
                                </article>
                            }
                        }
                    />
                </div>
            </section>
        </div>
    }
}
