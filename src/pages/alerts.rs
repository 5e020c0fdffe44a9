//! Emergency Alerts Page
//!
//! Unacknowledged alerts first. Students acknowledge; admins broadcast.

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::actions;
use crate::api::{self, ApiRequest};
use crate::components::{select_input, text_area, text_input, AlertBanner, LoadStatus};
use crate::context::use_app_context;
use crate::filters::{active_alert_count, sort_alerts};
use crate::forms::AlertForm;
use crate::loader::{load_into, patch_and_count, AbortGuard, Loadable};
use crate::models::EmergencyAlert;
use crate::store::{current_role, use_app_store, AppStateStoreFields};
use crate::time;

const SEVERITIES: &[(&str, &str)] = &[("low", "Low"), ("medium", "Medium"), ("high", "High"), ("critical", "Critical")];

const AUDIENCES: &[(&str, &str)] = &[("all", "Everyone"), ("students", "Students"), ("staff", "Staff")];

const CHANNELS: &[(&str, &str)] = &[("in-app", "In-app"), ("email", "Email"), ("sms", "SMS"), ("push", "Push")];

#[component]
fn CreateAlertForm() -> impl IntoView {
    let ctx = use_app_context();
    let form = RwSignal::new(AlertForm::default());
    let (submitting, set_submitting) = signal(false);

    let submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        if submitting.get_untracked() {
            return;
        }
        let current = form.get_untracked();
        set_submitting.set(true);
        spawn_local(async move {
            match api::create_alert(&current).await {
                Ok(alert) => {
                    tracing::info!("[alerts] broadcast {} ({})", alert.id, alert.severity);
                    ctx.success("Alert sent");
                    form.set(AlertForm::default());
                    ctx.reload();
                }
                Err(err) => ctx.error(&err),
            }
            set_submitting.set(false);
        });
    };

    view! {
        <form class="card admin-form alert-form" on:submit=submit>
            <h3>"Broadcast an emergency alert"</h3>
            {text_input(form, "Title", "text", |f| f.title.clone(), |f, v| f.title = v)}
            {text_area(form, "Message", |f| f.message.clone(), |f, v| f.message = v)}
            <div class="form-row">
                {select_input(form, "Severity", SEVERITIES, |f| f.severity.clone(), |f, v| f.severity = v)}
                {select_input(form, "Audience", AUDIENCES, |f| f.audience.clone(), |f, v| f.audience = v)}
                {text_input(form, "Location", "text", |f| f.location.clone(), |f, v| f.location = v)}
            </div>
            <fieldset class="channel-list">
                <legend>"Delivery channels"</legend>
                {CHANNELS.iter().map(|(value, label)| view! {
                    <label class="checkbox">
                        <input
                            type="checkbox"
                            prop:checked=move || form.with(|f| f.channels.iter().any(|c| c == value))
                            on:change=move |_| form.update(|f| f.toggle_channel(value))
                        />
                        {*label}
                    </label>
                }).collect_view()}
            </fieldset>
            <button type="submit" class="btn danger" disabled=move || submitting.get()>"Send alert"</button>
        </form>
    }
}

#[component]
pub fn AlertsPage() -> impl IntoView {
    let ctx = use_app_context();
    let store = use_app_store();
    let is_admin = move || current_role(&store).is_admin();

    let state = RwSignal::new(Loadable::<Vec<EmergencyAlert>>::default());
    let guard = AbortGuard::new();

    Effect::new(move |_| {
        ctx.reload_trigger.track();
        load_into(state, guard, "alerts", |signal| async move { api::list_alerts(signal.as_ref()).await });
    });

    let badge = move |count: Option<usize>| {
        if let Some(count) = count {
            store.active_alerts().set(count);
        }
    };

    let acknowledge = move |id: String| {
        let mut request: Option<ApiRequest> = None;
        badge(patch_and_count(
            state,
            |data| request = actions::acknowledge(data, &id),
            |data| active_alert_count(data),
        ));
        let Some(request) = request else { return };

        spawn_local(async move {
            match api::send_empty(&request, None).await {
                Ok(()) => tracing::info!("[alerts] acknowledged {}", id),
                Err(err) => {
                    badge(patch_and_count(state, |data| actions::unacknowledge(data, &id), |data| active_alert_count(data)));
                    ctx.error(&err);
                }
            }
        });
    };

    let sorted = move || state.with(|s| sort_alerts(&s.data));

    view! {
        <div class="page alerts-page">
            <h2>"Emergency alerts"</h2>
            <AlertBanner count=Signal::derive(move || state.with(|s| active_alert_count(&s.data)))/>
            {move || is_admin().then(|| view! { <CreateAlertForm/> })}

            <section class="card">
                <LoadStatus
                    loading=Signal::derive(move || state.with(|s| s.loading))
                    error=Signal::derive(move || state.with(|s| s.error.clone()))
                    empty=Signal::derive(move || sorted().is_empty())
                    empty_text="No alerts. Stay safe!"
                />
                <div class="alert-list">
                    <For
                        each=sorted
                        key=|a| (a.id.clone(), a.acknowledged)
                        children=move |alert| {
                            let id = alert.id.clone();
                            let severity = alert.severity.to_ascii_lowercase();
                            let class = if alert.acknowledged {
                                format!("alert-card severity-{} acknowledged", severity)
                            } else {
                                format!("alert-card severity-{}", severity)
                            };
                            view! {
                                <article class=class>
                                    <div class="alert-header">
                                        <span class="pill severity">{alert.severity.clone()}</span>
                                        <h4>{alert.title.clone()}</h4>
                                        <span class="alert-time">{time::relative(alert.created_at.as_deref(), time::now())}</span>
                                    </div>
                                    <p>{alert.message.clone()}</p>
                                    <div class="alert-meta">
                                        {alert.metadata.location.clone().map(|l| view! { <span>"📍 " {l}</span> })}
                                        <span>"via " {alert.channels.join(", ")}</span>
                                    </div>
                                    {if alert.acknowledged {
                                        view! { <span class="ack-done">"✓ Acknowledged"</span> }.into_any()
                                    } else {
                                        view! {
                                            <button class="btn primary small" on:click=move |_| acknowledge(id.clone())>
                                                "Acknowledge"
                                            </button>
                                        }.into_any()
                                    }}
                                </article>
                            }
                        }
                    />
                </div>
            </section>
        </div>
    }
}
