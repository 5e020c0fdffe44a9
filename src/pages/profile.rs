//! Profile Page
//!
//! View and edit the signed-in profile, sign out, and inspect recent client logs.

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api;
use crate::components::{end_session, text_input};
use crate::config;
use crate::context::use_app_context;
use crate::forms::ProfileForm;
use crate::store::{current_role, use_app_store, AppStateStoreFields};
use crate::time;

#[component]
fn Diagnostics() -> impl IntoView {
    let ctx = use_app_context();
    let (lines, set_lines) = signal(ctx.log_lines());
    let config = config::get();

    view! {
        <section class="card diagnostics">
            <div class="card-header">
                <h3>"Client diagnostics"</h3>
                <button class="btn small ghost" on:click=move |_| set_lines.set(ctx.log_lines())>"Refresh"</button>
            </div>
            <dl class="config-list">
                <dt>"API"</dt>
                <dd>{config.api_base.clone()}</dd>
                <dt>"Socket"</dt>
                <dd>{config.socket_base.clone()}</dd>
                <dt>"Log level"</dt>
                <dd>{config.log_level.clone()}</dd>
            </dl>
            <pre class="log-lines">
                {move || lines.get().join("\n")}
            </pre>
        </section>
    }
}

#[component]
pub fn ProfilePage() -> impl IntoView {
    let ctx = use_app_context();
    let store = use_app_store();
    let form = RwSignal::new(ProfileForm::default());
    let (editing, set_editing) = signal(false);
    let (saving, set_saving) = signal(false);

    let start_edit = move |_| {
        if let Some(profile) = store.profile().get_untracked() {
            form.set(ProfileForm::from_profile(&profile));
            set_editing.set(true);
        }
    };

    let save = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        if saving.get_untracked() {
            return;
        }
        let current = form.get_untracked();
        set_saving.set(true);
        spawn_local(async move {
            match api::update_profile(&current).await {
                Ok(profile) => {
                    store.profile().set(Some(profile));
                    set_editing.set(false);
                    ctx.success("Profile updated");
                }
                Err(err) => ctx.error(&err),
            }
            set_saving.set(false);
        });
    };

    let sign_out = move |_| {
        spawn_local(async move {
            if let Err(err) = api::sign_out().await {
                tracing::warn!("[auth] logout request failed: {}", err);
            }
            end_session(&store, &ctx, Some("Signed out"));
        });
    };

    let field = |label: &'static str, value: Option<String>| {
        view! {
            <div class="profile-field">
                <span class="field-label">{label}</span>
                <span>{value.filter(|v| !v.is_empty()).unwrap_or_else(|| "—".to_string())}</span>
            </div>
        }
    };

    view! {
        <div class="page profile-page">
            <h2>"Profile"</h2>
            {move || store.profile().get().map(|profile| view! {
                <section class="card profile-card">
                    <div class="profile-head">
                        <span class="avatar large">{profile.initials()}</span>
                        <div>
                            <h3>{profile.name.clone()}</h3>
                            <span class="pill">{current_role(&store).label()}</span>
                        </div>
                    </div>
                    <Show
                        when=move || editing.get()
                        fallback={
                            let profile = profile.clone();
                            move || view! {
                                <div class="profile-fields">
                                    {field("Email", Some(profile.email.clone()))}
                                    {field("Department", profile.department.clone())}
                                    {field("Year", profile.year.clone())}
                                    {field("Phone", profile.phone.clone())}
                                    {field("Member since", Some(time::format_date(profile.created_at.as_deref())))}
                                </div>
                                <div class="profile-actions">
                                    <button class="btn primary" on:click=start_edit>"Edit profile"</button>
                                    <button class="btn ghost" on:click=sign_out>"Sign out"</button>
                                </div>
                            }
                        }
                    >
                        <form class="profile-form" on:submit=save>
                            {text_input(form, "Name", "text", |f| f.name.clone(), |f, v| f.name = v)}
                            <div class="form-row">
                                {text_input(form, "Department", "text", |f| f.department.clone(), |f, v| f.department = v)}
                                {text_input(form, "Year", "text", |f| f.year.clone(), |f, v| f.year = v)}
                            </div>
                            {text_input(form, "Phone", "tel", |f| f.phone.clone(), |f, v| f.phone = v)}
                            <div class="profile-actions">
                                <button type="submit" class="btn primary" disabled=move || saving.get()>"Save"</button>
                                <button type="button" class="btn ghost" on:click=move |_| set_editing.set(false)>"Cancel"</button>
                            </div>
                        </form>
                    </Show>
                </section>
            })}
            <Diagnostics/>
        </div>
    }
}
