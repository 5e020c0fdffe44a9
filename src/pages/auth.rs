//! Sign In / Sign Up Pages
//!
//! Both pages have student / admin tabs. The chosen role is kept for the tab and sent
//! with every later request.

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api;
use crate::browser::input_value;
use crate::components::text_input;
use crate::context::use_app_context;
use crate::forms::{SignInForm, SignUpForm};
use crate::nav::home_for;
use crate::routes::Route;
use crate::session::PortalRole;
use crate::store::{store_sign_in, use_app_store};

#[component]
fn RoleTabs(role: Signal<PortalRole>, on_change: Callback<PortalRole>) -> impl IntoView {
    view! {
        <div class="role-tabs">
            {[PortalRole::User, PortalRole::Admin].into_iter().map(|option| view! {
                <button
                    type="button"
                    class=move || if role.get() == option { "role-tab active" } else { "role-tab" }
                    on:click=move |_| on_change.run(option)
                >
                    {option.label()}
                </button>
            }).collect_view()}
        </div>
    }
}

#[component]
pub fn SignInPage() -> impl IntoView {
    let ctx = use_app_context();
    let store = use_app_store();
    let form = RwSignal::new(SignInForm::default());
    let (submitting, set_submitting) = signal(false);
    let (error, set_error) = signal::<Option<String>>(None);

    let submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        if submitting.get_untracked() {
            return;
        }
        let current = form.get_untracked();
        set_submitting.set(true);
        set_error.set(None);
        spawn_local(async move {
            match api::sign_in(&current).await {
                Ok(profile) => {
                    store_sign_in(&store, current.role, profile);
                    ctx.success("Welcome back!");
                    ctx.navigate(Route::Dashboard(home_for(current.role)));
                }
                Err(err) => set_error.set(crate::loader::user_message(&err)),
            }
            set_submitting.set(false);
        });
    };

    view! {
        <div class="auth-page">
            <form class="auth-card" on:submit=submit>
                <h2>"Sign in"</h2>
                <RoleTabs
                    role=Signal::derive(move || form.with(|f| f.role))
                    on_change=Callback::new(move |role| form.update(|f| f.role = role))
                />
                <label>
                    "Email"
                    <input
                        type="email"
                        autocomplete="email"
                        prop:value=move || form.with(|f| f.email.clone())
                        on:input=move |ev| form.update(|f| f.email = input_value(&ev))
                    />
                </label>
                <label>
                    "Password"
                    <input
                        type="password"
                        autocomplete="current-password"
                        prop:value=move || form.with(|f| f.password.clone())
                        on:input=move |ev| form.update(|f| f.password = input_value(&ev))
                    />
                </label>
                {move || error.get().map(|e| view! { <div class="form-error">{e}</div> })}
                <button type="submit" class="btn primary block" disabled=move || submitting.get()>
                    {move || if submitting.get() { "Signing in…" } else { "Sign in" }}
                </button>
                <p class="auth-switch">
                    "New here? " <a href=Route::SignUp.href()>"Create an account"</a>
                </p>
            </form>
        </div>
    }
}

#[component]
pub fn SignUpPage() -> impl IntoView {
    let ctx = use_app_context();
    let store = use_app_store();
    let form = RwSignal::new(SignUpForm::default());
    let (submitting, set_submitting) = signal(false);
    let (error, set_error) = signal::<Option<String>>(None);

    let submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        if submitting.get_untracked() {
            return;
        }
        let current = form.get_untracked();
        set_submitting.set(true);
        set_error.set(None);
        spawn_local(async move {
            match api::sign_up(&current).await {
                Ok(profile) => {
                    store_sign_in(&store, current.role, profile);
                    ctx.success("Account created");
                    ctx.navigate(Route::Dashboard(home_for(current.role)));
                }
                Err(err) => set_error.set(crate::loader::user_message(&err)),
            }
            set_submitting.set(false);
        });
    };

    view! {
        <div class="auth-page">
            <form class="auth-card" on:submit=submit>
                <h2>"Create account"</h2>
                <RoleTabs
                    role=Signal::derive(move || form.with(|f| f.role))
                    on_change=Callback::new(move |role| form.update(|f| f.role = role))
                />
                {text_input(form, "Full name", "text", |f| f.name.clone(), |f, v| f.name = v)}
                {text_input(form, "Email", "email", |f| f.email.clone(), |f, v| f.email = v)}
                <Show when=move || form.with(|f| f.role == PortalRole::User)>
                    <div class="form-row">
                        {text_input(form, "Department", "text", |f| f.department.clone(), |f, v| f.department = v)}
                        {text_input(form, "Year", "text", |f| f.year.clone(), |f, v| f.year = v)}
                    </div>
                </Show>
                {text_input(form, "Password", "password", |f| f.password.clone(), |f, v| f.password = v)}
                {text_input(form, "Confirm password", "password", |f| f.confirm_password.clone(), |f, v| f.confirm_password = v)}
                {move || error.get().map(|e| view! { <div class="form-error">{e}</div> })}
                <button type="submit" class="btn primary block" disabled=move || submitting.get()>
                    {move || if submitting.get() { "Creating account…" } else { "Create account" }}
                </button>
                <p class="auth-switch">
                    "Already registered? " <a href=Route::SignIn.href()>"Sign in"</a>
                </p>
            </form>
        </div>
    }
}
