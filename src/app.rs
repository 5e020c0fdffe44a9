//! Campus Connect App
//!
//! Root component: hash routing, session bootstrap and the public / dashboard split.

use leptos::prelude::*;
use leptos::task::spawn_local;
use reactive_stores::Store;
use rolling_logger::LogBuffer;

use crate::api;
use crate::components::{DashboardShell, ToastHost};
use crate::context::AppContext;
use crate::nav::home_for;
use crate::pages::{LandingPage, NotFoundPage, SignInPage, SignUpPage};
use crate::routes::{self, DashboardRoute, Route};
use crate::session::{self, PortalRole};
use crate::store::{current_role, store_sign_in, store_sign_out, AppState, AppStateStoreFields};

fn public_page(route: Route) -> AnyView {
    match route {
        Route::Landing => view! { <LandingPage/> }.into_any(),
        Route::SignIn => view! { <SignInPage/> }.into_any(),
        Route::SignUp => view! { <SignUpPage/> }.into_any(),
        _ => view! { <NotFoundPage/> }.into_any(),
    }
}

#[component]
pub fn App(logs: LogBuffer) -> impl IntoView {
    let route = routes::route_signal();
    let store = Store::new(AppState::new(session::load_role()));
    let ctx = AppContext::new(logs);

    // Provide context to all children
    provide_context(store);
    provide_context(ctx);

    // Restore the session from the cookie, if any
    spawn_local(async move {
        match api::get_profile().await {
            Ok(profile) => {
                let role = store
                    .role()
                    .get_untracked()
                    .or_else(|| PortalRole::parse(&profile.role))
                    .unwrap_or_default();
                tracing::info!("[session] restored {} session", role.as_str());
                store_sign_in(&store, role, profile);
            }
            Err(err) => {
                if err.is_unauthorized() {
                    session::clear_role();
                } else {
                    tracing::warn!("[session] profile check failed: {}", err);
                }
                store_sign_out(&store);
            }
        }
    });

    let checked = Memo::new(move |_| store.session_checked().get());
    let signed_in = Memo::new(move |_| store.profile().with(|p| p.is_some()));
    // `None` for every dashboard route so the shell is not rebuilt on navigation
    let public_route = Memo::new(move |_| Some(route.get()).filter(Route::is_public));
    let dashboard_route = Signal::derive(move || match route.get() {
        Route::Dashboard(inner) => inner,
        _ => DashboardRoute::Overview,
    });

    // Dashboard needs a session
    Effect::new(move |_| {
        if public_route.get().is_none() && checked.get() && !signed_in.get() {
            tracing::info!("[session] not signed in, redirecting");
            routes::navigate(&Route::SignIn);
        }
    });

    // Signed-in users skip the auth pages
    Effect::new(move |_| {
        let on_auth_page = matches!(public_route.get(), Some(Route::SignIn | Route::SignUp));
        if on_auth_page && signed_in.get() {
            routes::navigate(&Route::Dashboard(home_for(current_role(&store))));
        }
    });

    view! {
        <div class="app-root">
            {move || match public_route.get() {
                Some(public) => public_page(public),
                None => view! {
                    {move || {
                        if checked.get() && signed_in.get() {
                            view! { <DashboardShell route=dashboard_route/> }.into_any()
                        } else {
                            view! { <div class="splash">"Loading your campus…"</div> }.into_any()
                        }
                    }}
                }.into_any(),
            }}
            <ToastHost/>
        </div>
    }
}
