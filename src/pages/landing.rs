//! Landing Page
//!
//! Public entry with feature cards and sign-in / sign-up links.

use leptos::prelude::*;

use crate::nav::home_for;
use crate::routes::Route;
use crate::store::{current_role, use_app_store, AppStateStoreFields};

const FEATURES: &[(&str, &str, &str)] = &[
    ("🔎", "Lost & Found", "Report lost belongings and browse what others have found on campus."),
    ("📅", "Events", "See what's happening and RSVP before seats run out."),
    ("📣", "Announcements", "Official news from the university, urgent items first."),
    ("🚨", "Emergency Alerts", "Safety alerts you can acknowledge as soon as you've read them."),
    ("📚", "Notes", "Share lecture notes and study material by subject."),
    ("💬", "Discussions", "Live chat rooms for courses, clubs and everything in between."),
];

#[component]
pub fn LandingPage() -> impl IntoView {
    let store = use_app_store();
    let signed_in = move || store.profile().with(|p| p.is_some());

    view! {
        <div class="landing">
            <header class="landing-nav">
                <span class="brand">"Campus Connect"</span>
                <div class="landing-actions">
                    <Show
                        when=signed_in
                        fallback=|| view! {
                            <a class="btn ghost" href=Route::SignIn.href()>"Sign in"</a>
                            <a class="btn primary" href=Route::SignUp.href()>"Create account"</a>
                        }
                    >
                        <a class="btn primary" href=move || Route::Dashboard(home_for(current_role(&store))).href()>
                            "Open dashboard"
                        </a>
                    </Show>
                </div>
            </header>
            <section class="hero">
                <h1>"Everything on campus, in one place"</h1>
                <p>"Lost items, events, announcements, alerts, notes and live discussions for students and staff."</p>
                <a class="btn primary large" href=Route::SignUp.href()>"Get started"</a>
            </section>
            <section class="feature-grid">
                {FEATURES.iter().map(|(icon, title, text)| view! {
                    <div class="feature-card">
                        <div class="feature-icon">{*icon}</div>
                        <h3>{*title}</h3>
                        <p>{*text}</p>
                    </div>
                }).collect_view()}
            </section>
        </div>
    }
}

#[component]
pub fn NotFoundPage() -> impl IntoView {
    view! {
        <div class="not-found">
            <h1>"404"</h1>
            <p>"That page doesn't exist."</p>
            <a class="btn primary" href=Route::Landing.href()>"Back home"</a>
        </div>
    }
}
