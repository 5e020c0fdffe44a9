//! Alert Banner Component
//!
//! Red strip announcing unacknowledged emergency alerts.

use leptos::prelude::*;

use crate::routes::{DashboardRoute, Route};

#[component]
pub fn AlertBanner(#[prop(into)] count: Signal<usize>) -> impl IntoView {
    let href = Route::Dashboard(DashboardRoute::Alerts).href();

    view! {
        <Show when=move || { count.get() > 0 }>
            <a class="alert-banner" href=href.clone()>
                <span class="alert-banner-icon">"🚨"</span>
                {move || match count.get() {
                    1 => "1 active emergency alert needs your attention".to_string(),
                    n => format!("{} active emergency alerts need your attention", n),
                }}
            </a>
        </Show>
    }
}
