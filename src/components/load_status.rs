//! Load Status Component
//!
//! Loading / error / empty line shown above a page list.

use leptos::prelude::*;

#[component]
pub fn LoadStatus(
    #[prop(into)] loading: Signal<bool>,
    #[prop(into)] error: Signal<Option<String>>,
    #[prop(into)] empty: Signal<bool>,
    #[prop(into)] empty_text: String,
) -> impl IntoView {
    view! {
        {move || error.get().map(|message| view! { <div class="load-error">{message}</div> })}
        <Show when=move || loading.get()>
            <div class="load-spinner">"Loading…"</div>
        </Show>
        <Show when=move || !loading.get() && error.get().is_none() && empty.get()>
            <div class="empty-state">{empty_text.clone()}</div>
        </Show>
    }
}
