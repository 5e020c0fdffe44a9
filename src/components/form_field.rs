//! Form Fields
//!
//! Labelled inputs bound to one field of a form struct held in an `RwSignal`.

use leptos::prelude::*;

use crate::browser::input_value;

/// `<input>` bound through a getter/setter pair
pub fn text_input<F>(
    form: RwSignal<F>,
    label: &'static str,
    kind: &'static str,
    get: fn(&F) -> String,
    set: fn(&mut F, String),
) -> impl IntoView
where
    F: Send + Sync + 'static,
{
    view! {
        <label class="field">
            <span class="field-label">{label}</span>
            <input
                type=kind
                prop:value=move || form.with(get)
                on:input=move |ev| form.update(|f| set(f, input_value(&ev)))
            />
        </label>
    }
}

/// `<textarea>` bound through a getter/setter pair
pub fn text_area<F>(form: RwSignal<F>, label: &'static str, get: fn(&F) -> String, set: fn(&mut F, String)) -> impl IntoView
where
    F: Send + Sync + 'static,
{
    view! {
        <label class="field">
            <span class="field-label">{label}</span>
            <textarea
                rows="4"
                prop:value=move || form.with(get)
                on:input=move |ev| form.update(|f| set(f, input_value(&ev)))
            ></textarea>
        </label>
    }
}

/// `<select>` over fixed `(value, label)` options
pub fn select_input<F>(
    form: RwSignal<F>,
    label: &'static str,
    options: &'static [(&'static str, &'static str)],
    get: fn(&F) -> String,
    set: fn(&mut F, String),
) -> impl IntoView
where
    F: Send + Sync + 'static,
{
    view! {
        <label class="field">
            <span class="field-label">{label}</span>
            <select on:change=move |ev| form.update(|f| set(f, input_value(&ev)))>
                {options.iter().map(|(value, text)| view! {
                    <option value=*value selected=move || form.with(get) == *value>{*text}</option>
                }).collect_view()}
            </select>
        </label>
    }
}
