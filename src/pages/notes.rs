//! Notes Page
//!
//! Shared study material: search, subject filter, upload, preview, download.

use leptos::html;
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::actions;
use crate::api;
use crate::browser::{format_size, input_value, open_in_new_tab, selected_file};
use crate::components::{text_area, text_input, DeleteConfirmButton, LoadStatus};
use crate::context::use_app_context;
use crate::filters::{filter_notes, note_subjects};
use crate::forms::NoteUploadForm;
use crate::loader::{load_into, AbortGuard, Loadable};
use crate::models::Note;
use crate::store::{current_role, use_app_store};
use crate::time;

#[component]
fn UploadNoteForm() -> impl IntoView {
    let ctx = use_app_context();
    let form = RwSignal::new(NoteUploadForm::default());
    let file = RwSignal::new_local(None::<web_sys::File>);
    let file_input: NodeRef<html::Input> = NodeRef::new();
    let (uploading, set_uploading) = signal(false);

    let submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        if uploading.get_untracked() {
            return;
        }
        let current = form.get_untracked();
        let chosen = file.get_untracked();
        set_uploading.set(true);
        spawn_local(async move {
            match api::upload_note(&current, chosen).await {
                Ok(note) => {
                    tracing::info!("[notes] uploaded {} ({})", note.id, note.file.name);
                    ctx.success("Notes uploaded");
                    form.set(NoteUploadForm::default());
                    file.set(None);
                    if let Some(input) = file_input.get_untracked() {
                        input.set_value("");
                    }
                    ctx.reload();
                }
                Err(err) => ctx.error(&err),
            }
            set_uploading.set(false);
        });
    };

    view! {
        <form class="card upload-form" on:submit=submit>
            <h3>"Share notes"</h3>
            <div class="form-row">
                {text_input(form, "Title", "text", |f| f.title.clone(), |f, v| f.title = v)}
                {text_input(form, "Subject", "text", |f| f.subject.clone(), |f, v| f.subject = v)}
            </div>
            {text_area(form, "Description", |f| f.description.clone(), |f, v| f.description = v)}
            <label class="field">
                <span class="field-label">"File (max 25 MB)"</span>
                <input type="file" node_ref=file_input on:change=move |ev| file.set(selected_file(&ev))/>
            </label>
            {move || file.with(|f| f.as_ref().map(|f| format!("{} · {}", f.name(), format_size(f.size() as u64))))
                .map(|label| view! { <div class="file-chosen">{label}</div> })}
            <button type="submit" class="btn primary" disabled=move || uploading.get()>
                {move || if uploading.get() { "Uploading…" } else { "Upload" }}
            </button>
        </form>
    }
}

#[component]
pub fn NotesPage() -> impl IntoView {
    let ctx = use_app_context();
    let store = use_app_store();
    let is_admin = move || current_role(&store).is_admin();

    let state = RwSignal::new(Loadable::<Vec<Note>>::default());
    let guard = AbortGuard::new();
    let (query, set_query) = signal(String::new());
    let (subject, set_subject) = signal(String::new());

    Effect::new(move |_| {
        ctx.reload_trigger.track();
        load_into(state, guard, "notes", |signal| async move { api::list_notes("", "", signal.as_ref()).await });
    });

    let visible = move || {
        let q = query.get();
        let s = subject.get();
        state.with(|st| filter_notes(&st.data, &q, &s))
    };
    let subjects = move || state.with(|s| note_subjects(&s.data));

    let download = move |note: Note| {
        spawn_local(async move {
            match api::download_note(&note).await {
                Ok(()) => state.update(|s| actions::record_download(&mut s.data, &note.id)),
                Err(err) => ctx.error(&err),
            }
        });
    };

    let delete = move |id: String| {
        spawn_local(async move {
            match api::delete_note(&id).await {
                Ok(()) => {
                    state.update(|s| s.data.retain(|n| n.id != id));
                    ctx.success("Note deleted");
                }
                Err(err) => ctx.error(&err),
            }
        });
    };

    view! {
        <div class="page notes-page">
            <h2>"Notes"</h2>
            <UploadNoteForm/>

            <section class="card">
                <div class="list-toolbar">
                    <input
                        type="search"
                        placeholder="Search notes"
                        prop:value=move || query.get()
                        on:input=move |ev| set_query.set(input_value(&ev))
                    />
                    <select on:change=move |ev| set_subject.set(input_value(&ev))>
                        <option value="">"All subjects"</option>
                        {move || subjects().into_iter().map(|s| {
                            let selected = subject.get_untracked() == s;
                            view! { <option value=s.clone() selected=selected>{s.clone()}</option> }
                        }).collect_view()}
                    </select>
                </div>
                <LoadStatus
                    loading=Signal::derive(move || state.with(|s| s.loading))
                    error=Signal::derive(move || state.with(|s| s.error.clone()))
                    empty=Signal::derive(move || visible().is_empty())
                    empty_text="No notes found"
                />
                <div class="note-grid">
                    <For
                        each=visible
                        key=|n| (n.id.clone(), n.downloads)
                        children=move |note| {
                            let preview_id = note.id.clone();
                            let delete_id = note.id.clone();
                            let for_download = note.clone();
                            view! {
                                <article class="note-card">
                                    <div class="note-header">
                                        <h4>{note.title.clone()}</h4>
                                        <span class="pill">{note.subject.clone()}</span>
                                    </div>
                                    <p>{note.description.clone()}</p>
                                    <div class="note-meta">
                                        <span>"📄 " {note.file.name.clone()} " · " {format_size(note.file.size)}</span>
                                        <span>"⬇ " {note.downloads}</span>
                                        {note.uploader.clone().map(|u| view! { <span>"by " {u.name}</span> })}
                                        <span>{time::format_date(note.created_at.as_deref())}</span>
                                    </div>
                                    <div class="note-actions">
                                        <button class="btn small ghost" on:click=move |_| open_in_new_tab(&api::preview_url(&preview_id))>
                                            "Preview"
                                        </button>
                                        <button class="btn small primary" on:click=move |_| download(for_download.clone())>
                                            "Download"
                                        </button>
                                        {move || is_admin().then(|| {
                                            let delete_id = delete_id.clone();
                                            view! {
                                                <DeleteConfirmButton
                                                    button_class="btn small danger"
                                                    on_confirm=Callback::new(move |_| delete(delete_id.clone()))
                                                />
                                            }
                                        })}
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
