//! Live Discussion Page
//!
//! Chat panel for one discussion. The socket is open exactly while the user is a
//! member; sent messages show immediately and are confirmed by the server echo.

use leptos::html;
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api::{self, ApiError};
use crate::browser::{input_value, scroll_metrics, scroll_to_bottom};
use crate::chat::{is_near_bottom, ChatLog};
use crate::components::toast::ToastKind;
use crate::components::LoadStatus;
use crate::config;
use crate::context::use_app_context;
use crate::loader::{load_into, AbortGuard, Loadable};
use crate::markdown::parse_markdown_inline;
use crate::models::{Discussion, UserSummary};
use crate::routes::{DashboardRoute, Route};
use crate::socket::{ClientEvent, DiscussionSocket, ServerEvent};
use crate::store::{use_app_store, AppStateStoreFields};
use crate::time;

#[component]
pub fn LiveDiscussionPage(discussion_id: String) -> impl IntoView {
    let ctx = use_app_context();
    let store = use_app_store();
    let id = StoredValue::new(discussion_id);

    let meta = RwSignal::new(Loadable::<Vec<Discussion>>::default());
    let meta_guard = AbortGuard::new();
    let history_guard = AbortGuard::new();
    let chat = RwSignal::new(ChatLog::new());
    let (history_loading, set_history_loading) = signal(false);
    let joined = RwSignal::new(false);
    let connected = RwSignal::new(false);
    let participants = RwSignal::new(0u32);
    let socket = StoredValue::new_local(None::<DiscussionSocket>);
    let (draft, set_draft) = signal(String::new());
    let (membership_busy, set_membership_busy) = signal(false);
    let (stick_to_bottom, set_stick_to_bottom) = signal(true);
    let list_ref: NodeRef<html::Div> = NodeRef::new();

    let discussion = Memo::new(move |_| {
        id.with_value(|id| meta.with(|s| s.data.iter().find(|d| d.id == *id).cloned()))
    });

    Effect::new(move |_| {
        ctx.reload_trigger.track();
        load_into(meta, meta_guard, "discussion", |signal| async move {
            api::list_discussions(signal.as_ref()).await
        });
    });

    // Server view of membership wins whenever the room metadata (re)loads
    Effect::new(move |_| {
        if let Some(d) = discussion.get() {
            joined.set(d.is_joined);
            participants.set(d.participants_count);
        }
    });

    // History for members
    Effect::new(move |_| {
        ctx.reload_trigger.track();
        if !joined.get() {
            return;
        }
        let signal = history_guard.reset();
        let discussion_id = id.get_value();
        set_history_loading.set(true);
        spawn_local(async move {
            match api::list_messages(&discussion_id, signal.as_ref()).await {
                Ok(history) => {
                    tracing::debug!("[chat] {} messages of history", history.len());
                    chat.update(|c| c.replace_history(history));
                }
                Err(err) => ctx.error(&err),
            }
            set_history_loading.set(false);
        });
    });

    let handle_event = move |event: ServerEvent| match event {
        ServerEvent::Message(message) => {
            let ours = message.discussion_id.is_empty() || id.with_value(|id| *id == message.discussion_id);
            if ours {
                chat.update(|c| c.apply_message(message));
            }
        }
        ServerEvent::Error { message, temp_id } => {
            if let Some(temp_id) = temp_id {
                chat.update(|c| {
                    c.apply_error(&temp_id);
                });
            }
            tracing::warn!("[chat] server error: {}", message);
            ctx.toast(ToastKind::Error, if message.is_empty() { "Message could not be sent".to_string() } else { message });
        }
        ServerEvent::Joined { participants_count, .. } | ServerEvent::Left { participants_count, .. } => {
            if let Some(count) = participants_count {
                participants.set(count);
            }
        }
    };

    let open_socket = move || {
        spawn_local(async move {
            let token = match api::socket_token().await {
                Ok(token) => token,
                Err(err) => {
                    ctx.error(&err);
                    return;
                }
            };
            // Membership may have changed while the token was in flight
            let still_wanted = joined.try_get_untracked().unwrap_or(false);
            let already_open = socket.try_with_value(|s| s.is_some()).unwrap_or(true);
            if !still_wanted || already_open {
                return;
            }
            let Some(discussion_id) = id.try_get_value() else { return };
            let url = config::get().discussion_socket_url(&token.token);
            let opened = DiscussionSocket::connect(
                &url,
                &discussion_id,
                move || connected.set(true),
                handle_event,
                move || connected.set(false),
            );
            match opened {
                Ok(s) => socket.set_value(Some(s)),
                Err(err) => ctx.error(&err),
            }
        });
    };

    // Socket follows membership
    Effect::new(move |_| {
        let want = joined.get();
        let has = socket.with_value(|s| s.is_some());
        if want && !has {
            tracing::info!("[chat] opening socket");
            open_socket();
        } else if !want && has {
            tracing::info!("[chat] closing socket");
            socket.set_value(None);
            connected.set(false);
        }
    });

    on_cleanup(move || {
        socket.try_update_value(|s| *s = None);
    });

    // Follow new messages while the reader is at the bottom
    Effect::new(move |_| {
        chat.with(|c| c.len());
        if stick_to_bottom.get_untracked() {
            if let Some(el) = list_ref.get_untracked() {
                scroll_to_bottom(&el);
            }
        }
    });

    let on_scroll = move |_| {
        if let Some(el) = list_ref.get_untracked() {
            let (top, client, height) = scroll_metrics(&el);
            set_stick_to_bottom.set(is_near_bottom(top, client, height));
        }
    };

    let send = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let Some(profile) = store.profile().get_untracked() else { return };
        let sender = UserSummary { id: profile.id, name: profile.name, email: Some(profile.email) };
        let content = draft.get_untracked();
        let discussion_id = id.get_value();

        let mut outgoing = None;
        chat.update(|c| outgoing = c.send(&discussion_id, sender, &content));
        let Some(event) = outgoing else { return };
        set_draft.set(String::new());
        set_stick_to_bottom.set(true);

        let sent = socket.with_value(|s| match s {
            Some(s) => s.send(&event),
            None => Err(ApiError::Network("Chat is not connected".to_string())),
        });
        if let Err(err) = sent {
            if let ClientEvent::Message { temp_id, .. } = &event {
                chat.update(|c| {
                    c.apply_error(temp_id);
                });
            }
            ctx.error(&err);
        }
    };

    let set_membership = move |join: bool| {
        if membership_busy.get_untracked() {
            return;
        }
        set_membership_busy.set(true);
        let discussion_id = id.get_value();
        spawn_local(async move {
            match api::set_membership(&discussion_id, join).await {
                Ok(()) => {
                    joined.set(join);
                    participants.update(|n| *n = if join { *n + 1 } else { n.saturating_sub(1) });
                    if !join {
                        chat.update(|c| c.clear());
                    }
                }
                Err(err) => ctx.error(&err),
            }
            set_membership_busy.set(false);
        });
    };

    let me = move || store.profile().with(|p| p.as_ref().map(|p| p.id.clone()).unwrap_or_default());

    view! {
        <div class="page live-discussion-page">
            <a class="back-link" href=Route::Dashboard(DashboardRoute::Discussions).href()>"← All discussions"</a>
            <LoadStatus
                loading=Signal::derive(move || meta.with(|s| s.loading))
                error=Signal::derive(move || meta.with(|s| s.error.clone()))
                empty=Signal::derive(move || !meta.with(|s| s.loading) && discussion.with(|d| d.is_none()))
                empty_text="This discussion doesn't exist or was removed"
            />
            {move || discussion.get().map(|d| view! {
                <header class="chat-header card">
                    <div>
                        <h2>{d.title.clone()}</h2>
                        <span class="tag">"#" {d.topic_tag.clone()}</span>
                        <span class="participants">"👥 " {move || participants.get()}</span>
                        <span class=move || if connected.get() { "conn-dot online" } else { "conn-dot" }></span>
                    </div>
                    <p class="markdown" inner_html=parse_markdown_inline(&d.description)></p>
                    <button
                        class=move || if joined.get() { "btn ghost" } else { "btn primary" }
                        disabled=move || membership_busy.get()
                        on:click=move |_| set_membership(!joined.get_untracked())
                    >
                        {move || if joined.get() { "Leave" } else { "Join to chat" }}
                    </button>
                </header>
            })}

            <Show when=move || joined.get()>
                <section class="chat-panel card">
                    <div class="message-list" node_ref=list_ref on:scroll=on_scroll>
                        <Show when=move || history_loading.get()>
                            <div class="load-spinner">"Loading messages…"</div>
                        </Show>
                        <For
                            each=move || chat.with(|c| c.entries().to_vec())
                            key=|entry| (entry.key(), entry.is_pending())
                            children=move |entry| {
                                let mine = entry.message.sender.id == me();
                                let mut class = String::from("message");
                                if mine {
                                    class.push_str(" mine");
                                }
                                if entry.is_pending() {
                                    class.push_str(" pending");
                                }
                                let pending = entry.is_pending();
                                let message = entry.message;
                                view! {
                                    <div class=class>
                                        <div class="message-meta">
                                            <span class="message-sender">{if mine { "You".to_string() } else { message.sender.name.clone() }}</span>
                                            <span class="message-time">
                                                {if pending { "Sending…".to_string() } else { time::relative(message.created_at.as_deref(), time::now()) }}
                                            </span>
                                        </div>
                                        <div class="message-content">{message.content.clone()}</div>
                                    </div>
                                }
                            }
                        />
                    </div>
                    <form class="chat-input" on:submit=send>
                        <input
                            type="text"
                            placeholder=move || if connected.get() { "Write a message…" } else { "Connecting…" }
                            prop:value=move || draft.get()
                            on:input=move |ev| set_draft.set(input_value(&ev))
                        />
                        <button type="submit" class="btn primary" disabled=move || !connected.get() || draft.with(|d| d.trim().is_empty())>
                            "Send"
                        </button>
                    </form>
                </section>
            </Show>
        </div>
    }
}
