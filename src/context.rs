//! Application Context
//!
//! Shared signals provided via Leptos Context API.

use leptos::prelude::*;
use leptos::task::spawn_local;
use rolling_logger::LogBuffer;

use crate::api::ApiError;
use crate::components::toast::{ToastKind, ToastQueue, TOAST_TIMEOUT_MS};
use crate::routes::Route;

/// App-wide signals provided via context
#[derive(Clone, Copy)]
pub struct AppContext {
    /// Toast stack
    pub toasts: RwSignal<ToastQueue>,
    /// Bumped to make every page re-fetch
    pub reload_trigger: RwSignal<u32>,
    /// Client log lines kept in memory
    pub logs: StoredValue<LogBuffer>,
}

impl AppContext {
    pub fn new(logs: LogBuffer) -> Self {
        Self {
            toasts: RwSignal::new(ToastQueue::default()),
            reload_trigger: RwSignal::new(0),
            logs: StoredValue::new(logs),
        }
    }

    /// Trigger a reload of page data
    pub fn reload(&self) {
        self.reload_trigger.update(|v| *v += 1);
    }

    pub fn navigate(&self, route: Route) {
        crate::routes::navigate(&route);
    }

    pub fn toast(&self, kind: ToastKind, message: impl Into<String>) {
        let mut id = 0;
        self.toasts.update(|q| id = q.push(kind, message.into()));

        let toasts = self.toasts;
        spawn_local(async move {
            gloo_timers::future::TimeoutFuture::new(TOAST_TIMEOUT_MS).await;
            toasts.update(|q| q.dismiss(id));
        });
    }

    pub fn success(&self, message: impl Into<String>) {
        self.toast(ToastKind::Success, message);
    }

    pub fn info(&self, message: impl Into<String>) {
        self.toast(ToastKind::Info, message);
    }

    /// Show an error toast unless the error is silent (aborted request)
    pub fn error(&self, err: &ApiError) {
        if let Some(message) = crate::loader::user_message(err) {
            tracing::warn!("[ui] {}", message);
            self.toast(ToastKind::Error, message);
        }
    }

    pub fn dismiss_toast(&self, id: u64) {
        self.toasts.update(|q| q.dismiss(id));
    }

    pub fn log_lines(&self) -> Vec<String> {
        self.logs.with_value(|buffer| buffer.lines())
    }
}

/// Get the app context
pub fn use_app_context() -> AppContext {
    use_context::<AppContext>().expect("AppContext should be provided")
}
