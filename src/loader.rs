//! Page Data Loading
//!
//! A page keeps its last good snapshot. Loads are tagged with a ticket; results from a
//! superseded ticket, and aborted results, never touch the snapshot or the error.

use std::future::Future;

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api::{ApiError, ApiResult};

/// Snapshot of one page's data slice
#[derive(Debug, Clone, PartialEq)]
pub struct Loadable<T> {
    pub data: T,
    pub loading: bool,
    pub error: Option<String>,
    generation: u64,
}

/// Identifies one load attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadTicket(u64);

impl<T: Default> Default for Loadable<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

impl<T> Loadable<T> {
    pub fn new(data: T) -> Self {
        Self {
            data,
            loading: false,
            error: None,
            generation: 0,
        }
    }

    /// Start a load; any earlier ticket becomes stale
    pub fn begin(&mut self) -> LoadTicket {
        self.generation += 1;
        self.loading = true;
        LoadTicket(self.generation)
    }

    pub fn is_current(&self, ticket: LoadTicket) -> bool {
        ticket.0 == self.generation
    }

    /// Apply a completed load. Returns whether the snapshot changed.
    pub fn finish(&mut self, ticket: LoadTicket, result: ApiResult<T>) -> bool {
        if !self.is_current(ticket) {
            return false;
        }
        self.loading = false;
        match result {
            Ok(data) => {
                self.data = data;
                self.error = None;
                true
            }
            Err(err) if err.is_silent() => false,
            Err(err) => {
                self.error = Some(err.to_string());
                false
            }
        }
    }

}

/// Owns an `AbortController` for the lifetime of the current reactive owner.
///
/// Disposing the owning view aborts whatever is still in flight.
#[derive(Clone, Copy)]
pub struct AbortGuard {
    controller: StoredValue<Option<web_sys::AbortController>, LocalStorage>,
}

impl AbortGuard {
    pub fn new() -> Self {
        let controller = StoredValue::new_local(web_sys::AbortController::new().ok());
        on_cleanup(move || {
            controller.with_value(|c| {
                if let Some(c) = c {
                    c.abort();
                }
            });
        });
        Self { controller }
    }

    pub fn signal(&self) -> Option<web_sys::AbortSignal> {
        self.controller.with_value(|c| c.as_ref().map(|c| c.signal()))
    }

    /// Abort in-flight requests and arm a fresh controller for the next load
    pub fn reset(&self) -> Option<web_sys::AbortSignal> {
        self.controller.update_value(|c| {
            if let Some(old) = c.take() {
                old.abort();
            }
            *c = web_sys::AbortController::new().ok();
        });
        self.signal()
    }
}

/// Start a load into `state`, aborting whatever the guard still has in flight.
///
/// `fetch` gets the fresh abort signal; the result is applied through the ticket.
pub fn load_into<T, F, Fut>(state: RwSignal<Loadable<T>>, guard: AbortGuard, scope: &'static str, fetch: F)
where
    T: Send + Sync + 'static,
    F: FnOnce(Option<web_sys::AbortSignal>) -> Fut + 'static,
    Fut: Future<Output = ApiResult<T>> + 'static,
{
    let Some(ticket) = state.try_update(|s| s.begin()) else { return };
    let signal = guard.reset();
    spawn_local(async move {
        let result = fetch(signal).await;
        match &result {
            Ok(_) => tracing::debug!("[{}] loaded", scope),
            Err(err) if err.is_silent() => tracing::debug!("[{}] load aborted", scope),
            Err(err) => tracing::warn!("[{}] load failed: {}", scope, err),
        }
        state.try_update(|s| s.finish(ticket, result));
    });
}

/// Patch loaded data after the page may have gone away, then recount it.
///
/// Returns `None` once `state` is disposed.
pub fn patch_and_count<T, P, C>(state: RwSignal<Loadable<T>>, patch: P, count: C) -> Option<usize>
where
    T: Send + Sync + 'static,
    P: FnOnce(&mut T),
    C: FnOnce(&T) -> usize,
{
    state.try_update(|s| patch(&mut s.data))?;
    state.try_with_untracked(|s| count(&s.data))
}

/// Error message to show for a failed action, or `None` when it should stay silent
pub fn user_message(err: &ApiError) -> Option<String> {
    (!err.is_silent()).then(|| err.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_patch_and_count_live_state() {
        let state = RwSignal::new(Loadable::new(vec![false, false, true]));
        let count = patch_and_count(state, |v| v[0] = true, |v| v.iter().filter(|x| !**x).count());
        assert_eq!(count, Some(1));
        assert_eq!(state.get_untracked().data, vec![true, false, true]);
    }

    #[test]
    fn test_patch_and_count_after_dispose() {
        let state = RwSignal::new(Loadable::new(vec![false]));
        state.dispose();
        let count = patch_and_count(state, |v| v[0] = true, |v| v.len());
        assert_eq!(count, None);
    }

    #[test]
    fn test_successful_load_replaces_data() {
        let mut state = Loadable::new(vec![1]);
        let ticket = state.begin();
        assert!(state.loading);
        assert!(state.finish(ticket, Ok(vec![2, 3])));
        assert_eq!(state.data, vec![2, 3]);
        assert!(!state.loading);
    }

    #[test]
    fn test_aborted_load_leaves_prior_state() {
        let mut state = Loadable::new(vec![1]);
        let failed = state.begin();
        state.finish(failed, Err(ApiError::Network("offline".into())));
        let prior_error = state.error.clone();

        let ticket = state.begin();
        assert!(!state.finish(ticket, Err(ApiError::Aborted)));
        assert_eq!(state.data, vec![1]);
        assert_eq!(state.error, prior_error);
    }

    #[test]
    fn test_aborted_first_load_shows_no_error() {
        let mut state: Loadable<Vec<u8>> = Loadable::default();
        let ticket = state.begin();
        state.finish(ticket, Err(ApiError::Aborted));
        assert!(state.error.is_none());
        assert!(state.data.is_empty());
    }

    #[test]
    fn test_stale_ticket_is_discarded() {
        let mut state = Loadable::new("old");
        let first = state.begin();
        let second = state.begin();

        assert!(!state.finish(first, Err(ApiError::from_status(500, ""))));
        assert!(state.error.is_none());
        assert!(state.loading);

        assert!(state.finish(second, Ok("new")));
        assert_eq!(state.data, "new");
    }

    #[test]
    fn test_user_message() {
        assert_eq!(user_message(&ApiError::Aborted), None);
        assert_eq!(user_message(&ApiError::Validation("Title is required".into())).as_deref(), Some("Title is required"));
    }
}
