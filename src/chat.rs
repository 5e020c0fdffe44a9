//! Live Discussion Message Log
//!
//! Optimistic sends are tracked as a pending set keyed by a client-generated `tempId`.
//! A server echo carrying the same id replaces the placeholder; an error for it drops
//! the placeholder. There is no de-duplication beyond these id matches.

use std::collections::HashSet;

use crate::models::{Message, UserSummary};
use crate::socket::ClientEvent;

/// Pixels from the bottom that still count as "at the bottom"
pub const AUTOSCROLL_THRESHOLD_PX: f64 = 80.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeliveryState {
    Pending,
    Confirmed,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChatEntry {
    pub message: Message,
    pub state: DeliveryState,
}

impl ChatEntry {
    /// Stable key for keyed list rendering
    pub fn key(&self) -> String {
        match (&self.state, &self.message.temp_id) {
            (DeliveryState::Pending, Some(temp_id)) => format!("tmp:{}", temp_id),
            _ => format!("id:{}", self.message.id),
        }
    }

    pub fn is_pending(&self) -> bool {
        self.state == DeliveryState::Pending
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChatLog {
    entries: Vec<ChatEntry>,
    pending: HashSet<String>,
}

impl ChatLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> &[ChatEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    pub fn is_pending(&self, temp_id: &str) -> bool {
        self.pending.contains(temp_id)
    }

    /// Append an optimistic message and return the event to emit.
    ///
    /// Blank content is rejected.
    pub fn send(&mut self, discussion_id: &str, sender: UserSummary, content: &str) -> Option<ClientEvent> {
        let content = content.trim();
        if content.is_empty() {
            return None;
        }
        let temp_id = new_temp_id();
        let message = Message {
            id: String::new(),
            discussion_id: discussion_id.to_string(),
            sender,
            content: content.to_string(),
            created_at: Some(chrono::Utc::now().to_rfc3339()),
            temp_id: Some(temp_id.clone()),
        };
        self.entries.push(ChatEntry { message, state: DeliveryState::Pending });
        self.pending.insert(temp_id.clone());

        Some(ClientEvent::Message {
            discussion_id: discussion_id.to_string(),
            content: content.to_string(),
            temp_id,
        })
    }

    /// Merge a message pushed by the server
    pub fn apply_message(&mut self, message: Message) {
        if let Some(temp_id) = message.temp_id.clone() {
            if self.pending.remove(&temp_id) {
                let slot = self
                    .entries
                    .iter()
                    .position(|e| e.is_pending() && e.message.temp_id.as_deref() == Some(temp_id.as_str()));
                let entry = ChatEntry { message, state: DeliveryState::Confirmed };
                match slot {
                    Some(index) => self.entries[index] = entry,
                    None => self.entries.push(entry),
                }
                return;
            }
        }

        let duplicate = !message.id.is_empty()
            && self
                .entries
                .iter()
                .any(|e| e.state == DeliveryState::Confirmed && e.message.id == message.id);
        if !duplicate {
            self.entries.push(ChatEntry { message, state: DeliveryState::Confirmed });
        }
    }

    /// Drop the placeholder for a failed send. Returns whether one was removed.
    pub fn apply_error(&mut self, temp_id: &str) -> bool {
        if !self.pending.remove(temp_id) {
            return false;
        }
        self.entries
            .retain(|e| !(e.is_pending() && e.message.temp_id.as_deref() == Some(temp_id)));
        true
    }

    /// Replace confirmed history; still-pending entries stay at the end
    pub fn replace_history(&mut self, history: Vec<Message>) {
        let pending: Vec<ChatEntry> = self.entries.drain(..).filter(|e| e.is_pending()).collect();
        self.entries = history
            .into_iter()
            .map(|message| ChatEntry { message, state: DeliveryState::Confirmed })
            .collect();
        self.entries.extend(pending);
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.pending.clear();
    }
}

pub fn new_temp_id() -> String {
    format!("tmp-{}", uuid::Uuid::new_v4())
}

/// Whether the viewport is close enough to the bottom to follow new messages
pub fn is_near_bottom(scroll_top: f64, client_height: f64, scroll_height: f64) -> bool {
    scroll_height - (scroll_top + client_height) <= AUTOSCROLL_THRESHOLD_PX
}

#[cfg(test)]
mod tests {
    use super::*;

    fn me() -> UserSummary {
        UserSummary { id: "u1".to_string(), name: "Ana".to_string(), email: None }
    }

    fn echo(temp_id: &str, id: &str, content: &str) -> Message {
        Message {
            id: id.to_string(),
            discussion_id: "d1".to_string(),
            sender: me(),
            content: content.to_string(),
            created_at: Some("2024-04-01T10:00:00Z".to_string()),
            temp_id: Some(temp_id.to_string()),
        }
    }

    fn sent_temp_id(event: ClientEvent) -> String {
        match event {
            ClientEvent::Message { temp_id, .. } => temp_id,
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_send_appends_one_pending_entry() {
        let mut log = ChatLog::new();
        let temp_id = sent_temp_id(log.send("d1", me(), "  hello  ").unwrap());

        assert_eq!(log.len(), 1);
        assert_eq!(log.pending_count(), 1);
        let entry = &log.entries()[0];
        assert!(entry.is_pending());
        assert_eq!(entry.message.content, "hello");
        assert_eq!(entry.message.temp_id.as_deref(), Some(temp_id.as_str()));
    }

    #[test]
    fn test_temp_ids_are_unique() {
        let mut log = ChatLog::new();
        let a = sent_temp_id(log.send("d1", me(), "one").unwrap());
        let b = sent_temp_id(log.send("d1", me(), "two").unwrap());
        assert_ne!(a, b);
        assert_eq!(log.pending_count(), 2);
    }

    #[test]
    fn test_blank_message_is_rejected() {
        let mut log = ChatLog::new();
        assert!(log.send("d1", me(), "   ").is_none());
        assert!(log.is_empty());
    }

    #[test]
    fn test_echo_replaces_placeholder() {
        let mut log = ChatLog::new();
        let temp_id = sent_temp_id(log.send("d1", me(), "hello").unwrap());

        log.apply_message(echo(&temp_id, "m1", "hello"));

        assert_eq!(log.len(), 1);
        assert_eq!(log.pending_count(), 0);
        let entry = &log.entries()[0];
        assert_eq!(entry.state, DeliveryState::Confirmed);
        assert_eq!(entry.message.id, "m1");
    }

    #[test]
    fn test_echo_keeps_position_between_messages() {
        let mut log = ChatLog::new();
        let first = sent_temp_id(log.send("d1", me(), "first").unwrap());
        log.apply_message(Message { id: "other".to_string(), content: "from Ben".to_string(), ..Default::default() });

        log.apply_message(echo(&first, "m1", "first"));

        let contents: Vec<&str> = log.entries().iter().map(|e| e.message.content.as_str()).collect();
        assert_eq!(contents, vec!["first", "from Ben"]);
    }

    #[test]
    fn test_repeated_echo_does_not_duplicate() {
        let mut log = ChatLog::new();
        let temp_id = sent_temp_id(log.send("d1", me(), "hello").unwrap());
        log.apply_message(echo(&temp_id, "m1", "hello"));
        log.apply_message(echo(&temp_id, "m1", "hello"));
        assert_eq!(log.len(), 1);
    }

    #[test]
    fn test_error_drops_placeholder() {
        let mut log = ChatLog::new();
        let temp_id = sent_temp_id(log.send("d1", me(), "hello").unwrap());

        assert!(log.apply_error(&temp_id));
        assert!(log.is_empty());
        assert!(!log.is_pending(&temp_id));
        assert!(!log.apply_error(&temp_id));
    }

    #[test]
    fn test_history_keeps_pending() {
        let mut log = ChatLog::new();
        log.send("d1", me(), "typing fast").unwrap();
        log.replace_history(vec![Message { id: "h1".to_string(), content: "old".to_string(), ..Default::default() }]);

        assert_eq!(log.len(), 2);
        assert_eq!(log.entries()[0].message.id, "h1");
        assert!(log.entries()[1].is_pending());
    }

    #[test]
    fn test_entry_keys_distinguish_pending() {
        let mut log = ChatLog::new();
        let temp_id = sent_temp_id(log.send("d1", me(), "x").unwrap());
        assert_eq!(log.entries()[0].key(), format!("tmp:{}", temp_id));
        log.apply_message(echo(&temp_id, "m9", "x"));
        assert_eq!(log.entries()[0].key(), "id:m9");
    }

    #[test]
    fn test_near_bottom() {
        assert!(is_near_bottom(920.0, 400.0, 1400.0));
        assert!(!is_near_bottom(100.0, 400.0, 1400.0));
    }
}
