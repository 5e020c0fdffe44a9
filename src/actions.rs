//! Local Patches
//!
//! Optimistic edits applied to a page's snapshot after (or instead of) a backend call.
//! Nothing here is reconciled later; the next fetch replaces the snapshot.

use crate::api::{self, ApiRequest};
use crate::models::{Announcement, Discussion, EmergencyAlert, Event, Note};

/// Mark an announcement read. Returns the request only the first time.
pub fn mark_read(list: &mut [Announcement], id: &str) -> Option<ApiRequest> {
    let announcement = list.iter_mut().find(|a| a.id == id)?;
    if announcement.is_read {
        return None;
    }
    announcement.is_read = true;
    Some(api::mark_read_request(id))
}

/// Undo a failed mark-read
pub fn unmark_read(list: &mut [Announcement], id: &str) {
    if let Some(announcement) = list.iter_mut().find(|a| a.id == id) {
        announcement.is_read = false;
    }
}

/// Acknowledge an alert. Returns the request only the first time.
pub fn acknowledge(list: &mut [EmergencyAlert], id: &str) -> Option<ApiRequest> {
    let alert = list.iter_mut().find(|a| a.id == id)?;
    if alert.acknowledged {
        return None;
    }
    alert.acknowledged = true;
    Some(api::acknowledge_request(id))
}

pub fn unacknowledge(list: &mut [EmergencyAlert], id: &str) {
    if let Some(alert) = list.iter_mut().find(|a| a.id == id) {
        alert.acknowledged = false;
    }
}

/// Flip attendance after a successful RSVP call
pub fn apply_rsvp(list: &mut [Event], id: &str) {
    if let Some(event) = list.iter_mut().find(|e| e.id == id) {
        if event.is_attending {
            event.is_attending = false;
            event.attendees_count = event.attendees_count.saturating_sub(1);
        } else {
            event.is_attending = true;
            event.attendees_count += 1;
        }
    }
}

/// Apply a confirmed join or leave
pub fn apply_membership(list: &mut [Discussion], id: &str, joined: bool) {
    if let Some(discussion) = list.iter_mut().find(|d| d.id == id) {
        if discussion.is_joined == joined {
            return;
        }
        discussion.is_joined = joined;
        discussion.participants_count = if joined {
            discussion.participants_count + 1
        } else {
            discussion.participants_count.saturating_sub(1)
        };
    }
}

pub fn record_download(list: &mut [Note], id: &str) {
    if let Some(note) = list.iter_mut().find(|n| n.id == id) {
        note.downloads += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::Method;

    fn announcement(id: &str, is_read: bool) -> Announcement {
        Announcement { id: id.to_string(), title: "Library hours".to_string(), is_read, ..Default::default() }
    }

    #[test]
    fn test_mark_read_is_idempotent() {
        let mut list = vec![announcement("a1", false), announcement("a2", false)];

        let first = mark_read(&mut list, "a1");
        let second = mark_read(&mut list, "a1");

        let request = first.expect("first call sends");
        assert_eq!(request.method, Method::Patch);
        assert_eq!(request.path, "/api/announcements/a1/read");
        assert!(second.is_none());
        assert!(list[0].is_read);
        assert!(!list[1].is_read);
    }

    #[test]
    fn test_mark_read_unknown_id() {
        let mut list = vec![announcement("a1", true)];
        assert!(mark_read(&mut list, "zzz").is_none());
        unmark_read(&mut list, "a1");
        assert!(!list[0].is_read);
    }

    #[test]
    fn test_acknowledge_once() {
        let mut alerts = vec![EmergencyAlert { id: "x".to_string(), ..Default::default() }];
        let request = acknowledge(&mut alerts, "x").unwrap();
        assert_eq!(request.path, "/api/emergency-alerts/x/acknowledge");
        assert!(acknowledge(&mut alerts, "x").is_none());
    }

    #[test]
    fn test_apply_rsvp_adjusts_count() {
        let mut events = vec![Event { id: "e".to_string(), attendees_count: 0, is_attending: true, ..Default::default() }];
        apply_rsvp(&mut events, "e");
        assert!(!events[0].is_attending);
        assert_eq!(events[0].attendees_count, 0);

        apply_rsvp(&mut events, "e");
        assert!(events[0].is_attending);
        assert_eq!(events[0].attendees_count, 1);
    }

    #[test]
    fn test_record_download() {
        let mut notes = vec![Note { id: "n".to_string(), downloads: 4, ..Default::default() }];
        record_download(&mut notes, "n");
        assert_eq!(notes[0].downloads, 5);
    }

    #[test]
    fn test_apply_membership() {
        let mut list = vec![Discussion { id: "d".to_string(), participants_count: 3, ..Default::default() }];
        apply_membership(&mut list, "d", true);
        assert!(list[0].is_joined);
        assert_eq!(list[0].participants_count, 4);

        // repeated join leaves the count alone
        apply_membership(&mut list, "d", true);
        assert_eq!(list[0].participants_count, 4);

        apply_membership(&mut list, "d", false);
        assert!(!list[0].is_joined);
        assert_eq!(list[0].participants_count, 3);
    }
}
