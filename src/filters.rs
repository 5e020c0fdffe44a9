//! List Filters
//!
//! Search, filter and ordering over snapshots already returned by the API.

use std::cmp::Reverse;

use chrono::{DateTime, Utc};

use crate::models::{Announcement, Discussion, EmergencyAlert, Event, LostFoundItem, Note};
use crate::time::{is_past, parse_timestamp};

/// Case-insensitive substring match against any field; blank query matches all
pub fn matches_query(query: &str, fields: &[&str]) -> bool {
    let query = query.trim().to_lowercase();
    query.is_empty() || fields.iter().any(|f| f.to_lowercase().contains(&query))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatusFilter {
    #[default]
    All,
    Open,
    Resolved,
}

impl StatusFilter {
    pub fn parse(value: &str) -> Self {
        match value {
            "open" => StatusFilter::Open,
            "resolved" => StatusFilter::Resolved,
            _ => StatusFilter::All,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            StatusFilter::All => "all",
            StatusFilter::Open => "open",
            StatusFilter::Resolved => "resolved",
        }
    }

    fn accepts(&self, item: &LostFoundItem) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::Open => !item.is_resolved(),
            StatusFilter::Resolved => item.is_resolved(),
        }
    }
}

pub fn filter_reports(items: &[LostFoundItem], query: &str, status: StatusFilter) -> Vec<LostFoundItem> {
    items
        .iter()
        .filter(|i| status.accepts(i))
        .filter(|i| matches_query(query, &[&i.title, &i.description, &i.location]))
        .cloned()
        .collect()
}

/// Upcoming (soonest first) and past (latest first) events
pub fn split_events(events: &[Event], now: DateTime<Utc>) -> (Vec<Event>, Vec<Event>) {
    let (mut past, mut upcoming): (Vec<Event>, Vec<Event>) =
        events.iter().cloned().partition(|e| is_past(e.date.as_deref(), now));
    upcoming.sort_by_key(|e| e.date.as_deref().and_then(parse_timestamp));
    past.sort_by_key(|e| Reverse(e.date.as_deref().and_then(parse_timestamp)));
    (upcoming, past)
}

/// Visible announcements: unexpired, urgent first, then newest
pub fn visible_announcements(list: &[Announcement], category: &str, now: DateTime<Utc>) -> Vec<Announcement> {
    let mut visible: Vec<Announcement> = list
        .iter()
        .filter(|a| !is_past(a.expires_at.as_deref(), now))
        .filter(|a| category.is_empty() || category == "all" || a.category.eq_ignore_ascii_case(category))
        .cloned()
        .collect();
    visible.sort_by_key(|a| (Reverse(a.is_urgent()), Reverse(a.created_at.as_deref().and_then(parse_timestamp))));
    visible
}

pub fn unread_count(list: &[Announcement], now: DateTime<Utc>) -> usize {
    list.iter()
        .filter(|a| !a.is_read && !is_past(a.expires_at.as_deref(), now))
        .count()
}

/// Unacknowledged first, then most severe, then newest
pub fn sort_alerts(list: &[EmergencyAlert]) -> Vec<EmergencyAlert> {
    let mut sorted = list.to_vec();
    sorted.sort_by_key(|a| {
        (
            a.acknowledged,
            Reverse(a.severity_rank()),
            Reverse(a.created_at.as_deref().and_then(parse_timestamp)),
        )
    });
    sorted
}

pub fn active_alert_count(list: &[EmergencyAlert]) -> usize {
    list.iter().filter(|a| !a.acknowledged).count()
}

pub fn filter_notes(notes: &[Note], query: &str, subject: &str) -> Vec<Note> {
    notes
        .iter()
        .filter(|n| subject.is_empty() || n.subject.eq_ignore_ascii_case(subject))
        .filter(|n| matches_query(query, &[&n.title, &n.subject, &n.description]))
        .cloned()
        .collect()
}

/// Distinct subjects, sorted case-insensitively
pub fn note_subjects(notes: &[Note]) -> Vec<String> {
    let mut subjects: Vec<String> = Vec::new();
    for note in notes {
        let subject = note.subject.trim();
        if !subject.is_empty() && !subjects.iter().any(|s| s.eq_ignore_ascii_case(subject)) {
            subjects.push(subject.to_string());
        }
    }
    subjects.sort_by_key(|s| s.to_lowercase());
    subjects
}

pub fn filter_discussions(list: &[Discussion], query: &str) -> Vec<Discussion> {
    list.iter()
        .filter(|d| matches_query(query, &[&d.title, &d.topic_tag, &d.description]))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap()
    }

    fn report(title: &str, status: &str) -> LostFoundItem {
        LostFoundItem {
            id: title.to_string(),
            title: title.to_string(),
            location: "Library".to_string(),
            status: status.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_matches_query() {
        assert!(matches_query("", &["anything"]));
        assert!(matches_query("LIB", &["x", "Library"]));
        assert!(!matches_query("gym", &["Library"]));
    }

    #[test]
    fn test_filter_reports_by_status_and_query() {
        let items = vec![report("Keys", "open"), report("Wallet", "resolved"), report("Keycard", "claimed")];
        let open = filter_reports(&items, "", StatusFilter::Open);
        assert_eq!(open.len(), 1);

        let resolved_keys = filter_reports(&items, "key", StatusFilter::Resolved);
        assert_eq!(resolved_keys.len(), 1);
        assert_eq!(resolved_keys[0].title, "Keycard");

        assert_eq!(filter_reports(&items, "library", StatusFilter::All).len(), 3);
    }

    #[test]
    fn test_split_events() {
        let event = |id: &str, date: &str| Event { id: id.to_string(), date: Some(date.to_string()), ..Default::default() };
        let events = vec![
            event("later", "2024-06-10"),
            event("old", "2024-01-01"),
            event("soon", "2024-05-02"),
            event("recent", "2024-04-20"),
        ];
        let (upcoming, past) = split_events(&events, now());
        let ids = |list: &[Event]| list.iter().map(|e| e.id.clone()).collect::<Vec<_>>();
        assert_eq!(ids(&upcoming), vec!["soon", "later"]);
        assert_eq!(ids(&past), vec!["recent", "old"]);
    }

    #[test]
    fn test_visible_announcements_order_and_expiry() {
        let a = |id: &str, urgency: &str, created: &str, expires: Option<&str>| Announcement {
            id: id.to_string(),
            urgency: urgency.to_string(),
            category: "academic".to_string(),
            created_at: Some(created.to_string()),
            expires_at: expires.map(str::to_string),
            ..Default::default()
        };
        let list = vec![
            a("old", "normal", "2024-04-01", None),
            a("expired", "urgent", "2024-04-02", Some("2024-04-30")),
            a("urgent", "urgent", "2024-03-01", None),
            a("new", "normal", "2024-04-28", Some("2024-06-01")),
        ];
        let visible = visible_announcements(&list, "all", now());
        let ids: Vec<&str> = visible.iter().map(|a| a.id.as_str()).collect();
        assert_eq!(ids, vec!["urgent", "new", "old"]);

        assert!(visible_announcements(&list, "events", now()).is_empty());
        assert_eq!(unread_count(&list, now()), 3);
    }

    #[test]
    fn test_sort_alerts() {
        let alert = |id: &str, severity: &str, ack: bool| EmergencyAlert {
            id: id.to_string(),
            severity: severity.to_string(),
            acknowledged: ack,
            ..Default::default()
        };
        let sorted = sort_alerts(&[alert("a", "low", false), alert("b", "critical", true), alert("c", "high", false)]);
        let ids: Vec<&str> = sorted.iter().map(|a| a.id.as_str()).collect();
        assert_eq!(ids, vec!["c", "a", "b"]);
        assert_eq!(active_alert_count(&sorted), 2);
    }

    #[test]
    fn test_note_subjects_and_filter() {
        let note = |title: &str, subject: &str| Note { title: title.to_string(), subject: subject.to_string(), ..Default::default() };
        let notes = vec![note("Vectors", "Math"), note("Optics", "physics"), note("Limits", "math"), note("Misc", " ")];
        assert_eq!(note_subjects(&notes), vec!["Math", "physics"]);
        assert_eq!(filter_notes(&notes, "", "MATH").len(), 2);
        assert_eq!(filter_notes(&notes, "opt", "").len(), 1);
    }

    #[test]
    fn test_filter_discussions_by_tag() {
        let d = Discussion { title: "Study group".to_string(), topic_tag: "calculus".to_string(), ..Default::default() };
        assert_eq!(filter_discussions(&[d.clone()], "calc").len(), 1);
        assert!(filter_discussions(&[d], "biology").is_empty());
    }
}
