//! Frontend Models
//!
//! Data structures matching backend entities. Field names follow the backend's camelCase;
//! ids are accepted as either `_id` or `id`.

use serde::{Deserialize, Serialize};

/// Minimal user reference embedded in other entities
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserSummary {
    #[serde(rename = "_id", alias = "id", default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: Option<String>,
}

/// Signed-in user's profile
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    #[serde(rename = "_id", alias = "id", default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub role: String,
    #[serde(default)]
    pub department: Option<String>,
    #[serde(default)]
    pub year: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
}

impl UserProfile {
    pub fn is_admin(&self) -> bool {
        self.role.eq_ignore_ascii_case("admin")
    }

    /// Initials for the avatar bubble
    pub fn initials(&self) -> String {
        let initials: String = self
            .name
            .split_whitespace()
            .filter_map(|part| part.chars().next())
            .take(2)
            .collect::<String>()
            .to_uppercase();
        if initials.is_empty() { "?".to_string() } else { initials }
    }
}

/// Which side of lost & found an item belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportKind {
    Lost,
    Found,
}

impl ReportKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReportKind::Lost => "lost",
            ReportKind::Found => "found",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ReportKind::Lost => "Lost",
            ReportKind::Found => "Found",
        }
    }

    /// Path segment of the resource, e.g. `lost-items`
    pub fn resource(&self) -> &'static str {
        match self {
            ReportKind::Lost => "lost-items",
            ReportKind::Found => "found-items",
        }
    }

    /// JSON field carrying the report date
    pub fn date_field(&self) -> &'static str {
        match self {
            ReportKind::Lost => "dateLost",
            ReportKind::Found => "dateFound",
        }
    }
}

/// Lost or found item report
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LostFoundItem {
    #[serde(rename = "_id", alias = "id", default)]
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub contact: String,
    #[serde(default, alias = "dateLost", alias = "dateFound")]
    pub date: Option<String>,
    #[serde(default, alias = "image", alias = "imageUrl")]
    pub image_url: Option<String>,
    #[serde(default = "default_status")]
    pub status: String,
    #[serde(default, alias = "reportedBy")]
    pub reporter: Option<UserSummary>,
    #[serde(default)]
    pub created_at: Option<String>,
}

fn default_status() -> String {
    "open".to_string()
}

impl LostFoundItem {
    pub fn is_resolved(&self) -> bool {
        matches!(self.status.as_str(), "resolved" | "claimed" | "returned" | "closed")
    }
}

/// Campus event with RSVP state
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    #[serde(rename = "_id", alias = "id", default)]
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, alias = "location")]
    pub venue: String,
    #[serde(default, alias = "startDate", alias = "dateTime")]
    pub date: Option<String>,
    #[serde(default)]
    pub end_date: Option<String>,
    #[serde(default)]
    pub capacity: Option<u32>,
    #[serde(default)]
    pub attendees_count: u32,
    #[serde(default)]
    pub attendees: Vec<UserSummary>,
    #[serde(default)]
    pub is_attending: bool,
}

impl Event {
    pub fn is_full(&self) -> bool {
        matches!(self.capacity, Some(cap) if self.attendees_count >= cap)
    }

    pub fn seats_left(&self) -> Option<u32> {
        self.capacity.map(|cap| cap.saturating_sub(self.attendees_count))
    }
}

/// Admin announcement
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Announcement {
    #[serde(rename = "_id", alias = "id", default)]
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub urgency: String,
    #[serde(default)]
    pub audience: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub is_read: bool,
    #[serde(default, alias = "expiry")]
    pub expires_at: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
}

impl Announcement {
    pub fn is_urgent(&self) -> bool {
        matches!(self.urgency.as_str(), "urgent" | "high" | "critical")
    }
}

/// In-app notification
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    #[serde(rename = "_id", alias = "id", default)]
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub message: String,
    #[serde(default, alias = "type")]
    pub kind: String,
    #[serde(default)]
    pub is_read: bool,
    #[serde(default)]
    pub created_at: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct AlertMetadata {
    #[serde(default)]
    pub location: Option<String>,
}

/// Emergency alert
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmergencyAlert {
    #[serde(rename = "_id", alias = "id", default)]
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub severity: String,
    #[serde(default)]
    pub audience: String,
    #[serde(default, alias = "deliveryChannels")]
    pub channels: Vec<String>,
    #[serde(default)]
    pub acknowledged: bool,
    #[serde(default)]
    pub metadata: AlertMetadata,
    #[serde(default)]
    pub created_at: Option<String>,
}

impl EmergencyAlert {
    /// Sort weight; higher is more severe
    pub fn severity_rank(&self) -> u8 {
        match self.severity.to_ascii_lowercase().as_str() {
            "critical" => 4,
            "high" => 3,
            "medium" => 2,
            "low" => 1,
            _ => 0,
        }
    }
}

/// Uploaded file metadata of a note
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NoteFile {
    #[serde(default, alias = "originalName", alias = "filename")]
    pub name: String,
    #[serde(default, alias = "mimetype")]
    pub mime_type: Option<String>,
    #[serde(default)]
    pub size: u64,
}

/// Shared study note
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    #[serde(rename = "_id", alias = "id", default)]
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub subject: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub file: NoteFile,
    #[serde(default)]
    pub downloads: u32,
    #[serde(default, alias = "uploadedBy")]
    pub uploader: Option<UserSummary>,
    #[serde(default)]
    pub created_at: Option<String>,
}

/// Discussion room
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Discussion {
    #[serde(rename = "_id", alias = "id", default)]
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub topic_tag: String,
    #[serde(default)]
    pub participants_count: u32,
    #[serde(default)]
    pub is_joined: bool,
    #[serde(default)]
    pub created_at: Option<String>,
}

/// Chat message in a discussion
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    #[serde(rename = "_id", alias = "id", default)]
    pub id: String,
    #[serde(default, alias = "discussion")]
    pub discussion_id: String,
    #[serde(default)]
    pub sender: UserSummary,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub temp_id: Option<String>,
}

/// Short-lived socket credentials
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SocketToken {
    pub token: String,
    #[serde(default)]
    pub expires_at: Option<String>,
}

/// Admin dashboard aggregate counts
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminOverview {
    #[serde(default)]
    pub users: u32,
    #[serde(default)]
    pub lost_items: u32,
    #[serde(default)]
    pub found_items: u32,
    #[serde(default)]
    pub events: u32,
    #[serde(default)]
    pub announcements: u32,
    #[serde(default)]
    pub active_alerts: u32,
    #[serde(default)]
    pub notes: u32,
    #[serde(default)]
    pub discussions: u32,
}

/// User row in admin management
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminUser {
    #[serde(rename = "_id", alias = "id", default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub role: String,
    #[serde(default)]
    pub department: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lost_item_accepts_backend_shape() {
        let json = r#"{
            "_id": "64a1",
            "title": "Blue umbrella",
            "description": "Left in library",
            "location": "Library L2",
            "contact": "555-0101",
            "dateLost": "2024-03-02",
            "status": "open"
        }"#;
        let item: LostFoundItem = serde_json::from_str(json).unwrap();
        assert_eq!(item.id, "64a1");
        assert_eq!(item.date.as_deref(), Some("2024-03-02"));
        assert!(item.image_url.is_none());
        assert!(!item.is_resolved());
    }

    #[test]
    fn test_missing_optional_fields_default() {
        let event: Event = serde_json::from_str(r#"{"id": "e1", "title": "Hackathon"}"#).unwrap();
        assert_eq!(event.id, "e1");
        assert_eq!(event.attendees_count, 0);
        assert!(!event.is_attending);
        assert!(!event.is_full());
        assert_eq!(event.seats_left(), None);
    }

    #[test]
    fn test_event_capacity() {
        let event = Event { capacity: Some(2), attendees_count: 2, ..Default::default() };
        assert!(event.is_full());
        assert_eq!(event.seats_left(), Some(0));
    }

    #[test]
    fn test_message_temp_id_round_trip_shape() {
        let json = r#"{"_id":"m1","discussionId":"d1","sender":{"_id":"u1","name":"Ana"},"content":"hi","tempId":"t-1"}"#;
        let msg: Message = serde_json::from_str(json).unwrap();
        assert_eq!(msg.temp_id.as_deref(), Some("t-1"));
        assert_eq!(msg.sender.name, "Ana");
    }

    #[test]
    fn test_profile_initials() {
        let profile = UserProfile { name: "ada lovelace byron".to_string(), ..Default::default() };
        assert_eq!(profile.initials(), "AL");
        assert_eq!(UserProfile::default().initials(), "?");
    }

    #[test]
    fn test_alert_severity_rank() {
        let alert = EmergencyAlert { severity: "Critical".to_string(), ..Default::default() };
        assert_eq!(alert.severity_rank(), 4);
    }
}
