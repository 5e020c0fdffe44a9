//! Form Validation
//!
//! Each form validates its raw input values and turns them into an `ApiRequest`
//! before anything is sent.

use serde_json::json;
use thiserror::Error;

use crate::api::{ApiError, ApiRequest};
use crate::models::{ReportKind, UserProfile};
use crate::session::PortalRole;

/// Upload ceiling for note files
pub const MAX_NOTE_BYTES: f64 = 25.0 * 1024.0 * 1024.0;

pub const MIN_PASSWORD_LEN: usize = 8;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum FormError {
    #[error("{0} is required")]
    Required(&'static str),

    #[error("Image must be a valid http(s) URL")]
    InvalidImageUrl,

    #[error("Enter a valid email address")]
    InvalidEmail,

    #[error("Password must be at least 8 characters")]
    PasswordTooShort,

    #[error("Passwords do not match")]
    PasswordMismatch,

    #[error("Capacity must be a whole number of at least 1")]
    InvalidCapacity,

    #[error("Select at least one delivery channel")]
    NoChannels,

    #[error("File is larger than 25 MB")]
    FileTooLarge,
}

impl From<FormError> for ApiError {
    fn from(err: FormError) -> Self {
        ApiError::Validation(err.to_string())
    }
}

fn required(value: &str, field: &'static str) -> Result<String, FormError> {
    let value = value.trim();
    if value.is_empty() {
        Err(FormError::Required(field))
    } else {
        Ok(value.to_string())
    }
}

fn optional(value: &str) -> Option<String> {
    let value = value.trim();
    (!value.is_empty()).then(|| value.to_string())
}

pub fn is_valid_email(value: &str) -> bool {
    let value = value.trim();
    match value.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && !domain.contains('@')
                && domain.contains('.')
                && !domain.starts_with('.')
                && !domain.ends_with('.')
                && !value.contains(char::is_whitespace)
        }
        None => false,
    }
}

/// Absolute http(s) URL
pub fn is_http_url(value: &str) -> bool {
    url::Url::parse(value.trim())
        .map(|u| matches!(u.scheme(), "http" | "https") && u.host().is_some())
        .unwrap_or(false)
}

/// Comma-separated tags, trimmed and de-duplicated case-insensitively
pub fn parse_tags(input: &str) -> Vec<String> {
    let mut tags: Vec<String> = Vec::new();
    for tag in input.split(',').map(str::trim).filter(|t| !t.is_empty()) {
        if !tags.iter().any(|t| t.eq_ignore_ascii_case(tag)) {
            tags.push(tag.to_string());
        }
    }
    tags
}

// ========================
// Lost & Found Report
// ========================

#[derive(Debug, Clone, PartialEq)]
pub struct ReportForm {
    pub kind: ReportKind,
    pub title: String,
    pub description: String,
    pub location: String,
    pub contact: String,
    pub date: String,
    /// Only offered for found items
    pub image_url: String,
}

impl ReportForm {
    pub fn new(kind: ReportKind) -> Self {
        Self {
            kind,
            title: String::new(),
            description: String::new(),
            location: String::new(),
            contact: String::new(),
            date: String::new(),
            image_url: String::new(),
        }
    }

    pub fn to_request(&self) -> Result<ApiRequest, FormError> {
        let title = required(&self.title, "Title")?;
        let location = required(&self.location, "Location")?;
        let contact = required(&self.contact, "Contact")?;
        let date = required(&self.date, "Date")?;

        let mut body = json!({
            "title": title,
            "description": self.description.trim(),
            "location": location,
            "contact": contact,
        });
        body[self.kind.date_field()] = json!(date);

        if self.kind == ReportKind::Found {
            if let Some(image) = optional(&self.image_url) {
                if !is_http_url(&image) {
                    return Err(FormError::InvalidImageUrl);
                }
                body["image"] = json!(image);
            }
        }

        Ok(ApiRequest::post(format!("/api/{}/report", self.kind.resource())).json(body))
    }
}

// ========================
// Auth
// ========================

#[derive(Debug, Clone, PartialEq, Default)]
pub struct SignInForm {
    pub role: PortalRole,
    pub email: String,
    pub password: String,
}

impl SignInForm {
    pub fn to_request(&self) -> Result<ApiRequest, FormError> {
        let email = required(&self.email, "Email")?;
        if !is_valid_email(&email) {
            return Err(FormError::InvalidEmail);
        }
        if self.password.is_empty() {
            return Err(FormError::Required("Password"));
        }
        Ok(ApiRequest::post(format!("/api/auth/{}/signin", self.role.as_str()))
            .json(json!({ "email": email, "password": self.password })))
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct SignUpForm {
    pub role: PortalRole,
    pub name: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
    pub department: String,
    pub year: String,
}

impl SignUpForm {
    pub fn to_request(&self) -> Result<ApiRequest, FormError> {
        let name = required(&self.name, "Name")?;
        let email = required(&self.email, "Email")?;
        if !is_valid_email(&email) {
            return Err(FormError::InvalidEmail);
        }
        if self.password.chars().count() < MIN_PASSWORD_LEN {
            return Err(FormError::PasswordTooShort);
        }
        if self.password != self.confirm_password {
            return Err(FormError::PasswordMismatch);
        }

        let mut body = json!({ "name": name, "email": email, "password": self.password });
        if let Some(department) = optional(&self.department) {
            body["department"] = json!(department);
        }
        if self.role == PortalRole::User {
            if let Some(year) = optional(&self.year) {
                body["year"] = json!(year);
            }
        }
        Ok(ApiRequest::post(format!("/api/auth/{}/signup", self.role.as_str())).json(body))
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct ProfileForm {
    pub name: String,
    pub department: String,
    pub year: String,
    pub phone: String,
}

impl ProfileForm {
    /// Prefill from the loaded profile
    pub fn from_profile(profile: &UserProfile) -> Self {
        Self {
            name: profile.name.clone(),
            department: profile.department.clone().unwrap_or_default(),
            year: profile.year.clone().unwrap_or_default(),
            phone: profile.phone.clone().unwrap_or_default(),
        }
    }

    pub fn to_request(&self) -> Result<ApiRequest, FormError> {
        let name = required(&self.name, "Name")?;
        Ok(ApiRequest::put("/api/profile").json(json!({
            "name": name,
            "department": optional(&self.department),
            "year": optional(&self.year),
            "phone": optional(&self.phone),
        })))
    }
}

// ========================
// Admin Content
// ========================

#[derive(Debug, Clone, PartialEq, Default)]
pub struct EventForm {
    pub title: String,
    pub description: String,
    pub venue: String,
    /// `YYYY-MM-DD`
    pub date: String,
    /// `HH:MM`, optional
    pub time: String,
    pub capacity: String,
}

impl EventForm {
    pub fn to_request(&self) -> Result<ApiRequest, FormError> {
        let title = required(&self.title, "Title")?;
        let venue = required(&self.venue, "Venue")?;
        let date = required(&self.date, "Date")?;
        let date = match optional(&self.time) {
            Some(time) => format!("{}T{}", date, time),
            None => date,
        };
        let capacity: u32 = self
            .capacity
            .trim()
            .parse()
            .ok()
            .filter(|c| *c >= 1)
            .ok_or(FormError::InvalidCapacity)?;

        Ok(ApiRequest::post("/api/events").json(json!({
            "title": title,
            "description": self.description.trim(),
            "venue": venue,
            "date": date,
            "capacity": capacity,
        })))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct AnnouncementForm {
    pub title: String,
    pub message: String,
    pub category: String,
    pub urgency: String,
    pub audience: String,
    pub tags: String,
    /// `YYYY-MM-DD`, optional
    pub expires_at: String,
}

impl Default for AnnouncementForm {
    fn default() -> Self {
        Self {
            title: String::new(),
            message: String::new(),
            category: "general".to_string(),
            urgency: "normal".to_string(),
            audience: "all".to_string(),
            tags: String::new(),
            expires_at: String::new(),
        }
    }
}

impl AnnouncementForm {
    pub fn to_request(&self) -> Result<ApiRequest, FormError> {
        let title = required(&self.title, "Title")?;
        let message = required(&self.message, "Message")?;
        Ok(ApiRequest::post("/api/announcements").json(json!({
            "title": title,
            "message": message,
            "category": self.category,
            "urgency": self.urgency,
            "audience": self.audience,
            "tags": parse_tags(&self.tags),
            "expiresAt": optional(&self.expires_at),
        })))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct AlertForm {
    pub title: String,
    pub message: String,
    pub severity: String,
    pub audience: String,
    pub channels: Vec<String>,
    pub location: String,
}

impl Default for AlertForm {
    fn default() -> Self {
        Self {
            title: String::new(),
            message: String::new(),
            severity: "high".to_string(),
            audience: "all".to_string(),
            channels: vec!["in-app".to_string()],
            location: String::new(),
        }
    }
}

impl AlertForm {
    pub fn to_request(&self) -> Result<ApiRequest, FormError> {
        let title = required(&self.title, "Title")?;
        let message = required(&self.message, "Message")?;
        if self.channels.is_empty() {
            return Err(FormError::NoChannels);
        }
        Ok(ApiRequest::post("/api/emergency-alerts").json(json!({
            "title": title,
            "message": message,
            "severity": self.severity,
            "audience": self.audience,
            "channels": self.channels,
            "metadata": { "location": optional(&self.location) },
        })))
    }

    /// Toggle a delivery channel on or off
    pub fn toggle_channel(&mut self, channel: &str) {
        if let Some(pos) = self.channels.iter().position(|c| c == channel) {
            self.channels.remove(pos);
        } else {
            self.channels.push(channel.to_string());
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct DiscussionForm {
    pub title: String,
    pub description: String,
    pub topic_tag: String,
}

impl DiscussionForm {
    pub fn to_request(&self) -> Result<ApiRequest, FormError> {
        let title = required(&self.title, "Title")?;
        let topic_tag = required(&self.topic_tag, "Topic")?;
        Ok(ApiRequest::post("/api/discussions").json(json!({
            "title": title,
            "description": self.description.trim(),
            "topicTag": topic_tag.trim_start_matches('#'),
        })))
    }
}

/// Note upload fields; the file itself travels separately as multipart
#[derive(Debug, Clone, PartialEq, Default)]
pub struct NoteUploadForm {
    pub title: String,
    pub subject: String,
    pub description: String,
}

impl NoteUploadForm {
    /// Validate text fields and the chosen file's size
    pub fn validate(&self, file_size: Option<f64>) -> Result<Vec<(String, String)>, FormError> {
        let title = required(&self.title, "Title")?;
        let subject = required(&self.subject, "Subject")?;
        let size = file_size.ok_or(FormError::Required("File"))?;
        if size > MAX_NOTE_BYTES {
            return Err(FormError::FileTooLarge);
        }
        Ok(vec![
            ("title".to_string(), title),
            ("subject".to_string(), subject),
            ("description".to_string(), self.description.trim().to_string()),
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::Method;

    fn filled(kind: ReportKind) -> ReportForm {
        ReportForm {
            kind,
            title: "Black wallet".to_string(),
            description: "Leather, has student card".to_string(),
            location: "Cafeteria".to_string(),
            contact: "ana@campus.edu".to_string(),
            date: "2024-04-11".to_string(),
            image_url: String::new(),
        }
    }

    #[test]
    fn test_lost_report_posts_with_date_lost() {
        let req = filled(ReportKind::Lost).to_request().unwrap();
        assert_eq!(req.method, Method::Post);
        assert_eq!(req.path, "/api/lost-items/report");
        let body = req.json_body().unwrap();
        assert_eq!(body["dateLost"], "2024-04-11");
        assert!(body.get("dateFound").is_none());
    }

    #[test]
    fn test_found_report_posts_with_date_found() {
        let mut form = filled(ReportKind::Found);
        form.image_url = "https://img.campus.edu/wallet.jpg".to_string();
        let req = form.to_request().unwrap();
        assert_eq!(req.path, "/api/found-items/report");
        let body = req.json_body().unwrap();
        assert_eq!(body["dateFound"], "2024-04-11");
        assert_eq!(body["image"], "https://img.campus.edu/wallet.jpg");
    }

    #[test]
    fn test_found_report_rejects_non_url_image() {
        let mut form = filled(ReportKind::Found);
        form.image_url = "wallet.jpg".to_string();
        assert_eq!(form.to_request().unwrap_err(), FormError::InvalidImageUrl);

        form.image_url = "ftp://files.campus.edu/w.jpg".to_string();
        assert_eq!(form.to_request().unwrap_err(), FormError::InvalidImageUrl);
    }

    #[test]
    fn test_lost_report_ignores_image_field() {
        let mut form = filled(ReportKind::Lost);
        form.image_url = "not a url".to_string();
        let req = form.to_request().unwrap();
        assert!(req.json_body().unwrap().get("image").is_none());
    }

    #[test]
    fn test_report_requires_fields() {
        let mut form = filled(ReportKind::Lost);
        form.location = "   ".to_string();
        assert_eq!(form.to_request().unwrap_err(), FormError::Required("Location"));
    }

    #[test]
    fn test_sign_in_routes_by_role() {
        let form = SignInForm {
            role: PortalRole::Admin,
            email: "dean@campus.edu".to_string(),
            password: "secret".to_string(),
        };
        assert_eq!(form.to_request().unwrap().path, "/api/auth/admin/signin");

        let bad = SignInForm { email: "dean".to_string(), ..form };
        assert_eq!(bad.to_request().unwrap_err(), FormError::InvalidEmail);
    }

    #[test]
    fn test_sign_up_checks_passwords() {
        let mut form = SignUpForm {
            name: "Ana".to_string(),
            email: "ana@campus.edu".to_string(),
            password: "short".to_string(),
            confirm_password: "short".to_string(),
            ..Default::default()
        };
        assert_eq!(form.to_request().unwrap_err(), FormError::PasswordTooShort);

        form.password = "longenough".to_string();
        form.confirm_password = "different1".to_string();
        assert_eq!(form.to_request().unwrap_err(), FormError::PasswordMismatch);

        form.confirm_password = "longenough".to_string();
        form.year = "2".to_string();
        let req = form.to_request().unwrap();
        assert_eq!(req.path, "/api/auth/user/signup");
        assert_eq!(req.json_body().unwrap()["year"], "2");
    }

    #[test]
    fn test_event_form_combines_date_and_time() {
        let form = EventForm {
            title: "Career Fair".to_string(),
            venue: "Main Hall".to_string(),
            date: "2024-05-01".to_string(),
            time: "10:30".to_string(),
            capacity: "200".to_string(),
            ..Default::default()
        };
        let req = form.to_request().unwrap();
        let body = req.json_body().unwrap();
        assert_eq!(body["date"], "2024-05-01T10:30");
        assert_eq!(body["capacity"], 200);

        let zero = EventForm { capacity: "0".to_string(), ..form };
        assert_eq!(zero.to_request().unwrap_err(), FormError::InvalidCapacity);
    }

    #[test]
    fn test_parse_tags_dedupes() {
        assert_eq!(parse_tags(" exams, Library ,exams,, library"), vec!["exams", "Library"]);
    }

    #[test]
    fn test_alert_channels() {
        let mut form = AlertForm {
            title: "Fire drill".to_string(),
            message: "Evacuate block B".to_string(),
            ..Default::default()
        };
        form.toggle_channel("in-app");
        assert_eq!(form.to_request().unwrap_err(), FormError::NoChannels);

        form.toggle_channel("email");
        let req = form.to_request().unwrap();
        assert_eq!(req.json_body().unwrap()["channels"], serde_json::json!(["email"]));
    }

    #[test]
    fn test_discussion_topic_strips_hash() {
        let form = DiscussionForm {
            title: "Exam prep".to_string(),
            description: String::new(),
            topic_tag: "#calculus".to_string(),
        };
        assert_eq!(form.to_request().unwrap().json_body().unwrap()["topicTag"], "calculus");
    }

    #[test]
    fn test_note_upload_validation() {
        let form = NoteUploadForm {
            title: "Week 3".to_string(),
            subject: "Physics".to_string(),
            description: String::new(),
        };
        assert_eq!(form.validate(None).unwrap_err(), FormError::Required("File"));
        assert_eq!(form.validate(Some(MAX_NOTE_BYTES + 1.0)).unwrap_err(), FormError::FileTooLarge);
        assert_eq!(form.validate(Some(1024.0)).unwrap().len(), 3);
    }

    #[test]
    fn test_email_shape() {
        assert!(is_valid_email("a@b.co"));
        assert!(!is_valid_email("a@b"));
        assert!(!is_valid_email("@b.co"));
        assert!(!is_valid_email("a b@c.co"));
    }

    #[test]
    fn test_form_error_becomes_validation() {
        let err: ApiError = FormError::NoChannels.into();
        assert_eq!(err, ApiError::Validation("Select at least one delivery channel".to_string()));
    }

    #[test]
    fn test_profile_prefill_round_trip() {
        let profile = UserProfile {
            name: "Dana Lee".to_string(),
            department: Some("Physics".to_string()),
            ..Default::default()
        };
        let form = ProfileForm::from_profile(&profile);
        assert_eq!(form.year, "");
        let body = form.to_request().unwrap();
        assert_eq!(body.json_body().unwrap()["department"], "Physics");
        assert!(body.json_body().unwrap()["phone"].is_null());
    }
}
