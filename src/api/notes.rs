//! Notes Calls
//!
//! Uploads go out as multipart form data; downloads come back as blobs.

use super::{encode, send, send_blob, send_empty, ApiError, ApiRequest, ApiResult, FormField};
use crate::config;
use crate::forms::NoteUploadForm;
use crate::models::Note;

pub fn list_request(search: &str, subject: &str) -> ApiRequest {
    ApiRequest::get("/api/notes")
        .query("search", search)
        .query("subject", subject)
}

pub async fn list_notes(search: &str, subject: &str, signal: Option<&web_sys::AbortSignal>) -> ApiResult<Vec<Note>> {
    send(&list_request(search, subject), signal).await
}

pub async fn upload_note(form: &NoteUploadForm, file: Option<web_sys::File>) -> ApiResult<Note> {
    let fields = form.validate(file.as_ref().map(|f| f.size()))?;
    let file = file.ok_or_else(|| ApiError::Validation("File is required".to_string()))?;

    let mut parts: Vec<(String, FormField)> = fields
        .into_iter()
        .map(|(name, value)| (name, FormField::Text(value)))
        .collect();
    parts.push(("file".to_string(), FormField::File(file)));

    send(&ApiRequest::post("/api/notes").multipart(parts), None).await
}

pub fn preview_url(id: &str) -> String {
    config::get().url(&format!("/api/notes/{}/preview", encode(id)))
}

/// Fetch the file and hand it to the browser as a download
pub async fn download_note(note: &Note) -> ApiResult<()> {
    let request = ApiRequest::get(format!("/api/notes/{}/download", encode(&note.id)));
    let blob = send_blob(&request).await?;
    let filename = if note.file.name.is_empty() { note.title.clone() } else { note.file.name.clone() };
    crate::browser::save_blob(&blob, &filename).map_err(ApiError::Browser)
}

pub async fn delete_note(id: &str) -> ApiResult<()> {
    send_empty(&ApiRequest::delete(format!("/api/notes/{}", encode(id))), None).await
}
