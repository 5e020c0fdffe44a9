//! Browser Helpers
//!
//! Small DOM utilities shared by pages.

use wasm_bindgen::JsCast;

use crate::api::describe_js;

/// Hand a blob to the browser as a file download
pub fn save_blob(blob: &web_sys::Blob, filename: &str) -> Result<(), String> {
    let window = web_sys::window().ok_or("window unavailable")?;
    let document = window.document().ok_or("document unavailable")?;
    let url = web_sys::Url::create_object_url_with_blob(blob).map_err(|e| describe_js(&e))?;

    let anchor = document
        .create_element("a")
        .map_err(|e| describe_js(&e))?
        .dyn_into::<web_sys::HtmlAnchorElement>()
        .map_err(|_| "not an anchor".to_string())?;
    anchor.set_href(&url);
    anchor.set_download(filename);
    anchor.click();

    let _ = web_sys::Url::revoke_object_url(&url);
    Ok(())
}

/// Open a URL in a new tab
pub fn open_in_new_tab(url: &str) {
    if let Some(window) = web_sys::window() {
        if window.open_with_url_and_target(url, "_blank").is_err() {
            tracing::warn!("[browser] popup blocked for {}", url);
        }
    }
}

/// Scroll metrics of an element: (scroll_top, client_height, scroll_height)
pub fn scroll_metrics(element: &web_sys::Element) -> (f64, f64, f64) {
    (
        element.scroll_top() as f64,
        element.client_height() as f64,
        element.scroll_height() as f64,
    )
}

pub fn scroll_to_bottom(element: &web_sys::Element) {
    element.set_scroll_top(element.scroll_height());
}

/// Value of the input/textarea/select that fired the event
pub fn input_value(ev: &web_sys::Event) -> String {
    let Some(target) = ev.target() else { return String::new() };
    if let Some(input) = target.dyn_ref::<web_sys::HtmlInputElement>() {
        return input.value();
    }
    if let Some(area) = target.dyn_ref::<web_sys::HtmlTextAreaElement>() {
        return area.value();
    }
    if let Some(select) = target.dyn_ref::<web_sys::HtmlSelectElement>() {
        return select.value();
    }
    String::new()
}

/// First file chosen in a file input
pub fn selected_file(ev: &web_sys::Event) -> Option<web_sys::File> {
    ev.target()?
        .dyn_ref::<web_sys::HtmlInputElement>()?
        .files()?
        .get(0)
}

/// Human-readable byte size
pub fn format_size(size: u64) -> String {
    if size < 1024 {
        format!("{} B", size)
    } else if size < 1024 * 1024 {
        format!("{:.1} KB", size as f64 / 1024.0)
    } else {
        format!("{:.1} MB", size as f64 / (1024.0 * 1024.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_size() {
        assert_eq!(format_size(512), "512 B");
        assert_eq!(format_size(2048), "2.0 KB");
        assert_eq!(format_size(5 * 1024 * 1024 + 512 * 1024), "5.5 MB");
    }
}
