//! Browser upload page
//!
//! A single self-contained HTML document. Delivery settings are injected as `<meta>`
//! tags so the page can build download URLs without another request.

use crate::state::AppState;
use axum::{extract::State, response::Html};
use std::sync::Arc;
use vidup_core::constants::MAX_UPLOAD_FILE_SIZE;

const PAGE_TEMPLATE: &str = include_str!("../../assets/video_upload.html");

pub async fn upload_page(State(state): State<Arc<AppState>>) -> Html<String> {
    Html(render_page(&state))
}

fn render_page(state: &AppState) -> String {
    let (cloud_name, delivery_base, format) = match &state.media_urls {
        Some(urls) => (
            urls.cloud_name().to_string(),
            urls.delivery_base().to_string(),
            urls.format().to_string(),
        ),
        None => (String::new(), String::new(), state.upload.video_format.clone()),
    };

    PAGE_TEMPLATE
        .replace("{{CLOUD_NAME}}", &escape_attr(&cloud_name))
        .replace("{{DELIVERY_BASE}}", &escape_attr(&delivery_base))
        .replace("{{VIDEO_FORMAT}}", &escape_attr(&format))
        .replace("{{MAX_UPLOAD_BYTES}}", &MAX_UPLOAD_FILE_SIZE.to_string())
}

fn escape_attr(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(c),
        }
    }
    out
}
