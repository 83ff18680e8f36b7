//! Response rendering
//!
//! HTML for listings and error pages, and the attachment response for
//! downloads.

use axum::body::Body;
use axum::http::header::{CONTENT_DISPOSITION, CONTENT_LENGTH, CONTENT_TYPE};
use axum::http::{HeaderValue, StatusCode};
use axum::response::{Html, IntoResponse, Response};
use tokio_util::io::ReaderStream;
use url::form_urlencoded;

use crate::error::{ServerError, error_to_status, handle_error};
use crate::storage::{DirectoryListing, FileHandle, OCTET_STREAM};

const PAGE_STYLE: &str = r#"
        body { font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', sans-serif; margin: 2rem; color: #1f2328; }
        h1 { font-size: 1.4rem; word-break: break-all; }
        ul { list-style: none; padding: 0; }
        li { padding: 0.2rem 0; }
        a { color: #0969da; text-decoration: none; }
        a:hover { text-decoration: underline; }
        .error-code { font-size: 3rem; margin: 0; }
        .error-message { color: #57606a; }
"#;

fn page(title: &str, body: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{title}</title>
    <style>{style}</style>
</head>
<body>
{body}
</body>
</html>
"#,
        title = title,
        style = PAGE_STYLE,
        body = body
    )
}

/// Escape text for use in HTML content and attribute values.
pub fn escape_html(input: &str) -> String {
    let mut escaped = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

fn encode_query_value(value: &str) -> String {
    form_urlencoded::byte_serialize(value.as_bytes()).collect()
}

fn list_href(virtual_path: &str) -> String {
    format!("/?path={}", encode_query_value(virtual_path))
}

fn download_href(virtual_path: &str) -> String {
    format!("/download?path={}", encode_query_value(virtual_path))
}

/// Render a directory listing page.
pub fn render_listing(listing: &DirectoryListing) -> String {
    let current = listing.path.to_string();
    let mut items = String::new();

    if let Some(parent) = listing.path.parent() {
        items.push_str(&format!(
            "        <li><a href=\"{}\">../</a></li>\n",
            escape_html(&list_href(&parent.to_string()))
        ));
    }

    for entry in &listing.entries {
        let target = listing.path.child(entry);
        let href = if entry.ends_with('/') {
            list_href(&target)
        } else {
            download_href(&target)
        };
        items.push_str(&format!(
            "        <li><a href=\"{}\">{}</a></li>\n",
            escape_html(&href),
            escape_html(entry)
        ));
    }

    let body = format!(
        "    <h1>Index of {current}</h1>\n    <ul>\n{items}    </ul>",
        current = escape_html(&current),
        items = items
    );
    page(&format!("Index of {}", escape_html(&current)), &body)
}

/// Render an error page with status and message.
pub fn render_error_page(status: StatusCode, message: &str) -> String {
    let code = status.as_u16().to_string();
    let title = status.canonical_reason().unwrap_or("Error");
    let body = format!(
        "    <h1 class=\"error-code\">{code}</h1>\n    <h2>{title}</h2>\n    <p class=\"error-message\">{message}</p>\n    <p><a href=\"/\">Back to /</a></p>",
        code = code,
        title = title,
        message = escape_html(message)
    );
    page(&format!("{code} - {title}"), &body)
}

/// `Content-Disposition` value forcing a download under the original name.
///
/// The quoted `filename` is an ASCII fallback; `filename*` carries the exact
/// UTF-8 name.
pub fn content_disposition(name: &str) -> HeaderValue {
    let fallback: String = name
        .chars()
        .map(|c| {
            if c.is_ascii() && !c.is_ascii_control() && c != '"' && c != '\\' {
                c
            } else {
                '_'
            }
        })
        .collect();
    let encoded = encode_query_value(name).replace('+', "%20");

    HeaderValue::from_str(&format!(
        "attachment; filename=\"{fallback}\"; filename*=UTF-8''{encoded}"
    ))
    .unwrap_or_else(|_| HeaderValue::from_static("attachment"))
}

/// Stream an opened file as an attachment.
pub fn file_attachment(handle: FileHandle) -> Response {
    let FileHandle {
        file,
        name,
        content_type,
        length,
    } = handle;

    let stream = ReaderStream::new(tokio::fs::File::from_std(file));
    let mut response = Body::from_stream(stream).into_response();

    let headers = response.headers_mut();
    headers.insert(
        CONTENT_TYPE,
        HeaderValue::from_str(&content_type)
            .unwrap_or_else(|_| HeaderValue::from_static(OCTET_STREAM)),
    );
    headers.insert(CONTENT_LENGTH, HeaderValue::from(length));
    headers.insert(CONTENT_DISPOSITION, content_disposition(&name));

    response
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        handle_error(&self);
        let status = error_to_status(&self);
        (status, Html(render_error_page(status, &self.to_string()))).into_response()
    }
}
