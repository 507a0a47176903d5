//! Minimal `multipart/form-data` encoding for uploads.
//!
//! The shared HTTP agent has no multipart support, so the upload body is
//! assembled here: text fields plus a single file part, separated by a
//! per-form boundary.

use std::{
    path::Path,
    sync::atomic::{AtomicU64, Ordering},
    time::{SystemTime, UNIX_EPOCH},
};

static FORM_COUNTER: AtomicU64 = AtomicU64::new(0);

/// An in-memory multipart form.
pub(crate) struct MultipartForm {
    boundary: String,
    body: Vec<u8>,
}

impl MultipartForm {
    pub(crate) fn new() -> Self {
        Self {
            boundary: fresh_boundary(),
            body: Vec::new(),
        }
    }

    /// Append a plain text field.
    pub(crate) fn text(&mut self, name: &str, value: &str) {
        self.body
            .extend_from_slice(format!("--{}\r\n", self.boundary).as_bytes());
        self.body.extend_from_slice(
            format!("Content-Disposition: form-data; name=\"{name}\"\r\n\r\n").as_bytes(),
        );
        self.body.extend_from_slice(value.as_bytes());
        self.body.extend_from_slice(b"\r\n");
    }

    /// Append a file field with a content type guessed from the filename.
    pub(crate) fn file(&mut self, name: &str, filename: &str, bytes: &[u8]) {
        let content_type = guess_content_type(filename);
        self.body
            .extend_from_slice(format!("--{}\r\n", self.boundary).as_bytes());
        self.body.extend_from_slice(
            format!(
                "Content-Disposition: form-data; name=\"{name}\"; filename=\"{filename}\"\r\n"
            )
            .as_bytes(),
        );
        self.body
            .extend_from_slice(format!("Content-Type: {content_type}\r\n\r\n").as_bytes());
        self.body.extend_from_slice(bytes);
        self.body.extend_from_slice(b"\r\n");
    }

    /// Value for the request's `Content-Type` header.
    pub(crate) fn content_type(&self) -> String {
        format!("multipart/form-data; boundary={}", self.boundary)
    }

    /// Finish the form and return the encoded body.
    pub(crate) fn finish(mut self) -> Vec<u8> {
        self.body
            .extend_from_slice(format!("--{}--\r\n", self.boundary).as_bytes());
        self.body
    }
}

fn fresh_boundary() -> String {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos())
        .unwrap_or(0);
    let counter = FORM_COUNTER.fetch_add(1, Ordering::Relaxed);
    format!("----clipdeck-{nanos:x}-{counter:x}")
}

fn guess_content_type(filename: &str) -> &'static str {
    let extension = Path::new(filename)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_ascii_lowercase());
    match extension.as_deref() {
        Some("mp3") => "audio/mpeg",
        Some("wav") => "audio/wav",
        Some("ogg") => "audio/ogg",
        Some("flac") => "audio/flac",
        Some("m4a") => "audio/mp4",
        Some("mp4") => "video/mp4",
        Some("webm") => "video/webm",
        Some("mov") => "video/quicktime",
        _ => "application/octet-stream",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encodes_text_and_file_parts_within_one_boundary() {
        let mut form = MultipartForm::new();
        form.text("title", "My clip");
        form.file("file", "laugh.mp3", b"ID3data");
        let boundary = form
            .content_type()
            .strip_prefix("multipart/form-data; boundary=")
            .unwrap()
            .to_string();
        let body = String::from_utf8(form.finish()).unwrap();

        assert!(body.contains(&format!("--{boundary}\r\n")));
        assert!(body.contains("Content-Disposition: form-data; name=\"title\"\r\n\r\nMy clip\r\n"));
        assert!(body.contains(
            "Content-Disposition: form-data; name=\"file\"; filename=\"laugh.mp3\"\r\n"
        ));
        assert!(body.contains("Content-Type: audio/mpeg\r\n\r\nID3data\r\n"));
        assert!(body.ends_with(&format!("--{boundary}--\r\n")));
    }

    #[test]
    fn boundaries_are_unique_per_form() {
        let first = MultipartForm::new().content_type();
        let second = MultipartForm::new().content_type();
        assert_ne!(first, second);
    }

    #[test]
    fn unknown_extensions_fall_back_to_octet_stream() {
        assert_eq!(guess_content_type("clip.xyz"), "application/octet-stream");
        assert_eq!(guess_content_type("noextension"), "application/octet-stream");
        assert_eq!(guess_content_type("CLIP.WAV"), "audio/wav");
    }
}
