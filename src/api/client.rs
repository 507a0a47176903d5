//! HTTP client for the clip API.

use crate::http_client;
use crate::playback::PlaybackParams;

use super::error::{ApiError, map_status};
use super::multipart::MultipartForm;
use super::types::{Clip, Pagination, SortMode, parse_clip_page, parse_single_clip};

const MAX_LISTING_BYTES: usize = 4 * 1024 * 1024;
const MAX_ACTION_BYTES: usize = 256 * 1024;
const MAX_STREAM_BYTES: usize = 64 * 1024 * 1024;

/// A pending upload as handed to the transport client.
#[derive(Clone, Debug)]
pub struct UploadRequest {
    pub file_name: String,
    pub bytes: Vec<u8>,
    pub title: String,
    pub description: String,
    pub uploaded_by: String,
}

/// Request payload shapes; the encoding is chosen here, not by callers.
enum Payload {
    Json(serde_json::Value),
    Form(MultipartForm),
}

/// Client for the remote clip API, addressed by a single base URL.
#[derive(Clone, Debug)]
pub struct ClipApi {
    base_url: String,
}

impl ClipApi {
    /// Create a client for the given base URL (trailing slashes stripped).
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { base_url }
    }

    /// Fetch one page of clips, ordered per the sort mode.
    pub fn list(&self, sort: SortMode, page: Pagination) -> Result<Vec<Clip>, ApiError> {
        let path = match sort {
            SortMode::Recent => "/clips",
            SortMode::Popular => "/clips/popular",
        };
        let request = http_client::agent()
            .get(&format!("{}{}", self.base_url, path))
            .query("page", &page.page.to_string())
            .query("size", &page.size.to_string());
        let body = self.call(request.call())?;
        parse_clip_page(&body)
    }

    /// Fetch a single clip by id.
    pub fn get_clip(&self, id: u64) -> Result<Clip, ApiError> {
        let request = http_client::agent().get(&format!("{}/clips/{}", self.base_url, id));
        let body = self.call(request.call())?;
        parse_single_clip(&body)
    }

    /// Search clips by free-text query.
    pub fn search(&self, query: &str, page: Pagination) -> Result<Vec<Clip>, ApiError> {
        let request = http_client::agent()
            .get(&format!("{}/clips/search", self.base_url))
            .query("q", query)
            .query("page", &page.page.to_string())
            .query("size", &page.size.to_string());
        let body = self.call(request.call())?;
        parse_clip_page(&body)
    }

    /// Upload a new clip as a multipart form.
    pub fn upload(&self, upload: &UploadRequest) -> Result<(), ApiError> {
        let mut form = MultipartForm::new();
        form.file("file", &upload.file_name, &upload.bytes);
        form.text("title", &upload.title);
        form.text("description", &upload.description);
        form.text("uploadedBy", &upload.uploaded_by);

        let request = http_client::agent().post(&format!("{}/clips/upload", self.base_url));
        self.call(send_payload(request, Payload::Form(form)))?;
        Ok(())
    }

    /// Delete a clip, presenting the shared password for authorization.
    pub fn delete_clip(&self, id: u64, password: &str) -> Result<(), ApiError> {
        let request = http_client::agent().delete(&format!("{}/clips/{}", self.base_url, id));
        let payload = Payload::Json(serde_json::json!({ "password": password }));
        self.call(send_payload(request, payload))?;
        Ok(())
    }

    /// Build the stream URL for a clip with the given playback parameters.
    ///
    /// Playback always goes through this endpoint, never the static audio
    /// URL; the server records play counts here even when both parameters
    /// are 1.0 and the file is passed through untouched.
    pub fn stream_url(&self, id: u64, params: PlaybackParams) -> String {
        format!(
            "{}/stream/{}?speed={}&pitch={}",
            self.base_url,
            id,
            params.speed(),
            params.pitch()
        )
    }

    /// Fetch the stream body for a clip into memory.
    pub fn fetch_stream(&self, id: u64, params: PlaybackParams) -> Result<Vec<u8>, ApiError> {
        let url = self.stream_url(id, params);
        let response = match http_client::agent().get(&url).call() {
            Ok(response) => response,
            Err(err) => return Err(convert_error(err)),
        };
        http_client::read_response_bytes(response, MAX_STREAM_BYTES)
            .map_err(|err| ApiError::Decode(err.to_string()))
    }

    /// Resolve a ureq result into a bounded response body.
    fn call(&self, result: Result<ureq::Response, ureq::Error>) -> Result<String, ApiError> {
        let response = result.map_err(convert_error)?;
        let bytes = http_client::read_response_bytes(response, MAX_LISTING_BYTES)
            .map_err(|err| ApiError::Decode(err.to_string()))?;
        String::from_utf8(bytes).map_err(|err| ApiError::Decode(err.to_string()))
    }
}

fn send_payload(
    request: ureq::Request,
    payload: Payload,
) -> Result<ureq::Response, ureq::Error> {
    match payload {
        Payload::Json(value) => request
            .set("Content-Type", "application/json")
            .send_json(value),
        Payload::Form(form) => {
            let content_type = form.content_type();
            request
                .set("Content-Type", &content_type)
                .send_bytes(&form.finish())
        }
    }
}

fn convert_error(err: ureq::Error) -> ApiError {
    match err {
        ureq::Error::Status(code, response) => {
            let body = http_client::read_response_bytes(response, MAX_ACTION_BYTES)
                .ok()
                .and_then(|bytes| String::from_utf8(bytes).ok())
                .unwrap_or_default();
            map_status(code, body)
        }
        ureq::Error::Transport(err) => ApiError::Transport(err.to_string()),
    }
}
