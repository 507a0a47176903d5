//! Wire types for the clip API.
//!
//! Listing endpoints return a paginated `{content: [...]}` envelope. Entries
//! are validated here; anything missing an id or title is dropped with a
//! warning rather than propagated into the UI.

use serde::Deserialize;

use super::error::ApiError;

/// Which listing endpoint a fetch is bound to.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SortMode {
    /// Most recently uploaded first (`/clips`).
    #[default]
    Recent,
    /// Most played first (`/clips/popular`).
    Popular,
}

impl SortMode {
    /// Short label for UI toggles.
    pub fn label(self) -> &'static str {
        match self {
            Self::Recent => "Recent",
            Self::Popular => "Popular",
        }
    }
}

/// Pagination window for listing requests.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Pagination {
    pub page: u32,
    pub size: u32,
}

impl Default for Pagination {
    fn default() -> Self {
        Self { page: 0, size: 20 }
    }
}

/// A validated clip as the rest of the app sees it.
#[derive(Clone, Debug, PartialEq)]
pub struct Clip {
    pub id: u64,
    pub title: String,
    pub description: Option<String>,
    pub uploaded_by: Option<String>,
    pub thumbnail_url: Option<String>,
    /// Static location of the processed audio. Playback never uses this
    /// directly; streams go through the stream endpoint so the server can
    /// record plays.
    pub audio_url: Option<String>,
    pub upload_date: Option<String>,
    pub file_size_bytes: Option<u64>,
    pub play_count: Option<u64>,
    pub is_processed: bool,
}

impl Clip {
    /// A clip is playable only once server-side processing has finished.
    pub fn is_playable(&self) -> bool {
        self.is_processed
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ClipWire {
    id: Option<u64>,
    title: Option<String>,
    description: Option<String>,
    uploaded_by: Option<String>,
    thumbnail_url: Option<String>,
    audio_url: Option<String>,
    upload_date: Option<String>,
    file_size_bytes: Option<u64>,
    play_count: Option<u64>,
    #[serde(default)]
    is_processed: Option<bool>,
}

impl ClipWire {
    fn validate(self) -> Option<Clip> {
        let id = self.id?;
        let title = self.title.filter(|t| !t.trim().is_empty())?;
        Some(Clip {
            id,
            title,
            description: self.description,
            uploaded_by: self.uploaded_by,
            thumbnail_url: self.thumbnail_url,
            audio_url: self.audio_url,
            upload_date: self.upload_date,
            file_size_bytes: self.file_size_bytes,
            play_count: self.play_count,
            is_processed: self.is_processed.unwrap_or(false),
        })
    }
}

#[derive(Debug, Deserialize)]
struct PageWire {
    #[serde(default)]
    content: Vec<serde_json::Value>,
}

/// Parse a listing response body into validated clips.
///
/// Malformed entries are quarantined: logged and skipped, never surfaced.
pub(crate) fn parse_clip_page(body: &str) -> Result<Vec<Clip>, ApiError> {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        return Err(ApiError::Decode("Empty response body".to_string()));
    }
    let page: PageWire = serde_json::from_str(trimmed)
        .map_err(|err| ApiError::Decode(format!("{err}")))?;

    let mut clips = Vec::with_capacity(page.content.len());
    for entry in page.content {
        match serde_json::from_value::<ClipWire>(entry).map(ClipWire::validate) {
            Ok(Some(clip)) => clips.push(clip),
            Ok(None) => tracing::warn!("Dropping clip entry without id/title"),
            Err(err) => tracing::warn!("Dropping malformed clip entry: {err}"),
        }
    }
    Ok(clips)
}

/// Parse a single-clip response body.
pub(crate) fn parse_single_clip(body: &str) -> Result<Clip, ApiError> {
    let wire: ClipWire = serde_json::from_str(body.trim())
        .map_err(|err| ApiError::Decode(format!("{err}")))?;
    wire.validate()
        .ok_or_else(|| ApiError::Decode("Clip entry without id/title".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_envelope_with_camel_case_fields() {
        let body = r#"{
            "content": [
                {"id": 1, "title": "Yodel", "uploadedBy": "sam", "isProcessed": true,
                 "audioUrl": "/files/1.mp3", "playCount": 4, "fileSizeBytes": 1024}
            ],
            "totalElements": 1
        }"#;
        let clips = parse_clip_page(body).unwrap();
        assert_eq!(clips.len(), 1);
        let clip = &clips[0];
        assert_eq!(clip.id, 1);
        assert_eq!(clip.uploaded_by.as_deref(), Some("sam"));
        assert!(clip.is_playable());
        assert_eq!(clip.play_count, Some(4));
    }

    #[test]
    fn quarantines_entries_missing_id_or_title() {
        let body = r#"{"content": [
            {"title": "no id"},
            {"id": 2, "title": "  "},
            {"id": 3, "title": "ok"},
            "not even an object"
        ]}"#;
        let clips = parse_clip_page(body).unwrap();
        assert_eq!(clips.len(), 1);
        assert_eq!(clips[0].id, 3);
    }

    #[test]
    fn missing_processed_flag_means_not_playable() {
        let body = r#"{"content": [{"id": 5, "title": "raw"}]}"#;
        let clips = parse_clip_page(body).unwrap();
        assert!(!clips[0].is_playable());
    }

    #[test]
    fn missing_content_field_yields_empty_list() {
        let clips = parse_clip_page(r#"{"totalElements": 0}"#).unwrap();
        assert!(clips.is_empty());
    }

    #[test]
    fn empty_body_is_a_decode_error() {
        let err = parse_clip_page("  ").unwrap_err();
        assert!(matches!(err, ApiError::Decode(_)));
    }

    #[test]
    fn single_clip_parses_or_rejects_on_validation() {
        let clip = parse_single_clip(r#"{"id": 9, "title": "Bell", "isProcessed": true}"#).unwrap();
        assert_eq!(clip.id, 9);
        let err = parse_single_clip(r#"{"title": "no id"}"#).unwrap_err();
        assert!(matches!(err, ApiError::Decode(_)));
    }
}
