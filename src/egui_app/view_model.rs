//! Helpers to convert domain data into egui-facing view structs.

use crate::api::Clip;
use crate::egui_app::state::CardState;
use crate::gesture::GesturePhase;

/// Everything the grid needs to paint one clip card.
pub struct ClipCardView {
    pub id: u64,
    pub title: String,
    pub uploader_line: String,
    pub description: String,
    pub size_label: String,
    pub play_count_label: String,
    pub playable: bool,
    pub phase: GesturePhase,
    pub hold_progress: f32,
    pub speed: f32,
    pub pitch: f32,
    pub playing: bool,
}

/// Build the card view for one clip plus its per-card UI state.
pub fn clip_card(clip: &Clip, card: &CardState, playing: bool) -> ClipCardView {
    ClipCardView {
        id: clip.id,
        title: card.display_title(&clip.title).to_string(),
        uploader_line: uploader_line(clip),
        description: clip.description.clone().unwrap_or_default(),
        size_label: clip.file_size_bytes.map(size_label).unwrap_or_default(),
        play_count_label: play_count_label(clip.play_count.unwrap_or(0)),
        playable: clip.is_playable(),
        phase: card.gesture.phase(),
        hold_progress: card.gesture.progress(),
        speed: card.params.speed(),
        pitch: card.params.pitch(),
        playing,
    }
}

fn uploader_line(clip: &Clip) -> String {
    // Matches the uploader default applied on submit.
    let uploader = clip.uploaded_by.as_deref().unwrap_or("anonymous");
    match clip
        .upload_date
        .as_deref()
        .and_then(|stamp| stamp.split('T').next())
        .filter(|date| !date.is_empty())
    {
        Some(date) => format!("{uploader} · {date}"),
        None => uploader.to_string(),
    }
}

/// File size for card captions, e.g. "3.4 MB" or "612 KB".
pub fn size_label(bytes: u64) -> String {
    const MB: f64 = 1024.0 * 1024.0;
    const KB: f64 = 1024.0;
    let bytes = bytes as f64;
    if bytes >= MB {
        format!("{:.1} MB", bytes / MB)
    } else if bytes >= KB {
        format!("{:.0} KB", bytes / KB)
    } else {
        format!("{bytes:.0} B")
    }
}

fn play_count_label(count: u64) -> String {
    match count {
        1 => "1 play".to_string(),
        n => format!("{n} plays"),
    }
}
