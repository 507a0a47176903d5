use crate::gesture::HoldGesture;
use crate::playback::PlaybackParams;

/// State owned by one rendered clip card.
#[derive(Clone, Debug, Default)]
pub struct CardState {
    /// Tap-versus-hold recognizer for this card.
    pub gesture: HoldGesture,
    /// Speed/pitch applied when this card starts playback.
    pub params: PlaybackParams,
    /// Title override edited in the expanded panel. Session-only: it is
    /// never persisted and reverts whenever the listing is reloaded.
    pub session_title: Option<String>,
}

impl CardState {
    /// Title to display, preferring a session edit over the server title.
    pub fn display_title<'a>(&'a self, server_title: &'a str) -> &'a str {
        self.session_title
            .as_deref()
            .filter(|title| !title.trim().is_empty())
            .unwrap_or(server_title)
    }
}
