use super::*;
use std::time::Instant;

use crate::egui_app::jobs::StreamFetchResult;
use crate::gesture::ReleaseAction;
use crate::playback::PlaybackManager;

/// Shown when a card that the API has not finished processing is tapped.
pub(crate) const NOT_READY_MESSAGE: &str =
    "Audio not available yet. The clip may still be processing.";

/// Per-frame pointer input over one clip card, as read from egui.
#[derive(Clone, Copy, Debug, Default)]
pub struct CardPointer {
    pub pressed: bool,
    pub released: bool,
    pub hovered: bool,
}

impl ClipController {
    /// Feed one frame of pointer input into a card's gesture recognizer.
    /// A completed tap starts playback; leaving the card mid-hold cancels,
    /// even when the release lands on the same frame as the leave.
    pub fn handle_card_pointer(&mut self, id: u64, pointer: CardPointer, now: Instant) {
        let Some(card) = self.ui.cards.get_mut(&id) else {
            return;
        };
        if pointer.pressed {
            card.gesture.press(now);
        }
        card.gesture.sample(now);
        if !pointer.hovered {
            card.gesture.cancel();
        }
        if pointer.released && card.gesture.release(now) == ReleaseAction::Play {
            self.request_play(id);
        }
    }

    /// Collapse every expanded card; wired to clicks outside the grid.
    pub fn collapse_all_cards(&mut self) {
        for card in self.ui.cards.values_mut() {
            card.gesture.collapse();
        }
    }

    /// True while any card shows its expanded speed/pitch panel.
    pub fn any_card_expanded(&self) -> bool {
        self.ui
            .cards
            .values()
            .any(|card| card.gesture.phase() == crate::gesture::GesturePhase::Expanded)
    }

    /// Start (or restart) playback of one clip with its current params.
    /// Tapping the clip that is already playing stops it instead.
    pub fn request_play(&mut self, id: u64) {
        let Some(clip) = self.clip(id) else {
            return;
        };
        if !clip.is_playable() {
            self.set_status(StatusTone::Warning, NOT_READY_MESSAGE);
            return;
        }
        if self.player.is_none() {
            self.set_status(StatusTone::Warning, "No audio output device available");
            return;
        }
        if self.playing_clip() == Some(id) {
            self.stop_playback();
            return;
        }
        let params = self
            .ui
            .cards
            .get(&id)
            .map(|card| card.params)
            .unwrap_or_default();
        let title = clip.title.clone();
        self.set_status(StatusTone::Busy, format!("Fetching \"{title}\""));
        self.jobs.begin_stream_fetch(self.api.clone(), id, params);
    }

    pub fn stop_playback(&mut self) {
        self.jobs.clear_stream_fetch();
        if let Some(player) = self.player.as_mut() {
            player.stop_current();
        }
        self.set_status(StatusTone::Idle, "Stopped");
    }

    /// Clip currently audible, if any.
    pub fn playing_clip(&self) -> Option<u64> {
        self.player
            .as_ref()
            .filter(|player| player.is_playing())
            .and_then(PlaybackManager::current_clip)
    }

    pub(crate) fn apply_stream_fetched(&mut self, result: StreamFetchResult) {
        if !self.jobs.stream_fetch_is_current(result.request_id) {
            return;
        }
        self.jobs.clear_stream_fetch();
        match result.result {
            Ok(bytes) => {
                let Some(player) = self.player.as_mut() else {
                    return;
                };
                match player.play_bytes(result.clip_id, bytes) {
                    Ok(()) => {
                        let title = self
                            .clip(result.clip_id)
                            .map(|clip| clip.title.clone())
                            .unwrap_or_else(|| format!("clip {}", result.clip_id));
                        self.set_status(StatusTone::Info, format!("Playing \"{title}\""));
                    }
                    Err(err) => {
                        tracing::warn!(clip_id = result.clip_id, error = %err, "playback failed");
                        self.set_status(StatusTone::Error, "Could not play this clip");
                    }
                }
            }
            Err(err) => {
                tracing::warn!(clip_id = result.clip_id, error = %err, "stream fetch failed");
                self.set_status(StatusTone::Error, "Could not fetch audio for this clip");
            }
        }
    }

    /// Adjust a card's speed; takes effect on the next play.
    pub fn set_card_speed(&mut self, id: u64, speed: f32) {
        if let Some(card) = self.ui.cards.get_mut(&id) {
            card.params.set_speed(speed);
        }
    }

    /// Adjust a card's pitch; takes effect on the next play.
    pub fn set_card_pitch(&mut self, id: u64, pitch: f32) {
        if let Some(card) = self.ui.cards.get_mut(&id) {
            card.params.set_pitch(pitch);
        }
    }

    /// Rename a clip for this session only; blank input restores the
    /// server title.
    pub fn set_session_title(&mut self, id: u64, title: String) {
        if let Some(card) = self.ui.cards.get_mut(&id) {
            card.session_title = if title.trim().is_empty() {
                None
            } else {
                Some(title)
            };
        }
    }
}
