use crate::api::{Clip, ClipApi};
use crate::config::{self, AppConfig};
use crate::egui_app::jobs::{ControllerJobs, JobMessage};
use crate::egui_app::state::*;
use crate::playback::PlaybackManager;

mod clips;
mod delete;
mod playback;
mod upload;

pub use playback::CardPointer;

/// Maintains app state and bridges the clip API to the egui UI.
pub struct ClipController {
    pub ui: UiState,
    api: ClipApi,
    clips: Vec<Clip>,
    player: Option<PlaybackManager>,
    jobs: ControllerJobs,
}

impl ClipController {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            api: ClipApi::new(config::resolve_base_url(config)),
            ui: UiState::default(),
            clips: Vec::new(),
            player: None,
            jobs: ControllerJobs::new(),
        }
    }

    /// Attach the audio output; without one, playback requests are refused
    /// with a status message instead of panicking on headless machines.
    pub fn attach_player(&mut self, player: PlaybackManager) {
        self.player = Some(player);
    }

    pub fn clips(&self) -> &[Clip] {
        &self.clips
    }

    pub(crate) fn clip(&self, id: u64) -> Option<&Clip> {
        self.clips.iter().find(|clip| clip.id == id)
    }

    /// Drain finished background work. Called once per frame before
    /// rendering so results land at a predictable point.
    pub fn poll_background_jobs(&mut self) {
        while let Ok(message) = self.jobs.try_recv_message() {
            match message {
                JobMessage::ClipsLoaded(result) => self.apply_clips_loaded(result),
                JobMessage::DeleteFinished(result) => self.apply_delete_finished(result),
                JobMessage::UploadFinished(result) => self.apply_upload_finished(result),
                JobMessage::StreamFetched(result) => self.apply_stream_fetched(result),
            }
        }
    }

    fn set_status(&mut self, tone: StatusTone, text: impl Into<String>) {
        self.ui.status.set(text, tone);
    }
}

#[cfg(test)]
mod tests;
