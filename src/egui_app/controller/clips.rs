use super::*;
use crate::api::SortMode;
use crate::egui_app::jobs::ClipsLoadResult;

/// Shown whenever a listing or search fetch fails.
pub(crate) const LOAD_FAILED_MESSAGE: &str =
    "Failed to load clips. Make sure the API is running.";

impl ClipController {
    /// Kick off the first listing fetch after startup.
    pub fn request_initial_load(&mut self) {
        self.reload_clips();
    }

    /// Re-fetch the current listing or search.
    pub fn reload_clips(&mut self) {
        self.ui.list.phase = ListPhase::Loading;
        self.ui.list.error = None;
        self.set_status(StatusTone::Busy, "Loading clips");
        let query = self.ui.list.active_query.clone();
        self.jobs
            .begin_list_load(self.api.clone(), self.ui.list.sort, query);
    }

    /// Switch sort order; a no-op when already active, so repeated clicks
    /// do not queue duplicate fetches.
    pub fn set_sort(&mut self, sort: SortMode) {
        if self.ui.list.sort == sort {
            return;
        }
        self.ui.list.sort = sort;
        self.ui.list.active_query = None;
        self.ui.list.search_input.clear();
        self.reload_clips();
    }

    /// Run the search box contents; a blank query returns to the listing.
    pub fn submit_search(&mut self) {
        let query = self.ui.list.search_input.trim().to_string();
        self.ui.list.active_query = if query.is_empty() { None } else { Some(query) };
        self.reload_clips();
    }

    pub fn clear_search(&mut self) {
        self.ui.list.search_input.clear();
        if self.ui.list.active_query.take().is_some() {
            self.reload_clips();
        }
    }

    pub(crate) fn apply_clips_loaded(&mut self, result: ClipsLoadResult) {
        if result.generation != self.jobs.current_list_generation() {
            return;
        }
        match result.result {
            Ok(clips) => {
                self.ui.list.error = None;
                self.ui.list.phase = if clips.is_empty() {
                    ListPhase::Empty
                } else {
                    ListPhase::Populated
                };
                self.replace_clips(clips);
                let label = match &self.ui.list.active_query {
                    Some(query) => format!("{} result(s) for \"{query}\"", self.clips.len()),
                    None => format!("{} clip(s) loaded", self.clips.len()),
                };
                self.set_status(StatusTone::Idle, label);
            }
            Err(err) => {
                tracing::warn!(error = %err, "clip listing failed");
                self.clips.clear();
                self.ui.cards.clear();
                self.ui.list.phase = ListPhase::Error;
                self.ui.list.error = Some(LOAD_FAILED_MESSAGE.to_string());
                self.set_status(StatusTone::Error, LOAD_FAILED_MESSAGE);
            }
        }
    }

    /// Drop one clip and its card state, reclassifying an emptied grid.
    pub(super) fn remove_clip(&mut self, id: u64) {
        self.clips.retain(|clip| clip.id != id);
        self.ui.cards.remove(&id);
        if self.clips.is_empty() && self.ui.list.phase == ListPhase::Populated {
            self.ui.list.phase = ListPhase::Empty;
        }
    }

    /// Swap in a fresh collection, keeping per-card state (session title
    /// edits, playback params) for clips that are still present.
    fn replace_clips(&mut self, clips: Vec<Clip>) {
        self.ui
            .cards
            .retain(|id, _| clips.iter().any(|clip| clip.id == *id));
        for clip in &clips {
            self.ui.cards.entry(clip.id).or_default();
        }
        self.clips = clips;
    }
}
