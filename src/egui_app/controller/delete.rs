use super::*;
use crate::egui_app::jobs::DeleteResult;

pub(crate) const WRONG_PASSWORD_MESSAGE: &str = "Incorrect password";
pub(crate) const DELETE_FAILED_MESSAGE: &str = "Failed to delete clip";

impl ClipController {
    /// Open the confirm dialog for one clip. The actual DELETE only goes
    /// out once a password is confirmed.
    pub fn request_delete(&mut self, id: u64) {
        if self.ui.delete.deleting {
            return;
        }
        let Some(clip) = self.clip(id) else {
            return;
        };
        self.ui.delete.pending = Some(PendingDelete {
            id,
            title: clip.title.clone(),
        });
        self.ui.delete.password_input.clear();
        self.ui.delete.auth_error = None;
        self.ui.delete.focus_password_requested = true;
    }

    /// Close the dialog without deleting. Unconditional: when a delete is
    /// in flight its result is dropped when it lands (the server may still
    /// have deleted the clip; a success is applied either way).
    pub fn cancel_delete(&mut self) {
        self.ui.delete.pending = None;
        self.ui.delete.password_input.clear();
        self.ui.delete.auth_error = None;
    }

    /// Send the pending delete with the entered password.
    pub fn confirm_delete(&mut self) {
        if self.ui.delete.deleting {
            return;
        }
        let Some(pending) = &self.ui.delete.pending else {
            return;
        };
        let id = pending.id;
        let password = self.ui.delete.password_input.clone();
        if password.is_empty() {
            self.ui.delete.auth_error = Some("Enter the delete password".to_string());
            self.ui.delete.focus_password_requested = true;
            return;
        }
        self.ui.delete.deleting = true;
        self.ui.delete.auth_error = None;
        self.set_status(StatusTone::Busy, "Deleting clip");
        self.jobs.begin_delete(self.api.clone(), id, password);
    }

    pub(crate) fn apply_delete_finished(&mut self, result: DeleteResult) {
        self.jobs.clear_delete();
        self.ui.delete.deleting = false;
        let cancelled = !self.ui.delete.is_open();
        match result.result {
            Ok(()) => {
                if self.playing_clip() == Some(result.id) {
                    self.stop_playback();
                }
                // The server no longer has the clip; drop it locally
                // rather than refetching the whole listing.
                self.remove_clip(result.id);
                self.ui.delete.pending = None;
                self.ui.delete.password_input.clear();
                self.ui.delete.auth_error = None;
                self.set_status(StatusTone::Info, "Clip deleted");
            }
            Err(err) if cancelled => {
                tracing::debug!(clip_id = result.id, error = %err, "delete result after cancel");
            }
            Err(err) if err.is_auth_failure() => {
                // Wrong password keeps the dialog open for another try.
                self.ui.delete.password_input.clear();
                self.ui.delete.auth_error = Some(WRONG_PASSWORD_MESSAGE.to_string());
                self.ui.delete.focus_password_requested = true;
                self.set_status(StatusTone::Warning, WRONG_PASSWORD_MESSAGE);
            }
            Err(err) => {
                tracing::warn!(clip_id = result.id, error = %err, "delete failed");
                self.ui.delete.pending = None;
                self.ui.delete.password_input.clear();
                self.set_status(StatusTone::Error, DELETE_FAILED_MESSAGE);
            }
        }
    }
}
