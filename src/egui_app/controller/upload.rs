use super::*;
use std::path::PathBuf;

use crate::egui_app::jobs::{UploadJob, UploadResult};

pub(crate) const MISSING_FIELDS_MESSAGE: &str = "Please select a file and enter a title";
pub(crate) const UPLOAD_FAILED_MESSAGE: &str = "Failed to upload file";
/// Attributed uploader when the name field is left blank.
pub(crate) const ANONYMOUS_UPLOADER: &str = "anonymous";

impl ClipController {
    pub fn open_upload_form(&mut self) {
        if self.ui.upload.uploading {
            return;
        }
        self.ui.upload.clear();
        self.ui.upload.open = true;
    }

    pub fn close_upload_form(&mut self) {
        if self.ui.upload.uploading {
            return;
        }
        self.ui.upload.clear();
    }

    /// Record the chosen file; an empty title is pre-filled from the file
    /// stem so most uploads need no typing.
    pub fn set_upload_file(&mut self, path: PathBuf) {
        let size = std::fs::metadata(&path).map(|meta| meta.len()).ok();
        if self.ui.upload.title.trim().is_empty() {
            if let Some(stem) = path.file_stem().and_then(|stem| stem.to_str()) {
                self.ui.upload.title = stem.to_string();
            }
        }
        self.ui.upload.file = Some(path);
        self.ui.upload.file_size_bytes = size;
        self.ui.upload.last_error = None;
    }

    /// Validate the form and start the upload. Validation failures stay
    /// local; nothing goes on the wire.
    pub fn submit_upload(&mut self) {
        if self.ui.upload.uploading {
            return;
        }
        let title = self.ui.upload.title.trim().to_string();
        let Some(path) = self.ui.upload.file.clone() else {
            self.ui.upload.last_error = Some(MISSING_FIELDS_MESSAGE.to_string());
            return;
        };
        if title.is_empty() {
            self.ui.upload.last_error = Some(MISSING_FIELDS_MESSAGE.to_string());
            return;
        }
        let uploaded_by = match self.ui.upload.uploaded_by.trim() {
            "" => ANONYMOUS_UPLOADER.to_string(),
            name => name.to_string(),
        };
        self.ui.upload.uploading = true;
        self.ui.upload.last_error = None;
        self.set_status(StatusTone::Busy, format!("Uploading \"{title}\""));
        self.jobs.begin_upload(
            self.api.clone(),
            UploadJob {
                path,
                title,
                description: self.ui.upload.description.trim().to_string(),
                uploaded_by,
            },
        );
    }

    pub(crate) fn apply_upload_finished(&mut self, result: UploadResult) {
        self.jobs.clear_upload();
        self.ui.upload.uploading = false;
        match result.result {
            Ok(()) => {
                self.ui.upload.clear();
                self.set_status(StatusTone::Info, "Upload complete");
                self.reload_clips();
            }
            Err(err) => {
                tracing::warn!(error = %err, "upload failed");
                let message = err
                    .server_message()
                    .unwrap_or(UPLOAD_FAILED_MESSAGE)
                    .to_string();
                self.ui.upload.last_error = Some(message);
                self.set_status(StatusTone::Error, UPLOAD_FAILED_MESSAGE);
            }
        }
    }
}
