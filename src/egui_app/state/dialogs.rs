use std::path::PathBuf;

/// A delete awaiting password confirmation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PendingDelete {
    /// Target clip id.
    pub id: u64,
    /// Title shown in the confirmation copy.
    pub title: String,
}

/// State of the password-gated delete confirmation dialog.
#[derive(Clone, Debug, Default)]
pub struct DeleteDialogState {
    /// The delete being confirmed; `None` means the dialog is closed.
    pub pending: Option<PendingDelete>,
    /// Password input field.
    pub password_input: String,
    /// True while the delete call is in flight.
    pub deleting: bool,
    /// Last authorization error, redisplayed for retry.
    pub auth_error: Option<String>,
    /// Whether to focus the password field.
    pub focus_password_requested: bool,
}

impl DeleteDialogState {
    pub fn is_open(&self) -> bool {
        self.pending.is_some()
    }
}

/// State of the upload modal form.
#[derive(Clone, Debug, Default)]
pub struct UploadFormState {
    /// Whether the modal is open.
    pub open: bool,
    /// Selected file, if any.
    pub file: Option<PathBuf>,
    /// Size of the selected file, for the picker caption.
    pub file_size_bytes: Option<u64>,
    /// Title input.
    pub title: String,
    /// Description input.
    pub description: String,
    /// Uploader name input; blank submits as "anonymous".
    pub uploaded_by: String,
    /// True while the upload call is in flight.
    pub uploading: bool,
    /// Inline validation or server error.
    pub last_error: Option<String>,
}

impl UploadFormState {
    /// Reset every field, used on success and on explicit cancel.
    pub fn clear(&mut self) {
        *self = Self::default();
    }
}
