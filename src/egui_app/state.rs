//! Shared state types for the egui UI.

mod cards;
mod clips;
mod dialogs;
mod status;

pub use cards::*;
pub use clips::*;
pub use dialogs::*;
pub use status::*;

use std::collections::HashMap;

/// Top-level UI model consumed by the egui renderer.
#[derive(Clone, Debug, Default)]
pub struct UiState {
    /// Footer status badge + text.
    pub status: StatusBarState,
    /// Listing phase, sort mode, and search query.
    pub list: ClipListState,
    /// Per-clip card state, keyed by clip id.
    pub cards: HashMap<u64, CardState>,
    /// Password-gated delete confirmation.
    pub delete: DeleteDialogState,
    /// Upload modal form.
    pub upload: UploadFormState,
}
