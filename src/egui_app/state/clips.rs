use crate::api::SortMode;

/// Where the clip listing currently stands.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ListPhase {
    /// A fetch is in flight.
    #[default]
    Loading,
    /// The last fetch failed; only the banner is shown.
    Error,
    /// The last fetch succeeded and returned nothing.
    Empty,
    /// Clips are available for the grid.
    Populated,
}

/// Listing state keyed by the active sort mode.
#[derive(Clone, Debug, Default)]
pub struct ClipListState {
    pub phase: ListPhase,
    /// Which listing endpoint the collection is bound to.
    pub sort: SortMode,
    /// Free-text search input; empty means plain listing.
    pub search_input: String,
    /// Query the current collection was fetched for, if any.
    pub active_query: Option<String>,
    /// Static banner text while in the error phase.
    pub error: Option<String>,
}
