//! Transport client for the remote clip API.
//!
//! Normalizes listing responses to a validated clip collection, switches
//! between JSON and multipart request encodings based on payload shape, and
//! maps HTTP failures onto a stable error taxonomy.

mod client;
mod error;
mod multipart;
mod types;

pub use client::{ClipApi, UploadRequest};
pub use error::ApiError;
pub use types::{Clip, Pagination, SortMode};
