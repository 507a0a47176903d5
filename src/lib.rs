//! Library exports for reuse in integration tests.
/// Remote clip API client.
pub mod api;
/// Application directory resolution.
pub mod app_dirs;
/// Persisted configuration.
pub mod config;
/// Controller, state, and egui renderer.
pub mod egui_app;
/// Tap-versus-hold gesture recognition.
pub mod gesture;
/// Log file setup.
pub mod logging;
/// Audio output and stream parameters.
pub mod playback;

mod http_client;
