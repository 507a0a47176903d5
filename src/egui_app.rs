//! Controller, state, and egui renderer for the clip browser.

pub mod controller;
mod jobs;
pub mod state;
pub mod ui;
pub mod view_model;
