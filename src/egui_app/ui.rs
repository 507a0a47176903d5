//! egui renderer for the application UI.

use std::time::{Duration, Instant};

use crate::api::SortMode;
use crate::egui_app::controller::ClipController;
use crate::egui_app::state::ListPhase;
use eframe::egui::{self, Color32, Frame, RichText};

mod delete_modal;
mod grid;
mod upload_modal;

/// Renders the egui UI using the shared controller state.
pub struct EguiApp {
    controller: ClipController,
    visuals_set: bool,
}

impl EguiApp {
    pub fn new(mut controller: ClipController) -> Self {
        controller.request_initial_load();
        Self {
            controller,
            visuals_set: false,
        }
    }

    fn apply_visuals(&mut self, ctx: &egui::Context) {
        if self.visuals_set {
            return;
        }
        let mut visuals = egui::Visuals::dark();
        visuals.window_fill = Color32::from_rgb(12, 12, 12);
        visuals.panel_fill = Color32::from_rgb(16, 16, 16);
        visuals.widgets.noninteractive.bg_fill = Color32::from_rgb(16, 16, 16);
        ctx.set_visuals(visuals);
        self.visuals_set = true;
    }

    fn render_top_bar(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::top("top_bar")
            .frame(Frame::none().fill(Color32::from_rgb(24, 24, 24)))
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    ui.label(RichText::new("Clipdeck").color(Color32::WHITE).strong());
                    ui.add_space(8.0);
                    ui.separator();
                    for sort in [SortMode::Recent, SortMode::Popular] {
                        let active = self.controller.ui.list.sort == sort
                            && self.controller.ui.list.active_query.is_none();
                        if ui.selectable_label(active, sort.label()).clicked() {
                            self.controller.set_sort(sort);
                        }
                    }
                    ui.separator();
                    let search = egui::TextEdit::singleline(&mut self.controller.ui.list.search_input)
                        .hint_text("Search clips")
                        .desired_width(180.0);
                    let response = ui.add(search);
                    if response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter)) {
                        self.controller.submit_search();
                    }
                    if self.controller.ui.list.active_query.is_some()
                        && ui.small_button("✕").clicked()
                    {
                        self.controller.clear_search();
                    }
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        if ui
                            .button(RichText::new("Upload").color(Color32::WHITE))
                            .clicked()
                        {
                            self.controller.open_upload_form();
                        }
                        if self.controller.playing_clip().is_some()
                            && ui.button("Stop").clicked()
                        {
                            self.controller.stop_playback();
                        }
                    });
                });
            });
    }

    fn render_status(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::bottom("status_bar")
            .frame(Frame::none().fill(Color32::from_rgb(0, 0, 0)))
            .show(ctx, |ui| {
                let status = &self.controller.ui.status;
                ui.horizontal(|ui| {
                    ui.add_space(8.0);
                    ui.painter().circle_filled(
                        ui.cursor().min + egui::vec2(9.0, 11.0),
                        9.0,
                        status.badge_color,
                    );
                    ui.add_space(8.0);
                    ui.label(RichText::new(&status.badge_label).color(Color32::WHITE));
                    ui.separator();
                    ui.label(RichText::new(&status.text).color(Color32::WHITE));
                });
            });
    }

    fn render_central(&mut self, ctx: &egui::Context, now: Instant) {
        egui::CentralPanel::default().show(ctx, |ui| match self.controller.ui.list.phase {
            ListPhase::Loading => {
                ui.centered_and_justified(|ui| {
                    ui.horizontal(|ui| {
                        ui.spinner();
                        ui.label("Loading clips");
                    });
                });
            }
            ListPhase::Error => {
                ui.vertical_centered(|ui| {
                    ui.add_space(48.0);
                    if let Some(message) = self.controller.ui.list.error.clone() {
                        ui.label(RichText::new(message).color(Color32::from_rgb(220, 90, 80)));
                    }
                    ui.add_space(8.0);
                    if ui.button("Retry").clicked() {
                        self.controller.reload_clips();
                    }
                });
            }
            ListPhase::Empty => {
                ui.vertical_centered(|ui| {
                    ui.add_space(48.0);
                    let message = match &self.controller.ui.list.active_query {
                        Some(query) => format!("No clips match \"{query}\""),
                        None => "No clips yet. Upload the first one!".to_string(),
                    };
                    ui.label(RichText::new(message).color(Color32::GRAY));
                });
            }
            ListPhase::Populated => {
                self.render_clip_grid(ui, now);
            }
        });
    }
}

impl eframe::App for EguiApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.apply_visuals(ctx);
        self.controller.poll_background_jobs();
        let now = Instant::now();
        self.render_top_bar(ctx);
        self.render_status(ctx);
        self.render_central(ctx, now);
        self.render_upload_modal(ctx);
        self.render_delete_modal(ctx);
        // Hold ramps and background jobs need frames even without input.
        ctx.request_repaint_after(Duration::from_millis(50));
    }
}
