use super::*;
use eframe::egui::Align2;
use rfd::FileDialog;

impl EguiApp {
    pub(super) fn render_upload_modal(&mut self, ctx: &egui::Context) {
        if !self.controller.ui.upload.open {
            return;
        }
        let mut open = true;
        let mut submit = false;
        let mut cancel = false;
        let mut picked: Option<std::path::PathBuf> = None;
        let uploading = self.controller.ui.upload.uploading;

        egui::Window::new("Upload clip")
            .anchor(Align2::CENTER_CENTER, egui::vec2(0.0, 0.0))
            .collapsible(false)
            .resizable(false)
            .auto_sized()
            .open(&mut open)
            .show(ctx, |ui| {
                let form = &mut self.controller.ui.upload;
                ui.set_min_width(320.0);
                ui.horizontal(|ui| {
                    if ui.add_enabled(!uploading, egui::Button::new("Choose file…")).clicked() {
                        picked = FileDialog::new()
                            .add_filter("Audio", &["mp3", "wav", "ogg", "flac", "m4a"])
                            .pick_file();
                    }
                    match (&form.file, form.file_size_bytes) {
                        (Some(path), Some(size)) => {
                            let name = path
                                .file_name()
                                .map(|n| n.to_string_lossy().to_string())
                                .unwrap_or_default();
                            let size = crate::egui_app::view_model::size_label(size);
                            ui.label(RichText::new(format!("{name} ({size})")).small());
                        }
                        (Some(path), None) => {
                            ui.label(RichText::new(path.to_string_lossy()).small());
                        }
                        _ => {
                            ui.label(RichText::new("No file selected").small().color(Color32::GRAY));
                        }
                    }
                });
                ui.add_space(6.0);
                ui.add_enabled(
                    !uploading,
                    egui::TextEdit::singleline(&mut form.title).hint_text("Title"),
                );
                ui.add_enabled(
                    !uploading,
                    egui::TextEdit::multiline(&mut form.description)
                        .hint_text("Description (optional)")
                        .desired_rows(2),
                );
                ui.add_enabled(
                    !uploading,
                    egui::TextEdit::singleline(&mut form.uploaded_by)
                        .hint_text("Your name (optional)"),
                );
                if let Some(error) = &form.last_error {
                    ui.add_space(4.0);
                    ui.label(RichText::new(error).color(Color32::from_rgb(220, 90, 80)));
                }
                ui.add_space(8.0);
                ui.horizontal(|ui| {
                    if uploading {
                        ui.spinner();
                        ui.label("Uploading…");
                    } else {
                        if ui.button("Upload").clicked() {
                            submit = true;
                        }
                        if ui.button("Cancel").clicked() {
                            cancel = true;
                        }
                    }
                });
            });

        if let Some(path) = picked {
            self.controller.set_upload_file(path);
        }
        if submit {
            self.controller.submit_upload();
        } else if (cancel || !open) && !uploading {
            self.controller.close_upload_form();
        }
    }
}
