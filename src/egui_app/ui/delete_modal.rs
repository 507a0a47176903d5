use super::*;
use eframe::egui::Align2;

impl EguiApp {
    pub(super) fn render_delete_modal(&mut self, ctx: &egui::Context) {
        if !self.controller.ui.delete.is_open() {
            return;
        }
        let mut open = true;
        let mut confirm = false;
        let mut cancel = false;
        let deleting = self.controller.ui.delete.deleting;

        egui::Window::new("Delete clip")
            .anchor(Align2::CENTER_CENTER, egui::vec2(0.0, 0.0))
            .collapsible(false)
            .resizable(false)
            .auto_sized()
            .open(&mut open)
            .show(ctx, |ui| {
                let dialog = &mut self.controller.ui.delete;
                ui.set_min_width(300.0);
                if let Some(pending) = &dialog.pending {
                    ui.label(format!(
                        "Delete \"{}\"? This cannot be undone.",
                        pending.title
                    ));
                }
                ui.add_space(6.0);
                let field = egui::TextEdit::singleline(&mut dialog.password_input)
                    .password(true)
                    .hint_text("Delete password");
                let response = ui.add_enabled(!deleting, field);
                if dialog.focus_password_requested {
                    response.request_focus();
                    dialog.focus_password_requested = false;
                }
                if response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter)) {
                    confirm = true;
                }
                if let Some(error) = &dialog.auth_error {
                    ui.add_space(4.0);
                    ui.label(RichText::new(error).color(Color32::from_rgb(220, 90, 80)));
                }
                ui.add_space(8.0);
                ui.horizontal(|ui| {
                    if deleting {
                        ui.spinner();
                        ui.label("Deleting…");
                    } else {
                        if ui
                            .button(RichText::new("Delete").color(Color32::from_rgb(220, 90, 80)))
                            .clicked()
                        {
                            confirm = true;
                        }
                        if ui.button("Cancel").clicked() {
                            cancel = true;
                        }
                    }
                });
            });

        if confirm && !deleting {
            self.controller.confirm_delete();
        } else if (cancel || !open) && !deleting {
            self.controller.cancel_delete();
        }
    }
}
