use super::*;
use crate::egui_app::controller::CardPointer;
use crate::egui_app::view_model::{self, ClipCardView};
use crate::gesture::GesturePhase;
use eframe::egui::{Align2, Sense, Stroke, Vec2};

const CARD_SIZE: Vec2 = Vec2::new(180.0, 120.0);

/// UI events gathered while painting the grid, applied afterwards so the
/// card loop never borrows the controller mutably.
enum CardEvent {
    Pointer(u64, CardPointer),
    Speed(u64, f32),
    Pitch(u64, f32),
    Title(u64, String),
    Delete(u64),
}

impl EguiApp {
    pub(super) fn render_clip_grid(&mut self, ui: &mut egui::Ui, now: Instant) {
        let playing = self.controller.playing_clip();
        let views: Vec<ClipCardView> = self
            .controller
            .clips()
            .iter()
            .filter_map(|clip| {
                self.controller
                    .ui
                    .cards
                    .get(&clip.id)
                    .map(|card| view_model::clip_card(clip, card, playing == Some(clip.id)))
            })
            .collect();

        let mut events = Vec::new();
        let mut pointer_over_card = false;
        egui::ScrollArea::vertical().show(ui, |ui| {
            ui.horizontal_wrapped(|ui| {
                for view in &views {
                    if render_card(ui, view, now, &mut events) {
                        pointer_over_card = true;
                    }
                }
            });
        });

        // A press anywhere off the cards dismisses open parameter panels.
        if self.controller.any_card_expanded()
            && !pointer_over_card
            && ui.input(|i| i.pointer.any_pressed())
        {
            self.controller.collapse_all_cards();
        }

        for event in events {
            match event {
                CardEvent::Pointer(id, pointer) => {
                    self.controller.handle_card_pointer(id, pointer, now)
                }
                CardEvent::Speed(id, speed) => self.controller.set_card_speed(id, speed),
                CardEvent::Pitch(id, pitch) => self.controller.set_card_pitch(id, pitch),
                CardEvent::Title(id, title) => self.controller.set_session_title(id, title),
                CardEvent::Delete(id) => self.controller.request_delete(id),
            }
        }
    }
}

/// Paint one card; returns true when the pointer is over it.
fn render_card(
    ui: &mut egui::Ui,
    view: &ClipCardView,
    _now: Instant,
    events: &mut Vec<CardEvent>,
) -> bool {
    let fill = if view.playing {
        Color32::from_rgb(30, 54, 42)
    } else if view.playable {
        Color32::from_rgb(28, 28, 30)
    } else {
        Color32::from_rgb(22, 22, 22)
    };
    let frame = Frame::none()
        .fill(fill)
        .stroke(Stroke::new(1.0, Color32::from_rgb(48, 48, 52)))
        .inner_margin(8.0);
    let mut hovered = false;
    let card = frame.show(ui, |ui| {
        ui.set_min_size(CARD_SIZE);
        ui.set_max_width(CARD_SIZE.x);
        ui.vertical(|ui| {
            ui.label(RichText::new(&view.title).color(Color32::WHITE).strong());
            ui.label(RichText::new(&view.uploader_line).small().color(Color32::GRAY));
            if !view.description.is_empty() {
                ui.label(RichText::new(&view.description).small());
            }
            ui.horizontal(|ui| {
                ui.label(RichText::new(&view.size_label).small().color(Color32::GRAY));
                ui.label(
                    RichText::new(&view.play_count_label)
                        .small()
                        .color(Color32::GRAY),
                );
                if !view.playable {
                    ui.label(RichText::new("processing").small().color(Color32::YELLOW));
                }
            });
            if view.phase == GesturePhase::Expanded {
                render_param_panel(ui, view, events);
            } else {
                let (rect, response) =
                    ui.allocate_exact_size(Vec2::new(CARD_SIZE.x - 16.0, 28.0), Sense::drag());
                paint_hold_button(ui, rect, view);
                hovered = response.hovered();
                events.push(CardEvent::Pointer(
                    view.id,
                    CardPointer {
                        pressed: response.drag_started(),
                        released: response.drag_stopped(),
                        hovered: response.hovered(),
                    },
                ));
            }
        });
    });
    hovered || ui.rect_contains_pointer(card.response.rect)
}

fn paint_hold_button(ui: &egui::Ui, rect: egui::Rect, view: &ClipCardView) {
    let painter = ui.painter();
    painter.rect_filled(rect, 4.0, Color32::from_rgb(38, 38, 42));
    if view.hold_progress > 0.0 {
        // Progress ramp fills the button while the press is held.
        let mut filled = rect;
        filled.set_width(rect.width() * view.hold_progress.clamp(0.0, 1.0));
        painter.rect_filled(filled, 4.0, Color32::from_rgb(31, 139, 255));
    }
    let label = if view.playing {
        "Stop"
    } else if view.playable {
        "Play (hold for options)"
    } else {
        "Not ready"
    };
    painter.text(
        rect.center(),
        Align2::CENTER_CENTER,
        label,
        egui::FontId::proportional(12.0),
        Color32::WHITE,
    );
}

fn render_param_panel(ui: &mut egui::Ui, view: &ClipCardView, events: &mut Vec<CardEvent>) {
    ui.separator();
    let mut speed = view.speed;
    if ui
        .add(egui::Slider::new(&mut speed, 0.5..=2.0).text("speed"))
        .changed()
    {
        events.push(CardEvent::Speed(view.id, speed));
    }
    let mut pitch = view.pitch;
    if ui
        .add(egui::Slider::new(&mut pitch, 0.5..=2.0).text("pitch"))
        .changed()
    {
        events.push(CardEvent::Pitch(view.id, pitch));
    }
    let mut title = view.title.clone();
    if ui
        .add(egui::TextEdit::singleline(&mut title).hint_text("Rename for this session"))
        .changed()
    {
        events.push(CardEvent::Title(view.id, title));
    }
    if ui
        .button(RichText::new("Delete…").color(Color32::from_rgb(220, 90, 80)))
        .clicked()
    {
        events.push(CardEvent::Delete(view.id));
    }
}
