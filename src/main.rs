//! Entry point for the egui-based Clipdeck UI.
#![cfg_attr(
    all(not(debug_assertions), target_os = "windows"),
    windows_subsystem = "windows"
)]

use clipdeck::config;
use clipdeck::egui_app::controller::ClipController;
use clipdeck::egui_app::ui::EguiApp;
use clipdeck::logging;
use clipdeck::playback::PlaybackManager;
use eframe::egui;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    if let Err(err) = logging::init() {
        eprintln!("Logging disabled: {err}");
    }

    let config = match config::load_or_default() {
        Ok(config) => config,
        Err(err) => {
            tracing::warn!(error = %err, "falling back to default configuration");
            config::AppConfig::default()
        }
    };

    let viewport = egui::ViewportBuilder::default()
        .with_inner_size(egui::vec2(960.0, 680.0))
        .with_min_inner_size(egui::vec2(560.0, 400.0));
    let native_options = eframe::NativeOptions {
        viewport,
        ..Default::default()
    };

    eframe::run_native(
        "Clipdeck",
        native_options,
        Box::new(move |_cc| {
            let mut controller = ClipController::new(&config);
            match PlaybackManager::new() {
                Ok(player) => controller.attach_player(player),
                Err(err) => {
                    tracing::warn!(error = %err, "no audio output; playback disabled");
                }
            }
            Ok(Box::new(EguiApp::new(controller)))
        }),
    )?;
    Ok(())
}
