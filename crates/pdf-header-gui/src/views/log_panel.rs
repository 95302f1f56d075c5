use eframe::egui;
use log::Level;

use crate::logger::AppLogger;

/// Entries shown when the panel is expanded
const VISIBLE_ENTRIES: usize = 200;

pub fn show_log_panel(ui: &mut egui::Ui, logger: &AppLogger) {
    egui::CollapsingHeader::new("Log")
        .default_open(false)
        .show(ui, |ui| {
            if ui.small_button("Clear").clicked() {
                logger.clear();
            }
            egui::ScrollArea::vertical()
                .max_height(160.0)
                .stick_to_bottom(true)
                .show(ui, |ui| {
                    for entry in logger.recent(VISIBLE_ENTRIES) {
                        let color = match entry.level {
                            Level::Error => egui::Color32::from_rgb(218, 54, 51),
                            Level::Warn => egui::Color32::from_rgb(210, 153, 34),
                            _ => ui.visuals().text_color(),
                        };
                        ui.label(
                            egui::RichText::new(format!(
                                "{} {:<5} {}",
                                entry.timestamp.format("%H:%M:%S"),
                                entry.level,
                                entry.message
                            ))
                            .monospace()
                            .color(color),
                        );
                    }
                });
        });
}
