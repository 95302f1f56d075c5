use eframe::egui;
use pdf_header::overlay::CanvasPoint;
use pdf_header::position::pdf_point_from_ratio;
use pdf_header::{HeaderSession, Intent, Position};

use crate::ui_components::{PresetGrid, labeled_drag_clamped};

pub fn show(
    ui: &mut egui::Ui,
    session: &HeaderSession,
    hover: Option<CanvasPoint>,
    intents: &mut Vec<Intent>,
) {
    egui::CollapsingHeader::new("📍 Position")
        .default_open(true)
        .show(ui, |ui| {
            if let Some(preset) = PresetGrid::new(session.position().preset()).show(ui) {
                intents.push(Intent::PresetSelected(preset));
            }

            ui.add_space(4.0);
            let config = session.config();
            let (mut x_pt, mut y_pt) = (config.margin_x_pt, config.margin_y_pt);
            let mut changed =
                labeled_drag_clamped(ui, "Margin X:", &mut x_pt, 0.0..=500.0, " pt", 0.5);
            changed |= labeled_drag_clamped(ui, "Margin Y:", &mut y_pt, 0.0..=500.0, " pt", 0.5);
            if changed {
                intents.push(Intent::MarginsChanged { x_pt, y_pt });
            }

            ui.add_space(4.0);
            match session.position() {
                Position::Manual { .. } => ui.label("Custom position (click on the page)"),
                position => ui.label(format!("Preset: {}", position.key().replace('_', " "))),
            };

            let ratio = session.current_ratio();
            let label = match session.page_size() {
                Some((w, h)) => {
                    let (x, y) = pdf_point_from_ratio(ratio.x, ratio.y, w, h);
                    format!("x: {:.0} pts · y: {:.0} pts", x, y)
                }
                None => format!("x: {:.0}% · y: {:.0}%", ratio.x * 100.0, ratio.y * 100.0),
            };
            ui.label(egui::RichText::new(label).monospace());

            let pointer = match hover.and_then(|point| session.pdf_point_at(point)) {
                Some((x, y)) => format!("pointer x: {:.0} pts · y: {:.0} pts", x, y),
                None => "pointer: off page".to_string(),
            };
            ui.label(egui::RichText::new(pointer).monospace().weak());
        });
}
