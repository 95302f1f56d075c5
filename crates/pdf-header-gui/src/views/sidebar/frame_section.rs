use eframe::egui;
use pdf_header::{FrameStyle, HeaderSession, Intent, Toggle};

use super::edit_config;
use crate::ui_components::{SliderBuilder, enum_selector, hex_color_edit, labeled_drag_clamped};

pub fn show(ui: &mut egui::Ui, session: &HeaderSession, intents: &mut Vec<Intent>) {
    let config = session.config();

    egui::CollapsingHeader::new("🔲 Frame & background")
        .default_open(false)
        .show(ui, |ui| {
            let mut use_frame = config.use_frame;
            if ui.checkbox(&mut use_frame, "Frame").changed() {
                intents.push(Intent::ToggleChanged {
                    toggle: Toggle::Frame,
                    enabled: use_frame,
                });
            }
            ui.add_enabled_ui(config.use_frame, |ui| {
                edit_config(session, intents, |config| {
                    let mut changed = hex_color_edit(ui, "Color:", &mut config.frame_color);
                    changed |= labeled_drag_clamped(
                        ui,
                        "Width:",
                        &mut config.frame_width,
                        0.1..=20.0,
                        " pt",
                        0.1,
                    );
                    changed |= enum_selector(
                        ui,
                        "frame_style",
                        "Style:",
                        &mut config.frame_style,
                        &[(FrameStyle::Solid, "Solid"), (FrameStyle::Dashed, "Dashed")],
                    );
                    changed |= SliderBuilder::new(&mut config.frame_opacity, 0.0..=1.0)
                        .text("Opacity")
                        .show(ui);
                    changed
                });
            });

            ui.add_space(6.0);

            let mut use_bg = config.use_bg;
            if ui.checkbox(&mut use_bg, "Background").changed() {
                intents.push(Intent::ToggleChanged {
                    toggle: Toggle::Background,
                    enabled: use_bg,
                });
            }
            ui.add_enabled_ui(config.use_bg, |ui| {
                edit_config(session, intents, |config| {
                    let mut changed = hex_color_edit(ui, "Color:", &mut config.bg_color);
                    changed |= SliderBuilder::new(&mut config.bg_opacity, 0.0..=1.0)
                        .text("Opacity")
                        .show(ui);
                    changed
                });
            });

            ui.add_enabled_ui(config.use_frame || config.use_bg, |ui| {
                edit_config(session, intents, |config| {
                    labeled_drag_clamped(
                        ui,
                        "Padding:",
                        &mut config.frame_padding,
                        0.0..=50.0,
                        " pt",
                        0.2,
                    )
                });
            });
        });
}
