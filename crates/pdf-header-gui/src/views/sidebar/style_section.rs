use eframe::egui;
use pdf_header::constants::{
    MAX_FONT_SIZE, MAX_LETTER_SPACING, MAX_LINE_SPACING, MIN_FONT_SIZE, MIN_LETTER_SPACING,
    MIN_LINE_SPACING,
};
use pdf_header::{HeaderSession, Intent, Rotation, TextField, Toggle};

use super::edit_config;
use crate::ui_components::{
    DragValueBuilder, enum_selector, hex_color_edit, labeled_drag_clamped,
};

pub fn show(ui: &mut egui::Ui, session: &HeaderSession, intents: &mut Vec<Intent>) {
    let config = session.config();

    egui::CollapsingHeader::new("🔤 Font")
        .default_open(true)
        .show(ui, |ui| {
            ui.horizontal(|ui| {
                ui.label("Family:");
                let mut family = config.font_family.clone();
                let edit = egui::TextEdit::singleline(&mut family)
                    .hint_text("Helvetica, Times, Courier or installed")
                    .desired_width(160.0);
                if ui.add_enabled(config.font_file.is_none(), edit).changed() {
                    intents.push(Intent::TextChanged {
                        field: TextField::FontFamily,
                        value: family,
                    });
                }
            });

            show_font_file(ui, session, intents);

            ui.horizontal(|ui| {
                ui.label("Size:");
                if ui.small_button("−").clicked() {
                    intents.push(Intent::FontSizeStepped(-1));
                }
                edit_config(session, intents, |config| {
                    DragValueBuilder::new(&mut config.font_size)
                        .range(MIN_FONT_SIZE..=MAX_FONT_SIZE)
                        .speed(0.5)
                        .show(ui)
                });
                if ui.small_button("+").clicked() {
                    intents.push(Intent::FontSizeStepped(1));
                }
                ui.label("pt");
            });

            ui.horizontal(|ui| {
                for (label, value, toggle) in [
                    ("Bold", config.bold, Toggle::Bold),
                    ("Italic", config.italic, Toggle::Italic),
                    ("Underline", config.underline, Toggle::Underline),
                ] {
                    let mut enabled = value;
                    if ui.checkbox(&mut enabled, label).changed() {
                        intents.push(Intent::ToggleChanged { toggle, enabled });
                    }
                }
            });

            edit_config(session, intents, |config| {
                hex_color_edit(ui, "Color:", &mut config.color_hex)
            });

            edit_config(session, intents, |config| {
                labeled_drag_clamped(
                    ui,
                    "Letter spacing:",
                    &mut config.letter_spacing,
                    MIN_LETTER_SPACING..=MAX_LETTER_SPACING,
                    " pt",
                    0.1,
                )
            });
            edit_config(session, intents, |config| {
                labeled_drag_clamped(
                    ui,
                    "Line spacing:",
                    &mut config.line_spacing,
                    MIN_LINE_SPACING..=MAX_LINE_SPACING,
                    "×",
                    0.05,
                )
            });

            edit_config(session, intents, |config| {
                enum_selector(
                    ui,
                    "rotation",
                    "Rotation:",
                    &mut config.rotation,
                    &[
                        (Rotation::None, "0°"),
                        (Rotation::Deg90, "90°"),
                        (Rotation::Deg180, "180°"),
                        (Rotation::Deg270, "270°"),
                    ],
                )
            });
        });
}

fn show_font_file(ui: &mut egui::Ui, session: &HeaderSession, intents: &mut Vec<Intent>) {
    let font_file = session.config().font_file.clone();
    ui.horizontal(|ui| {
        ui.label("File:");
        match &font_file {
            Some(path) => {
                let name = path
                    .file_name()
                    .map(|n| n.to_string_lossy().into_owned())
                    .unwrap_or_default();
                ui.label(name).on_hover_text(path.display().to_string());
                if ui.small_button("✖").on_hover_text("Use the family").clicked() {
                    edit_config(session, intents, |config| {
                        config.font_file = None;
                        true
                    });
                }
            }
            None => {
                if ui.button("Choose…").clicked() {
                    if let Some(path) = rfd::FileDialog::new()
                        .add_filter("Fonts", &["ttf", "otf"])
                        .pick_file()
                    {
                        log::info!("Using font file {}", path.display());
                        edit_config(session, intents, |config| {
                            config.font_file = Some(path);
                            true
                        });
                    }
                }
            }
        }
    });
}
