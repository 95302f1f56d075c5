use eframe::egui;
use pdf_header::constants::DATE_FORMATS;
use pdf_header::{
    DateInputs, DatePosition, DateSource, HeaderSession, Intent, TextField, Toggle,
};

use super::edit_config;
use crate::ui_components::enum_selector;

/// Checkbox bound to a toggle, queuing a `ToggleChanged` when clicked
fn toggle(ui: &mut egui::Ui, intents: &mut Vec<Intent>, label: &str, value: bool, toggle: Toggle) {
    let mut enabled = value;
    if ui.checkbox(&mut enabled, label).changed() {
        intents.push(Intent::ToggleChanged { toggle, enabled });
    }
}

fn text_entry(
    ui: &mut egui::Ui,
    intents: &mut Vec<Intent>,
    value: &str,
    hint: &str,
    enabled: bool,
    field: TextField,
) {
    let mut buffer = value.to_string();
    let edit = egui::TextEdit::singleline(&mut buffer)
        .hint_text(hint)
        .desired_width(f32::INFINITY);
    if ui.add_enabled(enabled, edit).changed() {
        intents.push(Intent::TextChanged {
            field,
            value: buffer,
        });
    }
}

pub fn show(
    ui: &mut egui::Ui,
    session: &HeaderSession,
    dates: &DateInputs,
    intents: &mut Vec<Intent>,
) {
    let config = session.config();

    egui::CollapsingHeader::new("📝 Text")
        .default_open(true)
        .show(ui, |ui| {
            toggle(ui, intents, "File name", config.use_filename, Toggle::Filename);

            toggle(ui, intents, "Custom text", config.use_custom, Toggle::Custom);
            text_entry(
                ui,
                intents,
                &config.custom_text,
                "Replaces the file name",
                config.use_custom,
                TextField::Custom,
            );

            toggle(ui, intents, "Prefix", config.use_prefix, Toggle::Prefix);
            text_entry(
                ui,
                intents,
                &config.prefix_text,
                "e.g. CONFIDENTIEL –",
                config.use_prefix,
                TextField::Prefix,
            );

            toggle(ui, intents, "Suffix", config.use_suffix, Toggle::Suffix);
            text_entry(
                ui,
                intents,
                &config.suffix_text,
                "e.g. v2",
                config.use_suffix,
                TextField::Suffix,
            );
        });

    egui::CollapsingHeader::new("📅 Date")
        .default_open(false)
        .show(ui, |ui| {
            toggle(ui, intents, "Add a date", config.use_date, Toggle::Date);

            ui.add_enabled_ui(config.use_date, |ui| {
                let mut format = config.date_format.clone();
                let options: Vec<(String, &str)> = DATE_FORMATS
                    .iter()
                    .map(|(pattern, sample)| (pattern.to_string(), *sample))
                    .collect();
                if enum_selector(ui, "date_format", "Format:", &mut format, &options) {
                    intents.push(Intent::TextChanged {
                        field: TextField::DateFormat,
                        value: format,
                    });
                }
                text_entry(
                    ui,
                    intents,
                    &config.date_format,
                    "strftime pattern",
                    true,
                    TextField::DateFormat,
                );

                edit_config(session, intents, |config| {
                    enum_selector(
                        ui,
                        "date_position",
                        "Place:",
                        &mut config.date_position,
                        &[
                            (DatePosition::Prefix, "Before"),
                            (DatePosition::Suffix, "After"),
                        ],
                    )
                });
                edit_config(session, intents, |config| {
                    enum_selector(
                        ui,
                        "date_source",
                        "Source:",
                        &mut config.date_source,
                        &[
                            (DateSource::Today, "Today"),
                            (DateSource::FileModified, "File modified"),
                        ],
                    )
                });
            });
        });

    ui.add_space(6.0);
    ui.label(egui::RichText::new("Preview:").small().weak());
    let text = session.header_text(dates);
    if text.is_empty() {
        ui.label(egui::RichText::new("(empty header, nothing will be stamped)").italics());
    } else {
        ui.label(egui::RichText::new(text).strong());
    }
}
