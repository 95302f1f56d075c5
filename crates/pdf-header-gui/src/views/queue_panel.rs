use eframe::egui;
use pdf_header::{FileState, HeaderSession, Intent};

use crate::ui_components::state_color;

/// Batch list with a state badge per file; clicking a row opens it
pub fn show_queue_panel(ui: &mut egui::Ui, session: &HeaderSession, intents: &mut Vec<Intent>) {
    let progress = session.progress();
    ui.heading("Files");
    ui.label(progress.label());
    ui.add(
        egui::ProgressBar::new(progress.processed() as f32 / progress.total.max(1) as f32)
            .show_percentage(),
    );
    ui.separator();

    if session.queue().is_empty() {
        ui.label("No files selected");
        return;
    }

    let current = session.queue().current_index();
    let busy = session.is_applying();
    egui::ScrollArea::vertical().show(ui, |ui| {
        for (index, entry) in session.queue().entries().iter().enumerate() {
            ui.horizontal(|ui| {
                ui.label(
                    egui::RichText::new(format!("● {}", entry.state.label()))
                        .small()
                        .color(state_color(entry.state)),
                );
                let row = ui.add_enabled(
                    !busy,
                    egui::Button::new(entry.file_name()).selected(current == Some(index)),
                );
                let row = match (&entry.last_error, entry.state) {
                    (Some(error), FileState::Error) => row.on_hover_text(error.as_str()),
                    _ if entry.recovered() => {
                        row.on_hover_text(format!("Done after {} attempts", entry.attempts))
                    }
                    _ => match &entry.output {
                        Some(output) => row.on_hover_text(output.display().to_string()),
                        None => row,
                    },
                };
                if row.clicked() && current != Some(index) {
                    intents.push(Intent::JumpTo(index));
                }
            });
        }
    });
}
