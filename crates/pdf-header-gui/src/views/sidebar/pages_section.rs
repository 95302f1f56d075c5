use eframe::egui;
use pdf_header::{HeaderSession, Intent, Toggle};

pub fn show(ui: &mut egui::Ui, session: &HeaderSession, intents: &mut Vec<Intent>) {
    let mut all_pages = session.config().all_pages;
    if ui
        .checkbox(&mut all_pages, "Stamp every page")
        .on_hover_text("Otherwise only the first page gets the header")
        .changed()
    {
        intents.push(Intent::ToggleChanged {
            toggle: Toggle::AllPages,
            enabled: all_pages,
        });
    }
}
