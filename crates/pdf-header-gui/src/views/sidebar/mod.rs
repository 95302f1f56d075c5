mod frame_section;
mod pages_section;
mod position_section;
mod style_section;
mod text_section;

use eframe::egui;
use pdf_header::overlay::CanvasPoint;
use pdf_header::{DateInputs, HeaderConfig, HeaderSession, Intent};

/// Edit a copy of the config and queue it as one `ConfigEdited` if anything changed
fn edit_config(
    session: &HeaderSession,
    intents: &mut Vec<Intent>,
    edit: impl FnOnce(&mut HeaderConfig) -> bool,
) {
    let mut config = session.config().clone();
    if edit(&mut config) {
        intents.push(Intent::ConfigEdited(Box::new(config)));
    }
}

pub fn show_sidebar(
    ui: &mut egui::Ui,
    session: &HeaderSession,
    dates: &DateInputs,
    hover: Option<CanvasPoint>,
    intents: &mut Vec<Intent>,
) {
    egui::ScrollArea::vertical().show(ui, |ui| {
        ui.heading("Header");
        ui.separator();

        text_section::show(ui, session, dates, intents);
        ui.add_space(10.0);
        ui.separator();
        ui.add_space(10.0);

        style_section::show(ui, session, intents);
        ui.add_space(10.0);
        ui.separator();
        ui.add_space(10.0);

        frame_section::show(ui, session, intents);
        ui.add_space(10.0);
        ui.separator();
        ui.add_space(10.0);

        position_section::show(ui, session, hover, intents);
        ui.add_space(10.0);
        ui.separator();
        ui.add_space(10.0);

        pages_section::show(ui, session, intents);
    });
}
