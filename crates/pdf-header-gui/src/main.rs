#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

use eframe::egui;
use std::path::PathBuf;

mod app;
mod handlers;
mod logger;
mod preview;
mod ui_components;
mod views;
mod worker;

/// Entries kept in the in-app log panel
const LOG_CAPACITY: usize = 500;

fn main() -> anyhow::Result<()> {
    let logger = logger::AppLogger::new(LOG_CAPACITY);
    if let Err(e) = logger.clone().init() {
        eprintln!("Logger already installed: {}", e);
    }

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;

    let initial_paths: Vec<PathBuf> = std::env::args_os().skip(1).map(PathBuf::from).collect();

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 860.0])
            .with_min_inner_size([900.0, 600.0])
            .with_title("PDF Header"),
        ..Default::default()
    };

    let handle = runtime.handle().clone();
    eframe::run_native(
        "PDF Header",
        options,
        Box::new(move |cc| {
            Ok(Box::new(app::PdfHeaderApp::new(
                cc,
                handle,
                logger,
                initial_paths,
            )))
        }),
    )
    .map_err(|e| anyhow::anyhow!("Failed to start the window: {}", e))
}
