use eframe::egui;
use pdf_header::{
    DateInputs, Effect, HeaderConfig, HeaderSession, Intent, default_config_path,
};
use pdf_header_runtime::{PdfCommand, PdfUpdate, RequestId, WorkerChannels};
use std::path::PathBuf;
use std::time::Duration;

use crate::logger::AppLogger;
use crate::views::{CanvasState, show_canvas, show_log_panel, show_queue_panel, show_sidebar};

/// How often to poll the worker while it has something in flight
const BUSY_POLL_INTERVAL: Duration = Duration::from_millis(100);
/// The worker cannot wake the UI, so idle frames still check for updates
const IDLE_POLL_INTERVAL: Duration = Duration::from_millis(300);

struct Status {
    text: String,
    is_error: bool,
}

/// Modal error notice
struct Alert {
    message: String,
    /// Output held open by another program
    locked: bool,
}

pub struct PdfHeaderApp {
    session: HeaderSession,
    channels: WorkerChannels,
    logger: AppLogger,
    config_path: PathBuf,

    canvas: CanvasState,
    /// Tag of the newest preview request; older renders are dropped
    preview_request: RequestId,
    dates: DateInputs,

    status: Option<Status>,
    /// Blocking notice for the last reported error
    alert: Option<Alert>,
    show_summary: bool,

    _tokio_handle: tokio::runtime::Handle,
}

impl PdfHeaderApp {
    pub fn new(
        _cc: &eframe::CreationContext<'_>,
        tokio_handle: tokio::runtime::Handle,
        logger: AppLogger,
        initial_paths: Vec<PathBuf>,
    ) -> Self {
        let config_path = default_config_path();
        let config = tokio_handle.block_on(HeaderConfig::load_or_default(&config_path));

        let (channels, command_rx, update_tx) = pdf_header_runtime::channels();
        tokio_handle.spawn(crate::worker::worker_task(command_rx, update_tx));

        let mut app = Self {
            session: HeaderSession::new(config),
            channels,
            logger,
            config_path,
            canvas: CanvasState::default(),
            preview_request: RequestId::default(),
            dates: DateInputs::now(),
            status: None,
            alert: None,
            show_summary: false,
            _tokio_handle: tokio_handle,
        };

        if !initial_paths.is_empty() {
            app.send(PdfCommand::CollectBatch {
                paths: initial_paths,
            });
        }
        app
    }

    fn send(&mut self, command: PdfCommand) {
        if let Err(e) = self.channels.send(command) {
            log::error!("{}", e);
            self.set_status(e.to_string(), true);
        }
    }

    fn set_status(&mut self, text: impl Into<String>, is_error: bool) {
        self.status = Some(Status {
            text: text.into(),
            is_error,
        });
    }

    fn dispatch(&mut self, intent: Intent) {
        let effects = self.session.dispatch(intent);
        self.perform(effects);
    }

    /// Carry out what the session asked for
    fn perform(&mut self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::OpenDocument(path) => {
                    self.preview_request = self.preview_request.next();
                    self.dates = DateInputs::for_file(&path);
                    self.canvas.start_loading();
                    self.send(PdfCommand::LoadPreview {
                        request: self.preview_request,
                        path,
                    });
                }
                Effect::Apply(job) => {
                    self.set_status(format!("Applying to {}…", job.path.display()), false);
                    self.send(PdfCommand::Apply { job });
                }
                Effect::PersistConfig(config) => {
                    let path = self.config_path.clone();
                    self.send(PdfCommand::SaveConfig { config, path });
                }
                Effect::ReportError { message, locked } => {
                    self.set_status(message.clone(), true);
                    self.alert = Some(Alert { message, locked });
                }
                Effect::BatchComplete => {
                    let progress = self.session.progress();
                    log::info!(
                        "Batch complete: {} done, {} skipped, {} error(s)",
                        progress.done,
                        progress.skipped,
                        progress.errors
                    );
                    self.show_summary = true;
                }
            }
        }
    }

    fn handle_update(&mut self, ctx: &egui::Context, update: PdfUpdate) {
        match update {
            PdfUpdate::BatchCollected { paths } => {
                self.set_status(format!("{} PDF file(s) loaded", paths.len()), false);
                self.show_summary = false;
                self.dispatch(Intent::BatchLoaded(paths));
            }
            PdfUpdate::PreviewRendered {
                request,
                page_w_pt,
                page_h_pt,
                width,
                height,
                rgba_data,
                ..
            } => {
                if request != self.preview_request {
                    return;
                }
                let image = egui::ColorImage::from_rgba_unmultiplied([width, height], &rgba_data);
                self.canvas.set_page(ctx, image);
                self.dispatch(Intent::DocumentOpened {
                    page_w_pt,
                    page_h_pt,
                });
            }
            PdfUpdate::PreviewUnavailable {
                request,
                page_w_pt,
                page_h_pt,
                reason,
                ..
            } => {
                if request != self.preview_request {
                    return;
                }
                self.canvas.set_unavailable(reason);
                self.dispatch(Intent::DocumentOpened {
                    page_w_pt,
                    page_h_pt,
                });
            }
            PdfUpdate::PreviewFailed {
                request, message, ..
            } => {
                if request != self.preview_request {
                    return;
                }
                self.canvas.set_unavailable(message.clone());
                self.dispatch(Intent::DocumentFailed { message });
            }
            PdfUpdate::Applied { index, outcome } => {
                if let pdf_header::ApplyOutcome::Done { output } = &outcome {
                    self.set_status(format!("✓ {}", output.display()), false);
                }
                self.dispatch(Intent::ApplyFinished { index, outcome });
            }
            PdfUpdate::ConfigSaved { path } => {
                log::debug!("Settings written to {}", path.display());
            }
            PdfUpdate::Error { message } => {
                self.canvas.loading = false;
                self.set_status(message, true);
            }
        }
        ctx.request_repaint();
    }

    fn pick_files(&mut self) {
        if let Some(paths) = rfd::FileDialog::new()
            .add_filter("PDF", &["pdf", "PDF"])
            .pick_files()
        {
            self.send(PdfCommand::CollectBatch { paths });
        }
    }

    fn pick_folder(&mut self) {
        if let Some(folder) = rfd::FileDialog::new().pick_folder() {
            self.send(PdfCommand::CollectBatch {
                paths: vec![folder],
            });
        }
    }

    fn show_top_bar(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            ui.strong("PDF HEADER");
            ui.separator();
            if ui.button("📄 Open files…").clicked() {
                self.pick_files();
            }
            if ui.button("📁 Open folder…").clicked() {
                self.pick_folder();
            }
            ui.separator();
            if let Some(entry) = self.session.queue().current() {
                ui.label(entry.file_name());
                ui.label(
                    egui::RichText::new(self.session.progress().label())
                        .weak()
                        .monospace(),
                );
            }
        });
    }

    fn show_action_bar(&mut self, ui: &mut egui::Ui, intents: &mut Vec<Intent>) {
        ui.horizontal(|ui| {
            let ready = !self.session.is_complete()
                && !self.session.is_applying()
                && self.session.queue().current().is_some()
                && self.session.page_size().is_some();

            if ui
                .add_enabled(ready, egui::Button::new("✓  Apply"))
                .on_hover_text("Stamp this file and move to the next one")
                .clicked()
            {
                intents.push(Intent::ApplyRequested);
            }
            if ui
                .add_enabled(
                    !self.session.is_complete() && !self.session.is_applying(),
                    egui::Button::new("→  Skip"),
                )
                .clicked()
            {
                intents.push(Intent::SkipRequested);
            }

            if self.session.is_applying() {
                ui.spinner();
            }
            ui.separator();

            match &self.status {
                Some(status) if status.is_error => {
                    ui.colored_label(ui.visuals().error_fg_color, status.text.as_str());
                }
                Some(status) => {
                    ui.label(status.text.as_str());
                }
                None => {
                    ui.weak("Click on the page to place the header");
                }
            }
        });
    }

    fn show_windows(&mut self, ctx: &egui::Context) {
        let alert = self.alert.as_ref().map(|a| (a.message.clone(), a.locked));
        if let Some((message, locked)) = alert {
            let title = if locked { "File in use" } else { "Error" };
            let mut open = true;
            egui::Window::new(title)
                .id(egui::Id::new("error_alert"))
                .collapsible(false)
                .resizable(false)
                .open(&mut open)
                .anchor(egui::Align2::CENTER_CENTER, egui::Vec2::ZERO)
                .show(ctx, |ui| {
                    ui.label(message.as_str());
                    ui.add_space(4.0);
                    if ui.button("OK").clicked() {
                        self.alert = None;
                    }
                });
            if !open {
                self.alert = None;
            }
        }

        if self.show_summary {
            let progress = self.session.progress();
            let mut open = true;
            egui::Window::new("Batch complete")
                .collapsible(false)
                .resizable(false)
                .open(&mut open)
                .anchor(egui::Align2::CENTER_CENTER, egui::Vec2::ZERO)
                .show(ctx, |ui| {
                    ui.label(format!("{} file(s) stamped", progress.done));
                    ui.label(format!("{} skipped", progress.skipped));
                    if progress.errors > 0 {
                        ui.colored_label(
                            ui.visuals().error_fg_color,
                            format!("{} failed", progress.errors),
                        );
                    }
                    ui.add_space(6.0);
                    if ui.button("Close").clicked() {
                        self.show_summary = false;
                    }
                });
            if !open {
                self.show_summary = false;
            }
        }
    }
}

impl eframe::App for PdfHeaderApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Dropped files and folders start a new batch
        let dropped: Vec<PathBuf> = ctx.input(|i| {
            i.raw
                .dropped_files
                .iter()
                .filter_map(|file| file.path.clone())
                .collect()
        });
        if !dropped.is_empty() {
            self.send(PdfCommand::CollectBatch { paths: dropped });
        }

        while let Ok(update) = self.channels.updates.try_recv() {
            self.handle_update(ctx, update);
        }

        let mut intents = Vec::new();

        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            self.show_top_bar(ui);
        });

        egui::TopBottomPanel::bottom("action_bar").show(ctx, |ui| {
            ui.add_space(4.0);
            self.show_action_bar(ui, &mut intents);
            ui.add_space(4.0);
        });

        egui::SidePanel::left("settings")
            .min_width(300.0)
            .show(ctx, |ui| {
                show_sidebar(ui, &self.session, &self.dates, self.canvas.hover, &mut intents);
            });

        egui::SidePanel::right("queue")
            .min_width(220.0)
            .show(ctx, |ui| {
                show_queue_panel(ui, &self.session, &mut intents);
                ui.separator();
                show_log_panel(ui, &self.logger);
            });

        egui::CentralPanel::default().show(ctx, |ui| {
            show_canvas(ui, &self.session, &mut self.canvas, &self.dates, &mut intents);
        });

        self.show_windows(ctx);

        for intent in intents {
            self.dispatch(intent);
        }

        if self.session.is_applying() || self.canvas.loading {
            ctx.request_repaint_after(BUSY_POLL_INTERVAL);
        } else {
            ctx.request_repaint_after(IDLE_POLL_INTERVAL);
        }
    }
}
