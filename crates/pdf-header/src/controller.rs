//! Session state and the reducer that owns every mutation of it
//!
//! Front ends translate user input into [`Intent`]s and carry out the returned
//! [`Effect`]s (opening files, stamping, saving the config). Nothing in here
//! touches the filesystem.

use crate::compose::{DateInputs, compose, filename_stem};
use crate::config::HeaderConfig;
use crate::overlay::{CanvasPoint, OverlayScene, build_scene};
use crate::position::{
    PageGeometry, Position, Preset, Ratio, pdf_point_from_ratio, ratio_from_canvas,
};
use crate::queue::{FileQueue, QueueProgress};
use crate::types::*;
use std::path::PathBuf;

/// Editable text inputs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextField {
    Prefix,
    Suffix,
    Custom,
    DateFormat,
    FontFamily,
}

/// Boolean options
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Toggle {
    Filename,
    Prefix,
    Suffix,
    Custom,
    Date,
    Bold,
    Italic,
    Underline,
    Frame,
    Background,
    AllPages,
}

/// Everything a stamping worker needs for one file
#[derive(Debug, Clone, PartialEq)]
pub struct ApplyJob {
    pub index: usize,
    pub path: PathBuf,
    pub config: HeaderConfig,
    pub position: Position,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ApplyOutcome {
    Done { output: PathBuf },
    Failed { message: String, locked: bool },
}

impl ApplyOutcome {
    pub fn from_result<T>(result: &Result<T>, output: impl FnOnce(&T) -> PathBuf) -> Self {
        match result {
            Ok(value) => ApplyOutcome::Done {
                output: output(value),
            },
            Err(e) => ApplyOutcome::Failed {
                message: e.to_string(),
                locked: e.is_locked(),
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Intent {
    BatchLoaded(Vec<PathBuf>),
    DocumentOpened { page_w_pt: f32, page_h_pt: f32 },
    /// The current file could not be read
    DocumentFailed { message: String },
    CanvasResized { width: f32, height: f32 },
    PositionClicked { cx: f32, cy: f32 },
    PresetSelected(Preset),
    MarginsChanged { x_pt: f32, y_pt: f32 },
    TextChanged { field: TextField, value: String },
    ToggleChanged { toggle: Toggle, enabled: bool },
    FontSizeStepped(i32),
    ConfigEdited(Box<HeaderConfig>),
    JumpTo(usize),
    ApplyRequested,
    ApplyFinished { index: usize, outcome: ApplyOutcome },
    SkipRequested,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    /// Load and preview this file
    OpenDocument(PathBuf),
    /// Stamp a file; answer with `Intent::ApplyFinished`
    Apply(ApplyJob),
    PersistConfig(HeaderConfig),
    ReportError { message: String, locked: bool },
    /// No untreated file is left
    BatchComplete,
}

#[derive(Debug, Clone, Default)]
pub struct HeaderSession {
    config: HeaderConfig,
    position: Position,
    queue: FileQueue,
    /// Size of the open document's first page, once known
    page_size: Option<(f32, f32)>,
    canvas: (f32, f32),
    geometry: PageGeometry,
    /// Index of the file being stamped
    pending: Option<usize>,
    complete: bool,
}

impl HeaderSession {
    pub fn new(config: HeaderConfig) -> Self {
        let mut config = config;
        config.normalize();
        if config.use_custom {
            config.use_filename = false;
        }
        Self {
            position: config.position(),
            config,
            ..Default::default()
        }
    }

    pub fn config(&self) -> &HeaderConfig {
        &self.config
    }

    pub fn position(&self) -> &Position {
        &self.position
    }

    pub fn queue(&self) -> &FileQueue {
        &self.queue
    }

    pub fn geometry(&self) -> &PageGeometry {
        &self.geometry
    }

    pub fn page_size(&self) -> Option<(f32, f32)> {
        self.page_size
    }

    pub fn progress(&self) -> QueueProgress {
        self.queue.progress()
    }

    pub fn is_complete(&self) -> bool {
        self.complete
    }

    pub fn is_applying(&self) -> bool {
        self.pending.is_some()
    }

    /// Anchor ratio on the open document (or on the last known page size)
    pub fn current_ratio(&self) -> Ratio {
        match (self.position, self.page_size) {
            (Position::Manual { rx, ry }, _) => Ratio::new(rx, ry),
            (position, Some((w, h))) => position.resolve(w, h),
            (_, None) => Ratio::new(self.config.last_x_ratio, self.config.last_y_ratio),
        }
    }

    /// PDF coordinates under a canvas point, when it lies on the page
    pub fn pdf_point_at(&self, point: CanvasPoint) -> Option<(f32, f32)> {
        let (w, h) = self.page_size?;
        if !self.geometry.contains(point.x, point.y) {
            return None;
        }
        let ratio = ratio_from_canvas(point.x, point.y, &self.geometry);
        Some(pdf_point_from_ratio(ratio.x, ratio.y, w, h))
    }

    /// Header text for the current file, with today's date
    pub fn header_text(&self, dates: &DateInputs) -> String {
        let stem = self
            .queue
            .current_path()
            .map(filename_stem)
            .unwrap_or_default();
        compose(&self.config, &stem, dates)
    }

    /// Preview scene for the current state
    pub fn scene(&self, dates: &DateInputs, hover: Option<CanvasPoint>) -> OverlayScene {
        build_scene(
            &self.config,
            &self.header_text(dates),
            self.current_ratio(),
            &self.geometry,
            hover,
        )
    }

    /// Apply one intent and return the side effects the caller must perform
    pub fn dispatch(&mut self, intent: Intent) -> Vec<Effect> {
        match intent {
            Intent::BatchLoaded(paths) => self.load_batch(paths),
            Intent::DocumentOpened {
                page_w_pt,
                page_h_pt,
            } => {
                self.page_size = Some((page_w_pt, page_h_pt));
                self.refit();
                Vec::new()
            }
            Intent::DocumentFailed { message } => self.fail_document(message),
            Intent::CanvasResized { width, height } => {
                self.canvas = (width, height);
                self.refit();
                Vec::new()
            }
            Intent::PositionClicked { cx, cy } => {
                if self.page_size.is_some() && self.geometry.contains(cx, cy) {
                    let ratio = ratio_from_canvas(cx, cy, &self.geometry);
                    self.set_position(Position::manual(ratio.x, ratio.y));
                }
                Vec::new()
            }
            Intent::PresetSelected(preset) => {
                self.set_position(Position::Preset {
                    preset,
                    margin_x_pt: self.config.margin_x_pt,
                    margin_y_pt: self.config.margin_y_pt,
                });
                Vec::new()
            }
            Intent::MarginsChanged { x_pt, y_pt } => {
                self.config.margin_x_pt = x_pt.max(0.0);
                self.config.margin_y_pt = y_pt.max(0.0);
                if let Position::Preset { preset, .. } = self.position {
                    self.set_position(Position::Preset {
                        preset,
                        margin_x_pt: self.config.margin_x_pt,
                        margin_y_pt: self.config.margin_y_pt,
                    });
                }
                Vec::new()
            }
            Intent::TextChanged { field, value } => {
                let slot = match field {
                    TextField::Prefix => &mut self.config.prefix_text,
                    TextField::Suffix => &mut self.config.suffix_text,
                    TextField::Custom => &mut self.config.custom_text,
                    TextField::DateFormat => &mut self.config.date_format,
                    TextField::FontFamily => &mut self.config.font_family,
                };
                *slot = value;
                Vec::new()
            }
            Intent::ToggleChanged { toggle, enabled } => {
                self.set_toggle(toggle, enabled);
                Vec::new()
            }
            Intent::FontSizeStepped(delta) => {
                self.config.step_font_size(delta);
                Vec::new()
            }
            Intent::ConfigEdited(config) => {
                let mut config = *config;
                config.normalize();
                if config.use_custom && config.use_filename {
                    // Whichever was just switched on wins
                    if self.config.use_custom {
                        config.use_custom = false;
                    } else {
                        config.use_filename = false;
                    }
                }
                self.position = config.position();
                self.config = config;
                Vec::new()
            }
            Intent::JumpTo(index) => match self.queue.jump(index) {
                Ok(()) => self.open_current(),
                Err(e) => vec![Effect::ReportError {
                    message: e.to_string(),
                    locked: false,
                }],
            },
            Intent::ApplyRequested => self.request_apply(),
            Intent::ApplyFinished { index, outcome } => self.finish_apply(index, outcome),
            Intent::SkipRequested => self.skip(),
        }
    }

    fn load_batch(&mut self, paths: Vec<PathBuf>) -> Vec<Effect> {
        log::info!("Loaded batch of {} file(s)", paths.len());
        self.queue = FileQueue::new(paths);
        self.page_size = None;
        self.pending = None;
        self.complete = false;
        self.refit();
        if self.queue.is_empty() {
            return vec![Effect::ReportError {
                message: "No PDF file found".to_string(),
                locked: false,
            }];
        }
        self.open_current()
    }

    fn open_current(&mut self) -> Vec<Effect> {
        match self.queue.current_path() {
            Some(path) => {
                let path = path.to_path_buf();
                self.page_size = None;
                vec![Effect::OpenDocument(path)]
            }
            None => Vec::new(),
        }
    }

    /// Unreadable file: mark it and stay on it until the user moves on
    fn fail_document(&mut self, message: String) -> Vec<Effect> {
        if self.complete || self.pending.is_some() {
            return Vec::new();
        }
        let Some(index) = self.queue.current_index() else {
            return Vec::new();
        };
        self.page_size = None;
        self.refit();
        if let Err(e) = self.queue.mark_error(index, message.clone()) {
            log::warn!("{}", e);
        }
        vec![Effect::ReportError {
            message,
            locked: false,
        }]
    }

    fn refit(&mut self) {
        let (w, h) = self.page_size.unwrap_or((
            crate::constants::MIN_PAGE_DIMENSION,
            crate::constants::MIN_PAGE_DIMENSION,
        ));
        self.geometry = PageGeometry::fit(self.canvas.0, self.canvas.1, w, h);
    }

    fn set_position(&mut self, position: Position) {
        self.position = position;
        let resolved = self.current_ratio();
        self.config.set_position(&position, resolved);
    }

    fn set_toggle(&mut self, toggle: Toggle, enabled: bool) {
        let config = &mut self.config;
        match toggle {
            Toggle::Filename => {
                config.use_filename = enabled;
                if enabled {
                    config.use_custom = false;
                }
            }
            Toggle::Custom => {
                config.use_custom = enabled;
                if enabled {
                    config.use_filename = false;
                }
            }
            Toggle::Prefix => config.use_prefix = enabled,
            Toggle::Suffix => config.use_suffix = enabled,
            Toggle::Date => config.use_date = enabled,
            Toggle::Bold => config.bold = enabled,
            Toggle::Italic => config.italic = enabled,
            Toggle::Underline => config.underline = enabled,
            Toggle::Frame => config.use_frame = enabled,
            Toggle::Background => config.use_bg = enabled,
            Toggle::AllPages => config.all_pages = enabled,
        }
    }

    fn request_apply(&mut self) -> Vec<Effect> {
        if self.complete || self.pending.is_some() {
            log::debug!("Apply ignored (complete: {})", self.complete);
            return Vec::new();
        }
        let Some(index) = self.queue.current_index() else {
            return Vec::new();
        };
        let Some(path) = self.queue.current_path().map(|p| p.to_path_buf()) else {
            return Vec::new();
        };
        if let Err(e) = self.queue.begin_attempt(index) {
            return vec![Effect::ReportError {
                message: e.to_string(),
                locked: false,
            }];
        }
        self.pending = Some(index);
        vec![Effect::Apply(ApplyJob {
            index,
            path,
            config: self.config.clone(),
            position: self.position,
        })]
    }

    fn finish_apply(&mut self, index: usize, outcome: ApplyOutcome) -> Vec<Effect> {
        if self.pending == Some(index) {
            self.pending = None;
        }
        match outcome {
            ApplyOutcome::Done { output } => {
                if let Err(e) = self.queue.mark_done(index, output) {
                    return vec![Effect::ReportError {
                        message: e.to_string(),
                        locked: false,
                    }];
                }
                let (position, ratio) = (self.position, self.current_ratio());
                self.config.set_position(&position, ratio);
                let mut effects = vec![Effect::PersistConfig(self.config.clone())];
                effects.extend(self.advance());
                effects
            }
            ApplyOutcome::Failed { message, locked } => {
                if let Err(e) = self.queue.mark_error(index, message.clone()) {
                    log::warn!("{}", e);
                }
                vec![Effect::ReportError { message, locked }]
            }
        }
    }

    fn skip(&mut self) -> Vec<Effect> {
        if self.complete || self.pending.is_some() {
            return Vec::new();
        }
        let Some(index) = self.queue.current_index() else {
            return Vec::new();
        };
        // Done and errored files are left as they are; skipping just moves on
        if self.queue.state(index) == Some(FileState::Untreated) {
            if let Err(e) = self.queue.mark_skipped(index) {
                log::warn!("{}", e);
            }
        }
        self.advance()
    }

    fn advance(&mut self) -> Vec<Effect> {
        match self.queue.advance() {
            Some(_) => self.open_current(),
            None => {
                log::info!("Batch complete: {:?}", self.queue.progress());
                self.complete = true;
                vec![Effect::BatchComplete]
            }
        }
    }
}
