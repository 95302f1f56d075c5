use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use pdf_header::position::pdf_point_from_ratio;
use pdf_header::stamp::{PageBox, page_box};
use pdf_header::{
    ApplyOutcome, DateInputs, DateSource, Effect, HeaderConfig, HeaderSession, Intent, Preset,
    Rotation, compose, default_config_path, filename_stem, load_pdf, stamp_file,
};
use std::collections::VecDeque;
use std::path::{Path, PathBuf};

mod logger;

#[derive(Parser)]
#[command(name = "pdfh", about = "Stamp a header on batches of PDF files", version)]
struct Cli {
    /// Configuration file (defaults to PDF_HEADER_CONFIG, then beside the executable)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log progress details to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Stamp every PDF in the given files and folders
    Stamp {
        /// PDF files and/or folders holding PDF files
        #[arg(required = true, num_args = 1..)]
        paths: Vec<PathBuf>,

        #[command(flatten)]
        header: HeaderArgs,

        /// Write the effective settings back to the configuration file
        #[arg(long)]
        save_config: bool,
    },

    /// Show what would be stamped on a file, without writing anything
    Preview {
        path: PathBuf,

        #[command(flatten)]
        header: HeaderArgs,
    },

    /// Print the configuration file location and its effective content
    Config {
        /// Overwrite the file with the defaults
        #[arg(long)]
        reset: bool,
    },
}

/// Overrides applied on top of the saved configuration
#[derive(Args)]
struct HeaderArgs {
    /// Text placed before the file name
    #[arg(long)]
    prefix: Option<String>,

    /// Text placed after the file name
    #[arg(long)]
    suffix: Option<String>,

    /// Use this text instead of the file name
    #[arg(long)]
    custom: Option<String>,

    /// Leave the file name out of the header
    #[arg(long)]
    no_filename: bool,

    /// Add a date to the header
    #[arg(long)]
    date: bool,

    /// strftime pattern for the date, e.g. %Y-%m-%d
    #[arg(long)]
    date_format: Option<String>,

    /// Which timestamp the date shows
    #[arg(long, value_enum)]
    date_source: Option<DateSourceArg>,

    /// Snap the header to a page position
    #[arg(long, value_enum, conflicts_with = "at")]
    preset: Option<PresetArg>,

    /// Place the header center at RX,RY (fractions of the page, from the top left)
    #[arg(long, value_parser = parse_ratio_pair)]
    at: Option<(f32, f32)>,

    /// Horizontal distance from the page edge for presets, in points
    #[arg(long)]
    margin_x: Option<f32>,

    /// Vertical distance from the page edge for presets, in points
    #[arg(long)]
    margin_y: Option<f32>,

    /// Font family: Helvetica, Times, Courier or an installed font
    #[arg(long)]
    font: Option<String>,

    /// TrueType/OpenType file to embed
    #[arg(long)]
    font_file: Option<PathBuf>,

    /// Font size in points
    #[arg(long)]
    size: Option<f32>,

    /// Text color as #rrggbb
    #[arg(long)]
    color: Option<String>,

    #[arg(long)]
    bold: bool,

    #[arg(long)]
    italic: bool,

    #[arg(long)]
    underline: bool,

    /// Counter-clockwise rotation: 0, 90, 180 or 270
    #[arg(long, value_parser = parse_rotation)]
    rotation: Option<Rotation>,

    /// Draw a frame around the header
    #[arg(long)]
    frame: bool,

    /// Draw a background box behind the header
    #[arg(long)]
    background: bool,

    /// Stamp only the first page of each file
    #[arg(long, conflicts_with = "all_pages")]
    first_page_only: bool,

    /// Stamp every page of each file
    #[arg(long)]
    all_pages: bool,
}

#[derive(Clone, Copy, ValueEnum)]
enum DateSourceArg {
    Today,
    FileModified,
}

#[derive(Clone, Copy, ValueEnum)]
enum PresetArg {
    TopLeft,
    TopCenter,
    TopRight,
    MiddleLeft,
    Center,
    MiddleRight,
    BottomLeft,
    BottomCenter,
    BottomRight,
}

impl From<DateSourceArg> for DateSource {
    fn from(arg: DateSourceArg) -> Self {
        match arg {
            DateSourceArg::Today => Self::Today,
            DateSourceArg::FileModified => Self::FileModified,
        }
    }
}

impl From<PresetArg> for Preset {
    fn from(arg: PresetArg) -> Self {
        match arg {
            PresetArg::TopLeft => Self::TopLeft,
            PresetArg::TopCenter => Self::TopCenter,
            PresetArg::TopRight => Self::TopRight,
            PresetArg::MiddleLeft => Self::MiddleLeft,
            PresetArg::Center => Self::Center,
            PresetArg::MiddleRight => Self::MiddleRight,
            PresetArg::BottomLeft => Self::BottomLeft,
            PresetArg::BottomCenter => Self::BottomCenter,
            PresetArg::BottomRight => Self::BottomRight,
        }
    }
}

fn parse_ratio_pair(value: &str) -> std::result::Result<(f32, f32), String> {
    let (x, y) = value
        .split_once(',')
        .ok_or_else(|| format!("expected RX,RY, got '{}'", value))?;
    let parse = |part: &str| {
        part.trim()
            .parse::<f32>()
            .ok()
            .filter(|v| (0.0..=1.0).contains(v))
            .ok_or_else(|| format!("'{}' is not a ratio between 0 and 1", part.trim()))
    };
    Ok((parse(x)?, parse(y)?))
}

fn parse_rotation(value: &str) -> std::result::Result<Rotation, String> {
    let degrees: u16 = value
        .parse()
        .map_err(|_| format!("'{}' is not a number of degrees", value))?;
    Rotation::try_from(degrees)
}

impl HeaderArgs {
    /// Apply the given options to `config`; absent options keep the saved values
    fn apply_to(&self, config: &mut HeaderConfig) {
        if let Some(prefix) = &self.prefix {
            config.use_prefix = true;
            config.prefix_text = prefix.clone();
        }
        if let Some(suffix) = &self.suffix {
            config.use_suffix = true;
            config.suffix_text = suffix.clone();
        }
        if let Some(custom) = &self.custom {
            config.use_custom = true;
            config.use_filename = false;
            config.custom_text = custom.clone();
        }
        if self.no_filename {
            config.use_filename = false;
        }
        if self.date {
            config.use_date = true;
        }
        if let Some(format) = &self.date_format {
            config.date_format = format.clone();
        }
        if let Some(source) = self.date_source {
            config.date_source = source.into();
        }

        if let Some(x) = self.margin_x {
            config.margin_x_pt = x;
        }
        if let Some(y) = self.margin_y {
            config.margin_y_pt = y;
        }
        if let Some(preset) = self.preset {
            config.preset_position = Preset::from(preset).key().to_string();
        }
        if let Some((rx, ry)) = self.at {
            config.preset_position = "custom".to_string();
            config.last_x_ratio = rx;
            config.last_y_ratio = ry;
        }

        if let Some(font) = &self.font {
            config.font_family = font.clone();
            config.font_file = None;
        }
        if let Some(file) = &self.font_file {
            config.font_file = Some(file.clone());
        }
        if let Some(size) = self.size {
            config.font_size = size;
        }
        if let Some(color) = &self.color {
            config.color_hex = color.clone();
        }
        config.bold |= self.bold;
        config.italic |= self.italic;
        config.underline |= self.underline;
        if let Some(rotation) = self.rotation {
            config.rotation = rotation;
        }
        config.use_frame |= self.frame;
        config.use_bg |= self.background;

        if self.first_page_only {
            config.all_pages = false;
        } else if self.all_pages {
            config.all_pages = true;
        }

        config.normalize();
    }
}

async fn load_config(path: &Path, header: &HeaderArgs) -> HeaderConfig {
    let mut config = HeaderConfig::load_or_default(path).await;
    header.apply_to(&mut config);
    config
}

/// Visible box of the first page, as the stamper measures it
async fn first_page_box(path: &Path) -> Result<PageBox> {
    let doc = load_pdf(path).await?;
    let page_id = doc
        .get_pages()
        .values()
        .next()
        .copied()
        .context("document has no pages")?;
    Ok(page_box(&doc, page_id))
}

/// Walk the batch the way the desktop app does: open, apply, next
async fn run_stamp(
    config: HeaderConfig,
    paths: &[PathBuf],
    config_path: &Path,
    save: bool,
) -> Result<()> {
    let batch = pdf_header::collect_pdfs(paths).await?;
    if batch.is_empty() {
        anyhow::bail!("No PDF file found");
    }
    let mut session = HeaderSession::new(config);
    let mut pending: VecDeque<Effect> = session.dispatch(Intent::BatchLoaded(batch)).into();

    while let Some(effect) = pending.pop_front() {
        match effect {
            Effect::OpenDocument(path) => {
                match first_page_box(&path).await {
                    Ok(visible) => {
                        session.dispatch(Intent::DocumentOpened {
                            page_w_pt: visible.width,
                            page_h_pt: visible.height,
                        });
                        pending.extend(session.dispatch(Intent::ApplyRequested));
                    }
                    Err(e) => {
                        let message = format!("cannot open: {:#}", e);
                        pending.extend(session.dispatch(Intent::DocumentFailed { message }));
                    }
                }
            }
            Effect::Apply(job) => {
                let dates = DateInputs::for_file(&job.path);
                let result = stamp_file(&job.path, &job.config, &job.position, &dates).await;
                if let Ok(stamped) = &result {
                    if stamped.pages_stamped == 0 {
                        println!("- {} (empty header, copied as is)", stamped.output.display());
                    } else {
                        println!("✓ {}", stamped.output.display());
                    }
                }
                let outcome = ApplyOutcome::from_result(&result, |s| s.output.clone());
                pending.extend(session.dispatch(Intent::ApplyFinished {
                    index: job.index,
                    outcome,
                }));
            }
            Effect::PersistConfig(config) => {
                if save {
                    if let Err(e) = config.save(config_path).await {
                        log::warn!("Could not save configuration: {}", e);
                    }
                }
            }
            Effect::ReportError { message, .. } => {
                match session.queue().current() {
                    Some(entry) => eprintln!("✗ {}: {}", entry.path.display(), message),
                    None => eprintln!("✗ {}", message),
                }
                // Leave the failed entry marked and carry on with the batch
                pending.extend(session.dispatch(Intent::SkipRequested));
            }
            Effect::BatchComplete => {}
        }
    }

    let progress = session.progress();
    println!(
        "{} stamped, {} skipped, {} failed",
        progress.done, progress.skipped, progress.errors
    );
    if progress.errors > 0 {
        anyhow::bail!("{} file(s) could not be stamped", progress.errors);
    }
    Ok(())
}

async fn run_preview(config: HeaderConfig, path: &Path) -> Result<()> {
    let visible = first_page_box(path).await?;

    let text = compose(&config, &filename_stem(path), &DateInputs::for_file(path));
    let ratio = config.position().resolve(visible.width, visible.height);
    let (x, y) = pdf_point_from_ratio(ratio.x, ratio.y, visible.width, visible.height);

    println!("File:     {}", path.display());
    println!("Output:   {}", pdf_header::output_path(path)?.display());
    println!("Header:   {:?}", text);
    println!("Page:     {:.2} x {:.2} pt", visible.width, visible.height);
    println!("Position: {} ({:.4}, {:.4})", config.position().key(), ratio.x, ratio.y);
    println!("Anchor:   {:.2}, {:.2} pt", visible.x0 + x, visible.y0 + y);
    println!(
        "Pages:    {}",
        if config.all_pages { "all" } else { "first only" }
    );
    Ok(())
}

async fn run_config(config_path: &Path, reset: bool) -> Result<()> {
    let config = if reset {
        let config = HeaderConfig::default();
        config.save(config_path).await?;
        println!("Configuration reset");
        config
    } else {
        HeaderConfig::load_or_default(config_path).await
    };
    println!("{}", config_path.display());
    println!("{}", config.to_json_string()?);
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    if let Err(e) = logger::ConsoleLogger::init(cli.verbose) {
        eprintln!("Logger already installed: {}", e);
    }

    let config_path = cli.config.unwrap_or_else(default_config_path);
    log::debug!("Using configuration {}", config_path.display());

    match cli.command {
        Commands::Stamp {
            paths,
            header,
            save_config,
        } => {
            let config = load_config(&config_path, &header).await;
            run_stamp(config, &paths, &config_path, save_config).await?;
        }
        Commands::Preview { path, header } => {
            let config = load_config(&config_path, &header).await;
            run_preview(config, &path).await?;
        }
        Commands::Config { reset } => {
            run_config(&config_path, reset).await?;
        }
    }

    Ok(())
}
