pub mod batch;
mod compose;
mod config;
pub mod constants;
pub mod controller;
pub mod overlay;
pub mod position;
mod queue;
pub mod stamp;
mod types;
pub mod units;

pub use batch::{collect_pdfs, is_pdf};
pub use compose::{DateInputs, compose, filename_stem, format_date};
pub use config::*;
pub use controller::{ApplyJob, ApplyOutcome, Effect, HeaderSession, Intent, TextField, Toggle};
pub use position::{PageGeometry, Position, Preset, Ratio};
pub use queue::{FileQueue, FileQueueEntry, QueueProgress};
pub use stamp::{StampOutcome, load_pdf, output_path, stamp_document, stamp_file};
pub use types::*;
