use std::path::PathBuf;
use thiserror::Error;
use tokio::sync::mpsc;

// Re-export types from the library crate
pub use pdf_header::{ApplyJob, ApplyOutcome, HeaderConfig};

/// Commands sent from UI to worker
#[derive(Debug)]
pub enum PdfCommand {
    /// Expand picked files and folders into a batch
    CollectBatch {
        paths: Vec<PathBuf>,
    },
    /// Render the first page of a document for the canvas
    LoadPreview {
        request: RequestId,
        path: PathBuf,
    },
    Apply {
        job: ApplyJob,
    },
    SaveConfig {
        config: HeaderConfig,
        path: PathBuf,
    },
}

/// Updates sent from worker to UI
#[derive(Debug, Clone)]
pub enum PdfUpdate {
    BatchCollected {
        paths: Vec<PathBuf>,
    },
    PreviewRendered {
        request: RequestId,
        path: PathBuf,
        page_w_pt: f32,
        page_h_pt: f32,
        width: usize,
        height: usize,
        rgba_data: Vec<u8>,
    },
    /// Page size is known but the page could not be rasterized
    PreviewUnavailable {
        request: RequestId,
        path: PathBuf,
        page_w_pt: f32,
        page_h_pt: f32,
        reason: String,
    },
    /// The document could not be read at all
    PreviewFailed {
        request: RequestId,
        path: PathBuf,
        message: String,
    },
    Applied {
        index: usize,
        outcome: ApplyOutcome,
    },
    ConfigSaved {
        path: PathBuf,
    },
    Error {
        message: String,
    },
}

/// Tags a preview request so stale renders can be dropped
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct RequestId(pub u64);

impl RequestId {
    pub fn next(self) -> Self {
        RequestId(self.0.wrapping_add(1))
    }
}

#[derive(Error, Debug)]
pub enum ChannelError {
    #[error("Worker has stopped")]
    WorkerStopped,
}

/// UI side of the worker channels
pub struct WorkerChannels {
    pub commands: mpsc::UnboundedSender<PdfCommand>,
    pub updates: mpsc::UnboundedReceiver<PdfUpdate>,
}

impl WorkerChannels {
    pub fn send(&self, command: PdfCommand) -> Result<(), ChannelError> {
        self.commands
            .send(command)
            .map_err(|_| ChannelError::WorkerStopped)
    }
}

/// Create both ends: the UI keeps `WorkerChannels`, the worker the rest
pub fn channels() -> (
    WorkerChannels,
    mpsc::UnboundedReceiver<PdfCommand>,
    mpsc::UnboundedSender<PdfUpdate>,
) {
    let (command_tx, command_rx) = mpsc::unbounded_channel();
    let (update_tx, update_rx) = mpsc::unbounded_channel();
    (
        WorkerChannels {
            commands: command_tx,
            updates: update_rx,
        },
        command_rx,
        update_tx,
    )
}
