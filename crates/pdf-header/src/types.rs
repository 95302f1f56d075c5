use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum HeaderError {
    #[error("PDF error: {0}")]
    Pdf(#[from] lopdf::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid configuration: {0}")]
    Config(String),
    #[error("Task join error: {0}")]
    TaskJoin(#[from] tokio::task::JoinError),
    #[error("Document has no pages")]
    NoPages,
    #[error(
        "Cannot write {}: the file is open in another program. Close it and apply again.",
        path.display()
    )]
    OutputLocked { path: PathBuf },
    #[error("Output path {} is the input file", path.display())]
    SameAsInput { path: PathBuf },
    #[error("Font error: {0}")]
    Font(String),
    #[error("Queue error: {0}")]
    Queue(String),
}

impl HeaderError {
    /// Whether the user can fix this by closing another program and retrying
    pub fn is_locked(&self) -> bool {
        matches!(self, HeaderError::OutputLocked { .. })
    }
}

pub type Result<T> = std::result::Result<T, HeaderError>;

/// Where the date goes relative to the rest of the header
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DatePosition {
    Prefix,
    #[default]
    Suffix,
}

/// Which timestamp feeds the date part
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DateSource {
    #[default]
    Today,
    FileModified,
}

/// Stroke pattern of the frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FrameStyle {
    #[default]
    Solid,
    Dashed,
}

/// Header rotation, counter-clockwise around the anchor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "u16", into = "u16")]
pub enum Rotation {
    #[default]
    None,
    Deg90,
    Deg180,
    Deg270,
}

impl Rotation {
    pub fn degrees(self) -> u16 {
        match self {
            Rotation::None => 0,
            Rotation::Deg90 => 90,
            Rotation::Deg180 => 180,
            Rotation::Deg270 => 270,
        }
    }

    /// Exact (cos, sin) pair, avoiding float noise for quarter turns
    pub fn cos_sin(self) -> (f32, f32) {
        match self {
            Rotation::None => (1.0, 0.0),
            Rotation::Deg90 => (0.0, 1.0),
            Rotation::Deg180 => (-1.0, 0.0),
            Rotation::Deg270 => (0.0, -1.0),
        }
    }

    /// Whether the text box's width runs vertically on the page
    pub fn is_vertical(self) -> bool {
        matches!(self, Rotation::Deg90 | Rotation::Deg270)
    }
}

impl TryFrom<u16> for Rotation {
    type Error = String;

    fn try_from(value: u16) -> std::result::Result<Self, Self::Error> {
        match value {
            0 => Ok(Rotation::None),
            90 => Ok(Rotation::Deg90),
            180 => Ok(Rotation::Deg180),
            270 => Ok(Rotation::Deg270),
            other => Err(format!("rotation must be 0, 90, 180 or 270, got {other}")),
        }
    }
}

impl From<Rotation> for u16 {
    fn from(rotation: Rotation) -> Self {
        rotation.degrees()
    }
}

/// Processing state of one file in the batch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum FileState {
    /// `non_traite`
    #[default]
    #[serde(rename = "non_traite")]
    Untreated,
    /// `traite`
    #[serde(rename = "traite")]
    Done,
    /// `passe`
    #[serde(rename = "passe")]
    Skipped,
    /// `erreur`
    #[serde(rename = "erreur")]
    Error,
}

impl FileState {
    pub fn label(self) -> &'static str {
        match self {
            FileState::Untreated => "untreated",
            FileState::Done => "done",
            FileState::Skipped => "skipped",
            FileState::Error => "error",
        }
    }
}
