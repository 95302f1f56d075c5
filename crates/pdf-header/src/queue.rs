//! Batch of input files and their processing states

use crate::types::*;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq)]
pub struct FileQueueEntry {
    pub path: PathBuf,
    pub state: FileState,
    /// Number of apply attempts on this entry
    pub attempts: u32,
    pub last_error: Option<String>,
    pub output: Option<PathBuf>,
}

impl FileQueueEntry {
    fn new(path: PathBuf) -> Self {
        Self {
            path,
            state: FileState::Untreated,
            attempts: 0,
            last_error: None,
            output: None,
        }
    }

    /// Done, but only after at least one failed attempt
    pub fn recovered(&self) -> bool {
        self.state == FileState::Done && self.attempts > 1
    }

    pub fn file_name(&self) -> String {
        self.path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.path.display().to_string())
    }
}

/// Per-state counts for the progress display
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct QueueProgress {
    pub total: usize,
    pub untreated: usize,
    pub done: usize,
    pub skipped: usize,
    pub errors: usize,
    /// Zero-based index of the current entry
    pub current: usize,
}

impl QueueProgress {
    /// `"3 / 10"`, one-based
    pub fn label(&self) -> String {
        if self.total == 0 {
            "0 / 0".to_string()
        } else {
            format!("{} / {}", self.current + 1, self.total)
        }
    }

    pub fn processed(&self) -> usize {
        self.total - self.untreated
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct FileQueue {
    entries: Vec<FileQueueEntry>,
    current: usize,
}

impl FileQueue {
    /// Start a batch: every path untreated, cursor on the first one
    pub fn new(paths: impl IntoIterator<Item = PathBuf>) -> Self {
        Self {
            entries: paths.into_iter().map(FileQueueEntry::new).collect(),
            current: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[FileQueueEntry] {
        &self.entries
    }

    pub fn get(&self, index: usize) -> Option<&FileQueueEntry> {
        self.entries.get(index)
    }

    pub fn current_index(&self) -> Option<usize> {
        (!self.entries.is_empty()).then_some(self.current)
    }

    pub fn current(&self) -> Option<&FileQueueEntry> {
        self.entries.get(self.current)
    }

    pub fn current_path(&self) -> Option<&Path> {
        self.current().map(|e| e.path.as_path())
    }

    pub fn state(&self, index: usize) -> Option<FileState> {
        self.entries.get(index).map(|e| e.state)
    }

    /// Move to the next untreated entry, scanning forward and wrapping.
    ///
    /// The current entry is checked last. `None` means the batch is complete;
    /// the cursor then stays where it was.
    pub fn advance(&mut self) -> Option<usize> {
        let len = self.entries.len();
        let next = (1..=len)
            .map(|offset| (self.current + offset) % len)
            .find(|&i| self.entries[i].state == FileState::Untreated)?;
        self.current = next;
        Some(next)
    }

    /// Select an entry directly; its state is left as is
    pub fn jump(&mut self, index: usize) -> Result<()> {
        if index >= self.entries.len() {
            return Err(HeaderError::Queue(format!(
                "index {} out of range for {} file(s)",
                index,
                self.entries.len()
            )));
        }
        self.current = index;
        Ok(())
    }

    /// Record the start of an apply attempt
    pub fn begin_attempt(&mut self, index: usize) -> Result<()> {
        let entry = self.entry_mut(index)?;
        entry.attempts += 1;
        Ok(())
    }

    pub fn mark_done(&mut self, index: usize, output: PathBuf) -> Result<()> {
        let entry = self.entry_mut(index)?;
        entry.state = FileState::Done;
        entry.output = Some(output);
        entry.last_error = None;
        Ok(())
    }

    /// Only untreated entries can be skipped
    pub fn mark_skipped(&mut self, index: usize) -> Result<()> {
        let entry = self.entry_mut(index)?;
        if entry.state != FileState::Untreated {
            return Err(HeaderError::Queue(format!(
                "cannot skip {}: already {}",
                entry.file_name(),
                entry.state.label()
            )));
        }
        entry.state = FileState::Skipped;
        Ok(())
    }

    pub fn mark_error(&mut self, index: usize, message: impl Into<String>) -> Result<()> {
        let entry = self.entry_mut(index)?;
        entry.state = FileState::Error;
        entry.last_error = Some(message.into());
        Ok(())
    }

    pub fn is_complete(&self) -> bool {
        !self
            .entries
            .iter()
            .any(|e| e.state == FileState::Untreated)
    }

    pub fn progress(&self) -> QueueProgress {
        let count = |state: FileState| self.entries.iter().filter(|e| e.state == state).count();
        QueueProgress {
            total: self.entries.len(),
            untreated: count(FileState::Untreated),
            done: count(FileState::Done),
            skipped: count(FileState::Skipped),
            errors: count(FileState::Error),
            current: self.current,
        }
    }

    fn entry_mut(&mut self, index: usize) -> Result<&mut FileQueueEntry> {
        let len = self.entries.len();
        self.entries.get_mut(index).ok_or_else(|| {
            HeaderError::Queue(format!("index {} out of range for {} file(s)", index, len))
        })
    }
}
