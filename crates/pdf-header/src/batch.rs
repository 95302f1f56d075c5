//! Collect the PDF files named on the command line or picked in a dialog

use crate::types::*;
use std::path::{Path, PathBuf};

pub fn is_pdf(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("pdf"))
}

/// Expand paths into a batch.
///
/// Directories contribute their immediate `*.pdf` children, sorted by name.
/// Files are kept when they exist and carry a `.pdf` extension. Duplicates
/// are dropped, first occurrence wins.
pub async fn collect_pdfs(paths: &[impl AsRef<Path>]) -> Result<Vec<PathBuf>> {
    let mut batch: Vec<PathBuf> = Vec::new();

    for path in paths {
        let path = path.as_ref();
        let metadata = match tokio::fs::metadata(path).await {
            Ok(m) => m,
            Err(e) => {
                log::warn!("Skipping {}: {}", path.display(), e);
                continue;
            }
        };

        if metadata.is_dir() {
            for child in pdfs_in_dir(path).await? {
                push_unique(&mut batch, child);
            }
        } else if is_pdf(path) {
            push_unique(&mut batch, path.to_path_buf());
        } else {
            log::debug!("Ignoring non-PDF argument {}", path.display());
        }
    }

    Ok(batch)
}

/// Immediate `*.pdf` children of a directory, sorted
pub async fn pdfs_in_dir(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut found = Vec::new();
    let mut entries = tokio::fs::read_dir(dir).await?;
    while let Some(entry) = entries.next_entry().await? {
        let path = entry.path();
        if !is_pdf(&path) {
            continue;
        }
        // Follows symlinks; a dangling link is not a file
        let is_file = tokio::fs::metadata(&path)
            .await
            .map(|meta| meta.is_file())
            .unwrap_or(false);
        if is_file {
            found.push(path);
        }
    }
    found.sort();
    Ok(found)
}

fn push_unique(batch: &mut Vec<PathBuf>, path: PathBuf) {
    if !batch.contains(&path) {
        batch.push(path);
    }
}
