use crate::constants::OUTPUT_DIR_SUFFIX;
use crate::types::*;
use lopdf::Document;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Windows sharing and lock violations
const ERROR_SHARING_VIOLATION: i32 = 32;
const ERROR_LOCK_VIOLATION: i32 = 33;

/// Load a single PDF document
pub async fn load_pdf(path: impl AsRef<Path>) -> Result<Document> {
    let path = path.as_ref().to_owned();
    let bytes = tokio::fs::read(&path).await?;
    let doc = tokio::task::spawn_blocking(move || Document::load_mem(&bytes)).await??;
    Ok(doc)
}

/// Serialize a stamped document after garbage collection and compression
pub fn finish_document(doc: &mut Document) -> Result<Vec<u8>> {
    doc.prune_objects();
    doc.delete_zero_length_streams();
    doc.renumber_objects();
    doc.compress();
    let mut writer = Vec::new();
    doc.save_to(&mut writer)?;
    Ok(writer)
}

/// Save the stamped document
pub async fn save_pdf(mut doc: Document, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref().to_owned();
    let bytes = tokio::task::spawn_blocking(move || finish_document(&mut doc)).await??;
    tokio::fs::write(&path, bytes)
        .await
        .map_err(|e| map_write_error(e, &path))?;
    Ok(())
}

/// Output directory for an input file: `<dir>_avec_entete` next to its directory
pub fn output_dir(input: &Path) -> Result<PathBuf> {
    let absolute = std::path::absolute(input)?;
    let parent = absolute
        .parent()
        .ok_or_else(|| HeaderError::Config(format!("{} has no parent", input.display())))?;
    Ok(match parent.file_name() {
        Some(name) => {
            let mut dir_name = name.to_os_string();
            dir_name.push(OUTPUT_DIR_SUFFIX);
            parent.with_file_name(dir_name)
        }
        // Filesystem root: keep the output inside it
        None => parent.join(OUTPUT_DIR_SUFFIX.trim_start_matches('_')),
    })
}

/// Full output path for an input file; refuses to point at the input itself
pub fn output_path(input: &Path) -> Result<PathBuf> {
    let file_name = input
        .file_name()
        .ok_or_else(|| HeaderError::Config(format!("{} is not a file", input.display())))?;
    let output = output_dir(input)?.join(file_name);
    if output == std::path::absolute(input)? {
        return Err(HeaderError::SameAsInput { path: output });
    }
    Ok(output)
}

/// Permission and sharing failures mean another program holds the file
pub fn map_write_error(error: std::io::Error, path: &Path) -> HeaderError {
    let locked = error.kind() == ErrorKind::PermissionDenied
        || (cfg!(windows)
            && matches!(
                error.raw_os_error(),
                Some(ERROR_SHARING_VIOLATION | ERROR_LOCK_VIOLATION)
            ));
    if locked {
        log::warn!("Output {} is locked: {}", path.display(), error);
        HeaderError::OutputLocked {
            path: path.to_path_buf(),
        }
    } else {
        HeaderError::Io(error)
    }
}
