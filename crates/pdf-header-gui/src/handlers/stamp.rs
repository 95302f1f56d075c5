use pdf_header::{ApplyJob, ApplyOutcome, DateInputs, HeaderConfig, stamp_file};
use pdf_header_runtime::PdfUpdate;
use std::path::PathBuf;
use tokio::sync::mpsc;

pub async fn handle_apply(job: ApplyJob, update_tx: &mpsc::UnboundedSender<PdfUpdate>) {
    let dates = DateInputs::for_file(&job.path);
    let result = stamp_file(&job.path, &job.config, &job.position, &dates).await;
    if let Err(e) = &result {
        log::error!("Failed to stamp {}: {}", job.path.display(), e);
    }

    let _ = update_tx.send(PdfUpdate::Applied {
        index: job.index,
        outcome: ApplyOutcome::from_result(&result, |stamped| stamped.output.clone()),
    });
}

/// Best effort: a failed save is logged and otherwise ignored
pub async fn handle_save_config(
    config: HeaderConfig,
    path: PathBuf,
    update_tx: &mpsc::UnboundedSender<PdfUpdate>,
) {
    match config.save(&path).await {
        Ok(()) => {
            let _ = update_tx.send(PdfUpdate::ConfigSaved { path });
        }
        Err(e) => log::warn!("Could not save configuration to {}: {}", path.display(), e),
    }
}
