use pdf_header_runtime::{PdfCommand, PdfUpdate};
use tokio::sync::mpsc;

use crate::handlers;

/// Async worker task that processes PDF commands and sends updates
pub async fn worker_task(
    mut command_rx: mpsc::UnboundedReceiver<PdfCommand>,
    update_tx: mpsc::UnboundedSender<PdfUpdate>,
) {
    while let Some(cmd) = command_rx.recv().await {
        process_command(cmd, &mut command_rx, &update_tx).await;
    }
    log::debug!("Worker stopped: command channel closed");
}

async fn process_command(
    cmd: PdfCommand,
    command_rx: &mut mpsc::UnboundedReceiver<PdfCommand>,
    update_tx: &mpsc::UnboundedSender<PdfUpdate>,
) {
    match cmd {
        PdfCommand::CollectBatch { paths } => {
            handlers::batch::handle_collect(paths, update_tx).await;
        }
        PdfCommand::LoadPreview {
            mut request,
            mut path,
        } => {
            // Only the newest preview matters; older ones would be dropped by the UI anyway
            while let Ok(next_cmd) = command_rx.try_recv() {
                if let PdfCommand::LoadPreview {
                    request: new_request,
                    path: new_path,
                } = next_cmd
                {
                    log::debug!("Discarding queued preview of {}", path.display());
                    request = new_request;
                    path = new_path;
                } else {
                    Box::pin(process_command(next_cmd, command_rx, update_tx)).await;
                }
            }

            handlers::preview::handle_load(request, path, update_tx).await;
        }
        PdfCommand::Apply { job } => {
            handlers::stamp::handle_apply(job, update_tx).await;
        }
        PdfCommand::SaveConfig { config, path } => {
            handlers::stamp::handle_save_config(config, path, update_tx).await;
        }
    }
}
