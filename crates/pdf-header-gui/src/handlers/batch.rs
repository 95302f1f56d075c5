use pdf_header::collect_pdfs;
use pdf_header_runtime::PdfUpdate;
use std::path::PathBuf;
use tokio::sync::mpsc;

pub async fn handle_collect(paths: Vec<PathBuf>, update_tx: &mpsc::UnboundedSender<PdfUpdate>) {
    match collect_pdfs(&paths).await {
        Ok(paths) => {
            log::info!("Collected {} PDF file(s)", paths.len());
            let _ = update_tx.send(PdfUpdate::BatchCollected { paths });
        }
        Err(e) => {
            let _ = update_tx.send(PdfUpdate::Error {
                message: format!("Failed to read the selection: {}", e),
            });
        }
    }
}
