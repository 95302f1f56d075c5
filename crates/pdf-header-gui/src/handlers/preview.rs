use pdf_header::stamp::page_box;
use pdf_header::{HeaderError, load_pdf};
use pdf_header_runtime::{PdfUpdate, RequestId};
use std::path::{Path, PathBuf};
use tokio::sync::mpsc;

use crate::preview::render_first_page;

/// Size of the first page in points, as the stamper sees it
async fn first_page_size(path: &Path) -> pdf_header::Result<(f32, f32)> {
    let doc = load_pdf(path).await?;
    let page_id = doc
        .get_pages()
        .values()
        .next()
        .copied()
        .ok_or(HeaderError::NoPages)?;
    let visible = page_box(&doc, page_id);
    Ok((visible.width, visible.height))
}

pub async fn handle_load(
    request: RequestId,
    path: PathBuf,
    update_tx: &mpsc::UnboundedSender<PdfUpdate>,
) {
    let (page_w_pt, page_h_pt) = match first_page_size(&path).await {
        Ok(size) => size,
        Err(e) => {
            log::error!("Cannot open {}: {}", path.display(), e);
            let _ = update_tx.send(PdfUpdate::PreviewFailed {
                request,
                message: format!("Cannot open {}: {}", path.display(), e),
                path,
            });
            return;
        }
    };

    let render_path = path.clone();
    let rendered = tokio::task::spawn_blocking(move || render_first_page(&render_path)).await;

    let update = match rendered {
        Ok(Ok(page)) => PdfUpdate::PreviewRendered {
            request,
            path,
            page_w_pt,
            page_h_pt,
            width: page.width,
            height: page.height,
            rgba_data: page.rgba_data,
        },
        Ok(Err(reason)) => {
            log::warn!("Preview of {} unavailable: {}", path.display(), reason);
            PdfUpdate::PreviewUnavailable {
                request,
                path,
                page_w_pt,
                page_h_pt,
                reason,
            }
        }
        Err(e) => PdfUpdate::PreviewUnavailable {
            request,
            path,
            page_w_pt,
            page_h_pt,
            reason: format!("Task join error: {}", e),
        },
    };
    let _ = update_tx.send(update);
}
