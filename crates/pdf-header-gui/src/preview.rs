//! First-page rasterization for the preview canvas

use std::path::Path;

#[cfg(feature = "pdf-viewer")]
use pdfium_render::prelude::*;

/// Bitmap bounds of a rendered preview, in pixels
const RENDER_TARGET_WIDTH: i32 = 1200;
const RENDER_MAX_HEIGHT: i32 = 1600;

pub struct RenderedPage {
    pub rgba_data: Vec<u8>,
    pub width: usize,
    pub height: usize,
}

/// Initialize Pdfium, trying the vendored library first, then falling back to system
#[cfg(feature = "pdf-viewer")]
pub fn init_pdfium() -> Result<Pdfium, PdfiumError> {
    let vendor_path = std::env::current_dir().ok().and_then(|mut p| {
        p.push("vendor/pdfium/lib");
        if p.exists() { Some(p) } else { None }
    });

    if let Some(vendor_path) = vendor_path {
        if let Ok(binding) =
            Pdfium::bind_to_library(Pdfium::pdfium_platform_library_name_at_path(&vendor_path))
        {
            return Ok(Pdfium::new(binding));
        }
    }

    Pdfium::bind_to_system_library().map(Pdfium::new)
}

/// Rasterize page 0 of `path`. Blocking.
#[cfg(feature = "pdf-viewer")]
pub fn render_first_page(path: &Path) -> Result<RenderedPage, String> {
    let render = || {
        let pdfium = init_pdfium()?;
        let document = pdfium.load_pdf_from_file(path, None)?;
        let page = document.pages().get(0)?;

        let config = PdfRenderConfig::new()
            .set_target_width(RENDER_TARGET_WIDTH)
            .set_maximum_height(RENDER_MAX_HEIGHT);

        let bitmap = page.render_with_config(&config)?;
        Ok::<_, PdfiumError>(RenderedPage {
            rgba_data: bitmap.as_rgba_bytes().to_vec(),
            width: bitmap.width() as usize,
            height: bitmap.height() as usize,
        })
    };
    render().map_err(|e| e.to_string())
}

#[cfg(not(feature = "pdf-viewer"))]
pub fn render_first_page(_path: &Path) -> Result<RenderedPage, String> {
    Err("page rendering is disabled in this build".to_string())
}
