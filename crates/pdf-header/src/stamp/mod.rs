//! Writing the header into PDF files

mod content;
mod fonts;
mod io;
mod resources;

pub use content::{Fill, HeaderDrawing, Outline, ResourceNames};
pub use fonts::{
    BuiltinFamily, ResolvedFont, encode_win_ansi, resolve_font, win_ansi_char, win_ansi_code,
};
pub use io::{finish_document, load_pdf, map_write_error, output_dir, output_path, save_pdf};
pub use resources::{PageBox, page_box};

use crate::compose::{DateInputs, compose, filename_stem};
use crate::config::HeaderConfig;
use crate::position::{Position, pdf_point_from_ratio};
use crate::types::*;
use lopdf::{Dictionary, Document, Object, ObjectId, Stream, dictionary};
use resources::{ResourceEditor, wrap_and_append};
use std::path::{Path, PathBuf};

/// Result of stamping one file
#[derive(Debug, Clone, PartialEq)]
pub struct StampOutcome {
    pub output: PathBuf,
    pub text: String,
    pub pages_stamped: usize,
}

/// Stamp `text` on the document in place and return the number of pages touched.
///
/// Only the first page is stamped unless `all_pages` is set. Blank text leaves
/// the document unchanged.
pub fn stamp_document(
    doc: &mut Document,
    text: &str,
    config: &HeaderConfig,
    position: &Position,
    font: &ResolvedFont,
) -> Result<usize> {
    let pages: Vec<ObjectId> = doc.get_pages().into_values().collect();
    if pages.is_empty() {
        return Err(HeaderError::NoPages);
    }
    if text.trim().is_empty() {
        log::warn!("Header text is empty, nothing to stamp");
        return Ok(0);
    }

    let targets = if config.all_pages {
        &pages[..]
    } else {
        &pages[..1]
    };

    // Shared by every stamped page
    let font_id = font.add_to_document(doc);
    let prologue_id = doc.add_object(Stream::new(Dictionary::new(), b"q\n".to_vec()));
    let background_state = config.use_bg.then(|| {
        doc.add_object(dictionary! {
            "Type" => "ExtGState",
            "ca" => config.bg_opacity,
        })
    });
    let frame_state = config.use_frame.then(|| {
        doc.add_object(dictionary! {
            "Type" => "ExtGState",
            "CA" => config.frame_opacity,
        })
    });

    for &page_id in targets {
        let page = page_box(doc, page_id);
        let ratio = position.resolve(page.width, page.height);
        let (x, y) = pdf_point_from_ratio(ratio.x, ratio.y, page.width, page.height);
        let drawing = HeaderDrawing::layout(
            config,
            text,
            font,
            (page.x0 + x, page.y0 + y),
            (page.width, page.height),
        );

        let mut editor = ResourceEditor::open(doc, page_id)?;
        let font_name = editor.add("Font", "FHdr", Object::Reference(font_id))?;
        let background_name = match background_state {
            Some(id) => editor.add("ExtGState", "GSHdrBg", Object::Reference(id))?,
            None => String::new(),
        };
        let frame_name = match frame_state {
            Some(id) => editor.add("ExtGState", "GSHdrFr", Object::Reference(id))?,
            None => String::new(),
        };
        editor.commit()?;

        let names = ResourceNames {
            font: font_name,
            background_state: background_name,
            frame_state: frame_name,
        };
        wrap_and_append(doc, page_id, prologue_id, &drawing.operations(&names))?;
    }

    Ok(targets.len())
}

/// Stamp one input file and write it to its output directory
pub async fn stamp_file(
    input: impl AsRef<Path>,
    config: &HeaderConfig,
    position: &Position,
    dates: &DateInputs,
) -> Result<StampOutcome> {
    let input = input.as_ref();
    let output = output_path(input)?;
    let text = compose(config, &filename_stem(input), dates);
    log::debug!("Stamping '{}' on {}", text, input.display());

    let mut doc = load_pdf(input).await?;
    let config = config.clone();
    let position = *position;
    let header = text.clone();
    let (doc, pages_stamped) = tokio::task::spawn_blocking(move || {
        let font = resolve_font(&config)?;
        let count = stamp_document(&mut doc, &header, &config, &position, &font)?;
        Ok::<_, HeaderError>((doc, count))
    })
    .await??;

    if let Some(dir) = output.parent() {
        tokio::fs::create_dir_all(dir).await?;
    }
    save_pdf(doc, &output).await?;
    log::info!(
        "Stamped {} page(s): {} -> {}",
        pages_stamped,
        input.display(),
        output.display()
    );

    Ok(StampOutcome {
        output,
        text,
        pages_stamped,
    })
}
