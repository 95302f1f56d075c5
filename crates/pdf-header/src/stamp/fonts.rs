//! Font resolution, WinAnsi encoding and glyph metrics
//!
//! Headers use either one of the built-in PDF fonts (no embedding, widths from
//! the standard AFM metrics) or a TrueType/OpenType face embedded whole, with a
//! simple font dictionary over WinAnsiEncoding.

use crate::config::HeaderConfig;
use crate::types::*;
use lopdf::{Document, Object, ObjectId, Stream, dictionary};
use std::path::Path;
use std::sync::OnceLock;

/// First and last character codes described by the `/Widths` array
const FIRST_CHAR: u8 = 32;
const LAST_CHAR: u8 = 255;

/// Width used when a glyph has no metrics, in 1/1000 em
const MISSING_WIDTH: u16 = 500;

/// Codes 0x80..0x9F of WinAnsiEncoding that differ from Latin-1
const WIN_ANSI_SPECIALS: [(u8, char); 27] = [
    (0x80, '\u{20AC}'),
    (0x82, '\u{201A}'),
    (0x83, '\u{0192}'),
    (0x84, '\u{201E}'),
    (0x85, '\u{2026}'),
    (0x86, '\u{2020}'),
    (0x87, '\u{2021}'),
    (0x88, '\u{02C6}'),
    (0x89, '\u{2030}'),
    (0x8A, '\u{0160}'),
    (0x8B, '\u{2039}'),
    (0x8C, '\u{0152}'),
    (0x8E, '\u{017D}'),
    (0x91, '\u{2018}'),
    (0x92, '\u{2019}'),
    (0x93, '\u{201C}'),
    (0x94, '\u{201D}'),
    (0x95, '\u{2022}'),
    (0x96, '\u{2013}'),
    (0x97, '\u{2014}'),
    (0x98, '\u{02DC}'),
    (0x99, '\u{2122}'),
    (0x9A, '\u{0161}'),
    (0x9B, '\u{203A}'),
    (0x9C, '\u{0153}'),
    (0x9E, '\u{017E}'),
    (0x9F, '\u{0178}'),
];

/// Helvetica advance widths for codes 32..=126
const HELVETICA_WIDTHS: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278, // 32-47
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 278, 278, 584, 584, 584, 556, // 48-63
    1015, 667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833, 722, 778, // 64-79
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 278, 278, 278, 469, 556, // 80-95
    333, 556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833, 556, 556, // 96-111
    556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500, 334, 260, 334, 584, // 112-126
];

/// Helvetica-Bold advance widths for codes 32..=126
const HELVETICA_BOLD_WIDTHS: [u16; 95] = [
    278, 333, 474, 556, 556, 889, 722, 238, 333, 333, 389, 584, 278, 333, 278, 278, // 32-47
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 333, 333, 584, 584, 584, 611, // 48-63
    975, 722, 722, 722, 722, 667, 611, 778, 722, 278, 556, 722, 611, 833, 722, 778, // 64-79
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 333, 278, 333, 584, 556, // 80-95
    333, 556, 611, 556, 611, 556, 333, 611, 611, 278, 278, 556, 278, 889, 611, 611, // 96-111
    611, 611, 389, 556, 333, 611, 556, 778, 556, 556, 500, 389, 280, 389, 584, // 112-126
];

/// WinAnsi code for a character, if it has one
pub fn win_ansi_code(c: char) -> Option<u8> {
    match c as u32 {
        0x20..=0x7E | 0xA0..=0xFF => Some(c as u8),
        _ => WIN_ANSI_SPECIALS
            .iter()
            .find(|(_, special)| *special == c)
            .map(|(code, _)| *code),
    }
}

/// Character for a WinAnsi code, if the code is assigned
pub fn win_ansi_char(code: u8) -> Option<char> {
    match code {
        0x20..=0x7E | 0xA0..=0xFF => Some(code as char),
        _ => WIN_ANSI_SPECIALS
            .iter()
            .find(|(special, _)| *special == code)
            .map(|(_, c)| *c),
    }
}

/// Encode text for a WinAnsi simple font; unmappable characters become `?`
pub fn encode_win_ansi(text: &str) -> Vec<u8> {
    text.chars()
        .map(|c| win_ansi_code(c).unwrap_or(b'?'))
        .collect()
}

/// The three families every PDF reader provides without embedding
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuiltinFamily {
    Helvetica,
    Times,
    Courier,
}

impl BuiltinFamily {
    /// Match a user-facing family name
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "helvetica" | "helv" | "sans-serif" => Some(BuiltinFamily::Helvetica),
            "times" | "times-roman" | "times roman" | "tiro" | "serif" => {
                Some(BuiltinFamily::Times)
            }
            "courier" | "cour" | "monospace" => Some(BuiltinFamily::Courier),
            _ => None,
        }
    }

    /// PostScript name of the face for the given style
    pub fn base_font(self, bold: bool, italic: bool) -> &'static str {
        match (self, bold, italic) {
            (BuiltinFamily::Helvetica, false, false) => "Helvetica",
            (BuiltinFamily::Helvetica, true, false) => "Helvetica-Bold",
            (BuiltinFamily::Helvetica, false, true) => "Helvetica-Oblique",
            (BuiltinFamily::Helvetica, true, true) => "Helvetica-BoldOblique",
            (BuiltinFamily::Times, false, false) => "Times-Roman",
            (BuiltinFamily::Times, true, false) => "Times-Bold",
            (BuiltinFamily::Times, false, true) => "Times-Italic",
            (BuiltinFamily::Times, true, true) => "Times-BoldItalic",
            (BuiltinFamily::Courier, false, false) => "Courier",
            (BuiltinFamily::Courier, true, false) => "Courier-Bold",
            (BuiltinFamily::Courier, false, true) => "Courier-Oblique",
            (BuiltinFamily::Courier, true, true) => "Courier-BoldOblique",
        }
    }

    fn width(self, bold: bool, code: u8) -> u16 {
        match self {
            BuiltinFamily::Courier => 600,
            // Times has no table here; an average advance is close enough for centering
            BuiltinFamily::Times if code == b' ' => 250,
            BuiltinFamily::Times => 500,
            BuiltinFamily::Helvetica => {
                let table = if bold {
                    &HELVETICA_BOLD_WIDTHS
                } else {
                    &HELVETICA_WIDTHS
                };
                match code {
                    32..=126 => table[(code - 32) as usize],
                    0xA0 => table[0],
                    _ => 556,
                }
            }
        }
    }
}

/// Font program data for an embedded face
#[derive(Debug, Clone)]
struct FontProgram {
    data: Vec<u8>,
    /// CFF outlines go in `/FontFile3`, TrueType outlines in `/FontFile2`
    cff: bool,
    flags: i64,
    bbox: [i64; 4],
    ascent: i64,
    descent: i64,
    cap_height: i64,
    italic_angle: f32,
}

/// A font ready to be drawn and written into a document
#[derive(Debug, Clone)]
pub struct ResolvedFont {
    pub base_font: String,
    /// Widths in 1/1000 em for codes `FIRST_CHAR..=LAST_CHAR`
    widths: Vec<u16>,
    pub synthetic_bold: bool,
    pub synthetic_italic: bool,
    program: Option<FontProgram>,
}

impl ResolvedFont {
    pub fn builtin(family: BuiltinFamily, bold: bool, italic: bool) -> Self {
        let widths = (FIRST_CHAR..=LAST_CHAR)
            .map(|code| family.width(bold, code))
            .collect();
        Self {
            base_font: family.base_font(bold, italic).to_string(),
            widths,
            synthetic_bold: false,
            synthetic_italic: false,
            program: None,
        }
    }

    /// Parse a single-face TrueType/OpenType font for embedding.
    ///
    /// Styles the face lacks are flagged for synthesis.
    pub fn from_font_data(data: Vec<u8>, bold: bool, italic: bool) -> Result<Self> {
        if data.starts_with(b"ttcf") {
            return Err(HeaderError::Font(
                "font collections (.ttc) cannot be embedded".to_string(),
            ));
        }
        let face = ttf_parser::Face::parse(&data, 0)
            .map_err(|e| HeaderError::Font(format!("Failed to parse font: {:?}", e)))?;

        let units_per_em = face.units_per_em().max(1) as f32;
        let to_pdf = |v: f32| (v / units_per_em * 1000.0).round() as i64;

        let widths = (FIRST_CHAR..=LAST_CHAR)
            .map(|code| {
                win_ansi_char(code)
                    .and_then(|c| face.glyph_index(c))
                    .and_then(|glyph| face.glyph_hor_advance(glyph))
                    .map(|advance| to_pdf(advance as f32) as u16)
                    .unwrap_or(MISSING_WIDTH)
            })
            .collect();

        let base_font = face
            .names()
            .into_iter()
            .find(|name| name.name_id == ttf_parser::name_id::POST_SCRIPT_NAME)
            .and_then(|name| name.to_string())
            .map(|name| name.chars().filter(|c| c.is_ascii_graphic()).collect::<String>())
            .filter(|name| !name.is_empty())
            .unwrap_or_else(|| "EmbeddedFont".to_string());

        let bbox = face.global_bounding_box();
        let face_italic = face.is_italic() || face.is_oblique();
        // Nonsymbolic (bit 6), plus italic (bit 7) and fixed pitch (bit 1)
        let mut flags = 1 << 5;
        if face_italic {
            flags |= 1 << 6;
        }
        if face.is_monospaced() {
            flags |= 1;
        }
        let cff = face.tables().cff.is_some();
        let bbox = [
            to_pdf(bbox.x_min as f32),
            to_pdf(bbox.y_min as f32),
            to_pdf(bbox.x_max as f32),
            to_pdf(bbox.y_max as f32),
        ];
        let ascent = to_pdf(face.ascender() as f32);
        let descent = to_pdf(face.descender() as f32);
        let cap_height = to_pdf(face.capital_height().unwrap_or(face.ascender()) as f32);
        let synthetic_bold = bold && !face.is_bold();
        let synthetic_italic = italic && !face_italic;

        Ok(Self {
            base_font,
            widths,
            synthetic_bold,
            synthetic_italic,
            program: Some(FontProgram {
                data,
                cff,
                flags,
                bbox,
                ascent,
                descent,
                cap_height,
                italic_angle: if face_italic { -12.0 } else { 0.0 },
            }),
        })
    }

    pub fn is_embedded(&self) -> bool {
        self.program.is_some()
    }

    /// Advance width of one code, in 1/1000 em
    pub fn code_width(&self, code: u8) -> u16 {
        code.checked_sub(FIRST_CHAR)
            .and_then(|i| self.widths.get(i as usize).copied())
            .unwrap_or(MISSING_WIDTH)
    }

    /// Width of encoded text in points, letter spacing included between glyphs
    pub fn text_width(&self, encoded: &[u8], font_size: f32, letter_spacing: f32) -> f32 {
        if encoded.is_empty() {
            return 0.0;
        }
        let units: u32 = encoded.iter().map(|&c| self.code_width(c) as u32).sum();
        units as f32 / 1000.0 * font_size + (encoded.len() - 1) as f32 * letter_spacing
    }

    /// Write the font dictionary (and program, when embedded) into `doc`
    pub fn add_to_document(&self, doc: &mut Document) -> ObjectId {
        let Some(program) = &self.program else {
            return doc.add_object(dictionary! {
                "Type" => "Font",
                "Subtype" => "Type1",
                "BaseFont" => self.base_font.as_str(),
                "Encoding" => "WinAnsiEncoding",
            });
        };

        let (file_key, file_stream) = if program.cff {
            (
                "FontFile3",
                Stream::new(dictionary! { "Subtype" => "OpenType" }, program.data.clone()),
            )
        } else {
            (
                "FontFile2",
                Stream::new(
                    dictionary! { "Length1" => program.data.len() as i64 },
                    program.data.clone(),
                ),
            )
        };
        let file_id = doc.add_object(file_stream);

        let mut descriptor = dictionary! {
            "Type" => "FontDescriptor",
            "FontName" => self.base_font.as_str(),
            "Flags" => program.flags,
            "FontBBox" => program.bbox.iter().map(|&v| Object::Integer(v)).collect::<Vec<_>>(),
            "ItalicAngle" => program.italic_angle,
            "Ascent" => program.ascent,
            "Descent" => program.descent,
            "CapHeight" => program.cap_height,
            "StemV" => 80_i64,
            "MissingWidth" => MISSING_WIDTH as i64,
        };
        descriptor.set(file_key, Object::Reference(file_id));
        let descriptor_id = doc.add_object(descriptor);

        let widths: Vec<Object> = self
            .widths
            .iter()
            .map(|&w| Object::Integer(w as i64))
            .collect();

        doc.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "TrueType",
            "BaseFont" => self.base_font.as_str(),
            "FirstChar" => FIRST_CHAR as i64,
            "LastChar" => LAST_CHAR as i64,
            "Widths" => widths,
            "FontDescriptor" => descriptor_id,
            "Encoding" => "WinAnsiEncoding",
        })
    }
}

fn system_fonts() -> &'static fontdb::Database {
    static SYSTEM_FONTS: OnceLock<fontdb::Database> = OnceLock::new();
    SYSTEM_FONTS.get_or_init(|| {
        let mut db = fontdb::Database::new();
        db.load_system_fonts();
        log::debug!("Loaded {} system font faces", db.len());
        db
    })
}

/// Find an installed face by family name and load its data
fn find_system_font(family: &str, bold: bool, italic: bool) -> Option<Vec<u8>> {
    let db = system_fonts();
    let query = fontdb::Query {
        families: &[fontdb::Family::Name(family)],
        weight: if bold {
            fontdb::Weight::BOLD
        } else {
            fontdb::Weight::NORMAL
        },
        style: if italic {
            fontdb::Style::Italic
        } else {
            fontdb::Style::Normal
        },
        ..Default::default()
    };
    let id = db.query(&query)?;
    db.with_face_data(id, |data, index| (index == 0).then(|| data.to_vec()))
        .flatten()
}

/// Pick the font for a config.
///
/// Order: explicit font file, built-in family, installed family, Helvetica.
/// An unreadable explicit font file is an error; an unknown family only warns.
pub fn resolve_font(config: &HeaderConfig) -> Result<ResolvedFont> {
    if let Some(path) = config.font_file.as_deref() {
        return load_font_file(path, config.bold, config.italic);
    }

    if let Some(family) = BuiltinFamily::from_name(&config.font_family) {
        return Ok(ResolvedFont::builtin(family, config.bold, config.italic));
    }

    if let Some(data) = find_system_font(&config.font_family, config.bold, config.italic) {
        match ResolvedFont::from_font_data(data, config.bold, config.italic) {
            Ok(font) => {
                log::debug!("Embedding system font {}", font.base_font);
                return Ok(font);
            }
            Err(e) => log::warn!("Cannot use font '{}': {}", config.font_family, e),
        }
    } else {
        log::warn!(
            "Font '{}' not found, falling back to Helvetica",
            config.font_family
        );
    }

    Ok(ResolvedFont::builtin(
        BuiltinFamily::Helvetica,
        config.bold,
        config.italic,
    ))
}

fn load_font_file(path: &Path, bold: bool, italic: bool) -> Result<ResolvedFont> {
    let data = std::fs::read(path).map_err(|e| {
        HeaderError::Font(format!("Cannot read font file {}: {}", path.display(), e))
    })?;
    ResolvedFont::from_font_data(data, bold, italic)
}
