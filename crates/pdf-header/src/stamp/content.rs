//! Content stream operations for one header
//!
//! Everything is drawn in a local frame centered on the anchor, then placed
//! with a single `cm` that translates and rotates it.

use super::fonts::{ResolvedFont, encode_win_ansi};
use crate::config::HeaderConfig;
use crate::constants::*;
use crate::types::{FrameStyle, Rotation};
use crate::units::hex_to_rgb_float;

type Rgb = (f32, f32, f32);

#[derive(Debug, Clone, PartialEq)]
pub struct Fill {
    pub color: Rgb,
    pub opacity: f32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Outline {
    pub color: Rgb,
    pub opacity: f32,
    pub width: f32,
    pub style: FrameStyle,
}

/// A laid-out header, independent of any page's resource names
#[derive(Debug, Clone, PartialEq)]
pub struct HeaderDrawing {
    /// Anchor in PDF user space (origin bottom-left)
    pub anchor: (f32, f32),
    pub rotation: Rotation,
    /// WinAnsi-encoded lines
    pub lines: Vec<Vec<u8>>,
    /// Width of each line in points, letter spacing included
    pub line_widths: Vec<f32>,
    pub font_size: f32,
    pub leading: f32,
    pub letter_spacing: f32,
    pub color: Rgb,
    pub synthetic_bold: bool,
    pub synthetic_italic: bool,
    pub underline: bool,
    /// Text box width, already bounded by the page
    pub box_width: f32,
    pub padding: f32,
    pub background: Option<Fill>,
    pub frame: Option<Outline>,
}

/// Resource names the operations refer to on a given page
#[derive(Debug, Clone, PartialEq)]
pub struct ResourceNames {
    pub font: String,
    pub background_state: String,
    pub frame_state: String,
}

impl HeaderDrawing {
    /// Lay out `text` at `anchor`; `page_size` bounds the box width
    pub fn layout(
        config: &HeaderConfig,
        text: &str,
        font: &ResolvedFont,
        anchor: (f32, f32),
        page_size: (f32, f32),
    ) -> Self {
        let lines: Vec<Vec<u8>> = text.lines().map(encode_win_ansi).collect();
        let line_widths: Vec<f32> = lines
            .iter()
            .map(|line| font.text_width(line, config.font_size, config.letter_spacing))
            .collect();

        let widest = line_widths.iter().copied().fold(0.0_f32, f32::max);
        let (page_w, page_h) = page_size;
        let limit = if config.rotation.is_vertical() {
            page_h
        } else {
            page_w
        };

        Self {
            anchor,
            rotation: config.rotation,
            lines,
            line_widths,
            font_size: config.font_size,
            leading: config.font_size * config.line_spacing,
            letter_spacing: config.letter_spacing,
            color: hex_to_rgb_float(&config.color_hex),
            synthetic_bold: font.synthetic_bold,
            synthetic_italic: font.synthetic_italic,
            underline: config.underline,
            box_width: widest.min(limit),
            padding: config.frame_padding,
            background: config.use_bg.then(|| Fill {
                color: hex_to_rgb_float(&config.bg_color),
                opacity: config.bg_opacity,
            }),
            frame: config.use_frame.then(|| Outline {
                color: hex_to_rgb_float(&config.frame_color),
                opacity: config.frame_opacity,
                width: config.frame_width,
                style: config.frame_style,
            }),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.lines.iter().all(|line| line.is_empty())
    }

    /// Total height of the text block
    pub fn block_height(&self) -> f32 {
        self.lines.len() as f32 * self.leading
    }

    /// Baseline of line `index`, relative to the anchor
    pub fn baseline(&self, index: usize) -> f32 {
        let top = self.block_height() / 2.0;
        top - index as f32 * self.leading
            - (self.leading - self.font_size) / 2.0
            - self.font_size * ASCENT_RATIO
    }

    /// Padded box around the text, relative to the anchor: (x, y, w, h)
    pub fn box_rect(&self) -> (f32, f32, f32, f32) {
        let w = self.box_width + 2.0 * self.padding;
        let h = self.block_height() + 2.0 * self.padding;
        (-w / 2.0, -h / 2.0, w, h)
    }

    /// Content stream operations drawing the header
    pub fn operations(&self, names: &ResourceNames) -> String {
        let mut ops = String::new();
        if self.is_empty() {
            return ops;
        }

        let (cos, sin) = self.rotation.cos_sin();
        let (ax, ay) = self.anchor;
        ops.push_str("q\n");
        ops.push_str(&format!(
            "{} {} {} {} {} {} cm\n",
            num(cos),
            num(sin),
            num(-sin),
            num(cos),
            num(ax),
            num(ay)
        ));

        let (x, y, w, h) = self.box_rect();
        let rect = format!("{} {} {} {} re", num(x), num(y), num(w), num(h));

        if let Some(fill) = &self.background {
            ops.push_str(&format!(
                "q /{} gs {} rg {} f Q\n",
                names.background_state,
                rgb(fill.color),
                rect
            ));
        }

        if let Some(frame) = &self.frame {
            let dash = match frame.style {
                FrameStyle::Solid => "[] 0 d".to_string(),
                FrameStyle::Dashed => {
                    format!("[{} {}] 0 d", num(frame.width * 3.0), num(frame.width * 2.0))
                }
            };
            ops.push_str(&format!(
                "q /{} gs {} RG {} w {} {} S Q\n",
                names.frame_state,
                rgb(frame.color),
                num(frame.width),
                dash,
                rect
            ));
        }

        let skew = if self.synthetic_italic {
            SYNTHETIC_ITALIC_SKEW
        } else {
            0.0
        };
        ops.push_str("BT\n");
        ops.push_str(&format!("/{} {} Tf\n", names.font, num(self.font_size)));
        ops.push_str(&format!("{} rg\n", rgb(self.color)));
        ops.push_str(&format!("{} Tc\n", num(self.letter_spacing)));
        if self.synthetic_bold {
            ops.push_str(&format!(
                "{} RG {} w 2 Tr\n",
                rgb(self.color),
                num(self.font_size * SYNTHETIC_BOLD_STROKE_RATIO)
            ));
        }
        for (i, (line, width)) in self.lines.iter().zip(&self.line_widths).enumerate() {
            ops.push_str(&format!(
                "1 0 {} 1 {} {} Tm <{}> Tj\n",
                num(skew),
                num(-width / 2.0),
                num(self.baseline(i)),
                hex(line)
            ));
        }
        ops.push_str("ET\n");

        if self.underline {
            ops.push_str(&format!(
                "{} RG {} w\n",
                rgb(self.color),
                num(self.font_size * UNDERLINE_WIDTH_RATIO)
            ));
            for (i, width) in self.line_widths.iter().enumerate() {
                let y = self.baseline(i) - self.font_size * UNDERLINE_OFFSET_RATIO;
                ops.push_str(&format!(
                    "{} {} m {} {} l S\n",
                    num(-width / 2.0),
                    num(y),
                    num(width / 2.0),
                    num(y)
                ));
            }
        }

        ops.push_str("Q\n");
        ops
    }
}

/// Compact decimal for content streams
fn num(value: f32) -> String {
    let text = format!("{:.3}", value);
    let text = text.trim_end_matches('0').trim_end_matches('.');
    match text {
        "-0" | "" => "0".to_string(),
        other => other.to_string(),
    }
}

fn rgb((r, g, b): Rgb) -> String {
    format!("{} {} {}", num(r), num(g), num(b))
}

fn hex(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{:02X}", b)).collect()
}
