//! Preview scene for the interactive canvas
//!
//! Everything here is in canvas pixels. The text box is estimated from the
//! character count, so frames and backgrounds can differ slightly from the
//! stamped PDF, which measures real glyph widths.

use crate::config::HeaderConfig;
use crate::constants::*;
use crate::position::{PageGeometry, Ratio, canvas_from_ratio};
use crate::types::{FrameStyle, Rotation};
use crate::units::hex_to_rgb;

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct CanvasPoint {
    pub x: f32,
    pub y: f32,
}

impl CanvasPoint {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// RGBA color, alpha in [0, 255]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgba(pub u8, pub u8, pub u8, pub u8);

impl Rgba {
    fn from_hex(hex: &str, opacity: f32) -> Self {
        let (r, g, b) = hex_to_rgb(hex).unwrap_or((0, 0, 0));
        Rgba(r, g, b, (opacity.clamp(0.0, 1.0) * 255.0).round() as u8)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    pub from: CanvasPoint,
    pub to: CanvasPoint,
}

/// A possibly rotated rectangle, corners in drawing order
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Quad {
    pub corners: [CanvasPoint; 4],
}

#[derive(Debug, Clone, PartialEq)]
pub struct FrameMark {
    pub quad: Quad,
    pub color: Rgba,
    pub width_px: f32,
    pub style: FrameStyle,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TextMark {
    /// Center of the text block
    pub anchor: CanvasPoint,
    pub lines: Vec<String>,
    pub font_px: f32,
    pub line_height_px: f32,
    pub letter_spacing_px: f32,
    pub color: Rgba,
    /// Counter-clockwise, in degrees
    pub angle_deg: f32,
    pub bold: bool,
    pub italic: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct OverlayScene {
    pub page: Quad,
    pub guides: Vec<Segment>,
    pub background: Option<(Quad, Rgba)>,
    pub frame: Option<FrameMark>,
    pub text: Option<TextMark>,
    pub underlines: Vec<Segment>,
    pub underline_width_px: f32,
    pub crosshair: [Segment; 2],
    pub crosshair_color: Rgba,
}

/// Estimated text block size in pixels: (width, height)
pub fn estimate_text_box(
    lines: &[&str],
    font_px: f32,
    letter_spacing_px: f32,
    line_spacing: f32,
) -> (f32, f32) {
    let widest = lines
        .iter()
        .map(|line| {
            let chars = line.chars().count() as f32;
            chars * font_px * PREVIEW_CHAR_WIDTH_RATIO
                + (chars - 1.0).max(0.0) * letter_spacing_px
        })
        .fold(0.0_f32, f32::max);
    let height = lines.len().max(1) as f32 * font_px * line_spacing;
    (widest.max(0.0), height)
}

/// Describe what the canvas should draw for the current state
pub fn build_scene(
    config: &HeaderConfig,
    text: &str,
    ratio: Ratio,
    geometry: &PageGeometry,
    hover: Option<CanvasPoint>,
) -> OverlayScene {
    let left = geometry.img_offset_x;
    let top = geometry.img_offset_y;
    let right = left + geometry.page_w_px;
    let bottom = top + geometry.page_h_px;

    let page = Quad {
        corners: [
            CanvasPoint::new(left, top),
            CanvasPoint::new(right, top),
            CanvasPoint::new(right, bottom),
            CanvasPoint::new(left, bottom),
        ],
    };

    let guides = match hover {
        Some(p) if geometry.contains(p.x, p.y) => vec![
            Segment {
                from: CanvasPoint::new(left, p.y),
                to: CanvasPoint::new(right, p.y),
            },
            Segment {
                from: CanvasPoint::new(p.x, top),
                to: CanvasPoint::new(p.x, bottom),
            },
        ],
        _ => Vec::new(),
    };

    let (ax, ay) = canvas_from_ratio(ratio.x, ratio.y, geometry);
    let anchor = CanvasPoint::new(ax, ay);
    let scale = geometry.scale;
    let text_color = Rgba::from_hex(&config.color_hex, 1.0);

    let font_px = (config.font_size * scale).max(MIN_PREVIEW_FONT_PX);
    let letter_spacing_px = config.letter_spacing * scale;
    let line_height_px = font_px * config.line_spacing;
    let lines: Vec<&str> = if text.is_empty() {
        Vec::new()
    } else {
        text.lines().collect()
    };
    let (box_w, box_h) =
        estimate_text_box(&lines, font_px, letter_spacing_px, config.line_spacing);
    let rotation = config.rotation;

    let padding = config.frame_padding * scale;
    let padded = |w: f32, h: f32| {
        rotated_box(
            anchor,
            (-w / 2.0 - padding, -h / 2.0 - padding),
            (w / 2.0 + padding, h / 2.0 + padding),
            rotation,
        )
    };

    let has_text = !lines.is_empty();
    let background = (config.use_bg && has_text).then(|| {
        (
            padded(box_w, box_h),
            Rgba::from_hex(&config.bg_color, config.bg_opacity),
        )
    });
    let frame = (config.use_frame && has_text).then(|| FrameMark {
        quad: padded(box_w, box_h),
        color: Rgba::from_hex(&config.frame_color, config.frame_opacity),
        width_px: (config.frame_width * scale).max(1.0),
        style: config.frame_style,
    });

    let mut underlines = Vec::new();
    if config.underline && has_text {
        let block_top = -box_h / 2.0;
        for (i, line) in lines.iter().enumerate() {
            let (w, _) =
                estimate_text_box(&[*line], font_px, letter_spacing_px, config.line_spacing);
            let baseline = block_top
                + i as f32 * line_height_px
                + (line_height_px - font_px) / 2.0
                + font_px * ASCENT_RATIO;
            let y = baseline + font_px * UNDERLINE_OFFSET_RATIO;
            underlines.push(Segment {
                from: rotate_about(anchor, -w / 2.0, y, rotation),
                to: rotate_about(anchor, w / 2.0, y, rotation),
            });
        }
    }

    let text_mark = has_text.then(|| TextMark {
        anchor,
        lines: lines.iter().map(|l| l.to_string()).collect(),
        font_px,
        line_height_px,
        letter_spacing_px,
        color: text_color,
        angle_deg: rotation.degrees() as f32,
        bold: config.bold,
        italic: config.italic,
    });

    let r = CROSSHAIR_RADIUS_PX;
    let crosshair = [
        Segment {
            from: CanvasPoint::new(ax - r, ay),
            to: CanvasPoint::new(ax + r, ay),
        },
        Segment {
            from: CanvasPoint::new(ax, ay - r),
            to: CanvasPoint::new(ax, ay + r),
        },
    ];

    OverlayScene {
        page,
        guides,
        background,
        frame,
        text: text_mark,
        underlines,
        underline_width_px: (font_px * UNDERLINE_WIDTH_RATIO).max(1.0),
        crosshair,
        crosshair_color: text_color,
    }
}

/// Rotate a local offset (x right, y down) counter-clockwise on screen, then
/// translate it to the anchor
pub fn rotate_about(anchor: CanvasPoint, dx: f32, dy: f32, rotation: Rotation) -> CanvasPoint {
    let (cos, sin) = rotation.cos_sin();
    // Screen Y grows downward, so a counter-clockwise turn uses -sin here
    CanvasPoint::new(
        anchor.x + dx * cos + dy * sin,
        anchor.y - dx * sin + dy * cos,
    )
}

fn rotated_box(
    anchor: CanvasPoint,
    (x0, y0): (f32, f32),
    (x1, y1): (f32, f32),
    rotation: Rotation,
) -> Quad {
    Quad {
        corners: [
            rotate_about(anchor, x0, y0, rotation),
            rotate_about(anchor, x1, y0, rotation),
            rotate_about(anchor, x1, y1, rotation),
            rotate_about(anchor, x0, y1, rotation),
        ],
    }
}

impl Quad {
    /// Axis-aligned bounds: (min_x, min_y, max_x, max_y)
    pub fn bounds(&self) -> (f32, f32, f32, f32) {
        self.corners.iter().fold(
            (f32::MAX, f32::MAX, f32::MIN, f32::MIN),
            |(x0, y0, x1, y1), p| (x0.min(p.x), y0.min(p.y), x1.max(p.x), y1.max(p.y)),
        )
    }
}
