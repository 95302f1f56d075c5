//! Position model: canvas pixels ↔ page ratios ↔ PDF points
//!
//! Ratios are fractions of the page width/height with the origin at the top
//! left, like the canvas. PDF points have their origin at the bottom left, so
//! the Y axis flips on the way to point space.

use crate::constants::*;
use crate::units::clamp_ratio;
use serde::{Deserialize, Serialize};

/// Anchor expressed as a fraction of the page size, origin top-left
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Ratio {
    pub x: f32,
    pub y: f32,
}

impl Ratio {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Page placement on the preview canvas
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageGeometry {
    pub page_w_pt: f32,
    pub page_h_pt: f32,
    pub page_w_px: f32,
    pub page_h_px: f32,
    pub img_offset_x: f32,
    pub img_offset_y: f32,
    pub scale: f32,
}

impl Default for PageGeometry {
    fn default() -> Self {
        Self {
            page_w_pt: MIN_PAGE_DIMENSION,
            page_h_pt: MIN_PAGE_DIMENSION,
            page_w_px: MIN_PAGE_DIMENSION,
            page_h_px: MIN_PAGE_DIMENSION,
            img_offset_x: 0.0,
            img_offset_y: 0.0,
            scale: 1.0,
        }
    }
}

impl PageGeometry {
    /// Fit a page into a canvas, centered, with the preview padding applied
    pub fn fit(canvas_w: f32, canvas_h: f32, page_w_pt: f32, page_h_pt: f32) -> Self {
        let page_w_pt = safe_dimension(page_w_pt);
        let page_h_pt = safe_dimension(page_h_pt);
        let canvas_w = canvas_w.max(MIN_CANVAS_PX);
        let canvas_h = canvas_h.max(MIN_CANVAS_PX);

        let scale = preview_scale(canvas_w, canvas_h, page_w_pt, page_h_pt);
        let page_w_px = (page_w_pt * scale).max(MIN_PAGE_DIMENSION);
        let page_h_px = (page_h_pt * scale).max(MIN_PAGE_DIMENSION);

        Self {
            page_w_pt,
            page_h_pt,
            page_w_px,
            page_h_px,
            img_offset_x: ((canvas_w - page_w_px) / 2.0).floor(),
            img_offset_y: ((canvas_h - page_h_px) / 2.0).floor(),
            scale,
        }
    }

    /// Whether a canvas point lies on the rendered page
    pub fn contains(&self, cx: f32, cy: f32) -> bool {
        cx >= self.img_offset_x
            && cx <= self.img_offset_x + self.page_w_px
            && cy >= self.img_offset_y
            && cy <= self.img_offset_y + self.page_h_px
    }
}

/// Zoom that fits the page in the canvas minus padding, capped at the max zoom.
///
/// Never returns zero or a negative value, so a tiny canvas still renders.
pub fn preview_scale(canvas_w: f32, canvas_h: f32, page_w_pt: f32, page_h_pt: f32) -> f32 {
    let scale_w = (canvas_w.max(MIN_CANVAS_PX) - PREVIEW_PADDING_PX) / safe_dimension(page_w_pt);
    let scale_h = (canvas_h.max(MIN_CANVAS_PX) - PREVIEW_PADDING_PX) / safe_dimension(page_h_pt);
    scale_w.min(scale_h).min(PREVIEW_MAX_SCALE).max(0.01)
}

fn safe_dimension(value: f32) -> f32 {
    if value.is_finite() {
        value.max(MIN_PAGE_DIMENSION)
    } else {
        MIN_PAGE_DIMENSION
    }
}

/// Canvas pixels → page ratio, clamped to [0, 1]
pub fn ratio_from_canvas(cx: f32, cy: f32, geometry: &PageGeometry) -> Ratio {
    let rx = (cx - geometry.img_offset_x) / safe_dimension(geometry.page_w_px);
    let ry = (cy - geometry.img_offset_y) / safe_dimension(geometry.page_h_px);
    Ratio::new(rx.clamp(0.0, 1.0), ry.clamp(0.0, 1.0))
}

/// Page ratio → canvas pixels (not clamped)
pub fn canvas_from_ratio(rx: f32, ry: f32, geometry: &PageGeometry) -> (f32, f32) {
    (
        geometry.img_offset_x + rx * geometry.page_w_px,
        geometry.img_offset_y + ry * geometry.page_h_px,
    )
}

/// Page ratio → PDF points (Y=0 at the bottom)
pub fn pdf_point_from_ratio(rx: f32, ry: f32, page_w_pt: f32, page_h_pt: f32) -> (f32, f32) {
    (rx * page_w_pt, (1.0 - ry) * page_h_pt)
}

/// One cell of the 3×3 anchor grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Preset {
    TopLeft,
    TopCenter,
    TopRight,
    MiddleLeft,
    Center,
    MiddleRight,
    BottomLeft,
    BottomCenter,
    BottomRight,
}

impl Preset {
    pub const ALL: [Preset; 9] = [
        Preset::TopLeft,
        Preset::TopCenter,
        Preset::TopRight,
        Preset::MiddleLeft,
        Preset::Center,
        Preset::MiddleRight,
        Preset::BottomLeft,
        Preset::BottomCenter,
        Preset::BottomRight,
    ];

    /// Key stored in `preset_position`
    pub fn key(self) -> &'static str {
        match self {
            Preset::TopLeft => "top_left",
            Preset::TopCenter => "top_center",
            Preset::TopRight => "top_right",
            Preset::MiddleLeft => "middle_left",
            Preset::Center => "center",
            Preset::MiddleRight => "middle_right",
            Preset::BottomLeft => "bottom_left",
            Preset::BottomCenter => "bottom_center",
            Preset::BottomRight => "bottom_right",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Preset::ALL.into_iter().find(|p| p.key() == key)
    }

    /// (column, row), both in 0..3
    pub fn grid_cell(self) -> (usize, usize) {
        let index = Preset::ALL
            .iter()
            .position(|p| *p == self)
            .unwrap_or(4);
        (index % 3, index / 3)
    }

    pub fn label(self) -> &'static str {
        match self {
            Preset::TopLeft => "↖",
            Preset::TopCenter => "↑",
            Preset::TopRight => "↗",
            Preset::MiddleLeft => "←",
            Preset::Center => "•",
            Preset::MiddleRight => "→",
            Preset::BottomLeft => "↙",
            Preset::BottomCenter => "↓",
            Preset::BottomRight => "↘",
        }
    }
}

/// Resolve a grid preset to a ratio, clamped to [0.01, 0.99]
pub fn resolve_preset(
    preset: Preset,
    margin_x_pt: f32,
    margin_y_pt: f32,
    page_w_pt: f32,
    page_h_pt: f32,
) -> Ratio {
    let (col, row) = preset.grid_cell();
    let mx = margin_x_pt.max(0.0) / safe_dimension(page_w_pt);
    let my = margin_y_pt.max(0.0) / safe_dimension(page_h_pt);

    let rx = match col {
        0 => mx,
        1 => 0.5,
        _ => 1.0 - mx,
    };
    let ry = match row {
        0 => my,
        1 => 0.5,
        _ => 1.0 - my,
    };

    Ratio::new(clamp_ratio(rx), clamp_ratio(ry))
}

/// Where the header anchor is, before the page size is known
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Position {
    /// Snapped to a grid cell, offset from the page edges by the margins
    Preset {
        preset: Preset,
        margin_x_pt: f32,
        margin_y_pt: f32,
    },
    /// Placed by hand
    Manual { rx: f32, ry: f32 },
}

impl Default for Position {
    fn default() -> Self {
        Position::Manual {
            rx: DEFAULT_X_RATIO,
            ry: DEFAULT_Y_RATIO,
        }
    }
}

impl Position {
    pub fn manual(rx: f32, ry: f32) -> Self {
        Position::Manual {
            rx: clamp_ratio(rx),
            ry: clamp_ratio(ry),
        }
    }

    pub fn resolve(&self, page_w_pt: f32, page_h_pt: f32) -> Ratio {
        match *self {
            Position::Preset {
                preset,
                margin_x_pt,
                margin_y_pt,
            } => resolve_preset(preset, margin_x_pt, margin_y_pt, page_w_pt, page_h_pt),
            Position::Manual { rx, ry } => Ratio::new(rx, ry),
        }
    }

    pub fn preset(&self) -> Option<Preset> {
        match self {
            Position::Preset { preset, .. } => Some(*preset),
            Position::Manual { .. } => None,
        }
    }

    /// Value stored in `preset_position`
    pub fn key(&self) -> &'static str {
        self.preset().map(Preset::key).unwrap_or("custom")
    }
}
