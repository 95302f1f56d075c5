//! Shared constants for header stamping
//!
//! This module centralizes magic numbers used by the position model, the
//! preview scene and the PDF writer.

// =============================================================================
// Unit Conversion
// =============================================================================

/// Points per millimeter (1 inch = 72 points, 1 inch = 25.4mm)
pub const POINTS_PER_MM: f32 = 72.0 / 25.4;

// =============================================================================
// Typography
// =============================================================================

pub const MIN_FONT_SIZE: f32 = 4.0;
pub const MAX_FONT_SIZE: f32 = 72.0;

pub const MIN_LINE_SPACING: f32 = 0.5;
pub const MAX_LINE_SPACING: f32 = 5.0;

/// Letter spacing bounds, in points per character
pub const MIN_LETTER_SPACING: f32 = -5.0;
pub const MAX_LETTER_SPACING: f32 = 50.0;

/// Fraction of the font size above the baseline, used to center a line box
pub const ASCENT_RATIO: f32 = 0.8;

/// Underline stroke width as a fraction of the font size
pub const UNDERLINE_WIDTH_RATIO: f32 = 0.06;

/// Underline distance below the baseline as a fraction of the font size
pub const UNDERLINE_OFFSET_RATIO: f32 = 0.12;

/// Horizontal skew used to fake italics on TrueType faces without one
pub const SYNTHETIC_ITALIC_SKEW: f32 = 0.21;

/// Stroke width, as a fraction of font size, used to fake bold
pub const SYNTHETIC_BOLD_STROKE_RATIO: f32 = 0.03;

// =============================================================================
// Position
// =============================================================================

/// Persisted ratios stay strictly inside the page
pub const MIN_RATIO: f32 = 0.01;
pub const MAX_RATIO: f32 = 0.99;

/// Smallest page dimension used for divisions, in points
pub const MIN_PAGE_DIMENSION: f32 = 1.0;

pub const DEFAULT_X_RATIO: f32 = 0.85;
pub const DEFAULT_Y_RATIO: f32 = 0.97;
pub const DEFAULT_MARGIN_PT: f32 = 20.0;

// =============================================================================
// Preview
// =============================================================================

/// Padding kept free around the page on the canvas (total, both sides), in pixels
pub const PREVIEW_PADDING_PX: f32 = 40.0;

/// Upper bound for the preview zoom
pub const PREVIEW_MAX_SCALE: f32 = 2.5;

/// Smallest canvas dimension considered when fitting the page
pub const MIN_CANVAS_PX: f32 = 10.0;

/// Smallest readable preview font, in pixels
pub const MIN_PREVIEW_FONT_PX: f32 = 7.0;

/// Average glyph advance as a fraction of the font size, for preview sizing
pub const PREVIEW_CHAR_WIDTH_RATIO: f32 = 0.6;

/// Half-length of the anchor crosshair arms, in pixels
pub const CROSSHAIR_RADIUS_PX: f32 = 5.0;

/// Dash pattern of the hover guides, in pixels
pub const GUIDE_DASH_PX: f32 = 4.0;

// =============================================================================
// Output
// =============================================================================

/// Suffix appended to the input directory name to form the output directory
pub const OUTPUT_DIR_SUFFIX: &str = "_avec_entete";

/// Name of the configuration file
pub const CONFIG_FILE_NAME: &str = "pdf_header_config.json";

/// Environment variable overriding the configuration file path
pub const CONFIG_PATH_ENV: &str = "PDF_HEADER_CONFIG";

// =============================================================================
// Dates
// =============================================================================

pub const FALLBACK_DATE_FORMAT: &str = "%d/%m/%Y";

/// Date patterns offered in the UI, with a human-readable sample
pub const DATE_FORMATS: &[(&str, &str)] = &[
    ("%d/%m/%Y", "31/12/2025"),
    ("%Y-%m-%d", "2025-12-31"),
    ("%d.%m.%Y", "31.12.2025"),
    ("%d-%m-%Y", "31-12-2025"),
    ("%m/%d/%Y", "12/31/2025"),
    ("%d %B %Y", "31 December 2025"),
    ("%Y%m%d", "20251231"),
    ("%d/%m/%Y %H:%M", "31/12/2025 18:30"),
];
