//! Shared constants for the drawing renderer (all lengths in millimetres).

use super::scene::Rgb;

/// One typographic point in millimetres.
pub const PTS_MM: f64 = 0.352778;

// ── Page ────────────────────────────────────────────────────────────
pub(super) const PAGE_MARGIN: f64 = 20.0;
pub(super) const LINE_WEIGHT: f64 = 0.5;
pub(super) const FONT_FAMILY: &str = "Roboto, Arial, sans-serif";
/// Estimated glyph advance as a fraction of the font size
pub(super) const CHAR_WIDTH_FACTOR: f64 = 0.6;
/// Parameter steps used to bound a Bézier curve
pub(super) const BEZIER_BOUND_SAMPLES: usize = 10;

// ── Text ────────────────────────────────────────────────────────────
pub const DIMENSION_FONT_SIZE: f64 = 8.0 * PTS_MM;
pub(super) const TITLE_FONT_SIZE: f64 = 14.0 * PTS_MM;
pub(super) const FOOTER_FONT_SIZE: f64 = 6.0 * PTS_MM;

// ── Dimensions ──────────────────────────────────────────────────────
pub(super) const DIMENSION_OFFSET_VERTICAL: f64 = 8.0;
pub(super) const DIMENSION_OFFSET_HORIZONTAL: f64 = -10.0;
pub(super) const DIMENSION_OFFSET_DIAGONAL: f64 = 8.0;
pub(super) const EXTENSION_LENGTH: f64 = 3.0;
pub const ARROW_SIZE: f64 = 3.0;
/// Half-opening of an arrow head about the reversed line direction, radians
pub(super) const ARROW_ANGLE: f64 = 2.8;
pub(super) const ANGLE_ARC_SEGMENTS: usize = 12;
pub(super) const ANGLE_RAY_EXTENSION: f64 = 5.0;
/// Endpoints closer than this count as the shared vertex of two lines
pub(super) const VERTEX_TOLERANCE: f64 = 0.01;

// ── Side view layout ────────────────────────────────────────────────
pub(super) const NECK_ANGLE_ARC_RADIUS: f64 = 15.0;
pub(super) const BREAK_ANGLE_ARC_RADIUS: f64 = 20.0;
pub(super) const REFERENCE_LINE_OVERRUN: f64 = 20.0;
pub(super) const TITLE_GAP: f64 = 25.0;
pub(super) const FOOTER_GAP: f64 = 35.0;

// ── Cross-section layout ────────────────────────────────────────────
pub(super) const SECTION_OVERRUN: f64 = 10.0;
pub(super) const FILLET_SAMPLES: usize = 16;

// ── Radius template ─────────────────────────────────────────────
/// Extra template width beyond the fingerboard end width
pub(super) const TEMPLATE_WIDTH_MARGIN: f64 = 10.0;
/// Flat band above the camber that carries the radius lettering
pub(super) const TEMPLATE_FLAT_HEIGHT: f64 = 25.0;
pub(super) const TEMPLATE_ARC_SAMPLES: usize = 50;
pub(super) const TEMPLATE_TEXT_HEIGHT_FRACTION: f64 = 0.4;
pub(super) const TEMPLATE_TEXT_MARGIN_FRACTION: f64 = 0.3;

// ── Colours ─────────────────────────────────────────────────────────
pub(super) const BLACK: Rgb = Rgb(0, 0, 0);
/// Fill of title, footer and measurement labels
pub(super) const TEXT_COLOR: Rgb = Rgb(0, 0, 255);
pub(super) const WHITE: Rgb = Rgb(255, 255, 255);
pub(super) const GREY: Rgb = Rgb(100, 100, 100);
pub(super) const DIMENSION_COLOR: Rgb = Rgb(255, 0, 0);
/// Face colour of the cross-section neck
pub(super) const NECK_FILL: Rgb = Rgb(230, 210, 180);
