//! Fixed interaction and layout constants.
//!
//! Distances suffixed `_CANVAS` are screen pixels; everything else is in
//! graph units.

// ─── Gestures ────────────────────────────────────────────────────────────

/// Pointer travel (canvas px) before a press turns into a drag.
pub const DRAG_THRESHOLD_CANVAS: f64 = 3.0;

/// Minimum spacing between consecutive freehand points.
pub const DRAWING_MIN_POINT_DISTANCE: f64 = 0.75;

/// Strokes shorter than this are treated as accidental clicks.
pub const DRAWING_MIN_PATH_LENGTH: f64 = 2.0;

// ─── Hit testing ─────────────────────────────────────────────────────────

pub const DRAWING_HIT_TOLERANCE: f64 = 10.0;

pub const RELATIONSHIP_HIT_TOLERANCE: f64 = 10.0;

/// Width of the drag-to-create annulus outside a node's body.
pub const RING_MARGIN: f64 = 10.0;

/// Line height as a multiple of font size.
pub const TEXT_LINE_HEIGHT_FACTOR: f64 = 1.2;

/// Average glyph width as a multiple of font size, used when text cannot
/// be measured.
pub const APPROX_GLYPH_WIDTH_FACTOR: f64 = 0.6;

/// Padding around a text annotation's glyphs (horizontal, vertical).
pub const TEXT_INSET_X: f64 = 4.0;
pub const TEXT_INSET_Y: f64 = 2.0;

// ─── Canvas layout ───────────────────────────────────────────────────────

/// Gap kept between content and the canvas edge when scrolling.
pub const CANVAS_PADDING: f64 = 50.0;

pub const INSPECTOR_WIDTH: f64 = 425.0;

pub const TOOLBAR_HEIGHT: f64 = 50.0;

/// Fraction of the remaining distance to centre covered per zoom-out event.
pub const RECENTRE_FACTOR: f64 = 0.1;

/// Side length (canvas px) of a selection transformation handle.
pub const HANDLE_SIZE_CANVAS: f64 = 12.0;

/// Gap (canvas px) between the selected nodes and their handle frame.
pub const HANDLE_FRAME_MARGIN_CANVAS: f64 = 10.0;

// ─── Defaults ────────────────────────────────────────────────────────────

pub const DEFAULT_FONT_SIZE: f64 = 14.0;
pub const DEFAULT_FONT_FAMILY: &str = "sans-serif";
pub const DEFAULT_TEXT_COLOR: &str = "#000000";
pub const DEFAULT_TEXT_BACKGROUND: &str = "transparent";
pub const DEFAULT_STROKE_COLOR: &str = "#000000";
pub const DEFAULT_STROKE_WIDTH: f64 = 2.0;
pub const NEW_TEXT_CONTENT: &str = "New text";
