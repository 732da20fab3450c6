//! Tool modes and application layout.
//!
//! The layout is owned outside the gesture machine: the machine reads the
//! active tool from it and asks for changes through `ToolMutation`s.

use arrows_core::constants::{DEFAULT_STROKE_COLOR, DEFAULT_STROKE_WIDTH};
use arrows_core::viewport::padded_canvas_size;
use arrows_core::{Point, Size, Style};
use serde::{Deserialize, Serialize};

/// How a drawing-mode press is interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum DrawToolMode {
    /// Two clicks make a straight segment.
    Line,
    /// Press, drag, release.
    #[default]
    Freehand,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ApplicationLayout {
    pub window_size: Size,
    pub inspector_visible: bool,
    pub drawing_mode: bool,
    pub text_mode: bool,
    pub draw_tool_mode: DrawToolMode,
    pub draw_snap_mode: bool,
    pub draw_stroke_color: String,
    pub draw_stroke_width: f64,
    /// First click of a pending two-click line.
    #[serde(skip)]
    pub draw_line_start_point: Option<Point>,
}

impl Default for ApplicationLayout {
    fn default() -> Self {
        Self {
            window_size: Size::new(1280.0, 800.0),
            inspector_visible: true,
            drawing_mode: false,
            text_mode: false,
            draw_tool_mode: DrawToolMode::Freehand,
            draw_snap_mode: true,
            draw_stroke_color: DEFAULT_STROKE_COLOR.to_string(),
            draw_stroke_width: DEFAULT_STROKE_WIDTH,
            draw_line_start_point: None,
        }
    }
}

/// Changes to the tool-mode flags.
#[derive(Debug, Clone, PartialEq)]
pub enum ToolMutation {
    ToggleDrawingMode,
    ToggleTextMode,
    SetDrawToolMode(DrawToolMode),
    SetDrawSnapMode(bool),
    SetDrawStrokeColor(String),
    SetDrawStrokeWidth(f64),
    SetDrawLineStartPoint(Point),
    ClearDrawLineStartPoint,
}

impl ApplicationLayout {
    /// Canvas extent that viewport constraints are computed against.
    pub fn canvas_size(&self) -> Size {
        padded_canvas_size(self.window_size, self.inspector_visible)
    }

    pub fn line_tool_active(&self) -> bool {
        self.drawing_mode && self.draw_tool_mode == DrawToolMode::Line
    }

    /// Style for new drawings from the active stroke settings.
    pub fn drawing_style(&self) -> Style {
        Style::new()
            .with("strokeColor", self.draw_stroke_color.as_str())
            .with("strokeWidth", self.draw_stroke_width)
    }

    pub fn apply(&mut self, mutation: &ToolMutation) {
        match mutation {
            ToolMutation::ToggleDrawingMode => {
                self.drawing_mode = !self.drawing_mode;
                if self.drawing_mode {
                    self.text_mode = false;
                }
                self.draw_line_start_point = None;
            }
            ToolMutation::ToggleTextMode => {
                self.text_mode = !self.text_mode;
                if self.text_mode {
                    self.drawing_mode = false;
                }
                self.draw_line_start_point = None;
            }
            ToolMutation::SetDrawToolMode(mode) => {
                self.draw_tool_mode = *mode;
                self.draw_line_start_point = None;
            }
            ToolMutation::SetDrawSnapMode(on) => self.draw_snap_mode = *on,
            ToolMutation::SetDrawStrokeColor(color) => self.draw_stroke_color = color.clone(),
            ToolMutation::SetDrawStrokeWidth(width) => self.draw_stroke_width = *width,
            ToolMutation::SetDrawLineStartPoint(p) => self.draw_line_start_point = Some(*p),
            ToolMutation::ClearDrawLineStartPoint => self.draw_line_start_point = None,
        }
    }
}

/// Straighten the second point of a line to horizontal or vertical,
/// whichever its displacement is closer to.
pub fn snap_line_point(start: Point, end: Point, snap: bool) -> Point {
    if !snap {
        return end;
    }
    let dx = (end.x - start.x).abs();
    let dy = (end.y - start.y).abs();
    if dx >= dy {
        Point::new(end.x, start.y)
    } else {
        Point::new(start.x, end.y)
    }
}
