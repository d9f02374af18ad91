//! Drawing context capability
//!
//! The simulation never rasterizes anything itself. It emits draw calls into
//! a [`DrawingContext`] supplied by the caller (canvas, SVG writer, plotter...).

use serde::{Deserialize, Serialize};

use crate::palette::Color;

/// Vector drawing surface consumed by the simulation
pub trait DrawingContext {
    /// Start a new subpath at (x, y)
    fn move_to(&mut self, x: f32, y: f32);
    /// Add a straight segment to (x, y)
    fn line_to(&mut self, x: f32, y: f32);
    /// Stroke the current path and reset it
    fn stroke(&mut self);
    fn set_stroke_color(&mut self, color: Color, alpha: f32);
    fn set_fill_color(&mut self, color: Color, alpha: f32);
    fn fill_rect(&mut self, x: f32, y: f32, w: f32, h: f32);
}

/// A single recorded draw call
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum DrawCall {
    MoveTo { x: f32, y: f32 },
    LineTo { x: f32, y: f32 },
    Stroke,
    StrokeColor { color: Color, alpha: f32 },
    FillColor { color: Color, alpha: f32 },
    FillRect { x: f32, y: f32, w: f32, h: f32 },
}

/// Records every call in order (used for reproducibility checks)
#[derive(Debug, Clone, Default)]
pub struct RecordingContext {
    pub calls: Vec<DrawCall>,
}

impl RecordingContext {
    pub fn new() -> Self {
        Self::default()
    }
}

impl DrawingContext for RecordingContext {
    fn move_to(&mut self, x: f32, y: f32) {
        self.calls.push(DrawCall::MoveTo { x, y });
    }

    fn line_to(&mut self, x: f32, y: f32) {
        self.calls.push(DrawCall::LineTo { x, y });
    }

    fn stroke(&mut self) {
        self.calls.push(DrawCall::Stroke);
    }

    fn set_stroke_color(&mut self, color: Color, alpha: f32) {
        self.calls.push(DrawCall::StrokeColor { color, alpha });
    }

    fn set_fill_color(&mut self, color: Color, alpha: f32) {
        self.calls.push(DrawCall::FillColor { color, alpha });
    }

    fn fill_rect(&mut self, x: f32, y: f32, w: f32, h: f32) {
        self.calls.push(DrawCall::FillRect { x, y, w, h });
    }
}

/// Tallies calls without storing them (long runs emit hundreds of millions)
#[derive(Debug, Clone, Copy, Default, Serialize)]
pub struct CountingContext {
    pub segments: u64,
    pub strokes: u64,
    pub fills: u64,
    pub color_changes: u64,
}

impl DrawingContext for CountingContext {
    fn move_to(&mut self, _x: f32, _y: f32) {}

    fn line_to(&mut self, _x: f32, _y: f32) {
        self.segments += 1;
    }

    fn stroke(&mut self) {
        self.strokes += 1;
    }

    fn set_stroke_color(&mut self, _color: Color, _alpha: f32) {
        self.color_changes += 1;
    }

    fn set_fill_color(&mut self, _color: Color, _alpha: f32) {
        self.color_changes += 1;
    }

    fn fill_rect(&mut self, _x: f32, _y: f32, _w: f32, _h: f32) {
        self.fills += 1;
    }
}
