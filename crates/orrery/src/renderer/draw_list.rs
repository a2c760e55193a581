//! Retained list of 2D canvas drawing commands.
//!
//! The core builds one list per canvas per frame; the web bridge replays it
//! onto a `CanvasRenderingContext2d` in order.

use glam::Vec2;

use crate::renderer::color::Color;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextAlign {
    Left,
    Center,
    Right,
}

#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    /// Fill the whole canvas, ignoring any transform.
    Clear { color: Color },
    /// Save state, then translate by `translate` and scale by `scale`.
    PushTransform { translate: Vec2, scale: f32 },
    /// Restore the state saved by the matching `PushTransform`.
    PopTransform,
    Polyline {
        points: Vec<Vec2>,
        closed: bool,
        width: f32,
        color: Color,
    },
    /// Filled disc; `glow` > 0 adds a color-matched blur halo of that size.
    FillCircle {
        center: Vec2,
        radius: f32,
        color: Color,
        glow: f32,
    },
    StrokeCircle {
        center: Vec2,
        radius: f32,
        width: f32,
        color: Color,
    },
    Text {
        pos: Vec2,
        text: String,
        size: f32,
        color: Color,
        align: TextAlign,
    },
}

/// Ordered drawing commands for one canvas.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DrawList {
    commands: Vec<DrawCommand>,
}

impl DrawList {
    pub fn new() -> Self {
        Self {
            commands: Vec::with_capacity(64),
        }
    }

    pub fn clear(&mut self, color: Color) {
        self.commands.push(DrawCommand::Clear { color });
    }

    pub fn push_transform(&mut self, translate: Vec2, scale: f32) {
        self.commands.push(DrawCommand::PushTransform { translate, scale });
    }

    pub fn pop_transform(&mut self) {
        self.commands.push(DrawCommand::PopTransform);
    }

    /// Stroke a closed polygon.
    pub fn stroke_polygon(&mut self, points: Vec<Vec2>, width: f32, color: Color) {
        if points.len() < 2 {
            return;
        }
        self.commands.push(DrawCommand::Polyline {
            points,
            closed: true,
            width,
            color,
        });
    }

    pub fn fill_circle(&mut self, center: Vec2, radius: f32, color: Color, glow: f32) {
        self.commands.push(DrawCommand::FillCircle {
            center,
            radius,
            color,
            glow,
        });
    }

    pub fn stroke_circle(&mut self, center: Vec2, radius: f32, width: f32, color: Color) {
        self.commands.push(DrawCommand::StrokeCircle {
            center,
            radius,
            width,
            color,
        });
    }

    pub fn text(&mut self, pos: Vec2, text: impl Into<String>, size: f32, color: Color, align: TextAlign) {
        self.commands.push(DrawCommand::Text {
            pos,
            text: text.into(),
            size,
            color,
            align,
        });
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Labels of all `Text` commands, in draw order.
    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.commands.iter().filter_map(|c| match c {
            DrawCommand::Text { text, .. } => Some(text.as_str()),
            _ => None,
        })
    }
}
