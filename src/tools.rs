use crate::element::ShapeKind;
use egui::Color32;
use serde::{Deserialize, Serialize};

/// The active input mode. Exactly one tool is active at a time and it
/// determines how pointer events are interpreted on the canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Tool {
    Select,
    Pencil,
    Eraser,
    Line,
    Rectangle,
    Circle,
}

impl Tool {
    pub const ALL: [Tool; 6] = [
        Tool::Select,
        Tool::Pencil,
        Tool::Eraser,
        Tool::Line,
        Tool::Rectangle,
        Tool::Circle,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Tool::Select => "Select",
            Tool::Pencil => "Pencil",
            Tool::Eraser => "Eraser",
            Tool::Line => "Line",
            Tool::Rectangle => "Rectangle",
            Tool::Circle => "Circle",
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            Tool::Select => "➤",
            Tool::Pencil => "🖌",
            Tool::Eraser => "⌫",
            Tool::Line => "∕",
            Tool::Rectangle => "◻",
            Tool::Circle => "○",
        }
    }

    /// The annotation kind this tool draws, or None for the select tool.
    pub fn shape_kind(&self) -> Option<ShapeKind> {
        match self {
            Tool::Select => None,
            Tool::Pencil => Some(ShapeKind::Freehand),
            Tool::Eraser => Some(ShapeKind::Eraser),
            Tool::Line => Some(ShapeKind::Line),
            Tool::Rectangle => Some(ShapeKind::Rectangle),
            Tool::Circle => Some(ShapeKind::Circle),
        }
    }

    pub fn is_drawing(&self) -> bool {
        self.shape_kind().is_some()
    }

    /// The eraser always paints the backdrop, so it gets no color control.
    pub fn shows_color_control(&self) -> bool {
        self.is_drawing() && !matches!(self, Tool::Eraser)
    }

    /// The eraser width is fixed, so the width slider is hidden for it too.
    pub fn shows_width_control(&self) -> bool {
        self.is_drawing() && !matches!(self, Tool::Eraser)
    }
}

impl Default for Tool {
    fn default() -> Self {
        Tool::Select
    }
}

/// User-adjustable styling for the drawing tools.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StrokeStyle {
    pub color: Color32,
    pub width: f32,
}

impl Default for StrokeStyle {
    fn default() -> Self {
        Self {
            color: Color32::BLACK,
            width: 4.0,
        }
    }
}
