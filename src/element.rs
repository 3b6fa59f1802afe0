use egui::{Color32, Pos2};
use std::sync::Arc;
use uuid::Uuid;

/// Stroke width used by the eraser, independent of the user-adjustable
/// stroke width control.
pub const ERASER_WIDTH: f32 = 24.0;

/// The kind of annotation a drawing tool produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShapeKind {
    Freehand,
    Eraser,
    Line,
    Rectangle,
    Circle,
}

impl ShapeKind {
    /// Two-point shapes keep a fixed `[anchor, current]` pair where the
    /// second point is replaced during the drag; the stroke kinds accumulate
    /// points instead.
    pub fn is_two_point(&self) -> bool {
        matches!(self, ShapeKind::Line | ShapeKind::Rectangle | ShapeKind::Circle)
    }

    /// Whether this kind paints with the backdrop instead of its own color.
    pub fn erases(&self) -> bool {
        matches!(self, ShapeKind::Eraser)
    }
}

/// A committed annotation. Immutable once it enters the scene; shared
/// reference-counted so the scene and tests can hold it cheaply.
#[derive(Debug, Clone)]
pub struct DrawnElement {
    id: Uuid,
    kind: ShapeKind,
    points: Vec<Pos2>,
    color: Color32,
    width: f32,
}

pub type ElementRef = Arc<DrawnElement>;

impl DrawnElement {
    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn kind(&self) -> ShapeKind {
        self.kind
    }

    pub fn points(&self) -> &[Pos2] {
        &self.points
    }

    pub fn color(&self) -> Color32 {
        self.color
    }

    pub fn width(&self) -> f32 {
        self.width
    }
}

/// An annotation while it is being drawn. Lives in the interaction
/// controller, not in the scene; committing converts it into an immutable
/// [`DrawnElement`].
#[derive(Debug, Clone)]
pub struct PendingElement {
    id: Uuid,
    kind: ShapeKind,
    points: Vec<Pos2>,
    color: Color32,
    width: f32,
}

impl PendingElement {
    /// Start a new annotation anchored at the pointer position. Two-point
    /// shapes start with both points on the anchor so they always hold
    /// exactly two points.
    pub fn start(kind: ShapeKind, anchor: Pos2, color: Color32, width: f32) -> Self {
        let points = if kind.is_two_point() {
            vec![anchor, anchor]
        } else {
            vec![anchor]
        };
        let width = if kind.erases() { ERASER_WIDTH } else { width };
        Self {
            id: Uuid::new_v4(),
            kind,
            points,
            color,
            width,
        }
    }

    /// Extend with the latest pointer position: append for stroke kinds,
    /// replace the current endpoint for two-point shapes.
    pub fn extend(&mut self, pos: Pos2) {
        if self.kind.is_two_point() {
            self.points[1] = pos;
        } else {
            self.points.push(pos);
        }
    }

    pub fn kind(&self) -> ShapeKind {
        self.kind
    }

    pub fn points(&self) -> &[Pos2] {
        &self.points
    }

    pub fn color(&self) -> Color32 {
        self.color
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    /// Seal the annotation into its committed, immutable form.
    pub fn commit(self) -> ElementRef {
        Arc::new(DrawnElement {
            id: self.id,
            kind: self.kind,
            points: self.points,
            color: self.color,
            width: self.width,
        })
    }
}
