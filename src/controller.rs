use crate::command::Command;
use crate::element::PendingElement;
use crate::hit_testing::{self, Corner};
use crate::scene::Scene;
use crate::tools::{StrokeStyle, Tool};
use egui::{CursorIcon, Pos2, Vec2};
use log::debug;

/// What the pointer is currently doing on the canvas.
#[derive(Debug)]
pub enum InteractionState {
    Idle,
    Drawing(PendingElement),
    DraggingImage { index: usize },
    ResizingImage { index: usize, corner: Corner },
}

/// Interprets pointer input against the current tool and scene, producing
/// scene mutations as [`Command`]s.
///
/// Holds only transient, derived references into the scene (selected index,
/// engaged corner, last pointer position), never copies of scene data.
pub struct EditorController {
    state: InteractionState,
    selected: Option<usize>,
    last_pointer: Option<Pos2>,
    revision: u64,
}

impl EditorController {
    pub fn new() -> Self {
        Self {
            state: InteractionState::Idle,
            selected: None,
            last_pointer: None,
            revision: 0,
        }
    }

    pub fn state(&self) -> &InteractionState {
        &self.state
    }

    /// Index of the selected placed image, if any. Selection changes only
    /// via an explicit hit on pointer-down or a tool switch.
    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    /// The annotation currently being drawn, if any.
    pub fn in_progress(&self) -> Option<&PendingElement> {
        match &self.state {
            InteractionState::Drawing(pending) => Some(pending),
            _ => None,
        }
    }

    pub fn last_pointer(&self) -> Option<Pos2> {
        self.last_pointer
    }

    /// Monotonic change counter covering every state change that affects
    /// the rendered frame (selection, hover position, in-progress draws).
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Where to render the brush-size preview circle: only while a drawing
    /// tool is armed and no draw is in progress.
    pub fn brush_preview(&self, tool: Tool) -> Option<Pos2> {
        if tool.is_drawing() && matches!(self.state, InteractionState::Idle) {
            self.last_pointer
        } else {
            None
        }
    }

    /// Switching tools clears the selection, so resize handles are never
    /// shown under a drawing tool. Any active gesture is abandoned.
    pub fn tool_changed(&mut self) {
        self.state = InteractionState::Idle;
        self.selected = None;
        self.bump();
    }

    pub fn pointer_down(&mut self, pos: Pos2, scene: &Scene, tool: Tool, style: StrokeStyle) {
        self.last_pointer = Some(pos);
        self.bump();

        if let Some(kind) = tool.shape_kind() {
            // Drawing tools always start a new annotation at the pointer.
            self.state =
                InteractionState::Drawing(PendingElement::start(kind, pos, style.color, style.width));
            return;
        }

        // Select tool: the selected image's handles win over any image body.
        if let Some(index) = self.selected {
            if let Some(image) = scene.image(index) {
                if let Some(corner) = hit_testing::handle_at(pos, image.rect()) {
                    debug!("resizing image {index} from {corner:?}");
                    self.state = InteractionState::ResizingImage { index, corner };
                    return;
                }
            }
        }

        if let Some(index) = hit_testing::topmost_image_at(pos, scene) {
            self.selected = Some(index);
            self.state = InteractionState::DraggingImage { index };
        } else {
            self.selected = None;
        }
    }

    pub fn pointer_move(&mut self, pos: Pos2, scene: &Scene) -> Option<Command> {
        let previous = self.last_pointer.replace(pos);
        self.bump();

        match &mut self.state {
            InteractionState::Idle => None,
            InteractionState::Drawing(pending) => {
                pending.extend(pos);
                None
            }
            InteractionState::DraggingImage { index } => {
                // Incremental deltas, not absolute positions, so the drag
                // never drifts if the image rect changes underneath.
                let delta = previous.map_or(Vec2::ZERO, |last| pos - last);
                Some(Command::TranslateImage {
                    index: *index,
                    delta,
                })
            }
            InteractionState::ResizingImage { index, corner } => {
                scene.image(*index).map(|image| Command::ResizeImage {
                    index: *index,
                    rect: hit_testing::resize_rect(image.rect(), *corner, pos),
                })
            }
        }
    }

    pub fn pointer_up(&mut self) -> Option<Command> {
        if matches!(self.state, InteractionState::Idle) {
            return None;
        }
        self.finish_gesture()
    }

    /// Pointer-leave behaves as an implicit pointer-up, so an in-progress
    /// draw is committed rather than lost, and additionally clears the
    /// hover position so no stale cursor preview remains.
    pub fn pointer_leave(&mut self) -> Option<Command> {
        if matches!(self.state, InteractionState::Idle) && self.last_pointer.is_none() {
            return None;
        }
        let command = self.finish_gesture();
        self.last_pointer = None;
        command
    }

    fn finish_gesture(&mut self) -> Option<Command> {
        self.bump();
        match std::mem::replace(&mut self.state, InteractionState::Idle) {
            InteractionState::Drawing(pending) => Some(Command::CommitElement(pending.commit())),
            _ => None,
        }
    }

    /// Cursor shape for the current pointer position and state.
    pub fn cursor(&self, scene: &Scene, tool: Tool) -> CursorIcon {
        match &self.state {
            InteractionState::ResizingImage { corner, .. } => corner.cursor_icon(),
            InteractionState::DraggingImage { .. } => CursorIcon::Move,
            InteractionState::Drawing(_) => CursorIcon::Crosshair,
            InteractionState::Idle => {
                if tool.is_drawing() {
                    return CursorIcon::Crosshair;
                }
                let Some(pos) = self.last_pointer else {
                    return CursorIcon::Default;
                };
                if let Some(index) = self.selected {
                    if let Some(image) = scene.image(index) {
                        if let Some(corner) = hit_testing::handle_at(pos, image.rect()) {
                            return corner.cursor_icon();
                        }
                    }
                }
                CursorIcon::Move
            }
        }
    }

    fn bump(&mut self) {
        self.revision = self.revision.wrapping_add(1);
    }
}

impl Default for EditorController {
    fn default() -> Self {
        Self::new()
    }
}
