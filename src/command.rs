use crate::element::ElementRef;
use crate::placed_image::PlacedImage;
use crate::scene::Scene;
use egui::{Color32, Rect, Vec2};
use image::RgbaImage;
use log::debug;
use std::sync::Arc;

/// A single scene mutation issued by the interaction controller or the
/// panels. Every change to the scene goes through here; nothing writes
/// scene fields from arbitrary call sites.
#[derive(Clone)]
pub enum Command {
    /// Place a furniture photo on top of the existing ones.
    AddImage(PlacedImage),

    /// Move the image at `index` by an incremental pointer delta.
    TranslateImage { index: usize, delta: Vec2 },

    /// Give the image at `index` a new display rectangle.
    ResizeImage { index: usize, rect: Rect },

    /// Append a finished annotation to the committed set.
    CommitElement(ElementRef),

    /// Switch the background to a solid fill.
    SetBackgroundColor(Color32),

    /// Switch the background to a cover-fit backdrop photo.
    SetBackgroundImage(Arc<RgbaImage>),
}

impl std::fmt::Debug for Command {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Command::AddImage(image) => f.debug_tuple("AddImage").field(image).finish(),
            Command::TranslateImage { index, delta } => f
                .debug_struct("TranslateImage")
                .field("index", index)
                .field("delta", delta)
                .finish(),
            Command::ResizeImage { index, rect } => f
                .debug_struct("ResizeImage")
                .field("index", index)
                .field("rect", rect)
                .finish(),
            Command::CommitElement(element) => f
                .debug_struct("CommitElement")
                .field("kind", &element.kind())
                .field("points", &element.points().len())
                .finish(),
            Command::SetBackgroundColor(color) => {
                f.debug_tuple("SetBackgroundColor").field(color).finish()
            }
            Command::SetBackgroundImage(image) => f
                .debug_struct("SetBackgroundImage")
                .field("size", &[image.width(), image.height()])
                .finish(),
        }
    }
}

impl Command {
    /// Apply this mutation to the scene. A rejected resize (below the
    /// minimum size) is silent; the scene keeps the previous rectangle.
    pub fn apply(self, scene: &mut Scene) {
        match self {
            Command::AddImage(image) => {
                scene.add_image(image);
            }
            Command::TranslateImage { index, delta } => {
                scene.translate_image(index, delta);
            }
            Command::ResizeImage { index, rect } => {
                if !scene.resize_image(index, rect) {
                    debug!("resize of image {index} rejected, keeping previous rect");
                }
            }
            Command::CommitElement(element) => {
                scene.push_element(element);
            }
            Command::SetBackgroundColor(color) => {
                scene.set_background_color(color);
            }
            Command::SetBackgroundImage(image) => {
                scene.set_background_image(image);
            }
        }
    }
}
