use crate::element::ElementRef;
use crate::placed_image::PlacedImage;
use egui::{Color32, Rect, Vec2};
use image::RgbaImage;
use log::debug;
use std::sync::Arc;
use uuid::Uuid;

/// Canvas background: a solid fill or a cover-fit backdrop photo. Setting
/// one clears the other.
#[derive(Clone)]
pub enum Background {
    Color(Color32),
    Image(Arc<RgbaImage>),
}

impl Default for Background {
    fn default() -> Self {
        Background::Color(Color32::WHITE)
    }
}

/// The scene model: placed furniture photos, committed annotations and the
/// background. Pure data; the only behavior is invariant enforcement on
/// resize and background exclusivity.
///
/// Placed images and committed elements are owned exclusively here. The
/// interaction controller refers into this container by index and never
/// holds copies.
pub struct Scene {
    images: Vec<PlacedImage>,
    elements: Vec<ElementRef>,
    background: Background,
    version: u64,
}

impl Scene {
    pub fn new() -> Self {
        Self {
            images: Vec::new(),
            elements: Vec::new(),
            background: Background::default(),
            version: 0,
        }
    }

    pub fn images(&self) -> &[PlacedImage] {
        &self.images
    }

    pub fn image(&self, index: usize) -> Option<&PlacedImage> {
        self.images.get(index)
    }

    pub fn elements(&self) -> &[ElementRef] {
        &self.elements
    }

    pub fn background(&self) -> &Background {
        &self.background
    }

    /// Monotonic change counter, bumped on every mutation. Used to decide
    /// when the rendered frame needs recomputing.
    pub fn version(&self) -> u64 {
        self.version
    }

    /// Add a placed image on top of the existing ones; returns its index.
    pub fn add_image(&mut self, image: PlacedImage) -> usize {
        debug!("placing image {} at {:?}", image.id(), image.position());
        self.images.push(image);
        self.bump();
        self.images.len() - 1
    }

    pub fn translate_image(&mut self, index: usize, delta: Vec2) {
        if let Some(image) = self.images.get_mut(index) {
            image.translate(delta);
            self.bump();
        }
    }

    /// Resize a placed image. A rectangle at or below the minimum size is
    /// rejected and the previous geometry kept; returns whether the resize
    /// was applied.
    pub fn resize_image(&mut self, index: usize, new_rect: Rect) -> bool {
        let Some(image) = self.images.get_mut(index) else {
            return false;
        };
        let applied = image.resize(new_rect);
        if applied {
            self.bump();
        }
        applied
    }

    /// Append a committed annotation; first-drawn stays at the bottom.
    pub fn push_element(&mut self, element: ElementRef) {
        self.elements.push(element);
        self.bump();
    }

    pub fn set_background_color(&mut self, color: Color32) {
        self.background = Background::Color(color);
        self.bump();
    }

    pub fn set_background_image(&mut self, image: Arc<RgbaImage>) {
        self.background = Background::Image(image);
        self.bump();
    }

    /// Deliver a late decode to every placement created from `source` that
    /// is still waiting for pixels.
    pub fn attach_raster(&mut self, source: Uuid, raster: &Arc<RgbaImage>) {
        let mut attached = false;
        for image in &mut self.images {
            if image.source() == source && !image.is_ready() {
                image.attach_raster(Arc::clone(raster));
                attached = true;
            }
        }
        if attached {
            self.bump();
        }
    }

    fn bump(&mut self) {
        self.version = self.version.wrapping_add(1);
    }
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}
