use egui::{Pos2, Rect, Vec2};
use image::RgbaImage;
use std::sync::Arc;
use uuid::Uuid;

/// Display dimensions at or below this are rejected on resize.
pub const MIN_IMAGE_SIZE: f32 = 10.0;
/// Widest a freshly placed furniture photo starts out.
pub const DEFAULT_PLACEMENT_WIDTH: f32 = 150.0;
/// Where freshly placed photos land on the canvas.
pub const DEFAULT_PLACEMENT_POS: Pos2 = Pos2::new(50.0, 50.0);

/// A furniture photo positioned and sized on the canvas.
///
/// The raster handle may be absent while the photo is still decoding; the
/// renderer skips such images and the pixels are attached once the decode
/// completes.
#[derive(Clone)]
pub struct PlacedImage {
    id: Uuid,
    source: Uuid,
    raster: Option<Arc<RgbaImage>>,
    intrinsic: [u32; 2],
    position: Pos2,
    size: Vec2,
}

// Custom Debug since the raster buffer would dump every pixel.
impl std::fmt::Debug for PlacedImage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PlacedImage")
            .field("id", &self.id)
            .field("source", &self.source)
            .field("ready", &self.raster.is_some())
            .field("intrinsic", &self.intrinsic)
            .field("position", &self.position)
            .field("size", &self.size)
            .finish()
    }
}

impl PlacedImage {
    pub fn new(
        source: Uuid,
        raster: Option<Arc<RgbaImage>>,
        intrinsic: [u32; 2],
        position: Pos2,
        size: Vec2,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            source,
            raster,
            intrinsic,
            position,
            size,
        }
    }

    /// Place a photo at the default spot, capped at
    /// [`DEFAULT_PLACEMENT_WIDTH`] with the intrinsic aspect ratio preserved.
    pub fn at_default_placement(
        source: Uuid,
        raster: Option<Arc<RgbaImage>>,
        intrinsic: [u32; 2],
    ) -> Self {
        let size = if intrinsic[0] == 0 || intrinsic[1] == 0 {
            Vec2::splat(DEFAULT_PLACEMENT_WIDTH)
        } else {
            let width = DEFAULT_PLACEMENT_WIDTH.min(intrinsic[0] as f32);
            let height = width * intrinsic[1] as f32 / intrinsic[0] as f32;
            Vec2::new(width, height)
        };
        Self::new(source, raster, intrinsic, DEFAULT_PLACEMENT_POS, size)
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    /// The furniture library item this placement was created from.
    pub fn source(&self) -> Uuid {
        self.source
    }

    pub fn raster(&self) -> Option<&Arc<RgbaImage>> {
        self.raster.as_ref()
    }

    pub fn is_ready(&self) -> bool {
        self.raster.is_some()
    }

    pub fn intrinsic(&self) -> [u32; 2] {
        self.intrinsic
    }

    pub fn position(&self) -> Pos2 {
        self.position
    }

    pub fn size(&self) -> Vec2 {
        self.size
    }

    pub fn rect(&self) -> Rect {
        Rect::from_min_size(self.position, self.size)
    }

    pub fn hit_test(&self, pos: Pos2) -> bool {
        self.rect().contains(pos)
    }

    pub fn translate(&mut self, delta: Vec2) {
        self.position += delta;
    }

    /// Apply a new display rectangle. Returns false (leaving the previous
    /// geometry untouched) when either dimension would drop to
    /// [`MIN_IMAGE_SIZE`] or below.
    pub fn resize(&mut self, new_rect: Rect) -> bool {
        if new_rect.width() <= MIN_IMAGE_SIZE || new_rect.height() <= MIN_IMAGE_SIZE {
            return false;
        }
        self.position = new_rect.min;
        self.size = new_rect.size();
        true
    }

    /// Deliver pixels from a decode that completed after placement.
    pub fn attach_raster(&mut self, raster: Arc<RgbaImage>) {
        self.intrinsic = [raster.width(), raster.height()];
        self.raster = Some(raster);
    }
}
