use egui::{ColorImage, Context, TextureHandle, TextureId, TextureOptions};
use image::RgbaImage;
use std::collections::HashMap;
use uuid::Uuid;

/// Uploads CPU rasters to the GPU, re-uploading the canvas frame only when
/// its version changes and each thumbnail exactly once.
pub struct TextureCache {
    frame: Option<(u64, TextureHandle)>,
    thumbnails: HashMap<Uuid, TextureHandle>,
}

impl TextureCache {
    pub fn new() -> Self {
        Self {
            frame: None,
            thumbnails: HashMap::new(),
        }
    }

    /// Texture for the canvas frame; re-uploaded only when `version` moved
    /// past the cached one.
    pub fn frame(&mut self, ctx: &Context, version: u64, frame: &RgbaImage) -> TextureId {
        if let Some((cached_version, handle)) = &self.frame {
            if *cached_version == version {
                return handle.id();
            }
        }
        let handle = ctx.load_texture("canvas_frame", to_color_image(frame), TextureOptions::NEAREST);
        let id = handle.id();
        self.frame = Some((version, handle));
        id
    }

    /// Texture for a furniture thumbnail, uploaded on first use.
    pub fn thumbnail(&mut self, ctx: &Context, id: Uuid, raster: &RgbaImage) -> TextureId {
        if let Some(handle) = self.thumbnails.get(&id) {
            return handle.id();
        }
        let name = format!("thumbnail_{id}");
        let handle = ctx.load_texture(&name, to_color_image(raster), TextureOptions::LINEAR);
        let texture_id = handle.id();
        self.thumbnails.insert(id, handle);
        texture_id
    }
}

impl Default for TextureCache {
    fn default() -> Self {
        Self::new()
    }
}

fn to_color_image(raster: &RgbaImage) -> ColorImage {
    ColorImage::from_rgba_unmultiplied(
        [raster.width() as usize, raster.height() as usize],
        raster.as_raw(),
    )
}
