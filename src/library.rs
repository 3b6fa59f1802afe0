use crate::error::DecodeError;
use image::{imageops, RgbaImage};
use log::info;
use std::sync::Arc;
use uuid::Uuid;

const THUMBNAIL_LONG_EDGE: u32 = 96;

/// Decode progress of a library item.
pub enum RasterState {
    Pending,
    Ready(Arc<RgbaImage>),
    Failed,
}

/// One furniture photo handed over by the ingestion collaborator: a display
/// name, the raw bytes, and the decoded raster once it is available.
pub struct FurnitureItem {
    id: Uuid,
    name: String,
    bytes: Arc<[u8]>,
    raster: RasterState,
    thumbnail: Option<RgbaImage>,
}

impl FurnitureItem {
    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn bytes(&self) -> &Arc<[u8]> {
        &self.bytes
    }

    pub fn raster(&self) -> Option<&Arc<RgbaImage>> {
        match &self.raster {
            RasterState::Ready(raster) => Some(raster),
            _ => None,
        }
    }

    pub fn intrinsic(&self) -> Option<[u32; 2]> {
        self.raster().map(|raster| [raster.width(), raster.height()])
    }

    pub fn is_pending(&self) -> bool {
        matches!(self.raster, RasterState::Pending)
    }

    pub fn is_failed(&self) -> bool {
        matches!(self.raster, RasterState::Failed)
    }

    pub fn thumbnail(&self) -> Option<&RgbaImage> {
        self.thumbnail.as_ref()
    }
}

/// The furniture photos available for placement.
pub struct Library {
    items: Vec<FurnitureItem>,
}

impl Library {
    pub fn new() -> Self {
        Self { items: Vec::new() }
    }

    pub fn items(&self) -> &[FurnitureItem] {
        &self.items
    }

    pub fn get(&self, id: Uuid) -> Option<&FurnitureItem> {
        self.items.iter().find(|item| item.id == id)
    }

    pub fn has_pending(&self) -> bool {
        self.items.iter().any(FurnitureItem::is_pending)
    }

    /// Register a new photo; decode is requested separately by the caller.
    pub fn add(&mut self, name: String, bytes: Arc<[u8]>) -> Uuid {
        let id = Uuid::new_v4();
        info!("library item '{name}' added ({} bytes)", bytes.len());
        self.items.push(FurnitureItem {
            id,
            name,
            bytes,
            raster: RasterState::Pending,
            thumbnail: None,
        });
        id
    }

    /// Record the outcome of an item's decode.
    pub fn resolve(&mut self, id: Uuid, result: Result<Arc<RgbaImage>, DecodeError>) {
        let Some(item) = self.items.iter_mut().find(|item| item.id == id) else {
            return;
        };
        match result {
            Ok(raster) => {
                item.thumbnail = Some(make_thumbnail(&raster));
                item.raster = RasterState::Ready(raster);
            }
            Err(_) => {
                // Already logged at the decode site; the item just never
                // becomes placeable.
                item.raster = RasterState::Failed;
            }
        }
    }
}

impl Default for Library {
    fn default() -> Self {
        Self::new()
    }
}

fn make_thumbnail(raster: &RgbaImage) -> RgbaImage {
    let (w, h) = (raster.width().max(1), raster.height().max(1));
    let scale = THUMBNAIL_LONG_EDGE as f32 / w.max(h) as f32;
    if scale >= 1.0 {
        return raster.clone();
    }
    let tw = ((w as f32 * scale).round() as u32).max(1);
    let th = ((h as f32 * scale).round() as u32).max(1);
    imageops::thumbnail(raster, tw, th)
}
