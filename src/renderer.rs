use crate::controller::EditorController;
use crate::element::{PendingElement, ShapeKind, ERASER_WIDTH};
use crate::error::ExportError;
use crate::hit_testing::{Corner, HANDLE_SIZE};
use crate::raster::{self, PaintSource};
use crate::scene::{Background, Scene};
use crate::tools::{StrokeStyle, Tool};
use egui::{Color32, Pos2, Rect, Vec2};
use image::{DynamicImage, RgbaImage};
use log::info;
use std::sync::Arc;

/// Fixed canvas dimensions; exports use the same size.
pub const CANVAS_WIDTH: u32 = 860;
pub const CANVAS_HEIGHT: u32 = 574;

pub const EXPORT_MIME: &str = "image/jpeg";
const JPEG_QUALITY: u8 = 90;

const SELECTION_COLOR: Color32 = Color32::from_rgb(30, 120, 255);
const PREVIEW_COLOR: Color32 = Color32::from_rgb(120, 120, 120);

/// The flattened composition handed to the generation collaborator.
pub struct Flattened {
    pub bytes: Vec<u8>,
    pub mime: &'static str,
}

/// Paints the scene onto a raster frame, deterministically and without side
/// effects, and produces the clean flattened export.
///
/// Paint order, back to front: background, committed annotations in
/// insertion order, the in-progress annotation, placed images in insertion
/// order, then (interactive frames only) selection affordances and the
/// brush-size preview.
pub struct Renderer {
    // Cover-fit of the current backdrop, keyed by its allocation so a new
    // backdrop invalidates the cache.
    backdrop_cache: Option<(usize, RgbaImage)>,
}

impl Renderer {
    pub fn new() -> Self {
        Self {
            backdrop_cache: None,
        }
    }

    /// The full interactive frame: scene content plus selection affordances
    /// and the live brush-size preview.
    pub fn render_frame(
        &mut self,
        scene: &Scene,
        controller: &EditorController,
        tool: Tool,
        style: StrokeStyle,
    ) -> RgbaImage {
        let mut frame = self.composite(scene, controller.in_progress());

        if let Some(index) = controller.selected() {
            if let Some(image) = scene.image(index) {
                paint_selection(&mut frame, image.rect());
            }
        }

        if let Some(pos) = controller.brush_preview(tool) {
            let width = if tool == Tool::Eraser {
                ERASER_WIDTH
            } else {
                style.width
            };
            let color = if tool == Tool::Eraser {
                PREVIEW_COLOR
            } else {
                style.color
            };
            raster::circle_outline(
                &mut frame,
                &PaintSource::Solid(raster::color(color)),
                pos,
                width * 0.5,
                1.0,
            );
        }

        frame
    }

    /// The committed composite only: background, committed annotations and
    /// placed images. No selection UI, no preview, no in-progress draw.
    pub fn flatten(&mut self, scene: &Scene) -> Result<Flattened, ExportError> {
        let frame = self.composite(scene, None);
        let rgb = DynamicImage::ImageRgba8(frame).to_rgb8();
        let mut bytes = Vec::new();
        let mut encoder =
            image::codecs::jpeg::JpegEncoder::new_with_quality(&mut bytes, JPEG_QUALITY);
        encoder.encode_image(&rgb)?;
        info!(
            "flattened {} elements / {} images into {} bytes",
            scene.elements().len(),
            scene.images().len(),
            bytes.len()
        );
        Ok(Flattened {
            bytes,
            mime: EXPORT_MIME,
        })
    }

    fn composite(&mut self, scene: &Scene, in_progress: Option<&PendingElement>) -> RgbaImage {
        let base = self.background_layer(scene);
        let mut frame = base.clone();
        for element in scene.elements() {
            paint_shape(
                &mut frame,
                &base,
                element.kind(),
                element.points(),
                element.color(),
                element.width(),
            );
        }
        // The in-progress annotation renders identically to a committed one,
        // giving live feedback, but stays out of the committed set.
        if let Some(pending) = in_progress {
            paint_shape(
                &mut frame,
                &base,
                pending.kind(),
                pending.points(),
                pending.color(),
                pending.width(),
            );
        }
        paint_images(&mut frame, scene);
        frame
    }

    /// Background-only layer at canvas size. Also the source the eraser
    /// paints from.
    fn background_layer(&mut self, scene: &Scene) -> RgbaImage {
        match scene.background() {
            Background::Color(color) => {
                RgbaImage::from_pixel(CANVAS_WIDTH, CANVAS_HEIGHT, raster::color(*color))
            }
            Background::Image(backdrop) => {
                let key = Arc::as_ptr(backdrop) as usize;
                if let Some((cached_key, cached)) = &self.backdrop_cache {
                    if *cached_key == key {
                        return cached.clone();
                    }
                }
                let fitted = raster::cover_fit(backdrop, CANVAS_WIDTH, CANVAS_HEIGHT);
                self.backdrop_cache = Some((key, fitted.clone()));
                fitted
            }
        }
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new()
    }
}

fn paint_shape(
    frame: &mut RgbaImage,
    base: &RgbaImage,
    kind: ShapeKind,
    points: &[Pos2],
    color: Color32,
    width: f32,
) {
    let paint = if kind.erases() {
        PaintSource::Backdrop(base)
    } else {
        PaintSource::Solid(raster::color(color))
    };
    match kind {
        ShapeKind::Freehand | ShapeKind::Eraser => {
            raster::polyline(frame, &paint, points, width);
        }
        ShapeKind::Line => {
            if let [a, b] = points {
                raster::thick_segment(frame, &paint, *a, *b, width);
            }
        }
        ShapeKind::Rectangle => {
            if let [a, b] = points {
                // Normalized, so the two corners can arrive in any order.
                raster::rect_outline(frame, &paint, Rect::from_two_pos(*a, *b), width);
            }
        }
        ShapeKind::Circle => {
            // Centre + radius, not a bounding-box ellipse.
            if let [center, edge] = points {
                raster::circle_outline(frame, &paint, *center, center.distance(*edge), width);
            }
        }
    }
}

fn paint_images(frame: &mut RgbaImage, scene: &Scene) {
    for image in scene.images() {
        // An image whose decode has not completed is skipped, never blocked on.
        if let Some(pixels) = image.raster() {
            raster::blit_scaled(frame, pixels, image.rect());
        }
    }
}

fn paint_selection(frame: &mut RgbaImage, rect: Rect) {
    let paint = PaintSource::Solid(raster::color(SELECTION_COLOR));
    raster::rect_outline(frame, &paint, rect, 1.0);
    for corner in Corner::ALL {
        raster::fill_rect(
            frame,
            &paint,
            Rect::from_center_size(corner.of(rect), Vec2::splat(HANDLE_SIZE)),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn frame_has_canvas_dimensions() {
        let mut renderer = Renderer::new();
        let scene = Scene::new();
        let controller = EditorController::new();
        let frame = renderer.render_frame(&scene, &controller, Tool::Select, StrokeStyle::default());
        assert_eq!((frame.width(), frame.height()), (CANVAS_WIDTH, CANVAS_HEIGHT));
    }

    #[test]
    fn default_background_is_white() {
        let mut renderer = Renderer::new();
        let scene = Scene::new();
        let controller = EditorController::new();
        let frame = renderer.render_frame(&scene, &controller, Tool::Select, StrokeStyle::default());
        assert_eq!(frame.get_pixel(10, 10).0, [255, 255, 255, 255]);
    }
}
