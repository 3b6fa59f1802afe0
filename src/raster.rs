use egui::{Color32, Pos2, Rect};
use image::{imageops, Rgba, RgbaImage};

/// What a stamped stroke paints with: a solid color, or the pixels of a
/// backdrop layer (the eraser reveals the backdrop rather than a color).
pub enum PaintSource<'a> {
    Solid(Rgba<u8>),
    Backdrop(&'a RgbaImage),
}

pub fn color(color: Color32) -> Rgba<u8> {
    Rgba([color.r(), color.g(), color.b(), color.a()])
}

// Source-over blend in 8-bit; opaque sources just overwrite.
fn blend(dst: &mut Rgba<u8>, src: Rgba<u8>) {
    let alpha = src.0[3] as u32;
    if alpha == 255 {
        *dst = src;
        return;
    }
    if alpha == 0 {
        return;
    }
    let inv = 255 - alpha;
    for channel in 0..3 {
        dst.0[channel] = ((src.0[channel] as u32 * alpha + dst.0[channel] as u32 * inv) / 255) as u8;
    }
    dst.0[3] = (alpha + dst.0[3] as u32 * inv / 255).min(255) as u8;
}

/// Fill an axis-aligned rectangle, clipped to the image.
pub fn fill_rect(img: &mut RgbaImage, paint: &PaintSource<'_>, rect: Rect) {
    let (w, h) = (img.width() as i32, img.height() as i32);
    let x0 = (rect.min.x.floor() as i32).max(0);
    let y0 = (rect.min.y.floor() as i32).max(0);
    let x1 = (rect.max.x.ceil() as i32).min(w);
    let y1 = (rect.max.y.ceil() as i32).min(h);
    for y in y0..y1 {
        for x in x0..x1 {
            let src = sample(paint, x as u32, y as u32);
            blend(img.get_pixel_mut(x as u32, y as u32), src);
        }
    }
}

fn sample(paint: &PaintSource<'_>, x: u32, y: u32) -> Rgba<u8> {
    match paint {
        PaintSource::Solid(color) => *color,
        PaintSource::Backdrop(base) => *base.get_pixel(x, y),
    }
}

/// Stamp a filled disc centred on `(cx, cy)`. The workhorse behind strokes:
/// stamping discs along a path gives round caps and joins for free.
pub fn stamp_disc(img: &mut RgbaImage, paint: &PaintSource<'_>, cx: f32, cy: f32, radius: f32) {
    let radius = radius.max(0.5);
    let (w, h) = (img.width() as i32, img.height() as i32);
    let x0 = ((cx - radius).floor() as i32).max(0);
    let y0 = ((cy - radius).floor() as i32).max(0);
    let x1 = ((cx + radius).ceil() as i32).min(w - 1);
    let y1 = ((cy + radius).ceil() as i32).min(h - 1);
    let r_sq = radius * radius;
    for y in y0..=y1 {
        for x in x0..=x1 {
            let dx = x as f32 + 0.5 - cx;
            let dy = y as f32 + 0.5 - cy;
            if dx * dx + dy * dy <= r_sq {
                let src = sample(paint, x as u32, y as u32);
                blend(img.get_pixel_mut(x as u32, y as u32), src);
            }
        }
    }
}

/// Stamp discs along a segment at sub-pixel steps.
pub fn thick_segment(img: &mut RgbaImage, paint: &PaintSource<'_>, a: Pos2, b: Pos2, width: f32) {
    let radius = (width * 0.5).max(0.5);
    let steps = (a.distance(b) * 2.0).ceil().max(1.0) as i32;
    for i in 0..=steps {
        let t = i as f32 / steps as f32;
        stamp_disc(
            img,
            paint,
            a.x + (b.x - a.x) * t,
            a.y + (b.y - a.y) * t,
            radius,
        );
    }
}

/// Connected polyline through all points. A single point degenerates to a
/// dot, which is what a click without movement should leave behind.
pub fn polyline(img: &mut RgbaImage, paint: &PaintSource<'_>, points: &[Pos2], width: f32) {
    match points {
        [] => {}
        [point] => stamp_disc(img, paint, point.x, point.y, (width * 0.5).max(0.5)),
        _ => {
            for pair in points.windows(2) {
                thick_segment(img, paint, pair[0], pair[1], width);
            }
        }
    }
}

/// Outline of an axis-aligned rectangle drawn as four thick segments.
pub fn rect_outline(img: &mut RgbaImage, paint: &PaintSource<'_>, rect: Rect, width: f32) {
    let corners = [
        rect.left_top(),
        rect.right_top(),
        rect.right_bottom(),
        rect.left_bottom(),
        rect.left_top(),
    ];
    for pair in corners.windows(2) {
        thick_segment(img, paint, pair[0], pair[1], width);
    }
}

/// Outline of a circle, stamped along its circumference.
pub fn circle_outline(
    img: &mut RgbaImage,
    paint: &PaintSource<'_>,
    center: Pos2,
    radius: f32,
    width: f32,
) {
    let stamp_radius = (width * 0.5).max(0.5);
    if radius <= 0.5 {
        stamp_disc(img, paint, center.x, center.y, stamp_radius);
        return;
    }
    let steps = (radius * std::f32::consts::TAU * 2.0).ceil().max(8.0) as i32;
    for i in 0..steps {
        let angle = i as f32 / steps as f32 * std::f32::consts::TAU;
        stamp_disc(
            img,
            paint,
            center.x + radius * angle.cos(),
            center.y + radius * angle.sin(),
            stamp_radius,
        );
    }
}

/// Draw `src` scaled into `rect`, alpha-blending over the frame. Nearest
/// sampling; clipped to the frame bounds.
pub fn blit_scaled(img: &mut RgbaImage, src: &RgbaImage, rect: Rect) {
    if rect.width() < 1.0 || rect.height() < 1.0 || src.width() == 0 || src.height() == 0 {
        return;
    }
    let (w, h) = (img.width() as i32, img.height() as i32);
    let x0 = (rect.min.x.round() as i32).max(0);
    let y0 = (rect.min.y.round() as i32).max(0);
    let x1 = (rect.max.x.round() as i32).min(w);
    let y1 = (rect.max.y.round() as i32).min(h);
    for y in y0..y1 {
        let v = (y as f32 + 0.5 - rect.min.y) / rect.height();
        let sy = ((v * src.height() as f32) as u32).min(src.height() - 1);
        for x in x0..x1 {
            let u = (x as f32 + 0.5 - rect.min.x) / rect.width();
            let sx = ((u * src.width() as f32) as u32).min(src.width() - 1);
            blend(img.get_pixel_mut(x as u32, y as u32), *src.get_pixel(sx, sy));
        }
    }
}

/// Scale-and-crop `src` so it exactly covers a `width`×`height` frame,
/// keeping the centre.
pub fn cover_fit(src: &RgbaImage, width: u32, height: u32) -> RgbaImage {
    if src.width() == width && src.height() == height {
        return src.clone();
    }
    if src.width() == 0 || src.height() == 0 {
        return RgbaImage::from_pixel(width, height, Rgba([255, 255, 255, 255]));
    }
    let scale = (width as f32 / src.width() as f32).max(height as f32 / src.height() as f32);
    let scaled_w = ((src.width() as f32 * scale).ceil() as u32).max(width);
    let scaled_h = ((src.height() as f32 * scale).ceil() as u32).max(height);
    let resized = imageops::resize(src, scaled_w, scaled_h, imageops::FilterType::Triangle);
    let x = (scaled_w - width) / 2;
    let y = (scaled_h - height) / 2;
    imageops::crop_imm(&resized, x, y, width, height).to_image()
}
