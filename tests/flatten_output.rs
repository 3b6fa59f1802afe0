use egui::{Color32, Pos2, Vec2};
use image::{Rgba, RgbaImage};
use roomsketch::renderer::{CANVAS_HEIGHT, CANVAS_WIDTH, EXPORT_MIME};
use roomsketch::{
    EditorController, Flattened, PendingElement, PlacedImage, Renderer, Scene, ShapeKind,
    StrokeStyle, Tool,
};
use std::sync::Arc;
use uuid::Uuid;

fn decode(flattened: &Flattened) -> image::RgbImage {
    image::load_from_memory(&flattened.bytes)
        .expect("export must be a decodable image")
        .to_rgb8()
}

fn px(img: &image::RgbImage, x: u32, y: u32) -> [u8; 3] {
    img.get_pixel(x, y).0
}

// JPEG is lossy; compare with a tolerance wide enough for ringing but far
// narrower than the distance between the colors used here.
fn close(a: [u8; 3], b: [u8; 3]) -> bool {
    a.iter()
        .zip(b.iter())
        .all(|(x, y)| (*x as i16 - *y as i16).abs() <= 60)
}

fn commit_stroke(scene: &mut Scene, kind: ShapeKind, points: &[Pos2], color: Color32, width: f32) {
    let mut pending = PendingElement::start(kind, points[0], color, width);
    for point in &points[1..] {
        pending.extend(*point);
    }
    scene.push_element(pending.commit());
}

fn solid_image(color: [u8; 4]) -> PlacedImage {
    let raster = Arc::new(RgbaImage::from_pixel(300, 200, Rgba(color)));
    PlacedImage::at_default_placement(Uuid::new_v4(), Some(raster), [300, 200])
}

const RED: Color32 = Color32::from_rgb(255, 0, 0);
const BLUE: Color32 = Color32::from_rgb(0, 0, 255);
const WHITE: [u8; 3] = [255, 255, 255];

#[test]
fn test_empty_scene_exports_a_background_only_frame() {
    let mut renderer = Renderer::new();
    let scene = Scene::new();

    let flattened = renderer.flatten(&scene).unwrap();
    assert_eq!(flattened.mime, EXPORT_MIME);
    assert!(!flattened.bytes.is_empty());
    assert_eq!(flattened.bytes[..2], [0xFF, 0xD8]);

    let decoded = decode(&flattened);
    assert_eq!((decoded.width(), decoded.height()), (CANVAS_WIDTH, CANVAS_HEIGHT));
    assert!(close(px(&decoded, 430, 287), WHITE));
}

#[test]
fn test_later_element_wins_where_opaque() {
    let mut renderer = Renderer::new();
    let mut scene = Scene::new();
    let through = [Pos2::new(80.0, 100.0), Pos2::new(120.0, 100.0)];
    commit_stroke(&mut scene, ShapeKind::Freehand, &through, RED, 10.0);
    commit_stroke(&mut scene, ShapeKind::Freehand, &through, BLUE, 10.0);

    let decoded = decode(&renderer.flatten(&scene).unwrap());
    assert!(close(px(&decoded, 100, 100), [0, 0, 255]));
}

#[test]
fn test_eraser_overpaints_without_deleting() {
    let mut renderer = Renderer::new();
    let mut scene = Scene::new();
    let through = [Pos2::new(80.0, 100.0), Pos2::new(120.0, 100.0)];
    commit_stroke(&mut scene, ShapeKind::Freehand, &through, Color32::BLACK, 8.0);
    let before = scene.elements().len();

    commit_stroke(&mut scene, ShapeKind::Eraser, &through, Color32::BLACK, 8.0);
    assert_eq!(scene.elements().len(), before + 1);

    // The earlier stroke is still in the scene but the render shows the
    // background where the eraser went over it.
    let decoded = decode(&renderer.flatten(&scene).unwrap());
    assert!(close(px(&decoded, 100, 100), WHITE));
}

#[test]
fn test_eraser_reveals_the_backdrop_image() {
    let mut renderer = Renderer::new();
    let mut scene = Scene::new();
    let backdrop = Arc::new(RgbaImage::from_pixel(
        CANVAS_WIDTH,
        CANVAS_HEIGHT,
        Rgba([0, 180, 0, 255]),
    ));
    scene.set_background_image(backdrop);

    let through = [Pos2::new(80.0, 100.0), Pos2::new(120.0, 100.0)];
    commit_stroke(&mut scene, ShapeKind::Freehand, &through, Color32::BLACK, 8.0);
    commit_stroke(&mut scene, ShapeKind::Eraser, &through, Color32::BLACK, 8.0);

    let decoded = decode(&renderer.flatten(&scene).unwrap());
    assert!(close(px(&decoded, 100, 100), [0, 180, 0]));
}

#[test]
fn test_rectangle_geometry_is_order_independent() {
    let mut renderer = Renderer::new();

    let mut forward = Scene::new();
    commit_stroke(
        &mut forward,
        ShapeKind::Rectangle,
        &[Pos2::new(10.0, 10.0), Pos2::new(110.0, 60.0)],
        RED,
        5.0,
    );
    let mut backward = Scene::new();
    commit_stroke(
        &mut backward,
        ShapeKind::Rectangle,
        &[Pos2::new(110.0, 60.0), Pos2::new(10.0, 10.0)],
        RED,
        5.0,
    );

    let a = renderer.flatten(&forward).unwrap();
    let b = renderer.flatten(&backward).unwrap();
    assert_eq!(a.bytes, b.bytes);
}

#[test]
fn test_red_rectangle_outline_spans_the_box() {
    let mut renderer = Renderer::new();
    let mut scene = Scene::new();
    commit_stroke(
        &mut scene,
        ShapeKind::Rectangle,
        &[Pos2::new(10.0, 10.0), Pos2::new(110.0, 60.0)],
        RED,
        5.0,
    );

    let decoded = decode(&renderer.flatten(&scene).unwrap());
    // Edges are stroked, the interior stays background.
    assert!(close(px(&decoded, 10, 35), [255, 0, 0]));
    assert!(close(px(&decoded, 110, 35), [255, 0, 0]));
    assert!(close(px(&decoded, 60, 10), [255, 0, 0]));
    assert!(close(px(&decoded, 60, 60), [255, 0, 0]));
    assert!(close(px(&decoded, 60, 35), WHITE));
}

#[test]
fn test_circle_is_centre_plus_radius() {
    let mut renderer = Renderer::new();
    let mut scene = Scene::new();
    // Centre (200, 200), radius 40 towards +x.
    commit_stroke(
        &mut scene,
        ShapeKind::Circle,
        &[Pos2::new(200.0, 200.0), Pos2::new(240.0, 200.0)],
        RED,
        6.0,
    );

    let decoded = decode(&renderer.flatten(&scene).unwrap());
    assert!(close(px(&decoded, 240, 200), [255, 0, 0]));
    assert!(close(px(&decoded, 160, 200), [255, 0, 0]));
    assert!(close(px(&decoded, 200, 240), [255, 0, 0]));
    assert!(close(px(&decoded, 200, 160), [255, 0, 0]));
    // A bounding-box ellipse between the two points would have painted
    // nothing left of x = 200; the centre stays hollow either way.
    assert!(close(px(&decoded, 200, 200), WHITE));
}

#[test]
fn test_placed_images_paint_over_annotations() {
    let mut renderer = Renderer::new();
    let mut scene = Scene::new();
    commit_stroke(
        &mut scene,
        ShapeKind::Freehand,
        &[Pos2::new(80.0, 100.0), Pos2::new(120.0, 100.0)],
        RED,
        10.0,
    );
    scene.add_image(solid_image([0, 180, 0, 255]));

    // The image rect (50,50)-(200,150) covers the stroke.
    let decoded = decode(&renderer.flatten(&scene).unwrap());
    assert!(close(px(&decoded, 100, 100), [0, 180, 0]));
}

#[test]
fn test_undecoded_image_is_skipped_until_ready() {
    let mut renderer = Renderer::new();
    let mut scene = Scene::new();
    let source = Uuid::new_v4();
    scene.add_image(PlacedImage::new(
        source,
        None,
        [300, 200],
        Pos2::new(50.0, 50.0),
        Vec2::new(150.0, 100.0),
    ));

    let decoded = decode(&renderer.flatten(&scene).unwrap());
    assert!(close(px(&decoded, 100, 100), WHITE));

    let raster = Arc::new(RgbaImage::from_pixel(300, 200, Rgba([0, 180, 0, 255])));
    scene.attach_raster(source, &raster);
    let decoded = decode(&renderer.flatten(&scene).unwrap());
    assert!(close(px(&decoded, 100, 100), [0, 180, 0]));
}

#[test]
fn test_export_excludes_selection_and_preview() {
    let mut renderer = Renderer::new();
    let mut scene = Scene::new();
    scene.add_image(solid_image([220, 220, 40, 255]));

    let baseline = renderer.flatten(&scene).unwrap();

    // Select the image and hover with a drawing tool armed, so the
    // interactive frame carries handles and the size-preview circle.
    let style = StrokeStyle {
        color: RED,
        width: 10.0,
    };
    let mut controller = EditorController::new();
    controller.pointer_down(Pos2::new(100.0, 100.0), &scene, Tool::Select, style);
    let _ = controller.pointer_up();
    let _ = controller.pointer_move(Pos2::new(400.0, 300.0), &scene);

    let frame_with_ui = renderer.render_frame(&scene, &controller, Tool::Pencil, style);
    // Handle square at the image's top-left corner.
    assert_eq!(frame_with_ui.get_pixel(50, 50).0, [30, 120, 255, 255]);
    let clean_frame = renderer.render_frame(&scene, &EditorController::new(), Tool::Select, style);
    assert_eq!(clean_frame.get_pixel(50, 50).0, [220, 220, 40, 255]);
    assert_ne!(frame_with_ui.as_raw(), clean_frame.as_raw());

    let exported = renderer.flatten(&scene).unwrap();
    assert_eq!(exported.bytes, baseline.bytes);
    let decoded = decode(&exported);
    assert!(close(px(&decoded, 52, 52), [220, 220, 40]));
}

#[test]
fn test_in_progress_draw_is_excluded_until_committed() {
    let mut renderer = Renderer::new();
    let mut scene = Scene::new();
    let style = StrokeStyle {
        color: RED,
        width: 10.0,
    };
    let mut controller = EditorController::new();
    controller.pointer_down(Pos2::new(280.0, 300.0), &scene, Tool::Pencil, style);
    let _ = controller.pointer_move(Pos2::new(320.0, 300.0), &scene);

    // Live feedback shows the stroke; the export does not.
    let frame = renderer.render_frame(&scene, &controller, Tool::Pencil, style);
    assert_eq!(frame.get_pixel(300, 300).0, [255, 0, 0, 255]);
    let decoded = decode(&renderer.flatten(&scene).unwrap());
    assert!(close(px(&decoded, 300, 300), WHITE));

    if let Some(command) = controller.pointer_leave() {
        command.apply(&mut scene);
    }
    let decoded = decode(&renderer.flatten(&scene).unwrap());
    assert!(close(px(&decoded, 300, 300), [255, 0, 0]));
}
