use egui::{Color32, Pos2, Rect, Vec2};
use image::{Rgba, RgbaImage};
use roomsketch::placed_image::{PlacedImage, MIN_IMAGE_SIZE};
use roomsketch::scene::{Background, Scene};
use roomsketch::{PendingElement, ShapeKind};
use std::sync::Arc;
use uuid::Uuid;

fn create_test_image() -> PlacedImage {
    let raster = Arc::new(RgbaImage::from_pixel(300, 200, Rgba([0, 200, 0, 255])));
    PlacedImage::at_default_placement(Uuid::new_v4(), Some(raster), [300, 200])
}

#[test]
fn test_default_placement() {
    let image = create_test_image();

    // Width capped at 150, height scaled to keep the 300x200 aspect ratio.
    assert_eq!(image.position(), Pos2::new(50.0, 50.0));
    assert_eq!(image.size(), Vec2::new(150.0, 100.0));
}

#[test]
fn test_default_placement_of_narrow_source() {
    let raster = Arc::new(RgbaImage::from_pixel(100, 80, Rgba([0, 200, 0, 255])));
    let image = PlacedImage::at_default_placement(Uuid::new_v4(), Some(raster), [100, 80]);

    // Narrower than the cap: placed at its intrinsic width.
    assert_eq!(image.size(), Vec2::new(100.0, 80.0));
}

#[test]
fn test_image_translate() {
    let mut image = create_test_image();
    let original = image.rect();

    image.translate(Vec2::new(15.0, 25.0));

    let moved = image.rect();
    assert_eq!(moved.min, original.min + Vec2::new(15.0, 25.0));
    assert_eq!(moved.size(), original.size());
}

#[test]
fn test_image_resize() {
    let mut image = create_test_image();

    let applied = image.resize(Rect::from_min_size(
        Pos2::new(60.0, 40.0),
        Vec2::new(75.0, 50.0),
    ));

    assert!(applied);
    assert_eq!(image.position(), Pos2::new(60.0, 40.0));
    assert_eq!(image.size(), Vec2::new(75.0, 50.0));
}

#[test]
fn test_resize_below_minimum_is_rejected() {
    let mut image = create_test_image();
    let original = image.rect();

    let tiny = Rect::from_min_size(Pos2::new(50.0, 50.0), Vec2::new(MIN_IMAGE_SIZE, 40.0));
    assert!(!image.resize(tiny));
    assert_eq!(image.rect(), original);

    let flat = Rect::from_min_size(Pos2::new(50.0, 50.0), Vec2::new(40.0, 4.0));
    assert!(!image.resize(flat));
    assert_eq!(image.rect(), original);
}

#[test]
fn test_resize_floor_holds_across_any_sequence() {
    let mut scene = Scene::new();
    let index = scene.add_image(create_test_image());

    let attempts = [
        Rect::from_min_size(Pos2::new(50.0, 50.0), Vec2::new(8.0, 90.0)),
        Rect::from_min_size(Pos2::new(50.0, 50.0), Vec2::new(120.0, 10.0)),
        Rect::from_min_size(Pos2::new(50.0, 50.0), Vec2::new(60.0, 40.0)),
        Rect::from_min_size(Pos2::new(50.0, 50.0), Vec2::new(2.0, 2.0)),
        Rect::from_min_size(Pos2::new(50.0, 50.0), Vec2::new(11.0, 11.0)),
    ];
    for rect in attempts {
        scene.resize_image(index, rect);
        let image = scene.image(index).unwrap();
        assert!(image.size().x > MIN_IMAGE_SIZE);
        assert!(image.size().y > MIN_IMAGE_SIZE);
    }

    // The last valid attempt is the one that stuck.
    assert_eq!(scene.image(index).unwrap().size(), Vec2::new(11.0, 11.0));
}

#[test]
fn test_image_hit_testing() {
    let image = create_test_image();

    assert!(image.hit_test(Pos2::new(100.0, 100.0)));
    assert!(image.hit_test(Pos2::new(50.0, 50.0)));
    assert!(!image.hit_test(Pos2::new(250.0, 100.0)));
    assert!(!image.hit_test(Pos2::new(100.0, 300.0)));
}

#[test]
fn test_pending_image_tolerates_missing_raster() {
    let source = Uuid::new_v4();
    let mut scene = Scene::new();
    let index = scene.add_image(PlacedImage::new(
        source,
        None,
        [300, 200],
        Pos2::new(50.0, 50.0),
        Vec2::new(150.0, 100.0),
    ));
    assert!(!scene.image(index).unwrap().is_ready());

    // A late decode delivers the pixels to the existing placement.
    let raster = Arc::new(RgbaImage::from_pixel(300, 200, Rgba([9, 9, 9, 255])));
    scene.attach_raster(source, &raster);
    assert!(scene.image(index).unwrap().is_ready());
}

#[test]
fn test_committed_element_keeps_its_data() {
    let mut pending =
        PendingElement::start(ShapeKind::Freehand, Pos2::new(10.0, 10.0), Color32::RED, 3.0);
    pending.extend(Pos2::new(20.0, 15.0));
    pending.extend(Pos2::new(30.0, 30.0));

    let element = pending.commit();
    assert_eq!(element.kind(), ShapeKind::Freehand);
    assert_eq!(element.points().len(), 3);
    assert_eq!(element.color(), Color32::RED);
    assert_eq!(element.width(), 3.0);
}

#[test]
fn test_background_exclusivity() {
    let mut scene = Scene::new();
    assert!(matches!(scene.background(), Background::Color(c) if *c == Color32::WHITE));

    let backdrop = Arc::new(RgbaImage::from_pixel(32, 32, Rgba([1, 2, 3, 255])));
    scene.set_background_image(backdrop);
    assert!(matches!(scene.background(), Background::Image(_)));

    scene.set_background_color(Color32::LIGHT_GRAY);
    assert!(matches!(scene.background(), Background::Color(_)));
}
