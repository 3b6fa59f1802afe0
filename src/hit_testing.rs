use crate::scene::Scene;
use egui::{CursorIcon, Pos2, Rect, Vec2};

/// Side length of the square hit-box centred on each resize handle.
pub const HANDLE_SIZE: f32 = 10.0;

/// One of the four corner grips used to resize a selected placed image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Corner {
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

impl Corner {
    pub const ALL: [Corner; 4] = [
        Corner::TopLeft,
        Corner::TopRight,
        Corner::BottomLeft,
        Corner::BottomRight,
    ];

    /// Position of this corner on the given rectangle.
    pub fn of(&self, rect: Rect) -> Pos2 {
        match self {
            Corner::TopLeft => rect.left_top(),
            Corner::TopRight => rect.right_top(),
            Corner::BottomLeft => rect.left_bottom(),
            Corner::BottomRight => rect.right_bottom(),
        }
    }

    /// The diagonally opposite corner, which stays fixed during a resize.
    pub fn opposite(&self) -> Corner {
        match self {
            Corner::TopLeft => Corner::BottomRight,
            Corner::TopRight => Corner::BottomLeft,
            Corner::BottomLeft => Corner::TopRight,
            Corner::BottomRight => Corner::TopLeft,
        }
    }

    pub fn cursor_icon(&self) -> CursorIcon {
        match self {
            Corner::TopLeft => CursorIcon::ResizeNwSe,
            Corner::TopRight => CursorIcon::ResizeNeSw,
            Corner::BottomLeft => CursorIcon::ResizeNeSw,
            Corner::BottomRight => CursorIcon::ResizeNwSe,
        }
    }
}

/// The resize handle of `rect` under `pos`, if any.
///
/// Shared by the hover-cursor update and the pointer-down dispatch so the
/// two can never disagree about what a click will do.
pub fn handle_at(pos: Pos2, rect: Rect) -> Option<Corner> {
    Corner::ALL.into_iter().find(|corner| {
        Rect::from_center_size(corner.of(rect), Vec2::splat(HANDLE_SIZE)).contains(pos)
    })
}

/// The topmost placed image under `pos`. Later additions draw on top, so
/// the scan runs back to front.
pub fn topmost_image_at(pos: Pos2, scene: &Scene) -> Option<usize> {
    scene
        .images()
        .iter()
        .enumerate()
        .rev()
        .find(|(_, image)| image.hit_test(pos))
        .map(|(index, _)| index)
}

/// The rectangle that results from dragging `corner` of `rect` to
/// `pointer` while the opposite corner stays fixed. Normalized, so dragging
/// across the fixed corner never produces negative extents.
pub fn resize_rect(rect: Rect, corner: Corner, pointer: Pos2) -> Rect {
    Rect::from_two_pos(corner.opposite().of(rect), pointer)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn handle_hit_boxes_are_centred_on_the_corners() {
        let rect = Rect::from_min_size(Pos2::new(100.0, 100.0), Vec2::new(50.0, 40.0));

        assert_eq!(handle_at(Pos2::new(100.0, 100.0), rect), Some(Corner::TopLeft));
        assert_eq!(handle_at(Pos2::new(154.0, 104.0), rect), Some(Corner::TopRight));
        assert_eq!(handle_at(Pos2::new(96.0, 136.0), rect), Some(Corner::BottomLeft));
        assert_eq!(handle_at(Pos2::new(150.0, 140.0), rect), Some(Corner::BottomRight));
        assert_eq!(handle_at(Pos2::new(125.0, 120.0), rect), None);
    }

    #[test]
    fn resize_keeps_the_opposite_corner_fixed() {
        let rect = Rect::from_min_size(Pos2::new(10.0, 20.0), Vec2::new(100.0, 80.0));

        let resized = resize_rect(rect, Corner::BottomRight, Pos2::new(160.0, 140.0));
        assert_eq!(resized.min, Pos2::new(10.0, 20.0));
        assert_eq!(resized.max, Pos2::new(160.0, 140.0));

        let resized = resize_rect(rect, Corner::TopLeft, Pos2::new(30.0, 40.0));
        assert_eq!(resized.min, Pos2::new(30.0, 40.0));
        assert_eq!(resized.max, Pos2::new(110.0, 100.0));
    }
}
