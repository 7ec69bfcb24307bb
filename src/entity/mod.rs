// ┌──────────────── Entity Composition ─────────────────┐
// │                                                     │
// │  Entity ─────────┬── Draw        (stroke a box)     │
// │   position       └── Positioned  (camera target)    │
// │   size                                              │
// │   color                                             │
// │     ▲                                               │
// │     │ body                                          │
// │  Player ─────────┬── Draw        (delegates)        │
// │   keys           └── Positioned  (delegates)        │
// │   speed                                             │
// └─────────────────────────────────────────────────────┘
pub mod player;

use crate::engine::{Point, Rect, Size, Surface};

pub use player::{Direction, Player};

/// Drawn every frame, shifted by the camera offset
pub trait Draw {
    fn draw<S: Surface>(&self, surface: &S, offset: Point);
}

/// Has a world position the camera can track
pub trait Positioned {
    fn position(&self) -> Point;
}

/// Axis aligned box, drawn as a stroked rectangle in its debug color
#[derive(Debug, Clone, PartialEq)]
pub struct Entity {
    pub position: Point,
    pub size: Size,
    pub color: String,
}

impl Entity {
    pub fn new(position: Point, size: Size, color: impl Into<String>) -> Self {
        Entity {
            position,
            size,
            color: color.into(),
        }
    }

    /// Where the box lands on screen for a given camera offset
    pub fn screen_rect(&self, offset: Point) -> Rect {
        Rect::new(self.position.translate(offset), self.size)
    }
}

impl Draw for Entity {
    fn draw<S: Surface>(&self, surface: &S, offset: Point) {
        surface.stroke_rect(&self.screen_rect(offset), &self.color);
    }
}

impl Positioned for Entity {
    fn position(&self) -> Point {
        self.position
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::cell::RefCell;

    /// What a surface was asked to do, in call order
    #[derive(Debug, Clone, PartialEq)]
    pub(crate) enum DrawCall {
        Clear(Rect),
        Stroke(Rect, String),
        Image(u32, Rect, Rect),
    }

    /// Image stand-in, `id` identifies it in recorded calls
    #[derive(Debug, Clone, Copy)]
    pub(crate) struct FakeImage {
        pub(crate) id: u32,
        pub(crate) ready: bool,
    }

    impl crate::engine::Bitmap for FakeImage {
        fn is_ready(&self) -> bool {
            self.ready
        }
    }

    pub(crate) struct RecordingSurface {
        pub(crate) size: Size,
        pub(crate) calls: RefCell<Vec<DrawCall>>,
    }

    impl RecordingSurface {
        pub(crate) fn new(size: Size) -> Self {
            RecordingSurface {
                size,
                calls: RefCell::new(Vec::new()),
            }
        }

        pub(crate) fn take_calls(&self) -> Vec<DrawCall> {
            self.calls.borrow_mut().drain(..).collect()
        }
    }

    impl Surface for RecordingSurface {
        type Image = FakeImage;

        fn size(&self) -> Size {
            self.size
        }

        fn clear(&self, rect: &Rect) {
            self.calls.borrow_mut().push(DrawCall::Clear(*rect));
        }

        fn stroke_rect(&self, rect: &Rect, color: &str) {
            self.calls
                .borrow_mut()
                .push(DrawCall::Stroke(*rect, color.to_string()));
        }

        fn draw_image_region(&self, image: &FakeImage, source: &Rect, destination: &Rect) {
            self.calls
                .borrow_mut()
                .push(DrawCall::Image(image.id, *source, *destination));
        }
    }

    #[test]
    fn entity_strokes_box_shifted_by_offset() {
        let surface = RecordingSurface::new(Size::new(800.0, 600.0));
        let crate_box = Entity::new(Point::new(300.0, 605.0), Size::new(50.0, 50.0), "#ff5c00");

        crate_box.draw(&surface, Point::new(-100.0, -305.0));

        assert_eq!(
            surface.take_calls(),
            vec![DrawCall::Stroke(
                Rect::new(Point::new(200.0, 300.0), Size::new(50.0, 50.0)),
                "#ff5c00".to_string()
            )]
        );
    }

    #[test]
    fn zero_offset_draws_at_world_position() {
        let entity = Entity::new(Point::new(12.5, -4.0), Size::new(1.0, 2.0), "red");
        assert_eq!(
            entity.screen_rect(Point::ORIGIN),
            Rect::new(Point::new(12.5, -4.0), Size::new(1.0, 2.0))
        );
    }
}
