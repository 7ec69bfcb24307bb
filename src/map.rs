use crate::engine::{Bitmap, Point, Rect, Size, Surface};

/// Background larger than the viewport, scrolled by the camera
///
/// The visible window into the background moves opposite to the scroll
/// offset: a scroll of (-200, -50) shows the background from (200, 50).
pub struct Map<I> {
    size: Size,
    background: I,
}

impl<I: Bitmap> Map<I> {
    pub fn new(size: Size, background: I) -> Self {
        Map { size, background }
    }

    pub fn size(&self) -> Size {
        self.size
    }

    pub fn background(&self) -> &I {
        &self.background
    }

    /// Keeps the viewport window inside the map
    /// - each axis ends up in `[viewport - map, 0]`
    /// - an axis where the viewport is not smaller than the map is pinned to 0
    pub fn clamp_scroll(&self, scroll: Point, viewport: Size) -> Point {
        Point {
            x: clamp_axis(scroll.x, viewport.width, self.size.width),
            y: clamp_axis(scroll.y, viewport.height, self.size.height),
        }
    }

    /// Blits the part of the background under the viewport to (0, 0)
    /// - unscaled, source and destination have the same size
    /// - no-op until the background has finished loading
    pub fn draw<S>(&self, surface: &S, scroll: Point, viewport: Size)
    where
        S: Surface<Image = I>,
    {
        if !self.background.is_ready() {
            return;
        }
        let visible = viewport.min(self.size);
        surface.draw_image_region(
            &self.background,
            &Rect::new(Point::new(-scroll.x, -scroll.y), visible),
            &Rect::from_size(visible),
        );
    }
}

fn clamp_axis(scroll: f64, viewport: f64, extent: f64) -> f64 {
    let lowest = viewport - extent;
    if lowest >= 0.0 {
        0.0
    } else {
        scroll.clamp(lowest, 0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::tests::{DrawCall, FakeImage, RecordingSurface};

    const BACKGROUND: FakeImage = FakeImage { id: 7, ready: true };

    fn tall_map() -> Map<FakeImage> {
        Map::new(Size::new(1500.0, 2500.0), BACKGROUND)
    }

    #[test]
    fn full_view_at_origin_is_whole_background() {
        let map = tall_map();
        let surface = RecordingSurface::new(map.size());

        map.draw(&surface, Point::ORIGIN, map.size());

        let whole = Rect::from_size(Size::new(1500.0, 2500.0));
        assert_eq!(surface.take_calls(), vec![DrawCall::Image(7, whole, whole)]);
    }

    #[test]
    fn window_moves_opposite_to_scroll() {
        let map = tall_map();
        let viewport = Size::new(800.0, 600.0);
        let surface = RecordingSurface::new(viewport);

        map.draw(&surface, Point::new(-200.0, -50.0), viewport);

        assert_eq!(
            surface.take_calls(),
            vec![DrawCall::Image(
                7,
                Rect::new(Point::new(200.0, 50.0), viewport),
                Rect::from_size(viewport)
            )]
        );
    }

    #[test]
    fn map_keeps_its_background() {
        let map = tall_map();
        assert_eq!(map.background().id, 7);
        assert_eq!(map.size(), Size::new(1500.0, 2500.0));
    }

    #[test]
    fn unready_background_draws_nothing() {
        let map = Map::new(
            Size::new(1500.0, 2500.0),
            FakeImage { id: 1, ready: false },
        );
        let surface = RecordingSurface::new(Size::new(800.0, 600.0));

        map.draw(&surface, Point::ORIGIN, Size::new(800.0, 600.0));

        assert!(surface.take_calls().is_empty());
    }

    #[test]
    fn viewport_wider_than_map_is_cropped() {
        let map = tall_map();
        let viewport = Size::new(1920.0, 1080.0);
        let surface = RecordingSurface::new(viewport);

        map.draw(&surface, Point::new(0.0, -100.0), viewport);

        let visible = Size::new(1500.0, 1080.0);
        assert_eq!(
            surface.take_calls(),
            vec![DrawCall::Image(
                7,
                Rect::new(Point::new(0.0, 100.0), visible),
                Rect::from_size(visible)
            )]
        );
    }

    #[test]
    fn scroll_inside_bounds_is_untouched() {
        let map = tall_map();
        let scroll = Point::new(-350.0, -1200.0);
        assert_eq!(map.clamp_scroll(scroll, Size::new(800.0, 600.0)), scroll);
    }

    #[test]
    fn scroll_past_top_left_is_clamped_to_zero() {
        let map = tall_map();
        // camera centering a player near (0, 0) wants a positive offset
        assert_eq!(
            map.clamp_scroll(Point::new(340.0, 210.0), Size::new(800.0, 600.0)),
            Point::ORIGIN
        );
    }

    #[test]
    fn scroll_past_bottom_right_is_clamped_to_edge() {
        let map = tall_map();
        assert_eq!(
            map.clamp_scroll(Point::new(-5000.0, -5000.0), Size::new(800.0, 600.0)),
            Point::new(-700.0, -1900.0)
        );
    }

    #[test]
    fn axis_with_oversized_viewport_is_pinned() {
        let map = tall_map();
        assert_eq!(
            map.clamp_scroll(Point::new(-40.0, -40.0), Size::new(1600.0, 600.0)),
            Point::new(0.0, -40.0)
        );
    }
}
