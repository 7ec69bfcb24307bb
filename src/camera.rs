use crate::engine::{Point, Size};
use crate::entity::Positioned;
use anyhow::{anyhow, Result};
use std::cell::RefCell;
use std::rc::{Rc, Weak};

/// Linear interpolation, `t = 0` gives `start`, `t = 1` gives `end`
pub fn lerp(start: f64, end: f64, t: f64) -> f64 {
    (1.0 - t) * start + t * end
}

/// Scroll offset that eases toward keeping the followed entity centered
///
/// Every update moves the offset a fixed fraction (`smoothing`) of the
/// remaining distance to the target, so the gap shrinks geometrically by
/// `1 - smoothing` per frame:
/// ```text
///   target = viewport / 2 - followed.position
///   offset = lerp(offset, target, smoothing)
/// ```
/// The fraction is per frame, not per millisecond: at higher frame rates
/// the camera catches up faster.
pub struct Camera {
    offset: Point,
    smoothing: f64,
    viewport: Size,
    // lookup only, whoever owns the entity decides its lifetime
    follows: Option<Weak<RefCell<dyn Positioned>>>,
}

impl Camera {
    pub const DEFAULT_SMOOTHING: f64 = 0.1;

    /// `smoothing` is brought into (0, 1], see [`Camera::checked_smoothing`]
    pub fn new(viewport: Size, smoothing: f64) -> Self {
        Camera {
            offset: Point::ORIGIN,
            smoothing: Self::checked_smoothing(smoothing),
            viewport,
            follows: None,
        }
    }

    /// Fraction of the gap closed per update
    /// - above 1 overshoots forever : clamped to 1
    /// - NaN or <= 0 never moves : default
    pub fn checked_smoothing(smoothing: f64) -> f64 {
        if smoothing.is_nan() || smoothing <= 0.0 {
            log::warn!("Camera smoothing {} reset to default", smoothing);
            Self::DEFAULT_SMOOTHING
        } else {
            smoothing.min(1.0)
        }
    }

    /// Replaces whatever was followed before
    pub fn follow<E: Positioned + 'static>(&mut self, entity: &Rc<RefCell<E>>) {
        let entity: Rc<RefCell<dyn Positioned>> = entity.clone();
        self.follows = Some(Rc::downgrade(&entity));
    }

    pub fn is_following(&self) -> bool {
        self.follows
            .as_ref()
            .map_or(false, |follows| follows.strong_count() > 0)
    }

    pub fn set_viewport(&mut self, viewport: Size) {
        self.viewport = viewport;
    }

    pub fn viewport(&self) -> Size {
        self.viewport
    }

    pub fn smoothing(&self) -> f64 {
        self.smoothing
    }

    pub fn offset(&self) -> Point {
        self.offset
    }

    /// Offset that would center the followed entity right now
    pub fn target(&self) -> Result<Point> {
        let followed = self
            .follows
            .as_ref()
            .ok_or_else(|| anyhow!("Camera is not following anything, call follow() first"))?
            .upgrade()
            .ok_or_else(|| anyhow!("Camera's followed entity no longer exists"))?;
        let position = followed.borrow().position();
        Ok(Point {
            x: self.viewport.width / 2.0 - position.x,
            y: self.viewport.height / 2.0 - position.y,
        })
    }

    /// Eases the offset toward [`Camera::target`]
    /// - `_delta` is not part of the easing, see type docs
    /// - on error the offset is left as it was
    pub fn update(&mut self, _delta: f64) -> Result<()> {
        let target = self.target()?;
        self.offset = Point {
            x: lerp(self.offset.x, target.x, self.smoothing),
            y: lerp(self.offset.y, target.y, self.smoothing),
        };
        Ok(())
    }
}
