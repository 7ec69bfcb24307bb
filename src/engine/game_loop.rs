use crate::browser;
use anyhow::Result;
use std::cell::RefCell;
use std::rc::Rc;

/// Anything driven once per display refresh
pub trait Game {
    fn animate(&mut self, timestamp: f64);
}

/// Source of display refresh callbacks
/// - `callback` runs once, with a monotonically increasing timestamp in ms
pub trait FrameScheduler {
    fn request_frame(&self, callback: Box<dyn FnOnce(f64)>) -> Result<()>;
}

/// `window.requestAnimationFrame` backed scheduler
pub struct AnimationFrames;

impl FrameScheduler for AnimationFrames {
    fn request_frame(&self, callback: Box<dyn FnOnce(f64)>) -> Result<()> {
        browser::request_animation_frame(callback).map(|_handle| ())
    }
}

/// Turns raw frame timestamps into elapsed time
/// ┌──────────┬───────────────────────────────────────────┐
/// │ 1st tick │ None, only records the timestamp          │
/// │ nth tick │ now - last, clamped to [min, max] delta   │
/// └──────────┴───────────────────────────────────────────┘
/// The first timestamp is time since page load and would otherwise
/// show up as one huge delta.
#[derive(Debug, Clone)]
pub struct FrameClock {
    last_frame: Option<f64>,
    min_delta: f64,
    max_delta: f64,
}

impl FrameClock {
    pub const DEFAULT_MIN_DELTA: f64 = 1.0;
    pub const DEFAULT_MAX_DELTA: f64 = 250.0;

    pub fn new(min_delta: f64, max_delta: f64) -> Self {
        let (min_delta, max_delta) = Self::checked_bounds(min_delta, max_delta);
        FrameClock {
            last_frame: None,
            min_delta,
            max_delta,
        }
    }

    /// Bounds `tick` can clamp with
    /// - non finite or <= 0 : default for that bound
    /// - out of order : swapped
    pub fn checked_bounds(min_delta: f64, max_delta: f64) -> (f64, f64) {
        let min_delta = usable_or(min_delta, Self::DEFAULT_MIN_DELTA);
        let max_delta = usable_or(max_delta, Self::DEFAULT_MAX_DELTA);
        if min_delta <= max_delta {
            (min_delta, max_delta)
        } else {
            (max_delta, min_delta)
        }
    }

    pub fn tick(&mut self, timestamp: f64) -> Option<f64> {
        self.last_frame
            .replace(timestamp)
            .map(|last| (timestamp - last).clamp(self.min_delta, self.max_delta))
    }

    pub fn last_frame(&self) -> Option<f64> {
        self.last_frame
    }
}

fn usable_or(delta: f64, default: f64) -> f64 {
    if delta.is_finite() && delta > 0.0 {
        delta
    } else {
        log::warn!("Frame delta bound {} replaced by {}", delta, default);
        default
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        FrameClock::new(Self::DEFAULT_MIN_DELTA, Self::DEFAULT_MAX_DELTA)
    }
}

pub struct GameLoop;

impl GameLoop {
    /// Animates `game` on every frame `scheduler` hands out, forever
    /// - returns the shared game so the caller may still look at it
    pub fn start<G, F>(game: G, scheduler: Rc<F>) -> Result<Rc<RefCell<G>>>
    where
        G: Game + 'static,
        F: FrameScheduler + 'static,
    {
        let game = Rc::new(RefCell::new(game));
        schedule_frame(Rc::clone(&game), scheduler)?;
        Ok(game)
    }
}

fn schedule_frame<G, F>(game: Rc<RefCell<G>>, scheduler: Rc<F>) -> Result<()>
where
    G: Game + 'static,
    F: FrameScheduler + 'static,
{
    let next = Rc::clone(&scheduler);
    scheduler.request_frame(Box::new(move |timestamp: f64| {
        game.borrow_mut().animate(timestamp);
        if let Err(err) = schedule_frame(game, next) {
            log::error!("Animation loop stopped : {:#}", err);
        }
    }))
}
