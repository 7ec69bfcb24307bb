use super::{Draw, Entity, Positioned};
use crate::engine::{Point, Surface};

/// ┌──────── Key → Displacement ────────┐
/// │  ArrowRight  →  Right  →  x += ds  │
/// │  ArrowLeft   →  Left   →  x -= ds  │
/// │  ArrowUp     →  Up     →  y -= ds  │
/// │  ArrowDown   →  Down   →  y += ds  │
/// └────────────────────────────────────┘
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Right,
    Left,
    Up,
    Down,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Right,
        Direction::Left,
        Direction::Up,
        Direction::Down,
    ];

    /// Maps a `KeyboardEvent.code`, any other key is not ours
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "ArrowRight" => Some(Direction::Right),
            "ArrowLeft" => Some(Direction::Left),
            "ArrowUp" => Some(Direction::Up),
            "ArrowDown" => Some(Direction::Down),
            _ => None,
        }
    }

    pub fn code(self) -> &'static str {
        match self {
            Direction::Right => "ArrowRight",
            Direction::Left => "ArrowLeft",
            Direction::Up => "ArrowUp",
            Direction::Down => "ArrowDown",
        }
    }

    /// Displacement for one step of length `ds`, y grows downward
    pub fn displacement(self, ds: f64) -> Point {
        match self {
            Direction::Right => Point::new(ds, 0.0),
            Direction::Left => Point::new(-ds, 0.0),
            Direction::Up => Point::new(0.0, -ds),
            Direction::Down => Point::new(0.0, ds),
        }
    }

    const fn index(self) -> usize {
        match self {
            Direction::Right => 0,
            Direction::Left => 1,
            Direction::Up => 2,
            Direction::Down => 3,
        }
    }
}

/// Keyboard driven entity
pub struct Player {
    body: Entity,
    held: [bool; 4],
    speed: f64,
}

impl Player {
    pub fn new(body: Entity, speed: f64) -> Self {
        Player {
            body,
            held: [false; 4],
            speed,
        }
    }

    pub fn body(&self) -> &Entity {
        &self.body
    }

    pub fn speed(&self) -> f64 {
        self.speed
    }

    pub fn is_pressed(&self, direction: Direction) -> bool {
        self.held[direction.index()]
    }

    // Setting a flag to the value it already has changes nothing,
    // so key repeat and duplicate events are harmless
    pub fn on_key_down(&mut self, direction: Direction) {
        self.held[direction.index()] = true;
    }

    pub fn on_key_up(&mut self, direction: Direction) {
        self.held[direction.index()] = false;
    }

    /// Moves one step for every held key
    /// - step is `speed / delta`, longer frames mean *larger* steps
    /// - held keys add up, opposite keys cancel
    /// - position is not bounded
    pub fn update(&mut self, delta: f64) {
        if !(delta.is_finite() && delta > 0.0) {
            log::warn!("Player skipped update with unusable delta {}", delta);
            return;
        }
        let ds = self.speed / delta;
        for direction in Direction::ALL {
            if self.is_pressed(direction) {
                self.body.position = self.body.position.translate(direction.displacement(ds));
            }
        }
    }
}

impl Draw for Player {
    fn draw<S: Surface>(&self, surface: &S, offset: Point) {
        self.body.draw(surface, offset);
    }
}

impl Positioned for Player {
    fn position(&self) -> Point {
        self.body.position
    }
}
