use crate::camera::Camera;
use crate::config::SceneConfig;
use crate::engine::input::{self, KeyPress};
use crate::engine::{Bitmap, FrameClock, Game, Rect, Surface};
use crate::entity::{Direction, Draw, Entity, Player};
use crate::map::Map;
use futures::channel::mpsc::UnboundedReceiver;
use std::cell::{Ref, RefCell};
use std::rc::Rc;

/// ┌────────────────────────── Frame Flow ───────────────────────────┐
/// │                                                                 │
/// │  animate(ts) ─► FrameClock ─► update(delta) ─► draw()           │
/// │                  (1st frame:    │                │              │
/// │                   no delta)     │                │              │
/// │                                 ▼                ▼              │
/// │                         1. drain key events   1. clear          │
/// │                         2. Player.update      2. Map            │
/// │                         3. Camera.update      3. Player         │
/// │                            (reads the         4. entities       │
/// │                             new position)     (clamped offset)  │
/// └─────────────────────────────────────────────────────────────────┘
pub struct Scene<S: Surface> {
    map: Map<S::Image>,
    // shared with the camera, which only holds a weak handle
    player: Rc<RefCell<Player>>,
    entities: Vec<Entity>,
    camera: Camera,
    surface: S,
    clock: FrameClock,
    input: UnboundedReceiver<KeyPress>,
}

impl<S> Scene<S>
where
    S: Surface,
    S::Image: Bitmap,
{
    /// Builds the player and entities from `config` and points the camera
    /// at the player
    pub fn new(
        config: &SceneConfig,
        map: Map<S::Image>,
        surface: S,
        input: UnboundedReceiver<KeyPress>,
    ) -> Self {
        let player = Rc::new(RefCell::new(config.player.build()));
        let mut camera = Camera::new(surface.size(), config.camera.smoothing);
        camera.follow(&player);

        Scene {
            map,
            player,
            entities: config.entities.iter().map(|entity| entity.build()).collect(),
            camera,
            surface,
            clock: config.frame.clock(),
            input,
        }
    }

    pub fn player(&self) -> Ref<'_, Player> {
        self.player.borrow()
    }

    pub fn entities(&self) -> &[Entity] {
        &self.entities
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    /// Order matters : the camera reads the position the player just wrote
    pub fn update(&mut self, delta: f64) {
        for press in input::drain(&mut self.input) {
            self.on_key(press);
        }

        self.player.borrow_mut().update(delta);

        self.camera.set_viewport(self.surface.size());
        if let Err(err) = self.camera.update(delta) {
            log::error!("Camera update skipped : {:#}", err);
        }
    }

    fn on_key(&mut self, press: KeyPress) {
        let mut player = self.player.borrow_mut();
        match press {
            KeyPress::KeyDown(code) => {
                if let Some(direction) = Direction::from_code(&code) {
                    player.on_key_down(direction);
                }
            }
            KeyPress::KeyUp(code) => {
                if let Some(direction) = Direction::from_code(&code) {
                    player.on_key_up(direction);
                }
            }
        }
    }

    /// Draw order matters : background -> player -> entities
    pub fn draw(&self) {
        let viewport = self.surface.size();
        self.surface.clear(&Rect::from_size(viewport));

        let offset = self.map.clamp_scroll(self.camera.offset(), viewport);
        self.map.draw(&self.surface, offset, viewport);

        self.player.borrow().draw(&self.surface, offset);
        for entity in &self.entities {
            entity.draw(&self.surface, offset);
        }
    }
}

impl<S> Game for Scene<S>
where
    S: Surface,
    S::Image: Bitmap,
{
    /// First frame only draws, its timestamp is time since page load
    fn animate(&mut self, timestamp: f64) {
        if let Some(delta) = self.clock.tick(timestamp) {
            self.update(delta);
        }
        self.draw();
    }
}
