use crate::browser;
use crate::camera::Camera;
use crate::engine::{FrameClock, Point, Size};
use crate::entity::{Entity, Player};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Every tunable of the scene, read from `scene.json`
/// - each section falls back to its defaults when missing
/// - a file that can't be fetched or parsed means all defaults
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct SceneConfig {
    pub map: MapConfig,
    pub player: PlayerConfig,
    pub entities: Vec<EntityConfig>,
    pub camera: CameraConfig,
    pub frame: FrameConfig,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct MapConfig {
    pub width: f64,
    pub height: f64,
    pub image: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct EntityConfig {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub color: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct PlayerConfig {
    pub body: EntityConfig,
    pub speed: f64,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct CameraConfig {
    pub smoothing: f64,
}

/// Bounds on the elapsed time handed to updates, in milliseconds
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct FrameConfig {
    pub min_delta: f64,
    pub max_delta: f64,
}

impl SceneConfig {
    pub const PATH: &'static str = "scene.json";

    /// Fetches the config, never fails
    pub async fn load(path: &str) -> SceneConfig {
        match Self::fetch(path).await {
            Ok(config) => {
                log::info!("Scene config loaded from {}", path);
                config.normalized()
            }
            Err(err) => {
                log::warn!("Using default scene config : {:#}", err);
                SceneConfig::default()
            }
        }
    }

    async fn fetch(path: &str) -> Result<SceneConfig> {
        browser::fetch_json::<SceneConfig>(path)
            .await
            .with_context(|| format!("Failed to load scene config from : {}", path))
    }

    /// Replaces values the scene can't run with
    /// - smoothing outside (0, 1] : clamped, NaN or <= 0 : default
    /// - frame bounds : non finite or <= 0 reset, then ordered
    pub fn normalized(mut self) -> Self {
        self.camera.smoothing = Camera::checked_smoothing(self.camera.smoothing);
        let (min_delta, max_delta) =
            FrameClock::checked_bounds(self.frame.min_delta, self.frame.max_delta);
        self.frame = FrameConfig {
            min_delta,
            max_delta,
        };
        self
    }
}

impl Default for SceneConfig {
    fn default() -> Self {
        SceneConfig {
            map: MapConfig::default(),
            player: PlayerConfig::default(),
            entities: vec![EntityConfig::default()],
            camera: CameraConfig::default(),
            frame: FrameConfig::default(),
        }
    }
}

impl MapConfig {
    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }
}

impl Default for MapConfig {
    fn default() -> Self {
        MapConfig {
            width: 1500.0,
            height: 2500.0,
            image: "Images/BG.png".to_string(),
        }
    }
}

impl EntityConfig {
    pub fn build(&self) -> Entity {
        Entity::new(
            Point::new(self.x, self.y),
            Size::new(self.width, self.height),
            self.color.clone(),
        )
    }
}

impl Default for EntityConfig {
    fn default() -> Self {
        EntityConfig {
            x: 300.0,
            y: 605.0,
            width: 50.0,
            height: 50.0,
            color: "#ff5c00".to_string(),
        }
    }
}

impl PlayerConfig {
    pub fn build(&self) -> Player {
        Player::new(self.body.build(), self.speed)
    }
}

impl Default for PlayerConfig {
    fn default() -> Self {
        PlayerConfig {
            body: EntityConfig {
                x: 500.0,
                y: 400.0,
                width: 60.0,
                height: 90.0,
                color: "#0000ff".to_string(),
            },
            speed: 15.0,
        }
    }
}

impl Default for CameraConfig {
    fn default() -> Self {
        CameraConfig {
            smoothing: Camera::DEFAULT_SMOOTHING,
        }
    }
}

impl FrameConfig {
    pub fn clock(&self) -> FrameClock {
        FrameClock::new(self.min_delta, self.max_delta)
    }
}

impl Default for FrameConfig {
    fn default() -> Self {
        FrameConfig {
            min_delta: FrameClock::DEFAULT_MIN_DELTA,
            max_delta: FrameClock::DEFAULT_MAX_DELTA,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::Positioned;

    #[test]
    fn defaults_match_the_stock_scene() {
        let config = SceneConfig::default();

        assert_eq!(config.map.size(), Size::new(1500.0, 2500.0));
        assert_eq!(config.map.image, "Images/BG.png");

        let player = config.player.build();
        assert_eq!(player.position(), Point::new(500.0, 400.0));
        assert_eq!(player.body().size, Size::new(60.0, 90.0));
        assert_eq!(player.body().color, "#0000ff");
        assert_eq!(player.speed(), 15.0);

        assert_eq!(config.entities.len(), 1);
        assert_eq!(
            config.entities[0].build(),
            Entity::new(Point::new(300.0, 605.0), Size::new(50.0, 50.0), "#ff5c00")
        );
        assert_eq!(config.camera.smoothing, 0.1);
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let config: SceneConfig = serde_json::from_str(
            r#"{ "player": { "speed": 30 }, "camera": { "smoothing": 0.25 } }"#,
        )
        .unwrap();

        assert_eq!(config.player.speed, 30.0);
        assert_eq!(config.player.body, PlayerConfig::default().body);
        assert_eq!(config.camera.smoothing, 0.25);
        assert_eq!(config.map, MapConfig::default());
        assert_eq!(config.entities, vec![EntityConfig::default()]);
    }

    #[test]
    fn entity_list_can_be_replaced() {
        let config: SceneConfig = serde_json::from_str(
            r##"{ "entities": [
                { "x": 10, "y": 20, "color": "#00ff00" },
                { "x": 700, "y": 900, "width": 120, "height": 40 }
            ] }"##,
        )
        .unwrap();

        assert_eq!(config.entities.len(), 2);
        assert_eq!(config.entities[0].color, "#00ff00");
        assert_eq!(config.entities[0].width, 50.0);
        assert_eq!(config.entities[1].build().size, Size::new(120.0, 40.0));
    }

    #[test]
    fn bad_smoothing_is_repaired() {
        let mut config = SceneConfig::default();
        config.camera.smoothing = 0.0;
        assert_eq!(config.clone().normalized().camera.smoothing, 0.1);

        config.camera.smoothing = f64::NAN;
        assert_eq!(config.clone().normalized().camera.smoothing, 0.1);

        config.camera.smoothing = 4.0;
        assert_eq!(config.clone().normalized().camera.smoothing, 1.0);

        config.camera.smoothing = 0.5;
        assert_eq!(config.normalized().camera.smoothing, 0.5);
    }

    #[test]
    fn bad_frame_bounds_are_repaired() {
        let mut config = SceneConfig::default();
        config.frame = FrameConfig {
            min_delta: 100.0,
            max_delta: 5.0,
        };
        assert_eq!(
            config.clone().normalized().frame,
            FrameConfig {
                min_delta: 5.0,
                max_delta: 100.0
            }
        );

        config.frame = FrameConfig {
            min_delta: -1.0,
            max_delta: f64::INFINITY,
        };
        assert_eq!(config.normalized().frame, FrameConfig::default());
    }
}
