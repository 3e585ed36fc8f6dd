//! Runtime gameplay configuration loaded from `assets/asteroblast.toml`.
//!
//! [`GameConfig`] is a Bevy [`Resource`] that mirrors the tunable constants in
//! [`crate::constants`].  At startup, [`load_game_config`] reads
//! `assets/asteroblast.toml` and overwrites the defaults with any values present
//! in the file.  Missing keys fall back to the compile-time defaults, so a
//! minimal TOML can override just the values you care about:
//!
//! ```toml
//! velocity_max = 5.0
//! blaster_delay = 20
//! seed = 42
//! ```
//!
//! Keep `src/constants.rs` in sync: it remains the **authoritative default**
//! source used by `GameConfig::default()`.

use crate::constants::*;
use crate::error::{validate_frames, validate_positive, GameError, GameResult};
use crate::session::GameRng;
use bevy::prelude::*;
use serde::Deserialize;
use std::io::ErrorKind;
use std::path::Path;

/// Location of the optional config override file.
pub const CONFIG_PATH: &str = "assets/asteroblast.toml";

/// Runtime-tunable gameplay configuration.
///
/// All fields default to the corresponding compile-time constant from
/// `src/constants.rs`.
#[derive(Resource, Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    // ── Viewport ─────────────────────────────────────────────────────────────
    pub window_width: f32,
    pub window_height: f32,

    // ── Spacecraft ───────────────────────────────────────────────────────────
    pub turn_factor: f32,
    pub turn_around_delay: u32,
    pub velocity_factor: f32,
    pub velocity_max: f32,
    pub reverse_pull_factor: f32,
    pub blaster_delay: u32,
    pub viewfinder_display_buffer: f32,
    pub viewfinder_display_delay: u32,
    pub coometer_display_delay: u32,

    // ── Blast ────────────────────────────────────────────────────────────────
    pub blast_spawn_buffer_px: f32,
    pub blast_velocity_factor: f32,
    pub blast_lifetime: u32,

    // ── Debris ───────────────────────────────────────────────────────────────
    pub debris_velocity: f32,
    pub crash_spawns: usize,
    pub min_spawn_buffer_px: i32,
    pub max_spawn_buffer_px: i32,

    // ── Bounding boxes ───────────────────────────────────────────────────────
    pub craft_half_extent: f32,
    pub blast_half_extent: f32,
    pub debris_small_half_extent: f32,
    pub debris_medium_half_extent: f32,
    pub debris_big_half_extent: f32,

    /// Fixed RNG seed.  `None` seeds from entropy so every run differs.
    pub seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            window_width: WINDOW_WIDTH,
            window_height: WINDOW_HEIGHT,
            turn_factor: TURN_FACTOR,
            turn_around_delay: TURN_AROUND_DELAY,
            velocity_factor: VELOCITY_FACTOR,
            velocity_max: VELOCITY_MAX,
            reverse_pull_factor: REVERSE_PULL_FACTOR,
            blaster_delay: BLASTER_DELAY,
            viewfinder_display_buffer: VIEWFINDER_DISPLAY_BUFFER,
            viewfinder_display_delay: VIEWFINDER_DISPLAY_DELAY,
            coometer_display_delay: COOMETER_DISPLAY_DELAY,
            blast_spawn_buffer_px: BLAST_SPAWN_BUFFER_PX,
            blast_velocity_factor: BLAST_VELOCITY_FACTOR,
            blast_lifetime: BLAST_LIFETIME,
            debris_velocity: DEBRIS_VELOCITY,
            crash_spawns: CRASH_SPAWNS,
            min_spawn_buffer_px: MIN_SPAWN_BUFFER_PX,
            max_spawn_buffer_px: MAX_SPAWN_BUFFER_PX,
            craft_half_extent: CRAFT_HALF_EXTENT,
            blast_half_extent: BLAST_HALF_EXTENT,
            debris_small_half_extent: DEBRIS_SMALL_HALF_EXTENT,
            debris_medium_half_extent: DEBRIS_MEDIUM_HALF_EXTENT,
            debris_big_half_extent: DEBRIS_BIG_HALF_EXTENT,
            seed: None,
        }
    }
}

impl GameConfig {
    /// Viewport size as a vector (`width`, `height`).
    #[inline]
    pub fn viewport(&self) -> Vec2 {
        Vec2::new(self.window_width, self.window_height)
    }

    /// Reject values that would break the frame pipeline.
    pub fn validate(&self) -> GameResult<()> {
        validate_positive("window_width", self.window_width)?;
        validate_positive("window_height", self.window_height)?;
        validate_positive("velocity_max", self.velocity_max)?;
        validate_positive("blast_velocity_factor", self.blast_velocity_factor)?;
        validate_frames("blaster_delay", self.blaster_delay)?;
        validate_frames("blast_lifetime", self.blast_lifetime)?;
        validate_positive("craft_half_extent", self.craft_half_extent)?;
        validate_positive("blast_half_extent", self.blast_half_extent)?;
        validate_positive("debris_small_half_extent", self.debris_small_half_extent)?;
        validate_positive("debris_medium_half_extent", self.debris_medium_half_extent)?;
        validate_positive("debris_big_half_extent", self.debris_big_half_extent)?;
        if self.crash_spawns > MAX_CRASH_SPAWNS {
            return Err(GameError::UnsafeConstant {
                name: "crash_spawns",
                value: self.crash_spawns as f32,
                safe_range: "[0, 8]",
            });
        }
        // A blast born inside the craft's box wrecks the craft on the first frame.
        if self.blast_spawn_buffer_px <= self.craft_half_extent + self.blast_half_extent {
            return Err(GameError::UnsafeConstant {
                name: "blast_spawn_buffer_px",
                value: self.blast_spawn_buffer_px,
                safe_range: "(craft_half_extent + blast_half_extent, ∞)",
            });
        }
        if self.min_spawn_buffer_px > self.max_spawn_buffer_px {
            return Err(GameError::UnsafeConstant {
                name: "min_spawn_buffer_px",
                value: self.min_spawn_buffer_px as f32,
                safe_range: "[0, max_spawn_buffer_px]",
            });
        }
        Ok(())
    }
}

/// Read and validate a config file.
///
/// Returns `Ok(None)` when the file does not exist; that is the normal case,
/// not an error.
pub fn read_game_config(path: &Path) -> GameResult<Option<GameConfig>> {
    let contents = match std::fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
        Err(e) => {
            return Err(GameError::ConfigRead {
                path: path.display().to_string(),
                message: e.to_string(),
            })
        }
    };
    let config = parse_game_config(&contents).map_err(|e| match e {
        GameError::ConfigParse { message, .. } => GameError::ConfigParse {
            path: path.display().to_string(),
            message,
        },
        other => other,
    })?;
    Ok(Some(config))
}

/// Parse and validate config TOML from a string.
pub fn parse_game_config(contents: &str) -> GameResult<GameConfig> {
    let config = toml::from_str::<GameConfig>(contents).map_err(|e| GameError::ConfigParse {
        path: String::from("<inline>"),
        message: e.to_string(),
    })?;
    config.validate()?;
    Ok(config)
}

/// Startup system: attempt to load `assets/asteroblast.toml` and overwrite the
/// [`GameConfig`] resource with any values present in the file.
///
/// Read, parse, and validation failures are logged and leave the compiled
/// defaults in place.  A configured `seed` re-seeds [`GameRng`].
pub fn load_game_config(mut config: ResMut<GameConfig>, mut rng: ResMut<GameRng>) {
    match read_game_config(Path::new(CONFIG_PATH)) {
        Ok(Some(loaded)) => {
            *config = loaded;
            info!("Loaded game config from {CONFIG_PATH}");
        }
        Ok(None) => info!("No {CONFIG_PATH} found; using compiled defaults"),
        Err(e) => warn!("{e}; using compiled defaults"),
    }
    if let Some(seed) = config.seed {
        *rng = GameRng::seeded(seed);
        info!("RNG seeded with {seed}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_constants() {
        let config = GameConfig::default();
        assert_eq!(config.velocity_max, 4.0);
        assert_eq!(config.blaster_delay, 30);
        assert_eq!(config.blast_lifetime, 30);
        assert_eq!(config.crash_spawns, 2);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn partial_toml_overrides_only_named_keys() {
        let config = parse_game_config("velocity_max = 6.0\nseed = 7\n").unwrap();
        assert_eq!(config.velocity_max, 6.0);
        assert_eq!(config.seed, Some(7));
        assert_eq!(config.turn_around_delay, TURN_AROUND_DELAY);
    }

    #[test]
    fn malformed_toml_is_a_parse_error() {
        let err = parse_game_config("velocity_max = \"fast\"").unwrap_err();
        assert!(matches!(err, GameError::ConfigParse { .. }));
    }

    #[test]
    fn inverted_spawn_buffer_is_rejected() {
        let err = parse_game_config("min_spawn_buffer_px = 400\nmax_spawn_buffer_px = 350")
            .unwrap_err();
        assert!(matches!(
            err,
            GameError::UnsafeConstant {
                name: "min_spawn_buffer_px",
                ..
            }
        ));
    }

    #[test]
    fn blast_spawning_inside_the_craft_is_rejected() {
        // 20 + 8 = 28 px; the blast must start strictly clear of the craft.
        let err = parse_game_config("blast_spawn_buffer_px = 28.0").unwrap_err();
        assert!(matches!(
            err,
            GameError::UnsafeConstant {
                name: "blast_spawn_buffer_px",
                ..
            }
        ));
        assert!(parse_game_config("blast_spawn_buffer_px = 29.0").is_ok());
    }

    #[test]
    fn extents_and_crash_spawns_are_bounded() {
        let err = parse_game_config("debris_big_half_extent = 0.0").unwrap_err();
        assert!(matches!(
            err,
            GameError::UnsafeConstant {
                name: "debris_big_half_extent",
                ..
            }
        ));

        let err = parse_game_config("crash_spawns = 9").unwrap_err();
        assert!(matches!(
            err,
            GameError::UnsafeConstant {
                name: "crash_spawns",
                ..
            }
        ));
        assert!(parse_game_config("crash_spawns = 0").is_ok());
    }

    #[test]
    fn missing_file_is_not_an_error() {
        let result = read_game_config(Path::new("assets/definitely-not-here.toml"));
        assert_eq!(result, Ok(None));
    }
}
