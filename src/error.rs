//! Game-specific error types.
//!
//! Systems propagate errors through these types rather than panicking where
//! practical, enabling graceful fallback (e.g. compiled defaults) instead of
//! hard crashes.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use asteroblast::error::GameResult;
//!
//! fn load() -> GameResult<()> {
//!     let config = read_game_config(path)?;
//!     Ok(())
//! }
//! ```
//!
//! Gameplay itself has a single "recoverable" path, a collision partner
//! without hit points, and that is resolved by component dispatch in
//! [`crate::bumper`], not by an error value.

use std::fmt;

/// Top-level error enum for asteroblast.
#[derive(Debug, Clone, PartialEq)]
pub enum GameError {
    /// The config file exists but could not be read.
    ConfigRead {
        /// Path that was read.
        path: String,
        /// Underlying I/O error text.
        message: String,
    },

    /// The config file is not valid TOML or does not match [`crate::config::GameConfig`].
    ConfigParse {
        /// Path that was parsed.
        path: String,
        /// Parser error text (includes line/column).
        message: String,
    },

    /// A tunable is outside its safe operating range.
    UnsafeConstant {
        /// Name of the config key (for logging).
        name: &'static str,
        /// The value that was rejected.
        value: f32,
        /// Human-readable description of the safe range.
        safe_range: &'static str,
    },
}

impl fmt::Display for GameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameError::ConfigRead { path, message } => {
                write!(f, "could not read config '{}': {}", path, message)
            }
            GameError::ConfigParse { path, message } => {
                write!(f, "could not parse config '{}': {}", path, message)
            }
            GameError::UnsafeConstant {
                name,
                value,
                safe_range,
            } => write!(
                f,
                "config value '{}' = {} is outside safe range {}",
                name, value, safe_range
            ),
        }
    }
}

impl std::error::Error for GameError {}

/// Convenience alias: a `Result` using `GameError` as the error type.
pub type GameResult<T> = Result<T, GameError>;

// ── Validation helpers ────────────────────────────────────────────────────────

/// Returns an error unless `value` is strictly positive.
pub fn validate_positive(name: &'static str, value: f32) -> GameResult<()> {
    if value > 0.0 && value.is_finite() {
        Ok(())
    } else {
        Err(GameError::UnsafeConstant {
            name,
            value,
            safe_range: "(0.0, ∞)",
        })
    }
}

/// Returns an error when a frame delay is zero.
///
/// A zero blaster delay would fire every frame and a zero blast lifetime would
/// despawn a blast before it ever moved.
pub fn validate_frames(name: &'static str, value: u32) -> GameResult<()> {
    if value == 0 {
        Err(GameError::UnsafeConstant {
            name,
            value: 0.0,
            safe_range: "[1, ∞)",
        })
    } else {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn positive_validation_rejects_zero_and_nan() {
        assert!(validate_positive("velocity_max", 4.0).is_ok());
        assert!(validate_positive("velocity_max", 0.0).is_err());
        assert!(validate_positive("velocity_max", f32::NAN).is_err());
    }

    #[test]
    fn unsafe_constant_message_names_the_key() {
        let err = validate_frames("blaster_delay", 0).unwrap_err();
        assert!(err.to_string().contains("blaster_delay"));
    }
}
