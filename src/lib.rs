//! Asteroblast game library
//!
//! A screen-wrapping asteroid shooter: steer the craft, blast the debris belt
//! apart, and sink one depth deeper every time the belt is cleared.
//! [`simulation::AsteroblastPlugin`] wires the whole game into a Bevy app.

pub mod blast;
pub mod bumper;
pub mod config;
pub mod constants;
pub mod craft;
pub mod debris;
pub mod effects;
pub mod error;
pub mod graphics;
pub mod hud;
pub mod menu;
pub mod motion;
pub mod session;
pub mod simulation;
pub mod spatial_partition;

pub use simulation::AsteroblastPlugin;
