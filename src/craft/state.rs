//! Spacecraft components and resources.
//!
//! Systems that mutate this state live in [`super::control`] (input and
//! per-frame control) and [`super`] (spawn and wreck).

use bevy::prelude::*;

// ── Components ─────────────────────────────────────────────────────────────────

/// The player's craft.  One per session.
///
/// Every counter is a frame count that ticks toward zero once per frame, right
/// after the control step that uses it.
#[derive(Component, Debug, Clone, PartialEq, Eq)]
pub struct Spacecraft {
    /// Frames until the blaster can fire again.
    pub blaster_cooldown: u32,
    /// Frames until another snap-turn is allowed.
    pub turn_around_delay: u32,
    /// Debounce on the viewfinder toggle.
    pub viewfinder_cooldown: u32,
    /// Frames until the velocity readout refreshes.
    pub coometer_cooldown: u32,
    pub viewfinder_on: bool,
}

impl Default for Spacecraft {
    fn default() -> Self {
        Self {
            blaster_cooldown: 0,
            turn_around_delay: 0,
            viewfinder_cooldown: 0,
            coometer_cooldown: 0,
            viewfinder_on: true,
        }
    }
}

/// Aim marker drawn ahead of the craft.  Not collidable.
#[derive(Component, Debug, Clone, Copy, Default)]
pub struct Viewfinder;

// ── Resources ──────────────────────────────────────────────────────────────────

/// Per-frame control flags for the craft.
///
/// Written by [`super::control::keyboard_to_intent_system`] and read by
/// [`super::control::craft_control_system`].  Tests set the fields directly
/// (or press keys on a bare `ButtonInput<KeyCode>`) instead of needing a window.
#[derive(Resource, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CraftIntent {
    pub turn_left: bool,
    pub turn_right: bool,
    pub snap_turn: bool,
    pub thrust: bool,
    pub reverse: bool,
    pub brake: bool,
    pub fire: bool,
    pub toggle_viewfinder: bool,
    pub help: bool,
}

/// Outcome of the run that just ended, shown on the ending screen.
#[derive(Resource, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FinalTally {
    pub score: u32,
    pub depth: u32,
    /// Pieces still drifting when the craft went down.
    pub debris_left: usize,
}
