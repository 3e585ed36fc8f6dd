//! Frame pipeline plugin for Bevy ECS.
//!
//! ## Pipeline (chained, runs once per `Update` frame)
//!
//! | # | System                          | Gate      |
//! |---|---------------------------------|-----------|
//! | 1 | `keyboard_to_intent_system`     | `Playing` |
//! | 2 | `motion_system`                 |           |
//! | 3 | `screen_wrap_system`            |           |
//! | 4 | `rebuild_spatial_grid_system`   |           |
//! | 5 | `bumper_system`                 |           |
//! | 6 | `debris_breakup_system`         |           |
//! | 7 | `craft_wreck_system`            |           |
//! | 8 | `bumper_wreck_system`           |           |
//! | 9 | `blast_lifetime_system`         |           |
//! | 10 | `craft_control_system`         | `Playing` |
//! | 11 | `level_advance_system`         | `Playing` |
//! | 12 | heading sync, animations, help expiry, readouts | |
//!
//! Chaining inserts a command flush between steps, so an entity despawned by
//! a reaction is gone before the next step queries, and entities spawned
//! during the frame only join the pipeline from the next frame on.
//!
//! Ungated steps keep running on the ending screen: the belt drifts on and
//! in-flight blasts and explosions play out.

use crate::blast::blast_lifetime_system;
use crate::bumper::{bumper_system, bumper_wreck_system, Destroyed};
use crate::config::GameConfig;
use crate::craft::{
    craft_control_system, craft_wreck_system, keyboard_to_intent_system, CraftIntent, FinalTally,
};
use crate::debris::debris_breakup_system;
use crate::effects::frame_animation_system;
use crate::hud::{help_expiry_system, session_readout_system};
use crate::menu::{GameState, ScreenFlowPlugin};
use crate::motion::{motion_system, screen_wrap_system, sync_heading_system};
use crate::session::{level_advance_system, start_session, GameRng, Session};
use crate::spatial_partition::{rebuild_spatial_grid_system, SpatialGrid};
use bevy::prelude::*;

/// Everything the game needs except windowing, rendering and assets.
///
/// The host app must provide a [`crate::graphics::GameAssets`] resource; the
/// binary builds it from the `AssetServer`, headless tests use
/// [`crate::graphics::GameAssets::detached`].
pub struct AsteroblastPlugin;

impl Plugin for AsteroblastPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins(ScreenFlowPlugin)
            .add_message::<Destroyed>()
            .init_resource::<ButtonInput<KeyCode>>()
            .init_resource::<GameConfig>()
            .init_resource::<GameRng>()
            .init_resource::<Session>()
            .init_resource::<CraftIntent>()
            .init_resource::<FinalTally>()
            .init_resource::<SpatialGrid>()
            .add_systems(OnEnter(GameState::Playing), start_session)
            .add_systems(
                Update,
                (
                    keyboard_to_intent_system.run_if(in_state(GameState::Playing)),
                    motion_system,
                    screen_wrap_system,
                    rebuild_spatial_grid_system,
                    bumper_system,
                    debris_breakup_system,
                    craft_wreck_system,
                    bumper_wreck_system,
                    blast_lifetime_system,
                    craft_control_system.run_if(in_state(GameState::Playing)),
                    level_advance_system.run_if(in_state(GameState::Playing)),
                    (
                        sync_heading_system,
                        frame_animation_system,
                        help_expiry_system,
                        session_readout_system,
                    ),
                )
                    .chain(),
            );
    }
}
