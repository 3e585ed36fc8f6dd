//! Spacecraft module: the player's craft, its controls and its wreck.
//!
//! ## Sub-module layout
//!
//! | Module | Responsibility |
//! |--------|----------------|
//! | [`state`] | Components (`Spacecraft`, `Viewfinder`) and resources (`CraftIntent`, `FinalTally`) |
//! | [`control`] | Keyboard sampling and the per-frame control step |
//!
//! Spawn and wreck handling live here.  Public items are re-exported at this
//! level so the rest of the crate can use flat `crate::craft::*` imports.

pub mod control;
pub mod state;

pub use control::{apply_brake, clamp_velocity, craft_control_system, keyboard_to_intent_system};
pub use state::{CraftIntent, FinalTally, Spacecraft, Viewfinder};

use crate::bumper::{Bumper, Collidable, Destroyed};
use crate::config::GameConfig;
use crate::graphics::GameAssets;
use crate::hud::{clear_hud, HudElement};
use crate::menu::GameState;
use crate::motion::{Extent, Heading, ScreenWrap, Velocity};
use crate::session::{Session, SessionEntity};
use bevy::prelude::*;

/// Spawn the craft at `at`, facing up and at rest, plus its viewfinder.
///
/// The craft is a [`Bumper`] without hit points: any overlap destroys it.
pub fn spawn_craft(
    commands: &mut Commands,
    assets: &GameAssets,
    config: &GameConfig,
    at: Vec2,
) -> Entity {
    let heading = Heading::new(0.0);
    let craft = commands
        .spawn((
            Spacecraft::default(),
            Sprite::from_image(assets.spacecraft.clone()),
            Transform::from_translation(at.extend(1.0)),
            heading,
            Velocity::default(),
            Extent::square(config.craft_half_extent),
            ScreenWrap,
            Collidable,
            Bumper,
            SessionEntity,
        ))
        .id();

    let aim = at + heading.forward() * config.viewfinder_display_buffer;
    commands.spawn((
        Viewfinder,
        Sprite::from_image(assets.viewfinder.clone()),
        Transform::from_translation(aim.extend(0.5)),
        heading,
        Visibility::Inherited,
        SessionEntity,
    ));

    info!("Spacecraft spawned at {at}");
    craft
}

/// End the run when the craft is destroyed.
///
/// Clears the HUD and the viewfinder, records the [`FinalTally`] and moves to
/// [`GameState::Ending`].  The explosion itself is handled by the generic
/// bumper wreck, which must run after this system.
pub fn craft_wreck_system(
    mut commands: Commands,
    mut destroyed: MessageReader<Destroyed>,
    craft_q: Query<(), With<Spacecraft>>,
    hud: Query<Entity, With<HudElement>>,
    viewfinders: Query<Entity, With<Viewfinder>>,
    session: Res<Session>,
    mut next_state: ResMut<NextState<GameState>>,
) {
    let mut wrecked = false;
    for event in destroyed.read() {
        wrecked |= craft_q.contains(event.entity);
    }
    if !wrecked {
        return;
    }

    clear_hud(&mut commands, &hud);
    for entity in viewfinders.iter() {
        commands.entity(entity).try_despawn();
    }

    let tally = FinalTally {
        score: session.score,
        depth: session.depth,
        debris_left: session.belt.len(),
    };
    info!(
        "Spacecraft destroyed: score {}, depth {}, {} debris left",
        tally.score, tally.depth, tally.debris_left
    );
    commands.insert_resource(tally);
    next_state.set(GameState::Ending);
}
