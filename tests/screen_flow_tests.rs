//! Headless tests for the screen flow: intro, run start, game over, replay, quit.
//!
//! These tests use [`MinimalPlugins`]: no window, no rendering, no audio.
//! Keys are pressed on a bare `ButtonInput<KeyCode>` and stay held until
//! released, since no input plugin clears them between frames.
//!
//! Covered scenarios:
//! 1. The game opens on the intro screen.
//! 2. S starts a run at depth 1 with one craft and one piece of debris.
//! 3. Destroying the craft shows the ending screen with the final tally.
//! 4. A starts a fresh run and sweeps away the previous one.
//! 5. Q and Esc request an exit.

use asteroblast::bumper::Collidable;
use asteroblast::craft::{FinalTally, Spacecraft};
use asteroblast::debris::Debris;
use asteroblast::graphics::GameAssets;
use asteroblast::hud::HudElement;
use asteroblast::menu::{EndingRoot, GameState, IntroRoot};
use asteroblast::motion::Velocity;
use asteroblast::session::{GameRng, Session};
use asteroblast::AsteroblastPlugin;
use bevy::prelude::*;
use bevy::state::app::StatesPlugin;

// ── Helpers ───────────────────────────────────────────────────────────────────

/// Build a headless app running the full game plugin with a fixed seed.
fn headless_app(seed: u64) -> App {
    let mut app = App::new();
    app.add_plugins((MinimalPlugins, StatesPlugin));
    app.insert_resource(GameAssets::detached());
    app.insert_resource(GameRng::seeded(seed));
    app.add_plugins(AsteroblastPlugin);
    app
}

fn press(app: &mut App, key: KeyCode) {
    app.world_mut()
        .resource_mut::<ButtonInput<KeyCode>>()
        .press(key);
}

fn release(app: &mut App, key: KeyCode) {
    app.world_mut()
        .resource_mut::<ButtonInput<KeyCode>>()
        .release(key);
}

fn state(app: &App) -> GameState {
    *app.world().resource::<State<GameState>>().get()
}

fn count<T: Component>(app: &mut App) -> usize {
    app.world_mut()
        .query_filtered::<(), With<T>>()
        .iter(app.world())
        .count()
}

/// Leave the intro screen and let the first run start.
fn start_run(app: &mut App) {
    app.update();
    press(app, KeyCode::KeyS);
    app.update(); // key read, transition requested
    app.update(); // OnEnter(Playing) runs
    release(app, KeyCode::KeyS);
}

/// Park every piece of debris on top of the craft.
fn ram_craft(app: &mut App) {
    let world = app.world_mut();
    let belt: Vec<Entity> = world.resource::<Session>().belt.iter().copied().collect();
    for entity in belt {
        let mut e = world.entity_mut(entity);
        if let Some(mut transform) = e.get_mut::<Transform>() {
            transform.translation.x = 0.0;
            transform.translation.y = 0.0;
        }
        if let Some(mut velocity) = e.get_mut::<Velocity>() {
            velocity.0 = Vec2::ZERO;
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[test]
fn game_opens_on_the_intro_screen() {
    let mut app = headless_app(1);
    app.update();

    assert_eq!(state(&app), GameState::Intro);
    assert_eq!(count::<IntroRoot>(&mut app), 1);
    assert_eq!(count::<Spacecraft>(&mut app), 0);
}

#[test]
fn s_starts_a_run_at_depth_one() {
    let mut app = headless_app(2);
    start_run(&mut app);

    assert_eq!(state(&app), GameState::Playing);
    assert_eq!(count::<IntroRoot>(&mut app), 0, "intro UI despawned on exit");
    assert_eq!(count::<Spacecraft>(&mut app), 1);

    let session = app.world().resource::<Session>();
    assert_eq!(session.depth, 1);
    assert_eq!(session.score, 0);
    assert_eq!(session.belt.len(), 1);
    assert_eq!(count::<Debris>(&mut app), 1);
}

#[test]
fn losing_the_craft_shows_the_final_tally() {
    let mut app = headless_app(3);
    start_run(&mut app);
    assert!(count::<HudElement>(&mut app) > 0);

    ram_craft(&mut app);
    app.update(); // collision: craft wrecked, Ending requested
    assert_eq!(count::<Spacecraft>(&mut app), 0);
    assert_eq!(count::<HudElement>(&mut app), 0, "HUD cleared on wreck");

    app.update(); // OnEnter(Ending)
    assert_eq!(state(&app), GameState::Ending);
    assert_eq!(count::<EndingRoot>(&mut app), 1);

    let tally = *app.world().resource::<FinalTally>();
    assert_eq!(tally.depth, 1);
    assert_eq!(tally.score, app.world().resource::<Session>().score);
}

#[test]
fn belt_keeps_drifting_on_the_ending_screen() {
    let mut app = headless_app(4);
    start_run(&mut app);
    ram_craft(&mut app);
    app.update();
    app.update();
    assert_eq!(state(&app), GameState::Ending);

    // No craft, so nothing advances even once the belt is gone.
    let depth = app.world().resource::<Session>().depth;
    for _ in 0..60 {
        app.update();
    }
    assert_eq!(app.world().resource::<Session>().depth, depth);
    assert_eq!(state(&app), GameState::Ending);
}

#[test]
fn a_replays_with_a_clean_slate() {
    let mut app = headless_app(5);
    start_run(&mut app);
    ram_craft(&mut app);
    app.update();
    app.update();
    assert_eq!(state(&app), GameState::Ending);

    press(&mut app, KeyCode::KeyA);
    app.update(); // key read
    app.update(); // OnExit(Ending), OnEnter(Playing)
    release(&mut app, KeyCode::KeyA);

    assert_eq!(state(&app), GameState::Playing);
    assert_eq!(count::<EndingRoot>(&mut app), 0);
    assert_eq!(count::<Spacecraft>(&mut app), 1);

    let session = app.world().resource::<Session>();
    assert_eq!(session.depth, 1);
    assert_eq!(session.score, 0);
    assert_eq!(session.belt.len(), 1);
    assert_eq!(count::<Debris>(&mut app), 1, "previous run's debris swept");
}

#[test]
fn q_quits_from_the_intro() {
    let mut app = headless_app(6);
    app.update();
    assert!(app.should_exit().is_none());

    press(&mut app, KeyCode::KeyQ);
    app.update();
    assert_eq!(app.should_exit(), Some(AppExit::Success));
}

#[test]
fn escape_quits_mid_run() {
    let mut app = headless_app(7);
    start_run(&mut app);

    // Keep the belt out of the way for the frame.
    let belt: Vec<Entity> = app.world().resource::<Session>().belt.iter().copied().collect();
    for entity in belt {
        app.world_mut().entity_mut(entity).remove::<Collidable>();
    }

    press(&mut app, KeyCode::Escape);
    app.update();
    assert_eq!(app.should_exit(), Some(AppExit::Success));
}
