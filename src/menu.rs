//! Screen flow: intro, gameplay and ending, with replay and quit.
//!
//! ## States
//!
//! | State     | Description                                         |
//! |-----------|-----------------------------------------------------|
//! | `Intro`   | Initial state; title and key hints shown            |
//! | `Playing` | A run is in progress                                |
//! | `Ending`  | Craft destroyed; final tally shown over the belt    |
//!
//! ## Systems (registered by `ScreenFlowPlugin`)
//!
//! | System               | Schedule                  | Purpose                      |
//! |----------------------|---------------------------|------------------------------|
//! | `setup_intro`        | `OnEnter(Intro)`          | Spawn the intro screen       |
//! | `intro_keys_system`  | `Update / in Intro`       | S starts, Q quits            |
//! | `setup_ending`       | `OnEnter(Ending)`         | Spawn the ending screen      |
//! | `ending_keys_system` | `Update / in Ending`      | A plays again, Q quits       |
//! | `quit_on_escape`     | `Update`                  | Esc quits from anywhere      |
//!
//! Each screen's UI is despawned on `OnExit` of its state.  Leftovers of a
//! finished run are swept by [`crate::session::start_session`] when the next
//! run begins.

mod ending;
mod intro;

use bevy::ecs::hierarchy::ChildSpawnerCommands;
use bevy::prelude::*;

pub use ending::{ending_keys_system, setup_ending};
pub use intro::{intro_keys_system, setup_intro};

// ── Game state ────────────────────────────────────────────────────────────────

/// Top-level screen-flow state machine.
///
/// Craft control and level advance run only in `Playing`; motion, collisions
/// and effects keep running in `Ending` so the belt drifts on behind the
/// final tally.
#[derive(States, Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum GameState {
    #[default]
    Intro,
    Playing,
    Ending,
}

// ── Component markers ─────────────────────────────────────────────────────────

/// Root node of the intro screen.
#[derive(Component)]
pub struct IntroRoot;

/// Root node of the ending screen.
#[derive(Component)]
pub struct EndingRoot;

// ── Plugin ────────────────────────────────────────────────────────────────────

/// Registers `GameState`, the two screens and their key handlers.
///
/// Must be added before any plugin that uses `in_state(GameState::…)`.
pub struct ScreenFlowPlugin;

impl Plugin for ScreenFlowPlugin {
    fn build(&self, app: &mut App) {
        app.init_state::<GameState>()
            .add_systems(OnEnter(GameState::Intro), setup_intro)
            .add_systems(OnExit(GameState::Intro), despawn_screen::<IntroRoot>)
            .add_systems(OnEnter(GameState::Ending), setup_ending)
            .add_systems(OnExit(GameState::Ending), despawn_screen::<EndingRoot>)
            .add_systems(
                Update,
                (
                    intro_keys_system.run_if(in_state(GameState::Intro)),
                    ending_keys_system.run_if(in_state(GameState::Ending)),
                    quit_on_escape,
                ),
            );
    }
}

// ── Colour helpers ────────────────────────────────────────────────────────────

fn title_color() -> Color {
    Color::srgb(0.5, 0.5, 0.5)
}
fn option_color() -> Color {
    Color::srgb(0.83, 0.83, 0.83)
}
fn tally_color() -> Color {
    Color::srgb(1.0, 1.0, 0.0)
}

// ── Shared layout ─────────────────────────────────────────────────────────────

/// Full-screen transparent column centring its children.
fn screen_root() -> Node {
    Node {
        width: Val::Percent(100.0),
        height: Val::Percent(100.0),
        flex_direction: FlexDirection::Column,
        justify_content: JustifyContent::Center,
        align_items: AlignItems::Center,
        position_type: PositionType::Absolute,
        left: Val::Px(0.0),
        top: Val::Px(0.0),
        row_gap: Val::Px(12.0),
        ..default()
    }
}

fn label(parent: &mut ChildSpawnerCommands<'_>, value: impl Into<String>, size: f32, color: Color) {
    parent.spawn((
        Text::new(value),
        TextFont {
            font_size: size,
            ..default()
        },
        TextColor(color),
    ));
}

/// The two key options side by side, below the rest.
fn options_row(parent: &mut ChildSpawnerCommands<'_>, left: &str, right: &str) {
    parent
        .spawn(Node {
            margin: UiRect::top(Val::Px(100.0)),
            column_gap: Val::Px(200.0),
            ..default()
        })
        .with_children(|row| {
            label(row, left, 28.0, option_color());
            label(row, right, 28.0, option_color());
        });
}

/// Despawn a screen's UI tree.
pub fn despawn_screen<T: Component>(mut commands: Commands, roots: Query<Entity, With<T>>) {
    for entity in roots.iter() {
        commands.entity(entity).despawn();
    }
}

// ── Quit ──────────────────────────────────────────────────────────────────────

fn request_quit(exit: &mut MessageWriter<AppExit>) {
    info!("Quit requested");
    exit.write(AppExit::Success);
}

/// Esc closes the game from any screen.
pub fn quit_on_escape(keys: Res<ButtonInput<KeyCode>>, mut exit: MessageWriter<AppExit>) {
    if keys.pressed(KeyCode::Escape) {
        request_quit(&mut exit);
    }
}
