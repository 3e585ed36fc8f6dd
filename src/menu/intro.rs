use super::*;

/// Spawn the intro screen.
///
/// ```text
/// ┌─────────────────────────────────────────────┐
/// │                 asteroblast                 │
/// │   you can see [h]elp chart while in game    │
/// │                                             │
/// │        [s]tart              [q]uit          │
/// └─────────────────────────────────────────────┘
/// ```
pub fn setup_intro(mut commands: Commands) {
    commands
        .spawn((screen_root(), IntroRoot))
        .with_children(|screen| {
            label(screen, "asteroblast", 34.0, title_color());
            label(
                screen,
                "you can see [h]elp chart while in game",
                22.0,
                option_color(),
            );
            options_row(screen, "[s]tart", "[q]uit");
        });
    info!("Intro screen shown");
}

/// S starts a run, Q quits.
pub fn intro_keys_system(
    keys: Res<ButtonInput<KeyCode>>,
    mut next_state: ResMut<NextState<GameState>>,
    mut exit: MessageWriter<AppExit>,
) {
    if keys.pressed(KeyCode::KeyS) {
        info!("Intro → Playing");
        next_state.set(GameState::Playing);
    } else if keys.pressed(KeyCode::KeyQ) {
        request_quit(&mut exit);
    }
}
