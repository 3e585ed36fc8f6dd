use super::*;
use crate::craft::FinalTally;

/// Spawn the ending screen over the still-drifting belt.
pub fn setup_ending(mut commands: Commands, tally: Res<FinalTally>) {
    commands
        .spawn((screen_root(), EndingRoot))
        .with_children(|screen| {
            label(screen, "GAME OVER", 42.0, title_color());
            label(
                screen,
                format!("final score: {}", tally.score),
                24.0,
                tally_color(),
            );
            label(
                screen,
                format!("depth reached: {}", tally.depth),
                24.0,
                tally_color(),
            );
            options_row(screen, "play [a]gain", "[q]uit");
        });
    info!(
        "Ending screen shown (score {}, depth {})",
        tally.score, tally.depth
    );
}

/// A starts another run, Q quits.
pub fn ending_keys_system(
    keys: Res<ButtonInput<KeyCode>>,
    mut next_state: ResMut<NextState<GameState>>,
    mut exit: MessageWriter<AppExit>,
) {
    if keys.pressed(KeyCode::KeyA) {
        info!("Ending → Playing");
        next_state.set(GameState::Playing);
    } else if keys.pressed(KeyCode::KeyQ) {
        request_quit(&mut exit);
    }
}
