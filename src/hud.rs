//! In-game heads-up display: depth, score, velocity readout and help chart.
//!
//! ## Layout
//!
//! ```text
//! ┌──────────────────────── Depth: N ─────────────────── 1234 ┐
//! │                                                          │
//! │ asteroblast v1.0                                         │
//! │ [h] -- show this message                                 │
//! │ ...                                                      │
//! │                  [ dx: 0.00 dy: 0.00 ]                   │
//! └──────────────────────────────────────────────────────────┘
//! ```
//!
//! Every HUD root carries [`HudElement`] so a wreck can clear the whole
//! overlay in one sweep.  Readouts are mutated in place; only the help chart is
//! spawned and despawned.

use crate::constants::{
    DEPTH_TEXT_TOP, HELP_BASE_LIFETIME, HELP_FIRST_LINE_TOP, HELP_LIFETIME_STEP,
    HELP_LINE_SPACING, SCORE_TEXT_MARGIN, SPEED_TEXT_BOTTOM,
};
use crate::session::{Session, SessionEntity};
use bevy::prelude::*;

/// Title and key bindings shown by the help chart, top to bottom.
pub const HELP_LINES: [&str; 10] = [
    "asteroblast v1.0",
    "[h] -- show this message",
    "[up] -- accelerate",
    "[down] -- deccelerate",
    "[left] -- turn left",
    "[right] -- turn right",
    "[space] / [f] -- shoot",
    "[v] -- toggle viewfinder on/off",
    "[r] -- stop the craft",
    "[ESC] -- quit",
];

// ── Components ────────────────────────────────────────────────────────────────

/// Root of any HUD node.
#[derive(Component, Debug, Clone, Copy, Default)]
pub struct HudElement;

#[derive(Component, Debug, Clone, Copy, Default)]
pub struct DepthText;

#[derive(Component, Debug, Clone, Copy, Default)]
pub struct ScoreText;

/// Velocity readout ("coometer").  Refreshed by the craft's control step.
#[derive(Component, Debug, Clone, Copy, Default)]
pub struct SpeedText;

/// One line of the help chart; despawned when `lifetime` runs out.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub struct HelpLine {
    pub lifetime: u32,
}

// ── Colours ───────────────────────────────────────────────────────────────────

fn readout_color() -> Color {
    Color::srgb(0.5, 0.5, 0.5)
}
fn help_color() -> Color {
    Color::srgb(0.83, 0.83, 0.83)
}

/// Text of the velocity readout.
pub fn speed_readout(velocity: Vec2) -> String {
    format!("[ dx: {:.2} dy: {:.2} ]", velocity.x, velocity.y)
}

pub fn depth_label(depth: u32) -> String {
    format!("Depth: {depth}")
}

// ── Spawning ──────────────────────────────────────────────────────────────────

/// Full-width row pinned to the top or bottom edge, centring its single child.
fn centred_row(top: Option<f32>, bottom: Option<f32>) -> Node {
    Node {
        position_type: PositionType::Absolute,
        width: Val::Percent(100.0),
        justify_content: JustifyContent::Center,
        top: top.map_or(Val::Auto, Val::Px),
        bottom: bottom.map_or(Val::Auto, Val::Px),
        ..default()
    }
}

/// Spawn the depth, score and velocity readouts.
pub fn spawn_hud(commands: &mut Commands) {
    commands
        .spawn((
            centred_row(Some(DEPTH_TEXT_TOP), None),
            HudElement,
            SessionEntity,
        ))
        .with_children(|row| {
            row.spawn((
                Text::new(depth_label(0)),
                TextFont {
                    font_size: 22.0,
                    ..default()
                },
                TextColor(readout_color()),
                DepthText,
            ));
        });

    commands.spawn((
        Text::new("0"),
        TextFont {
            font_size: 18.0,
            ..default()
        },
        TextColor(readout_color()),
        Node {
            position_type: PositionType::Absolute,
            top: Val::Px(SCORE_TEXT_MARGIN),
            right: Val::Px(SCORE_TEXT_MARGIN),
            ..default()
        },
        ScoreText,
        HudElement,
        SessionEntity,
    ));

    commands
        .spawn((
            centred_row(None, Some(SPEED_TEXT_BOTTOM)),
            HudElement,
            SessionEntity,
        ))
        .with_children(|row| {
            row.spawn((
                Text::new(speed_readout(Vec2::ZERO)),
                TextFont {
                    font_size: 18.0,
                    ..default()
                },
                TextColor(readout_color()),
                SpeedText,
            ));
        });
}

/// Show the help chart.  Each line lives two frames longer than the one
/// above it, so the chart fades out top-down.
pub fn display_help(commands: &mut Commands) {
    for (i, line) in HELP_LINES.iter().enumerate() {
        let i = i as u32;
        commands.spawn((
            Text::new(*line),
            TextFont {
                font_size: 18.0,
                ..default()
            },
            TextColor(help_color()),
            Node {
                position_type: PositionType::Absolute,
                left: Val::Px(25.0),
                top: Val::Px(HELP_FIRST_LINE_TOP + HELP_LINE_SPACING * i as f32),
                ..default()
            },
            HelpLine {
                lifetime: HELP_BASE_LIFETIME + HELP_LIFETIME_STEP * i,
            },
            HudElement,
            SessionEntity,
        ));
    }
}

// ── Systems ───────────────────────────────────────────────────────────────────

/// Count down help lines and drop the expired ones.
pub fn help_expiry_system(mut commands: Commands, mut lines: Query<(Entity, &mut HelpLine)>) {
    for (entity, mut line) in lines.iter_mut() {
        line.lifetime = line.lifetime.saturating_sub(1);
        if line.lifetime == 0 {
            commands.entity(entity).try_despawn();
        }
    }
}

/// Keep the depth and score readouts in step with the [`Session`].
pub fn session_readout_system(
    session: Res<Session>,
    mut depth_q: Query<&mut Text, (With<DepthText>, Without<ScoreText>)>,
    mut score_q: Query<&mut Text, (With<ScoreText>, Without<DepthText>)>,
) {
    let depth = depth_label(session.depth);
    for mut text in depth_q.iter_mut() {
        if text.0 != depth {
            text.0 = depth.clone();
        }
    }
    let score = session.score.to_string();
    for mut text in score_q.iter_mut() {
        if text.0 != score {
            text.0 = score.clone();
        }
    }
}

/// Remove every HUD node.
pub fn clear_hud(commands: &mut Commands, hud: &Query<Entity, With<HudElement>>) {
    for entity in hud.iter() {
        commands.entity(entity).try_despawn();
    }
}
