//! Spacecraft input and per-frame control.
//!
//! ## Pipeline
//!
//! 1. [`keyboard_to_intent_system`] samples the keyboard into [`CraftIntent`].
//! 2. [`craft_control_system`] applies the intent in a fixed order:
//!    rotate, snap-turn, thrust, reverse pull, brake, clamp, fire,
//!    velocity readout, help chart, viewfinder.
//!
//! The empty-belt check that closes the craft's frame lives in
//! [`crate::session::level_advance_system`], scheduled right after.
//!
//! Tests populate [`CraftIntent`] directly, or press keys on a bare
//! `ButtonInput<KeyCode>`, and run the systems headless.

use super::state::{CraftIntent, Spacecraft, Viewfinder};
use crate::blast::spawn_blast;
use crate::config::GameConfig;
use crate::effects::{play_thrust_hum, spawn_exhaust, spawn_turn_around, ThrustHum};
use crate::graphics::GameAssets;
use crate::hud::{display_help, speed_readout, HelpLine, SpeedText};
use crate::motion::{Heading, Velocity};
use bevy::prelude::*;

// ── Pure helpers ──────────────────────────────────────────────────────────────

/// Pull each velocity component toward zero by `step`.
///
/// A component smaller than `step` overshoots past zero; the next frame's
/// brake pulls it back.  Zero components are left alone.
pub fn apply_brake(velocity: Vec2, step: f32) -> Vec2 {
    let axis = |v: f32| {
        if v > 0.0 {
            v - step
        } else if v < 0.0 {
            v + step
        } else {
            v
        }
    };
    Vec2::new(axis(velocity.x), axis(velocity.y))
}

/// Clamp each component to `[-max, max]` independently.
pub fn clamp_velocity(velocity: Vec2, max: f32) -> Vec2 {
    velocity.clamp(Vec2::splat(-max), Vec2::splat(max))
}

#[inline]
fn tick(counter: &mut u32) {
    *counter = counter.saturating_sub(1);
}

// ── Input ─────────────────────────────────────────────────────────────────────

/// Translate held keys into [`CraftIntent`].
///
/// - **← / →** turn, **T** snap-turn
/// - **↑** thrust, **↓** reverse pull, **R** brake
/// - **Space** or **F** fire
/// - **V** viewfinder toggle, **H** help chart
pub fn keyboard_to_intent_system(keys: Res<ButtonInput<KeyCode>>, mut intent: ResMut<CraftIntent>) {
    let next = CraftIntent {
        turn_left: keys.pressed(KeyCode::ArrowLeft),
        turn_right: keys.pressed(KeyCode::ArrowRight),
        snap_turn: keys.pressed(KeyCode::KeyT),
        thrust: keys.pressed(KeyCode::ArrowUp),
        reverse: keys.pressed(KeyCode::ArrowDown),
        brake: keys.pressed(KeyCode::KeyR),
        fire: keys.any_pressed([KeyCode::Space, KeyCode::KeyF]),
        toggle_viewfinder: keys.pressed(KeyCode::KeyV),
        help: keys.pressed(KeyCode::KeyH),
    };
    if *intent != next {
        *intent = next;
    }
}

// ── Control ───────────────────────────────────────────────────────────────────

/// Apply one frame of [`CraftIntent`] to the craft.
///
/// Each cooldown ticks right after the step that reads it, so a counter set
/// to `N` this frame blocks the action for exactly `N` frames.
#[allow(clippy::too_many_arguments)]
pub fn craft_control_system(
    mut commands: Commands,
    intent: Res<CraftIntent>,
    mut craft_q: Query<(&mut Spacecraft, &mut Heading, &mut Velocity, &Transform)>,
    mut viewfinder_q: Query<
        (&mut Transform, &mut Visibility, &mut Heading),
        (With<Viewfinder>, Without<Spacecraft>),
    >,
    mut speed_text: Query<&mut Text, With<SpeedText>>,
    help_lines: Query<Entity, With<HelpLine>>,
    thrust_hum: Query<(), With<ThrustHum>>,
    assets: Res<GameAssets>,
    config: Res<GameConfig>,
) {
    let Ok((mut craft, mut heading, mut velocity, transform)) = craft_q.single_mut() else {
        return;
    };
    let at = transform.translation.truncate();

    if intent.turn_left {
        heading.turn(-config.turn_factor);
    }
    if intent.turn_right {
        heading.turn(config.turn_factor);
    }

    if intent.snap_turn && craft.turn_around_delay == 0 {
        spawn_turn_around(&mut commands, &assets, at, *heading, velocity.0);
        heading.turn(180.0);
        craft.turn_around_delay = config.turn_around_delay;
    }
    tick(&mut craft.turn_around_delay);

    if intent.thrust {
        play_thrust_hum(&mut commands, &assets.thrust_sound, !thrust_hum.is_empty());
        velocity.0 += heading.forward() * config.velocity_factor;
        spawn_exhaust(&mut commands, &assets, at, *heading, velocity.0);
    }
    if intent.reverse {
        velocity.0 -= heading.forward() * config.reverse_pull_factor;
    }
    if intent.brake {
        velocity.0 = apply_brake(velocity.0, config.velocity_factor);
    }
    velocity.0 = clamp_velocity(velocity.0, config.velocity_max);

    if intent.fire && craft.blaster_cooldown == 0 {
        spawn_blast(&mut commands, &assets, &config, at, *heading);
        craft.blaster_cooldown = config.blaster_delay;
    }
    tick(&mut craft.blaster_cooldown);

    if craft.coometer_cooldown == 0 {
        let readout = speed_readout(velocity.0);
        for mut text in speed_text.iter_mut() {
            text.0.clone_from(&readout);
        }
        craft.coometer_cooldown = config.coometer_display_delay;
    }
    tick(&mut craft.coometer_cooldown);

    if intent.help {
        for line in help_lines.iter() {
            commands.entity(line).try_despawn();
        }
        display_help(&mut commands);
    }

    if intent.toggle_viewfinder && craft.viewfinder_cooldown == 0 {
        craft.viewfinder_on = !craft.viewfinder_on;
        craft.viewfinder_cooldown = config.viewfinder_display_delay;
        debug!("Viewfinder {}", if craft.viewfinder_on { "on" } else { "off" });
    }
    tick(&mut craft.viewfinder_cooldown);

    let aim = at + heading.forward() * config.viewfinder_display_buffer;
    let shown = if craft.viewfinder_on {
        Visibility::Inherited
    } else {
        Visibility::Hidden
    };
    for (mut vf_transform, mut visibility, mut vf_heading) in viewfinder_q.iter_mut() {
        vf_transform.translation.x = aim.x;
        vf_transform.translation.y = aim.y;
        if *vf_heading != *heading {
            *vf_heading = *heading;
        }
        if *visibility != shown {
            *visibility = shown;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn brake_pulls_each_axis_toward_zero() {
        let v = apply_brake(Vec2::new(1.0, -1.0), 0.1);
        assert!((v - Vec2::new(0.9, -0.9)).length() < 1e-6);
    }

    #[test]
    fn brake_can_overshoot_a_small_component() {
        let v = apply_brake(Vec2::new(0.05, 0.0), 0.1);
        assert!((v.x + 0.05).abs() < 1e-6);
        assert_eq!(v.y, 0.0);
    }

    #[test]
    fn clamp_is_per_axis_not_magnitude() {
        let v = clamp_velocity(Vec2::new(5.0, -4.5), 4.0);
        assert_eq!(v, Vec2::new(4.0, -4.0));
        // Diagonal top speed exceeds the per-axis limit.
        assert!(v.length() > 4.0);
    }

    #[test]
    fn tick_stops_at_zero() {
        let mut c = 1;
        tick(&mut c);
        tick(&mut c);
        assert_eq!(c, 0);
    }
}
