//! Gameplay session: depth, score, the live debris belt and the wave policy.
//!
//! A session starts when the game enters [`GameState::Playing`] and ends when
//! the spacecraft is destroyed.  Whenever the belt is empty at the end of the
//! craft's frame, [`level_advance_system`] moves one depth deeper and spawns a
//! wave of `depth` new pieces around the craft.

use crate::config::GameConfig;
use crate::constants::{SUPER_TOUGH_ODDS, TOUGH_ODDS};
use crate::craft::{spawn_craft, Spacecraft};
use crate::debris::{spawn_debris, Debris, DebrisSize, DebrisTier};
use crate::effects::play_sound;
use crate::graphics::GameAssets;
use crate::hud::{display_help, spawn_hud};
use crate::menu::GameState;
use bevy::prelude::*;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::collections::HashSet;

/// Deterministic, seedable random source shared by every gameplay system.
#[derive(Resource, Debug, Clone)]
pub struct GameRng(pub ChaCha8Rng);

impl GameRng {
    pub fn seeded(seed: u64) -> Self {
        Self(ChaCha8Rng::seed_from_u64(seed))
    }
}

impl Default for GameRng {
    fn default() -> Self {
        Self::seeded(rand::random())
    }
}

/// Marker for everything that belongs to one run and is swept away when the
/// next run starts.
#[derive(Component, Debug, Clone, Copy, Default)]
pub struct SessionEntity;

/// State of the current run.
#[derive(Resource, Debug, Clone, Default, PartialEq)]
pub struct Session {
    /// Starts at 0; the first advance makes it 1.
    pub depth: u32,
    pub score: u32,
    /// Live debris.  Membership only.
    pub belt: HashSet<Entity>,
}

impl Session {
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// Draw a tier: one in 20 is super-tough, then one in 10 of the rest is tough.
pub fn roll_tier(rng: &mut ChaCha8Rng) -> DebrisTier {
    if rng.gen_range(0..SUPER_TOUGH_ODDS) == 0 {
        DebrisTier::SuperTough
    } else if rng.gen_range(0..TOUGH_ODDS) == 0 {
        DebrisTier::Tough
    } else {
        DebrisTier::Normal
    }
}

/// Offset of a wave piece from the craft, drawn independently per axis.
///
/// Right of and below the craft, so waves cluster toward one corner before the
/// wrap spreads them out.
pub fn wave_offset(rng: &mut ChaCha8Rng, config: &GameConfig) -> Vec2 {
    let range = config.min_spawn_buffer_px..=config.max_spawn_buffer_px;
    let dx = rng.gen_range(range.clone());
    let dy = rng.gen_range(range);
    Vec2::new(dx as f32, -(dy as f32))
}

/// Move one depth deeper and spawn the new wave around `craft_at`.
///
/// Returns the number of pieces spawned, which equals the new depth.
pub fn advance(
    commands: &mut Commands,
    assets: &GameAssets,
    config: &GameConfig,
    rng: &mut ChaCha8Rng,
    session: &mut Session,
    craft_at: Vec2,
) -> usize {
    play_sound(commands, &assets.advance_sound);
    session.depth += 1;

    let wave = session.depth as usize;
    for _ in 0..wave {
        let at = craft_at + wave_offset(rng, config);
        let tier = roll_tier(rng);
        let size = if rng.gen_bool(0.5) {
            DebrisSize::Medium
        } else {
            DebrisSize::Big
        };
        spawn_debris(commands, assets, config, rng, session, Debris::new(tier, size), at);
    }
    info!("Advanced to depth {} ({} debris)", session.depth, wave);
    wave
}

/// Advance when the belt is empty.
///
/// Runs at the end of the craft's frame, so a belt emptied by this frame's
/// collisions is refilled before the next frame starts.
///
/// Does nothing unless exactly one craft exists.  A craft wrecked this frame
/// is already gone: [`crate::bumper::bumper_wreck_system`] despawns it earlier in
/// the same chain, so clearing the belt with a collision that also wrecks the
/// craft does not open a new depth.
pub fn level_advance_system(
    mut commands: Commands,
    mut session: ResMut<Session>,
    mut rng: ResMut<GameRng>,
    craft: Query<&Transform, With<Spacecraft>>,
    assets: Res<GameAssets>,
    config: Res<GameConfig>,
) {
    if !session.belt.is_empty() {
        return;
    }
    let Ok(craft) = craft.single() else {
        return;
    };
    advance(
        &mut commands,
        &assets,
        &config,
        &mut rng.0,
        &mut session,
        craft.translation.truncate(),
    );
}

/// Start a fresh run on entering [`GameState::Playing`].
///
/// Sweeps away whatever the previous run left behind, resets depth and score,
/// spawns the craft and the HUD, shows the help chart and advances to depth 1.
pub fn start_session(
    mut commands: Commands,
    leftovers: Query<Entity, With<SessionEntity>>,
    mut session: ResMut<Session>,
    mut rng: ResMut<GameRng>,
    assets: Res<GameAssets>,
    config: Res<GameConfig>,
) {
    let swept = leftovers.iter().count();
    for entity in leftovers.iter() {
        commands.entity(entity).try_despawn();
    }
    session.reset();

    spawn_craft(&mut commands, &assets, &config, Vec2::ZERO);
    spawn_hud(&mut commands);
    display_help(&mut commands);
    info!("Session started ({swept} leftovers cleared)");

    advance(
        &mut commands,
        &assets,
        &config,
        &mut rng.0,
        &mut session,
        Vec2::ZERO,
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tier_odds_over_many_draws() {
        let mut rng = ChaCha8Rng::seed_from_u64(2024);
        let trials = 40_000;
        let mut counts = [0usize; 3];
        for _ in 0..trials {
            counts[roll_tier(&mut rng).index()] += 1;
        }
        let share = |n: usize| n as f64 / trials as f64;
        // 1/20 super-tough; 1/10 of the remaining 19/20 tough.
        assert!((share(counts[2]) - 0.05).abs() < 0.01, "{counts:?}");
        assert!((share(counts[1]) - 0.095).abs() < 0.012, "{counts:?}");
        assert!((share(counts[0]) - 0.855).abs() < 0.015, "{counts:?}");
    }

    #[test]
    fn same_seed_same_tiers() {
        let mut a = GameRng::seeded(9);
        let mut b = GameRng::seeded(9);
        let draws_a: Vec<_> = (0..50).map(|_| roll_tier(&mut a.0)).collect();
        let draws_b: Vec<_> = (0..50).map(|_| roll_tier(&mut b.0)).collect();
        assert_eq!(draws_a, draws_b);
    }

    #[test]
    fn wave_offset_stays_in_the_buffer_band() {
        let config = GameConfig::default();
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        for _ in 0..500 {
            let offset = wave_offset(&mut rng, &config);
            assert!((300.0..=350.0).contains(&offset.x));
            assert!((-350.0..=-300.0).contains(&offset.y));
        }
    }
}
