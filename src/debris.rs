//! Debris: the rocks of the belt.
//!
//! Every piece has a toughness [`DebrisTier`] and a [`DebrisSize`].  The tier is
//! a fixed dispatch axis: it selects the starting hit points, the image set and
//! the score multiplier, while the spawn and breakup algorithm is shared.
//!
//! | Tier        | Hit points | Multiplier |
//! |-------------|------------|------------|
//! | Normal      | 1          | 1          |
//! | Tough       | 2          | 2          |
//! | Super-tough | 3          | 3          |
//!
//! When a piece is destroyed it leaves the belt, breaks into
//! `crash_spawns` pieces one size smaller (same tier, fresh hit points) unless
//! it was already small, and awards [`debris_points`].

use crate::bumper::{Collidable, Destroyed, HitPoints};
use crate::config::GameConfig;
use crate::constants::SIZE_BONUS_NUMERATOR;
use crate::graphics::GameAssets;
use crate::motion::{heading_rotation, Extent, Heading, ScreenWrap, Velocity};
use crate::session::{GameRng, Session, SessionEntity};
use bevy::prelude::*;
use rand::Rng;
use rand_chacha::ChaCha8Rng;

/// Toughness classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum DebrisTier {
    Normal,
    Tough,
    SuperTough,
}

impl DebrisTier {
    pub const ALL: [DebrisTier; 3] = [Self::Normal, Self::Tough, Self::SuperTough];

    #[inline]
    pub fn index(self) -> usize {
        match self {
            Self::Normal => 0,
            Self::Tough => 1,
            Self::SuperTough => 2,
        }
    }

    /// Hit points a fresh piece of this tier starts with.
    #[inline]
    pub fn base_hit_points(self) -> u32 {
        self.index() as u32 + 1
    }

    #[inline]
    pub fn multiplier(self) -> u32 {
        self.index() as u32 + 1
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum DebrisSize {
    Small = 1,
    Medium = 2,
    Big = 3,
}

impl DebrisSize {
    /// Numeric size (1–3) used by the score and speed formulas.
    #[inline]
    pub fn value(self) -> u32 {
        self as u32
    }

    #[inline]
    pub fn index(self) -> usize {
        self.value() as usize - 1
    }

    /// Size of the pieces left behind, or `None` for the smallest size.
    pub fn smaller(self) -> Option<Self> {
        match self {
            Self::Small => None,
            Self::Medium => Some(Self::Small),
            Self::Big => Some(Self::Medium),
        }
    }

    pub fn half_extent(self, config: &GameConfig) -> f32 {
        match self {
            Self::Small => config.debris_small_half_extent,
            Self::Medium => config.debris_medium_half_extent,
            Self::Big => config.debris_big_half_extent,
        }
    }
}

/// A piece of debris.  Hit points live in the shared [`HitPoints`] component.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub struct Debris {
    pub tier: DebrisTier,
    pub size: DebrisSize,
}

impl Debris {
    pub fn new(tier: DebrisTier, size: DebrisSize) -> Self {
        Self { tier, size }
    }
}

/// Score for destroying one piece: `m·(4 − size) + (30 / size)·m`, integer
/// division, where `m` is the tier multiplier.
pub fn debris_points(tier: DebrisTier, size: DebrisSize) -> u32 {
    let m = tier.multiplier();
    let base = 4 - size.value();
    base * m + (SIZE_BONUS_NUMERATOR / size.value()) * m
}

/// Per-axis drift `speed · U[0,1) · ±1 / size`.  Smaller pieces tend to move faster.
pub fn random_velocity(rng: &mut ChaCha8Rng, speed: f32, size: DebrisSize) -> Vec2 {
    let mut axis = || {
        let sign = if rng.gen_bool(0.5) { 1.0 } else { -1.0 };
        speed * rng.gen::<f32>() * sign / size.value() as f32
    };
    let x = axis();
    let y = axis();
    Vec2::new(x, y)
}

/// Spawn one piece at `at` and register it in the belt.
pub fn spawn_debris(
    commands: &mut Commands,
    assets: &GameAssets,
    config: &GameConfig,
    rng: &mut ChaCha8Rng,
    session: &mut Session,
    debris: Debris,
    at: Vec2,
) -> Entity {
    let velocity = random_velocity(rng, config.debris_velocity, debris.size);
    let heading = Heading::new(rng.gen_range(0.0..360.0));
    let entity = commands
        .spawn((
            debris,
            HitPoints(debris.tier.base_hit_points()),
            Sprite::from_image(assets.debris_image(debris.tier, debris.size)),
            Transform::from_translation(at.extend(0.0))
                .with_rotation(heading_rotation(heading.degrees())),
            heading,
            Velocity(velocity),
            Extent::square(debris.size.half_extent(config)),
            ScreenWrap,
            Collidable,
            SessionEntity,
        ))
        .id();
    session.belt.insert(entity);
    entity
}

/// Break up every destroyed piece of debris.
///
/// Order per piece: leave the belt, spawn the smaller pieces at the last
/// position, award the score, despawn.
pub fn debris_breakup_system(
    mut commands: Commands,
    mut destroyed: MessageReader<Destroyed>,
    debris_q: Query<&Debris>,
    mut session: ResMut<Session>,
    mut rng: ResMut<GameRng>,
    assets: Res<GameAssets>,
    config: Res<GameConfig>,
) {
    for event in destroyed.read() {
        let Ok(debris) = debris_q.get(event.entity) else {
            continue;
        };
        session.belt.remove(&event.entity);

        if let Some(child) = debris.size.smaller() {
            for _ in 0..config.crash_spawns {
                spawn_debris(
                    &mut commands,
                    &assets,
                    &config,
                    &mut rng.0,
                    &mut session,
                    Debris::new(debris.tier, child),
                    event.at,
                );
            }
        }

        let points = debris_points(debris.tier, debris.size);
        session.score += points;
        debug!(
            "Debris {:?}/{:?} destroyed for {} points (score {})",
            debris.tier, debris.size, points, session.score
        );
        commands.entity(event.entity).despawn();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    #[test]
    fn points_table() {
        assert_eq!(debris_points(DebrisTier::Normal, DebrisSize::Big), 11);
        assert_eq!(debris_points(DebrisTier::Normal, DebrisSize::Medium), 17);
        assert_eq!(debris_points(DebrisTier::Normal, DebrisSize::Small), 33);
        assert_eq!(debris_points(DebrisTier::Tough, DebrisSize::Big), 22);
        assert_eq!(debris_points(DebrisTier::SuperTough, DebrisSize::Small), 99);
    }

    #[test]
    fn clearing_one_normal_big_rock_scores_177() {
        // One big, two medium, four small.
        let total = debris_points(DebrisTier::Normal, DebrisSize::Big)
            + 2 * debris_points(DebrisTier::Normal, DebrisSize::Medium)
            + 4 * debris_points(DebrisTier::Normal, DebrisSize::Small);
        assert_eq!(total, 177);
    }

    #[test]
    fn sizes_step_down_to_nothing() {
        assert_eq!(DebrisSize::Big.smaller(), Some(DebrisSize::Medium));
        assert_eq!(DebrisSize::Medium.smaller(), Some(DebrisSize::Small));
        assert_eq!(DebrisSize::Small.smaller(), None);
    }

    #[test]
    fn tier_base_hit_points() {
        let hp: Vec<u32> = DebrisTier::ALL.iter().map(|t| t.base_hit_points()).collect();
        assert_eq!(hp, vec![1, 2, 3]);
    }

    #[test]
    fn drift_is_bounded_by_speed_over_size() {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        for size in [DebrisSize::Small, DebrisSize::Medium, DebrisSize::Big] {
            let limit = 3.0 / size.value() as f32;
            for _ in 0..200 {
                let v = random_velocity(&mut rng, 3.0, size);
                assert!(v.x.abs() < limit && v.y.abs() < limit, "{v:?} for {size:?}");
            }
        }
    }
}
