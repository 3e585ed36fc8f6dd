//! Collision reactor ("bumper"): overlap detection and one-hit damage.
//!
//! ## Roles
//!
//! | Component      | Meaning                                                   |
//! |----------------|-----------------------------------------------------------|
//! | [`Collidable`] | Takes part in overlap tests (craft, blasts, debris)        |
//! | [`Bumper`]     | Reacts to overlaps: damages partners, then destroys itself |
//! | [`HitPoints`]  | Optional; absorbs hits.  Entities without it die on any hit |
//!
//! Debris is collidable and damageable but not a bumper: a rock never looks for
//! overlaps itself, it is found by a blast or by the craft.
//!
//! ## Frame contract
//!
//! [`bumper_system`] runs once per frame after motion and wrap.  Bumpers are
//! processed in ascending entity order.  For each bumper with at least one
//! overlapping live partner, every partner takes one hit, then the bumper is
//! destroyed.  An entity is destroyed at most once per frame and stops being a
//! partner the moment it is destroyed.  Each destruction is published as a
//! [`Destroyed`] message; kind-specific reactions (debris breakup, explosions,
//! game over) live in the systems that read it.

use crate::effects::{play_sound, spawn_explosion};
use crate::graphics::GameAssets;
use crate::motion::Extent;
use crate::spatial_partition::SpatialGrid;
use bevy::prelude::*;
use std::collections::{BTreeMap, HashSet};

// ── Components ────────────────────────────────────────────────────────────────

/// Marker: the entity takes part in overlap tests.
#[derive(Component, Debug, Clone, Copy, Default)]
pub struct Collidable;

/// Marker: the entity reacts to overlaps (spacecraft, blasts).
#[derive(Component, Debug, Clone, Copy, Default)]
pub struct Bumper;

/// Remaining hits before destruction.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Deref, DerefMut)]
pub struct HitPoints(pub u32);

// ── Messages ──────────────────────────────────────────────────────────────────

/// Why an entity left the live registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Demise {
    /// Destroyed by a collision (either side of it).
    Struck,
    /// Ran out of lifetime.  No explosion.
    Expired,
}

/// Published once per destroyed entity; the entity is still alive (its
/// despawn is issued by whichever system handles its kind).
#[derive(Message, Debug, Clone, Copy, PartialEq)]
pub struct Destroyed {
    pub entity: Entity,
    /// Last position, for effects and fragment spawns.
    pub at: Vec2,
    pub demise: Demise,
}

// ── Pure resolution ───────────────────────────────────────────────────────────

/// Snapshot of one collidable entity for a resolution pass.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Body {
    pub center: Vec2,
    pub half: Vec2,
    /// `None` means the entity has no hit-point capability.
    pub hit_points: Option<u32>,
    pub bumper: bool,
}

impl Body {
    /// Strict AABB overlap; boxes that only touch do not collide.
    pub fn overlaps(&self, other: &Body) -> bool {
        let gap = (self.center - other.center).abs();
        let reach = self.half + other.half;
        gap.x < reach.x && gap.y < reach.y
    }

    /// Apply one hit.  Returns `true` when the body is destroyed by it.
    pub fn take_hit(&mut self) -> bool {
        match self.hit_points {
            Some(hp) => {
                let left = hp.saturating_sub(1);
                self.hit_points = Some(left);
                left == 0
            }
            None => true,
        }
    }
}

/// Run one bumper pass over `bodies` and return destroyed entities in the
/// order they were destroyed.
///
/// `candidates` yields possible partners for a bumper (a broadphase); the
/// exact overlap test happens here.  Hit points of surviving partners are
/// updated in place.
pub fn resolve_hits<F>(bodies: &mut BTreeMap<Entity, Body>, mut candidates: F) -> Vec<Entity>
where
    F: FnMut(Entity, &Body) -> Vec<Entity>,
{
    let bumpers: Vec<Entity> = bodies
        .iter()
        .filter(|(_, body)| body.bumper)
        .map(|(entity, _)| *entity)
        .collect();

    let mut gone: HashSet<Entity> = HashSet::new();
    let mut destroyed = Vec::new();

    for bumper in bumpers {
        if gone.contains(&bumper) {
            continue;
        }
        let Some(body) = bodies.get(&bumper).copied() else {
            continue;
        };

        let partners: Vec<Entity> = candidates(bumper, &body)
            .into_iter()
            .filter(|e| *e != bumper && !gone.contains(e))
            .filter(|e| bodies.get(e).is_some_and(|other| body.overlaps(other)))
            .collect();
        if partners.is_empty() {
            continue;
        }

        for partner in partners {
            let Some(other) = bodies.get_mut(&partner) else {
                continue;
            };
            if other.take_hit() {
                gone.insert(partner);
                destroyed.push(partner);
            }
        }

        gone.insert(bumper);
        destroyed.push(bumper);
    }

    destroyed
}

// ── Systems ───────────────────────────────────────────────────────────────────

/// Detect overlaps for every [`Bumper`], apply damage, and publish
/// [`Destroyed`] messages.
///
/// Requires the [`SpatialGrid`] to have been rebuilt this frame.
#[allow(clippy::type_complexity)]
pub fn bumper_system(
    grid: Res<SpatialGrid>,
    mut q: Query<
        (
            Entity,
            &Transform,
            &Extent,
            Option<&mut HitPoints>,
            Has<Bumper>,
        ),
        With<Collidable>,
    >,
    mut destroyed_writer: MessageWriter<Destroyed>,
) {
    let mut bodies: BTreeMap<Entity, Body> = BTreeMap::new();
    let mut widest = 0.0_f32;
    for (entity, transform, extent, hit_points, bumper) in q.iter() {
        widest = widest.max(extent.max_element());
        bodies.insert(
            entity,
            Body {
                center: transform.translation.truncate(),
                half: extent.0,
                hit_points: hit_points.map(|hp| hp.0),
                bumper,
            },
        );
    }
    if !bodies.values().any(|b| b.bumper) {
        return;
    }

    let destroyed = resolve_hits(&mut bodies, |entity, body| {
        grid.get_neighbors_excluding(entity, body.center, body.half.max_element() + widest)
    });

    // Write back damage taken by survivors.
    for (entity, _, _, hit_points, _) in q.iter_mut() {
        if let (Some(mut hp), Some(body)) = (hit_points, bodies.get(&entity)) {
            if let Some(left) = body.hit_points {
                if hp.0 != left {
                    hp.0 = left;
                }
            }
        }
    }

    for entity in destroyed {
        let Some(body) = bodies.get(&entity) else {
            continue;
        };
        destroyed_writer.write(Destroyed {
            entity,
            at: body.center,
            demise: Demise::Struck,
        });
    }
}

/// Explode and despawn every bumper destroyed by a collision.
///
/// Plays the explosion sound and leaves a non-collidable explosion animation
/// at the bumper's last position.  Expired bumpers (blasts that ran out of
/// lifetime) are not handled here.
pub fn bumper_wreck_system(
    mut commands: Commands,
    mut destroyed: MessageReader<Destroyed>,
    bumpers: Query<(), With<Bumper>>,
    assets: Res<GameAssets>,
) {
    for event in destroyed.read() {
        if event.demise != Demise::Struck || !bumpers.contains(event.entity) {
            continue;
        }
        play_sound(&mut commands, &assets.explosion_sound);
        spawn_explosion(&mut commands, &assets, event.at);
        commands.entity(event.entity).despawn();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn body(x: f32, hit_points: Option<u32>, bumper: bool) -> Body {
        Body {
            center: Vec2::new(x, 0.0),
            half: Vec2::splat(10.0),
            hit_points,
            bumper,
        }
    }

    fn everyone(bodies: &BTreeMap<Entity, Body>) -> impl FnMut(Entity, &Body) -> Vec<Entity> {
        let all: Vec<Entity> = bodies.keys().copied().collect();
        move |_, _| all.clone()
    }

    fn entities(n: usize) -> Vec<Entity> {
        let mut world = World::new();
        (0..n).map(|_| world.spawn_empty().id()).collect()
    }

    #[test]
    fn touching_boxes_do_not_overlap() {
        assert!(!body(0.0, None, false).overlaps(&body(20.0, None, false)));
        assert!(body(0.0, None, false).overlaps(&body(19.5, None, false)));
    }

    #[test]
    fn bumper_hitting_plain_partner_destroys_both() {
        let e = entities(2);
        let mut bodies = BTreeMap::from([(e[0], body(0.0, None, true)), (e[1], body(5.0, None, false))]);
        let cands = everyone(&bodies);
        let destroyed = resolve_hits(&mut bodies, cands);
        assert_eq!(destroyed, vec![e[1], e[0]]);
    }

    #[test]
    fn partner_with_spare_hit_points_survives_but_bumper_does_not() {
        let e = entities(2);
        let mut bodies =
            BTreeMap::from([(e[0], body(0.0, None, true)), (e[1], body(5.0, Some(3), false))]);
        let cands = everyone(&bodies);
        let destroyed = resolve_hits(&mut bodies, cands);
        assert_eq!(destroyed, vec![e[0]]);
        assert_eq!(bodies[&e[1]].hit_points, Some(2));
    }

    #[test]
    fn first_bumper_claims_an_overlapping_bumper_as_partner() {
        let e = entities(3);
        let mut bodies = BTreeMap::from([
            (e[0], body(-5.0, None, true)),
            (e[1], body(5.0, None, true)),
            (e[2], body(0.0, Some(2), false)),
        ]);
        let cands = everyone(&bodies);
        let destroyed = resolve_hits(&mut bodies, cands);
        // First bumper also overlaps the second (both are collidable), so the
        // second is destroyed as a partner before it gets its own turn.
        assert_eq!(destroyed, vec![e[1], e[0]]);
        assert_eq!(bodies[&e[2]].hit_points, Some(1));
    }

    #[test]
    fn destroyed_partner_is_not_hit_again() {
        let e = entities(3);
        let mut bodies = BTreeMap::from([
            (e[0], body(-30.0, None, true)),
            (e[1], body(-15.0, Some(1), false)),
            (e[2], body(0.0, None, true)),
        ]);
        let cands = everyone(&bodies);
        let destroyed = resolve_hits(&mut bodies, cands);
        // e0 kills e1 and itself; e2 overlapped only e1, which is gone.
        assert_eq!(destroyed, vec![e[1], e[0]]);
    }

    #[test]
    fn lone_bumper_survives() {
        let e = entities(1);
        let mut bodies = BTreeMap::from([(e[0], body(0.0, None, true))]);
        let cands = everyone(&bodies);
        assert!(resolve_hits(&mut bodies, cands).is_empty());
    }
}
