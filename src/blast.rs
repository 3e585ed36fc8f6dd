//! Blasts: the craft's projectiles.
//!
//! A blast appears `blast_spawn_buffer_px` ahead of the craft and flies along
//! the craft's heading at a fixed speed (the craft's own velocity is not
//! added).  It is a [`Bumper`], so the first collidable it overlaps takes a hit
//! and the blast explodes.  A blast that hits nothing expires quietly after
//! `blast_lifetime` frames.

use crate::bumper::{Bumper, Collidable, Demise, Destroyed};
use crate::config::GameConfig;
use crate::effects::{play_sound, FrameAnimation};
use crate::graphics::GameAssets;
use crate::motion::{heading_rotation, Extent, Heading, ScreenWrap, Velocity};
use crate::session::SessionEntity;
use bevy::prelude::*;

/// Frames left before the blast expires.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub struct Blast {
    pub lifetime: u32,
}

/// Fire a blast from a craft at `origin` facing `heading`.
pub fn spawn_blast(
    commands: &mut Commands,
    assets: &GameAssets,
    config: &GameConfig,
    origin: Vec2,
    heading: Heading,
) -> Entity {
    let direction = heading.forward();
    let at = origin + direction * config.blast_spawn_buffer_px;

    play_sound(commands, &assets.blast_sound);
    commands
        .spawn((
            Blast {
                lifetime: config.blast_lifetime,
            },
            FrameAnimation::looping(assets.blast_frames.clone(), 5),
            Sprite::from_image(assets.blast_frames.first().cloned().unwrap_or_default()),
            Transform::from_translation(at.extend(1.0))
                .with_rotation(heading_rotation(heading.degrees())),
            heading,
            Velocity(direction * config.blast_velocity_factor),
            Extent::square(config.blast_half_extent),
            ScreenWrap,
            Collidable,
            Bumper,
            SessionEntity,
        ))
        .id()
}

/// Count down every blast and remove the ones that ran out.
///
/// Runs after the collision reactions, so a blast that struck something this
/// frame is already gone from the query.
pub fn blast_lifetime_system(
    mut commands: Commands,
    mut blasts: Query<(Entity, &mut Blast, &Transform)>,
    mut destroyed: MessageWriter<Destroyed>,
) {
    for (entity, mut blast, transform) in blasts.iter_mut() {
        blast.lifetime = blast.lifetime.saturating_sub(1);
        if blast.lifetime == 0 {
            destroyed.write(Destroyed {
                entity,
                at: transform.translation.truncate(),
                demise: Demise::Expired,
            });
            commands.entity(entity).despawn();
        }
    }
}
