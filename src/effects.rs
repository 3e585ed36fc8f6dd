//! Visual and audio effects: frame animations and fire-and-forget sounds.
//!
//! ## Design
//!
//! Effects are lightweight ECS entities.  A [`FrameAnimation`] cycles a sprite
//! through a fixed image list, switching every `interval` frames, and despawns
//! the entity after `repeats` complete cycles.  None of these entities is
//! collidable.
//!
//! | Factory                | Frames | Interval | Repeats | Moves with |
//! |------------------------|--------|----------|---------|------------|
//! | [`spawn_explosion`]    | 10     | 5        | 1       | none       |
//! | [`spawn_exhaust`]      | 2      | 1        | 1       | craft      |
//! | [`spawn_turn_around`]  | 6      | 5        | 1       | craft      |
//!
//! Blasts carry a looping [`FrameAnimation`] too, but their lifetime is owned
//! by [`crate::blast`].

use crate::graphics::GameAssets;
use crate::motion::{heading_rotation, Heading, Velocity};
use crate::session::SessionEntity;
use bevy::audio::AudioSource;
use bevy::prelude::*;

// ── Components ────────────────────────────────────────────────────────────────

/// Sprite flip-book.
#[derive(Component, Debug, Clone)]
pub struct FrameAnimation {
    frames: Vec<Handle<Image>>,
    /// Frames each image stays on screen.
    interval: u32,
    /// Full cycles before the entity is despawned; `None` loops forever.
    repeats: Option<u32>,
    /// Frames elapsed since spawn.
    elapsed: u32,
}

impl FrameAnimation {
    pub fn once(frames: Vec<Handle<Image>>, interval: u32) -> Self {
        Self::new(frames, interval, Some(1))
    }

    pub fn looping(frames: Vec<Handle<Image>>, interval: u32) -> Self {
        Self::new(frames, interval, None)
    }

    pub fn new(frames: Vec<Handle<Image>>, interval: u32, repeats: Option<u32>) -> Self {
        Self {
            frames,
            interval: interval.max(1),
            repeats,
            elapsed: 0,
        }
    }

    /// Frames until the animation finishes, or `None` for a looping one.
    pub fn duration(&self) -> Option<u32> {
        let cycle = self.frames.len().max(1) as u32 * self.interval;
        self.repeats.map(|r| cycle * r)
    }

    /// Index of the image to show at the current frame.
    pub fn current_index(&self) -> usize {
        let len = self.frames.len().max(1);
        (self.elapsed / self.interval) as usize % len
    }

    pub fn current_frame(&self) -> Option<&Handle<Image>> {
        self.frames.get(self.current_index())
    }

    /// Step one frame.  Returns `true` once the final repeat has played out.
    pub fn advance(&mut self) -> bool {
        self.elapsed += 1;
        self.duration().is_some_and(|d| self.elapsed >= d)
    }
}

/// Marker on the audio entity of the thrust sound, so holding the key does
/// not stack a new copy every frame.
#[derive(Component, Debug, Clone, Copy, Default)]
pub struct ThrustHum;

// ── Factories ─────────────────────────────────────────────────────────────────

/// Spawn a fire-and-forget sound; the entity despawns itself when playback ends.
pub fn play_sound(commands: &mut Commands, sound: &Handle<AudioSource>) -> Entity {
    commands
        .spawn((AudioPlayer::new(sound.clone()), PlaybackSettings::DESPAWN))
        .id()
}

/// Start the thrust sound unless a previous one is still playing.
pub fn play_thrust_hum(
    commands: &mut Commands,
    sound: &Handle<AudioSource>,
    already_playing: bool,
) -> Option<Entity> {
    if already_playing {
        return None;
    }
    let entity = commands
        .spawn((
            AudioPlayer::new(sound.clone()),
            PlaybackSettings::DESPAWN,
            ThrustHum,
        ))
        .id();
    Some(entity)
}

fn animation_sprite(frames: &[Handle<Image>]) -> Sprite {
    frames
        .first()
        .cloned()
        .map(Sprite::from_image)
        .unwrap_or_default()
}

/// Explosion at a collision site.
pub fn spawn_explosion(commands: &mut Commands, assets: &GameAssets, at: Vec2) -> Entity {
    commands
        .spawn((
            FrameAnimation::once(assets.explosion_frames.clone(), 5),
            animation_sprite(&assets.explosion_frames),
            Transform::from_translation(at.extend(2.0)),
            SessionEntity,
        ))
        .id()
}

/// Exhaust flame trailing the craft for one flip-book cycle.
pub fn spawn_exhaust(
    commands: &mut Commands,
    assets: &GameAssets,
    at: Vec2,
    heading: Heading,
    velocity: Vec2,
) -> Entity {
    commands
        .spawn((
            FrameAnimation::once(assets.exhaust_frames.clone(), 1),
            animation_sprite(&assets.exhaust_frames),
            Transform::from_translation(at.extend(0.5))
                .with_rotation(heading_rotation(heading.degrees())),
            heading,
            Velocity(velocity),
            SessionEntity,
        ))
        .id()
}

/// Visual-only sweep played when the craft snaps around.
pub fn spawn_turn_around(
    commands: &mut Commands,
    assets: &GameAssets,
    at: Vec2,
    heading: Heading,
    velocity: Vec2,
) -> Entity {
    commands
        .spawn((
            FrameAnimation::once(assets.turn_around_frames.clone(), 5),
            animation_sprite(&assets.turn_around_frames),
            Transform::from_translation(at.extend(0.5))
                .with_rotation(heading_rotation(heading.degrees())),
            heading,
            Velocity(velocity),
            SessionEntity,
        ))
        .id()
}

// ── Systems ───────────────────────────────────────────────────────────────────

/// Flip every animated sprite to its current frame and despawn finished
/// one-shot animations.
pub fn frame_animation_system(
    mut commands: Commands,
    mut q: Query<(Entity, &mut FrameAnimation, Option<&mut Sprite>)>,
) {
    for (entity, mut animation, sprite) in q.iter_mut() {
        if animation.advance() {
            commands.entity(entity).despawn();
            continue;
        }
        if let (Some(mut sprite), Some(frame)) = (sprite, animation.current_frame()) {
            if sprite.image != *frame {
                sprite.image = frame.clone();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frames(n: usize) -> Vec<Handle<Image>> {
        (0..n).map(|_| Handle::default()).collect()
    }

    #[test]
    fn explosion_runs_fifty_frames() {
        let mut anim = FrameAnimation::once(frames(10), 5);
        assert_eq!(anim.duration(), Some(50));
        let finished_at = (1..=60).find(|_| anim.advance());
        assert_eq!(finished_at, Some(50));
    }

    #[test]
    fn frame_index_steps_every_interval_and_wraps() {
        let mut anim = FrameAnimation::looping(frames(4), 5);
        assert_eq!(anim.current_index(), 0);
        for _ in 0..5 {
            anim.advance();
        }
        assert_eq!(anim.current_index(), 1);
        for _ in 0..15 {
            anim.advance();
        }
        assert_eq!(anim.current_index(), 0);
    }

    #[test]
    fn looping_animation_never_finishes() {
        let mut anim = FrameAnimation::looping(frames(2), 1);
        assert!((0..1000).all(|_| !anim.advance()));
    }
}
