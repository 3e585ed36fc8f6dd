//! Kinematic motion shared by every moving entity, and toroidal screen wrap.
//!
//! There is no physics engine: each frame [`motion_system`] adds the
//! per-frame [`Velocity`] to the translation, then [`screen_wrap_system`]
//! relocates any [`ScreenWrap`] entity whose box has fully left one side of the
//! viewport so that it re-enters from the opposite side.  Both run before any
//! collision or per-kind logic.
//!
//! ## Angle convention
//!
//! [`Heading`] is in degrees, clockwise from "up".  The forward unit vector is
//! `(sin a, cos a)` in Bevy's y-up world space; see [`forward`].

use crate::config::GameConfig;
use bevy::prelude::*;

// ── Components ────────────────────────────────────────────────────────────────

/// Linear velocity in pixels per frame.
#[derive(Component, Debug, Clone, Copy, Default, PartialEq, Deref, DerefMut)]
pub struct Velocity(pub Vec2);

/// Facing angle in degrees, clockwise from "up", kept in `[0, 360)`.
#[derive(Component, Debug, Clone, Copy, Default, PartialEq)]
pub struct Heading(f32);

impl Heading {
    pub fn new(degrees: f32) -> Self {
        Self(degrees.rem_euclid(360.0))
    }

    #[inline]
    pub fn degrees(self) -> f32 {
        self.0
    }

    /// Rotate by `delta` degrees (positive = clockwise) and re-normalise.
    pub fn turn(&mut self, delta: f32) {
        self.0 = (self.0 + delta).rem_euclid(360.0);
    }

    /// Unit vector pointing along this heading.
    #[inline]
    pub fn forward(self) -> Vec2 {
        forward(self.0)
    }
}

/// Half size of the entity's axis-aligned bounding box (px).
///
/// Used for the wrap edges and for overlap tests in [`crate::bumper`].
#[derive(Component, Debug, Clone, Copy, PartialEq, Deref)]
pub struct Extent(pub Vec2);

impl Extent {
    pub fn square(half: f32) -> Self {
        Self(Vec2::splat(half))
    }
}

/// Marker: the entity wraps around the viewport edges.
#[derive(Component, Debug, Clone, Copy, Default)]
pub struct ScreenWrap;

// ── Pure helpers ──────────────────────────────────────────────────────────────

/// Unit vector for a heading of `degrees` (clockwise from up).
#[inline]
pub fn forward(degrees: f32) -> Vec2 {
    let rad = degrees.to_radians();
    Vec2::new(rad.sin(), rad.cos())
}

/// Transform rotation for a clockwise-from-up heading.
#[inline]
pub fn heading_rotation(degrees: f32) -> Quat {
    Quat::from_rotation_z(-degrees.to_radians())
}

/// Toroidal correction along one axis.
///
/// `limit` is half the viewport span on this axis.  If the box's trailing
/// edge has passed `+limit`, the box is moved so its leading edge sits at
/// `-limit`, and vice versa.  A box that is still partly visible is untouched.
pub fn wrap_axis(center: f32, half: f32, limit: f32) -> f32 {
    if center - half > limit {
        -limit - half
    } else if center + half < -limit {
        limit + half
    } else {
        center
    }
}

/// Apply [`wrap_axis`] to both axes independently.
pub fn wrap_position(center: Vec2, half: Vec2, viewport: Vec2) -> Vec2 {
    let limit = viewport * 0.5;
    Vec2::new(
        wrap_axis(center.x, half.x, limit.x),
        wrap_axis(center.y, half.y, limit.y),
    )
}

// ── Systems ───────────────────────────────────────────────────────────────────

/// Integrate `translation += velocity` for every entity with a [`Velocity`].
pub fn motion_system(mut q: Query<(&mut Transform, &Velocity)>) {
    for (mut transform, velocity) in q.iter_mut() {
        transform.translation.x += velocity.x;
        transform.translation.y += velocity.y;
    }
}

/// Relocate [`ScreenWrap`] entities that left the viewport.
///
/// Must run after [`motion_system`] and before collision detection so overlap
/// tests always see on-screen positions.
pub fn screen_wrap_system(
    mut q: Query<(&mut Transform, &Extent), With<ScreenWrap>>,
    config: Res<GameConfig>,
) {
    let viewport = config.viewport();
    for (mut transform, extent) in q.iter_mut() {
        let center = transform.translation.truncate();
        let wrapped = wrap_position(center, extent.0, viewport);
        if wrapped != center {
            transform.translation.x = wrapped.x;
            transform.translation.y = wrapped.y;
        }
    }
}

/// Copy [`Heading`] into the transform rotation whenever it changes.
pub fn sync_heading_system(mut q: Query<(&mut Transform, &Heading), Changed<Heading>>) {
    for (mut transform, heading) in q.iter_mut() {
        transform.rotation = heading_rotation(heading.degrees());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const VIEW: Vec2 = Vec2::new(800.0, 600.0);

    #[test]
    fn forward_points_up_at_zero_and_right_at_ninety() {
        assert!((forward(0.0) - Vec2::Y).length() < 1e-6);
        assert!((forward(90.0) - Vec2::X).length() < 1e-6);
        assert!((forward(180.0) + Vec2::Y).length() < 1e-5);
    }

    #[test]
    fn heading_normalises_into_one_turn() {
        let mut h = Heading::new(-30.0);
        assert!((h.degrees() - 330.0).abs() < 1e-4);
        h.turn(45.0);
        assert!((h.degrees() - 15.0).abs() < 1e-4);
        h.turn(180.0 * 5.0);
        assert!((h.degrees() - 195.0).abs() < 1e-3);
    }

    #[test]
    fn box_leaving_the_top_reenters_from_the_bottom() {
        // Bottom edge (y - 10) is above the top of the viewport (300).
        let wrapped = wrap_position(Vec2::new(0.0, 311.0), Vec2::splat(10.0), VIEW);
        assert_eq!(wrapped, Vec2::new(0.0, -310.0));
    }

    #[test]
    fn box_leaving_the_left_reenters_from_the_right() {
        let wrapped = wrap_position(Vec2::new(-411.0, 5.0), Vec2::splat(10.0), VIEW);
        assert_eq!(wrapped, Vec2::new(410.0, 5.0));
    }

    #[test]
    fn partly_visible_box_is_not_moved() {
        let center = Vec2::new(405.0, -305.0);
        assert_eq!(wrap_position(center, Vec2::splat(10.0), VIEW), center);
    }

    #[test]
    fn axes_wrap_independently() {
        let wrapped = wrap_position(Vec2::new(420.0, -320.0), Vec2::splat(10.0), VIEW);
        assert_eq!(wrapped, Vec2::new(-410.0, 310.0));
    }
}
