//! Centralised gameplay constants.
//!
//! All tuneable values live here so they can be found, reasoned-about, and
//! modified in one place without source-diving across multiple modules.
//! [`crate::config::GameConfig`] mirrors the runtime-tunable subset and uses
//! these values as its compiled defaults.
//!
//! Every duration below is a **frame count**: one `Update` pass is one frame
//! and the window is paced at ~60 Hz.  Every speed is in pixels per frame.

// ── Viewport ──────────────────────────────────────────────────────────────────

/// Width of the play field (px).  The viewport is centred on the world origin,
/// so the visible x range is `±WINDOW_WIDTH / 2`.
pub const WINDOW_WIDTH: f32 = 800.0;

/// Height of the play field (px).  Visible y range is `±WINDOW_HEIGHT / 2`.
pub const WINDOW_HEIGHT: f32 = 600.0;

// ── Spacecraft: Steering ──────────────────────────────────────────────────────

/// Degrees turned per frame while a turn key is held.
pub const TURN_FACTOR: f32 = 3.0;

/// Lockout (frames) between two consecutive 180° snap-turns.
pub const TURN_AROUND_DELAY: u32 = 25;

// ── Spacecraft: Thrust ────────────────────────────────────────────────────────

/// Velocity added along the heading per frame of forward thrust.
/// Also the per-axis decrement applied by the brake.
pub const VELOCITY_FACTOR: f32 = 0.1;

/// Per-axis speed limit.  Each velocity component is clamped to
/// `[-VELOCITY_MAX, VELOCITY_MAX]` independently, so the diagonal top speed is
/// `VELOCITY_MAX · √2`.
pub const VELOCITY_MAX: f32 = 4.0;

/// Velocity removed along the heading per frame of reverse pull.
/// Intentionally weaker than `VELOCITY_FACTOR`.
pub const REVERSE_PULL_FACTOR: f32 = 0.07;

// ── Spacecraft: Blaster & Instruments ─────────────────────────────────────────

/// Reload time (frames) between two shots.
pub const BLASTER_DELAY: u32 = 30;

/// Distance (px) ahead of the craft at which the viewfinder is drawn.
pub const VIEWFINDER_DISPLAY_BUFFER: f32 = 150.0;

/// Debounce (frames) on the viewfinder toggle key.
pub const VIEWFINDER_DISPLAY_DELAY: u32 = 10;

/// Refresh period (frames) of the velocity readout ("coometer").
pub const COOMETER_DISPLAY_DELAY: u32 = 15;

// ── Blast ─────────────────────────────────────────────────────────────────────

/// Distance (px) ahead of the craft at which a new blast appears.
///
/// Must stay larger than `CRAFT_HALF_EXTENT + BLAST_HALF_EXTENT`, otherwise a
/// freshly fired blast overlaps the craft and both are destroyed.
pub const BLAST_SPAWN_BUFFER_PX: f32 = 60.0;

/// Blast speed (px/frame) along the craft heading.  Not additive with the
/// craft's own velocity.
pub const BLAST_VELOCITY_FACTOR: f32 = 10.0;

/// Frames a blast survives when it hits nothing.
pub const BLAST_LIFETIME: u32 = 30;

// ── Debris ────────────────────────────────────────────────────────────────────

/// Speed factor for debris.  Each axis draws `DEBRIS_VELOCITY · U[0,1) · ±1 / size`,
/// so smaller pieces tend to be faster.
pub const DEBRIS_VELOCITY: f32 = 3.0;

/// Number of smaller pieces left behind when a medium or big debris breaks.
pub const CRASH_SPAWNS: usize = 2;

/// Largest accepted `crash_spawns` override.  Every breakup multiplies the belt,
/// so a big rock alone leaves `1 + n + n²` pieces to clear.
pub const MAX_CRASH_SPAWNS: usize = 8;

/// Flat score bonus numerator; a destroyed piece earns `(30 / size) · multiplier`
/// on top of its base score (integer division).
pub const SIZE_BONUS_NUMERATOR: u32 = 30;

// ── Gameplay Session ──────────────────────────────────────────────────────────

/// Lower bound (px) of the per-axis offset between the craft and a new wave piece.
pub const MIN_SPAWN_BUFFER_PX: i32 = 300;

/// Upper bound (px, inclusive) of the per-axis wave offset.
pub const MAX_SPAWN_BUFFER_PX: i32 = 350;

/// One in `SUPER_TOUGH_ODDS` wave pieces is super-tough.
pub const SUPER_TOUGH_ODDS: u32 = 20;

/// Of the remaining pieces, one in `TOUGH_ODDS` is tough.
pub const TOUGH_ODDS: u32 = 10;

// ── Bounding Boxes ────────────────────────────────────────────────────────────
//
// Half extents (px) of the axis-aligned boxes used both for screen wrapping and
// for overlap tests.  They approximate the sprite artwork.

pub const CRAFT_HALF_EXTENT: f32 = 20.0;
pub const BLAST_HALF_EXTENT: f32 = 8.0;
pub const DEBRIS_SMALL_HALF_EXTENT: f32 = 12.0;
pub const DEBRIS_MEDIUM_HALF_EXTENT: f32 = 25.0;
pub const DEBRIS_BIG_HALF_EXTENT: f32 = 40.0;

// ── Spatial Grid ─────────────────────────────────────────────────────────────

/// World-space size of each spatial grid cell.
///
/// Kept above the largest pairwise box reach (two big debris: 2 × 40 px) so an
/// overlap query never needs more than a 3×3 block of cells.
pub const GRID_CELL_SIZE: f32 = 100.0;

// ── HUD ───────────────────────────────────────────────────────────────────────

/// Distance (px) of the depth readout from the top edge.
pub const DEPTH_TEXT_TOP: f32 = 12.0;

/// Distance (px) of the score readout from the top and right edges.
pub const SCORE_TEXT_MARGIN: f32 = 25.0;

/// Distance (px) of the velocity readout from the bottom edge.
pub const SPEED_TEXT_BOTTOM: f32 = 15.0;

/// Top offset (px) of the first help line.
pub const HELP_FIRST_LINE_TOP: f32 = 345.0;

/// Vertical spacing (px) between help lines.
pub const HELP_LINE_SPACING: f32 = 25.0;

/// Lifetime (frames) of the first help line; each following line lives
/// `HELP_LIFETIME_STEP` frames longer so the list disappears top-down.
pub const HELP_BASE_LIFETIME: u32 = 180;

/// Lifetime increment (frames) between consecutive help lines.
pub const HELP_LIFETIME_STEP: u32 = 2;
