//! Asteroids - a wrapped-playfield arcade shooter
//!
//! Core modules:
//! - `sim`: Frame-driven simulation (physics, collisions, waves, menus)
//! - `audio`: Sound cue mapping over an optional backend
//! - `highscores`: Persisted best score
//! - `settings`: User preferences
//! - `persistence`: JSON file helpers shared by the stores
//! - `game`: Frame driver wiring the simulation to its collaborators

pub mod audio;
pub mod game;
pub mod highscores;
pub mod persistence;
pub mod settings;
pub mod sim;

pub use game::Game;
pub use highscores::{FileHighScoreStore, HighScoreStore, MemoryHighScoreStore};
pub use settings::{QualityPreset, Settings};

use glam::Vec2;

/// Game configuration constants
///
/// Speeds are pixels per frame; timers are seconds.
pub mod consts {
    /// Playfield dimensions
    pub const GAME_WIDTH: f32 = 800.0;
    pub const GAME_HEIGHT: f32 = 600.0;

    /// Session limits
    pub const MAX_LIVES: u32 = 4;
    pub const MAX_SCALE: u8 = 4;
    pub const DEFAULT_SCALE: u8 = 2;

    /// Delay after a death before spawn input is accepted
    pub const BASE_COOLDOWN_DURATION: f32 = 1.0;
    /// "WAVE n" banner duration
    pub const WAVE_TRANSITION_DURATION: f32 = 2.0;

    /// Ship handling
    pub const SHIP_TURN_DEGREES: f32 = 3.0;
    pub const SHIP_THRUST: f32 = 0.3;
    pub const SHIP_BRAKE_FORCE: f32 = 0.08;
    pub const SHIP_BRAKE_MIN_SPEED: f32 = 0.05;
    pub const SHIP_REVERSE_THRUST: f32 = 0.45;
    pub const SHIP_REVERSE_SCALE: f32 = 0.4;
    pub const SHIP_DRAG: f32 = 0.99;
    pub const SHIP_MAX_SPEED: f32 = 8.0;
    pub const SHIP_RADIUS: f32 = 8.0;

    /// Bullets
    pub const BULLET_SPEED: f32 = 8.0;
    pub const BULLET_RADIUS: f32 = 2.0;

    /// Asteroid collision radii by size tier
    pub const ASTEROID_RADIUS_LARGE: f32 = 30.0;
    pub const ASTEROID_RADIUS_MEDIUM: f32 = 20.0;
    pub const ASTEROID_RADIUS_SMALL: f32 = 10.0;

    /// Wave spawning
    pub const WAVE_BASE_ASTEROIDS: u32 = 3;
    pub const WAVE_SPEED_STEP: f32 = 0.2;
    pub const SPAWN_SAFE_HALF_EXTENT: f32 = 100.0;

    /// Particle velocity decay per frame
    pub const PARTICLE_DRAG: f32 = 0.98;
}

/// Rotate a point about the origin by `degrees` (positive = clockwise on screen)
#[inline]
pub fn rotate_point(x: f32, y: f32, degrees: f32) -> Vec2 {
    let rad = degrees.to_radians();
    let (sin, cos) = rad.sin_cos();
    Vec2::new(x * cos - y * sin, x * sin + y * cos)
}

/// Normalize an angle in degrees to [0, 360)
#[inline]
pub fn normalize_degrees(degrees: f32) -> f32 {
    let d = degrees.rem_euclid(360.0);
    if d >= 360.0 { 0.0 } else { d }
}

/// Wrap a coordinate into [0, max)
///
/// `rem_euclid` can round a tiny negative input up to exactly `max`, so that
/// case folds back to 0.
#[inline]
pub fn wrap_coord(value: f32, max: f32) -> f32 {
    let v = value.rem_euclid(max);
    if v >= max { 0.0 } else { v }
}

/// Wrap a position onto the toroidal playfield
#[inline]
pub fn wrap_position(pos: Vec2) -> Vec2 {
    Vec2::new(
        wrap_coord(pos.x, consts::GAME_WIDTH),
        wrap_coord(pos.y, consts::GAME_HEIGHT),
    )
}

/// True when `pos` lies inside the closed playfield rectangle
#[inline]
pub fn in_bounds(pos: Vec2) -> bool {
    (0.0..=consts::GAME_WIDTH).contains(&pos.x) && (0.0..=consts::GAME_HEIGHT).contains(&pos.y)
}

/// Centre of the playfield
#[inline]
pub fn playfield_center() -> Vec2 {
    Vec2::new(consts::GAME_WIDTH / 2.0, consts::GAME_HEIGHT / 2.0)
}
