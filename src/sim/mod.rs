//! Frame-driven simulation module
//!
//! All gameplay logic lives here. This module must stay free of I/O:
//! - Elapsed time is always passed in, never read from a clock
//! - Seeded RNG only
//! - Side effects leave as `GameEvent`s for the frame driver
//! - No rendering, audio or storage dependencies

pub mod collision;
pub mod menu;
pub mod particles;
pub mod physics;
pub mod state;
pub mod tick;
pub mod wave;

pub use collision::{circles_overlap, split_asteroid};
pub use menu::{Menu, MenuAction, MenuContext, MenuItem};
pub use particles::ExplosionRecipe;
pub use state::{
    Asteroid, AsteroidSize, Bullet, Color, GameEvent, GamePhase, GameState, MAX_PARTICLES,
    Particle, Ship,
};
pub use tick::{Buttons, TickInput, tick};
pub use wave::{asteroid_count_for_wave, spawn_wave};
