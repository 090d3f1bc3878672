//! Cosmetic particle effects
//!
//! Particles never feed back into gameplay. Spawns past the live cap are
//! dropped; dead particles are only removed by [`cleanup`].

use glam::Vec2;
use rand::Rng;
use std::f32::consts::TAU;

use super::state::{AsteroidSize, Color, GameState, Particle};
use crate::consts::PARTICLE_DRAG;
use crate::{rotate_point, wrap_position};

/// Spawn parameters for an asteroid explosion
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExplosionRecipe {
    pub count: usize,
    pub speed: f32,
    pub life: f32,
}

/// Explosion particle radius is this plus a random 0..2, for every size
pub const EXPLOSION_PARTICLE_BASE_SIZE: f32 = 2.0;

impl ExplosionRecipe {
    pub fn for_size(size: AsteroidSize) -> Self {
        match size {
            AsteroidSize::Small => Self {
                count: 6,
                speed: 3.0,
                life: 0.8,
            },
            AsteroidSize::Medium => Self {
                count: 8,
                speed: 4.0,
                life: 1.2,
            },
            AsteroidSize::Large => Self {
                count: 12,
                speed: 5.0,
                life: 1.5,
            },
        }
    }
}

pub const SHIP_EXPLOSION_PARTICLES: usize = 15;
pub const THRUST_PARTICLES: usize = 3;

fn live_count(state: &GameState) -> usize {
    state.particles.iter().filter(|p| p.active).count()
}

fn push_capped(state: &mut GameState, live: &mut usize, particle: Particle) {
    if *live >= state.max_particles {
        return;
    }
    state.particles.push(particle);
    *live += 1;
}

/// Burst evenly around a circle with per-particle jitter
pub fn spawn_explosion(state: &mut GameState, pos: Vec2, size: AsteroidSize) {
    let recipe = ExplosionRecipe::for_size(size);
    let mut live = live_count(state);

    for i in 0..recipe.count {
        let rng = &mut state.rng;
        let angle = i as f32 / recipe.count as f32 * TAU + rng.random::<f32>() * 0.5;
        let speed = recipe.speed * (0.5 + rng.random::<f32>() * 0.5);
        let life = recipe.life * (0.7 + rng.random::<f32>() * 0.3);
        let color = if rng.random_ratio(1, 3) {
            Color::LIGHT_GRAY
        } else {
            Color::WHITE
        };
        let size = EXPLOSION_PARTICLE_BASE_SIZE + rng.random::<f32>() * 2.0;

        push_capped(
            state,
            &mut live,
            Particle {
                pos,
                vel: Vec2::new(angle.cos(), angle.sin()) * speed,
                life,
                max_life: life,
                color,
                size,
                active: true,
            },
        );
    }
}

/// Debris cloud for the ship: random directions, long-lived
pub fn spawn_ship_explosion(state: &mut GameState, pos: Vec2) {
    let mut live = live_count(state);

    for i in 0..SHIP_EXPLOSION_PARTICLES {
        let rng = &mut state.rng;
        let offset = Vec2::new(rng.random::<f32>() - 0.5, rng.random::<f32>() - 0.5) * 10.0;
        let angle = rng.random::<f32>() * TAU;
        let speed = 2.0 + rng.random::<f32>() * 6.0;
        let life = 2.0 + rng.random::<f32>();
        let size = 1.5 + rng.random::<f32>() * 3.0;
        // Hot fragments first, then debris
        let color = if i < 8 { Color::WHITE } else { Color::LIGHT_GRAY };

        push_capped(
            state,
            &mut live,
            Particle {
                pos: wrap_position(pos + offset),
                vel: Vec2::new(angle.cos(), angle.sin()) * speed,
                life,
                max_life: life,
                color,
                size,
                active: true,
            },
        );
    }
}

/// Exhaust behind the ship, drifting opposite the heading
pub fn spawn_thrust(state: &mut GameState, pos: Vec2, rotation: f32) {
    let mut live = live_count(state);
    let backward = rotate_point(0.0, 1.0, rotation);

    for i in 0..THRUST_PARTICLES {
        let rng = &mut state.rng;
        let behind = rotate_point(0.0, 15.0 + i as f32 * 5.0, rotation);
        let jitter = Vec2::new(rng.random::<f32>() - 0.5, rng.random::<f32>() - 0.5) * 4.0;
        let push = 1.0 + rng.random::<f32>();
        let spread = Vec2::new(rng.random::<f32>() - 0.5, rng.random::<f32>() - 0.5) * 2.0;
        let life = 0.3 + rng.random::<f32>() * 0.2;
        let size = 1.0 + rng.random::<f32>() * 1.5;
        let color = if i == 0 { Color::WHITE } else { Color::SKY_BLUE };

        push_capped(
            state,
            &mut live,
            Particle {
                pos: wrap_position(pos + behind + jitter),
                vel: backward * push + spread,
                life,
                max_life: life,
                color,
                size,
                active: true,
            },
        );
    }
}

/// Move, slow, age and wrap every live particle
pub fn update(particles: &mut [Particle], dt: f32) {
    for particle in particles.iter_mut().filter(|p| p.active) {
        particle.pos += particle.vel;
        particle.vel *= PARTICLE_DRAG;
        particle.life -= dt;
        if particle.life <= 0.0 {
            particle.active = false;
        }
        particle.pos = wrap_position(particle.pos);
    }
}

/// Drop dead particles
pub fn cleanup(particles: &mut Vec<Particle>) {
    particles.retain(|p| p.active);
}
