//! Circle-circle collision, scoring and asteroid splitting
//!
//! Hits only flip `active` flags and append fragments; nothing is removed
//! until [`cleanup`] runs at the end of the frame.

use glam::Vec2;
use rand::Rng;

use super::particles;
use super::state::{Asteroid, GameEvent, GameState};
use crate::consts::{BULLET_RADIUS, SHIP_RADIUS};

/// Overlap test: centres closer than the sum of radii
#[inline]
pub fn circles_overlap(a: Vec2, ra: f32, b: Vec2, rb: f32) -> bool {
    a.distance(b) < ra + rb
}

/// Two fragments of the next-smaller size at the parent's position
pub fn split_asteroid(parent: &Asteroid, rng: &mut impl Rng) -> Vec<Asteroid> {
    let Some(size) = parent.size.fragment() else {
        return Vec::new();
    };
    (0..2)
        .map(|_| {
            let jitter = Vec2::new(
                rng.random_range(-2..=2) as f32,
                rng.random_range(-2..=2) as f32,
            );
            Asteroid::new(parent.pos, parent.vel + jitter, size)
        })
        .collect()
}

/// Each bullet hits at most one asteroid per frame. Returns hits scored.
pub fn handle_bullet_asteroid(state: &mut GameState) -> usize {
    let mut hits = 0;
    let mut fragments: Vec<Asteroid> = Vec::new();

    for bi in 0..state.bullets.len() {
        if !state.bullets[bi].active {
            continue;
        }
        let bullet_pos = state.bullets[bi].pos;

        let Some(ai) = state.asteroids.iter().position(|a| {
            a.active && circles_overlap(bullet_pos, BULLET_RADIUS, a.pos, a.radius())
        }) else {
            continue;
        };

        state.bullets[bi].active = false;
        state.asteroids[ai].active = false;
        let parent = state.asteroids[ai].clone();

        let points = parent.size.points();
        state.score += points;
        state.emit(GameEvent::AsteroidDestroyed {
            size: parent.size,
            pos: parent.pos,
            points,
        });
        particles::spawn_explosion(state, parent.pos, parent.size);
        fragments.extend(split_asteroid(&parent, &mut state.rng));
        hits += 1;
    }

    if !fragments.is_empty() {
        log::debug!("{} fragments spawned", fragments.len());
    }
    state.asteroids.extend(fragments);
    hits
}

/// First asteroid touching the ship, if any.
///
/// Only reports the hit; lives and phase are the state machine's call.
pub fn ship_hit(state: &GameState) -> Option<usize> {
    state.asteroids.iter().position(|a| {
        a.active && circles_overlap(state.ship.pos, SHIP_RADIUS, a.pos, a.radius())
    })
}

/// True once every asteroid is inactive (or there are none)
pub fn wave_cleared(state: &GameState) -> bool {
    !state.asteroids.iter().any(|a| a.active)
}

/// Drop inactive bullets and asteroids
pub fn cleanup(state: &mut GameState) {
    state.bullets.retain(|b| b.active);
    state.asteroids.retain(|a| a.active);
}
