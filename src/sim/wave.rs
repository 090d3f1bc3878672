//! Wave spawning
//!
//! Wave `n` starts with `3 + n` large asteroids placed away from the
//! centre, each a little faster than the wave before.

use glam::Vec2;
use rand::Rng;

use super::state::{Asteroid, AsteroidSize, GameState};
use crate::consts::*;

/// Asteroids spawned at the start of `wave`
pub fn asteroid_count_for_wave(wave: u32) -> u32 {
    WAVE_BASE_ASTEROIDS + wave
}

/// Velocity multiplier for `wave`
pub fn speed_multiplier_for_wave(wave: u32) -> f32 {
    1.0 + wave.saturating_sub(1) as f32 * WAVE_SPEED_STEP
}

/// Random spawn point outside the safe box around the centre
fn spawn_position(rng: &mut impl Rng) -> Vec2 {
    let center = crate::playfield_center();
    loop {
        let pos = Vec2::new(
            rng.random_range(0..=GAME_WIDTH as u32) as f32,
            rng.random_range(0..=GAME_HEIGHT as u32) as f32,
        );
        let d = (pos - center).abs();
        if d.x >= SPAWN_SAFE_HALF_EXTENT || d.y >= SPAWN_SAFE_HALF_EXTENT {
            return crate::wrap_position(pos);
        }
    }
}

/// Replace the field with a fresh wave of large asteroids.
///
/// Leftover bullets are cleared too so the new wave starts clean.
pub fn spawn_wave(state: &mut GameState) {
    state.asteroids.clear();
    state.bullets.clear();

    let count = asteroid_count_for_wave(state.wave);
    let speed = speed_multiplier_for_wave(state.wave);

    for _ in 0..count {
        let rng = &mut state.rng;
        let pos = spawn_position(rng);
        let vel = Vec2::new(
            rng.random_range(-2..=2) as f32,
            rng.random_range(-2..=2) as f32,
        ) * speed;
        state.asteroids.push(Asteroid::new(pos, vel, AsteroidSize::Large));
    }

    log::debug!("Wave {} spawned {} asteroids (speed x{:.1})", state.wave, count, speed);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wave_counts() {
        assert_eq!(asteroid_count_for_wave(1), 4);
        assert_eq!(asteroid_count_for_wave(5), 8);
    }

    #[test]
    fn test_speed_scales_with_wave() {
        assert_eq!(speed_multiplier_for_wave(1), 1.0);
        assert!((speed_multiplier_for_wave(3) - 1.4).abs() < 1e-6);
    }

    #[test]
    fn test_spawn_avoids_centre() {
        for seed in 0..20 {
            let mut state = GameState::new(seed);
            state.wave = 3;
            spawn_wave(&mut state);
            assert_eq!(state.asteroids.len(), 6);
            let center = crate::playfield_center();
            for a in &state.asteroids {
                assert_eq!(a.size, AsteroidSize::Large);
                assert!(a.active);
                let d = (a.pos - center).abs();
                assert!(d.x >= SPAWN_SAFE_HALF_EXTENT || d.y >= SPAWN_SAFE_HALF_EXTENT);
                assert!(a.pos.x < GAME_WIDTH && a.pos.y < GAME_HEIGHT);
                assert!(a.vel.x.abs() <= 2.0 * 1.4 + 1e-5);
            }
        }
    }

    #[test]
    fn test_spawn_replaces_previous_wave() {
        let mut state = GameState::new(1);
        spawn_wave(&mut state);
        spawn_wave(&mut state);
        assert_eq!(state.asteroids.len(), 4);
    }
}
