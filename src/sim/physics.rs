//! Ship handling and entity integration
//!
//! Velocities are pixels per frame. Order within a frame matters because
//! collision runs on the final positions: ship input, ship integrate,
//! bullets, asteroids.

use super::particles;
use super::state::{Asteroid, Bullet, GameEvent, GameState};
use super::tick::Buttons;
use crate::consts::*;
use crate::{in_bounds, normalize_degrees, rotate_point, wrap_position};

/// Rotation, thrust, brake and fire for one frame
pub fn handle_ship_input(state: &mut GameState, held: &Buttons, pressed: &Buttons) {
    if held.left {
        state.ship.rotation = normalize_degrees(state.ship.rotation - SHIP_TURN_DEGREES);
    }
    if held.right {
        state.ship.rotation = normalize_degrees(state.ship.rotation + SHIP_TURN_DEGREES);
    }

    if held.up {
        let thrust = state.ship.forward(SHIP_THRUST);
        state.ship.vel += thrust;
        let (pos, rotation) = (state.ship.pos, state.ship.rotation);
        particles::spawn_thrust(state, pos, rotation);
    }
    set_thrusting(state, held.up);

    if held.down {
        apply_reverse(&mut state.ship.vel, state.ship.rotation);
    }

    if pressed.fire {
        fire_bullet(state);
    }
}

/// Brake toward zero, then always add a reverse impulse.
///
/// The two terms can balance at a non-zero reverse speed instead of a stop.
pub fn apply_reverse(vel: &mut glam::Vec2, rotation: f32) {
    let speed = vel.length();
    if speed > SHIP_BRAKE_MIN_SPEED {
        *vel -= *vel / speed * SHIP_BRAKE_FORCE;
    }
    *vel += rotate_point(0.0, SHIP_REVERSE_THRUST, rotation) * SHIP_REVERSE_SCALE;
}

/// Track the thrust loop edge and emit start/stop cues
pub fn set_thrusting(state: &mut GameState, thrusting: bool) {
    if thrusting == state.ship.thrusting {
        return;
    }
    state.ship.thrusting = thrusting;
    state.emit(if thrusting {
        GameEvent::ThrustStarted
    } else {
        GameEvent::ThrustStopped
    });
}

/// Spawn a bullet at the ship, inheriting its velocity
pub fn fire_bullet(state: &mut GameState) {
    let vel = state.ship.vel + state.ship.forward(BULLET_SPEED);
    state.bullets.push(Bullet::new(state.ship.pos, vel));
    state.emit(GameEvent::Shot);
}

/// Drag, speed clamp, integrate, wrap
pub fn update_ship(state: &mut GameState) {
    let ship = &mut state.ship;
    ship.vel *= SHIP_DRAG;
    ship.vel = ship.vel.clamp_length_max(SHIP_MAX_SPEED);
    ship.pos = wrap_position(ship.pos + ship.vel);
}

/// Integrate bullets; any that leave the field die this frame
pub fn update_bullets(bullets: &mut [Bullet]) {
    for bullet in bullets.iter_mut().filter(|b| b.active) {
        bullet.pos += bullet.vel;
        if !in_bounds(bullet.pos) {
            bullet.active = false;
        }
    }
}

/// Integrate and wrap asteroids; no speed decay
pub fn update_asteroids(asteroids: &mut [Asteroid]) {
    for asteroid in asteroids.iter_mut().filter(|a| a.active) {
        asteroid.pos = wrap_position(asteroid.pos + asteroid.vel);
    }
}

/// Full physics step for the playing phase
pub fn step(state: &mut GameState, held: &Buttons, pressed: &Buttons) {
    handle_ship_input(state, held, pressed);
    update_ship(state);
    update_bullets(&mut state.bullets);
    update_asteroids(&mut state.asteroids);
}
