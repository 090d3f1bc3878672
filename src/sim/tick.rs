//! Per-frame simulation tick
//!
//! Hosts the game-state machine. `tick` is the only code that changes the
//! phase; subsystems report outcomes and the transition happens here.
//! Timers run on the injected `dt`, movement on whole frames.

use super::collision;
use super::menu::{MenuAction, MenuContext, next_scale};
use super::particles;
use super::physics;
use super::state::{GameEvent, GamePhase, GameState};
use super::wave;
use crate::consts::*;

/// One flag per logical button
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Buttons {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
    pub fire: bool,
    pub pause: bool,
    pub confirm: bool,
    pub cancel: bool,
    pub restart: bool,
    pub menu: bool,
    pub scale: bool,
}

impl Buttons {
    /// Any input that spawns the ship once the cooldown has elapsed
    pub fn any_spawn(&self) -> bool {
        self.fire || self.confirm || self.up || self.down || self.left || self.right
    }
}

/// Input sampled once per frame
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Level-triggered: down this frame
    pub held: Buttons,
    /// Edge-triggered: went down this frame
    pub pressed: Buttons,
}

impl TickInput {
    /// Convenience for a single edge press
    pub fn press(f: impl FnOnce(&mut Buttons)) -> Self {
        let mut pressed = Buttons::default();
        f(&mut pressed);
        Self {
            held: pressed,
            pressed,
        }
    }
}

/// Advance the game by one frame
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) {
    state.frame += 1;
    let pressed = &input.pressed;

    match state.phase {
        GamePhase::Menu => update_menu(state, input, MenuContext::Main),

        GamePhase::NewGameConfirm => {
            if pressed.confirm {
                start_new_game(state);
            } else if pressed.cancel {
                transition(state, GamePhase::Menu);
            }
        }

        GamePhase::HighScores => {
            if pressed.cancel || pressed.confirm || pressed.fire || pressed.menu {
                transition(state, GamePhase::Menu);
            }
        }

        GamePhase::WaveTransition => {
            state.wave_transition_timer -= dt;
            if state.wave_transition_timer <= 0.0 {
                wave::spawn_wave(state);
                state.emit(GameEvent::WaveStarted(state.wave));
                transition(state, GamePhase::WaitingToSpawn);
            }
        }

        GamePhase::WaitingToSpawn => {
            if pressed.cancel {
                state.resume_phase = GamePhase::WaitingToSpawn;
                transition(state, GamePhase::Menu);
            } else {
                if state.input_cooldown_timer > 0.0 {
                    state.input_cooldown_timer -= dt;
                }
                if state.input_cooldown_timer <= 0.0 && pressed.any_spawn() {
                    state.ship.reset();
                    transition(state, GamePhase::Playing);
                }
                // Asteroids keep drifting while the player lines up a spawn
                physics::update_asteroids(&mut state.asteroids);
            }
        }

        GamePhase::Playing => update_playing(state, input),

        GamePhase::Paused => {
            if pressed.pause || pressed.cancel {
                transition(state, GamePhase::Playing);
            } else {
                update_menu(state, input, MenuContext::Pause);
            }
        }

        GamePhase::GameOver => {
            if pressed.restart || pressed.confirm {
                start_new_game(state);
                state.input_cooldown_timer = BASE_COOLDOWN_DURATION;
            } else if pressed.menu || pressed.cancel {
                transition(state, GamePhase::Menu);
            }
        }
    }

    if state.phase != GamePhase::Playing {
        physics::set_thrusting(state, false);
    }

    particles::update(&mut state.particles, dt);
    particles::cleanup(&mut state.particles);
}

/// The single phase writer
fn transition(state: &mut GameState, to: GamePhase) {
    let from = state.phase;
    if from == to {
        return;
    }
    log::debug!("Phase {:?} -> {:?}", from, to);
    state.phase = to;
    if matches!(to, GamePhase::Menu | GamePhase::Paused) {
        // Fresh cursor on every menu entry
        state.menu.invalidate();
    }
    state.emit(GameEvent::PhaseChanged { from, to });
}

/// Reset the session and head for the wave 1 banner
fn start_new_game(state: &mut GameState) {
    log::info!("Starting new game");
    state.reset_session();
    transition(state, GamePhase::WaveTransition);
}

fn cycle_scale(state: &mut GameState) {
    state.display_scale = next_scale(state.display_scale);
    state.menu.refresh_labels(state.display_scale);
    state.emit(GameEvent::ScaleChanged(state.display_scale));
}

fn update_menu(state: &mut GameState, input: &TickInput, context: MenuContext) {
    let active = state.has_active_game();
    state.menu.sync(context, active, state.display_scale);

    if input.pressed.scale {
        cycle_scale(state);
    }
    if let Some(action) = state.menu.navigate(&input.pressed) {
        apply_menu_action(state, action, context);
    }
}

/// Carry out a selected menu action; ineligible actions are ignored
fn apply_menu_action(state: &mut GameState, action: MenuAction, context: MenuContext) {
    match action {
        MenuAction::Resume => match context {
            MenuContext::Pause => transition(state, GamePhase::Playing),
            MenuContext::Main => {
                if state.has_active_game() {
                    let resume = state.resume_phase;
                    transition(state, resume);
                }
            }
        },
        MenuAction::NewGame => {
            if state.has_active_game() {
                transition(state, GamePhase::NewGameConfirm);
            } else {
                start_new_game(state);
            }
        }
        MenuAction::HighScores => transition(state, GamePhase::HighScores),
        MenuAction::Scale => cycle_scale(state),
        MenuAction::Exit => match context {
            MenuContext::Pause => {
                state.resume_phase = GamePhase::Playing;
                transition(state, GamePhase::Menu);
            }
            MenuContext::Main => {
                log::info!("Exit requested");
                state.exit_requested = true;
            }
        },
    }
}

fn update_playing(state: &mut GameState, input: &TickInput) {
    if input.pressed.cancel {
        state.resume_phase = GamePhase::Playing;
        transition(state, GamePhase::Menu);
        return;
    }
    if input.pressed.pause {
        transition(state, GamePhase::Paused);
        return;
    }

    physics::step(state, &input.held, &input.pressed);
    collision::handle_bullet_asteroid(state);

    let ship_destroyed = collision::ship_hit(state).is_some();
    if ship_destroyed {
        destroy_ship(state);
    } else if collision::wave_cleared(state) {
        let cleared = state.wave;
        state.wave += 1;
        state.wave_transition_timer = WAVE_TRANSITION_DURATION;
        log::info!("Wave {} cleared (score {})", cleared, state.score);
        state.emit(GameEvent::WaveCleared(cleared));
        transition(state, GamePhase::WaveTransition);
    }

    collision::cleanup(state);
}

fn destroy_ship(state: &mut GameState) {
    let pos = state.ship.pos;
    state.emit(GameEvent::ShipDestroyed { pos });
    particles::spawn_ship_explosion(state, pos);
    state.lives = state.lives.saturating_sub(1);

    if state.lives > 0 {
        state.input_cooldown_timer = BASE_COOLDOWN_DURATION;
        transition(state, GamePhase::WaitingToSpawn);
        return;
    }

    if state.score > state.high_score {
        log::info!("New high score: {} (was {})", state.score, state.high_score);
        state.high_score = state.score;
        state.emit(GameEvent::NewHighScore(state.score));
    }
    state.emit(GameEvent::GameOver {
        score: state.score,
        wave: state.wave,
    });
    transition(state, GamePhase::GameOver);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::{Asteroid, AsteroidSize, Bullet};
    use glam::Vec2;

    const DT: f32 = 1.0 / 60.0;

    fn idle() -> TickInput {
        TickInput::default()
    }

    /// Session in progress with the ship spawned and the given asteroids
    fn playing_with(asteroids: Vec<Asteroid>) -> GameState {
        let mut state = GameState::new(12345);
        state.reset_session();
        state.asteroids = asteroids;
        state.set_phase_for_test(GamePhase::Playing);
        state
    }

    fn far_asteroid() -> Asteroid {
        Asteroid::new(Vec2::new(50.0, 50.0), Vec2::ZERO, AsteroidSize::Large)
    }

    fn on_ship() -> Asteroid {
        Asteroid::new(crate::playfield_center(), Vec2::ZERO, AsteroidSize::Small)
    }

    #[test]
    fn test_new_game_from_menu_without_game_skips_confirm() {
        let mut state = GameState::new(1);
        tick(&mut state, &idle(), DT);
        assert!(state.menu.items().iter().all(|i| i.action != MenuAction::Resume));
        tick(&mut state, &TickInput::press(|b| b.confirm = true), DT);
        assert_eq!(state.phase(), GamePhase::WaveTransition);
        assert_eq!(state.lives, MAX_LIVES);
        assert_eq!(state.score, 0);
        assert_eq!(state.wave, 1);
    }

    #[test]
    fn test_wave_transition_spawns_then_waits() {
        let mut state = GameState::new(1);
        state.reset_session();
        state.set_phase_for_test(GamePhase::WaveTransition);
        tick(&mut state, &idle(), 1.0);
        assert_eq!(state.phase(), GamePhase::WaveTransition);
        assert!(state.asteroids.is_empty());
        tick(&mut state, &idle(), 1.0);
        assert_eq!(state.phase(), GamePhase::WaitingToSpawn);
        assert_eq!(state.asteroids.len(), 4);
        assert!(state.drain_events().contains(&GameEvent::WaveStarted(1)));
    }

    #[test]
    fn test_spawn_blocked_until_cooldown_elapses() {
        let mut state = GameState::new(1);
        state.reset_session();
        state.input_cooldown_timer = 0.5;
        state.set_phase_for_test(GamePhase::WaitingToSpawn);
        state.ship.pos = Vec2::new(10.0, 10.0);

        let fire = TickInput::press(|b| b.fire = true);
        tick(&mut state, &fire, 0.25);
        assert_eq!(state.phase(), GamePhase::WaitingToSpawn);
        tick(&mut state, &fire, 0.25);
        assert_eq!(state.phase(), GamePhase::Playing);
        assert_eq!(state.ship.pos, crate::playfield_center());
        assert_eq!(state.ship.vel, Vec2::ZERO);
        assert_eq!(state.ship.rotation, 0.0);
    }

    #[test]
    fn test_pause_and_quick_resume() {
        let mut drifting = far_asteroid();
        drifting.vel = Vec2::new(1.0, 0.0);
        let mut state = playing_with(vec![drifting]);
        let pause = TickInput::press(|b| b.pause = true);
        tick(&mut state, &pause, DT);
        assert_eq!(state.phase(), GamePhase::Paused);
        let before = state.asteroids[0].pos;
        tick(&mut state, &idle(), DT);
        assert_eq!(state.asteroids[0].pos, before);
        tick(&mut state, &pause, DT);
        assert_eq!(state.phase(), GamePhase::Playing);
    }

    #[test]
    fn test_pause_menu_main_menu_item_does_not_quit() {
        let mut state = playing_with(vec![far_asteroid()]);
        tick(&mut state, &TickInput::press(|b| b.pause = true), DT);
        tick(&mut state, &TickInput::press(|b| b.down = true), DT);
        tick(&mut state, &TickInput::press(|b| b.confirm = true), DT);
        assert_eq!(state.phase(), GamePhase::Menu);
        assert!(!state.exit_requested);
    }

    #[test]
    fn test_exit_from_main_menu_requests_quit() {
        let mut state = GameState::new(1);
        tick(&mut state, &TickInput::press(|b| b.up = true), DT);
        tick(&mut state, &TickInput::press(|b| b.confirm = true), DT);
        assert!(state.exit_requested);
        assert_eq!(state.phase(), GamePhase::Menu);
    }

    #[test]
    fn test_wave_clear_triggers_once() {
        let mut state = playing_with(vec![]);
        state.asteroids.push(far_asteroid());
        state.asteroids[0].active = false;
        tick(&mut state, &idle(), DT);
        assert_eq!(state.phase(), GamePhase::WaveTransition);
        assert_eq!(state.wave, 2);
        tick(&mut state, &idle(), DT);
        assert_eq!(state.wave, 2);
        let cleared = state
            .drain_events()
            .iter()
            .filter(|e| matches!(e, GameEvent::WaveCleared(_)))
            .count();
        assert_eq!(cleared, 1);
    }

    #[test]
    fn test_ship_death_with_lives_left_waits_to_spawn() {
        let mut state = playing_with(vec![on_ship(), far_asteroid()]);
        state.lives = 3;
        tick(&mut state, &idle(), DT);
        assert_eq!(state.phase(), GamePhase::WaitingToSpawn);
        assert_eq!(state.lives, 2);
        assert_eq!(state.input_cooldown_timer, BASE_COOLDOWN_DURATION);
        let events = state.drain_events();
        assert_eq!(
            events
                .iter()
                .filter(|e| matches!(e, GameEvent::ShipDestroyed { .. }))
                .count(),
            1
        );
    }

    #[test]
    fn test_two_asteroids_on_ship_cost_one_life() {
        let mut state = playing_with(vec![on_ship(), on_ship(), far_asteroid()]);
        state.lives = 3;
        tick(&mut state, &idle(), DT);
        assert_eq!(state.lives, 2);
        assert_eq!(state.phase(), GamePhase::WaitingToSpawn);
        let deaths = state
            .drain_events()
            .iter()
            .filter(|e| matches!(e, GameEvent::ShipDestroyed { .. }))
            .count();
        assert_eq!(deaths, 1);
    }

    #[test]
    fn test_bullet_leaving_field_is_gone_same_frame() {
        let mut state = playing_with(vec![far_asteroid()]);
        state
            .bullets
            .push(Bullet::new(Vec2::new(400.0, 3.0), Vec2::new(0.0, -8.0)));
        tick(&mut state, &idle(), DT);
        assert_eq!(state.phase(), GamePhase::Playing);
        assert!(state.bullets.is_empty());
    }

    #[test]
    fn test_last_life_game_over_records_high_score() {
        let mut state = playing_with(vec![on_ship()]);
        state.lives = 1;
        state.score = 500;
        state.high_score = 300;
        tick(&mut state, &idle(), DT);
        assert_eq!(state.phase(), GamePhase::GameOver);
        assert_eq!(state.lives, 0);
        assert_eq!(state.high_score, 500);
        assert!(state.drain_events().contains(&GameEvent::NewHighScore(500)));
    }

    #[test]
    fn test_game_over_below_high_score_keeps_it() {
        let mut state = playing_with(vec![on_ship()]);
        state.lives = 1;
        state.score = 100;
        state.high_score = 300;
        tick(&mut state, &idle(), DT);
        assert_eq!(state.phase(), GamePhase::GameOver);
        assert_eq!(state.high_score, 300);
        assert!(
            !state
                .drain_events()
                .iter()
                .any(|e| matches!(e, GameEvent::NewHighScore(_)))
        );
    }

    #[test]
    fn test_game_over_restart_and_menu() {
        let mut state = playing_with(vec![]);
        state.lives = 0;
        state.score = 80;
        state.set_phase_for_test(GamePhase::GameOver);
        tick(&mut state, &TickInput::press(|b| b.restart = true), DT);
        assert_eq!(state.phase(), GamePhase::WaveTransition);
        assert_eq!(state.score, 0);
        assert_eq!(state.lives, MAX_LIVES);
        assert_eq!(state.input_cooldown_timer, BASE_COOLDOWN_DURATION);

        state.set_phase_for_test(GamePhase::GameOver);
        tick(&mut state, &TickInput::press(|b| b.menu = true), DT);
        assert_eq!(state.phase(), GamePhase::Menu);
    }

    #[test]
    fn test_confirm_dialog_cancel_leaves_session_alone() {
        let mut state = playing_with(vec![far_asteroid()]);
        state.score = 240;
        state.wave = 3;
        state.lives = 2;
        tick(&mut state, &TickInput::press(|b| b.cancel = true), DT);
        assert_eq!(state.phase(), GamePhase::Menu);
        // Resume Game, New Game, ...
        tick(&mut state, &TickInput::press(|b| b.down = true), DT);
        tick(&mut state, &TickInput::press(|b| b.confirm = true), DT);
        assert_eq!(state.phase(), GamePhase::NewGameConfirm);
        tick(&mut state, &TickInput::press(|b| b.cancel = true), DT);
        assert_eq!(state.phase(), GamePhase::Menu);
        assert_eq!((state.score, state.wave, state.lives), (240, 3, 2));
    }

    #[test]
    fn test_resume_returns_to_waiting_when_left_from_waiting() {
        let mut state = playing_with(vec![far_asteroid()]);
        state.set_phase_for_test(GamePhase::WaitingToSpawn);
        tick(&mut state, &TickInput::press(|b| b.cancel = true), DT);
        assert_eq!(state.phase(), GamePhase::Menu);
        tick(&mut state, &TickInput::press(|b| b.confirm = true), DT);
        assert_eq!(state.phase(), GamePhase::WaitingToSpawn);
    }

    #[test]
    fn test_high_scores_detour() {
        let mut state = GameState::new(1);
        tick(&mut state, &TickInput::press(|b| b.down = true), DT);
        tick(&mut state, &TickInput::press(|b| b.fire = true), DT);
        assert_eq!(state.phase(), GamePhase::HighScores);
        tick(&mut state, &idle(), DT);
        assert_eq!(state.phase(), GamePhase::HighScores);
        tick(&mut state, &TickInput::press(|b| b.cancel = true), DT);
        assert_eq!(state.phase(), GamePhase::Menu);
    }

    #[test]
    fn test_scale_item_cycles_and_relabels() {
        let mut state = GameState::new(1);
        state.display_scale = 4;
        tick(&mut state, &TickInput::press(|b| b.down = true), DT);
        tick(&mut state, &TickInput::press(|b| b.down = true), DT);
        tick(&mut state, &TickInput::press(|b| b.confirm = true), DT);
        assert_eq!(state.display_scale, 1);
        assert_eq!(state.menu.selected(), 2);
        assert_eq!(state.menu.items()[2].label, "Scale: 1x");
        assert!(state.drain_events().contains(&GameEvent::ScaleChanged(1)));
    }

    #[test]
    fn test_thrust_stops_when_leaving_play() {
        let mut state = playing_with(vec![far_asteroid()]);
        let thrust = TickInput {
            held: Buttons {
                up: true,
                ..Default::default()
            },
            pressed: Buttons::default(),
        };
        tick(&mut state, &thrust, DT);
        assert!(state.ship.thrusting);
        tick(&mut state, &TickInput::press(|b| b.pause = true), DT);
        assert!(!state.ship.thrusting);
        let events = state.drain_events();
        assert!(events.contains(&GameEvent::ThrustStarted));
        assert!(events.contains(&GameEvent::ThrustStopped));
    }

    #[test]
    fn test_particles_age_in_every_phase() {
        let mut state = GameState::new(1);
        let pos = Vec2::new(10.0, 10.0);
        crate::sim::particles::spawn_explosion(&mut state, pos, AsteroidSize::Small);
        tick(&mut state, &idle(), 2.0);
        assert!(state.particles.is_empty());
    }
}
