//! Asteroids entry point
//!
//! Window, renderer and audio device belong to the platform layer. This
//! binary drives the core headless: an autopilot plays a few games from
//! the top-level menu, then picks "Exit". The stored high score is shown
//! but the bot's results are kept in memory and never written back.

use asteroids::audio::AudioManager;
use asteroids::normalize_degrees;
use asteroids::sim::{Buttons, GameEvent, GamePhase, GameState, MenuAction, TickInput};
use asteroids::{FileHighScoreStore, Game, HighScoreStore, MemoryHighScoreStore, Settings};

const SIM_DT: f32 = 1.0 / 60.0;
/// Hard stop in case the autopilot never loses
const MAX_FRAMES: u64 = 60 * 60 * 10;
const GAMES_TO_PLAY: u32 = 3;
/// Frames between autopilot shots
const FIRE_INTERVAL: u64 = 8;

/// Scripted player used for attract/headless runs
struct Autopilot {
    games_played: u32,
}

impl Autopilot {
    fn input(&mut self, state: &GameState) -> TickInput {
        match state.phase() {
            GamePhase::Menu => self.menu_input(state),
            GamePhase::NewGameConfirm => TickInput::press(|b| b.confirm = true),
            GamePhase::HighScores => TickInput::press(|b| b.cancel = true),
            GamePhase::WaveTransition => TickInput::default(),
            GamePhase::WaitingToSpawn => {
                if state.input_cooldown_timer > 0.0 {
                    TickInput::default()
                } else {
                    TickInput::press(|b| b.fire = true)
                }
            }
            GamePhase::Playing => Self::aim_and_fire(state),
            GamePhase::Paused => TickInput::press(|b| b.pause = true),
            GamePhase::GameOver => {
                self.games_played += 1;
                if self.games_played < GAMES_TO_PLAY {
                    TickInput::press(|b| b.restart = true)
                } else {
                    TickInput::press(|b| b.menu = true)
                }
            }
        }
    }

    /// Start a game until enough have been played, then walk to "Exit"
    fn menu_input(&self, state: &GameState) -> TickInput {
        let wanted = if self.games_played < GAMES_TO_PLAY {
            MenuAction::NewGame
        } else {
            MenuAction::Exit
        };
        match state.menu.selected_item() {
            Some(item) if item.action == wanted => TickInput::press(|b| b.confirm = true),
            _ => TickInput::press(|b| b.down = true),
        }
    }

    /// Turn toward the nearest asteroid and shoot on a fixed cadence
    fn aim_and_fire(state: &GameState) -> TickInput {
        let ship = &state.ship;
        let mut held = Buttons::default();
        let mut pressed = Buttons::default();

        let nearest = state
            .active_asteroids()
            .min_by(|a, b| {
                a.pos
                    .distance_squared(ship.pos)
                    .total_cmp(&b.pos.distance_squared(ship.pos))
            })
            .map(|a| a.pos);

        if let Some(target) = nearest {
            let to = target - ship.pos;
            let heading = normalize_degrees(to.x.atan2(-to.y).to_degrees());
            let diff = normalize_degrees(heading - ship.rotation);
            if (3.0..180.0).contains(&diff) {
                held.right = true;
            } else if (180.0..357.0).contains(&diff) {
                held.left = true;
            }
        }
        if state.frame % FIRE_INTERVAL == 0 {
            pressed.fire = true;
            held.fire = true;
        }
        TickInput { held, pressed }
    }
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let settings = Settings::load();
    let store = MemoryHighScoreStore::with_score(FileHighScoreStore::new().load());
    let mut game = Game::new(&settings, AudioManager::disabled(), Box::new(store));
    let mut pilot = Autopilot { games_played: 0 };

    let mut best = 0;
    let mut asteroids_destroyed = 0u32;
    while !game.should_quit() && game.state().frame < MAX_FRAMES {
        let input = pilot.input(game.state());
        for event in game.frame(&input, SIM_DT) {
            match event {
                GameEvent::AsteroidDestroyed { .. } => asteroids_destroyed += 1,
                GameEvent::GameOver { score, .. } => best = best.max(score),
                _ => {}
            }
        }
    }

    if !game.should_quit() {
        log::warn!("Autopilot hit the frame limit before exiting");
    }
    log::info!(
        "Played {} game(s) over {} frames: best {}, {} asteroids destroyed, high score {}",
        pilot.games_played,
        game.state().frame,
        best,
        asteroids_destroyed,
        game.state().high_score
    );
}
