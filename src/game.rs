//! Frame driver
//!
//! Owns the simulation and its collaborators. Each frame runs one `tick`,
//! then drains the side-effect requests it produced and routes them to
//! audio and the high-score store.

use rand::random;

use crate::audio::AudioManager;
use crate::highscores::HighScoreStore;
use crate::settings::Settings;
use crate::sim::{GameEvent, GameState, TickInput, tick};

pub struct Game {
    state: GameState,
    audio: AudioManager,
    store: Box<dyn HighScoreStore>,
}

impl Game {
    /// Build a session in the top-level menu with the stored high score
    pub fn new(
        settings: &Settings,
        mut audio: AudioManager,
        store: Box<dyn HighScoreStore>,
    ) -> Self {
        let settings = settings.clone().sanitized();
        let seed = settings.seed.unwrap_or_else(random);
        log::info!("Starting with seed {}", seed);

        let mut state = GameState::new(seed);
        state.high_score = store.load();
        state.display_scale = settings.display_scale;
        state.max_particles = settings.max_particles();

        audio.set_master_volume(settings.master_volume);
        audio.set_sfx_volume(settings.sfx_volume);
        audio.set_muted(settings.muted);
        if !audio.is_enabled() {
            log::warn!("No audio backend, running silent");
        }

        Self {
            state,
            audio,
            store,
        }
    }

    /// Advance one frame and return the events it produced
    pub fn frame(&mut self, input: &TickInput, dt: f32) -> Vec<GameEvent> {
        tick(&mut self.state, input, dt);
        let events = self.state.drain_events();
        for event in &events {
            self.audio.handle_event(event);
            match *event {
                GameEvent::NewHighScore(score) => self.store.save(score),
                GameEvent::GameOver { score, wave } => {
                    log::info!("Game over: score {} on wave {}", score, wave)
                }
                GameEvent::WaveStarted(wave) => log::info!("Wave {}", wave),
                GameEvent::ScaleChanged(scale) => log::debug!("Display scale {}x", scale),
                _ => {}
            }
        }
        events
    }

    /// Exit was chosen from the top-level menu
    pub fn should_quit(&self) -> bool {
        self.state.exit_requested
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Direct access for scripted scenarios
    pub fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }

    pub fn display_scale(&self) -> u8 {
        self.state.display_scale
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::highscores::MemoryHighScoreStore;
    use crate::sim::GamePhase;

    fn seeded() -> Settings {
        Settings {
            seed: Some(7),
            ..Settings::default()
        }
    }

    #[test]
    fn test_new_game_loads_high_score() {
        let store = MemoryHighScoreStore::with_score(450);
        let game = Game::new(&seeded(), AudioManager::disabled(), Box::new(store));
        assert_eq!(game.state().high_score, 450);
        assert_eq!(game.state().phase(), GamePhase::Menu);
        assert_eq!(game.state().seed, 7);
    }

    #[test]
    fn test_settings_applied() {
        let settings = Settings {
            display_scale: 3,
            particles: false,
            ..seeded()
        };
        let game = Game::new(
            &settings,
            AudioManager::disabled(),
            Box::new(MemoryHighScoreStore::default()),
        );
        assert_eq!(game.display_scale(), 3);
        assert_eq!(game.state().max_particles, 0);
    }

    #[test]
    fn test_new_high_score_is_saved() {
        let store = MemoryHighScoreStore::default();
        let mut game = Game::new(&seeded(), AudioManager::disabled(), Box::new(store.clone()));
        game.state_mut().events.push(GameEvent::NewHighScore(900));
        // Events queued before the tick are drained with it
        game.frame(&TickInput::default(), 1.0 / 60.0);
        assert_eq!(store.score(), 900);
        assert_eq!(store.save_count(), 1);
    }
}
