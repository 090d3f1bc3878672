//! Game state and core simulation types
//!
//! Everything the frame tick reads or writes lives here. Collaborators
//! (renderer, audio, high-score store) only see this through read-only
//! accessors and the drained event list.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::menu::Menu;
use crate::consts::*;
use crate::{playfield_center, rotate_point};

/// Top-level game phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Top-level menu
    Menu,
    /// "Start new game?" dialog shown when a game is in progress
    NewGameConfirm,
    /// Read-only high score screen
    HighScores,
    /// "WAVE n" banner counting down
    WaveTransition,
    /// Asteroids drifting, waiting for the player to spawn
    WaitingToSpawn,
    /// Active gameplay
    Playing,
    /// Pause menu over a running game
    Paused,
    /// Run ended
    GameOver,
}

/// Asteroid size tier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AsteroidSize {
    Small,
    Medium,
    Large,
}

impl AsteroidSize {
    /// Collision radius
    pub fn radius(self) -> f32 {
        match self {
            AsteroidSize::Small => ASTEROID_RADIUS_SMALL,
            AsteroidSize::Medium => ASTEROID_RADIUS_MEDIUM,
            AsteroidSize::Large => ASTEROID_RADIUS_LARGE,
        }
    }

    /// Points for destroying an asteroid of this size (smaller is worth more)
    pub fn points(self) -> u32 {
        match self {
            AsteroidSize::Small => 100,
            AsteroidSize::Medium => 50,
            AsteroidSize::Large => 20,
        }
    }

    /// Size of the fragments this asteroid splits into, if any
    pub fn fragment(self) -> Option<AsteroidSize> {
        match self {
            AsteroidSize::Small => None,
            AsteroidSize::Medium => Some(AsteroidSize::Small),
            AsteroidSize::Large => Some(AsteroidSize::Medium),
        }
    }
}

/// The player's ship
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ship {
    pub pos: Vec2,
    /// Heading in degrees, 0 = up, clockwise positive
    pub rotation: f32,
    pub vel: Vec2,
    /// Whether the thrust loop cue is currently running
    #[serde(default)]
    pub thrusting: bool,
}

impl Default for Ship {
    fn default() -> Self {
        Self {
            pos: playfield_center(),
            rotation: 0.0,
            vel: Vec2::ZERO,
            thrusting: false,
        }
    }
}

impl Ship {
    /// Put the ship back at the centre, motionless and facing up
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Unit-ish heading vector scaled by `magnitude`
    pub fn forward(&self, magnitude: f32) -> Vec2 {
        rotate_point(0.0, -magnitude, self.rotation)
    }

    /// Tip, left wing, right wing in playfield coordinates
    pub fn triangle(&self) -> [Vec2; 3] {
        [
            self.pos + rotate_point(0.0, -10.0, self.rotation),
            self.pos + rotate_point(-8.0, 8.0, self.rotation),
            self.pos + rotate_point(8.0, 8.0, self.rotation),
        ]
    }
}

/// A bullet. Bullets do not wrap; leaving the field kills them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Bullet {
    pub pos: Vec2,
    pub vel: Vec2,
    pub active: bool,
}

impl Bullet {
    pub fn new(pos: Vec2, vel: Vec2) -> Self {
        Self {
            pos,
            vel,
            active: true,
        }
    }
}

/// An asteroid
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Asteroid {
    pub pos: Vec2,
    pub vel: Vec2,
    pub size: AsteroidSize,
    /// Stored for renderers; gameplay ignores it
    pub rotation: f32,
    pub active: bool,
}

impl Asteroid {
    pub fn new(pos: Vec2, vel: Vec2, size: AsteroidSize) -> Self {
        Self {
            pos,
            vel,
            size,
            rotation: 0.0,
            active: true,
        }
    }

    pub fn radius(&self) -> f32 {
        self.size.radius()
    }
}

/// RGBA colour handed through to the renderer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const WHITE: Color = Color::rgb(255, 255, 255);
    pub const LIGHT_GRAY: Color = Color::rgb(200, 200, 200);
    pub const SKY_BLUE: Color = Color::rgb(102, 191, 255);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }
}

/// A cosmetic particle
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    /// Seconds remaining
    pub life: f32,
    /// Seconds at spawn, for the fade ratio
    pub max_life: f32,
    pub color: Color,
    pub size: f32,
    pub active: bool,
}

impl Particle {
    /// Remaining-life fraction in [0, 1]
    pub fn fade(&self) -> f32 {
        if self.max_life <= 0.0 {
            return 0.0;
        }
        (self.life / self.max_life).clamp(0.0, 1.0)
    }

    /// Alpha scaled by remaining life
    pub fn alpha(&self) -> u8 {
        (self.color.a as f32 * self.fade()) as u8
    }

    /// Drawn radius, shrinking with remaining life
    pub fn draw_radius(&self) -> f32 {
        self.size * self.fade()
    }

    /// Colour with the faded alpha applied
    pub fn faded_color(&self) -> Color {
        Color {
            a: self.alpha(),
            ..self.color
        }
    }
}

/// Side-effect requests produced by a tick, drained by the frame driver
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GameEvent {
    /// A bullet was fired
    Shot,
    /// Thrust began this frame
    ThrustStarted,
    /// Thrust ended (key released or gameplay left)
    ThrustStopped,
    /// A bullet destroyed an asteroid
    AsteroidDestroyed {
        size: AsteroidSize,
        pos: Vec2,
        points: u32,
    },
    /// The ship hit an asteroid
    ShipDestroyed { pos: Vec2 },
    /// Last life lost
    GameOver { score: u32, wave: u32 },
    /// Session score beat the stored best at game over
    NewHighScore(u32),
    /// Every asteroid of the wave is gone; carries the wave just cleared
    WaveCleared(u32),
    /// A wave's asteroids were spawned
    WaveStarted(u32),
    /// Display scale cycled
    ScaleChanged(u8),
    /// The state machine moved between phases
    PhaseChanged { from: GamePhase, to: GamePhase },
}

/// Complete session state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Seed the RNG was created from
    pub seed: u64,
    pub(crate) rng: Pcg32,
    /// Written only by the state machine in `tick`
    pub(super) phase: GamePhase,
    /// Where "Resume Game" from the top-level menu returns to
    pub(super) resume_phase: GamePhase,
    pub score: u32,
    pub lives: u32,
    /// Current wave (1-based)
    pub wave: u32,
    /// Best score seen, loaded from the store at startup
    pub high_score: u32,
    /// Seconds left on the wave banner
    pub wave_transition_timer: f32,
    /// Seconds left before spawn input is accepted
    pub input_cooldown_timer: f32,
    /// Window scale factor, display only (1..=MAX_SCALE)
    pub display_scale: u8,
    pub ship: Ship,
    pub bullets: Vec<Bullet>,
    pub asteroids: Vec<Asteroid>,
    pub particles: Vec<Particle>,
    /// Live particle cap from settings
    pub max_particles: usize,
    pub menu: Menu,
    /// Set by "Exit" from the top-level menu; polled by the frame driver
    pub exit_requested: bool,
    /// Pending side effects for this frame
    pub events: Vec<GameEvent>,
    /// Frames simulated
    pub frame: u64,
}

/// Default live particle cap
pub const MAX_PARTICLES: usize = 500;

impl GameState {
    /// Create a fresh process state: top-level menu, no game in progress
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            phase: GamePhase::Menu,
            resume_phase: GamePhase::Playing,
            score: 0,
            lives: 0,
            wave: 1,
            high_score: 0,
            wave_transition_timer: 0.0,
            input_cooldown_timer: 0.0,
            display_scale: DEFAULT_SCALE,
            ship: Ship::default(),
            bullets: Vec::new(),
            asteroids: Vec::new(),
            particles: Vec::new(),
            max_particles: MAX_PARTICLES,
            menu: Menu::default(),
            exit_requested: false,
            events: Vec::new(),
            frame: 0,
        }
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    /// A game is in progress while lives remain
    pub fn has_active_game(&self) -> bool {
        self.lives > 0
    }

    /// Reset score, lives, wave, ship and entity lists for a new run
    pub fn reset_session(&mut self) {
        self.score = 0;
        self.lives = MAX_LIVES;
        self.wave = 1;
        self.wave_transition_timer = WAVE_TRANSITION_DURATION;
        self.ship.reset();
        self.bullets.clear();
        self.asteroids.clear();
    }

    /// Ship outline for the renderer
    pub fn ship_triangle(&self) -> [Vec2; 3] {
        self.ship.triangle()
    }

    pub fn active_asteroids(&self) -> impl Iterator<Item = &Asteroid> {
        self.asteroids.iter().filter(|a| a.active)
    }

    pub fn active_bullets(&self) -> impl Iterator<Item = &Bullet> {
        self.bullets.iter().filter(|b| b.active)
    }

    pub fn active_particles(&self) -> impl Iterator<Item = &Particle> {
        self.particles.iter().filter(|p| p.active)
    }

    /// Take this frame's side-effect requests
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    pub(crate) fn emit(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Test hook: force a phase without running transition logic
    #[cfg(test)]
    pub(crate) fn set_phase_for_test(&mut self, phase: GamePhase) {
        self.phase = phase;
    }
}
