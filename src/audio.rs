//! Audio cues
//!
//! The simulation never plays sound itself. The frame driver maps drained
//! `GameEvent`s to `SoundEffect`s and hands them to whatever backend the
//! platform provides. Without a backend every call is a no-op.

use crate::sim::{AsteroidSize, GameEvent};

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// Bullet fired
    Shoot,
    /// Engine loop starts
    ThrustStart,
    /// Engine loop stops
    ThrustStop,
    /// Asteroid destroyed, pitched by size
    Explosion(AsteroidSize),
    /// Ship destroyed
    ShipExplosion,
    /// Last life lost
    GameOver,
}

impl SoundEffect {
    /// Cue for an event, if it has one
    pub fn from_event(event: &GameEvent) -> Option<SoundEffect> {
        match *event {
            GameEvent::Shot => Some(SoundEffect::Shoot),
            GameEvent::ThrustStarted => Some(SoundEffect::ThrustStart),
            GameEvent::ThrustStopped => Some(SoundEffect::ThrustStop),
            GameEvent::AsteroidDestroyed { size, .. } => Some(SoundEffect::Explosion(size)),
            GameEvent::ShipDestroyed { .. } => Some(SoundEffect::ShipExplosion),
            GameEvent::GameOver { .. } => Some(SoundEffect::GameOver),
            _ => None,
        }
    }
}

/// Something that can actually make noise
pub trait AudioBackend {
    /// Play `effect` at `volume` in (0, 1]
    fn play(&mut self, effect: SoundEffect, volume: f32);
}

/// Audio manager for the game
pub struct AudioManager {
    backend: Option<Box<dyn AudioBackend>>,
    master_volume: f32,
    sfx_volume: f32,
    muted: bool,
}

impl Default for AudioManager {
    fn default() -> Self {
        Self::disabled()
    }
}

impl AudioManager {
    pub fn new(backend: Box<dyn AudioBackend>) -> Self {
        Self {
            backend: Some(backend),
            ..Self::disabled()
        }
    }

    /// Manager with no output device
    pub fn disabled() -> Self {
        Self {
            backend: None,
            master_volume: 0.8,
            sfx_volume: 1.0,
            muted: false,
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.backend.is_some()
    }

    /// Set master volume (0.0 - 1.0)
    pub fn set_master_volume(&mut self, vol: f32) {
        self.master_volume = vol.clamp(0.0, 1.0);
    }

    /// Set SFX volume (0.0 - 1.0)
    pub fn set_sfx_volume(&mut self, vol: f32) {
        self.sfx_volume = vol.clamp(0.0, 1.0);
    }

    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    pub fn effective_volume(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            self.master_volume * self.sfx_volume
        }
    }

    /// Play a sound effect
    pub fn play(&mut self, effect: SoundEffect) {
        let vol = self.effective_volume();
        if vol <= 0.0 {
            return;
        }
        let Some(backend) = self.backend.as_mut() else {
            return;
        };
        backend.play(effect, vol);
    }

    /// Forward the cue for an event, if any
    pub fn handle_event(&mut self, event: &GameEvent) {
        if let Some(effect) = SoundEffect::from_event(event) {
            self.play(effect);
        }
    }
}
