//! Fire-and-forget sound effects
//!
//! The simulation emits [`GameEvent`](crate::sim::GameEvent)s; the shell maps
//! them onto effects here. Playback is best-effort: a missing or failed
//! backend never stops the game, it just logs once and stays silent.

use crate::sim::GameEvent;

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// Background music loop, started once per session
    Music,
    /// Salmon eats a fish
    SalmonEat,
    /// Salmon hits a turtle
    SalmonDead,
}

impl SoundEffect {
    /// Asset name for this effect
    pub fn asset_name(self) -> &'static str {
        match self {
            SoundEffect::Music => "music.wav",
            SoundEffect::SalmonEat => "salmon_eat.wav",
            SoundEffect::SalmonDead => "salmon_dead.wav",
        }
    }
}

/// Audio manager for the game
///
/// Holds volume state and dispatches effects to the backend. The build ships
/// without a sound device dependency, so dispatch logs the playback request;
/// a real backend slots in behind [`AudioManager::play`] without touching the
/// event mapping.
pub struct AudioManager {
    enabled: bool,
    master_volume: f32,
    sfx_volume: f32,
    muted: bool,
}

impl Default for AudioManager {
    fn default() -> Self {
        Self::new()
    }
}

impl AudioManager {
    pub fn new() -> Self {
        Self {
            enabled: true,
            master_volume: 0.8,
            sfx_volume: 1.0,
            muted: false,
        }
    }

    /// Disable the backend entirely (e.g. headless runs)
    pub fn set_enabled(&mut self, enabled: bool) {
        if !enabled {
            log::warn!("audio backend disabled");
        }
        self.enabled = enabled;
    }

    /// Set master volume (0.0 - 1.0)
    pub fn set_master_volume(&mut self, vol: f32) {
        self.master_volume = vol.clamp(0.0, 1.0);
    }

    /// Set SFX volume (0.0 - 1.0)
    pub fn set_sfx_volume(&mut self, vol: f32) {
        self.sfx_volume = vol.clamp(0.0, 1.0);
    }

    /// Mute/unmute all audio
    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    /// Get effective volume
    fn effective_volume(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            self.master_volume * self.sfx_volume
        }
    }

    /// Play a sound effect, fire-and-forget
    pub fn play(&self, effect: SoundEffect) {
        let vol = self.effective_volume();
        if !self.enabled || vol <= 0.0 {
            return;
        }
        log::debug!("play {} at volume {:.2}", effect.asset_name(), vol);
    }

    /// Map a simulation event onto its sound effect, if it has one
    pub fn on_event(&self, event: &GameEvent) {
        match event {
            GameEvent::FishEaten { .. } => self.play(SoundEffect::SalmonEat),
            GameEvent::SalmonDied => self.play(SoundEffect::SalmonDead),
            GameEvent::Restarted => self.play(SoundEffect::Music),
            GameEvent::SpeedChanged { .. } => {}
        }
    }
}
