//! Audio dispatch
//!
//! The simulation only reports [`GameEvent`]s. This module turns them into
//! sound effects and hands those to a [`SoundBackend`], which is whatever
//! actually makes noise on the host.

use crate::sim::{GameEvent, MarchStep};

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SoundEffect {
    /// Player laser fired
    PlayerShoot,
    /// Invader destroyed
    EnemyHit,
    /// Player ship destroyed
    PlayerDeath,
    /// Formation march, first beat
    March1,
    /// Formation march, second beat
    March2,
}

impl SoundEffect {
    /// Resource name of the clip for this effect
    pub fn asset(&self) -> &'static str {
        match self {
            SoundEffect::PlayerShoot => "sounds/laser2.wav",
            SoundEffect::EnemyHit => "sounds/hit2.wav",
            SoundEffect::PlayerDeath => "sounds/explosion2.wav",
            SoundEffect::March1 => "sounds/jump1.wav",
            SoundEffect::March2 => "sounds/jump2.wav",
        }
    }

    /// The effect a game event should trigger, if any
    pub fn for_event(event: &GameEvent) -> Option<Self> {
        match event {
            GameEvent::PlayerFired => Some(SoundEffect::PlayerShoot),
            GameEvent::InvaderDestroyed { .. } => Some(SoundEffect::EnemyHit),
            GameEvent::PlayerHit { .. } => Some(SoundEffect::PlayerDeath),
            GameEvent::MarchStep(MarchStep::First) => Some(SoundEffect::March1),
            GameEvent::MarchStep(MarchStep::Second) => Some(SoundEffect::March2),
            _ => None,
        }
    }
}

/// Whatever plays sounds on the host
pub trait SoundBackend {
    /// Play `effect` at `volume` in [0, 1]
    fn play(&mut self, effect: SoundEffect, volume: f32);
}

/// Backend for headless runs: logs each effect
#[derive(Debug, Default)]
pub struct LogBackend;

impl SoundBackend for LogBackend {
    fn play(&mut self, effect: SoundEffect, volume: f32) {
        log::debug!("sound {:?} ({}) at {:.2}", effect, effect.asset(), volume);
    }
}

/// Backend that remembers what it was asked to play
#[derive(Debug, Default)]
pub struct RecordingBackend {
    pub played: Vec<(SoundEffect, f32)>,
}

impl SoundBackend for RecordingBackend {
    fn play(&mut self, effect: SoundEffect, volume: f32) {
        self.played.push((effect, volume));
    }
}

/// Audio manager for the game
pub struct AudioManager<B: SoundBackend> {
    backend: B,
    master_volume: f32,
    sfx_volume: f32,
    muted: bool,
    played: u64,
}

impl<B: SoundBackend> AudioManager<B> {
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            master_volume: 0.8,
            sfx_volume: 1.0,
            muted: false,
            played: 0,
        }
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

    /// Play a sound effect
    pub fn play(&mut self, effect: SoundEffect) {
        let vol = self.effective_volume();
        if vol <= 0.0 {
            return;
        }
        self.backend.play(effect, vol);
        self.played += 1;
    }

    /// Play the sounds for a tick's worth of events
    pub fn handle_events(&mut self, events: &[GameEvent]) {
        for effect in events.iter().filter_map(SoundEffect::for_event) {
            self.play(effect);
        }
    }

    /// Number of effects sent to the backend
    pub fn played(&self) -> u64 {
        self.played
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_events_map_to_effects() {
        let mut audio = AudioManager::new(RecordingBackend::default());
        audio.handle_events(&[
            GameEvent::PlayerFired,
            GameEvent::ShieldDamaged { blocks: 2 },
            GameEvent::InvaderDestroyed {
                invader_id: 4,
                points: 10,
            },
            GameEvent::MarchStep(MarchStep::Second),
        ]);
        let effects: Vec<SoundEffect> = audio.backend().played.iter().map(|(e, _)| *e).collect();
        assert_eq!(
            effects,
            vec![
                SoundEffect::PlayerShoot,
                SoundEffect::EnemyHit,
                SoundEffect::March2
            ]
        );
        assert_eq!(audio.played(), 3);
    }

    #[test]
    fn test_volume_scaling() {
        let mut audio = AudioManager::new(RecordingBackend::default());
        audio.set_master_volume(0.5);
        audio.set_sfx_volume(2.0);
        audio.play(SoundEffect::PlayerDeath);
        let (_, vol) = audio.backend().played[0];
        assert!((vol - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_muted_plays_nothing() {
        let mut audio = AudioManager::new(RecordingBackend::default());
        audio.set_muted(true);
        audio.handle_events(&[GameEvent::PlayerFired]);
        assert!(audio.backend().played.is_empty());
        assert_eq!(audio.played(), 0);
    }
}
