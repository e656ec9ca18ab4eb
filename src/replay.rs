//! Recorded input scripts
//!
//! A replay is the run seed, the tuning, and every input event stamped with
//! the tick it arrived before. Because the simulation is deterministic,
//! feeding the same script back reproduces the run exactly.

use std::fs;
use std::path::Path;

use anyhow::Context;
use serde::{Deserialize, Serialize};

use crate::consts::SIM_DT;
use crate::input::{InputEvent, InputState};
use crate::sim::{GameEvent, GamePhase, GameState, tick};
use crate::tuning::Tuning;

/// An input event and the tick it applies to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimedEvent {
    pub tick: u64,
    pub event: InputEvent,
}

/// A complete input script
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Replay {
    pub seed: u64,
    #[serde(default)]
    pub tuning: Tuning,
    #[serde(default)]
    pub idle_mode: bool,
    /// Sorted by tick
    pub events: Vec<TimedEvent>,
}

/// Final state of a replayed run plus everything it emitted
#[derive(Debug)]
pub struct ReplayOutcome {
    pub state: GameState,
    pub events: Vec<GameEvent>,
    pub ticks_run: u64,
}

impl Replay {
    pub fn new(seed: u64, tuning: Tuning, idle_mode: bool) -> Self {
        Self {
            seed,
            tuning,
            idle_mode,
            events: Vec::new(),
        }
    }

    /// Append an event; ticks must not go backwards
    pub fn record(&mut self, tick: u64, event: InputEvent) {
        debug_assert!(self.events.last().is_none_or(|last| last.tick <= tick));
        self.events.push(TimedEvent { tick, event });
    }

    /// Events scheduled for `tick`
    pub fn events_at(&self, tick: u64) -> impl Iterator<Item = InputEvent> + '_ {
        let start = self.events.partition_point(|e| e.tick < tick);
        self.events[start..]
            .iter()
            .take_while(move |e| e.tick == tick)
            .map(|e| e.event)
    }

    /// Tick of the last scripted event
    pub fn last_tick(&self) -> Option<u64> {
        self.events.last().map(|e| e.tick)
    }

    /// True if any scripted event is due at or after `tick`
    pub fn has_events_from(&self, tick: u64) -> bool {
        self.last_tick().is_some_and(|last| last >= tick)
    }

    /// Play the script from a fresh state for at most `max_ticks`
    ///
    /// Stops early once the run is over and the script has nothing left.
    pub fn run(&self, max_ticks: u64) -> ReplayOutcome {
        let state = GameState::with_tuning(self.seed, self.tuning.clone());
        let mut playback = Playback::new(state, self.idle_mode, Some(self));
        let mut events = Vec::new();

        while playback.ticks_run < max_ticks && !playback.finished() {
            events.extend(playback.step().events);
        }

        ReplayOutcome {
            state: playback.state,
            events,
            ticks_run: playback.ticks_run,
        }
    }

    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let json = fs::read_to_string(path)
            .with_context(|| format!("reading replay {}", path.display()))?;
        let mut replay: Replay = serde_json::from_str(&json)
            .with_context(|| format!("parsing replay {}", path.display()))?;
        replay.events.sort_by_key(|e| e.tick);
        log::info!(
            "Loaded replay {} ({} events, seed {})",
            path.display(),
            replay.events.len(),
            replay.seed
        );
        Ok(replay)
    }

    pub fn save(&self, path: &Path) -> anyhow::Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json).with_context(|| format!("writing replay {}", path.display()))?;
        log::info!("Replay saved to {}", path.display());
        Ok(())
    }
}

/// What one playback step fed in and what came out
#[derive(Debug, Default)]
pub struct Step {
    /// Scripted inputs applied before the tick
    pub inputs: Vec<InputEvent>,
    pub events: Vec<GameEvent>,
}

/// Drives a run tick by tick, optionally feeding a script
///
/// The one loop behind both [`Replay::run`] and the native runner, so a
/// script plays out the same wherever it is replayed.
#[derive(Debug)]
pub struct Playback<'a> {
    pub state: GameState,
    pub input: InputState,
    pub ticks_run: u64,
    script: Option<&'a Replay>,
}

impl<'a> Playback<'a> {
    pub fn new(state: GameState, idle_mode: bool, script: Option<&'a Replay>) -> Self {
        Self {
            state,
            input: InputState::new(idle_mode),
            ticks_run: 0,
            script,
        }
    }

    /// The run is over and no scripted input (e.g. a restart click) is left
    pub fn finished(&self) -> bool {
        self.state.phase == GamePhase::GameOver
            && self
                .script
                .is_none_or(|r| !r.has_events_from(self.ticks_run))
    }

    /// Apply this tick's scripted inputs and advance one fixed timestep
    pub fn step(&mut self) -> Step {
        let inputs: Vec<InputEvent> = self
            .script
            .map(|r| r.events_at(self.ticks_run).collect())
            .unwrap_or_default();
        for &event in &inputs {
            self.input.handle(event);
        }
        let events = tick(&mut self.state, &self.input.take_tick_input(), SIM_DT);
        self.ticks_run += 1;
        Step { inputs, events }
    }
}
