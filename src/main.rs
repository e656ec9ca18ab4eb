//! Space Invaders - headless native runner

use std::path::PathBuf;
use std::time::{Duration, Instant};

use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use serde::Serialize;

use space_invaders::audio::{AudioManager, LogBackend};
use space_invaders::consts::{MAX_SUBSTEPS, SCREEN_HEIGHT, SCREEN_TITLE, SCREEN_WIDTH, SIM_DT};
use space_invaders::highscores::{self, HighScores};
use space_invaders::render;
use space_invaders::replay::{Playback, Replay};
use space_invaders::search;
use space_invaders::sim::{GameEvent, GamePhase, GameState};
use space_invaders::Settings;

#[derive(Parser, Debug)]
#[command(name = "space-invaders")]
#[command(author, version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run the game headless until game over or the tick limit
    Play {
        /// Random seed (default: settings, then clock; a replay brings its own)
        #[arg(short, long, conflicts_with = "replay")]
        seed: Option<u64>,

        /// Maximum simulation ticks
        #[arg(short, long, default_value = "36000")]
        ticks: u64,

        /// Let the demo AI play
        #[arg(short, long)]
        autopilot: bool,

        /// Play back a recorded input script
        #[arg(long, conflicts_with = "autopilot")]
        replay: Option<PathBuf>,

        /// Save this run's inputs as a replay
        #[arg(long)]
        record: Option<PathBuf>,

        /// Settings file (JSON)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Print the final frame as ASCII art
        #[arg(long)]
        ascii: bool,

        /// Print a JSON summary instead of text
        #[arg(long)]
        json: bool,

        /// Pace the simulation at wall-clock speed
        #[arg(long)]
        realtime: bool,
    },

    /// Binary search over a sorted list of integers
    Search {
        #[arg(value_enum)]
        mode: SearchMode,

        /// Value to look for
        #[arg(short, long, allow_hyphen_values = true)]
        target: i64,

        /// Sorted input values
        #[arg(allow_hyphen_values = true)]
        values: Vec<i64>,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum SearchMode {
    /// Index of the first value >= target
    FirstNotSmaller,
    /// Index of the first value == target
    FirstOccurrence,
}

/// End-of-run report
#[derive(Debug, Serialize)]
struct Summary {
    seed: u64,
    score: u64,
    wave: u32,
    lives: u8,
    ticks: u64,
    game_over: bool,
    sounds_played: u64,
    high_score_rank: Option<usize>,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    match args.command {
        Commands::Search {
            mode,
            target,
            values,
        } => {
            run_search(mode, target, &values);
            Ok(())
        }
        Commands::Play {
            seed,
            ticks,
            autopilot,
            replay,
            record,
            config,
            ascii,
            json,
            realtime,
        } => {
            let settings = match config {
                Some(path) => Settings::load(&path)?,
                None => Settings::default(),
            };
            let replay = replay.as_deref().map(Replay::load).transpose()?;
            let opts = PlayOptions {
                seed,
                ticks,
                autopilot,
                record,
                ascii,
                json,
                realtime,
            };
            play(&settings, replay.as_ref(), &opts)
        }
    }
}

fn run_search(mode: SearchMode, target: i64, values: &[i64]) {
    if !values.is_sorted() {
        log::warn!("Input is not sorted; the result is unspecified");
    }
    let index = match mode {
        SearchMode::FirstNotSmaller => search::first_not_smaller(values, &target),
        SearchMode::FirstOccurrence => search::find_first_occurrence(values, &target),
    };
    println!("{}", search::as_sentinel(index));
}

struct PlayOptions {
    seed: Option<u64>,
    ticks: u64,
    autopilot: bool,
    record: Option<PathBuf>,
    ascii: bool,
    json: bool,
    realtime: bool,
}

fn play(settings: &Settings, replay: Option<&Replay>, opts: &PlayOptions) -> anyhow::Result<()> {
    let seed = replay
        .map(|r| r.seed)
        .or(opts.seed)
        .or(settings.seed)
        .unwrap_or_else(clock_seed);
    let tuning = replay.map_or_else(|| settings.tuning.clone(), |r| r.tuning.clone());
    let idle_mode = opts.autopilot || replay.is_some_and(|r| r.idle_mode);

    log::info!(
        "{} ({}x{}) starting with seed {}",
        SCREEN_TITLE,
        SCREEN_WIDTH,
        SCREEN_HEIGHT,
        seed
    );

    let state = GameState::with_tuning(seed, tuning.clone());
    let mut playback = Playback::new(state, idle_mode, replay);
    let mut audio = AudioManager::new(LogBackend);
    audio.set_master_volume(settings.master_volume);
    audio.set_sfx_volume(settings.sfx_volume);
    audio.set_muted(settings.muted);
    let mut recording = opts
        .record
        .as_ref()
        .map(|_| Replay::new(seed, tuning, idle_mode));

    let mut clock = FixedStep::new(opts.realtime);

    'run: while playback.ticks_run < opts.ticks && !playback.finished() {
        for _ in 0..clock.due_steps() {
            if playback.ticks_run >= opts.ticks || playback.finished() {
                break 'run;
            }
            let at = playback.ticks_run;
            let step = playback.step();
            if let Some(rec) = recording.as_mut() {
                for &event in &step.inputs {
                    rec.record(at, event);
                }
            }
            audio.handle_events(&step.events);
            log_events(&step.events);
        }
    }

    let state = &playback.state;
    let high_score_rank = record_high_score(settings, state)?;

    if let (Some(path), Some(rec)) = (&opts.record, &recording) {
        rec.save(path)?;
    }

    let summary = Summary {
        seed,
        score: state.score,
        wave: state.wave_index + 1,
        lives: state.lives,
        ticks: playback.ticks_run,
        game_over: state.phase == GamePhase::GameOver,
        sounds_played: audio.played(),
        high_score_rank,
    };

    if opts.ascii {
        println!(
            "{}",
            render::rasterize(&render::draw(state), settings.ascii_cols, settings.ascii_rows)
        );
    }
    if opts.json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        println!(
            "Score: {}  Wave: {}  Lives: {}  Ticks: {}{}",
            summary.score,
            summary.wave,
            summary.lives,
            summary.ticks,
            if summary.game_over { "  (game over)" } else { "" }
        );
        if let Some(rank) = summary.high_score_rank {
            println!("New high score! Rank #{}", rank);
        }
    }
    Ok(())
}

fn log_events(events: &[GameEvent]) {
    for event in events {
        match event {
            GameEvent::PlayerHit { lives_left } => {
                log::info!("Ship hit, {} lives left", lives_left)
            }
            GameEvent::WaveCleared { wave } => log::info!("Wave {} cleared", wave),
            GameEvent::Paused | GameEvent::Resumed | GameEvent::Restarted { .. } => {
                log::info!("{:?}", event)
            }
            _ => log::trace!("{:?}", event),
        }
    }
}

/// Add the run to the leaderboard if one is configured
fn record_high_score(settings: &Settings, state: &GameState) -> anyhow::Result<Option<usize>> {
    let Some(path) = &settings.highscores_path else {
        return Ok(None);
    };
    let mut scores = HighScores::load(path)?;
    let best = scores.top_score();
    let rank = scores.add_score(state.score, state.wave_index + 1, highscores::now_ms());
    if rank.is_some() {
        scores.save(path).context("recording high score")?;
    }
    if let Some(best) = best {
        log::info!("Previous best: {}", best);
    }
    Ok(rank)
}

fn clock_seed() -> u64 {
    highscores::now_ms() as u64
}

/// Fixed timestep pacing: as fast as possible, or tied to the wall clock
struct FixedStep {
    realtime: bool,
    accumulator: f32,
    last: Instant,
}

impl FixedStep {
    fn new(realtime: bool) -> Self {
        Self {
            realtime,
            accumulator: 0.0,
            last: Instant::now(),
        }
    }

    /// How many simulation steps to run now
    fn due_steps(&mut self) -> u32 {
        if !self.realtime {
            return MAX_SUBSTEPS;
        }
        std::thread::sleep(Duration::from_secs_f32(SIM_DT / 2.0));
        let now = Instant::now();
        let dt = now.duration_since(self.last).as_secs_f32().min(0.1);
        self.last = now;
        self.accumulator += dt;

        let mut steps = 0;
        while self.accumulator >= SIM_DT && steps < MAX_SUBSTEPS {
            self.accumulator -= SIM_DT;
            steps += 1;
        }
        steps
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_replay_brings_its_own_seed() {
        let parsed = Args::try_parse_from([
            "space-invaders",
            "play",
            "--replay",
            "run.json",
            "--seed",
            "3",
        ]);
        assert!(parsed.is_err());
        assert!(Args::try_parse_from(["space-invaders", "play", "--seed", "3"]).is_ok());
    }
}
