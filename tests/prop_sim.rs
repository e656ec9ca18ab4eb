//! Property tests for the game simulation.

use proptest::prelude::*;
use space_invaders::consts::{INVADER_POINTS, SCREEN_WIDTH, SIM_DT};
use space_invaders::input::{InputEvent, InputState, Key};
use space_invaders::sim::{Bounds, GameEvent, GamePhase, GameState, tick};

fn input_event() -> impl Strategy<Value = InputEvent> {
    let key = prop_oneof![
        Just(Key::Left),
        Just(Key::Right),
        Just(Key::A),
        Just(Key::D),
        Just(Key::Space),
    ];
    prop_oneof![
        key.clone().prop_map(InputEvent::KeyPress),
        key.prop_map(InputEvent::KeyRelease),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// Random key mashing never breaks the run's bookkeeping.
    #[test]
    fn prop_invariants_hold(
        seed in any::<u64>(),
        script in prop::collection::vec((0u64..600, input_event()), 0..80)
    ) {
        let mut script = script;
        script.sort_by_key(|(t, _)| *t);

        let mut state = GameState::new(seed);
        let mut input = InputState::default();
        let mut kills = 0u64;

        for t in 0..600u64 {
            for (_, event) in script.iter().filter(|(at, _)| *at == t) {
                input.handle(*event);
            }
            for event in tick(&mut state, &input.take_tick_input(), SIM_DT) {
                if let GameEvent::InvaderDestroyed { .. } = event {
                    kills += 1;
                }
            }

            prop_assert!(state.player_bullets.len() <= 1);
            prop_assert!(state.lives <= 3);
            let ship = state.player.bounds();
            prop_assert!(ship.left() >= -1e-3 && ship.right() <= SCREEN_WIDTH + 1e-3);
            prop_assert!(state.shields.windows(2).all(|w| w[0].pos.x <= w[1].pos.x));

            if state.phase == GamePhase::GameOver {
                break;
            }
        }

        prop_assert_eq!(state.score, kills * INVADER_POINTS);
    }

    /// Same seed, same inputs, same run.
    #[test]
    fn prop_seeded_runs_repeat(seed in any::<u64>()) {
        let mut a = GameState::new(seed);
        let mut b = GameState::new(seed);
        let mut input = InputState::new(true);
        for _ in 0..400 {
            let ti = input.take_tick_input();
            prop_assert_eq!(tick(&mut a, &ti, SIM_DT), tick(&mut b, &ti, SIM_DT));
        }
        prop_assert_eq!(a.score, b.score);
        prop_assert_eq!(a.lives, b.lives);
        prop_assert_eq!(a.invaders.len(), b.invaders.len());
    }
}
