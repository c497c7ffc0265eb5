//! Random play-throughs that check the state invariants after every step.

use sumstack::core::{GameState, RandomSource, SimpleRng};
use sumstack::types::{GameAction, GameMode, GameStatus, GRID_ROWS};

/// Pick a plausible next action for `state` from `picker`.
fn next_action(state: &GameState, picker: &mut SimpleRng) -> GameAction {
    match state.status() {
        GameStatus::Menu => GameAction::StartGame {
            mode: if picker.next_range(2) == 0 {
                GameMode::Classic
            } else {
                GameMode::Time
            },
        },
        GameStatus::GameOver => {
            if picker.next_range(2) == 0 {
                GameAction::Restart
            } else {
                GameAction::ReturnToMenu
            }
        }
        GameStatus::Playing => match picker.next_range(20) {
            0 => GameAction::ReturnToMenu,
            1..=4 => GameAction::Tick,
            _ => {
                let blocks = state.blocks();
                if blocks.is_empty() {
                    // Nothing to select.
                    return GameAction::Tick;
                }
                let i = picker.next_range(blocks.len() as u32) as usize;
                GameAction::SelectBlock { id: blocks[i].id }
            }
        },
    }
}

fn walk(seed: u32, steps: usize) {
    let mut rng = SimpleRng::new(seed);
    let mut picker = SimpleRng::new(seed.wrapping_mul(31).wrapping_add(7));
    let mut state = GameState::new();

    for step in 0..steps {
        let action = next_action(&state, &mut picker);
        let next = state.apply(action, &mut rng);

        if let Err(e) = next.validate() {
            panic!("seed {seed} step {step} after {action:?}: {e}");
        }

        let selected_sum: u32 = next.selected_blocks().map(|b| b.value as u32).sum();
        assert_eq!(selected_sum, next.current_sum());

        if next.is_playing() {
            assert!(next.board().is_compact(), "seed {seed} step {step}");
            assert!(next.blocks().iter().all(|b| b.row < GRID_ROWS));
            assert!((5..=30).contains(&next.target_sum()) || next.blocks().is_empty());
            assert!(next.current_sum() < next.target_sum());
        }

        assert!(next.score() >= state.score() || action_resets(action));
        state = next;
    }
}

fn action_resets(action: GameAction) -> bool {
    matches!(action, GameAction::StartGame { .. } | GameAction::Restart)
}

#[test]
fn random_walks_keep_invariants() {
    for seed in 1..=40 {
        walk(seed, 400);
    }
}

#[test]
fn long_walk_single_seed() {
    walk(0xDEAD_BEEF, 5_000);
}
