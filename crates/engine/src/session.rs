//! Session: the single owner of the live game.
//!
//! Holds the current snapshot, the seeded RNG and the time-mode countdown.
//! Every event is applied to the snapshot and the result swapped in whole;
//! after each swap the countdown is re-synchronized with the new state.

use std::time::Duration;

use log::{debug, info, trace};

use crate::core::{GameState, SimpleRng};
use crate::countdown::Countdown;
use crate::types::{GameAction, LastEvent, TICK_INTERVAL_MS};

pub struct Session {
    state: GameState,
    rng: SimpleRng,
    seed: u32,
    countdown: Countdown,
}

impl Session {
    /// Create a session on the menu screen
    pub fn new(seed: u32) -> Self {
        Self::with_state(seed, GameState::new())
    }

    /// Create a session resuming from a prepared state
    pub fn with_state(seed: u32, state: GameState) -> Self {
        let mut countdown = Countdown::new(Duration::from_millis(TICK_INTERVAL_MS as u64));
        if state.countdown_active() {
            countdown.arm();
        }
        Self {
            state,
            rng: SimpleRng::new(seed),
            seed,
            countdown,
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn seed(&self) -> u32 {
        self.seed
    }

    pub fn countdown(&self) -> &Countdown {
        &self.countdown
    }

    /// Apply one event and return the new snapshot
    pub fn dispatch(&mut self, action: GameAction) -> &GameState {
        let next = self.state.apply(action, &mut self.rng);
        let fresh_game = matches!(action, GameAction::StartGame { .. } | GameAction::Restart);
        self.replace(next, fresh_game);
        &self.state
    }

    /// Feed elapsed wall-clock time to the countdown and run any due ticks.
    ///
    /// Ticks are applied one at a time; if a tick ends the game the remaining
    /// time is dropped with the cancelled countdown. Returns the number of ticks run.
    pub fn advance(&mut self, elapsed: Duration) -> u32 {
        self.countdown.advance(elapsed);

        let mut ticks = 0;
        while self.countdown.fire() {
            let next = self.state.tick(&mut self.rng);
            self.replace(next, false);
            ticks += 1;
        }
        ticks
    }

    /// How long the host may wait before the next tick is due
    pub fn time_until_tick(&self) -> Option<Duration> {
        self.countdown.until_next()
    }

    /// Tear down the session's timer
    pub fn shutdown(&mut self) {
        if self.countdown.is_armed() {
            self.countdown.cancel();
            debug!("countdown cancelled on shutdown");
        }
    }

    fn replace(&mut self, next: GameState, fresh_game: bool) {
        let was_active = self.state.countdown_active();
        let now_active = next.countdown_active();

        if next != self.state {
            log_transition(&next);
        }
        debug_assert!(next.validate().is_ok(), "{:?}", next.validate());
        self.state = next;

        if !now_active {
            if self.countdown.is_armed() {
                self.countdown.cancel();
                debug!("countdown cancelled");
            }
        } else if !was_active || fresh_game {
            self.countdown.arm();
            debug!("countdown armed");
        }
    }
}

fn log_transition(state: &GameState) {
    let Some(event) = state.last_event() else {
        return;
    };
    match event {
        LastEvent::Started { mode } => info!(
            "episode {} started: mode={} target={}",
            state.episode_id(),
            mode.as_str(),
            state.target_sum()
        ),
        LastEvent::Selected { id } | LastEvent::Deselected { id } => debug!(
            "selection {:?} -> {:?} sum={}/{}",
            id,
            state.selected_ids(),
            state.current_sum(),
            state.target_sum()
        ),
        LastEvent::Bust { sum } => debug!("bust: {} > {}", sum, state.target_sum()),
        LastEvent::Matched { removed, points } => info!(
            "match: removed={} points={} score={} next_target={}",
            removed,
            points,
            state.score(),
            state.target_sum()
        ),
        LastEvent::TimerTick { time_left } => trace!("tick: time_left={}", time_left),
        LastEvent::RowSpawned => debug!("row spawned: blocks={}", state.blocks().len()),
        LastEvent::GameOver => info!(
            "episode {} over: score={}",
            state.episode_id(),
            state.score()
        ),
        LastEvent::ReturnedToMenu => info!("returned to menu"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Block;
    use crate::types::{BlockId, GameMode, GameStatus, GRID_ROWS, TIME_MODE_LIMIT};

    const SEC: Duration = Duration::from_secs(1);

    #[test]
    fn menu_session_has_no_countdown() {
        let s = Session::new(1);
        assert_eq!(s.state().status(), GameStatus::Menu);
        assert!(!s.countdown().is_armed());
        assert_eq!(s.time_until_tick(), None);
    }

    #[test]
    fn classic_game_never_arms_the_countdown() {
        let mut s = Session::new(1);
        s.dispatch(GameAction::StartGame {
            mode: GameMode::Classic,
        });
        assert!(!s.countdown().is_armed());
        assert_eq!(s.advance(SEC * 30), 0);
    }

    #[test]
    fn time_game_ticks_once_per_second() {
        let mut s = Session::new(1);
        s.dispatch(GameAction::StartGame {
            mode: GameMode::Time,
        });
        assert!(s.countdown().is_armed());

        assert_eq!(s.advance(Duration::from_millis(500)), 0);
        assert_eq!(s.advance(Duration::from_millis(500)), 1);
        assert_eq!(s.state().time_left(), TIME_MODE_LIMIT - 1);

        assert_eq!(s.advance(SEC * 3), 3);
        assert_eq!(s.state().time_left(), TIME_MODE_LIMIT - 4);
    }

    #[test]
    fn menu_cancels_the_countdown() {
        let mut s = Session::new(1);
        s.dispatch(GameAction::StartGame {
            mode: GameMode::Time,
        });
        s.advance(Duration::from_millis(700));
        s.dispatch(GameAction::ReturnToMenu);

        assert!(!s.countdown().is_armed());
        assert_eq!(s.advance(SEC * 5), 0);
        assert_eq!(s.state().time_left(), TIME_MODE_LIMIT);
    }

    #[test]
    fn restart_rearms_from_zero() {
        let mut s = Session::new(1);
        s.dispatch(GameAction::StartGame {
            mode: GameMode::Time,
        });
        s.advance(Duration::from_millis(900));
        s.dispatch(GameAction::Restart);

        assert_eq!(s.time_until_tick(), Some(SEC));
        assert_eq!(s.advance(Duration::from_millis(900)), 0);
    }

    #[test]
    fn switching_to_classic_cancels_the_countdown() {
        let mut s = Session::new(1);
        s.dispatch(GameAction::StartGame {
            mode: GameMode::Time,
        });
        s.dispatch(GameAction::StartGame {
            mode: GameMode::Classic,
        });
        assert!(!s.countdown().is_armed());
    }

    #[test]
    fn game_over_cancels_and_drops_pending_ticks() {
        // Column 0 stacked up to the top row, countdown expired.
        let column: Vec<Block> = (0..GRID_ROWS)
            .map(|row| Block::new(BlockId(row as u32 + 1), 5, row, 0))
            .collect();

        let state = GameState::from_board(GameMode::Time, column, 30).with_time_left(0);
        let mut s = Session::with_state(1, state);
        assert!(s.countdown().is_armed());

        assert_eq!(s.advance(SEC * 5), 1);
        assert_eq!(s.state().status(), GameStatus::GameOver);
        assert!(!s.countdown().is_armed());
    }

    #[test]
    fn shutdown_cancels() {
        let mut s = Session::new(1);
        s.dispatch(GameAction::StartGame {
            mode: GameMode::Time,
        });
        s.shutdown();
        assert!(!s.countdown().is_armed());
    }

    #[test]
    fn same_seed_same_game() {
        let mut a = Session::new(77);
        let mut b = Session::new(77);
        let start = GameAction::StartGame {
            mode: GameMode::Classic,
        };
        assert_eq!(a.dispatch(start), b.dispatch(start));
    }
}
