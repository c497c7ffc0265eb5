//! Game state module - immutable snapshots and the rules that move between them
//!
//! Every transition borrows the current [`GameState`] and returns a brand-new
//! one; nothing is mutated in place from the caller's point of view. This keeps
//! the whole game a pure function of `(state, action, rng)`.

use arrayvec::ArrayVec;
use serde::{Deserialize, Serialize};

use crate::board::{Block, Board};
use crate::rng::RandomSource;
use crate::scoring::match_points;
use crate::target::generate_target;
use crate::types::*;

/// Complete game state
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameState {
    blocks: Board,
    target_sum: u32,
    current_sum: u32,
    /// Selected block ids in selection order.
    selected_ids: ArrayVec<BlockId, MAX_BLOCKS>,
    score: u32,
    status: GameStatus,
    mode: GameMode,
    time_left: u32,
    /// Monotonic episode id (increments on every game start).
    episode_id: u32,
    /// Next id handed to a spawned block; never rewinds within a session.
    next_block_id: u32,
    last_event: Option<LastEvent>,
}

impl GameState {
    /// Create the initial menu state
    pub fn new() -> Self {
        Self {
            blocks: Board::new(),
            target_sum: 0,
            current_sum: 0,
            selected_ids: ArrayVec::new(),
            score: 0,
            status: GameStatus::Menu,
            mode: GameMode::Classic,
            time_left: TIME_MODE_LIMIT,
            episode_id: 0,
            next_block_id: 1,
            last_event: None,
        }
    }

    /// Build a playing state around an explicit board and target.
    ///
    /// Used to set up specific positions (tests, replays, puzzles). Block ids
    /// must be unique; new ids continue after the largest one given.
    pub fn from_board(mode: GameMode, blocks: Vec<Block>, target_sum: u32) -> Self {
        let next_block_id = blocks
            .iter()
            .map(|b| b.id.get())
            .max()
            .map_or(1, |max| max.wrapping_add(1));
        let board = Board::from_blocks(blocks);
        debug_assert!(board.ids_unique(), "duplicate block ids");

        Self {
            blocks: board,
            target_sum,
            status: GameStatus::Playing,
            mode,
            episode_id: 1,
            next_block_id,
            ..Self::new()
        }
    }

    /// Override the countdown (time mode setups)
    pub fn with_time_left(mut self, time_left: u32) -> Self {
        self.time_left = time_left;
        self
    }

    pub fn board(&self) -> &Board {
        &self.blocks
    }

    pub fn blocks(&self) -> &[Block] {
        self.blocks.blocks()
    }

    pub fn target_sum(&self) -> u32 {
        self.target_sum
    }

    pub fn current_sum(&self) -> u32 {
        self.current_sum
    }

    pub fn selected_ids(&self) -> &[BlockId] {
        &self.selected_ids
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn mode(&self) -> GameMode {
        self.mode
    }

    pub fn time_left(&self) -> u32 {
        self.time_left
    }

    pub fn episode_id(&self) -> u32 {
        self.episode_id
    }

    pub fn last_event(&self) -> Option<LastEvent> {
        self.last_event
    }

    pub fn is_playing(&self) -> bool {
        self.status.is_playing()
    }

    pub fn game_over(&self) -> bool {
        self.status == GameStatus::GameOver
    }

    /// Whether the countdown should be running for this state
    pub fn countdown_active(&self) -> bool {
        self.is_playing() && self.mode == GameMode::Time
    }

    pub fn block(&self, id: BlockId) -> Option<&Block> {
        self.blocks.get(id)
    }

    pub fn block_at(&self, row: u8, col: u8) -> Option<&Block> {
        self.blocks.at(row, col)
    }

    pub fn is_selected(&self, id: BlockId) -> bool {
        self.selected_ids.contains(&id)
    }

    /// Selected blocks in selection order
    pub fn selected_blocks(&self) -> impl Iterator<Item = &Block> + '_ {
        self.selected_ids.iter().filter_map(|&id| self.blocks.get(id))
    }

    /// Check the state invariants, naming the first one that fails.
    pub fn validate(&self) -> Result<(), &'static str> {
        if !self.blocks.ids_unique() {
            return Err("block ids are not unique");
        }
        if self.selected_ids.iter().any(|&id| !self.blocks.contains(id)) {
            return Err("selection references a block that is not on the board");
        }
        let selected_sum: u32 = self.selected_blocks().map(|b| b.value as u32).sum();
        if selected_sum != self.current_sum {
            return Err("current sum does not match the selected blocks");
        }
        if self.is_playing() {
            if self.target_sum == 0 {
                return Err("target sum is zero while playing");
            }
            if self.blocks.overflows() {
                return Err("block outside the board while playing");
            }
            if !self.blocks.is_compact() {
                return Err("column has a gap");
            }
        }
        Ok(())
    }

    /// Start a fresh game in `mode`.
    ///
    /// All gameplay fields are discarded. Only the episode counter and the id
    /// counter carry over, so ids stay unique for the whole session.
    pub fn start_game(&self, mode: GameMode, rng: &mut impl RandomSource) -> Self {
        let mut next_block_id = self.next_block_id;
        let mut board = Board::new();
        for row in 0..INITIAL_ROWS {
            board.spawn_row(row, &mut next_block_id, rng);
        }
        let target_sum = generate_target(board.blocks(), rng);

        Self {
            blocks: board,
            target_sum,
            current_sum: 0,
            selected_ids: ArrayVec::new(),
            score: 0,
            status: GameStatus::Playing,
            mode,
            time_left: TIME_MODE_LIMIT,
            episode_id: self.episode_id.wrapping_add(1),
            next_block_id,
            last_event: Some(LastEvent::Started { mode }),
        }
    }

    /// Start a fresh game in the current mode
    pub fn restart(&self, rng: &mut impl RandomSource) -> Self {
        self.start_game(self.mode, rng)
    }

    /// Toggle selection of block `id` and resolve a bust or a match.
    ///
    /// Ignored unless playing; unknown ids leave the state unchanged.
    pub fn select_block(&self, id: BlockId, rng: &mut impl RandomSource) -> Self {
        if !self.is_playing() {
            return self.clone();
        }
        let Some(block) = self.blocks.get(id) else {
            return self.clone();
        };
        let value = block.value as u32;

        let mut next = self.clone();
        if let Some(pos) = next.selected_ids.iter().position(|&s| s == id) {
            next.selected_ids.remove(pos);
            next.current_sum = next.current_sum.saturating_sub(value);
            next.last_event = Some(LastEvent::Deselected { id });
        } else {
            if next.selected_ids.try_push(id).is_err() {
                return self.clone();
            }
            next.current_sum += value;
            next.last_event = Some(LastEvent::Selected { id });
        }

        if next.current_sum == next.target_sum {
            return next.resolve_match(rng);
        }

        if next.current_sum > next.target_sum {
            let sum = next.current_sum;
            next.clear_selection();
            next.last_event = Some(LastEvent::Bust { sum });
        }

        next
    }

    /// Clear the selected blocks, apply gravity, score, then advance the board.
    fn resolve_match(mut self, rng: &mut impl RandomSource) -> Self {
        let removed = self.blocks.remove_ids(&self.selected_ids);
        self.blocks.compact();
        let points = match_points(removed);
        self.score = self.score.saturating_add(points);
        self.clear_selection();
        self.last_event = Some(LastEvent::Matched { removed, points });

        match self.mode {
            GameMode::Classic => {
                self.blocks.shift_rows();
                if self.blocks.overflows() {
                    self.status = GameStatus::GameOver;
                    self.last_event = Some(LastEvent::GameOver);
                    return self;
                }
                self.blocks.spawn_row(0, &mut self.next_block_id, rng);
                self.target_sum = generate_target(self.blocks.blocks(), rng);
            }
            GameMode::Time => {
                self.target_sum = generate_target(self.blocks.blocks(), rng);
            }
        }

        self
    }

    /// One countdown step. Only meaningful while playing in time mode.
    ///
    /// When the countdown is already at zero, a new row is pushed in (or the
    /// game ends if the board cannot take it) and the countdown restarts.
    pub fn tick(&self, rng: &mut impl RandomSource) -> Self {
        if !self.countdown_active() {
            return self.clone();
        }

        let mut next = self.clone();
        if next.time_left > 0 {
            next.time_left -= 1;
            next.last_event = Some(LastEvent::TimerTick {
                time_left: next.time_left,
            });
            return next;
        }

        let mut shifted = next.blocks.clone();
        shifted.shift_rows();
        if shifted.overflows() {
            // The board stays as it was; only the status changes.
            next.status = GameStatus::GameOver;
            next.last_event = Some(LastEvent::GameOver);
            return next;
        }

        next.blocks = shifted;
        next.blocks.spawn_row(0, &mut next.next_block_id, rng);
        next.time_left = TIME_MODE_LIMIT;
        next.clear_selection();
        next.last_event = Some(LastEvent::RowSpawned);
        next
    }

    /// Leave for the menu. Calling it on a menu state changes nothing.
    pub fn return_to_menu(&self) -> Self {
        if self.status == GameStatus::Menu {
            return self.clone();
        }
        let mut next = self.clone();
        next.status = GameStatus::Menu;
        next.last_event = Some(LastEvent::ReturnedToMenu);
        next
    }

    /// Apply a game action
    pub fn apply(&self, action: GameAction, rng: &mut impl RandomSource) -> Self {
        match action {
            GameAction::StartGame { mode } => self.start_game(mode, rng),
            GameAction::Restart => self.restart(rng),
            GameAction::SelectBlock { id } => self.select_block(id, rng),
            GameAction::ReturnToMenu => self.return_to_menu(),
            GameAction::Tick => self.tick(rng),
        }
    }

    fn clear_selection(&mut self) {
        self.selected_ids.clear();
        self.current_sum = 0;
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}

/// Start a fresh game from nothing
pub fn start_game(mode: GameMode, rng: &mut impl RandomSource) -> GameState {
    GameState::new().start_game(mode, rng)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::SimpleRng;

    fn block(id: u32, value: u8, row: u8, col: u8) -> Block {
        Block::new(BlockId(id), value, row, col)
    }

    #[test]
    fn test_new_game_state_is_menu() {
        let state = GameState::new();
        assert_eq!(state.status(), GameStatus::Menu);
        assert!(state.blocks().is_empty());
        assert_eq!(state.score(), 0);
        assert_eq!(state.episode_id(), 0);
        assert!(state.last_event().is_none());
    }

    #[test]
    fn test_start_game_fills_initial_rows() {
        let mut rng = SimpleRng::new(12345);
        let state = start_game(GameMode::Classic, &mut rng);

        assert_eq!(state.status(), GameStatus::Playing);
        assert_eq!(state.blocks().len(), (INITIAL_ROWS * GRID_COLS) as usize);
        assert!(state.blocks().iter().all(|b| b.row < INITIAL_ROWS && b.col < GRID_COLS));
        assert!(state
            .blocks()
            .iter()
            .all(|b| (1..=MAX_BLOCK_VALUE).contains(&b.value)));
        assert!((TARGET_MIN..=TARGET_MAX).contains(&state.target_sum()));
        assert_eq!(state.current_sum(), 0);
        assert!(state.selected_ids().is_empty());
        assert_eq!(state.time_left(), TIME_MODE_LIMIT);
        assert_eq!(state.episode_id(), 1);
        assert_eq!(
            state.last_event(),
            Some(LastEvent::Started {
                mode: GameMode::Classic
            })
        );
        assert!(state.validate().is_ok());
    }

    #[test]
    fn test_restart_keeps_mode_and_bumps_episode() {
        let mut rng = SimpleRng::new(9);
        let first = start_game(GameMode::Time, &mut rng);
        let second = first.restart(&mut rng);

        assert_eq!(second.mode(), GameMode::Time);
        assert_eq!(second.episode_id(), 2);
        // Ids from the new game never collide with the old one.
        assert!(second
            .blocks()
            .iter()
            .all(|b| first.block(b.id).is_none()));
    }

    #[test]
    fn test_select_then_deselect_restores_selection() {
        let mut rng = SimpleRng::new(1);
        let state = GameState::from_board(
            GameMode::Classic,
            vec![block(1, 3, 0, 0), block(2, 4, 0, 1)],
            20,
        );

        let on = state.select_block(BlockId(1), &mut rng);
        assert_eq!(on.current_sum(), 3);
        assert_eq!(on.selected_ids(), &[BlockId(1)]);
        assert_eq!(on.last_event(), Some(LastEvent::Selected { id: BlockId(1) }));

        let off = on.select_block(BlockId(1), &mut rng);
        assert_eq!(off.current_sum(), 0);
        assert!(off.selected_ids().is_empty());
        assert_eq!(off.last_event(), Some(LastEvent::Deselected { id: BlockId(1) }));
    }

    #[test]
    fn test_unknown_id_is_noop() {
        let mut rng = SimpleRng::new(1);
        let state = GameState::from_board(GameMode::Classic, vec![block(1, 3, 0, 0)], 10);
        assert_eq!(state.select_block(BlockId(42), &mut rng), state);
    }

    #[test]
    fn test_select_ignored_outside_playing() {
        let mut rng = SimpleRng::new(1);
        let playing = GameState::from_board(GameMode::Classic, vec![block(1, 3, 0, 0)], 10);
        let menu = playing.return_to_menu();
        assert_eq!(menu.select_block(BlockId(1), &mut rng), menu);
    }

    #[test]
    fn test_bust_clears_selection_but_keeps_blocks() {
        let mut rng = SimpleRng::new(1);
        let state = GameState::from_board(GameMode::Classic, vec![block(1, 9, 0, 0)], 5);
        let next = state.select_block(BlockId(1), &mut rng);

        assert_eq!(next.current_sum(), 0);
        assert!(next.selected_ids().is_empty());
        assert!(next.block(BlockId(1)).is_some());
        assert_eq!(next.score(), 0);
        assert_eq!(next.last_event(), Some(LastEvent::Bust { sum: 9 }));
    }

    #[test]
    fn test_time_mode_match_compacts_without_spawning() {
        let mut rng = SimpleRng::new(1);
        let state = GameState::from_board(
            GameMode::Time,
            vec![
                block(1, 4, 0, 0),
                block(2, 2, 1, 0),
                block(3, 6, 0, 1),
                block(4, 5, 1, 1),
            ],
            10,
        );

        let next = state
            .select_block(BlockId(1), &mut rng)
            .select_block(BlockId(3), &mut rng);

        assert_eq!(next.score(), 20);
        assert_eq!(next.blocks().len(), 2);
        assert_eq!(next.block(BlockId(2)).unwrap().row, 0);
        assert_eq!(next.block(BlockId(4)).unwrap().row, 0);
        assert_eq!(
            next.last_event(),
            Some(LastEvent::Matched {
                removed: 2,
                points: 20
            })
        );
        assert!(next.validate().is_ok());
    }

    #[test]
    fn test_classic_match_spawns_bottom_row() {
        let mut rng = SimpleRng::new(1);
        let state = GameState::from_board(
            GameMode::Classic,
            vec![block(1, 4, 0, 0), block(2, 6, 0, 1), block(3, 1, 0, 2)],
            10,
        );

        let next = state
            .select_block(BlockId(1), &mut rng)
            .select_block(BlockId(2), &mut rng);

        assert_eq!(next.status(), GameStatus::Playing);
        // Survivor was pushed up, a full new row sits at the bottom.
        assert_eq!(next.block(BlockId(3)).unwrap().row, 1);
        assert_eq!(next.blocks().len(), 1 + GRID_COLS as usize);
        for col in 0..GRID_COLS {
            let b = next.block_at(0, col).unwrap();
            assert!(b.id.get() >= 4);
        }
        assert!(next.validate().is_ok());
    }

    #[test]
    fn test_tick_counts_down_then_spawns() {
        let mut rng = SimpleRng::new(1);
        let state =
            GameState::from_board(GameMode::Time, vec![block(1, 4, 0, 0)], 10).with_time_left(1);

        let t1 = state.tick(&mut rng);
        assert_eq!(t1.time_left(), 0);
        assert_eq!(t1.blocks().len(), 1);

        let t0 = t1.select_block(BlockId(1), &mut rng).tick(&mut rng);
        assert_eq!(t0.time_left(), TIME_MODE_LIMIT);
        assert_eq!(t0.block(BlockId(1)).unwrap().row, 1);
        assert_eq!(t0.blocks().len(), 1 + GRID_COLS as usize);
        assert!(t0.selected_ids().is_empty());
        assert_eq!(t0.current_sum(), 0);
        assert_eq!(t0.target_sum(), 10);
        assert_eq!(t0.last_event(), Some(LastEvent::RowSpawned));
    }

    #[test]
    fn test_tick_ignored_in_classic_and_menu() {
        let mut rng = SimpleRng::new(1);
        let classic = GameState::from_board(GameMode::Classic, vec![block(1, 4, 0, 0)], 10);
        assert_eq!(classic.tick(&mut rng), classic);

        let menu = GameState::new();
        assert_eq!(menu.tick(&mut rng), menu);
    }

    #[test]
    fn test_return_to_menu_is_idempotent() {
        let mut rng = SimpleRng::new(4);
        let menu = start_game(GameMode::Classic, &mut rng).return_to_menu();
        assert_eq!(menu.status(), GameStatus::Menu);
        assert_eq!(menu.return_to_menu(), menu);
    }

    #[test]
    fn test_apply_dispatches() {
        let mut rng = SimpleRng::new(4);
        let state = GameState::new().apply(GameAction::StartGame { mode: GameMode::Time }, &mut rng);
        assert_eq!(state.mode(), GameMode::Time);
        assert!(state.is_playing());

        let ticked = state.apply(GameAction::Tick, &mut rng);
        assert_eq!(ticked.time_left(), TIME_MODE_LIMIT - 1);

        let menu = ticked.apply(GameAction::ReturnToMenu, &mut rng);
        assert_eq!(menu.status(), GameStatus::Menu);
    }

    #[test]
    fn test_from_board_continues_ids() {
        let mut rng = SimpleRng::new(2);
        let state = GameState::from_board(GameMode::Time, vec![block(7, 1, 0, 0)], 10)
            .with_time_left(0)
            .tick(&mut rng);
        assert!(state.blocks().iter().filter(|b| b.row == 0).all(|b| b.id.get() >= 8));
    }
}
