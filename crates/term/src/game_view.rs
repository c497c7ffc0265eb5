//! GameView: maps a `core::GameState` snapshot into a terminal framebuffer.
//!
//! This module is pure (no I/O). It can be unit-tested.

use crate::core::{sum_progress_percent, Block, GameState, Grid};
use crate::fb::{CellStyle, FrameBuffer, Rgb};
use crate::types::{GameMode, GameStatus, LastEvent, GRID_COLS, GRID_ROWS, TIME_MODE_LIMIT};

/// Rows at the top of the board tinted as the danger zone.
const DANGER_ROWS: u8 = 2;

/// Countdown value at or below which the timer is drawn as a warning.
const TIME_WARNING: u32 = 3;

const PROGRESS_W: u16 = 12;

const BOARD_BG: Rgb = Rgb::new(30, 30, 40);
const DANGER_BG: Rgb = Rgb::new(60, 28, 36);
const PANEL_BG: Rgb = Rgb::new(0, 0, 0);

/// Block colors by `(value - 1) % 10`: (background, foreground).
const VALUE_COLORS: [(Rgb, Rgb); 10] = [
    (Rgb::new(241, 245, 249), Rgb::new(71, 85, 105)),
    (Rgb::new(219, 234, 254), Rgb::new(37, 99, 235)),
    (Rgb::new(209, 250, 229), Rgb::new(5, 150, 105)),
    (Rgb::new(254, 243, 199), Rgb::new(217, 119, 6)),
    (Rgb::new(255, 228, 230), Rgb::new(225, 29, 72)),
    (Rgb::new(224, 231, 255), Rgb::new(79, 70, 229)),
    (Rgb::new(237, 233, 254), Rgb::new(124, 58, 237)),
    (Rgb::new(207, 250, 254), Rgb::new(8, 145, 178)),
    (Rgb::new(255, 237, 213), Rgb::new(234, 88, 12)),
    (Rgb::new(236, 252, 203), Rgb::new(101, 163, 13)),
];

/// Terminal viewport dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

impl Viewport {
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }
}

/// Where the board frame lands inside a viewport.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoardLayout {
    pub x: u16,
    pub y: u16,
    pub frame_w: u16,
    pub frame_h: u16,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnchorY {
    Center,
    Top,
}

/// A lightweight terminal renderer for the puzzle.
pub struct GameView {
    /// Board cell width in terminal columns.
    cell_w: u16,
    /// Board cell height in terminal rows.
    cell_h: u16,
    anchor_y: AnchorY,
}

impl Default for GameView {
    fn default() -> Self {
        // 4x2 reads as roughly square with typical terminal glyphs and leaves
        // room for a bracketed value ("[7]") plus a one column gutter.
        Self {
            cell_w: 4,
            cell_h: 2,
            anchor_y: AnchorY::Center,
        }
    }
}

impl GameView {
    pub fn new(cell_w: u16, cell_h: u16) -> Self {
        Self {
            cell_w: cell_w.max(3),
            cell_h: cell_h.max(1),
            anchor_y: AnchorY::Center,
        }
    }

    pub fn with_anchor_y(mut self, anchor_y: AnchorY) -> Self {
        self.anchor_y = anchor_y;
        self
    }

    /// Position of the board frame for a viewport.
    pub fn layout(&self, viewport: Viewport) -> BoardLayout {
        let frame_w = (GRID_COLS as u16) * self.cell_w + 2;
        let frame_h = (GRID_ROWS as u16) * self.cell_h + 2;
        // Leave room on the right for the HUD when the terminal is wide enough.
        let total_w = frame_w + 2 + 24;
        let x = if viewport.width >= total_w {
            (viewport.width - total_w) / 2
        } else {
            viewport.width.saturating_sub(frame_w) / 2
        };
        let y = match self.anchor_y {
            AnchorY::Center => viewport.height.saturating_sub(frame_h) / 2,
            AnchorY::Top => 0,
        };
        BoardLayout {
            x,
            y,
            frame_w,
            frame_h,
        }
    }

    /// Board cell `(row, col)` under terminal position `(x, y)`, if any.
    pub fn hit_test(&self, viewport: Viewport, x: u16, y: u16) -> Option<(u8, u8)> {
        let l = self.layout(viewport);
        let inner_x = x.checked_sub(l.x + 1)?;
        let inner_y = y.checked_sub(l.y + 1)?;
        let col = inner_x / self.cell_w;
        let visual_row = inner_y / self.cell_h;
        if col >= GRID_COLS as u16 || visual_row >= GRID_ROWS as u16 {
            return None;
        }
        Some((GRID_ROWS - 1 - visual_row as u8, col as u8))
    }

    /// Render the current game state into an existing framebuffer.
    ///
    /// Callers can reuse a framebuffer across frames and only resize when the
    /// terminal size changes. `cursor` is only drawn while playing.
    pub fn render_into(
        &self,
        state: &GameState,
        cursor: Option<(u8, u8)>,
        viewport: Viewport,
        fb: &mut FrameBuffer,
    ) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(CellStyle::default().into_cell(' '));

        match state.status() {
            GameStatus::Menu => self.draw_menu(fb, viewport),
            GameStatus::Playing => {
                let l = self.layout(viewport);
                self.draw_board(fb, state, cursor, l);
                self.draw_side_panel(fb, state, viewport, l);
            }
            GameStatus::GameOver => {
                let l = self.layout(viewport);
                self.draw_board(fb, state, None, l);
                self.draw_side_panel(fb, state, viewport, l);
                self.draw_game_over(fb, state, l);
            }
        }
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(
        &self,
        state: &GameState,
        cursor: Option<(u8, u8)>,
        viewport: Viewport,
    ) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(state, cursor, viewport, &mut fb);
        fb
    }

    fn draw_menu(&self, fb: &mut FrameBuffer, viewport: Viewport) {
        let title = CellStyle::new(Rgb::new(255, 255, 255), PANEL_BG).bold();
        let accent = CellStyle::new(Rgb::new(37, 99, 235), PANEL_BG).bold();
        let time_accent = CellStyle::new(Rgb::new(225, 29, 72), PANEL_BG).bold();
        let text = CellStyle::new(Rgb::new(200, 200, 200), PANEL_BG);
        let hint = text.dim();

        let lines: [(&str, CellStyle); 9] = [
            ("SUMSTACK", title),
            ("Clear the grid by matching the target sum.", hint),
            ("", text),
            ("[1] CLASSIC", accent),
            ("    A new row after every match. Survive as long as you can.", text),
            ("", text),
            ("[2] TIME", time_accent),
            ("    A new row every 10 seconds. Speed is everything.", text),
            ("[q] quit", hint),
        ];

        let block_h = lines.len() as u16;
        let top = viewport.height.saturating_sub(block_h) / 2;
        let widest = lines.iter().map(|(s, _)| s.chars().count()).max().unwrap_or(0) as u16;
        let left = viewport.width.saturating_sub(widest) / 2;

        for (i, (s, style)) in lines.iter().enumerate() {
            let y = top + i as u16;
            if i == 0 {
                // Center the title on its own.
                let x = viewport.width.saturating_sub(s.chars().count() as u16) / 2;
                fb.put_str(x, y, s, *style);
            } else {
                fb.put_str(left, y, s, *style);
            }
        }
    }

    fn draw_board(
        &self,
        fb: &mut FrameBuffer,
        state: &GameState,
        cursor: Option<(u8, u8)>,
        l: BoardLayout,
    ) {
        let border = CellStyle::new(Rgb::new(200, 200, 200), PANEL_BG);
        let bg = CellStyle::new(Rgb::new(80, 80, 90), BOARD_BG);

        // Background for play area.
        fb.fill_rect(l.x + 1, l.y + 1, l.frame_w - 2, l.frame_h - 2, ' ', bg);
        self.draw_border(fb, l.x, l.y, l.frame_w, l.frame_h, border);

        let mut grid: Grid = [[None; GRID_COLS as usize]; GRID_ROWS as usize];
        state.board().write_grid(&mut grid);

        for row in 0..GRID_ROWS {
            for col in 0..GRID_COLS {
                match grid[row as usize][col as usize] {
                    Some(block) => {
                        self.draw_block(fb, l, &block, state.is_selected(block.id));
                    }
                    None => self.draw_empty_cell(fb, l, row, col),
                }
            }
        }

        if let Some((row, col)) = cursor {
            if state.is_playing() && row < GRID_ROWS && col < GRID_COLS {
                self.draw_cursor(fb, l, row, col);
            }
        }
    }

    /// Top-left terminal position of a board cell (row 0 is the bottom row).
    fn cell_origin(&self, l: BoardLayout, row: u8, col: u8) -> (u16, u16) {
        let visual_row = (GRID_ROWS - 1 - row) as u16;
        (
            l.x + 1 + col as u16 * self.cell_w,
            l.y + 1 + visual_row * self.cell_h,
        )
    }

    fn draw_empty_cell(&self, fb: &mut FrameBuffer, l: BoardLayout, row: u8, col: u8) {
        let bg = if row >= GRID_ROWS - DANGER_ROWS {
            DANGER_BG
        } else {
            BOARD_BG
        };
        let style = CellStyle::new(Rgb::new(90, 90, 100), bg).dim();
        let (px, py) = self.cell_origin(l, row, col);
        fb.fill_rect(px, py, self.cell_w, self.cell_h, ' ', style);
        fb.put_char(px + (self.cell_w - 1) / 2, py + (self.cell_h - 1) / 2, '·', style);
    }

    fn draw_block(&self, fb: &mut FrameBuffer, l: BoardLayout, block: &Block, selected: bool) {
        let (bg, fg) = value_colors(block.value);
        let style = if selected {
            // Inverted and bold, the terminal stand-in for a ring highlight.
            CellStyle::new(bg, fg).bold()
        } else {
            CellStyle::new(fg, bg).bold()
        };

        let (px, py) = self.cell_origin(l, block.row, block.col);
        // Last column stays board background as a gutter between blocks.
        fb.fill_rect(px, py, self.cell_w - 1, self.cell_h, ' ', style);
        fb.put_u32(
            px + (self.cell_w - 1) / 2,
            py + (self.cell_h - 1) / 2,
            block.value as u32,
            style,
        );
    }

    fn draw_cursor(&self, fb: &mut FrameBuffer, l: BoardLayout, row: u8, col: u8) {
        let (px, py) = self.cell_origin(l, row, col);
        let y = py + (self.cell_h - 1) / 2;
        let right = px + self.cell_w - 2;
        for (x, ch) in [(px, '['), (right, ']')] {
            let under = fb.get(x, y).unwrap_or_default();
            let style = CellStyle {
                fg: Rgb::new(255, 255, 255),
                bold: true,
                ..under.style
            };
            fb.put_char(x, y, ch, style);
        }
    }

    fn draw_border(&self, fb: &mut FrameBuffer, x: u16, y: u16, w: u16, h: u16, style: CellStyle) {
        if w < 2 || h < 2 {
            return;
        }

        fb.put_char(x, y, '┌', style);
        fb.put_char(x + w - 1, y, '┐', style);
        fb.put_char(x, y + h - 1, '└', style);
        fb.put_char(x + w - 1, y + h - 1, '┘', style);

        for dx in 1..w - 1 {
            fb.put_char(x + dx, y, '─', style);
            fb.put_char(x + dx, y + h - 1, '─', style);
        }
        for dy in 1..h - 1 {
            fb.put_char(x, y + dy, '│', style);
            fb.put_char(x + w - 1, y + dy, '│', style);
        }
    }

    fn draw_side_panel(
        &self,
        fb: &mut FrameBuffer,
        state: &GameState,
        viewport: Viewport,
        l: BoardLayout,
    ) {
        let panel_x = l.x.saturating_add(l.frame_w).saturating_add(2);
        if panel_x >= viewport.width {
            return;
        }
        let panel_w = viewport.width - panel_x;
        if panel_w < 14 {
            return;
        }

        let label = CellStyle::new(Rgb::new(220, 220, 220), PANEL_BG).bold();
        let value = CellStyle::new(Rgb::new(200, 200, 200), PANEL_BG);
        let dim = value.dim();

        let mut y = l.y;
        fb.put_str(panel_x, y, "MODE", label);
        y += 1;
        fb.put_str(panel_x, y, state.mode().label(), value);
        y += 2;

        fb.put_str(panel_x, y, "SCORE", label);
        y += 1;
        fb.put_u32(panel_x, y, state.score(), value);
        y += 2;

        fb.put_str(panel_x, y, "TARGET", label);
        y += 1;
        let target_style = CellStyle::new(Rgb::new(255, 255, 255), PANEL_BG).bold();
        let x = fb.put_u32(panel_x, y, state.target_sum(), target_style);
        let x = fb.put_str(x, y, " / ", dim);
        fb.put_u32(x, y, state.current_sum(), value);
        y += 1;
        self.draw_progress(
            fb,
            panel_x,
            y,
            sum_progress_percent(state.current_sum(), state.target_sum()),
        );
        y += 2;

        if state.mode() == GameMode::Time {
            let warn = state.time_left() <= TIME_WARNING;
            let time_style = if warn {
                CellStyle::new(Rgb::new(244, 63, 94), PANEL_BG).bold()
            } else {
                value
            };
            fb.put_str(panel_x, y, "TIME", label);
            y += 1;
            let x = fb.put_u32(panel_x, y, state.time_left(), time_style);
            fb.put_str(x, y, "s", time_style);
            if panel_w >= 16 {
                let x = fb.put_str(x + 2, y, "/", dim);
                let x = fb.put_u32(x, y, TIME_MODE_LIMIT, dim);
                fb.put_str(x, y, "s", dim);
            }
            y += 2;
        }

        if let Some(text) = event_text(state.last_event()) {
            let style = match state.last_event() {
                Some(LastEvent::Bust { .. }) => CellStyle::new(Rgb::new(244, 63, 94), PANEL_BG).bold(),
                _ => CellStyle::new(Rgb::new(52, 211, 153), PANEL_BG).bold(),
            };
            let x = fb.put_str(panel_x, y, text.0, style);
            if let Some(points) = text.1 {
                fb.put_u32(x, y, points, style);
            }
        }
        y += 2;

        if state.is_playing() && y < viewport.height {
            fb.put_str(panel_x, y, "arrows  move", dim);
            fb.put_str(panel_x, y + 1, "space   select", dim);
            fb.put_str(panel_x, y + 2, "esc     menu", dim);
        }
    }

    fn draw_progress(&self, fb: &mut FrameBuffer, x: u16, y: u16, percent: u32) {
        let filled = (percent as u16 * PROGRESS_W) / 100;
        let on = CellStyle::new(Rgb::new(59, 130, 246), PANEL_BG);
        let off = CellStyle::new(Rgb::new(60, 60, 70), PANEL_BG);
        for i in 0..PROGRESS_W {
            let (ch, style) = if i < filled { ('█', on) } else { ('░', off) };
            fb.put_char(x + i, y, ch, style);
        }
    }

    fn draw_game_over(&self, fb: &mut FrameBuffer, state: &GameState, l: BoardLayout) {
        let box_w: u16 = 20.min(l.frame_w);
        let box_h: u16 = 6;
        let bx = l.x + (l.frame_w - box_w) / 2;
        let by = l.y + l.frame_h.saturating_sub(box_h) / 2;

        let panel = CellStyle::new(Rgb::new(230, 230, 230), Rgb::new(15, 23, 42));
        fb.fill_rect(bx, by, box_w, box_h, ' ', panel);
        self.draw_border(fb, bx, by, box_w, box_h, panel);

        let heading = CellStyle {
            fg: Rgb::new(244, 63, 94),
            ..panel
        }
        .bold();
        center_str(fb, bx, box_w, by + 1, "GAME OVER", heading);

        let score_label = "SCORE ";
        let digits = digit_count(state.score());
        let w = score_label.len() as u16 + digits;
        let sx = bx + box_w.saturating_sub(w) / 2;
        let x = fb.put_str(sx, by + 2, score_label, panel);
        fb.put_u32(x, by + 2, state.score(), panel.bold());

        center_str(fb, bx, box_w, by + 4, "[r] retry [m] menu", panel.dim());
    }
}

fn value_colors(value: u8) -> (Rgb, Rgb) {
    VALUE_COLORS[(value.saturating_sub(1) % 10) as usize]
}

fn event_text(event: Option<LastEvent>) -> Option<(&'static str, Option<u32>)> {
    match event? {
        LastEvent::Bust { .. } => Some(("BUST!", None)),
        LastEvent::Matched { points, .. } => Some(("+", Some(points))),
        LastEvent::RowSpawned => Some(("NEW ROW", None)),
        _ => None,
    }
}

fn center_str(fb: &mut FrameBuffer, x: u16, w: u16, y: u16, s: &str, style: CellStyle) {
    let len = s.chars().count() as u16;
    fb.put_str(x + w.saturating_sub(len) / 2, y, s, style);
}

fn digit_count(mut n: u32) -> u16 {
    let mut d = 1;
    while n >= 10 {
        n /= 10;
        d += 1;
    }
    d
}
