//! SUMSTACK terminal runner (default binary).
//!
//! Uses crossterm for keyboard and mouse input and the framebuffer renderer
//! from `sumstack::term`. The frame loop sleeps in `event::poll` until either
//! input arrives, the next frame is due, or the time-mode countdown fires.

use std::fs::File;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossterm::event::{self, Event, KeyEventKind};
use log::{debug, info};

use sumstack::core::fingerprint;
use sumstack::engine::{GameConfig, Session};
use sumstack::input::{map_key, map_mouse, Cursor, InputCommand};
use sumstack::term::{FrameBuffer, GameView, RenderThrottle, TerminalRenderer, Viewport};
use sumstack::types::{GameAction, FRAME_MS};

/// Redraw at least this often even when nothing changed.
const REFRESH_MS: u64 = 1_000;

fn main() -> Result<()> {
    let config = GameConfig::from_env()?;
    init_logging(&config)?;

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term, &config);

    // Always try to restore terminal state.
    let _ = term.exit();
    result
}

/// Logs go to a file only; stdout belongs to the game screen.
fn init_logging(config: &GameConfig) -> Result<()> {
    let Some(path) = config.log_path.as_deref() else {
        return Ok(());
    };
    let file = File::create(path).with_context(|| format!("failed to open log file {path}"))?;
    env_logger::Builder::new()
        .parse_filters(&config.log_filter)
        .target(env_logger::Target::Pipe(Box::new(file)))
        .init();
    Ok(())
}

fn run(term: &mut TerminalRenderer, config: &GameConfig) -> Result<()> {
    let seed = config.seed_or_clock();
    info!("sumstack starting (seed {seed})");

    let mut session = Session::new(seed);
    if let Some(mode) = config.start_mode {
        session.dispatch(GameAction::StartGame { mode });
    }

    let view = GameView::default();
    let mut cursor = Cursor::default();
    let mut fb = FrameBuffer::new(0, 0);
    let mut throttle = RenderThrottle::new(REFRESH_MS);

    let started = Instant::now();
    let frame = Duration::from_millis(FRAME_MS as u64);
    let mut last = Instant::now();

    let result = loop {
        // Render.
        let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
        let viewport = Viewport::new(w, h);
        let now_ms = started.elapsed().as_millis() as u64;
        let fp = fingerprint(&(session.state(), cursor.position()));
        if throttle.should_render(now_ms, fp) {
            view.render_into(session.state(), Some(cursor.position()), viewport, &mut fb);
            term.draw_swap(&mut fb)?;
        }

        // Input with timeout until the next frame or countdown tick.
        let timeout = session
            .time_until_tick()
            .map_or(frame, |until| until.min(frame));

        if event::poll(timeout)? {
            let command = match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    map_key(key, session.state().status())
                }
                Event::Mouse(mouse) => map_mouse(mouse),
                Event::Resize(_, _) => {
                    term.invalidate();
                    throttle.invalidate();
                    None
                }
                // Repeats and releases are ignored.
                _ => None,
            };

            if let Some(command) = command {
                if command == InputCommand::Quit {
                    break Ok(());
                }
                apply_command(&mut session, &mut cursor, &view, viewport, command);
            }
        }

        // Countdown.
        session.advance(last.elapsed());
        last = Instant::now();
    };

    session.shutdown();
    info!("sumstack exiting (score {})", session.state().score());
    result
}

fn apply_command(
    session: &mut Session,
    cursor: &mut Cursor,
    view: &GameView,
    viewport: Viewport,
    command: InputCommand,
) {
    match command {
        InputCommand::Start(mode) => {
            session.dispatch(GameAction::StartGame { mode });
            *cursor = Cursor::default();
        }
        InputCommand::Restart => {
            session.dispatch(GameAction::Restart);
            *cursor = Cursor::default();
        }
        InputCommand::Menu => {
            session.dispatch(GameAction::ReturnToMenu);
        }
        InputCommand::MoveCursor { d_row, d_col } => cursor.move_by(d_row, d_col),
        InputCommand::SelectAtCursor => {
            let (row, col) = cursor.position();
            select_at(session, row, col);
        }
        InputCommand::Click { x, y } => {
            if !session.state().is_playing() {
                return;
            }
            match view.hit_test(viewport, x, y) {
                Some((row, col)) => {
                    cursor.set(row, col);
                    select_at(session, row, col);
                }
                None => debug!("click at ({x}, {y}) outside the board"),
            }
        }
        InputCommand::Quit => {}
    }
}

fn select_at(session: &mut Session, row: u8, col: u8) {
    if let Some(id) = session.state().block_at(row, col).map(|b| b.id) {
        session.dispatch(GameAction::SelectBlock { id });
    }
}
