//! Headless replay: reads one JSON `GameAction` per line on stdin and prints
//! the resulting `GameState` as one JSON line per action.
//!
//! ```text
//! echo '{"type":"startGame","mode":"classic"}' | SUMSTACK_SEED=7 sumstack-replay
//! ```
//!
//! Blank lines are skipped. Ticks are only ever applied when they appear in
//! the input; there is no wall clock here.

use std::io::{self, BufRead, BufWriter, Write};

use anyhow::{Context, Result};
use log::debug;

use sumstack::engine::{GameConfig, Session};
use sumstack::types::GameAction;

fn main() -> Result<()> {
    let config = GameConfig::from_env()?;
    env_logger::Builder::new()
        .parse_filters(&config.log_filter)
        .target(env_logger::Target::Stderr)
        .init();

    // Replays are reproducible by default.
    let seed = config.seed.unwrap_or(1);
    let mut session = Session::new(seed);

    let stdin = io::stdin();
    let mut out = BufWriter::new(io::stdout().lock());

    for (index, line) in stdin.lock().lines().enumerate() {
        let line_no = index + 1;
        let line = line.with_context(|| format!("failed to read line {line_no}"))?;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let action: GameAction = serde_json::from_str(line)
            .with_context(|| format!("line {line_no}: invalid action {line:?}"))?;
        debug!("line {line_no}: {}", action.as_str());

        let state = session.dispatch(action);
        serde_json::to_writer(&mut out, state)
            .with_context(|| format!("line {line_no}: failed to encode state"))?;
        out.write_all(b"\n")?;
    }

    out.flush()?;
    session.shutdown();
    Ok(())
}
