//! Redraw gating for the frame loop.
//!
//! The puzzle only changes on input or countdown ticks, so most frames are
//! identical. A frame is drawn when the snapshot fingerprint changes, after an
//! `invalidate` (resize), or as a periodic refresh.

#[derive(Debug, Clone)]
pub struct RenderThrottle {
    refresh_interval_ms: u64,
    last_render_ms: u64,
    last_fingerprint: u64,
    dirty: bool,
}

impl RenderThrottle {
    pub fn new(refresh_interval_ms: u64) -> Self {
        Self {
            refresh_interval_ms,
            last_render_ms: 0,
            last_fingerprint: 0,
            dirty: true,
        }
    }

    /// Force the next call to `should_render` to return true.
    pub fn invalidate(&mut self) {
        self.dirty = true;
    }

    /// Decide whether to render a new frame.
    ///
    /// Renders immediately on the first call, after `invalidate`, and whenever
    /// `fingerprint` changes. Otherwise renders at most once per refresh interval.
    pub fn should_render(&mut self, now_ms: u64, fingerprint: u64) -> bool {
        let due = self.dirty
            || fingerprint != self.last_fingerprint
            || now_ms.saturating_sub(self.last_render_ms) >= self.refresh_interval_ms;

        if due {
            self.dirty = false;
            self.last_render_ms = now_ms;
            self.last_fingerprint = fingerprint;
        }
        due
    }
}
