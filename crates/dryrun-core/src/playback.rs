#![forbid(unsafe_code)]

//! Cursor-based navigation over a frozen [`Trace`].
//!
//! # Invariants
//!
//! 1. `0 <= cursor < trace.len()` at all times (a trace is never empty).
//! 2. Navigation is total: out-of-range moves clamp, nothing errors.
//! 3. Navigating does not touch the trace; `install` replaces it wholesale
//!    and resets the cursor to the first step.
//!
//! # Example
//!
//! ```
//! use dryrun_core::{AlgorithmId, PlaybackController, PlaybackPosition, build_trace};
//!
//! let mut playback = PlaybackController::new(build_trace(AlgorithmId::Insertion, &[2.0, 1.0])?);
//! assert_eq!(playback.position(), PlaybackPosition::AtStart);
//! playback.seek(99);
//! assert_eq!(playback.position(), PlaybackPosition::AtEnd);
//! assert!(playback.current().is_done());
//! # Ok::<(), dryrun_core::TraceError>(())
//! ```

use crate::builder::Trace;
use crate::step::{Step, Value};

/// Where the cursor sits, derived from the cursor and trace length.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackPosition {
    AtStart,
    Mid,
    AtEnd,
}

#[derive(Debug, Clone)]
pub struct PlaybackController {
    trace: Trace,
    cursor: usize,
}

impl PlaybackController {
    #[must_use]
    pub fn new(trace: Trace) -> Self {
        Self { trace, cursor: 0 }
    }

    /// Replace the trace and rewind to the first step.
    pub fn install(&mut self, trace: Trace) {
        let from = self.cursor;
        self.trace = trace;
        self.cursor = 0;
        self.log_navigation("install", from);
    }

    /// Advance one step. Returns false when already at the end.
    pub fn next(&mut self) -> bool {
        let from = self.cursor;
        self.cursor = (self.cursor + 1).min(self.last_index());
        self.log_navigation("next", from);
        self.cursor != from
    }

    /// Go back one step. Returns false when already at the start.
    pub fn prev(&mut self) -> bool {
        let from = self.cursor;
        self.cursor = self.cursor.saturating_sub(1);
        self.log_navigation("prev", from);
        self.cursor != from
    }

    /// Jump to `index`, clamped into `0..len`. Returns the new cursor.
    pub fn seek(&mut self, index: i64) -> usize {
        let from = self.cursor;
        self.cursor = usize::try_from(index.max(0))
            .unwrap_or(usize::MAX)
            .min(self.last_index());
        self.log_navigation("seek", from);
        self.cursor
    }

    /// Rewind to the first step.
    pub fn reset(&mut self) {
        let from = self.cursor;
        self.cursor = 0;
        self.log_navigation("reset", from);
    }

    /// Jump to the terminal step.
    pub fn go_to_end(&mut self) {
        let from = self.cursor;
        self.cursor = self.last_index();
        self.log_navigation("go_to_end", from);
    }

    #[must_use]
    pub fn current(&self) -> &Step {
        &self.trace.steps()[self.cursor]
    }

    /// Array state at the cursor.
    #[must_use]
    pub fn snapshot(&self) -> &[Value] {
        &self.current().snapshot
    }

    #[must_use]
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.trace.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.trace.is_empty()
    }

    /// `AtStart` wins for a one-step trace.
    #[must_use]
    pub fn position(&self) -> PlaybackPosition {
        if self.cursor == 0 {
            PlaybackPosition::AtStart
        } else if self.cursor == self.last_index() {
            PlaybackPosition::AtEnd
        } else {
            PlaybackPosition::Mid
        }
    }

    #[must_use]
    pub fn can_next(&self) -> bool {
        self.cursor < self.last_index()
    }

    #[must_use]
    pub fn can_prev(&self) -> bool {
        self.cursor > 0
    }

    /// One-based progress label, e.g. `Step 3 of 18`.
    #[must_use]
    pub fn label(&self) -> String {
        format!("Step {} of {}", self.cursor + 1, self.len())
    }

    #[must_use]
    pub fn trace(&self) -> &Trace {
        &self.trace
    }

    fn last_index(&self) -> usize {
        self.trace.len().saturating_sub(1)
    }

    fn log_navigation(&self, action: &'static str, from: usize) {
        tracing::debug!(
            target: "dryrun.playback",
            action,
            from,
            to = self.cursor,
            len = self.trace.len(),
            "navigation"
        );
    }
}
