#![forbid(unsafe_code)]

//! Append-only step sink used during one algorithm run.
//!
//! An algorithm writes every observable operation into a [`Recorder`] while it
//! runs; the builder then [`drain`](Recorder::drain)s the buffer once.
//!
//! # Invariants
//!
//! 1. Steps are kept in emission order; nothing is dropped, reordered or deduplicated.
//! 2. A recorder is single use: after `drain`, both `emit` and a second `drain`
//!    fail with [`TraceError::RecorderReuse`] until [`reset`](Recorder::reset).
//! 3. Cancellation and the step budget are checked before every append, so a
//!    run stops between two steps, never in the middle of one.

use std::fmt;

use crate::cancellation::CancellationToken;
use crate::error::{Result, TraceError};
use crate::step::{Step, StepKind, Value};

pub struct Recorder {
    steps: Vec<Step>,
    drained: bool,
    max_steps: usize,
    cancel: Option<CancellationToken>,
}

impl fmt::Debug for Recorder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Recorder")
            .field("len", &self.steps.len())
            .field("drained", &self.drained)
            .field("max_steps", &self.max_steps)
            .field("cancellable", &self.cancel.is_some())
            .finish()
    }
}

impl Default for Recorder {
    fn default() -> Self {
        Self::new()
    }
}

impl Recorder {
    /// Create an unbounded recorder with no cancellation.
    #[must_use]
    pub fn new() -> Self {
        Self {
            steps: Vec::new(),
            drained: false,
            max_steps: usize::MAX,
            cancel: None,
        }
    }

    /// Limit the number of steps a single run may emit.
    #[must_use]
    pub fn with_max_steps(mut self, max_steps: usize) -> Self {
        self.max_steps = max_steps;
        self
    }

    /// Observe `token` between emitted steps.
    #[must_use]
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancel = Some(token);
        self
    }

    /// Append one step.
    pub fn emit(&mut self, step: Step) -> Result<()> {
        if self.drained {
            return Err(TraceError::RecorderReuse);
        }
        if self.cancel.as_ref().is_some_and(|t| t.is_cancelled()) {
            return Err(TraceError::Cancelled {
                steps: self.steps.len(),
            });
        }
        if self.steps.len() >= self.max_steps {
            return Err(TraceError::StepBudgetExceeded {
                limit: self.max_steps,
            });
        }
        self.steps.push(step);
        Ok(())
    }

    /// Append a step built from a borrowed snapshot.
    pub fn record(
        &mut self,
        kind: StepKind,
        snapshot: &[Value],
        message: impl Into<String>,
    ) -> Result<()> {
        self.emit(Step::new(kind, snapshot.to_vec(), message))
    }

    /// Append a message-only step.
    pub fn note(&mut self, snapshot: &[Value], message: impl Into<String>) -> Result<()> {
        self.record(StepKind::Note, snapshot, message)
    }

    /// Take the recorded steps. Fails if already drained.
    pub fn drain(&mut self) -> Result<Vec<Step>> {
        if self.drained {
            return Err(TraceError::RecorderReuse);
        }
        self.drained = true;
        Ok(std::mem::take(&mut self.steps))
    }

    /// Clear the buffer and make the recorder usable again.
    pub fn reset(&mut self) {
        self.steps.clear();
        self.drained = false;
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Steps recorded so far.
    #[must_use]
    pub fn steps(&self) -> &[Step] {
        &self.steps
    }
}
