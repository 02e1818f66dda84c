#![forbid(unsafe_code)]

//! Error taxonomy for trace construction.
//!
//! Every variant is a synchronous failure returned to the caller of the
//! builder. None of them are retried: trace construction is deterministic,
//! so an input that fails once fails every time. The playback controller
//! never produces errors.

use thiserror::Error;

use crate::step::Value;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum TraceError {
    /// The algorithm name does not match any supported algorithm.
    #[error("unknown algorithm `{name}`")]
    UnknownAlgorithm { name: String },

    /// The input is not a finite sequence of values the algorithm can order.
    #[error("invalid input{}: {reason}", fmt_index(.index))]
    InvalidInput {
        index: Option<usize>,
        reason: String,
    },

    /// `drain` was called twice, or `emit` after `drain`, without a reset.
    #[error("recorder reused after drain without reset")]
    RecorderReuse,

    /// A distribution sort met a value outside its configured range.
    #[error("value {value} at index {index} is outside the supported range 0..={max}")]
    BucketRange { index: usize, value: Value, max: u64 },

    /// The run was cancelled between two emitted steps.
    #[error("trace construction cancelled after {steps} steps")]
    Cancelled { steps: usize },

    /// The run exceeded the configured number of steps.
    #[error("trace exceeded the step budget of {limit} steps")]
    StepBudgetExceeded { limit: usize },

    /// The builder's [`EngineConfig`](crate::EngineConfig) failed validation.
    #[error("invalid engine configuration: {}", .errors.join("; "))]
    InvalidConfig { errors: Vec<String> },
}

impl TraceError {
    pub(crate) fn invalid_at(index: usize, reason: impl Into<String>) -> Self {
        Self::InvalidInput {
            index: Some(index),
            reason: reason.into(),
        }
    }

    pub(crate) fn invalid(reason: impl Into<String>) -> Self {
        Self::InvalidInput {
            index: None,
            reason: reason.into(),
        }
    }

    /// True for errors caused by the caller's input rather than engine misuse.
    #[must_use]
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            Self::UnknownAlgorithm { .. } | Self::InvalidInput { .. } | Self::BucketRange { .. }
        )
    }
}

fn fmt_index(index: &Option<usize>) -> String {
    match index {
        Some(i) => format!(" at index {i}"),
        None => String::new(),
    }
}

pub type Result<T> = std::result::Result<T, TraceError>;
