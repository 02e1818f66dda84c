#![forbid(unsafe_code)]

//! Cooperative cancellation for trace construction.
//!
//! [`CancellationToken`] is a thread-safe, cloneable flag. The recorder polls
//! it before appending each step, so a long run (large inputs under a
//! quadratic algorithm) can be stopped from another thread between two steps.
//!
//! # Example
//!
//! ```
//! use dryrun_core::{AlgorithmId, CancellationSource, EngineConfig, TraceBuilder, TraceError};
//!
//! let source = CancellationSource::new();
//! let builder = TraceBuilder::new(EngineConfig::default()).with_cancellation(source.token());
//! source.cancel();
//!
//! let err = builder.build(AlgorithmId::Bubble, &[2.0, 1.0]).unwrap_err();
//! assert!(matches!(err, TraceError::Cancelled { steps: 0 }));
//! ```

use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// A cloneable handle observing one [`CancellationSource`].
#[derive(Clone)]
pub struct CancellationToken {
    cancelled: Arc<AtomicBool>,
}

/// The control side that requests cancellation.
///
/// Dropping the source does not cancel its tokens; call [`cancel`](Self::cancel).
pub struct CancellationSource {
    cancelled: Arc<AtomicBool>,
}

impl CancellationSource {
    #[must_use]
    pub fn new() -> Self {
        Self {
            cancelled: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Obtain a token that observes this source.
    #[must_use]
    pub fn token(&self) -> CancellationToken {
        CancellationToken {
            cancelled: Arc::clone(&self.cancelled),
        }
    }

    /// Request cancellation. Every token derived from this source observes it.
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Release);
    }

    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Acquire)
    }
}

impl Default for CancellationSource {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for CancellationSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CancellationSource")
            .field("cancelled", &self.is_cancelled())
            .finish()
    }
}

impl CancellationToken {
    /// True once the source requested cancellation.
    #[inline]
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Acquire)
    }
}

impl fmt::Debug for CancellationToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CancellationToken")
            .field("cancelled", &self.is_cancelled())
            .finish()
    }
}
