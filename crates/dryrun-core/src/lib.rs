#![forbid(unsafe_code)]

//! Trace engine and playback controller for sorting algorithm dry runs.
//!
//! # Role
//! `dryrun-core` runs a sorting algorithm once against an immutable copy of
//! the input and records every observable operation (comparison, swap, shift,
//! pivot choice, merge, heap fix, bucket or digit assignment) as an ordered
//! sequence of [`Step`]s. A [`PlaybackController`] then moves a cursor through
//! that sequence for a renderer.
//!
//! # Primary responsibilities
//! - **Step model**: the tagged [`StepKind`] vocabulary shared by all algorithms.
//! - **Recorder**: append-only sink threaded through an algorithm run.
//! - **Algorithms**: eleven deterministic procedures, see [`AlgorithmId`].
//! - **Builder**: validation, dispatch and the terminal `Done` step.
//! - **Playback**: clamped next/prev/seek/reset over a frozen [`Trace`].
//!
//! # Example
//!
//! ```
//! use dryrun_core::{AlgorithmId, PlaybackController, build_trace};
//!
//! let trace = build_trace(AlgorithmId::Bubble, &[5.0, 3.0, 8.0, 4.0, 2.0])?;
//! let mut playback = PlaybackController::new(trace);
//! assert_eq!(playback.current().message, "Comparing 5 and 3");
//! playback.next();
//! assert_eq!(playback.label(), "Step 2 of 18");
//! # Ok::<(), dryrun_core::TraceError>(())
//! ```

pub mod algorithms;
pub mod builder;
pub mod cancellation;
pub mod catalog;
pub mod codec;
pub mod config;
pub mod error;
pub mod invariants;
pub mod playback;
pub mod recorder;
pub mod session;
pub mod step;

pub use algorithms::{SortAlgorithm, Sorted};
pub use builder::{Trace, TraceBuilder, build_trace, build_trace_named};
pub use cancellation::{CancellationSource, CancellationToken};
pub use catalog::{AlgorithmId, AlgorithmInfo, Family};
pub use config::{ConfigError, DistributionConfig, EngineConfig};
pub use error::{Result, TraceError};
pub use playback::{PlaybackController, PlaybackPosition};
pub use recorder::Recorder;
pub use session::Session;
pub use step::{Conservation, Highlights, Step, StepKind, Value};
