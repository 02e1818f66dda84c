#![forbid(unsafe_code)]

//! Trace construction: validate, dispatch, record, seal.
//!
//! [`TraceBuilder::build`] runs one algorithm against a private copy of the
//! input through a fresh [`Recorder`], appends the terminal `Done` step and
//! returns an immutable [`Trace`]. Building is eager: the whole trace exists
//! before playback starts.
//!
//! # Invariants
//!
//! 1. The caller's input is never mutated.
//! 2. A trace always has at least one step, and its last step is `Done`.
//! 3. Empty and single-element inputs produce a trace of exactly one step.
//! 4. Invalid input fails before any step is recorded; no partial trace escapes.
//!
//! # Example
//!
//! ```
//! use dryrun_core::{AlgorithmId, EngineConfig, TraceBuilder};
//!
//! let builder = TraceBuilder::new(EngineConfig::default());
//! let trace = builder.build(AlgorithmId::Quick, &[5.0, 3.0, 8.0, 4.0, 2.0])?;
//! assert_eq!(trace.final_array(), &[2.0, 3.0, 4.0, 5.0, 8.0]);
//! assert!(trace.steps().last().is_some_and(|s| s.is_done()));
//! # Ok::<(), dryrun_core::TraceError>(())
//! ```

use serde::Serialize;

use crate::algorithms;
use crate::cancellation::CancellationToken;
use crate::catalog::AlgorithmId;
use crate::config::EngineConfig;
use crate::error::{Result, TraceError};
use crate::invariants::{self, InvariantViolation};
use crate::recorder::Recorder;
use crate::step::{Step, StepKind, Value};

/// Immutable record of one algorithm run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Trace {
    algorithm: AlgorithmId,
    original: Vec<Value>,
    origins: Vec<usize>,
    steps: Vec<Step>,
}

impl Trace {
    /// Assemble a trace from decoded parts. Callers must [`verify`](Self::verify).
    pub(crate) fn from_parts(
        algorithm: AlgorithmId,
        original: Vec<Value>,
        origins: Vec<usize>,
        steps: Vec<Step>,
    ) -> Self {
        Self {
            algorithm,
            original,
            origins,
            steps,
        }
    }

    #[must_use]
    pub fn algorithm(&self) -> AlgorithmId {
        self.algorithm
    }

    /// The input the trace was built from.
    #[must_use]
    pub fn original(&self) -> &[Value] {
        &self.original
    }

    #[must_use]
    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    #[must_use]
    pub fn step(&self, index: usize) -> Option<&Step> {
        self.steps.get(index)
    }

    /// Number of steps, including the terminal `Done`.
    #[must_use]
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Sorted output carried by the terminal step.
    #[must_use]
    pub fn final_array(&self) -> &[Value] {
        match self.steps.last().map(|s| &s.kind) {
            Some(StepKind::Done { final_array }) => final_array,
            _ => &[],
        }
    }

    /// `origins()[k]` is the input index of the element at final position `k`.
    #[must_use]
    pub fn origins(&self) -> &[usize] {
        &self.origins
    }

    /// `blake3:<hex>` over the canonical JSON encoding of the trace.
    #[must_use]
    pub fn fingerprint(&self) -> String {
        // Every field is a number, string or tag, so encoding cannot fail.
        let bytes = serde_json::to_vec(self).unwrap_or_default();
        format!("blake3:{}", blake3::hash(&bytes).to_hex())
    }

    /// Re-check the step rules and the origin map.
    pub fn verify(&self) -> std::result::Result<(), InvariantViolation> {
        invariants::check_steps(&self.original, &self.steps)?;
        invariants::check_origins(&self.original, self.final_array(), &self.origins)
    }
}

/// Builds traces under one [`EngineConfig`].
#[derive(Debug, Clone, Default)]
pub struct TraceBuilder {
    config: EngineConfig,
    cancel: Option<CancellationToken>,
}

impl TraceBuilder {
    #[must_use]
    pub fn new(config: EngineConfig) -> Self {
        Self {
            config,
            cancel: None,
        }
    }

    /// Abort construction between steps once `token` is cancelled.
    #[must_use]
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancel = Some(token);
        self
    }

    #[must_use]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Build a trace for `algorithm` over `input`.
    pub fn build(&self, algorithm: AlgorithmId, input: &[Value]) -> Result<Trace> {
        let span = tracing::debug_span!(
            target: "dryrun.build",
            "trace.build",
            algorithm = algorithm.as_str(),
            len = input.len(),
            steps = tracing::field::Empty,
        );
        let _guard = span.enter();

        let result = self.build_inner(algorithm, input);
        match &result {
            Ok(trace) => {
                span.record("steps", trace.len());
                tracing::debug!(target: "dryrun.build", steps = trace.len(), "trace built");
            }
            Err(err) => {
                tracing::debug!(target: "dryrun.build", error = %err, "trace build failed");
            }
        }
        result
    }

    /// Build a trace, resolving the algorithm by name.
    pub fn build_named(&self, name: &str, input: &[Value]) -> Result<Trace> {
        let algorithm: AlgorithmId = name.parse()?;
        self.build(algorithm, input)
    }

    fn build_inner(&self, algorithm: AlgorithmId, input: &[Value]) -> Result<Trace> {
        let errors = self.config.validate();
        if !errors.is_empty() {
            return Err(TraceError::InvalidConfig { errors });
        }
        self.validate(input)?;

        let mut recorder = Recorder::new().with_max_steps(self.config.max_steps);
        if let Some(token) = &self.cancel {
            recorder = recorder.with_cancellation(token.clone());
        }

        let sorted = algorithms::for_id(algorithm, &self.config.distribution)
            .run(input, &mut recorder)?;
        let mut steps = recorder.drain()?;
        steps.push(Step::done(sorted.values));

        let trace = Trace {
            algorithm,
            original: input.to_vec(),
            origins: sorted.origins,
            steps,
        };
        debug_assert_eq!(trace.verify(), Ok(()), "{algorithm} produced a broken trace");
        Ok(trace)
    }

    fn validate(&self, input: &[Value]) -> Result<()> {
        if input.len() > self.config.max_len {
            return Err(TraceError::invalid(format!(
                "{} values exceeds the maximum of {}",
                input.len(),
                self.config.max_len
            )));
        }
        if let Some(index) = input.iter().position(|v| !v.is_finite()) {
            return Err(TraceError::invalid_at(
                index,
                format!("{} is not a finite number", input[index]),
            ));
        }
        Ok(())
    }
}

/// Build with the default configuration.
pub fn build_trace(algorithm: AlgorithmId, input: &[Value]) -> Result<Trace> {
    TraceBuilder::default().build(algorithm, input)
}

/// Build with the default configuration, resolving the algorithm by name.
pub fn build_trace_named(name: &str, input: &[Value]) -> Result<Trace> {
    TraceBuilder::default().build_named(name, input)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cancellation::CancellationSource;
    use crate::config::DistributionConfig;

    #[test]
    fn trace_ends_with_done_carrying_sorted_values() {
        let trace = build_trace(AlgorithmId::Bubble, &[3.0, 1.0, 2.0]).unwrap();
        assert_eq!(trace.final_array(), &[1.0, 2.0, 3.0]);
        assert_eq!(trace.original(), &[3.0, 1.0, 2.0]);
        assert!(trace.steps().last().unwrap().is_done());
        assert_eq!(trace.verify(), Ok(()));
    }

    #[test]
    fn empty_and_singleton_have_only_done() {
        for id in AlgorithmId::ALL {
            let empty = build_trace(id, &[]).unwrap();
            assert_eq!(empty.len(), 1, "{id}");
            assert_eq!(empty.final_array(), &[] as &[Value]);

            let single = build_trace(id, &[7.0]).unwrap();
            assert_eq!(single.len(), 1, "{id}");
            assert_eq!(single.final_array(), &[7.0]);
        }
    }

    #[test]
    fn non_finite_values_are_rejected_with_index() {
        let err = build_trace(AlgorithmId::Merge, &[1.0, f64::NAN]).unwrap_err();
        assert!(matches!(err, TraceError::InvalidInput { index: Some(1), .. }));
        let err = build_trace(AlgorithmId::Merge, &[f64::INFINITY]).unwrap_err();
        assert!(matches!(err, TraceError::InvalidInput { index: Some(0), .. }));
    }

    #[test]
    fn oversized_input_is_rejected() {
        let builder = TraceBuilder::new(EngineConfig {
            max_len: 3,
            ..EngineConfig::default()
        });
        let err = builder.build(AlgorithmId::Bubble, &[4.0, 3.0, 2.0, 1.0]).unwrap_err();
        assert!(matches!(err, TraceError::InvalidInput { index: None, .. }));
    }

    #[test]
    fn unknown_name_is_reported() {
        let err = build_trace_named("bogo", &[1.0]).unwrap_err();
        assert_eq!(
            err,
            TraceError::UnknownAlgorithm {
                name: "bogo".to_string()
            }
        );
        assert!(build_trace_named("odd-even", &[2.0, 1.0]).is_ok());
    }

    #[test]
    fn step_budget_stops_runaway_traces() {
        let builder = TraceBuilder::new(EngineConfig {
            max_steps: 5,
            ..EngineConfig::default()
        });
        let err = builder.build(AlgorithmId::Bubble, &[5.0, 4.0, 3.0, 2.0, 1.0]).unwrap_err();
        assert_eq!(err, TraceError::StepBudgetExceeded { limit: 5 });
    }

    fn builder_with(distribution: DistributionConfig) -> TraceBuilder {
        TraceBuilder::new(EngineConfig {
            distribution,
            ..EngineConfig::default()
        })
    }

    #[test]
    fn zero_buckets_is_a_config_error() {
        let builder = builder_with(DistributionConfig {
            bucket_count: 0,
            ..DistributionConfig::default()
        });
        let err = builder.build(AlgorithmId::Bucket, &[420.0, 120.0]).unwrap_err();
        let TraceError::InvalidConfig { errors } = err else {
            panic!("expected InvalidConfig, got {err:?}");
        };
        assert!(errors.iter().any(|e| e.contains("bucket_count")), "{errors:?}");
    }

    #[test]
    fn degenerate_radix_base_is_a_config_error() {
        for radix_base in [0, 1] {
            let builder = builder_with(DistributionConfig {
                radix_base,
                ..DistributionConfig::default()
            });
            let err = builder.build(AlgorithmId::Radix, &[21.0, 13.0, 11.0]).unwrap_err();
            assert!(matches!(err, TraceError::InvalidConfig { .. }), "base {radix_base}: {err:?}");
        }
    }

    #[test]
    fn oversized_value_range_is_a_config_error() {
        let builder = builder_with(DistributionConfig {
            max_value: u64::MAX,
            ..DistributionConfig::default()
        });
        let err = builder.build(AlgorithmId::Counting, &[1e15, 1.0]).unwrap_err();
        assert!(matches!(err, TraceError::InvalidConfig { .. }), "{err:?}");
    }

    #[test]
    fn invalid_config_rejects_every_algorithm() {
        let builder = TraceBuilder::new(EngineConfig {
            max_steps: 0,
            ..EngineConfig::default()
        });
        for id in AlgorithmId::ALL {
            let err = builder.build(id, &[]).unwrap_err();
            assert!(matches!(err, TraceError::InvalidConfig { .. }), "{id}: {err:?}");
        }
    }

    #[test]
    fn fingerprint_is_blake3_of_serialized_trace() {
        let trace = build_trace(AlgorithmId::Cycle, &[3.0, 1.0, 2.0]).unwrap();
        let bytes = serde_json::to_vec(&trace).unwrap();
        assert_eq!(
            trace.fingerprint(),
            format!("blake3:{}", blake3::hash(&bytes).to_hex())
        );
    }

    #[test]
    fn cancelled_token_stops_before_first_step() {
        let source = CancellationSource::new();
        source.cancel();
        let builder = TraceBuilder::default().with_cancellation(source.token());
        let err = builder.build(AlgorithmId::Heap, &[2.0, 1.0]).unwrap_err();
        assert_eq!(err, TraceError::Cancelled { steps: 0 });
    }

    #[test]
    fn fingerprint_is_stable_and_content_sensitive() {
        let a = build_trace(AlgorithmId::Quick, &[3.0, 1.0, 2.0]).unwrap();
        let b = build_trace(AlgorithmId::Quick, &[3.0, 1.0, 2.0]).unwrap();
        let c = build_trace(AlgorithmId::Quick, &[3.0, 2.0, 1.0]).unwrap();
        assert_eq!(a.fingerprint(), b.fingerprint());
        assert_ne!(a.fingerprint(), c.fingerprint());
        assert!(a.fingerprint().starts_with("blake3:"));
    }

    #[test]
    fn input_is_not_mutated() {
        let input = vec![5.0, 3.0, 8.0, 4.0, 2.0];
        let copy = input.clone();
        for id in AlgorithmId::ALL {
            let _ = build_trace(id, &input).unwrap();
        }
        assert_eq!(input, copy);
    }
}
