#![forbid(unsafe_code)]

//! Application shell: one active visualization at a time.
//!
//! Changing the algorithm or the input rebuilds the trace from scratch and
//! replaces the controller. When a rebuild fails the previous visualization
//! is withheld rather than shown against the new selection, and the error is
//! kept for display.

use crate::builder::TraceBuilder;
use crate::catalog::AlgorithmId;
use crate::config::EngineConfig;
use crate::error::{Result, TraceError};
use crate::playback::PlaybackController;
use crate::step::Value;

#[derive(Debug, Clone, Default)]
pub struct Session {
    builder: TraceBuilder,
    controller: Option<PlaybackController>,
    last_error: Option<TraceError>,
}

impl Session {
    #[must_use]
    pub fn new(config: EngineConfig) -> Self {
        Self::with_builder(TraceBuilder::new(config))
    }

    /// Use a preconfigured builder, e.g. one carrying a cancellation token.
    #[must_use]
    pub fn with_builder(builder: TraceBuilder) -> Self {
        Self {
            builder,
            controller: None,
            last_error: None,
        }
    }

    /// Rebuild for a new selection and rewind playback.
    pub fn select(&mut self, algorithm: AlgorithmId, input: &[Value]) -> Result<&mut PlaybackController> {
        self.controller = None;
        match self.builder.build(algorithm, input) {
            Ok(trace) => {
                tracing::debug!(
                    target: "dryrun.session",
                    algorithm = algorithm.as_str(),
                    steps = trace.len(),
                    "selection installed"
                );
                self.last_error = None;
                Ok(self.controller.insert(PlaybackController::new(trace)))
            }
            Err(err) => Err(self.fail(err)),
        }
    }

    /// [`select`](Self::select) with the algorithm given by name.
    pub fn select_named(&mut self, name: &str, input: &[Value]) -> Result<&mut PlaybackController> {
        match name.parse::<AlgorithmId>() {
            Ok(algorithm) => self.select(algorithm, input),
            Err(err) => {
                self.controller = None;
                Err(self.fail(err))
            }
        }
    }

    fn fail(&mut self, err: TraceError) -> TraceError {
        tracing::info!(target: "dryrun.session", error = %err, "selection rejected");
        self.last_error = Some(err.clone());
        err
    }

    /// Active controller, or `None` after a failed selection.
    #[must_use]
    pub fn controller(&self) -> Option<&PlaybackController> {
        self.controller.as_ref()
    }

    pub fn controller_mut(&mut self) -> Option<&mut PlaybackController> {
        self.controller.as_mut()
    }

    /// Error from the most recent selection, cleared by the next success.
    #[must_use]
    pub fn last_error(&self) -> Option<&TraceError> {
        self.last_error.as_ref()
    }

    /// Drop the visualization and any pending error.
    pub fn clear(&mut self) {
        self.controller = None;
        self.last_error = None;
    }

    #[must_use]
    pub fn config(&self) -> &EngineConfig {
        self.builder.config()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn selection_installs_a_fresh_controller() {
        let mut session = Session::default();
        let controller = session.select(AlgorithmId::Bubble, &[2.0, 1.0]).unwrap();
        controller.go_to_end();

        session.select(AlgorithmId::Selection, &[3.0, 1.0, 2.0]).unwrap();
        let controller = session.controller().unwrap();
        assert_eq!(controller.cursor(), 0);
        assert_eq!(controller.trace().algorithm(), AlgorithmId::Selection);
        assert!(session.last_error().is_none());
    }

    #[test]
    fn failed_selection_withholds_previous_visualization() {
        let mut session = Session::default();
        session.select(AlgorithmId::Counting, &[3.0, 1.0]).unwrap();

        let err = session.select(AlgorithmId::Counting, &[3.0, -1.0]).unwrap_err();
        assert!(err.is_input_error());
        assert!(session.controller().is_none());
        assert_eq!(session.last_error(), Some(&err));
    }

    #[test]
    fn unchecked_config_is_reported_not_run() {
        let mut config = EngineConfig::default();
        config.distribution.radix_base = 1;
        let mut session = Session::new(config);

        let err = session.select(AlgorithmId::Radix, &[21.0, 13.0]).unwrap_err();
        assert!(matches!(err, TraceError::InvalidConfig { .. }));
        assert!(session.controller().is_none());
        assert_eq!(session.last_error(), Some(&err));
    }

    #[test]
    fn success_clears_previous_error() {
        let mut session = Session::default();
        assert!(session.select_named("nope", &[1.0]).is_err());
        assert!(matches!(
            session.last_error(),
            Some(TraceError::UnknownAlgorithm { .. })
        ));

        session.select_named("radix", &[12.0, 3.0]).unwrap();
        assert!(session.last_error().is_none());
        assert!(session.controller().is_some());

        session.clear();
        assert!(session.controller().is_none());
    }
}
