//! Configuration for the normalization entry points.
//!
//! The ten rewrite stages have no knobs: their behaviour is fixed. What
//! [`NormalizeConfig`] controls is the harness around them: where to stop
//! (for diagnosing which stage produced a given artefact), whether to record
//! per-stage traces, and how large an input file the file-based entry points
//! accept.

use crate::error::NormalizeError;
use crate::pipeline::Stage;
use serde::{Deserialize, Serialize};

/// Default upper bound for file inputs: 8 MiB.
pub const DEFAULT_MAX_INPUT_BYTES: usize = 8 * 1024 * 1024;

/// Configuration for a normalization run.
///
/// Built via [`NormalizeConfig::builder()`] or using
/// [`NormalizeConfig::default()`].
///
/// # Example
/// ```rust
/// use edgequake_mathnorm::{NormalizeConfig, Stage};
///
/// let config = NormalizeConfig::builder()
///     .stop_after(Stage::MathRuns)
///     .trace_stages(true)
///     .build()
///     .unwrap();
/// assert_eq!(config.stop_after, Some(Stage::MathRuns));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NormalizeConfig {
    /// Halt the pipeline after this stage. Default: None (run every stage).
    ///
    /// Stage order is fixed, so stopping early yields exactly the
    /// intermediate text the next stage would have consumed.
    pub stop_after: Option<Stage>,

    /// Record a [`crate::output::StageTrace`] for every stage run. Default: true.
    pub trace_stages: bool,

    /// Largest input file accepted by [`crate::normalize_file`]. Default: 8 MiB.
    ///
    /// Several stages rescan the text and degrade to quadratic time on
    /// pathological input (long backslash runs, thousands of unmatched
    /// `\begin`). Chat-sized text is nowhere near this bound.
    pub max_input_bytes: usize,
}

impl Default for NormalizeConfig {
    fn default() -> Self {
        Self {
            stop_after: None,
            trace_stages: true,
            max_input_bytes: DEFAULT_MAX_INPUT_BYTES,
        }
    }
}

impl NormalizeConfig {
    /// Create a new builder for `NormalizeConfig`.
    pub fn builder() -> NormalizeConfigBuilder {
        NormalizeConfigBuilder {
            config: Self::default(),
        }
    }

    /// Whether the pipeline should halt once `stage` has run.
    pub fn stops_at(&self, stage: Stage) -> bool {
        self.stop_after == Some(stage)
    }
}

/// Builder for [`NormalizeConfig`].
#[derive(Debug)]
pub struct NormalizeConfigBuilder {
    config: NormalizeConfig,
}

impl NormalizeConfigBuilder {
    pub fn stop_after(mut self, stage: Stage) -> Self {
        self.config.stop_after = Some(stage);
        self
    }

    pub fn trace_stages(mut self, v: bool) -> Self {
        self.config.trace_stages = v;
        self
    }

    pub fn max_input_bytes(mut self, n: usize) -> Self {
        self.config.max_input_bytes = n;
        self
    }

    /// Build the configuration, validating constraints.
    pub fn build(self) -> Result<NormalizeConfig, NormalizeError> {
        if self.config.max_input_bytes == 0 {
            return Err(NormalizeError::InvalidConfig(
                "max_input_bytes must be ≥ 1".into(),
            ));
        }
        Ok(self.config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_runs_every_stage() {
        let c = NormalizeConfig::default();
        assert_eq!(c.stop_after, None);
        assert!(c.trace_stages);
        assert_eq!(c.max_input_bytes, DEFAULT_MAX_INPUT_BYTES);
        assert!(!Stage::ALL.iter().any(|&s| c.stops_at(s)));
    }

    #[test]
    fn builder_sets_fields() {
        let c = NormalizeConfig::builder()
            .stop_after(Stage::Rescan)
            .trace_stages(false)
            .max_input_bytes(512)
            .build()
            .unwrap();
        assert!(c.stops_at(Stage::Rescan));
        assert!(!c.stops_at(Stage::Parity));
        assert!(!c.trace_stages);
        assert_eq!(c.max_input_bytes, 512);
    }

    #[test]
    fn zero_input_limit_rejected() {
        let err = NormalizeConfig::builder()
            .max_input_bytes(0)
            .build()
            .unwrap_err();
        assert!(matches!(err, NormalizeError::InvalidConfig(_)));
    }

    #[test]
    fn config_serialises_stage_names() {
        let c = NormalizeConfig::builder()
            .stop_after(Stage::CjkText)
            .build()
            .unwrap();
        let json = serde_json::to_string(&c).unwrap();
        assert!(json.contains("\"cjk-text\""), "got: {json}");
        let back: NormalizeConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back, c);
    }
}
