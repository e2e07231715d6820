//! Result types returned by [`crate::normalize_with`] and the file entry points.

use crate::pipeline::Stage;
use serde::{Deserialize, Serialize};

/// Normalized text plus run statistics.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NormalizeOutput {
    /// The normalized text.
    pub text: String,
    /// Aggregate statistics for the run.
    pub stats: NormalizeStats,
    /// One entry per stage run, when `trace_stages` is enabled.
    pub stages: Vec<StageTrace>,
}

/// Aggregate statistics for one normalization run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NormalizeStats {
    pub input_bytes: usize,
    pub output_bytes: usize,
    /// `$…$` spans in the output.
    pub inline_spans: usize,
    /// `$$…$$` spans in the output.
    pub block_spans: usize,
    pub stages_run: usize,
    /// Stages whose output differed from their input.
    pub stages_changed: usize,
    pub duration_us: u64,
}

/// What one stage did to the text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StageTrace {
    pub stage: Stage,
    pub changed: bool,
    /// Byte length of the stage's output.
    pub output_bytes: usize,
}
