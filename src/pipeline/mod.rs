//! Rewrite stages for math-delimiter normalization.
//!
//! Each submodule implements exactly one transformation step as a pure
//! `&str → String` function. Stages are composed in a fixed order by
//! [`crate::normalize()`]; each one assumes the delimiter form produced by
//! its predecessor, so the order is part of the contract.
//!
//! ## Data Flow
//!
//! ```text
//! escape ──▶ options ──▶ canonical ──▶ environment ──▶ cjk_text
//!                                                         │
//! spacing ◀── parity ◀── rescan ◀── line_breaks ◀── math_runs
//! ```
//!
//! 1. [`escape`]      — CRLF → LF, trim, collapse doubled backslashes
//! 2. [`options`]     — `(A)` / `A.` multiple-choice markers → list items
//! 3. [`canonical`]   — `$$$`, `$ $`, `\[ \]`, `\( \)` → `$$` / `$`
//! 4. [`environment`] — wrap `\begin…\end` in `$$`, `\left…\right` in `$`
//! 5. [`cjk_text`]    — lift `\text{中文}` out of inline math
//! 6. [`math_runs`]   — wrap undelimited commands and sub/superscripts
//! 7. [`line_breaks`] — single newlines become hard breaks
//! 8. [`rescan`]      — drop delimiters that nest illegally
//! 9. [`parity`]      — strip a dangling last `$$` / `$`
//! 10. [`spacing`]    — space between `$` and an adjacent CJK character
//!
//! [`delimiters`] holds the vocabulary the stages share (segment splitting,
//! delimiter tokens, CJK and boundary predicates).

pub mod canonical;
pub mod cjk_text;
pub mod delimiters;
pub mod environment;
pub mod escape;
pub mod line_breaks;
pub mod math_runs;
pub mod options;
pub mod parity;
pub mod rescan;
pub mod spacing;

use crate::error::NormalizeError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// One step of the normalization pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Stage {
    Escapes,
    Options,
    Delimiters,
    Environments,
    CjkText,
    MathRuns,
    LineBreaks,
    Rescan,
    Parity,
    CjkSpacing,
}

impl Stage {
    /// Every stage, in the order the pipeline runs them.
    pub const ALL: [Stage; 10] = [
        Stage::Escapes,
        Stage::Options,
        Stage::Delimiters,
        Stage::Environments,
        Stage::CjkText,
        Stage::MathRuns,
        Stage::LineBreaks,
        Stage::Rescan,
        Stage::Parity,
        Stage::CjkSpacing,
    ];

    /// Stable kebab-case name, as used by the CLI and in serialised output.
    pub fn name(self) -> &'static str {
        match self {
            Stage::Escapes => "escapes",
            Stage::Options => "options",
            Stage::Delimiters => "delimiters",
            Stage::Environments => "environments",
            Stage::CjkText => "cjk-text",
            Stage::MathRuns => "math-runs",
            Stage::LineBreaks => "line-breaks",
            Stage::Rescan => "rescan",
            Stage::Parity => "parity",
            Stage::CjkSpacing => "cjk-spacing",
        }
    }

    /// Run this stage alone on `input`.
    pub fn apply(self, input: &str) -> String {
        match self {
            Stage::Escapes => escape::normalize_escapes(input),
            Stage::Options => options::format_options(input),
            Stage::Delimiters => canonical::canonicalize_delimiters(input),
            Stage::Environments => environment::wrap_environments(input),
            Stage::CjkText => cjk_text::extract_cjk_text(input),
            Stage::MathRuns => math_runs::wrap_math_runs(input),
            Stage::LineBreaks => line_breaks::normalize_line_breaks(input),
            Stage::Rescan => rescan::rescan_delimiters(input),
            Stage::Parity => parity::balance_parity(input),
            Stage::CjkSpacing => spacing::space_cjk_delimiters(input),
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Stage {
    type Err = NormalizeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase().replace('_', "-");
        Stage::ALL
            .into_iter()
            .find(|stage| stage.name() == wanted)
            .ok_or_else(|| NormalizeError::InvalidConfig(format!("unknown stage '{s}'")))
    }
}
