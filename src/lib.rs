//! # edgequake-mathnorm
//!
//! Normalize LLM-generated text that mixes prose (often Chinese) with LaTeX
//! math into Markdown whose only math delimiters are `$…$` and `$$…$$`.
//!
//! ## Why this crate?
//!
//! Chat models produce math in every dialect at once: `\(x\)`, `\\[ … \\]`,
//! `$$$`, bare `x^2` with no delimiters, `\begin{cases}` floating in prose,
//! and `\text{中文}` inside inline math, which KaTeX cannot render. A
//! renderer given that text shows raw LaTeX or, worse, swallows half a
//! paragraph into math mode. This crate repairs the text best-effort and
//! never fails: a slightly imperfect but renderable result beats an error.
//!
//! ## Pipeline Overview
//!
//! ```text
//! text
//!  │
//!  ├─  1. Escapes       CRLF, trim, collapse `\\` to `\`
//!  ├─  2. Options       `(A) … (B) …` → list items
//!  ├─  3. Delimiters    `\[ \]` → `$$`, `\( \)` → `$`, `$$$` → `$$`
//!  ├─  4. Environments  `\begin…\end` → `$$…$$`, `\left…\right)` → `$…$`
//!  ├─  5. CJK text      `$a \text{中文}$` → `$a$ 中文`
//!  ├─  6. Math runs     `设 x^2+1=0，` → `设 $x^2+1=0$，`
//!  ├─  7. Line breaks   `\n` → `  \n`
//!  ├─  8. Re-scan       drop nested / stray delimiters
//!  ├─  9. Parity        drop a dangling last `$$` / `$`
//!  └─ 10. CJK spacing   `是$x$对` → `是 $x$ 对`
//! ```
//!
//! ## Quick Start
//!
//! ```rust
//! use edgequake_mathnorm::normalize;
//!
//! let md = normalize(r"设 x^2+1=0，求解 \(x\)");
//! assert_eq!(md, "设 $x^2+1=0$，求解 $x$");
//! ```
//!
//! ## Feature Flags
//!
//! | Feature | Default | Description |
//! |---------|---------|-------------|
//! | `cli`   | on      | Enables the `mathnorm` binary (clap + anyhow + tracing-subscriber) |

// ── Modules ──────────────────────────────────────────────────────────────

pub mod config;
pub mod error;
pub mod normalize;
pub mod output;
pub mod pipeline;

// ── Re-exports ───────────────────────────────────────────────────────────

pub use config::{NormalizeConfig, NormalizeConfigBuilder};
pub use error::NormalizeError;
pub use normalize::{normalize, normalize_file, normalize_to_file, normalize_with, write_atomic};
pub use output::{NormalizeOutput, NormalizeStats, StageTrace};
pub use pipeline::delimiters::MathKind;
pub use pipeline::Stage;
