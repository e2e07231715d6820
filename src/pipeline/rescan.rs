//! Stage 8: one left-to-right pass that decides what is "inside math".
//!
//! Earlier stages rewrite locally and can leave globally inconsistent
//! delimiters behind, typically a `$` landing inside a `$$` block or a
//! `$$` opening inside an inline span. [`MathState`] tracks the two flags
//! explicitly and [`rescan_delimiters`] drops or shrinks whatever the
//! current state makes illegal. From here on the delimiter structure is
//! final apart from parity repair.

use super::delimiters::{delimiter_tokens, MathKind};
use tracing::trace;

/// Inline/block flags of the re-scan.
///
/// Both start `false`; well-formed input ends with both `false` again.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MathState {
    pub in_inline: bool,
    pub in_block: bool,
}

impl MathState {
    /// Advance over one delimiter token and return what to emit for it.
    ///
    /// * `$$` inside inline math closes the inline span and is emitted as `$`.
    /// * `$` inside block math is dropped.
    /// * Anything else toggles its own flag and is emitted unchanged.
    pub fn feed(&mut self, token: MathKind) -> Option<MathKind> {
        match token {
            MathKind::Block if self.in_inline => {
                self.in_inline = false;
                Some(MathKind::Inline)
            }
            MathKind::Block => {
                self.in_block = !self.in_block;
                Some(MathKind::Block)
            }
            MathKind::Inline if self.in_block => None,
            MathKind::Inline => {
                self.in_inline = !self.in_inline;
                Some(MathKind::Inline)
            }
        }
    }

    pub fn in_math(&self) -> bool {
        self.in_inline || self.in_block
    }
}

/// Re-emit `input` with every delimiter filtered through [`MathState`].
pub fn rescan_delimiters(input: &str) -> String {
    let mut state = MathState::default();
    let mut out = String::with_capacity(input.len());
    let mut last = 0;

    for token in delimiter_tokens(input) {
        let range = token.range();
        out.push_str(&input[last..range.start]);
        match state.feed(token.kind) {
            Some(kind) => out.push_str(kind.delimiter()),
            None => trace!("dropping stray '$' inside block math at byte {}", range.start),
        }
        last = range.end;
    }
    out.push_str(&input[last..]);

    if state.in_math() {
        trace!("re-scan ended inside math: {:?}", state);
    }
    out
}
