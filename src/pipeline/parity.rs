//! Stage 9: drop one dangling delimiter of each kind.
//!
//! If the number of `$$` tokens is odd the last one is removed; then, if the
//! number of lone `$` tokens is odd, the last lone `$` is removed. This is a
//! best-effort repair: with several unmatched delimiters, or a stray one in
//! the middle of the text, it can remove the wrong one. Renderers fail open
//! on leftovers, so that is acceptable.

use super::delimiters::{delimiter_tokens, MathKind, Token};
use tracing::warn;

/// Remove the last `$$` and/or last lone `$` when their counts are odd.
pub fn balance_parity(input: &str) -> String {
    let tokens = delimiter_tokens(input);
    let block_odd = count(&tokens, MathKind::Block) % 2 == 1;
    let inline_odd = count(&tokens, MathKind::Inline) % 2 == 1;

    let mut text = input.to_string();
    if block_odd {
        remove_last(&mut text, MathKind::Block);
    }
    if inline_odd {
        remove_last(&mut text, MathKind::Inline);
    }
    text
}

fn count(tokens: &[Token], kind: MathKind) -> usize {
    tokens.iter().filter(|t| t.kind == kind).count()
}

fn remove_last(text: &mut String, kind: MathKind) {
    let last = delimiter_tokens(text)
        .into_iter()
        .rev()
        .find(|t| t.kind == kind);
    if let Some(token) = last {
        warn!(
            "Removing unmatched '{}' at byte {}",
            kind.delimiter(),
            token.start
        );
        text.replace_range(token.range(), "");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trailing_inline_removed() {
        assert_eq!(balance_parity("价格是 $x$ 和 $5"), "价格是 $x$ 和 5");
    }

    #[test]
    fn test_even_blocks_preserved() {
        let input = "$$a$$ text $$b$$";
        assert_eq!(balance_parity(input), input);
    }

    #[test]
    fn test_odd_block_removes_last() {
        assert_eq!(balance_parity("$$a$$ b $$"), "$$a$$ b ");
    }

    #[test]
    fn test_lone_dollar_never_taken_from_a_pair() {
        assert_eq!(balance_parity("$a $$b$$"), "a $$b$$");
    }

    #[test]
    fn test_both_kinds_repaired() {
        assert_eq!(balance_parity("$$x$$ $$ $y$ $"), "$$x$$  $y$ ");
    }
}
