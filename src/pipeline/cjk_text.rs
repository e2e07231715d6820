//! Stage 5: move Chinese `\text{…}` out of inline math.
//!
//! KaTeX-style renderers fail on CJK glyphs inside `\text{}` in math mode
//! (missing font metrics), so `$a+b \text{其中a为正数}$` is rewritten as
//! `$a+b$ 其中a为正数`: the math around each such command keeps its own
//! delimiters and the Chinese prose becomes plain text. Block spans are
//! left untouched.

use super::delimiters::{split_segments, MathKind, Segment};
use once_cell::sync::Lazy;
use regex::Regex;

static RE_CJK_TEXT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\\text\s*\{([^}]*[\x{4E00}-\x{9FFF}][^}]*)\}").unwrap()
});

/// Split every inline span that carries CJK `\text{}` into math/plain runs.
pub fn extract_cjk_text(input: &str) -> String {
    split_segments(input)
        .into_iter()
        .map(|segment| match segment {
            Segment::Math {
                kind: MathKind::Inline,
                ..
            } => split_inline_span(segment.inner())
                .unwrap_or_else(|| segment.as_str().to_string()),
            _ => segment.as_str().to_string(),
        })
        .collect()
}

/// Rebuild one inline span's content, or `None` if it has no CJK `\text{}`.
fn split_inline_span(content: &str) -> Option<String> {
    if !RE_CJK_TEXT.is_match(content) {
        return None;
    }

    let mut out = String::with_capacity(content.len() + 8);
    let mut last = 0;
    for caps in RE_CJK_TEXT.captures_iter(content) {
        let Some(whole) = caps.get(0) else {
            continue;
        };
        let before = content[last..whole.start()].trim();
        if !before.is_empty() {
            out.push('$');
            out.push_str(before);
            out.push_str("$ ");
        }
        out.push_str(caps[1].trim());
        out.push(' ');
        last = whole.end();
    }

    let remaining = content[last..].trim();
    if !remaining.is_empty() {
        out.push('$');
        out.push_str(remaining);
        out.push('$');
    }
    Some(out.trim().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trailing_chinese_text() {
        assert_eq!(
            extract_cjk_text(r"$a+b \text{其中a为正数}$"),
            "$a+b$ 其中a为正数"
        );
    }

    #[test]
    fn test_alternating_runs() {
        assert_eq!(
            extract_cjk_text(r"$x \text{ 当 } y \text{且} z$"),
            "$x$ 当 $y$ 且 $z$"
        );
    }

    #[test]
    fn test_only_chinese_text() {
        assert_eq!(extract_cjk_text(r"前$\text{中文}$后"), "前中文后");
    }

    #[test]
    fn test_latin_text_kept_in_math() {
        let input = r"$x \text{ if } y$";
        assert_eq!(extract_cjk_text(input), input);
    }

    #[test]
    fn test_block_spans_untouched() {
        let input = r"$$x \text{其中} y$$";
        assert_eq!(extract_cjk_text(input), input);
    }

    #[test]
    fn test_surrounding_text_preserved() {
        assert_eq!(
            extract_cjk_text(r"设 $n \text{为整数}$，则"),
            "设 $n$ 为整数，则"
        );
    }
}
