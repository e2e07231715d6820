//! Delimiter vocabulary shared by the rewrite stages.
//!
//! Two views of the same `$` characters are needed:
//!
//! * **Segments** ([`split_segments`]): the text cut into plain runs and
//!   explicitly delimited math spans. Stages that must only touch
//!   undelimited text (environment wrapping, math-run detection) work on
//!   the plain segments and copy math segments verbatim.
//! * **Tokens** ([`delimiter_tokens`]): every `$$` and lone `$` in order,
//!   with `$$` always read as one token. The re-scan and parity stages
//!   reason about these.
//!
//! `$` is ASCII, so every offset produced here is a valid UTF-8 boundary.

use serde::{Deserialize, Serialize};
use std::ops::Range;

/// Kind of a math span.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MathKind {
    /// `$…$`
    Inline,
    /// `$$…$$`
    Block,
}

impl MathKind {
    pub fn delimiter(self) -> &'static str {
        match self {
            MathKind::Inline => "$",
            MathKind::Block => "$$",
        }
    }
}

/// A piece of text produced by [`split_segments`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Segment<'a> {
    /// Text outside any delimited span.
    Plain(&'a str),
    /// A delimited span; `raw` includes both delimiters.
    Math { kind: MathKind, raw: &'a str },
}

impl<'a> Segment<'a> {
    /// The segment exactly as it appears in the source text.
    pub fn as_str(&self) -> &'a str {
        match *self {
            Segment::Plain(s) => s,
            Segment::Math { raw, .. } => raw,
        }
    }

    /// Content without delimiters (plain segments are returned whole).
    pub fn inner(&self) -> &'a str {
        match *self {
            Segment::Plain(s) => s,
            Segment::Math { kind, raw } => {
                let d = kind.delimiter().len();
                &raw[d..raw.len() - d]
            }
        }
    }
}

/// Split `text` into plain and delimited segments.
///
/// At `$$` the span runs to the next `$$`; at a single `$` it runs to the
/// next `$` (which may be the first half of a `$$`). An opener without a
/// closer stays in the surrounding plain segment.
pub fn split_segments(text: &str) -> Vec<Segment<'_>> {
    let bytes = text.as_bytes();
    let mut segments = Vec::new();
    let mut plain_start = 0;
    let mut i = 0;

    while i < bytes.len() {
        if bytes[i] != b'$' {
            i += 1;
            continue;
        }

        let kind = if bytes.get(i + 1) == Some(&b'$') {
            MathKind::Block
        } else {
            MathKind::Inline
        };
        let delim = kind.delimiter();
        let body_start = i + delim.len();

        match text[body_start..].find(delim) {
            Some(offset) => {
                let end = body_start + offset + delim.len();
                if plain_start < i {
                    segments.push(Segment::Plain(&text[plain_start..i]));
                }
                segments.push(Segment::Math {
                    kind,
                    raw: &text[i..end],
                });
                i = end;
                plain_start = end;
            }
            None => i = body_start,
        }
    }

    if plain_start < text.len() {
        segments.push(Segment::Plain(&text[plain_start..]));
    }
    segments
}

/// Rewrite every plain segment with `f`, copying math segments verbatim.
pub fn map_plain(text: &str, mut f: impl FnMut(&str) -> String) -> String {
    let mut out = String::with_capacity(text.len() + 16);
    for segment in split_segments(text) {
        match segment {
            Segment::Plain(s) => out.push_str(&f(s)),
            Segment::Math { raw, .. } => out.push_str(raw),
        }
    }
    out
}

/// Count `(inline, block)` delimited spans in `text`.
pub fn count_spans(text: &str) -> (usize, usize) {
    split_segments(text)
        .iter()
        .fold((0, 0), |(inline, block), segment| match segment {
            Segment::Math {
                kind: MathKind::Inline,
                ..
            } => (inline + 1, block),
            Segment::Math {
                kind: MathKind::Block,
                ..
            } => (inline, block + 1),
            Segment::Plain(_) => (inline, block),
        })
}

/// A `$` or `$$` occurrence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token {
    pub start: usize,
    pub kind: MathKind,
}

impl Token {
    pub fn range(&self) -> Range<usize> {
        self.start..self.start + self.kind.delimiter().len()
    }
}

/// Every delimiter token in `text`, left to right; `$$` is one token.
pub fn delimiter_tokens(text: &str) -> Vec<Token> {
    let bytes = text.as_bytes();
    let mut tokens = Vec::new();
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'$' {
            let kind = if bytes.get(i + 1) == Some(&b'$') {
                MathKind::Block
            } else {
                MathKind::Inline
            };
            tokens.push(Token { start: i, kind });
            i += kind.delimiter().len();
        } else {
            i += 1;
        }
    }
    tokens
}

/// CJK Unified Ideographs, U+4E00–U+9FFF.
pub fn is_cjk(c: char) -> bool {
    ('\u{4E00}'..='\u{9FFF}').contains(&c)
}

/// Characters that end an implicit math run: newline and sentence or clause
/// punctuation in Chinese and Latin scripts.
pub fn is_boundary(c: char) -> bool {
    matches!(
        c,
        '\n' | '。' | '；' | '，' | '、' | '：' | '.' | '?' | '!'
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(text: &str) -> Vec<&'static str> {
        split_segments(text)
            .iter()
            .map(|s| match s {
                Segment::Plain(_) => "plain",
                Segment::Math {
                    kind: MathKind::Inline,
                    ..
                } => "inline",
                Segment::Math {
                    kind: MathKind::Block,
                    ..
                } => "block",
            })
            .collect()
    }

    #[test]
    fn segments_cover_the_whole_text() {
        let text = "设 $x$ 与 $$y = 1$$ 之后";
        let joined: String = split_segments(text).iter().map(|s| s.as_str()).collect();
        assert_eq!(joined, text);
        assert_eq!(kinds(text), ["plain", "inline", "plain", "block", "plain"]);
    }

    #[test]
    fn segment_inner_strips_delimiters() {
        let segs = split_segments("$$a+b$$");
        assert_eq!(segs.len(), 1);
        assert_eq!(segs[0].inner(), "a+b");
        let segs = split_segments("$c$");
        assert_eq!(segs[0].inner(), "c");
    }

    #[test]
    fn unmatched_opener_stays_plain() {
        assert_eq!(kinds("price is $5"), ["plain"]);
        assert_eq!(kinds("$$ open $x$"), ["plain", "inline"]);
        assert_eq!(split_segments("$$ open $x$")[0].as_str(), "$$ open ");
    }

    #[test]
    fn inline_closes_on_first_dollar_of_a_pair() {
        let segs = split_segments("$a$$");
        assert_eq!(segs[0].as_str(), "$a$");
        assert_eq!(segs[1], Segment::Plain("$"));
    }

    #[test]
    fn map_plain_leaves_math_alone() {
        let out = map_plain("ab $ab$ ab", |s| s.to_uppercase());
        assert_eq!(out, "AB $ab$ AB");
    }

    #[test]
    fn count_spans_by_kind() {
        assert_eq!(count_spans("$a$ $$b$$ $c$ d"), (2, 1));
        assert_eq!(count_spans("no math"), (0, 0));
    }

    #[test]
    fn tokens_pair_double_dollars() {
        let tokens = delimiter_tokens("$$$a$");
        let kinds: Vec<MathKind> = tokens.iter().map(|t| t.kind).collect();
        assert_eq!(kinds, [MathKind::Block, MathKind::Inline, MathKind::Inline]);
        assert_eq!(tokens[0].range(), 0..2);
        assert_eq!(tokens[2].start, 4);
    }

    #[test]
    fn cjk_and_boundary_predicates() {
        assert!(is_cjk('中'));
        assert!(!is_cjk('a'));
        assert!(!is_cjk('，'));
        assert!(is_boundary('，'));
        assert!(is_boundary('\n'));
        assert!(!is_boundary(','));
        assert!(!is_boundary(':'));
    }
}
