//! Stage 2: inline multiple-choice markers become Markdown list items.
//!
//! `(A) 甲 (B) 乙` and `A. 甲 B、乙` are both common in generated exam
//! answers; renderers show them run together on one line unless each option
//! starts its own list item. No `$` is involved, so this runs before any
//! delimiter handling.

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

// Group 1 is a `- ` already in front of the marker: such items are left as is.
static RE_PAREN_OPTION: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(- )?\n?\s*\(([A-D])\)\s*").unwrap());

static RE_DOTTED_OPTION: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(- )?\n?\s*([A-D])[.、]\s*").unwrap());

/// Rewrite `(X)` and `X.` / `X、` option markers (X in A–D) as list items.
///
/// Each item starts on a new line, except one at the very start of the
/// text. Markers that already follow `- ` are not rewritten again.
pub fn format_options(input: &str) -> String {
    let s = rewrite_markers(&RE_PAREN_OPTION, input, |letter| format!("({letter})"));
    rewrite_markers(&RE_DOTTED_OPTION, &s, |letter| format!("{letter}."))
}

fn rewrite_markers(re: &Regex, input: &str, marker: impl Fn(&str) -> String) -> String {
    re.replace_all(input, |caps: &Captures<'_>| {
        if caps.get(1).is_some() {
            return caps[0].to_string();
        }
        let item = format!("- {} ", marker(&caps[2]));
        if caps.get(0).is_some_and(|m| m.start() == 0) {
            item
        } else {
            format!("\n{item}")
        }
    })
    .into_owned()
}
