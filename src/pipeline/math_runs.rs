//! Stage 6: wrap math the source never delimited.
//!
//! Models routinely write `设 x^2+1=0，求解` or `其中 \alpha 为常数` with no
//! delimiters at all. Inside plain segments this stage:
//!
//! 1. wraps every leftover `\text{…}` command in `$…$`;
//! 2. scans left to right and, at a backslash, `^`, `_`, or an ASCII
//!    alphanumeric directly followed by `^`/`_`, opens an implicit run that
//!    extends to the next boundary character (newline or sentence/clause
//!    punctuation), trims it and wraps it in `$…$`.
//!
//! Stopping at punctuation keeps the surrounding prose out of math mode.

use super::delimiters::{is_boundary, map_plain};
use once_cell::sync::Lazy;
use regex::{Captures, Regex};

static RE_TEXT_COMMAND: Lazy<Regex> = Lazy::new(|| Regex::new(r"\\text\s*\{[^}]*\}").unwrap());

/// Wrap implicit math runs in every plain segment of `input`.
pub fn wrap_math_runs(input: &str) -> String {
    map_plain(input, |plain| {
        let with_text = RE_TEXT_COMMAND
            .replace_all(plain, |caps: &Captures<'_>| format!("${}$", &caps[0]));
        scan_plain(&with_text)
    })
}

/// Whether an implicit math run starts at `chars[i]`.
fn starts_run(chars: &[char], i: usize) -> bool {
    match chars[i] {
        '\\' | '^' | '_' => true,
        c => c.is_ascii_alphanumeric() && matches!(chars.get(i + 1), Some('^' | '_')),
    }
}

fn scan_plain(text: &str) -> String {
    let chars: Vec<char> = text.chars().collect();
    let mut out = String::with_capacity(text.len() + 8);
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];

        // Explicit span (e.g. a wrapped `\text{}`): copy through its closer.
        if c == '$' {
            let block = chars.get(i + 1) == Some(&'$');
            let step = if block { 2 } else { 1 };
            let start = i;
            i += step;
            while i < chars.len() {
                if chars[i] == '$' && (!block || chars.get(i + 1) == Some(&'$')) {
                    i += step;
                    break;
                }
                i += 1;
            }
            out.extend(&chars[start..i]);
            continue;
        }

        if starts_run(&chars, i) {
            let end = chars[i..]
                .iter()
                .position(|&ch| is_boundary(ch))
                .map_or(chars.len(), |offset| i + offset);
            // A `$` swallowed by the run would nest a delimiter inside it.
            let run: String = chars[i..end].iter().filter(|&&ch| ch != '$').collect();
            out.push('$');
            out.push_str(run.trim());
            out.push('$');
            i = end;
            continue;
        }

        out.push(c);
        i += 1;
    }

    out
}
