//! Stage 3: collapse delimiter noise and convert bracket delimiters.
//!
//! After this stage the only math delimiters left in the text are `$` and
//! `$$`. Nothing here checks balance; the re-scan and parity stages repair
//! whatever this leaves unpaired.

use once_cell::sync::Lazy;
use regex::{NoExpand, Regex};

static RE_DOLLAR_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\${3,}").unwrap());

static RE_SPACED_PAIR: Lazy<Regex> = Lazy::new(|| Regex::new(r"\$\s*\$").unwrap());

/// Reduce `$` noise and rewrite `\[ \]` as `$$`, `\( \)` as `$`.
pub fn canonicalize_delimiters(input: &str) -> String {
    let s = RE_DOLLAR_RUN.replace_all(input, NoExpand("$$"));
    let s = RE_SPACED_PAIR.replace_all(&s, NoExpand("$$"));
    s.replace(r"\[", "$$")
        .replace(r"\]", "$$")
        .replace(r"\(", "$")
        .replace(r"\)", "$")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dollar_runs_collapse_to_block() {
        assert_eq!(canonicalize_delimiters("$$$x$$$$"), "$$x$$");
    }

    #[test]
    fn test_whitespace_separated_pair() {
        assert_eq!(canonicalize_delimiters("$ \n $x"), "$$x");
    }

    #[test]
    fn test_bracket_delimiters() {
        assert_eq!(canonicalize_delimiters(r"\[ x^2 \]"), "$$ x^2 $$");
        assert_eq!(canonicalize_delimiters(r"令 \(a>0\)"), "令 $a>0$");
    }

    #[test]
    fn test_unbalanced_brackets_still_converted() {
        assert_eq!(canonicalize_delimiters(r"\( a \( b"), "$ a $ b");
    }

    #[test]
    fn test_plain_text_untouched() {
        let input = r"cost is 5 \left( x \right)";
        assert_eq!(canonicalize_delimiters(input), input);
    }
}
