//! Stage 4: give LaTeX environments and `\left…\right` groups delimiters.
//!
//! Three sub-rules, in order:
//!
//! 1. `$\begin{X}…\end{X}$` is promoted to `$$…$$`; display environments
//!    do not render in inline mode.
//! 2. A bare `\begin{X}…\end{X}` in plain text is wrapped in `$$…$$`.
//! 3. A bare `\left…\right)` (or `]`, `}`) group in plain text is wrapped
//!    in `$…$`.
//!
//! Rules 2 and 3 only look at plain segments, so math the input already
//! delimited is never wrapped a second time.

use super::delimiters::{map_plain, split_segments, MathKind, Segment};
use once_cell::sync::Lazy;
use regex::{Captures, Regex};

static RE_BEGIN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\\begin\{([^}]+)\}").unwrap());

static RE_LEFT_RIGHT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)\\left.*?\\right[)}\]]").unwrap());

/// Apply the three environment/group rules in sequence.
pub fn wrap_environments(input: &str) -> String {
    let s = promote_inline_environments(input);
    let s = wrap_bare_environments(&s);
    wrap_left_right_groups(&s)
}

/// `$ \begin{X}…\end{X} $` → `$$ \begin{X}…\end{X} $$`.
pub fn promote_inline_environments(input: &str) -> String {
    split_segments(input)
        .into_iter()
        .map(|segment| match segment {
            Segment::Math {
                kind: MathKind::Inline,
                ..
            } if is_whole_environment(segment.inner()) => format!("$${}$$", segment.inner()),
            _ => segment.as_str().to_string(),
        })
        .collect()
}

/// True when `content`, trimmed, is one `\begin{X}…\end{X}` with matching names.
fn is_whole_environment(content: &str) -> bool {
    let trimmed = content.trim();
    let Some(caps) = RE_BEGIN.captures(trimmed) else {
        return false;
    };
    let Some(begin) = caps.get(0) else {
        return false;
    };
    let end_tag = format!("\\end{{{}}}", &caps[1]);
    begin.start() == 0
        && trimmed.len() >= begin.end() + end_tag.len()
        && trimmed.ends_with(&end_tag)
}

/// Wrap each undelimited `\begin{X}…\end{X}` in `$$`.
///
/// The span ends at the first `\end{X}` whose name matches the opening
/// `\begin{X}`; differently named environments nested inside ride along.
/// A `\begin` without its `\end` is left as it is.
pub fn wrap_bare_environments(input: &str) -> String {
    map_plain(input, |plain| {
        let mut out = String::with_capacity(plain.len() + 8);
        let mut rest = plain;

        while let Some(caps) = RE_BEGIN.captures(rest) {
            let Some(begin) = caps.get(0) else {
                break;
            };
            let end_tag = format!("\\end{{{}}}", &caps[1]);

            match rest[begin.end()..].find(&end_tag) {
                Some(offset) => {
                    let stop = begin.end() + offset + end_tag.len();
                    out.push_str(&rest[..begin.start()]);
                    out.push_str("$$");
                    out.push_str(&rest[begin.start()..stop]);
                    out.push_str("$$");
                    rest = &rest[stop..];
                }
                None => {
                    out.push_str(&rest[..begin.end()]);
                    rest = &rest[begin.end()..];
                }
            }
        }

        out.push_str(rest);
        out
    })
}

/// Wrap each undelimited `\left…\right)` group in `$`.
pub fn wrap_left_right_groups(input: &str) -> String {
    map_plain(input, |plain| {
        RE_LEFT_RIGHT
            .replace_all(plain, |caps: &Captures<'_>| format!("${}$", &caps[0]))
            .into_owned()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inline_environment_promoted() {
        let input = r"见 $ \begin{pmatrix} 1 \end{pmatrix} $ 。";
        assert_eq!(
            promote_inline_environments(input),
            r"见 $$ \begin{pmatrix} 1 \end{pmatrix} $$ 。"
        );
    }

    #[test]
    fn test_inline_non_environment_kept() {
        let input = r"$x + \begin{pmatrix} 1 \end{pmatrix}$";
        assert_eq!(promote_inline_environments(input), input);
    }

    #[test]
    fn test_mismatched_names_not_promoted() {
        let input = r"$\begin{a} x \end{b}$";
        assert_eq!(promote_inline_environments(input), input);
    }

    #[test]
    fn test_bare_environment_wrapped() {
        let input = r"解得 \begin{cases} x=1 \\ y=2 \end{cases} 所以";
        assert_eq!(
            wrap_bare_environments(input),
            r"解得 $$\begin{cases} x=1 \\ y=2 \end{cases}$$ 所以"
        );
    }

    #[test]
    fn test_nested_other_environment_rides_along() {
        let input = r"\begin{align} \begin{matrix} a \end{matrix} \end{align}";
        assert_eq!(wrap_bare_environments(input), format!("$${input}$$"));
    }

    #[test]
    fn test_delimited_environment_not_rewrapped() {
        let input = r"$$ x = \begin{cases} 1 \end{cases} $$";
        assert_eq!(wrap_environments(input), input);
    }

    #[test]
    fn test_unterminated_begin_left_alone() {
        let input = r"\begin{cases} x and \begin{cases} y";
        assert_eq!(wrap_bare_environments(input), input);
    }

    #[test]
    fn test_left_right_group() {
        assert_eq!(
            wrap_left_right_groups(r"值为 \left( \frac{1}{2} \right) 。"),
            r"值为 $\left( \frac{1}{2} \right)$ 。"
        );
        assert_eq!(
            wrap_left_right_groups(r"\left[ a \right]"),
            r"$\left[ a \right]$"
        );
    }

    #[test]
    fn test_left_right_inside_math_untouched() {
        let input = r"$\left( x \right)$";
        assert_eq!(wrap_left_right_groups(input), input);
    }

    #[test]
    fn test_promoted_environment_not_double_wrapped() {
        let input = r"$\begin{matrix} a \end{matrix}$";
        assert_eq!(
            wrap_environments(input),
            r"$$\begin{matrix} a \end{matrix}$$"
        );
    }
}
