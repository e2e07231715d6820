//! Stage 10: keep CJK glyphs from touching a `$`.
//!
//! Some Markdown math tokenizers refuse to close `$…$` when the delimiter
//! is glued to a CJK character (`答案是$x=1$对吗`), so a space is inserted
//! on each such side.

use super::delimiters::is_cjk;

/// Insert a space between any `$` and an adjacent CJK character.
pub fn space_cjk_delimiters(input: &str) -> String {
    let mut out = String::with_capacity(input.len() + 8);
    let mut prev: Option<char> = None;
    let mut chars = input.chars().peekable();

    while let Some(c) = chars.next() {
        if c == '$' {
            if prev.is_some_and(is_cjk) {
                out.push(' ');
            }
            out.push(c);
            if chars.peek().copied().is_some_and(is_cjk) {
                out.push(' ');
            }
        } else {
            out.push(c);
        }
        prev = Some(c);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spaces_both_sides() {
        assert_eq!(space_cjk_delimiters("答案是$x=1$对吗"), "答案是 $x=1$ 对吗");
    }

    #[test]
    fn test_block_delimiters() {
        assert_eq!(space_cjk_delimiters("得$$x$$证毕"), "得 $$x$$ 证毕");
    }

    #[test]
    fn test_existing_space_and_punctuation() {
        let input = "答案是 $x$，对";
        assert_eq!(space_cjk_delimiters(input), input);
    }

    #[test]
    fn test_latin_neighbours_untouched() {
        let input = "a$x$b";
        assert_eq!(space_cjk_delimiters(input), input);
    }
}
