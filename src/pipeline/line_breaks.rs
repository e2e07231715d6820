//! Stage 7: single newlines become Markdown hard breaks.

/// Append two spaces before every newline that is neither part of a blank
/// line nor already a hard break.
pub fn normalize_line_breaks(input: &str) -> String {
    let mut out = String::with_capacity(input.len() + 16);
    let mut prev: Option<char> = None;
    let mut chars = input.chars().peekable();

    while let Some(c) = chars.next() {
        if c == '\n'
            && prev.is_some_and(|p| p != '\n')
            && chars.peek() != Some(&'\n')
            && !out.ends_with("  ")
        {
            out.push_str("  ");
        }
        out.push(c);
        prev = Some(c);
    }
    out
}
