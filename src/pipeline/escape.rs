//! Stage 1: line endings and redundant escaping.
//!
//! Models frequently emit JSON-escaped LaTeX (`\\(x\\)`, `\\frac`), so every
//! doubled backslash is collapsed before any delimiter is interpreted.

/// Normalise line endings, trim, and collapse doubled backslashes.
///
/// Empty (or whitespace-only) input returns `""` straight away.
pub fn normalize_escapes(input: &str) -> String {
    let text = input.replace("\r\n", "\n").replace('\r', "\n");
    let text = text.trim();
    if text.is_empty() {
        return String::new();
    }

    let mut next = text
        .replace(r"\\[", r"\[")
        .replace(r"\\]", r"\]")
        .replace(r"\\(", r"\(")
        .replace(r"\\)", r"\)");

    // A single pass turns `\\\` into `\\`, so loop to a fixed point.
    while next.contains(r"\\") {
        next = next.replace(r"\\", "\\");
    }
    next
}
