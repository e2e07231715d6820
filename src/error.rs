//! Error types for the edgequake-mathnorm library.
//!
//! The normalization pipeline itself never fails: every malformed delimiter
//! sequence is repaired best-effort, never rejected. [`NormalizeError`] only
//! covers the surface around it, i.e. reading and writing files and
//! validating a [`crate::config::NormalizeConfig`].

use std::path::PathBuf;
use thiserror::Error;

/// All fatal errors returned by the edgequake-mathnorm library.
#[derive(Debug, Error)]
pub enum NormalizeError {
    // ── Input errors ──────────────────────────────────────────────────────
    /// Input file was not found at the given path.
    #[error("Input file not found: '{path}'\nCheck the path exists and is readable.")]
    FileNotFound { path: PathBuf },

    /// Process does not have read permission on the file.
    #[error("Permission denied reading '{path}'\nTry: chmod +r {path:?}")]
    PermissionDenied { path: PathBuf },

    /// Any other I/O failure while reading the input.
    #[error("Failed to read '{path}': {source}")]
    ReadFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The input file is not valid UTF-8 text.
    #[error("Input '{path}' is not valid UTF-8 text")]
    InvalidUtf8 { path: PathBuf },

    /// The input exceeds the configured size limit.
    #[error("Input '{path}' is {size} bytes, above the {limit}-byte limit")]
    InputTooLarge {
        path: PathBuf,
        size: u64,
        limit: usize,
    },

    // ── Output errors ─────────────────────────────────────────────────────
    /// Could not create or write the output file.
    #[error("Failed to write output file '{path}': {source}")]
    OutputWriteFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // ── Config errors ─────────────────────────────────────────────────────
    /// Builder validation failed, or a stage name did not parse.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

impl NormalizeError {
    /// Classify an I/O error raised while reading `path`.
    pub(crate) fn from_read(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        let path = path.into();
        match source.kind() {
            std::io::ErrorKind::NotFound => NormalizeError::FileNotFound { path },
            std::io::ErrorKind::PermissionDenied => NormalizeError::PermissionDenied { path },
            _ => NormalizeError::ReadFailed { path, source },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn input_too_large_display() {
        let e = NormalizeError::InputTooLarge {
            path: "big.md".into(),
            size: 2048,
            limit: 1024,
        };
        let msg = e.to_string();
        assert!(msg.contains("2048"), "got: {msg}");
        assert!(msg.contains("1024-byte"), "got: {msg}");
    }

    #[test]
    fn not_found_is_classified() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let e = NormalizeError::from_read("missing.md", io);
        assert!(matches!(e, NormalizeError::FileNotFound { .. }));
        assert!(e.to_string().contains("missing.md"));
    }

    #[test]
    fn other_io_errors_keep_source() {
        let io = std::io::Error::other("disk on fire");
        let e = NormalizeError::from_read("a.md", io);
        assert!(matches!(e, NormalizeError::ReadFailed { .. }));
        assert!(e.to_string().contains("disk on fire"));
    }

    #[test]
    fn invalid_config_display() {
        let e = NormalizeError::InvalidConfig("unknown stage 'foo'".into());
        assert!(e.to_string().contains("unknown stage"));
    }
}
