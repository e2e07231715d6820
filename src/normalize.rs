//! Normalization entry points.
//!
//! [`normalize`] is the whole system for most callers: one string in, one
//! string out, no failure path. [`normalize_with`] runs the same stages but
//! reports what each of them did and can halt early. The file-based
//! functions add I/O (and therefore errors) around it.

use crate::config::NormalizeConfig;
use crate::error::NormalizeError;
use crate::output::{NormalizeOutput, NormalizeStats, StageTrace};
use crate::pipeline::delimiters::count_spans;
use crate::pipeline::Stage;
use std::path::Path;
use std::time::Instant;
use tracing::{debug, info, warn};

/// Normalize LLM-produced text so it only uses `$…$` / `$$…$$` delimiters.
///
/// Runs every stage of [`Stage::ALL`] in order. Empty input returns `""`
/// without running any stage.
///
/// # Example
/// ```rust
/// use edgequake_mathnorm::normalize;
///
/// assert_eq!(normalize(r"\[ x^2 \]"), "$$ x^2 $$");
/// assert_eq!(normalize("答案是$x=1$对吗"), "答案是 $x=1$ 对吗");
/// ```
pub fn normalize(input: &str) -> String {
    if input.is_empty() {
        return String::new();
    }
    Stage::ALL
        .iter()
        .fold(input.to_string(), |text, stage| stage.apply(&text))
}

/// Run the pipeline under `config`, returning the text with statistics.
///
/// With the default config, `normalize_with(s, &cfg).text == normalize(s)`.
pub fn normalize_with(input: &str, config: &NormalizeConfig) -> NormalizeOutput {
    let start = Instant::now();
    if input.is_empty() {
        return NormalizeOutput::default();
    }
    info!("Normalizing {} bytes", input.len());

    let mut text = input.to_string();
    let mut stages = Vec::new();
    let mut stages_run = 0;
    let mut stages_changed = 0;

    for stage in Stage::ALL {
        let next = stage.apply(&text);
        let changed = next != text;
        stages_run += 1;
        if changed {
            stages_changed += 1;
            debug!("Stage {}: {} → {} bytes", stage, text.len(), next.len());
        }
        if config.trace_stages {
            stages.push(StageTrace {
                stage,
                changed,
                output_bytes: next.len(),
            });
        }
        text = next;

        if config.stops_at(stage) {
            debug!("Stopping after stage {}", stage);
            break;
        }
    }

    let (inline_spans, block_spans) = count_spans(&text);
    let stats = NormalizeStats {
        input_bytes: input.len(),
        output_bytes: text.len(),
        inline_spans,
        block_spans,
        stages_run,
        stages_changed,
        duration_us: start.elapsed().as_micros() as u64,
    };
    info!(
        "Normalized {} → {} bytes ({} inline, {} block spans)",
        stats.input_bytes, stats.output_bytes, inline_spans, block_spans
    );

    NormalizeOutput {
        text,
        stats,
        stages,
    }
}

/// Read a UTF-8 file and normalize its content.
///
/// # Errors
/// Returns `Err(NormalizeError)` when the file cannot be read, is not
/// UTF-8, or exceeds `config.max_input_bytes`.
pub fn normalize_file(
    path: impl AsRef<Path>,
    config: &NormalizeConfig,
) -> Result<NormalizeOutput, NormalizeError> {
    let path = path.as_ref();
    let text = read_input(path, config.max_input_bytes)?;
    Ok(normalize_with(&text, config))
}

/// Normalize `input_path` and write the text to `output_path`.
///
/// The output is written to a sibling temp file first and then renamed, so
/// a failed run never leaves a half-written file behind.
pub fn normalize_to_file(
    input_path: impl AsRef<Path>,
    output_path: impl AsRef<Path>,
    config: &NormalizeConfig,
) -> Result<NormalizeStats, NormalizeError> {
    let output = normalize_file(input_path, config)?;
    write_atomic(output_path, &output.text)?;
    Ok(output.stats)
}

/// Write `contents` to `path` via a sibling temp file and a rename.
///
/// Parent directories are created as needed. If the rename fails the temp
/// file is removed again.
pub fn write_atomic(path: impl AsRef<Path>, contents: &str) -> Result<(), NormalizeError> {
    let path = path.as_ref();
    let write_err = |source| NormalizeError::OutputWriteFailed {
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(write_err)?;
    }

    let tmp_path = path.with_extension("mathnorm.tmp");
    std::fs::write(&tmp_path, contents).map_err(write_err)?;
    if let Err(e) = std::fs::rename(&tmp_path, path) {
        if let Err(cleanup) = std::fs::remove_file(&tmp_path) {
            warn!("Could not remove {}: {}", tmp_path.display(), cleanup);
        }
        return Err(write_err(e));
    }
    Ok(())
}

fn read_input(path: &Path, limit: usize) -> Result<String, NormalizeError> {
    let meta = std::fs::metadata(path).map_err(|e| NormalizeError::from_read(path, e))?;
    if meta.len() > limit as u64 {
        return Err(NormalizeError::InputTooLarge {
            path: path.to_path_buf(),
            size: meta.len(),
            limit,
        });
    }

    let bytes = std::fs::read(path).map_err(|e| NormalizeError::from_read(path, e))?;
    String::from_utf8(bytes).map_err(|_| NormalizeError::InvalidUtf8 {
        path: path.to_path_buf(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_input_skips_every_stage() {
        assert_eq!(normalize(""), "");
        let out = normalize_with("", &NormalizeConfig::default());
        assert_eq!(out.text, "");
        assert_eq!(out.stats.stages_run, 0);
        assert!(out.stages.is_empty());
    }

    #[test]
    fn normalize_with_default_matches_normalize() {
        let input = r"设 x^2+1=0，求解 \(y\) 与 $a+b \text{其中a为正数}$";
        let out = normalize_with(input, &NormalizeConfig::default());
        assert_eq!(out.text, normalize(input));
        assert_eq!(out.stats.stages_run, Stage::ALL.len());
        assert_eq!(out.stages.len(), Stage::ALL.len());
    }

    #[test]
    fn stop_after_halts_pipeline() {
        let config = NormalizeConfig::builder()
            .stop_after(Stage::Delimiters)
            .build()
            .unwrap();
        let out = normalize_with(r"\(x\)对", &config);
        assert_eq!(out.text, "$x$对");
        assert_eq!(out.stats.stages_run, 3);
        assert_eq!(out.stages.last().map(|t| t.stage), Some(Stage::Delimiters));
    }

    #[test]
    fn traces_can_be_disabled() {
        let config = NormalizeConfig::builder().trace_stages(false).build().unwrap();
        let out = normalize_with("$x$", &config);
        assert!(out.stages.is_empty());
        assert_eq!(out.stats.inline_spans, 1);
    }

    #[test]
    fn stage_traces_record_changes() {
        let out = normalize_with(r"\[a\]", &NormalizeConfig::default());
        let delimiters = out
            .stages
            .iter()
            .find(|t| t.stage == Stage::Delimiters)
            .unwrap();
        assert!(delimiters.changed);
        let spacing = out
            .stages
            .iter()
            .find(|t| t.stage == Stage::CjkSpacing)
            .unwrap();
        assert!(!spacing.changed);
        assert_eq!(out.stats.block_spans, 1);
    }
}
