//! CLI binary for edgequake-mathnorm.
//!
//! A thin shim over the library crate that maps CLI flags
//! to `NormalizeConfig` and prints results.

use anyhow::{Context, Result};
use clap::Parser;
use edgequake_mathnorm::{normalize_with, NormalizeConfig, NormalizeOutput, Stage};
use std::io::{self, Read, Write};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

// ── ANSI colour helpers (no extra deps) ──────────────────────────────────────

fn green(s: &str) -> String {
    format!("\x1b[32m{s}\x1b[0m")
}
fn dim(s: &str) -> String {
    format!("\x1b[2m{s}\x1b[0m")
}
fn bold(s: &str) -> String {
    format!("\x1b[1m{s}\x1b[0m")
}

const AFTER_HELP: &str = r#"EXAMPLES:
  # Normalize a file (stdout)
  mathnorm answer.md

  # Normalize stdin into a file
  cat answer.md | mathnorm -o clean.md

  # Inspect the text as the math-run stage leaves it
  mathnorm --stop-after math-runs answer.md

  # JSON output with per-stage traces
  mathnorm --json answer.md > report.json

STAGES (in order):
  escapes, options, delimiters, environments, cjk-text,
  math-runs, line-breaks, rescan, parity, cjk-spacing

ENVIRONMENT VARIABLES:
  MATHNORM_OUTPUT          Default output file
  MATHNORM_STOP_AFTER      Default --stop-after stage
  RUST_LOG                 Log filter (overrides -v / -q)
"#;

/// Normalize LaTeX math delimiters in LLM-generated Markdown.
#[derive(Parser, Debug)]
#[command(
    name = "mathnorm",
    version,
    about = "Normalize LaTeX math delimiters in LLM-generated Markdown",
    long_about = "Rewrite text that mixes prose, CJK and LaTeX math so that it only uses \
$…$ and $$…$$ as math delimiters: converts \\( \\) and \\[ \\], wraps bare environments \
and sub/superscripts, lifts Chinese \\text{} out of math and repairs unbalanced delimiters.",
    color = clap::ColorChoice::Auto,
    after_long_help = AFTER_HELP
)]
struct Cli {
    /// Input file; `-` or omitted reads stdin.
    input: Option<PathBuf>,

    /// Write the normalized text to this file instead of stdout.
    #[arg(short, long, env = "MATHNORM_OUTPUT")]
    output: Option<PathBuf>,

    /// Halt the pipeline after this stage.
    #[arg(long, env = "MATHNORM_STOP_AFTER", value_enum)]
    stop_after: Option<StageArg>,

    /// Output structured JSON (NormalizeOutput) instead of text.
    #[arg(long, env = "MATHNORM_JSON")]
    json: bool,

    /// Print a one-line delimiter summary to stderr.
    #[arg(long)]
    stats: bool,

    /// Largest accepted input in bytes.
    #[arg(long, env = "MATHNORM_MAX_INPUT_BYTES",
          default_value_t = edgequake_mathnorm::config::DEFAULT_MAX_INPUT_BYTES)]
    max_input_bytes: usize,

    /// Enable DEBUG-level tracing logs.
    #[arg(short, long, env = "MATHNORM_VERBOSE")]
    verbose: bool,

    /// Suppress all output except errors.
    #[arg(short, long, env = "MATHNORM_QUIET")]
    quiet: bool,
}

#[derive(clap::ValueEnum, Clone, Copy, Debug)]
enum StageArg {
    Escapes,
    Options,
    Delimiters,
    Environments,
    CjkText,
    MathRuns,
    LineBreaks,
    Rescan,
    Parity,
    CjkSpacing,
}

impl From<StageArg> for Stage {
    fn from(v: StageArg) -> Self {
        match v {
            StageArg::Escapes => Stage::Escapes,
            StageArg::Options => Stage::Options,
            StageArg::Delimiters => Stage::Delimiters,
            StageArg::Environments => Stage::Environments,
            StageArg::CjkText => Stage::CjkText,
            StageArg::MathRuns => Stage::MathRuns,
            StageArg::LineBreaks => Stage::LineBreaks,
            StageArg::Rescan => Stage::Rescan,
            StageArg::Parity => Stage::Parity,
            StageArg::CjkSpacing => Stage::CjkSpacing,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // ── Logging setup ────────────────────────────────────────────────────
    let filter = if cli.verbose {
        "debug"
    } else if cli.quiet {
        "error"
    } else {
        "warn"
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_writer(io::stderr)
        .init();

    // ── Build config ─────────────────────────────────────────────────────
    let config = build_config(&cli)?;

    // ── Read input ───────────────────────────────────────────────────────
    let output = match cli.input.as_deref().filter(|p| p.as_os_str() != "-") {
        Some(path) => edgequake_mathnorm::normalize_file(path, &config)
            .with_context(|| format!("Failed to normalize {}", path.display()))?,
        None => {
            let text = read_stdin(config.max_input_bytes)?;
            normalize_with(&text, &config)
        }
    };

    // ── Emit ─────────────────────────────────────────────────────────────
    let rendered = if cli.json {
        serde_json::to_string_pretty(&output).context("Failed to serialise output")?
    } else {
        output.text.clone()
    };

    match cli.output {
        Some(ref path) => {
            edgequake_mathnorm::write_atomic(path, &ensure_newline(&rendered))
                .with_context(|| format!("Failed to write {}", path.display()))?;
            if !cli.quiet {
                eprintln!(
                    "{}  {} → {}",
                    green("✔"),
                    dim(&format!("{} bytes", output.stats.output_bytes)),
                    bold(&path.display().to_string()),
                );
            }
        }
        None => {
            let stdout = io::stdout();
            let mut handle = stdout.lock();
            handle
                .write_all(ensure_newline(&rendered).as_bytes())
                .context("Failed to write to stdout")?;
        }
    }

    if cli.stats && !cli.quiet {
        print_stats(&output);
    }

    Ok(())
}

/// Map CLI args to `NormalizeConfig`.
fn build_config(cli: &Cli) -> Result<NormalizeConfig> {
    let mut builder = NormalizeConfig::builder()
        .trace_stages(cli.json)
        .max_input_bytes(cli.max_input_bytes);
    if let Some(stage) = cli.stop_after {
        builder = builder.stop_after(stage.into());
    }
    builder.build().context("Invalid configuration")
}

/// Read at most `limit` bytes of stdin; anything beyond that is an error.
fn read_stdin(limit: usize) -> Result<String> {
    let mut bytes = Vec::new();
    io::stdin()
        .lock()
        .take(limit as u64 + 1)
        .read_to_end(&mut bytes)
        .context("Failed to read stdin")?;
    if bytes.len() > limit {
        anyhow::bail!("stdin is larger than the {limit}-byte limit");
    }
    String::from_utf8(bytes).context("stdin is not valid UTF-8")
}

fn ensure_newline(s: &str) -> String {
    if s.ends_with('\n') {
        s.to_string()
    } else {
        format!("{s}\n")
    }
}

fn print_stats(output: &NormalizeOutput) {
    let s = &output.stats;
    eprintln!(
        "{} inline  {} block  {}  {}",
        bold(&s.inline_spans.to_string()),
        bold(&s.block_spans.to_string()),
        dim(&format!(
            "{}/{} stages changed text",
            s.stages_changed, s.stages_run
        )),
        dim(&format!("{}µs", s.duration_us)),
    );
}
