//! Conversion entrypoint.
//!
//! Most callers should use [`run`] (what the binary does) or [`convert`], which:
//!
//! - checks that the input directory exists (a missing directory is not an error)
//! - reads every matching CSV file into a [`ResultMapping`], keyed by base name
//! - writes the mapping as one pretty-printed JSON object
//! - optionally reports progress/failure/alerts to a [`ConversionObserver`]
//!
//! Any failure while reading or writing aborts the run. The output file is only touched after
//! every input file has been read successfully.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::error::{ConversionError, ConversionResult};
use crate::ingestion::csv::read_first_column_from_path;
use crate::ingestion::discovery::{base_name, discover_csv_files};
use crate::ingestion::observability::{
    ConversionContext, ConversionObserver, ConversionSeverity, ConversionStage, ConversionStats,
    FileStats, StdErrObserver,
};
use crate::types::ResultMapping;

/// Input directory read by default, relative to the working directory.
pub const DEFAULT_INPUT_DIR: &str = "data";
/// Output document written by default, relative to the working directory.
pub const DEFAULT_OUTPUT_PATH: &str = "tx.json";
/// File pattern matched inside the input directory by default.
pub const DEFAULT_PATTERN: &str = "*.csv";

/// Options controlling a conversion run.
///
/// [`Default`] gives the fixed conventions the binary uses.
#[derive(Clone)]
pub struct ConversionOptions {
    /// Directory scanned for input files.
    pub input_dir: PathBuf,
    /// Output JSON file (overwritten if it exists).
    pub output_path: PathBuf,
    /// Glob pattern for input file names, relative to `input_dir`.
    pub pattern: String,
    /// Optional observer for logging/alerts.
    pub observer: Option<Arc<dyn ConversionObserver>>,
    /// Severity threshold at which `on_alert` is invoked.
    pub alert_at_or_above: ConversionSeverity,
}

impl fmt::Debug for ConversionOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConversionOptions")
            .field("input_dir", &self.input_dir)
            .field("output_path", &self.output_path)
            .field("pattern", &self.pattern)
            .field("observer_set", &self.observer.is_some())
            .field("alert_at_or_above", &self.alert_at_or_above)
            .finish()
    }
}

impl Default for ConversionOptions {
    fn default() -> Self {
        Self {
            input_dir: PathBuf::from(DEFAULT_INPUT_DIR),
            output_path: PathBuf::from(DEFAULT_OUTPUT_PATH),
            pattern: DEFAULT_PATTERN.to_string(),
            observer: None,
            alert_at_or_above: ConversionSeverity::Critical,
        }
    }
}

/// Summary of a completed run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversionReport {
    /// Where the document was written.
    pub output_path: PathBuf,
    /// Counts for the run.
    pub stats: ConversionStats,
}

/// How a run ended, when it did not fail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConversionOutcome {
    /// The input directory does not exist; nothing was written.
    MissingInputDir {
        /// The directory that was expected.
        path: PathBuf,
    },
    /// The output document was written.
    Written(ConversionReport),
}

impl fmt::Display for ConversionOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingInputDir { path } => {
                write!(f, "Error: '{}' directory not found.", path.display())
            }
            Self::Written(report) => write!(
                f,
                "Processing complete. Output saved to '{}'.",
                report.output_path.display()
            ),
        }
    }
}

/// Run the conversion with the default conventions and print the outcome to stdout.
///
/// Events are logged to stderr through [`StdErrObserver`], including the failure that ends the
/// run, so callers need not print the returned error again. A missing input directory is reported
/// and returns `Ok(())`. Every other failure is returned to the caller.
pub fn run() -> ConversionResult<()> {
    run_with(&ConversionOptions {
        observer: Some(Arc::new(StdErrObserver)),
        ..Default::default()
    })
}

/// Same as [`run`], with explicit options.
pub fn run_with(options: &ConversionOptions) -> ConversionResult<()> {
    let outcome = convert(options)?;
    println!("{outcome}");
    Ok(())
}

/// Convert every CSV file in `options.input_dir` into one JSON document at
/// `options.output_path`.
///
/// When an observer is configured, this function reports:
///
/// - `on_missing_input` if the input directory does not exist
/// - `on_file_converted` per file, and `on_key_replaced` when a key repeats
/// - on failure, exactly one of `on_alert` (computed severity >= `options.alert_at_or_above`) or
///   `on_failure` (below the threshold)
/// - `on_output_written` after the write
///
/// # Examples
///
/// ```no_run
/// use csv_consolidate::convert::{convert, ConversionOptions, ConversionOutcome};
///
/// # fn main() -> Result<(), csv_consolidate::ConversionError> {
/// let opts = ConversionOptions {
///     input_dir: "exports".into(),
///     output_path: "exports.json".into(),
///     ..Default::default()
/// };
/// match convert(&opts)? {
///     ConversionOutcome::Written(report) => println!("keys={}", report.stats.keys),
///     ConversionOutcome::MissingInputDir { path } => println!("no {}", path.display()),
/// }
/// # Ok(())
/// # }
/// ```
pub fn convert(options: &ConversionOptions) -> ConversionResult<ConversionOutcome> {
    let input_dir = options.input_dir.as_path();
    if !input_dir.is_dir() {
        if let Some(obs) = options.observer.as_ref() {
            obs.on_missing_input(input_dir);
        }
        return Ok(ConversionOutcome::MissingInputDir {
            path: input_dir.to_path_buf(),
        });
    }

    let (mapping, stats) = build_mapping(options)?;

    let ctx = ConversionContext {
        path: options.output_path.clone(),
        stage: ConversionStage::Write,
    };
    observe(options, &ctx, write_mapping(&options.output_path, &mapping))?;

    if let Some(obs) = options.observer.as_ref() {
        obs.on_output_written(&options.output_path, stats);
    }

    Ok(ConversionOutcome::Written(ConversionReport {
        output_path: options.output_path.clone(),
        stats,
    }))
}

/// Read every matching file in `options.input_dir` into a [`ResultMapping`].
///
/// Does not check that the directory exists (a missing directory yields an empty mapping) and
/// does not write anything. Stops at the first file that fails.
pub fn build_mapping(options: &ConversionOptions) -> ConversionResult<(ResultMapping, ConversionStats)> {
    let discover_ctx = ConversionContext {
        path: options.input_dir.clone(),
        stage: ConversionStage::Discover,
    };
    let files = observe(
        options,
        &discover_ctx,
        discover_csv_files(&options.input_dir, &options.pattern),
    )?;

    let mut mapping = ResultMapping::new();
    let mut stats = ConversionStats::default();

    for path in files {
        let ctx = ConversionContext {
            path,
            stage: ConversionStage::Read,
        };
        let key = observe(options, &ctx, base_name(&ctx.path))?;
        let values = observe(options, &ctx, read_first_column_from_path(&ctx.path))?;
        let rows = values.len();

        if mapping.insert(key.as_str(), values).is_some() {
            stats.replaced_keys += 1;
            if let Some(obs) = options.observer.as_ref() {
                obs.on_key_replaced(&ctx, &key);
            }
        }
        stats.files += 1;

        if let Some(obs) = options.observer.as_ref() {
            obs.on_file_converted(&ctx, &key, FileStats { rows });
        }
    }

    stats.keys = mapping.len();
    stats.rows = mapping.value_count();
    Ok((mapping, stats))
}

/// Write `mapping` to `path` as a JSON object with 2-space indentation.
///
/// The document is serialized in memory first and written with a single call, replacing any
/// existing file.
pub fn write_mapping(path: impl AsRef<Path>, mapping: &ResultMapping) -> ConversionResult<()> {
    let bytes = serde_json::to_vec_pretty(mapping)?;
    fs::write(path, bytes)?;
    Ok(())
}

fn observe<T>(
    options: &ConversionOptions,
    ctx: &ConversionContext,
    result: ConversionResult<T>,
) -> ConversionResult<T> {
    if let (Some(obs), Err(e)) = (options.observer.as_ref(), &result) {
        let sev = severity_for_error(e);
        if sev >= options.alert_at_or_above {
            obs.on_alert(ctx, sev, e);
        } else {
            obs.on_failure(ctx, sev, e);
        }
    }
    result
}

/// Classify an error for observer callbacks; I/O-rooted failures are Critical.
pub fn severity_for_error(e: &ConversionError) -> ConversionSeverity {
    match e {
        ConversionError::Io(_) | ConversionError::Glob(_) => ConversionSeverity::Critical,
        ConversionError::Csv(err) => match err.kind() {
            ::csv::ErrorKind::Io(_) => ConversionSeverity::Critical,
            _ => ConversionSeverity::Error,
        },
        ConversionError::Json(err) if err.is_io() => ConversionSeverity::Critical,
        ConversionError::Json(_) => ConversionSeverity::Error,
        ConversionError::Pattern(_) | ConversionError::InvalidPath { .. } => ConversionSeverity::Error,
    }
}
