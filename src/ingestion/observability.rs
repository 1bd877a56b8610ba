use std::fmt;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::time::{SystemTime, UNIX_EPOCH};

use crate::error::ConversionError;

/// Severity classification used for observer callbacks and alerting thresholds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ConversionSeverity {
    /// Informational event.
    Info,
    /// Warning-level event (non-fatal, e.g. a replaced key or missing input directory).
    Warning,
    /// Error-level event (the run failed).
    Error,
    /// Critical error (I/O or other infrastructure failures).
    Critical,
}

/// Which step of a run an event belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConversionStage {
    /// Enumerating the input directory.
    Discover,
    /// Reading one CSV file.
    Read,
    /// Writing the output document.
    Write,
}

/// Context about the path an event refers to.
#[derive(Debug, Clone)]
pub struct ConversionContext {
    /// Input file, input directory or output file, depending on `stage`.
    pub path: PathBuf,
    /// Stage the event happened in.
    pub stage: ConversionStage,
}

/// Stats reported for one converted file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FileStats {
    /// Number of values (non-empty rows) read from the file.
    pub rows: usize,
}

/// Stats for a whole run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ConversionStats {
    /// Files read.
    pub files: usize,
    /// Keys in the resulting document (fewer than `files` when keys were replaced).
    pub keys: usize,
    /// Values in the resulting document.
    pub rows: usize,
    /// Number of times a later file replaced an earlier entry.
    pub replaced_keys: usize,
}

/// Observer interface for conversion events.
///
/// Implementors can record metrics, logs, or trigger alerts. All methods default to no-ops.
pub trait ConversionObserver: Send + Sync {
    /// Called after a file has been read into the mapping.
    fn on_file_converted(&self, _ctx: &ConversionContext, _key: &str, _stats: FileStats) {}

    /// Called when a file's key was already present and its values replaced the earlier entry.
    fn on_key_replaced(&self, _ctx: &ConversionContext, _key: &str) {}

    /// Called when the input directory does not exist; nothing is written.
    fn on_missing_input(&self, _input_dir: &Path) {}

    /// Called when the run fails with a severity below the alert threshold.
    fn on_failure(&self, _ctx: &ConversionContext, _severity: ConversionSeverity, _error: &ConversionError) {}

    /// Called instead of [`Self::on_failure`] when a failure meets the alert threshold.
    ///
    /// Default behavior forwards to [`Self::on_failure`].
    fn on_alert(&self, ctx: &ConversionContext, severity: ConversionSeverity, error: &ConversionError) {
        self.on_failure(ctx, severity, error)
    }

    /// Called once the output document has been written.
    fn on_output_written(&self, _output: &Path, _stats: ConversionStats) {}
}

/// An observer that fans out callbacks to a list of observers.
#[derive(Default)]
pub struct CompositeObserver {
    observers: Vec<Arc<dyn ConversionObserver>>,
}

impl CompositeObserver {
    /// Create a new composite observer from a list of observers.
    pub fn new(observers: Vec<Arc<dyn ConversionObserver>>) -> Self {
        Self { observers }
    }
}

impl fmt::Debug for CompositeObserver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CompositeObserver")
            .field("observers_len", &self.observers.len())
            .finish()
    }
}

impl ConversionObserver for CompositeObserver {
    fn on_file_converted(&self, ctx: &ConversionContext, key: &str, stats: FileStats) {
        for o in &self.observers {
            o.on_file_converted(ctx, key, stats);
        }
    }

    fn on_key_replaced(&self, ctx: &ConversionContext, key: &str) {
        for o in &self.observers {
            o.on_key_replaced(ctx, key);
        }
    }

    fn on_missing_input(&self, input_dir: &Path) {
        for o in &self.observers {
            o.on_missing_input(input_dir);
        }
    }

    fn on_failure(&self, ctx: &ConversionContext, severity: ConversionSeverity, error: &ConversionError) {
        for o in &self.observers {
            o.on_failure(ctx, severity, error);
        }
    }

    fn on_alert(&self, ctx: &ConversionContext, severity: ConversionSeverity, error: &ConversionError) {
        for o in &self.observers {
            o.on_alert(ctx, severity, error);
        }
    }

    fn on_output_written(&self, output: &Path, stats: ConversionStats) {
        for o in &self.observers {
            o.on_output_written(output, stats);
        }
    }
}

/// Logs conversion events to stderr.
#[derive(Debug, Default)]
pub struct StdErrObserver;

impl ConversionObserver for StdErrObserver {
    fn on_file_converted(&self, ctx: &ConversionContext, key: &str, stats: FileStats) {
        eprintln!(
            "[convert][ok] path={} key={} rows={}",
            ctx.path.display(),
            key,
            stats.rows
        );
    }

    fn on_key_replaced(&self, ctx: &ConversionContext, key: &str) {
        eprintln!(
            "[convert][{:?}] path={} key={} replaced earlier entry",
            ConversionSeverity::Warning,
            ctx.path.display(),
            key
        );
    }

    fn on_missing_input(&self, input_dir: &Path) {
        eprintln!(
            "[convert][{:?}] input directory missing path={}",
            ConversionSeverity::Warning,
            input_dir.display()
        );
    }

    fn on_failure(&self, ctx: &ConversionContext, severity: ConversionSeverity, error: &ConversionError) {
        eprintln!(
            "[convert][{:?}] stage={:?} path={} err={}",
            severity,
            ctx.stage,
            ctx.path.display(),
            error
        );
    }

    fn on_alert(&self, ctx: &ConversionContext, severity: ConversionSeverity, error: &ConversionError) {
        eprintln!(
            "[ALERT][convert][{:?}] stage={:?} path={} err={}",
            severity,
            ctx.stage,
            ctx.path.display(),
            error
        );
    }

    fn on_output_written(&self, output: &Path, stats: ConversionStats) {
        eprintln!(
            "[convert][done] output={} files={} keys={} rows={}",
            output.display(),
            stats.files,
            stats.keys,
            stats.rows
        );
    }
}

/// Appends conversion events to a local log file.
#[derive(Debug)]
pub struct FileObserver {
    path: PathBuf,
    lock: Mutex<()>,
}

impl FileObserver {
    /// Create a file observer that appends events to `path`.
    ///
    /// Writes are best-effort; failures to open/write the log file are ignored.
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            lock: Mutex::new(()),
        }
    }

    fn append_line(&self, line: &str) {
        let _guard = self.lock.lock().ok();
        if let Ok(mut f) = OpenOptions::new().create(true).append(true).open(&self.path) {
            let _ = writeln!(f, "{line}");
        }
    }
}

impl ConversionObserver for FileObserver {
    fn on_file_converted(&self, ctx: &ConversionContext, key: &str, stats: FileStats) {
        self.append_line(&format!(
            "{} ok path={} key={} rows={}",
            unix_ts(),
            ctx.path.display(),
            key,
            stats.rows
        ));
    }

    fn on_key_replaced(&self, ctx: &ConversionContext, key: &str) {
        self.append_line(&format!(
            "{} replaced path={} key={}",
            unix_ts(),
            ctx.path.display(),
            key
        ));
    }

    fn on_missing_input(&self, input_dir: &Path) {
        self.append_line(&format!("{} missing input={}", unix_ts(), input_dir.display()));
    }

    fn on_failure(&self, ctx: &ConversionContext, severity: ConversionSeverity, error: &ConversionError) {
        self.append_line(&format!(
            "{} fail severity={:?} stage={:?} path={} err={}",
            unix_ts(),
            severity,
            ctx.stage,
            ctx.path.display(),
            error
        ));
    }

    fn on_alert(&self, ctx: &ConversionContext, severity: ConversionSeverity, error: &ConversionError) {
        self.append_line(&format!(
            "{} ALERT severity={:?} stage={:?} path={} err={}",
            unix_ts(),
            severity,
            ctx.stage,
            ctx.path.display(),
            error
        ));
    }

    fn on_output_written(&self, output: &Path, stats: ConversionStats) {
        self.append_line(&format!(
            "{} done output={} files={} keys={} rows={}",
            unix_ts(),
            output.display(),
            stats.files,
            stats.keys,
            stats.rows
        ));
    }
}

fn unix_ts() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs()
}
