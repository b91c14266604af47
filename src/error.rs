//! Unified error types for setsplit
//!
//! Error strategy:
//! - Per-track errors (time range, ffmpeg failure, cancellation): counted, logged, batch continues
//! - Setup errors (flags, tracklist, probe, output directory, early interrupt): fatal, abort before extraction

use std::path::PathBuf;
use thiserror::Error;

/// Top-level error type for setsplit operations
#[derive(Debug, Error)]
pub enum SplitError {
    // =========================================================================
    // Per-track errors - count as a failure, siblings keep running
    // =========================================================================
    #[error("Invalid time range: start({start:.3}s) >= end({end:.3}s)\n  Tip: Check the tracklist for duplicate or out-of-order timestamps")]
    TimeRange { start: f64, end: f64 },

    #[error("ffmpeg exited with {status}\n{output}")]
    Invocation { status: String, output: String },

    #[error("Failed to launch '{program}': {reason}\n  Tip: Make sure ffmpeg is installed and on your PATH, or pass --ffmpeg")]
    Spawn { program: String, reason: String },

    #[error("Cancelled by interrupt")]
    Cancelled,

    // =========================================================================
    // Setup errors - abort the whole run
    // =========================================================================
    #[error("Tracklist line {line}: {reason}")]
    Parse { line: usize, reason: String },

    #[error("Cannot read tracklist '{path}': {reason}")]
    TracklistRead { path: PathBuf, reason: String },

    #[error("Failed to probe duration of '{path}': {reason}\n  Tip: Check the input exists and ffprobe can read it")]
    Probe { path: PathBuf, reason: String },

    #[error("Cannot prepare output directory '{path}': {reason}")]
    OutputDir { path: PathBuf, reason: String },

    #[error("Operation aborted: output directory '{0}' already exists")]
    Aborted(PathBuf),

    #[error("Interrupted before extraction started; output directory left untouched")]
    Interrupted,

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for setsplit operations
pub type Result<T> = std::result::Result<T, SplitError>;

impl SplitError {
    /// Returns true if this error belongs to a single track (counted, batch continues)
    pub fn is_track_failure(&self) -> bool {
        matches!(
            self,
            SplitError::TimeRange { .. }
                | SplitError::Invocation { .. }
                | SplitError::Spawn { .. }
                | SplitError::Cancelled
        )
    }

    /// Create a parse error for a 1-based line number
    pub fn parse(line: usize, reason: impl Into<String>) -> Self {
        SplitError::Parse {
            line,
            reason: reason.into(),
        }
    }

    /// Create an output directory error, checking for common issues
    pub fn output_dir(path: impl Into<PathBuf>, err: std::io::Error) -> Self {
        let path = path.into();
        let reason = match err.kind() {
            std::io::ErrorKind::PermissionDenied => {
                format!("Permission denied. Check that you have write access to {}", path.display())
            }
            std::io::ErrorKind::NotFound => {
                format!("Parent directory does not exist: {}", path.parent().map(|p| p.display().to_string()).unwrap_or_default())
            }
            _ => err.to_string(),
        };
        SplitError::OutputDir { path, reason }
    }
}
