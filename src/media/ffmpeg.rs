//! ffmpeg / ffprobe backend

use super::process::run_cancellable;
use super::traits::MediaTool;
use crate::error::{Result, SplitError};
use crate::extraction::CommandSpec;
use crate::pipeline::CancellationToken;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use tracing::{debug, trace, warn};

/// Shells out to the ffmpeg and ffprobe binaries
#[derive(Debug, Clone)]
pub struct Ffmpeg {
    ffmpeg: PathBuf,
    ffprobe: PathBuf,
}

impl Ffmpeg {
    pub fn new(ffmpeg: impl Into<PathBuf>, ffprobe: impl Into<PathBuf>) -> Self {
        Self {
            ffmpeg: ffmpeg.into(),
            ffprobe: ffprobe.into(),
        }
    }
}

impl Default for Ffmpeg {
    fn default() -> Self {
        Self::new("ffmpeg", "ffprobe")
    }
}

impl MediaTool for Ffmpeg {
    fn probe_duration(&self, path: &Path) -> Result<f64> {
        let probe_error = |reason: String| SplitError::Probe {
            path: path.to_path_buf(),
            reason,
        };

        if !path.is_file() {
            return Err(probe_error("file not found".to_string()));
        }

        let output = Command::new(&self.ffprobe)
            .args(["-v", "error", "-show_entries", "format=duration", "-of", "default=noprint_wrappers=1:nokey=1"])
            .arg(path)
            .stdin(Stdio::null())
            .output()
            .map_err(|e| probe_error(format!("failed to run {}: {}", self.ffprobe.display(), e)))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(probe_error(format!("ffprobe exited with {}: {}", output.status, stderr.trim())));
        }

        let duration = parse_duration(&String::from_utf8_lossy(&output.stdout)).map_err(probe_error)?;
        debug!("Probed {}: {:.3}s", path.display(), duration);
        Ok(duration)
    }

    fn transcode(&self, spec: &CommandSpec, cancel: &CancellationToken) -> Result<()> {
        let mut command = Command::new(&self.ffmpeg);
        command.args(spec.to_args());
        trace!("Running {:?}", command);

        let result = run_cancellable(command, cancel).and_then(|output| {
            if output.status.success() {
                Ok(())
            } else {
                Err(SplitError::Invocation {
                    status: output.status.to_string(),
                    output: output.combined(),
                })
            }
        });

        if result.is_err() {
            remove_partial_output(&spec.output);
        }
        result
    }

    fn name(&self) -> &'static str {
        "ffmpeg"
    }
}

/// Parse ffprobe's bare `format=duration` output
pub fn parse_duration(stdout: &str) -> std::result::Result<f64, String> {
    let text = stdout.trim();
    let duration: f64 = text
        .parse()
        .map_err(|_| format!("unexpected ffprobe output '{}'", text))?;

    if !duration.is_finite() || duration <= 0.0 {
        return Err(format!("invalid duration {}", text));
    }
    Ok(duration)
}

/// Don't leave truncated tracks behind after a failed or killed encode
fn remove_partial_output(path: &Path) {
    match std::fs::remove_file(path) {
        Ok(()) => debug!("Removed partial output {}", path.display()),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
        Err(e) => warn!("Failed to remove partial output {}: {}", path.display(), e),
    }
}
