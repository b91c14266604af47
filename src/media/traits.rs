//! Media tool abstraction
//!
//! The pipeline only needs two things from the outside world: the length of
//! the source, and a way to turn a [`CommandSpec`] into a file. Keeping this
//! behind a trait lets tests swap in a fake tool.

use crate::error::Result;
use crate::extraction::CommandSpec;
use crate::pipeline::CancellationToken;
use std::path::Path;

/// Probe + transcode backend
pub trait MediaTool: Send + Sync {
    /// Total duration of the media at `path`, in seconds
    ///
    /// Fails with `SplitError::Probe` if the file is missing or unreadable.
    fn probe_duration(&self, path: &Path) -> Result<f64>;

    /// Produce `spec.output` from the source
    ///
    /// Must stop the underlying process and return `SplitError::Cancelled`
    /// when `cancel` fires mid-run. Other failures are
    /// `SplitError::Invocation` carrying the tool's diagnostic output.
    fn transcode(&self, spec: &CommandSpec, cancel: &CancellationToken) -> Result<()>;

    /// Get the name of this tool (for logging)
    fn name(&self) -> &'static str;
}
