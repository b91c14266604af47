//! Run setup: everything that must succeed before the first track is cut
//!
//! Failures here abort the run; nothing has been written yet except a fresh
//! output directory.

use super::cancel::CancellationToken;
use crate::config::Settings;
use crate::error::{Result, SplitError};
use crate::media::MediaTool;
use crate::timeline;
use crate::tracklist;
use crate::types::{AlbumContext, TrackDescriptor};
use std::io::{self, BufRead, Write};
use std::path::Path;
use tracing::{debug, info};

/// Resolved tracks plus the context shared by their jobs
#[derive(Debug, Clone)]
pub struct SplitPlan {
    pub context: AlbumContext,
    /// Ordered, with end times and filenames assigned
    pub tracks: Vec<TrackDescriptor>,
}

/// Parse the tracklist, probe the source and resolve every track
pub fn plan(settings: &Settings, tool: &dyn MediaTool) -> Result<SplitPlan> {
    let parsed = tracklist::load(&settings.tracklist)?;
    let total_duration = tool.probe_duration(&settings.input)?;

    let album = settings.album.clone().unwrap_or(parsed.album);
    let context = AlbumContext {
        album,
        year: settings.year.clone(),
        total_duration,
        mode: settings.mode,
        input: settings.input.clone(),
        output_dir: settings.output_dir.clone(),
    };

    let mut tracks = parsed.tracks;
    timeline::resolve_end_times(&mut tracks, total_duration);
    timeline::create_filenames(&mut tracks, &settings.output_dir, settings.mode.extension());

    Ok(SplitPlan { context, tracks })
}

/// Create `dir` fresh, deleting an existing one only if `force` is set or
/// `confirm` agrees.
///
/// An interrupt that lands before or during the confirmation leaves the
/// directory untouched.
pub fn prepare_output_dir<F>(dir: &Path, force: bool, cancel: &CancellationToken, confirm: F) -> Result<()>
where
    F: FnOnce(&Path) -> io::Result<bool>,
{
    if cancel.is_cancelled() {
        return Err(SplitError::Interrupted);
    }

    if dir.exists() {
        let approved = force || confirm(dir).map_err(|e| SplitError::output_dir(dir, e))?;
        if cancel.is_cancelled() {
            return Err(SplitError::Interrupted);
        }
        if !approved {
            return Err(SplitError::Aborted(dir.to_path_buf()));
        }

        info!("Removing existing output directory {}", dir.display());
        std::fs::remove_dir_all(dir).map_err(|e| SplitError::output_dir(dir, e))?;
    }

    std::fs::create_dir_all(dir).map_err(|e| SplitError::output_dir(dir, e))?;
    debug!("Created output directory {}", dir.display());
    Ok(())
}

/// Ask on the terminal whether an existing output directory may be deleted
pub fn prompt_delete(dir: &Path) -> io::Result<bool> {
    let mut stderr = io::stderr();
    write!(stderr, "Output directory '{}' exists. Delete it? (y/n): ", dir.display())?;
    stderr.flush()?;

    let mut answer = String::new();
    io::stdin().lock().read_line(&mut answer)?;
    Ok(is_yes(&answer))
}

fn is_yes(answer: &str) -> bool {
    matches!(answer.trim().to_lowercase().as_str(), "y" | "yes")
}
