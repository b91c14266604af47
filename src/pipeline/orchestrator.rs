//! Pipeline orchestration
//!
//! Coordinates tracklist parsing, timeline resolution, output directory
//! setup and bounded-parallel extraction. Tracks are spawned onto a
//! [`MAX_WORKERS`]-thread Rayon pool, and a job must also hold a capacity
//! slot (and so an ffmpeg process) before it starts.

use super::cancel::CancellationToken;
use super::capacity::CapacityPool;
use super::setup::{self, SplitPlan};
use crate::config::Settings;
use crate::error::{Result, SplitError};
use crate::export;
use crate::extraction::build_invocation;
use crate::media::MediaTool;
use crate::types::{AlbumContext, TrackDescriptor};
use indicatif::{ProgressBar, ProgressStyle};
use std::io;
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Instant;
use tracing::{debug, error, info, warn};

/// Concurrent ffmpeg processes. ffmpeg is already multi-threaded, so this
/// stays small regardless of track count.
pub const MAX_WORKERS: usize = 4;

/// Manifest file written next to the tracks when enabled
pub const MANIFEST_FILE_NAME: &str = "tracklist.json";

/// Pipeline result summary
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PipelineResult {
    pub total: usize,
    pub succeeded: usize,
    pub failed: usize,
    /// Never started because the run was cancelled (or dry run)
    pub skipped: usize,
}

/// Terminal state of one track's job
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum JobOutcome {
    Succeeded,
    Failed,
    Skipped,
}

#[derive(Debug, Default)]
struct Counters {
    succeeded: AtomicUsize,
    failed: AtomicUsize,
    skipped: AtomicUsize,
}

impl Counters {
    fn record(&self, outcome: JobOutcome) {
        let counter = match outcome {
            JobOutcome::Succeeded => &self.succeeded,
            JobOutcome::Failed => &self.failed,
            JobOutcome::Skipped => &self.skipped,
        };
        counter.fetch_add(1, Ordering::Relaxed);
    }

    fn summary(&self, total: usize) -> PipelineResult {
        PipelineResult {
            total,
            succeeded: self.succeeded.load(Ordering::Relaxed),
            failed: self.failed.load(Ordering::Relaxed),
            skipped: self.skipped.load(Ordering::Relaxed),
        }
    }
}

/// Run the full split: plan, prepare the output directory, extract.
///
/// `confirm_delete` is asked before an existing output directory is removed
/// (unless `settings.force`). Any error returned here is a setup failure;
/// individual track failures are only counted in the result.
pub fn run<F>(
    settings: &Settings,
    tool: &dyn MediaTool,
    cancel: &CancellationToken,
    confirm_delete: F,
) -> Result<PipelineResult>
where
    F: FnOnce(&Path) -> io::Result<bool>,
{
    let pipeline_start = Instant::now();

    // Phase 1: Plan
    let plan = setup::plan(settings, tool)?;
    if cancel.is_cancelled() {
        return Err(SplitError::Interrupted);
    }
    info!(
        "Parsed tracklist '{}': {} tracks, {:.0}s of source",
        plan.context.album,
        plan.tracks.len(),
        plan.context.total_duration
    );

    if settings.dry_run {
        return Ok(run_dry_run(&plan));
    }

    // Phase 2: Output directory (before any extraction starts)
    setup::prepare_output_dir(&settings.output_dir, settings.force, cancel, confirm_delete)?;

    if settings.write_manifest {
        let manifest_path = settings.output_dir.join(MANIFEST_FILE_NAME);
        export::write_manifest(&plan, &manifest_path)?;
    }

    // Phase 3: Extraction
    let result = extract_all(plan.tracks, &plan.context, tool, cancel, settings.show_progress)?;

    info!(
        "Total pipeline time: {:.2}s",
        pipeline_start.elapsed().as_secs_f64()
    );

    Ok(result)
}

/// Extract every track with at most [`MAX_WORKERS`] running at once.
///
/// Each track is owned by exactly one job. Tracks that have not started when
/// `cancel` fires are skipped; running ones are asked to stop. Only fails if
/// the worker pool cannot be built.
pub fn extract_all(
    tracks: Vec<TrackDescriptor>,
    context: &AlbumContext,
    tool: &dyn MediaTool,
    cancel: &CancellationToken,
    show_progress: bool,
) -> Result<PipelineResult> {
    let total = tracks.len();
    let workers = build_worker_pool(MAX_WORKERS)?;
    let pool = CapacityPool::new(MAX_WORKERS);
    let progress = progress_bar(total, show_progress);
    let counters = Counters::default();
    let start = Instant::now();

    info!(
        "Extracting {} tracks ({} mode) with up to {} parallel {} jobs",
        total,
        context.mode,
        pool.capacity(),
        tool.name()
    );

    workers.scope(|scope| {
        for track in tracks {
            let (pool, progress, counters) = (&pool, &progress, &counters);
            scope.spawn(move |_| {
                let outcome = run_job(track, context, tool, pool, cancel, progress);
                counters.record(outcome);
            });
        }
    });

    let result = counters.summary(total);

    if cancel.is_cancelled() {
        progress.abandon_with_message("Interrupted");
        warn!(
            "Interrupted: {} tracks finished, {} never started",
            result.succeeded + result.failed,
            result.skipped
        );
    } else {
        progress.finish_with_message("Extraction complete");
    }

    info!(
        "Extraction finished in {:.2}s: {} succeeded, {} failed, {} skipped",
        start.elapsed().as_secs_f64(),
        result.succeeded,
        result.failed,
        result.skipped
    );

    if result.failed > 0 {
        error!(error_count = result.failed, "Completed with errors");
    }

    Ok(result)
}

/// Dedicated Rayon pool for extraction jobs
///
/// Local rather than global so repeated runs in one process each get their
/// own bounded set of threads.
fn build_worker_pool(num_threads: usize) -> Result<rayon::ThreadPool> {
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(num_threads)
        .thread_name(|i| format!("setsplit-worker-{}", i))
        .build()
        .map_err(|e| SplitError::Config(format!("Failed to configure worker pool: {}", e)))?;
    debug!("Configured worker pool with {} threads", num_threads);
    Ok(pool)
}

/// Validate and extract a single track
///
/// Rejects non-positive ranges without launching anything.
pub fn extract_track(
    track: &TrackDescriptor,
    context: &AlbumContext,
    tool: &dyn MediaTool,
    cancel: &CancellationToken,
) -> Result<()> {
    if !track.has_valid_range() {
        return Err(SplitError::TimeRange {
            start: track.start_time,
            end: track.end_time,
        });
    }

    let spec = build_invocation(track, context);
    tool.transcode(&spec, cancel)
}

/// One unit of work: wait for a slot, extract, release, report
fn run_job(
    track: TrackDescriptor,
    context: &AlbumContext,
    tool: &dyn MediaTool,
    pool: &CapacityPool,
    cancel: &CancellationToken,
    progress: &ProgressBar,
) -> JobOutcome {
    let Some(slot) = pool.acquire(cancel) else {
        debug!("Skipping track {} '{}': cancelled before start", track.position, track.main_title);
        return JobOutcome::Skipped;
    };

    debug!(
        "Extracting track {} '{}' ({:.3}s - {:.3}s)",
        track.position, track.main_title, track.start_time, track.end_time
    );
    let result = extract_track(&track, context, tool, cancel);
    drop(slot);

    progress.inc(1);

    match result {
        Ok(()) => {
            progress.set_message(track.main_title.clone());
            debug!("Wrote {}", track.output_filename.display());
            JobOutcome::Succeeded
        }
        Err(e) => {
            error!(
                position = track.position,
                track = %track.main_title,
                error = %e,
                "Track processing failed"
            );
            JobOutcome::Failed
        }
    }
}

fn progress_bar(total: usize, visible: bool) -> ProgressBar {
    if !visible {
        return ProgressBar::hidden();
    }

    let pb = ProgressBar::new(total as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({percent}%) {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("=>-"),
    );
    pb
}

/// Dry run mode - show the split plan without touching the filesystem
fn run_dry_run(plan: &SplitPlan) -> PipelineResult {
    println!();
    println!("=== DRY RUN MODE ===");
    println!();
    println!("Album:  {}", plan.context.album);
    println!("Source: {} ({})", plan.context.input.display(), format_time(plan.context.total_duration));
    println!("Mode:   {}", plan.context.mode);
    println!();

    for track in &plan.tracks {
        let marker = if track.has_valid_range() { " " } else { "!" };
        println!(
            "{} [{} - {}] {}",
            marker,
            format_time(track.start_time),
            format_time(track.end_time),
            track.output_filename.display()
        );
        for additional in &track.additional_tracks {
            println!("      w/ {} - {}", additional.artist, additional.title);
        }
    }

    let invalid = plan.tracks.iter().filter(|t| !t.has_valid_range()).count();
    println!();
    println!("Would create {} files in {}", plan.tracks.len() - invalid, plan.context.output_dir.display());
    if invalid > 0 {
        println!("{} tracks have an empty or negative time range and would fail (marked !)", invalid);
    }
    println!();

    PipelineResult {
        total: plan.tracks.len(),
        succeeded: 0,
        failed: 0,
        skipped: plan.tracks.len(), // All "skipped" in dry run mode
    }
}

/// `H:MM:SS` for display
fn format_time(seconds: f64) -> String {
    let total = seconds.max(0.0).round() as u64;
    format!("{}:{:02}:{:02}", total / 3600, (total / 60) % 60, total % 60)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_time() {
        assert_eq!(format_time(0.0), "0:00:00");
        assert_eq!(format_time(3723.4), "1:02:03");
        assert_eq!(format_time(59.6), "0:01:00");
    }

    #[test]
    fn test_worker_pool_is_bounded() {
        let pool = build_worker_pool(MAX_WORKERS).unwrap();
        assert_eq!(pool.current_num_threads(), MAX_WORKERS);
    }

    #[test]
    fn test_counters_summary() {
        let counters = Counters::default();
        counters.record(JobOutcome::Succeeded);
        counters.record(JobOutcome::Failed);
        counters.record(JobOutcome::Skipped);
        counters.record(JobOutcome::Skipped);

        assert_eq!(
            counters.summary(4),
            PipelineResult {
                total: 4,
                succeeded: 1,
                failed: 1,
                skipped: 2
            }
        );
    }
}
