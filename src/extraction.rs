//! Extraction jobs
//!
//! Maps one resolved track plus the run context to a single ffmpeg
//! invocation. Pure: nothing here touches the filesystem or spawns processes,
//! and the time range is validated by the pipeline before the command runs.

use crate::types::{AlbumContext, OutputMode, TrackDescriptor};
use std::ffi::OsString;
use std::path::PathBuf;

/// Threads given to each ffmpeg process so parallel jobs don't oversubscribe
const FFMPEG_THREADS_PER_JOB: &str = "2";

/// Everything needed to cut and encode one track
#[derive(Debug, Clone, PartialEq)]
pub struct CommandSpec {
    /// Shared source recording
    pub input: PathBuf,
    /// Seek offset in seconds
    pub start: f64,
    /// Length to extract in seconds
    pub duration: f64,
    /// Mode-dependent encoder arguments
    pub codec_args: Vec<String>,
    /// Tags written to the output, in a fixed order
    pub metadata: Vec<(String, String)>,
    pub output: PathBuf,
}

impl CommandSpec {
    /// Look up a metadata value by key
    pub fn metadata_value(&self, key: &str) -> Option<&str> {
        self.metadata
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Render the ffmpeg argument list (program name excluded)
    pub fn to_args(&self) -> Vec<OsString> {
        let mut args: Vec<OsString> = vec![
            "-hide_banner".into(),
            "-nostdin".into(),
            "-v".into(),
            "warning".into(),
            "-ss".into(),
            format!("{:.6}", self.start).into(),
            "-i".into(),
            self.input.clone().into(),
            "-t".into(),
            format!("{:.6}", self.duration).into(),
            "-max_muxing_queue_size".into(),
            "1024".into(),
            "-threads".into(),
            FFMPEG_THREADS_PER_JOB.into(),
        ];

        args.extend(self.codec_args.iter().map(OsString::from));

        for (key, value) in &self.metadata {
            args.push("-metadata".into());
            args.push(format!("{}={}", key, value).into());
        }

        args.push("-y".into());
        args.push(self.output.clone().into());
        args
    }
}

/// Build the ffmpeg invocation for one track
pub fn build_invocation(track: &TrackDescriptor, context: &AlbumContext) -> CommandSpec {
    CommandSpec {
        input: context.input.clone(),
        start: track.start_time,
        duration: track.duration(),
        codec_args: codec_args(context.mode).iter().map(|s| s.to_string()).collect(),
        metadata: build_metadata(track, context),
        output: track.output_filename.clone(),
    }
}

/// Encoder settings per output mode
fn codec_args(mode: OutputMode) -> &'static [&'static str] {
    match mode {
        // VBR ~190 kbps
        OutputMode::Audio => &["-vn", "-c:a", "libmp3lame", "-q:a", "2"],
        OutputMode::Video => &[
            "-c:v", "libx264",
            "-preset", "veryfast",
            "-crf", "23",
            "-vsync", "cfr",
            // Baseline 3.0 plays on practically anything
            "-profile:v", "baseline",
            "-level", "3.0",
            "-tune", "fastdecode",
            "-c:a", "aac",
            "-b:a", "192k",
            "-ac", "2",
            "-ar", "48000",
            "-movflags", "+faststart",
        ],
    }
}

/// Tags for one track
pub fn build_metadata(track: &TrackDescriptor, context: &AlbumContext) -> Vec<(String, String)> {
    let mut metadata = vec![
        ("title".to_string(), build_title(track)),
        ("artist".to_string(), track.main_artist.clone()),
        ("album".to_string(), context.album.clone()),
        ("date".to_string(), context.year.clone()),
        ("comment".to_string(), build_comment(track)),
    ];

    if !track.main_label.is_empty() {
        metadata.push(("publisher".to_string(), track.main_label.clone()));
    }

    metadata
}

/// Main title followed by each mixed-in title, joined with ` / `
pub fn build_title(track: &TrackDescriptor) -> String {
    std::iter::once(track.main_title.as_str())
        .chain(track.additional_tracks.iter().map(|a| a.title.as_str()))
        .collect::<Vec<_>>()
        .join(" / ")
}

/// `Additional tracks: <artist> - <title> [<label>]; ...`
pub fn build_comment(track: &TrackDescriptor) -> String {
    let entries: Vec<String> = track
        .additional_tracks
        .iter()
        .map(|a| format!("{} - {} [{}]", a.artist, a.title, a.label))
        .collect();
    format!("Additional tracks: {}", entries.join("; "))
}
