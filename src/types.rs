//! Core data types for setsplit
//!
//! These types represent the domain model and flow through the pipeline.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

// =============================================================================
// Tracklist entries
// =============================================================================

/// A work mixed into a segment, from a `w/ ` continuation line
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdditionalTrack {
    pub artist: String,
    pub title: String,
    /// Record label, empty when absent
    pub label: String,
}

/// One segment of the source recording
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrackDescriptor {
    /// Offset into the source, in seconds
    pub start_time: f64,
    /// End offset in seconds (set by the timeline resolver)
    pub end_time: f64,
    pub main_artist: String,
    pub main_title: String,
    /// Record label, empty when absent
    pub main_label: String,
    /// Works mixed into this segment, in tracklist order
    pub additional_tracks: Vec<AdditionalTrack>,
    /// 1-based position in the set (0 until filenames are assigned)
    pub position: usize,
    /// Destination file (empty until filenames are assigned)
    pub output_filename: PathBuf,
}

impl TrackDescriptor {
    /// Create a track opened at `start_time` with no end or filename yet
    pub fn new(
        start_time: f64,
        artist: impl Into<String>,
        title: impl Into<String>,
        label: impl Into<String>,
    ) -> Self {
        Self {
            start_time,
            end_time: 0.0,
            main_artist: artist.into(),
            main_title: title.into(),
            main_label: label.into(),
            additional_tracks: Vec::new(),
            position: 0,
            output_filename: PathBuf::new(),
        }
    }

    /// Length of the segment in seconds (negative or zero for an invalid range)
    pub fn duration(&self) -> f64 {
        self.end_time - self.start_time
    }

    /// Check the resolved range can be extracted
    pub fn has_valid_range(&self) -> bool {
        self.end_time > self.start_time
    }
}

// =============================================================================
// Run context
// =============================================================================

/// Output container selected on the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OutputMode {
    /// MP3 audio only
    Audio,
    /// H.264/AAC MP4
    Video,
}

impl OutputMode {
    /// File extension including the leading dot
    pub fn extension(self) -> &'static str {
        match self {
            OutputMode::Audio => ".mp3",
            OutputMode::Video => ".mp4",
        }
    }
}

impl std::fmt::Display for OutputMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputMode::Audio => write!(f, "audio"),
            OutputMode::Video => write!(f, "video"),
        }
    }
}

/// Run-scoped metadata shared read-only by every extraction job
#[derive(Debug, Clone)]
pub struct AlbumContext {
    /// Album title (first tracklist line unless overridden)
    pub album: String,
    /// Release year written to the `date` tag
    pub year: String,
    /// Total duration of the source in seconds
    pub total_duration: f64,
    pub mode: OutputMode,
    /// Source recording shared by all tracks
    pub input: PathBuf,
    pub output_dir: PathBuf,
}
