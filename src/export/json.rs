//! JSON manifest describing a split, for scripting and later re-tagging

use crate::error::{Result, SplitError};
use crate::extraction::{build_comment, build_title};
use crate::pipeline::SplitPlan;
use crate::types::{AdditionalTrack, OutputMode};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;
use tracing::info;

/// Manifest schema version
const SCHEMA_VERSION: &str = "1.0";

/// Top-level manifest structure
#[derive(Debug, Serialize, Deserialize)]
pub struct ManifestJson {
    /// Schema version for forward compatibility
    pub version: String,
    pub metadata: ManifestMetadata,
    pub tracks: Vec<TrackJson>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ManifestMetadata {
    /// setsplit version that generated this file
    pub generator_version: String,
    pub exported_at: String,
    pub album: String,
    pub year: String,
    pub mode: OutputMode,
    pub source: String,
    pub source_duration_seconds: f64,
    pub track_count: usize,
}

/// One planned output file
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrackJson {
    pub position: usize,
    pub file: String,
    pub start_seconds: f64,
    pub end_seconds: f64,
    pub artist: String,
    /// Tag title, including mixed-in titles
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub additional_tracks: Vec<AdditionalTrack>,
    pub comment: String,
}

/// Write the plan as JSON to `path`
pub fn write_manifest(plan: &SplitPlan, path: &Path) -> Result<()> {
    let manifest = build_manifest(plan);

    let file = File::create(path).map_err(|e| SplitError::output_dir(path, e))?;
    let writer = BufWriter::new(file);
    serde_json::to_writer_pretty(writer, &manifest)
        .map_err(|e| SplitError::output_dir(path, std::io::Error::other(e)))?;

    info!("Wrote manifest for {} tracks to {}", manifest.tracks.len(), path.display());
    Ok(())
}

/// Read a manifest back (for tooling and tests)
pub fn read_manifest(path: &Path) -> Result<ManifestJson> {
    let file = File::open(path)?;
    serde_json::from_reader(BufReader::new(file)).map_err(|e| SplitError::Io(std::io::Error::other(e)))
}

fn build_manifest(plan: &SplitPlan) -> ManifestJson {
    let context = &plan.context;
    let tracks: Vec<TrackJson> = plan
        .tracks
        .iter()
        .map(|t| TrackJson {
            position: t.position,
            file: t
                .output_filename
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default(),
            start_seconds: t.start_time,
            end_seconds: t.end_time,
            artist: t.main_artist.clone(),
            title: build_title(t),
            label: (!t.main_label.is_empty()).then(|| t.main_label.clone()),
            additional_tracks: t.additional_tracks.clone(),
            comment: build_comment(t),
        })
        .collect();

    ManifestJson {
        version: SCHEMA_VERSION.to_string(),
        metadata: ManifestMetadata {
            generator_version: env!("CARGO_PKG_VERSION").to_string(),
            exported_at: chrono::Utc::now().to_rfc3339(),
            album: context.album.clone(),
            year: context.year.clone(),
            mode: context.mode,
            source: context.input.display().to_string(),
            source_duration_seconds: context.total_duration,
            track_count: tracks.len(),
        },
        tracks,
    }
}
