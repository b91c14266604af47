//! Timeline resolution
//!
//! Fills in each track's end boundary and output filename once the whole
//! ordered list is known.

use crate::types::TrackDescriptor;
use std::path::Path;

/// Characters removed from artist and title before they become filenames
const FORBIDDEN_FILENAME_CHARS: &[char] = &['<', '>', ':', '"', '/', '\\', '|', '?', '*'];

/// Set every track's end to the next track's start; the last track ends at
/// `total_duration`.
///
/// Out-of-order start times produce non-positive ranges here; those are
/// rejected when the track is extracted.
pub fn resolve_end_times(tracks: &mut [TrackDescriptor], total_duration: f64) {
    let next_starts: Vec<f64> = tracks
        .iter()
        .skip(1)
        .map(|t| t.start_time)
        .chain(std::iter::once(total_duration))
        .collect();

    for (track, end) in tracks.iter_mut().zip(next_starts) {
        track.end_time = end;
    }
}

/// Assign 1-based positions and `NN - Artist - Title<ext>` filenames under `output_dir`
pub fn create_filenames(tracks: &mut [TrackDescriptor], output_dir: &Path, extension: &str) {
    for (index, track) in tracks.iter_mut().enumerate() {
        track.position = index + 1;
        track.output_filename = output_dir.join(format!(
            "{:02} - {} - {}{}",
            track.position,
            sanitize_filename(&track.main_artist),
            sanitize_filename(&track.main_title),
            extension
        ));
    }
}

/// Delete characters that are not allowed in filenames on common platforms
pub fn sanitize_filename(name: &str) -> String {
    name.chars().filter(|c| !FORBIDDEN_FILENAME_CHARS.contains(c)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn tracks_at(starts: &[f64]) -> Vec<TrackDescriptor> {
        starts
            .iter()
            .enumerate()
            .map(|(i, &s)| TrackDescriptor::new(s, format!("Artist {i}"), format!("Title {i}"), ""))
            .collect()
    }

    #[test]
    fn test_end_times() {
        let mut tracks = tracks_at(&[0.0, 30.0, 90.0]);
        resolve_end_times(&mut tracks, 120.0);

        let ends: Vec<f64> = tracks.iter().map(|t| t.end_time).collect();
        assert_eq!(ends, vec![30.0, 90.0, 120.0]);
    }

    #[test]
    fn test_duplicate_start_yields_empty_range() {
        let mut tracks = tracks_at(&[0.0, 30.0, 30.0]);
        resolve_end_times(&mut tracks, 120.0);
        assert!(!tracks[1].has_valid_range());
        assert!(tracks[2].has_valid_range());
    }

    #[test]
    fn test_single_track_ends_at_duration() {
        let mut tracks = tracks_at(&[5.0]);
        resolve_end_times(&mut tracks, 65.5);
        assert_eq!(tracks[0].end_time, 65.5);
    }

    #[test]
    fn test_filenames_are_numbered_in_order() {
        let mut tracks = tracks_at(&[0.0, 30.0, 90.0]);
        create_filenames(&mut tracks, Path::new("output"), ".mp3");

        assert_eq!(tracks[0].output_filename, PathBuf::from("output/01 - Artist 0 - Title 0.mp3"));
        assert_eq!(tracks[2].output_filename, PathBuf::from("output/03 - Artist 2 - Title 2.mp3"));
        assert_eq!(tracks[2].position, 3);
    }

    #[test]
    fn test_filename_sanitized() {
        let mut tracks = vec![TrackDescriptor::new(0.0, "AC/DC", "What? <Live>: \"Mix\" *|\\", "")];
        create_filenames(&mut tracks, Path::new("out"), ".mp4");
        assert_eq!(tracks[0].output_filename, PathBuf::from("out/01 - ACDC - What Live Mix .mp4"));
    }

    #[test]
    fn test_sanitize_keeps_unicode() {
        assert_eq!(sanitize_filename("Tiësto"), "Tiësto");
        assert_eq!(sanitize_filename("a<>:\"/\\|?*b"), "ab");
    }
}
