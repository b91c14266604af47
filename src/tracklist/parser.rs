//! Tracklist parsing
//!
//! Turns classified lines into an ordered list of [`TrackDescriptor`]s.
//! Malformed track-start lines abort the parse; malformed or orphaned
//! continuation lines are dropped.

use super::lexer::{classify, Entry, Line};
use crate::error::{Result, SplitError};
use crate::types::{AdditionalTrack, TrackDescriptor};
use thiserror::Error;
use tracing::debug;

/// Seconds per field, rightmost field first
const FIELD_WEIGHTS: [f64; 3] = [1.0, 60.0, 3600.0];

/// Artist/title separator
const ARTIST_TITLE_SEPARATOR: &str = " - ";

/// Problem with a single piece of a line
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LineError {
    #[error("invalid timestamp '{0}': expected MM:SS or HH:MM:SS")]
    Timestamp(String),

    #[error("invalid artist/title format: '{0}'")]
    ArtistTitle(String),
}

/// Result of parsing a whole tracklist
#[derive(Debug, Clone)]
pub struct ParsedTracklist {
    /// First non-empty line of the file
    pub album: String,
    /// Tracks in the order they were opened
    pub tracks: Vec<TrackDescriptor>,
}

/// Parse tracklist text into the album title and ordered tracks
pub fn parse(text: &str) -> Result<ParsedTracklist> {
    let mut lines = text.lines().enumerate();

    let album = lines
        .by_ref()
        .map(|(_, line)| line.trim())
        .find(|line| !line.is_empty())
        .ok_or_else(|| SplitError::parse(1, "tracklist is empty (expected an album title line)"))?
        .to_string();

    let mut tracks = Vec::new();
    let mut open: Option<TrackDescriptor> = None;

    for (index, raw) in lines {
        let line_no = index + 1;

        match classify(raw) {
            Line::Blank => {}
            Line::TrackStart { timestamp, entry } => {
                let start = parse_timestamp(timestamp).map_err(|e| SplitError::parse(line_no, e.to_string()))?;
                let (artist, title) =
                    split_artist_title(entry.body).map_err(|e| SplitError::parse(line_no, e.to_string()))?;

                if let Some(previous) = open.replace(TrackDescriptor::new(start, artist, title, entry.label)) {
                    tracks.push(previous);
                }
            }
            Line::StageAnnouncement { timestamp } => {
                debug!("Line {}: skipping stage announcement at [{}]", line_no, timestamp);
            }
            Line::Continuation(entry) => match open.as_mut() {
                Some(track) => match additional_track(entry) {
                    Ok(additional) => track.additional_tracks.push(additional),
                    Err(e) => debug!("Line {}: dropping continuation ({})", line_no, e),
                },
                None => debug!("Line {}: dropping continuation before first track", line_no),
            },
            Line::Unrecognized(text) => {
                debug!("Line {}: ignoring unrecognized line '{}'", line_no, text);
            }
        }
    }

    tracks.extend(open);

    if tracks.is_empty() {
        return Err(SplitError::parse(
            text.lines().count().max(1),
            "no tracks found (expected lines like '[00:00] Artist - Title')",
        ));
    }

    debug!("Parsed {} tracks for '{}'", tracks.len(), album);

    Ok(ParsedTracklist { album, tracks })
}

/// Convert `SS`, `MM:SS` or `HH:MM:SS` into seconds.
///
/// Fields are weighted from the right (seconds, minutes, hours) and need not
/// be zero-padded.
pub fn parse_timestamp(ts: &str) -> std::result::Result<f64, LineError> {
    let fields: Vec<&str> = ts.trim().split(':').collect();
    if fields.len() > FIELD_WEIGHTS.len() {
        return Err(LineError::Timestamp(ts.to_string()));
    }

    fields
        .iter()
        .rev()
        .zip(FIELD_WEIGHTS)
        .try_fold(0.0, |total, (field, weight)| {
            if field.is_empty() || !field.bytes().all(|b| b.is_ascii_digit()) {
                return Err(LineError::Timestamp(ts.to_string()));
            }
            let value: u64 = field.parse().map_err(|_| LineError::Timestamp(ts.to_string()))?;
            Ok(total + value as f64 * weight)
        })
}

/// Split `<artist> - <title>` on the first separator
pub fn split_artist_title(body: &str) -> std::result::Result<(&str, &str), LineError> {
    let (artist, title) = body
        .split_once(ARTIST_TITLE_SEPARATOR)
        .ok_or_else(|| LineError::ArtistTitle(body.to_string()))?;

    let (artist, title) = (artist.trim(), title.trim());
    if artist.is_empty() || title.is_empty() {
        return Err(LineError::ArtistTitle(body.to_string()));
    }
    Ok((artist, title))
}

fn additional_track(entry: Entry<'_>) -> std::result::Result<AdditionalTrack, LineError> {
    let (artist, title) = split_artist_title(entry.body)?;
    Ok(AdditionalTrack {
        artist: artist.to_string(),
        title: title.to_string(),
        label: entry.label.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_timestamp_formats() {
        assert_eq!(parse_timestamp("1:02:03"), Ok(3723.0));
        assert_eq!(parse_timestamp("02:03"), Ok(123.0));
        assert_eq!(parse_timestamp("0:00:00"), Ok(0.0));
        assert_eq!(parse_timestamp("45"), Ok(45.0));
        assert_eq!(parse_timestamp("75:00"), Ok(4500.0));
    }

    #[test]
    fn test_parse_timestamp_rejects_garbage() {
        assert!(parse_timestamp("x:03").is_err());
        assert!(parse_timestamp("1::03").is_err());
        assert!(parse_timestamp("").is_err());
        assert!(parse_timestamp("-1:00").is_err());
        assert!(parse_timestamp("1:00:00:00").is_err());
    }

    #[test]
    fn test_split_artist_title_first_separator() {
        assert_eq!(
            split_artist_title("Artist - Title - Extended Mix"),
            Ok(("Artist", "Title - Extended Mix"))
        );
        assert!(split_artist_title("Artist-Title").is_err());
        assert!(split_artist_title(" - Title").is_err());
    }

    #[test]
    fn test_parse_with_continuation() {
        let parsed = parse("Album\n[0:00:00] A - B\nw/ C - D [L]\n[0:01:00] E - F").unwrap();

        assert_eq!(parsed.album, "Album");
        assert_eq!(parsed.tracks.len(), 2);
        assert_eq!(
            parsed.tracks[0].additional_tracks,
            vec![AdditionalTrack {
                artist: "C".into(),
                title: "D".into(),
                label: "L".into()
            }]
        );
        assert!(parsed.tracks[1].additional_tracks.is_empty());
        assert_eq!(parsed.tracks[1].start_time, 60.0);
    }

    #[test]
    fn test_orphan_continuation_is_dropped() {
        let parsed = parse("Album\nw/ C - D\n[00:10] A - B").unwrap();
        assert_eq!(parsed.tracks.len(), 1);
        assert!(parsed.tracks[0].additional_tracks.is_empty());
    }

    #[test]
    fn test_malformed_continuation_is_dropped() {
        let parsed = parse("Album\n[00:10] A - B\nw/ no separator here\nw/ C - D").unwrap();
        assert_eq!(parsed.tracks[0].additional_tracks.len(), 1);
        assert_eq!(parsed.tracks[0].additional_tracks[0].artist, "C");
    }

    #[test]
    fn test_stage_announcement_keeps_track_open() {
        let text = "Album\n[0:00] A - B\n[1:00] Somebody On Stage\nw/ C - D\n[2:00] E - F";
        let parsed = parse(text).unwrap();

        assert_eq!(parsed.tracks.len(), 2);
        assert_eq!(parsed.tracks[0].main_title, "B");
        assert_eq!(parsed.tracks[0].additional_tracks.len(), 1);
    }

    #[test]
    fn test_bad_track_start_is_fatal() {
        let err = parse("Album\n[00:10] A - B\n[x:03] C - D").unwrap_err();
        assert!(matches!(err, SplitError::Parse { line: 3, .. }), "got {err:?}");

        let err = parse("Album\n[00:10] no separator").unwrap_err();
        assert!(matches!(err, SplitError::Parse { line: 2, .. }), "got {err:?}");
    }

    #[test]
    fn test_album_is_first_non_empty_line() {
        let parsed = parse("\n\n  Ultra Europe 2025  \n[00:00] A - B").unwrap();
        assert_eq!(parsed.album, "Ultra Europe 2025");
    }

    #[test]
    fn test_empty_and_trackless_input() {
        assert!(matches!(parse(""), Err(SplitError::Parse { .. })));
        assert!(matches!(parse("Album only\n\n"), Err(SplitError::Parse { .. })));
    }

    #[test]
    fn test_labels() {
        let parsed = parse("Album\n[00:00] A - B [Spinnin']\n[01:00] C - D").unwrap();
        assert_eq!(parsed.tracks[0].main_label, "Spinnin'");
        assert_eq!(parsed.tracks[1].main_label, "");
    }

    #[test]
    fn test_crlf_line_endings() {
        let parsed = parse("Album\r\n[00:00] A - B [L]\r\nw/ C - D\r\n").unwrap();
        assert_eq!(parsed.album, "Album");
        assert_eq!(parsed.tracks[0].main_label, "L");
        assert_eq!(parsed.tracks[0].additional_tracks.len(), 1);
    }
}
