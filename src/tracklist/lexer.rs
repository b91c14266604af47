//! Line classification for the tracklist format
//!
//! Every line after the album title is exactly one [`Line`] kind. Kinds are
//! tried in a fixed order and the first match wins:
//!
//! 1. blank
//! 2. track start (`[<time>] <artist> - <title> [<label>]`), or a stage
//!    announcement when the text ends in `On Stage`
//! 3. continuation (`w/ <artist> - <title> [<label>]`)
//! 4. anything else
//!
//! The lexer only finds structure. Converting timestamps and splitting
//! artist from title is left to the parser, which decides what is fatal.

/// Literal prefix of a continuation line (note the trailing space)
pub const CONTINUATION_MARKER: &str = "w/ ";

/// Suffix marking a stage announcement rather than a track
pub const STAGE_SUFFIX: &str = "On Stage";

/// A classified tracklist line, borrowing from the source text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Line<'a> {
    Blank,
    TrackStart { timestamp: &'a str, entry: Entry<'a> },
    StageAnnouncement { timestamp: &'a str },
    Continuation(Entry<'a>),
    Unrecognized(&'a str),
}

/// `<artist> - <title>` text with the optional trailing `[label]` split off
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Entry<'a> {
    pub body: &'a str,
    /// Empty when the line carries no label
    pub label: &'a str,
}

impl<'a> Entry<'a> {
    /// Split a trailing bracketed label off `text`.
    ///
    /// The label is everything between the last `[` and the final `]`.
    pub fn split(text: &'a str) -> Self {
        let text = text.trim();
        if let Some(inner) = text.strip_suffix(']') {
            if let Some(open) = inner.rfind('[') {
                return Entry {
                    body: inner[..open].trim_end(),
                    label: inner[open + 1..].trim(),
                };
            }
        }
        Entry { body: text, label: "" }
    }
}

/// Classify a single raw line
pub fn classify(line: &str) -> Line<'_> {
    let line = line.trim();
    if line.is_empty() {
        return Line::Blank;
    }

    if let Some((timestamp, rest)) = line.strip_prefix('[').and_then(|s| s.split_once(']')) {
        let entry = Entry::split(rest);
        if entry.body.ends_with(STAGE_SUFFIX) {
            return Line::StageAnnouncement { timestamp };
        }
        return Line::TrackStart { timestamp, entry };
    }

    if let Some(rest) = line.strip_prefix(CONTINUATION_MARKER) {
        return Line::Continuation(Entry::split(rest));
    }

    Line::Unrecognized(line)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_lines() {
        assert_eq!(classify(""), Line::Blank);
        assert_eq!(classify("   \t"), Line::Blank);
    }

    #[test]
    fn test_track_start_with_label() {
        assert_eq!(
            classify("[1:02:03] Artist - Title [Label Records]"),
            Line::TrackStart {
                timestamp: "1:02:03",
                entry: Entry {
                    body: "Artist - Title",
                    label: "Label Records"
                }
            }
        );
    }

    #[test]
    fn test_track_start_without_label() {
        assert_eq!(
            classify("[02:03] Artist - Title"),
            Line::TrackStart {
                timestamp: "02:03",
                entry: Entry {
                    body: "Artist - Title",
                    label: ""
                }
            }
        );
    }

    #[test]
    fn test_label_uses_last_bracket() {
        let entry = Entry::split("Artist - Title [Remix] [Label]");
        assert_eq!(entry.body, "Artist - Title [Remix]");
        assert_eq!(entry.label, "Label");
    }

    #[test]
    fn test_bad_timestamp_still_classified_as_track_start() {
        // The parser turns this into a hard error
        assert!(matches!(
            classify("[x:03] Artist - Title"),
            Line::TrackStart { timestamp: "x:03", .. }
        ));
    }

    #[test]
    fn test_stage_announcement() {
        assert_eq!(
            classify("[0:00:00] Martin Garrix On Stage"),
            Line::StageAnnouncement { timestamp: "0:00:00" }
        );
        // Label is stripped before the suffix check
        assert_eq!(
            classify("[0:00:00] Martin Garrix On Stage [STMPD]"),
            Line::StageAnnouncement { timestamp: "0:00:00" }
        );
    }

    #[test]
    fn test_continuation() {
        assert_eq!(
            classify("w/ Other - Song [Lbl]"),
            Line::Continuation(Entry {
                body: "Other - Song",
                label: "Lbl"
            })
        );
    }

    #[test]
    fn test_continuation_marker_needs_space() {
        assert_eq!(classify("w/Other - Song"), Line::Unrecognized("w/Other - Song"));
    }

    #[test]
    fn test_unrecognized() {
        assert_eq!(classify("ID - ID"), Line::Unrecognized("ID - ID"));
    }
}
