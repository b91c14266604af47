//! Tracklist reading and parsing
//!
//! Format:
//!
//! ```text
//! <album title>
//! [<H:MM:SS or MM:SS>] <Artist> - <Title> [<Label>]
//! w/ <Artist> - <Title> [<Label>]
//! ```

pub mod lexer;
pub mod parser;

pub use parser::{parse, parse_timestamp, split_artist_title, ParsedTracklist};

use crate::error::{Result, SplitError};
use std::path::Path;

/// Read and parse a tracklist file
pub fn load(path: &Path) -> Result<ParsedTracklist> {
    let text = std::fs::read_to_string(path).map_err(|e| SplitError::TracklistRead {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;
    parse(&text)
}
