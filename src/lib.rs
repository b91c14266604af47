//! setsplit - Split a DJ set recording into tagged tracks
//!
//! Takes one long recording plus a plain-text tracklist and cuts it into one
//! tagged MP3 or MP4 per track, running a handful of ffmpeg processes in
//! parallel.
//!
//! # Architecture
//!
//! The library is organized into several key modules:
//!
//! - `config`: CLI argument parsing and runtime settings
//! - `tracklist`: Line classification and parsing of the tracklist format
//! - `timeline`: End boundaries and output filenames
//! - `extraction`: Mapping a track to an ffmpeg command with tags
//! - `media`: ffmpeg/ffprobe backend behind the `MediaTool` trait
//! - `pipeline`: Setup, bounded-parallel extraction and cancellation
//! - `export`: JSON manifest of the split
//!
//! # Example
//!
//! ```no_run
//! use setsplit::{config::Settings, media::Ffmpeg, pipeline};
//!
//! let settings = Settings::default();
//! let tool = Ffmpeg::new(&settings.ffmpeg, &settings.ffprobe);
//! let cancel = pipeline::CancellationToken::new();
//! let result = pipeline::run(&settings, &tool, &cancel, pipeline::prompt_delete)
//!     .expect("Setup failed");
//! println!("Split {} tracks", result.succeeded);
//! ```

pub mod config;
pub mod error;
pub mod export;
pub mod extraction;
pub mod media;
pub mod pipeline;
pub mod timeline;
pub mod tracklist;
pub mod types;

// Re-export key types at crate root
pub use error::{Result, SplitError};
pub use types::{AdditionalTrack, AlbumContext, OutputMode, TrackDescriptor};
