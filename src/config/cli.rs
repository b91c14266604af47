//! CLI argument parsing and configuration

use crate::types::OutputMode;
use clap::{ArgGroup, Parser};
use std::path::PathBuf;

/// setsplit - Split a DJ set recording into tagged tracks
///
/// Reads a plain-text tracklist with timestamps and cuts the recording into
/// one MP3 or MP4 per track using ffmpeg, tagging each file with title,
/// artist, album and label.
#[derive(Parser, Debug)]
#[command(name = "setsplit")]
#[command(author, version, about, long_about = None)]
#[command(group(ArgGroup::new("mode").required(true).args(["audio", "video"])))]
pub struct Cli {
    /// Tracklist file (first line is the album title)
    #[arg(short, long, value_name = "FILE")]
    pub tracklist: PathBuf,

    /// Input media file (the full set recording)
    #[arg(short, long, value_name = "FILE")]
    pub input: PathBuf,

    /// Output MP3 audio
    #[arg(long)]
    pub audio: bool,

    /// Output MP4 video
    #[arg(long)]
    pub video: bool,

    /// Output directory for the split tracks
    #[arg(short, long, value_name = "DIR", default_value = "output")]
    pub output: PathBuf,

    /// Album tag (defaults to the first line of the tracklist)
    #[arg(long, value_name = "TITLE")]
    pub album: Option<String>,

    /// Year written to the date tag (defaults to the current year)
    #[arg(long, value_name = "YEAR")]
    pub year: Option<u16>,

    /// ffmpeg binary to use
    #[arg(long, value_name = "PATH", default_value = "ffmpeg")]
    pub ffmpeg: PathBuf,

    /// ffprobe binary to use
    #[arg(long, value_name = "PATH", default_value = "ffprobe")]
    pub ffprobe: PathBuf,

    /// Delete an existing output directory without asking
    #[arg(short, long, default_value = "false")]
    pub force: bool,

    /// Write tracklist.json describing the split into the output directory
    #[arg(long, default_value = "false")]
    pub manifest: bool,

    /// Dry run - show the planned tracks without extracting anything
    #[arg(long, default_value = "false")]
    pub dry_run: bool,

    /// Verbose output (can be repeated: -v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Quiet mode (suppress progress bar)
    #[arg(short, long, default_value = "false")]
    pub quiet: bool,
}

impl Cli {
    /// Selected output mode; the `mode` group guarantees exactly one flag
    pub fn mode(&self) -> OutputMode {
        if self.audio {
            OutputMode::Audio
        } else {
            OutputMode::Video
        }
    }

    /// Get the log level based on verbosity flags
    pub fn log_level(&self) -> tracing::Level {
        if self.quiet {
            return tracing::Level::ERROR;
        }
        match self.verbose {
            0 => tracing::Level::WARN,
            1 => tracing::Level::INFO,
            2 => tracing::Level::DEBUG,
            _ => tracing::Level::TRACE,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    fn parse(args: &[&str]) -> Result<Cli, clap::Error> {
        Cli::try_parse_from(std::iter::once("setsplit").chain(args.iter().copied()))
    }

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_audio_mode() {
        let cli = parse(&["-t", "list.txt", "-i", "set.mkv", "--audio"]).unwrap();
        assert_eq!(cli.mode(), OutputMode::Audio);
        assert_eq!(cli.output, PathBuf::from("output"));
    }

    #[test]
    fn test_video_mode() {
        let cli = parse(&["--tracklist", "list.txt", "--input", "set.mkv", "--video"]).unwrap();
        assert_eq!(cli.mode(), OutputMode::Video);
    }

    #[test]
    fn test_mode_required() {
        assert!(parse(&["-t", "list.txt", "-i", "set.mkv"]).is_err());
    }

    #[test]
    fn test_modes_mutually_exclusive() {
        assert!(parse(&["-t", "list.txt", "-i", "set.mkv", "--audio", "--video"]).is_err());
    }

    #[test]
    fn test_inputs_required() {
        assert!(parse(&["-i", "set.mkv", "--audio"]).is_err());
        assert!(parse(&["-t", "list.txt", "--audio"]).is_err());
    }

    #[test]
    fn test_log_level() {
        let cli = parse(&["-t", "l", "-i", "s", "--audio", "-vv"]).unwrap();
        assert_eq!(cli.log_level(), tracing::Level::DEBUG);

        let cli = parse(&["-t", "l", "-i", "s", "--audio", "-vv", "-q"]).unwrap();
        assert_eq!(cli.log_level(), tracing::Level::ERROR);
    }
}
