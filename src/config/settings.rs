//! Runtime configuration settings

use crate::error::{Result, SplitError};
use crate::types::OutputMode;
use chrono::Datelike;
use std::path::PathBuf;

/// Immutable settings for one split run, built once from the CLI
#[derive(Debug, Clone)]
pub struct Settings {
    /// Tracklist file
    pub tracklist: PathBuf,
    /// Source recording
    pub input: PathBuf,
    /// Audio or video output
    pub mode: OutputMode,
    /// Output directory
    pub output_dir: PathBuf,
    /// Album tag override (tracklist header otherwise)
    pub album: Option<String>,
    /// Release year tag
    pub year: String,
    /// ffmpeg binary
    pub ffmpeg: PathBuf,
    /// ffprobe binary
    pub ffprobe: PathBuf,
    /// Delete an existing output directory without asking
    pub force: bool,
    /// Write a JSON manifest next to the tracks
    pub write_manifest: bool,
    /// Show progress bar
    pub show_progress: bool,
    /// Dry run mode - show the plan without processing
    pub dry_run: bool,
}

impl Settings {
    /// Create settings from CLI arguments
    pub fn from_cli(cli: &super::cli::Cli) -> Self {
        let year = cli
            .year
            .map(|y| y.to_string())
            .unwrap_or_else(current_year);

        Self {
            tracklist: cli.tracklist.clone(),
            input: cli.input.clone(),
            mode: cli.mode(),
            output_dir: cli.output.clone(),
            album: cli.album.clone(),
            year,
            ffmpeg: cli.ffmpeg.clone(),
            ffprobe: cli.ffprobe.clone(),
            force: cli.force,
            write_manifest: cli.manifest,
            show_progress: !cli.quiet,
            dry_run: cli.dry_run,
        }
    }

    /// Check that the inputs exist before anything is probed or written
    pub fn validate(&self) -> Result<()> {
        if !self.tracklist.is_file() {
            return Err(SplitError::Config(format!(
                "Tracklist not found: {}\n\n  Tip: The tracklist is a text file whose first line is the album title,\n  followed by lines like:\n    [00:00] Artist - Title [Label]\n    w/ Other Artist - Other Title",
                self.tracklist.display()
            )));
        }

        if !self.input.is_file() {
            return Err(SplitError::Config(format!(
                "Input media not found: {}\n\n  Example:\n    setsplit -t tracklist.txt -i set.mp4 --audio",
                self.input.display()
            )));
        }

        if self.output_dir.as_os_str().is_empty() {
            return Err(SplitError::Config("Output directory must not be empty".to_string()));
        }

        Ok(())
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            tracklist: PathBuf::from("tracklist.txt"),
            input: PathBuf::from("set.mp4"),
            mode: OutputMode::Audio,
            output_dir: PathBuf::from("output"),
            album: None,
            year: current_year(),
            ffmpeg: PathBuf::from("ffmpeg"),
            ffprobe: PathBuf::from("ffprobe"),
            force: false,
            write_manifest: false,
            show_progress: true,
            dry_run: false,
        }
    }
}

fn current_year() -> String {
    chrono::Local::now().year().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Cli;
    use clap::Parser;

    #[test]
    fn test_from_cli() {
        let cli = Cli::parse_from([
            "setsplit", "-t", "list.txt", "-i", "set.mkv", "--video", "--year", "2024", "--album", "Live", "-q",
        ]);
        let settings = Settings::from_cli(&cli);

        assert_eq!(settings.mode, OutputMode::Video);
        assert_eq!(settings.year, "2024");
        assert_eq!(settings.album.as_deref(), Some("Live"));
        assert!(!settings.show_progress);
    }

    #[test]
    fn test_year_defaults_to_current() {
        let cli = Cli::parse_from(["setsplit", "-t", "list.txt", "-i", "set.mkv", "--audio"]);
        let settings = Settings::from_cli(&cli);
        assert_eq!(settings.year, chrono::Local::now().year().to_string());
    }

    #[test]
    fn test_validate() {
        let dir = tempfile::TempDir::new().unwrap();
        let tracklist = dir.path().join("list.txt");
        let input = dir.path().join("set.mkv");
        std::fs::write(&tracklist, "Set\n[00:00] A - B\n").unwrap();

        let mut settings = Settings {
            tracklist,
            input: input.clone(),
            ..Settings::default()
        };
        let err = settings.validate().unwrap_err();
        assert!(matches!(err, SplitError::Config(ref msg) if msg.starts_with("Input media not found")));

        std::fs::write(&input, b"x").unwrap();
        assert!(settings.validate().is_ok());

        settings.output_dir = PathBuf::new();
        assert!(matches!(settings.validate(), Err(SplitError::Config(_))));

        settings.tracklist = dir.path().join("missing.txt");
        let err = settings.validate().unwrap_err();
        assert!(err.to_string().contains("Tracklist not found"));
    }
}
