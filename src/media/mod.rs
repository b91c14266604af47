//! External media tooling
//!
//! The trait keeps the pipeline independent of ffmpeg so tests can run
//! without it installed.

pub mod ffmpeg;
pub mod process;
pub mod traits;

pub use ffmpeg::Ffmpeg;
pub use traits::MediaTool;
