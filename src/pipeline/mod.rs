//! Split pipeline: setup, bounded-parallel extraction and cancellation

pub mod cancel;
pub mod capacity;
pub mod orchestrator;
pub mod setup;

pub use cancel::CancellationToken;
pub use capacity::{CapacityPool, SlotGuard};
pub use orchestrator::{extract_all, extract_track, run, PipelineResult, MANIFEST_FILE_NAME, MAX_WORKERS};
pub use setup::{plan, prepare_output_dir, prompt_delete, SplitPlan};
