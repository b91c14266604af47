//! Export of the split plan

pub mod json;

pub use json::{read_manifest, write_manifest, ManifestJson};
