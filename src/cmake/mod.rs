//! CMake manifest handling

pub mod cache;
pub mod manifest;

// Re-exports for library consumers
#[allow(unused_imports)]
pub use manifest::{ManifestFacts, RosVersion};
