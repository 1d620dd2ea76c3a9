//! ROS workspace handling

pub mod workspace;

// Re-exports for library consumers
#[allow(unused_imports)]
pub use workspace::{resolve, BuildTool, ResolveError, WorkspaceLayout};
