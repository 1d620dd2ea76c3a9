//! ROS workspace resolution
//!
//! A ROS package lives under the `src` directory of a catkin or colcon
//! workspace; its build, binary and install directories are derived from
//! the workspace root, not from the package itself. This module finds that
//! root from the package path and identifies which tool built it.

use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::cmake::manifest::RosVersion;

/// Workspace build tool
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuildTool {
    /// catkin_tools (ROS 1); binaries live in the isolated devel space
    Catkin,
    /// colcon (ROS 2); binaries are colocated with the build output
    Colcon,
}

impl BuildTool {
    /// Default tool implied by the packaging convention, used when no
    /// on-disk marker identifies the actual one
    pub fn default_for(ros: RosVersion) -> Self {
        match ros {
            RosVersion::Ros1 => Self::Catkin,
            RosVersion::Ros2 => Self::Colcon,
        }
    }
}

impl std::fmt::Display for BuildTool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Catkin => write!(f, "catkin"),
            Self::Colcon => write!(f, "colcon"),
        }
    }
}

/// Terminal resolution failures; the caller reports them and exits cleanly
/// without writing any configuration.
#[derive(Debug, Error)]
pub enum ResolveError {
    #[error("the package path does not comply with the ROS standard (no src folder): {0}")]
    NonStandardLayout(PathBuf),

    #[error("the package path is ambiguous (several src folders), cannot guess the workspace")]
    AmbiguousWorkspace(PathBuf),
}

/// Directories an IDE configuration should reference for a ROS package
#[derive(Debug, Clone)]
pub struct WorkspaceLayout {
    /// Workspace root directory
    pub root: PathBuf,
    /// Per-package build directory (`root/build/<pkg>`)
    pub build_dir: PathBuf,
    /// Where the built executables end up
    pub bin_dir: PathBuf,
    /// Per-package install directory (`root/install/<pkg>`)
    pub install_dir: PathBuf,
    /// Tool that built (or is expected to build) the workspace
    pub tool: BuildTool,
    /// True when no tool marker was found and `tool` was inferred from the
    /// packaging convention
    pub guessed: bool,
}

/// Find the workspace root enclosing a package directory
///
/// The package path must contain a component literally named `src`. With a
/// single `src` component the prefix before it is the root, unconditionally.
/// With nested `src` directories the candidates (prefix before each `src`,
/// in order) are scanned and the first one with an existing `build`
/// subdirectory wins; if none has one the workspace cannot be told apart
/// from the nested layouts and resolution fails.
pub fn find_workspace_root(package_dir: &Path) -> Result<PathBuf, ResolveError> {
    let split_points: Vec<usize> = package_dir
        .components()
        .enumerate()
        .filter(|(_, c)| c.as_os_str() == "src")
        .map(|(i, _)| i)
        .collect();

    if split_points.is_empty() {
        return Err(ResolveError::NonStandardLayout(package_dir.to_path_buf()));
    }

    let prefix = |n: usize| -> PathBuf { package_dir.components().take(n).collect() };

    if split_points.len() == 1 {
        return Ok(prefix(split_points[0]));
    }

    // first candidate with a build directory wins
    for &point in &split_points {
        let candidate = prefix(point);
        if candidate.join("build").exists() {
            return Ok(candidate);
        }
    }

    Err(ResolveError::AmbiguousWorkspace(package_dir.to_path_buf()))
}

/// Identify the build tool from its on-disk markers, falling back to the
/// convention default. The second value is true when the tool was guessed.
pub fn detect_build_tool(root: &Path, ros: RosVersion) -> (BuildTool, bool) {
    if root.join("build").join("COLCON_IGNORE").exists() {
        (BuildTool::Colcon, false)
    } else if root.join(".catkin_tools").exists() {
        (BuildTool::Catkin, false)
    } else {
        (BuildTool::default_for(ros), true)
    }
}

/// Resolve the workspace layout for a ROS package
pub fn resolve(
    package_dir: &Path,
    ros: RosVersion,
    package_name: &str,
) -> Result<WorkspaceLayout, ResolveError> {
    let root = find_workspace_root(package_dir)?;
    let (tool, guessed) = detect_build_tool(&root, ros);

    let build_dir = root.join("build").join(package_name);
    let install_dir = root.join("install").join(package_name);
    let bin_dir = match tool {
        BuildTool::Colcon => build_dir.clone(),
        BuildTool::Catkin => root
            .join("devel")
            .join(".private")
            .join(package_name)
            .join("lib"),
    };

    Ok(WorkspaceLayout {
        root,
        build_dir,
        bin_dir,
        install_dir,
        tool,
        guessed,
    })
}
