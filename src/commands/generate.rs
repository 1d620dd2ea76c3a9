//! Generate command - configure every IDE found on this machine
//!
//! Also hosts the shared pipeline: scan the manifest, resolve the ROS
//! workspace (or fall back to a local build directory) and settle the build
//! type. All anticipated failures print a message and return cleanly;
//! "nothing configured" is an acceptable outcome.

use anyhow::{Context, Result};
use owo_colors::OwoColorize;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

use super::{qtcreator, vscode};
use crate::cmake::cache;
use crate::cmake::manifest::ManifestFacts;
use crate::ros::workspace::{self, BuildTool, ResolveError};

/// Options shared by the generation commands
#[derive(Debug, Clone)]
pub struct GenerateOptions {
    /// Folder of the CMakeLists.txt file
    pub dir: PathBuf,
    /// Relative build folder; when set it overrides workspace resolution
    pub build_dir: Option<String>,
    /// Delete and recreate the local build folder
    pub clean: bool,
    /// Do not ask before deleting an existing configuration
    pub yes: bool,
}

/// Resolved configuration handed to the per-IDE generators
#[derive(Debug, Clone)]
pub struct ProjectConfig {
    pub project_dir: PathBuf,
    pub build_dir: PathBuf,
    pub bin_dir: PathBuf,
    pub install_dir: PathBuf,
    pub build_type: String,
    pub targets: Vec<String>,
    /// Workspace build tool, None outside a ROS workspace
    pub tool: Option<BuildTool>,
}

/// Run the shared pipeline; None means a clean, already-reported abort
pub fn prepare(opts: &GenerateOptions) -> Result<Option<ProjectConfig>> {
    let project_dir = absolute(&opts.dir);
    let manifest = project_dir.join("CMakeLists.txt");

    if !manifest.exists() {
        println!("Could not find CMakeLists.txt, exiting");
        println!("Given location: {}", manifest.display());
        return Ok(None);
    }

    println!("Loading {}", manifest.display());
    let facts = ManifestFacts::from_file(&manifest)?;

    if let Some(ros) = facts.ros {
        println!("Configuring as a {} package", ros);
    }
    if !facts.has_build_targets() {
        println!("  no C++ targets for {}", facts.package_name);
    }

    let relative_build = opts.build_dir.as_deref().unwrap_or("./build");
    let mut build_dir = absolute(&project_dir.join(relative_build));
    let mut bin_dir = build_dir.clone();
    let mut install_dir = PathBuf::from("/usr/local");
    let mut tool = None;

    // an explicit build directory always wins over workspace resolution
    match (facts.ros, opts.build_dir.is_none()) {
        (Some(ros), true) => {
            let layout = match workspace::resolve(&project_dir, ros, &facts.package_name) {
                Ok(layout) => layout,
                Err(err) => {
                    println!("{}", err);
                    if matches!(err, ResolveError::AmbiguousWorkspace(_)) {
                        println!(
                            "Compile (catkin or colcon) from the workspace then run this tool again."
                        );
                    }
                    return Ok(None);
                }
            };

            if layout.guessed {
                println!(
                    "Could not identify the build tool, picking {} for {}",
                    layout.tool, ros
                );
            } else {
                println!(
                    "Configuring for a {} workspace compiled through {}",
                    ros, layout.tool
                );
            }

            if !layout.build_dir.exists() {
                println!(
                    "{} You will have to run \"{} build\" before loading the project in your IDE",
                    "Warning:".yellow(),
                    layout.tool
                );
            }

            build_dir = layout.build_dir;
            bin_dir = layout.bin_dir;
            install_dir = layout.install_dir;
            tool = Some(layout.tool);
        }
        _ => {
            if !build_dir.exists() {
                fs::create_dir(&build_dir)
                    .with_context(|| format!("Failed to create: {}", build_dir.display()))?;
            } else if opts.clean {
                fs::remove_dir_all(&build_dir)
                    .with_context(|| format!("Failed to remove: {}", build_dir.display()))?;
                fs::create_dir(&build_dir)?;
            }
        }
    }

    let build_type = match facts.build_type {
        Some(value) => {
            println!("  build type \"{}\" from CMakeLists.txt", value);
            value
        }
        None => match cache::build_type_from_cache(&build_dir) {
            Some(value) => {
                println!("  build type \"{}\" from CMakeCache.txt", value);
                value
            }
            None => "Debug".to_string(),
        },
    };

    println!("  build directory: {}", build_dir.display());
    if bin_dir != build_dir {
        println!("  bin directory:   {}", bin_dir.display());
    }

    Ok(Some(ProjectConfig {
        project_dir,
        build_dir,
        bin_dir,
        install_dir,
        build_type,
        targets: facts.targets,
        tool,
    }))
}

/// Execute the generate command: one configuration per IDE found on PATH
pub fn execute(opts: &GenerateOptions) -> Result<()> {
    let Some(config) = prepare(opts)? else {
        return Ok(());
    };

    let mut generated = false;

    if on_path("qtcreator") {
        qtcreator::write_user_file(&config, opts.yes || opts.clean)?;
        generated = true;
    }
    if on_path("code") {
        vscode::write_settings(&config)?;
        generated = true;
    }

    if !generated {
        println!("No supported IDE (qtcreator, code) found on this machine");
    }

    Ok(())
}

/// Whether a command is available on PATH
pub fn on_path(command: &str) -> bool {
    Command::new("which")
        .arg(command)
        .output()
        .map(|output| output.status.success())
        .unwrap_or(false)
}

/// Absolute form of a path without requiring it to exist
fn absolute(path: &Path) -> PathBuf {
    if path.is_absolute() {
        normalize(path)
    } else {
        match std::env::current_dir() {
            Ok(cwd) => normalize(&cwd.join(path)),
            Err(_) => path.to_path_buf(),
        }
    }
}

/// Drop `.` components and resolve `..` lexically
fn normalize(path: &Path) -> PathBuf {
    use std::path::Component;

    let mut result = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                result.pop();
            }
            other => result.push(other),
        }
    }
    result
}
