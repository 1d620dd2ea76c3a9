//! ide-config: generate IDE configuration for CMake and ROS packages
//!
//! Scans a CMakeLists.txt, resolves the enclosing catkin/colcon workspace
//! when the package is a ROS one, and writes Qt Creator / VS Code project
//! configuration pointing at the right build and binary directories.

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

mod cmake;
mod commands;
mod config;
mod qtcreator;
mod ros;

use commands::generate::GenerateOptions;
use commands::list_packages::ListPackagesOptions;

#[derive(Parser)]
#[command(name = "ide-config")]
#[command(about = "Generate IDE configuration for CMake and ROS packages", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct ProjectArgs {
    /// Folder of the CMakeLists.txt file
    #[arg(short = 'c', long = "dir", default_value = ".")]
    dir: PathBuf,

    /// Relative build folder (overrides ROS workspace resolution)
    #[arg(short = 'b', long = "build-dir")]
    build_dir: Option<String>,

    /// Delete and recreate the local build folder (implies --yes)
    #[arg(long)]
    clean: bool,

    /// Do not ask before deleting an existing configuration
    #[arg(short, long)]
    yes: bool,
}

impl From<ProjectArgs> for GenerateOptions {
    fn from(args: ProjectArgs) -> Self {
        Self {
            dir: args.dir,
            build_dir: args.build_dir,
            clean: args.clean,
            yes: args.yes || args.clean,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Generate configuration for every IDE found on this machine
    Generate {
        #[command(flatten)]
        project: ProjectArgs,
    },

    /// Generate a Qt Creator CMakeLists.txt.user file
    Qtcreator {
        #[command(flatten)]
        project: ProjectArgs,

        /// Regenerate every already-configured project below the folder
        #[arg(short, long)]
        recursive: bool,
    },

    /// Generate VS Code settings (.vscode/settings.json)
    Vscode {
        #[command(flatten)]
        project: ProjectArgs,
    },

    /// List installed apt packages for a ROS distro
    ListPackages {
        /// Any specific distro (e.g. noetic, humble)
        #[arg(short, long, default_value = "")]
        distro: String,

        /// Display on a single row
        #[arg(short, long)]
        row: bool,

        /// Print the same list for another distro, checking installability
        #[arg(short = 'R', long)]
        replace: Option<String>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Generate { project } => {
            commands::generate::execute(&project.into())?;
        }

        Commands::Qtcreator { project, recursive } => {
            commands::qtcreator::execute(&project.into(), recursive)?;
        }

        Commands::Vscode { project } => {
            commands::vscode::execute(&project.into())?;
        }

        Commands::ListPackages {
            distro,
            row,
            replace,
        } => {
            let options = ListPackagesOptions {
                distro,
                row,
                replace,
            };
            commands::list_packages::execute(&options)?;
        }
    }

    Ok(())
}
