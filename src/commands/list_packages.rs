//! List-packages command - installed ROS apt packages
//!
//! Lists the `ros-<distro>-*` packages installed through apt, and can
//! rewrite the list for another distro while checking (through a simulated
//! install) which of them cannot be installed there.

use anyhow::{Context, Result};
use comfy_table::{presets::UTF8_FULL_CONDENSED, ContentArrangement, Table};
use std::process::Command;

/// Options for the list-packages command
#[derive(Debug, Clone)]
pub struct ListPackagesOptions {
    /// ROS distro (e.g. noetic, humble); empty matches any `ros-` package
    pub distro: String,
    /// Print all packages on a single line
    pub row: bool,
    /// Rewrite package names for this distro and check installability
    pub replace: Option<String>,
}

/// Execute the list-packages command
pub fn execute(options: &ListPackagesOptions) -> Result<()> {
    let output = Command::new("apt")
        .args(["list", "--installed"])
        .output()
        .context("Failed to run apt")?;
    let installed = String::from_utf8_lossy(&output.stdout);

    let mut packages = installed_ros_packages(&installed, &options.distro);
    let mut missing = Vec::new();

    if let Some(new_distro) = &options.replace {
        if !options.distro.is_empty() {
            packages = packages
                .iter()
                .map(|p| p.replace(&options.distro, new_distro))
                .collect();
            missing = not_installable(&packages)?;
            packages.retain(|p| !missing.contains(p));
        }
    }

    if options.row {
        println!("{}", packages.join(" "));
    } else {
        for package in &packages {
            println!("{}", package);
        }
    }

    if !missing.is_empty() {
        let mut table = Table::new();
        table
            .load_preset(UTF8_FULL_CONDENSED)
            .set_content_arrangement(ContentArrangement::Dynamic)
            .set_header(vec!["Not installable"]);
        for package in &missing {
            table.add_row(vec![package.as_str()]);
        }
        println!("\n{}", table);
    }

    Ok(())
}

/// Filter `apt list --installed` output down to explicitly installed
/// `ros-<distro>` packages
fn installed_ros_packages(apt_output: &str, distro: &str) -> Vec<String> {
    let prefix = format!("ros-{}", distro);

    apt_output
        .lines()
        .filter(|line| line.starts_with(&prefix) && !line.contains(",automatic"))
        .filter_map(|line| line.split('/').next())
        .map(String::from)
        .collect()
}

/// Ask apt (simulated install, nothing touched) which packages do not exist
fn not_installable(packages: &[String]) -> Result<Vec<String>> {
    let output = Command::new("apt")
        .args(["install", "--simulate"])
        .args(packages)
        .output()
        .context("Failed to run apt")?;
    let stderr = String::from_utf8_lossy(&output.stderr);

    Ok(parse_unable_errors(&stderr))
}

fn parse_unable_errors(stderr: &str) -> Vec<String> {
    stderr
        .lines()
        .filter(|line| line.starts_with("E: Unable"))
        .filter_map(|line| line.split_whitespace().last())
        .map(String::from)
        .collect()
}
