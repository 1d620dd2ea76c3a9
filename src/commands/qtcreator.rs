//! Qtcreator command - generate a CMakeLists.txt.user file

use anyhow::{Context, Result};
use owo_colors::OwoColorize;
use std::fs;
use std::io::{self, Write};
use std::path::Path;
use walkdir::WalkDir;

use super::generate::{self, GenerateOptions, ProjectConfig};
use crate::qtcreator::{settings, template};

/// Directories never descended into when running recursively
const IGNORED_DIRS: [&str; 3] = ["build", "install", "devel"];

/// Execute the qtcreator command
pub fn execute(opts: &GenerateOptions, recursive: bool) -> Result<()> {
    if recursive {
        return run_recursive(&opts.dir);
    }

    let Some(config) = generate::prepare(opts)? else {
        return Ok(());
    };
    write_user_file(&config, opts.yes || opts.clean)
}

/// Generate the project file for an already-prepared configuration
pub fn write_user_file(config: &ProjectConfig, yes: bool) -> Result<()> {
    let user_file = config.project_dir.join("CMakeLists.txt.user");

    if user_file.exists() && !yes && !confirm_overwrite()? {
        println!("CMakeLists.txt.user already exists, exiting");
        return Ok(());
    }

    remove_previous_configs(&config.project_dir)?;

    let settings = settings::load_or_launch()?;
    let content = template::render(
        template::pick(&settings.version),
        &template::RenderContext {
            settings: &settings,
            project_dir: &config.project_dir,
            build_dir: &config.build_dir,
            bin_dir: &config.bin_dir,
            install_dir: &config.install_dir,
            build_type: &config.build_type,
            targets: &config.targets,
        },
    );

    for target in &config.targets {
        println!("  found target:    {}", target);
    }

    fs::write(&user_file, content)
        .with_context(|| format!("Failed to write: {}", user_file.display()))?;
    println!("{} Qt Creator @ CMakeLists.txt.user", "Configured".green());

    Ok(())
}

fn confirm_overwrite() -> Result<bool> {
    loop {
        print!("CMakeLists.txt.user already exists, should I delete it [Y/n]: ");
        io::stdout().flush()?;

        let mut input = String::new();
        io::stdin().read_line(&mut input)?;

        match input.trim().to_lowercase().as_str() {
            "" | "y" => return Ok(true),
            "n" => return Ok(false),
            _ => continue,
        }
    }
}

/// Remove stale CMakeLists.txt.user* files (Qt Creator keeps per-version copies)
fn remove_previous_configs(project_dir: &Path) -> Result<()> {
    for entry in fs::read_dir(project_dir)
        .with_context(|| format!("Failed to read: {}", project_dir.display()))?
        .flatten()
    {
        let name = entry.file_name();
        if name.to_string_lossy().starts_with("CMakeLists.txt.user") {
            println!("Removing {}", entry.path().display());
            fs::remove_file(entry.path())
                .with_context(|| format!("Failed to remove: {}", entry.path().display()))?;
        }
    }
    Ok(())
}

/// Regenerate every project below `root` that was already configured once
/// (has both CMakeLists.txt and CMakeLists.txt.user), skipping build spaces
/// and hidden directories. A failing project is reported and skipped.
fn run_recursive(root: &Path) -> Result<()> {
    let mut it = WalkDir::new(root).into_iter();

    while let Some(entry) = it.next() {
        let entry = entry?;
        if !entry.file_type().is_dir() {
            continue;
        }

        let name = entry.file_name().to_string_lossy();
        if entry.depth() > 0 && (name.starts_with('.') || IGNORED_DIRS.contains(&name.as_ref())) {
            it.skip_current_dir();
            continue;
        }

        let dir = entry.path();
        if dir.join("CMakeLists.txt").exists() && dir.join("CMakeLists.txt.user").exists() {
            println!("Regenerating Qt Creator configuration in {}", dir.display());

            let opts = GenerateOptions {
                dir: dir.to_path_buf(),
                build_dir: None,
                clean: true,
                yes: true,
            };
            match generate::prepare(&opts) {
                Ok(Some(config)) => {
                    if let Err(err) = write_user_file(&config, true) {
                        eprintln!("{} {}: {}", "Skipping".yellow(), dir.display(), err);
                    }
                }
                Ok(None) => {}
                Err(err) => eprintln!("{} {}: {}", "Skipping".yellow(), dir.display(), err),
            }

            // a configured project is a leaf, no nested projects expected
            it.skip_current_dir();
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_remove_previous_configs() {
        let tmp = tempfile::tempdir().unwrap();
        fs::write(tmp.path().join("CMakeLists.txt"), "project(foo)").unwrap();
        fs::write(tmp.path().join("CMakeLists.txt.user"), "").unwrap();
        fs::write(tmp.path().join("CMakeLists.txt.user.4.8-pre1"), "").unwrap();

        remove_previous_configs(tmp.path()).unwrap();

        assert!(tmp.path().join("CMakeLists.txt").exists());
        assert!(!tmp.path().join("CMakeLists.txt.user").exists());
        assert!(!tmp.path().join("CMakeLists.txt.user.4.8-pre1").exists());
    }

    #[test]
    fn test_recursive_skips_build_spaces() {
        // a configured project inside devel/ must not be touched
        let tmp = tempfile::tempdir().unwrap();
        let hidden = tmp.path().join("devel").join("project");
        fs::create_dir_all(&hidden).unwrap();
        fs::write(hidden.join("CMakeLists.txt"), "project(ghost)").unwrap();
        fs::write(hidden.join("CMakeLists.txt.user"), "stale").unwrap();

        run_recursive(tmp.path()).unwrap();

        assert_eq!(
            fs::read_to_string(hidden.join("CMakeLists.txt.user")).unwrap(),
            "stale"
        );
    }
}
