//! Vscode command - generate .vscode settings
//!
//! Targets the C/C++, CMake Tools and clangd extensions: all three only
//! need to know where the build directory (and its compile_commands.json)
//! lives.

use anyhow::{Context, Result};
use serde::Serialize;
use std::fs;

use super::generate::{self, GenerateOptions, ProjectConfig};

#[derive(Debug, Serialize)]
struct VsCodeSettings {
    #[serde(rename = "cmake.buildDirectory")]
    build_directory: String,
    #[serde(rename = "cmake.configureOnOpen")]
    configure_on_open: bool,
    #[serde(rename = "C_Cpp.default.compileCommands")]
    compile_commands: String,
    #[serde(rename = "clangd.arguments")]
    clangd_arguments: Vec<String>,
}

impl VsCodeSettings {
    fn new(config: &ProjectConfig) -> Self {
        let build_dir = config.build_dir.display().to_string();
        Self {
            compile_commands: format!("{}/compile_commands.json", build_dir),
            clangd_arguments: vec![format!("--compile-commands-dir={}", build_dir)],
            // ROS build directories belong to the workspace tool
            configure_on_open: config.tool.is_none(),
            build_directory: build_dir,
        }
    }
}

/// Execute the vscode command
pub fn execute(opts: &GenerateOptions) -> Result<()> {
    let Some(config) = generate::prepare(opts)? else {
        return Ok(());
    };
    write_settings(&config)
}

/// Write .vscode/settings.json and compile_flags.txt for a prepared configuration
pub fn write_settings(config: &ProjectConfig) -> Result<()> {
    let code_dir = config.project_dir.join(".vscode");
    if !code_dir.exists() {
        fs::create_dir(&code_dir)
            .with_context(|| format!("Failed to create: {}", code_dir.display()))?;
    }

    let settings = VsCodeSettings::new(config);
    let settings_file = code_dir.join("settings.json");
    fs::write(&settings_file, serde_json::to_string_pretty(&settings)?)
        .with_context(|| format!("Failed to write: {}", settings_file.display()))?;

    // fallback for clangd when compile_commands.json does not exist yet
    fs::write(code_dir.join("compile_flags.txt"), "-xc++\n-std=c++17")?;

    println!("Configured VS Code @ .vscode/settings.json (C/C++ - CMake Tools - clangd extensions)");
    Ok(())
}
