//! CLI commands

pub mod generate;
pub mod list_packages;
pub mod qtcreator;
pub mod vscode;
