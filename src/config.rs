//! Qt Creator local configuration paths
//!
//! Qt Creator writes its machine-local settings under ~/.config/QtProject/
//! on first run; the generated project file must reference identifiers
//! stored there.

use anyhow::{Context, Result};
use std::path::PathBuf;

/// Get the QtProject settings directory (~/.config/QtProject/)
pub fn qtproject_dir() -> Result<PathBuf> {
    let home = dirs::home_dir().context("Could not determine home directory")?;
    Ok(home.join(".config").join("QtProject"))
}

/// Get the QtCreator.ini file holding the environment identifier
pub fn qtcreator_ini() -> Result<PathBuf> {
    Ok(qtproject_dir()?.join("QtCreator.ini"))
}

/// Get the profiles.xml file holding the kit identifier and tool version
pub fn qtcreator_profiles() -> Result<PathBuf> {
    Ok(qtproject_dir()?.join("qtcreator").join("profiles.xml"))
}
