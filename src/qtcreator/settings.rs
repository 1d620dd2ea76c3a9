//! Qt Creator local settings
//!
//! The generated project file must carry the environment identifier from
//! QtCreator.ini and the kit identifier from profiles.xml. Both files are
//! written by Qt Creator itself on first run; if they are missing we launch
//! it once and poll until they appear.
//!
//! The two files are read by substring slicing rather than INI/XML parsing:
//! the fields we need are stable substrings, and a half-written file simply
//! fails to slice and keeps the poll loop going.

use anyhow::{Context, Result};
use std::path::Path;
use std::process::{Child, Command, Stdio};
use std::thread::sleep;
use std::time::Duration;
use std::fs;

use crate::config;
use crate::qtcreator::version::Version;

const ENV_ID_MARKER: &str = "Settings\\EnvironmentId=@ByteArray(";
const PROFILE_ID_MARKER: &str = "<value type=\"QString\" key=\"PE.Profile.Id\">";
const VERSION_MARKER: &str = "<!-- Written by QtCreator ";

/// Identifiers read from the local Qt Creator installation
#[derive(Debug, Clone)]
pub struct QtCreatorSettings {
    /// Machine-local environment identifier
    pub env_id: String,
    /// Identifier of the default kit (profile)
    pub profile_id: String,
    /// Qt Creator version that wrote the settings
    pub version: Version,
}

/// Slice the text between `start` and the following `end`; a missing `end`
/// yields everything after `start`.
fn slice_between<'a>(text: &'a str, start: &str, end: &str) -> Option<&'a str> {
    let after = text.split_once(start)?.1;
    Some(after.split_once(end).map(|(head, _)| head).unwrap_or(after))
}

/// Extract the settings from file contents, None while not yet complete
fn parse(ini: &str, profiles: &str) -> Option<QtCreatorSettings> {
    let env_id = slice_between(ini, ENV_ID_MARKER, ")")?;
    let profile_id = slice_between(profiles, PROFILE_ID_MARKER, "<")?;
    let version = Version::parse(slice_between(profiles, VERSION_MARKER, ", ")?)?;

    Some(QtCreatorSettings {
        env_id: env_id.to_string(),
        profile_id: profile_id.to_string(),
        version,
    })
}

fn try_read(ini_file: &Path, profiles_file: &Path) -> Option<QtCreatorSettings> {
    let ini = fs::read_to_string(ini_file).ok()?;
    let profiles = fs::read_to_string(profiles_file).ok()?;
    parse(&ini, &profiles)
}

/// Load the local settings, launching Qt Creator once if it has never run
///
/// Polls every second until both files are readable; the only way out of a
/// stuck wait is interrupting the process.
pub fn load_or_launch() -> Result<QtCreatorSettings> {
    let ini_file = config::qtcreator_ini()?;
    let profiles_file = config::qtcreator_profiles()?;

    let mut qt_proc: Option<Child> = None;

    let settings = loop {
        if qt_proc.is_none() && (!ini_file.exists() || !profiles_file.exists()) {
            println!("Will run Qt Creator once to generate its local configuration");
            sleep(Duration::from_secs(3));
            qt_proc = Some(
                Command::new("qtcreator")
                    .stdout(Stdio::null())
                    .stderr(Stdio::null())
                    .spawn()
                    .context("Failed to launch qtcreator")?,
            );
        }

        match try_read(&ini_file, &profiles_file) {
            Some(settings) => break settings,
            None => sleep(Duration::from_secs(1)),
        }
    };

    if let Some(mut child) = qt_proc {
        let _ = child.kill();
        let _ = child.wait();
    }

    Ok(settings)
}

#[cfg(test)]
mod tests {
    use super::*;

    const INI: &str = "[General]\n\
        Settings\\EnvironmentId=@ByteArray({2abc6ff9-75b5-4ba2-9b88-e48a43ec1c49})\n\
        OverrideLanguage=en\n";

    const PROFILES: &str = "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n\
        <!DOCTYPE QtCreatorProfiles>\n\
        <!-- Written by QtCreator 4.11.0, 2020-03-01T10:12:05. -->\n\
        <qtcreator>\n\
        <data>\n\
        <variable>Profile.0</variable>\n\
        <valuemap type=\"QVariantMap\">\n\
        <value type=\"QString\" key=\"PE.Profile.Id\">{68bf1776-hr73-4d31-b2f1-6d204ef11a76}</value>\n\
        </valuemap>\n\
        </data>\n\
        </qtcreator>\n";

    #[test]
    fn test_parse_settings() {
        let settings = parse(INI, PROFILES).unwrap();
        assert_eq!(settings.env_id, "{2abc6ff9-75b5-4ba2-9b88-e48a43ec1c49}");
        assert_eq!(
            settings.profile_id,
            "{68bf1776-hr73-4d31-b2f1-6d204ef11a76}"
        );
        assert_eq!(settings.version.to_string(), "4.11.0");
    }

    #[test]
    fn test_parse_incomplete_files() {
        assert!(parse("", PROFILES).is_none());
        assert!(parse(INI, "").is_none());
        // truncated mid-write: marker present, version line missing
        assert!(parse(INI, "<value type=\"QString\" key=\"PE.Profile.Id\">x<").is_none());
    }

    #[test]
    fn test_slice_between_missing_end() {
        assert_eq!(slice_between("key=(value", "key=(", ")"), Some("value"));
    }

    #[test]
    fn test_try_read_missing_files() {
        let dir = tempfile::tempdir().unwrap();
        assert!(try_read(&dir.path().join("QtCreator.ini"), &dir.path().join("profiles.xml")).is_none());
    }
}
