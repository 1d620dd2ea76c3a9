//! CMakeCache.txt lookup
//!
//! Fallback used when the manifest does not set CMAKE_BUILD_TYPE: a
//! previous configure run may have recorded it in the build directory.

use std::fs;
use std::path::Path;

/// Read the build type recorded in `<build_dir>/CMakeCache.txt`, if any
pub fn build_type_from_cache(build_dir: &Path) -> Option<String> {
    let content = fs::read_to_string(build_dir.join("CMakeCache.txt")).ok()?;

    for line in content.lines() {
        if line.starts_with("CMAKE_BUILD_TYPE") {
            let value = line.rsplit('=').next().unwrap_or("");
            if value.is_empty() {
                return None;
            }
            return Some(value.to_string());
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_cache(dir: &Path, content: &str) {
        fs::write(dir.join("CMakeCache.txt"), content).unwrap();
    }

    #[test]
    fn test_build_type_found() {
        let dir = tempfile::tempdir().unwrap();
        write_cache(
            dir.path(),
            "CMAKE_ADDR2LINE:FILEPATH=/usr/bin/addr2line\nCMAKE_BUILD_TYPE:STRING=Release\n",
        );
        assert_eq!(
            build_type_from_cache(dir.path()).as_deref(),
            Some("Release")
        );
    }

    #[test]
    fn test_build_type_empty_value() {
        let dir = tempfile::tempdir().unwrap();
        write_cache(dir.path(), "CMAKE_BUILD_TYPE:STRING=\n");
        assert!(build_type_from_cache(dir.path()).is_none());
    }

    #[test]
    fn test_no_cache_file() {
        let dir = tempfile::tempdir().unwrap();
        assert!(build_type_from_cache(dir.path()).is_none());
    }
}
