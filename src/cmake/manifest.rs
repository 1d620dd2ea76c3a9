//! CMakeLists.txt scanning
//!
//! A single forward pass over the manifest lines extracts the few facts the
//! IDE configuration needs: project name, declared targets, build type and
//! the ROS packaging convention. This is a line-oriented keyword matcher,
//! not a CMake parser; nested parentheses are not handled.

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

/// ROS packaging convention declared in the manifest
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RosVersion {
    /// catkin_package() - ROS 1
    Ros1,
    /// ament_package() / ament_auto_package() - ROS 2
    Ros2,
}

impl std::fmt::Display for RosVersion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Ros1 => write!(f, "ROS 1"),
            Self::Ros2 => write!(f, "ROS 2"),
        }
    }
}

/// Facts extracted from a CMakeLists.txt file
///
/// Immutable once the scan completes.
#[derive(Debug, Default, Clone)]
pub struct ManifestFacts {
    /// First argument of the project() statement
    pub package_name: String,
    /// Whether any add_library() statement was found
    pub has_library: bool,
    /// Executable target names, in manifest order, duplicates kept.
    /// Names containing a `$` (build-system variables) are excluded since
    /// they are not resolvable executable paths.
    pub targets: Vec<String>,
    /// Value of set(CMAKE_BUILD_TYPE ...), if any
    pub build_type: Option<String>,
    /// Packaging convention; the first declaration of either kind wins
    pub ros: Option<RosVersion>,
}

impl ManifestFacts {
    /// Scan a manifest file on disk
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read: {}", path.as_ref().display()))?;
        Ok(scan(content.lines()))
    }

    /// Whether the manifest declares anything worth configuring run targets for
    pub fn has_build_targets(&self) -> bool {
        self.has_library || !self.targets.is_empty()
    }
}

/// Extract the text between the first `open` and the following `close`,
/// trimmed. Missing `open` yields an empty string; missing `close` yields
/// everything after `open`.
fn extract(s: &str, open: char, close: char) -> &str {
    let inner = s.split_once(open).map(|(_, rest)| rest).unwrap_or("");
    inner
        .split_once(close)
        .map(|(head, _)| head)
        .unwrap_or(inner)
        .trim()
}

/// Scan manifest lines into [`ManifestFacts`]
///
/// Each line is truncated at its first `#` before any keyword matching, so
/// keywords inside comments never contribute facts. `statement (` is
/// collapsed to `statement(` first.
pub fn scan<'a, I>(lines: I) -> ManifestFacts
where
    I: IntoIterator<Item = &'a str>,
{
    let mut facts = ManifestFacts::default();

    for raw in lines {
        let mut line = raw.split('#').next().unwrap_or("").to_string();
        while line.contains(" (") {
            line = line.replace(" (", "(");
        }

        if line.contains("project(") {
            let inner = extract(&line, '(', ')');
            if let Some(name) = inner.split_whitespace().next() {
                facts.package_name = name.to_string();
            }
        } else if line.contains("add_library(") {
            if keyword_not_commented(&line, "add_library") {
                facts.has_library = true;
            }
        } else if line.contains("add_executable(") {
            if keyword_not_commented(&line, "add_executable") {
                let inner = extract(&line, '(', ')');
                if let Some(target) = inner.split_whitespace().next() {
                    if !target.contains('$') {
                        facts.targets.push(target.to_string());
                    }
                }
            }
        } else if line.contains("CMAKE_BUILD_TYPE") && line.contains("set") {
            // the assignment keyword must come before the variable name
            if line.find("set") < line.find("CMAKE_BUILD_TYPE") {
                let inner = extract(&line, '(', ')');
                // second token is the value; a missing one leaves the field unset
                if let Some(value) = inner.split_whitespace().nth(1) {
                    let value = value.trim_matches(|c| c == '"' || c == '\'');
                    facts.build_type = Some(value.to_string());
                }
            }
        } else if facts.ros.is_none() {
            if line.contains("catkin_package") {
                facts.ros = Some(RosVersion::Ros1);
            } else if line.contains("ament_package") || line.contains("ament_auto_package") {
                facts.ros = Some(RosVersion::Ros2);
            }
        }
    }

    facts
}

/// Re-check that no comment marker precedes the keyword on the (already
/// comment-truncated) line.
fn keyword_not_commented(line: &str, keyword: &str) -> bool {
    match line.find(keyword) {
        Some(start) => !line[..start].contains('#'),
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract() {
        assert_eq!(extract("project(foo)", '(', ')'), "foo");
        assert_eq!(extract("project( foo )", '(', ')'), "foo");
        assert_eq!(extract("no parens here", '(', ')'), "");
        assert_eq!(extract("open(only", '(', ')'), "only");
    }

    #[test]
    fn test_basic_manifest() {
        let facts = scan(
            [
                "cmake_minimum_required(VERSION 3.5)",
                "project(foo)",
                "add_executable(foo_node src/foo_node.cpp)",
                "add_library(foo_lib src/lib.cpp)",
            ],
        );
        assert_eq!(facts.package_name, "foo");
        assert_eq!(facts.targets, vec!["foo_node"]);
        assert!(facts.has_library);
        assert!(facts.has_build_targets());
        assert!(facts.ros.is_none());
    }

    #[test]
    fn test_project_with_extra_arguments() {
        let facts = scan(["project(foo VERSION 1.2 LANGUAGES CXX)"]);
        assert_eq!(facts.package_name, "foo");
    }

    #[test]
    fn test_space_before_parenthesis() {
        let facts = scan(["project (foo)", "add_executable  (bar bar.cpp)"]);
        assert_eq!(facts.package_name, "foo");
        assert_eq!(facts.targets, vec!["bar"]);
    }

    #[test]
    fn test_no_targets() {
        let facts = scan(["project(headers_only)", "catkin_package()"]);
        assert!(facts.targets.is_empty());
        assert!(!facts.has_library);
        assert!(!facts.has_build_targets());
    }

    #[test]
    fn test_convention_first_wins_ros1_first() {
        let facts = scan(["catkin_package()", "ament_package()"]);
        assert_eq!(facts.ros, Some(RosVersion::Ros1));
    }

    #[test]
    fn test_convention_first_wins_ros2_first() {
        let facts = scan(["ament_package()", "catkin_package()"]);
        assert_eq!(facts.ros, Some(RosVersion::Ros2));
    }

    #[test]
    fn test_ament_auto_package() {
        let facts = scan(["ament_auto_package()"]);
        assert_eq!(facts.ros, Some(RosVersion::Ros2));
    }

    #[test]
    fn test_commented_lines_are_inert() {
        let facts = scan(
            [
                "# project(ghost)",
                "  # add_executable(ghost_node ghost.cpp)",
                "# add_library(ghost_lib ghost.cpp)",
                "# catkin_package()",
                "project(real)",
            ],
        );
        assert_eq!(facts.package_name, "real");
        assert!(facts.targets.is_empty());
        assert!(!facts.has_library);
        assert!(facts.ros.is_none());
    }

    #[test]
    fn test_trailing_comment_is_stripped() {
        let facts = scan(["project(foo) # was project(bar)"]);
        assert_eq!(facts.package_name, "foo");
    }

    #[test]
    fn test_variable_targets_excluded() {
        let facts = scan(
            [
                "add_executable(first first.cpp)",
                "add_executable(tool_${PROJECT_NAME} tool.cpp)",
                "add_executable(second second.cpp)",
            ],
        );
        assert_eq!(facts.targets, vec!["first", "second"]);
    }

    #[test]
    fn test_all_targets_excluded() {
        let facts = scan(["add_executable(tool_$ENV tool.cpp)"]);
        assert!(facts.targets.is_empty());
        assert!(!facts.has_build_targets());
    }

    #[test]
    fn test_duplicate_targets_kept() {
        let facts = scan(
            [
                "add_executable(node node.cpp)",
                "add_executable(node node_v2.cpp)",
            ],
        );
        assert_eq!(facts.targets, vec!["node", "node"]);
    }

    #[test]
    fn test_build_type() {
        let facts = scan(["set(CMAKE_BUILD_TYPE Release)"]);
        assert_eq!(facts.build_type.as_deref(), Some("Release"));
    }

    #[test]
    fn test_build_type_quoted() {
        let facts = scan(["set(CMAKE_BUILD_TYPE \"RelWithDebInfo\")"]);
        assert_eq!(facts.build_type.as_deref(), Some("RelWithDebInfo"));
        let facts = scan(["set(CMAKE_BUILD_TYPE 'Debug')"]);
        assert_eq!(facts.build_type.as_deref(), Some("Debug"));
    }

    #[test]
    fn test_build_type_parse_miss_is_silent() {
        // no value after the variable name: field stays unset
        let facts = scan(["set(CMAKE_BUILD_TYPE)"]);
        assert!(facts.build_type.is_none());
    }

    #[test]
    fn test_build_type_needs_set_before_variable() {
        let facts = scan(["message(CMAKE_BUILD_TYPE is set)"]);
        assert!(facts.build_type.is_none());
    }
}
