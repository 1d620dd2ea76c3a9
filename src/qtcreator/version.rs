//! Qt Creator version handling
//!
//! Versions are compared as three numeric components; short strings are
//! zero-padded so "4.8" and "4.8.0" are the same version.

/// A three-component Qt Creator version
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Version([u32; 3]);

impl Version {
    /// Parse a dotted version string, padding missing components with zeros.
    /// Returns None on any non-numeric component or more than three of them.
    pub fn parse(s: &str) -> Option<Self> {
        let mut parts = [0u32; 3];
        let mut count = 0;

        for part in s.trim().split('.') {
            if count == 3 {
                return None;
            }
            parts[count] = part.parse().ok()?;
            count += 1;
        }

        if count == 0 {
            return None;
        }
        Some(Self(parts))
    }

    /// Whether major and minor components match the given version string
    /// (patch releases share a project-file format)
    pub fn matches_minor(&self, other: &str) -> bool {
        match Self::parse(other) {
            Some(v) => self.0[0] == v.0[0] && self.0[1] == v.0[1],
            None => false,
        }
    }

    /// Whether this version is at least the given version string
    pub fn at_least(&self, other: &str) -> bool {
        match Self::parse(other) {
            Some(v) => self.0 >= v.0,
            None => false,
        }
    }
}

impl std::fmt::Display for Version {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}.{}.{}", self.0[0], self.0[1], self.0[2])
    }
}
