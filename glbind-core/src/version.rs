use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize, Serializer};
use thiserror::Error;

/// An API version in `major.minor` form (e.g. "1.0", "4.6").
///
/// Versions order lexicographically on (major, minor), which matches the
/// numbering of the GL and GLES registries.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize)]
#[serde(try_from = "String")]
pub struct Version {
    major: u16,
    minor: u16,
}

impl TryFrom<String> for Version {
    type Error = String;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl Serialize for Version {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl Version {
    pub fn new(major: u16, minor: u16) -> Self {
        Self { major, minor }
    }

    pub fn major(&self) -> u16 {
        self.major
    }

    pub fn minor(&self) -> u16 {
        self.minor
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.major, self.minor)
    }
}

impl FromStr for Version {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.split('.').collect();
        if parts.len() != 2 {
            return Err(format!("invalid version '{}', expected 'X.Y'", s));
        }
        Ok(Self {
            major: parts[0].parse().map_err(|_| "invalid major")?,
            minor: parts[1].parse().map_err(|_| "invalid minor")?,
        })
    }
}

/// Error returned when a version range is constructed with min > max.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid version range: minimum {min} is greater than maximum {max}")]
pub struct InvalidVersionRange {
    pub min: Version,
    pub max: Version,
}

/// An inclusive version range used to filter specification entities.
///
/// Invariant: `min <= max`, enforced at construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct VersionRange {
    min: Version,
    max: Version,
}

impl VersionRange {
    /// Create a range, failing if `min > max`.
    pub fn new(min: Version, max: Version) -> Result<Self, InvalidVersionRange> {
        if min > max {
            return Err(InvalidVersionRange { min, max });
        }
        Ok(Self { min, max })
    }

    pub fn min(&self) -> Version {
        self.min
    }

    pub fn max(&self) -> Version {
        self.max
    }

    /// Whether an entity introduced at `introduced` and removed at `removed`
    /// (if ever) is alive anywhere within this range.
    ///
    /// An entity qualifies when it was introduced no later than `max` and,
    /// if removed, the removal happened strictly after `min`.
    pub fn admits(&self, introduced: Version, removed: Option<Version>) -> bool {
        if introduced > self.max {
            return false;
        }
        match removed {
            Some(removed) => removed > self.min,
            None => true,
        }
    }
}

impl fmt::Display for VersionRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.min, self.max)
    }
}
