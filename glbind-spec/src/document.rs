//! Specification document parsing.

use std::{collections::HashSet, path::Path, str::FromStr};

use glbind_ir::{EnumEntry, FunctionEntry, ProfileDef};
use serde::Deserialize;

use crate::{Error, Result};

/// A parsed specification file: profile declarations plus the full raw set
/// of enum and function entries across all profiles and versions.
///
/// Parsing performs structural validation only (required fields present,
/// value syntax parseable, no duplicate profile declarations). Profile and
/// version filtering is the pipeline's job. The document is read-only once
/// parsed and safe to share across concurrent generator contexts.
#[derive(Debug, Clone, Deserialize)]
pub struct SpecDocument {
    #[serde(default)]
    pub profiles: Vec<ProfileDef>,
    #[serde(default)]
    pub enums: Vec<EnumEntry>,
    #[serde(default)]
    pub functions: Vec<FunctionEntry>,
}

impl FromStr for SpecDocument {
    type Err = Box<Error>;

    fn from_str(s: &str) -> Result<Self> {
        parse_document(s, "spec.toml")
    }
}

impl SpecDocument {
    /// Parse a specification file from the given path.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            Box::new(Error::Io {
                path: path.to_path_buf(),
                source: e,
            })
        })?;
        parse_document(&content, &path.display().to_string())
    }

    /// Parse from a string with a custom filename for error reporting.
    pub fn from_str_with_filename(content: &str, filename: &str) -> Result<Self> {
        parse_document(content, filename)
    }

    /// Look up a profile declaration by name.
    pub fn profile(&self, name: &str) -> Option<&ProfileDef> {
        self.profiles.iter().find(|p| p.name == name)
    }
}

fn parse_document(content: &str, filename: &str) -> Result<SpecDocument> {
    let document: SpecDocument =
        toml::from_str(content).map_err(|e| Error::parse(e, content, filename))?;
    validate_document(&document, content, filename)?;
    Ok(document)
}

/// Structural validation beyond what serde enforces.
fn validate_document(document: &SpecDocument, src: &str, filename: &str) -> Result<()> {
    let mut seen_profiles = HashSet::new();
    for profile in &document.profiles {
        if profile.name.is_empty() {
            return Err(Error::malformed("profile with empty name", "", src, filename));
        }
        if !seen_profiles.insert(profile.name.as_str()) {
            return Err(Error::malformed(
                format!("profile '{}' declared more than once", profile.name),
                &profile.name,
                src,
                filename,
            ));
        }
        if profile.base.as_deref() == Some("") {
            return Err(Error::malformed(
                format!("profile '{}' has an empty base reference", profile.name),
                &profile.name,
                src,
                filename,
            ));
        }
    }

    for entry in &document.enums {
        if entry.name.is_empty() {
            return Err(Error::malformed("enum with empty name", "", src, filename));
        }
        if entry.profile.is_empty() {
            return Err(Error::malformed(
                format!("enum '{}' has an empty profile tag", entry.name),
                &entry.name,
                src,
                filename,
            ));
        }
    }

    for entry in &document.functions {
        if entry.name.is_empty() {
            return Err(Error::malformed("function with empty name", "", src, filename));
        }
        if entry.profile.is_empty() {
            return Err(Error::malformed(
                format!("function '{}' has an empty profile tag", entry.name),
                &entry.name,
                src,
                filename,
            ));
        }
        for param in &entry.params {
            if param.name.is_empty() {
                return Err(Error::malformed(
                    format!("function '{}' has a parameter with no name", entry.name),
                    &entry.name,
                    src,
                    filename,
                ));
            }
        }
    }

    Ok(())
}
