//! Override file parsing.
//!
//! Override files carry ordered, keyed patches applied to resolved entities
//! after profile resolution. Application order is file-list order, then
//! declaration order within a file; conflict resolution between patches is
//! the pipeline's concern, not the parser's.

use std::path::{Path, PathBuf};

use glbind_core::TypeRef;
use serde::Deserialize;

use crate::{Error, Result};

/// A patch to one parameter of a function entry.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ParamPatch {
    /// Zero-based parameter index this patch applies to.
    pub index: usize,
    /// The length of this parameter is carried by the parameter at the
    /// given index.
    #[serde(default)]
    pub length_from: Option<usize>,
    /// The parameter points at a fixed number of elements.
    #[serde(default)]
    pub length: Option<u32>,
}

/// A keyed patch against a single specification entity.
///
/// Every field is optional; absent fields leave the corresponding entity
/// field untouched.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct OverridePatch {
    /// Native name of the entity this patch targets.
    pub target: String,
    /// Native parameter type spellings, to disambiguate overloaded
    /// functions. A patch without a signature matches by name alone.
    #[serde(default)]
    pub signature: Option<Vec<String>>,
    /// Replacement output identifier, used verbatim (no prefix stripping).
    #[serde(default)]
    pub rename: Option<String>,
    #[serde(default)]
    pub obsolete: Option<bool>,
    /// Corrected numeric value for an enum entry.
    #[serde(default)]
    pub value: Option<i64>,
    /// Replacement return type for a function entry.
    #[serde(default)]
    pub returns: Option<TypeRef>,
    #[serde(default)]
    pub params: Vec<ParamPatch>,
}

#[derive(Debug, Deserialize)]
struct OverrideFile {
    #[serde(default)]
    overrides: Vec<OverridePatch>,
}

/// An override patch together with the file it came from, for diagnostics.
#[derive(Debug, Clone)]
pub struct SourcedOverride {
    pub file: String,
    pub patch: OverridePatch,
}

/// The ordered set of overrides loaded from a list of files.
#[derive(Debug, Clone, Default)]
pub struct OverrideSet {
    entries: Vec<SourcedOverride>,
}

impl OverrideSet {
    /// Load overrides from the given files, in list order.
    pub fn load(paths: &[PathBuf]) -> Result<Self> {
        let mut set = OverrideSet::default();
        for path in paths {
            set.push_file_path(path)?;
        }
        Ok(set)
    }

    /// Append all patches from one override file.
    pub fn push_file_path(&mut self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            Box::new(Error::Io {
                path: path.to_path_buf(),
                source: e,
            })
        })?;
        self.push_file(&content, &path.display().to_string())
    }

    /// Append patches parsed from a string, with a filename for reporting.
    pub fn push_file(&mut self, content: &str, filename: &str) -> Result<()> {
        let file: OverrideFile =
            toml::from_str(content).map_err(|e| Error::parse(e, content, filename))?;
        for patch in &file.overrides {
            if patch.target.is_empty() {
                return Err(Error::malformed(
                    "override with empty target",
                    "target",
                    content,
                    filename,
                ));
            }
        }
        self.entries.extend(file.overrides.into_iter().map(|patch| SourcedOverride {
            file: filename.to_string(),
            patch,
        }));
        Ok(())
    }

    pub fn iter(&self) -> impl Iterator<Item = &SourcedOverride> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
