//! Typemap file parsing.

use std::{path::Path, str::FromStr};

use indexmap::IndexMap;
use serde::Deserialize;

use crate::{Error, Result};

/// One stage of type mapping: an ordered set of (source spelling, target
/// spelling) pairs.
///
/// The same file format serves both stages: the API typemap maps native
/// types to canonical types, the language typemap maps canonical types to
/// target-language types. Keys may be bare type names ("GLenum") or
/// composed spellings ("GLchar*"); composed entries take precedence during
/// resolution.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Typemap {
    #[serde(default)]
    types: IndexMap<String, String>,
}

impl FromStr for Typemap {
    type Err = Box<Error>;

    fn from_str(s: &str) -> Result<Self> {
        Typemap::from_str_with_filename(s, "typemap.toml")
    }
}

impl Typemap {
    /// Parse a typemap file from the given path.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            Box::new(Error::Io {
                path: path.to_path_buf(),
                source: e,
            })
        })?;
        Self::from_str_with_filename(&content, &path.display().to_string())
    }

    /// Parse from a string with a custom filename for error reporting.
    pub fn from_str_with_filename(content: &str, filename: &str) -> Result<Self> {
        let typemap: Typemap =
            toml::from_str(content).map_err(|e| Error::parse(e, content, filename))?;
        for (source, target) in &typemap.types {
            if source.is_empty() || target.is_empty() {
                return Err(Error::malformed(
                    "typemap entry with empty source or target",
                    source,
                    content,
                    filename,
                ));
            }
        }
        Ok(typemap)
    }

    pub fn get(&self, spelling: &str) -> Option<&str> {
        self.types.get(spelling).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.types.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    /// The underlying dictionary, in declaration order.
    pub fn entries(&self) -> &IndexMap<String, String> {
        &self.types
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_typemap() {
        let typemap: Typemap = r#"
            [types]
            GLenum = "u32"
            GLint = "i32"
            "GLchar*" = "CharPtr"
        "#
        .parse()
        .unwrap();

        assert_eq!(typemap.len(), 3);
        assert_eq!(typemap.get("GLenum"), Some("u32"));
        assert_eq!(typemap.get("GLchar*"), Some("CharPtr"));
        assert_eq!(typemap.get("GLfloat"), None);
    }

    #[test]
    fn test_declaration_order_preserved() {
        let typemap: Typemap = r#"
            [types]
            GLsizei = "i32"
            GLenum = "u32"
        "#
        .parse()
        .unwrap();
        let keys: Vec<&str> = typemap.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["GLsizei", "GLenum"]);
    }

    #[test]
    fn test_empty_target_rejected() {
        let err = Typemap::from_str_with_filename("[types]\nGLenum = \"\"\n", "gl.tm.toml")
            .unwrap_err();
        assert!(matches!(*err, Error::Malformed { .. }));
    }

    #[test]
    fn test_empty_file() {
        let typemap: Typemap = "".parse().unwrap();
        assert!(typemap.is_empty());
    }
}
