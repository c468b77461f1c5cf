//! Raw specification entity records.
//!
//! These are the immutable value records produced by parsing a
//! specification file, before any profile resolution, override patching, or
//! type resolution has happened.

use std::fmt;

use glbind_core::{TypeRef, Version};
use serde::{Deserialize, Deserializer, de};

/// A profile declared in the specification, optionally inheriting from a
/// base profile.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ProfileDef {
    pub name: String,
    /// The profile this one is a subset of, if any. Absence is structurally
    /// distinct from an empty reference.
    #[serde(default)]
    pub base: Option<String>,
}

/// An enumerant entry: a named integer constant scoped to a profile and a
/// version window.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct EnumEntry {
    pub name: String,
    pub value: i64,
    pub profile: String,
    pub introduced: Version,
    #[serde(default)]
    pub removed: Option<Version>,
}

/// How the length of a pointer parameter is determined.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParamLen {
    /// A fixed element count.
    Count(u32),
    /// The length is carried by the named sibling parameter.
    Named(String),
    /// The length is carried by the parameter at this index. Only produced
    /// by override patches, never parsed from a specification file.
    Index(usize),
}

impl fmt::Display for ParamLen {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParamLen::Count(n) => write!(f, "{}", n),
            ParamLen::Named(name) => write!(f, "{}", name),
            ParamLen::Index(i) => write!(f, "#{}", i),
        }
    }
}

impl<'de> Deserialize<'de> for ParamLen {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct LenVisitor;

        impl de::Visitor<'_> for LenVisitor {
            type Value = ParamLen;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("an element count or a parameter name")
            }

            fn visit_i64<E: de::Error>(self, v: i64) -> Result<ParamLen, E> {
                let n = u32::try_from(v)
                    .map_err(|_| E::custom(format!("invalid length count {}", v)))?;
                Ok(ParamLen::Count(n))
            }

            fn visit_u64<E: de::Error>(self, v: u64) -> Result<ParamLen, E> {
                let n = u32::try_from(v)
                    .map_err(|_| E::custom(format!("invalid length count {}", v)))?;
                Ok(ParamLen::Count(n))
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<ParamLen, E> {
                Ok(ParamLen::Named(v.to_string()))
            }
        }

        deserializer.deserialize_any(LenVisitor)
    }
}

/// A single function parameter: a name, a native type reference, and an
/// optional array/length hint.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Parameter {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: TypeRef,
    #[serde(default)]
    pub length: Option<ParamLen>,
}

/// A native function entry.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct FunctionEntry {
    pub name: String,
    pub profile: String,
    pub introduced: Version,
    #[serde(default)]
    pub removed: Option<Version>,
    pub returns: TypeRef,
    #[serde(default)]
    pub params: Vec<Parameter>,
    /// Extension suffix carried by the native name ("ARB", "EXT", ...), if
    /// this entry comes from an extension.
    #[serde(default)]
    pub extension: Option<String>,
}

impl FunctionEntry {
    /// The native parameter type spellings, used to key overloads.
    pub fn signature(&self) -> Vec<String> {
        self.params.iter().map(|p| p.ty.to_string()).collect()
    }

    /// The entry-point name with any extension suffix stripped.
    ///
    /// `glDrawArraysEXT` with extension "EXT" names the same underlying
    /// entry point as `glDrawArrays`.
    pub fn canonical_name(&self) -> &str {
        match &self.extension {
            Some(ext) => self.name.strip_suffix(ext.as_str()).unwrap_or(&self.name),
            None => &self.name,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_enum_entry_deserialize() {
        let entry: EnumEntry = toml::from_str(
            r#"
            name = "GL_TRIANGLES"
            value = 0x0004
            profile = "gl"
            introduced = "1.0"
        "#,
        )
        .unwrap();
        assert_eq!(entry.name, "GL_TRIANGLES");
        assert_eq!(entry.value, 4);
        assert_eq!(entry.removed, None);
    }

    #[test]
    fn test_function_entry_deserialize() {
        let entry: FunctionEntry = toml::from_str(
            r#"
            name = "glDrawArrays"
            profile = "gl"
            introduced = "1.1"
            returns = "void"

            [[params]]
            name = "mode"
            type = "GLenum"

            [[params]]
            name = "first"
            type = "GLint"
            length = 1

            [[params]]
            name = "count"
            type = "GLsizei"
        "#,
        )
        .unwrap();
        assert_eq!(entry.params.len(), 3);
        assert_eq!(entry.params[1].length, Some(ParamLen::Count(1)));
        assert_eq!(entry.signature(), vec!["GLenum", "GLint", "GLsizei"]);
    }

    #[test]
    fn test_param_len_named() {
        let param: Parameter = toml::from_str(
            r#"
            name = "pointer"
            type = "const GLvoid*"
            length = "count"
        "#,
        )
        .unwrap();
        assert_eq!(param.length, Some(ParamLen::Named("count".into())));
    }

    #[test]
    fn test_canonical_name() {
        let mut entry: FunctionEntry = toml::from_str(
            r#"
            name = "glGenBuffersARB"
            profile = "gl"
            introduced = "1.5"
            returns = "void"
            extension = "ARB"
        "#,
        )
        .unwrap();
        assert_eq!(entry.canonical_name(), "glGenBuffers");

        entry.extension = None;
        assert_eq!(entry.canonical_name(), "glGenBuffersARB");
    }
}
