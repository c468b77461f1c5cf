use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize, Serializer};

/// A structured reference to a native type spelling.
///
/// Specification files spell parameter and return types the way a C header
/// would: a base type name with optional `const`, pointer (`*`) and fixed
/// array (`[N]`) qualifiers, e.g. `"const GLfloat*"` or `"GLuint[4]"`.
/// Qualifiers are preserved through typemap resolution and re-composed onto
/// the mapped base type.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize)]
#[serde(try_from = "String")]
pub struct TypeRef {
    base: String,
    pointer_depth: u8,
    array_size: Option<u32>,
    is_const: bool,
}

impl TypeRef {
    /// A bare type name with no qualifiers.
    pub fn plain(base: impl Into<String>) -> Self {
        Self {
            base: base.into(),
            pointer_depth: 0,
            array_size: None,
            is_const: false,
        }
    }

    pub fn base(&self) -> &str {
        &self.base
    }

    pub fn pointer_depth(&self) -> u8 {
        self.pointer_depth
    }

    pub fn array_size(&self) -> Option<u32> {
        self.array_size
    }

    pub fn is_const(&self) -> bool {
        self.is_const
    }

    pub fn is_pointer(&self) -> bool {
        self.pointer_depth > 0
    }

    /// The same qualifiers composed onto a different base type name.
    pub fn with_base(&self, base: impl Into<String>) -> Self {
        Self {
            base: base.into(),
            ..self.clone()
        }
    }
}

impl fmt::Display for TypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_const {
            write!(f, "const ")?;
        }
        write!(f, "{}", self.base)?;
        for _ in 0..self.pointer_depth {
            write!(f, "*")?;
        }
        if let Some(n) = self.array_size {
            write!(f, "[{}]", n)?;
        }
        Ok(())
    }
}

impl Serialize for TypeRef {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl TryFrom<String> for TypeRef {
    type Error = String;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl FromStr for TypeRef {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut rest = s.trim();
        let is_const = if let Some(stripped) = rest.strip_prefix("const ") {
            rest = stripped.trim_start();
            true
        } else {
            false
        };

        // Trailing array qualifier first, then pointer stars.
        let array_size = match rest.rfind('[') {
            Some(open) => {
                let inner = rest[open + 1..]
                    .strip_suffix(']')
                    .ok_or_else(|| format!("unterminated array qualifier in '{}'", s))?;
                let n: u32 = inner
                    .trim()
                    .parse()
                    .map_err(|_| format!("invalid array size '{}' in '{}'", inner, s))?;
                rest = rest[..open].trim_end();
                Some(n)
            }
            None => None,
        };

        let mut pointer_depth: u8 = 0;
        while let Some(stripped) = rest.strip_suffix('*') {
            pointer_depth = pointer_depth
                .checked_add(1)
                .ok_or_else(|| format!("too many pointer qualifiers in '{}'", s))?;
            rest = stripped.trim_end();
        }

        if rest.is_empty() || !rest.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
            return Err(format!("invalid type name '{}'", s));
        }

        Ok(Self {
            base: rest.to_string(),
            pointer_depth,
            array_size,
            is_const,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_plain() {
        let ty: TypeRef = "GLenum".parse().unwrap();
        assert_eq!(ty.base(), "GLenum");
        assert_eq!(ty.pointer_depth(), 0);
        assert_eq!(ty.array_size(), None);
        assert!(!ty.is_const());
    }

    #[test]
    fn test_parse_pointer() {
        let ty: TypeRef = "GLchar**".parse().unwrap();
        assert_eq!(ty.base(), "GLchar");
        assert_eq!(ty.pointer_depth(), 2);
        assert!(ty.is_pointer());
    }

    #[test]
    fn test_parse_const_pointer() {
        let ty: TypeRef = "const GLfloat*".parse().unwrap();
        assert_eq!(ty.base(), "GLfloat");
        assert_eq!(ty.pointer_depth(), 1);
        assert!(ty.is_const());
    }

    #[test]
    fn test_parse_array() {
        let ty: TypeRef = "GLuint[4]".parse().unwrap();
        assert_eq!(ty.base(), "GLuint");
        assert_eq!(ty.array_size(), Some(4));
    }

    #[test]
    fn test_parse_spaced_pointer() {
        let ty: TypeRef = "GLvoid *".parse().unwrap();
        assert_eq!(ty.base(), "GLvoid");
        assert_eq!(ty.pointer_depth(), 1);
    }

    #[test]
    fn test_parse_invalid() {
        assert!("".parse::<TypeRef>().is_err());
        assert!("GLuint[".parse::<TypeRef>().is_err());
        assert!("GLuint[x]".parse::<TypeRef>().is_err());
        assert!("GL enum".parse::<TypeRef>().is_err());
    }

    #[test]
    fn test_pointer_depth_is_bounded() {
        let spelling = format!("GLuint{}", "*".repeat(300));
        assert!(spelling.parse::<TypeRef>().is_err());
    }

    #[test]
    fn test_display_round_trip() {
        for spelling in ["GLenum", "GLchar**", "const GLfloat*", "GLuint[4]"] {
            let ty: TypeRef = spelling.parse().unwrap();
            assert_eq!(ty.to_string(), spelling);
        }
    }

    #[test]
    fn test_with_base_keeps_qualifiers() {
        let ty: TypeRef = "const GLfloat*".parse().unwrap();
        let mapped = ty.with_base("f32");
        assert_eq!(mapped.to_string(), "const f32*");
    }
}
