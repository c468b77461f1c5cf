//! Identifier helpers for output name construction.

/// Strip a configured prefix from a native name.
///
/// Returns the name unchanged when the prefix does not match; stripping is
/// case-sensitive because registry prefixes ("gl", "GL_") are.
pub fn trim_prefix<'a>(name: &'a str, prefix: &str) -> &'a str {
    name.strip_prefix(prefix).unwrap_or(name)
}

/// Make a stripped name a legal identifier.
///
/// Constants like `GL_2D` lose their prefix and would start with a digit;
/// those get a leading underscore.
pub fn safe_identifier(name: &str) -> String {
    match name.chars().next() {
        Some(c) if c.is_ascii_digit() => format!("_{}", name),
        _ => name.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trim_prefix() {
        assert_eq!(trim_prefix("GL_TRIANGLES", "GL_"), "TRIANGLES");
        assert_eq!(trim_prefix("glDrawArrays", "gl"), "DrawArrays");
        assert_eq!(trim_prefix("EGL_DEPTH", "GL_"), "EGL_DEPTH");
    }

    #[test]
    fn test_safe_identifier() {
        assert_eq!(safe_identifier("TRIANGLES"), "TRIANGLES");
        assert_eq!(safe_identifier("2D"), "_2D");
        assert_eq!(safe_identifier("_ALREADY"), "_ALREADY");
    }
}
