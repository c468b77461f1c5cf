//! Per-API generator configuration.
//!
//! One configuration value per generated API surface (GL, GL4, ES10, ...).
//! Behavior across API families differs only in these values; the pipeline
//! itself is a single implementation driven by the config.

use std::path::{Path, PathBuf};

use glbind_core::{Version, VersionRange};

/// Configuration for one API identifier.
///
/// Constructed once from external settings (or one of the presets) and
/// never mutated; the owning [`crate::Generator`] only hands out shared
/// references.
#[derive(Debug, Clone)]
pub struct GeneratorConfig {
    /// Short identifier for the API surface ("GL", "GL4", "ES20", ...).
    pub api_identifier: String,
    /// Namespace/module path the generated items should live in.
    pub namespace: String,
    /// Subfolder the emitter writes generated files into.
    pub output_subfolder: String,
    /// Name of the generated top-level class/struct.
    pub class_name: String,
    /// Prefix carried by native function names ("gl").
    pub function_prefix: String,
    /// Prefix carried by native constant names ("GL_").
    pub constant_prefix: String,
    /// The registry profile to resolve ("gl", "glcore", "gles1", "gles2").
    pub profile_name: String,
    /// The profile this one inherits from, overriding any base declared in
    /// the specification file. `None` means the spec's own declaration (or
    /// no base at all) applies.
    pub base_profile_name: Option<String>,
    /// Versions to generate for.
    pub versions: VersionRange,
    pub spec_file: PathBuf,
    pub api_typemap: PathBuf,
    pub language_typemap: PathBuf,
    /// Override files, applied in list order.
    pub override_files: Vec<PathBuf>,
}

impl GeneratorConfig {
    fn preset(
        spec_dir: &Path,
        api_identifier: &str,
        profile_name: &str,
        base_profile_name: Option<&str>,
        versions: VersionRange,
    ) -> Self {
        Self {
            api_identifier: api_identifier.to_string(),
            namespace: format!("graphics::{}", api_identifier.to_ascii_lowercase()),
            output_subfolder: api_identifier.to_string(),
            class_name: "GL".to_string(),
            function_prefix: "gl".to_string(),
            constant_prefix: "GL_".to_string(),
            profile_name: profile_name.to_string(),
            base_profile_name: base_profile_name.map(str::to_string),
            versions,
            spec_file: spec_dir.join("gl.toml"),
            api_typemap: spec_dir.join("gl.tm.toml"),
            language_typemap: spec_dir.join("language.tm.toml"),
            override_files: Vec::new(),
        }
    }

    /// Desktop OpenGL 1.0-2.1, compatibility profile.
    pub fn gl2(spec_dir: &Path) -> Self {
        Self::preset(spec_dir, "GL2", "gl", None, range(1, 0, 2, 1))
    }

    /// Desktop OpenGL core profile up to 4.6, inheriting the compatibility
    /// profile's entities.
    pub fn gl4(spec_dir: &Path) -> Self {
        Self::preset(spec_dir, "GL4", "glcore", Some("gl"), range(1, 0, 4, 6))
    }

    /// OpenGL ES 1.0/1.1.
    pub fn es10(spec_dir: &Path) -> Self {
        Self::preset(spec_dir, "ES10", "gles1", None, range(1, 0, 1, 1))
    }

    /// OpenGL ES 2.0.
    pub fn es20(spec_dir: &Path) -> Self {
        Self::preset(spec_dir, "ES20", "gles2", None, range(2, 0, 2, 0))
    }

    /// OpenGL ES 3.0-3.2.
    pub fn es30(spec_dir: &Path) -> Self {
        Self::preset(spec_dir, "ES30", "gles2", None, range(2, 0, 3, 2))
    }
}

fn range(min_major: u16, min_minor: u16, max_major: u16, max_minor: u16) -> VersionRange {
    VersionRange::new(
        Version::new(min_major, min_minor),
        Version::new(max_major, max_minor),
    )
    .expect("preset version range is ordered")
}
