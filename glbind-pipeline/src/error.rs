use std::{fmt, sync::Arc};

use glbind_core::InvalidVersionRange;
use miette::Diagnostic;
use thiserror::Error;

/// Result type for pipeline operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Which typemap stage failed to resolve a type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypemapStage {
    /// Native type → canonical type.
    Api,
    /// Canonical type → target-language type.
    Language,
}

impl fmt::Display for TypemapStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypemapStage::Api => write!(f, "API"),
            TypemapStage::Language => write!(f, "language"),
        }
    }
}

/// Fatal pipeline errors.
///
/// The error is `Clone` so a failed generator can cache the terminal
/// outcome and re-surface the same error on every later load attempt.
/// Failures are a deterministic function of the input files; there is
/// nothing transient to retry.
#[derive(Debug, Clone, Error, Diagnostic)]
pub enum Error {
    /// A specification, typemap, or override file failed to read or parse.
    #[error("failed to load generator inputs")]
    #[diagnostic(code(glbind::spec))]
    Spec(#[source] Arc<glbind_spec::Error>),

    #[error(transparent)]
    InvalidVersionRange(#[from] InvalidVersionRange),

    #[error("unknown profile '{profile}' referenced by '{referenced_by}'")]
    #[diagnostic(
        code(glbind::unknown_profile),
        help("declare the profile in the specification file or fix the base-profile reference")
    )]
    UnknownProfile {
        profile: String,
        referenced_by: String,
    },

    #[error("cyclic profile inheritance: {}", chain.join(" -> "))]
    #[diagnostic(code(glbind::cyclic_profiles))]
    CyclicProfileInheritance { chain: Vec<String> },

    #[error("no {stage} typemap entry for '{ty}', referenced by '{entity}'")]
    #[diagnostic(
        code(glbind::unresolved_type),
        help("add the missing entry to the typemap file")
    )]
    UnresolvedType {
        ty: String,
        stage: TypemapStage,
        entity: String,
    },

    #[error("duplicate output identifier '{name}': '{first}' and '{second}' are distinct native entities")]
    #[diagnostic(code(glbind::duplicate_identifier))]
    DuplicateIdentifier {
        name: String,
        first: String,
        second: String,
    },
}

impl From<Box<glbind_spec::Error>> for Error {
    fn from(e: Box<glbind_spec::Error>) -> Self {
        Error::Spec(Arc::from(e))
    }
}
