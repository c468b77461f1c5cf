//! Specification, override, and typemap file parsing for glbind.
//!
//! This crate is the file-reading layer of the generator: it turns the
//! three kinds of input file (API specification, override files, typemap
//! files) into raw entity and patch records. No cross-entity resolution
//! happens here; that is the pipeline's job. Parse errors name the
//! offending file and location.

// Miette's derive macro generates code that triggers these warnings
#![allow(unused_assignments)]

mod document;
mod error;
mod overrides;
mod typemap;

pub use document::SpecDocument;
pub use error::{Error, Result};
pub use overrides::{OverridePatch, OverrideSet, ParamPatch, SourcedOverride};
pub use typemap::Typemap;
