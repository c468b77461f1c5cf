//! Generation pipeline for the glbind binding generator.
//!
//! This crate turns parsed specification inputs into the canonical,
//! immutable binding collections an emitter consumes. One [`Generator`] per
//! API identifier drives the whole pipeline through a single idempotent
//! load:
//!
//! ```text
//! spec + overrides + typemaps
//!     → resolve (profile chain, version range)
//!     → patch (ordered overrides, per-field last-write-wins)
//!     → collect (type resolution, prefix stripping, alias merging)
//!     → EnumCollection / FunctionCollection / DelegateCollection
//! ```
//!
//! # Example
//!
//! ```ignore
//! use glbind_pipeline::{Generator, GeneratorConfig};
//!
//! let generator = Generator::new(GeneratorConfig::gl4(spec_dir));
//! let api = generator.load()?;
//! for diag in &api.diagnostics {
//!     eprintln!("{diag}");
//! }
//! for (name, entry) in api.enums.iter() {
//!     // hand off to the emitter
//! }
//! ```

// Miette's derive macro generates code that triggers these warnings
#![allow(unused_assignments)]

mod config;
mod diagnostic;
mod error;
mod generator;
pub mod phases;
mod typemap;

pub use config::GeneratorConfig;
pub use diagnostic::{Diagnostic, Severity};
pub use error::{Error, Result, TypemapStage};
pub use generator::{Generator, LoadedApi};
pub use typemap::TypemapRegistry;
