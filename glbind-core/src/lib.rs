//! Core value types for the glbind binding generator.
//!
//! This crate provides the fundamental types shared across the glbind
//! pipeline: API versions and version ranges, structured native type
//! references, and identifier helpers.

mod naming;
mod typeref;
mod version;

pub use naming::{safe_identifier, trim_prefix};
pub use typeref::TypeRef;
pub use version::{InvalidVersionRange, Version, VersionRange};
