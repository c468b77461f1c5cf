//! Entity records and canonical collections for the glbind generator.
//!
//! This crate provides the type definitions shared across the glbind
//! pipeline: the raw entity records a specification file parses into, and
//! the immutable collections a successful pipeline run produces.
//!
//! # Architecture
//!
//! ```text
//! spec files (TOML) → glbind-spec (parsing) → glbind-ir (entities)
//!                   → glbind-pipeline (resolution) → glbind-ir (collections)
//! ```

mod collections;
mod entity;

pub use collections::{
    Delegate, DelegateCollection, EnumCollection, FunctionCollection, FunctionGroup,
    ResolvedEnum, ResolvedFunction, ResolvedParameter,
};
pub use entity::{EnumEntry, FunctionEntry, ParamLen, Parameter, ProfileDef};
