//! Pipeline phases.
//!
//! A load runs the phases in a fixed order:
//!
//! 1. [`resolve_profile`] - filter and merge entities for the requested
//!    profile chain and version range
//! 2. [`apply_overrides`] - patch the resolved entities from the ordered
//!    override set
//! 3. [`build_collections`] - resolve types and assemble the canonical
//!    output collections
//!
//! Phases communicate through [`EntitySet`], a mutable working set that
//! exists only for the duration of one load.

mod collect;
mod patch;
mod resolve;

use glbind_ir::{EnumEntry, FunctionEntry};

pub use collect::build_collections;
pub use patch::apply_overrides;
pub use resolve::resolve_profile;

/// An enum entry plus its accumulated patch state.
#[derive(Debug, Clone)]
pub struct WorkingEnum {
    pub entry: EnumEntry,
    /// Replacement output identifier from an override, used verbatim.
    pub rename: Option<String>,
    pub obsolete: bool,
}

impl WorkingEnum {
    fn new(entry: EnumEntry) -> Self {
        Self {
            entry,
            rename: None,
            obsolete: false,
        }
    }
}

/// A function entry plus its accumulated patch state.
#[derive(Debug, Clone)]
pub struct WorkingFunction {
    pub entry: FunctionEntry,
    pub rename: Option<String>,
    pub obsolete: bool,
    /// Set when any override matched this entry, so a later phase can warn
    /// if the patched entry ends up discarded (e.g. it loses an alias merge).
    pub patched: bool,
}

impl WorkingFunction {
    fn new(entry: FunctionEntry) -> Self {
        Self {
            entry,
            rename: None,
            obsolete: false,
            patched: false,
        }
    }
}

/// The profile-resolved entity set threaded through the phases.
#[derive(Debug, Clone, Default)]
pub struct EntitySet {
    pub enums: Vec<WorkingEnum>,
    pub functions: Vec<WorkingFunction>,
}
