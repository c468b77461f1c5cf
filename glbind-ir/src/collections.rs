//! Canonical output collections.
//!
//! These are the final products of a pipeline run: name-unique,
//! insertion-ordered maps from final identifier to fully resolved entity.
//! The collections expose no mutation surface; once built by the pipeline
//! they are read-only for the lifetime of the generator that owns them.

use glbind_core::TypeRef;
use indexmap::IndexMap;

use crate::ParamLen;

/// A fully resolved enumerant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedEnum {
    /// Final output identifier (prefix stripped or override rename).
    pub name: String,
    /// Original native name, kept for linkage and documentation lookup.
    pub native_name: String,
    pub value: i64,
    pub obsolete: bool,
}

/// A parameter with its native type and the resolved target-language type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedParameter {
    pub name: String,
    pub native_type: TypeRef,
    /// Target-language type spelling produced by two-stage typemap lookup.
    pub ty: String,
    pub length: Option<ParamLen>,
}

/// A fully resolved function wrapper entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedFunction {
    /// Final output identifier.
    pub name: String,
    /// Canonical native entry-point name used for linkage.
    pub native_name: String,
    /// Alternate native surface names merged into this entry
    /// (extension-suffixed duplicates of the same entry point).
    pub aliases: Vec<String>,
    pub returns: String,
    pub native_returns: TypeRef,
    pub params: Vec<ResolvedParameter>,
    pub obsolete: bool,
    pub extension: Option<String>,
}

/// Every overload sharing one final output identifier.
///
/// Most entries hold a single overload. When the specification declares one
/// native entry point with several signatures, each signature keeps its own
/// [`ResolvedFunction`] here, in declaration order, all exposed under the
/// shared surface name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FunctionGroup {
    /// Final output identifier shared by every overload.
    pub name: String,
    pub overloads: Vec<ResolvedFunction>,
}

impl FunctionGroup {
    pub fn is_overloaded(&self) -> bool {
        self.overloads.len() > 1
    }
}

/// A low-level native function signature, keyed by entry-point name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Delegate {
    pub name: String,
    pub returns: String,
    pub native_returns: TypeRef,
    pub params: Vec<ResolvedParameter>,
}

macro_rules! collection {
    ($(#[$doc:meta])* $collection:ident, $entity:ty) => {
        $(#[$doc])*
        #[derive(Debug, Clone, PartialEq, Default)]
        pub struct $collection {
            entries: IndexMap<String, $entity>,
        }

        impl $collection {
            pub fn new(entries: IndexMap<String, $entity>) -> Self {
                Self { entries }
            }

            pub fn get(&self, name: &str) -> Option<&$entity> {
                self.entries.get(name)
            }

            pub fn contains(&self, name: &str) -> bool {
                self.entries.contains_key(name)
            }

            pub fn iter(&self) -> impl Iterator<Item = (&str, &$entity)> {
                self.entries.iter().map(|(name, entity)| (name.as_str(), entity))
            }

            pub fn names(&self) -> impl Iterator<Item = &str> {
                self.entries.keys().map(String::as_str)
            }

            pub fn len(&self) -> usize {
                self.entries.len()
            }

            pub fn is_empty(&self) -> bool {
                self.entries.is_empty()
            }
        }
    };
}

collection!(
    /// Final identifier → resolved enumerant.
    EnumCollection,
    ResolvedEnum
);
collection!(
    /// Final identifier → resolved function overload group.
    FunctionCollection,
    FunctionGroup
);
collection!(
    /// Native entry-point name → low-level signature.
    DelegateCollection,
    Delegate
);
