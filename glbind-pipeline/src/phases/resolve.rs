//! Profile and version resolution.

use std::collections::HashSet;

use glbind_core::VersionRange;
use glbind_spec::SpecDocument;
use indexmap::IndexMap;

use super::{EntitySet, WorkingEnum, WorkingFunction};
use crate::{Error, Result};

/// Compute the effective entity set for a profile and version range.
///
/// Walks the base-profile chain from the target profile to its root and
/// collects, at each level, the entities tagged with that profile which are
/// alive anywhere within the range. When the same entity key appears at
/// multiple levels, the level closer to the target shadows the more distant
/// one wholesale; fields are never merged across levels.
///
/// `base_override` takes precedence over a base declared for the target
/// profile in the specification itself.
pub fn resolve_profile(
    document: &SpecDocument,
    profile: &str,
    base_override: Option<&str>,
    versions: &VersionRange,
) -> Result<EntitySet> {
    let chain = profile_chain(document, profile, base_override)?;

    // Keyed by name for enums, by name+signature for overloaded natives.
    // Nearest-level-first iteration plus or_insert gives the shadowing
    // semantics directly.
    let mut enums: IndexMap<String, WorkingEnum> = IndexMap::new();
    let mut functions: IndexMap<(String, Vec<String>), WorkingFunction> = IndexMap::new();

    for level in &chain {
        for entry in &document.enums {
            if entry.profile == *level && versions.admits(entry.introduced, entry.removed) {
                enums
                    .entry(entry.name.clone())
                    .or_insert_with(|| WorkingEnum::new(entry.clone()));
            }
        }
        for entry in &document.functions {
            if entry.profile == *level && versions.admits(entry.introduced, entry.removed) {
                functions
                    .entry((entry.name.clone(), entry.signature()))
                    .or_insert_with(|| WorkingFunction::new(entry.clone()));
            }
        }
    }

    Ok(EntitySet {
        enums: enums.into_values().collect(),
        functions: functions.into_values().collect(),
    })
}

/// The profile chain from the target to its root, target first.
fn profile_chain(
    document: &SpecDocument,
    target: &str,
    base_override: Option<&str>,
) -> Result<Vec<String>> {
    let mut chain = vec![target.to_string()];
    let mut seen: HashSet<String> = HashSet::new();
    seen.insert(target.to_string());

    let mut current = target.to_string();
    let mut next = match base_override {
        Some(base) => Some(base.to_string()),
        None => document.profile(target).and_then(|p| p.base.clone()),
    };

    while let Some(name) = next {
        if !seen.insert(name.clone()) {
            chain.push(name);
            return Err(Error::CyclicProfileInheritance { chain });
        }
        let def = document
            .profile(&name)
            .ok_or_else(|| Error::UnknownProfile {
                profile: name.clone(),
                referenced_by: current.clone(),
            })?;
        chain.push(name.clone());
        current = name;
        next = def.base.clone();
    }

    Ok(chain)
}
