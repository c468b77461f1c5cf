//! Override application.

use glbind_ir::ParamLen;
use glbind_spec::{OverridePatch, OverrideSet};

use super::EntitySet;
use crate::Diagnostic;

const PHASE: &str = "patch";

/// Apply the ordered override set to the resolved entities.
///
/// Patches apply in file-list order, then declaration order within a file.
/// Conflicts resolve per field: a field present in a later patch replaces
/// the same field from an earlier patch or from the original entity, while
/// absent fields leave earlier state untouched. A patch whose target is
/// absent from the entity set is recorded as a warning diagnostic and
/// otherwise ignored.
pub fn apply_overrides(
    entities: &mut EntitySet,
    overrides: &OverrideSet,
    diagnostics: &mut Vec<Diagnostic>,
) {
    for sourced in overrides.iter() {
        let patch = &sourced.patch;
        let mut matched = false;

        for we in entities.enums.iter_mut().filter(|e| e.entry.name == patch.target) {
            matched = true;
            apply_enum_patch(we, patch);
        }

        for wf in entities
            .functions
            .iter_mut()
            .filter(|f| function_matches(f, patch))
        {
            matched = true;
            apply_function_patch(wf, patch, &sourced.file, diagnostics);
        }

        if !matched {
            diagnostics.push(
                Diagnostic::warning(
                    PHASE,
                    format!("override target '{}' not found in the resolved entity set", patch.target),
                )
                .at(sourced.file.clone()),
            );
        }
    }
}

fn function_matches(wf: &super::WorkingFunction, patch: &OverridePatch) -> bool {
    if wf.entry.name != patch.target {
        return false;
    }
    // A patch without a signature matches every overload of the name.
    match &patch.signature {
        Some(signature) => wf.entry.signature() == *signature,
        None => true,
    }
}

fn apply_enum_patch(we: &mut super::WorkingEnum, patch: &OverridePatch) {
    if let Some(rename) = &patch.rename {
        we.rename = Some(rename.clone());
    }
    if let Some(obsolete) = patch.obsolete {
        we.obsolete = obsolete;
    }
    if let Some(value) = patch.value {
        we.entry.value = value;
    }
}

fn apply_function_patch(
    wf: &mut super::WorkingFunction,
    patch: &OverridePatch,
    file: &str,
    diagnostics: &mut Vec<Diagnostic>,
) {
    wf.patched = true;
    if let Some(rename) = &patch.rename {
        wf.rename = Some(rename.clone());
    }
    if let Some(obsolete) = patch.obsolete {
        wf.obsolete = obsolete;
    }
    if let Some(returns) = &patch.returns {
        wf.entry.returns = returns.clone();
    }
    for param_patch in &patch.params {
        let Some(param) = wf.entry.params.get_mut(param_patch.index) else {
            diagnostics.push(
                Diagnostic::warning(
                    PHASE,
                    format!(
                        "override for '{}' patches parameter {} but the function has {}",
                        patch.target,
                        param_patch.index,
                        wf.entry.params.len()
                    ),
                )
                .at(file.to_string()),
            );
            continue;
        };
        // length_from takes precedence when both hints are given.
        if let Some(count) = param_patch.length {
            param.length = Some(ParamLen::Count(count));
        }
        if let Some(index) = param_patch.length_from {
            param.length = Some(ParamLen::Index(index));
        }
    }
}
