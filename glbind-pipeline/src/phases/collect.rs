//! Final collection assembly.

use glbind_core::{safe_identifier, trim_prefix};
use glbind_ir::{
    Delegate, DelegateCollection, EnumCollection, FunctionCollection, FunctionGroup,
    ResolvedEnum, ResolvedFunction, ResolvedParameter,
};
use indexmap::IndexMap;

use super::{EntitySet, WorkingFunction};
use crate::{Diagnostic, Error, GeneratorConfig, Result, TypemapRegistry};

const PHASE: &str = "collect";

/// Assemble the three canonical collections from the patched entity set.
///
/// Strips the configured prefixes to produce final identifiers (an override
/// rename is used verbatim instead), resolves every referenced type through
/// the registry, merges extension-suffixed duplicates of one native entry
/// point into a single entry with aliases, groups overloads of one entry
/// point under their shared surface name, and rejects final-name collisions
/// between distinct natives.
pub fn build_collections(
    entities: &EntitySet,
    registry: &TypemapRegistry,
    config: &GeneratorConfig,
    diagnostics: &mut Vec<Diagnostic>,
) -> Result<(EnumCollection, FunctionCollection, DelegateCollection)> {
    let enums = build_enums(entities, config)?;
    let (functions, delegates) = build_functions(entities, registry, config, diagnostics)?;
    Ok((enums, functions, delegates))
}

fn build_enums(entities: &EntitySet, config: &GeneratorConfig) -> Result<EnumCollection> {
    let mut enums: IndexMap<String, ResolvedEnum> = IndexMap::new();
    for we in &entities.enums {
        let final_name = match &we.rename {
            Some(rename) => rename.clone(),
            None => safe_identifier(trim_prefix(&we.entry.name, &config.constant_prefix)),
        };
        match enums.get(&final_name) {
            // The same native seen again (e.g. via an alias rename): keep
            // the first occurrence.
            Some(existing) if existing.native_name == we.entry.name => continue,
            Some(existing) => {
                return Err(Error::DuplicateIdentifier {
                    name: final_name,
                    first: existing.native_name.clone(),
                    second: we.entry.name.clone(),
                });
            }
            None => {
                enums.insert(
                    final_name.clone(),
                    ResolvedEnum {
                        name: final_name,
                        native_name: we.entry.name.clone(),
                        value: we.entry.value,
                        obsolete: we.obsolete,
                    },
                );
            }
        }
    }
    Ok(EnumCollection::new(enums))
}

struct Candidate<'a> {
    wf: &'a WorkingFunction,
    returns: String,
    params: Vec<ResolvedParameter>,
}

fn build_functions(
    entities: &EntitySet,
    registry: &TypemapRegistry,
    config: &GeneratorConfig,
    diagnostics: &mut Vec<Diagnostic>,
) -> Result<(FunctionCollection, DelegateCollection)> {
    // Group by underlying entry point: extension-suffixed duplicates of one
    // native function share a canonical name and signature, while overloads
    // of one entry point share the canonical name only.
    let mut groups: IndexMap<(String, Vec<String>), Vec<Candidate<'_>>> = IndexMap::new();
    for wf in &entities.functions {
        let entity = wf.entry.name.as_str();
        let returns = registry.resolve(&wf.entry.returns, entity)?;
        let params = wf
            .entry
            .params
            .iter()
            .map(|p| {
                Ok(ResolvedParameter {
                    name: p.name.clone(),
                    native_type: p.ty.clone(),
                    ty: registry.resolve(&p.ty, entity)?,
                    length: p.length.clone(),
                })
            })
            .collect::<Result<Vec<_>>>()?;
        groups
            .entry((wf.entry.canonical_name().to_string(), wf.entry.signature()))
            .or_default()
            .push(Candidate { wf, returns, params });
    }

    // The canonical name is kept alongside each entry so further signatures
    // of the same entry point can be told apart from genuine collisions.
    let mut functions: IndexMap<String, (String, FunctionGroup)> = IndexMap::new();
    let mut delegates: IndexMap<String, Delegate> = IndexMap::new();

    for ((canonical, _signature), members) in groups {
        // The shortest surface name is the canonical one (the un-suffixed
        // core entry point when present); ties break lexicographically so
        // the choice is deterministic.
        let winner = members
            .iter()
            .min_by_key(|c| (c.wf.entry.name.len(), c.wf.entry.name.as_str()))
            .expect("groups are never empty");
        let native_name = winner.wf.entry.name.clone();

        let losers: Vec<&Candidate<'_>> = members
            .iter()
            .filter(|c| c.wf.entry.name != native_name)
            .collect();
        let aliases: Vec<String> =
            losers.iter().map(|c| c.wf.entry.name.clone()).collect();
        if !aliases.is_empty() {
            diagnostics.push(Diagnostic::info(
                PHASE,
                format!("merged {} into '{}'", aliases.join(", "), native_name),
            ));
        }
        for loser in losers {
            // An override landed on an entry whose fields the merge discards.
            if loser.wf.patched {
                diagnostics.push(Diagnostic::warning(
                    PHASE,
                    format!(
                        "override on '{}' is discarded; '{}' supplies the merged entry",
                        loser.wf.entry.name, native_name
                    ),
                ));
            }
        }

        let final_name = match &winner.wf.rename {
            Some(rename) => rename.clone(),
            None => safe_identifier(trim_prefix(&native_name, &config.function_prefix)),
        };

        let function = ResolvedFunction {
            name: final_name.clone(),
            native_name: native_name.clone(),
            aliases,
            returns: winner.returns.clone(),
            native_returns: winner.wf.entry.returns.clone(),
            params: winner.params.clone(),
            obsolete: winner.wf.obsolete,
            extension: winner.wf.entry.extension.clone(),
        };

        match functions.get_mut(&final_name) {
            // Another signature of the same entry point: one more overload
            // under the shared surface name.
            Some((existing, group))
                if *existing == canonical
                    || group.overloads.iter().any(|o| o.native_name == native_name) =>
            {
                group.overloads.push(function);
            }
            Some((_, group)) => {
                return Err(Error::DuplicateIdentifier {
                    name: final_name,
                    first: group.overloads[0].native_name.clone(),
                    second: native_name,
                });
            }
            None => {
                functions.insert(
                    final_name.clone(),
                    (
                        canonical,
                        FunctionGroup {
                            name: final_name,
                            overloads: vec![function],
                        },
                    ),
                );
            }
        }

        if delegates.contains_key(&native_name) {
            // Overloads bind one native symbol; its delegate keeps the
            // first declared signature.
            diagnostics.push(Diagnostic::info(
                PHASE,
                format!(
                    "'{}' is overloaded; its delegate keeps the first declared signature",
                    native_name
                ),
            ));
        } else {
            delegates.insert(
                native_name.clone(),
                Delegate {
                    name: native_name,
                    returns: winner.returns.clone(),
                    native_returns: winner.wf.entry.returns.clone(),
                    params: winner.params.clone(),
                },
            );
        }
    }

    let functions = functions
        .into_iter()
        .map(|(name, (_, group))| (name, group))
        .collect();
    Ok((FunctionCollection::new(functions), DelegateCollection::new(delegates)))
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use glbind_core::{Version, VersionRange};
    use glbind_spec::{OverrideSet, SpecDocument, Typemap};

    use super::*;
    use crate::phases::{apply_overrides, resolve_profile};

    fn config() -> GeneratorConfig {
        let mut config = GeneratorConfig::gl2(Path::new("specs"));
        config.versions =
            VersionRange::new(Version::new(1, 0), Version::new(4, 6)).unwrap();
        config
    }

    fn registry() -> TypemapRegistry {
        TypemapRegistry::new(
            Typemap::from_str_with_filename(
                r#"
                [types]
                void = "void"
                GLenum = "u32"
                GLfloat = "f32"
                GLint = "i32"
                GLsizei = "i32"
                GLuint = "u32"
            "#,
                "api.tm.toml",
            )
            .unwrap(),
            Typemap::from_str_with_filename(
                r#"
                [types]
                void = "()"
                u32 = "u32"
                i32 = "i32"
                f32 = "f32"
            "#,
                "language.tm.toml",
            )
            .unwrap(),
        )
    }

    fn build(spec: &str) -> Result<(EnumCollection, FunctionCollection, DelegateCollection)> {
        let document = SpecDocument::from_str_with_filename(spec, "test.toml").unwrap();
        let config = config();
        let entities =
            resolve_profile(&document, &config.profile_name, None, &config.versions).unwrap();
        build_collections(&entities, &registry(), &config, &mut Vec::new())
    }

    #[test]
    fn test_prefix_stripping() {
        let (enums, functions, delegates) = build(r#"
            [[enums]]
            name = "GL_TRIANGLES"
            value = 0x0004
            profile = "gl"
            introduced = "1.0"

            [[functions]]
            name = "glDrawArrays"
            profile = "gl"
            introduced = "1.1"
            returns = "void"

            [[functions.params]]
            name = "mode"
            type = "GLenum"
        "#)
        .unwrap();

        let entry = enums.get("TRIANGLES").unwrap();
        assert_eq!(entry.value, 4);
        assert_eq!(entry.native_name, "GL_TRIANGLES");

        let group = functions.get("DrawArrays").unwrap();
        assert!(!group.is_overloaded());
        let func = &group.overloads[0];
        assert_eq!(func.native_name, "glDrawArrays");
        assert_eq!(func.returns, "()");
        assert_eq!(func.params[0].ty, "u32");
        assert!(delegates.contains("glDrawArrays"));
    }

    #[test]
    fn test_numeric_identifier_gets_underscore() {
        let (enums, _, _) = build(r#"
            [[enums]]
            name = "GL_2D"
            value = 1536
            profile = "gl"
            introduced = "1.0"
        "#)
        .unwrap();
        assert!(enums.contains("_2D"));
    }

    #[test]
    fn test_extension_duplicates_merge_with_aliases() {
        let (_, functions, delegates) = build(r#"
            [[functions]]
            name = "glGenBuffers"
            profile = "gl"
            introduced = "1.5"
            returns = "void"

            [[functions.params]]
            name = "n"
            type = "GLsizei"

            [[functions]]
            name = "glGenBuffersARB"
            profile = "gl"
            introduced = "1.4"
            returns = "void"
            extension = "ARB"

            [[functions.params]]
            name = "n"
            type = "GLsizei"
        "#)
        .unwrap();

        assert_eq!(functions.len(), 1);
        let func = &functions.get("GenBuffers").unwrap().overloads[0];
        assert_eq!(func.native_name, "glGenBuffers");
        assert_eq!(func.aliases, vec!["glGenBuffersARB"]);
        assert_eq!(delegates.len(), 1);
        assert!(delegates.contains("glGenBuffers"));
    }

    #[test]
    fn test_extension_only_function_keeps_suffix() {
        let (_, functions, delegates) = build(r#"
            [[functions]]
            name = "glGenBuffersARB"
            profile = "gl"
            introduced = "1.4"
            returns = "void"
            extension = "ARB"

            [[functions.params]]
            name = "n"
            type = "GLsizei"
        "#)
        .unwrap();

        // No core version exists, so linkage stays on the suffixed entry point.
        let func = &functions.get("GenBuffersARB").unwrap().overloads[0];
        assert_eq!(func.native_name, "glGenBuffersARB");
        assert!(func.aliases.is_empty());
        assert!(delegates.contains("glGenBuffersARB"));
    }

    #[test]
    fn test_overloads_share_surface_name() {
        let (_, functions, delegates) = build(r#"
            [[functions]]
            name = "glTexParam"
            profile = "gl"
            introduced = "1.0"
            returns = "void"

            [[functions.params]]
            name = "param"
            type = "GLint"

            [[functions]]
            name = "glTexParam"
            profile = "gl"
            introduced = "1.0"
            returns = "void"

            [[functions.params]]
            name = "param"
            type = "GLfloat"
        "#)
        .unwrap();

        let group = functions.get("TexParam").unwrap();
        assert!(group.is_overloaded());
        assert_eq!(group.overloads.len(), 2);
        assert!(group.overloads.iter().all(|o| o.native_name == "glTexParam"));
        assert_eq!(group.overloads[0].params[0].ty, "i32");
        assert_eq!(group.overloads[1].params[0].ty, "f32");

        // One native symbol, so one delegate with the first declared signature.
        assert_eq!(delegates.len(), 1);
        assert_eq!(delegates.get("glTexParam").unwrap().params[0].ty, "i32");
    }

    #[test]
    fn test_discarded_alias_override_warns() {
        let document = SpecDocument::from_str_with_filename(
            r#"
            [[functions]]
            name = "glGenBuffers"
            profile = "gl"
            introduced = "1.5"
            returns = "void"

            [[functions.params]]
            name = "n"
            type = "GLsizei"

            [[functions]]
            name = "glGenBuffersARB"
            profile = "gl"
            introduced = "1.4"
            returns = "void"
            extension = "ARB"

            [[functions.params]]
            name = "n"
            type = "GLsizei"
        "#,
            "test.toml",
        )
        .unwrap();
        let config = config();
        let mut entities =
            resolve_profile(&document, &config.profile_name, None, &config.versions).unwrap();

        let mut set = OverrideSet::default();
        set.push_file(
            r#"
            [[overrides]]
            target = "glGenBuffersARB"
            rename = "GenBuffersLegacy"
        "#,
            "legacy.toml",
        )
        .unwrap();
        let mut diagnostics = Vec::new();
        apply_overrides(&mut entities, &set, &mut diagnostics);

        let (_, functions, _) =
            build_collections(&entities, &registry(), &config, &mut diagnostics).unwrap();

        // The core entry point still wins the merge; the patch on the losing
        // alias is reported instead of silently dropped.
        assert!(functions.contains("GenBuffers"));
        assert!(!functions.contains("GenBuffersLegacy"));
        let warning = diagnostics.iter().find(|d| d.severity.is_warning()).unwrap();
        assert!(warning.message.contains("glGenBuffersARB"));
    }

    #[test]
    fn test_duplicate_identifier_rejected() {
        let err = build(r#"
            [[enums]]
            name = "GL_POINTS"
            value = 0
            profile = "gl"
            introduced = "1.0"

            [[enums]]
            name = "POINTS"
            value = 9
            profile = "gl"
            introduced = "1.0"
        "#)
        .unwrap_err();

        match err {
            Error::DuplicateIdentifier { name, first, second } => {
                assert_eq!(name, "POINTS");
                assert_eq!(first, "GL_POINTS");
                assert_eq!(second, "POINTS");
            }
            other => panic!("unexpected error {:?}", other),
        }
    }

    #[test]
    fn test_distinct_natives_colliding_on_final_name_rejected() {
        let document = SpecDocument::from_str_with_filename(
            r#"
            [[functions]]
            name = "glPointSize"
            profile = "gl"
            introduced = "1.0"
            returns = "void"

            [[functions.params]]
            name = "size"
            type = "GLfloat"

            [[functions]]
            name = "glViewport"
            profile = "gl"
            introduced = "1.0"
            returns = "void"

            [[functions.params]]
            name = "width"
            type = "GLsizei"
        "#,
            "test.toml",
        )
        .unwrap();
        let config = config();
        let mut entities =
            resolve_profile(&document, &config.profile_name, None, &config.versions).unwrap();

        let mut set = OverrideSet::default();
        set.push_file(
            "[[overrides]]\ntarget = \"glPointSize\"\nrename = \"Viewport\"\n",
            "clash.toml",
        )
        .unwrap();
        apply_overrides(&mut entities, &set, &mut Vec::new());

        let err = build_collections(&entities, &registry(), &config, &mut Vec::new())
            .unwrap_err();
        match err {
            Error::DuplicateIdentifier { name, first, second } => {
                assert_eq!(name, "Viewport");
                assert_eq!(first, "glPointSize");
                assert_eq!(second, "glViewport");
            }
            other => panic!("unexpected error {:?}", other),
        }
    }

    #[test]
    fn test_unresolved_type_aborts() {
        let err = build(r#"
            [[functions]]
            name = "glColor3h"
            profile = "gl"
            introduced = "3.0"
            returns = "void"

            [[functions.params]]
            name = "red"
            type = "GLhalf"
        "#)
        .unwrap_err();
        assert!(matches!(err, Error::UnresolvedType { .. }));
    }
}
