//! Two-stage type resolution.
//!
//! Native type spellings resolve through the API typemap (native →
//! canonical) and then the language typemap (canonical → target language).
//! Both stages must be total over the types the patched entity set actually
//! references; a gap is a fatal configuration error, not something the
//! pipeline papers over.

use glbind_core::TypeRef;
use glbind_spec::Typemap;

use crate::{Error, Result, error::TypemapStage};

/// The two loaded typemaps, answering resolution queries.
#[derive(Debug, Clone)]
pub struct TypemapRegistry {
    api: Typemap,
    language: Typemap,
}

impl TypemapRegistry {
    pub fn new(api: Typemap, language: Typemap) -> Self {
        Self { api, language }
    }

    /// The API typemap dictionary (native → canonical).
    pub fn api(&self) -> &Typemap {
        &self.api
    }

    /// The language typemap dictionary (canonical → target language).
    pub fn language(&self) -> &Typemap {
        &self.language
    }

    pub fn into_parts(self) -> (Typemap, Typemap) {
        (self.api, self.language)
    }

    /// Resolve a native type reference to a target-language spelling.
    ///
    /// At each stage, an entry keyed by the full composed spelling
    /// ("GLchar*") takes precedence over resolving the base type and
    /// re-composing the pointer/array qualifiers onto the mapped base.
    /// `entity` names the referencing entity for error reporting.
    pub fn resolve(&self, ty: &TypeRef, entity: &str) -> Result<String> {
        let canonical = stage_lookup(&self.api, ty).ok_or_else(|| Error::UnresolvedType {
            ty: ty.to_string(),
            stage: TypemapStage::Api,
            entity: entity.to_string(),
        })?;

        // A composed-form hit at stage one may still be a structured
        // spelling; re-parse so stage two can fall back to base lookup.
        if let Some(hit) = self.language.get(&canonical) {
            return Ok(hit.to_string());
        }
        if let Ok(structured) = canonical.parse::<TypeRef>() {
            if let Some(base_hit) = self.language.get(structured.base()) {
                return Ok(structured.with_base(base_hit).to_string());
            }
        }

        Err(Error::UnresolvedType {
            ty: canonical,
            stage: TypemapStage::Language,
            entity: entity.to_string(),
        })
    }
}

fn stage_lookup(map: &Typemap, ty: &TypeRef) -> Option<String> {
    // Composed form wins over base-type substitution.
    if let Some(hit) = map.get(&ty.to_string()) {
        return Some(hit.to_string());
    }
    map.get(ty.base())
        .map(|base| ty.with_base(base).to_string())
}
