//! Generator context: one pipeline run per API identifier.

use std::sync::OnceLock;

use glbind_ir::{DelegateCollection, EnumCollection, FunctionCollection};
use glbind_spec::{OverrideSet, SpecDocument, Typemap};

use crate::{
    Diagnostic, Error, GeneratorConfig, Result, TypemapRegistry,
    phases::{apply_overrides, build_collections, resolve_profile},
};

/// The read-only result of a successful load.
#[derive(Debug, Clone)]
pub struct LoadedApi {
    pub enums: EnumCollection,
    pub functions: FunctionCollection,
    pub delegates: DelegateCollection,
    /// Native → canonical type dictionary, as loaded.
    pub api_types: Typemap,
    /// Canonical → target-language type dictionary, as loaded.
    pub language_types: Typemap,
    /// Non-fatal diagnostics collected during the run.
    pub diagnostics: Vec<Diagnostic>,
}

/// One generation context for one API identifier.
///
/// A generator starts unloaded, runs its pipeline exactly once on the first
/// [`Generator::load`] call, and thereafter serves the cached terminal
/// outcome: either the loaded collections or the original error. Loading is
/// all-or-nothing; a failed load never exposes partial collections.
///
/// Contexts for different APIs share no mutable state and may load
/// concurrently. Within one context, concurrent `load` callers are
/// serialized by the one-time completion guard and all observe the same
/// outcome.
#[derive(Debug)]
pub struct Generator {
    config: GeneratorConfig,
    outcome: OnceLock<std::result::Result<LoadedApi, Error>>,
}

impl Generator {
    pub fn new(config: GeneratorConfig) -> Self {
        Self {
            config,
            outcome: OnceLock::new(),
        }
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Run the pipeline, or return the cached outcome of a previous run.
    ///
    /// Idempotent: once loaded, repeated calls return the cached result
    /// without re-running the pipeline; once failed, repeated calls
    /// re-surface the same error without re-reading the input files.
    /// Failures are a deterministic function of the inputs, so there is
    /// nothing to retry.
    pub fn load(&self) -> Result<&LoadedApi> {
        match self.outcome.get_or_init(|| run_pipeline(&self.config)) {
            Ok(api) => Ok(api),
            Err(e) => Err(e.clone()),
        }
    }

    pub fn is_loaded(&self) -> bool {
        matches!(self.outcome.get(), Some(Ok(_)))
    }

    /// The enum collection.
    ///
    /// # Panics
    ///
    /// Panics if called before a successful [`Generator::load`]; accessing
    /// collections on an unloaded or failed generator is a programming
    /// error, not a recoverable condition.
    pub fn enums(&self) -> &EnumCollection {
        &self.loaded().enums
    }

    /// The function wrapper collection. Panics like [`Generator::enums`].
    pub fn functions(&self) -> &FunctionCollection {
        &self.loaded().functions
    }

    /// The delegate collection. Panics like [`Generator::enums`].
    pub fn delegates(&self) -> &DelegateCollection {
        &self.loaded().delegates
    }

    /// The API typemap dictionary. Panics like [`Generator::enums`].
    pub fn api_types(&self) -> &Typemap {
        &self.loaded().api_types
    }

    /// The language typemap dictionary. Panics like [`Generator::enums`].
    pub fn language_types(&self) -> &Typemap {
        &self.loaded().language_types
    }

    /// Diagnostics from the load. Panics like [`Generator::enums`].
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.loaded().diagnostics
    }

    fn loaded(&self) -> &LoadedApi {
        match self.outcome.get() {
            Some(Ok(api)) => api,
            Some(Err(_)) => panic!(
                "generator '{}' accessed after a failed load",
                self.config.api_identifier
            ),
            None => panic!(
                "generator '{}' accessed before load()",
                self.config.api_identifier
            ),
        }
    }
}

fn run_pipeline(config: &GeneratorConfig) -> std::result::Result<LoadedApi, Error> {
    let document = SpecDocument::from_file(&config.spec_file)?;
    let api_types = Typemap::from_file(&config.api_typemap)?;
    let language_types = Typemap::from_file(&config.language_typemap)?;
    let overrides = OverrideSet::load(&config.override_files)?;

    let mut diagnostics = Vec::new();
    let mut entities = resolve_profile(
        &document,
        &config.profile_name,
        config.base_profile_name.as_deref(),
        &config.versions,
    )?;
    apply_overrides(&mut entities, &overrides, &mut diagnostics);

    let registry = TypemapRegistry::new(api_types, language_types);
    let (enums, functions, delegates) =
        build_collections(&entities, &registry, config, &mut diagnostics)?;
    let (api_types, language_types) = registry.into_parts();

    Ok(LoadedApi {
        enums,
        functions,
        delegates,
        api_types,
        language_types,
        diagnostics,
    })
}
