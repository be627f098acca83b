use core_types::{ScopeId, TitlePair};
use domain::similarity::SimilarityScorer;

use super::TranslationHook;
use crate::{
    catalog_store::CatalogStore, reference_catalog::ReferenceCatalog, settings::ResolverSettings,
};

/// Everything a step may look at while resolving one raw title.
///
/// The context is built once per `resolve` call and only borrows shared,
/// read-only state, so any number of resolutions can run concurrently.
pub struct ResolutionContext<'a> {
    /// The title as given by the caller.
    pub raw: &'a str,
    /// `normalize(raw)`, computed once for all steps.
    pub normalized: String,
    /// Concrete scopes to search, in preference order. Empty means unfiltered.
    pub scopes: &'a [ScopeId],
    pub store: &'a CatalogStore,
    /// Reference catalog of the active scope, if one has been activated.
    pub reference: Option<&'a ReferenceCatalog>,
    /// Similarity backend. Fuzzy steps are skipped when it is missing.
    pub scorer: Option<&'a dyn SimilarityScorer>,
    pub settings: &'a ResolverSettings,
    pub translation_hook: Option<&'a dyn TranslationHook>,
}

/// A single resolution strategy.
///
/// # Example
///
/// ```ignore
/// struct UppercaseStep;
///
/// impl ResolutionStep for UppercaseStep {
///     fn name(&self) -> &'static str {
///         "uppercase"
///     }
///
///     fn attempt(&self, context: &ResolutionContext<'_>) -> Option<TitlePair> {
///         Some(TitlePair::new(context.raw.to_uppercase(), context.raw))
///     }
/// }
/// ```
pub trait ResolutionStep: Send + Sync {
    /// Returns the name of this step for logging and debugging.
    fn name(&self) -> &'static str;

    /// Determines if this step should run for the given context.
    ///
    /// Steps that depend on an optional capability (a scorer, an activated
    /// reference catalog, a translation hook) return `false` when it is
    /// missing, and the cascade moves on to the next step.
    fn should_execute(&self, _context: &ResolutionContext<'_>) -> bool {
        true
    }

    /// Returns the resolved pair, or `None` to fall through to the next step.
    fn attempt(&self, context: &ResolutionContext<'_>) -> Option<TitlePair>;
}
