use std::sync::Arc;

use core_types::TitlePair;
use domain::{
    normalize,
    similarity::{IndelScorer, SimilarityScorer},
};

use super::{
    TranslationHook,
    resolution_step::{ResolutionContext, ResolutionStep},
    steps::{
        AcronymStep, AliasStep, ExactNameStep, ReferenceCatalogStep, ReverseExactStep,
        ScriptAwareFuzzyStep, TranslationHookStep,
    },
};
use crate::{
    catalog_store::CatalogStore, reference_catalog::ReferenceCatalog,
    scope_expander::SystemScopeExpander, settings::ResolverSettings,
};

/// Resolves loose titles to `(localized, reference)` pairs.
///
/// Steps run in order and the first one returning a non-empty pair wins.
/// When nothing matches the raw text is returned for both names, so
/// `resolve` never fails and never returns an empty name for non-empty input.
///
/// `resolve` only takes `&self`; the cascade can be shared between threads.
/// Activating another reference catalog needs `&mut self` and therefore
/// cannot overlap with running resolutions.
pub struct ResolutionCascade {
    store: Arc<CatalogStore>,
    settings: Arc<ResolverSettings>,
    expander: SystemScopeExpander,
    scorer: Option<Arc<dyn SimilarityScorer>>,
    reference: Option<Arc<ReferenceCatalog>>,
    translation_hook: Option<Arc<dyn TranslationHook>>,
    steps: Vec<Box<dyn ResolutionStep>>,
}

impl ResolutionCascade {
    pub fn new(store: Arc<CatalogStore>, settings: Arc<ResolverSettings>) -> Self {
        let expander = SystemScopeExpander::from_settings(&settings);
        Self {
            store,
            settings,
            expander,
            scorer: Some(Arc::new(IndelScorer)),
            reference: None,
            translation_hook: None,
            steps: Self::default_steps(),
        }
    }

    /// Exact, reverse exact, alias, acronym, fuzzy, reference catalog and
    /// translation hook, in that order.
    pub fn default_steps() -> Vec<Box<dyn ResolutionStep>> {
        vec![
            Box::new(ExactNameStep),
            Box::new(ReverseExactStep),
            Box::new(AliasStep),
            Box::new(AcronymStep),
            Box::new(ScriptAwareFuzzyStep),
            Box::new(ReferenceCatalogStep),
            Box::new(TranslationHookStep),
        ]
    }

    /// Replaces the similarity backend. `None` disables the fuzzy steps.
    pub fn with_scorer(mut self, scorer: Option<Arc<dyn SimilarityScorer>>) -> Self {
        self.scorer = scorer;
        self
    }

    pub fn with_translation_hook(mut self, hook: Arc<dyn TranslationHook>) -> Self {
        self.translation_hook = Some(hook);
        self
    }

    pub fn with_steps(mut self, steps: Vec<Box<dyn ResolutionStep>>) -> Self {
        self.steps = steps;
        self
    }

    /// Installs the reference catalog of a newly activated scope, dropping
    /// the previous one.
    pub fn activate_reference_catalog(&mut self, catalog: ReferenceCatalog) {
        tracing::info!(keys = catalog.len(), "Activated reference catalog");
        self.reference = Some(Arc::new(catalog));
    }

    pub fn clear_reference_catalog(&mut self) {
        self.reference = None;
    }

    pub fn reference_catalog(&self) -> Option<&ReferenceCatalog> {
        self.reference.as_deref()
    }

    pub fn scorer(&self) -> Option<Arc<dyn SimilarityScorer>> {
        self.scorer.clone()
    }

    pub fn store(&self) -> &Arc<CatalogStore> {
        &self.store
    }

    pub fn expander(&self) -> &SystemScopeExpander {
        &self.expander
    }

    pub fn resolve(&self, raw: &str, scope: &str) -> TitlePair {
        if raw.is_empty() {
            return TitlePair::unresolved(raw);
        }

        let scopes = self.expander.expand(scope);
        let context = ResolutionContext {
            raw,
            normalized: normalize(raw),
            scopes: &scopes,
            store: &self.store,
            reference: self.reference.as_deref(),
            scorer: self.scorer.as_deref(),
            settings: &self.settings,
            translation_hook: self.translation_hook.as_deref(),
        };

        for step in &self.steps {
            if !step.should_execute(&context) {
                continue;
            }
            match step.attempt(&context) {
                Some(pair) if !pair.localized.is_empty() && !pair.reference.is_empty() => {
                    tracing::debug!(
                        step = step.name(),
                        raw,
                        localized = %pair.localized,
                        reference = %pair.reference,
                        "Resolved title"
                    );
                    return pair;
                }
                _ => {}
            }
        }

        tracing::debug!(raw, scope, "No match, keeping raw title");
        TitlePair::unresolved(raw)
    }
}

#[cfg(test)]
mod tests {
    use dat_file_parser::ReferenceRecord;

    use super::*;

    const SNES: &str = "Nintendo - Super Nintendo Entertainment System";

    struct EchoHook;

    impl TranslationHook for EchoHook {
        fn translate(&self, text: &str) -> Option<String> {
            Some(format!("译:{}", text))
        }
    }

    fn store() -> CatalogStore {
        let mut store = CatalogStore::new();
        store.insert("Fire Emblem - Monshou no Nazo", "火焰纹章 - 纹章之谜", SNES);
        store.insert("Art of Fighting (USA)", "龙虎之拳", SNES);
        store.insert("1941: Counter Attack (World 900227)", "1941 反击战", "Arcade - CPS1");
        store.insert("Metal Slug (World)", "合金弹头", "Arcade - NEOGEO");
        store.insert("Metal Slug (World)", "合金弹头 (FBNeo)", "FBNeo - Arcade Games");
        store.add_alias("1941", "1941: Counter Attack (World 900227)");
        store
    }

    fn cascade() -> ResolutionCascade {
        ResolutionCascade::new(Arc::new(store()), Arc::new(ResolverSettings::default()))
    }

    #[test]
    fn test_resolve_exact_round_trip() {
        let cascade = cascade();
        assert_eq!(
            cascade.resolve("Art of Fighting (USA)", SNES),
            TitlePair::new("龙虎之拳", "Art of Fighting (USA)")
        );
        assert_eq!(
            cascade.resolve("龙虎之拳", SNES),
            TitlePair::new("龙虎之拳", "Art of Fighting (USA)")
        );
    }

    #[test]
    fn test_resolve_localized_fuzzy() {
        let pair = cascade().resolve("火焰之纹章3", SNES);
        assert_eq!(
            pair,
            TitlePair::new("火焰纹章 - 纹章之谜", "Fire Emblem - Monshou no Nazo")
        );
    }

    #[test]
    fn test_virtual_scope_reaches_sub_scopes() {
        let cascade = cascade();
        let scope = "FBNeo - Arcade Games (20240830-122750)";
        assert_eq!(
            cascade.resolve("1941", scope),
            TitlePair::new("1941 反击战", "1941: Counter Attack (World 900227)")
        );
        // virtual scope itself is listed first
        assert_eq!(
            cascade.resolve("Metal Slug (World)", scope),
            TitlePair::new("合金弹头 (FBNeo)", "Metal Slug (World)")
        );
        assert_eq!(
            cascade.resolve("Metal Slug (World)", "Arcade - NEOGEO"),
            TitlePair::new("合金弹头", "Metal Slug (World)")
        );
    }

    #[test]
    fn test_unmatched_input_is_returned_unchanged() {
        let cascade = cascade();
        assert_eq!(cascade.resolve("Zzyzx", SNES), TitlePair::unresolved("Zzyzx"));
        assert_eq!(cascade.resolve("", SNES), TitlePair::unresolved(""));
        assert_eq!(cascade.resolve("!!!", SNES), TitlePair::unresolved("!!!"));
    }

    #[test]
    fn test_fuzzy_steps_skipped_without_scorer() {
        let cascade = cascade().with_scorer(None);
        assert_eq!(
            cascade.resolve("火焰之纹章3", SNES),
            TitlePair::unresolved("火焰之纹章3")
        );
    }

    #[test]
    fn test_acronym_fallback() {
        let pair = cascade().resolve("SRWF", SNES);
        assert_eq!(pair.localized, "超级机器人大战F");
        assert_eq!(pair.reference, "Super Robot Taisen F (Japan) (Rev A) (10M, 11M, 12M, 13M)");
    }

    #[test]
    fn test_reference_catalog_and_replacement() {
        let settings = ResolverSettings::default();
        let mut cascade =
            ResolutionCascade::new(Arc::new(CatalogStore::new()), Arc::new(settings.clone()));

        let mut catalog = ReferenceCatalog::new(None, &settings);
        catalog.ingest(&[ReferenceRecord::new(
            "1943kai",
            Some("1943 Kai: Midway Kaisen (Japan)".to_string()),
        )]);
        cascade.activate_reference_catalog(catalog);
        assert_eq!(
            cascade.resolve("1943kai", "FBNeo - Arcade Games"),
            TitlePair::new("1943 Kai: Midway Kaisen (Japan)", "1943 Kai: Midway Kaisen (Japan)")
        );

        cascade.activate_reference_catalog(ReferenceCatalog::new(None, &settings));
        assert_eq!(
            cascade.resolve("1943kai", "FBNeo - Arcade Games"),
            TitlePair::unresolved("1943kai")
        );
        cascade.clear_reference_catalog();
        assert!(cascade.reference_catalog().is_none());
    }

    #[test]
    fn test_translation_hook_is_last_resort() {
        let cascade = cascade().with_translation_hook(Arc::new(EchoHook));
        assert_eq!(
            cascade.resolve("Zzyzx", SNES),
            TitlePair::new("译:Zzyzx", "Zzyzx")
        );
        assert_eq!(
            cascade.resolve("Art of Fighting (USA)", SNES),
            TitlePair::new("龙虎之拳", "Art of Fighting (USA)")
        );
    }

    #[test]
    fn test_custom_step_order() {
        let cascade = cascade().with_steps(vec![Box::new(ReverseExactStep)]);
        assert_eq!(
            cascade.resolve("Art of Fighting (USA)", SNES),
            TitlePair::unresolved("Art of Fighting (USA)")
        );
    }

    #[test]
    fn test_concurrent_resolution() {
        let cascade = cascade();
        std::thread::scope(|s| {
            let handles: Vec<_> = (0..4)
                .map(|_| {
                    s.spawn(|| {
                        (0..50)
                            .map(|_| cascade.resolve("火焰之纹章3", SNES))
                            .collect::<Vec<_>>()
                    })
                })
                .collect();
            for handle in handles {
                let results = handle.join().unwrap();
                assert!(
                    results
                        .iter()
                        .all(|pair| pair.reference == "Fire Emblem - Monshou no Nazo")
                );
            }
        });
    }
}
