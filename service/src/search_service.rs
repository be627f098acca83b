use std::{collections::HashSet, sync::Arc};

use core_types::SearchHit;
use domain::{
    naming::script::has_non_ascii,
    similarity::{SimilarityScorer, extract},
};
use regex::Regex;

use crate::{
    catalog_store::{CatalogEntry, CatalogStore},
    scope_expander::SystemScopeExpander,
    settings::{MatchThresholds, ResolverSettings},
};

/// Ranked keyword search over the catalog.
///
/// The scoring strategy depends on the keyword: non-ASCII keywords are
/// compared with localized names, short ASCII keywords must appear at a word
/// boundary of the canonical name, longer ASCII keywords use the order
/// insensitive token score.
pub struct FuzzySearchEngine {
    store: Arc<CatalogStore>,
    expander: SystemScopeExpander,
    scorer: Option<Arc<dyn SimilarityScorer>>,
    thresholds: MatchThresholds,
}

impl FuzzySearchEngine {
    pub fn new(
        store: Arc<CatalogStore>,
        settings: &ResolverSettings,
        scorer: Option<Arc<dyn SimilarityScorer>>,
    ) -> Self {
        Self {
            store,
            expander: SystemScopeExpander::from_settings(settings),
            scorer,
            thresholds: settings.thresholds.clone(),
        }
    }

    /// At most `limit` hits for `keyword` within `scope`, best first. An
    /// empty scope searches the whole catalog.
    pub fn search(&self, keyword: &str, scope: &str, limit: usize) -> Vec<SearchHit> {
        if keyword.trim().is_empty() || limit == 0 {
            return Vec::new();
        }
        let Some(scorer) = self.scorer.as_deref() else {
            tracing::warn!("No similarity scorer configured, search is disabled");
            return Vec::new();
        };

        let scopes = self.expander.expand(scope);
        let candidates = distinct_titles(self.store.scored_candidates(&scopes));

        let matches: Vec<&CatalogEntry> = if has_non_ascii(keyword) {
            self.search_localized(scorer, keyword, &candidates, limit)
        } else if keyword.chars().count() < self.thresholds.short_query_len {
            self.search_short(scorer, keyword, &candidates, limit)
        } else {
            self.search_tokens(scorer, keyword, &candidates, limit)
        };

        tracing::debug!(keyword, scope, hits = matches.len(), "Catalog search");
        matches
            .into_iter()
            .take(limit)
            .map(|entry| SearchHit {
                canonical_name: entry.canonical_name.clone(),
                localized_name: entry.localized_name.clone(),
                scope: entry.platform_scope.clone(),
            })
            .collect()
    }

    fn search_localized<'a>(
        &self,
        scorer: &dyn SimilarityScorer,
        keyword: &str,
        candidates: &[&'a CatalogEntry],
        limit: usize,
    ) -> Vec<&'a CatalogEntry> {
        extract(
            keyword,
            candidates.iter().map(|entry| entry.localized_name.as_str()),
            |a, b| scorer.holistic_ratio(a, b),
            limit,
        )
        .into_iter()
        .filter(|(_, score)| *score >= self.thresholds.localized_fuzzy)
        .map(|(index, _)| candidates[index])
        .collect()
    }

    fn search_short<'a>(
        &self,
        scorer: &dyn SimilarityScorer,
        keyword: &str,
        candidates: &[&'a CatalogEntry],
        limit: usize,
    ) -> Vec<&'a CatalogEntry> {
        let Ok(boundary) = Regex::new(&format!(r"(?i)\b{}", regex::escape(keyword))) else {
            return Vec::new();
        };
        extract(
            keyword,
            candidates.iter().map(|entry| entry.canonical_name.as_str()),
            |a, b| scorer.partial_ratio(a, b),
            limit.saturating_mul(2),
        )
        .into_iter()
        .map(|(index, _)| candidates[index])
        .filter(|entry| boundary.is_match(&entry.canonical_name))
        .take(limit)
        .collect()
    }

    fn search_tokens<'a>(
        &self,
        scorer: &dyn SimilarityScorer,
        keyword: &str,
        candidates: &[&'a CatalogEntry],
        limit: usize,
    ) -> Vec<&'a CatalogEntry> {
        extract(
            keyword,
            candidates.iter().map(|entry| entry.canonical_name.as_str()),
            |a, b| scorer.token_sort_ratio(a, b),
            limit.saturating_mul(2),
        )
        .into_iter()
        .filter(|(_, score)| *score >= self.thresholds.search_min_score)
        .map(|(index, _)| candidates[index])
        .take(limit)
        .collect()
    }
}

/// The same title listed under several scopes is kept once, under the most
/// preferred scope, so it takes a single result slot.
fn distinct_titles(candidates: Vec<&CatalogEntry>) -> Vec<&CatalogEntry> {
    let mut seen = HashSet::new();
    candidates
        .into_iter()
        .filter(|entry| seen.insert((entry.canonical_name.as_str(), entry.localized_name.as_str())))
        .collect()
}

#[cfg(test)]
mod tests {
    use domain::similarity::IndelScorer;

    use super::*;

    const PC: &str = "Microsoft - Windows";

    fn engine(store: CatalogStore) -> FuzzySearchEngine {
        FuzzySearchEngine::new(
            Arc::new(store),
            &ResolverSettings::default(),
            Some(Arc::new(IndelScorer)),
        )
    }

    fn names(hits: &[SearchHit]) -> Vec<&str> {
        hits.iter().map(|h| h.canonical_name.as_str()).collect()
    }

    #[test]
    fn test_short_keyword_needs_word_boundary() {
        let mut store = CatalogStore::new();
        store.insert("Savage", "野蛮人", PC);
        store.insert("Age of Empires", "帝国时代", PC);
        let hits = engine(store).search("Age", PC, 10);
        assert_eq!(names(&hits), vec!["Age of Empires"]);
    }

    #[test]
    fn test_long_keyword_uses_token_score() {
        let mut store = CatalogStore::new();
        store.insert("Street Fighter II", "街头霸王2", "Arcade - CPS1");
        store.insert("Art of Fighting", "龙虎之拳", "Arcade - CPS1");
        store.insert("Streets of Rage", "怒之铁拳", "Sega - Mega Drive - Genesis");

        let hits = engine(store).search("Fighter Street", "Arcade - CPS1", 5);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].localized_name, "街头霸王2");
    }

    #[test]
    fn test_localized_keyword() {
        let mut store = CatalogStore::new();
        store.insert("Fire Emblem - Monshou no Nazo", "火焰纹章 - 纹章之谜", "SNES");
        store.insert("Final Fight", "快打旋风", "SNES");
        let hits = engine(store).search("火焰之纹章3", "SNES", 5);
        assert_eq!(names(&hits), vec!["Fire Emblem - Monshou no Nazo"]);
    }

    #[test]
    fn test_results_are_deduplicated_across_scopes() {
        let mut store = CatalogStore::new();
        store.insert("Metal Slug (World)", "合金弹头", "Arcade - NEOGEO");
        store.insert("Metal Slug (World)", "合金弹头", "FBNeo - Arcade Games");
        let hits = engine(store).search("合金弹头", "FBNeo - Arcade Games", 5);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].scope, "FBNeo - Arcade Games");
    }

    #[test]
    fn test_duplicates_do_not_use_up_the_limit() {
        const FBNEO: &str = "FBNeo - Arcade Games";
        const NEOGEO: &str = "Arcade - NEOGEO";
        let mut store = CatalogStore::new();
        store.insert("Metal Slug (World)", "合金弹头", FBNEO);
        store.insert("Metal Slug (World)", "合金弹头", NEOGEO);
        store.insert("Metal Slug 2", "合金弹头2", NEOGEO);
        store.insert("Age of Empires", "帝国时代", FBNEO);
        store.insert("Age of Empires", "帝国时代", NEOGEO);
        store.insert("Age of Heroes", "英雄时代", NEOGEO);
        let engine = engine(store);

        let hits = engine.search("合金弹头", FBNEO, 2);
        assert_eq!(names(&hits), vec!["Metal Slug (World)", "Metal Slug 2"]);
        assert_eq!(hits[0].scope, FBNEO);

        let hits = engine.search("Age", FBNEO, 2);
        assert_eq!(hits.len(), 2);
        assert!(names(&hits).contains(&"Age of Heroes"));
    }

    #[test]
    fn test_limit_and_empty_inputs() {
        let mut store = CatalogStore::new();
        for name in ["Age of Empires", "Age of Empires II", "Age of Mythology"] {
            store.insert(name, name, PC);
        }
        let engine = engine(store);
        assert_eq!(engine.search("Age", PC, 2).len(), 2);
        assert_eq!(engine.search("Age", "", 10).len(), 3);
        assert!(engine.search("", PC, 10).is_empty());
        assert!(engine.search("Age", PC, 0).is_empty());
    }

    #[test]
    fn test_no_scorer_disables_search() {
        let mut store = CatalogStore::new();
        store.insert("Age of Empires", "帝国时代", PC);
        let engine = FuzzySearchEngine::new(Arc::new(store), &ResolverSettings::default(), None);
        assert!(engine.search("Age", PC, 10).is_empty());
    }
}
