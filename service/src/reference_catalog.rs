use std::sync::Arc;

use dat_file_parser::ReferenceRecord;
use domain::{
    naming::region_tags::{has_region, last_region_tag},
    normalize,
    similarity::{SimilarityScorer, extract_one},
};
use indexmap::{IndexMap, IndexSet};
use regex::Regex;

use crate::settings::ResolverSettings;

/// Normalized key -> reference names of one activated scope.
///
/// Built from the scope's reference listings when the scope is activated and
/// replaced as a whole on the next activation; never mutated while lookups
/// may run.
pub struct ReferenceCatalog {
    index: IndexMap<String, Vec<String>>,
    scorer: Option<Arc<dyn SimilarityScorer>>,
    fuzzy_threshold: f64,
    min_prefix_len: usize,
    region_preference: Vec<String>,
}

impl std::fmt::Debug for ReferenceCatalog {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReferenceCatalog")
            .field("keys", &self.index.len())
            .field("fuzzy", &self.scorer.is_some())
            .finish()
    }
}

impl ReferenceCatalog {
    pub fn new(scorer: Option<Arc<dyn SimilarityScorer>>, settings: &ResolverSettings) -> Self {
        Self {
            index: IndexMap::new(),
            scorer,
            fuzzy_threshold: settings.thresholds.reference_fuzzy,
            min_prefix_len: settings.thresholds.reference_min_prefix_len,
            region_preference: settings.region_preference.clone(),
        }
    }

    /// Registers each record's standard name under the normalized short name
    /// and the normalized standard name. Keys that normalize to nothing are
    /// skipped; duplicate names per key are kept once.
    pub fn ingest(&mut self, records: &[ReferenceRecord]) {
        for record in records {
            let standard_name = record.standard_name();
            if standard_name.is_empty() {
                continue;
            }
            let mut keys = vec![normalize(&record.name)];
            if let Some(description) = &record.description {
                keys.push(normalize(description));
            }
            for key in keys.into_iter().filter(|k| !k.is_empty()) {
                let names = self.index.entry(key).or_default();
                if !names.iter().any(|n| n == standard_name) {
                    names.push(standard_name.to_string());
                }
            }
        }
    }

    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// Names registered under a normalized key, in registration order.
    pub fn candidates(&self, key: &str) -> &[String] {
        self.index.get(key).map(Vec::as_slice).unwrap_or_default()
    }

    /// Standard reference name for a loose title.
    ///
    /// The normalized key is looked up exactly, then as a prefix of a known
    /// key (keys of at least `reference_min_prefix_len` characters), then
    /// fuzzily. When a key maps to several names the region tag of the raw
    /// text picks one, then the configured region preference, then the first
    /// registered name.
    pub fn get_standard_name(&self, raw: &str) -> Option<&str> {
        if self.index.is_empty() {
            return None;
        }
        let key = normalize(raw);
        if key.is_empty() {
            return None;
        }

        let candidates = self
            .index
            .get(&key)
            .or_else(|| self.prefix_match(&key))
            .or_else(|| self.fuzzy_match(&key))?;
        self.disambiguate(raw, candidates)
    }

    /// Reference names containing `keyword` as a whole phrase first, then
    /// names containing every keyword token, each group shortest first.
    pub fn search(&self, keyword: &str, limit: usize) -> Vec<String> {
        let tokens: Vec<String> = keyword
            .to_lowercase()
            .split_whitespace()
            .map(str::to_string)
            .collect();
        if tokens.is_empty() || limit == 0 {
            return Vec::new();
        }
        let Some(phrase) = word_pattern(keyword) else {
            return Vec::new();
        };
        let Some(token_patterns) = tokens
            .iter()
            .map(|token| word_pattern(token))
            .collect::<Option<Vec<Regex>>>()
        else {
            return Vec::new();
        };

        let names: IndexSet<&str> = self
            .index
            .values()
            .flat_map(|names| names.iter().map(String::as_str))
            .collect();

        let mut phrase_matches = Vec::new();
        let mut token_matches = Vec::new();
        for name in names {
            if phrase.is_match(name) {
                phrase_matches.push(name);
            } else if token_patterns.iter().all(|p| p.is_match(name)) {
                token_matches.push(name);
            }
        }
        phrase_matches.sort_by_key(|name| name.chars().count());
        token_matches.sort_by_key(|name| name.chars().count());

        phrase_matches
            .into_iter()
            .chain(token_matches)
            .take(limit)
            .map(str::to_string)
            .collect()
    }

    fn prefix_match(&self, key: &str) -> Option<&Vec<String>> {
        if key.len() < self.min_prefix_len {
            return None;
        }
        self.index
            .iter()
            .find(|(k, _)| k.starts_with(key))
            .map(|(_, names)| names)
    }

    fn fuzzy_match(&self, key: &str) -> Option<&Vec<String>> {
        let scorer = self.scorer.as_ref()?;
        let (index, score) = extract_one(key, self.index.keys().map(String::as_str), |a, b| {
            scorer.ratio(a, b)
        })?;
        if score < self.fuzzy_threshold {
            return None;
        }
        self.index.get_index(index).map(|(_, names)| names)
    }

    fn disambiguate<'a>(&self, raw: &str, candidates: &'a [String]) -> Option<&'a str> {
        if candidates.len() > 1 {
            if let Some(tag) = last_region_tag(raw) {
                if let Some(name) = candidates.iter().find(|c| c.contains(tag)) {
                    return Some(name.as_str());
                }
            }
            for region in &self.region_preference {
                if let Some(name) = candidates.iter().find(|c| has_region(c, region)) {
                    return Some(name.as_str());
                }
            }
        }
        candidates.first().map(String::as_str)
    }
}

fn word_pattern(text: &str) -> Option<Regex> {
    Regex::new(&format!(r"(?i)\b{}\b", regex::escape(text))).ok()
}
