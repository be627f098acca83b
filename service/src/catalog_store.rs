use std::collections::{HashMap, HashSet};

use core_types::{ScopeId, TitlePair};
use domain::normalize;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogEntry {
    pub canonical_name: String,
    pub localized_name: String,
    pub platform_scope: ScopeId,
}

/// Alternate spelling of a canonical name. The normalized key is always
/// derived from `alias_text`, never supplied by the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alias {
    alias_text: String,
    canonical_name: String,
    normalized_alias: String,
}

impl Alias {
    pub fn new(alias_text: &str, canonical_name: &str) -> Self {
        Self {
            alias_text: alias_text.to_string(),
            canonical_name: canonical_name.to_string(),
            normalized_alias: normalize(alias_text),
        }
    }

    pub fn alias_text(&self) -> &str {
        &self.alias_text
    }

    pub fn canonical_name(&self) -> &str {
        &self.canonical_name
    }

    pub fn normalized_alias(&self) -> &str {
        &self.normalized_alias
    }
}

/// In-memory catalog of known titles.
///
/// Entries are unique per `(canonical_name, platform_scope)`; the first
/// insert wins. The store is filled during ingestion and then shared
/// read-only (`Arc<CatalogStore>`) between resolvers and searches.
///
/// Every lookup takes the scopes to search in preference order. A stored
/// scope matches a requested one when it starts with it, so
/// "Nintendo - SNES (20240830-122750)" is found under "Nintendo - SNES".
/// An empty scope list searches everything in insertion order.
#[derive(Debug, Default)]
pub struct CatalogStore {
    entries: Vec<CatalogEntry>,
    entry_keys: HashSet<(String, ScopeId)>,
    by_canonical: HashMap<String, Vec<usize>>,
    by_localized: HashMap<String, Vec<usize>>,
    aliases: Vec<Alias>,
    alias_keys: HashSet<(String, String)>,
    by_normalized_alias: HashMap<String, Vec<usize>>,
}

impl CatalogStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an entry. An empty localized name falls back to the canonical
    /// name. Returns `false` when the canonical name is empty or the entry
    /// already exists for that scope.
    pub fn insert(
        &mut self,
        canonical_name: &str,
        localized_name: &str,
        platform_scope: &str,
    ) -> bool {
        if canonical_name.is_empty() {
            return false;
        }
        let key = (canonical_name.to_string(), platform_scope.to_string());
        if !self.entry_keys.insert(key) {
            return false;
        }

        let localized_name = if localized_name.is_empty() {
            canonical_name
        } else {
            localized_name
        };
        let index = self.entries.len();
        self.entries.push(CatalogEntry {
            canonical_name: canonical_name.to_string(),
            localized_name: localized_name.to_string(),
            platform_scope: platform_scope.to_string(),
        });
        self.by_canonical
            .entry(canonical_name.to_string())
            .or_default()
            .push(index);
        self.by_localized
            .entry(localized_name.to_string())
            .or_default()
            .push(index);
        true
    }

    /// Registers `alias_text` as another spelling of `canonical_name`.
    /// Aliases that normalize to an empty key and duplicate pairs are ignored.
    pub fn add_alias(&mut self, alias_text: &str, canonical_name: &str) -> bool {
        let alias = Alias::new(alias_text, canonical_name);
        if alias.normalized_alias.is_empty() || canonical_name.is_empty() {
            return false;
        }
        if !self
            .alias_keys
            .insert((alias_text.to_string(), canonical_name.to_string()))
        {
            return false;
        }
        self.by_normalized_alias
            .entry(alias.normalized_alias.clone())
            .or_default()
            .push(self.aliases.len());
        self.aliases.push(alias);
        true
    }

    /// Localized name of the entry whose canonical name equals `name`.
    pub fn resolve_exact(&self, name: &str, scopes: &[ScopeId]) -> Option<&str> {
        let candidates = self.by_canonical.get(name)?;
        self.pick_by_scope(candidates.iter().copied(), scopes)
            .map(|index| self.entries[index].localized_name.as_str())
    }

    /// Canonical name of the entry whose localized name equals `localized`.
    pub fn resolve_reverse_exact(&self, localized: &str, scopes: &[ScopeId]) -> Option<&str> {
        let candidates = self.by_localized.get(localized)?;
        self.pick_by_scope(candidates.iter().copied(), scopes)
            .map(|index| self.entries[index].canonical_name.as_str())
    }

    /// Entry reached through an alias whose normalized key equals
    /// `normalized_key`, as (localized, canonical). Empty keys never match.
    pub fn resolve_by_alias(&self, normalized_key: &str, scopes: &[ScopeId]) -> Option<TitlePair> {
        if normalized_key.is_empty() {
            return None;
        }
        let alias_indices = self.by_normalized_alias.get(normalized_key)?;
        let candidates = alias_indices
            .iter()
            .filter_map(|&alias_index| {
                self.by_canonical
                    .get(&self.aliases[alias_index].canonical_name)
            })
            .flat_map(|indices| indices.iter().copied());
        self.pick_by_scope(candidates, scopes).map(|index| {
            let entry = &self.entries[index];
            TitlePair::new(entry.localized_name.as_str(), entry.canonical_name.as_str())
        })
    }

    /// Entries visible for `scopes`, ordered by scope preference and then
    /// insertion order. Input to the fuzzy stages.
    pub fn scored_candidates(&self, scopes: &[ScopeId]) -> Vec<&CatalogEntry> {
        if scopes.is_empty() {
            return self.entries.iter().collect();
        }
        let mut ranked: Vec<(usize, &CatalogEntry)> = self
            .entries
            .iter()
            .filter_map(|entry| scope_rank(&entry.platform_scope, scopes).map(|rank| (rank, entry)))
            .collect();
        ranked.sort_by_key(|(rank, _)| *rank);
        ranked.into_iter().map(|(_, entry)| entry).collect()
    }

    pub fn entries(&self) -> &[CatalogEntry] {
        &self.entries
    }

    pub fn aliases(&self) -> &[Alias] {
        &self.aliases
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn pick_by_scope<I>(&self, candidates: I, scopes: &[ScopeId]) -> Option<usize>
    where
        I: Iterator<Item = usize>,
    {
        let mut best: Option<(usize, usize)> = None;
        for index in candidates {
            let rank = if scopes.is_empty() {
                Some(0)
            } else {
                scope_rank(&self.entries[index].platform_scope, scopes)
            };
            match (rank, best) {
                (Some(rank), Some((best_rank, _))) if rank >= best_rank => {}
                (Some(rank), _) => best = Some((rank, index)),
                (None, _) => {}
            }
        }
        best.map(|(_, index)| index)
    }
}

fn scope_rank(entry_scope: &str, scopes: &[ScopeId]) -> Option<usize> {
    scopes.iter().position(|scope| entry_scope.starts_with(scope.as_str()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scopes(list: &[&str]) -> Vec<ScopeId> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_insert_keeps_first_entry_per_scope() {
        let mut store = CatalogStore::new();
        assert!(store.insert("Contra (Japan)", "魂斗罗", "Nintendo - NES"));
        assert!(!store.insert("Contra (Japan)", "魂斗罗 改", "Nintendo - NES"));
        assert!(store.insert("Contra (Japan)", "魂斗罗 (FC)", "Nintendo - Famicom"));
        assert!(!store.insert("", "空", "Nintendo - NES"));
        assert_eq!(store.len(), 2);
        assert_eq!(
            store.resolve_exact("Contra (Japan)", &scopes(&["Nintendo - NES"])),
            Some("魂斗罗")
        );
    }

    #[test]
    fn test_empty_localized_falls_back_to_canonical() {
        let mut store = CatalogStore::new();
        store.insert("Pulstar", "", "Arcade - NEOGEO");
        assert_eq!(store.resolve_exact("Pulstar", &[]), Some("Pulstar"));
    }

    #[test]
    fn test_scope_prefix_matching_and_preference() {
        let mut store = CatalogStore::new();
        store.insert("1941: Counter Attack", "1941 反击战 (CPS1)", "Arcade - CPS1");
        store.insert(
            "1941: Counter Attack",
            "1941 反击战",
            "FBNeo - Arcade Games (20240830-122750)",
        );

        let preferred = scopes(&["FBNeo - Arcade Games", "Arcade - CPS1"]);
        assert_eq!(store.resolve_exact("1941: Counter Attack", &preferred), Some("1941 反击战"));

        let reversed = scopes(&["Arcade - CPS1", "FBNeo - Arcade Games"]);
        assert_eq!(
            store.resolve_exact("1941: Counter Attack", &reversed),
            Some("1941 反击战 (CPS1)")
        );

        assert_eq!(
            store.resolve_exact("1941: Counter Attack", &scopes(&["Sega - Saturn"])),
            None
        );
        // no filter: insertion order
        assert_eq!(
            store.resolve_exact("1941: Counter Attack", &[]),
            Some("1941 反击战 (CPS1)")
        );
    }

    #[test]
    fn test_resolve_reverse_exact() {
        let mut store = CatalogStore::new();
        store.insert(
            "Fire Emblem - Monshou no Nazo (Japan)",
            "火焰纹章 - 纹章之谜",
            "Nintendo - SNES",
        );
        assert_eq!(
            store.resolve_reverse_exact("火焰纹章 - 纹章之谜", &scopes(&["Nintendo - SNES"])),
            Some("Fire Emblem - Monshou no Nazo (Japan)")
        );
        assert_eq!(store.resolve_reverse_exact("火焰纹章", &[]), None);
    }

    #[test]
    fn test_alias_lookup_uses_normalized_key() {
        let mut store = CatalogStore::new();
        store.insert(
            "1941: Counter Attack (World 900227)",
            "1941 反击战",
            "FBNeo - Arcade Games",
        );
        assert!(store.add_alias(
            "1941: Counter Attack (World 900227)",
            "1941: Counter Attack (World 900227)"
        ));
        assert!(store.add_alias("1941", "1941: Counter Attack (World 900227)"));
        assert!(!store.add_alias("1941", "1941: Counter Attack (World 900227)"));
        assert!(!store.add_alias("火焰纹章", "1941: Counter Attack (World 900227)"));

        let pair = store.resolve_by_alias("1941counterattack", &scopes(&["FBNeo - Arcade Games"]));
        assert_eq!(
            pair,
            Some(TitlePair::new("1941 反击战", "1941: Counter Attack (World 900227)"))
        );
        assert_eq!(store.resolve_by_alias("", &[]), None);
        assert_eq!(store.aliases()[1].normalized_alias(), "1941");
    }

    #[test]
    fn test_alias_without_entry_in_scope_is_none() {
        let mut store = CatalogStore::new();
        store.insert("Metal Slug", "合金弹头", "Arcade - NEOGEO");
        store.add_alias("mslug", "Metal Slug");
        assert!(store.resolve_by_alias("mslug", &scopes(&["Arcade - NEOGEO"])).is_some());
        assert!(store.resolve_by_alias("mslug", &scopes(&["Sega - Saturn"])).is_none());
    }

    #[test]
    fn test_scored_candidates_order() {
        let mut store = CatalogStore::new();
        store.insert("A", "a", "Arcade - CPS2");
        store.insert("B", "b", "FBNeo - Arcade Games");
        store.insert("C", "c", "Arcade - CPS2");
        store.insert("D", "d", "Sega - Saturn");

        let names: Vec<&str> = store
            .scored_candidates(&scopes(&["FBNeo - Arcade Games", "Arcade - CPS2"]))
            .iter()
            .map(|e| e.canonical_name.as_str())
            .collect();
        assert_eq!(names, vec!["B", "A", "C"]);
        assert_eq!(store.scored_candidates(&[]).len(), 4);
    }
}
