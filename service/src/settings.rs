use std::path::Path;

use domain::normalize;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::Error;

const LIBRETRO_DATABASE: &str =
    "https://raw.githubusercontent.com/libretro/libretro-database/master";

/// Score thresholds (0-100) and length limits used by the fuzzy stages.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchThresholds {
    /// Minimum ratio for the ASCII fuzzy fallback of the resolution cascade.
    pub ascii_fuzzy: f64,
    /// Minimum token sort score for long ASCII search keywords.
    pub search_min_score: f64,
    /// Minimum holistic score for non-ASCII input, both when resolving and searching.
    pub localized_fuzzy: f64,
    /// Minimum ratio for the reference catalog fuzzy fallback.
    pub reference_fuzzy: f64,
    /// Normalized keys shorter than this never prefix-match reference names.
    pub reference_min_prefix_len: usize,
    /// ASCII keywords shorter than this use the partial/word boundary search.
    pub short_query_len: usize,
}

impl Default for MatchThresholds {
    fn default() -> Self {
        Self {
            ascii_fuzzy: 50.0,
            search_min_score: 60.0,
            localized_fuzzy: 65.0,
            reference_fuzzy: 80.0,
            reference_min_prefix_len: 4,
            short_query_len: 5,
        }
    }
}

/// Maps a normalized acronym to a reference name. `localized_name` is used
/// when the catalog has no entry for the reference name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AcronymRule {
    pub key: String,
    pub reference_name: String,
    #[serde(default)]
    pub localized_name: Option<String>,
}

impl AcronymRule {
    pub fn new(key: &str, reference_name: &str, localized_name: Option<&str>) -> Self {
        Self {
            key: key.to_string(),
            reference_name: reference_name.to_string(),
            localized_name: localized_name.map(str::to_string),
        }
    }
}

/// An extra listing merged into a scope's reference catalog. `label` names
/// the cached copy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SupplementalListing {
    pub label: String,
    pub url_template: String,
}

/// Where reference listings are downloaded from. Templates are tried in
/// order, `{system}` is replaced with the URL encoded scope id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReferenceSourceSettings {
    pub url_templates: Vec<String>,
    /// Tried before `url_templates` for arcade scopes.
    pub arcade_url_templates: Vec<String>,
    pub supplemental: IndexMap<String, Vec<SupplementalListing>>,
}

impl Default for ReferenceSourceSettings {
    fn default() -> Self {
        let url_templates = ["libretro-dats", "no-intro", "tosec", "redump"]
            .iter()
            .map(|dir| format!("{LIBRETRO_DATABASE}/metadat/{dir}/{{system}}.dat"))
            .chain(std::iter::once(format!(
                "{LIBRETRO_DATABASE}/dat/{{system}}.dat"
            )))
            .collect();

        let mut supplemental = IndexMap::new();
        supplemental.insert(
            "Arcade - NEOGEO".to_string(),
            vec![SupplementalListing {
                label: "SNK - Neo Geo".to_string(),
                url_template: format!("{LIBRETRO_DATABASE}/dat/SNK%20-%20Neo%20Geo.dat"),
            }],
        );
        supplemental.insert(
            "NEC - PC-98".to_string(),
            vec![SupplementalListing {
                label: "NEC - PC-98 (Redump)".to_string(),
                url_template: format!("{LIBRETRO_DATABASE}/metadat/redump/{{system}}.dat"),
            }],
        );

        Self {
            url_templates,
            arcade_url_templates: vec![format!(
                "{LIBRETRO_DATABASE}/metadat/fbneo-split/{{system}}.dat"
            )],
            supplemental,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResolverSettings {
    pub thresholds: MatchThresholds,
    pub acronyms: Vec<AcronymRule>,
    /// Virtual scope id -> concrete scope ids searched on its behalf.
    pub virtual_scopes: IndexMap<String, Vec<String>>,
    /// Region tags preferred when a reference key maps to several names and
    /// the raw input carries no region of its own.
    pub region_preference: Vec<String>,
    pub reference_sources: ReferenceSourceSettings,
    pub artifact_base_url: String,
}

impl Default for ResolverSettings {
    fn default() -> Self {
        let mut virtual_scopes = IndexMap::new();
        virtual_scopes.insert(
            "FBNeo - Arcade Games".to_string(),
            [
                "FBNeo - Arcade Games",
                "Arcade - CPS1",
                "Arcade - CPS2",
                "Arcade - CPS3",
                "Arcade - NEOGEO",
            ]
            .iter()
            .map(|s| s.to_string())
            .collect(),
        );

        Self {
            thresholds: MatchThresholds::default(),
            acronyms: vec![
                AcronymRule::new(
                    "srwf",
                    "Super Robot Taisen F (Japan) (Rev A) (10M, 11M, 12M, 13M)",
                    Some("超级机器人大战F"),
                ),
                AcronymRule::new(
                    "srwff",
                    "Super Robot Taisen F - Kanketsu-hen (Japan) (Rev A) (10M)",
                    Some("超级机器人大战F完结篇"),
                ),
                AcronymRule::new("srw", "Super Robot Taisen (Japan)", None),
            ],
            virtual_scopes,
            region_preference: Vec::new(),
            reference_sources: ReferenceSourceSettings::default(),
            artifact_base_url: "https://thumbnails.libretro.com".to_string(),
        }
    }
}

impl ResolverSettings {
    /// Parses settings from JSON. Missing fields keep their defaults and
    /// acronym keys are stored normalized.
    pub fn from_json_str(json: &str) -> Result<Self, Error> {
        let mut settings: ResolverSettings = serde_json::from_str(json)
            .map_err(|e| Error::SettingsError(format!("Invalid resolver settings: {}", e)))?;
        for rule in &mut settings.acronyms {
            rule.key = normalize(&rule.key);
        }
        settings.validate()?;
        Ok(settings)
    }

    pub fn from_file(path: &Path) -> Result<Self, Error> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json_str(&content)
    }

    pub fn to_json_string(&self) -> Result<String, Error> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn acronym(&self, normalized_key: &str) -> Option<&AcronymRule> {
        self.acronyms.iter().find(|rule| rule.key == normalized_key)
    }

    fn validate(&self) -> Result<(), Error> {
        let t = &self.thresholds;
        for (name, value) in [
            ("ascii_fuzzy", t.ascii_fuzzy),
            ("search_min_score", t.search_min_score),
            ("localized_fuzzy", t.localized_fuzzy),
            ("reference_fuzzy", t.reference_fuzzy),
        ] {
            if !(0.0..=100.0).contains(&value) {
                return Err(Error::SettingsError(format!(
                    "Threshold {} must be between 0 and 100, got {}",
                    name, value
                )));
            }
        }
        if self.acronyms.iter().any(|rule| rule.key.is_empty()) {
            return Err(Error::SettingsError("Acronym key is empty".to_string()));
        }
        if let Some(rule) = self.acronyms.iter().find(|rule| rule.reference_name.is_empty()) {
            return Err(Error::SettingsError(format!(
                "Acronym {} has an empty reference name",
                rule.key
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = ResolverSettings::default();
        assert_eq!(settings.thresholds.ascii_fuzzy, 50.0);
        assert_eq!(settings.thresholds.reference_min_prefix_len, 4);
        assert_eq!(settings.virtual_scopes["FBNeo - Arcade Games"].len(), 5);
        assert_eq!(
            settings.acronym("srwf").and_then(|r| r.localized_name.as_deref()),
            Some("超级机器人大战F")
        );
        assert!(settings.acronym("srw").unwrap().localized_name.is_none());
        assert_eq!(settings.reference_sources.url_templates.len(), 5);
        assert!(
            settings.reference_sources.url_templates[0]
                .ends_with("/metadat/libretro-dats/{system}.dat")
        );
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let json = r#"{
            "thresholds": { "reference_fuzzy": 90.0 },
            "region_preference": ["USA", "Europe"]
        }"#;
        let settings = ResolverSettings::from_json_str(json).unwrap();
        assert_eq!(settings.thresholds.reference_fuzzy, 90.0);
        assert_eq!(settings.thresholds.localized_fuzzy, 65.0);
        assert_eq!(settings.region_preference, vec!["USA", "Europe"]);
        assert_eq!(settings.acronyms.len(), 3);
    }

    #[test]
    fn test_invalid_threshold_is_rejected() {
        let json = r#"{ "thresholds": { "ascii_fuzzy": 150.0 } }"#;
        let result = ResolverSettings::from_json_str(json);
        assert!(matches!(result, Err(Error::SettingsError(_))));
    }

    #[test]
    fn test_acronym_keys_are_normalized() {
        let json = r#"{"acronyms": [{"key": "SRW-F", "reference_name": "Super Robot Taisen F (Japan)"}]}"#;
        let settings = ResolverSettings::from_json_str(json).unwrap();
        assert_eq!(
            settings.acronym("srwf").map(|rule| rule.reference_name.as_str()),
            Some("Super Robot Taisen F (Japan)")
        );

        let json = r#"{"acronyms": [{"key": "??", "reference_name": "Super Robot Taisen (Japan)"}]}"#;
        assert!(matches!(
            ResolverSettings::from_json_str(json),
            Err(Error::SettingsError(_))
        ));
    }

    #[test]
    fn test_malformed_json_is_settings_error() {
        let result = ResolverSettings::from_json_str("{ not json");
        assert!(matches!(result, Err(Error::SettingsError(_))));
    }

    #[test]
    fn test_round_trip_through_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("resolver.json");
        let mut settings = ResolverSettings::default();
        settings.virtual_scopes.insert(
            "MAME".to_string(),
            vec!["MAME 2003".to_string(), "MAME 2010".to_string()],
        );
        std::fs::write(&path, settings.to_json_string().unwrap()).unwrap();

        let loaded = ResolverSettings::from_file(&path).unwrap();
        assert_eq!(loaded, settings);
        let keys: Vec<&String> = loaded.virtual_scopes.keys().collect();
        assert_eq!(keys, vec!["FBNeo - Arcade Games", "MAME"]);
    }
}
