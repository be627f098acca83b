use regex::Regex;
use std::sync::OnceLock;

/// Strips the trailing region/date qualifier arcade sets carry,
/// e.g. "1941: Counter Attack (World 900227)" -> "1941: Counter Attack".
pub fn clean_arcade_label(label: &str) -> String {
    static DATED: OnceLock<Regex> = OnceLock::new();
    static TRAILING: OnceLock<Regex> = OnceLock::new();
    let dated = DATED.get_or_init(|| Regex::new(r"\s*\([^)]*\d{6}[^)]*\)$").unwrap());
    let trailing = TRAILING.get_or_init(|| Regex::new(r"\s*\([^)]*\)$").unwrap());

    let cleaned = dated.replace(label, "");
    trailing.replace(&cleaned, "").trim().to_string()
}

/// Arcade scopes carry MAME style labels rather than No-Intro titles.
pub fn is_arcade_scope(scope: &str) -> bool {
    scope.contains("Arcade") || scope.contains("FBNeo")
}
