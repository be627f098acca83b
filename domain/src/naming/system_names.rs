use regex::Regex;
use std::sync::OnceLock;

/// Base system id without any session qualifier,
/// e.g. "FBNeo - Arcade Games (20240830-122750)" -> "FBNeo - Arcade Games".
pub fn base_scope_id(scope: &str) -> &str {
    scope.split('(').next().unwrap_or(scope).trim()
}

/// Removes the timestamp and item count suffixes playlists get when they are
/// generated, e.g. "Nintendo - SNES (20240830-122750) (3308)" -> "Nintendo - SNES".
/// Other parentheticals such as "(Redump)" are kept.
pub fn strip_session_suffix(scope: &str) -> String {
    static TIMESTAMP: OnceLock<Regex> = OnceLock::new();
    static COUNT: OnceLock<Regex> = OnceLock::new();
    let timestamp = TIMESTAMP.get_or_init(|| Regex::new(r"\s*\(\d{8}-\d{6}\)\s*").unwrap());
    let count = COUNT.get_or_init(|| Regex::new(r"\s*\(\d+\)\s*$").unwrap());

    let s = timestamp.replace_all(scope, "");
    count.replace(&s, "").trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_scope_id() {
        assert_eq!(
            base_scope_id("FBNeo - Arcade Games (20240830-122750)"),
            "FBNeo - Arcade Games"
        );
        assert_eq!(base_scope_id("Sega - Saturn"), "Sega - Saturn");
        assert_eq!(base_scope_id(""), "");
    }

    #[test]
    fn test_strip_session_suffix() {
        assert_eq!(
            strip_session_suffix("Nintendo - SNES (20240830-122750) (3308)"),
            "Nintendo - SNES"
        );
        assert_eq!(strip_session_suffix("NEC - PC-98 (Redump)"), "NEC - PC-98 (Redump)");
        assert_eq!(strip_session_suffix("Sega - Saturn"), "Sega - Saturn");
    }
}
