use regex::Regex;
use std::sync::OnceLock;

/// Returns the content of every parenthesized group in order of appearance,
/// e.g. "Game (Japan) (Rev A)" -> ["Japan", "Rev A"].
pub fn region_tags(input: &str) -> Vec<&str> {
    static RE: OnceLock<Regex> = OnceLock::new();
    let re = RE.get_or_init(|| Regex::new(r"\((.*?)\)").unwrap());

    re.captures_iter(input)
        .filter_map(|cap| cap.get(1).map(|m| m.as_str()))
        .collect()
}

pub fn last_region_tag(input: &str) -> Option<&str> {
    region_tags(input).pop()
}

/// True when any parenthesized group of `name` lists `region` as one of its
/// comma separated values, e.g. "Game (USA, Europe)" has region "Europe".
pub fn has_region(name: &str, region: &str) -> bool {
    region_tags(name)
        .iter()
        .any(|tag| tag.split(',').any(|part| part.trim() == region))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_region_tags() {
        assert_eq!(
            region_tags("Super Robot Taisen F (Japan) (Rev A) (10M, 11M)"),
            vec!["Japan", "Rev A", "10M, 11M"]
        );
        assert!(region_tags("Plain Title").is_empty());
    }

    #[test]
    fn test_last_region_tag() {
        assert_eq!(last_region_tag("Game (USA) (Japan)"), Some("Japan"));
        assert_eq!(last_region_tag("Game"), None);
    }

    #[test]
    fn test_has_region() {
        assert!(has_region("Antarctic Adventure (USA, Europe)", "Europe"));
        assert!(!has_region("Antarctic Adventure (USA, Europe)", "Japan"));
        assert!(!has_region("Europe Adventure", "Europe"));
    }
}
