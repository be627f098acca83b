use regex::Regex;
use std::sync::OnceLock;

/// Removes the standalone "CN" token that Chinese release groups attach to
/// file names, e.g. "CN [Dragon_Force]".
pub fn remove_cn_marker(s: &str) -> String {
    static RE: OnceLock<Regex> = OnceLock::new();
    let re = RE.get_or_init(|| Regex::new(r"(?i)\bCN\b").unwrap());

    re.replace_all(s, "").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_remove_cn_marker() {
        assert_eq!(remove_cn_marker("CN Dragon Force"), " Dragon Force");
        assert_eq!(remove_cn_marker("Dragon Force cn"), "Dragon Force ");
        // only whole words
        assert_eq!(remove_cn_marker("Cnoid CNC"), "Cnoid CNC");
    }
}
