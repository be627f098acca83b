/// Keeps ASCII letters and digits only, lowercased. Everything else,
/// whitespace and non-Latin scripts included, is dropped.
pub fn retain_ascii_alphanumeric(s: &str) -> String {
    s.chars()
        .filter(char::is_ascii_alphanumeric)
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_retain_ascii_alphanumeric() {
        assert_eq!(retain_ascii_alphanumeric("1941: Counter Attack"), "1941counterattack");
        assert_eq!(retain_ascii_alphanumeric("火焰纹章 3"), "3");
        assert_eq!(retain_ascii_alphanumeric("Pokémon"), "pokmon");
    }
}
