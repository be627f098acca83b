use std::collections::BTreeSet;

pub fn sorted_tokens(s: &str) -> String {
    let mut tokens: Vec<&str> = s.split_whitespace().collect();
    tokens.sort_unstable();
    tokens.join(" ")
}

/// Whitespace tokens of two strings split into shared and one-sided sets,
/// each kept sorted.
pub struct TokenSets<'a> {
    pub shared: Vec<&'a str>,
    pub only_a: Vec<&'a str>,
    pub only_b: Vec<&'a str>,
}

impl<'a> TokenSets<'a> {
    pub fn new(a: &'a str, b: &'a str) -> Self {
        let set_a: BTreeSet<&str> = a.split_whitespace().collect();
        let set_b: BTreeSet<&str> = b.split_whitespace().collect();

        Self {
            shared: set_a.intersection(&set_b).copied().collect(),
            only_a: set_a.difference(&set_b).copied().collect(),
            only_b: set_b.difference(&set_a).copied().collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.shared.is_empty() && self.only_a.is_empty() && self.only_b.is_empty()
    }

    pub fn has_intersection(&self) -> bool {
        !self.shared.is_empty()
    }

    pub fn shared_joined(&self) -> String {
        self.shared.join(" ")
    }

    pub fn shared_with(&self, rest: &[&str]) -> String {
        match (self.shared.is_empty(), rest.is_empty()) {
            (true, _) => rest.join(" "),
            (false, true) => self.shared_joined(),
            (false, false) => format!("{} {}", self.shared_joined(), rest.join(" ")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sorted_tokens() {
        assert_eq!(sorted_tokens("  Street   Fighter II "), "Fighter II Street");
        assert_eq!(sorted_tokens(""), "");
    }

    #[test]
    fn test_token_sets() {
        let sets = TokenSets::new("Metal Slug 2", "Metal Slug X");
        assert_eq!(sets.shared, vec!["Metal", "Slug"]);
        assert_eq!(sets.only_a, vec!["2"]);
        assert_eq!(sets.only_b, vec!["X"]);
        assert_eq!(sets.shared_with(&sets.only_a), "Metal Slug 2");
    }
}
