mod rules;

use rules::{
    brackets::{open_brackets, remove_bracketed},
    cn_marker::remove_cn_marker,
    punctuation::retain_ascii_alphanumeric,
    separators::replace_separators,
};

/// Canonicalizes an arbitrary title into a comparable key made of lowercase
/// ASCII letters and digits only.
///
/// Tiers are tried in order and the first non-empty key wins:
///
/// 1. bracketed groups dropped, e.g. "Game (USA) [!]" -> "game"
/// 2. bracket characters opened up, keeping their content,
///    e.g. "CN [Dragon_Force]" -> "dragonforce"
/// 3. plain alphanumeric fold of the raw text, no token removal
///
/// The result is non-empty whenever the input holds at least one ASCII letter
/// or digit, and `normalize(normalize(x)) == normalize(x)`.
pub fn normalize(raw: &str) -> String {
    let aggressive = fold(&remove_bracketed(raw));
    if !aggressive.is_empty() {
        return aggressive;
    }

    let fallback = fold(&open_brackets(raw));
    if !fallback.is_empty() {
        return fallback;
    }

    retain_ascii_alphanumeric(raw)
}

fn fold(s: &str) -> String {
    let s = remove_cn_marker(s);
    let s = replace_separators(&s);
    retain_ascii_alphanumeric(&s)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_titles() {
        let test_cases = vec![
            ("1941: Counter Attack (World 900227)", "1941counterattack"),
            ("1941 Counter Attack", "1941counterattack"),
            ("Super Mario World (USA) [!]", "supermarioworld"),
            ("CN [Dragon_Force]", "dragonforce"),
            ("Dragon_Force.v1", "dragonforcev1"),
            ("CN Super Robot Taisen F", "superrobottaisenf"),
            ("[SRWF]", "srwf"),
            ("Street Fighter II' - Champion Edition", "streetfighteriichampionedition"),
            ("火焰纹章 - 纹章之谜", ""),
            ("", ""),
        ];

        for (input, expected) in test_cases {
            assert_eq!(normalize(input), expected, "input: {input}");
        }
    }

    #[test]
    fn test_normalize_keeps_bracket_content_when_nothing_else_remains() {
        assert_eq!(normalize("(Japan)"), "japan");
        assert_eq!(normalize("[1943kai]"), "1943kai");
    }

    #[test]
    fn test_normalize_never_empty_when_input_has_alphanumerics() {
        assert_eq!(normalize("CN"), "cn");
        assert_eq!(normalize("[CN]"), "cn");
        assert_eq!(normalize("火焰之纹章3"), "3");
    }

    #[test]
    fn test_normalize_is_idempotent() {
        let inputs = [
            "1941: Counter Attack (World 900227)",
            "CN [Dragon_Force]",
            "C.N",
            "CN",
            "Art of Fighting 3 - The Path of the Warrior",
            "aof3",
            "火焰之纹章3",
            "___",
        ];
        for input in inputs {
            let once = normalize(input);
            assert_eq!(normalize(&once), once, "input: {input}");
        }
    }
}
