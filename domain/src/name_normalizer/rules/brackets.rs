use regex::Regex;
use std::sync::OnceLock;

/// Drops every `[...]` and `(...)` group together with its content.
pub fn remove_bracketed(s: &str) -> String {
    static SQUARE: OnceLock<Regex> = OnceLock::new();
    static ROUND: OnceLock<Regex> = OnceLock::new();
    let square = SQUARE.get_or_init(|| Regex::new(r"\[.*?\]").unwrap());
    let round = ROUND.get_or_init(|| Regex::new(r"\(.*?\)").unwrap());

    let s = square.replace_all(s, "");
    round.replace_all(&s, "").to_string()
}

/// Replaces bracket characters with spaces, keeping whatever they enclosed.
pub fn open_brackets(s: &str) -> String {
    s.replace(['[', ']', '(', ')'], " ")
}
