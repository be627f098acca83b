/// True when `s` contains anything outside the ASCII range. Fuzzy matching
/// is routed to localized names for such input.
pub fn has_non_ascii(s: &str) -> bool {
    !s.is_ascii()
}

/// True when `s` contains a CJK unified ideograph.
pub fn contains_cjk(s: &str) -> bool {
    s.chars().any(|c| ('\u{4e00}'..='\u{9fff}').contains(&c))
}
