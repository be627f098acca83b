pub fn replace_separators(s: &str) -> String {
    s.replace(['_', '.'], " ")
}
