/// Index and score of the best scoring choice. The first choice wins ties.
pub fn extract_one<'a, I, F>(query: &str, choices: I, scorer: F) -> Option<(usize, f64)>
where
    I: IntoIterator<Item = &'a str>,
    F: Fn(&str, &str) -> f64,
{
    let mut best: Option<(usize, f64)> = None;
    for (index, choice) in choices.into_iter().enumerate() {
        let score = scorer(query, choice);
        match best {
            Some((_, best_score)) if score <= best_score => {}
            _ => best = Some((index, score)),
        }
    }
    best
}

/// The `limit` best scoring choices, highest score first. Equal scores keep
/// the order of `choices`.
pub fn extract<'a, I, F>(query: &str, choices: I, scorer: F, limit: usize) -> Vec<(usize, f64)>
where
    I: IntoIterator<Item = &'a str>,
    F: Fn(&str, &str) -> f64,
{
    let mut scored: Vec<(usize, f64)> = choices
        .into_iter()
        .enumerate()
        .map(|(index, choice)| (index, scorer(query, choice)))
        .collect();
    scored.sort_by(|a, b| b.1.total_cmp(&a.1));
    scored.truncate(limit);
    scored
}
