use super::SimilarityScorer;

/// Similarity from the normalized Levenshtein distance of `strsim`.
/// Substitutions cost one edit here, so strings of equal length with a few
/// typos score higher than with [`super::IndelScorer`].
#[derive(Debug, Clone, Copy, Default)]
pub struct LevenshteinScorer;

impl SimilarityScorer for LevenshteinScorer {
    fn ratio(&self, a: &str, b: &str) -> f64 {
        if a.is_empty() && b.is_empty() {
            return 100.0;
        }
        strsim::normalized_levenshtein(a, b) * 100.0
    }
}
