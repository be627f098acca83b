use super::SimilarityScorer;

/// Similarity from the insertion/deletion distance of the two strings,
/// `100 * (1 - indel / (len_a + len_b))`, computed on chars.
#[derive(Debug, Clone, Copy, Default)]
pub struct IndelScorer;

impl SimilarityScorer for IndelScorer {
    fn ratio(&self, a: &str, b: &str) -> f64 {
        let a: Vec<char> = a.chars().collect();
        let b: Vec<char> = b.chars().collect();
        let total = a.len() + b.len();
        if total == 0 {
            return 100.0;
        }
        let lcs = longest_common_subsequence(&a, &b);
        let indel = total - 2 * lcs;
        100.0 * (1.0 - indel as f64 / total as f64)
    }
}

fn longest_common_subsequence(a: &[char], b: &[char]) -> usize {
    if a.is_empty() || b.is_empty() {
        return 0;
    }
    let mut previous = vec![0usize; b.len() + 1];
    let mut current = vec![0usize; b.len() + 1];
    for ca in a {
        for (j, cb) in b.iter().enumerate() {
            current[j + 1] = if ca == cb {
                previous[j] + 1
            } else {
                previous[j + 1].max(current[j])
            };
        }
        std::mem::swap(&mut previous, &mut current);
    }
    previous[b.len()]
}
