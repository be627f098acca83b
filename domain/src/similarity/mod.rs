//! String similarity scoring on a 0-100 scale.
//!
//! A [`SimilarityScorer`] only has to provide [`SimilarityScorer::ratio`]; the
//! partial, token based and holistic scores are derived from it, so a
//! different edit distance backend changes every derived score consistently.

mod indel;
mod levenshtein;
mod process;
mod tokens;

pub use indel::IndelScorer;
pub use levenshtein::LevenshteinScorer;
pub use process::{extract, extract_one};

use tokens::{sorted_tokens, TokenSets};

pub trait SimilarityScorer: Send + Sync {
    /// Whole string similarity. Two empty strings are identical (100), an
    /// empty string against a non-empty one scores 0.
    fn ratio(&self, a: &str, b: &str) -> f64;

    /// Best [`ratio`](Self::ratio) of the shorter string against any
    /// same-length window of the longer one. Windows running off either end
    /// of the longer string are tried as well, so "火焰之纹章3" still lines up
    /// with the leading "火焰纹章" of "火焰纹章 - 纹章之谜".
    fn partial_ratio(&self, a: &str, b: &str) -> f64 {
        let a: Vec<char> = a.chars().collect();
        let b: Vec<char> = b.chars().collect();
        if a.is_empty() && b.is_empty() {
            return 100.0;
        }
        if a.is_empty() || b.is_empty() {
            return 0.0;
        }

        if a.len() < b.len() {
            best_window_ratio(self, &a, &b)
        } else if a.len() > b.len() {
            best_window_ratio(self, &b, &a)
        } else {
            best_window_ratio(self, &a, &b).max(best_window_ratio(self, &b, &a))
        }
    }

    /// Order insensitive: tokens are sorted before comparing. Length
    /// differences still lower the score.
    fn token_sort_ratio(&self, a: &str, b: &str) -> f64 {
        self.ratio(&sorted_tokens(a), &sorted_tokens(b))
    }

    /// Compares the shared tokens with each side's shared-plus-remaining
    /// tokens. A string whose tokens are a subset of the other scores 100.
    fn token_set_ratio(&self, a: &str, b: &str) -> f64 {
        let sets = TokenSets::new(a, b);
        if sets.is_empty() {
            return 0.0;
        }
        if sets.has_intersection() && (sets.only_a.is_empty() || sets.only_b.is_empty()) {
            return 100.0;
        }

        let shared = sets.shared_joined();
        let with_a = sets.shared_with(&sets.only_a);
        let with_b = sets.shared_with(&sets.only_b);

        let mut best = self.ratio(&with_a, &with_b);
        if !shared.is_empty() {
            best = best
                .max(self.ratio(&shared, &with_a))
                .max(self.ratio(&shared, &with_b));
        }
        best
    }

    /// Weighted blend of the scores above, picking the view that suits the
    /// length difference of the two strings. Works for mixed scripts where
    /// token boundaries are rare.
    fn holistic_ratio(&self, a: &str, b: &str) -> f64 {
        let len_a = a.chars().count();
        let len_b = b.chars().count();
        if len_a == 0 || len_b == 0 {
            return 0.0;
        }

        const UNBASE_SCALE: f64 = 0.95;
        let len_ratio = len_a.max(len_b) as f64 / len_a.min(len_b) as f64;
        let mut end_ratio = self.ratio(a, b);

        if len_ratio < 1.5 {
            let token_ratio = self.token_sort_ratio(a, b).max(self.token_set_ratio(a, b));
            return end_ratio.max(token_ratio * UNBASE_SCALE);
        }

        let partial_scale = if len_ratio < 8.0 { 0.9 } else { 0.6 };
        end_ratio = end_ratio.max(self.partial_ratio(a, b) * partial_scale);

        let partial_token_ratio = {
            let sets = TokenSets::new(a, b);
            if sets.has_intersection() {
                100.0
            } else {
                self.partial_ratio(&sorted_tokens(a), &sorted_tokens(b))
            }
        };
        end_ratio.max(partial_token_ratio * UNBASE_SCALE * partial_scale)
    }
}

fn best_window_ratio<S: SimilarityScorer + ?Sized>(
    scorer: &S,
    needle: &[char],
    haystack: &[char],
) -> f64 {
    let needle_str: String = needle.iter().collect();
    let score = |window: &[char]| {
        let window: String = window.iter().collect();
        scorer.ratio(&needle_str, &window)
    };

    let n = needle.len();
    let h = haystack.len();
    let windows = (1..n)
        .map(|len| &haystack[..len])
        .chain((0..=(h - n)).map(|start| &haystack[start..start + n]))
        .chain(((h - n + 1)..h).map(|start| &haystack[start..]));

    let mut best = 0.0_f64;
    for window in windows {
        best = best.max(score(window));
        if best >= 100.0 {
            break;
        }
    }
    best
}
