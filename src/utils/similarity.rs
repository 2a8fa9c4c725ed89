use std::collections::HashMap;

use crate::utils::text::{collapse_whitespace, token_set};

/// Token-set Jaccard similarity, always in [0, 1].
///
/// The denominator is floored at 1, so two inputs with no tokens score 0
/// rather than dividing by zero.
pub fn jaccard_similarity(a: &str, b: &str) -> f64 {
    let a_set = token_set(a);
    let b_set = token_set(b);

    let intersection = a_set.intersection(&b_set).count();
    let denominator = (a_set.len() + b_set.len() - intersection).max(1);

    intersection as f64 / denominator as f64
}

/// Counts the character n-grams of the whitespace-collapsed input.
///
/// Windows containing a collapsed space straddle word boundaries and are
/// excluded. Inputs shorter than `n` produce an empty profile.
pub fn ngram_profile(text: &str, n: usize) -> HashMap<String, u32> {
    let mut profile = HashMap::new();
    if n == 0 {
        return profile;
    }

    let normalized: Vec<char> = collapse_whitespace(text).chars().collect();
    if normalized.len() < n {
        return profile;
    }

    for window in normalized.windows(n) {
        if window.contains(&' ') {
            continue;
        }
        *profile.entry(window.iter().collect::<String>()).or_insert(0) += 1;
    }

    profile
}

/// Cosine similarity over sparse n-gram count vectors, always in [0, 1].
///
/// Each squared norm is floored at 1 before the square root, so an empty
/// profile on either side yields 0.
pub fn cosine_similarity(a: &str, b: &str, n: usize) -> f64 {
    let profile_a = ngram_profile(a, n);
    let profile_b = ngram_profile(b, n);

    let mut dot = 0.0;
    let mut norm_a = 0.0;
    let mut norm_b = 0.0;

    for (gram, &count_a) in &profile_a {
        let count_a = count_a as f64;
        norm_a += count_a * count_a;
        if let Some(&count_b) = profile_b.get(gram) {
            dot += count_a * count_b as f64;
        }
    }
    for &count_b in profile_b.values() {
        let count_b = count_b as f64;
        norm_b += count_b * count_b;
    }

    dot / (norm_a.max(1.0).sqrt() * norm_b.max(1.0).sqrt())
}
