use std::collections::HashSet;

use lazy_static::lazy_static;
use regex::Regex;
use serde::Serialize;

lazy_static! {
    static ref WORD: Regex = Regex::new(r"\w+").expect("static regex");
}

pub const LEXICAL_WEIGHT: f64 = 0.3;
pub const SEMANTIC_WEIGHT: f64 = 0.4;
pub const CATEGORY_WEIGHT: f64 = 0.3;


#[derive(Debug, Clone, Copy, Default, Serialize)]
pub struct DiversityScores {
    pub lexical: f64,
    pub semantic: f64,
    pub category: f64,
    pub average_category_coverage: f64,
    pub overall: f64,
}


pub fn cosine_similarity(vec1: &[f32], vec2: &[f32]) -> f64 {
    if vec1.is_empty() || vec1.len() != vec2.len() {
        return 0.0;
    }

    let dot_product: f32 = vec1.iter().zip(vec2.iter()).map(|(a, b)| a * b).sum();
    let mag1: f32 = vec1.iter().map(|a| a * a).sum::<f32>().sqrt();
    let mag2: f32 = vec2.iter().map(|b| b * b).sum::<f32>().sqrt();

    if mag1 == 0.0 || mag2 == 0.0 {
        return 0.0;
    }

    f64::from(dot_product / (mag1 * mag2))
}


/// Unique lowercase words over total words.
pub fn lexical_diversity<'a>(documents: impl IntoIterator<Item = &'a str>) -> f64 {
    let mut total = 0usize;
    let mut unique = HashSet::new();
    for doc in documents {
        for word in WORD.find_iter(doc) {
            total += 1;
            unique.insert(word.as_str().to_lowercase());
        }
    }
    if total == 0 {
        0.0
    } else {
        unique.len() as f64 / total as f64
    }
}


/// One minus the mean pairwise cosine similarity.
pub fn semantic_diversity(embeddings: &[Vec<f32>]) -> f64 {
    if embeddings.len() < 2 {
        return 0.0;
    }
    let mut sum = 0.0;
    let mut pairs = 0usize;
    for (i, a) in embeddings.iter().enumerate() {
        for b in &embeddings[i + 1..] {
            sum += cosine_similarity(a, b);
            pairs += 1;
        }
    }
    1.0 - sum / pairs as f64
}


/// Returns `(diversity, average coverage)`; diversity is one minus the mean
/// pairwise Jaccard overlap of category sets.
pub fn category_diversity(articles: &[Vec<String>]) -> (f64, f64) {
    if articles.is_empty() {
        return (0.0, 0.0);
    }
    let coverage =
        articles.iter().map(Vec::len).sum::<usize>() as f64 / articles.len() as f64;

    let sets: Vec<HashSet<&str>> = articles
        .iter()
        .map(|cats| cats.iter().map(String::as_str).collect())
        .collect();

    let mut overlap = 0.0;
    let mut pairs = 0usize;
    for (i, a) in sets.iter().enumerate() {
        for b in &sets[i + 1..] {
            let union = a.union(b).count();
            if union > 0 {
                overlap += a.intersection(b).count() as f64 / union as f64;
            }
            pairs += 1;
        }
    }

    let diversity = if pairs > 0 {
        1.0 - overlap / pairs as f64
    } else {
        0.0
    };
    (diversity, coverage)
}


pub fn diversity_scores(
    documents: &[&str],
    embeddings: &[Vec<f32>],
    categories: &[Vec<String>],
) -> DiversityScores {
    let lexical = lexical_diversity(documents.iter().copied());
    let semantic = semantic_diversity(embeddings);
    let (category, average_category_coverage) = category_diversity(categories);

    DiversityScores {
        lexical,
        semantic,
        category,
        average_category_coverage,
        overall: LEXICAL_WEIGHT * lexical + SEMANTIC_WEIGHT * semantic + CATEGORY_WEIGHT * category,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cats(groups: &[&[&str]]) -> Vec<Vec<String>> {
        groups
            .iter()
            .map(|g| g.iter().map(|c| c.to_string()).collect())
            .collect()
    }

    #[test]
    fn test_cosine_similarity() {
        assert!((cosine_similarity(&[1.0, 0.0], &[2.0, 0.0]) - 1.0).abs() < 1e-6);
        assert!(cosine_similarity(&[1.0, 0.0], &[0.0, 3.0]).abs() < 1e-6);
        assert_eq!(cosine_similarity(&[1.0], &[1.0, 2.0]), 0.0);
        assert_eq!(cosine_similarity(&[0.0, 0.0], &[1.0, 2.0]), 0.0);
    }

    #[test]
    fn test_lexical_diversity() {
        assert!((lexical_diversity(["The cat", "the dog"]) - 0.75).abs() < 1e-9);
        assert_eq!(lexical_diversity(["", "  "]), 0.0);
    }

    #[test]
    fn test_semantic_diversity() {
        assert_eq!(semantic_diversity(&[vec![1.0, 0.0]]), 0.0);
        let orthogonal = vec![vec![1.0, 0.0], vec![0.0, 1.0]];
        assert!((semantic_diversity(&orthogonal) - 1.0).abs() < 1e-6);
        let identical = vec![vec![1.0, 1.0], vec![2.0, 2.0]];
        assert!(semantic_diversity(&identical).abs() < 1e-6);
    }

    #[test]
    fn test_category_diversity() {
        let (diversity, coverage) = category_diversity(&cats(&[&["A", "B"], &["B", "C"]]));
        assert!((diversity - (1.0 - 1.0 / 3.0)).abs() < 1e-9);
        assert!((coverage - 2.0).abs() < 1e-9);

        let (single, _) = category_diversity(&cats(&[&["A"]]));
        assert_eq!(single, 0.0);
    }

    #[test]
    fn test_overall_weighting() {
        let scores = diversity_scores(
            &["alpha beta", "gamma delta"],
            &[vec![1.0, 0.0], vec![0.0, 1.0]],
            &cats(&[&["X"], &["Y"]]),
        );
        assert!((scores.lexical - 1.0).abs() < 1e-9);
        assert!((scores.overall - 1.0).abs() < 1e-6);
    }
}
