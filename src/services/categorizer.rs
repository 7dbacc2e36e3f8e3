use crate::models::{Prediction, StyleCategory};

/// Keyword table mapping each style category to label substrings.
///
/// Declaration order is the tie-break order: when two categories reach the
/// same score, the one listed first wins. Matching is case-insensitive
/// substring containment, so a label can contribute to several categories.
const STYLE_KEYWORDS: &[(StyleCategory, &[&str])] = &[
    (
        StyleCategory::Casual,
        &["t-shirt", "jeans", "hoodie", "sneaker", "casual"],
    ),
    (
        StyleCategory::Formal,
        &["suit", "tie", "dress", "formal", "business"],
    ),
    (
        StyleCategory::Sporty,
        &["athletic", "sport", "running", "fitness", "active"],
    ),
    (
        StyleCategory::Vintage,
        &["vintage", "retro", "classic", "old", "antique"],
    ),
    (
        StyleCategory::Bohemian,
        &["bohemian", "boho", "hippie", "ethnic", "tribal"],
    ),
    (
        StyleCategory::Minimalist,
        &["minimal", "simple", "clean", "basic", "monochrome"],
    ),
];

/// Maps ranked classifier predictions to a style category.
///
/// Each category scores the sum of confidences of every prediction whose
/// label contains at least one of its keywords; a prediction counts at most
/// once per category. Returns `Other` when nothing matched.
pub fn categorize(predictions: &[Prediction]) -> StyleCategory {
    let mut best = StyleCategory::Other;
    let mut best_score = 0.0f32;

    for (category, keywords) in STYLE_KEYWORDS {
        let mut score = 0.0f32;

        for prediction in predictions {
            let label = prediction.label.to_lowercase();
            if keywords.iter().any(|keyword| label.contains(keyword)) {
                score += prediction.confidence;
            }
        }

        // Strict comparison keeps the first category on ties
        if score > best_score {
            best_score = score;
            best = *category;
        }
    }

    best
}

#[cfg(test)]
mod tests {
    use super::*;

    fn prediction(label: &str, confidence: f32) -> Prediction {
        Prediction {
            label: label.to_string(),
            confidence,
        }
    }

    #[test]
    fn test_single_keyword_match() {
        let predictions = vec![prediction("Running Shoe", 0.9)];
        assert_eq!(categorize(&predictions), StyleCategory::Sporty);
    }

    #[test]
    fn test_highest_scoring_category_wins() {
        let predictions = vec![
            prediction("Jersey T-Shirt", 0.3),
            prediction("Blue Jeans", 0.3),
            prediction("Business Suit", 0.5),
        ];
        // casual: 0.3 + 0.3 = 0.6, formal: 0.5
        assert_eq!(categorize(&predictions), StyleCategory::Casual);
    }

    #[test]
    fn test_no_match_returns_other() {
        let predictions = vec![
            prediction("Golden Retriever", 0.8),
            prediction("Espresso Maker", 0.1),
        ];
        assert_eq!(categorize(&predictions), StyleCategory::Other);
    }

    #[test]
    fn test_empty_predictions_return_other() {
        assert_eq!(categorize(&[]), StyleCategory::Other);
    }

    #[test]
    fn test_label_contributes_to_multiple_categories() {
        // "vintage running jacket" feeds both sporty and vintage; vintage is
        // declared later, so on an exact tie sporty must win.
        let predictions = vec![prediction("Vintage Running Jacket", 0.5)];
        assert_eq!(categorize(&predictions), StyleCategory::Sporty);
    }

    #[test]
    fn test_matching_is_case_insensitive() {
        let predictions = vec![prediction("HOODIE", 0.4)];
        assert_eq!(categorize(&predictions), StyleCategory::Casual);
    }

    #[test]
    fn test_prediction_counts_once_per_category() {
        // Label hits two casual keywords but contributes its confidence once.
        let predictions = vec![
            prediction("Casual Hoodie", 0.4),
            prediction("Business Tie", 0.5),
        ];
        assert_eq!(categorize(&predictions), StyleCategory::Formal);
    }

    #[test]
    fn test_deterministic_across_calls() {
        let predictions = vec![
            prediction("Trench Coat", 0.35),
            prediction("Sneaker", 0.25),
            prediction("Denim Jeans", 0.2),
        ];
        let first = categorize(&predictions);
        for _ in 0..10 {
            assert_eq!(categorize(&predictions), first);
        }
    }
}
