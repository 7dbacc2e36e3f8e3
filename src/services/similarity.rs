use uuid::Uuid;

use crate::models::{FashionItem, PaletteColor};

/// Ranked lists are truncated to this many candidates
pub const MAX_RECOMMENDATIONS: usize = 5;

/// RGB cube diagonal, the largest possible distance between two colors
const MAX_COLOR_DISTANCE: f32 = 441.673; // sqrt(3 * 255^2)

/// One scored candidate from a similarity ranking
#[derive(Debug, Clone, PartialEq)]
pub struct RankedCandidate {
    pub item_id: Uuid,
    pub score: f32,
    pub reason: String,
}

/// Ranks candidate items against a source item.
///
/// The source itself is excluded; results are sorted by score descending
/// (item id as the stable tie-break) and truncated to the top 5.
///
/// Scoring is deterministic: a shared style category places the score in
/// [0.7, 1.0] and palette affinity fills the remainder, while items of a
/// different category score at most 0.7 from palette affinity alone.
pub fn rank(source: &FashionItem, candidates: &[FashionItem]) -> Vec<RankedCandidate> {
    let mut ranked: Vec<RankedCandidate> = candidates
        .iter()
        .filter(|candidate| candidate.id != source.id)
        .map(|candidate| {
            let (score, reason) = score_pair(source, candidate);
            RankedCandidate {
                item_id: candidate.id,
                score,
                reason,
            }
        })
        .collect();

    ranked.sort_by(|a, b| {
        b.score
            .partial_cmp(&a.score)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| a.item_id.cmp(&b.item_id))
    });
    ranked.truncate(MAX_RECOMMENDATIONS);
    ranked
}

fn score_pair(source: &FashionItem, candidate: &FashionItem) -> (f32, String) {
    let affinity = palette_affinity(&source.color_palette, &candidate.color_palette);

    match (source.style_category, candidate.style_category) {
        (Some(a), Some(b)) if a == b => {
            let score = (0.7 + 0.3 * affinity).clamp(0.0, 1.0);
            (score, format!("shares style category {}", a))
        }
        _ => {
            let score = (0.7 * affinity).clamp(0.0, 1.0);
            let reason = if affinity >= 0.5 {
                format!("similar color palette ({}% match)", (affinity * 100.0).round())
            } else {
                "limited style overlap".to_string()
            };
            (score, reason)
        }
    }
}

/// Percentage-weighted nearest-color affinity between two palettes, in [0, 1].
///
/// Each source color is matched to its closest candidate color; distances are
/// weighted by the source color's pixel share and normalized to the RGB cube
/// diagonal. Empty or unparsable palettes score 0.
fn palette_affinity(source: &[PaletteColor], candidate: &[PaletteColor]) -> f32 {
    let candidate_colors: Vec<[f32; 3]> = candidate
        .iter()
        .filter_map(|entry| parse_hex(&entry.color))
        .collect();

    if candidate_colors.is_empty() {
        return 0.0;
    }

    let mut weighted_distance = 0.0f32;
    let mut total_weight = 0.0f32;

    for entry in source {
        let Some(rgb) = parse_hex(&entry.color) else {
            continue;
        };

        let nearest = candidate_colors
            .iter()
            .map(|other| color_distance(&rgb, other))
            .fold(f32::MAX, f32::min);

        weighted_distance += entry.percentage * nearest;
        total_weight += entry.percentage;
    }

    if total_weight <= 0.0 {
        return 0.0;
    }

    (1.0 - (weighted_distance / total_weight) / MAX_COLOR_DISTANCE).clamp(0.0, 1.0)
}

fn color_distance(a: &[f32; 3], b: &[f32; 3]) -> f32 {
    ((a[0] - b[0]).powi(2) + (a[1] - b[1]).powi(2) + (a[2] - b[2]).powi(2)).sqrt()
}

fn parse_hex(color: &str) -> Option<[f32; 3]> {
    let hex = color.strip_prefix('#')?;
    if hex.len() != 6 {
        return None;
    }
    let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
    let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
    let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
    Some([r as f32, g as f32, b as f32])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::StyleCategory;

    fn item(category: Option<StyleCategory>, palette: &[(&str, f32)]) -> FashionItem {
        let mut item = FashionItem::new("item".to_string(), String::new(), None);
        item.style_category = category;
        item.color_palette = palette
            .iter()
            .map(|(color, percentage)| PaletteColor {
                color: color.to_string(),
                percentage: *percentage,
            })
            .collect();
        item
    }

    #[test]
    fn test_source_never_ranked() {
        let source = item(Some(StyleCategory::Casual), &[]);
        let candidates = vec![source.clone(), item(Some(StyleCategory::Casual), &[])];
        let ranked = rank(&source, &candidates);
        assert_eq!(ranked.len(), 1);
        assert_ne!(ranked[0].item_id, source.id);
    }

    #[test]
    fn test_truncates_to_top_five() {
        let source = item(Some(StyleCategory::Formal), &[]);
        let candidates: Vec<FashionItem> = (0..8)
            .map(|_| item(Some(StyleCategory::Formal), &[]))
            .collect();
        let ranked = rank(&source, &candidates);
        assert_eq!(ranked.len(), MAX_RECOMMENDATIONS);
    }

    #[test]
    fn test_sorted_descending() {
        let source = item(Some(StyleCategory::Casual), &[("#102030", 1.0)]);
        let candidates = vec![
            item(Some(StyleCategory::Formal), &[("#102030", 1.0)]),
            item(Some(StyleCategory::Casual), &[("#102030", 1.0)]),
            item(None, &[]),
        ];
        let ranked = rank(&source, &candidates);
        for window in ranked.windows(2) {
            assert!(window[0].score >= window[1].score);
        }
    }

    #[test]
    fn test_same_category_outranks_different() {
        let palette = &[("#aabbcc", 1.0)];
        let source = item(Some(StyleCategory::Vintage), palette);
        let same = item(Some(StyleCategory::Vintage), palette);
        let different = item(Some(StyleCategory::Sporty), palette);

        let ranked = rank(&source, &[same.clone(), different.clone()]);
        assert_eq!(ranked[0].item_id, same.id);
        assert!(ranked[0].score >= 0.7);
        assert!(ranked[1].score <= 0.7);
    }

    #[test]
    fn test_identical_palettes_and_category_score_one() {
        let palette = &[("#336699", 0.6), ("#ffffff", 0.4)];
        let source = item(Some(StyleCategory::Minimalist), palette);
        let twin = item(Some(StyleCategory::Minimalist), palette);

        let ranked = rank(&source, &[twin]);
        assert!((ranked[0].score - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_category_match_reason() {
        let source = item(Some(StyleCategory::Casual), &[]);
        let candidate = item(Some(StyleCategory::Casual), &[]);
        let ranked = rank(&source, &[candidate]);
        assert_eq!(ranked[0].reason, "shares style category casual");
    }

    #[test]
    fn test_missing_palettes_score_zero_without_category_match() {
        let source = item(None, &[]);
        let candidate = item(Some(StyleCategory::Bohemian), &[]);
        let ranked = rank(&source, &[candidate]);
        assert_eq!(ranked[0].score, 0.0);
    }

    #[test]
    fn test_deterministic_across_calls() {
        let source = item(Some(StyleCategory::Casual), &[("#123456", 0.7), ("#654321", 0.3)]);
        let candidates = vec![
            item(Some(StyleCategory::Casual), &[("#123450", 1.0)]),
            item(Some(StyleCategory::Formal), &[("#fedcba", 1.0)]),
            item(None, &[("#123456", 1.0)]),
        ];

        let first = rank(&source, &candidates);
        let second = rank(&source, &candidates);
        assert_eq!(first, second);
    }

    #[test]
    fn test_scores_stay_in_unit_interval() {
        let source = item(Some(StyleCategory::Casual), &[("#000000", 1.0)]);
        let candidates = vec![
            item(Some(StyleCategory::Casual), &[("#ffffff", 1.0)]),
            item(Some(StyleCategory::Formal), &[("#000000", 1.0)]),
        ];
        for ranked in rank(&source, &candidates) {
            assert!((0.0..=1.0).contains(&ranked.score));
        }
    }

    #[test]
    fn test_palette_affinity_identical() {
        let palette = vec![PaletteColor {
            color: "#808080".to_string(),
            percentage: 1.0,
        }];
        assert!((palette_affinity(&palette, &palette) - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_palette_affinity_opposite_corners() {
        let black = vec![PaletteColor {
            color: "#000000".to_string(),
            percentage: 1.0,
        }];
        let white = vec![PaletteColor {
            color: "#ffffff".to_string(),
            percentage: 1.0,
        }];
        assert!(palette_affinity(&black, &white) < 1e-3);
    }
}
