use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt::Display;
use uuid::Uuid;

/// Closed set of style categories a fashion item can belong to
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum StyleCategory {
    Casual,
    Formal,
    Sporty,
    Vintage,
    Bohemian,
    Minimalist,
    /// Fallback when no category keyword matches the classifier output
    Other,
}

impl StyleCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            StyleCategory::Casual => "casual",
            StyleCategory::Formal => "formal",
            StyleCategory::Sporty => "sporty",
            StyleCategory::Vintage => "vintage",
            StyleCategory::Bohemian => "bohemian",
            StyleCategory::Minimalist => "minimalist",
            StyleCategory::Other => "other",
        }
    }
}

impl Display for StyleCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One dominant color of an item's palette
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PaletteColor {
    /// Hex color in `#rrggbb` form
    pub color: String,
    /// Share of pixels assigned to this color, in [0, 1]
    pub percentage: f32,
}

/// A single classifier prediction
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Prediction {
    pub label: String,
    /// Confidence score in [0, 1]
    pub confidence: f32,
}

/// Result of classifying an item's image
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StyleAnalysis {
    pub predictions: Vec<Prediction>,
    pub style_category: StyleCategory,
}

/// Result of extracting an item's color palette
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ColorAnalysis {
    pub palette: Vec<PaletteColor>,
}

/// A fashion item in the catalog
///
/// `style_category` and `color_palette` stay empty until the item's image
/// has been analyzed. The raw image bytes never leave the server.
#[derive(Debug, Clone)]
pub struct FashionItem {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub style_category: Option<StyleCategory>,
    pub image: Option<Vec<u8>>,
    pub color_palette: Vec<PaletteColor>,
    pub created_at: DateTime<Utc>,
}

impl FashionItem {
    /// Creates a new unanalyzed item
    pub fn new(title: String, description: String, image: Option<Vec<u8>>) -> Self {
        Self {
            id: Uuid::new_v4(),
            title,
            description,
            style_category: None,
            image,
            color_palette: Vec::new(),
            created_at: Utc::now(),
        }
    }
}

/// A directed recommendation edge between two items
///
/// At most one edge exists per (source, recommended) pair; re-materializing
/// overwrites the score and reason in place.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StyleRecommendation {
    pub id: Uuid,
    pub source_item: Uuid,
    pub recommended_item: Uuid,
    /// Similarity score in [0, 1]
    pub similarity_score: f32,
    pub recommendation_reason: String,
    pub created_at: DateTime<Utc>,
}
