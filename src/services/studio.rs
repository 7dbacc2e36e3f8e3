use std::collections::BTreeMap;
use std::time::Duration;

use chrono::Utc;
use serde::Serialize;

pub const MODEL_FASHION_GEN: &str = "fashion-gen";
pub const MODEL_STYLE_ANALYZER: &str = "style-analyzer";
pub const MODEL_IMAGE_GEN: &str = "image-gen";

const PLACEHOLDER_IMAGE_URL: &str =
    "https://placehold.co/600x800/png?text=AI+Generated+Fashion+Design";

#[derive(Debug, Clone, Serialize)]
pub struct IdeasResponse {
    pub ideas: Vec<String>,
    pub timestamp: String,
    pub model: &'static str,
}

#[derive(Debug, Clone, Serialize)]
pub struct GeneratedImageResponse {
    pub image_url: String,
    pub prompt: String,
    pub timestamp: String,
    pub model: &'static str,
}

#[derive(Debug, Clone, Serialize)]
pub struct SimulatedAnalysis {
    pub style_categories: Vec<&'static str>,
    pub color_palette: Vec<&'static str>,
    pub fabric_suggestions: Vec<&'static str>,
    pub similar_styles: Vec<&'static str>,
}

#[derive(Debug, Clone, Serialize)]
pub struct StyleAnalysisResponse {
    pub analysis: SimulatedAnalysis,
    pub timestamp: String,
    pub model: &'static str,
}

#[derive(Debug, Clone, Serialize)]
pub struct ModelInfo {
    pub status: &'static str,
    #[serde(rename = "type")]
    pub model_type: &'static str,
    pub description: &'static str,
}

#[derive(Debug, Clone, Serialize)]
pub struct ModelStatusResponse {
    pub models: BTreeMap<&'static str, ModelInfo>,
    pub timestamp: String,
}

/// Simulated generative models for the design studio endpoints.
///
/// Every operation returns a canned response after a simulated processing
/// delay, standing in for real text and image generation backends. The
/// delay is injected so tests can run with `Duration::ZERO`.
pub struct DesignStudio {
    latency: Duration,
}

impl DesignStudio {
    pub fn new(latency: Duration) -> Self {
        Self { latency }
    }

    /// A studio with no simulated latency, for tests
    pub fn instant() -> Self {
        Self::new(Duration::ZERO)
    }

    /// Generates three design ideas for a prompt.
    ///
    /// The idea set is keyed off prompt keywords, with a generic fallback.
    pub async fn generate_ideas(&self, prompt: &str) -> IdeasResponse {
        tracing::info!(prompt_len = prompt.len(), "Generating design ideas");
        tokio::time::sleep(self.latency).await;

        let lowered = prompt.to_lowercase();
        let ideas: Vec<String> = if lowered.contains("sustainable") {
            vec![
                "Eco-friendly linen blazer with recycled button details".to_string(),
                "Organic cotton wrap dress with natural dye coloration".to_string(),
                "Upcycled denim collection with minimal water usage".to_string(),
            ]
        } else if lowered.contains("summer") {
            vec![
                "Lightweight cotton sundress with adjustable straps".to_string(),
                "Breathable linen shorts with drawstring waist".to_string(),
                "Oversized beach shirt with UV protection".to_string(),
            ]
        } else {
            vec![
                "Contemporary silhouette with architectural influence".to_string(),
                "Textured fabric with contrasting color accents".to_string(),
                "Versatile design suitable for multiple occasions".to_string(),
            ]
        };

        IdeasResponse {
            ideas,
            timestamp: Utc::now().to_rfc3339(),
            model: MODEL_FASHION_GEN,
        }
    }

    /// Returns a placeholder image URL for a prompt
    pub async fn generate_image(&self, prompt: &str) -> GeneratedImageResponse {
        tracing::info!(prompt_len = prompt.len(), "Generating design image");
        tokio::time::sleep(self.latency * 2).await;

        GeneratedImageResponse {
            image_url: PLACEHOLDER_IMAGE_URL.to_string(),
            prompt: prompt.to_string(),
            timestamp: Utc::now().to_rfc3339(),
            model: MODEL_IMAGE_GEN,
        }
    }

    /// Returns a canned style analysis for an image URL
    pub async fn analyze_style(&self, image_url: &str) -> StyleAnalysisResponse {
        tracing::info!(image_url = %image_url, "Analyzing style from image URL");
        tokio::time::sleep(self.latency * 3 / 2).await;

        StyleAnalysisResponse {
            analysis: SimulatedAnalysis {
                style_categories: vec!["minimalist", "contemporary", "casual"],
                color_palette: vec!["#f5f5f5", "#333333", "#a0a0a0"],
                fabric_suggestions: vec!["cotton", "linen", "silk blend"],
                similar_styles: vec!["Scandinavian minimalism", "Japanese contemporary"],
            },
            timestamp: Utc::now().to_rfc3339(),
            model: MODEL_STYLE_ANALYZER,
        }
    }

    /// Status report for every simulated model
    pub fn model_status(&self) -> ModelStatusResponse {
        let mut models = BTreeMap::new();
        models.insert(
            MODEL_FASHION_GEN,
            ModelInfo {
                status: "active",
                model_type: "text",
                description: "Generates fashion design ideas and descriptions",
            },
        );
        models.insert(
            MODEL_STYLE_ANALYZER,
            ModelInfo {
                status: "active",
                model_type: "text",
                description: "Analyzes fashion styles from text descriptions",
            },
        );
        models.insert(
            MODEL_IMAGE_GEN,
            ModelInfo {
                status: "active",
                model_type: "image",
                description: "Generates fashion design images from descriptions",
            },
        );

        ModelStatusResponse {
            models,
            timestamp: Utc::now().to_rfc3339(),
        }
    }
}
