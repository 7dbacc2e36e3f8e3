/// HTTP model-serving classifier
///
/// Talks to a model-serving endpoint hosting a pre-trained image classifier
/// (MobileNetV2-class). The image is decoded and resized to the model input
/// shape locally, then shipped as base64 PNG; the endpoint answers ranked
/// (label, confidence) predictions.
use std::io::Cursor;
use std::time::Duration;

use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use image::{imageops::FilterType, ImageFormat};
use reqwest::Client as HttpClient;
use serde::{Deserialize, Serialize};

use crate::{
    error::{AppError, AppResult},
    models::Prediction,
    services::providers::{StyleClassifier, TOP_PREDICTIONS},
};

/// Model input edge length, in pixels
const INPUT_SIZE: u32 = 224;

#[derive(Debug, Serialize)]
struct InferenceRequest {
    image_data: String,
}

#[derive(Debug, Deserialize)]
struct InferenceResponse {
    predictions: Vec<ServingPrediction>,
}

#[derive(Debug, Deserialize)]
struct ServingPrediction {
    label: String,
    confidence: f32,
}

#[derive(Clone)]
pub struct ServingClassifier {
    http_client: HttpClient,
    api_url: String,
    api_key: Option<String>,
}

impl ServingClassifier {
    /// Creates a classifier bound to a serving endpoint.
    ///
    /// The timeout caps a single inference round trip; there are no
    /// retries.
    pub fn new(api_url: String, api_key: Option<String>, timeout: Duration) -> AppResult<Self> {
        let http_client = HttpClient::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| AppError::Internal(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self {
            http_client,
            api_url,
            api_key,
        })
    }

    /// Decode, resize to the model input shape and encode as base64 PNG
    fn preprocess(image_bytes: &[u8]) -> AppResult<String> {
        let img = image::load_from_memory(image_bytes)
            .map_err(|e| AppError::Preprocessing(format!("cannot decode image: {}", e)))?;

        let resized = img.resize_exact(INPUT_SIZE, INPUT_SIZE, FilterType::Triangle);

        let mut bytes = Vec::new();
        resized
            .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
            .map_err(|e| AppError::Preprocessing(format!("cannot re-encode image: {}", e)))?;

        Ok(BASE64.encode(&bytes))
    }

    /// Clamp, sort descending and truncate the raw serving output
    fn normalize(raw: Vec<ServingPrediction>) -> Vec<Prediction> {
        let mut predictions: Vec<Prediction> = raw
            .into_iter()
            .map(|p| Prediction {
                label: p.label,
                confidence: p.confidence.clamp(0.0, 1.0),
            })
            .collect();

        predictions.sort_by(|a, b| {
            b.confidence
                .partial_cmp(&a.confidence)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        predictions.truncate(TOP_PREDICTIONS);
        predictions
    }
}

#[async_trait::async_trait]
impl StyleClassifier for ServingClassifier {
    async fn classify(&self, image: &[u8]) -> AppResult<Vec<Prediction>> {
        let image_data = Self::preprocess(image)?;

        let mut request = self
            .http_client
            .post(&self.api_url)
            .json(&InferenceRequest { image_data });

        if let Some(key) = &self.api_key {
            request = request.header("x-api-key", key.as_str());
        }

        let response = request
            .send()
            .await
            .map_err(|e| AppError::ModelUnavailable(format!("inference request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::ModelUnavailable(format!(
                "model server returned status {}: {}",
                status, body
            )));
        }

        let inference: InferenceResponse = response.json().await.map_err(|e| {
            AppError::ModelUnavailable(format!("invalid model server response: {}", e))
        })?;

        let predictions = Self::normalize(inference.predictions);

        tracing::info!(
            predictions = predictions.len(),
            classifier = self.name(),
            "Image classified"
        );

        Ok(predictions)
    }

    fn name(&self) -> &'static str {
        "serving"
    }
}
