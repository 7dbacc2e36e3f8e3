/// Style classifier abstraction
///
/// The pre-trained image model is an external collaborator reached over a
/// model-serving endpoint. Hiding it behind a trait keeps handlers testable
/// and lets the serving backend change without touching the analysis flow.
use crate::{error::AppResult, models::Prediction};

pub mod serving;

pub use serving::ServingClassifier;

/// Classifier output is truncated to this many predictions
pub const TOP_PREDICTIONS: usize = 5;

/// Trait for image style classifiers
///
/// Implementations return at most [`TOP_PREDICTIONS`] (label, confidence)
/// pairs, confidence in [0, 1], sorted by confidence descending. They must
/// be stateless and re-entrant: one instance is shared across requests.
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait StyleClassifier: Send + Sync {
    /// Classify an image from its raw encoded bytes
    ///
    /// Fails with `Preprocessing` when the bytes cannot be decoded into the
    /// model's input shape, and `ModelUnavailable` when the model backend
    /// cannot be reached or answers malformed data.
    async fn classify(&self, image: &[u8]) -> AppResult<Vec<Prediction>>;

    /// Classifier name for logging and debugging
    fn name(&self) -> &'static str;
}
