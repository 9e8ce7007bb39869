//! Image classification boundary.
//!
//! A [`Classifier`] turns an image payload into a ranked list of `(label, score)` predictions.
//! It knows nothing about waste categories: the mapping from labels to categories lives in
//! [`crate::waste::classification`]. The only implementation shipped is [`MockClassifier`].

pub mod mock;
pub mod stats;

use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;
use tracing::instrument;
use utoipa::ToSchema;

pub use mock::MockClassifier;
pub use stats::DetectionStats;

/// One ranked guess from a classifier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Prediction {
    pub label: String,
    /// Confidence in `[0, 1]`
    pub score: f64,
}

impl Prediction {
    pub fn new(label: impl Into<String>, score: f64) -> Self {
        Self {
            label: label.into(),
            score,
        }
    }
}

#[derive(Debug, Error)]
pub enum ClassifierError {
    #[error("classifier unavailable: {0}")]
    Unavailable(String),

    #[error("classifier returned no predictions")]
    NoPredictions,

    #[error("classifier did not respond within {0:?}")]
    Timeout(Duration),
}

/// External capability returning ranked label guesses for an image.
///
/// Implementations return predictions ordered by descending score.
#[async_trait::async_trait]
pub trait Classifier: Send + Sync {
    async fn classify(&self, image: &[u8]) -> Result<Vec<Prediction>, ClassifierError>;
}

/// Run a classifier under a deadline. Dropping the returned future cancels the call.
#[instrument(skip_all, fields(image_len = image.len()))]
pub async fn classify_with_timeout(
    classifier: &dyn Classifier,
    image: &[u8],
    timeout: Duration,
) -> Result<Vec<Prediction>, ClassifierError> {
    match tokio::time::timeout(timeout, classifier.classify(image)).await {
        Ok(result) => result,
        Err(_) => Err(ClassifierError::Timeout(timeout)),
    }
}
