//! Scenario-driven stand-in for an image classification model.

use rand::prelude::RngExt;
use std::time::Duration;
use tracing::debug;

use super::{Classifier, ClassifierError, Prediction};

/// Canned prediction sets, each ranked by descending score.
const SCENARIOS: &[&[(&str, f64)]] = &[
    &[
        ("plastic bottle", 0.89),
        ("water bottle", 0.84),
        ("container", 0.71),
        ("bottle", 0.68),
        ("plastic bag", 0.34),
    ],
    &[
        ("aluminum can", 0.92),
        ("soda can", 0.88),
        ("beer can", 0.76),
        ("metal container", 0.65),
        ("tin", 0.43),
    ],
    &[
        ("newspaper", 0.85),
        ("paper", 0.81),
        ("magazine", 0.72),
        ("cardboard box", 0.69),
        ("book", 0.48),
    ],
    &[
        ("glass bottle", 0.87),
        ("wine bottle", 0.82),
        ("jar", 0.74),
        ("glass", 0.68),
        ("beer bottle", 0.55),
    ],
    &[
        ("smartphone", 0.91),
        ("phone", 0.86),
        ("electronic device", 0.78),
        ("tablet", 0.62),
        ("computer", 0.44),
    ],
    &[
        ("apple", 0.88),
        ("fruit", 0.83),
        ("food", 0.76),
        ("organic matter", 0.71),
        ("vegetable", 0.52),
    ],
];

/// Picks one of a fixed set of scenarios at random after a simulated inference delay.
///
/// The image content is ignored.
#[derive(Debug, Clone)]
pub struct MockClassifier {
    min_latency: Duration,
    max_latency: Duration,
}

impl MockClassifier {
    pub fn new(min_latency: Duration, max_latency: Duration) -> Self {
        Self {
            min_latency,
            max_latency: max_latency.max(min_latency),
        }
    }

    /// No simulated latency.
    pub fn instant() -> Self {
        Self::new(Duration::ZERO, Duration::ZERO)
    }

    pub fn scenario_count() -> usize {
        SCENARIOS.len()
    }

    fn scenario(index: usize) -> Vec<Prediction> {
        SCENARIOS[index]
            .iter()
            .map(|(label, score)| Prediction::new(*label, *score))
            .collect()
    }
}

#[async_trait::async_trait]
impl Classifier for MockClassifier {
    async fn classify(&self, image: &[u8]) -> Result<Vec<Prediction>, ClassifierError> {
        if image.is_empty() {
            return Err(ClassifierError::Unavailable("empty image payload".to_string()));
        }

        // The thread rng must not live across the await below.
        let (index, latency) = {
            let mut rng = rand::rng();
            let index = rng.random_range(0..SCENARIOS.len());
            let spread = self.max_latency.saturating_sub(self.min_latency).as_millis() as u64;
            let jitter = if spread == 0 { 0 } else { rng.random_range(0..=spread) };
            (index, self.min_latency + Duration::from_millis(jitter))
        };

        debug!(scenario = index, latency_ms = latency.as_millis() as u64, "mock classification");
        if !latency.is_zero() {
            tokio::time::sleep(latency).await;
        }

        Ok(Self::scenario(index))
    }
}
