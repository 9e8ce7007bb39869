//! Test helpers: an in-process server with a fast, predictable configuration, plus stub classifiers.

use std::sync::Arc;
use std::time::Duration;

use axum_test::TestServer;

use crate::classifier::{Classifier, ClassifierError, MockClassifier, Prediction};
use crate::config::Config;

pub fn create_test_config() -> Config {
    let mut config = Config {
        secret_key: Some("test-secret-key-for-sessions".to_string()),
        port: 0,
        ..Default::default()
    };
    config.classifier.min_latency = Duration::ZERO;
    config.classifier.max_latency = Duration::ZERO;
    config.classifier.timeout = Duration::from_secs(1);
    config
}

/// Server with the default seed user (`john_doe`, id 1, 1250 credits) and an instant mock classifier.
pub fn create_test_app() -> TestServer {
    create_test_app_with_config(create_test_config())
}

pub fn create_test_app_with_config(config: Config) -> TestServer {
    crate::Application::with_classifier(config, Arc::new(MockClassifier::instant()))
        .expect("Failed to create application")
        .into_test_server()
}

pub fn create_test_app_with_classifier(classifier: Arc<dyn Classifier>) -> TestServer {
    crate::Application::with_classifier(create_test_config(), classifier)
        .expect("Failed to create application")
        .into_test_server()
}

/// Always returns the same predictions.
pub struct FixedClassifier {
    predictions: Vec<Prediction>,
}

impl FixedClassifier {
    pub fn new(predictions: Vec<Prediction>) -> Self {
        Self { predictions }
    }
}

#[async_trait::async_trait]
impl Classifier for FixedClassifier {
    async fn classify(&self, _image: &[u8]) -> Result<Vec<Prediction>, ClassifierError> {
        Ok(self.predictions.clone())
    }
}

pub struct FailingClassifier;

#[async_trait::async_trait]
impl Classifier for FailingClassifier {
    async fn classify(&self, _image: &[u8]) -> Result<Vec<Prediction>, ClassifierError> {
        Err(ClassifierError::Unavailable("model offline".to_string()))
    }
}

/// Never answers.
pub struct StalledClassifier;

#[async_trait::async_trait]
impl Classifier for StalledClassifier {
    async fn classify(&self, _image: &[u8]) -> Result<Vec<Prediction>, ClassifierError> {
        std::future::pending().await
    }
}
