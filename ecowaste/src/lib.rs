//! # ecowaste: waste logging and recycling credits
//!
//! `ecowaste` is the server behind a recycling app. Users log waste items, either by filling in a
//! form or by photographing the item and letting an image classifier suggest what it is. Every
//! entry is filed under one of eight fixed categories, and the weighable ones (paper, plastic,
//! metal) earn credits per kilogram.
//!
//! ## Architecture
//!
//! The HTTP layer is built on [Axum](https://github.com/tokio-rs/axum) and serves a JSON API under
//! `/api`. Users and entries live in an in-memory store behind the [`db::handlers::UserStore`] and
//! [`db::handlers::EntryStore`] traits, so a real datastore can replace it without touching the
//! handlers. State is lost on restart.
//!
//! ### Core Components
//!
//! The **waste domain** ([`waste`]) owns the category table, the mapping from free-text classifier
//! labels to categories, the credit calculator, and the [`waste::SubmissionFlow`] state machine that
//! takes an entry from capture through detection and review to submission. Nothing in it touches
//! HTTP or storage.
//!
//! The **classifier** ([`classifier`]) is an injected [`classifier::Classifier`]. The shipped
//! [`classifier::MockClassifier`] returns canned predictions after a simulated delay. Every call
//! runs under the configured timeout.
//!
//! The **API layer** ([`api`]) maps requests onto the domain and renders results, including every
//! failure, as camelCase JSON. The **auth layer** ([`auth`]) issues signed session tokens on login
//! and signup; a token only decides which user an entry is credited to.
//!
//! ## Quick Start
//!
//! ```no_run
//! use clap::Parser;
//! use ecowaste::{Application, Config};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let args = ecowaste::config::Args::parse();
//!     let config = Config::load(&args)?;
//!
//!     ecowaste::telemetry::init_telemetry(config.enable_otel_export)?;
//!
//!     let app = Application::new(config)?;
//!     app.serve(async {
//!         tokio::signal::ctrl_c().await.expect("Failed to listen for Ctrl+C");
//!     })
//!     .await?;
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Configuration
//!
//! Configuration is read from a YAML file (`config.yaml` by default) and `ECOWASTE_`-prefixed
//! environment variables, with `__` separating nested keys:
//!
//! ```bash
//! ECOWASTE_PORT=8080 ECOWASTE_SECRET_KEY=change-me ecowaste -f config.yaml
//! ```
//!
//! See [`config`] for all options.

pub mod api;
pub mod auth;
pub mod classifier;
pub mod config;
pub mod db;
pub mod errors;
mod openapi;
pub mod telemetry;
#[cfg(test)]
mod test_utils;
pub mod types;
pub mod waste;

use axum::http::{self, HeaderValue, Method};
use axum::{
    Router,
    routing::{get, post},
};
use bon::Builder;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    trace::{DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::{Level, debug, info, instrument};
use utoipa::OpenApi;
use utoipa_scalar::{Scalar, Servable};

use crate::classifier::{Classifier, DetectionStats, MockClassifier};
use crate::config::CorsOrigin;
use crate::db::InMemoryStore;
use crate::db::handlers::{EntryStore, UserStore};
use crate::openapi::ApiDoc;

pub use config::Config;
pub use types::{EntryId, UserId};

/// Application state shared across all request handlers.
///
/// # Example
///
/// ```ignore
/// let store = Arc::new(InMemoryStore::seeded(&config.seed_users));
/// let state = AppState::builder()
///     .config(config)
///     .users(store.clone())
///     .entries(store)
///     .classifier(Arc::new(MockClassifier::instant()))
///     .build();
/// ```
#[derive(Clone, Builder)]
pub struct AppState {
    pub config: Config,
    pub users: Arc<dyn UserStore>,
    pub entries: Arc<dyn EntryStore>,
    pub classifier: Arc<dyn Classifier>,
    #[builder(default)]
    pub detection_stats: Arc<DetectionStats>,
}

/// Build the CORS layer from configuration.
///
/// A wildcard origin allows any origin; it is rejected at config validation when combined with
/// credentials.
fn create_cors_layer(config: &Config) -> anyhow::Result<CorsLayer> {
    let cors_config = &config.auth.security.cors;

    let allow_origin = if cors_config
        .allowed_origins
        .iter()
        .any(|origin| matches!(origin, CorsOrigin::Wildcard))
    {
        AllowOrigin::any()
    } else {
        let mut origins = Vec::new();
        for origin in &cors_config.allowed_origins {
            if let CorsOrigin::Url(url) = origin {
                // Browsers send the origin without a trailing slash
                origins.push(url.as_str().trim_end_matches('/').parse::<HeaderValue>()?);
            }
        }
        AllowOrigin::list(origins)
    };

    let mut cors = CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([http::header::CONTENT_TYPE, http::header::AUTHORIZATION])
        .allow_credentials(cors_config.allow_credentials);

    if let Some(max_age) = cors_config.max_age {
        cors = cors.max_age(std::time::Duration::from_secs(max_age));
    }

    Ok(cors)
}

/// Build the application router with all endpoints and middleware.
///
/// - `/api/*`: the JSON API
/// - `/api/docs`: OpenAPI documentation
/// - `/healthz`: liveness probe
///
/// # Errors
///
/// Returns an error if the CORS configuration is invalid.
#[instrument(skip_all)]
pub fn build_router(state: AppState) -> anyhow::Result<Router> {
    use api::handlers::{auth, detection, entries, reference, users};

    let api_routes = Router::new()
        .route("/ping", get(reference::ping))
        .route("/auth/login", post(auth::login))
        .route("/auth/signup", post(auth::signup))
        .route("/waste/entries", post(entries::create_entry).get(entries::list_entries))
        .route("/waste/entries/{user_id}", get(entries::list_user_entries))
        .route("/waste/types", get(reference::list_waste_types))
        .route("/waste/places", get(reference::list_collection_places))
        .route("/users/{user_id}", get(users::get_user))
        .route("/ai/detect", post(detection::detect))
        .route("/ai/test", post(detection::ai_test))
        .route("/ai/stats", get(detection::ai_stats));

    let cors_layer = create_cors_layer(&state.config)?;

    let router = Router::new()
        .route("/healthz", get(|| async { "OK" }))
        .nest("/api", api_routes)
        .with_state(state)
        .merge(Scalar::with_url("/api/docs", ApiDoc::openapi()))
        .layer(cors_layer)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        );

    Ok(router)
}

/// The assembled server: state, router, and configuration.
pub struct Application {
    router: Router,
    config: Config,
}

impl Application {
    /// Create an application backed by the in-memory store and the mock classifier.
    pub fn new(config: Config) -> anyhow::Result<Self> {
        let classifier = MockClassifier::new(config.classifier.min_latency, config.classifier.max_latency);
        Self::with_classifier(config, Arc::new(classifier))
    }

    /// Create an application with a specific classifier.
    pub fn with_classifier(config: Config, classifier: Arc<dyn Classifier>) -> anyhow::Result<Self> {
        debug!("Starting EcoWaste with configuration: {:#?}", config);

        let store = Arc::new(InMemoryStore::seeded(&config.seed_users));
        let state = AppState::builder()
            .config(config.clone())
            .users(store.clone())
            .entries(store)
            .classifier(classifier)
            .build();

        let router = build_router(state)?;
        Ok(Self { router, config })
    }

    /// Convert application into a test server (for tests)
    #[cfg(test)]
    pub fn into_test_server(self) -> axum_test::TestServer {
        axum_test::TestServer::new(self.router.into_make_service()).expect("Failed to create test server")
    }

    /// Start serving the application
    pub async fn serve<F>(self, shutdown: F) -> anyhow::Result<()>
    where
        F: std::future::Future<Output = ()> + Send + 'static,
    {
        let bind_addr = self.config.bind_address();
        let listener = TcpListener::bind(&bind_addr).await?;
        info!(
            "EcoWaste listening on http://{}, available at http://localhost:{}",
            bind_addr, self.config.port
        );

        axum::serve(listener, self.router.into_make_service())
            .with_graceful_shutdown(shutdown)
            .await?;

        info!("Shutting down telemetry...");
        telemetry::shutdown_telemetry();

        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::config::CorsConfig;
    use crate::test_utils::{create_test_app, create_test_config};
    use axum::http::StatusCode;

    #[tokio::test]
    async fn test_healthz() {
        let server = create_test_app();
        let response = server.get("/healthz").await;
        response.assert_status_ok();
        response.assert_text("OK");
    }

    #[tokio::test]
    async fn test_docs_served() {
        let server = create_test_app();
        let response = server.get("/api/docs").await;
        response.assert_status_ok();
        assert!(response.text().contains("EcoWaste API"));
    }

    #[tokio::test]
    async fn test_unknown_route() {
        let server = create_test_app();
        server.get("/api/nope").await.assert_status(StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_wildcard_cors_allows_any_origin() {
        let server = create_test_app();

        let response = server
            .get("/api/ping")
            .add_header(http::header::ORIGIN, HeaderValue::from_static("http://localhost:5173"))
            .await;

        response.assert_status_ok();
        assert_eq!(response.header(http::header::ACCESS_CONTROL_ALLOW_ORIGIN), "*");
    }

    #[tokio::test]
    async fn test_listed_cors_origin() {
        let mut config = create_test_config();
        config.auth.security.cors = CorsConfig {
            allowed_origins: vec![CorsOrigin::Url("https://app.example.com".parse().unwrap())],
            allow_credentials: true,
            max_age: None,
        };
        let server = crate::test_utils::create_test_app_with_config(config);

        let allowed = server
            .get("/api/ping")
            .add_header(http::header::ORIGIN, HeaderValue::from_static("https://app.example.com"))
            .await;
        assert_eq!(
            allowed.header(http::header::ACCESS_CONTROL_ALLOW_ORIGIN),
            "https://app.example.com"
        );

        let denied = server
            .get("/api/ping")
            .add_header(http::header::ORIGIN, HeaderValue::from_static("https://evil.example.com"))
            .await;
        assert!(denied.headers().get(http::header::ACCESS_CONTROL_ALLOW_ORIGIN).is_none());
    }

    #[test]
    fn test_application_builds_from_default_config() {
        let mut config = Config::default();
        config.secret_key = Some("secret".to_string());
        assert!(Application::new(config).is_ok());
    }
}
