//! Application configuration management.
//!
//! Configuration is loaded from a YAML file with environment variable overrides. The configuration
//! file path defaults to `config.yaml` but can be specified via `-f` flag or `ECOWASTE_CONFIG`
//! environment variable.
//!
//! ## Loading Priority
//!
//! 1. **YAML config file** - Base configuration (default: `config.yaml`)
//! 2. **Environment variables** - Variables prefixed with `ECOWASTE_` override YAML values
//!
//! For nested config values, use double underscores in environment variables. For example,
//! `ECOWASTE_CLASSIFIER__TIMEOUT=5s` sets the `classifier.timeout` field.
//!
//! ## Usage
//!
//! ```no_run
//! use clap::Parser;
//! use ecowaste::config::{Args, Config};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let args = Args::parse();
//! let config = Config::load(&args)?;
//!
//! println!("Server will bind to {}:{}", config.host, config.port);
//! # Ok(())
//! # }
//! ```
//!
//! ## Configuration Structure
//!
//! - **Server**: `host`, `port`
//! - **Security**: `secret_key`, `auth.security` - session token signing, expiry, and CORS
//! - **Users**: `seed_users`, `default_user_id` - accounts present at startup, and the owner of
//!   entries submitted without a session token
//! - **Credits**: `credits.initial_credits_for_new_users`
//! - **Classifier**: `classifier.min_latency`, `classifier.max_latency`, `classifier.timeout`
//! - **Telemetry**: `enable_otel_export`
//!
//! ## Environment Variable Examples
//!
//! ```bash
//! ECOWASTE_PORT=8080
//! ECOWASTE_SECRET_KEY=change-me
//! ECOWASTE_AUTH__SECURITY__JWT_EXPIRY=2h
//! ECOWASTE_ENABLE_OTEL_EXPORT=true
//! ```

use clap::Parser;
use figment::{
    Figment,
    providers::{Env, Format, Yaml},
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::{collections::HashSet, time::Duration};
use url::Url;

use crate::errors::Error;
use crate::types::UserId;

/// Simple CLI args - just for specifying config file
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Path to configuration file
    #[arg(short = 'f', long, env = "ECOWASTE_CONFIG", default_value = "config.yaml")]
    pub config: String,

    /// Validate configuration and exit without starting the server.
    #[arg(long)]
    pub validate: bool,
}

/// Main application configuration.
///
/// All fields have defaults, so an empty file plus `secret_key` is a valid configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// HTTP server host to bind to (e.g., "0.0.0.0" for all interfaces)
    pub host: String,
    /// HTTP server port to bind to
    pub port: u16,
    /// Secret key for signing session tokens (required)
    pub secret_key: Option<String>,
    /// Owner of entries submitted without a session token
    pub default_user_id: UserId,
    /// Accounts created at startup
    pub seed_users: Vec<SeedUser>,
    /// Session token and CORS settings
    pub auth: AuthConfig,
    /// Credit system configuration
    pub credits: CreditsConfig,
    /// Mock classifier behaviour
    pub classifier: ClassifierConfig,
    /// Enable OpenTelemetry OTLP export for distributed tracing
    pub enable_otel_export: bool,
}

/// A user account present when the server starts.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct SeedUser {
    pub id: UserId,
    pub username: String,
    #[serde(default)]
    pub display_name: Option<String>,
    pub email: String,
    #[serde(default)]
    pub total_credits: Decimal,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct AuthConfig {
    /// Security settings (JWT, CORS)
    pub security: SecurityConfig,
}

/// Security configuration for JWT and CORS.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct SecurityConfig {
    /// JWT token expiry duration
    #[serde(with = "humantime_serde")]
    pub jwt_expiry: Duration,
    /// CORS configuration for browser clients
    pub cors: CorsConfig,
}

/// CORS (Cross-Origin Resource Sharing) configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct CorsConfig {
    /// Allowed origins for CORS requests
    pub allowed_origins: Vec<CorsOrigin>,
    /// Allow credentials in CORS requests
    pub allow_credentials: bool,
    /// Cache preflight requests for this many seconds
    pub max_age: Option<u64>,
}

/// CORS origin specification.
///
/// Can be either a wildcard (`*`) to allow all origins, or a specific URL.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(untagged)]
pub enum CorsOrigin {
    /// Allow all origins (`*`)
    #[serde(deserialize_with = "parse_wildcard")]
    Wildcard,
    /// Specific origin URL (e.g., `https://app.example.com`)
    #[serde(deserialize_with = "parse_url")]
    Url(Url),
}

fn parse_wildcard<'de, D>(deserializer: D) -> Result<(), D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s: String = Deserialize::deserialize(deserializer)?;
    if s == "*" {
        Ok(())
    } else {
        Err(serde::de::Error::custom("Expected '*'"))
    }
}

fn parse_url<'de, D>(deserializer: D) -> Result<Url, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s: String = Deserialize::deserialize(deserializer)?;
    Url::parse(&s).map_err(serde::de::Error::custom)
}

/// Credit system configuration.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct CreditsConfig {
    /// Credits given to users when they sign up (default: 0)
    pub initial_credits_for_new_users: Decimal,
}

/// Mock classifier configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct ClassifierConfig {
    /// Lower bound of the simulated inference latency
    #[serde(with = "humantime_serde")]
    pub min_latency: Duration,
    /// Upper bound of the simulated inference latency
    #[serde(with = "humantime_serde")]
    pub max_latency: Duration,
    /// Deadline for a single classification; exceeding it fails the detection
    #[serde(with = "humantime_serde")]
    pub timeout: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3001,
            secret_key: None,
            default_user_id: 1,
            seed_users: vec![SeedUser {
                id: 1,
                username: "john_doe".to_string(),
                display_name: Some("John Doe".to_string()),
                email: "john@example.com".to_string(),
                total_credits: Decimal::from(1250),
            }],
            auth: AuthConfig::default(),
            credits: CreditsConfig::default(),
            classifier: ClassifierConfig::default(),
            enable_otel_export: false,
        }
    }
}

impl Default for SecurityConfig {
    fn default() -> Self {
        Self {
            jwt_expiry: Duration::from_secs(24 * 60 * 60), // 24 hours
            cors: CorsConfig::default(),
        }
    }
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            allowed_origins: vec![CorsOrigin::Wildcard],
            allow_credentials: false,
            max_age: Some(3600), // Cache preflight for 1 hour
        }
    }
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            min_latency: Duration::from_millis(1500),
            max_latency: Duration::from_millis(2500),
            timeout: Duration::from_secs(10),
        }
    }
}

fn invalid(message: impl std::fmt::Display) -> Error {
    Error::Internal {
        operation: format!("Config validation: {message}"),
    }
}

impl Config {
    #[allow(clippy::result_large_err)]
    pub fn load(args: &Args) -> Result<Self, figment::Error> {
        let config: Self = Self::figment(args).extract()?;
        config.validate().map_err(|e| figment::Error::from(e.to_string()))?;
        Ok(config)
    }

    /// Validate the configuration for consistency and required fields
    pub fn validate(&self) -> Result<(), Error> {
        if self.secret_key.as_deref().is_none_or(str::is_empty) {
            return Err(invalid(
                "secret_key is not configured. \
                 Please set ECOWASTE_SECRET_KEY environment variable or add secret_key to config file.",
            ));
        }

        // Validate JWT expiry duration is reasonable
        if self.auth.security.jwt_expiry.as_secs() < 300 {
            return Err(invalid("JWT expiry duration is too short (minimum 5 minutes)"));
        }
        if self.auth.security.jwt_expiry.as_secs() > 86400 * 30 {
            return Err(invalid("JWT expiry duration is too long (maximum 30 days)"));
        }

        let cors = &self.auth.security.cors;
        if cors.allowed_origins.is_empty() {
            return Err(invalid(
                "CORS allowed_origins cannot be empty. Add at least one allowed origin.",
            ));
        }
        let has_wildcard = cors.allowed_origins.iter().any(|origin| matches!(origin, CorsOrigin::Wildcard));
        if has_wildcard && cors.allow_credentials {
            return Err(invalid(
                "CORS cannot use wildcard origin '*' with allow_credentials=true. Specify explicit origins.",
            ));
        }

        let classifier = &self.classifier;
        if classifier.min_latency > classifier.max_latency {
            return Err(invalid(format!(
                "classifier min_latency ({:?}) cannot be greater than max_latency ({:?})",
                classifier.min_latency, classifier.max_latency
            )));
        }
        if classifier.timeout.is_zero() {
            return Err(invalid("classifier timeout must be greater than 0"));
        }

        if self.credits.initial_credits_for_new_users.is_sign_negative() {
            return Err(invalid("initial_credits_for_new_users cannot be negative"));
        }

        let mut ids = HashSet::new();
        let mut emails = HashSet::new();
        for user in &self.seed_users {
            if !ids.insert(user.id) {
                return Err(invalid(format!("duplicate seed user id {}", user.id)));
            }
            if !emails.insert(user.email.trim().to_lowercase()) {
                return Err(invalid(format!("duplicate seed user email {}", user.email)));
            }
            if user.total_credits.is_sign_negative() {
                return Err(invalid(format!("seed user {} has negative credits", user.id)));
            }
        }
        if !ids.contains(&self.default_user_id) {
            return Err(invalid(format!(
                "default_user_id {} does not refer to a seed user",
                self.default_user_id
            )));
        }

        Ok(())
    }

    pub fn figment(args: &Args) -> Figment {
        Figment::new()
            // Load base config file
            .merge(Yaml::file(&args.config))
            // Environment variables can still override specific values
            .merge(Env::prefixed("ECOWASTE_").ignore(&["CONFIG"]).split("__"))
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
