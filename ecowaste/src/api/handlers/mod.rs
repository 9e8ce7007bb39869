//! HTTP request handlers for all API endpoints.
//!
//! Handlers extract request data, delegate to the waste domain and the stores held in
//! [`AppState`](crate::AppState), and return JSON responses or an [`Error`](crate::errors::Error).
//!
//! - [`auth`]: login and signup
//! - [`entries`]: waste entry submission and listing
//! - [`users`]: user profiles
//! - [`detection`]: AI detection endpoints
//! - [`reference`]: static reference data and ping

pub mod auth;
pub mod detection;
pub mod entries;
pub mod reference;
pub mod users;
