//! API request and response data models.
//!
//! These define the public JSON contract: camelCase keys, credits and prices as JSON numbers, and
//! a `success` flag on every envelope. Store models convert into them through `From`.
//!
//! - [`auth`]: login and signup payloads
//! - [`users`]: profiles and per-user statistics
//! - [`entries`]: waste entry submission and listing
//! - [`detection`]: AI detection, test echo, and statistics
//! - [`reference`]: waste types and collection places

pub mod auth;
pub mod detection;
pub mod entries;
pub mod reference;
pub mod users;
