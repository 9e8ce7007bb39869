//! Store record models.
//!
//! These are kept apart from the API models in [`crate::api::models`] so storage and wire
//! representations can evolve independently. API models implement `From` conversions.

pub mod entries;
pub mod users;
