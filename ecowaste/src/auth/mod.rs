//! Lightweight session identity.
//!
//! Login and signup hand out a signed JWT carrying the user id and email. Passwords are never
//! verified, so the token proves nothing beyond "this client logged in as this email". Its only
//! use is to attribute submitted entries to the right account through [`current_user::EntryOwner`].
//!
//! - [`session`]: token creation and verification
//! - [`current_user`]: request extractors

pub mod current_user;
pub mod session;
