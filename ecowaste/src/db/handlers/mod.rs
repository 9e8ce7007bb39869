//! Repository traits for store access.
//!
//! Handlers depend on these traits only, through `Arc<dyn ...>` in
//! [`AppState`](crate::AppState), so a real datastore can replace the in-memory one.
//!
//! - [`UserStore`]: user accounts and credit balances
//! - [`EntryStore`]: waste entries

pub mod entries;
pub mod users;

pub use entries::EntryStore;
pub use users::UserStore;
