//! Data access layer.
//!
//! ```text
//! ┌─────────────┐
//! │  Handlers   │  (API request handlers)
//! └──────┬──────┘
//!        │
//!        ↓
//! ┌─────────────┐
//! │ Repositories│  (db::handlers - store traits)
//! └──────┬──────┘
//!        │
//!        ↓
//! ┌─────────────┐
//! │   Models    │  (db::models - stored records)
//! └──────┬──────┘
//!        │
//!        ↓
//! ┌─────────────┐
//! │  In-memory  │  (db::in_memory)
//! └─────────────┘
//! ```
//!
//! State lives for the lifetime of the process and is lost on restart.

pub mod errors;
pub mod handlers;
pub mod in_memory;
pub mod models;

pub use in_memory::InMemoryStore;
