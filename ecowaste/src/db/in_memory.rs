//! In-memory implementation of the store traits.
//!
//! All tables sit behind a single `RwLock`. Recording an entry appends it and bumps the owner's
//! total under one write guard, so concurrent submissions for the same user never lose an update.
//! State is lost on restart.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::Utc;
use parking_lot::RwLock;
use tracing::debug;

use crate::config::SeedUser;
use crate::db::errors::{DbError, Result};
use crate::db::handlers::{EntryStore, UserStore};
use crate::db::models::entries::{EntryCreateDBRequest, EntryCreated, EntryDBResponse};
use crate::db::models::users::{UserCreateDBRequest, UserDBResponse};
use crate::types::{EntryId, UserId};

#[derive(Debug, Default)]
struct Tables {
    users: HashMap<UserId, UserDBResponse>,
    /// Append-only, in creation order
    entries: Vec<EntryDBResponse>,
    next_user_id: UserId,
    next_entry_id: EntryId,
}

/// Process-local store for users and entries.
#[derive(Debug, Clone)]
pub struct InMemoryStore {
    tables: Arc<RwLock<Tables>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self {
            tables: Arc::new(RwLock::new(Tables {
                next_user_id: 1,
                next_entry_id: 1,
                ..Default::default()
            })),
        }
    }

    /// Create a store holding the given users. New users get ids after the highest seeded one.
    pub fn seeded(seed_users: &[SeedUser]) -> Self {
        let store = Self::new();
        {
            let mut tables = store.tables.write();
            let now = Utc::now();
            for seed in seed_users {
                tables.users.insert(
                    seed.id,
                    UserDBResponse {
                        id: seed.id,
                        username: seed.username.clone(),
                        email: normalize_email(&seed.email),
                        display_name: seed.display_name.clone(),
                        total_credits: seed.total_credits,
                        created_at: now,
                    },
                );
                tables.next_user_id = tables.next_user_id.max(seed.id + 1);
            }
        }
        debug!("Seeded store with {} users", seed_users.len());
        store
    }
}

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

/// Emails are compared trimmed and case-insensitively.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

#[async_trait::async_trait]
impl UserStore for InMemoryStore {
    async fn create(&self, request: &UserCreateDBRequest) -> Result<UserDBResponse> {
        let email = normalize_email(&request.email);
        let mut tables = self.tables.write();

        if tables.users.values().any(|user| user.email == email) {
            return Err(DbError::unique_violation("users", "users_email_key", email));
        }

        let id = tables.next_user_id;
        tables.next_user_id += 1;

        let user = UserDBResponse {
            id,
            username: request.username.clone(),
            email,
            display_name: request.display_name.clone(),
            total_credits: request.initial_credits,
            created_at: Utc::now(),
        };
        tables.users.insert(id, user.clone());
        Ok(user)
    }

    async fn get_by_id(&self, id: UserId) -> Result<Option<UserDBResponse>> {
        Ok(self.tables.read().users.get(&id).cloned())
    }

    async fn get_user_by_email(&self, email: &str) -> Result<Option<UserDBResponse>> {
        let email = normalize_email(email);
        Ok(self.tables.read().users.values().find(|user| user.email == email).cloned())
    }
}

#[async_trait::async_trait]
impl EntryStore for InMemoryStore {
    async fn create(&self, request: &EntryCreateDBRequest) -> Result<EntryCreated> {
        let mut tables = self.tables.write();
        let tables = &mut *tables;

        let user = tables.users.get_mut(&request.user_id).ok_or(DbError::NotFound)?;
        let new_total_credits = user
            .total_credits
            .checked_add(request.credits)
            .ok_or(DbError::CreditOverflow)?;
        user.total_credits = new_total_credits;

        let entry = EntryDBResponse {
            id: tables.next_entry_id,
            user_id: request.user_id,
            source: request.source,
            name: request.name.clone(),
            category: request.category,
            quantity: request.quantity,
            place: request.place.clone(),
            notes: request.notes.clone(),
            credits: request.credits,
            ai_confidence: request.ai_confidence,
            ai_raw_predictions: request.ai_raw_predictions.clone(),
            created_at: Utc::now(),
        };
        tables.next_entry_id += 1;
        tables.entries.push(entry.clone());

        Ok(EntryCreated {
            entry,
            new_total_credits,
        })
    }

    async fn list_for_user(&self, user_id: UserId) -> Result<Vec<EntryDBResponse>> {
        Ok(self
            .tables
            .read()
            .entries
            .iter()
            .filter(|entry| entry.user_id == user_id)
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::waste::{EntrySource, WasteCategory};
    use rust_decimal::Decimal;
    use std::str::FromStr;

    fn seed() -> Vec<SeedUser> {
        vec![SeedUser {
            id: 1,
            username: "john_doe".to_string(),
            display_name: Some("John Doe".to_string()),
            email: "john@example.com".to_string(),
            total_credits: Decimal::from(1250),
        }]
    }

    fn entry_request(user_id: UserId, credits: &str) -> EntryCreateDBRequest {
        EntryCreateDBRequest {
            user_id,
            source: EntrySource::Manual,
            name: "Bottles".to_string(),
            category: WasteCategory::Plastic,
            quantity: Some(Decimal::TWO),
            place: "Home".to_string(),
            notes: None,
            credits: Decimal::from_str(credits).unwrap(),
            ai_confidence: None,
            ai_raw_predictions: None,
        }
    }

    fn user_request(email: &str) -> UserCreateDBRequest {
        UserCreateDBRequest {
            username: "jane".to_string(),
            email: email.to_string(),
            display_name: Some("Jane".to_string()),
            initial_credits: Decimal::ZERO,
        }
    }

    #[tokio::test]
    async fn test_seeded_user_is_visible() {
        let store = InMemoryStore::seeded(&seed());
        let user = UserStore::get_by_id(&store, 1).await.unwrap().unwrap();
        assert_eq!(user.username, "john_doe");
        assert_eq!(user.total_credits, Decimal::from(1250));
        assert!(store.get_user_by_email(" JOHN@example.com ").await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_new_users_get_ids_after_seed() {
        let store = InMemoryStore::seeded(&seed());
        let user = UserStore::create(&store, &user_request("jane@example.com")).await.unwrap();
        assert_eq!(user.id, 2);
    }

    #[tokio::test]
    async fn test_duplicate_email_rejected_and_original_kept() {
        let store = InMemoryStore::seeded(&seed());
        let err = UserStore::create(&store, &user_request("John@Example.com")).await.unwrap_err();
        assert!(matches!(err, DbError::UniqueViolation { .. }));

        let user = UserStore::get_by_id(&store, 1).await.unwrap().unwrap();
        assert_eq!(user.username, "john_doe");
        assert!(UserStore::get_by_id(&store, 2).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_entry_updates_total_and_ids_are_sequential() {
        let store = InMemoryStore::seeded(&seed());
        let first = EntryStore::create(&store, &entry_request(1, "0.30")).await.unwrap();
        assert_eq!(first.entry.id, 1);
        assert_eq!(first.new_total_credits, Decimal::from_str("1250.30").unwrap());

        let second = EntryStore::create(&store, &entry_request(1, "0")).await.unwrap();
        assert_eq!(second.entry.id, 2);
        assert_eq!(second.new_total_credits, first.new_total_credits);

        let entries = store.list_for_user(1).await.unwrap();
        assert_eq!(entries.iter().map(|e| e.id).collect::<Vec<_>>(), vec![1, 2]);
        assert!(store.list_for_user(42).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_entry_for_unknown_user() {
        let store = InMemoryStore::seeded(&seed());
        let err = EntryStore::create(&store, &entry_request(99, "1")).await.unwrap_err();
        assert!(matches!(err, DbError::NotFound));
        assert!(store.list_for_user(99).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_overflowing_total_rejected_and_nothing_recorded() {
        let mut users = seed();
        users[0].total_credits = Decimal::MAX;
        let store = InMemoryStore::seeded(&users);

        let err = EntryStore::create(&store, &entry_request(1, "0.15")).await.unwrap_err();
        assert!(matches!(err, DbError::CreditOverflow));

        let user = UserStore::get_by_id(&store, 1).await.unwrap().unwrap();
        assert_eq!(user.total_credits, Decimal::MAX);
        assert!(store.list_for_user(1).await.unwrap().is_empty());

        // a zero-credit entry still fits
        let created = EntryStore::create(&store, &entry_request(1, "0")).await.unwrap();
        assert_eq!(created.entry.id, 1);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_submissions_do_not_lose_credits() {
        let store = InMemoryStore::seeded(&seed());
        let mut handles = Vec::new();
        for _ in 0..50 {
            let store = store.clone();
            handles.push(tokio::spawn(async move {
                EntryStore::create(&store, &entry_request(1, "0.15")).await.unwrap();
            }));
        }
        for handle in handles {
            handle.await.unwrap();
        }

        let user = UserStore::get_by_id(&store, 1).await.unwrap().unwrap();
        assert_eq!(user.total_credits, Decimal::from_str("1257.50").unwrap());
        assert_eq!(store.list_for_user(1).await.unwrap().len(), 50);
    }
}
