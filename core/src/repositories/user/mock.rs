//! In-memory implementation of UserRepository for tests and local runs

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::entities::user::User;
use crate::domain::value_objects::page::{Page, PageRequest, SortDirection, UserSortField};
use crate::errors::{AuthError, DomainError};

use super::trait_::UserRepository;

/// Mock user repository keyed by email
#[derive(Clone)]
pub struct MockUserRepository {
    users: Arc<RwLock<HashMap<String, User>>>,
}

impl MockUserRepository {
    /// Create a new mock repository
    pub fn new() -> Self {
        Self {
            users: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Number of stored users
    pub async fn count(&self) -> usize {
        self.users.read().await.len()
    }

    /// Drop a user, simulating a deleted account
    pub async fn remove(&self, email: &str) -> Option<User> {
        self.users.write().await.remove(email)
    }
}

impl Default for MockUserRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl UserRepository for MockUserRepository {
    async fn exists_by_email(&self, email: &str) -> Result<bool, DomainError> {
        let users = self.users.read().await;
        Ok(users.contains_key(email))
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError> {
        let users = self.users.read().await;
        Ok(users.get(email).cloned())
    }

    async fn save(&self, user: User) -> Result<User, DomainError> {
        let mut users = self.users.write().await;
        if users.contains_key(&user.email) {
            return Err(AuthError::DuplicateSubject { email: user.email }.into());
        }
        users.insert(user.email.clone(), user.clone());
        Ok(user)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, DomainError> {
        let users = self.users.read().await;
        Ok(users.values().find(|user| user.id == id).cloned())
    }

    async fn list(&self, request: &PageRequest) -> Result<Page<User>, DomainError> {
        let users = self.users.read().await;
        let mut all: Vec<User> = users.values().cloned().collect();

        all.sort_by(|a, b| {
            let ordering = match request.sort_by {
                UserSortField::Id => a.id.cmp(&b.id),
                UserSortField::Email => a.email.cmp(&b.email),
                UserSortField::CreatedAt => a.created_at.cmp(&b.created_at),
            };
            match request.direction {
                SortDirection::Asc => ordering,
                SortDirection::Desc => ordering.reverse(),
            }
        });

        let total = all.len() as u64;
        let content = all
            .into_iter()
            .skip(usize::try_from(request.offset()).unwrap_or(usize::MAX))
            .take(request.size as usize)
            .collect();

        Ok(Page::new(content, request, total))
    }
}
