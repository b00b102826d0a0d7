use std::sync::Arc;

use tracing::{debug, info};
use uuid::Uuid;

use crate::domain::entities::user::User;
use crate::domain::value_objects::page::{Page, PageRequest};
use crate::errors::{DomainError, DomainResult};
use crate::repositories::UserRepository;

/// Directory lookups for authenticated callers
pub struct UserService<U>
where
    U: UserRepository,
{
    user_repository: Arc<U>,
}

impl<U> UserService<U>
where
    U: UserRepository,
{
    pub fn new(user_repository: Arc<U>) -> Self {
        Self { user_repository }
    }

    /// Fetch one account, `NotFound` when the id is unknown
    pub async fn get_by_id(&self, id: Uuid) -> DomainResult<User> {
        debug!(user_id = %id, "Fetching user");

        self.user_repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::NotFound {
                resource: format!("User {}", id),
            })
    }

    /// One page of accounts in the requested order
    pub async fn list(&self, request: &PageRequest) -> DomainResult<Page<User>> {
        let page = self.user_repository.list(request).await?;

        info!(
            page = request.page,
            size = request.size,
            sort_by = %request.sort_by,
            returned = page.content.len(),
            total = page.total_elements,
            "Listed users"
        );

        Ok(page)
    }
}
