//! User repository trait defining the interface for the account directory.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::entities::user::User;
use crate::domain::value_objects::page::{Page, PageRequest};
use crate::errors::DomainError;

/// Repository trait for User entity persistence operations
///
/// Accounts are keyed by email. The email doubles as the token subject, so
/// implementations must keep it unique.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Check whether an account with this email exists
    ///
    /// # Arguments
    /// * `email` - The email to look up, compared exactly
    ///
    /// # Returns
    /// * `Ok(true)` - An account exists
    /// * `Ok(false)` - No account with that email
    /// * `Err(DomainError)` - Storage error occurred
    async fn exists_by_email(&self, email: &str) -> Result<bool, DomainError>;

    /// Find a user by email
    ///
    /// # Arguments
    /// * `email` - The email to look up
    ///
    /// # Returns
    /// * `Ok(Some(User))` - User found
    /// * `Ok(None)` - No user with that email
    /// * `Err(DomainError)` - Storage error occurred
    ///
    /// # Example
    /// ```no_run
    /// # use gk_core::repositories::UserRepository;
    /// # async fn example(repo: &impl UserRepository) -> Result<(), Box<dyn std::error::Error>> {
    /// match repo.find_by_email("a@example.com").await? {
    ///     Some(user) => println!("User found: {}", user.id),
    ///     None => println!("User not found"),
    /// }
    /// # Ok(())
    /// # }
    /// ```
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError>;

    /// Persist a new user
    ///
    /// # Arguments
    /// * `user` - The User entity to persist
    ///
    /// # Returns
    /// * `Ok(User)` - The stored user
    /// * `Err(DomainError::Auth(AuthError::DuplicateSubject))` - The email is taken
    /// * `Err(DomainError)` - Storage error occurred
    async fn save(&self, user: User) -> Result<User, DomainError>;

    /// Find a user by its identifier
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, DomainError>;

    /// List one page of users in the requested order
    ///
    /// Pages past the end come back empty with the real totals.
    async fn list(&self, request: &PageRequest) -> Result<Page<User>, DomainError>;
}
