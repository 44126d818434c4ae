//! Port for user persistence.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::user::User;

/// Errors raised by user repository adapters.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UserRepositoryError {
    /// Repository connection could not be established.
    #[error("user repository connection failed: {message}")]
    Connection { message: String },
    /// Query or mutation failed during execution.
    #[error("user repository query failed: {message}")]
    Query { message: String },
    /// No user exists with the given identifier.
    #[error("user {id} not found")]
    NotFound { id: Uuid },
    /// Optimistic concurrency check failed.
    #[error("version mismatch for user {id}: expected {expected}, found {actual}")]
    VersionConflict { id: Uuid, expected: u32, actual: u32 },
    /// Another user already holds this email address.
    #[error("email {email} is already registered")]
    DuplicateEmail { email: String },
}

impl UserRepositoryError {
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection {
            message: message.into(),
        }
    }

    pub fn query(message: impl Into<String>) -> Self {
        Self::Query {
            message: message.into(),
        }
    }

    pub fn not_found(id: Uuid) -> Self {
        Self::NotFound { id }
    }

    pub fn version_conflict(id: Uuid, expected: u32, actual: u32) -> Self {
        Self::VersionConflict {
            id,
            expected,
            actual,
        }
    }

    pub fn duplicate_email(email: impl Into<String>) -> Self {
        Self::DuplicateEmail {
            email: email.into(),
        }
    }
}

impl From<UserRepositoryError> for crate::domain::error::DomainError {
    fn from(error: UserRepositoryError) -> Self {
        use crate::domain::error::DomainError;
        match error {
            UserRepositoryError::Connection { message } => {
                DomainError::service_unavailable(format!("user repository unavailable: {message}"))
            }
            UserRepositoryError::Query { message } => {
                DomainError::internal(format!("user repository error: {message}"))
            }
            UserRepositoryError::NotFound { id } => {
                DomainError::not_found(format!("user {id} not found"))
            }
            UserRepositoryError::VersionConflict {
                id,
                expected,
                actual,
            } => DomainError::conflict("user was modified concurrently").with_details(
                serde_json::json!({
                    "code": "version_conflict",
                    "entity": "user",
                    "id": id,
                    "expectedVersion": expected,
                    "actualVersion": actual,
                }),
            ),
            UserRepositoryError::DuplicateEmail { email } => {
                DomainError::conflict("email is already registered").with_details(
                    serde_json::json!({
                        "code": "duplicate_email",
                        "email": email,
                    }),
                )
            }
        }
    }
}

/// Port for user storage and retrieval.
///
/// Email uniqueness is enforced here: inserts and email-changing updates
/// fail with [`UserRepositoryError::DuplicateEmail`] when the address is
/// already registered.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Persist a new user.
    async fn insert(&self, user: &User) -> Result<(), UserRepositoryError>;

    /// Fetch one user by identifier, `None` if it does not exist.
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, UserRepositoryError>;

    /// Fetch one user by exact email address.
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, UserRepositoryError>;

    /// List every user.
    async fn list(&self) -> Result<Vec<User>, UserRepositoryError>;

    /// Write a modified user if the stored version equals `expected_version`.
    async fn update(&self, user: &User, expected_version: u32) -> Result<(), UserRepositoryError>;

    /// Remove a user.
    async fn delete(&self, id: Uuid) -> Result<(), UserRepositoryError>;
}

/// Fixture implementation for testing without a real database.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureUserRepository;

#[async_trait]
impl UserRepository for FixtureUserRepository {
    async fn insert(&self, _user: &User) -> Result<(), UserRepositoryError> {
        Ok(())
    }

    async fn find_by_id(&self, _id: Uuid) -> Result<Option<User>, UserRepositoryError> {
        Ok(None)
    }

    async fn find_by_email(&self, _email: &str) -> Result<Option<User>, UserRepositoryError> {
        Ok(None)
    }

    async fn list(&self) -> Result<Vec<User>, UserRepositoryError> {
        Ok(Vec::new())
    }

    async fn update(&self, _user: &User, _expected_version: u32) -> Result<(), UserRepositoryError> {
        Ok(())
    }

    async fn delete(&self, _id: Uuid) -> Result<(), UserRepositoryError> {
        Ok(())
    }
}
