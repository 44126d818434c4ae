//! Port for hotel persistence.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::hotel::Hotel;

/// Errors raised by hotel repository adapters.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum HotelRepositoryError {
    /// Repository connection could not be established.
    #[error("hotel repository connection failed: {message}")]
    Connection { message: String },
    /// Query or mutation failed during execution.
    #[error("hotel repository query failed: {message}")]
    Query { message: String },
    /// No hotel exists with the given identifier.
    #[error("hotel {id} not found")]
    NotFound { id: Uuid },
    /// Optimistic concurrency check failed.
    #[error("version mismatch for hotel {id}: expected {expected}, found {actual}")]
    VersionConflict { id: Uuid, expected: u32, actual: u32 },
    /// The hotel still has rooms attached and cannot be deleted.
    #[error("hotel {id} still has rooms attached")]
    RoomsAttached { id: Uuid },
}

impl HotelRepositoryError {
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

    pub fn rooms_attached(id: Uuid) -> Self {
        Self::RoomsAttached { id }
    }
}

impl From<HotelRepositoryError> for crate::domain::error::DomainError {
    fn from(error: HotelRepositoryError) -> Self {
        use crate::domain::error::DomainError;
        match error {
            HotelRepositoryError::Connection { message } => {
                DomainError::service_unavailable(format!("hotel repository unavailable: {message}"))
            }
            HotelRepositoryError::Query { message } => {
                DomainError::internal(format!("hotel repository error: {message}"))
            }
            HotelRepositoryError::NotFound { id } => {
                DomainError::not_found(format!("hotel {id} not found"))
            }
            HotelRepositoryError::VersionConflict {
                id,
                expected,
                actual,
            } => DomainError::conflict("hotel was modified concurrently").with_details(
                serde_json::json!({
                    "code": "version_conflict",
                    "entity": "hotel",
                    "id": id,
                    "expectedVersion": expected,
                    "actualVersion": actual,
                }),
            ),
            HotelRepositoryError::RoomsAttached { id } => {
                DomainError::conflict("hotel still has rooms attached").with_details(
                    serde_json::json!({
                        "code": "rooms_attached",
                        "entity": "hotel",
                        "id": id,
                    }),
                )
            }
        }
    }
}

/// Port for hotel storage and retrieval.
///
/// Updates follow the repository-wide optimistic concurrency convention: the
/// caller passes the version it read, the adapter writes only if the stored
/// version still matches, and the entity handed in already carries the
/// incremented version.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait HotelRepository: Send + Sync {
    /// Persist a new hotel.
    async fn insert(&self, hotel: &Hotel) -> Result<(), HotelRepositoryError>;

    /// Fetch one hotel by identifier, `None` if it does not exist.
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Hotel>, HotelRepositoryError>;

    /// List every hotel.
    async fn list(&self) -> Result<Vec<Hotel>, HotelRepositoryError>;

    /// List hotels registered by one owner.
    async fn list_by_owner(&self, owner_id: Uuid) -> Result<Vec<Hotel>, HotelRepositoryError>;

    /// List hotels whose location contains `location`, case-insensitively.
    async fn list_by_location(&self, location: &str) -> Result<Vec<Hotel>, HotelRepositoryError>;

    /// Write a modified hotel if the stored version equals `expected_version`.
    async fn update(
        &self,
        hotel: &Hotel,
        expected_version: u32,
    ) -> Result<(), HotelRepositoryError>;

    /// Remove a hotel. Fails with [`HotelRepositoryError::RoomsAttached`]
    /// while rooms still reference it.
    async fn delete(&self, id: Uuid) -> Result<(), HotelRepositoryError>;
}

/// Fixture implementation for testing without a real database.
///
/// Lookups return `None`, listings are empty, and writes are discarded.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureHotelRepository;

#[async_trait]
impl HotelRepository for FixtureHotelRepository {
    async fn insert(&self, _hotel: &Hotel) -> Result<(), HotelRepositoryError> {
        Ok(())
    }

    async fn find_by_id(&self, _id: Uuid) -> Result<Option<Hotel>, HotelRepositoryError> {
        Ok(None)
    }

    async fn list(&self) -> Result<Vec<Hotel>, HotelRepositoryError> {
        Ok(Vec::new())
    }

    async fn list_by_owner(&self, _owner_id: Uuid) -> Result<Vec<Hotel>, HotelRepositoryError> {
        Ok(Vec::new())
    }

    async fn list_by_location(&self, _location: &str) -> Result<Vec<Hotel>, HotelRepositoryError> {
        Ok(Vec::new())
    }

    async fn update(
        &self,
        _hotel: &Hotel,
        _expected_version: u32,
    ) -> Result<(), HotelRepositoryError> {
        Ok(())
    }

    async fn delete(&self, _id: Uuid) -> Result<(), HotelRepositoryError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[tokio::test]
    async fn fixture_lookup_returns_none() {
        let repo = FixtureHotelRepository;
        let result = repo
            .find_by_id(Uuid::new_v4())
            .await
            .expect("fixture lookup should succeed");
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn fixture_listings_are_empty() {
        let repo = FixtureHotelRepository;
        assert!(repo.list().await.expect("list").is_empty());
        assert!(repo
            .list_by_location("cartagena")
            .await
            .expect("list")
            .is_empty());
    }

    #[rstest]
    fn version_conflict_formats_both_versions() {
        let id = Uuid::new_v4();
        let message = HotelRepositoryError::version_conflict(id, 2, 5).to_string();
        assert!(message.contains("expected 2"));
        assert!(message.contains("found 5"));
    }
}
