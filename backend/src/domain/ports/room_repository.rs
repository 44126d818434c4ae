//! Port for room persistence.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::room::Room;

/// Errors raised by room repository adapters.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RoomRepositoryError {
    /// Repository connection could not be established.
    #[error("room repository connection failed: {message}")]
    Connection { message: String },
    /// Query or mutation failed during execution.
    #[error("room repository query failed: {message}")]
    Query { message: String },
    /// No room exists with the given identifier.
    #[error("room {id} not found")]
    NotFound { id: Uuid },
    /// Optimistic concurrency check failed.
    #[error("version mismatch for room {id}: expected {expected}, found {actual}")]
    VersionConflict { id: Uuid, expected: u32, actual: u32 },
}

impl RoomRepositoryError {
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
}

impl From<RoomRepositoryError> for crate::domain::error::DomainError {
    fn from(error: RoomRepositoryError) -> Self {
        use crate::domain::error::DomainError;
        match error {
            RoomRepositoryError::Connection { message } => {
                DomainError::service_unavailable(format!("room repository unavailable: {message}"))
            }
            RoomRepositoryError::Query { message } => {
                DomainError::internal(format!("room repository error: {message}"))
            }
            RoomRepositoryError::NotFound { id } => {
                DomainError::not_found(format!("room {id} not found"))
            }
            RoomRepositoryError::VersionConflict {
                id,
                expected,
                actual,
            } => DomainError::conflict("room was modified concurrently").with_details(
                serde_json::json!({
                    "code": "version_conflict",
                    "entity": "room",
                    "id": id,
                    "expectedVersion": expected,
                    "actualVersion": actual,
                }),
            ),
        }
    }
}

/// Port for room storage and retrieval.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RoomRepository: Send + Sync {
    /// Persist a new room.
    async fn insert(&self, room: &Room) -> Result<(), RoomRepositoryError>;

    /// Fetch one room by identifier, `None` if it does not exist.
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Room>, RoomRepositoryError>;

    /// List the rooms belonging to one hotel.
    async fn list_by_hotel(&self, hotel_id: Uuid) -> Result<Vec<Room>, RoomRepositoryError>;

    /// Write a modified room if the stored version equals `expected_version`.
    async fn update(&self, room: &Room, expected_version: u32) -> Result<(), RoomRepositoryError>;

    /// Remove a room.
    async fn delete(&self, id: Uuid) -> Result<(), RoomRepositoryError>;
}

/// Fixture implementation for testing without a real database.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureRoomRepository;

#[async_trait]
impl RoomRepository for FixtureRoomRepository {
    async fn insert(&self, _room: &Room) -> Result<(), RoomRepositoryError> {
        Ok(())
    }

    async fn find_by_id(&self, _id: Uuid) -> Result<Option<Room>, RoomRepositoryError> {
        Ok(None)
    }

    async fn list_by_hotel(&self, _hotel_id: Uuid) -> Result<Vec<Room>, RoomRepositoryError> {
        Ok(Vec::new())
    }

    async fn update(&self, _room: &Room, _expected_version: u32) -> Result<(), RoomRepositoryError> {
        Ok(())
    }

    async fn delete(&self, _id: Uuid) -> Result<(), RoomRepositoryError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn fixture_lookup_returns_none() {
        let repo = FixtureRoomRepository;
        let result = repo
            .find_by_id(Uuid::new_v4())
            .await
            .expect("fixture lookup should succeed");
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn fixture_listing_is_empty() {
        let repo = FixtureRoomRepository;
        let rooms = repo
            .list_by_hotel(Uuid::new_v4())
            .await
            .expect("fixture listing should succeed");
        assert!(rooms.is_empty());
    }
}
