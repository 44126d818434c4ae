//! Port for reservation persistence.
//!
//! Reservations own their contact record: inserts persist both in one
//! commit and deletes remove both. The update error distinguishes a row
//! that vanished (`NotFound`) from a row that changed underneath the caller
//! (`VersionConflict`); adapters resolve which one happened by re-reading
//! after a failed versioned write.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::reservation::Reservation;

/// Errors raised by reservation repository adapters.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ReservationRepositoryError {
    /// Repository connection could not be established.
    #[error("reservation repository connection failed: {message}")]
    Connection { message: String },
    /// Query or mutation failed during execution.
    #[error("reservation repository query failed: {message}")]
    Query { message: String },
    /// No reservation exists with the given identifier.
    #[error("reservation {id} not found")]
    NotFound { id: Uuid },
    /// Optimistic concurrency check failed against a still-present row.
    #[error("version mismatch for reservation {id}: expected {expected}, found {actual}")]
    VersionConflict { id: Uuid, expected: u32, actual: u32 },
}

impl ReservationRepositoryError {
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

impl From<ReservationRepositoryError> for crate::domain::error::DomainError {
    fn from(error: ReservationRepositoryError) -> Self {
        use crate::domain::error::DomainError;
        match error {
            ReservationRepositoryError::Connection { message } => DomainError::service_unavailable(
                format!("reservation repository unavailable: {message}"),
            ),
            ReservationRepositoryError::Query { message } => {
                DomainError::internal(format!("reservation repository error: {message}"))
            }
            ReservationRepositoryError::NotFound { id } => {
                DomainError::not_found(format!("reservation {id} not found"))
            }
            ReservationRepositoryError::VersionConflict {
                id,
                expected,
                actual,
            } => DomainError::conflict("reservation was modified concurrently").with_details(
                serde_json::json!({
                    "code": "version_conflict",
                    "entity": "reservation",
                    "id": id,
                    "expectedVersion": expected,
                    "actualVersion": actual,
                }),
            ),
        }
    }
}

/// Port for reservation storage and retrieval.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ReservationRepository: Send + Sync {
    /// Persist a new reservation together with its owned contact.
    async fn insert(&self, reservation: &Reservation) -> Result<(), ReservationRepositoryError>;

    /// Fetch one reservation (with contact) by identifier.
    async fn find_by_id(
        &self,
        id: Uuid,
    ) -> Result<Option<Reservation>, ReservationRepositoryError>;

    /// List every reservation.
    async fn list(&self) -> Result<Vec<Reservation>, ReservationRepositoryError>;

    /// List reservations whose room belongs to the given hotel.
    async fn list_by_hotel(
        &self,
        hotel_id: Uuid,
    ) -> Result<Vec<Reservation>, ReservationRepositoryError>;

    /// List reservations placed by the given user.
    async fn list_by_user(
        &self,
        user_id: Uuid,
    ) -> Result<Vec<Reservation>, ReservationRepositoryError>;

    /// Write a modified reservation (and contact) if the stored version
    /// equals `expected_version`.
    ///
    /// On a failed write the adapter re-reads the row to report
    /// [`ReservationRepositoryError::NotFound`] when it was deleted
    /// concurrently, and [`ReservationRepositoryError::VersionConflict`]
    /// when it was modified.
    async fn update(
        &self,
        reservation: &Reservation,
        expected_version: u32,
    ) -> Result<(), ReservationRepositoryError>;

    /// Remove a reservation and its owned contact in one commit.
    async fn delete(&self, id: Uuid) -> Result<(), ReservationRepositoryError>;
}

/// Fixture implementation for testing without a real database.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureReservationRepository;

#[async_trait]
impl ReservationRepository for FixtureReservationRepository {
    async fn insert(&self, _reservation: &Reservation) -> Result<(), ReservationRepositoryError> {
        Ok(())
    }

    async fn find_by_id(
        &self,
        _id: Uuid,
    ) -> Result<Option<Reservation>, ReservationRepositoryError> {
        Ok(None)
    }

    async fn list(&self) -> Result<Vec<Reservation>, ReservationRepositoryError> {
        Ok(Vec::new())
    }

    async fn list_by_hotel(
        &self,
        _hotel_id: Uuid,
    ) -> Result<Vec<Reservation>, ReservationRepositoryError> {
        Ok(Vec::new())
    }

    async fn list_by_user(
        &self,
        _user_id: Uuid,
    ) -> Result<Vec<Reservation>, ReservationRepositoryError> {
        Ok(Vec::new())
    }

    async fn update(
        &self,
        _reservation: &Reservation,
        _expected_version: u32,
    ) -> Result<(), ReservationRepositoryError> {
        Ok(())
    }

    async fn delete(&self, _id: Uuid) -> Result<(), ReservationRepositoryError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[tokio::test]
    async fn fixture_lookup_returns_none() {
        let repo = FixtureReservationRepository;
        let result = repo
            .find_by_id(Uuid::new_v4())
            .await
            .expect("fixture lookup should succeed");
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn fixture_listings_are_empty() {
        let repo = FixtureReservationRepository;
        assert!(repo.list().await.expect("list").is_empty());
        assert!(repo
            .list_by_hotel(Uuid::new_v4())
            .await
            .expect("list")
            .is_empty());
        assert!(repo
            .list_by_user(Uuid::new_v4())
            .await
            .expect("list")
            .is_empty());
    }

    #[rstest]
    fn not_found_and_conflict_are_distinct() {
        let id = Uuid::new_v4();
        assert_ne!(
            ReservationRepositoryError::not_found(id),
            ReservationRepositoryError::version_conflict(id, 1, 2)
        );
    }
}
