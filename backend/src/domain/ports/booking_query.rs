//! Driving port for reservation reads.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::error::DomainError;
use crate::domain::reservation::Reservation;
use crate::domain::room::Room;
use crate::domain::user::User;

/// A reservation resolved against its referenced user and room.
///
/// The contact travels inside the reservation; user and room are joined in
/// so read endpoints can render a booking without further lookups.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReservationView {
    pub reservation: Reservation,
    pub user: User,
    pub room: Room,
}

/// Driving port for reservation queries.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BookingQuery: Send + Sync {
    /// List every reservation, fully resolved.
    async fn list(&self) -> Result<Vec<ReservationView>, DomainError>;

    /// Fetch one reservation by identifier.
    async fn get(&self, id: Uuid) -> Result<ReservationView, DomainError>;

    /// List reservations for rooms belonging to one hotel.
    ///
    /// Fails with `not_found` when the hotel itself does not exist; an
    /// existing hotel with no bookings yields an empty list.
    async fn list_by_hotel(&self, hotel_id: Uuid) -> Result<Vec<ReservationView>, DomainError>;

    /// List reservations placed by one user.
    async fn list_by_user(&self, user_id: Uuid) -> Result<Vec<ReservationView>, DomainError>;
}

/// Fixture implementation for testing.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureBookingQuery;

#[async_trait]
impl BookingQuery for FixtureBookingQuery {
    async fn list(&self) -> Result<Vec<ReservationView>, DomainError> {
        Ok(Vec::new())
    }

    async fn get(&self, id: Uuid) -> Result<ReservationView, DomainError> {
        Err(DomainError::not_found(format!(
            "reservation {id} not found"
        )))
    }

    async fn list_by_hotel(&self, hotel_id: Uuid) -> Result<Vec<ReservationView>, DomainError> {
        Err(DomainError::not_found(format!("hotel {hotel_id} not found")))
    }

    async fn list_by_user(&self, user_id: Uuid) -> Result<Vec<ReservationView>, DomainError> {
        Err(DomainError::not_found(format!("user {user_id} not found")))
    }
}
