//! Driving port for reservation writes.
//!
//! Inbound adapters call this port; the booking service implements it.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::error::DomainError;
use crate::domain::reservation::{ContactDraft, ContactUpdate, Reservation};

/// Input for creating a reservation.
#[derive(Debug, Clone, PartialEq)]
pub struct CreateReservationRequest {
    pub total_cost: f64,
    pub guest_count: u32,
    /// Fields for the contact record the reservation will own.
    pub contact: ContactDraft,
    /// The booking user.
    pub user_id: Uuid,
    /// The room being booked.
    pub room_id: Uuid,
    /// When the booking was placed. The service stamps the current time
    /// when the caller leaves this unset.
    pub reserved_at: Option<DateTime<Utc>>,
    pub check_in: DateTime<Utc>,
    pub check_out: DateTime<Utc>,
}

/// How the confirmation notification fared after the reservation committed.
///
/// A failed dispatch never unwinds the booking; it is reported here so the
/// caller can retry delivery out of band.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
#[serde(tag = "status")]
pub enum NotificationOutcome {
    /// The confirmation was handed to the delivery channel.
    Sent,
    /// Delivery failed; the reservation itself is unaffected.
    Failed { reason: String },
}

/// Result of a successful creation.
#[derive(Debug, Clone, PartialEq)]
pub struct CreateReservationResponse {
    pub reservation: Reservation,
    pub notification: NotificationOutcome,
}

/// Input for updating a reservation.
///
/// Contact fields are partial; the stay window and room are written
/// unconditionally. `expected_version` is the version the caller read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateReservationRequest {
    pub id: Uuid,
    pub contact: ContactUpdate,
    pub room_id: Uuid,
    pub check_in: DateTime<Utc>,
    pub check_out: DateTime<Utc>,
    pub expected_version: u32,
}

/// Driving port for reservation mutations.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BookingCommand: Send + Sync {
    /// Validate, persist, and confirm a new reservation.
    async fn create(
        &self,
        request: CreateReservationRequest,
    ) -> Result<CreateReservationResponse, DomainError>;

    /// Apply a partial update to an existing reservation.
    async fn update(&self, request: UpdateReservationRequest) -> Result<Reservation, DomainError>;

    /// Remove a reservation and its owned contact.
    async fn delete(&self, id: Uuid) -> Result<(), DomainError>;
}

/// Fixture implementation for testing.
///
/// Mutations fail with domain errors so handler tests can exercise the
/// error path without wiring a full service.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureBookingCommand;

#[async_trait]
impl BookingCommand for FixtureBookingCommand {
    async fn create(
        &self,
        _request: CreateReservationRequest,
    ) -> Result<CreateReservationResponse, DomainError> {
        Err(DomainError::internal(
            "booking command fixture does not persist reservations",
        ))
    }

    async fn update(&self, request: UpdateReservationRequest) -> Result<Reservation, DomainError> {
        Err(DomainError::not_found(format!(
            "reservation {} not found",
            request.id
        )))
    }

    async fn delete(&self, id: Uuid) -> Result<(), DomainError> {
        Err(DomainError::not_found(format!(
            "reservation {id} not found"
        )))
    }
}
