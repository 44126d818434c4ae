//! Reservation lifecycle service.
//!
//! Implements the [`BookingCommand`] and [`BookingQuery`] driving ports on
//! top of the repository and notification ports. All conflict handling is
//! single-attempt: a versioned write either lands or surfaces `conflict`
//! (or `not_found` when a concurrent delete emptied the row), and retrying
//! is left to the caller.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::json;
use uuid::Uuid;

use crate::domain::booking_validator::{BookingValidator, ReferenceError};
use crate::domain::error::DomainError;
use crate::domain::notification::NotificationMessage;
use crate::domain::ports::{
    BookingCommand, BookingQuery, CreateReservationRequest, CreateReservationResponse,
    HotelRepository, NotificationDispatcher, NotificationOutcome, ReservationRepository,
    ReservationView, RoomRepository, UpdateReservationRequest, UserRepository,
};
use crate::domain::reservation::{
    ContactValidationError, Reservation, ReservationValidationError,
};

/// Booking service wiring the five outbound ports together.
pub struct BookingService<H, R, U, S, N> {
    hotels: Arc<H>,
    rooms: Arc<R>,
    users: Arc<U>,
    reservations: Arc<S>,
    notifications: Arc<N>,
    validator: BookingValidator<R, U>,
}

impl<H, R, U, S, N> BookingService<H, R, U, S, N>
where
    R: RoomRepository,
    U: UserRepository,
{
    /// Create a new service over the given adapters.
    pub fn new(
        hotels: Arc<H>,
        rooms: Arc<R>,
        users: Arc<U>,
        reservations: Arc<S>,
        notifications: Arc<N>,
    ) -> Self {
        let validator = BookingValidator::new(Arc::clone(&rooms), Arc::clone(&users));
        Self {
            hotels,
            rooms,
            users,
            reservations,
            notifications,
            validator,
        }
    }
}

fn map_contact_error(error: ContactValidationError) -> DomainError {
    DomainError::invalid_request(error.to_string())
        .with_details(json!({ "code": "invalid_contact" }))
}

fn map_reservation_validation_error(error: ReservationValidationError) -> DomainError {
    let code = match error {
        ReservationValidationError::InvalidDateRange { .. } => "invalid_date_range",
        ReservationValidationError::ZeroGuests => "zero_guests",
        ReservationValidationError::NegativeTotalCost { .. } => "negative_total_cost",
    };
    DomainError::invalid_request(error.to_string()).with_details(json!({ "code": code }))
}

impl<H, R, U, S, N> BookingService<H, R, U, S, N>
where
    H: HotelRepository,
    R: RoomRepository,
    U: UserRepository,
    S: ReservationRepository,
    N: NotificationDispatcher,
{
    /// Join a stored reservation against its user and room.
    ///
    /// Both references are foreign keys of a committed row, so a miss here
    /// is a data integrity problem, not a caller mistake.
    async fn resolve_view(&self, reservation: Reservation) -> Result<ReservationView, DomainError> {
        let user = self
            .users
            .find_by_id(reservation.user_id)
            .await?
            .ok_or_else(|| {
                DomainError::internal(format!(
                    "reservation {} references missing user {}",
                    reservation.id, reservation.user_id
                ))
            })?;
        let room = self
            .rooms
            .find_by_id(reservation.room_id)
            .await?
            .ok_or_else(|| {
                DomainError::internal(format!(
                    "reservation {} references missing room {}",
                    reservation.id, reservation.room_id
                ))
            })?;
        Ok(ReservationView {
            reservation,
            user,
            room,
        })
    }

    async fn resolve_views(
        &self,
        reservations: Vec<Reservation>,
    ) -> Result<Vec<ReservationView>, DomainError> {
        let mut views = Vec::with_capacity(reservations.len());
        for reservation in reservations {
            views.push(self.resolve_view(reservation).await?);
        }
        Ok(views)
    }

}

#[async_trait]
impl<H, R, U, S, N> BookingQuery for BookingService<H, R, U, S, N>
where
    H: HotelRepository,
    R: RoomRepository,
    U: UserRepository,
    S: ReservationRepository,
    N: NotificationDispatcher,
{
    async fn list(&self) -> Result<Vec<ReservationView>, DomainError> {
        let reservations = self.reservations.list().await?;
        self.resolve_views(reservations).await
    }

    async fn get(&self, id: Uuid) -> Result<ReservationView, DomainError> {
        let reservation = self
            .reservations
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found(format!("reservation {id} not found")))?;
        self.resolve_view(reservation).await
    }

    async fn list_by_hotel(&self, hotel_id: Uuid) -> Result<Vec<ReservationView>, DomainError> {
        self.hotels
            .find_by_id(hotel_id)
            .await?
            .ok_or_else(|| DomainError::not_found(format!("hotel {hotel_id} not found")))?;
        let reservations = self.reservations.list_by_hotel(hotel_id).await?;
        self.resolve_views(reservations).await
    }

    async fn list_by_user(&self, user_id: Uuid) -> Result<Vec<ReservationView>, DomainError> {
        self.users
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| DomainError::not_found(format!("user {user_id} not found")))?;
        let reservations = self.reservations.list_by_user(user_id).await?;
        self.resolve_views(reservations).await
    }
}

#[async_trait]
impl<H, R, U, S, N> BookingCommand for BookingService<H, R, U, S, N>
where
    H: HotelRepository,
    R: RoomRepository,
    U: UserRepository,
    S: ReservationRepository,
    N: NotificationDispatcher,
{
    async fn create(
        &self,
        request: CreateReservationRequest,
    ) -> Result<CreateReservationResponse, DomainError> {
        let (room, user) = self
            .validator
            .validate(request.room_id, request.user_id)
            .await?;
        let contact = request.contact.build().map_err(map_contact_error)?;
        let reservation = Reservation::try_new(
            Uuid::new_v4(),
            request.total_cost,
            request.guest_count,
            contact,
            request.user_id,
            request.room_id,
            request.reserved_at.unwrap_or_else(chrono::Utc::now),
            request.check_in,
            request.check_out,
        )
        .map_err(map_reservation_validation_error)?;

        self.reservations.insert(&reservation).await?;
        tracing::debug!(reservation_id = %reservation.id, room_id = %room.id, "reservation created");

        // Everything from here on is confirmation rendering: the booking is
        // committed, so failures surface in the outcome instead of an error.
        let notification = match self.hotels.find_by_id(room.hotel_id).await {
            Ok(Some(hotel)) => {
                let message =
                    NotificationMessage::confirmation(&reservation, &hotel, &room, &user.email);
                match self.notifications.dispatch(&message).await {
                    Ok(()) => NotificationOutcome::Sent,
                    Err(error) => {
                        tracing::warn!(
                            reservation_id = %reservation.id,
                            %error,
                            "confirmation delivery failed"
                        );
                        NotificationOutcome::Failed {
                            reason: error.to_string(),
                        }
                    }
                }
            }
            Ok(None) => NotificationOutcome::Failed {
                reason: format!("hotel {} not found for booked room", room.hotel_id),
            },
            Err(error) => {
                tracing::warn!(
                    reservation_id = %reservation.id,
                    %error,
                    "confirmation skipped: hotel lookup failed"
                );
                NotificationOutcome::Failed {
                    reason: error.to_string(),
                }
            }
        };

        Ok(CreateReservationResponse {
            reservation,
            notification,
        })
    }

    async fn update(&self, request: UpdateReservationRequest) -> Result<Reservation, DomainError> {
        let mut reservation = self
            .reservations
            .find_by_id(request.id)
            .await?
            .ok_or_else(|| DomainError::not_found(format!("reservation {} not found", request.id)))?;

        // Only the room is re-validated; the booking user never changes.
        self.rooms
            .find_by_id(request.room_id)
            .await?
            .ok_or(ReferenceError::RoomMissing {
                id: request.room_id,
            })?;

        reservation
            .contact
            .apply_update(request.contact)
            .map_err(map_contact_error)?;
        reservation
            .set_stay(request.check_in, request.check_out)
            .map_err(map_reservation_validation_error)?;
        reservation.room_id = request.room_id;
        reservation.version = request.expected_version + 1;

        // One attempt: the repository classifies a failed write as a
        // concurrent delete (NotFound) or a concurrent modify (VersionConflict).
        self.reservations
            .update(&reservation, request.expected_version)
            .await?;
        Ok(reservation)
    }

    async fn delete(&self, id: Uuid) -> Result<(), DomainError> {
        self.reservations.delete(id).await?;
        tracing::debug!(reservation_id = %id, "reservation deleted");
        Ok(())
    }
}

#[cfg(test)]
#[path = "booking_service_tests.rs"]
mod tests;
