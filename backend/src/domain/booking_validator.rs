//! Reference validation for booking requests.
//!
//! A booking names a room and a user by identifier; both must exist before
//! anything is written. The room is checked first and a missing room
//! short-circuits the user lookup, so a request with two dangling references
//! reports the room.

use std::sync::Arc;

use uuid::Uuid;

use super::ports::{RoomRepository, RoomRepositoryError, UserRepository, UserRepositoryError};
use super::room::Room;
use super::user::User;

/// A booking reference that points at nothing.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ReferenceError {
    #[error("room {id} does not exist")]
    RoomMissing { id: Uuid },
    #[error("user {id} does not exist")]
    UserMissing { id: Uuid },
}

/// Errors raised by [`BookingValidator::validate`].
///
/// Reference failures are expected outcomes; lookup failures are
/// infrastructure problems and propagate separately.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum BookingValidatorError {
    #[error(transparent)]
    Reference(#[from] ReferenceError),
    #[error(transparent)]
    RoomLookup(#[from] RoomRepositoryError),
    #[error(transparent)]
    UserLookup(#[from] UserRepositoryError),
}

impl From<ReferenceError> for crate::domain::error::DomainError {
    fn from(error: ReferenceError) -> Self {
        use crate::domain::error::DomainError;
        match error {
            ReferenceError::RoomMissing { id } => {
                DomainError::not_found(format!("room {id} does not exist"))
                    .with_details(serde_json::json!({ "code": "room_missing", "id": id }))
            }
            ReferenceError::UserMissing { id } => {
                DomainError::not_found(format!("user {id} does not exist"))
                    .with_details(serde_json::json!({ "code": "user_missing", "id": id }))
            }
        }
    }
}

impl From<BookingValidatorError> for crate::domain::error::DomainError {
    fn from(error: BookingValidatorError) -> Self {
        match error {
            BookingValidatorError::Reference(reference) => reference.into(),
            BookingValidatorError::RoomLookup(lookup) => lookup.into(),
            BookingValidatorError::UserLookup(lookup) => lookup.into(),
        }
    }
}

/// Checks that a (room, user) pair can be booked against.
///
/// Read-only: the validator never writes and holds no state beyond its
/// repository handles.
pub struct BookingValidator<R, U> {
    rooms: Arc<R>,
    users: Arc<U>,
}

impl<R, U> BookingValidator<R, U>
where
    R: RoomRepository,
    U: UserRepository,
{
    pub fn new(rooms: Arc<R>, users: Arc<U>) -> Self {
        Self { rooms, users }
    }

    /// Resolve both references, room first.
    ///
    /// Returns the resolved entities so callers can price and render the
    /// booking without a second round trip.
    pub async fn validate(
        &self,
        room_id: Uuid,
        user_id: Uuid,
    ) -> Result<(Room, User), BookingValidatorError> {
        let room = self
            .rooms
            .find_by_id(room_id)
            .await?
            .ok_or(ReferenceError::RoomMissing { id: room_id })?;
        let user = self
            .users
            .find_by_id(user_id)
            .await?
            .ok_or(ReferenceError::UserMissing { id: user_id })?;
        Ok((room, user))
    }
}
