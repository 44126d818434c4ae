//! Domain entities, services, and ports.
//!
//! Purpose: Define the booking domain — entities with documented invariants,
//! the validation and lifecycle services, and the ports adapters implement.
//! Serialisation contracts (serde) live in each type's Rustdoc.

pub mod booking_service;
pub mod booking_validator;
pub mod error;
pub mod hotel;
pub mod notification;
pub mod ports;
pub mod reservation;
pub mod room;
pub mod user;

pub use self::booking_service::BookingService;
pub use self::booking_validator::{BookingValidator, BookingValidatorError, ReferenceError};
pub use self::error::{DomainError, DomainErrorValidationError, ErrorCode};
pub use self::hotel::{Hotel, HotelValidationError};
pub use self::notification::NotificationMessage;
pub use self::reservation::{
    Contact, ContactDraft, ContactUpdate, ContactValidationError, Reservation,
    ReservationValidationError,
};
pub use self::room::{Room, RoomValidationError};
pub use self::user::{User, UserProfile, UserValidationError};

/// Result alias for domain operations.
///
/// # Examples
/// ```
/// use backend::domain::{DomainError, DomainResult, Reservation};
///
/// fn lookup() -> DomainResult<Reservation> {
///     Err(DomainError::not_found("no such booking"))
/// }
/// ```
pub type DomainResult<T> = Result<T, DomainError>;
