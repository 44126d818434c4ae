//! Reservation aggregate and its owned contact record.
//!
//! A reservation borrows its user and room by identifier but owns its
//! contact outright: the contact is created with the reservation and removed
//! with it. Contact updates are partial by design; the phone number is set at
//! creation and never rewritten afterwards.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// Validation errors for contact construction and update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContactValidationError {
    EmptyFirstName,
    EmptyLastName,
    InvalidEmail,
}

impl fmt::Display for ContactValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyFirstName => write!(f, "contact first name must not be empty"),
            Self::EmptyLastName => write!(f, "contact last name must not be empty"),
            Self::InvalidEmail => write!(f, "contact email must contain an '@' sign"),
        }
    }
}

impl std::error::Error for ContactValidationError {}

/// Validation errors returned by [`Reservation::try_new`] and
/// [`Reservation::set_stay`].
#[derive(Debug, Clone, PartialEq)]
pub enum ReservationValidationError {
    /// Check-out precedes check-in.
    InvalidDateRange {
        check_in: DateTime<Utc>,
        check_out: DateTime<Utc>,
    },
    ZeroGuests,
    NegativeTotalCost { total_cost: f64 },
}

impl fmt::Display for ReservationValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidDateRange {
                check_in,
                check_out,
            } => write!(
                f,
                "check-out ({check_out}) must not precede check-in ({check_in})"
            ),
            Self::ZeroGuests => write!(f, "a reservation must cover at least one guest"),
            Self::NegativeTotalCost { total_cost } => {
                write!(f, "total cost must not be negative, got {total_cost}")
            }
        }
    }
}

impl std::error::Error for ReservationValidationError {}

/// Booking contact owned by a reservation.
///
/// ## Invariants
/// - `first_name` and `last_name` must be non-empty once trimmed.
/// - `email` must contain an `@` sign.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
#[serde(deny_unknown_fields)]
pub struct Contact {
    /// Stable contact identifier.
    pub id: Uuid,
    #[schema(example = "Ada")]
    pub first_name: String,
    #[schema(example = "Lovelace")]
    pub last_name: String,
    #[schema(example = "ada@example.com")]
    pub email: String,
    /// Set at creation and never updated afterwards.
    pub phone: String,
}

/// Input fields for building a [`Contact`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactDraft {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
}

impl ContactDraft {
    /// Validate the draft and mint a contact with a fresh identifier.
    pub fn build(self) -> Result<Contact, ContactValidationError> {
        let contact = Contact {
            id: Uuid::new_v4(),
            first_name: self.first_name,
            last_name: self.last_name,
            email: self.email,
            phone: self.phone,
        };
        contact.ensure_valid()?;
        Ok(contact)
    }
}

/// Partial overwrite of a contact's updatable fields.
///
/// `None` leaves the stored value untouched. There is no phone field: the
/// phone number cannot be changed once the reservation exists.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactUpdate {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
}

impl Contact {
    /// Re-check the field invariants.
    pub fn ensure_valid(&self) -> Result<(), ContactValidationError> {
        if self.first_name.trim().is_empty() {
            return Err(ContactValidationError::EmptyFirstName);
        }
        if self.last_name.trim().is_empty() {
            return Err(ContactValidationError::EmptyLastName);
        }
        if !self.email.contains('@') {
            return Err(ContactValidationError::InvalidEmail);
        }
        Ok(())
    }

    /// Overwrite only the fields present in the update, re-validating the
    /// result. On validation failure the contact is left unchanged.
    pub fn apply_update(&mut self, update: ContactUpdate) -> Result<(), ContactValidationError> {
        let mut candidate = self.clone();
        if let Some(first_name) = update.first_name {
            candidate.first_name = first_name;
        }
        if let Some(last_name) = update.last_name {
            candidate.last_name = last_name;
        }
        if let Some(email) = update.email {
            candidate.email = email;
        }
        candidate.ensure_valid()?;
        *self = candidate;
        Ok(())
    }
}

/// A booking linking a user to a room for a date range.
///
/// ## Invariants
/// - `check_out` must not precede `check_in` (equal timestamps are allowed).
/// - `guest_count` must be at least one.
/// - `total_cost` must not be negative.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
#[serde(deny_unknown_fields)]
pub struct Reservation {
    /// Stable reservation identifier.
    pub id: Uuid,
    /// Total price for the stay.
    pub total_cost: f64,
    /// Whether the booking is live.
    pub is_active: bool,
    /// Number of guests covered by the booking.
    pub guest_count: u32,
    /// Contact record owned by this reservation.
    pub contact: Contact,
    /// The booking user, borrowed by identifier.
    pub user_id: Uuid,
    /// The booked room, borrowed by identifier.
    pub room_id: Uuid,
    /// When the booking was placed.
    pub reserved_at: DateTime<Utc>,
    pub check_in: DateTime<Utc>,
    pub check_out: DateTime<Utc>,
    /// Version number for optimistic concurrency.
    pub version: u32,
}

impl Reservation {
    /// Assemble a new reservation at version 1, enforcing the invariants.
    #[expect(clippy::too_many_arguments)]
    pub fn try_new(
        id: Uuid,
        total_cost: f64,
        guest_count: u32,
        contact: Contact,
        user_id: Uuid,
        room_id: Uuid,
        reserved_at: DateTime<Utc>,
        check_in: DateTime<Utc>,
        check_out: DateTime<Utc>,
    ) -> Result<Self, ReservationValidationError> {
        validate_stay(check_in, check_out)?;
        if guest_count == 0 {
            return Err(ReservationValidationError::ZeroGuests);
        }
        if total_cost < 0.0 {
            return Err(ReservationValidationError::NegativeTotalCost { total_cost });
        }
        Ok(Self {
            id,
            total_cost,
            is_active: true,
            guest_count,
            contact,
            user_id,
            room_id,
            reserved_at,
            check_in,
            check_out,
            version: 1,
        })
    }

    /// Replace the stay window, re-validating the range.
    pub fn set_stay(
        &mut self,
        check_in: DateTime<Utc>,
        check_out: DateTime<Utc>,
    ) -> Result<(), ReservationValidationError> {
        validate_stay(check_in, check_out)?;
        self.check_in = check_in;
        self.check_out = check_out;
        Ok(())
    }
}

fn validate_stay(
    check_in: DateTime<Utc>,
    check_out: DateTime<Utc>,
) -> Result<(), ReservationValidationError> {
    if check_out < check_in {
        return Err(ReservationValidationError::InvalidDateRange {
            check_in,
            check_out,
        });
    }
    Ok(())
}
