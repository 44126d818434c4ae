//! Room data model.

use std::fmt;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// Validation errors returned by [`Room::try_new`].
#[derive(Debug, Clone, PartialEq)]
pub enum RoomValidationError {
    EmptyKind,
    NegativeBaseCost { base_cost: f64 },
    NegativeTaxes { taxes: f64 },
    ZeroCapacity,
}

impl fmt::Display for RoomValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyKind => write!(f, "room type must not be empty"),
            Self::NegativeBaseCost { base_cost } => {
                write!(f, "room base cost must not be negative, got {base_cost}")
            }
            Self::NegativeTaxes { taxes } => {
                write!(f, "room taxes must not be negative, got {taxes}")
            }
            Self::ZeroCapacity => write!(f, "room capacity must be at least one guest"),
        }
    }
}

impl std::error::Error for RoomValidationError {}

/// A bookable room belonging to a hotel.
///
/// Rooms are written as a whole: updates replace every field except the
/// identifier, the owning hotel, and the version counter.
///
/// ## Invariants
/// - `kind` must be non-empty once trimmed of whitespace.
/// - `base_cost` and `taxes` must not be negative.
/// - `capacity` must be at least one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
#[serde(deny_unknown_fields)]
pub struct Room {
    /// Stable room identifier.
    pub id: Uuid,
    /// Room type label, e.g. "Double" or "Suite".
    #[schema(example = "Double")]
    pub kind: String,
    /// Price per night before taxes.
    pub base_cost: f64,
    /// Taxes added per night.
    pub taxes: f64,
    /// Location of the room within the hotel, e.g. a floor or wing.
    #[schema(example = "Floor 3, sea view")]
    pub location: String,
    /// Maximum number of guests.
    pub capacity: u32,
    /// Whether the room accepts new bookings.
    pub is_active: bool,
    /// The hotel this room belongs to.
    pub hotel_id: Uuid,
    /// Version number for optimistic concurrency.
    pub version: u32,
}

impl Room {
    /// Build a new room at version 1, enforcing the field invariants.
    pub fn try_new(
        id: Uuid,
        kind: impl Into<String>,
        base_cost: f64,
        taxes: f64,
        location: impl Into<String>,
        capacity: u32,
        hotel_id: Uuid,
    ) -> Result<Self, RoomValidationError> {
        let room = Self {
            id,
            kind: kind.into(),
            base_cost,
            taxes,
            location: location.into(),
            capacity,
            is_active: true,
            hotel_id,
            version: 1,
        };
        room.ensure_valid()?;
        Ok(room)
    }

    /// Re-check the field invariants, used before persisting a modified room.
    pub fn ensure_valid(&self) -> Result<(), RoomValidationError> {
        if self.kind.trim().is_empty() {
            return Err(RoomValidationError::EmptyKind);
        }
        if self.base_cost < 0.0 {
            return Err(RoomValidationError::NegativeBaseCost {
                base_cost: self.base_cost,
            });
        }
        if self.taxes < 0.0 {
            return Err(RoomValidationError::NegativeTaxes { taxes: self.taxes });
        }
        if self.capacity == 0 {
            return Err(RoomValidationError::ZeroCapacity);
        }
        Ok(())
    }

    /// Price for a single night including taxes.
    pub fn nightly_cost(&self) -> f64 {
        self.base_cost + self.taxes
    }
}
