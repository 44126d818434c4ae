//! Hotel data model.

use std::fmt;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// Validation errors returned by [`Hotel::try_new`].
#[derive(Debug, Clone, PartialEq)]
pub enum HotelValidationError {
    EmptyName,
    EmptyLocation,
    NegativeCommission { commission: f64 },
}

impl fmt::Display for HotelValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyName => write!(f, "hotel name must not be empty"),
            Self::EmptyLocation => write!(f, "hotel location must not be empty"),
            Self::NegativeCommission { commission } => {
                write!(f, "hotel commission must not be negative, got {commission}")
            }
        }
    }
}

impl std::error::Error for HotelValidationError {}

/// A hotel listed on the platform.
///
/// ## Invariants
/// - `name` and `location` must be non-empty once trimmed of whitespace.
/// - `commission` must not be negative.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
#[serde(deny_unknown_fields)]
pub struct Hotel {
    /// Stable hotel identifier.
    pub id: Uuid,
    /// Display name shown to guests.
    #[schema(example = "Seaside Hotel")]
    pub name: String,
    /// City or area the hotel operates in.
    #[schema(example = "Cartagena")]
    pub location: String,
    /// Platform commission applied to bookings.
    pub commission: f64,
    /// Whether the hotel accepts new bookings.
    pub is_active: bool,
    /// The user who registered the hotel.
    pub owner_id: Uuid,
    /// Version number for optimistic concurrency.
    pub version: u32,
}

impl Hotel {
    /// Build a new hotel at version 1, enforcing the field invariants.
    pub fn try_new(
        id: Uuid,
        name: impl Into<String>,
        location: impl Into<String>,
        commission: f64,
        owner_id: Uuid,
    ) -> Result<Self, HotelValidationError> {
        let hotel = Self {
            id,
            name: name.into(),
            location: location.into(),
            commission,
            is_active: true,
            owner_id,
            version: 1,
        };
        hotel.ensure_valid()?;
        Ok(hotel)
    }

    /// Re-check the field invariants, used before persisting a modified hotel.
    pub fn ensure_valid(&self) -> Result<(), HotelValidationError> {
        if self.name.trim().is_empty() {
            return Err(HotelValidationError::EmptyName);
        }
        if self.location.trim().is_empty() {
            return Err(HotelValidationError::EmptyLocation);
        }
        if self.commission < 0.0 {
            return Err(HotelValidationError::NegativeCommission {
                commission: self.commission,
            });
        }
        Ok(())
    }
}
