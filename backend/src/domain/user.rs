//! User data model.

use std::fmt;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// Validation errors returned by [`User::try_new`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserValidationError {
    EmptyFirstName,
    EmptyLastName,
    InvalidEmail,
}

impl fmt::Display for UserValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyFirstName => write!(f, "first name must not be empty"),
            Self::EmptyLastName => write!(f, "last name must not be empty"),
            Self::InvalidEmail => write!(f, "email must contain an '@' sign"),
        }
    }
}

impl std::error::Error for UserValidationError {}

/// Profile fields carried alongside the identity columns.
///
/// Grouped so constructors and update paths can pass them as one unit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
#[serde(deny_unknown_fields)]
pub struct UserProfile {
    #[schema(example = "female")]
    pub gender: String,
    /// Application role label, e.g. "guest" or "owner".
    #[schema(example = "guest")]
    pub role: String,
    /// Identity document category, e.g. "passport".
    pub document_type: String,
    pub document_number: String,
    pub phone: String,
}

/// A registered user.
///
/// The password is stored as an opaque string; hashing and credential
/// handling happen outside this service.
///
/// ## Invariants
/// - `first_name` and `last_name` must be non-empty once trimmed.
/// - `email` must contain an `@` sign and is unique across users.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
#[serde(deny_unknown_fields)]
pub struct User {
    /// Stable user identifier.
    pub id: Uuid,
    #[schema(example = "Ada")]
    pub first_name: String,
    #[schema(example = "Lovelace")]
    pub last_name: String,
    /// Unique contact address, also the notification recipient.
    #[schema(example = "ada@example.com")]
    pub email: String,
    /// Opaque credential material.
    #[serde(skip_serializing)]
    pub password: String,
    pub profile: UserProfile,
    /// Version number for optimistic concurrency.
    pub version: u32,
}

impl User {
    /// Build a new user at version 1, enforcing the field invariants.
    pub fn try_new(
        id: Uuid,
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        email: impl Into<String>,
        password: impl Into<String>,
        profile: UserProfile,
    ) -> Result<Self, UserValidationError> {
        let user = Self {
            id,
            first_name: first_name.into(),
            last_name: last_name.into(),
            email: email.into(),
            password: password.into(),
            profile,
            version: 1,
        };
        user.ensure_valid()?;
        Ok(user)
    }

    /// Re-check the field invariants, used before persisting a modified user.
    pub fn ensure_valid(&self) -> Result<(), UserValidationError> {
        if self.first_name.trim().is_empty() {
            return Err(UserValidationError::EmptyFirstName);
        }
        if self.last_name.trim().is_empty() {
            return Err(UserValidationError::EmptyLastName);
        }
        if !self.email.contains('@') {
            return Err(UserValidationError::InvalidEmail);
        }
        Ok(())
    }
}
