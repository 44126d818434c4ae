//! Shared helpers for Diesel repository implementations.
//!
//! Each repository maps infrastructure failures into its own typed port
//! error; these helpers extract readable messages and handle the version
//! casts between database and domain representations.

use tracing::debug;

use super::pool::PoolError;

/// Extract a readable message from a pool error.
pub(crate) fn pool_error_message(error: PoolError) -> String {
    match error {
        PoolError::Checkout { message } | PoolError::Build { message } => message,
    }
}

/// Extract a readable message from a Diesel error and emit debug context.
pub(crate) fn diesel_error_message(error: &diesel::result::Error, operation: &str) -> String {
    use diesel::result::Error as DieselError;

    match error {
        DieselError::DatabaseError(kind, info) => {
            debug!(?kind, message = info.message(), %operation, "diesel operation failed");
        }
        _ => debug!(
            error_type = %std::any::type_name_of_val(error),
            %operation,
            "diesel operation failed"
        ),
    }
    error.to_string()
}

/// Whether the error is a closed or broken connection rather than a bad query.
pub(crate) fn is_connection_error(error: &diesel::result::Error) -> bool {
    use diesel::result::{DatabaseErrorKind, Error as DieselError};

    matches!(
        error,
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _)
            | DieselError::BrokenTransactionManager
    )
}

/// Whether the error is a unique constraint violation.
pub(crate) fn is_unique_violation(error: &diesel::result::Error) -> bool {
    use diesel::result::{DatabaseErrorKind, Error as DieselError};

    matches!(
        error,
        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _)
    )
}

/// Whether the error is a foreign key constraint violation.
pub(crate) fn is_foreign_key_violation(error: &diesel::result::Error) -> bool {
    use diesel::result::{DatabaseErrorKind, Error as DieselError};

    matches!(
        error,
        DieselError::DatabaseError(DatabaseErrorKind::ForeignKeyViolation, _)
    )
}

/// Cast a database version (i32) to the domain version (u32).
///
/// Versions are non-negative by database constraint.
#[expect(
    clippy::cast_sign_loss,
    reason = "version is constrained to be positive in the database"
)]
pub(crate) fn cast_version(version: i32) -> u32 {
    version as u32
}

/// Cast a domain version (u32) to the database version (i32).
#[expect(
    clippy::cast_possible_wrap,
    reason = "version values are small positive integers"
)]
pub(crate) fn cast_version_for_db(version: u32) -> i32 {
    version as i32
}

/// Cast a database count column (i32) to the domain's u32.
#[expect(
    clippy::cast_sign_loss,
    reason = "counts are constrained to be positive in the database"
)]
pub(crate) fn cast_count(count: i32) -> u32 {
    count as u32
}

/// Cast a domain count (u32) to the database's i32.
#[expect(
    clippy::cast_possible_wrap,
    reason = "guest counts and capacities are small positive integers"
)]
pub(crate) fn cast_count_for_db(count: u32) -> i32 {
    count as i32
}
