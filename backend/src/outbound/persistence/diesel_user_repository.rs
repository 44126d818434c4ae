//! PostgreSQL-backed `UserRepository` implementation using Diesel ORM.
//!
//! Email uniqueness is enforced by the database; unique violations on insert
//! or update surface as [`UserRepositoryError::DuplicateEmail`].

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use uuid::Uuid;

use crate::domain::{User, UserProfile};
use crate::domain::ports::{UserRepository, UserRepositoryError};

use super::diesel_helpers::{
    cast_version, cast_version_for_db, diesel_error_message, is_connection_error,
    is_unique_violation, pool_error_message,
};
use super::models::{NewUserRow, UserRow, UserUpdate};
use super::pool::{DbPool, PoolError};
use super::schema::users;

/// Diesel-backed implementation of the `UserRepository` port.
#[derive(Clone)]
pub struct DieselUserRepository {
    pool: DbPool,
}

impl DieselUserRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> UserRepositoryError {
    UserRepositoryError::connection(pool_error_message(error))
}

fn map_diesel_error(error: diesel::result::Error, operation: &str) -> UserRepositoryError {
    let message = diesel_error_message(&error, operation);
    if is_connection_error(&error) {
        UserRepositoryError::connection(message)
    } else {
        UserRepositoryError::query(message)
    }
}

/// Map a write error, recognising the unique email constraint.
fn map_write_error(
    error: diesel::result::Error,
    email: &str,
    operation: &str,
) -> UserRepositoryError {
    if is_unique_violation(&error) {
        UserRepositoryError::duplicate_email(email)
    } else {
        map_diesel_error(error, operation)
    }
}

fn row_to_user(row: UserRow) -> User {
    User {
        id: row.id,
        first_name: row.first_name,
        last_name: row.last_name,
        email: row.email,
        password: row.password,
        profile: UserProfile {
            gender: row.gender,
            role: row.role,
            document_type: row.document_type,
            document_number: row.document_number,
            phone: row.phone,
        },
        version: cast_version(row.version),
    }
}

/// Classify a zero-row update as a concurrent delete or a version conflict.
async fn classify_update_failure<C>(
    conn: &mut C,
    id: Uuid,
    expected_version: u32,
) -> UserRepositoryError
where
    C: diesel_async::AsyncConnection<Backend = diesel::pg::Pg> + Send,
{
    let current = users::table
        .find(id)
        .select(UserRow::as_select())
        .first(conn)
        .await
        .optional()
        .map_err(|err| map_diesel_error(err, "reread user"));

    match current {
        Ok(Some(row)) => {
            UserRepositoryError::version_conflict(id, expected_version, cast_version(row.version))
        }
        Ok(None) => UserRepositoryError::not_found(id),
        Err(err) => err,
    }
}

#[async_trait]
impl UserRepository for DieselUserRepository {
    async fn insert(&self, user: &User) -> Result<(), UserRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let new_row = NewUserRow {
            id: user.id,
            first_name: &user.first_name,
            last_name: &user.last_name,
            email: &user.email,
            password: &user.password,
            gender: &user.profile.gender,
            role: &user.profile.role,
            document_type: &user.profile.document_type,
            document_number: &user.profile.document_number,
            phone: &user.profile.phone,
            version: cast_version_for_db(user.version),
        };

        diesel::insert_into(users::table)
            .values(&new_row)
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(|err| map_write_error(err, &user.email, "insert user"))
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, UserRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: Option<UserRow> = users::table
            .find(id)
            .select(UserRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(|err| map_diesel_error(err, "find user"))?;

        Ok(row.map(row_to_user))
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, UserRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: Option<UserRow> = users::table
            .filter(users::email.eq(email))
            .select(UserRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(|err| map_diesel_error(err, "find user by email"))?;

        Ok(row.map(row_to_user))
    }

    async fn list(&self) -> Result<Vec<User>, UserRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<UserRow> = users::table
            .select(UserRow::as_select())
            .order_by(users::last_name.asc())
            .load(&mut conn)
            .await
            .map_err(|err| map_diesel_error(err, "list users"))?;

        Ok(rows.into_iter().map(row_to_user).collect())
    }

    async fn update(&self, user: &User, expected_version: u32) -> Result<(), UserRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let update = UserUpdate {
            first_name: &user.first_name,
            last_name: &user.last_name,
            email: &user.email,
            password: &user.password,
            gender: &user.profile.gender,
            role: &user.profile.role,
            document_type: &user.profile.document_type,
            document_number: &user.profile.document_number,
            phone: &user.profile.phone,
            version: cast_version_for_db(user.version),
        };

        let updated_rows = diesel::update(users::table)
            .filter(
                users::id
                    .eq(user.id)
                    .and(users::version.eq(cast_version_for_db(expected_version))),
            )
            .set(&update)
            .execute(&mut conn)
            .await
            .map_err(|err| map_write_error(err, &user.email, "update user"))?;

        if updated_rows == 0 {
            return Err(classify_update_failure(&mut conn, user.id, expected_version).await);
        }
        Ok(())
    }

    async fn delete(&self, id: Uuid) -> Result<(), UserRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let deleted = diesel::delete(users::table.find(id))
            .execute(&mut conn)
            .await
            .map_err(|err| map_diesel_error(err, "delete user"))?;

        if deleted == 0 {
            return Err(UserRepositoryError::not_found(id));
        }
        Ok(())
    }
}
