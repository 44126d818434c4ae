//! PostgreSQL-backed `ReservationRepository` implementation using Diesel ORM.
//!
//! A reservation owns its contact record, so writes touch both tables inside
//! one transaction: inserts create the contact row first, updates rewrite it
//! alongside the reservation, and deletes remove it last.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::scoped_futures::ScopedFutureExt;
use diesel_async::{AsyncConnection, RunQueryDsl};
use uuid::Uuid;

use crate::domain::ports::{ReservationRepository, ReservationRepositoryError};
use crate::domain::{Contact, Reservation};

use super::diesel_helpers::{
    cast_count, cast_count_for_db, cast_version, cast_version_for_db, diesel_error_message,
    is_connection_error, pool_error_message,
};
use super::models::{
    ContactRow, ContactUpdateRow, NewContactRow, NewReservationRow, ReservationRow,
    ReservationUpdate,
};
use super::pool::{DbPool, PoolError};
use super::schema::{contacts, reservations, rooms};

/// Diesel-backed implementation of the `ReservationRepository` port.
#[derive(Clone)]
pub struct DieselReservationRepository {
    pool: DbPool,
}

impl DieselReservationRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> ReservationRepositoryError {
    ReservationRepositoryError::connection(pool_error_message(error))
}

fn map_diesel_error(error: diesel::result::Error, operation: &str) -> ReservationRepositoryError {
    let message = diesel_error_message(&error, operation);
    if is_connection_error(&error) {
        ReservationRepositoryError::connection(message)
    } else {
        ReservationRepositoryError::query(message)
    }
}

fn rows_to_reservation(row: ReservationRow, contact: ContactRow) -> Reservation {
    Reservation {
        id: row.id,
        total_cost: row.total_cost,
        is_active: row.is_active,
        guest_count: cast_count(row.guest_count),
        contact: Contact {
            id: contact.id,
            first_name: contact.first_name,
            last_name: contact.last_name,
            email: contact.email,
            phone: contact.phone,
        },
        user_id: row.user_id,
        room_id: row.room_id,
        reserved_at: row.reserved_at,
        check_in: row.check_in,
        check_out: row.check_out,
        version: cast_version(row.version),
    }
}

/// Outcome of a transactional write, resolved to a typed error afterwards.
enum WriteOutcome {
    Applied,
    Missing,
    Conflict { actual: u32 },
}

#[async_trait]
impl ReservationRepository for DieselReservationRepository {
    async fn insert(&self, reservation: &Reservation) -> Result<(), ReservationRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let contact_row = NewContactRow {
            id: reservation.contact.id,
            first_name: &reservation.contact.first_name,
            last_name: &reservation.contact.last_name,
            email: &reservation.contact.email,
            phone: &reservation.contact.phone,
        };
        let reservation_row = NewReservationRow {
            id: reservation.id,
            total_cost: reservation.total_cost,
            is_active: reservation.is_active,
            guest_count: cast_count_for_db(reservation.guest_count),
            contact_id: reservation.contact.id,
            user_id: reservation.user_id,
            room_id: reservation.room_id,
            reserved_at: reservation.reserved_at,
            check_in: reservation.check_in,
            check_out: reservation.check_out,
            version: cast_version_for_db(reservation.version),
        };

        conn.transaction(|conn| {
            async move {
                diesel::insert_into(contacts::table)
                    .values(&contact_row)
                    .execute(conn)
                    .await?;

                diesel::insert_into(reservations::table)
                    .values(&reservation_row)
                    .execute(conn)
                    .await?;

                Ok(())
            }
            .scope_boxed()
        })
        .await
        .map_err(|err| map_diesel_error(err, "insert reservation"))
    }

    async fn find_by_id(
        &self,
        id: Uuid,
    ) -> Result<Option<Reservation>, ReservationRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let pair: Option<(ReservationRow, ContactRow)> = reservations::table
            .inner_join(contacts::table)
            .filter(reservations::id.eq(id))
            .select((ReservationRow::as_select(), ContactRow::as_select()))
            .first(&mut conn)
            .await
            .optional()
            .map_err(|err| map_diesel_error(err, "find reservation"))?;

        Ok(pair.map(|(row, contact)| rows_to_reservation(row, contact)))
    }

    async fn list(&self) -> Result<Vec<Reservation>, ReservationRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let pairs: Vec<(ReservationRow, ContactRow)> = reservations::table
            .inner_join(contacts::table)
            .select((ReservationRow::as_select(), ContactRow::as_select()))
            .order_by(reservations::reserved_at.desc())
            .load(&mut conn)
            .await
            .map_err(|err| map_diesel_error(err, "list reservations"))?;

        Ok(pairs
            .into_iter()
            .map(|(row, contact)| rows_to_reservation(row, contact))
            .collect())
    }

    async fn list_by_hotel(
        &self,
        hotel_id: Uuid,
    ) -> Result<Vec<Reservation>, ReservationRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let pairs: Vec<(ReservationRow, ContactRow)> = reservations::table
            .inner_join(contacts::table)
            .inner_join(rooms::table)
            .filter(rooms::hotel_id.eq(hotel_id))
            .select((ReservationRow::as_select(), ContactRow::as_select()))
            .order_by(reservations::reserved_at.desc())
            .load(&mut conn)
            .await
            .map_err(|err| map_diesel_error(err, "list reservations by hotel"))?;

        Ok(pairs
            .into_iter()
            .map(|(row, contact)| rows_to_reservation(row, contact))
            .collect())
    }

    async fn list_by_user(
        &self,
        user_id: Uuid,
    ) -> Result<Vec<Reservation>, ReservationRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let pairs: Vec<(ReservationRow, ContactRow)> = reservations::table
            .inner_join(contacts::table)
            .filter(reservations::user_id.eq(user_id))
            .select((ReservationRow::as_select(), ContactRow::as_select()))
            .order_by(reservations::reserved_at.desc())
            .load(&mut conn)
            .await
            .map_err(|err| map_diesel_error(err, "list reservations by user"))?;

        Ok(pairs
            .into_iter()
            .map(|(row, contact)| rows_to_reservation(row, contact))
            .collect())
    }

    async fn update(
        &self,
        reservation: &Reservation,
        expected_version: u32,
    ) -> Result<(), ReservationRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let update = ReservationUpdate {
            total_cost: reservation.total_cost,
            is_active: reservation.is_active,
            guest_count: cast_count_for_db(reservation.guest_count),
            room_id: reservation.room_id,
            check_in: reservation.check_in,
            check_out: reservation.check_out,
            version: cast_version_for_db(reservation.version),
        };
        let contact_update = ContactUpdateRow {
            first_name: &reservation.contact.first_name,
            last_name: &reservation.contact.last_name,
            email: &reservation.contact.email,
            phone: &reservation.contact.phone,
        };
        let id = reservation.id;
        let contact_id = reservation.contact.id;

        let outcome = conn
            .transaction(|conn| {
                async move {
                    let updated_rows = diesel::update(reservations::table)
                        .filter(
                            reservations::id
                                .eq(id)
                                .and(reservations::version.eq(cast_version_for_db(expected_version))),
                        )
                        .set(&update)
                        .execute(conn)
                        .await?;

                    if updated_rows == 0 {
                        // Re-read to tell a concurrent delete apart from a
                        // concurrent modification.
                        let current: Option<ReservationRow> = reservations::table
                            .find(id)
                            .select(ReservationRow::as_select())
                            .first(conn)
                            .await
                            .optional()?;
                        return Ok(match current {
                            Some(row) => WriteOutcome::Conflict {
                                actual: cast_version(row.version),
                            },
                            None => WriteOutcome::Missing,
                        });
                    }

                    diesel::update(contacts::table.find(contact_id))
                        .set(&contact_update)
                        .execute(conn)
                        .await?;

                    Ok(WriteOutcome::Applied)
                }
                .scope_boxed()
            })
            .await
            .map_err(|err| map_diesel_error(err, "update reservation"))?;

        match outcome {
            WriteOutcome::Applied => Ok(()),
            WriteOutcome::Missing => Err(ReservationRepositoryError::not_found(reservation.id)),
            WriteOutcome::Conflict { actual } => Err(ReservationRepositoryError::version_conflict(
                reservation.id,
                expected_version,
                actual,
            )),
        }
    }

    async fn delete(&self, id: Uuid) -> Result<(), ReservationRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let outcome = conn
            .transaction(|conn| {
                async move {
                    let contact_id: Option<Uuid> = reservations::table
                        .find(id)
                        .select(reservations::contact_id)
                        .first(conn)
                        .await
                        .optional()?;

                    let Some(contact_id) = contact_id else {
                        return Ok(WriteOutcome::Missing);
                    };

                    diesel::delete(reservations::table.find(id))
                        .execute(conn)
                        .await?;
                    diesel::delete(contacts::table.find(contact_id))
                        .execute(conn)
                        .await?;

                    Ok(WriteOutcome::Applied)
                }
                .scope_boxed()
            })
            .await
            .map_err(|err| map_diesel_error(err, "delete reservation"))?;

        match outcome {
            WriteOutcome::Applied => Ok(()),
            WriteOutcome::Missing | WriteOutcome::Conflict { .. } => {
                Err(ReservationRepositoryError::not_found(id))
            }
        }
    }
}
