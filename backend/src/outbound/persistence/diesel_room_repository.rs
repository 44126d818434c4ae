//! PostgreSQL-backed `RoomRepository` implementation using Diesel ORM.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use uuid::Uuid;

use crate::domain::Room;
use crate::domain::ports::{RoomRepository, RoomRepositoryError};

use super::diesel_helpers::{
    cast_count, cast_count_for_db, cast_version, cast_version_for_db, diesel_error_message,
    is_connection_error, pool_error_message,
};
use super::models::{NewRoomRow, RoomRow, RoomUpdate};
use super::pool::{DbPool, PoolError};
use super::schema::rooms;

/// Diesel-backed implementation of the `RoomRepository` port.
#[derive(Clone)]
pub struct DieselRoomRepository {
    pool: DbPool,
}

impl DieselRoomRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> RoomRepositoryError {
    RoomRepositoryError::connection(pool_error_message(error))
}

fn map_diesel_error(error: diesel::result::Error, operation: &str) -> RoomRepositoryError {
    let message = diesel_error_message(&error, operation);
    if is_connection_error(&error) {
        RoomRepositoryError::connection(message)
    } else {
        RoomRepositoryError::query(message)
    }
}

fn row_to_room(row: RoomRow) -> Room {
    Room {
        id: row.id,
        kind: row.kind,
        base_cost: row.base_cost,
        taxes: row.taxes,
        location: row.location,
        capacity: cast_count(row.capacity),
        is_active: row.is_active,
        hotel_id: row.hotel_id,
        version: cast_version(row.version),
    }
}

/// Classify a zero-row update as a concurrent delete or a version conflict.
async fn classify_update_failure<C>(
    conn: &mut C,
    id: Uuid,
    expected_version: u32,
) -> RoomRepositoryError
where
    C: diesel_async::AsyncConnection<Backend = diesel::pg::Pg> + Send,
{
    let current = rooms::table
        .find(id)
        .select(RoomRow::as_select())
        .first(conn)
        .await
        .optional()
        .map_err(|err| map_diesel_error(err, "reread room"));

    match current {
        Ok(Some(row)) => {
            RoomRepositoryError::version_conflict(id, expected_version, cast_version(row.version))
        }
        Ok(None) => RoomRepositoryError::not_found(id),
        Err(err) => err,
    }
}

#[async_trait]
impl RoomRepository for DieselRoomRepository {
    async fn insert(&self, room: &Room) -> Result<(), RoomRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let new_row = NewRoomRow {
            id: room.id,
            kind: &room.kind,
            base_cost: room.base_cost,
            taxes: room.taxes,
            location: &room.location,
            capacity: cast_count_for_db(room.capacity),
            is_active: room.is_active,
            hotel_id: room.hotel_id,
            version: cast_version_for_db(room.version),
        };

        diesel::insert_into(rooms::table)
            .values(&new_row)
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(|err| map_diesel_error(err, "insert room"))
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Room>, RoomRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: Option<RoomRow> = rooms::table
            .find(id)
            .select(RoomRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(|err| map_diesel_error(err, "find room"))?;

        Ok(row.map(row_to_room))
    }

    async fn list_by_hotel(&self, hotel_id: Uuid) -> Result<Vec<Room>, RoomRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<RoomRow> = rooms::table
            .filter(rooms::hotel_id.eq(hotel_id))
            .select(RoomRow::as_select())
            .order_by(rooms::kind.asc())
            .load(&mut conn)
            .await
            .map_err(|err| map_diesel_error(err, "list rooms by hotel"))?;

        Ok(rows.into_iter().map(row_to_room).collect())
    }

    async fn update(&self, room: &Room, expected_version: u32) -> Result<(), RoomRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let update = RoomUpdate {
            kind: &room.kind,
            base_cost: room.base_cost,
            taxes: room.taxes,
            location: &room.location,
            capacity: cast_count_for_db(room.capacity),
            is_active: room.is_active,
            version: cast_version_for_db(room.version),
        };

        let updated_rows = diesel::update(rooms::table)
            .filter(
                rooms::id
                    .eq(room.id)
                    .and(rooms::version.eq(cast_version_for_db(expected_version))),
            )
            .set(&update)
            .execute(&mut conn)
            .await
            .map_err(|err| map_diesel_error(err, "update room"))?;

        if updated_rows == 0 {
            return Err(classify_update_failure(&mut conn, room.id, expected_version).await);
        }
        Ok(())
    }

    async fn delete(&self, id: Uuid) -> Result<(), RoomRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let deleted = diesel::delete(rooms::table.find(id))
            .execute(&mut conn)
            .await
            .map_err(|err| map_diesel_error(err, "delete room"))?;

        if deleted == 0 {
            return Err(RoomRepositoryError::not_found(id));
        }
        Ok(())
    }
}
