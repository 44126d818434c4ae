//! PostgreSQL-backed `HotelRepository` implementation using Diesel ORM.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use uuid::Uuid;

use crate::domain::Hotel;
use crate::domain::ports::{HotelRepository, HotelRepositoryError};

use super::diesel_helpers::{
    cast_version, cast_version_for_db, diesel_error_message, is_connection_error,
    is_foreign_key_violation, pool_error_message,
};
use super::models::{HotelRow, HotelUpdate, NewHotelRow};
use super::pool::{DbPool, PoolError};
use super::schema::hotels;

/// Diesel-backed implementation of the `HotelRepository` port.
#[derive(Clone)]
pub struct DieselHotelRepository {
    pool: DbPool,
}

impl DieselHotelRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> HotelRepositoryError {
    HotelRepositoryError::connection(pool_error_message(error))
}

fn map_diesel_error(error: diesel::result::Error, operation: &str) -> HotelRepositoryError {
    let message = diesel_error_message(&error, operation);
    if is_connection_error(&error) {
        HotelRepositoryError::connection(message)
    } else {
        HotelRepositoryError::query(message)
    }
}

fn row_to_hotel(row: HotelRow) -> Hotel {
    Hotel {
        id: row.id,
        name: row.name,
        location: row.location,
        commission: row.commission,
        is_active: row.is_active,
        owner_id: row.owner_id,
        version: cast_version(row.version),
    }
}

/// Classify a zero-row update as a concurrent delete or a version conflict.
async fn classify_update_failure<C>(
    conn: &mut C,
    id: Uuid,
    expected_version: u32,
) -> HotelRepositoryError
where
    C: diesel_async::AsyncConnection<Backend = diesel::pg::Pg> + Send,
{
    let current = hotels::table
        .find(id)
        .select(HotelRow::as_select())
        .first(conn)
        .await
        .optional()
        .map_err(|err| map_diesel_error(err, "reread hotel"));

    match current {
        Ok(Some(row)) => {
            HotelRepositoryError::version_conflict(id, expected_version, cast_version(row.version))
        }
        Ok(None) => HotelRepositoryError::not_found(id),
        Err(err) => err,
    }
}

#[async_trait]
impl HotelRepository for DieselHotelRepository {
    async fn insert(&self, hotel: &Hotel) -> Result<(), HotelRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let new_row = NewHotelRow {
            id: hotel.id,
            name: &hotel.name,
            location: &hotel.location,
            commission: hotel.commission,
            is_active: hotel.is_active,
            owner_id: hotel.owner_id,
            version: cast_version_for_db(hotel.version),
        };

        diesel::insert_into(hotels::table)
            .values(&new_row)
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(|err| map_diesel_error(err, "insert hotel"))
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Hotel>, HotelRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: Option<HotelRow> = hotels::table
            .find(id)
            .select(HotelRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(|err| map_diesel_error(err, "find hotel"))?;

        Ok(row.map(row_to_hotel))
    }

    async fn list(&self) -> Result<Vec<Hotel>, HotelRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<HotelRow> = hotels::table
            .select(HotelRow::as_select())
            .order_by(hotels::name.asc())
            .load(&mut conn)
            .await
            .map_err(|err| map_diesel_error(err, "list hotels"))?;

        Ok(rows.into_iter().map(row_to_hotel).collect())
    }

    async fn list_by_owner(&self, owner_id: Uuid) -> Result<Vec<Hotel>, HotelRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<HotelRow> = hotels::table
            .filter(hotels::owner_id.eq(owner_id))
            .select(HotelRow::as_select())
            .order_by(hotels::name.asc())
            .load(&mut conn)
            .await
            .map_err(|err| map_diesel_error(err, "list hotels by owner"))?;

        Ok(rows.into_iter().map(row_to_hotel).collect())
    }

    async fn list_by_location(&self, location: &str) -> Result<Vec<Hotel>, HotelRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        // ILIKE with the pattern wrapped in wildcards gives the
        // case-insensitive substring match the search endpoint promises.
        let pattern = format!("%{}%", location.replace('%', "\\%").replace('_', "\\_"));
        let rows: Vec<HotelRow> = hotels::table
            .filter(hotels::location.ilike(pattern))
            .select(HotelRow::as_select())
            .order_by(hotels::name.asc())
            .load(&mut conn)
            .await
            .map_err(|err| map_diesel_error(err, "list hotels by location"))?;

        Ok(rows.into_iter().map(row_to_hotel).collect())
    }

    async fn update(
        &self,
        hotel: &Hotel,
        expected_version: u32,
    ) -> Result<(), HotelRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let update = HotelUpdate {
            name: &hotel.name,
            location: &hotel.location,
            commission: hotel.commission,
            is_active: hotel.is_active,
            version: cast_version_for_db(hotel.version),
        };

        let updated_rows = diesel::update(hotels::table)
            .filter(
                hotels::id
                    .eq(hotel.id)
                    .and(hotels::version.eq(cast_version_for_db(expected_version))),
            )
            .set(&update)
            .execute(&mut conn)
            .await
            .map_err(|err| map_diesel_error(err, "update hotel"))?;

        if updated_rows == 0 {
            return Err(classify_update_failure(&mut conn, hotel.id, expected_version).await);
        }
        Ok(())
    }

    async fn delete(&self, id: Uuid) -> Result<(), HotelRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let deleted = diesel::delete(hotels::table.find(id))
            .execute(&mut conn)
            .await
            .map_err(|err| {
                if is_foreign_key_violation(&err) {
                    HotelRepositoryError::rooms_attached(id)
                } else {
                    map_diesel_error(err, "delete hotel")
                }
            })?;

        if deleted == 0 {
            return Err(HotelRepositoryError::not_found(id));
        }
        Ok(())
    }
}
