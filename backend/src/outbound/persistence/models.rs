//! Internal Diesel row structs for database operations.
//!
//! These types are implementation details of the persistence layer and must
//! never be exposed to the domain. They exist solely to satisfy Diesel's
//! type requirements for queries and mutations.

use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use super::schema::{contacts, hotels, reservations, rooms, users};

// ---------------------------------------------------------------------------
// User models
// ---------------------------------------------------------------------------

/// Row struct for reading from the users table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct UserRow {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
    pub gender: String,
    pub role: String,
    pub document_type: String,
    pub document_number: String,
    pub phone: String,
    pub version: i32,
}

/// Insertable struct for creating new user records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = users)]
pub(crate) struct NewUserRow<'a> {
    pub id: Uuid,
    pub first_name: &'a str,
    pub last_name: &'a str,
    pub email: &'a str,
    pub password: &'a str,
    pub gender: &'a str,
    pub role: &'a str,
    pub document_type: &'a str,
    pub document_number: &'a str,
    pub phone: &'a str,
    pub version: i32,
}

/// Changeset struct for updating existing user records.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = users)]
pub(crate) struct UserUpdate<'a> {
    pub first_name: &'a str,
    pub last_name: &'a str,
    pub email: &'a str,
    pub password: &'a str,
    pub gender: &'a str,
    pub role: &'a str,
    pub document_type: &'a str,
    pub document_number: &'a str,
    pub phone: &'a str,
    pub version: i32,
}

// ---------------------------------------------------------------------------
// Hotel models
// ---------------------------------------------------------------------------

/// Row struct for reading from the hotels table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = hotels)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct HotelRow {
    pub id: Uuid,
    pub name: String,
    pub location: String,
    pub commission: f64,
    pub is_active: bool,
    pub owner_id: Uuid,
    pub version: i32,
}

/// Insertable struct for creating new hotel records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = hotels)]
pub(crate) struct NewHotelRow<'a> {
    pub id: Uuid,
    pub name: &'a str,
    pub location: &'a str,
    pub commission: f64,
    pub is_active: bool,
    pub owner_id: Uuid,
    pub version: i32,
}

/// Changeset struct for updating hotel records.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = hotels)]
pub(crate) struct HotelUpdate<'a> {
    pub name: &'a str,
    pub location: &'a str,
    pub commission: f64,
    pub is_active: bool,
    pub version: i32,
}

// ---------------------------------------------------------------------------
// Room models
// ---------------------------------------------------------------------------

/// Row struct for reading from the rooms table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = rooms)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct RoomRow {
    pub id: Uuid,
    pub kind: String,
    pub base_cost: f64,
    pub taxes: f64,
    pub location: String,
    pub capacity: i32,
    pub is_active: bool,
    pub hotel_id: Uuid,
    pub version: i32,
}

/// Insertable struct for creating new room records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = rooms)]
pub(crate) struct NewRoomRow<'a> {
    pub id: Uuid,
    pub kind: &'a str,
    pub base_cost: f64,
    pub taxes: f64,
    pub location: &'a str,
    pub capacity: i32,
    pub is_active: bool,
    pub hotel_id: Uuid,
    pub version: i32,
}

/// Changeset struct for updating room records.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = rooms)]
pub(crate) struct RoomUpdate<'a> {
    pub kind: &'a str,
    pub base_cost: f64,
    pub taxes: f64,
    pub location: &'a str,
    pub capacity: i32,
    pub is_active: bool,
    pub version: i32,
}

// ---------------------------------------------------------------------------
// Contact models
// ---------------------------------------------------------------------------

/// Row struct for reading from the contacts table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = contacts)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct ContactRow {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
}

/// Insertable struct for creating new contact records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = contacts)]
pub(crate) struct NewContactRow<'a> {
    pub id: Uuid,
    pub first_name: &'a str,
    pub last_name: &'a str,
    pub email: &'a str,
    pub phone: &'a str,
}

/// Changeset struct for updating contact records.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = contacts)]
pub(crate) struct ContactUpdateRow<'a> {
    pub first_name: &'a str,
    pub last_name: &'a str,
    pub email: &'a str,
    pub phone: &'a str,
}

// ---------------------------------------------------------------------------
// Reservation models
// ---------------------------------------------------------------------------

/// Row struct for reading from the reservations table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = reservations)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct ReservationRow {
    pub id: Uuid,
    pub total_cost: f64,
    pub is_active: bool,
    pub guest_count: i32,
    pub contact_id: Uuid,
    pub user_id: Uuid,
    pub room_id: Uuid,
    pub reserved_at: DateTime<Utc>,
    pub check_in: DateTime<Utc>,
    pub check_out: DateTime<Utc>,
    pub version: i32,
}

/// Insertable struct for creating new reservation records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = reservations)]
pub(crate) struct NewReservationRow {
    pub id: Uuid,
    pub total_cost: f64,
    pub is_active: bool,
    pub guest_count: i32,
    pub contact_id: Uuid,
    pub user_id: Uuid,
    pub room_id: Uuid,
    pub reserved_at: DateTime<Utc>,
    pub check_in: DateTime<Utc>,
    pub check_out: DateTime<Utc>,
    pub version: i32,
}

/// Changeset struct for updating reservation records.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = reservations)]
pub(crate) struct ReservationUpdate {
    pub total_cost: f64,
    pub is_active: bool,
    pub guest_count: i32,
    pub room_id: Uuid,
    pub check_in: DateTime<Utc>,
    pub check_out: DateTime<Utc>,
    pub version: i32,
}
