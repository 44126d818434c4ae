//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match the database migrations exactly; Diesel uses
//! them for compile-time query validation and type-safe SQL generation. When
//! a migration changes the schema, update this file to match (or regenerate
//! it with `diesel print-schema`).

diesel::table! {
    /// Registered users.
    users (id) {
        id -> Uuid,
        first_name -> Varchar,
        last_name -> Varchar,
        /// Unique contact address, also the notification recipient.
        email -> Varchar,
        password -> Varchar,
        gender -> Varchar,
        role -> Varchar,
        document_type -> Varchar,
        document_number -> Varchar,
        phone -> Varchar,
        /// Optimistic concurrency version, starts at 1.
        version -> Int4,
    }
}

diesel::table! {
    /// Hotels available for booking.
    hotels (id) {
        id -> Uuid,
        name -> Varchar,
        location -> Varchar,
        commission -> Float8,
        is_active -> Bool,
        owner_id -> Uuid,
        version -> Int4,
    }
}

diesel::table! {
    /// Rooms, each belonging to one hotel.
    rooms (id) {
        id -> Uuid,
        kind -> Varchar,
        base_cost -> Float8,
        taxes -> Float8,
        location -> Varchar,
        capacity -> Int4,
        is_active -> Bool,
        hotel_id -> Uuid,
        version -> Int4,
    }
}

diesel::table! {
    /// Reservation contacts, owned one-to-one by reservations.
    contacts (id) {
        id -> Uuid,
        first_name -> Varchar,
        last_name -> Varchar,
        email -> Varchar,
        phone -> Varchar,
    }
}

diesel::table! {
    /// Reservations linking a user to a room for a date range.
    reservations (id) {
        id -> Uuid,
        total_cost -> Float8,
        is_active -> Bool,
        guest_count -> Int4,
        contact_id -> Uuid,
        user_id -> Uuid,
        room_id -> Uuid,
        reserved_at -> Timestamptz,
        check_in -> Timestamptz,
        check_out -> Timestamptz,
        version -> Int4,
    }
}

diesel::joinable!(rooms -> hotels (hotel_id));
diesel::joinable!(hotels -> users (owner_id));
diesel::joinable!(reservations -> contacts (contact_id));
diesel::joinable!(reservations -> rooms (room_id));
diesel::joinable!(reservations -> users (user_id));

diesel::allow_tables_to_appear_in_same_query!(users, hotels, rooms, contacts, reservations);
