//! Persistence adapters implementing the repository ports.
//!
//! PostgreSQL adapters use the Diesel ORM with async support through
//! `diesel-async` and `bb8` connection pooling. They are thin: each one only
//! translates between Diesel row structs and domain types and maps database
//! errors to the port's typed errors. Business logic lives in the domain.
//!
//! The in-memory adapters in [`memory`] share the same port contracts and
//! back development mode and integration tests.
//!
//! # Example
//!
//! ```ignore
//! use backend::outbound::persistence::{DbPool, DieselHotelRepository, PoolConfig};
//!
//! let pool = DbPool::new(PoolConfig::new("postgres://localhost/roomly")).await?;
//! let hotels = DieselHotelRepository::new(pool);
//! ```

pub(crate) mod diesel_helpers;
mod diesel_hotel_repository;
mod diesel_reservation_repository;
mod diesel_room_repository;
mod diesel_user_repository;
mod memory;
mod models;
mod pool;
mod schema;

pub use diesel_hotel_repository::DieselHotelRepository;
pub use diesel_reservation_repository::DieselReservationRepository;
pub use diesel_room_repository::DieselRoomRepository;
pub use diesel_user_repository::DieselUserRepository;
pub use memory::{
    MemoryHotelRepository, MemoryReservationRepository, MemoryRoomRepository, MemoryStore,
    MemoryUserRepository,
};
pub use pool::{DbPool, PoolConfig, PoolError};
