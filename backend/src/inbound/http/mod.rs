//! HTTP inbound adapter exposing REST endpoints.

pub mod error;
pub mod health;
pub mod hotels;
pub mod reservations;
pub mod rooms;
pub mod state;
pub mod users;

pub use error::ApiResult;
