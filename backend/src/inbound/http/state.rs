//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports and remain testable without I/O. Reservation
//! endpoints drive the booking service through its command/query ports;
//! the thin hotel, room, and user CRUD endpoints talk to the repository
//! ports directly.

use std::sync::Arc;

use crate::domain::ports::{
    BookingCommand, BookingQuery, HotelRepository, RoomRepository, UserRepository,
};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub booking: Arc<dyn BookingCommand>,
    pub booking_query: Arc<dyn BookingQuery>,
    pub hotels: Arc<dyn HotelRepository>,
    pub rooms: Arc<dyn RoomRepository>,
    pub users: Arc<dyn UserRepository>,
}

impl HttpState {
    /// Construct state from port implementations.
    ///
    /// # Examples
    /// ```no_run
    /// use std::sync::Arc;
    ///
    /// use backend::domain::ports::{
    ///     FixtureBookingCommand, FixtureBookingQuery, FixtureHotelRepository,
    ///     FixtureRoomRepository, FixtureUserRepository,
    /// };
    /// use backend::inbound::http::state::HttpState;
    ///
    /// let state = HttpState::new(
    ///     Arc::new(FixtureBookingCommand),
    ///     Arc::new(FixtureBookingQuery),
    ///     Arc::new(FixtureHotelRepository),
    ///     Arc::new(FixtureRoomRepository),
    ///     Arc::new(FixtureUserRepository),
    /// );
    /// let _booking = state.booking.clone();
    /// ```
    pub fn new(
        booking: Arc<dyn BookingCommand>,
        booking_query: Arc<dyn BookingQuery>,
        hotels: Arc<dyn HotelRepository>,
        rooms: Arc<dyn RoomRepository>,
        users: Arc<dyn UserRepository>,
    ) -> Self {
        Self {
            booking,
            booking_query,
            hotels,
            rooms,
            users,
        }
    }
}
