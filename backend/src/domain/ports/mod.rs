//! Domain ports and supporting types for the hexagonal boundary.

mod booking_command;
mod booking_query;
mod hotel_repository;
mod notification_dispatcher;
mod reservation_repository;
mod room_repository;
mod user_repository;

#[cfg(test)]
pub use booking_command::MockBookingCommand;
pub use booking_command::{
    BookingCommand, CreateReservationRequest, CreateReservationResponse, FixtureBookingCommand,
    NotificationOutcome, UpdateReservationRequest,
};
#[cfg(test)]
pub use booking_query::MockBookingQuery;
pub use booking_query::{BookingQuery, FixtureBookingQuery, ReservationView};
#[cfg(test)]
pub use hotel_repository::MockHotelRepository;
pub use hotel_repository::{FixtureHotelRepository, HotelRepository, HotelRepositoryError};
#[cfg(test)]
pub use notification_dispatcher::MockNotificationDispatcher;
pub use notification_dispatcher::{
    FixtureNotificationDispatcher, NotificationDispatcher, NotificationError,
};
#[cfg(test)]
pub use reservation_repository::MockReservationRepository;
pub use reservation_repository::{
    FixtureReservationRepository, ReservationRepository, ReservationRepositoryError,
};
#[cfg(test)]
pub use room_repository::MockRoomRepository;
pub use room_repository::{FixtureRoomRepository, RoomRepository, RoomRepositoryError};
#[cfg(test)]
pub use user_repository::MockUserRepository;
pub use user_repository::{FixtureUserRepository, UserRepository, UserRepositoryError};
