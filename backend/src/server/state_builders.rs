//! Builders assembling HTTP state from the configured adapters.

use std::sync::Arc;

use actix_web::web;

use crate::domain::BookingService;
use crate::domain::ports::{
    HotelRepository, NotificationDispatcher, ReservationRepository, RoomRepository, UserRepository,
};
use crate::inbound::http::state::HttpState;
use crate::outbound::email::{LoggingNotificationDispatcher, SmtpNotificationDispatcher};
use crate::outbound::persistence::{
    DieselHotelRepository, DieselReservationRepository, DieselRoomRepository, DieselUserRepository,
    MemoryHotelRepository, MemoryReservationRepository, MemoryRoomRepository, MemoryStore,
    MemoryUserRepository,
};

use super::ServerConfig;

/// Wire a booking service over concrete adapters and erase the port types.
fn assemble<H, R, U, S, N>(
    hotels: Arc<H>,
    rooms: Arc<R>,
    users: Arc<U>,
    reservations: Arc<S>,
    notifications: Arc<N>,
) -> HttpState
where
    H: HotelRepository + 'static,
    R: RoomRepository + 'static,
    U: UserRepository + 'static,
    S: ReservationRepository + 'static,
    N: NotificationDispatcher + 'static,
{
    let booking = Arc::new(BookingService::new(
        Arc::clone(&hotels),
        Arc::clone(&rooms),
        Arc::clone(&users),
        reservations,
        notifications,
    ));

    HttpState::new(
        Arc::clone(&booking) as _,
        booking as _,
        hotels,
        rooms,
        users,
    )
}

/// Pick the storage backend for the given dispatcher.
fn assemble_storage<N>(config: &ServerConfig, notifications: Arc<N>) -> HttpState
where
    N: NotificationDispatcher + 'static,
{
    match &config.db_pool {
        Some(pool) => assemble(
            Arc::new(DieselHotelRepository::new(pool.clone())),
            Arc::new(DieselRoomRepository::new(pool.clone())),
            Arc::new(DieselUserRepository::new(pool.clone())),
            Arc::new(DieselReservationRepository::new(pool.clone())),
            notifications,
        ),
        None => {
            let store = MemoryStore::new();
            assemble(
                Arc::new(MemoryHotelRepository::new(store.clone())),
                Arc::new(MemoryRoomRepository::new(store.clone())),
                Arc::new(MemoryUserRepository::new(store.clone())),
                Arc::new(MemoryReservationRepository::new(store)),
                notifications,
            )
        }
    }
}

/// Build the HTTP state from configuration.
///
/// With a database pool the state is backed by the Diesel repositories,
/// otherwise by shared in-memory maps. Confirmations go over SMTP when
/// configured and to the log when not.
///
/// # Errors
///
/// Returns [`std::io::Error`] when the SMTP relay settings are invalid.
pub fn build_http_state(config: &ServerConfig) -> std::io::Result<web::Data<HttpState>> {
    let state = match &config.smtp {
        Some(smtp) => {
            let dispatcher = SmtpNotificationDispatcher::new(smtp.clone())
                .map_err(|err| std::io::Error::other(format!("smtp configuration: {err}")))?;
            assemble_storage(config, Arc::new(dispatcher))
        }
        None => assemble_storage(config, Arc::new(LoggingNotificationDispatcher)),
    };

    Ok(web::Data::new(state))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn memory_state_serves_empty_listings() {
        let config = ServerConfig::new(([127, 0, 0, 1], 0).into());
        let state = build_http_state(&config).expect("state builds");
        let hotels = state.hotels.list().await.expect("list hotels");
        assert!(hotels.is_empty());
    }
}
