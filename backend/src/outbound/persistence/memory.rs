//! In-memory repository adapters.
//!
//! Back the repository ports with mutex-guarded maps for development mode and
//! integration tests. The adapters follow the same optimistic concurrency
//! contract as the Diesel implementations: a zero-effect versioned write is
//! classified as not-found when the record is gone and as a version conflict
//! otherwise.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::ports::{
    HotelRepository, HotelRepositoryError, ReservationRepository, ReservationRepositoryError,
    RoomRepository, RoomRepositoryError, UserRepository, UserRepositoryError,
};
use crate::domain::{Hotel, Reservation, Room, User};

/// Shared in-memory store backing all four repository adapters.
///
/// Cloning is cheap and every clone observes the same data, so one store can
/// serve the whole application.
#[derive(Clone, Default)]
pub struct MemoryStore {
    inner: Arc<Mutex<Tables>>,
}

#[derive(Default)]
struct Tables {
    hotels: HashMap<Uuid, Hotel>,
    rooms: HashMap<Uuid, Room>,
    users: HashMap<Uuid, User>,
    reservations: HashMap<Uuid, Reservation>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Tables> {
        // A poisoned lock means a writer panicked; the data is plain maps, so
        // carry on with whatever state it left behind.
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

/// In-memory implementation of the `HotelRepository` port.
#[derive(Clone)]
pub struct MemoryHotelRepository {
    store: MemoryStore,
}

impl MemoryHotelRepository {
    pub fn new(store: MemoryStore) -> Self {
        Self { store }
    }
}

#[async_trait]
impl HotelRepository for MemoryHotelRepository {
    async fn insert(&self, hotel: &Hotel) -> Result<(), HotelRepositoryError> {
        self.store.lock().hotels.insert(hotel.id, hotel.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Hotel>, HotelRepositoryError> {
        Ok(self.store.lock().hotels.get(&id).cloned())
    }

    async fn list(&self) -> Result<Vec<Hotel>, HotelRepositoryError> {
        let mut hotels: Vec<Hotel> = self.store.lock().hotels.values().cloned().collect();
        hotels.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(hotels)
    }

    async fn list_by_owner(&self, owner_id: Uuid) -> Result<Vec<Hotel>, HotelRepositoryError> {
        let mut hotels: Vec<Hotel> = self
            .store
            .lock()
            .hotels
            .values()
            .filter(|hotel| hotel.owner_id == owner_id)
            .cloned()
            .collect();
        hotels.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(hotels)
    }

    async fn list_by_location(&self, location: &str) -> Result<Vec<Hotel>, HotelRepositoryError> {
        let needle = location.to_lowercase();
        let mut hotels: Vec<Hotel> = self
            .store
            .lock()
            .hotels
            .values()
            .filter(|hotel| hotel.location.to_lowercase().contains(&needle))
            .cloned()
            .collect();
        hotels.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(hotels)
    }

    async fn update(
        &self,
        hotel: &Hotel,
        expected_version: u32,
    ) -> Result<(), HotelRepositoryError> {
        let mut tables = self.store.lock();
        match tables.hotels.get_mut(&hotel.id) {
            Some(stored) if stored.version == expected_version => {
                *stored = hotel.clone();
                Ok(())
            }
            Some(stored) => Err(HotelRepositoryError::version_conflict(
                hotel.id,
                expected_version,
                stored.version,
            )),
            None => Err(HotelRepositoryError::not_found(hotel.id)),
        }
    }

    async fn delete(&self, id: Uuid) -> Result<(), HotelRepositoryError> {
        let mut tables = self.store.lock();
        if tables.rooms.values().any(|room| room.hotel_id == id) {
            return Err(HotelRepositoryError::rooms_attached(id));
        }
        tables
            .hotels
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| HotelRepositoryError::not_found(id))
    }
}

/// In-memory implementation of the `RoomRepository` port.
#[derive(Clone)]
pub struct MemoryRoomRepository {
    store: MemoryStore,
}

impl MemoryRoomRepository {
    pub fn new(store: MemoryStore) -> Self {
        Self { store }
    }
}

#[async_trait]
impl RoomRepository for MemoryRoomRepository {
    async fn insert(&self, room: &Room) -> Result<(), RoomRepositoryError> {
        self.store.lock().rooms.insert(room.id, room.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Room>, RoomRepositoryError> {
        Ok(self.store.lock().rooms.get(&id).cloned())
    }

    async fn list_by_hotel(&self, hotel_id: Uuid) -> Result<Vec<Room>, RoomRepositoryError> {
        let mut rooms: Vec<Room> = self
            .store
            .lock()
            .rooms
            .values()
            .filter(|room| room.hotel_id == hotel_id)
            .cloned()
            .collect();
        rooms.sort_by(|a, b| a.kind.cmp(&b.kind));
        Ok(rooms)
    }

    async fn update(&self, room: &Room, expected_version: u32) -> Result<(), RoomRepositoryError> {
        let mut tables = self.store.lock();
        match tables.rooms.get_mut(&room.id) {
            Some(stored) if stored.version == expected_version => {
                *stored = room.clone();
                Ok(())
            }
            Some(stored) => Err(RoomRepositoryError::version_conflict(
                room.id,
                expected_version,
                stored.version,
            )),
            None => Err(RoomRepositoryError::not_found(room.id)),
        }
    }

    async fn delete(&self, id: Uuid) -> Result<(), RoomRepositoryError> {
        self.store
            .lock()
            .rooms
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| RoomRepositoryError::not_found(id))
    }
}

/// In-memory implementation of the `UserRepository` port.
#[derive(Clone)]
pub struct MemoryUserRepository {
    store: MemoryStore,
}

impl MemoryUserRepository {
    pub fn new(store: MemoryStore) -> Self {
        Self { store }
    }
}

#[async_trait]
impl UserRepository for MemoryUserRepository {
    async fn insert(&self, user: &User) -> Result<(), UserRepositoryError> {
        let mut tables = self.store.lock();
        if tables.users.values().any(|stored| stored.email == user.email) {
            return Err(UserRepositoryError::duplicate_email(&user.email));
        }
        tables.users.insert(user.id, user.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, UserRepositoryError> {
        Ok(self.store.lock().users.get(&id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, UserRepositoryError> {
        Ok(self
            .store
            .lock()
            .users
            .values()
            .find(|user| user.email == email)
            .cloned())
    }

    async fn list(&self) -> Result<Vec<User>, UserRepositoryError> {
        let mut users: Vec<User> = self.store.lock().users.values().cloned().collect();
        users.sort_by(|a, b| a.last_name.cmp(&b.last_name));
        Ok(users)
    }

    async fn update(&self, user: &User, expected_version: u32) -> Result<(), UserRepositoryError> {
        let mut tables = self.store.lock();
        if tables
            .users
            .values()
            .any(|stored| stored.id != user.id && stored.email == user.email)
        {
            return Err(UserRepositoryError::duplicate_email(&user.email));
        }
        match tables.users.get_mut(&user.id) {
            Some(stored) if stored.version == expected_version => {
                *stored = user.clone();
                Ok(())
            }
            Some(stored) => Err(UserRepositoryError::version_conflict(
                user.id,
                expected_version,
                stored.version,
            )),
            None => Err(UserRepositoryError::not_found(user.id)),
        }
    }

    async fn delete(&self, id: Uuid) -> Result<(), UserRepositoryError> {
        self.store
            .lock()
            .users
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| UserRepositoryError::not_found(id))
    }
}

/// In-memory implementation of the `ReservationRepository` port.
#[derive(Clone)]
pub struct MemoryReservationRepository {
    store: MemoryStore,
}

impl MemoryReservationRepository {
    pub fn new(store: MemoryStore) -> Self {
        Self { store }
    }
}

#[async_trait]
impl ReservationRepository for MemoryReservationRepository {
    async fn insert(
        &self,
        reservation: &Reservation,
    ) -> Result<(), ReservationRepositoryError> {
        self.store
            .lock()
            .reservations
            .insert(reservation.id, reservation.clone());
        Ok(())
    }

    async fn find_by_id(
        &self,
        id: Uuid,
    ) -> Result<Option<Reservation>, ReservationRepositoryError> {
        Ok(self.store.lock().reservations.get(&id).cloned())
    }

    async fn list(&self) -> Result<Vec<Reservation>, ReservationRepositoryError> {
        let mut reservations: Vec<Reservation> =
            self.store.lock().reservations.values().cloned().collect();
        reservations.sort_by(|a, b| b.reserved_at.cmp(&a.reserved_at));
        Ok(reservations)
    }

    async fn list_by_hotel(
        &self,
        hotel_id: Uuid,
    ) -> Result<Vec<Reservation>, ReservationRepositoryError> {
        let tables = self.store.lock();
        let mut reservations: Vec<Reservation> = tables
            .reservations
            .values()
            .filter(|reservation| {
                tables
                    .rooms
                    .get(&reservation.room_id)
                    .is_some_and(|room| room.hotel_id == hotel_id)
            })
            .cloned()
            .collect();
        reservations.sort_by(|a, b| b.reserved_at.cmp(&a.reserved_at));
        Ok(reservations)
    }

    async fn list_by_user(
        &self,
        user_id: Uuid,
    ) -> Result<Vec<Reservation>, ReservationRepositoryError> {
        let mut reservations: Vec<Reservation> = self
            .store
            .lock()
            .reservations
            .values()
            .filter(|reservation| reservation.user_id == user_id)
            .cloned()
            .collect();
        reservations.sort_by(|a, b| b.reserved_at.cmp(&a.reserved_at));
        Ok(reservations)
    }

    async fn update(
        &self,
        reservation: &Reservation,
        expected_version: u32,
    ) -> Result<(), ReservationRepositoryError> {
        let mut tables = self.store.lock();
        match tables.reservations.get_mut(&reservation.id) {
            Some(stored) if stored.version == expected_version => {
                *stored = reservation.clone();
                Ok(())
            }
            Some(stored) => Err(ReservationRepositoryError::version_conflict(
                reservation.id,
                expected_version,
                stored.version,
            )),
            None => Err(ReservationRepositoryError::not_found(reservation.id)),
        }
    }

    async fn delete(&self, id: Uuid) -> Result<(), ReservationRepositoryError> {
        self.store
            .lock()
            .reservations
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| ReservationRepositoryError::not_found(id))
    }
}
