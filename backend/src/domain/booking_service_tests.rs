//! Behavioural coverage for the booking service.

use std::sync::Arc;

use chrono::{DateTime, TimeZone, Utc};
use uuid::Uuid;

use crate::domain::booking_service::BookingService;
use crate::domain::hotel::Hotel;
use crate::domain::ports::{
    BookingCommand, BookingQuery, CreateReservationRequest, MockHotelRepository,
    MockNotificationDispatcher, MockReservationRepository, MockRoomRepository, MockUserRepository,
    NotificationError, NotificationOutcome, ReservationRepositoryError, UpdateReservationRequest,
};
use crate::domain::reservation::{ContactDraft, ContactUpdate, Reservation};
use crate::domain::room::Room;
use crate::domain::user::{User, UserProfile};
use crate::domain::ErrorCode;

type TestService = BookingService<
    MockHotelRepository,
    MockRoomRepository,
    MockUserRepository,
    MockReservationRepository,
    MockNotificationDispatcher,
>;

struct Mocks {
    hotels: MockHotelRepository,
    rooms: MockRoomRepository,
    users: MockUserRepository,
    reservations: MockReservationRepository,
    notifications: MockNotificationDispatcher,
}

impl Mocks {
    fn new() -> Self {
        Self {
            hotels: MockHotelRepository::new(),
            rooms: MockRoomRepository::new(),
            users: MockUserRepository::new(),
            reservations: MockReservationRepository::new(),
            notifications: MockNotificationDispatcher::new(),
        }
    }

    fn into_service(self) -> TestService {
        BookingService::new(
            Arc::new(self.hotels),
            Arc::new(self.rooms),
            Arc::new(self.users),
            Arc::new(self.reservations),
            Arc::new(self.notifications),
        )
    }
}

fn hotel(id: Uuid) -> Hotel {
    Hotel::try_new(id, "Seaside Hotel", "Cartagena", 0.12, Uuid::new_v4()).expect("valid hotel")
}

fn room(id: Uuid, hotel_id: Uuid) -> Room {
    Room::try_new(id, "Double", 120.0, 19.0, "Floor 3, sea view", 2, hotel_id).expect("valid room")
}

fn user(id: Uuid) -> User {
    User::try_new(
        id,
        "Ada",
        "Lovelace",
        "ada@example.com",
        "s3cret",
        UserProfile {
            gender: "female".into(),
            role: "guest".into(),
            document_type: "passport".into(),
            document_number: "X1234567".into(),
            phone: "+44 20 7946 0000".into(),
        },
    )
    .expect("valid user")
}

fn stay() -> (DateTime<Utc>, DateTime<Utc>) {
    let check_in = Utc
        .with_ymd_and_hms(2026, 9, 10, 14, 0, 0)
        .single()
        .expect("valid");
    let check_out = Utc
        .with_ymd_and_hms(2026, 9, 14, 11, 0, 0)
        .single()
        .expect("valid");
    (check_in, check_out)
}

fn draft() -> ContactDraft {
    ContactDraft {
        first_name: "Ada".into(),
        last_name: "Lovelace".into(),
        email: "ada@example.com".into(),
        phone: "+44 20 7946 0000".into(),
    }
}

fn create_request(room_id: Uuid, user_id: Uuid) -> CreateReservationRequest {
    let (check_in, check_out) = stay();
    CreateReservationRequest {
        total_cost: 556.0,
        guest_count: 2,
        contact: draft(),
        user_id,
        room_id,
        reserved_at: None,
        check_in,
        check_out,
    }
}

fn stored_reservation(id: Uuid, room_id: Uuid, user_id: Uuid) -> Reservation {
    let (check_in, check_out) = stay();
    Reservation::try_new(
        id,
        556.0,
        2,
        draft().build().expect("valid contact"),
        user_id,
        room_id,
        Utc::now(),
        check_in,
        check_out,
    )
    .expect("valid reservation")
}

#[tokio::test]
async fn create_reports_a_missing_room_before_consulting_the_user() {
    let room_id = Uuid::new_v4();
    let mut mocks = Mocks::new();
    mocks.rooms.expect_find_by_id().returning(|_| Ok(None));
    // No expectations on the user repository: any lookup panics the mock.

    let service = mocks.into_service();
    let err = service
        .create(create_request(room_id, Uuid::new_v4()))
        .await
        .expect_err("missing room rejected");
    assert_eq!(err.code(), ErrorCode::NotFound);
    let details = err.details().expect("details");
    assert_eq!(details["code"], "room_missing");
    assert_eq!(details["id"], room_id.to_string());
}

#[tokio::test]
async fn create_reports_a_missing_user_once_the_room_resolves() {
    let hotel_id = Uuid::new_v4();
    let user_id = Uuid::new_v4();
    let mut mocks = Mocks::new();
    mocks
        .rooms
        .expect_find_by_id()
        .returning(move |id| Ok(Some(room(id, hotel_id))));
    mocks.users.expect_find_by_id().returning(|_| Ok(None));

    let service = mocks.into_service();
    let err = service
        .create(create_request(Uuid::new_v4(), user_id))
        .await
        .expect_err("missing user rejected");
    assert_eq!(err.code(), ErrorCode::NotFound);
    assert_eq!(err.details().expect("details")["code"], "user_missing");
}

#[tokio::test]
async fn create_persists_and_sends_the_confirmation() {
    let hotel_id = Uuid::new_v4();
    let mut mocks = Mocks::new();
    mocks
        .rooms
        .expect_find_by_id()
        .returning(move |id| Ok(Some(room(id, hotel_id))));
    mocks
        .users
        .expect_find_by_id()
        .returning(|id| Ok(Some(user(id))));
    mocks
        .reservations
        .expect_insert()
        .times(1)
        .returning(|_| Ok(()));
    mocks
        .hotels
        .expect_find_by_id()
        .returning(|id| Ok(Some(hotel(id))));
    mocks
        .notifications
        .expect_dispatch()
        .withf(|message| {
            message.recipient == "ada@example.com" && message.body.contains("Seaside Hotel")
        })
        .times(1)
        .returning(|_| Ok(()));

    let service = mocks.into_service();
    let response = service
        .create(create_request(Uuid::new_v4(), Uuid::new_v4()))
        .await
        .expect("create succeeds");
    assert_eq!(response.notification, NotificationOutcome::Sent);
    assert_eq!(response.reservation.version, 1);
    assert!(response.reservation.is_active);
}

#[tokio::test]
async fn create_keeps_a_caller_supplied_reservation_date() {
    let hotel_id = Uuid::new_v4();
    let reserved_at = Utc
        .with_ymd_and_hms(2026, 8, 30, 9, 30, 0)
        .single()
        .expect("valid");
    let mut mocks = Mocks::new();
    mocks
        .rooms
        .expect_find_by_id()
        .returning(move |id| Ok(Some(room(id, hotel_id))));
    mocks
        .users
        .expect_find_by_id()
        .returning(|id| Ok(Some(user(id))));
    mocks
        .reservations
        .expect_insert()
        .withf(move |reservation| reservation.reserved_at == reserved_at)
        .times(1)
        .returning(|_| Ok(()));
    mocks
        .hotels
        .expect_find_by_id()
        .returning(|id| Ok(Some(hotel(id))));
    mocks.notifications.expect_dispatch().returning(|_| Ok(()));

    let service = mocks.into_service();
    let mut request = create_request(Uuid::new_v4(), Uuid::new_v4());
    request.reserved_at = Some(reserved_at);
    let response = service.create(request).await.expect("create succeeds");
    assert_eq!(response.reservation.reserved_at, reserved_at);
}

#[tokio::test]
async fn confirmation_subject_carries_the_new_reservation_id() {
    let hotel_id = Uuid::new_v4();
    let (sender, receiver) = std::sync::mpsc::channel::<String>();
    let mut mocks = Mocks::new();
    mocks
        .rooms
        .expect_find_by_id()
        .returning(move |id| Ok(Some(room(id, hotel_id))));
    mocks
        .users
        .expect_find_by_id()
        .returning(|id| Ok(Some(user(id))));
    mocks.reservations.expect_insert().returning(|_| Ok(()));
    mocks
        .hotels
        .expect_find_by_id()
        .returning(|id| Ok(Some(hotel(id))));
    mocks.notifications.expect_dispatch().returning(move |message| {
        sender.send(message.subject.clone()).expect("send subject");
        Ok(())
    });

    let service = mocks.into_service();
    let response = service
        .create(create_request(Uuid::new_v4(), Uuid::new_v4()))
        .await
        .expect("create succeeds");
    let subject = receiver.recv().expect("subject captured");
    assert!(subject.contains(&response.reservation.id.to_string()));
}

#[tokio::test]
async fn failed_delivery_does_not_unwind_the_booking() {
    let hotel_id = Uuid::new_v4();
    let mut mocks = Mocks::new();
    mocks
        .rooms
        .expect_find_by_id()
        .returning(move |id| Ok(Some(room(id, hotel_id))));
    mocks
        .users
        .expect_find_by_id()
        .returning(|id| Ok(Some(user(id))));
    mocks
        .reservations
        .expect_insert()
        .times(1)
        .returning(|_| Ok(()));
    mocks
        .hotels
        .expect_find_by_id()
        .returning(|id| Ok(Some(hotel(id))));
    mocks
        .notifications
        .expect_dispatch()
        .returning(|_| Err(NotificationError::delivery("relay refused connection")));

    let service = mocks.into_service();
    let response = service
        .create(create_request(Uuid::new_v4(), Uuid::new_v4()))
        .await
        .expect("create still succeeds");
    match response.notification {
        NotificationOutcome::Failed { reason } => {
            assert!(reason.contains("relay refused connection"));
        }
        NotificationOutcome::Sent => panic!("delivery failure must be reported"),
    }
}

#[tokio::test]
async fn create_rejects_an_inverted_date_range_before_persisting() {
    let hotel_id = Uuid::new_v4();
    let mut mocks = Mocks::new();
    mocks
        .rooms
        .expect_find_by_id()
        .returning(move |id| Ok(Some(room(id, hotel_id))));
    mocks
        .users
        .expect_find_by_id()
        .returning(|id| Ok(Some(user(id))));
    mocks.reservations.expect_insert().times(0);

    let service = mocks.into_service();
    let mut request = create_request(Uuid::new_v4(), Uuid::new_v4());
    std::mem::swap(&mut request.check_in, &mut request.check_out);
    let err = service.create(request).await.expect_err("range rejected");
    assert_eq!(err.code(), ErrorCode::InvalidRequest);
    assert_eq!(err.details().expect("details")["code"], "invalid_date_range");
}

#[tokio::test]
async fn update_on_a_missing_reservation_is_not_found() {
    let mut mocks = Mocks::new();
    mocks
        .reservations
        .expect_find_by_id()
        .returning(|_| Ok(None));

    let service = mocks.into_service();
    let (check_in, check_out) = stay();
    let err = service
        .update(UpdateReservationRequest {
            id: Uuid::new_v4(),
            contact: ContactUpdate::default(),
            room_id: Uuid::new_v4(),
            check_in,
            check_out,
            expected_version: 1,
        })
        .await
        .expect_err("missing reservation rejected");
    assert_eq!(err.code(), ErrorCode::NotFound);
}

#[tokio::test]
async fn update_overwrites_named_contact_fields_and_keeps_the_rest() {
    let reservation_id = Uuid::new_v4();
    let room_id = Uuid::new_v4();
    let user_id = Uuid::new_v4();
    let hotel_id = Uuid::new_v4();
    let mut mocks = Mocks::new();
    mocks
        .reservations
        .expect_find_by_id()
        .returning(move |id| Ok(Some(stored_reservation(id, room_id, user_id))));
    mocks
        .rooms
        .expect_find_by_id()
        .returning(move |id| Ok(Some(room(id, hotel_id))));
    // The booking user is deliberately not re-validated on update.
    mocks
        .reservations
        .expect_update()
        .withf(|reservation, expected| {
            reservation.contact.email == "countess@example.com"
                && reservation.contact.first_name == "Ada"
                && reservation.contact.last_name == "Lovelace"
                && reservation.contact.phone == "+44 20 7946 0000"
                && reservation.version == 2
                && *expected == 1
        })
        .times(1)
        .returning(|_, _| Ok(()));

    let service = mocks.into_service();
    let (check_in, check_out) = stay();
    let updated = service
        .update(UpdateReservationRequest {
            id: reservation_id,
            contact: ContactUpdate {
                email: Some("countess@example.com".into()),
                ..ContactUpdate::default()
            },
            room_id,
            check_in,
            check_out,
            expected_version: 1,
        })
        .await
        .expect("update succeeds");
    assert_eq!(updated.version, 2);
    assert_eq!(updated.contact.email, "countess@example.com");
}

#[tokio::test]
async fn update_rejects_a_dangling_room_reference() {
    let room_id = Uuid::new_v4();
    let user_id = Uuid::new_v4();
    let mut mocks = Mocks::new();
    mocks
        .reservations
        .expect_find_by_id()
        .returning(move |id| Ok(Some(stored_reservation(id, room_id, user_id))));
    mocks.rooms.expect_find_by_id().returning(|_| Ok(None));
    mocks.reservations.expect_update().times(0);

    let service = mocks.into_service();
    let (check_in, check_out) = stay();
    let err = service
        .update(UpdateReservationRequest {
            id: Uuid::new_v4(),
            contact: ContactUpdate::default(),
            room_id: Uuid::new_v4(),
            check_in,
            check_out,
            expected_version: 1,
        })
        .await
        .expect_err("dangling room rejected");
    assert_eq!(err.code(), ErrorCode::NotFound);
    assert_eq!(err.details().expect("details")["code"], "room_missing");
}

#[tokio::test]
async fn update_maps_a_version_conflict_without_retrying() {
    let room_id = Uuid::new_v4();
    let user_id = Uuid::new_v4();
    let hotel_id = Uuid::new_v4();
    let mut mocks = Mocks::new();
    mocks
        .reservations
        .expect_find_by_id()
        .returning(move |id| Ok(Some(stored_reservation(id, room_id, user_id))));
    mocks
        .rooms
        .expect_find_by_id()
        .returning(move |id| Ok(Some(room(id, hotel_id))));
    mocks
        .reservations
        .expect_update()
        .times(1)
        .returning(|reservation, expected| {
            Err(ReservationRepositoryError::version_conflict(
                reservation.id,
                expected,
                expected + 1,
            ))
        });

    let service = mocks.into_service();
    let (check_in, check_out) = stay();
    let err = service
        .update(UpdateReservationRequest {
            id: Uuid::new_v4(),
            contact: ContactUpdate::default(),
            room_id,
            check_in,
            check_out,
            expected_version: 1,
        })
        .await
        .expect_err("conflict surfaces");
    assert_eq!(err.code(), ErrorCode::Conflict);
    let details = err.details().expect("details");
    assert_eq!(details["code"], "version_conflict");
    assert_eq!(details["entity"], "reservation");
}

#[tokio::test]
async fn update_racing_a_concurrent_delete_resolves_to_not_found() {
    let room_id = Uuid::new_v4();
    let user_id = Uuid::new_v4();
    let hotel_id = Uuid::new_v4();
    let mut mocks = Mocks::new();
    mocks
        .reservations
        .expect_find_by_id()
        .returning(move |id| Ok(Some(stored_reservation(id, room_id, user_id))));
    mocks
        .rooms
        .expect_find_by_id()
        .returning(move |id| Ok(Some(room(id, hotel_id))));
    mocks
        .reservations
        .expect_update()
        .times(1)
        .returning(|reservation, _| Err(ReservationRepositoryError::not_found(reservation.id)));

    let service = mocks.into_service();
    let (check_in, check_out) = stay();
    let err = service
        .update(UpdateReservationRequest {
            id: Uuid::new_v4(),
            contact: ContactUpdate::default(),
            room_id,
            check_in,
            check_out,
            expected_version: 1,
        })
        .await
        .expect_err("delete wins");
    assert_eq!(err.code(), ErrorCode::NotFound);
}

#[tokio::test]
async fn delete_on_a_missing_reservation_is_not_found() {
    let mut mocks = Mocks::new();
    mocks
        .reservations
        .expect_delete()
        .returning(|id| Err(ReservationRepositoryError::not_found(id)));

    let service = mocks.into_service();
    let err = service
        .delete(Uuid::new_v4())
        .await
        .expect_err("missing reservation rejected");
    assert_eq!(err.code(), ErrorCode::NotFound);
}

#[tokio::test]
async fn get_joins_the_user_and_room_into_the_view() {
    let room_id = Uuid::new_v4();
    let user_id = Uuid::new_v4();
    let hotel_id = Uuid::new_v4();
    let mut mocks = Mocks::new();
    mocks
        .reservations
        .expect_find_by_id()
        .returning(move |id| Ok(Some(stored_reservation(id, room_id, user_id))));
    mocks
        .users
        .expect_find_by_id()
        .returning(|id| Ok(Some(user(id))));
    mocks
        .rooms
        .expect_find_by_id()
        .returning(move |id| Ok(Some(room(id, hotel_id))));

    let service = mocks.into_service();
    let id = Uuid::new_v4();
    let view = service.get(id).await.expect("view resolves");
    assert_eq!(view.reservation.id, id);
    assert_eq!(view.user.id, user_id);
    assert_eq!(view.room.id, room_id);
}

#[tokio::test]
async fn get_on_a_missing_reservation_is_not_found() {
    let mut mocks = Mocks::new();
    mocks
        .reservations
        .expect_find_by_id()
        .returning(|_| Ok(None));

    let service = mocks.into_service();
    let err = service.get(Uuid::new_v4()).await.expect_err("missing");
    assert_eq!(err.code(), ErrorCode::NotFound);
}

#[tokio::test]
async fn list_by_hotel_requires_the_hotel_to_exist() {
    let mut mocks = Mocks::new();
    mocks.hotels.expect_find_by_id().returning(|_| Ok(None));

    let service = mocks.into_service();
    let err = service
        .list_by_hotel(Uuid::new_v4())
        .await
        .expect_err("missing hotel rejected");
    assert_eq!(err.code(), ErrorCode::NotFound);
}

#[tokio::test]
async fn list_by_hotel_with_no_bookings_is_an_empty_list() {
    let mut mocks = Mocks::new();
    mocks
        .hotels
        .expect_find_by_id()
        .returning(|id| Ok(Some(hotel(id))));
    mocks
        .reservations
        .expect_list_by_hotel()
        .returning(|_| Ok(Vec::new()));

    let service = mocks.into_service();
    let views = service
        .list_by_hotel(Uuid::new_v4())
        .await
        .expect("empty listing is valid");
    assert!(views.is_empty());
}

#[tokio::test]
async fn list_by_user_requires_the_user_to_exist() {
    let mut mocks = Mocks::new();
    mocks.users.expect_find_by_id().returning(|_| Ok(None));

    let service = mocks.into_service();
    let err = service
        .list_by_user(Uuid::new_v4())
        .await
        .expect_err("missing user rejected");
    assert_eq!(err.code(), ErrorCode::NotFound);
}
