//! Reservations API handlers.
//!
//! ```text
//! GET    /api/v1/reservations
//! GET    /api/v1/reservations/{id}
//! POST   /api/v1/reservations
//! PUT    /api/v1/reservations/{id}
//! DELETE /api/v1/reservations/{id}
//! GET    /api/v1/hotels/{id}/reservations
//! GET    /api/v1/users/{id}/reservations
//! ```

use actix_web::{HttpResponse, delete, get, post, put, web};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::ports::{
    CreateReservationRequest, NotificationOutcome, ReservationView, UpdateReservationRequest,
};
use crate::domain::{ContactDraft, ContactUpdate, DomainError, Reservation};
use crate::inbound::http::ApiResult;
use crate::inbound::http::state::HttpState;

/// Contact fields for `POST /api/v1/reservations`.
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ContactBody {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
}

impl From<ContactBody> for ContactDraft {
    fn from(value: ContactBody) -> Self {
        Self {
            first_name: value.first_name,
            last_name: value.last_name,
            email: value.email,
            phone: value.phone,
        }
    }
}

/// Request body for `POST /api/v1/reservations`.
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateReservationBody {
    pub total_cost: f64,
    pub guest_count: u32,
    pub contact: ContactBody,
    pub user_id: Uuid,
    pub room_id: Uuid,
    /// When the booking was placed. Stamped with the server's current time
    /// when omitted.
    #[serde(default)]
    pub reserved_at: Option<DateTime<Utc>>,
    pub check_in: DateTime<Utc>,
    pub check_out: DateTime<Utc>,
}

impl From<CreateReservationBody> for CreateReservationRequest {
    fn from(value: CreateReservationBody) -> Self {
        Self {
            total_cost: value.total_cost,
            guest_count: value.guest_count,
            contact: value.contact.into(),
            user_id: value.user_id,
            room_id: value.room_id,
            reserved_at: value.reserved_at,
            check_in: value.check_in,
            check_out: value.check_out,
        }
    }
}

/// Response body for a successful creation.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreatedReservationBody {
    pub reservation: Reservation,
    pub notification: NotificationOutcome,
}

/// Request body for `PUT /api/v1/reservations/{id}`.
///
/// Contact fields are optional and only the present ones are overwritten;
/// there is no phone field. The stay window and room are always written.
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateReservationBody {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub room_id: Uuid,
    pub check_in: DateTime<Utc>,
    pub check_out: DateTime<Utc>,
    /// The version the client read; a stale value yields `409 Conflict`.
    pub expected_version: u32,
}

/// List all reservations, resolved against their users and rooms.
#[utoipa::path(
    get,
    path = "/api/v1/reservations",
    responses(
        (status = 200, description = "Reservations", body = [ReservationView]),
        (status = 500, description = "Internal server error", body = DomainError)
    ),
    tags = ["reservations"],
    operation_id = "listReservations"
)]
#[get("/reservations")]
pub async fn list_reservations(
    state: web::Data<HttpState>,
) -> ApiResult<web::Json<Vec<ReservationView>>> {
    let views = state.booking_query.list().await?;
    Ok(web::Json(views))
}

/// Fetch one reservation.
#[utoipa::path(
    get,
    path = "/api/v1/reservations/{id}",
    params(("id" = Uuid, Path, description = "Reservation identifier")),
    responses(
        (status = 200, description = "Reservation", body = ReservationView),
        (status = 404, description = "Not found", body = DomainError),
        (status = 500, description = "Internal server error", body = DomainError)
    ),
    tags = ["reservations"],
    operation_id = "getReservation"
)]
#[get("/reservations/{id}")]
pub async fn get_reservation(
    state: web::Data<HttpState>,
    path: web::Path<Uuid>,
) -> ApiResult<web::Json<ReservationView>> {
    let view = state.booking_query.get(path.into_inner()).await?;
    Ok(web::Json(view))
}

/// Create a reservation.
///
/// The confirmation email is sent after the booking commits; a delivery
/// failure is reported in the `notification` field of the 201 response and
/// never fails the request.
#[utoipa::path(
    post,
    path = "/api/v1/reservations",
    request_body = CreateReservationBody,
    responses(
        (status = 201, description = "Reservation created", body = CreatedReservationBody),
        (status = 400, description = "Invalid request", body = DomainError),
        (status = 404, description = "Room or user not found", body = DomainError),
        (status = 500, description = "Internal server error", body = DomainError)
    ),
    tags = ["reservations"],
    operation_id = "createReservation"
)]
#[post("/reservations")]
pub async fn create_reservation(
    state: web::Data<HttpState>,
    payload: web::Json<CreateReservationBody>,
) -> ApiResult<HttpResponse> {
    let response = state.booking.create(payload.into_inner().into()).await?;
    Ok(HttpResponse::Created().json(CreatedReservationBody {
        reservation: response.reservation,
        notification: response.notification,
    }))
}

/// Update a reservation.
#[utoipa::path(
    put,
    path = "/api/v1/reservations/{id}",
    params(("id" = Uuid, Path, description = "Reservation identifier")),
    request_body = UpdateReservationBody,
    responses(
        (status = 200, description = "Reservation updated", body = Reservation),
        (status = 400, description = "Invalid request", body = DomainError),
        (status = 404, description = "Reservation or room not found", body = DomainError),
        (status = 409, description = "Concurrent modification", body = DomainError),
        (status = 500, description = "Internal server error", body = DomainError)
    ),
    tags = ["reservations"],
    operation_id = "updateReservation"
)]
#[put("/reservations/{id}")]
pub async fn update_reservation(
    state: web::Data<HttpState>,
    path: web::Path<Uuid>,
    payload: web::Json<UpdateReservationBody>,
) -> ApiResult<web::Json<Reservation>> {
    let body = payload.into_inner();
    let request = UpdateReservationRequest {
        id: path.into_inner(),
        contact: ContactUpdate {
            first_name: body.first_name,
            last_name: body.last_name,
            email: body.email,
        },
        room_id: body.room_id,
        check_in: body.check_in,
        check_out: body.check_out,
        expected_version: body.expected_version,
    };
    let reservation = state.booking.update(request).await?;
    Ok(web::Json(reservation))
}

/// Delete a reservation and its contact.
#[utoipa::path(
    delete,
    path = "/api/v1/reservations/{id}",
    params(("id" = Uuid, Path, description = "Reservation identifier")),
    responses(
        (status = 204, description = "Reservation deleted"),
        (status = 404, description = "Not found", body = DomainError),
        (status = 500, description = "Internal server error", body = DomainError)
    ),
    tags = ["reservations"],
    operation_id = "deleteReservation"
)]
#[delete("/reservations/{id}")]
pub async fn delete_reservation(
    state: web::Data<HttpState>,
    path: web::Path<Uuid>,
) -> ApiResult<HttpResponse> {
    state.booking.delete(path.into_inner()).await?;
    Ok(HttpResponse::NoContent().finish())
}

/// List the reservations held against one hotel's rooms.
#[utoipa::path(
    get,
    path = "/api/v1/hotels/{id}/reservations",
    params(("id" = Uuid, Path, description = "Hotel identifier")),
    responses(
        (status = 200, description = "Reservations", body = [ReservationView]),
        (status = 404, description = "Hotel not found", body = DomainError),
        (status = 500, description = "Internal server error", body = DomainError)
    ),
    tags = ["reservations"],
    operation_id = "listHotelReservations"
)]
#[get("/hotels/{id}/reservations")]
pub async fn list_hotel_reservations(
    state: web::Data<HttpState>,
    path: web::Path<Uuid>,
) -> ApiResult<web::Json<Vec<ReservationView>>> {
    let views = state.booking_query.list_by_hotel(path.into_inner()).await?;
    Ok(web::Json(views))
}

/// List the reservations placed by one user.
#[utoipa::path(
    get,
    path = "/api/v1/users/{id}/reservations",
    params(("id" = Uuid, Path, description = "User identifier")),
    responses(
        (status = 200, description = "Reservations", body = [ReservationView]),
        (status = 404, description = "User not found", body = DomainError),
        (status = 500, description = "Internal server error", body = DomainError)
    ),
    tags = ["reservations"],
    operation_id = "listUserReservations"
)]
#[get("/users/{id}/reservations")]
pub async fn list_user_reservations(
    state: web::Data<HttpState>,
    path: web::Path<Uuid>,
) -> ApiResult<web::Json<Vec<ReservationView>>> {
    let views = state.booking_query.list_by_user(path.into_inner()).await?;
    Ok(web::Json(views))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use actix_web::{App, test as actix_test};
    use chrono::TimeZone;
    use serde_json::Value;

    use crate::domain::ports::{
        CreateReservationResponse, FixtureBookingCommand, FixtureBookingQuery,
        FixtureHotelRepository, FixtureRoomRepository, FixtureUserRepository, MockBookingCommand,
    };

    fn fixture_state() -> HttpState {
        HttpState::new(
            Arc::new(FixtureBookingCommand),
            Arc::new(FixtureBookingQuery),
            Arc::new(FixtureHotelRepository),
            Arc::new(FixtureRoomRepository),
            Arc::new(FixtureUserRepository),
        )
    }

    fn test_app(
        state: HttpState,
    ) -> App<
        impl actix_web::dev::ServiceFactory<
            actix_web::dev::ServiceRequest,
            Config = (),
            Response = actix_web::dev::ServiceResponse,
            Error = actix_web::Error,
            InitError = (),
        >,
    > {
        App::new().app_data(web::Data::new(state)).service(
            web::scope("/api/v1")
                .service(list_reservations)
                .service(get_reservation)
                .service(create_reservation)
                .service(update_reservation)
                .service(delete_reservation)
                .service(list_hotel_reservations)
                .service(list_user_reservations),
        )
    }

    fn create_body() -> CreateReservationBody {
        CreateReservationBody {
            total_cost: 556.0,
            guest_count: 2,
            contact: ContactBody {
                first_name: "Ada".into(),
                last_name: "Lovelace".into(),
                email: "ada@example.com".into(),
                phone: "+44 20 7946 0000".into(),
            },
            user_id: Uuid::new_v4(),
            room_id: Uuid::new_v4(),
            reserved_at: None,
            check_in: Utc
                .with_ymd_and_hms(2026, 9, 10, 14, 0, 0)
                .single()
                .expect("valid"),
            check_out: Utc
                .with_ymd_and_hms(2026, 9, 14, 11, 0, 0)
                .single()
                .expect("valid"),
        }
    }

    #[actix_web::test]
    async fn list_returns_an_empty_array() {
        let app = actix_test::init_service(test_app(fixture_state())).await;
        let response = actix_test::call_service(
            &app,
            actix_test::TestRequest::get()
                .uri("/api/v1/reservations")
                .to_request(),
        )
        .await;
        assert!(response.status().is_success());
        let body: Value =
            serde_json::from_slice(&actix_test::read_body(response).await).expect("json");
        assert_eq!(body, serde_json::json!([]));
    }

    #[actix_web::test]
    async fn get_unknown_reservation_is_404_with_error_schema() {
        let app = actix_test::init_service(test_app(fixture_state())).await;
        let response = actix_test::call_service(
            &app,
            actix_test::TestRequest::get()
                .uri(&format!("/api/v1/reservations/{}", Uuid::new_v4()))
                .to_request(),
        )
        .await;
        assert_eq!(response.status(), actix_web::http::StatusCode::NOT_FOUND);
        let body: Value =
            serde_json::from_slice(&actix_test::read_body(response).await).expect("json");
        assert_eq!(body.get("code").and_then(Value::as_str), Some("not_found"));
        assert!(body.get("message").is_some());
    }

    #[actix_web::test]
    async fn create_returns_201_with_the_notification_outcome() {
        let mut booking = MockBookingCommand::new();
        booking.expect_create().returning(|request| {
            let reservation = Reservation::try_new(
                Uuid::new_v4(),
                request.total_cost,
                request.guest_count,
                request.contact.build().expect("valid contact"),
                request.user_id,
                request.room_id,
                request.reserved_at.unwrap_or_else(Utc::now),
                request.check_in,
                request.check_out,
            )
            .expect("valid reservation");
            Ok(CreateReservationResponse {
                reservation,
                notification: NotificationOutcome::Sent,
            })
        });
        let state = HttpState::new(
            Arc::new(booking),
            Arc::new(FixtureBookingQuery),
            Arc::new(FixtureHotelRepository),
            Arc::new(FixtureRoomRepository),
            Arc::new(FixtureUserRepository),
        );
        let app = actix_test::init_service(test_app(state)).await;
        let response = actix_test::call_service(
            &app,
            actix_test::TestRequest::post()
                .uri("/api/v1/reservations")
                .set_json(create_body())
                .to_request(),
        )
        .await;
        assert_eq!(response.status(), actix_web::http::StatusCode::CREATED);
        let body: Value =
            serde_json::from_slice(&actix_test::read_body(response).await).expect("json");
        assert_eq!(body["notification"]["status"], "sent");
        assert_eq!(body["reservation"]["guestCount"], 2);
        assert_eq!(body["reservation"]["version"], 1);
    }

    #[actix_web::test]
    async fn create_reports_a_failed_notification_alongside_the_booking() {
        let mut booking = MockBookingCommand::new();
        booking.expect_create().returning(|request| {
            let reservation = Reservation::try_new(
                Uuid::new_v4(),
                request.total_cost,
                request.guest_count,
                request.contact.build().expect("valid contact"),
                request.user_id,
                request.room_id,
                request.reserved_at.unwrap_or_else(Utc::now),
                request.check_in,
                request.check_out,
            )
            .expect("valid reservation");
            Ok(CreateReservationResponse {
                reservation,
                notification: NotificationOutcome::Failed {
                    reason: "relay refused connection".into(),
                },
            })
        });
        let state = HttpState::new(
            Arc::new(booking),
            Arc::new(FixtureBookingQuery),
            Arc::new(FixtureHotelRepository),
            Arc::new(FixtureRoomRepository),
            Arc::new(FixtureUserRepository),
        );
        let app = actix_test::init_service(test_app(state)).await;
        let response = actix_test::call_service(
            &app,
            actix_test::TestRequest::post()
                .uri("/api/v1/reservations")
                .set_json(create_body())
                .to_request(),
        )
        .await;
        assert_eq!(response.status(), actix_web::http::StatusCode::CREATED);
        let body: Value =
            serde_json::from_slice(&actix_test::read_body(response).await).expect("json");
        assert_eq!(body["notification"]["status"], "failed");
        assert_eq!(body["notification"]["reason"], "relay refused connection");
    }

    #[actix_web::test]
    async fn create_keeps_the_reservation_date_from_the_body() {
        let mut booking = MockBookingCommand::new();
        booking.expect_create().returning(|request| {
            let reservation = Reservation::try_new(
                Uuid::new_v4(),
                request.total_cost,
                request.guest_count,
                request.contact.build().expect("valid contact"),
                request.user_id,
                request.room_id,
                request.reserved_at.unwrap_or_else(Utc::now),
                request.check_in,
                request.check_out,
            )
            .expect("valid reservation");
            Ok(CreateReservationResponse {
                reservation,
                notification: NotificationOutcome::Sent,
            })
        });
        let state = HttpState::new(
            Arc::new(booking),
            Arc::new(FixtureBookingQuery),
            Arc::new(FixtureHotelRepository),
            Arc::new(FixtureRoomRepository),
            Arc::new(FixtureUserRepository),
        );
        let app = actix_test::init_service(test_app(state)).await;
        let reserved_at = Utc
            .with_ymd_and_hms(2026, 8, 30, 9, 30, 0)
            .single()
            .expect("valid");
        let mut payload = create_body();
        payload.reserved_at = Some(reserved_at);
        let response = actix_test::call_service(
            &app,
            actix_test::TestRequest::post()
                .uri("/api/v1/reservations")
                .set_json(payload)
                .to_request(),
        )
        .await;
        assert_eq!(response.status(), actix_web::http::StatusCode::CREATED);
        let body: Value =
            serde_json::from_slice(&actix_test::read_body(response).await).expect("json");
        assert_eq!(
            body["reservation"]["reservedAt"],
            serde_json::to_value(reserved_at).expect("timestamp")
        );
    }

    #[actix_web::test]
    async fn update_conflict_surfaces_as_409() {
        let mut booking = MockBookingCommand::new();
        booking.expect_update().returning(|request| {
            Err(
                DomainError::conflict("reservation was modified concurrently").with_details(
                    serde_json::json!({
                        "code": "version_conflict",
                        "entity": "reservation",
                        "id": request.id,
                    }),
                ),
            )
        });
        let state = HttpState::new(
            Arc::new(booking),
            Arc::new(FixtureBookingQuery),
            Arc::new(FixtureHotelRepository),
            Arc::new(FixtureRoomRepository),
            Arc::new(FixtureUserRepository),
        );
        let app = actix_test::init_service(test_app(state)).await;
        let body = UpdateReservationBody {
            first_name: None,
            last_name: None,
            email: Some("countess@example.com".into()),
            room_id: Uuid::new_v4(),
            check_in: Utc::now(),
            check_out: Utc::now(),
            expected_version: 1,
        };
        let response = actix_test::call_service(
            &app,
            actix_test::TestRequest::put()
                .uri(&format!("/api/v1/reservations/{}", Uuid::new_v4()))
                .set_json(body)
                .to_request(),
        )
        .await;
        assert_eq!(response.status(), actix_web::http::StatusCode::CONFLICT);
        let body: Value =
            serde_json::from_slice(&actix_test::read_body(response).await).expect("json");
        assert_eq!(body["details"]["code"], "version_conflict");
    }

    #[actix_web::test]
    async fn delete_unknown_reservation_is_404() {
        let app = actix_test::init_service(test_app(fixture_state())).await;
        let response = actix_test::call_service(
            &app,
            actix_test::TestRequest::delete()
                .uri(&format!("/api/v1/reservations/{}", Uuid::new_v4()))
                .to_request(),
        )
        .await;
        assert_eq!(response.status(), actix_web::http::StatusCode::NOT_FOUND);
    }

    #[actix_web::test]
    async fn internal_errors_are_redacted_in_the_response() {
        // The fixture command fails creation with an internal error.
        let app = actix_test::init_service(test_app(fixture_state())).await;
        let response = actix_test::call_service(
            &app,
            actix_test::TestRequest::post()
                .uri("/api/v1/reservations")
                .set_json(create_body())
                .to_request(),
        )
        .await;
        assert_eq!(
            response.status(),
            actix_web::http::StatusCode::INTERNAL_SERVER_ERROR
        );
        let body: Value =
            serde_json::from_slice(&actix_test::read_body(response).await).expect("json");
        assert_eq!(
            body.get("message").and_then(Value::as_str),
            Some("Internal server error")
        );
    }
}
