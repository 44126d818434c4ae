//! OpenAPI documentation configuration.
//!
//! Defines the [`ApiDoc`] struct that generates the OpenAPI specification for
//! the REST API: every HTTP endpoint from the inbound layer plus the domain
//! and request body schemas they reference. The generated specification backs
//! Swagger UI in debug builds.

use utoipa::OpenApi;

use crate::domain::ports::{NotificationOutcome, ReservationView};
use crate::domain::{Contact, DomainError, ErrorCode, Hotel, Reservation, Room, User, UserProfile};
use crate::inbound::http::hotels::{CreateHotelBody, UpdateHotelBody};
use crate::inbound::http::reservations::{
    ContactBody, CreateReservationBody, CreatedReservationBody, UpdateReservationBody,
};
use crate::inbound::http::rooms::{CreateRoomBody, UpdateRoomBody};
use crate::inbound::http::users::{RegisterUserBody, UpdateUserBody};

/// OpenAPI document for the REST API.
/// Swagger UI is enabled in debug builds only and used by tooling.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Roomly booking API",
        description = "HTTP interface for hotels, rooms, users, and reservations."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::reservations::list_reservations,
        crate::inbound::http::reservations::get_reservation,
        crate::inbound::http::reservations::create_reservation,
        crate::inbound::http::reservations::update_reservation,
        crate::inbound::http::reservations::delete_reservation,
        crate::inbound::http::reservations::list_hotel_reservations,
        crate::inbound::http::reservations::list_user_reservations,
        crate::inbound::http::hotels::list_hotels,
        crate::inbound::http::hotels::get_hotel,
        crate::inbound::http::hotels::list_hotels_by_owner,
        crate::inbound::http::hotels::list_hotels_by_location,
        crate::inbound::http::hotels::create_hotel,
        crate::inbound::http::hotels::update_hotel,
        crate::inbound::http::hotels::delete_hotel,
        crate::inbound::http::rooms::get_room,
        crate::inbound::http::rooms::list_hotel_rooms,
        crate::inbound::http::rooms::create_room,
        crate::inbound::http::rooms::update_room,
        crate::inbound::http::rooms::delete_room,
        crate::inbound::http::users::list_users,
        crate::inbound::http::users::get_user,
        crate::inbound::http::users::get_user_by_email,
        crate::inbound::http::users::register_user,
        crate::inbound::http::users::update_user,
        crate::inbound::http::users::delete_user,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        DomainError,
        ErrorCode,
        Hotel,
        Room,
        User,
        UserProfile,
        Reservation,
        Contact,
        ReservationView,
        NotificationOutcome,
        ContactBody,
        CreateReservationBody,
        CreatedReservationBody,
        UpdateReservationBody,
        CreateHotelBody,
        UpdateHotelBody,
        CreateRoomBody,
        UpdateRoomBody,
        RegisterUserBody,
        UpdateUserBody,
    )),
    tags(
        (name = "reservations", description = "Reservation lifecycle operations"),
        (name = "hotels", description = "Hotel catalogue operations"),
        (name = "rooms", description = "Room catalogue operations"),
        (name = "users", description = "User registration and lookup"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn document_references_every_tag() {
        let doc = ApiDoc::openapi();
        let tags: Vec<String> = doc
            .tags
            .unwrap_or_default()
            .into_iter()
            .map(|tag| tag.name)
            .collect();
        for expected in ["reservations", "hotels", "rooms", "users", "health"] {
            assert!(tags.iter().any(|tag| tag == expected), "missing {expected}");
        }
    }

    #[test]
    fn reservation_paths_are_registered() {
        let doc = ApiDoc::openapi();
        let paths = doc.paths.paths;
        assert!(paths.contains_key("/api/v1/reservations"));
        assert!(paths.contains_key("/api/v1/reservations/{id}"));
        assert!(paths.contains_key("/api/v1/hotels/{id}/reservations"));
        assert!(paths.contains_key("/api/v1/users/{id}/reservations"));
    }

    #[test]
    fn error_schema_is_registered() {
        let doc = ApiDoc::openapi();
        let schemas = &doc.components.expect("components").schemas;
        assert!(schemas.contains_key("DomainError"));
        assert!(schemas.contains_key("ErrorCode"));
    }

    #[test]
    fn reservation_body_schemas_are_registered() {
        let doc = ApiDoc::openapi();
        let schemas = &doc.components.expect("components").schemas;
        assert!(schemas.contains_key("CreateReservationBody"));
        assert!(schemas.contains_key("UpdateReservationBody"));
        assert!(schemas.contains_key("CreatedReservationBody"));
        assert!(schemas.contains_key("ReservationView"));
        assert!(schemas.contains_key("NotificationOutcome"));
    }
}
