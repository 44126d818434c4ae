//! Rooms API handlers.
//!
//! ```text
//! GET    /api/v1/rooms/{id}
//! GET    /api/v1/hotels/{id}/rooms
//! POST   /api/v1/rooms
//! PUT    /api/v1/rooms/{id}
//! DELETE /api/v1/rooms/{id}
//! ```

use actix_web::{HttpResponse, delete, get, post, put, web};
use serde::{Deserialize, Serialize};
use serde_json::json;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::{DomainError, Room, RoomValidationError};
use crate::inbound::http::ApiResult;
use crate::inbound::http::state::HttpState;

/// Request body for `POST /api/v1/rooms`.
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateRoomBody {
    /// Room type label, e.g. "Double".
    pub kind: String,
    pub base_cost: f64,
    pub taxes: f64,
    pub location: String,
    pub capacity: u32,
    /// Must reference an existing hotel.
    pub hotel_id: Uuid,
}

/// Request body for `PUT /api/v1/rooms/{id}`.
///
/// Rooms are replaced as a whole; every field is written.
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateRoomBody {
    pub kind: String,
    pub base_cost: f64,
    pub taxes: f64,
    pub location: String,
    pub capacity: u32,
    pub is_active: bool,
    /// The version the client read; a stale value yields `409 Conflict`.
    pub expected_version: u32,
}

fn map_room_validation_error(error: RoomValidationError) -> DomainError {
    let code = match error {
        RoomValidationError::EmptyKind => "empty_kind",
        RoomValidationError::NegativeBaseCost { .. } => "negative_base_cost",
        RoomValidationError::NegativeTaxes { .. } => "negative_taxes",
        RoomValidationError::ZeroCapacity => "zero_capacity",
    };
    DomainError::invalid_request(error.to_string()).with_details(json!({ "code": code }))
}

/// Fetch one room.
#[utoipa::path(
    get,
    path = "/api/v1/rooms/{id}",
    params(("id" = Uuid, Path, description = "Room identifier")),
    responses(
        (status = 200, description = "Room", body = Room),
        (status = 404, description = "Not found", body = DomainError),
        (status = 500, description = "Internal server error", body = DomainError)
    ),
    tags = ["rooms"],
    operation_id = "getRoom"
)]
#[get("/rooms/{id}")]
pub async fn get_room(
    state: web::Data<HttpState>,
    path: web::Path<Uuid>,
) -> ApiResult<web::Json<Room>> {
    let id = path.into_inner();
    let room = state
        .rooms
        .find_by_id(id)
        .await?
        .ok_or_else(|| DomainError::not_found(format!("room {id} not found")))?;
    Ok(web::Json(room))
}

/// List the rooms of one hotel.
#[utoipa::path(
    get,
    path = "/api/v1/hotels/{id}/rooms",
    params(("id" = Uuid, Path, description = "Hotel identifier")),
    responses(
        (status = 200, description = "Rooms", body = [Room]),
        (status = 404, description = "Hotel not found", body = DomainError),
        (status = 500, description = "Internal server error", body = DomainError)
    ),
    tags = ["rooms"],
    operation_id = "listHotelRooms"
)]
#[get("/hotels/{id}/rooms")]
pub async fn list_hotel_rooms(
    state: web::Data<HttpState>,
    path: web::Path<Uuid>,
) -> ApiResult<web::Json<Vec<Room>>> {
    let hotel_id = path.into_inner();
    state
        .hotels
        .find_by_id(hotel_id)
        .await?
        .ok_or_else(|| DomainError::not_found(format!("hotel {hotel_id} not found")))?;
    let rooms = state.rooms.list_by_hotel(hotel_id).await?;
    Ok(web::Json(rooms))
}

/// Add a room to a hotel.
#[utoipa::path(
    post,
    path = "/api/v1/rooms",
    request_body = CreateRoomBody,
    responses(
        (status = 201, description = "Room created", body = Room),
        (status = 400, description = "Invalid request", body = DomainError),
        (status = 500, description = "Internal server error", body = DomainError)
    ),
    tags = ["rooms"],
    operation_id = "createRoom"
)]
#[post("/rooms")]
pub async fn create_room(
    state: web::Data<HttpState>,
    payload: web::Json<CreateRoomBody>,
) -> ApiResult<HttpResponse> {
    let body = payload.into_inner();
    state
        .hotels
        .find_by_id(body.hotel_id)
        .await?
        .ok_or_else(|| {
            DomainError::invalid_request(format!("hotel {} does not exist", body.hotel_id))
                .with_details(json!({ "code": "hotel_missing", "id": body.hotel_id }))
        })?;
    let room = Room::try_new(
        Uuid::new_v4(),
        body.kind,
        body.base_cost,
        body.taxes,
        body.location,
        body.capacity,
        body.hotel_id,
    )
    .map_err(map_room_validation_error)?;
    state.rooms.insert(&room).await?;
    Ok(HttpResponse::Created().json(room))
}

/// Replace a room's fields.
#[utoipa::path(
    put,
    path = "/api/v1/rooms/{id}",
    params(("id" = Uuid, Path, description = "Room identifier")),
    request_body = UpdateRoomBody,
    responses(
        (status = 200, description = "Room updated", body = Room),
        (status = 400, description = "Invalid request", body = DomainError),
        (status = 404, description = "Not found", body = DomainError),
        (status = 409, description = "Concurrent modification", body = DomainError),
        (status = 500, description = "Internal server error", body = DomainError)
    ),
    tags = ["rooms"],
    operation_id = "updateRoom"
)]
#[put("/rooms/{id}")]
pub async fn update_room(
    state: web::Data<HttpState>,
    path: web::Path<Uuid>,
    payload: web::Json<UpdateRoomBody>,
) -> ApiResult<web::Json<Room>> {
    let id = path.into_inner();
    let body = payload.into_inner();
    let mut room = state
        .rooms
        .find_by_id(id)
        .await?
        .ok_or_else(|| DomainError::not_found(format!("room {id} not found")))?;
    room.kind = body.kind;
    room.base_cost = body.base_cost;
    room.taxes = body.taxes;
    room.location = body.location;
    room.capacity = body.capacity;
    room.is_active = body.is_active;
    room.ensure_valid().map_err(map_room_validation_error)?;
    room.version = body.expected_version + 1;
    state.rooms.update(&room, body.expected_version).await?;
    Ok(web::Json(room))
}

/// Delete a room.
#[utoipa::path(
    delete,
    path = "/api/v1/rooms/{id}",
    params(("id" = Uuid, Path, description = "Room identifier")),
    responses(
        (status = 204, description = "Room deleted"),
        (status = 404, description = "Not found", body = DomainError),
        (status = 500, description = "Internal server error", body = DomainError)
    ),
    tags = ["rooms"],
    operation_id = "deleteRoom"
)]
#[delete("/rooms/{id}")]
pub async fn delete_room(
    state: web::Data<HttpState>,
    path: web::Path<Uuid>,
) -> ApiResult<HttpResponse> {
    state.rooms.delete(path.into_inner()).await?;
    Ok(HttpResponse::NoContent().finish())
}
