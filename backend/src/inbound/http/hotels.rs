//! Hotels API handlers.
//!
//! ```text
//! GET    /api/v1/hotels
//! GET    /api/v1/hotels/{id}
//! GET    /api/v1/hotels/owned-by/{owner_id}
//! GET    /api/v1/hotels/locations/{location}
//! POST   /api/v1/hotels
//! PUT    /api/v1/hotels/{id}
//! DELETE /api/v1/hotels/{id}
//! ```

use actix_web::{HttpResponse, delete, get, post, put, web};
use serde::{Deserialize, Serialize};
use serde_json::json;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::{DomainError, Hotel, HotelValidationError};
use crate::inbound::http::ApiResult;
use crate::inbound::http::state::HttpState;

/// Request body for `POST /api/v1/hotels`.
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateHotelBody {
    pub name: String,
    pub location: String,
    pub commission: f64,
    /// Must reference an existing user.
    pub owner_id: Uuid,
}

/// Request body for `PUT /api/v1/hotels/{id}`.
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateHotelBody {
    pub name: String,
    pub location: String,
    pub commission: f64,
    pub is_active: bool,
    /// The version the client read; a stale value yields `409 Conflict`.
    pub expected_version: u32,
}

fn map_hotel_validation_error(error: HotelValidationError) -> DomainError {
    let code = match error {
        HotelValidationError::EmptyName => "empty_name",
        HotelValidationError::EmptyLocation => "empty_location",
        HotelValidationError::NegativeCommission { .. } => "negative_commission",
    };
    DomainError::invalid_request(error.to_string()).with_details(json!({ "code": code }))
}

/// List all hotels.
#[utoipa::path(
    get,
    path = "/api/v1/hotels",
    responses(
        (status = 200, description = "Hotels", body = [Hotel]),
        (status = 500, description = "Internal server error", body = DomainError)
    ),
    tags = ["hotels"],
    operation_id = "listHotels"
)]
#[get("/hotels")]
pub async fn list_hotels(state: web::Data<HttpState>) -> ApiResult<web::Json<Vec<Hotel>>> {
    let hotels = state.hotels.list().await?;
    Ok(web::Json(hotels))
}

/// Fetch one hotel.
#[utoipa::path(
    get,
    path = "/api/v1/hotels/{id}",
    params(("id" = Uuid, Path, description = "Hotel identifier")),
    responses(
        (status = 200, description = "Hotel", body = Hotel),
        (status = 404, description = "Not found", body = DomainError),
        (status = 500, description = "Internal server error", body = DomainError)
    ),
    tags = ["hotels"],
    operation_id = "getHotel"
)]
#[get("/hotels/{id}")]
pub async fn get_hotel(
    state: web::Data<HttpState>,
    path: web::Path<Uuid>,
) -> ApiResult<web::Json<Hotel>> {
    let id = path.into_inner();
    let hotel = state
        .hotels
        .find_by_id(id)
        .await?
        .ok_or_else(|| DomainError::not_found(format!("hotel {id} not found")))?;
    Ok(web::Json(hotel))
}

/// List the hotels registered by one owner.
#[utoipa::path(
    get,
    path = "/api/v1/hotels/owned-by/{owner_id}",
    params(("owner_id" = Uuid, Path, description = "Owner identifier")),
    responses(
        (status = 200, description = "Hotels", body = [Hotel]),
        (status = 500, description = "Internal server error", body = DomainError)
    ),
    tags = ["hotels"],
    operation_id = "listHotelsByOwner"
)]
#[get("/hotels/owned-by/{owner_id}")]
pub async fn list_hotels_by_owner(
    state: web::Data<HttpState>,
    path: web::Path<Uuid>,
) -> ApiResult<web::Json<Vec<Hotel>>> {
    let hotels = state.hotels.list_by_owner(path.into_inner()).await?;
    Ok(web::Json(hotels))
}

/// List hotels whose location contains the given text, case-insensitively.
#[utoipa::path(
    get,
    path = "/api/v1/hotels/locations/{location}",
    params(("location" = String, Path, description = "Location substring")),
    responses(
        (status = 200, description = "Hotels", body = [Hotel]),
        (status = 500, description = "Internal server error", body = DomainError)
    ),
    tags = ["hotels"],
    operation_id = "listHotelsByLocation"
)]
#[get("/hotels/locations/{location}")]
pub async fn list_hotels_by_location(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<Vec<Hotel>>> {
    let hotels = state.hotels.list_by_location(&path.into_inner()).await?;
    Ok(web::Json(hotels))
}

/// Register a hotel.
#[utoipa::path(
    post,
    path = "/api/v1/hotels",
    request_body = CreateHotelBody,
    responses(
        (status = 201, description = "Hotel created", body = Hotel),
        (status = 400, description = "Invalid request", body = DomainError),
        (status = 500, description = "Internal server error", body = DomainError)
    ),
    tags = ["hotels"],
    operation_id = "createHotel"
)]
#[post("/hotels")]
pub async fn create_hotel(
    state: web::Data<HttpState>,
    payload: web::Json<CreateHotelBody>,
) -> ApiResult<HttpResponse> {
    let body = payload.into_inner();
    state
        .users
        .find_by_id(body.owner_id)
        .await?
        .ok_or_else(|| {
            DomainError::invalid_request(format!("user {} does not exist", body.owner_id))
                .with_details(json!({ "code": "user_missing", "id": body.owner_id }))
        })?;
    let hotel = Hotel::try_new(
        Uuid::new_v4(),
        body.name,
        body.location,
        body.commission,
        body.owner_id,
    )
    .map_err(map_hotel_validation_error)?;
    state.hotels.insert(&hotel).await?;
    Ok(HttpResponse::Created().json(hotel))
}

/// Update a hotel.
#[utoipa::path(
    put,
    path = "/api/v1/hotels/{id}",
    params(("id" = Uuid, Path, description = "Hotel identifier")),
    request_body = UpdateHotelBody,
    responses(
        (status = 200, description = "Hotel updated", body = Hotel),
        (status = 400, description = "Invalid request", body = DomainError),
        (status = 404, description = "Not found", body = DomainError),
        (status = 409, description = "Concurrent modification", body = DomainError),
        (status = 500, description = "Internal server error", body = DomainError)
    ),
    tags = ["hotels"],
    operation_id = "updateHotel"
)]
#[put("/hotels/{id}")]
pub async fn update_hotel(
    state: web::Data<HttpState>,
    path: web::Path<Uuid>,
    payload: web::Json<UpdateHotelBody>,
) -> ApiResult<web::Json<Hotel>> {
    let id = path.into_inner();
    let body = payload.into_inner();
    let mut hotel = state
        .hotels
        .find_by_id(id)
        .await?
        .ok_or_else(|| DomainError::not_found(format!("hotel {id} not found")))?;
    hotel.name = body.name;
    hotel.location = body.location;
    hotel.commission = body.commission;
    hotel.is_active = body.is_active;
    hotel.ensure_valid().map_err(map_hotel_validation_error)?;
    hotel.version = body.expected_version + 1;
    state.hotels.update(&hotel, body.expected_version).await?;
    Ok(web::Json(hotel))
}

/// Delete a hotel. Refused while rooms remain attached.
#[utoipa::path(
    delete,
    path = "/api/v1/hotels/{id}",
    params(("id" = Uuid, Path, description = "Hotel identifier")),
    responses(
        (status = 204, description = "Hotel deleted"),
        (status = 404, description = "Not found", body = DomainError),
        (status = 409, description = "Rooms still attached", body = DomainError),
        (status = 500, description = "Internal server error", body = DomainError)
    ),
    tags = ["hotels"],
    operation_id = "deleteHotel"
)]
#[delete("/hotels/{id}")]
pub async fn delete_hotel(
    state: web::Data<HttpState>,
    path: web::Path<Uuid>,
) -> ApiResult<HttpResponse> {
    state.hotels.delete(path.into_inner()).await?;
    Ok(HttpResponse::NoContent().finish())
}
