//! Users API handlers.
//!
//! ```text
//! GET    /api/v1/users
//! GET    /api/v1/users/{id}
//! GET    /api/v1/users/by-email?email=...
//! POST   /api/v1/users
//! PUT    /api/v1/users/{id}
//! DELETE /api/v1/users/{id}
//! ```

use actix_web::{HttpResponse, delete, get, post, put, web};
use serde::{Deserialize, Serialize};
use serde_json::json;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::{DomainError, User, UserProfile, UserValidationError};
use crate::inbound::http::ApiResult;
use crate::inbound::http::state::HttpState;

/// Request body for `POST /api/v1/users`.
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RegisterUserBody {
    pub first_name: String,
    pub last_name: String,
    /// Must be unique; a taken address yields `409 Conflict`.
    pub email: String,
    pub password: String,
    pub profile: UserProfile,
}

/// Request body for `PUT /api/v1/users/{id}`.
///
/// Absent fields keep their stored value.
#[derive(Debug, Clone, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUserBody {
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
    #[serde(default)]
    pub profile: Option<UserProfile>,
    /// The version the client read; a stale value yields `409 Conflict`.
    pub expected_version: u32,
}

/// Query parameters for `GET /api/v1/users/by-email`.
#[derive(Debug, Deserialize)]
pub struct EmailQuery {
    pub email: String,
}

fn map_user_validation_error(error: UserValidationError) -> DomainError {
    let code = match error {
        UserValidationError::EmptyFirstName => "empty_first_name",
        UserValidationError::EmptyLastName => "empty_last_name",
        UserValidationError::InvalidEmail => "invalid_email",
    };
    DomainError::invalid_request(error.to_string()).with_details(json!({ "code": code }))
}

/// List all users.
#[utoipa::path(
    get,
    path = "/api/v1/users",
    responses(
        (status = 200, description = "Users", body = [User]),
        (status = 500, description = "Internal server error", body = DomainError)
    ),
    tags = ["users"],
    operation_id = "listUsers"
)]
#[get("/users")]
pub async fn list_users(state: web::Data<HttpState>) -> ApiResult<web::Json<Vec<User>>> {
    let users = state.users.list().await?;
    Ok(web::Json(users))
}

/// Fetch one user.
#[utoipa::path(
    get,
    path = "/api/v1/users/{id}",
    params(("id" = Uuid, Path, description = "User identifier")),
    responses(
        (status = 200, description = "User", body = User),
        (status = 404, description = "Not found", body = DomainError),
        (status = 500, description = "Internal server error", body = DomainError)
    ),
    tags = ["users"],
    operation_id = "getUser"
)]
#[get("/users/{id}")]
pub async fn get_user(
    state: web::Data<HttpState>,
    path: web::Path<Uuid>,
) -> ApiResult<web::Json<User>> {
    let id = path.into_inner();
    let user = state
        .users
        .find_by_id(id)
        .await?
        .ok_or_else(|| DomainError::not_found(format!("user {id} not found")))?;
    Ok(web::Json(user))
}

/// Look a user up by email address.
#[utoipa::path(
    get,
    path = "/api/v1/users/by-email",
    params(("email" = String, Query, description = "Email address to match exactly")),
    responses(
        (status = 200, description = "User", body = User),
        (status = 404, description = "Not found", body = DomainError),
        (status = 500, description = "Internal server error", body = DomainError)
    ),
    tags = ["users"],
    operation_id = "getUserByEmail"
)]
#[get("/users/by-email")]
pub async fn get_user_by_email(
    state: web::Data<HttpState>,
    query: web::Query<EmailQuery>,
) -> ApiResult<web::Json<User>> {
    let user = state
        .users
        .find_by_email(&query.email)
        .await?
        .ok_or_else(|| DomainError::not_found(format!("no user registered as {}", query.email)))?;
    Ok(web::Json(user))
}

/// Register a new user.
#[utoipa::path(
    post,
    path = "/api/v1/users",
    request_body = RegisterUserBody,
    responses(
        (status = 201, description = "User registered", body = User),
        (status = 400, description = "Invalid request", body = DomainError),
        (status = 409, description = "Email already registered", body = DomainError),
        (status = 500, description = "Internal server error", body = DomainError)
    ),
    tags = ["users"],
    operation_id = "registerUser"
)]
#[post("/users")]
pub async fn register_user(
    state: web::Data<HttpState>,
    payload: web::Json<RegisterUserBody>,
) -> ApiResult<HttpResponse> {
    let body = payload.into_inner();
    let user = User::try_new(
        Uuid::new_v4(),
        body.first_name,
        body.last_name,
        body.email,
        body.password,
        body.profile,
    )
    .map_err(map_user_validation_error)?;
    // Uniqueness is enforced by the repository so racing registrations
    // cannot both succeed.
    state.users.insert(&user).await?;
    Ok(HttpResponse::Created().json(user))
}

/// Update a user's fields.
#[utoipa::path(
    put,
    path = "/api/v1/users/{id}",
    params(("id" = Uuid, Path, description = "User identifier")),
    request_body = UpdateUserBody,
    responses(
        (status = 200, description = "User updated", body = User),
        (status = 400, description = "Invalid request", body = DomainError),
        (status = 404, description = "Not found", body = DomainError),
        (status = 409, description = "Concurrent modification", body = DomainError),
        (status = 500, description = "Internal server error", body = DomainError)
    ),
    tags = ["users"],
    operation_id = "updateUser"
)]
#[put("/users/{id}")]
pub async fn update_user(
    state: web::Data<HttpState>,
    path: web::Path<Uuid>,
    payload: web::Json<UpdateUserBody>,
) -> ApiResult<web::Json<User>> {
    let id = path.into_inner();
    let body = payload.into_inner();
    let mut user = state
        .users
        .find_by_id(id)
        .await?
        .ok_or_else(|| DomainError::not_found(format!("user {id} not found")))?;
    if let Some(first_name) = body.first_name {
        user.first_name = first_name;
    }
    if let Some(last_name) = body.last_name {
        user.last_name = last_name;
    }
    if let Some(email) = body.email {
        user.email = email;
    }
    if let Some(password) = body.password {
        user.password = password;
    }
    if let Some(profile) = body.profile {
        user.profile = profile;
    }
    user.ensure_valid().map_err(map_user_validation_error)?;
    user.version = body.expected_version + 1;
    state.users.update(&user, body.expected_version).await?;
    Ok(web::Json(user))
}

/// Delete a user.
#[utoipa::path(
    delete,
    path = "/api/v1/users/{id}",
    params(("id" = Uuid, Path, description = "User identifier")),
    responses(
        (status = 204, description = "User deleted"),
        (status = 404, description = "Not found", body = DomainError),
        (status = 500, description = "Internal server error", body = DomainError)
    ),
    tags = ["users"],
    operation_id = "deleteUser"
)]
#[delete("/users/{id}")]
pub async fn delete_user(
    state: web::Data<HttpState>,
    path: web::Path<Uuid>,
) -> ApiResult<HttpResponse> {
    state.users.delete(path.into_inner()).await?;
    Ok(HttpResponse::NoContent().finish())
}
