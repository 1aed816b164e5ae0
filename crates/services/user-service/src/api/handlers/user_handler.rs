//! User handlers.

use axum::{
    extract::{Path, Query, State},
    response::Json,
    routing::get,
    Router,
};
use serde::Deserialize;
use utoipa::IntoParams;

use common::{AppError, AppResult};

use crate::api::extractors::ValidatedJson;
use crate::api::requests::{CreateUserRequest, UpdateUserRequest};
use crate::api::response::{ApiResponse, Created};
use crate::api::AppState;
use crate::service::UserResponse;

/// Base path the user routes are nested under.
pub const USERS_PATH: &str = "/api/v1/users";

/// Lookup keys for `GET /search`. `idNumber` wins when both are given.
#[derive(Debug, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct SearchParams {
    /// National identity number
    pub id_number: Option<String>,
    /// Email address, matched case-insensitively
    pub email: Option<String>,
}

/// Create user routes
pub fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_users).post(create_user))
        .route("/search", get(search_user))
        .route("/:id", get(get_user).put(update_user).delete(delete_user))
}

/// Register a new user
#[utoipa::path(
    post,
    path = "/api/v1/users",
    tag = "Users",
    request_body = CreateUserRequest,
    responses(
        (status = 201, description = "User created", body = crate::api::response::UserEnvelope,
            headers(("Location" = String, description = "URI of the new user"))),
        (status = 400, description = "Validation error", body = common::ErrorResponse),
        (status = 409, description = "Email or ID number already registered", body = common::ErrorResponse)
    )
)]
pub async fn create_user(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<CreateUserRequest>,
) -> AppResult<Created<UserResponse>> {
    let user = state.user_service.create_user(payload.into()).await?;

    Ok(Created {
        location: format!("{}/{}", USERS_PATH, user.id),
        body: ApiResponse::with_message(user, "User created successfully"),
    })
}

/// List all users
#[utoipa::path(
    get,
    path = "/api/v1/users",
    tag = "Users",
    responses(
        (status = 200, description = "All registered users", body = crate::api::response::UserListEnvelope)
    )
)]
pub async fn list_users(
    State(state): State<AppState>,
) -> AppResult<Json<ApiResponse<Vec<UserResponse>>>> {
    let users = state.user_service.get_all_users().await?;
    Ok(Json(ApiResponse::with_message(
        users,
        "Users retrieved successfully",
    )))
}

/// Find a user by ID number or email
#[utoipa::path(
    get,
    path = "/api/v1/users/search",
    tag = "Users",
    params(SearchParams),
    responses(
        (status = 200, description = "Matching user", body = crate::api::response::UserEnvelope),
        (status = 400, description = "No search key given", body = common::ErrorResponse),
        (status = 404, description = "No user matches", body = common::ErrorResponse)
    )
)]
pub async fn search_user(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> AppResult<Json<ApiResponse<UserResponse>>> {
    let present = |value: Option<String>| value.filter(|v| !v.trim().is_empty());

    let user = match (present(params.id_number), present(params.email)) {
        (Some(id_number), _) => state.user_service.get_user_by_id_number(&id_number).await?,
        (None, Some(email)) => state.user_service.get_user_by_email(&email).await?,
        (None, None) => {
            return Err(AppError::validation(
                "Either idNumber or email query parameter must be provided",
            ))
        }
    };

    Ok(Json(ApiResponse::with_message(
        user,
        "User retrieved successfully",
    )))
}

/// Get user by ID
#[utoipa::path(
    get,
    path = "/api/v1/users/{id}",
    tag = "Users",
    params(
        ("id" = String, Path, description = "User ID")
    ),
    responses(
        (status = 200, description = "User found", body = crate::api::response::UserEnvelope),
        (status = 404, description = "User not found", body = common::ErrorResponse)
    )
)]
pub async fn get_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<ApiResponse<UserResponse>>> {
    let user = state.user_service.get_user_by_id(&id).await?;
    Ok(Json(ApiResponse::with_message(
        user,
        "User retrieved successfully",
    )))
}

/// Replace a user's fields
#[utoipa::path(
    put,
    path = "/api/v1/users/{id}",
    tag = "Users",
    params(
        ("id" = String, Path, description = "User ID")
    ),
    request_body = UpdateUserRequest,
    responses(
        (status = 200, description = "User updated", body = crate::api::response::UserEnvelope),
        (status = 400, description = "Validation error", body = common::ErrorResponse),
        (status = 404, description = "User not found", body = common::ErrorResponse)
    )
)]
pub async fn update_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ValidatedJson(payload): ValidatedJson<UpdateUserRequest>,
) -> AppResult<Json<ApiResponse<UserResponse>>> {
    let user = state
        .user_service
        .update_user(payload.into_command(id))
        .await?;

    Ok(Json(ApiResponse::with_message(
        user,
        "User updated successfully",
    )))
}

/// Delete a user
#[utoipa::path(
    delete,
    path = "/api/v1/users/{id}",
    tag = "Users",
    params(
        ("id" = String, Path, description = "User ID")
    ),
    responses(
        (status = 200, description = "User deleted"),
        (status = 404, description = "User not found", body = common::ErrorResponse)
    )
)]
pub async fn delete_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<ApiResponse<()>>> {
    state.user_service.delete_user(&id).await?;
    Ok(Json(ApiResponse::message("User deleted successfully")))
}
