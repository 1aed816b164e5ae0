//! OpenAPI documentation configuration.

use utoipa::OpenApi;

use common::{ErrorBody, ErrorResponse, FieldViolation};

use crate::api::handlers::user_handler;
use crate::api::requests::{CreateUserRequest, UpdateUserRequest};
use crate::api::response::{UserEnvelope, UserListEnvelope};
use crate::service::UserResponse;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "User Service",
        version = "0.1.0",
        description = "User registration and lookup",
        license(name = "MIT", url = "https://opensource.org/licenses/MIT")
    ),
    servers(
        (url = "http://localhost:8080", description = "Local development server")
    ),
    paths(
        user_handler::create_user,
        user_handler::list_users,
        user_handler::search_user,
        user_handler::get_user,
        user_handler::update_user,
        user_handler::delete_user,
    ),
    components(
        schemas(
            CreateUserRequest,
            UpdateUserRequest,
            UserResponse,
            UserEnvelope,
            UserListEnvelope,
            ErrorResponse,
            ErrorBody,
            FieldViolation,
        )
    ),
    tags(
        (name = "Users", description = "User management operations")
    )
)]
pub struct ApiDoc;
