//! Success envelope shared by every user endpoint.

use axum::{
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use utoipa::ToSchema;

use crate::service::UserResponse;

/// `{"status": "success", "message": ..., "data": ...}`
#[derive(Debug, Serialize, ToSchema)]
#[aliases(UserEnvelope = ApiResponse<UserResponse>, UserListEnvelope = ApiResponse<Vec<UserResponse>>)]
pub struct ApiResponse<T> {
    #[schema(example = "success")]
    pub status: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn with_message(data: T, message: impl Into<String>) -> Self {
        Self {
            status: "success".to_string(),
            message: message.into(),
            data: Some(data),
        }
    }
}

impl ApiResponse<()> {
    pub fn message(message: impl Into<String>) -> Self {
        Self {
            status: "success".to_string(),
            message: message.into(),
            data: None,
        }
    }
}

/// 201 with a `Location` header pointing at the new resource.
pub struct Created<T> {
    pub location: String,
    pub body: ApiResponse<T>,
}

impl<T: Serialize> IntoResponse for Created<T> {
    fn into_response(self) -> Response {
        (
            StatusCode::CREATED,
            [(header::LOCATION, self.location)],
            Json(self.body),
        )
            .into_response()
    }
}
