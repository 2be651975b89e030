use axum::{http::StatusCode, response::IntoResponse, Json};
use serde::Serialize;
use utoipa::ToSchema;

use domain::UserResponse;

/// Message-only response
#[derive(Debug, Serialize, ToSchema)]
pub struct MessageResponse {
    #[schema(example = "registration success")]
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Current user wrapped in `data`.
#[derive(Debug, Serialize, ToSchema)]
pub struct UserDataResponse {
    pub data: UserResponse,
}

/// Bearer token returned by login
#[derive(Debug, Serialize, ToSchema)]
pub struct LoginResponse {
    #[schema(example = "eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9...")]
    pub token: String,
}

/// Acknowledgement of a newly stored resource.
#[derive(Debug, Serialize, ToSchema)]
pub struct CreatedResponse {
    #[schema(example = "created")]
    pub status: String,
    #[schema(example = 1)]
    pub id: i32,
}

impl CreatedResponse {
    pub fn new(id: i32) -> Self {
        Self {
            status: "created".to_string(),
            id,
        }
    }
}

/// Responds 201 with the wrapped body.
pub struct Created<T: Serialize>(pub T);

impl<T: Serialize> IntoResponse for Created<T> {
    fn into_response(self) -> axum::response::Response {
        (StatusCode::CREATED, Json(self.0)).into_response()
    }
}
