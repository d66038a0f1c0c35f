//! JSON envelope shared by the user endpoints.
//!
//! Success: `{"success": true, "data": <user>}`.
//! Failure: `{"success": false, "error": {"code", "message", "details"?}}`
//! with the status taken from [`DirectoryError::status_code`].

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use directory_core::{DirectoryError, ErrorResponse};
use serde::Serialize;

/// Body of every user endpoint reply.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ErrorResponse>,
}

impl<T> ApiResponse<T> {
    fn data(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }
}

impl ApiResponse<()> {
    fn failure(error: &DirectoryError) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(ErrorResponse::from_error(error)),
        }
    }
}

/// Successful reply together with its status code.
#[derive(Debug)]
pub struct Reply<T> {
    status: StatusCode,
    data: T,
}

impl<T> Reply<T> {
    /// 200 with `data`.
    pub fn ok(data: T) -> Self {
        Self {
            status: StatusCode::OK,
            data,
        }
    }

    /// 201 with the created `data`.
    pub fn created(data: T) -> Self {
        Self {
            status: StatusCode::CREATED,
            data,
        }
    }
}

impl<T: Serialize> IntoResponse for Reply<T> {
    fn into_response(self) -> Response {
        (self.status, Json(ApiResponse::data(self.data))).into_response()
    }
}

/// Directory error rendered as an HTTP reply.
#[derive(Debug)]
pub struct AppError(DirectoryError);

impl From<DirectoryError> for AppError {
    fn from(err: DirectoryError) -> Self {
        Self(err)
    }
}

/// Malformed request bodies are reported as 400.
impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        Self(DirectoryError::BadRequest(rejection.body_text()))
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.0.status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        (status, Json(ApiResponse::failure(&self.0))).into_response()
    }
}

/// Result type for user handlers.
pub type ApiResult<T> = Result<Reply<T>, AppError>;
