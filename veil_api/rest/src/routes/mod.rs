use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::models::ApiMessage;

pub mod contact;

pub const UNEXPECTED_ERROR_MESSAGE: &str = "An unexpected error occurred. Please try again later.";

pub fn internal_server_error(err: impl Into<anyhow::Error>) -> Response {
    let err = err.into();
    tracing::error!("internal server error: {err:#}");
    error(StatusCode::INTERNAL_SERVER_ERROR, UNEXPECTED_ERROR_MESSAGE)
}

pub fn error(code: StatusCode, message: &'static str) -> Response {
    (code, Json(ApiMessage { message })).into_response()
}
