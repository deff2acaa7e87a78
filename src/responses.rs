use serde::Serialize;
use axum::{http::StatusCode, response::IntoResponse, Json};

use crate::utils::validation::FieldErrors;

#[derive(Serialize)]
pub struct JsonResponse {
    pub status: String,
    pub success: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<FieldErrors>,
}

impl JsonResponse {
    pub fn error(code: StatusCode, msg: &str) -> impl IntoResponse {
        (
            code,
            Json(JsonResponse {
                status: "error".to_string(),
                success: false,
                message: msg.to_string(),
                errors: None,
            }),
        )
    }

    pub fn conflict(msg: &str) -> impl IntoResponse {
        Self::error(StatusCode::CONFLICT, msg)
    }

    pub fn server_error(msg: &str) -> impl IntoResponse {
        Self::error(StatusCode::INTERNAL_SERVER_ERROR, msg)
    }

    pub fn bad_request(msg: &str) -> impl IntoResponse {
        Self::error(StatusCode::BAD_REQUEST, msg)
    }

    pub fn bad_gateway(msg: &str) -> impl IntoResponse {
        Self::error(StatusCode::BAD_GATEWAY, msg)
    }

    /// Field errors the client can fix and resubmit.
    pub fn invalid_fields(code: StatusCode, msg: &str, errors: FieldErrors) -> impl IntoResponse {
        (
            code,
            Json(JsonResponse {
                status: "error".to_string(),
                success: false,
                message: msg.to_string(),
                errors: Some(errors),
            }),
        )
    }
}
