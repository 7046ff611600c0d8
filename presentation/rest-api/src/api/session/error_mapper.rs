use poem::http::StatusCode;
use poem_openapi::payload::Json;

use crate::api::error::{ErrorResponse, IntoErrorResponse};
use crate::api::session::dto::SessionError;

impl IntoErrorResponse for SessionError {
    fn into_error_response(self) -> (StatusCode, Json<ErrorResponse>) {
        let (status, name, message) = match &self {
            SessionError::TokenEmpty => (
                StatusCode::BAD_REQUEST,
                "ValidationError",
                "session.token_empty",
            ),
            SessionError::Storage(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "InternalError",
                "storage.write_failed",
            ),
        };

        (status, Json(ErrorResponse::new(name, message)))
    }
}
