use poem::http::StatusCode;
use poem_openapi::payload::Json;

use crate::api::cart::dto::CartRequestError;
use crate::api::error::{ErrorResponse, IntoErrorResponse};

impl IntoErrorResponse for CartRequestError {
    fn into_error_response(self) -> (StatusCode, Json<ErrorResponse>) {
        let message = match &self {
            CartRequestError::InvalidId => "cart.invalid_id",
            CartRequestError::NameEmpty => "cart.name_empty",
            CartRequestError::InvalidPrice => "cart.invalid_price",
            CartRequestError::InvalidQty => "cart.invalid_qty",
        };

        (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse::new("ValidationError", message)),
        )
    }
}
