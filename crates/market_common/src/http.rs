// --- File: crates/market_common/src/http.rs ---
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use crate::error::{HttpStatusCode, MarketError};

// Include the client module
pub mod client;

/// Extension trait for MarketError to convert it to an Axum HTTP response.
pub trait IntoHttpResponse {
    /// Converts the error into an Axum HTTP response.
    fn into_http_response(self) -> Response;
}

impl IntoHttpResponse for MarketError {
    fn into_http_response(self) -> Response {
        let status_code =
            StatusCode::from_u16(self.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        let error_message = self.to_string();

        let body = Json(json!({
            "error": {
                "message": error_message,
                "code": status_code.as_u16(),
            }
        }));

        (status_code, body).into_response()
    }
}

/// Implement IntoResponse for MarketError so handlers can return
/// `Result<Json<T>, MarketError>` directly.
impl IntoResponse for MarketError {
    fn into_response(self) -> Response {
        self.into_http_response()
    }
}

/// Converts a Result<T, E> into a JSON handler result using a custom error
/// mapper into the shared taxonomy.
pub fn map_json_error<T, E, F>(result: Result<T, E>, f: F) -> Result<Json<T>, Response>
where
    T: serde::Serialize,
    F: FnOnce(E) -> MarketError,
{
    result.map(Json).map_err(|err| f(err).into_response())
}
