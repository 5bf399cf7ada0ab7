use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::response::Envelope;

/// The fallback for requests that match no route.
pub async fn get_404_not_found() -> Response {
    (
        StatusCode::NOT_FOUND,
        Envelope::failure("Not found".to_owned()),
    )
        .into_response()
}
