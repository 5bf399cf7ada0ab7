//! The JSON envelope that wraps every API response.

use axum::{
    Json,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};

/// The body of every API response.
///
/// Successful responses set `success` to true and usually carry `data`.
/// Failed responses set `success` to false and carry a `message`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Envelope<T> {
    /// Whether the request succeeded.
    pub success: bool,
    /// The payload of a successful response.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    /// A human readable message, e.g. the reason a request failed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl<T> Envelope<T> {
    /// A successful response carrying `data`.
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            message: None,
        }
    }
}

impl Envelope<()> {
    /// A successful response with only a message.
    pub fn acknowledged(message: &str) -> Self {
        Self {
            success: true,
            data: None,
            message: Some(message.to_owned()),
        }
    }

    /// A successful response with no payload.
    pub fn empty() -> Self {
        Self {
            success: true,
            data: None,
            message: None,
        }
    }

    /// A failed response.
    pub fn failure(message: String) -> Self {
        Self {
            success: false,
            data: None,
            message: Some(message),
        }
    }
}

impl<T: Serialize> IntoResponse for Envelope<T> {
    fn into_response(self) -> Response {
        Json(self).into_response()
    }
}
