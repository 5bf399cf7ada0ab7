//! Defines the app level error type and its conversion into JSON error responses.
use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::response::Envelope;

/// The message sent to clients in place of internal error details.
pub const SERVER_ERROR_MESSAGE: &str = "Server error";

/// The errors that may occur in the application.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error {
    /// A required field was absent or empty in the request body.
    #[error("Missing field \"{0}\"")]
    MissingField(&'static str),

    /// A field was present but its value could not be used.
    #[error("Invalid value for field \"{field}\": {reason}")]
    InvalidField {
        /// The name of the offending field.
        field: &'static str,
        /// Why the value was rejected.
        reason: String,
    },

    /// The string does not name one of the fixed spending categories.
    #[error("\"{0}\" is not a valid category")]
    InvalidCategory(String),

    /// The string is not a month in the format `YYYY-MM`.
    #[error("\"{0}\" is not a valid month, expected the format YYYY-MM")]
    InvalidMonth(String),

    /// The `month` query parameter was not provided.
    #[error("Month is required")]
    MissingMonth,

    /// The string is neither a `YYYY-MM` month nor a three-letter month abbreviation.
    #[error("\"{0}\" is not a valid period, expected YYYY-MM or a month abbreviation like Jan")]
    InvalidPeriod(String),

    /// The `period` query parameter was not provided.
    #[error("Period is required")]
    MissingPeriod,

    /// The transaction ID in the request path is not a well-formed ID.
    ///
    /// This is checked before the database is queried, so it is distinct
    /// from the transaction not existing.
    #[error("\"{0}\" is not a valid transaction ID")]
    InvalidTransactionId(String),

    /// The request body could not be parsed as JSON.
    #[error("Invalid request body: {0}")]
    InvalidRequestBody(String),

    /// The body for saving budgets was valid JSON, but not an array.
    #[error("Invalid input, expected an array of budget entries")]
    ExpectedBudgetArray,

    /// An entry in a batch of budgets was invalid.
    ///
    /// Carries the index of the entry in the batch and the reason.
    #[error("Invalid budget entry at index {0}: {1}")]
    InvalidBudgetEntry(usize, String),

    /// The requested resource was not found.
    ///
    /// Internally, this error may occur when a query returns no rows.
    #[error("The requested resource could not be found")]
    NotFound,

    /// Tried to update a transaction that does not exist
    #[error("Transaction not found")]
    UpdateMissingTransaction,

    /// Tried to delete a transaction that does not exist
    #[error("Transaction not found")]
    DeleteMissingTransaction,

    /// An unhandled/unexpected SQL error.
    #[error("an unexpected SQL error occurred: {0}")]
    SqlError(rusqlite::Error),

    /// Could not acquire the database lock
    #[error("could not acquire the database lock")]
    DatabaseLockError,
}

impl Error {
    /// The HTTP status code that this error is reported with.
    pub fn status_code(&self) -> StatusCode {
        match self {
            Error::MissingField(_)
            | Error::InvalidField { .. }
            | Error::InvalidCategory(_)
            | Error::InvalidMonth(_)
            | Error::MissingMonth
            | Error::InvalidPeriod(_)
            | Error::MissingPeriod
            | Error::InvalidTransactionId(_)
            | Error::InvalidRequestBody(_)
            | Error::ExpectedBudgetArray
            | Error::InvalidBudgetEntry(_, _) => StatusCode::BAD_REQUEST,
            Error::NotFound | Error::UpdateMissingTransaction | Error::DeleteMissingTransaction => {
                StatusCode::NOT_FOUND
            }
            Error::SqlError(_) | Error::DatabaseLockError => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<rusqlite::Error> for Error {
    fn from(value: rusqlite::Error) -> Self {
        match value {
            rusqlite::Error::QueryReturnedNoRows => Error::NotFound,
            error => {
                tracing::error!("an unhandled SQL error occurred: {}", error);
                Error::SqlError(error)
            }
        }
    }
}

impl From<JsonRejection> for Error {
    fn from(rejection: JsonRejection) -> Self {
        Error::InvalidRequestBody(rejection.body_text())
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status_code = self.status_code();

        let message = if status_code.is_server_error() {
            // Internal details are for the server logs only.
            tracing::error!("An unexpected error occurred: {}", self);
            SERVER_ERROR_MESSAGE.to_owned()
        } else {
            self.to_string()
        };

        (status_code, Envelope::<()>::failure(message)).into_response()
    }
}
