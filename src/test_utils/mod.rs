#![allow(missing_docs)]

pub(crate) mod http;

use axum::extract::FromRef;
use rusqlite::Connection;

use crate::{AppState, db::initialize};

pub(crate) use http::{assert_content_type, response_json};

#[track_caller]
pub(crate) fn must_create_test_connection() -> Connection {
    let connection =
        Connection::open_in_memory().expect("Could not open in-memory SQLite database");
    initialize(&connection).expect("Could not initialize database");

    connection
}

#[track_caller]
pub(crate) fn must_create_test_app_state() -> AppState {
    let connection =
        Connection::open_in_memory().expect("Could not open in-memory SQLite database");

    AppState::new(connection).expect("Could not create app state")
}

/// Create the sub-state `S` of a freshly initialised [AppState].
#[track_caller]
pub(crate) fn must_create_test_state<S: FromRef<AppState>>() -> S {
    S::from_ref(&must_create_test_app_state())
}
