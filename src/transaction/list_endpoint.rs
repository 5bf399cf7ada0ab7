use axum::{extract::State, response::IntoResponse};

use crate::{
    Error,
    db::lock_connection,
    response::Envelope,
    transaction::{core::get_all_transactions, state::TransactionState},
};

/// A route handler for listing every transaction, most recently created first.
pub async fn list_transactions_endpoint(
    State(state): State<TransactionState>,
) -> Result<impl IntoResponse, Error> {
    let connection = lock_connection(&state.db_connection)?;

    let transactions = get_all_transactions(&connection)?;

    Ok(Envelope::success(transactions))
}
