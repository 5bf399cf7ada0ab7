use axum::{Json, extract::State, response::IntoResponse};
use axum_extra::extract::WithRejection;

use crate::{
    Error,
    db::lock_connection,
    response::Envelope,
    transaction::{core::create_transaction, form::TransactionForm, state::TransactionState},
};

/// A route handler for creating a new transaction.
///
/// Responds with the created transaction. Nothing is written when a field is
/// missing or invalid.
pub async fn create_transaction_endpoint(
    State(state): State<TransactionState>,
    WithRejection(Json(form), _): WithRejection<Json<TransactionForm>, Error>,
) -> Result<impl IntoResponse, Error> {
    let new_transaction = form.validate()?;

    let connection = lock_connection(&state.db_connection)?;
    let transaction = create_transaction(new_transaction, &connection)?;

    tracing::debug!("Created transaction {}", transaction.id);

    Ok(Envelope::success(transaction))
}
