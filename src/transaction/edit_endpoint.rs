use axum::{
    Json,
    extract::{Path, State},
    response::IntoResponse,
};
use axum_extra::extract::WithRejection;

use crate::{
    Error,
    database_id::parse_transaction_id,
    db::lock_connection,
    response::Envelope,
    transaction::{core::update_transaction, form::TransactionForm, state::TransactionState},
};

/// A route handler for replacing the description, amount, date and category
/// of a transaction.
///
/// A body that is not JSON is rejected by the extractor before the ID is read.
/// Otherwise the ID is checked before the fields, so a malformed ID is reported
/// as such even when fields are missing.
pub async fn edit_transaction_endpoint(
    State(state): State<TransactionState>,
    Path(raw_id): Path<String>,
    WithRejection(Json(form), _): WithRejection<Json<TransactionForm>, Error>,
) -> Result<impl IntoResponse, Error> {
    let transaction_id = parse_transaction_id(&raw_id)?;
    let replacement = form.validate()?;

    let connection = lock_connection(&state.db_connection)?;
    let transaction = update_transaction(transaction_id, replacement, &connection)?;

    tracing::debug!("Updated transaction {transaction_id}");

    Ok(Envelope::success(transaction))
}
