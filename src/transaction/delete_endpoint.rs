use axum::{
    extract::{Path, State},
    response::IntoResponse,
};

use crate::{
    Error,
    database_id::parse_transaction_id,
    db::lock_connection,
    response::Envelope,
    transaction::{core::delete_transaction, state::TransactionState},
};

/// A route handler for deleting a transaction.
///
/// Deleting a transaction that does not exist is reported as not found rather
/// than silently succeeding.
pub async fn delete_transaction_endpoint(
    State(state): State<TransactionState>,
    Path(raw_id): Path<String>,
) -> Result<impl IntoResponse, Error> {
    let transaction_id = parse_transaction_id(&raw_id)?;

    let connection = lock_connection(&state.db_connection)?;
    delete_transaction(transaction_id, &connection)?;

    tracing::debug!("Deleted transaction {transaction_id}");

    Ok(Envelope::acknowledged("Transaction deleted"))
}

#[cfg(test)]
mod tests {
    use axum::{
        extract::{Path, State},
        http::StatusCode,
        response::IntoResponse,
    };
    use time::macros::date;

    use crate::{
        Error,
        category::Category,
        db::lock_connection,
        test_utils::{must_create_test_state, response_json},
        transaction::{
            NewTransaction, create_transaction, delete_endpoint::delete_transaction_endpoint,
            get_transaction, state::TransactionState,
        },
    };

    #[tokio::test]
    async fn deletes_transaction() {
        let state: TransactionState = must_create_test_state();
        let transaction = create_transaction(
            NewTransaction::new("Test", 1.23, date!(2025 - 10 - 26), Category::Other).unwrap(),
            &lock_connection(&state.db_connection).unwrap(),
        )
        .unwrap();

        let response =
            delete_transaction_endpoint(State(state.clone()), Path(transaction.id.to_string()))
                .await
                .into_response();

        assert_eq!(response.status(), StatusCode::OK);
        let body = response_json(response).await;
        assert_eq!(body["success"], true);
        assert_eq!(
            get_transaction(
                transaction.id,
                &lock_connection(&state.db_connection).unwrap()
            ),
            Err(Error::NotFound)
        );
    }

    #[tokio::test]
    async fn deleting_missing_transaction_is_not_found() {
        let state: TransactionState = must_create_test_state();

        let response = delete_transaction_endpoint(State(state), Path("12".to_owned()))
            .await
            .into_response();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let body = response_json(response).await;
        assert_eq!(body["success"], false);
    }

    #[tokio::test]
    async fn malformed_id_is_bad_request() {
        let state: TransactionState = must_create_test_state();

        let response = delete_transaction_endpoint(State(state), Path("abc".to_owned()))
            .await
            .into_response();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
