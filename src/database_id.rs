//! Database ID type definitions.

use crate::Error;

/// Alias for the integer type used for mapping to database IDs.
pub type DatabaseId = i64;
/// Database identifier for a transaction.
pub type TransactionId = DatabaseId;
/// Database identifier for a budget.
pub type BudgetId = DatabaseId;

/// Parse a transaction ID taken from a request path.
///
/// IDs are assigned by SQLite starting from 1, so only positive integers are
/// well-formed.
///
/// # Errors
///
/// Returns an [Error::InvalidTransactionId] if `raw` is not a positive integer.
pub fn parse_transaction_id(raw: &str) -> Result<TransactionId, Error> {
    match raw.parse::<TransactionId>() {
        Ok(id) if id > 0 => Ok(id),
        _ => Err(Error::InvalidTransactionId(raw.to_owned())),
    }
}
