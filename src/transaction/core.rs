//! Defines the core data models and database queries for transactions.

use rusqlite::{Connection, Row, params};
use serde::{Deserialize, Serialize};
use time::{Date, OffsetDateTime};

use crate::{
    Error,
    category::Category,
    database_id::TransactionId,
    month::BudgetMonth,
};

// ============================================================================
// MODELS
// ============================================================================

/// An expense, i.e. an event where money was spent.
///
/// To create a new `Transaction`, validate the fields with [NewTransaction::new]
/// and then call [create_transaction].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    /// The ID of the transaction.
    pub id: TransactionId,
    /// A text description of what the transaction was for.
    pub description: String,
    /// The amount of money spent in this transaction.
    pub amount: f64,
    /// When the transaction happened.
    pub date: Date,
    /// The spending category the transaction belongs to.
    pub category: Category,
    /// When the transaction was recorded.
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    /// When the transaction was last edited.
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

/// The validated, user supplied fields of a transaction.
#[derive(Debug, Clone, PartialEq)]
pub struct NewTransaction {
    /// A non-empty description with surrounding whitespace removed.
    pub description: String,
    /// A finite amount greater than zero.
    pub amount: f64,
    /// When the transaction happened.
    pub date: Date,
    /// The spending category.
    pub category: Category,
}

impl NewTransaction {
    /// Validate the fields of a transaction.
    ///
    /// # Errors
    /// This function will return a:
    /// - [Error::MissingField] if `description` is blank or `amount` is zero,
    /// - or [Error::InvalidField] if `amount` is negative or not a finite number.
    pub fn new(
        description: &str,
        amount: f64,
        date: Date,
        category: Category,
    ) -> Result<Self, Error> {
        let description = description.trim();

        if description.is_empty() {
            return Err(Error::MissingField("description"));
        }

        validate_amount(amount)?;

        Ok(Self {
            description: description.to_owned(),
            amount,
            date,
            category,
        })
    }
}

fn validate_amount(amount: f64) -> Result<(), Error> {
    if !amount.is_finite() {
        return Err(Error::InvalidField {
            field: "amount",
            reason: "must be a finite number".to_owned(),
        });
    }

    if amount == 0.0 {
        return Err(Error::MissingField("amount"));
    }

    if amount < 0.0 {
        return Err(Error::InvalidField {
            field: "amount",
            reason: "must not be negative".to_owned(),
        });
    }

    Ok(())
}

// ============================================================================
// DATABASE FUNCTIONS
// ============================================================================

const TRANSACTION_COLUMNS: &str = "id, description, amount, date, category, created_at, updated_at";

/// Create a new transaction in the database.
///
/// # Errors
/// This function will return a [Error::SqlError] if there is an SQL error.
pub fn create_transaction(
    transaction: NewTransaction,
    connection: &Connection,
) -> Result<Transaction, Error> {
    let now = OffsetDateTime::now_utc();

    let transaction = connection
        .prepare(&format!(
            "INSERT INTO \"transaction\" (description, amount, date, category, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?5)
             RETURNING {TRANSACTION_COLUMNS}"
        ))?
        .query_row(
            params![
                transaction.description,
                transaction.amount,
                transaction.date,
                transaction.category,
                now,
            ],
            map_transaction_row,
        )?;

    Ok(transaction)
}

/// Retrieve a transaction from the database by its `id`.
///
/// # Errors
/// This function will return a:
/// - [Error::NotFound] if `id` does not refer to a valid transaction,
/// - or [Error::SqlError] there is some other SQL error.
pub fn get_transaction(id: TransactionId, connection: &Connection) -> Result<Transaction, Error> {
    let transaction = connection
        .prepare(&format!(
            "SELECT {TRANSACTION_COLUMNS} FROM \"transaction\" WHERE id = :id"
        ))?
        .query_row(&[(":id", &id)], map_transaction_row)?;

    Ok(transaction)
}

/// Retrieve every transaction, most recently created first.
///
/// Transactions created at the same instant are ordered by descending ID.
///
/// # Errors
/// This function will return a [Error::SqlError] there is some SQL error.
pub fn get_all_transactions(connection: &Connection) -> Result<Vec<Transaction>, Error> {
    connection
        .prepare(&format!(
            "SELECT {TRANSACTION_COLUMNS} FROM \"transaction\" ORDER BY created_at DESC, id DESC"
        ))?
        .query_map([], map_transaction_row)?
        .map(|maybe_transaction| maybe_transaction.map_err(Error::from))
        .collect()
}

/// Retrieve the transactions dated within `month`, most recently created first.
///
/// # Errors
/// This function will return a [Error::SqlError] there is some SQL error.
pub fn get_transactions_in_month(
    month: BudgetMonth,
    connection: &Connection,
) -> Result<Vec<Transaction>, Error> {
    connection
        .prepare(&format!(
            "SELECT {TRANSACTION_COLUMNS} FROM \"transaction\"
             WHERE date BETWEEN ?1 AND ?2
             ORDER BY created_at DESC, id DESC"
        ))?
        .query_map(
            params![month.first_day(), month.last_day()],
            map_transaction_row,
        )?
        .map(|maybe_transaction| maybe_transaction.map_err(Error::from))
        .collect()
}

/// Replace the user supplied fields of the transaction `id`.
///
/// # Errors
/// This function will return a:
/// - [Error::UpdateMissingTransaction] if `id` does not refer to a valid transaction,
/// - or [Error::SqlError] there is some other SQL error.
pub fn update_transaction(
    id: TransactionId,
    transaction: NewTransaction,
    connection: &Connection,
) -> Result<Transaction, Error> {
    connection
        .prepare(&format!(
            "UPDATE \"transaction\"
             SET description = ?1, amount = ?2, date = ?3, category = ?4, updated_at = ?5
             WHERE id = ?6
             RETURNING {TRANSACTION_COLUMNS}"
        ))?
        .query_row(
            params![
                transaction.description,
                transaction.amount,
                transaction.date,
                transaction.category,
                OffsetDateTime::now_utc(),
                id,
            ],
            map_transaction_row,
        )
        .map_err(|error| match error {
            rusqlite::Error::QueryReturnedNoRows => Error::UpdateMissingTransaction,
            error => error.into(),
        })
}

/// Delete the transaction `id`.
///
/// # Errors
/// This function will return a:
/// - [Error::DeleteMissingTransaction] if `id` does not refer to a valid transaction,
/// - or [Error::SqlError] there is some other SQL error.
pub fn delete_transaction(id: TransactionId, connection: &Connection) -> Result<(), Error> {
    let rows_affected = connection.execute(
        "DELETE FROM \"transaction\" WHERE id = :id",
        &[(":id", &id)],
    )?;

    if rows_affected == 0 {
        return Err(Error::DeleteMissingTransaction);
    }

    Ok(())
}

/// Get the total number of transactions in the database.
///
/// # Errors
/// This function will return a [Error::SqlError] there is some SQL error.
pub fn count_transactions(connection: &Connection) -> Result<u32, Error> {
    connection
        .query_row("SELECT COUNT(id) FROM \"transaction\";", [], |row| {
            row.get(0)
        })
        .map_err(|error| error.into())
}

/// Create the transaction table in the database.
///
/// # Errors
/// Returns an error if the table cannot be created or if there is an SQL error.
pub fn create_transaction_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute(
        "CREATE TABLE IF NOT EXISTS \"transaction\" (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                description TEXT NOT NULL,
                amount REAL NOT NULL CHECK (amount >= 0),
                date TEXT NOT NULL,
                category TEXT NOT NULL,
                created_at TEXT NOT NULL,
                updated_at TEXT NOT NULL
                )",
        (),
    )?;

    // Used by the monthly budget report.
    connection.execute(
        "CREATE INDEX IF NOT EXISTS idx_transaction_date ON \"transaction\"(date);",
        (),
    )?;

    Ok(())
}

/// Map a database row to a Transaction.
pub fn map_transaction_row(row: &Row) -> Result<Transaction, rusqlite::Error> {
    let id = row.get(0)?;
    let description = row.get(1)?;
    let amount = row.get(2)?;
    let date = row.get(3)?;
    let category = row.get(4)?;
    let created_at = row.get(5)?;
    let updated_at = row.get(6)?;

    Ok(Transaction {
        id,
        description,
        amount,
        date,
        category,
        created_at,
        updated_at,
    })
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod new_transaction_tests {
    use time::macros::date;

    use crate::{Error, category::Category, transaction::NewTransaction};

    #[test]
    fn trims_description() {
        let transaction =
            NewTransaction::new("  Lunch ", 12.5, date!(2025 - 01 - 05), Category::Food).unwrap();

        assert_eq!(transaction.description, "Lunch");
    }

    #[test]
    fn blank_description_is_missing() {
        let result = NewTransaction::new("   ", 12.5, date!(2025 - 01 - 05), Category::Food);

        assert_eq!(result, Err(Error::MissingField("description")));
    }

    #[test]
    fn zero_amount_is_missing() {
        let result = NewTransaction::new("Lunch", 0.0, date!(2025 - 01 - 05), Category::Food);

        assert_eq!(result, Err(Error::MissingField("amount")));
    }

    #[test]
    fn negative_amount_is_invalid() {
        let result = NewTransaction::new("Refund", -3.0, date!(2025 - 01 - 05), Category::Food);

        assert!(matches!(
            result,
            Err(Error::InvalidField {
                field: "amount",
                ..
            })
        ));
    }

    #[test]
    fn non_finite_amount_is_invalid() {
        let result = NewTransaction::new("Lunch", f64::NAN, date!(2025 - 01 - 05), Category::Food);

        assert!(matches!(
            result,
            Err(Error::InvalidField {
                field: "amount",
                ..
            })
        ));
    }
}
