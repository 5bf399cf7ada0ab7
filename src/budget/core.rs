//! Defines the budget model and the database queries for budgets.

use rusqlite::{Connection, Row, params};
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::{Error, category::Category, database_id::BudgetId, month::BudgetMonth};

// ============================================================================
// MODELS
// ============================================================================

/// The spending limit for one category in one month.
///
/// There is at most one budget for each month and category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Budget {
    /// The ID of the budget.
    pub id: BudgetId,
    /// The month the limit applies to.
    pub month: BudgetMonth,
    /// The category the limit applies to.
    pub category: Category,
    /// The most that should be spent on `category` in `month`.
    pub amount: f64,
    /// When the budget was first saved.
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    /// When the amount was last saved.
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

/// A request to set the budget for a month and category.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BudgetEntry {
    /// The month the limit applies to.
    pub month: BudgetMonth,
    /// The category the limit applies to.
    pub category: Category,
    /// The spending limit, zero or more.
    pub amount: f64,
}

impl BudgetEntry {
    /// Create a budget entry.
    ///
    /// # Errors
    /// This function will return an [Error::InvalidField] if `amount` is
    /// negative or not a finite number.
    pub fn new(month: BudgetMonth, category: Category, amount: f64) -> Result<Self, Error> {
        if !amount.is_finite() || amount < 0.0 {
            return Err(Error::InvalidField {
                field: "amount",
                reason: "must be a number that is zero or more".to_owned(),
            });
        }

        Ok(Self {
            month,
            category,
            amount,
        })
    }
}

// ============================================================================
// DATABASE FUNCTIONS
// ============================================================================

const BUDGET_COLUMNS: &str = "id, month, category, amount, created_at, updated_at";

/// Insert or overwrite the budgets in `entries`, keyed on month and category.
///
/// The whole batch is written in a single SQL transaction: if any entry fails,
/// none of the entries are saved. When the same month and category appears
/// more than once, the last entry wins. Overwriting a budget keeps its
/// `created_at` and sets `updated_at`.
///
/// # Errors
/// This function will return a [Error::SqlError] if there is an SQL error.
pub fn save_budgets(
    entries: &[BudgetEntry],
    connection: &mut Connection,
) -> Result<Vec<Budget>, Error> {
    let now = OffsetDateTime::now_utc();
    let transaction = connection.transaction()?;
    let mut saved = Vec::with_capacity(entries.len());

    {
        let mut statement = transaction.prepare(&format!(
            "INSERT INTO budget (month, category, amount, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?4)
             ON CONFLICT(month, category) DO UPDATE
             SET amount = excluded.amount, updated_at = excluded.updated_at
             RETURNING {BUDGET_COLUMNS}"
        ))?;

        for entry in entries {
            let budget = statement.query_row(
                params![entry.month, entry.category, entry.amount, now],
                map_budget_row,
            )?;
            saved.push(budget);
        }
    }

    transaction.commit()?;

    Ok(saved)
}

/// Retrieve the budgets set for `month`, in category order.
///
/// # Errors
/// This function will return a [Error::SqlError] if there is an SQL error.
pub fn get_budgets_for_month(
    month: BudgetMonth,
    connection: &Connection,
) -> Result<Vec<Budget>, Error> {
    let mut budgets = connection
        .prepare(&format!(
            "SELECT {BUDGET_COLUMNS} FROM budget WHERE month = :month"
        ))?
        .query_map(&[(":month", &month)], map_budget_row)?
        .map(|maybe_budget| maybe_budget.map_err(Error::from))
        .collect::<Result<Vec<_>, _>>()?;

    budgets.sort_by_key(|budget| budget.category);

    Ok(budgets)
}

/// Create the budget table in the database.
///
/// # Errors
/// Returns an error if the table cannot be created or if there is an SQL error.
pub fn create_budget_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute(
        "CREATE TABLE IF NOT EXISTS budget (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                month TEXT NOT NULL,
                category TEXT NOT NULL,
                amount REAL NOT NULL CHECK (amount >= 0),
                created_at TEXT NOT NULL,
                updated_at TEXT NOT NULL,
                UNIQUE(month, category)
                )",
        (),
    )?;

    Ok(())
}

/// Map a database row to a Budget.
pub fn map_budget_row(row: &Row) -> Result<Budget, rusqlite::Error> {
    Ok(Budget {
        id: row.get(0)?,
        month: row.get(1)?,
        category: row.get(2)?,
        amount: row.get(3)?,
        created_at: row.get(4)?,
        updated_at: row.get(5)?,
    })
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod budget_entry_tests {
    use crate::{Error, budget::BudgetEntry, category::Category};

    #[test]
    fn zero_amount_is_allowed() {
        let entry = BudgetEntry::new("2025-01".parse().unwrap(), Category::Food, 0.0);

        assert!(entry.is_ok());
    }

    #[test]
    fn negative_amount_is_rejected() {
        let entry = BudgetEntry::new("2025-01".parse().unwrap(), Category::Food, -1.0);

        assert!(matches!(
            entry,
            Err(Error::InvalidField {
                field: "amount",
                ..
            })
        ));
    }

    #[test]
    fn infinite_amount_is_rejected() {
        let entry = BudgetEntry::new("2025-01".parse().unwrap(), Category::Food, f64::INFINITY);

        assert!(entry.is_err());
    }
}
