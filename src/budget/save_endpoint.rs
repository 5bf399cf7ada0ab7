use axum::{Json, extract::State, response::IntoResponse};
use axum_extra::extract::WithRejection;
use serde::Deserialize;
use serde_json::Value;

use crate::{
    Error,
    budget::{
        core::{BudgetEntry, save_budgets},
        state::BudgetState,
    },
    category::Category,
    db::lock_connection,
    month::BudgetMonth,
    response::Envelope,
};

/// One element of the JSON array sent to save budgets.
#[derive(Debug, Deserialize)]
struct BudgetEntryForm {
    month: String,
    category: String,
    amount: f64,
}

impl BudgetEntryForm {
    fn validate(self) -> Result<BudgetEntry, Error> {
        let month: BudgetMonth = self.month.parse()?;
        let category: Category = self.category.parse()?;

        BudgetEntry::new(month, category, self.amount)
    }
}

/// Parse and validate every entry of a batch of budgets.
///
/// # Errors
/// This function will return a:
/// - [Error::ExpectedBudgetArray] if `body` is not a JSON array,
/// - or [Error::InvalidBudgetEntry] naming the first entry that is malformed.
fn parse_budget_entries(body: Value) -> Result<Vec<BudgetEntry>, Error> {
    let Value::Array(items) = body else {
        return Err(Error::ExpectedBudgetArray);
    };

    items
        .into_iter()
        .enumerate()
        .map(|(index, item)| {
            serde_json::from_value::<BudgetEntryForm>(item)
                .map_err(|error| Error::InvalidBudgetEntry(index, error.to_string()))?
                .validate()
                .map_err(|error| Error::InvalidBudgetEntry(index, error.to_string()))
        })
        .collect()
}

/// A route handler for saving a batch of budgets.
///
/// Each entry is inserted, or overwrites the amount of the existing budget for
/// the same month and category. Every entry is validated before anything is
/// written, and the batch is saved all together or not at all.
pub async fn save_budgets_endpoint(
    State(state): State<BudgetState>,
    WithRejection(Json(body), _): WithRejection<Json<Value>, Error>,
) -> Result<impl IntoResponse, Error> {
    let entries = parse_budget_entries(body)?;

    let mut connection = lock_connection(&state.db_connection)?;
    let budgets = save_budgets(&entries, &mut connection)?;

    tracing::debug!("Saved {} budgets", budgets.len());

    Ok(Envelope::success(budgets))
}
