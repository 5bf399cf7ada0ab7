use axum::{
    extract::{Query, State},
    response::IntoResponse,
};
use serde::Deserialize;

use crate::{
    Error,
    budget::{core::get_budgets_for_month, state::BudgetState},
    db::lock_connection,
    month::BudgetMonth,
    response::Envelope,
};

/// The query string for endpoints scoped to a single month.
#[derive(Debug, Default, Deserialize)]
pub struct MonthQuery {
    /// The month in the format `YYYY-MM`.
    pub month: Option<String>,
}

impl MonthQuery {
    /// Parse the required `month` parameter.
    ///
    /// # Errors
    /// This function will return a:
    /// - [Error::MissingMonth] if `month` is absent or empty,
    /// - or [Error::InvalidMonth] if `month` is not in the format `YYYY-MM`.
    pub fn parse_month(&self) -> Result<BudgetMonth, Error> {
        match self.month.as_deref() {
            None | Some("") => Err(Error::MissingMonth),
            Some(raw) => raw.parse(),
        }
    }
}

/// A route handler for listing the budgets set for a month.
pub async fn list_budgets_endpoint(
    State(state): State<BudgetState>,
    Query(query): Query<MonthQuery>,
) -> Result<impl IntoResponse, Error> {
    let month = query.parse_month()?;

    let connection = lock_connection(&state.db_connection)?;
    let budgets = get_budgets_for_month(month, &connection)?;

    Ok(Envelope::success(budgets))
}
