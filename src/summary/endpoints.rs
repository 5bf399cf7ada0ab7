//! Route handlers for the budget report, dashboard and chart data.

use axum::{
    extract::{Query, State},
    response::IntoResponse,
};
use serde::Deserialize;

use crate::{
    Error,
    budget::{MonthQuery, get_budgets_for_month},
    db::lock_connection,
    month::Period,
    response::Envelope,
    summary::{
        aggregation::{dashboard_summary, monthly_expenses},
        report::build_budget_report,
        state::SummaryState,
    },
    transaction::{get_all_transactions, get_transactions_in_month},
};

/// The query string for the dashboard.
#[derive(Debug, Default, Deserialize)]
pub struct PeriodQuery {
    /// Either a month in the format `YYYY-MM` or a month abbreviation like `Mar`.
    pub period: Option<String>,
}

impl PeriodQuery {
    /// Parse the required `period` parameter.
    ///
    /// # Errors
    /// This function will return a:
    /// - [Error::MissingPeriod] if `period` is absent or empty,
    /// - or [Error::InvalidPeriod] if `period` is not a month or month abbreviation.
    pub fn parse_period(&self) -> Result<Period, Error> {
        match self.period.as_deref() {
            None | Some("") => Err(Error::MissingPeriod),
            Some(raw) => raw.parse(),
        }
    }
}

/// A route handler for the budget report of a month.
pub async fn budget_report_endpoint(
    State(state): State<SummaryState>,
    Query(query): Query<MonthQuery>,
) -> Result<impl IntoResponse, Error> {
    let month = query.parse_month()?;

    let (budgets, transactions) = {
        let connection = lock_connection(&state.db_connection)?;
        (
            get_budgets_for_month(month, &connection)?,
            get_transactions_in_month(month, &connection)?,
        )
    };

    Ok(Envelope::success(build_budget_report(
        month,
        &budgets,
        &transactions,
    )))
}

/// A route handler for the dashboard summary of a period.
pub async fn dashboard_endpoint(
    State(state): State<SummaryState>,
    Query(query): Query<PeriodQuery>,
) -> Result<impl IntoResponse, Error> {
    let period = query.parse_period()?;

    let transactions = {
        let connection = lock_connection(&state.db_connection)?;
        get_all_transactions(&connection)?
    };

    Ok(Envelope::success(dashboard_summary(&transactions, period)))
}

/// A route handler for the total spent in each month of the year, January first.
pub async fn monthly_expenses_endpoint(
    State(state): State<SummaryState>,
) -> Result<impl IntoResponse, Error> {
    let transactions = {
        let connection = lock_connection(&state.db_connection)?;
        get_all_transactions(&connection)?
    };

    Ok(Envelope::success(monthly_expenses(&transactions)))
}
