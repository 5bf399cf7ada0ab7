//! Finsight is a web service for tracking personal spending against monthly budgets.
//!
//! This library provides a JSON REST API for recording transactions, saving
//! per-category monthly budgets and reading aggregated spending summaries.

#![warn(missing_docs)]

use std::{net::SocketAddr, time::Duration};

use axum_server::Handle;
use tokio::signal;

mod app_state;
mod budget;
mod category;
mod database_id;
mod db;
pub mod endpoints;
mod error;
mod logging;
mod month;
mod not_found;
mod response;
mod routing;
mod sequence;
mod summary;
mod transaction;

#[cfg(test)]
mod test_utils;

pub use app_state::AppState;
pub use budget::{Budget, BudgetEntry, get_budgets_for_month, save_budgets};
pub use category::Category;
pub use database_id::{BudgetId, DatabaseId, TransactionId};
pub use db::initialize as initialize_db;
pub use error::Error;
pub use logging::{LOG_BODY_LENGTH_LIMIT, logging_middleware};
pub use month::{BudgetMonth, Period};
pub use response::Envelope;
pub use routing::build_router;
pub use sequence::{RequestSequence, RequestTicket};
pub use summary::{
    BudgetReport, BudgetSet, CategoryComparison, CategoryTotal, DashboardSummary, Insight,
    MonthlyTotal, budget_differences, budget_table, build_budget_report, category_totals,
    dashboard_summary, filter_by_period, generate_insights, monthly_expenses,
};
pub use transaction::{
    NewTransaction, Transaction, count_transactions, create_transaction, delete_transaction,
    get_all_transactions, get_transaction, get_transactions_in_month, update_transaction,
};

/// An async task that waits for either the ctrl+c or terminate signal, whichever comes first, and
/// then signals the server to shut down gracefully.
///
/// `handle` is a handle to an Axum `Server`.
pub async fn graceful_shutdown(handle: Handle<SocketAddr>) {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::debug!("Received ctrl+c signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
        _ = terminate => {
            tracing::debug!("Received terminate signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
    }
}
