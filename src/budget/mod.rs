//! Monthly spending limits per category.
//!
//! Budgets are only ever saved in batches, keyed on month and category, and
//! are never deleted. A category with no budget for a month has no limit set.

mod core;
mod list_endpoint;
mod save_endpoint;
mod state;

pub use core::{Budget, BudgetEntry, create_budget_table, get_budgets_for_month, save_budgets};
pub use list_endpoint::{MonthQuery, list_budgets_endpoint};
pub use save_endpoint::save_budgets_endpoint;
