//! Combines a month's budgets and spending into a single report.

use serde::Serialize;

use crate::{
    budget::Budget,
    month::BudgetMonth,
    summary::{
        aggregation::{
            BudgetSet, CategoryComparison, budget_differences, budget_table, category_totals,
        },
        insights::{Insight, generate_insights},
    },
    transaction::Transaction,
};

/// Budgets compared with spending for one month.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BudgetReport {
    /// The month being reported on.
    pub month: BudgetMonth,
    /// A row for every category.
    pub table: Vec<CategoryComparison>,
    /// Rows for categories with a budget or spending only.
    pub comparison: Vec<CategoryComparison>,
    /// One insight for each category with a budget.
    pub insights: Vec<Insight>,
}

/// Build the report for `month`.
///
/// Transactions and budgets outside of `month` are ignored.
pub fn build_budget_report(
    month: BudgetMonth,
    budgets: &[Budget],
    transactions: &[Transaction],
) -> BudgetReport {
    let budgets: Vec<Budget> = budgets
        .iter()
        .filter(|budget| budget.month == month)
        .cloned()
        .collect();
    let budgets = BudgetSet::from_budgets(&budgets);

    let totals = category_totals(
        transactions
            .iter()
            .filter(|transaction| month.contains(transaction.date)),
    );

    BudgetReport {
        month,
        table: budget_table(&budgets, &totals),
        comparison: budget_differences(&budgets, &totals),
        insights: generate_insights(&budgets, &totals),
    }
}
