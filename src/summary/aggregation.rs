//! Transaction aggregation for budget reports, dashboards and charts.
//!
//! Everything here is a pure function over transactions and budgets that have
//! already been fetched from the database.

use std::collections::BTreeMap;

use serde::Serialize;
use time::Month;

use crate::{
    budget::Budget,
    category::Category,
    month::{Period, month_abbreviation},
    transaction::Transaction,
};

/// How many transactions are shown in the recent transactions list.
pub const RECENT_TRANSACTION_COUNT: usize = 5;

/// The budgets set for each category in one month.
///
/// A category that is absent has no budget set, which is different from a
/// budget of zero.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BudgetSet(BTreeMap<Category, f64>);

impl BudgetSet {
    /// Collect budget records into a set keyed on category.
    ///
    /// Callers should pass the budgets of a single month.
    pub fn from_budgets(budgets: &[Budget]) -> Self {
        Self(
            budgets
                .iter()
                .map(|budget| (budget.category, budget.amount))
                .collect(),
        )
    }

    /// Set the budget for `category`.
    pub fn set(&mut self, category: Category, amount: f64) {
        self.0.insert(category, amount);
    }

    /// The budget for `category`, or `None` if no budget has been set.
    pub fn get(&self, category: Category) -> Option<f64> {
        self.0.get(&category).copied()
    }
}

/// Budget against actual spending for one category.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryComparison {
    /// The category being compared.
    pub category: Category,
    /// The budget, or `None` if no budget has been set.
    pub budget: Option<f64>,
    /// The total spent, zero when there are no transactions.
    pub spent: f64,
    /// The budget (zero when unset) minus the amount spent.
    ///
    /// A negative difference means the budget was overspent by that much.
    pub difference: f64,
}

impl CategoryComparison {
    fn new(category: Category, budget: Option<f64>, spent: f64) -> Self {
        Self {
            category,
            budget,
            spent,
            difference: budget.unwrap_or(0.0) - spent,
        }
    }
}

/// The total spent in one category.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryTotal {
    /// The category.
    pub category: Category,
    /// The sum of the transaction amounts in the category.
    pub total: f64,
}

/// The total spent in one month of the year, summed over every year.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthlyTotal {
    /// The month number, 1 for January through 12 for December.
    pub month: u8,
    /// The three-letter abbreviation of the month, e.g. "Jan".
    pub label: String,
    /// The sum of the transaction amounts in the month.
    pub total: f64,
}

/// An overview of spending in a period.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSummary {
    /// The period the totals cover.
    pub period: Period,
    /// The sum of every transaction in the period.
    pub total_expenses: f64,
    /// The number of transactions in the period.
    pub transaction_count: usize,
    /// The total per category for categories with spending in the period.
    pub category_totals: Vec<CategoryTotal>,
    /// The category with the most spending in the period, if any.
    pub highest_category: Option<Category>,
    /// The latest transactions by date, regardless of period.
    pub recent_transactions: Vec<Transaction>,
}

/// Keep the transactions dated within `period`.
pub fn filter_by_period(transactions: &[Transaction], period: Period) -> Vec<&Transaction> {
    transactions
        .iter()
        .filter(|transaction| period.contains(transaction.date))
        .collect()
}

/// Sums transaction amounts by category.
///
/// Categories without transactions are absent from the result rather than
/// zero.
pub fn category_totals<'a>(
    transactions: impl IntoIterator<Item = &'a Transaction>,
) -> BTreeMap<Category, f64> {
    let mut totals = BTreeMap::new();

    for transaction in transactions {
        *totals.entry(transaction.category).or_insert(0.0) += transaction.amount;
    }

    totals
}

/// Compares budgets with spending for every category that has a budget set or
/// has spending, in category order.
pub fn budget_differences(
    budgets: &BudgetSet,
    totals: &BTreeMap<Category, f64>,
) -> Vec<CategoryComparison> {
    Category::ALL
        .into_iter()
        .filter(|category| budgets.get(*category).is_some() || totals.contains_key(category))
        .map(|category| {
            CategoryComparison::new(
                category,
                budgets.get(category),
                totals.get(&category).copied().unwrap_or(0.0),
            )
        })
        .collect()
}

/// Compares budgets with spending for every category, in category order.
pub fn budget_table(
    budgets: &BudgetSet,
    totals: &BTreeMap<Category, f64>,
) -> Vec<CategoryComparison> {
    Category::ALL
        .into_iter()
        .map(|category| {
            CategoryComparison::new(
                category,
                budgets.get(category),
                totals.get(&category).copied().unwrap_or(0.0),
            )
        })
        .collect()
}

/// Sums transaction amounts by month of the year, January first.
///
/// The year is ignored, so January 2024 and January 2025 share one total.
pub fn monthly_expenses(transactions: &[Transaction]) -> Vec<MonthlyTotal> {
    let mut totals: BTreeMap<u8, (Month, f64)> = BTreeMap::new();

    for transaction in transactions {
        let month = transaction.date.month();
        totals.entry(month as u8).or_insert((month, 0.0)).1 += transaction.amount;
    }

    totals
        .into_iter()
        .map(|(number, (month, total))| MonthlyTotal {
            month: number,
            label: month_abbreviation(month).to_owned(),
            total,
        })
        .collect()
}

/// Summarises spending in `period`.
///
/// The recent transactions are taken from all of `transactions`, latest date
/// first. Transactions on the same date keep their input order.
pub fn dashboard_summary(transactions: &[Transaction], period: Period) -> DashboardSummary {
    let in_period = filter_by_period(transactions, period);
    let totals = category_totals(in_period.iter().copied());

    let total_expenses = in_period.iter().map(|transaction| transaction.amount).sum();
    let highest_category = highest_category(&totals);

    let mut recent_transactions = transactions.to_vec();
    recent_transactions.sort_by(|a, b| b.date.cmp(&a.date));
    recent_transactions.truncate(RECENT_TRANSACTION_COUNT);

    DashboardSummary {
        period,
        total_expenses,
        transaction_count: in_period.len(),
        category_totals: totals
            .into_iter()
            .map(|(category, total)| CategoryTotal { category, total })
            .collect(),
        highest_category,
        recent_transactions,
    }
}

/// The category with the largest total. Ties go to the earlier category.
fn highest_category(totals: &BTreeMap<Category, f64>) -> Option<Category> {
    let mut highest: Option<(Category, f64)> = None;

    for (&category, &total) in totals {
        match highest {
            Some((_, best)) if total <= best => {}
            _ => highest = Some((category, total)),
        }
    }

    highest.map(|(category, _)| category)
}
