//! Aggregates transactions and budgets into reports, dashboards and charts.

mod aggregation;
mod endpoints;
mod insights;
mod report;
mod state;

pub use aggregation::{
    BudgetSet, CategoryComparison, CategoryTotal, DashboardSummary, MonthlyTotal,
    budget_differences, budget_table, category_totals, dashboard_summary, filter_by_period,
    monthly_expenses,
};
pub use endpoints::{budget_report_endpoint, dashboard_endpoint, monthly_expenses_endpoint};
pub use insights::{Insight, generate_insights};
pub use report::{BudgetReport, build_budget_report};
