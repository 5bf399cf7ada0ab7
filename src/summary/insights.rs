//! Short textual observations about budget usage.

use std::{collections::BTreeMap, fmt::Display};

use serde::{Serialize, Serializer, ser::SerializeStruct};

use crate::{category::Category, summary::aggregation::BudgetSet};

/// An observation about spending against the budget for one category.
#[derive(Debug, Clone, PartialEq)]
pub enum Insight {
    /// A budget is set but nothing has been spent.
    NoSpending {
        /// The category with the budget.
        category: Category,
    },
    /// Spending is over the budget.
    Exceeded {
        /// The category with the budget.
        category: Category,
        /// How much more was spent than budgeted.
        by: f64,
    },
    /// Spending is within the budget.
    Used {
        /// The category with the budget.
        category: Category,
        /// The share of the budget spent, rounded to a whole percentage.
        percent: u32,
    },
}

impl Insight {
    /// The category the insight is about.
    pub fn category(&self) -> Category {
        match self {
            Insight::NoSpending { category }
            | Insight::Exceeded { category, .. }
            | Insight::Used { category, .. } => *category,
        }
    }

    fn kind(&self) -> &'static str {
        match self {
            Insight::NoSpending { .. } => "noSpending",
            Insight::Exceeded { .. } => "exceeded",
            Insight::Used { .. } => "used",
        }
    }
}

impl Display for Insight {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Insight::NoSpending { category } => {
                write!(f, "No spending yet in {category} this month.")
            }
            Insight::Exceeded { category, by } => {
                // Halves round away from zero, e.g. 0.125 is shown as 0.13.
                let by = (by * 100.0).round() / 100.0;
                write!(f, "Exceeded {category} budget by {by:.2}.")
            }
            Insight::Used { category, percent } => {
                write!(f, "Used {percent}% of {category} budget.")
            }
        }
    }
}

impl Serialize for Insight {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("Insight", 3)?;
        state.serialize_field("category", &self.category())?;
        state.serialize_field("kind", self.kind())?;
        state.serialize_field("message", &self.to_string())?;
        state.end()
    }
}

/// Produce one insight per category that has a budget set, in category order.
///
/// Categories without a budget get no insight. A zero budget is still a budget:
/// it reports no spending until something is spent and is exceeded after that.
pub fn generate_insights(budgets: &BudgetSet, totals: &BTreeMap<Category, f64>) -> Vec<Insight> {
    Category::ALL
        .into_iter()
        .filter_map(|category| {
            let budget = budgets.get(category)?;
            let spent = totals.get(&category).copied().unwrap_or(0.0);

            let insight = if spent == 0.0 {
                Insight::NoSpending { category }
            } else if spent > budget {
                Insight::Exceeded {
                    category,
                    by: spent - budget,
                }
            } else {
                Insight::Used {
                    category,
                    percent: (spent / budget * 100.0).round() as u32,
                }
            };

            Some(insight)
        })
        .collect()
}
