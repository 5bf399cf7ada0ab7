//! The fixed set of spending categories.

use std::{fmt::Display, str::FromStr};

use rusqlite::types::{FromSql, FromSqlError, FromSqlResult, ToSql, ToSqlOutput, ValueRef};
use serde::{Deserialize, Serialize};

use crate::Error;

/// A spending label attached to every transaction and budget.
///
/// The set is closed. The order of the variants is the order categories are
/// listed in reports and insights.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Category {
    /// Groceries, eating out.
    Food,
    /// Fuel, fares, parking.
    Transportation,
    /// Power, water, internet.
    Utilities,
    /// Rent, mortgage, repairs.
    Housing,
    /// Leisure and hobbies.
    Entertainment,
    /// Medical and pharmacy.
    Healthcare,
    /// General purchases.
    Shopping,
    /// Courses, books, tuition.
    Education,
    /// Money set aside.
    Savings,
    /// Anything else.
    Other,
}

impl Category {
    /// Every category in canonical order.
    pub const ALL: [Category; 10] = [
        Category::Food,
        Category::Transportation,
        Category::Utilities,
        Category::Housing,
        Category::Entertainment,
        Category::Healthcare,
        Category::Shopping,
        Category::Education,
        Category::Savings,
        Category::Other,
    ];

    /// The name of the category as it appears in JSON and in the database.
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Food => "Food",
            Category::Transportation => "Transportation",
            Category::Utilities => "Utilities",
            Category::Housing => "Housing",
            Category::Entertainment => "Entertainment",
            Category::Healthcare => "Healthcare",
            Category::Shopping => "Shopping",
            Category::Education => "Education",
            Category::Savings => "Savings",
            Category::Other => "Other",
        }
    }
}

impl FromStr for Category {
    type Err = Error;

    /// Parse a category from its exact name, e.g. "Food".
    ///
    /// # Errors
    ///
    /// Returns an [Error::InvalidCategory] if `s` does not name a category.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .into_iter()
            .find(|category| category.as_str() == s)
            .ok_or_else(|| Error::InvalidCategory(s.to_owned()))
    }
}

impl Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl ToSql for Category {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(ToSqlOutput::from(self.as_str()))
    }
}

impl FromSql for Category {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        value
            .as_str()?
            .parse()
            .map_err(|error| FromSqlError::Other(Box::new(error)))
    }
}
