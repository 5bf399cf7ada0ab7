//! The request body used to create and edit transactions.

use serde::{Deserialize, Serialize};
use time::{Date, macros::format_description};

use crate::{Error, category::Category, transaction::NewTransaction};

/// The JSON body for creating or replacing a transaction.
///
/// Every field is optional at the parsing stage so that a missing field is
/// reported by name instead of as a generic parse failure.
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct TransactionForm {
    /// What the transaction was for.
    pub description: Option<String>,
    /// How much was spent.
    pub amount: Option<f64>,
    /// The date in the format `YYYY-MM-DD`.
    pub date: Option<String>,
    /// The name of the category, e.g. "Food".
    pub category: Option<String>,
}

impl TransactionForm {
    /// Check that every field is present and valid.
    ///
    /// Presence is checked for all fields before any value is parsed, so a
    /// request missing a field is always rejected as [Error::MissingField].
    ///
    /// # Errors
    /// This function will return a:
    /// - [Error::MissingField] if a field is absent or empty,
    /// - [Error::InvalidField] if the date or amount cannot be used,
    /// - or [Error::InvalidCategory] if the category is not one of the fixed categories.
    pub fn validate(self) -> Result<NewTransaction, Error> {
        let description = self
            .description
            .filter(|description| !description.trim().is_empty())
            .ok_or(Error::MissingField("description"))?;
        let amount = self
            .amount
            .filter(|amount| *amount != 0.0)
            .ok_or(Error::MissingField("amount"))?;
        let date = self
            .date
            .filter(|date| !date.is_empty())
            .ok_or(Error::MissingField("date"))?;
        let category = self
            .category
            .filter(|category| !category.is_empty())
            .ok_or(Error::MissingField("category"))?;

        let date = parse_date(&date)?;
        let category: Category = category.parse()?;

        NewTransaction::new(&description, amount, date, category)
    }
}

fn parse_date(raw: &str) -> Result<Date, Error> {
    Date::parse(raw, format_description!("[year]-[month]-[day]")).map_err(|error| {
        Error::InvalidField {
            field: "date",
            reason: format!("expected a date in the format YYYY-MM-DD ({error})"),
        }
    })
}
