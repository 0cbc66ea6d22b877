//! Field rules shared by create and update.

use std::{borrow::Cow, collections::BTreeMap, str::FromStr};

use rust_decimal::Decimal;
use serde::Deserialize;
use validator::{Validate, ValidationError, ValidationErrors};

use crate::models::Product;

/// Field name -> messages, as returned in the `data` of a 400 response.
pub type FieldErrors = BTreeMap<String, Vec<String>>;

/// Largest accepted cost: eight digits, two of them fractional.
const MAX_COST: Decimal = Decimal::from_parts(99_999_999, 0, 0, false, 2);

/// Raw text fields of a product submission. `None` means "not supplied".
#[derive(Debug, Default, Clone, PartialEq, Eq, Deserialize, Validate)]
pub struct ProductFields {
    #[validate(
        required(message = "The title field is required."),
        length(
            min = 3,
            max = 100,
            message = "The title field must be between 3 and 100 characters."
        )
    )]
    pub title: Option<String>,

    #[validate(required(message = "The cost field is required."))]
    pub cost: Option<String>,

    #[validate(
        required(message = "The description field is required."),
        length(
            min = 10,
            max = 500,
            message = "The description field must be between 10 and 500 characters."
        )
    )]
    pub description: Option<String>,
}

/// Fields that passed every rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidFields {
    pub title: String,
    pub cost: Decimal,
    pub description: String,
}

impl ProductFields {
    /// Fill every field the caller left out with the stored value.
    pub fn or_existing(self, existing: &Product) -> Self {
        Self {
            title: self.title.or_else(|| Some(existing.title.clone())),
            cost: self.cost.or_else(|| Some(format_cost(existing.cost()))),
            description: self
                .description
                .or_else(|| Some(existing.description.clone())),
        }
    }

    pub fn into_valid(self) -> Result<ValidFields, ValidationErrors> {
        let mut errors = match self.validate() {
            Ok(()) => ValidationErrors::new(),
            Err(errors) => errors,
        };

        let cost = match self.cost.as_deref().map(parse_cost) {
            Some(Ok(cost)) => Some(cost),
            Some(Err(err)) => {
                errors.add("cost", err);
                None
            }
            None => None,
        };

        match (self.title, cost, self.description) {
            (Some(title), Some(cost), Some(description)) if errors.errors().is_empty() => {
                Ok(ValidFields {
                    title,
                    cost,
                    description,
                })
            }
            _ => Err(errors),
        }
    }
}

fn cost_error(code: &'static str, message: &'static str) -> ValidationError {
    ValidationError::new(code).with_message(Cow::Borrowed(message))
}

/// Parse a cost: a plain decimal, greater than zero, at most two fractional digits.
pub fn parse_cost(raw: &str) -> Result<Decimal, ValidationError> {
    let raw = raw.trim();
    let well_formed = !raw.is_empty()
        && raw
            .trim_start_matches(['+', '-'])
            .chars()
            .all(|c| c.is_ascii_digit() || c == '.');
    let cost = well_formed
        .then(|| Decimal::from_str(raw).ok())
        .flatten()
        .ok_or_else(|| cost_error("decimal", "The cost field must contain a decimal number."))?;

    if cost <= Decimal::ZERO {
        return Err(cost_error(
            "greater_than",
            "The cost field must contain a number greater than 0.",
        ));
    }
    if cost.scale() > 2 && cost.normalize().scale() > 2 {
        return Err(cost_error(
            "decimal_places",
            "The cost field must not have more than 2 decimal places.",
        ));
    }
    if cost > MAX_COST {
        return Err(cost_error(
            "max_value",
            "The cost field must not be greater than 999999.99.",
        ));
    }
    Ok(cost)
}

/// Render a cost the way it is stored: exactly two fractional digits.
pub fn format_cost(cost: Decimal) -> String {
    let mut cost = cost.round_dp(2);
    cost.rescale(2);
    cost.to_string()
}

pub fn field_errors(errors: &ValidationErrors) -> FieldErrors {
    errors
        .field_errors()
        .into_iter()
        .map(|(field, errs)| {
            let messages = errs
                .iter()
                .map(|err| {
                    err.message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| err.code.to_string())
                })
                .collect();
            (field.to_string(), messages)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fields(title: &str, cost: &str, description: &str) -> ProductFields {
        ProductFields {
            title: Some(title.into()),
            cost: Some(cost.into()),
            description: Some(description.into()),
        }
    }

    #[test]
    fn accepts_valid_fields() {
        let valid = fields("Pen", "1.50", "A blue ballpoint pen")
            .into_valid()
            .expect("valid");
        assert_eq!(valid.title, "Pen");
        assert_eq!(format_cost(valid.cost), "1.50");
    }

    #[test]
    fn reports_every_bad_field() {
        let errors = fields("Pn", "0", "short")
            .into_valid()
            .expect_err("invalid");
        let map = field_errors(&errors);
        assert_eq!(
            map.keys().map(String::as_str).collect::<Vec<_>>(),
            vec!["cost", "description", "title"]
        );
    }

    #[test]
    fn missing_fields_are_required() {
        let errors = ProductFields::default().into_valid().expect_err("invalid");
        let map = field_errors(&errors);
        assert_eq!(map["title"], vec!["The title field is required."]);
        assert_eq!(map["cost"], vec!["The cost field is required."]);
    }

    #[test]
    fn cost_rules() {
        assert!(parse_cost("2").is_ok());
        assert!(parse_cost(" 2.5 ").is_ok());
        assert!(parse_cost("2.500").is_ok());
        assert_eq!(parse_cost("-1").unwrap_err().code, "greater_than");
        assert_eq!(parse_cost("0.00").unwrap_err().code, "greater_than");
        assert_eq!(parse_cost("abc").unwrap_err().code, "decimal");
        assert_eq!(parse_cost("1e3").unwrap_err().code, "decimal");
        assert_eq!(parse_cost("1.999").unwrap_err().code, "decimal_places");
        assert_eq!(parse_cost("1000000").unwrap_err().code, "max_value");
    }

    #[test]
    fn title_length_counts_characters() {
        let title = "é".repeat(100);
        assert!(fields(&title, "1", "long enough text").into_valid().is_ok());
        let title = "é".repeat(101);
        assert!(fields(&title, "1", "long enough text").into_valid().is_err());
    }

    #[test]
    fn formats_with_two_digits() {
        assert_eq!(format_cost(Decimal::new(15, 1)), "1.50");
        assert_eq!(format_cost(Decimal::new(2, 0)), "2.00");
    }
}
