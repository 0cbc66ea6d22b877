use rust_decimal::Decimal;

pub use crate::entity::products::Model as Product;

/// Field set written by the record store on insert and update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductRecord {
    pub title: String,
    pub cost: Decimal,
    pub description: String,
    pub product_image: Option<String>,
}

/// `cost` in hundredths, rounded to two places. `None` if it does not fit an `i64`.
pub fn cost_to_cents(cost: Decimal) -> Option<i64> {
    let mut cost = cost.round_dp(2);
    cost.rescale(2);
    i64::try_from(cost.mantissa()).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn converts_to_cents() {
        assert_eq!(cost_to_cents(Decimal::new(15, 1)), Some(150));
        assert_eq!(cost_to_cents(Decimal::new(2, 0)), Some(200));
        assert_eq!(cost_to_cents(Decimal::new(99_999_999, 2)), Some(99_999_999));
    }
}
