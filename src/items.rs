//! Items

use std::num::NonZeroU32;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::products::ProductId;

/// One product entry in the cart, with its quantity.
///
/// Serialized in the persisted slot as `{"id", "name", "price", "quantity"}`
/// with the price written as an exact JSON number.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItem {
    id: ProductId,

    name: String,

    #[serde(rename = "price", with = "rust_decimal::serde::arbitrary_precision")]
    unit_price: Decimal,

    quantity: NonZeroU32,
}

impl LineItem {
    /// Creates a new line item
    pub fn new(
        id: ProductId,
        name: impl Into<String>,
        unit_price: Decimal,
        quantity: NonZeroU32,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            unit_price,
            quantity,
        }
    }

    /// Product identifier
    pub fn id(&self) -> ProductId {
        self.id
    }

    /// Display name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Price of a single unit
    pub fn unit_price(&self) -> Decimal {
        self.unit_price
    }

    /// Number of units, never zero
    pub fn quantity(&self) -> u32 {
        self.quantity.get()
    }

    /// `unit_price * quantity`, or `None` if it does not fit in a [`Decimal`]
    pub fn subtotal(&self) -> Option<Decimal> {
        self.unit_price.checked_mul(Decimal::from(self.quantity.get()))
    }

    pub(crate) fn increase(&mut self, by: NonZeroU32) {
        self.quantity = self.quantity.saturating_add(by.get());
    }

    pub(crate) fn set_quantity(&mut self, quantity: NonZeroU32) {
        self.quantity = quantity;
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    fn qty(n: u32) -> NonZeroU32 {
        NonZeroU32::new(n).unwrap_or(NonZeroU32::MIN)
    }

    #[test]
    fn subtotal_multiplies_price_by_quantity() {
        let item = LineItem::new(ProductId::new(1), "Propolis", Decimal::new(8550, 2), qty(3));

        assert_eq!(item.subtotal(), Some(Decimal::new(25650, 2)));
    }

    #[test]
    fn subtotal_past_decimal_max_is_none() {
        let item = LineItem::new(ProductId::new(1), "Big", Decimal::MAX, qty(2));

        assert_eq!(item.subtotal(), None);
    }

    #[test]
    fn increase_saturates_at_max() {
        let mut item = LineItem::new(ProductId::new(1), "Polen", Decimal::ONE, NonZeroU32::MAX);

        item.increase(qty(5));

        assert_eq!(item.quantity(), u32::MAX);
    }

    #[test]
    fn serializes_price_as_number() -> TestResult {
        let item = LineItem::new(ProductId::new(2), "Tei", Decimal::new(5500, 2), qty(2));

        let json = serde_json::to_string(&item)?;

        assert_eq!(json, r#"{"id":2,"name":"Tei","price":55.00,"quantity":2}"#);

        Ok(())
    }

    #[test]
    fn keeps_every_digit_of_large_prices() -> TestResult {
        let price = Decimal::new(1_234_567_890_123_456_789, 2);
        let item = LineItem::new(ProductId::new(7), "Stup", price, qty(1));

        let json = serde_json::to_string(&item)?;
        let restored: LineItem = serde_json::from_str(&json)?;

        assert!(json.contains(r#""price":12345678901234567.89"#), "{json}");
        assert_eq!(restored.unit_price(), price);
        assert_eq!(restored, item);

        Ok(())
    }

    #[test]
    fn deserializes_integer_and_fractional_prices() -> TestResult {
        let whole: LineItem =
            serde_json::from_str(r#"{"id":1,"name":"Salcam","price":45,"quantity":1}"#)?;
        let fractional: LineItem =
            serde_json::from_str(r#"{"id":3,"name":"Ceara","price":25.5,"quantity":4}"#)?;

        assert_eq!(whole.unit_price(), Decimal::from(45));
        assert_eq!(fractional.unit_price(), Decimal::new(255, 1));
        assert_eq!(fractional.quantity(), 4);

        Ok(())
    }

    #[test]
    fn rejects_zero_quantity() {
        let result =
            serde_json::from_str::<LineItem>(r#"{"id":1,"name":"Salcam","price":45,"quantity":0}"#);

        assert!(result.is_err(), "zero quantity must not deserialize");
    }
}
