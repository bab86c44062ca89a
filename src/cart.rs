//! Cart

use std::num::NonZeroU32;

use rust_decimal::Decimal;
use rustc_hash::FxHashSet;
use thiserror::Error;

use crate::{items::LineItem, pricing::total_amount, products::ProductId};

/// Errors related to cart mutation or snapshot decoding.
#[derive(Debug, Error)]
pub enum CartError {
    /// A line item cannot be added with a zero quantity.
    #[error("Quantity for product {0} must be at least 1")]
    InvalidQuantity(ProductId),

    /// A line item cannot carry a negative unit price.
    #[error("Price {1} for product {0} is negative")]
    NegativePrice(ProductId, Decimal),

    /// The persisted snapshot lists the same product more than once.
    #[error("Product {0} appears more than once in the snapshot")]
    DuplicateItem(ProductId),

    /// The cart total would not fit in a decimal amount.
    #[error("Cart total exceeds the largest supported amount")]
    AmountOverflow,

    /// The snapshot could not be converted to or from JSON.
    #[error("Invalid cart snapshot: {0}")]
    Json(#[from] serde_json::Error),
}

/// Ordered collection of line items, at most one per product.
///
/// The total of a cart always fits in a [`Decimal`]: mutations that would
/// overflow it are refused with [`CartError::AmountOverflow`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Cart {
    items: Vec<LineItem>,
}

impl Cart {
    /// Create an empty cart.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a cart from already-validated line items.
    ///
    /// # Errors
    ///
    /// - [`CartError::DuplicateItem`]: two items share a product id.
    /// - [`CartError::NegativePrice`]: an item has a negative unit price.
    /// - [`CartError::AmountOverflow`]: the items do not have a representable total.
    pub fn with_items(items: impl Into<Vec<LineItem>>) -> Result<Self, CartError> {
        let items = items.into();
        let mut seen = FxHashSet::default();

        for item in &items {
            if !seen.insert(item.id()) {
                return Err(CartError::DuplicateItem(item.id()));
            }

            if item.unit_price() < Decimal::ZERO {
                return Err(CartError::NegativePrice(item.id(), item.unit_price()));
            }
        }

        total_amount(&items).ok_or(CartError::AmountOverflow)?;

        Ok(Self { items })
    }

    /// Decode a cart from its JSON snapshot.
    ///
    /// # Errors
    ///
    /// Returns a [`CartError`] if the JSON is malformed or the decoded items
    /// break the cart invariants.
    pub fn from_json(raw: &str) -> Result<Self, CartError> {
        let items: Vec<LineItem> = serde_json::from_str(raw)?;

        Self::with_items(items)
    }

    /// Encode the cart as a JSON array of line items.
    ///
    /// # Errors
    ///
    /// Returns a [`CartError::Json`] if serialization fails.
    pub fn to_json(&self) -> Result<String, CartError> {
        Ok(serde_json::to_string(&self.items)?)
    }

    /// Add `quantity` units of a product, merging with an existing line.
    ///
    /// Returns the resulting quantity of that line. A merged line keeps its
    /// original name and price.
    ///
    /// # Errors
    ///
    /// - [`CartError::InvalidQuantity`]: `quantity` is zero.
    /// - [`CartError::NegativePrice`]: `unit_price` is below zero.
    /// - [`CartError::AmountOverflow`]: the new total would not be representable.
    pub fn add(
        &mut self,
        id: ProductId,
        name: &str,
        unit_price: Decimal,
        quantity: u32,
    ) -> Result<u32, CartError> {
        let quantity = NonZeroU32::new(quantity).ok_or(CartError::InvalidQuantity(id))?;

        if unit_price < Decimal::ZERO {
            return Err(CartError::NegativePrice(id, unit_price));
        }

        let total = self.total_amount();

        if let Some(existing) = self.get_mut(id) {
            let merged = existing.quantity().saturating_add(quantity.get());
            let added = existing
                .unit_price()
                .checked_mul(Decimal::from(merged - existing.quantity()));

            added
                .and_then(|added| total.checked_add(added))
                .ok_or(CartError::AmountOverflow)?;

            existing.increase(quantity);

            return Ok(existing.quantity());
        }

        unit_price
            .checked_mul(Decimal::from(quantity.get()))
            .and_then(|added| total.checked_add(added))
            .ok_or(CartError::AmountOverflow)?;

        self.items.push(LineItem::new(id, name, unit_price, quantity));

        Ok(quantity.get())
    }

    /// Remove the line for `id`, returning it if it was present.
    pub fn remove(&mut self, id: ProductId) -> Option<LineItem> {
        let position = self.items.iter().position(|item| item.id() == id)?;

        Some(self.items.remove(position))
    }

    /// Set the quantity of an existing line. Zero or below removes it;
    /// values above `u32::MAX` are clamped.
    ///
    /// Returns `Ok(None)` when the product is not in the cart.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::AmountOverflow`], leaving the line unchanged, if
    /// the new total would not be representable.
    pub fn set_quantity(
        &mut self,
        id: ProductId,
        quantity: i64,
    ) -> Result<Option<QuantityChange>, CartError> {
        if quantity <= 0 {
            return Ok(self.remove(id).map(QuantityChange::Removed));
        }

        let quantity = u32::try_from(quantity)
            .ok()
            .and_then(NonZeroU32::new)
            .unwrap_or(NonZeroU32::MAX);
        let total = self.total_amount();

        let Some(item) = self.get_mut(id) else {
            return Ok(None);
        };

        let current = item.subtotal().ok_or(CartError::AmountOverflow)?;

        item.unit_price()
            .checked_mul(Decimal::from(quantity.get()))
            .and_then(|updated| total.checked_sub(current)?.checked_add(updated))
            .ok_or(CartError::AmountOverflow)?;

        item.set_quantity(quantity);

        Ok(Some(QuantityChange::Updated(quantity.get())))
    }

    /// Remove every line.
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Line for `id`, if present.
    pub fn get(&self, id: ProductId) -> Option<&LineItem> {
        self.items.iter().find(|item| item.id() == id)
    }

    fn get_mut(&mut self, id: ProductId) -> Option<&mut LineItem> {
        self.items.iter_mut().find(|item| item.id() == id)
    }

    /// Iterate over the lines in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &LineItem> {
        self.items.iter()
    }

    /// Lines in insertion order.
    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    /// Sum of all quantities.
    pub fn total_item_count(&self) -> u64 {
        self.items.iter().map(|item| u64::from(item.quantity())).sum()
    }

    /// Sum of `unit_price * quantity` over all lines.
    pub fn total_amount(&self) -> Decimal {
        // Every mutation checks the total, so the sum cannot overflow here.
        total_amount(&self.items).unwrap_or(Decimal::MAX)
    }

    /// Number of distinct lines.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Check if the cart has no lines.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Outcome of [`Cart::set_quantity`] on a line that exists.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuantityChange {
    /// The line now has this quantity.
    Updated(u32),

    /// The requested quantity was zero or below, so the line was dropped.
    Removed(LineItem),
}
