//! Cart store
//!
//! Owns the cart and its persisted slot. Every mutation writes the whole
//! cart back to storage immediately; there is no batching.

use rust_decimal::Decimal;
use rusty_money::{Money, iso::Currency};
use thiserror::Error;
use tracing::{debug, warn};

use crate::{
    cart::{Cart, CartError, QuantityChange},
    items::LineItem,
    pricing::to_money,
    products::ProductId,
    storage::{Storage, StorageError},
};

/// Errors raised by [`CartStore`] operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The mutation itself was refused; the cart is unchanged.
    #[error(transparent)]
    Cart(#[from] CartError),

    /// The cart changed in memory but could not be written to storage.
    #[error("Failed to persist cart: {0}")]
    Storage(#[from] StorageError),
}

/// Result of [`CartStore::set_quantity`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuantityUpdate {
    /// The product is not in the cart; nothing happened.
    Missing,

    /// The line now has this quantity.
    Updated(u32),

    /// The quantity dropped to zero or below and the line was removed.
    Removed(LineItem),
}

/// The cart plus the storage slot it is persisted to.
#[derive(Debug)]
pub struct CartStore<S: Storage> {
    cart: Cart,
    storage: S,
    key: String,
    currency: &'static Currency,
}

impl<S: Storage> CartStore<S> {
    /// Load the cart persisted under `key`.
    ///
    /// A missing, unreadable or malformed snapshot yields an empty cart.
    pub fn load(storage: S, key: impl Into<String>, currency: &'static Currency) -> Self {
        let key = key.into();

        let cart = match storage.get(&key) {
            Ok(Some(raw)) => Cart::from_json(&raw).unwrap_or_else(|error| {
                warn!(%key, %error, "discarding malformed cart snapshot");

                Cart::new()
            }),
            Ok(None) => Cart::new(),
            Err(error) => {
                warn!(%key, %error, "cart storage unreadable, starting empty");

                Cart::new()
            }
        };

        debug!(%key, lines = cart.len(), "cart loaded");

        Self {
            cart,
            storage,
            key,
            currency,
        }
    }

    /// Write the full cart to the slot, overwriting what was there.
    ///
    /// # Errors
    ///
    /// Returns a [`StoreError`] if the cart cannot be encoded or written.
    pub fn persist(&mut self) -> Result<(), StoreError> {
        let raw = self.cart.to_json()?;

        self.storage.set(&self.key, &raw)?;

        Ok(())
    }

    /// Add units of a product, merging with an existing line, and persist.
    ///
    /// Returns the line's new quantity.
    ///
    /// # Errors
    ///
    /// - [`StoreError::Cart`]: zero quantity, negative price or an overflowing
    ///   total; nothing changed.
    /// - [`StoreError::Storage`]: the cart changed but was not persisted.
    pub fn add_item(
        &mut self,
        id: ProductId,
        name: &str,
        unit_price: Decimal,
        quantity: u32,
    ) -> Result<u32, StoreError> {
        let quantity = self.cart.add(id, name, unit_price, quantity)?;

        debug!(%id, quantity, "item added");

        self.persist()?;

        Ok(quantity)
    }

    /// Remove a product's line and persist. Absent products are ignored,
    /// but the cart is still written back.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Storage`] if the cart could not be persisted.
    pub fn remove_item(&mut self, id: ProductId) -> Result<Option<LineItem>, StoreError> {
        let removed = self.cart.remove(id);

        debug!(%id, found = removed.is_some(), "item removed");

        self.persist()?;

        Ok(removed)
    }

    /// Set a line's quantity. Zero or below removes the line.
    ///
    /// Products not in the cart are left alone and nothing is persisted.
    ///
    /// # Errors
    ///
    /// - [`StoreError::Cart`]: the new total would overflow; nothing changed.
    /// - [`StoreError::Storage`]: the cart changed but was not persisted.
    pub fn set_quantity(
        &mut self,
        id: ProductId,
        quantity: i64,
    ) -> Result<QuantityUpdate, StoreError> {
        let update = match self.cart.set_quantity(id, quantity)? {
            None => return Ok(QuantityUpdate::Missing),
            Some(QuantityChange::Updated(quantity)) => QuantityUpdate::Updated(quantity),
            Some(QuantityChange::Removed(item)) => QuantityUpdate::Removed(item),
        };

        debug!(%id, requested = quantity, ?update, "quantity set");

        self.persist()?;

        Ok(update)
    }

    /// Empty the cart and delete its slot.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Storage`] if the slot could not be deleted.
    pub fn clear(&mut self) -> Result<(), StoreError> {
        self.cart.clear();

        debug!(key = %self.key, "cart cleared");

        self.storage.remove(&self.key)?;

        Ok(())
    }

    /// Current cart.
    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    /// Sum of all quantities.
    pub fn total_item_count(&self) -> u64 {
        self.cart.total_item_count()
    }

    /// Sum of `unit_price * quantity` over all lines.
    pub fn total_amount(&self) -> Decimal {
        self.cart.total_amount()
    }

    /// [`total_amount`](Self::total_amount) in the store currency.
    pub fn total_money(&self) -> Money<'static, Currency> {
        to_money(self.total_amount(), self.currency)
    }

    /// Currency the cart is priced in.
    pub fn currency(&self) -> &'static Currency {
        self.currency
    }

    /// Key of the persisted slot.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Underlying storage.
    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Give back the storage, dropping the in-memory cart.
    pub fn into_storage(self) -> S {
        self.storage
    }
}

#[cfg(test)]
mod tests {
    use rusty_money::iso;
    use testresult::TestResult;

    use crate::storage::MemoryStorage;

    use super::*;

    #[derive(Debug, Default)]
    struct BrokenStorage;

    impl Storage for BrokenStorage {
        fn get(&self, _key: &str) -> Result<Option<String>, StorageError> {
            Err(StorageError::Unavailable("offline".to_string()))
        }

        fn set(&mut self, _key: &str, _value: &str) -> Result<(), StorageError> {
            Err(StorageError::Unavailable("offline".to_string()))
        }

        fn remove(&mut self, _key: &str) -> Result<(), StorageError> {
            Err(StorageError::Unavailable("offline".to_string()))
        }
    }

    fn empty_store() -> CartStore<MemoryStorage> {
        CartStore::load(MemoryStorage::new(), "cart", iso::MDL)
    }

    #[test]
    fn widget_scenario() -> TestResult {
        let mut store = empty_store();
        let widget = ProductId::new(1);

        store.add_item(widget, "Widget", Decimal::TEN, 2)?;

        assert_eq!(store.total_item_count(), 2);
        assert_eq!(store.total_amount(), Decimal::from(20));

        store.add_item(widget, "Widget", Decimal::TEN, 1)?;

        assert_eq!(store.cart().get(widget).map(LineItem::quantity), Some(3));
        assert_eq!(store.total_amount(), Decimal::from(30));

        store.set_quantity(widget, 0)?;

        assert!(store.cart().is_empty());
        assert_eq!(store.total_amount(), Decimal::ZERO);
        assert_eq!(store.total_money(), Money::from_minor(0, iso::MDL));

        Ok(())
    }

    #[test]
    fn every_mutation_is_persisted() -> TestResult {
        let mut store = empty_store();

        store.add_item(ProductId::new(1), "Salcam", Decimal::from(45), 1)?;
        assert_eq!(
            Cart::from_json(&store.storage().get("cart")?.unwrap_or_default())?,
            *store.cart()
        );

        store.set_quantity(ProductId::new(1), 4)?;
        assert_eq!(
            Cart::from_json(&store.storage().get("cart")?.unwrap_or_default())?,
            *store.cart()
        );

        store.clear()?;
        assert_eq!(store.storage().get("cart")?, None);
        assert!(store.storage().is_empty());

        Ok(())
    }

    #[test]
    fn cleared_cart_reloads_empty() -> TestResult {
        let mut store = empty_store();
        store.add_item(ProductId::new(2), "Tei", Decimal::from(55), 3)?;

        store.clear()?;
        let reloaded = CartStore::load(store.into_storage(), "cart", iso::MDL);

        assert!(reloaded.cart().is_empty());

        Ok(())
    }

    #[test]
    fn overflowing_snapshot_loads_empty() -> TestResult {
        let mut storage = MemoryStorage::new();
        storage.set(
            "cart",
            r#"[{"id":1,"name":"Big","price":70000000000000000000000000000,"quantity":4000000000}]"#,
        )?;

        let store = CartStore::load(storage, "cart", iso::MDL);

        assert!(store.cart().is_empty());
        assert_eq!(store.total_amount(), Decimal::ZERO);

        Ok(())
    }

    #[test]
    fn overflowing_add_is_refused_and_not_persisted() {
        let mut store = empty_store();

        let result = store.add_item(ProductId::new(1), "Big", Decimal::MAX, 2);

        assert!(matches!(
            result,
            Err(StoreError::Cart(CartError::AmountOverflow))
        ));
        assert!(store.cart().is_empty());
        assert!(store.storage().is_empty());
    }

    #[test]
    fn reload_restores_cart() -> TestResult {
        let mut store = empty_store();
        store.add_item(ProductId::new(1), "Salcam", Decimal::new(4550, 2), 2)?;
        store.add_item(ProductId::new(6), "Lumanari", Decimal::from(35), 1)?;
        let expected = store.cart().clone();

        let reloaded = CartStore::load(store.into_storage(), "cart", iso::MDL);

        assert_eq!(*reloaded.cart(), expected);

        Ok(())
    }

    #[test]
    fn malformed_snapshot_loads_empty() -> TestResult {
        for raw in ["{oops", "null", r#"[{"id":1,"name":"A","price":1,"quantity":-2}]"#] {
            let mut storage = MemoryStorage::new();
            storage.set("cart", raw)?;

            let store = CartStore::load(storage, "cart", iso::MDL);

            assert!(store.cart().is_empty(), "{raw:?} should load as empty");
        }

        Ok(())
    }

    #[test]
    fn unreadable_storage_loads_empty() {
        let store = CartStore::load(BrokenStorage, "cart", iso::MDL);

        assert!(store.cart().is_empty());
    }

    #[test]
    fn failed_write_keeps_memory_state() {
        let mut store = CartStore::load(BrokenStorage, "cart", iso::MDL);

        let result = store.add_item(ProductId::new(1), "Salcam", Decimal::from(45), 1);

        assert!(matches!(result, Err(StoreError::Storage(_))));
        assert_eq!(store.total_item_count(), 1);
    }

    #[test]
    fn remove_missing_id_still_persists() -> TestResult {
        let mut store = empty_store();

        let removed = store.remove_item(ProductId::new(9))?;

        assert!(removed.is_none());
        assert_eq!(store.storage().get("cart")?.as_deref(), Some("[]"));

        Ok(())
    }

    #[test]
    fn set_quantity_on_missing_id_skips_persist() -> TestResult {
        let mut store = empty_store();

        assert_eq!(
            store.set_quantity(ProductId::new(9), 3)?,
            QuantityUpdate::Missing
        );
        assert!(store.storage().is_empty());

        Ok(())
    }
}
