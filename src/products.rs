//! Products

use std::fmt;

use rust_decimal::Decimal;
use rusty_money::iso::Currency;
use serde::{Deserialize, Serialize};

/// Product identifier, unique within the catalog and within a cart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(u32);

impl ProductId {
    /// Wrap a raw product identifier.
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Raw identifier value.
    pub const fn get(self) -> u32 {
        self.0
    }
}

impl From<u32> for ProductId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Product
#[derive(Debug, Clone)]
pub struct Product {
    /// Product identifier
    pub id: ProductId,

    /// Product name
    pub name: String,

    /// Short marketing description
    pub description: String,

    /// Shelf price
    pub price: Decimal,

    /// Currency of the shelf price
    pub currency: &'static Currency,

    /// Image file name under the shop's static images
    pub image: String,

    /// Catalog category
    pub category: String,
}
