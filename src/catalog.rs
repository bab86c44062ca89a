//! Catalog

use rustc_hash::FxHashMap;

use crate::products::{Product, ProductId};

/// Products offered by the shop, ordered by id.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    products: Vec<Product>,
    index: FxHashMap<ProductId, usize>,
}

impl Catalog {
    /// Build a catalog. Products are sorted by id; on duplicate ids the
    /// last one wins.
    pub fn new(products: impl IntoIterator<Item = Product>) -> Self {
        let mut by_id: FxHashMap<ProductId, Product> = FxHashMap::default();

        for product in products {
            by_id.insert(product.id, product);
        }

        let mut products: Vec<Product> = by_id.into_values().collect();
        products.sort_by_key(|product| product.id);

        let index = products
            .iter()
            .enumerate()
            .map(|(position, product)| (product.id, position))
            .collect();

        Self { products, index }
    }

    /// Look up a product.
    pub fn get(&self, id: ProductId) -> Option<&Product> {
        self.index
            .get(&id)
            .and_then(|position| self.products.get(*position))
    }

    /// Products ordered by id.
    pub fn iter(&self) -> impl Iterator<Item = &Product> {
        self.products.iter()
    }

    /// Number of products.
    pub fn len(&self) -> usize {
        self.products.len()
    }

    /// Check if the catalog has no products.
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}
