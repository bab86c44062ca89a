//! Fixtures

use std::{fs, path::Path};

use rusty_money::iso::Currency;
use thiserror::Error;

use crate::{catalog::Catalog, fixtures::products::ProductsFixture, products::Product};

pub mod products;

/// Product catalog bundled with the crate.
pub const BUNDLED_PRODUCTS_YAML: &str = include_str!("../../fixtures/products/beeshop.yml");

/// Fixture Parsing Errors
#[derive(Debug, Error)]
pub enum FixtureError {
    /// IO error reading fixture files
    #[error("Failed to read fixture file: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing error
    #[error("Failed to parse YAML: {0}")]
    Yaml(#[from] serde_norway::Error),

    /// Invalid price format
    #[error("Invalid price format: {0}")]
    InvalidPrice(String),

    /// Unknown currency code
    #[error("Unknown currency code: {0}")]
    UnknownCurrency(String),

    /// Currency mismatch between products
    #[error("Currency mismatch: expected {0}, found {1}")]
    CurrencyMismatch(String, String),

    /// No products in the fixture
    #[error("No products found in fixture")]
    NoProducts,
}

/// Parse products YAML into a catalog.
///
/// # Errors
///
/// Returns an error if the YAML is malformed, a price cannot be parsed, the
/// products disagree on currency, or there are no products.
pub fn parse_catalog(yaml: &str) -> Result<(Catalog, &'static Currency), FixtureError> {
    let fixture: ProductsFixture = serde_norway::from_str(yaml)?;
    let mut currency: Option<&'static Currency> = None;
    let mut products = Vec::with_capacity(fixture.products.len());

    for product_fixture in fixture.products.into_values() {
        let product = Product::try_from(product_fixture)?;

        if let Some(existing) = currency
            && existing != product.currency
        {
            return Err(FixtureError::CurrencyMismatch(
                existing.iso_alpha_code.to_string(),
                product.currency.iso_alpha_code.to_string(),
            ));
        }

        currency = Some(product.currency);
        products.push(product);
    }

    let currency = currency.ok_or(FixtureError::NoProducts)?;

    Ok((Catalog::new(products), currency))
}

/// Catalog shipped with the crate.
///
/// # Errors
///
/// Returns an error if the bundled fixture is invalid.
pub fn bundled_catalog() -> Result<(Catalog, &'static Currency), FixtureError> {
    parse_catalog(BUNDLED_PRODUCTS_YAML)
}

/// Read a products YAML file into a catalog.
///
/// # Errors
///
/// Returns an error if the file cannot be read or is not a valid catalog.
pub fn load_catalog(path: &Path) -> Result<(Catalog, &'static Currency), FixtureError> {
    let contents = fs::read_to_string(path)?;

    parse_catalog(&contents)
}
