//! BeeShop
//!
//! Shopping cart engine for the BeeShop storefront: a persisted cart store,
//! pure cart and checkout view models, notification banners, and order and
//! contact submission behind gateway traits.

pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod config;
pub mod contact;
pub mod fixtures;
pub mod items;
pub mod notifications;
pub mod observability;
pub mod prelude;
pub mod pricing;
pub mod products;
pub mod settings;
pub mod storage;
pub mod store;
pub mod storefront;
pub mod utils;
pub mod validation;
pub mod view;
