//! BeeShop prelude.
//!
//! Convenience exports for common library consumers.

pub use crate::{
    cart::{Cart, CartError, QuantityChange},
    catalog::Catalog,
    contact::{ContactError, ContactForm, ContactGateway, ContactInbox},
    checkout::{
        CheckoutError, CheckoutField, CheckoutForm, FieldProblem, FormErrors, OrderConfirmation,
        OrderError, OrderGateway, OrderPayload, SimulatedGateway,
    },
    items::LineItem,
    notifications::{Notification, NotificationKey, Notifications, Severity},
    pricing::format_price,
    products::{Product, ProductId},
    settings::ShopSettings,
    storage::{FileStorage, MemoryStorage, Storage, StorageError},
    store::{CartStore, QuantityUpdate, StoreError},
    storefront::Storefront,
    validation::{is_valid_email, is_valid_phone},
    view::{CartItemsView, CartLineView, CartView, CartViewModel, CheckoutModal, Panels, ScrollReveal},
};
