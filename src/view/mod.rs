//! Views
//!
//! Pure projections from cart state onto render models. Adapters (a browser
//! front end, the CLI) turn these into actual surfaces; nothing here touches
//! a document tree.

use rust_decimal::Decimal;
use rusty_money::iso::Currency;

use crate::{cart::Cart, pricing::format_price, products::ProductId};

pub mod checkout;
pub mod panels;
pub mod scroll;

pub use checkout::{
    CHECKOUT_TITLE, CheckoutModal, FieldKind, FormField, OrderSummary, SUMMARY_HEADING,
    SummaryLine,
};
pub use panels::Panels;
pub use scroll::ScrollReveal;

/// Placeholder shown in place of the item list when the cart is empty.
pub const EMPTY_CART_MESSAGE: &str = "Coșul tău este gol";

/// Render model for an item line in the cart panel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartLineView {
    /// Product the line belongs to.
    pub id: ProductId,

    /// Product name, also used as the image alt text.
    pub name: String,

    /// Formatted unit price.
    pub unit_price: String,

    /// Current quantity.
    pub quantity: u32,

    /// Quantity requested by the `-` button.
    pub decrement_to: i64,

    /// Quantity requested by the `+` button.
    pub increment_to: i64,
}

/// Contents of the item list surface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CartItemsView {
    /// Placeholder message for an empty cart.
    Empty(String),

    /// One entry per line, in cart order.
    Lines(Vec<CartLineView>),
}

/// Render model for the whole cart panel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartViewModel {
    /// Value of the item count badge.
    pub item_count: u64,

    /// Item list surface.
    pub items: CartItemsView,

    /// Formatted cart total.
    pub total: String,
}

/// Renders carts in a fixed currency.
#[derive(Debug, Clone, Copy)]
pub struct CartView {
    currency: &'static Currency,
}

impl CartView {
    /// Create a view that formats amounts in `currency`.
    pub fn new(currency: &'static Currency) -> Self {
        Self { currency }
    }

    /// Currency used for formatting.
    pub fn currency(&self) -> &'static Currency {
        self.currency
    }

    /// Rebuild the cart panel model from scratch.
    pub fn render(&self, cart: &Cart) -> CartViewModel {
        let items = if cart.is_empty() {
            CartItemsView::Empty(EMPTY_CART_MESSAGE.to_string())
        } else {
            CartItemsView::Lines(
                cart.iter()
                    .map(|item| CartLineView {
                        id: item.id(),
                        name: item.name().to_string(),
                        unit_price: self.format(item.unit_price()),
                        quantity: item.quantity(),
                        decrement_to: i64::from(item.quantity()) - 1,
                        increment_to: i64::from(item.quantity()) + 1,
                    })
                    .collect(),
            )
        };

        CartViewModel {
            item_count: cart.total_item_count(),
            items,
            total: self.format(cart.total_amount()),
        }
    }

    /// Snapshot the cart into a checkout modal.
    ///
    /// The modal keeps its own copy of the lines, so later cart changes do
    /// not leak into it.
    pub fn open_checkout(&self, cart: &Cart) -> CheckoutModal {
        CheckoutModal::snapshot(cart, self.currency)
    }

    fn format(&self, amount: Decimal) -> String {
        format_price(amount, self.currency)
    }
}
