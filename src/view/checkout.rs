//! Checkout modal

use rust_decimal::Decimal;
use rusty_money::iso::Currency;

use crate::{cart::Cart, checkout::CheckoutField, items::LineItem, pricing::format_price};

/// Modal heading.
pub const CHECKOUT_TITLE: &str = "Finalizează Comanda";

/// Heading above the order summary.
pub const SUMMARY_HEADING: &str = "Sumar Comandă";

/// Input widget used for a form field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// Single-line text.
    Text,

    /// Email input.
    Email,

    /// Telephone input.
    Tel,

    /// Multi-line text area.
    TextArea {
        /// Visible rows.
        rows: u8,
    },
}

/// One input in the checkout form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormField {
    /// Which customer detail the input collects.
    pub field: CheckoutField,

    /// Visible label.
    pub label: &'static str,

    /// Widget type.
    pub kind: FieldKind,

    /// Whether the browser should refuse to submit it blank.
    pub required: bool,
}

/// Inputs of the checkout form, in display order.
pub const CHECKOUT_FIELDS: [FormField; 4] = [
    FormField {
        field: CheckoutField::Name,
        label: "Numele tău *",
        kind: FieldKind::Text,
        required: true,
    },
    FormField {
        field: CheckoutField::Email,
        label: "Email *",
        kind: FieldKind::Email,
        required: true,
    },
    FormField {
        field: CheckoutField::Phone,
        label: "Telefon *",
        kind: FieldKind::Tel,
        required: true,
    },
    FormField {
        field: CheckoutField::Address,
        label: "Adresa de livrare *",
        kind: FieldKind::TextArea { rows: 3 },
        required: true,
    },
];

/// One read-only row of the order summary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummaryLine {
    /// `"<name> x<quantity>"`.
    pub label: String,

    /// Formatted `unit_price * quantity`.
    pub subtotal: String,
}

/// Read-only order summary shown under the form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderSummary {
    /// Per-item rows.
    pub lines: Vec<SummaryLine>,

    /// Formatted grand total.
    pub total: String,
}

/// Checkout overlay, snapshotted from the cart when it was opened.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckoutModal {
    items: Vec<LineItem>,
    total: Decimal,
    currency: &'static Currency,
}

impl CheckoutModal {
    pub(crate) fn snapshot(cart: &Cart, currency: &'static Currency) -> Self {
        Self {
            items: cart.items().to_vec(),
            total: cart.total_amount(),
            currency,
        }
    }

    /// Modal heading.
    pub fn title(&self) -> &'static str {
        CHECKOUT_TITLE
    }

    /// Form inputs, in display order.
    pub fn fields(&self) -> &'static [FormField] {
        &CHECKOUT_FIELDS
    }

    /// Lines captured at open time.
    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    /// Total captured at open time.
    pub fn total(&self) -> Decimal {
        self.total
    }

    /// Currency of the captured amounts.
    pub fn currency(&self) -> &'static Currency {
        self.currency
    }

    /// Summary rows and total, formatted.
    pub fn summary(&self) -> OrderSummary {
        OrderSummary {
            lines: self
                .items
                .iter()
                .map(|item| SummaryLine {
                    label: format!("{} x{}", item.name(), item.quantity()),
                    subtotal: item
                        .subtotal()
                        .map_or_else(String::new, |subtotal| format_price(subtotal, self.currency)),
                })
                .collect(),
            total: format!("Total: {}", format_price(self.total, self.currency)),
        }
    }
}
